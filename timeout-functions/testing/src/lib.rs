//! Testing utilities for the timeout greeting functions
//!
//! This crate stands in for the serverless platform during tests. It runs a
//! function invocation, enforces the platform's timeout from the outside,
//! and reports what the platform would have seen.
//!
//! # Features
//!
//! - **LocalInvoker**: Invoke the Lambda function, the OpenWhisk action, or any
//!   blocking function under a platform-style deadline
//! - **InvocationOutcome**: Inspect the status, response, error and elapsed time
//! - **RecordingSleeper**: Check requested sleeps without waiting for them
//!
//! # Example
//!
//! ```ignore
//! use serde_json::json;
//! use timeout_functions_testing::{InvokerConfig, InvocationStatus, LocalInvoker};
//!
//! #[tokio::test]
//! async fn test_greeting() {
//!     let invoker = LocalInvoker::new(InvokerConfig::openwhisk()).unwrap();
//!     let outcome = invoker.invoke_openwhisk(json!({"sleepSec": "0"})).await.unwrap();
//!
//!     assert_eq!(outcome.status, InvocationStatus::Succeeded);
//!     assert_eq!(outcome.message(), Some("Hello stranger!"));
//! }
//! ```

pub mod error;
pub mod local_invoker;
pub mod types;

pub use error::InvokeError;
pub use local_invoker::{InvokerConfig, LocalInvoker, Platform};
pub use types::{InvocationOutcome, InvocationStatus};

// Re-export the types tests usually need alongside the invoker
pub use timeout_functions::{
    ErrorObject, GreetingConfig, GreetingError, GreetingHandler, RecordingSleeper, Sleeper,
};
