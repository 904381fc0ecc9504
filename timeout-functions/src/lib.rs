//! # Timeout Greeting Functions
//!
//! Two small serverless functions used to observe how a platform treats a
//! function that runs past its configured timeout. Each one takes a sleep
//! duration and a name, blocks for that long, and then greets the caller.
//!
//! The handlers never enforce a time limit themselves. A sleep longer than
//! the platform timeout ends with the platform killing the invocation, which
//! the handler cannot observe.
//!
//! ## Variants
//!
//! | Platform | Entry point | Input | Output |
//! |---|---|---|---|
//! | AWS Lambda | [`lambda::handler`] `(event, context)` | `sleepSec`, `name` | `{"message": "Hello <name>"}` |
//! | OpenWhisk / IBM Cloud Functions | [`openwhisk::main`] `(args)` | `sleepSec`, optional `name` | `{"message": "Hello <name>!"}` |
//!
//! `sleepSec` may be a number or a numeric string. Anything that does not
//! convert to a non-negative integer fails with
//! [`GreetingError::Conversion`]. A missing `name` fails the Lambda variant
//! with [`GreetingError::Lookup`]; the OpenWhisk variant greets `"stranger"`.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use timeout_functions::openwhisk;
//!
//! let result = openwhisk::main(json!({"sleepSec": "0"})).unwrap();
//! assert_eq!(result, json!({"message": "Hello stranger!"}));
//! ```
//!
//! ## Testing without waiting
//!
//! Build a [`GreetingHandler`] with a [`RecordingSleeper`] to check the
//! requested duration without spending it.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod lambda;
pub mod openwhisk;
pub mod sleep;

pub use config::{GreetingConfig, MissingSleepPolicy, NamePolicy, DEFAULT_NAME};
pub use error::{ErrorObject, GreetingError};
pub use event::{GreetingRequest, GreetingResponse, SleepSeconds, NAME_KEY, SLEEP_KEY};
pub use handler::GreetingHandler;
pub use sleep::{RecordingSleeper, Sleeper, ThreadSleeper};

/// Result type alias for greeting handlers.
pub type GreetingResult<T> = Result<T, GreetingError>;
