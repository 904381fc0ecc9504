//! Error types for the local invocation harness.
//!
//! These describe failures of the harness itself. A function that fails or
//! times out is not an error here; it is reported through
//! [`InvocationOutcome`](crate::InvocationOutcome).

use thiserror::Error;

/// Errors that can occur while setting up or running a local invocation.
///
/// # Examples
///
/// ```
/// use timeout_functions_testing::InvokeError;
///
/// let err = InvokeError::InvalidConfiguration("timeout must be positive".to_string());
/// assert!(err.to_string().contains("timeout"));
/// ```
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The invoker configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A response could not be converted to JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The invocation thread or its runtime could not be started.
    #[error("Failed to start invocation: {0}")]
    Spawn(#[from] std::io::Error),
}
