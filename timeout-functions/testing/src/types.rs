//! Core types for the local invocation harness.
//!
//! This module defines how the outcome of one locally invoked function is
//! reported: its final status, its response or error, and how long the
//! platform waited for it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use timeout_functions::ErrorObject;

/// Final status of a local invocation.
///
/// # Examples
///
/// ```
/// use timeout_functions_testing::InvocationStatus;
///
/// assert!(InvocationStatus::Succeeded.is_success());
/// assert!(InvocationStatus::TimedOut.is_failure());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationStatus {
    /// The function returned a response before the deadline
    Succeeded,
    /// The function returned an error before the deadline
    Failed,
    /// The deadline passed while the function was still running
    TimedOut,
}

impl InvocationStatus {
    /// Returns true if this status represents a successful completion.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns true if this status represents a failure of any kind.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::TimedOut)
    }
}

impl std::fmt::Display for InvocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
            Self::TimedOut => write!(f, "TimedOut"),
        }
    }
}

/// What the platform observed for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationOutcome {
    /// Final status
    pub status: InvocationStatus,
    /// Response body, when the function succeeded
    pub response: Option<Value>,
    /// Error body, when the function failed or timed out
    pub error: Option<ErrorObject>,
    /// Time between dispatch and the platform recording the outcome
    pub elapsed: Duration,
}

impl InvocationOutcome {
    /// Error type reported for an invocation that exceeded its deadline.
    pub const TIMEOUT_ERROR_TYPE: &'static str = "Task.TimedOut";

    /// Creates a successful outcome.
    pub fn succeeded(response: Value, elapsed: Duration) -> Self {
        Self {
            status: InvocationStatus::Succeeded,
            response: Some(response),
            error: None,
            elapsed,
        }
    }

    /// Creates a failed outcome.
    pub fn failed(error: ErrorObject, elapsed: Duration) -> Self {
        Self {
            status: InvocationStatus::Failed,
            response: None,
            error: Some(error),
            elapsed,
        }
    }

    /// Creates a timed out outcome for the given deadline.
    pub fn timed_out(deadline: Duration, elapsed: Duration) -> Self {
        Self {
            status: InvocationStatus::TimedOut,
            response: None,
            error: Some(ErrorObject::new(
                Self::TIMEOUT_ERROR_TYPE,
                format!("Task timed out after {:.2} seconds", deadline.as_secs_f64()),
            )),
            elapsed,
        }
    }

    /// Returns the `message` field of the response, if there is one.
    pub fn message(&self) -> Option<&str> {
        self.response.as_ref()?.get("message")?.as_str()
    }

    /// Returns the reported error type, if there is one.
    pub fn error_type(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.error_type.as_str())
    }

    /// Returns true if the invocation succeeded.
    pub fn is_succeeded(&self) -> bool {
        self.status == InvocationStatus::Succeeded
    }

    /// Returns true if the invocation failed with an error.
    pub fn is_failed(&self) -> bool {
        self.status == InvocationStatus::Failed
    }

    /// Returns true if the invocation exceeded its deadline.
    pub fn is_timed_out(&self) -> bool {
        self.status == InvocationStatus::TimedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invocation_status_success() {
        assert!(InvocationStatus::Succeeded.is_success());
        assert!(!InvocationStatus::Failed.is_success());
        assert!(!InvocationStatus::TimedOut.is_success());
    }

    #[test]
    fn test_invocation_status_failure() {
        assert!(!InvocationStatus::Succeeded.is_failure());
        assert!(InvocationStatus::Failed.is_failure());
        assert!(InvocationStatus::TimedOut.is_failure());
    }

    #[test]
    fn test_invocation_status_display() {
        assert_eq!(InvocationStatus::TimedOut.to_string(), "TimedOut");
    }

    #[test]
    fn test_succeeded_outcome() {
        let outcome = InvocationOutcome::succeeded(json!({"message": "Hello World"}), Duration::ZERO);
        assert!(outcome.is_succeeded());
        assert_eq!(outcome.message(), Some("Hello World"));
        assert!(outcome.error_type().is_none());
    }

    #[test]
    fn test_failed_outcome() {
        let outcome = InvocationOutcome::failed(ErrorObject::new("LookupError", "missing"), Duration::ZERO);
        assert!(outcome.is_failed());
        assert!(outcome.message().is_none());
        assert_eq!(outcome.error_type(), Some("LookupError"));
    }

    #[test]
    fn test_timed_out_outcome() {
        let outcome = InvocationOutcome::timed_out(Duration::from_secs(3), Duration::from_secs(3));
        assert!(outcome.is_timed_out());
        assert_eq!(outcome.error_type(), Some("Task.TimedOut"));
        assert_eq!(
            outcome.error.unwrap().error_message,
            "Task timed out after 3.00 seconds"
        );
    }
}
