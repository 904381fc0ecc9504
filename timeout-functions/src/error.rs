//! Error types for the timeout greeting functions.
//!
//! Every failure here is an input or plumbing failure. The handlers never
//! recover from one; the error is handed back to the invoking platform, which
//! reports the invocation as failed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error type returned by the greeting handlers.
#[derive(Debug, Error)]
pub enum GreetingError {
    /// A field could not be converted to the type the handler needs.
    #[error("invalid literal for {field}: {value}")]
    Conversion {
        /// The request key that failed to convert
        field: &'static str,
        /// The offending value, rendered as JSON
        value: String,
    },

    /// A required key is absent from the request.
    #[error("missing required key '{field}'")]
    Lookup {
        /// The missing request key
        field: &'static str,
    },

    /// A key is present but holds a value of the wrong JSON type.
    #[error("'{field}' must be {expected}, got {found}")]
    InvalidField {
        /// The request key
        field: &'static str,
        /// Description of the accepted type
        expected: &'static str,
        /// The JSON type that was supplied
        found: &'static str,
    },

    /// The request as a whole is not a JSON object.
    #[error("invocation event must be a JSON object, got {found}")]
    Event {
        /// The JSON type that was supplied
        found: &'static str,
    },

    /// The blocking task running the handler did not run to completion.
    #[error("handler aborted: {message}")]
    Aborted {
        /// Why the task stopped
        message: String,
    },

    /// Writing the greeting to standard output failed.
    #[error("failed to write greeting: {0}")]
    Io(#[from] std::io::Error),
}

impl GreetingError {
    /// Creates a new Conversion error for the given field and raw value.
    pub fn conversion(field: &'static str, value: &serde_json::Value) -> Self {
        Self::Conversion {
            field,
            value: value.to_string(),
        }
    }

    /// Creates a new Lookup error.
    pub fn lookup(field: &'static str) -> Self {
        Self::Lookup { field }
    }

    /// Creates a new InvalidField error describing the value that was found.
    pub fn invalid_field(
        field: &'static str,
        expected: &'static str,
        value: &serde_json::Value,
    ) -> Self {
        Self::InvalidField {
            field,
            expected,
            found: json_type_name(value),
        }
    }

    /// Creates a new Event error describing the value that was found.
    pub fn event(value: &serde_json::Value) -> Self {
        Self::Event {
            found: json_type_name(value),
        }
    }

    /// Returns the error type name reported to the platform.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Conversion { .. } => "ConversionError",
            Self::Lookup { .. } => "LookupError",
            Self::InvalidField { .. } => "InvalidFieldError",
            Self::Event { .. } => "InvalidEventError",
            Self::Aborted { .. } => "HandlerAborted",
            Self::Io(_) => "IoError",
        }
    }

    /// Returns true if the error was caused by the request contents.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Conversion { .. }
                | Self::Lookup { .. }
                | Self::InvalidField { .. }
                | Self::Event { .. }
        )
    }
}

/// Returns the JSON type name of a value, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Error body for a failed invocation, in the shape AWS Lambda reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// The error type/name
    #[serde(rename = "errorType")]
    pub error_type: String,
    /// The error message
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl ErrorObject {
    /// Creates a new ErrorObject.
    pub fn new(error_type: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            error_message: error_message.into(),
        }
    }
}

impl From<&GreetingError> for ErrorObject {
    fn from(error: &GreetingError) -> Self {
        ErrorObject::new(error.error_type(), error.to_string())
    }
}

impl From<GreetingError> for ErrorObject {
    fn from(error: GreetingError) -> Self {
        ErrorObject::from(&error)
    }
}

impl From<tokio::task::JoinError> for GreetingError {
    fn from(error: tokio::task::JoinError) -> Self {
        let message = if error.is_panic() {
            "handler panicked".to_string()
        } else {
            error.to_string()
        };
        Self::Aborted { message }
    }
}
