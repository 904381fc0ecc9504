//! Request and response types for a greeting invocation.
//!
//! Requests arrive as loosely typed JSON: `sleepSec` may be a number or a
//! numeric string, and `name` may be missing. [`GreetingRequest::from_event`]
//! coerces them into typed values according to a [`GreetingConfig`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{GreetingConfig, MissingSleepPolicy, NamePolicy};
use crate::error::GreetingError;

/// Request key holding the sleep duration.
pub const SLEEP_KEY: &str = "sleepSec";

/// Request key holding the name to greet.
pub const NAME_KEY: &str = "name";

/// A non-negative number of whole seconds to block for.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use timeout_functions::SleepSeconds;
///
/// assert_eq!(SleepSeconds::coerce(&json!("2")).unwrap().as_secs(), 2);
/// assert_eq!(SleepSeconds::coerce(&json!(3)).unwrap().as_secs(), 3);
/// assert!(SleepSeconds::coerce(&json!("abc")).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SleepSeconds(u64);

impl SleepSeconds {
    /// Creates a new SleepSeconds.
    pub fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Converts a JSON value to a sleep duration.
    ///
    /// Mirrors integer conversion in loosely typed runtimes:
    ///
    /// - non-negative integers as is
    /// - booleans as 0 or 1
    /// - finite floats truncated toward zero, so `-0.5` becomes 0
    /// - strings holding a decimal integer, after trimming whitespace, with an
    ///   optional sign and single `_` separators between digits
    ///
    /// Anything that would end up negative, and every other JSON type, is a
    /// conversion error.
    pub fn coerce(value: &Value) -> Result<Self, GreetingError> {
        let invalid = || GreetingError::conversion(SLEEP_KEY, value);
        match value {
            Value::Number(number) => {
                if let Some(seconds) = number.as_u64() {
                    Ok(Self(seconds))
                } else if number.is_i64() {
                    Err(invalid())
                } else {
                    number
                        .as_f64()
                        .filter(|f| f.is_finite() && f.trunc() >= 0.0 && *f < u64::MAX as f64)
                        .map(|f| Self(f.trunc() as u64))
                        .ok_or_else(invalid)
                }
            }
            Value::Bool(flag) => Ok(Self(u64::from(*flag))),
            Value::String(raw) => Self::parse(raw).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        // `_` only between digits.
        if body.is_empty() || body.starts_with('_') || body.ends_with('_') || body.contains("__") {
            return None;
        }
        if !body.bytes().all(|b| b.is_ascii_digit() || b == b'_') {
            return None;
        }

        let digits: String = body.chars().filter(|c| *c != '_').collect();
        let seconds: u64 = digits.parse().ok()?;
        if negative && seconds != 0 {
            return None;
        }
        Some(Self(seconds))
    }

    /// Returns the number of seconds.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Returns the duration to block for.
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }

    /// Returns true if no waiting is requested.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for SleepSeconds {
    fn from(seconds: u64) -> Self {
        Self(seconds)
    }
}

impl std::fmt::Display for SleepSeconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// A validated greeting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingRequest {
    /// How long to block before answering
    pub sleep: SleepSeconds,
    /// Who to greet
    pub name: String,
}

impl GreetingRequest {
    /// Extracts a request from a raw invocation event.
    ///
    /// `sleepSec` is coerced before `name` is looked up, so a request that is
    /// wrong in both places reports the sleep error.
    pub fn from_event(event: &Value, config: &GreetingConfig) -> Result<Self, GreetingError> {
        let fields = event.as_object().ok_or_else(|| GreetingError::event(event))?;

        let sleep = match (fields.get(SLEEP_KEY), config.missing_sleep) {
            (Some(value), _) => SleepSeconds::coerce(value)?,
            (None, MissingSleepPolicy::Lookup) => return Err(GreetingError::lookup(SLEEP_KEY)),
            (None, MissingSleepPolicy::Conversion) => SleepSeconds::coerce(&Value::Null)?,
        };

        let name = match (fields.get(NAME_KEY), &config.name_policy) {
            (Some(Value::String(name)), _) => name.clone(),
            (Some(other), _) => {
                return Err(GreetingError::invalid_field(NAME_KEY, "a string", other))
            }
            (None, NamePolicy::DefaultTo(default)) => default.clone(),
            (None, NamePolicy::Required) => return Err(GreetingError::lookup(NAME_KEY)),
        };

        Ok(Self { sleep, name })
    }
}

/// The response body of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingResponse {
    /// The greeting
    pub message: String,
}

impl GreetingResponse {
    /// Creates a new GreetingResponse.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Converts the response to a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "message": self.message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =========================================================================
    // SleepSeconds coercion
    // =========================================================================

    #[test]
    fn test_coerce_numeric_string() {
        assert_eq!(SleepSeconds::coerce(&json!("2")).unwrap(), SleepSeconds::new(2));
        assert_eq!(SleepSeconds::coerce(&json!("0")).unwrap(), SleepSeconds::new(0));
    }

    #[test]
    fn test_coerce_trims_whitespace_and_plus() {
        assert_eq!(SleepSeconds::coerce(&json!(" 7 ")).unwrap().as_secs(), 7);
        assert_eq!(SleepSeconds::coerce(&json!("+4")).unwrap().as_secs(), 4);
    }

    #[test]
    fn test_coerce_integer() {
        assert_eq!(SleepSeconds::coerce(&json!(5)).unwrap().as_secs(), 5);
    }

    #[test]
    fn test_coerce_float_truncates() {
        assert_eq!(SleepSeconds::coerce(&json!(2.9)).unwrap().as_secs(), 2);
        assert_eq!(SleepSeconds::coerce(&json!(0.5)).unwrap().as_secs(), 0);
        assert_eq!(SleepSeconds::coerce(&json!(-0.5)).unwrap().as_secs(), 0);
    }

    #[test]
    fn test_coerce_negative_zero_string() {
        assert_eq!(SleepSeconds::coerce(&json!("-0")).unwrap(), SleepSeconds::new(0));
        assert_eq!(SleepSeconds::coerce(&json!(" -000 ")).unwrap(), SleepSeconds::new(0));
    }

    #[test]
    fn test_coerce_digit_separators() {
        assert_eq!(SleepSeconds::coerce(&json!("1_000")).unwrap().as_secs(), 1000);
        assert_eq!(SleepSeconds::coerce(&json!("+1_2_3")).unwrap().as_secs(), 123);
    }

    #[test]
    fn test_coerce_bool() {
        assert_eq!(SleepSeconds::coerce(&json!(true)).unwrap(), SleepSeconds::from(1));
        assert_eq!(SleepSeconds::coerce(&json!(false)).unwrap(), SleepSeconds::from(0));
    }

    #[test]
    fn test_coerce_rejects_non_numeric() {
        for value in [
            json!("abc"),
            json!("2.5"),
            json!(""),
            json!("   "),
            json!("-3"),
            json!("-"),
            json!("+-1"),
            json!("_1"),
            json!("1_"),
            json!("1__0"),
            json!(-3),
            json!(-1.5),
            json!(null),
            json!([1]),
            json!({"seconds": 1}),
        ] {
            let err = SleepSeconds::coerce(&value).unwrap_err();
            assert!(
                matches!(err, GreetingError::Conversion { field: "sleepSec", .. }),
                "expected conversion error for {}",
                value
            );
        }
    }

    #[test]
    fn test_sleep_seconds_duration() {
        let sleep = SleepSeconds::new(3);
        assert_eq!(sleep.as_duration(), Duration::from_secs(3));
        assert!(!sleep.is_zero());
        assert!(SleepSeconds::default().is_zero());
        assert_eq!(sleep.to_string(), "3s");
    }

    // =========================================================================
    // GreetingRequest extraction
    // =========================================================================

    #[test]
    fn test_from_event_lambda() {
        let event = json!({"sleepSec": "2", "name": "World"});
        let request = GreetingRequest::from_event(&event, &GreetingConfig::lambda()).unwrap();
        assert_eq!(request.sleep.as_secs(), 2);
        assert_eq!(request.name, "World");
    }

    #[test]
    fn test_from_event_missing_name_lambda() {
        let event = json!({"sleepSec": 1});
        let err = GreetingRequest::from_event(&event, &GreetingConfig::lambda()).unwrap_err();
        assert!(matches!(err, GreetingError::Lookup { field: "name" }));
    }

    #[test]
    fn test_from_event_missing_name_openwhisk() {
        let event = json!({"sleepSec": 1});
        let request = GreetingRequest::from_event(&event, &GreetingConfig::openwhisk()).unwrap();
        assert_eq!(request.name, "stranger");
    }

    #[test]
    fn test_from_event_missing_sleep() {
        let event = json!({"name": "World"});

        let err = GreetingRequest::from_event(&event, &GreetingConfig::lambda()).unwrap_err();
        assert!(matches!(err, GreetingError::Lookup { field: "sleepSec" }));

        let err = GreetingRequest::from_event(&event, &GreetingConfig::openwhisk()).unwrap_err();
        assert!(matches!(err, GreetingError::Conversion { field: "sleepSec", .. }));
    }

    #[test]
    fn test_from_event_sleep_error_wins() {
        let event = json!({"sleepSec": "abc"});
        let err = GreetingRequest::from_event(&event, &GreetingConfig::lambda()).unwrap_err();
        assert!(matches!(err, GreetingError::Conversion { .. }));
    }

    #[test]
    fn test_from_event_non_string_name() {
        for config in [GreetingConfig::lambda(), GreetingConfig::openwhisk()] {
            let event = json!({"sleepSec": 0, "name": null});
            let err = GreetingRequest::from_event(&event, &config).unwrap_err();
            assert!(matches!(err, GreetingError::InvalidField { field: "name", found: "null", .. }));
        }
    }

    #[test]
    fn test_from_event_not_an_object() {
        let err = GreetingRequest::from_event(&json!("hi"), &GreetingConfig::lambda()).unwrap_err();
        assert!(matches!(err, GreetingError::Event { found: "string" }));
    }

    #[test]
    fn test_from_event_ignores_extra_keys() {
        let event = json!({"sleepSec": 0, "name": "A", "extra": [1, 2, 3]});
        assert!(GreetingRequest::from_event(&event, &GreetingConfig::lambda()).is_ok());
    }

    #[test]
    fn test_response_to_value() {
        let response = GreetingResponse::new("Hello World");
        assert_eq!(response.to_value(), json!({"message": "Hello World"}));
        assert_eq!(serde_json::to_value(&response).unwrap(), response.to_value());
    }
}
