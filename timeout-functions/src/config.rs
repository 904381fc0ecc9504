//! Configuration types for the greeting handlers.
//!
//! The two deployable functions share one handler and differ only in how
//! they treat their input and shape their greeting. [`GreetingConfig`]
//! captures those differences so each platform adapter is a one-line
//! choice of preset.
//!
//! ## Example
//!
//! ```rust
//! use timeout_functions::{GreetingConfig, NamePolicy};
//!
//! let lambda = GreetingConfig::lambda();
//! assert_eq!(lambda.name_policy, NamePolicy::Required);
//!
//! let openwhisk = GreetingConfig::openwhisk();
//! assert_eq!(openwhisk.suffix, "!");
//! assert!(openwhisk.echo_greeting);
//! ```

use serde::{Deserialize, Serialize};

/// Placeholder used when an OpenWhisk action is invoked without a name.
pub const DEFAULT_NAME: &str = "stranger";

/// How the handler resolves the `name` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamePolicy {
    /// The key must be present; absence is a lookup error.
    Required,
    /// Absence falls back to the given value.
    DefaultTo(String),
}

impl NamePolicy {
    /// Returns the fallback name, if any.
    pub fn default_name(&self) -> Option<&str> {
        match self {
            Self::Required => None,
            Self::DefaultTo(name) => Some(name),
        }
    }
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self::Required
    }
}

/// How the handler reports a request with no `sleepSec` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingSleepPolicy {
    /// Report a lookup error for the missing key.
    #[default]
    Lookup,
    /// Treat the key as `null`, which then fails conversion.
    Conversion,
}

/// Behaviour of a greeting handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingConfig {
    /// Resolution of the `name` key
    pub name_policy: NamePolicy,
    /// Reporting of a missing `sleepSec` key
    pub missing_sleep: MissingSleepPolicy,
    /// Text appended to `"Hello " + name`
    pub suffix: String,
    /// Write the greeting to standard output before sleeping
    pub echo_greeting: bool,
}

impl GreetingConfig {
    /// Preset for the AWS Lambda function.
    ///
    /// `name` is required, a missing `sleepSec` is a lookup error, the
    /// greeting has no suffix and nothing is printed.
    pub fn lambda() -> Self {
        Self {
            name_policy: NamePolicy::Required,
            missing_sleep: MissingSleepPolicy::Lookup,
            suffix: String::new(),
            echo_greeting: false,
        }
    }

    /// Preset for the OpenWhisk / IBM Cloud Functions action.
    ///
    /// `name` defaults to [`DEFAULT_NAME`], a missing `sleepSec` fails
    /// conversion, the greeting ends with `!` and is echoed to stdout.
    pub fn openwhisk() -> Self {
        Self {
            name_policy: NamePolicy::DefaultTo(DEFAULT_NAME.to_string()),
            missing_sleep: MissingSleepPolicy::Conversion,
            suffix: "!".to_string(),
            echo_greeting: true,
        }
    }

    /// Returns a copy with the given name policy.
    pub fn with_name_policy(mut self, name_policy: NamePolicy) -> Self {
        self.name_policy = name_policy;
        self
    }

    /// Returns a copy with echoing switched on or off.
    pub fn with_echo(mut self, echo_greeting: bool) -> Self {
        self.echo_greeting = echo_greeting;
        self
    }

    /// Builds the greeting for a resolved name.
    pub fn greeting_for(&self, name: &str) -> String {
        format!("Hello {}{}", name, self.suffix)
    }
}

impl Default for GreetingConfig {
    /// Returns the Lambda preset.
    fn default() -> Self {
        Self::lambda()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambda_preset() {
        let config = GreetingConfig::lambda();
        assert_eq!(config.name_policy, NamePolicy::Required);
        assert_eq!(config.missing_sleep, MissingSleepPolicy::Lookup);
        assert!(config.suffix.is_empty());
        assert!(!config.echo_greeting);
    }

    #[test]
    fn test_openwhisk_preset() {
        let config = GreetingConfig::openwhisk();
        assert_eq!(config.name_policy.default_name(), Some("stranger"));
        assert_eq!(config.missing_sleep, MissingSleepPolicy::Conversion);
        assert!(config.echo_greeting);
    }

    #[test]
    fn test_default_is_lambda() {
        assert_eq!(GreetingConfig::default(), GreetingConfig::lambda());
    }

    #[test]
    fn test_greeting_for() {
        assert_eq!(GreetingConfig::lambda().greeting_for("World"), "Hello World");
        assert_eq!(GreetingConfig::openwhisk().greeting_for("World"), "Hello World!");
    }

    #[test]
    fn test_builders() {
        let config = GreetingConfig::lambda()
            .with_name_policy(NamePolicy::DefaultTo("friend".to_string()))
            .with_echo(true);
        assert_eq!(config.name_policy.default_name(), Some("friend"));
        assert!(config.echo_greeting);
    }
}
