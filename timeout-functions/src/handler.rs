//! The greeting handler shared by both platform adapters.
//!
//! An invocation is strictly sequential: parse the request, build the
//! greeting, optionally echo it, block for the requested time, respond.
//! Input errors surface before any blocking happens. Once the handler starts
//! sleeping it cannot be interrupted; enforcing a time limit is the invoking
//! platform's job.

use std::io::Write;

use serde_json::Value;

use crate::config::GreetingConfig;
use crate::error::GreetingError;
use crate::event::{GreetingRequest, GreetingResponse};
use crate::sleep::{Sleeper, ThreadSleeper};

/// A synchronous greeting handler.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use serde_json::json;
/// use timeout_functions::{GreetingConfig, GreetingHandler, RecordingSleeper};
///
/// let sleeper = RecordingSleeper::new();
/// let handler = GreetingHandler::with_sleeper(GreetingConfig::lambda(), sleeper.clone());
///
/// let response = handler.handle(&json!({"sleepSec": "2", "name": "World"})).unwrap();
/// assert_eq!(response.message, "Hello World");
/// assert_eq!(sleeper.calls(), vec![Duration::from_secs(2)]);
/// ```
#[derive(Debug, Clone)]
pub struct GreetingHandler<S = ThreadSleeper> {
    config: GreetingConfig,
    sleeper: S,
}

impl GreetingHandler<ThreadSleeper> {
    /// Creates a handler that really blocks the calling thread.
    pub fn new(config: GreetingConfig) -> Self {
        Self::with_sleeper(config, ThreadSleeper)
    }

    /// Handler for the AWS Lambda function.
    pub fn lambda() -> Self {
        Self::new(GreetingConfig::lambda())
    }

    /// Handler for the OpenWhisk action.
    pub fn openwhisk() -> Self {
        Self::new(GreetingConfig::openwhisk())
    }
}

impl<S: Sleeper> GreetingHandler<S> {
    /// Creates a handler with a custom sleeper.
    pub fn with_sleeper(config: GreetingConfig, sleeper: S) -> Self {
        Self { config, sleeper }
    }

    /// Returns the handler configuration.
    pub fn config(&self) -> &GreetingConfig {
        &self.config
    }

    /// Handles one invocation event, echoing to standard output if configured.
    pub fn handle(&self, event: &Value) -> Result<GreetingResponse, GreetingError> {
        self.handle_with_output(event, &mut std::io::stdout())
    }

    /// Handles one invocation event, echoing to `out` if configured.
    pub fn handle_with_output<W: Write>(
        &self,
        event: &Value,
        out: &mut W,
    ) -> Result<GreetingResponse, GreetingError> {
        let request = GreetingRequest::from_event(event, &self.config)?;
        self.respond(request, out)
    }

    /// Greets an already validated request.
    pub fn respond<W: Write>(
        &self,
        request: GreetingRequest,
        out: &mut W,
    ) -> Result<GreetingResponse, GreetingError> {
        let greeting = self.config.greeting_for(&request.name);

        if self.config.echo_greeting {
            writeln!(out, "{}", greeting)?;
            out.flush()?;
        }

        tracing::debug!(sleep_seconds = request.sleep.as_secs(), "Sleeping before responding");
        self.sleeper.sleep(request.sleep.as_duration());
        tracing::debug!(sleep_seconds = request.sleep.as_secs(), "Sleep finished");

        Ok(GreetingResponse::new(greeting))
    }
}
