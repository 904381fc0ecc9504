//! Local stand-in for the invoking platform.
//!
//! [`LocalInvoker`] dispatches one invocation the way a serverless platform
//! would and enforces the platform's timeout from the outside. Each function
//! runs on its own detached thread, async handlers on a private
//! current-thread runtime, and reports back over a oneshot channel that the
//! invoker awaits with [`tokio::time::timeout`]. When the deadline passes
//! first the invoker records
//! [`InvocationStatus::TimedOut`](crate::InvocationStatus::TimedOut) and
//! drops the channel. The detached thread is never joined, so neither the
//! invoker nor the caller's runtime waits for the abandoned sleep.
//!
//! # Examples
//!
//! ```ignore
//! use std::time::Duration;
//! use serde_json::json;
//! use timeout_functions_testing::{InvokerConfig, LocalInvoker};
//!
//! #[tokio::test]
//! async fn test_sleep_past_timeout() {
//!     let invoker = LocalInvoker::new(
//!         InvokerConfig::lambda().with_timeout(Duration::from_millis(200)),
//!     )
//!     .unwrap();
//!
//!     let outcome = invoker
//!         .invoke_lambda(json!({"sleepSec": "1", "name": "World"}))
//!         .await
//!         .unwrap();
//!     assert!(outcome.is_timed_out());
//! }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use lambda_runtime::{Context, LambdaEvent};
use serde_json::Value;
use timeout_functions::{lambda, openwhisk, ErrorObject, GreetingError, GreetingHandler, Sleeper};
use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::error::InvokeError;
use crate::types::InvocationOutcome;

/// What an invocation thread sends back: the function's own result, or a
/// harness failure.
type InvocationResult = Result<Result<Value, ErrorObject>, InvokeError>;

/// The platform whose calling convention and default timeout are emulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// AWS Lambda
    Lambda,
    /// Apache OpenWhisk / IBM Cloud Functions
    OpenWhisk,
}

impl Platform {
    /// Returns the platform's default function timeout.
    ///
    /// Lambda functions time out after 3 seconds unless configured
    /// otherwise; OpenWhisk actions after 60 seconds.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Lambda => Duration::from_secs(3),
            Self::OpenWhisk => Duration::from_secs(60),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lambda => write!(f, "lambda"),
            Self::OpenWhisk => write!(f, "openwhisk"),
        }
    }
}

/// Configuration for a [`LocalInvoker`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use timeout_functions_testing::{InvokerConfig, Platform};
///
/// let config = InvokerConfig::lambda();
/// assert_eq!(config.effective_timeout(), Duration::from_secs(3));
///
/// let config = InvokerConfig::openwhisk().with_timeout(Duration::from_secs(5));
/// assert_eq!(config.platform, Platform::OpenWhisk);
/// assert_eq!(config.effective_timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    /// Emulated platform
    pub platform: Platform,

    /// Function timeout.
    ///
    /// `None` uses the platform default.
    pub timeout: Option<Duration>,
}

impl InvokerConfig {
    /// Configuration emulating AWS Lambda with its default timeout.
    pub fn lambda() -> Self {
        Self {
            platform: Platform::Lambda,
            timeout: None,
        }
    }

    /// Configuration emulating OpenWhisk with its default timeout.
    pub fn openwhisk() -> Self {
        Self {
            platform: Platform::OpenWhisk,
            timeout: None,
        }
    }

    /// Returns a copy with an explicit timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the timeout that will be enforced.
    pub fn effective_timeout(&self) -> Duration {
        self.timeout
            .unwrap_or_else(|| self.platform.default_timeout())
    }
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self::lambda()
    }
}

/// Invokes greeting functions locally under a platform-style deadline.
#[derive(Debug, Clone)]
pub struct LocalInvoker {
    config: InvokerConfig,
}

impl LocalInvoker {
    /// Creates a new invoker, rejecting a zero timeout.
    pub fn new(config: InvokerConfig) -> Result<Self, InvokeError> {
        if config.effective_timeout().is_zero() {
            return Err(InvokeError::InvalidConfiguration(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Returns the invoker configuration.
    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Returns the timeout enforced on each invocation.
    pub fn timeout(&self) -> Duration {
        self.config.effective_timeout()
    }

    /// Invokes the AWS Lambda function with `event`.
    pub async fn invoke_lambda(&self, event: Value) -> Result<InvocationOutcome, InvokeError> {
        let lambda_event = LambdaEvent::new(event, self.lambda_context());
        self.enforce(move || {
            on_private_runtime(async move {
                let result = match lambda::handler(lambda_event).await {
                    Ok(response) => Ok(serde_json::to_value(response)?),
                    Err(error) => Err(lambda_error_object(error.as_ref())),
                };
                Ok::<_, InvokeError>(result)
            })
        })
        .await
    }

    /// Invokes the OpenWhisk action with `args`.
    pub async fn invoke_openwhisk(&self, args: Value) -> Result<InvocationOutcome, InvokeError> {
        self.invoke_blocking(move || openwhisk::main(args).map_err(ErrorObject::from))
            .await
    }

    /// Invokes a custom handler through the Lambda adapter.
    ///
    /// Pair this with a [`RecordingSleeper`](timeout_functions::RecordingSleeper)
    /// to run long sleeps without waiting for them.
    pub async fn invoke_handler<S>(
        &self,
        handler: Arc<GreetingHandler<S>>,
        event: Value,
    ) -> Result<InvocationOutcome, InvokeError>
    where
        S: Sleeper + 'static,
    {
        let lambda_event = LambdaEvent::new(event, self.lambda_context());
        self.enforce(move || {
            on_private_runtime(async move {
                let result = match lambda::handle_event(handler, lambda_event).await {
                    Ok(response) => Ok(serde_json::to_value(response)?),
                    Err(error) => Err(ErrorObject::from(&error)),
                };
                Ok::<_, InvokeError>(result)
            })
        })
        .await
    }

    /// Runs an arbitrary synchronous function as one invocation.
    ///
    /// A panic in `function` is reported as a failed invocation.
    pub async fn invoke_blocking<F>(&self, function: F) -> Result<InvocationOutcome, InvokeError>
    where
        F: FnOnce() -> Result<Value, ErrorObject> + Send + 'static,
    {
        self.enforce(move || Ok(function())).await
    }

    async fn enforce<F>(&self, invocation: F) -> Result<InvocationOutcome, InvokeError>
    where
        F: FnOnce() -> InvocationResult + Send + 'static,
    {
        let timeout = self.timeout();
        let start = Instant::now();
        tracing::debug!(
            platform = %self.config.platform,
            timeout_ms = millis(timeout),
            "Dispatching invocation"
        );

        let (sender, receiver) = oneshot::channel();
        std::thread::Builder::new()
            .name(format!("{}-invocation", self.config.platform))
            .spawn(move || {
                // The receiver is gone once the invocation timed out.
                let _ = sender.send(invocation());
            })?;

        let outcome = match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(result)) => match result? {
                Ok(response) => InvocationOutcome::succeeded(response, start.elapsed()),
                Err(error) => InvocationOutcome::failed(error, start.elapsed()),
            },
            Ok(Err(_)) => {
                let error = GreetingError::Aborted {
                    message: "invocation thread exited without a result".to_string(),
                };
                InvocationOutcome::failed(ErrorObject::from(error), start.elapsed())
            }
            Err(_) => {
                tracing::warn!(
                    platform = %self.config.platform,
                    timeout_ms = millis(timeout),
                    "Invocation timed out"
                );
                InvocationOutcome::timed_out(timeout, start.elapsed())
            }
        };

        tracing::debug!(
            status = %outcome.status,
            elapsed_ms = millis(outcome.elapsed),
            "Invocation finished"
        );
        Ok(outcome)
    }

    fn lambda_context(&self) -> Context {
        let deadline_ms = chrono::Duration::from_std(self.timeout())
            .ok()
            .and_then(|timeout| Utc::now().checked_add_signed(timeout))
            .and_then(|deadline| u64::try_from(deadline.timestamp_millis()).ok())
            .unwrap_or(u64::MAX);

        let mut context = Context::default();
        context.request_id = uuid::Uuid::new_v4().to_string();
        context.deadline = deadline_ms;
        context
    }
}

/// Drives `invocation` on a current-thread runtime owned by the calling thread.
///
/// The runtime is shut down without waiting on its blocking pool.
fn on_private_runtime<Fut>(invocation: Fut) -> InvocationResult
where
    Fut: Future<Output = InvocationResult>,
{
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let result = runtime.block_on(invocation);
    runtime.shutdown_background();
    result
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Maps an error returned through the Lambda runtime to its error body.
fn lambda_error_object(error: &(dyn std::error::Error + Send + Sync + 'static)) -> ErrorObject {
    match error.downcast_ref::<GreetingError>() {
        Some(greeting_error) => ErrorObject::from(greeting_error),
        None => ErrorObject::new("HandlerError", error.to_string()),
    }
}
