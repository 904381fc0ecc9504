//! AWS Lambda entry point.
//!
//! Lambda calls the function as `(event, context)`. The event must carry
//! `sleepSec` and `name`; the response is `{"message": "Hello <name>"}`.
//!
//! The handler itself is synchronous, so it runs on Tokio's blocking pool.
//! The invocation still stays blocked until the sleep ends: the runtime loop
//! does not fetch the next event until this future resolves, and nothing
//! here races the sleep against the deadline in the context. If the function
//! outlives its configured timeout, Lambda kills the execution environment.

use std::sync::Arc;

use lambda_runtime::LambdaEvent;
use serde_json::Value;
use tracing::Instrument;

use crate::error::GreetingError;
use crate::event::GreetingResponse;
use crate::handler::GreetingHandler;
use crate::sleep::Sleeper;

/// The Lambda function handler.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::main]
/// async fn main() -> Result<(), lambda_runtime::Error> {
///     lambda_runtime::tracing::init_default_subscriber();
///     lambda_runtime::run(lambda_runtime::service_fn(timeout_functions::lambda::handler)).await
/// }
/// ```
pub async fn handler(
    event: LambdaEvent<Value>,
) -> Result<GreetingResponse, lambda_runtime::Error> {
    let greeting = Arc::new(GreetingHandler::lambda());
    Ok(handle_event(greeting, event).await?)
}

/// Runs `greeting` for one Lambda event on the blocking pool.
pub async fn handle_event<S>(
    greeting: Arc<GreetingHandler<S>>,
    event: LambdaEvent<Value>,
) -> Result<GreetingResponse, GreetingError>
where
    S: Sleeper + 'static,
{
    let (payload, context) = event.into_parts();
    let span = tracing::info_span!("invocation", request_id = %context.request_id);

    async move {
        tracing::info!(deadline_ms = context.deadline, "Handling invocation");

        let blocking_span = tracing::Span::current();
        let result = tokio::task::spawn_blocking(move || {
            blocking_span.in_scope(|| greeting.handle(&payload))
        })
        .await?;

        match &result {
            Ok(response) => tracing::info!(greeting = %response.message, "Invocation succeeded"),
            Err(error) => tracing::warn!(error_type = error.error_type(), %error, "Invocation failed"),
        }
        result
    }
    .instrument(span)
    .await
}
