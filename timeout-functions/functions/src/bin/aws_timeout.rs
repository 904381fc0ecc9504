//! AWS Lambda function that greets after sleeping for `sleepSec` seconds.
//!
//! Invoke with `{"sleepSec": "2", "name": "World"}` to get
//! `{"message": "Hello World"}` back. Set `sleepSec` above the function's
//! configured timeout to watch Lambda terminate the invocation.

use timeout_functions::lambda;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // Initialize the default subscriber
    lambda_runtime::tracing::init_default_subscriber();

    lambda_runtime::run(lambda_runtime::service_fn(lambda::handler)).await
}
