//! OpenWhisk / IBM Cloud Functions native action that greets after sleeping
//! for `sleepSec` seconds.
//!
//! ```text
//! $ ibm-timeout '{"sleepSec": "2"}'
//! Hello stranger!
//! {"message":"Hello stranger!"}
//! ```
//!
//! Logs go to standard error; standard output carries the greeting and the
//! result line.

use std::process::ExitCode;

use clap::Parser;
use timeout_functions::GreetingHandler;
use timeout_functions_handlers::action::{self, ActionArgs};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = ActionArgs::parse();
    let handler = GreetingHandler::openwhisk();

    match action::run(&handler, &args, std::io::stdin().lock(), &mut std::io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "Action failed");
            ExitCode::FAILURE
        }
    }
}
