//! OpenWhisk native action plumbing.
//!
//! A native action receives its parameters as a JSON object in its first
//! argument and reports its result as the last line of standard output.
//! Anything printed before that line ends up in the activation logs, which
//! is where the greeting echoed by the handler goes.

use std::io::{Read, Write};

use clap::Parser;
use serde_json::{json, Value};
use thiserror::Error;
use timeout_functions::{openwhisk, GreetingError, GreetingHandler, Sleeper};

/// Command-line arguments of the `ibm-timeout` action.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "ibm-timeout",
    version,
    about = "Greets after sleeping for sleepSec seconds (OpenWhisk native action)"
)]
pub struct ActionArgs {
    /// Action parameters as a JSON object. Read from standard input when omitted.
    pub params: Option<String>,
}

/// Errors that end an action run.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Standard input or output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The parameters are not valid JSON.
    #[error("invalid action parameters: {0}")]
    Params(#[from] serde_json::Error),

    /// The greeting handler failed.
    #[error(transparent)]
    Greeting(#[from] GreetingError),
}

impl ActionError {
    /// Renders the error as the action's result line.
    pub fn to_result(&self) -> Value {
        match self {
            Self::Greeting(error) => openwhisk::error_body(error),
            other => json!({ "error": other.to_string() }),
        }
    }
}

/// Reads the action parameters from the argument, falling back to `input`.
///
/// Empty input means no parameters.
pub fn load_params<R: Read>(args: &ActionArgs, mut input: R) -> Result<Value, ActionError> {
    let raw = match &args.params {
        Some(params) => params.clone(),
        None => {
            let mut buffer = String::new();
            input.read_to_string(&mut buffer)?;
            buffer
        }
    };

    if raw.trim().is_empty() {
        return Ok(json!({}));
    }
    Ok(serde_json::from_str(&raw)?)
}

/// Runs the action once, writing the greeting and the result line to `out`.
///
/// On failure the `{"error": ...}` result line is written before the error is
/// returned, so the caller only has to pick the exit status.
pub fn run<S, R, W>(
    handler: &GreetingHandler<S>,
    args: &ActionArgs,
    input: R,
    out: &mut W,
) -> Result<(), ActionError>
where
    S: Sleeper,
    R: Read,
    W: Write,
{
    let result = load_params(args, input)
        .and_then(|params| Ok(handler.handle_with_output(&params, out)?));

    let line = match &result {
        Ok(response) => response.to_value(),
        Err(error) => error.to_result(),
    };
    writeln!(out, "{}", line)?;
    out.flush()?;

    result.map(|_| ())
}
