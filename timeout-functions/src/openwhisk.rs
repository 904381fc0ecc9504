//! OpenWhisk / IBM Cloud Functions entry point.
//!
//! OpenWhisk calls an action as `main(args)`. `sleepSec` is required, `name`
//! defaults to `"stranger"`, and the greeting (`"Hello <name>!"`) is printed
//! to standard output before the action sleeps.

use serde_json::{json, Value};

use crate::error::GreetingError;
use crate::handler::GreetingHandler;
use crate::GreetingResult;

/// The OpenWhisk action.
///
/// Blocks the calling thread for `sleepSec` seconds and returns
/// `{"message": "Hello <name>!"}`.
pub fn main(args: Value) -> GreetingResult<Value> {
    let response = GreetingHandler::openwhisk().handle(&args)?;
    Ok(response.to_value())
}

/// Renders a failure the way OpenWhisk expects an action to report one.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use timeout_functions::{openwhisk, GreetingError};
///
/// let body = openwhisk::error_body(&GreetingError::lookup("sleepSec"));
/// assert_eq!(body, json!({"error": "missing required key 'sleepSec'"}));
/// ```
pub fn error_body(error: &GreetingError) -> Value {
    json!({ "error": error.to_string() })
}
