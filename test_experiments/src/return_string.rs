use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("The value must be a string.")]
pub struct NotAString;

/// Return the string inside `value`, or fail for any other JSON type
pub fn return_string(value: &Value) -> Result<String, NotAString> {
    value.as_str().map(ToString::to_string).ok_or(NotAString)
}
