//! Uniform JSON wrapper returned by every handler

use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `{ data, message, success, errors? }`
///
/// `success` is derived from the status the envelope is built for, so it
/// always agrees with the 2xx boundary of the response carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub data: Option<T>,
    pub message: String,
    pub success: bool,
    /// Field name -> message, only present on validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl<T> ResponseEnvelope<T> {
    pub fn for_status(status: StatusCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: status.is_success(),
            errors: None,
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: BTreeMap<String, String>) -> Self {
        self.errors = Some(errors);
        self
    }
}
