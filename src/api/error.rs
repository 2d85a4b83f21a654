//! API error taxonomy
//!
//! | Variant         | Status | Raised by                          |
//! |-----------------|--------|------------------------------------|
//! | NotFound        | 404    | dispatch, no route matched         |
//! | HandlerFault    | 500    | handler error or panic             |
//! | Validation      | 400    | handlers validating input          |
//! | MalformedBody   | 400    | ingress body parsing               |
//! | PayloadTooLarge | 413    | ingress body size limit            |

use hyper::body::Bytes;
use hyper::StatusCode;
use std::collections::BTreeMap;
use thiserror::Error;

use super::envelope::ResponseEnvelope;
use super::reply::Reply;

const FALLBACK_BODY: &[u8] =
    br#"{"data":null,"message":"An unexpected error occurred on the server.","success":false}"#;

/// Result alias used by handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("no route for {method} {path}")]
    NotFound { method: String, path: String },

    /// The cause is logged, never sent to the client
    #[error("handler fault: {0}")]
    HandlerFault(String),

    #[allow(dead_code)] // Reserved for handlers that validate their input
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, String>,
    },

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },
}

impl ApiError {
    pub fn fault(cause: impl Into<String>) -> Self {
        Self::HandlerFault(cause.into())
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::HandlerFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation { .. } | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Message shown to the client
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { path, .. } => format!("Not Found - {path}"),
            Self::HandlerFault(_) => "An unexpected error occurred on the server.".to_string(),
            Self::Validation { message, .. } => message.clone(),
            Self::MalformedBody(_) => "Malformed request body.".to_string(),
            Self::PayloadTooLarge { .. } => "Request body too large.".to_string(),
        }
    }

    /// Convert into a failure envelope. Never fails.
    pub fn into_reply(self) -> Reply {
        let status = self.status();
        let mut envelope = ResponseEnvelope::<()>::for_status(status, None, self.public_message());
        if let Self::Validation { errors, .. } = self {
            envelope = envelope.with_errors(errors);
        }

        match serde_json::to_vec(&envelope) {
            Ok(body) => Reply::json_bytes(status, Bytes::from(body)),
            Err(e) => {
                crate::logger::log_error(&format!("Failed to serialize error envelope: {e}"));
                Reply::json_bytes(status, Bytes::from_static(FALLBACK_BODY))
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::fault(format!("JSON error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::reply::Payload;
    use serde_json::Value;

    fn body_json(reply: &Reply) -> Value {
        match &reply.payload {
            Payload::Json(bytes) => serde_json::from_slice(bytes).unwrap(),
            Payload::Html(_) => panic!("expected JSON payload"),
        }
    }

    #[test]
    fn test_not_found_reply() {
        let reply = ApiError::NotFound {
            method: "GET".to_string(),
            path: "/does-not-exist".to_string(),
        }
        .into_reply();
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        let body = body_json(&reply);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["message"], "Not Found - /does-not-exist");
        assert!(body.get("errors").is_none());
    }

    #[test]
    fn test_fault_does_not_leak_cause() {
        let reply = ApiError::fault("database password is hunter2").into_reply();
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(&reply);
        assert_eq!(body["success"], false);
        assert!(!body.to_string().contains("hunter2"));
    }

    #[test]
    fn test_validation_populates_errors() {
        let mut errors = BTreeMap::new();
        errors.insert("userName".to_string(), "User name is required.".to_string());
        let reply = ApiError::Validation {
            message: "Validation failed.".to_string(),
            errors,
        }
        .into_reply();
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        let body = body_json(&reply);
        assert_eq!(body["errors"]["userName"], "User name is required.");
    }

    #[test]
    fn test_ingress_statuses() {
        assert_eq!(
            ApiError::MalformedBody("eof".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
