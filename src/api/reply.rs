//! Transport-neutral handler output, converted to a hyper response at ingress

use hyper::body::Bytes;
use hyper::StatusCode;
use serde::Serialize;

use super::envelope::ResponseEnvelope;
use super::error::ApiError;

#[derive(Debug, Clone)]
pub enum Payload {
    /// Serialized JSON document
    Json(Bytes),
    Html(String),
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub payload: Payload,
}

impl Reply {
    /// Serialize an envelope for `status`
    pub fn envelope<T: Serialize>(
        status: StatusCode,
        data: Option<T>,
        message: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let envelope = ResponseEnvelope::for_status(status, data, message);
        let body = serde_json::to_vec(&envelope)?;
        Ok(Self::json_bytes(status, Bytes::from(body)))
    }

    /// 200 envelope carrying `data`
    pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> Result<Self, ApiError> {
        Self::envelope(StatusCode::OK, Some(data), message)
    }

    /// 200 envelope with `data: null`
    pub fn message(message: impl Into<String>) -> Result<Self, ApiError> {
        Self::envelope::<()>(StatusCode::OK, None, message)
    }

    pub const fn json_bytes(status: StatusCode, body: Bytes) -> Self {
        Self {
            status,
            payload: Payload::Json(body),
        }
    }

    pub const fn html(status: StatusCode, body: String) -> Self {
        Self {
            status,
            payload: Payload::Html(body),
        }
    }

    pub const fn content_type(&self) -> &'static str {
        match self.payload {
            Payload::Json(_) => "application/json",
            Payload::Html(_) => "text/html; charset=utf-8",
        }
    }

    /// Consume into the raw response body
    pub fn into_body(self) -> Bytes {
        match self.payload {
            Payload::Json(bytes) => bytes,
            Payload::Html(html) => Bytes::from(html),
        }
    }
}
