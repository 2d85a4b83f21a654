//! HTTP response building module
//!
//! Every response leaving the server is built here, so header handling
//! (content length, CORS, caching) stays in one place.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN};
use hyper::{Response, StatusCode};

use super::cache::STATIC_CACHE_CONTROL;
use crate::api::Reply;

const ALLOWED_METHODS: &str = "GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS";

/// Convert a handler reply into a response; HEAD keeps headers but drops the body
pub fn build_reply_response(reply: Reply, is_head: bool) -> Response<Full<Bytes>> {
    let status = reply.status;
    let content_type = reply.content_type();
    let data = reply.into_body();
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            fallback_response(status)
        })
}

/// Build 204 answer to a CORS preflight request
pub fn build_preflight_response(allow_origin: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .header("Access-Control-Allow-Origin", allow_origin)
        .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            fallback_response(StatusCode::NO_CONTENT)
        })
}

/// Stamp `Access-Control-Allow-Origin` on a response unless already present
pub fn apply_cors(response: &mut Response<Full<Bytes>>, allow_origin: &str) {
    if response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN) {
        return;
    }
    match HeaderValue::from_str(allow_origin) {
        Ok(value) => {
            response
                .headers_mut()
                .insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        Err(e) => crate::logger::log_warning(&format!(
            "Invalid CORS origin '{allow_origin}': {e}"
        )),
    }
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", STATIC_CACHE_CONTROL)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            fallback_response(StatusCode::NOT_MODIFIED)
        })
}

/// Build 200 static file response with cache headers
pub fn build_cached_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", STATIC_CACHE_CONTROL)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            fallback_response(StatusCode::OK)
        })
}

fn fallback_response(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
