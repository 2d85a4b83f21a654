//! Request ingress
//!
//! Entry point for every HTTP request. Applies the cross-cutting stages in
//! order and hands the parsed request to route dispatch:
//!
//! 1. CORS preflight answered without dispatch
//! 2. `Content-Length` checked against the body limit
//! 3. Static files served from the public directory
//! 4. Body collected under the limit; handlers parse it on demand
//! 5. Dispatch, CORS header, HEAD body stripping, access log

mod request;
mod static_files;

pub use request::RequestDescriptor;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, CONTENT_LENGTH, IF_NONE_MATCH, REFERER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::api::ApiError;
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, RequestContext};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let mut response = respond(&parts, body, peer_addr, &state).await;

    let http_config = &state.config.http;
    if http_config.enable_cors {
        http::apply_cors(&mut response, &http_config.cors_allow_origin);
    }

    if state.config.logging.access_log {
        let mut entry = access_entry(&parts, peer_addr);
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn respond<B>(
    parts: &Parts,
    body: B,
    peer_addr: SocketAddr,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let http_config = &state.config.http;
    let is_head = parts.method == Method::HEAD;

    // 1. Preflight
    if parts.method == Method::OPTIONS && http_config.enable_cors {
        return http::build_preflight_response(&http_config.cors_allow_origin);
    }

    // 2. Declared body size
    if let Some(err) = check_body_size(parts, http_config.max_body_size) {
        return http::build_reply_response(err.into_reply(), is_head);
    }

    // 3. Static files
    if let Some(static_dir) = &http_config.static_dir {
        if parts.method == Method::GET || is_head {
            let if_none_match = parts
                .headers
                .get(IF_NONE_MATCH)
                .and_then(|v| v.to_str().ok());
            if let Some(response) =
                static_files::serve(static_dir, parts.uri.path(), if_none_match, is_head).await
            {
                return response;
            }
        }
    }

    // 4. Body
    let request = match read_body(body, http_config.max_body_size).await {
        Ok(bytes) => RequestDescriptor::from_parts(parts, bytes),
        Err(err) => return http::build_reply_response(err.into_reply(), is_head),
    };

    // 5. Dispatch
    let ctx = RequestContext::new(&request, state).with_peer(peer_addr);
    let reply = routing::dispatch(&state.routes, &ctx);
    http::build_reply_response(reply, is_head)
}

/// Reject requests whose declared `Content-Length` exceeds the limit
fn check_body_size(parts: &Parts, max_body_size: u64) -> Option<ApiError> {
    let declared = parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())?;

    (declared > max_body_size).then_some(ApiError::PayloadTooLarge {
        limit: max_body_size,
    })
}

/// Collect the body, enforcing the limit on streamed bodies too
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ApiError::PayloadTooLarge {
                limit: max_body_size,
            })
        }
        Err(e) => Err(ApiError::MalformedBody(e.to_string())),
    }
}

fn access_entry(parts: &Parts, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = version_label(parts.version).to_string();
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}

fn version_label(version: Version) -> &'static str {
    if version == Version::HTTP_09 {
        "0.9"
    } else if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else if version == Version::HTTP_3 {
        "3"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use hyper::StatusCode;
    use serde_json::Value;

    fn state(toml: &str) -> Arc<AppState> {
        let cfg = Config::from_toml_str(toml).unwrap();
        Arc::new(AppState::bootstrap(cfg).unwrap())
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    async fn send(
        state: &Arc<AppState>,
        req: Request<Full<Bytes>>,
    ) -> (StatusCode, hyper::HeaderMap, Bytes) {
        let response = handle_request(req, peer(), Arc::clone(state)).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    fn get(path: &str) -> Request<Full<Bytes>> {
        Request::get(path).body(Full::new(Bytes::new())).unwrap()
    }

    #[tokio::test]
    async fn test_health_envelope() {
        let state = state("");
        let (status, headers, body) = send(&state, get("/api/health?x=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["access-control-allow-origin"], "*");
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "data": null,
                "message": "You accessed the '/api/health' route.",
                "success": true
            })
        );
    }

    #[tokio::test]
    async fn test_health_ignores_body_and_headers() {
        let state = state("");
        let req = Request::post("/api/health")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(r#"{"a":1}"#)))
            .unwrap();
        // POST has no route
        let (status, _, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let req = Request::get("/api/health/")
            .header("x-anything", "1")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(r#"{"a":1}"#)))
            .unwrap();
        let (status, _, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "You accessed the '/api/health' route.");
    }

    #[tokio::test]
    async fn test_health_ignores_malformed_body() {
        let state = state("");
        for content_type in ["application/json", "application/x-www-form-urlencoded"] {
            let req = Request::get("/api/health")
                .header("content-type", content_type)
                .body(Full::new(Bytes::from_static(b"{oops\xff")))
                .unwrap();
            let (status, _, body) = send(&state, req).await;
            assert_eq!(status, StatusCode::OK);
            let value: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(value["success"], true);
            assert_eq!(value["message"], "You accessed the '/api/health' route.");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_404() {
        let state = state("");
        let (status, _, body) = send(&state, get("/does-not-exist")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Not Found - /does-not-exist");
    }

    #[tokio::test]
    async fn test_docs_routes() {
        let state = state("");
        let (status, headers, body) = send(&state, get("/api/docs.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["content-type"], "application/json");
        let doc: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc["openapi"], "3.1.1");
        assert!(doc["paths"]["/api/health"].is_object());

        let (status, headers, body) = send(&state, get("/api/docs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["content-type"], "text/html; charset=utf-8");
        assert!(String::from_utf8_lossy(&body).contains("swagger-ui"));
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let state = state("");
        let req = Request::head("/api/health")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, headers, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_ne!(headers["content-length"], "0");
    }

    #[tokio::test]
    async fn test_preflight() {
        let state = state("[http]\ncors_allow_origin = \"https://app.example.com\"");
        let req = Request::options("/api/health")
            .header("origin", "https://app.example.com")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, headers, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(
            headers["access-control-allow-origin"],
            "https://app.example.com"
        );
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_cors_disabled() {
        let state = state("[http]\nenable_cors = false");
        let (_, headers, _) = send(&state, get("/api")).await;
        assert!(!headers.contains_key("access-control-allow-origin"));

        let req = Request::options("/api").body(Full::new(Bytes::new())).unwrap();
        let (status, _, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_body_limit() {
        let state = state("[http]\nmax_body_size = 8");

        let req = Request::post("/api")
            .header("content-length", "100")
            .body(Full::new(Bytes::from(vec![b'x'; 100])))
            .unwrap();
        let (status, _, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], false);

        // No declared length, caught while collecting
        let req = Request::post("/api")
            .body(Full::new(Bytes::from(vec![b'x'; 100])))
            .unwrap();
        let (status, _, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_malformed_json_reaches_route() {
        let state = state("");
        let req = Request::get("/api")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from("{oops")))
            .unwrap();
        let (status, _, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "You accessed the '/api' route.");
    }

    #[tokio::test]
    async fn test_static_file_before_routes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("styles")).unwrap();
        std::fs::write(dir.path().join("styles/swagger.css"), ".topbar { display: none; }")
            .unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>static</h1>").unwrap();
        let state = state(&format!(
            "[http]\nstatic_dir = \"{}\"",
            dir.path().display()
        ));

        let (status, headers, body) = send(&state, get("/styles/swagger.css")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["content-type"], "text/css; charset=utf-8");
        assert_eq!(&body[..], b".topbar { display: none; }");

        // Directory paths reach the route table
        let (status, headers, _) = send(&state, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["content-type"], "application/json");
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
