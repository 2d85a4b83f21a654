// API route handlers
// Each handler reads only configuration and the published docs

use hyper::StatusCode;
use serde::Serialize;

use super::error::ApiResult;
use super::reply::Reply;
use crate::config::AppConfig;
use crate::routing::RequestContext;

pub const HEALTH_MESSAGE: &str = "You accessed the '/api/health' route.";

const REDACTED: &str = "<redacted>";
const UNSET: &str = "???";

#[derive(Debug, Serialize)]
struct RootData<'a> {
    secret: &'a str,
    #[serde(rename = "environmentName")]
    environment_name: &'a str,
}

/// GET /
pub fn root(ctx: &RequestContext<'_>) -> ApiResult<Reply> {
    let app = &ctx.state.config.app;
    let data = RootData {
        secret: visible_secret(app),
        environment_name: &app.environment,
    };
    Reply::ok(data, "You accessed the '/' route.")
}

/// The secret is only echoed when explicitly enabled
fn visible_secret(app: &AppConfig) -> &str {
    if app.expose_secret {
        app.secret.as_deref().unwrap_or(UNSET)
    } else {
        REDACTED
    }
}

/// GET /api
pub fn api_index(_ctx: &RequestContext<'_>) -> ApiResult<Reply> {
    Reply::message("You accessed the '/api' route.")
}

/// GET /api/health
pub fn health(_ctx: &RequestContext<'_>) -> ApiResult<Reply> {
    Reply::message(HEALTH_MESSAGE)
}

/// GET /api/docs.json
pub fn docs_json(ctx: &RequestContext<'_>) -> ApiResult<Reply> {
    Ok(Reply::json_bytes(
        StatusCode::OK,
        ctx.state.docs.descriptor_json.clone(),
    ))
}

/// GET /api/docs
pub fn docs_ui(ctx: &RequestContext<'_>) -> ApiResult<Reply> {
    Ok(Reply::html(StatusCode::OK, ctx.state.docs.ui_html.clone()))
}
