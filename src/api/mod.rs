// API module entry
// Response envelope, error taxonomy and the route handlers

mod envelope;
mod error;
mod handlers;
pub(crate) mod reply;

pub use error::{ApiError, ApiResult};
pub use handlers::HEALTH_MESSAGE;
pub use reply::Reply;

use crate::routing::Route;

/// The API route table, in match order
pub fn routes() -> Vec<Route> {
    vec![
        Route::get("/", "root", handlers::root),
        Route::get("/api", "api-index", handlers::api_index),
        Route::get("/api/health", "health", handlers::health),
        Route::get("/api/docs", "docs-ui", handlers::docs_ui),
        Route::get("/api/docs.json", "docs-json", handlers::docs_json),
    ]
}
