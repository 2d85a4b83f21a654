//! Documentation contributed by each route group

use serde_json::json;

use super::descriptor::DocFragment;
use crate::api::HEALTH_MESSAGE;

/// Every fragment published at startup, in composition order
pub fn all() -> Vec<DocFragment> {
    vec![envelope(), health()]
}

/// Shared `ResponseEnvelope` schema referenced by route docs
fn envelope() -> DocFragment {
    DocFragment::new("envelope").with_schema(
        "ResponseEnvelope",
        json!({
            "type": "object",
            "required": ["data", "message", "success"],
            "properties": {
                "data": {
                    "description": "Route specific payload, null when there is nothing to return."
                },
                "message": { "type": "string" },
                "success": {
                    "type": "boolean",
                    "description": "True if and only if the HTTP status is 2xx."
                },
                "errors": {
                    "type": "object",
                    "additionalProperties": { "type": "string" },
                    "description": "Field name to message, present only on validation failures."
                }
            }
        }),
    )
}

fn health() -> DocFragment {
    DocFragment::new("health").with_path(
        "/api/health",
        json!({
            "get": {
                "tags": ["Health"],
                "summary": "Tests that API is running.",
                "description": "Responds if the app is up and running",
                "responses": {
                    "200": {
                        "description": "OK",
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "data": {
                                            "type": "null",
                                            "description": "The data property will always be null."
                                        },
                                        "message": { "type": "string" },
                                        "success": { "type": "boolean" }
                                    },
                                    "example": {
                                        "data": null,
                                        "message": HEALTH_MESSAGE,
                                        "success": true
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }),
    )
}
