//! `ETag` generation and conditional request handling for static files

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// `Cache-Control` sent with static files and their 304s
pub const STATIC_CACHE_CONTROL: &str = "public, max-age=3600";

/// Quoted `ETag` for `content`, e.g. `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Whether `If-None-Match` matches `etag` (should answer 304)
///
/// Accepts a single tag, a comma separated list, weak tags (`W/"..."`) and `*`.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').any(|e| {
            let tag = e.trim();
            tag == "*" || tag.strip_prefix("W/").unwrap_or(tag) == etag
        })
    })
}
