//! Static file serving module
//!
//! Serves regular files from the public directory ahead of routing. Directory
//! paths are never answered here, so `/` always reaches its route handler.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

use crate::http::{self, cache, mime};
use crate::logger;

/// Serve `path` from `static_dir`, or `None` to fall through to routing
pub async fn serve(
    static_dir: &str,
    path: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Option<Response<Full<Bytes>>> {
    let (content, content_type) = load_from_directory(static_dir, path).await?;
    Some(build_static_file_response(
        content,
        content_type,
        if_none_match,
        is_head,
    ))
}

/// Load a regular file below `static_dir`
pub async fn load_from_directory(static_dir: &str, path: &str) -> Option<(Vec<u8>, &'static str)> {
    let relative_path = path.trim_start_matches('/');
    if relative_path.is_empty() || relative_path.ends_with('/') {
        return None;
    }

    // Missing public directory is a normal deployment
    let Ok(static_dir_canonical) = Path::new(static_dir).canonicalize() else {
        return None;
    };

    let file_path = static_dir_canonical.join(relative_path);
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    match fs::metadata(&file_path_canonical).await {
        Ok(meta) if meta.is_file() => {}
        _ => return None,
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type =
        mime::content_type_for(file_path_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

/// Build static file response with `ETag` support
fn build_static_file_response(
    data: Vec<u8>,
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::build_cached_response(Bytes::from(data), content_type, &etag, is_head)
}
