//! Route matching module
//!
//! Implements path and method matching for the route table.

use hyper::Method;

/// Path rule of a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches the path exactly (after trailing slash normalization)
    Exact(String),
    /// Matches the prefix itself and anything below it at a segment boundary
    Prefix(String),
}

impl PathPattern {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(p) | Self::Prefix(p) => p,
        }
    }
}

/// Strip a single trailing slash, keeping `/` intact
pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Check if a path matches a path rule
pub fn match_path(pattern: &PathPattern, path: &str) -> bool {
    let path = normalize_path(path);
    match pattern {
        PathPattern::Exact(exact) => path == normalize_path(exact),
        PathPattern::Prefix(prefix) => {
            let prefix = normalize_path(prefix);
            if prefix == "/" {
                return true;
            }
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        }
    }
}

/// Check if a request method is served by a route method; HEAD is served by GET
pub fn match_method(route_method: &Method, request_method: &Method) -> bool {
    route_method == request_method
        || (*request_method == Method::HEAD && *route_method == Method::GET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_path_exact() {
        let rule = PathPattern::Exact("/api/health".to_string());
        assert!(match_path(&rule, "/api/health"));
        assert!(match_path(&rule, "/api/health/"));
        assert!(!match_path(&rule, "/api/health/deep"));
        assert!(!match_path(&rule, "/api/healthz"));
    }

    #[test]
    fn test_match_root_exact() {
        let rule = PathPattern::Exact("/".to_string());
        assert!(match_path(&rule, "/"));
        assert!(!match_path(&rule, "/api"));
    }

    #[test]
    fn test_match_path_prefix() {
        let rule = PathPattern::Prefix("/api".to_string());
        assert!(match_path(&rule, "/api"));
        assert!(match_path(&rule, "/api/users"));
        assert!(match_path(&rule, "/api/v1/users"));
        assert!(!match_path(&rule, "/apiary"));
        assert!(!match_path(&rule, "/about"));
        assert!(match_path(&PathPattern::Prefix("/".to_string()), "/anything"));
    }

    #[test]
    fn test_match_method() {
        assert!(match_method(&Method::GET, &Method::GET));
        assert!(match_method(&Method::GET, &Method::HEAD));
        assert!(!match_method(&Method::GET, &Method::POST));
        assert!(!match_method(&Method::HEAD, &Method::GET));
    }
}
