//! Route table: ordered method + path rules bound to handlers

use hyper::Method;

use super::context::RequestContext;
use super::matcher::{match_method, match_path, PathPattern};
use crate::api::{ApiResult, Reply};

/// Synchronous request handler
pub type HandlerFn = fn(&RequestContext<'_>) -> ApiResult<Reply>;

#[derive(Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    /// Short label used in logs
    pub name: &'static str,
    pub handler: HandlerFn,
}

impl Route {
    pub const fn new(
        method: Method,
        pattern: PathPattern,
        name: &'static str,
        handler: HandlerFn,
    ) -> Self {
        Self {
            method,
            pattern,
            name,
            handler,
        }
    }

    /// GET route on an exact path
    pub fn get(path: &str, name: &'static str, handler: HandlerFn) -> Self {
        Self::new(Method::GET, PathPattern::Exact(path.to_string()), name, handler)
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        match_method(&self.method, method) && match_path(&self.pattern, path)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Routes in registration order; the first match wins
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub const fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Find the first route serving `method` on `path`
    pub fn find(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(method, path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}
