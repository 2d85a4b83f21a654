//! Routing module
//!
//! Provides the route table and the dispatch stage:
//! - Path matching (exact or segment-aware prefix, trailing slash ignored)
//! - Method matching (HEAD served by GET routes)
//! - Handler invocation with 404 / 500 envelopes on failure

mod context;
mod dispatch;
mod matcher;
mod table;

pub use context::RequestContext;
pub use dispatch::dispatch;
pub use table::{Route, RouteTable};
