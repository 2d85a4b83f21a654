//! HTTP protocol layer module
//!
//! Response builders, caching helpers and Content-Type lookup, decoupled
//! from routing and handlers.

pub mod cache;
pub mod mime;
pub mod response;

pub use response::{
    apply_cors, build_304_response, build_cached_response, build_preflight_response,
    build_reply_response,
};
