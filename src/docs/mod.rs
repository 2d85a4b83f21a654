//! Documentation module
//!
//! Builds the OpenAPI descriptor once at startup from the configured root
//! and the route fragments, and renders the browsable UI for it.

mod descriptor;
pub mod fragments;
mod renderer;

pub use descriptor::{compose, ApiDescriptor, ComposeError};
pub use renderer::{DocsRenderer, RenderError, SwaggerUi};
