// Application state module
// Read-only state shared by every connection after startup

use hyper::body::Bytes;
use thiserror::Error;

use super::types::Config;
use crate::api;
use crate::docs::{self, ApiDescriptor, ComposeError, DocsRenderer, RenderError, SwaggerUi};
use crate::routing::RouteTable;

/// Startup failures that keep the server from listening
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("API documentation is inconsistent: {0}")]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to serialize API descriptor: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Documentation published once at startup and served verbatim
#[derive(Debug, Clone)]
pub struct PublishedDocs {
    pub descriptor_json: Bytes,
    pub ui_html: String,
}

impl PublishedDocs {
    pub fn publish(
        descriptor: &ApiDescriptor,
        renderer: &dyn DocsRenderer,
    ) -> Result<Self, BootstrapError> {
        Ok(Self {
            descriptor_json: Bytes::from(serde_json::to_vec(descriptor)?),
            ui_html: renderer.render(descriptor)?,
        })
    }
}

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    pub docs: PublishedDocs,
}

impl AppState {
    pub const fn new(config: Config, routes: RouteTable, docs: PublishedDocs) -> Self {
        Self {
            config,
            routes,
            docs,
        }
    }

    /// Compose and render the docs, then install the API routes
    pub fn bootstrap(config: Config) -> Result<Self, BootstrapError> {
        let descriptor = docs::compose(ApiDescriptor::root(&config.docs), docs::fragments::all())?;
        let renderer = SwaggerUi::from_config(&config.docs);
        let published = PublishedDocs::publish(&descriptor, &renderer)?;
        let routes = RouteTable::new(api::routes());
        if routes.is_empty() {
            tracing::warn!("no API routes registered, every request will be a 404");
        }
        for route in routes.iter() {
            tracing::debug!(
                method = %route.method,
                pattern = route.pattern.as_str(),
                name = route.name,
                "route registered"
            );
        }

        tracing::debug!(
            routes = routes.len(),
            paths = descriptor.paths.len(),
            "application state ready"
        );

        Ok(Self::new(config, routes, published))
    }
}
