//! OpenAPI descriptor model and fragment composition

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::DocsConfig;

/// The composed, machine-readable API description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDescriptor {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<ServerEntry>,
    pub components: Components,
    pub paths: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub schemas: BTreeMap<String, Value>,
}

impl ApiDescriptor {
    /// Root descriptor with empty `paths` and `components.schemas`
    pub fn root(config: &DocsConfig) -> Self {
        Self {
            openapi: config.openapi_version.clone(),
            info: Info {
                title: config.title.clone(),
                summary: config.summary.clone(),
                description: config.description.clone(),
                terms_of_service: config.terms_of_service.clone(),
                contact: config.contact.as_ref().map(|c| Contact {
                    name: c.name.clone(),
                    url: c.url.clone(),
                    email: c.email.clone(),
                }),
                license: config.license.as_ref().map(|l| License {
                    name: l.name.clone(),
                    url: l.url.clone(),
                }),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            servers: config
                .servers
                .iter()
                .map(|s| ServerEntry {
                    url: s.url.clone(),
                    description: s.description.clone(),
                })
                .collect(),
            components: Components::default(),
            paths: BTreeMap::new(),
        }
    }
}

/// Route-local documentation: path items and the schemas they reference
#[derive(Debug, Clone, PartialEq)]
pub struct DocFragment {
    pub name: &'static str,
    pub paths: Vec<(String, Value)>,
    pub schemas: Vec<(String, Value)>,
}

impl DocFragment {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            paths: Vec::new(),
            schemas: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>, item: Value) -> Self {
        self.paths.push((path.into(), item));
        self
    }

    #[must_use]
    pub fn with_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.schemas.push((name.into(), schema));
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("path '{path}' from fragment '{fragment}' is already documented")]
    DuplicatePath { path: String, fragment: &'static str },

    #[error("schema '{name}' from fragment '{fragment}' is already defined")]
    DuplicateSchema { name: String, fragment: &'static str },
}

/// Merge every fragment into `root`, rejecting duplicate keys
pub fn compose(
    mut root: ApiDescriptor,
    fragments: impl IntoIterator<Item = DocFragment>,
) -> Result<ApiDescriptor, ComposeError> {
    for fragment in fragments {
        for (path, item) in fragment.paths {
            if root.paths.contains_key(&path) {
                return Err(ComposeError::DuplicatePath {
                    path,
                    fragment: fragment.name,
                });
            }
            root.paths.insert(path, item);
        }
        for (name, schema) in fragment.schemas {
            if root.components.schemas.contains_key(&name) {
                return Err(ComposeError::DuplicateSchema {
                    name,
                    fragment: fragment.name,
                });
            }
            root.components.schemas.insert(name, schema);
        }
    }
    Ok(root)
}
