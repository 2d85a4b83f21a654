// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub docs: DocsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Deployment environment and secrets
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Deployment environment name ("development" means local execution)
    pub environment: String,
    /// Named secret, only ever returned by `/` when `expose_secret` is set
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub expose_secret: bool,
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Diagnostic log output: "text" or "json"
    pub format: LogFormat,
    pub access_log: bool,
    /// Access log format (dev, combined, common or json)
    pub access_log_format: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
    /// Seconds to wait for in-flight connections on shutdown
    pub shutdown_grace: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    pub cors_allow_origin: String,
    pub max_body_size: u64,
    /// Directory served before route dispatch; disabled when unset
    #[serde(default)]
    pub static_dir: Option<String>,
}

/// Root fields of the published API description
#[derive(Debug, Deserialize, Clone)]
pub struct DocsConfig {
    pub openapi_version: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub terms_of_service: Option<String>,
    #[serde(default)]
    pub contact: Option<ContactConfig>,
    #[serde(default)]
    pub license: Option<LicenseConfig>,
    #[serde(default = "default_servers")]
    pub servers: Vec<ServerEntryConfig>,
    /// Base URL the documentation UI loads its script and stylesheet from
    pub ui_assets_url: String,
    pub custom_css_url: Option<String>,
    pub explorer: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LicenseConfig {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerEntryConfig {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_servers() -> Vec<ServerEntryConfig> {
    vec![ServerEntryConfig {
        url: "http://localhost:5000".to_string(),
        description: Some("Development Server".to_string()),
    }]
}
