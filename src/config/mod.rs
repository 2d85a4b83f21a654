// Configuration module entry point
// Loads application configuration and owns the read-only runtime state

mod state;
mod types;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::env;
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{AppConfig, Config, DocsConfig, LogFormat, LoggingConfig};

/// Default config file name (without extension)
const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from `APP_CONFIG` or the default "config.toml"
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("APP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Precedence, lowest first: built-in defaults, the config file,
    /// `APP_<SECTION>__<KEY>` variables, then `PORT` / `APP_ENV` / `SECRET`.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("app.environment", env::var("APP_ENV").ok())?
            .set_override_option("app.secret", env::var("SECRET").ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// Build configuration from an inline TOML document on top of the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        with_defaults(config::Config::builder())?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5000)?
        .set_default("app.environment", "development")?
        .set_default("app.expose_secret", false)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "dev")?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("performance.shutdown_grace", 10)?
        .set_default("http.enable_cors", true)?
        .set_default("http.cors_allow_origin", "*")?
        .set_default("http.max_body_size", 52_428_800)? // 50MB
        .set_default("http.static_dir", "public")?
        .set_default("docs.openapi_version", "3.1.1")?
        .set_default("docs.title", "REST API Docs")?
        .set_default("docs.ui_assets_url", "https://unpkg.com/swagger-ui-dist@5")?
        .set_default("docs.custom_css_url", "/styles/swagger.css")?
        .set_default("docs.explorer", true)
}
