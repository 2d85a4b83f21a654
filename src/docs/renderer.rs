//! Documentation UI rendering
//!
//! The UI itself is Swagger UI, loaded from `docs.ui_assets_url`; this
//! module only produces the page that boots it.

use thiserror::Error;

use super::descriptor::ApiDescriptor;
use crate::config::DocsConfig;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to serialize descriptor for the docs UI: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Given a descriptor, return a servable UI document
pub trait DocsRenderer {
    fn render(&self, descriptor: &ApiDescriptor) -> Result<String, RenderError>;
}

/// Swagger UI page with the descriptor embedded inline
#[derive(Debug, Clone)]
pub struct SwaggerUi {
    assets_url: String,
    custom_css_url: Option<String>,
    explorer: bool,
}

impl SwaggerUi {
    pub fn from_config(config: &DocsConfig) -> Self {
        Self {
            assets_url: config.ui_assets_url.trim_end_matches('/').to_string(),
            custom_css_url: config.custom_css_url.clone(),
            explorer: config.explorer,
        }
    }
}

impl DocsRenderer for SwaggerUi {
    fn render(&self, descriptor: &ApiDescriptor) -> Result<String, RenderError> {
        // `</script>` inside a string would end the inline script early
        let inline_descriptor = serde_json::to_string(descriptor)?.replace("</", "<\\/");
        let title = escape_html(&descriptor.info.title);
        let assets = escape_html(&self.assets_url);
        let custom_css = self
            .custom_css_url
            .as_deref()
            .map(|url| format!("\n  <link rel=\"stylesheet\" href=\"{}\">", escape_html(url)))
            .unwrap_or_default();
        let layout = if self.explorer {
            "StandaloneLayout"
        } else {
            "BaseLayout"
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="{assets}/swagger-ui.css">{custom_css}
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="{assets}/swagger-ui-bundle.js"></script>
  <script src="{assets}/swagger-ui-standalone-preset.js"></script>
  <script>
    window.onload = function () {{
      window.ui = SwaggerUIBundle({{
        spec: {inline_descriptor},
        dom_id: '#swagger-ui',
        deepLinking: true,
        presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
        plugins: [SwaggerUIBundle.plugins.DownloadUrl],
        layout: '{layout}'
      }});
    }};
  </script>
</body>
</html>
"#
        ))
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
