//! `[site]` section: site identity.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Learning Docs"
//! tagline = "A personal knowledge base"
//! url = "https://example.github.io"
//! baseUrl = "/my-docs/"
//! favicon = "img/favicon.ico"
//! organizationName = "example"
//! projectName = "my-docs"
//! ```

use crate::config::types::{ConfigDiagnostics, ErrorCode, FieldPath};
use serde::{Deserialize, Serialize};

/// Site identity. No cross-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteIdentity {
    pub title: String,
    pub tagline: String,
    /// Production URL (scheme and host), e.g. `https://example.com`.
    pub url: Option<String>,
    /// Path prefix the site is served under. Starts and ends with `/`.
    pub base_url: String,
    pub favicon: Option<String>,
    pub organization_name: Option<String>,
    pub project_name: Option<String>,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            title: String::new(),
            tagline: String::new(),
            url: None,
            base_url: "/".into(),
            favicon: None,
            organization_name: None,
            project_name: None,
        }
    }
}

impl SiteIdentity {
    /// Validate site identity.
    ///
    /// # Checks
    /// - `baseUrl` must start and end with `/`
    /// - `url` must be an http(s) URL with a host
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let section = FieldPath::new("site");

        if !(self.base_url.starts_with('/') && self.base_url.ends_with('/')) {
            diag.error_with_hint(
                ErrorCode::InvalidValue,
                section.key("baseUrl"),
                format!("\"{}\" is not a path prefix", self.base_url),
                "baseUrl must start and end with '/', e.g. \"/docs/\"",
            );
        } else if self.base_url.contains("//") {
            diag.error(
                ErrorCode::InvalidValue,
                section.key("baseUrl"),
                format!("\"{}\" contains an empty path segment", self.base_url),
            );
        }

        let Some(url_str) = &self.url else {
            return;
        };
        let field = section.key("url");
        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        ErrorCode::InvalidValue,
                        field.clone(),
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        ErrorCode::InvalidValue,
                        field,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    ErrorCode::InvalidValue,
                    field,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }
    }
}
