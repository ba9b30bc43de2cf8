//! Site configuration loading for `docuconf.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── schema/        # Field registry and shape validation
//! ├── section/       # Typed sections ([site], [i18n], [navbar], ...)
//! ├── types/         # FieldPath, diagnostics, errors, reload handle
//! ├── util.rs        # Config file lookup
//! └── mod.rs         # SiteSources (this file)
//! ```
//!
//! # Documents
//!
//! | Document        | Default name     | Purpose                               |
//! |-----------------|------------------|---------------------------------------|
//! | site config     | `docuconf.toml`  | Site, i18n, presets, navbar, footer   |
//! | sidebar config  | `sidebars.toml`  | Named sidebar trees                   |
//!
//! Both are TOML; a `.json` extension switches to JSON. The sidebar document
//! lives next to the site config unless the docs options of a preset set
//! `sidebarPath`.

pub mod schema;
pub mod section;
pub mod types;
mod util;

pub use types::{ConfigDiagnostics, ConfigError, ConfigHandle, ErrorCode, FieldPath};
pub use util::find_config_file;

use crate::resolve::preset::docs_sidebar_path;
use crate::resolve::{Resolution, ResolveOptions, resolve};
use crate::utils::hash;
use section::PresetSpec;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// Default site config file name.
pub const DEFAULT_CONFIG_NAME: &str = "docuconf.toml";

/// Default sidebar document file name.
pub const DEFAULT_SIDEBAR_NAME: &str = "sidebars.toml";

// ============================================================================
// sources
// ============================================================================

/// The raw documents of one site, read from disk.
#[derive(Debug, Clone)]
pub struct SiteSources {
    pub config_path: PathBuf,
    pub sidebar_path: PathBuf,
    pub document: Table,
    pub sidebars: Table,
    fingerprint: u64,
}

impl SiteSources {
    /// Read the site config and its sidebar document.
    ///
    /// A missing sidebar document is an empty one, unless its path was set
    /// explicitly (`sidebar_override` or a preset's `sidebarPath`).
    pub fn load(config_path: &Path, sidebar_override: Option<&Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(config_path)
            .map_err(|err| ConfigError::Io(config_path.to_path_buf(), err))?;
        let document = parse_document(config_path, &content)?;

        let configured = sidebar_override
            .map(Path::to_path_buf)
            .or_else(|| sidebar_path_from(&document));
        let explicit = configured.is_some();
        let sidebar_path = util::relative_to_config(
            config_path,
            &configured.unwrap_or_else(|| PathBuf::from(DEFAULT_SIDEBAR_NAME)),
        );

        let sidebar_content = match fs::read_to_string(&sidebar_path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound && !explicit => {
                debug!("config"; "no sidebar document at {}", sidebar_path.display());
                String::new()
            }
            Err(err) => return Err(ConfigError::Io(sidebar_path, err)),
        };
        let sidebars = parse_document(&sidebar_path, &sidebar_content)?;

        let fingerprint = hash::compute_all([content.as_bytes(), sidebar_content.as_bytes()]);

        Ok(Self {
            config_path: config_path.to_path_buf(),
            sidebar_path,
            document,
            sidebars,
            fingerprint,
        })
    }

    /// Build sources from in-memory documents.
    pub fn from_tables(document: Table, sidebars: Table) -> Self {
        let fingerprint = hash::compute_all([
            document.to_string().as_bytes(),
            sidebars.to_string().as_bytes(),
        ]);
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_NAME),
            sidebar_path: PathBuf::from(DEFAULT_SIDEBAR_NAME),
            document,
            sidebars,
            fingerprint,
        }
    }

    /// Content hash of both documents, used to skip no-op reloads.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Files whose changes require a reload.
    pub fn watched_paths(&self) -> [&Path; 2] {
        [&self.config_path, &self.sidebar_path]
    }

    pub fn resolve(&self, options: &ResolveOptions) -> Result<Resolution, ConfigError> {
        resolve(&self.document, &self.sidebars, options).map_err(ConfigError::Diagnostics)
    }
}

/// Parse a document, choosing the format from the file extension.
pub fn parse_document(path: &Path, content: &str) -> Result<Table, ConfigError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        if content.trim().is_empty() {
            return Ok(Table::new());
        }
        let json_error = |err| ConfigError::Json(path.to_path_buf(), err);
        let mut value: serde_json::Value = serde_json::from_str(content).map_err(json_error)?;
        strip_nulls(&mut value);
        serde_json::from_value(value).map_err(json_error)
    } else {
        toml::from_str(content).map_err(|err| ConfigError::Toml(path.to_path_buf(), err))
    }
}

/// JSON `null` means "not set"; TOML has no value to carry it.
fn strip_nulls(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, item| !item.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        serde_json::Value::Array(items) => {
            items.retain(|item| !item.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

/// `sidebarPath` from the docs options of the first preset that sets it.
///
/// Read leniently: a malformed `presets` array is reported by resolution,
/// not here.
fn sidebar_path_from(document: &Table) -> Option<PathBuf> {
    let presets: Vec<PresetSpec> = document
        .get("presets")
        .cloned()
        .and_then(|value: Value| value.try_into().ok())?;
    docs_sidebar_path(&presets).map(PathBuf::from)
}

#[cfg(test)]
pub fn test_table(src: &str) -> Table {
    toml::from_str(src).unwrap()
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site(dir: &TempDir, config: &str) -> PathBuf {
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, config).unwrap();
        path
    }

    #[test]
    fn test_load_without_sidebar_document() {
        let dir = TempDir::new().unwrap();
        let path = site(&dir, "[site]\ntitle = \"Docs\"");

        let sources = SiteSources::load(&path, None).unwrap();
        assert!(sources.sidebars.is_empty());
        assert_eq!(sources.sidebar_path, dir.path().join(DEFAULT_SIDEBAR_NAME));
        assert!(sources.resolve(&ResolveOptions::default()).is_ok());
    }

    #[test]
    fn test_sidebar_path_from_preset() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nav")).unwrap();
        fs::write(
            dir.path().join("nav/docs.toml"),
            "[[sidebars]]\nid = \"main\"\nitems = [\"intro\"]",
        )
        .unwrap();
        let path = site(
            &dir,
            "[[presets]]\nname = \"classic\"\noptions = { docs = { sidebarPath = \"nav/docs.toml\" } }",
        );

        let sources = SiteSources::load(&path, None).unwrap();
        assert_eq!(sources.sidebar_path, dir.path().join("nav/docs.toml"));
        let config = sources.resolve(&ResolveOptions::default()).unwrap().config;
        assert!(config.sidebars.contains("main"));
    }

    #[test]
    fn test_explicit_sidebar_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let path = site(&dir, "");
        let err = SiteSources::load(&path, Some(Path::new("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(p, _) if p.ends_with("missing.toml")));
    }

    #[test]
    fn test_json_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docuconf.json");
        fs::write(&path, r#"{"site": {"title": "Docs", "baseUrl": "/"}}"#).unwrap();

        let sources = SiteSources::load(&path, None).unwrap();
        let config = sources.resolve(&ResolveOptions::default()).unwrap().config;
        assert_eq!(config.site.title, "Docs");
    }

    #[test]
    fn test_json_null_means_unset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docuconf.json");
        fs::write(
            &path,
            r#"{"site": {"title": "Docs", "tagline": null}, "navbar": null, "trailingSlash": null}"#,
        )
        .unwrap();

        let sources = SiteSources::load(&path, None).unwrap();
        let config = sources.resolve(&ResolveOptions::default()).unwrap().config;
        assert_eq!(config.site.title, "Docs");
        assert_eq!(config.site.tagline, "");
        assert_eq!(config.trailing_slash, None);
    }

    #[test]
    fn test_parse_errors_carry_path() {
        let dir = TempDir::new().unwrap();
        let path = site(&dir, "[site\ntitle = ");
        let err = SiteSources::load(&path, None).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(..)));
    }

    #[test]
    fn test_fingerprint_tracks_both_documents() {
        let dir = TempDir::new().unwrap();
        let path = site(&dir, "[site]\ntitle = \"Docs\"");
        let before = SiteSources::load(&path, None).unwrap().fingerprint();

        fs::write(dir.path().join(DEFAULT_SIDEBAR_NAME), "sidebars = []").unwrap();
        let after = SiteSources::load(&path, None).unwrap().fingerprint();
        assert_ne!(before, after);
        assert_eq!(after, SiteSources::load(&path, None).unwrap().fingerprint());
    }

    #[test]
    fn test_resolution_errors_are_diagnostics() {
        let sources = SiteSources::from_tables(
            test_table("[i18n]\ndefaultLocale = \"de\"\nlocales = [\"en\"]"),
            Table::new(),
        );
        let err = sources.resolve(&ResolveOptions::default()).unwrap_err();
        let diag = err.diagnostics().unwrap();
        assert_eq!(diag.codes(), vec![ErrorCode::InvalidDefaultLocale]);
    }
}
