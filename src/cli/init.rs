//! `docuconf init`: write a starter config and sidebar document.

use crate::config::{DEFAULT_CONFIG_NAME, DEFAULT_SIDEBAR_NAME};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

const STARTER_SIDEBARS: &str = r#"# Sidebar document: each [[sidebars]] entry is one named navigation tree.

[[sidebars]]
id = "tutorialSidebar"
items = [
  "intro",
  { type = "category", label = "Getting Started", key = "getting-started", items = ["installation", "configuration"] },
]
"#;

/// Starter `docuconf.toml` content.
pub fn generate_config_template() -> String {
    format!(
        r#"# docuconf configuration file (v{version})

[site]
title = "My Docs"
tagline = "Documentation for my project"
url = "https://example.com"
baseUrl = "/"

[i18n]
defaultLocale = "en"
locales = ["en"]

[[presets]]
name = "classic"
# options = {{ blog = false, docs = {{ sidebarPath = "{sidebars}" }} }}

[navbar]
title = "My Docs"

[[navbar.items]]
kind = "sidebar-link"
sidebarId = "tutorialSidebar"
label = "Tutorial"

[[navbar.items]]
kind = "external-link"
href = "https://github.com/example/my-docs"
label = "GitHub"
position = "right"

[footer]
style = "dark"
copyrightTemplate = "Copyright © {{year}} {{title}}"
"#,
        version = env!("CARGO_PKG_VERSION"),
        sidebars = DEFAULT_SIDEBAR_NAME,
    )
}

/// Create the starter files in `name` (or the current directory).
///
/// If `dry_run` is true, only prints the config template to stdout.
pub fn new_site(name: Option<&Path>, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", generate_config_template());
        return Ok(());
    }

    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    let root = match name {
        Some(name) => cwd.join(name),
        None => cwd,
    };
    let written = write_starter(&root)?;
    for path in &written {
        debug!("init"; "wrote {}", path.display());
    }
    log!("init"; "created {} in {}", DEFAULT_CONFIG_NAME, root.display());
    Ok(())
}

/// Write both starter files, refusing to overwrite either.
fn write_starter(root: &Path) -> Result<Vec<PathBuf>> {
    let config = root.join(DEFAULT_CONFIG_NAME);
    let sidebars = root.join(DEFAULT_SIDEBAR_NAME);
    for path in [&config, &sidebars] {
        if path.exists() {
            bail!(
                "'{}' already exists.\nRemove it or choose a different directory.",
                path.display()
            );
        }
    }

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create directory '{}'", root.display()))?;
    fs::write(&config, generate_config_template())
        .with_context(|| format!("Failed to write '{}'", config.display()))?;
    fs::write(&sidebars, STARTER_SIDEBARS)
        .with_context(|| format!("Failed to write '{}'", sidebars.display()))?;
    Ok(vec![config, sidebars])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteSources;
    use crate::resolve::ResolveOptions;
    use tempfile::TempDir;

    #[test]
    fn test_starter_site_resolves_cleanly() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my-docs");
        write_starter(&root).unwrap();

        let sources = SiteSources::load(&root.join(DEFAULT_CONFIG_NAME), None).unwrap();
        let resolution = sources
            .resolve(&ResolveOptions::default().strict(true).with_year(2026))
            .unwrap();
        assert!(resolution.diagnostics.warnings().is_empty());

        let config = resolution.config;
        assert_eq!(config.site.title, "My Docs");
        assert_eq!(config.footer.copyright.as_deref(), Some("Copyright © 2026 My Docs"));
        assert!(config.sidebars.contains("tutorialSidebar"));
        assert_eq!(config.navbar.items.len(), 2);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(DEFAULT_SIDEBAR_NAME), "").unwrap();
        assert!(write_starter(temp.path()).is_err());
        assert!(!temp.path().join(DEFAULT_CONFIG_NAME).exists());
    }

    #[test]
    fn test_template_mentions_version() {
        assert!(generate_config_template().contains(env!("CARGO_PKG_VERSION")));
    }
}
