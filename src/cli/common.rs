//! Common utilities shared across CLI commands.

use crate::cli::Cli;
use crate::config::{ConfigError, SiteSources, find_config_file};
use crate::resolve::Resolution;
use crate::utils::plural_count;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// Locate and read the site documents named on the command line.
pub fn load_sources(cli: &Cli) -> Result<SiteSources> {
    let Some(config_path) = find_config_file(&cli.config) else {
        bail!(
            "config file '{}' not found. Run 'docuconf init' to create one.",
            cli.config.display()
        );
    };
    debug!("config"; "using {}", config_path.display());

    let sidebars = cli.sidebars.as_deref().map(absolute).transpose()?;
    Ok(SiteSources::load(&config_path, sidebars.as_deref())?)
}

/// Resolve, printing diagnostics and warnings the way every command does.
pub fn resolve_sources(cli: &Cli, sources: &SiteSources) -> Result<Resolution> {
    match sources.resolve(&cli.resolve_options()) {
        Ok(resolution) => {
            resolution.diagnostics.print_warnings();
            Ok(resolution)
        }
        Err(err) => {
            let summary = failure_summary(&err);
            if let ConfigError::Diagnostics(diag) = &err {
                diag.print_warnings();
            }
            eprintln!("{err}");
            bail!(summary)
        }
    }
}

/// One-line summary of a failed resolution.
pub fn failure_summary(err: &ConfigError) -> String {
    match err.diagnostics() {
        Some(diag) => format!("{} in config", plural_count(diag.len(), "error")),
        None => "config could not be read".to_string(),
    }
}

/// Path as given, anchored at the current directory when relative.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigDiagnostics, ErrorCode, FieldPath};

    #[test]
    fn test_failure_summary() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(ErrorCode::UnknownPreset, FieldPath::new("presets[0].name"), "unknown");
        diag.error(ErrorCode::NestedDropdown, FieldPath::new("navbar.items[0].items[0]"), "nested");
        assert_eq!(
            failure_summary(&ConfigError::Diagnostics(diag)),
            "2 errors in config"
        );

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(
            failure_summary(&ConfigError::Io(PathBuf::from("x.toml"), io)),
            "config could not be read"
        );
    }

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let path = std::env::temp_dir().join("sidebars.toml");
        assert_eq!(absolute(&path).unwrap(), path);
    }
}
