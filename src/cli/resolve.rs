//! `docuconf resolve`: print the resolved config.

use crate::cli::Cli;
use crate::cli::common::{load_sources, resolve_sources};
use crate::resolve::ResolvedConfig;
use anyhow::{Context, Result};
use std::fs;
use std::io::{Write, stdout};
use std::path::Path;

pub fn resolve_site(cli: &Cli, compact: bool, output: Option<&Path>) -> Result<()> {
    let sources = load_sources(cli)?;
    let resolution = resolve_sources(cli, &sources)?;
    let json = to_json(&resolution.config, compact)?;

    match output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log!("resolve"; "wrote {}", path.display());
        }
        None => {
            let mut stdout = stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

fn to_json(config: &ResolvedConfig, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(config)?
    } else {
        serde_json::to_string_pretty(config)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_table;
    use crate::resolve::{ResolveOptions, resolve};

    #[test]
    fn test_json_shapes() {
        let config = resolve(
            &test_table("[site]\ntitle = \"Docs\""),
            &test_table(""),
            &ResolveOptions::default(),
        )
        .unwrap()
        .config;

        let compact = to_json(&config, true).unwrap();
        assert!(!compact.contains('\n'));
        let pretty = to_json(&config, false).unwrap();
        assert!(pretty.contains("\n  \"site\""));

        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value["site"]["title"], "Docs");
        assert_eq!(value["onBrokenLinks"], "throw");
    }
}
