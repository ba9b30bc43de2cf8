//! `docuconf check`: validate and summarize.

use crate::cli::Cli;
use crate::cli::common::{load_sources, resolve_sources};
use crate::resolve::ResolvedConfig;
use crate::utils::plural_count;
use anyhow::Result;

pub fn check_site(cli: &Cli) -> Result<()> {
    let sources = load_sources(cli)?;
    let resolution = resolve_sources(cli, &sources)?;
    log!("check"; "{}", summary(&resolution.config));
    Ok(())
}

/// `config ok: 2 locales, 1 sidebar, 3 plugins, 2 navbar items`
fn summary(config: &ResolvedConfig) -> String {
    format!(
        "config ok: {}, {}, {}, {}",
        plural_count(config.i18n.len(), "locale"),
        plural_count(config.sidebars.len(), "sidebar"),
        plural_count(config.plugins.len(), "plugin"),
        plural_count(config.navbar.items.len(), "navbar item"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_table;
    use crate::resolve::{ResolveOptions, resolve};

    #[test]
    fn test_summary() {
        let config = resolve(
            &test_table("[[presets]]\nname = \"classic\"\noptions = { blog = false }"),
            &test_table("[[sidebars]]\nid = \"main\"\nitems = []"),
            &ResolveOptions::default(),
        )
        .unwrap()
        .config;
        assert_eq!(
            summary(&config),
            "config ok: 1 locale, 1 sidebar, 2 plugins, 0 navbar items"
        );
    }
}
