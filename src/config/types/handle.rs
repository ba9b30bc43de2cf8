//! Swappable resolved config for watch mode.
//!
//! Uses `arc-swap` for lock-free reads and atomic replacement. A reload that
//! fails leaves the last good config in place. The handle is an ordinary
//! value owned by whoever watches; nothing here is global.

use crate::config::SiteSources;
use crate::config::types::{ConfigDiagnostics, ConfigError};
use crate::resolve::{ResolveOptions, ResolvedConfig};
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// What a reload did.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// Sources hash to the same value; nothing was resolved.
    Unchanged,
    /// New config swapped in, with the warnings it produced.
    Updated(ConfigDiagnostics),
}

#[derive(Debug)]
pub struct ConfigHandle {
    config: ArcSwap<ResolvedConfig>,
    fingerprint: AtomicU64,
}

impl ConfigHandle {
    pub fn new(config: ResolvedConfig, fingerprint: u64) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            fingerprint: AtomicU64::new(fingerprint),
        }
    }

    #[inline]
    pub fn load(&self) -> Arc<ResolvedConfig> {
        self.config.load_full()
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint.load(Ordering::Relaxed)
    }

    /// Resolve `sources` and swap the result in if content changed.
    pub fn update(
        &self,
        sources: &SiteSources,
        options: &ResolveOptions,
    ) -> Result<ReloadOutcome, ConfigError> {
        if sources.fingerprint() == self.fingerprint() {
            return Ok(ReloadOutcome::Unchanged);
        }

        let resolution = sources.resolve(options)?;
        self.config.store(Arc::new(resolution.config));
        self.fingerprint
            .store(sources.fingerprint(), Ordering::Relaxed);

        Ok(ReloadOutcome::Updated(resolution.diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_table;
    use toml::Table;

    fn sources(site: &str) -> SiteSources {
        SiteSources::from_tables(test_table(site), Table::new())
    }

    fn handle(site: &str) -> (ConfigHandle, SiteSources) {
        let sources = sources(site);
        let config = sources
            .resolve(&ResolveOptions::default())
            .unwrap()
            .config;
        (ConfigHandle::new(config, sources.fingerprint()), sources)
    }

    #[test]
    fn test_unchanged_sources_skip_resolution() {
        let (handle, sources) = handle("[site]\ntitle = \"One\"");
        let outcome = handle.update(&sources, &ResolveOptions::default()).unwrap();
        assert!(matches!(outcome, ReloadOutcome::Unchanged));
    }

    #[test]
    fn test_update_swaps_config() {
        let (handle, _) = handle("[site]\ntitle = \"One\"");
        let before = handle.load();

        let next = sources("[site]\ntitle = \"Two\"");
        let outcome = handle.update(&next, &ResolveOptions::default()).unwrap();
        assert!(matches!(outcome, ReloadOutcome::Updated(_)));
        assert_eq!(handle.load().site.title, "Two");
        assert_eq!(handle.fingerprint(), next.fingerprint());
        // readers holding the old snapshot keep it
        assert_eq!(before.site.title, "One");
    }

    #[test]
    fn test_failed_reload_keeps_last_good_config() {
        let (handle, _) = handle("[site]\ntitle = \"One\"");
        let fingerprint = handle.fingerprint();

        let broken = sources("[i18n]\ndefaultLocale = \"de\"\nlocales = [\"en\"]");
        assert!(handle.update(&broken, &ResolveOptions::default()).is_err());
        assert_eq!(handle.load().site.title, "One");
        assert_eq!(handle.fingerprint(), fingerprint);
    }
}
