//! `docuconf watch`: re-resolve on every change.
//!
//! ```text
//! notify → relevance filter → debounce → SiteSources::load → ConfigHandle::update
//! ```
//!
//! Parent directories are watched non-recursively, so editors that save by
//! rename still produce events. A failed reload keeps the last good config.

use crate::cli::Cli;
use crate::cli::common::{failure_summary, load_sources, resolve_sources};
use crate::config::types::ReloadOutcome;
use crate::config::{ConfigHandle, SiteSources};
use crate::logger::{status_error, status_success, status_unchanged};
use crate::utils::plural_count;
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::Duration;

/// Quiet period before a burst of events triggers one reload
const DEBOUNCE_MS: u64 = 200;

pub fn watch_site(cli: &Cli) -> Result<()> {
    let sources = load_sources(cli)?;
    let resolution = resolve_sources(cli, &sources)?;
    let handle = ConfigHandle::new(resolution.config, sources.fingerprint());

    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })
    .context("Failed to start file watcher")?;

    let mut dirs = FxHashSet::default();
    let mut targets = watch_targets(&sources);
    watch_dirs(&mut watcher, &mut dirs, &targets)?;

    log!("watch"; "watching {}", describe(&targets));
    status_success("config ok");

    while wait_for_change(&rx, &targets) {
        let sources = match load_sources(cli) {
            Ok(sources) => sources,
            Err(err) => {
                status_error("reload failed", &format!("{err:#}"));
                continue;
            }
        };

        // a preset may point sidebarPath somewhere new
        targets = watch_targets(&sources);
        watch_dirs(&mut watcher, &mut dirs, &targets)?;

        match handle.update(&sources, &cli.resolve_options()) {
            Ok(ReloadOutcome::Unchanged) => status_unchanged("unchanged"),
            Ok(ReloadOutcome::Updated(warnings)) => {
                let config = handle.load();
                let mut message = format!(
                    "reloaded: {}, {}",
                    plural_count(config.i18n.len(), "locale"),
                    plural_count(config.sidebars.len(), "sidebar")
                );
                if !warnings.warnings().is_empty() {
                    message.push_str(&format!(
                        " ({})",
                        plural_count(warnings.warnings().len(), "warning")
                    ));
                }
                status_success(&message);
            }
            Err(err) => status_error(&failure_summary(&err), &err.to_string()),
        }
    }

    Ok(())
}

/// Block until a relevant event arrives, then drain the burst.
///
/// Returns false once the watcher is gone.
fn wait_for_change(rx: &Receiver<notify::Result<Event>>, targets: &[PathBuf]) -> bool {
    loop {
        match rx.recv() {
            Ok(Ok(event)) if is_relevant(&event, targets) => break,
            Ok(Ok(_)) => {}
            Ok(Err(err)) => log!("watch"; "notify error: {}", err),
            Err(_) => return false,
        }
    }
    loop {
        match rx.recv_timeout(Duration::from_millis(DEBOUNCE_MS)) {
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => return true,
            Err(RecvTimeoutError::Disconnected) => return false,
        }
    }
}

/// Whether `event` touches one of the watched files.
fn is_relevant(event: &Event, targets: &[PathBuf]) -> bool {
    match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => {}
        // Ignore metadata-only changes (mtime/atime/chmod noise)
        EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => return false,
        EventKind::Modify(_) => {}
        _ => return false,
    }

    let names: FxHashSet<&OsStr> = targets.iter().filter_map(|t| t.file_name()).collect();
    event
        .paths
        .iter()
        .filter_map(|path| path.file_name())
        .any(|name| names.contains(name))
}

fn watch_targets(sources: &SiteSources) -> Vec<PathBuf> {
    sources
        .watched_paths()
        .iter()
        .map(|path| path.to_path_buf())
        .collect()
}

fn watch_dirs(
    watcher: &mut RecommendedWatcher,
    watched: &mut FxHashSet<PathBuf>,
    targets: &[PathBuf],
) -> Result<()> {
    for dir in targets.iter().filter_map(|path| path.parent()) {
        if dir.as_os_str().is_empty() || !dir.exists() || watched.contains(dir) {
            continue;
        }
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch '{}'", dir.display()))?;
        debug!("watch"; "watching directory {}", dir.display());
        watched.insert(dir.to_path_buf());
    }
    Ok(())
}

fn describe(targets: &[PathBuf]) -> String {
    targets
        .iter()
        .filter_map(|path| path.file_name().map(Path::new))
        .map(|name| name.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
