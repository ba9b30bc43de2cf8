//! Preset expansion.
//!
//! A preset is a named bundle of sub-features. Each enabled sub-feature
//! becomes one plugin entry, in the order:
//!
//! | Sub-feature | Plugin            | Implicit defaults        |
//! |-------------|-------------------|--------------------------|
//! | `docs`      | `content-docs`    | `routeBasePath = "docs"` |
//! | `blog`      | `content-blog`    | `routeBasePath = "blog"` |
//! | `theme`     | `theme-classic`   | (none)                   |
//!
//! Option precedence is user override > preset default > implicit default.

use crate::config::section::{FeatureToggle, PluginSpec, PresetSpec};
use crate::config::types::{ConfigDiagnostics, ErrorCode, FieldPath};
use serde::Serialize;
use toml::{Table, Value};

// ============================================================================
// Sub-features
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubFeature {
    Docs,
    Blog,
    Theme,
}

impl SubFeature {
    /// Canonical expansion order.
    pub const ALL: [SubFeature; 3] = [Self::Docs, Self::Blog, Self::Theme];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::Blog => "blog",
            Self::Theme => "theme",
        }
    }

    pub const fn plugin_name(self) -> &'static str {
        match self {
            Self::Docs => "content-docs",
            Self::Blog => "content-blog",
            Self::Theme => "theme-classic",
        }
    }

    /// Options applied when neither the preset nor the user sets them.
    pub fn defaults(self) -> Table {
        let mut table = Table::new();
        match self {
            Self::Docs => {
                table.insert("routeBasePath".into(), Value::String("docs".into()));
            }
            Self::Blog => {
                table.insert("routeBasePath".into(), Value::String("blog".into()));
            }
            Self::Theme => {}
        }
        table
    }
}

// ============================================================================
// Built-in presets
// ============================================================================

/// Known preset names.
pub const PRESETS: &[&str] = &["classic", "docs-only"];

/// Preset default for one sub-feature, `None` when the preset leaves it
/// disabled.
fn preset_default(preset: &str, feature: SubFeature) -> Option<Table> {
    match (preset, feature) {
        ("classic", _) => Some(feature.defaults()),
        ("docs-only", SubFeature::Docs) => {
            let mut table = feature.defaults();
            table.insert("routeBasePath".into(), Value::String("/".into()));
            Some(table)
        }
        ("docs-only", SubFeature::Theme) => Some(feature.defaults()),
        _ => None,
    }
}

// ============================================================================
// Composition
// ============================================================================

/// One composed plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginEntry {
    pub name: String,
    /// Preset this entry was expanded from, `None` for explicit plugins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<SubFeature>,
    pub options: Table,
}

/// Expand presets in declaration order, then append explicit plugins.
pub fn compose_presets(
    presets: &[PresetSpec],
    plugins: &[PluginSpec],
) -> Result<Vec<PluginEntry>, ConfigDiagnostics> {
    compose_entries(presets.iter().enumerate(), plugins.iter().enumerate())
}

/// [`compose_presets`] over entries paired with their document index.
pub(crate) fn compose_entries<'a>(
    presets: impl IntoIterator<Item = (usize, &'a PresetSpec)>,
    plugins: impl IntoIterator<Item = (usize, &'a PluginSpec)>,
) -> Result<Vec<PluginEntry>, ConfigDiagnostics> {
    let mut diag = ConfigDiagnostics::new();
    let mut entries = Vec::new();

    for (i, preset) in presets {
        if !PRESETS.contains(&preset.name.as_str()) {
            diag.error_with_hint(
                ErrorCode::UnknownPreset,
                FieldPath::new("presets").index(i).key("name"),
                format!("unknown preset \"{}\"", preset.name),
                format!("available presets: {}", PRESETS.join(", ")),
            );
            continue;
        }

        for feature in SubFeature::ALL {
            let toggle = match feature {
                SubFeature::Docs => preset.options.docs.as_ref(),
                SubFeature::Blog => preset.options.blog.as_ref(),
                SubFeature::Theme => preset.options.theme.as_ref(),
            };
            let base = preset_default(&preset.name, feature);
            let options = match toggle {
                Some(FeatureToggle::Enabled(false)) => None,
                Some(FeatureToggle::Enabled(true)) => {
                    Some(base.unwrap_or_else(|| feature.defaults()))
                }
                Some(FeatureToggle::Options(overrides)) => {
                    let mut merged = base.unwrap_or_else(|| feature.defaults());
                    merge_options(&mut merged, overrides);
                    Some(merged)
                }
                None => base,
            };
            if let Some(options) = options {
                entries.push(PluginEntry {
                    name: feature.plugin_name().to_string(),
                    preset: Some(preset.name.clone()),
                    feature: Some(feature),
                    options,
                });
            }
        }
    }

    for (i, plugin) in plugins {
        if plugin.name.trim().is_empty() {
            diag.error(
                ErrorCode::InvalidValue,
                FieldPath::new("plugins").index(i).key("name"),
                "plugin name must not be empty",
            );
            continue;
        }
        entries.push(PluginEntry {
            name: plugin.name.clone(),
            preset: None,
            feature: None,
            options: plugin.options.clone(),
        });
    }

    diag.finish(entries)
}

/// Deep merge `overrides` into `base`: tables merge recursively, any other
/// value replaces.
pub fn merge_options(base: &mut Table, overrides: &Table) {
    for (key, value) in overrides {
        match (base.get_mut(key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                merge_options(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// First `docs.sidebarPath` among the presets, in declaration order.
pub fn docs_sidebar_path(presets: &[PresetSpec]) -> Option<&str> {
    presets.iter().find_map(|preset| match &preset.options.docs {
        Some(FeatureToggle::Options(table)) => table.get("sidebarPath").and_then(Value::as_str),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets(src: &str) -> Vec<PresetSpec> {
        #[derive(serde::Deserialize)]
        struct Doc {
            presets: Vec<PresetSpec>,
        }
        toml::from_str::<Doc>(src).unwrap().presets
    }

    fn names(entries: &[PluginEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_classic_expands_in_canonical_order() {
        let entries = compose_presets(&presets("[[presets]]\nname = \"classic\""), &[]).unwrap();
        assert_eq!(
            names(&entries),
            vec!["content-docs", "content-blog", "theme-classic"]
        );
        assert_eq!(entries[0].options.get("routeBasePath").unwrap().as_str(), Some("docs"));
    }

    #[test]
    fn test_disabling_blog_removes_exactly_one_entry() {
        let full = compose_presets(&presets("[[presets]]\nname = \"classic\""), &[]).unwrap();
        let trimmed = compose_presets(
            &presets("[[presets]]\nname = \"classic\"\noptions = { blog = false }"),
            &[],
        )
        .unwrap();
        assert_eq!(trimmed.len(), full.len() - 1);
        assert!(trimmed.iter().all(|e| e.feature != Some(SubFeature::Blog)));
    }

    #[test]
    fn test_override_merges_deeply() {
        let entries = compose_presets(
            &presets(
                r#"
[[presets]]
name = "classic"
[presets.options.docs]
sidebarPath = "sidebars.toml"
editUrl = { base = "https://example.com", branch = "main" }
"#,
            ),
            &[],
        )
        .unwrap();
        let docs = &entries[0].options;
        assert_eq!(docs.get("routeBasePath").unwrap().as_str(), Some("docs"));
        assert_eq!(docs.get("sidebarPath").unwrap().as_str(), Some("sidebars.toml"));

        let mut base = entries[0].options.clone();
        let overrides: Table = toml::from_str("editUrl = { branch = \"dev\" }").unwrap();
        merge_options(&mut base, &overrides);
        let edit = base.get("editUrl").unwrap().as_table().unwrap();
        assert_eq!(edit.get("branch").unwrap().as_str(), Some("dev"));
        assert_eq!(edit.get("base").unwrap().as_str(), Some("https://example.com"));
    }

    #[test]
    fn test_docs_only_preset() {
        let entries = compose_presets(&presets("[[presets]]\nname = \"docs-only\""), &[]).unwrap();
        assert_eq!(names(&entries), vec!["content-docs", "theme-classic"]);
        assert_eq!(entries[0].options.get("routeBasePath").unwrap().as_str(), Some("/"));

        let with_blog = compose_presets(
            &presets("[[presets]]\nname = \"docs-only\"\noptions = { blog = true }"),
            &[],
        )
        .unwrap();
        assert_eq!(
            names(&with_blog),
            vec!["content-docs", "content-blog", "theme-classic"]
        );
        assert_eq!(with_blog[1].options.get("routeBasePath").unwrap().as_str(), Some("blog"));
    }

    #[test]
    fn test_unknown_preset_is_reported_and_others_kept() {
        let err = compose_presets(
            &presets("[[presets]]\nname = \"classic\"\n[[presets]]\nname = \"fancy\""),
            &[],
        )
        .unwrap_err();
        assert_eq!(err.codes(), vec![ErrorCode::UnknownPreset]);
        assert_eq!(err.errors()[0].field_path.as_str(), "presets[1].name");
        assert!(err.errors()[0].hint.as_deref().unwrap().contains("classic"));
    }

    #[test]
    fn test_plugins_follow_presets() {
        let plugins = vec![PluginSpec {
            name: "search-local".into(),
            options: Table::new(),
        }];
        let entries = compose_presets(&presets("[[presets]]\nname = \"docs-only\""), &plugins).unwrap();
        assert_eq!(names(&entries).last(), Some(&"search-local"));
        assert_eq!(entries.last().unwrap().preset, None);
    }

    #[test]
    fn test_sidebar_path_lookup() {
        let specs = presets(
            r#"
[[presets]]
name = "classic"
options = { docs = true }

[[presets]]
name = "docs-only"
options = { docs = { sidebarPath = "nav/sidebars.toml" } }
"#,
        );
        assert_eq!(docs_sidebar_path(&specs), Some("nav/sidebars.toml"));
        assert_eq!(docs_sidebar_path(&[]), None);
    }
}
