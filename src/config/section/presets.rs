//! `[[presets]]` and `[[plugins]]` sections.
//!
//! # Example
//!
//! ```toml
//! [[presets]]
//! name = "classic"
//!
//! [presets.options]
//! blog = false
//! docs = { sidebarPath = "sidebars.toml", editUrl = "https://github.com/org/repo/tree/main/" }
//! theme = { customCss = "src/css/custom.css" }
//!
//! [[plugins]]
//! name = "search-local"
//! options = { indexBlog = false }
//! ```

use serde::{Deserialize, Serialize};
use toml::Table;

/// A named preset with user overrides per sub-feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetSpec {
    pub name: String,
    #[serde(default)]
    pub options: PresetOptions,
}

/// Overrides keyed by sub-feature. `None` inherits the preset default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetOptions {
    pub docs: Option<FeatureToggle>,
    pub blog: Option<FeatureToggle>,
    pub theme: Option<FeatureToggle>,
}

/// A sub-feature value: `false` removes it, `true` keeps the preset
/// default, a table is merged over the preset default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureToggle {
    Enabled(bool),
    Options(Table),
}

/// A standalone plugin appended after all preset plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,
    #[serde(default)]
    pub options: Table,
}
