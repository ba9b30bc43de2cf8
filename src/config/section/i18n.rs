//! `[i18n]` section.
//!
//! # Example
//!
//! ```toml
//! [i18n]
//! defaultLocale = "en"
//! locales = ["en", "fr", "ar"]
//!
//! [i18n.localeConfigs.fr]
//! label = "Français"
//!
//! [i18n.localeConfigs.ar]
//! direction = "rtl"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared locales. Omitting the whole section means "English only".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nSection {
    pub default_locale: String,
    pub locales: Vec<String>,
    #[serde(default)]
    pub locale_configs: BTreeMap<String, LocaleOverrides>,
}

/// Per-locale overrides of derived values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocaleOverrides {
    pub label: Option<String>,
    pub html_lang: Option<String>,
    pub direction: Option<Direction>,
    /// URL segment for the locale (defaults to the locale code).
    pub path: Option<String>,
}

/// Text direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}
