//! Locale resolution.
//!
//! Turns the optional `[i18n]` section into an ordered [`LocaleSet`] with
//! per-locale derivations (label, `lang` attribute, direction, URL).

use crate::config::section::{Direction, I18nSection, LocaleOverrides};
use crate::config::types::{ConfigDiagnostics, ErrorCode, FieldPath};
use crate::utils::url::UrlPolicy;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Locale used when the document has no `[i18n]` section.
pub const IMPLICIT_LOCALE: &str = "en";

/// Language subtags written right-to-left.
const RTL_LANGUAGES: &[&str] = &["ar", "fa", "he", "ps", "sd", "ug", "ur", "yi"];

/// A locale with all derived values filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocale {
    pub code: String,
    pub label: String,
    pub html_lang: String,
    pub direction: Direction,
    /// URL segment (empty for the default locale).
    pub path: String,
    /// Where this locale's pages are served.
    pub base_url: String,
}

/// Ordered, unique locales with one designated default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSet {
    default_locale: String,
    locales: Vec<ResolvedLocale>,
}

impl LocaleSet {
    pub fn default_code(&self) -> &str {
        &self.default_locale
    }

    pub fn default_locale(&self) -> &ResolvedLocale {
        // default membership is checked during resolution
        self.get(&self.default_locale)
            .unwrap_or_else(|| &self.locales[0])
    }

    pub fn get(&self, code: &str) -> Option<&ResolvedLocale> {
        self.locales.iter().find(|l| l.code == code)
    }

    /// Locale codes in declaration order.
    pub fn codes(&self) -> Vec<&str> {
        self.locales.iter().map(|l| l.code.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedLocale> {
        self.locales.iter()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

/// Resolve the locale set.
///
/// Without an `[i18n]` section the set is exactly [`IMPLICIT_LOCALE`].
/// Declaration order is preserved.
pub fn resolve_locales(
    i18n: Option<&I18nSection>,
    urls: UrlPolicy<'_>,
) -> Result<LocaleSet, ConfigDiagnostics> {
    let Some(i18n) = i18n else {
        return Ok(LocaleSet {
            default_locale: IMPLICIT_LOCALE.to_string(),
            locales: vec![derive_locale(IMPLICIT_LOCALE, true, None, urls)],
        });
    };

    let section = FieldPath::new("i18n");
    let mut diag = ConfigDiagnostics::new();
    let mut seen = FxHashSet::default();

    for (i, code) in i18n.locales.iter().enumerate() {
        let field = section.key("locales").index(i);
        if code.trim().is_empty() {
            diag.error(ErrorCode::InvalidValue, field, "locale code must not be empty");
        } else if !seen.insert(code.as_str()) {
            diag.error(
                ErrorCode::DuplicateLocale,
                field,
                format!("locale \"{code}\" is declared more than once"),
            );
        }
    }

    if !i18n.locales.contains(&i18n.default_locale) {
        diag.error_with_hint(
            ErrorCode::InvalidDefaultLocale,
            section.key("defaultLocale"),
            format!(
                "default locale \"{}\" is not one of the declared locales [{}]",
                i18n.default_locale,
                i18n.locales.join(", ")
            ),
            format!("add \"{}\" to i18n.locales", i18n.default_locale),
        );
    }

    for (code, overrides) in &i18n.locale_configs {
        let field = section.key("localeConfigs").key(code);
        if let Some(path) = &overrides.path
            && (path.trim_matches('/').is_empty() || path.trim_matches('/').contains('/'))
        {
            diag.error(
                ErrorCode::InvalidValue,
                field.key("path"),
                format!("\"{path}\" is not a single URL segment"),
            );
        }
    }

    if diag.has_errors() {
        return Err(diag);
    }

    let locales = i18n
        .locales
        .iter()
        .map(|code| {
            let is_default = *code == i18n.default_locale;
            derive_locale(code, is_default, i18n.locale_configs.get(code), urls)
        })
        .collect();

    Ok(LocaleSet {
        default_locale: i18n.default_locale.clone(),
        locales,
    })
}

/// Unused locale configs, reported as warnings by the linker.
pub fn unused_locale_configs(i18n: &I18nSection) -> Vec<FieldPath> {
    i18n.locale_configs
        .keys()
        .filter(|code| !i18n.locales.contains(code))
        .map(|code| FieldPath::new("i18n").key("localeConfigs").key(code))
        .collect()
}

fn derive_locale(
    code: &str,
    is_default: bool,
    overrides: Option<&LocaleOverrides>,
    urls: UrlPolicy<'_>,
) -> ResolvedLocale {
    let overrides = overrides.cloned().unwrap_or_default();
    let path = overrides
        .path
        .map(|p| p.trim_matches('/').to_string())
        .unwrap_or_else(|| code.to_string());
    let base_url = if is_default {
        urls.base()
    } else {
        urls.join(&path)
    };

    ResolvedLocale {
        code: code.to_string(),
        label: overrides.label.unwrap_or_else(|| code.to_string()),
        html_lang: overrides.html_lang.unwrap_or_else(|| code.to_string()),
        direction: overrides
            .direction
            .unwrap_or_else(|| infer_direction(code)),
        path: if is_default { String::new() } else { path },
        base_url,
    }
}

/// Direction from the language subtag (`ar-EG` -> `ar`).
fn infer_direction(code: &str) -> Direction {
    let language = code
        .split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_ascii_lowercase();
    if RTL_LANGUAGES.contains(&language.as_str()) {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}
