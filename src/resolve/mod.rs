//! Config resolution.
//!
//! Turns a raw site document plus a sidebar document into one immutable
//! [`ResolvedConfig`], or into every error found along the way.
//!
//! | Stage    | Module           | Depends on       |
//! |----------|------------------|------------------|
//! | schema   | `config::schema` | -                |
//! | locales  | `locale`         | site (base URL)  |
//! | sidebars | `sidebar`        | -                |
//! | presets  | `preset`         | -                |
//! | navbar   | `navbar`         | sidebar registry |
//! | footer   | `footer`         | site title       |
//! | links    | this file        | presets, navbar  |
//!
//! Locales, sidebars and presets are independent and run in parallel.
//! Diagnostics are always merged in the table order above, so output does
//! not depend on scheduling.

pub mod footer;
pub mod locale;
pub mod navbar;
pub mod preset;
pub mod sidebar;


pub use footer::{CopyrightContext, ResolvedFooter, assemble_footer};
pub use locale::{IMPLICIT_LOCALE, LocaleSet, ResolvedLocale, resolve_locales};
pub use navbar::{ResolvedNavbar, ResolvedNavbarItem, assemble_navbar};
pub use preset::{PluginEntry, SubFeature, compose_presets};
pub use sidebar::{Sidebar, SidebarEntry, SidebarRegistry, build_registry};

use crate::config::schema::{self, ShapeReport, UnknownKeys, registry};
use crate::config::section::{
    FooterSection, I18nSection, LinkPolicy, NavbarItemSpec, NavbarSection, PluginSpec, PresetSpec,
    SidebarDocument, SiteIdentity,
};
use crate::config::types::{ConfigDiagnostics, ErrorCode, FieldPath};
use crate::utils::url::UrlPolicy;
use chrono::Datelike;
use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::{Table, Value};

// ============================================================================
// Options
// ============================================================================

/// Knobs that do not come from the document itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Overrides `docuconf.unknownKeys` from the document.
    pub unknown_keys: Option<UnknownKeys>,
    /// Year for `{year}` in the copyright; current local year when unset.
    pub year: Option<i32>,
}

impl ResolveOptions {
    pub fn strict(mut self, strict: bool) -> Self {
        if strict {
            self.unknown_keys = Some(UnknownKeys::Strict);
        }
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    fn policy(&self, document: &Table) -> UnknownKeys {
        self.unknown_keys
            .or_else(|| {
                document
                    .get("docuconf")
                    .and_then(Value::as_table)
                    .and_then(|tool| tool.get("unknownKeys"))
                    .and_then(Value::as_str)
                    .and_then(|s| match s {
                        "strict" => Some(UnknownKeys::Strict),
                        "permissive" => Some(UnknownKeys::Permissive),
                        _ => None,
                    })
            })
            .unwrap_or_default()
    }

    fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| chrono::Local::now().year())
    }
}

// ============================================================================
// Output
// ============================================================================

/// Fully resolved site configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub site: SiteIdentity,
    pub i18n: LocaleSet,
    pub sidebars: SidebarRegistry,
    pub plugins: Vec<PluginEntry>,
    pub navbar: ResolvedNavbar,
    pub footer: ResolvedFooter,
    pub theme_config: Table,
    pub on_broken_links: LinkPolicy,
    pub on_broken_markdown_links: LinkPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_slash: Option<bool>,
    /// Undeclared keys by field path, kept under the permissive policy.
    #[serde(skip_serializing_if = "Table::is_empty")]
    pub extra: Table,
}

impl ResolvedConfig {
    pub fn plugin(&self, name: &str) -> Option<&PluginEntry> {
        self.plugins.iter().find(|p| p.name == name)
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugin(name).is_some()
    }
}

/// A successful resolution with the warnings it produced.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub config: ResolvedConfig,
    /// Warnings only; never carries errors.
    pub diagnostics: ConfigDiagnostics,
}

// ============================================================================
// Linker
// ============================================================================

/// Resolve a site document and its sidebar document.
///
/// Every stage runs even when an earlier one failed. A malformed section
/// entry (one navbar item, one preset) is left out of its stage instead of
/// disabling the stage, so one call reports all problems.
pub fn resolve(
    document: &Table,
    sidebars: &Table,
    options: &ResolveOptions,
) -> Result<Resolution, ConfigDiagnostics> {
    let policy = options.policy(document);
    let mut diag = ConfigDiagnostics::new();

    // schema
    let shape = schema::check(document, registry::DOCUMENT);
    let sidebar_shape = schema::check(sidebars, registry::SIDEBAR_DOCUMENT);
    absorb_shape(&mut diag, &shape, policy);
    absorb_shape(&mut diag, &sidebar_shape, policy);

    let site = salvage::<SiteIdentity>(document.get("site"), "site", &shape, &mut diag).or_default();
    let i18n = section::<I18nSection>(document, "i18n", &shape, &mut diag);
    let presets = entries::<PresetSpec>(document.get("presets"), "presets", &shape, &mut diag);
    let plugins = entries::<PluginSpec>(document.get("plugins"), "plugins", &shape, &mut diag);
    let navbar_head = document.get("navbar").map(|navbar| without(navbar, "items"));
    let navbar_spec =
        salvage::<NavbarSection>(navbar_head.as_ref(), "navbar", &shape, &mut diag).or_default();
    let navbar_entries = entries::<NavbarItemSpec>(
        document.get("navbar").and_then(|navbar| navbar.get("items")),
        "navbar.items",
        &shape,
        &mut diag,
    );
    let footer_spec = section::<FooterSection>(document, "footer", &shape, &mut diag).or_default();
    let on_broken_links = section(document, "onBrokenLinks", &shape, &mut diag)
        .or(LinkPolicy::Throw);
    let on_broken_markdown_links = section(document, "onBrokenMarkdownLinks", &shape, &mut diag)
        .or(LinkPolicy::Warn);
    let trailing_slash = section::<bool>(document, "trailingSlash", &shape, &mut diag);
    let sidebar_doc = if sidebar_shape.errors.is_empty() {
        deserialize::<SidebarDocument>(
            Value::Table(sidebars.clone()),
            &FieldPath::new("sidebars"),
            &mut diag,
        )
    } else {
        None
    };

    if let Some(site) = &site {
        site.validate(&mut diag);
    }
    let trailing = match &trailing_slash {
        Slot::Valid(flag) => Some(*flag),
        _ => None,
    };

    // locales, sidebars and presets are independent
    let base_url = site.as_ref().map(|s| s.base_url.as_str()).unwrap_or("/");
    let urls = UrlPolicy::new(base_url, trailing);
    let (locales, (registry, composed)) = rayon::join(
        || match &i18n {
            Slot::Absent => Some(resolve_locales(None, urls)),
            Slot::Valid(section) => Some(resolve_locales(Some(section), urls)),
            Slot::Invalid => None,
        },
        || {
            rayon::join(
                || sidebar_doc.as_ref().map(build_registry),
                || preset::compose_entries(presets.iter(), plugins.iter()),
            )
        },
    );

    let locales = locales.and_then(|r| diag.absorb(r));
    if let Slot::Valid(section) = &i18n {
        for field in locale::unused_locale_configs(section) {
            diag.warn(field, "locale config for an undeclared locale is ignored");
        }
    }
    let registry = registry.and_then(|r| diag.absorb(r));
    let composed = diag.absorb(composed);

    // navbar
    let navbar_items = diag.absorb(navbar::assemble_items(
        navbar_entries.iter(),
        registry.as_ref(),
    ));
    let resolved_navbar = match (navbar_spec, navbar_items) {
        (Some(head), Some(items)) => Some(ResolvedNavbar {
            title: head.title,
            logo: head.logo,
            items,
        }),
        _ => None,
    };

    // footer
    let resolved_footer = match &footer_spec {
        Some(section) => {
            if let Some(template) = &section.copyright_template {
                for token in footer::unknown_copyright_tokens(template) {
                    diag.warn(
                        FieldPath::new("footer").key("copyrightTemplate"),
                        format!("unknown token `{{{token}}}` left as is"),
                    );
                }
            }
            let context = CopyrightContext {
                year: options.year(),
                title: site.as_ref().map_or("", |site| site.title.as_str()),
            };
            diag.absorb(assemble_footer(section, context))
        }
        None => None,
    };

    // links; a left-out preset or plugin may be the one providing docs
    if let Some(composed) = &composed {
        if presets.complete && plugins.complete {
            check_docs_plugin(&navbar_entries, composed, &mut diag);
        }
    }

    if diag.has_errors() {
        return Err(diag);
    }
    let (
        Some(site),
        Some(i18n),
        Some(sidebars),
        Some(plugins),
        Some(navbar),
        Some(footer),
        Some(on_broken_links),
        Some(on_broken_markdown_links),
    ) = (
        site,
        locales,
        registry,
        composed,
        resolved_navbar,
        resolved_footer,
        on_broken_links,
        on_broken_markdown_links,
    )
    else {
        // every stage that produced nothing recorded an error
        return Err(diag);
    };

    let theme_config = document
        .get("themeConfig")
        .and_then(Value::as_table)
        .cloned()
        .unwrap_or_default();
    let extra = match policy {
        UnknownKeys::Permissive => shape
            .unknown
            .iter()
            .chain(&sidebar_shape.unknown)
            .map(|(path, value)| (path.as_str().to_string(), value.clone()))
            .collect(),
        UnknownKeys::Strict => Table::new(),
    };

    let config = ResolvedConfig {
        site,
        i18n,
        sidebars,
        plugins,
        navbar,
        footer,
        theme_config,
        on_broken_links,
        on_broken_markdown_links,
        trailing_slash: trailing,
        extra,
    };
    Ok(Resolution {
        config,
        diagnostics: diag,
    })
}

fn absorb_shape(diag: &mut ConfigDiagnostics, report: &ShapeReport, policy: UnknownKeys) {
    for error in &report.errors {
        diag.push(error.clone().into_diagnostic());
    }
    match policy {
        UnknownKeys::Strict => {
            for (path, _) in &report.unknown {
                diag.error_with_hint(
                    ErrorCode::UnknownField,
                    path.clone(),
                    "unknown field",
                    "remove it, or set docuconf.unknownKeys = \"permissive\"",
                );
            }
        }
        UnknownKeys::Permissive => {
            for (path, _) in &report.unknown {
                diag.warn(path.clone(), "unknown field is passed through");
            }
        }
    }
}

/// `sidebar-link` items need the docs plugin to have anything to show.
fn check_docs_plugin(
    items: &Entries<NavbarItemSpec>,
    plugins: &[PluginEntry],
    diag: &mut ConfigDiagnostics,
) {
    if plugins
        .iter()
        .any(|p| p.name == SubFeature::Docs.plugin_name())
    {
        return;
    }
    let root = FieldPath::new("navbar").key("items");
    for (i, item) in items.iter() {
        let path = root.index(i);
        match item {
            NavbarItemSpec::SidebarLink { .. } => docs_disabled(path, diag),
            NavbarItemSpec::Dropdown { items, .. } => {
                for (j, child) in items.iter().enumerate() {
                    if matches!(child, NavbarItemSpec::SidebarLink { .. }) {
                        docs_disabled(path.key("items").index(j), diag);
                    }
                }
            }
            NavbarItemSpec::ExternalLink { .. } => {}
        }
    }
}

fn docs_disabled(path: FieldPath, diag: &mut ConfigDiagnostics) {
    diag.error_with_hint(
        ErrorCode::DocsPluginDisabled,
        path,
        "sidebar link requires the docs plugin, but no preset enables it",
        "enable `docs` in a preset, or use an external-link item",
    );
}

// ============================================================================
// Section slots
// ============================================================================

/// A top-level key after shape validation.
enum Slot<T> {
    Absent,
    Valid(T),
    /// Present but unusable; the reason is already recorded.
    Invalid,
}

impl<T> Slot<T> {
    /// Value, or `fallback` when absent; `None` when invalid.
    fn or(self, fallback: T) -> Option<T> {
        match self {
            Slot::Absent => Some(fallback),
            Slot::Valid(value) => Some(value),
            Slot::Invalid => None,
        }
    }

    fn or_default(self) -> Option<T>
    where
        T: Default,
    {
        self.or(T::default())
    }
}

/// Typed view of `document[key]`; any shape error below it makes it
/// unusable.
fn section<T: DeserializeOwned>(
    document: &Table,
    key: &str,
    shape: &ShapeReport,
    diag: &mut ConfigDiagnostics,
) -> Slot<T> {
    let Some(value) = document.get(key) else {
        return Slot::Absent;
    };
    if shape.has_errors_under(key) {
        return Slot::Invalid;
    }
    deserialize(value.clone(), &FieldPath::new(key), diag).map_or(Slot::Invalid, Slot::Valid)
}

/// Like [`section`], but a table drops the keys that failed shape checks
/// and keeps the rest. Only for sections whose fields are independent.
fn salvage<T: DeserializeOwned>(
    value: Option<&Value>,
    key: &str,
    shape: &ShapeReport,
    diag: &mut ConfigDiagnostics,
) -> Slot<T> {
    let Some(value) = value else {
        return Slot::Absent;
    };
    let path = FieldPath::new(key);
    if !shape.has_errors_under(key) {
        return deserialize(value.clone(), &path, diag).map_or(Slot::Invalid, Slot::Valid);
    }
    let value = match value {
        Value::Table(table) => Value::Table(
            table
                .iter()
                .filter(|(key, _)| !shape.has_errors_under(path.key(key).as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    };
    // anything that still fails here has a shape error on record
    value.try_into::<T>().map_or(Slot::Invalid, Slot::Valid)
}

/// Array entries that passed shape checks, paired with their index.
struct Entries<T> {
    items: Vec<(usize, T)>,
    /// No entry was left out.
    complete: bool,
}

impl<T> Entries<T> {
    fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().map(|(i, item)| (*i, item))
    }
}

fn entries<T: DeserializeOwned>(
    value: Option<&Value>,
    key: &str,
    shape: &ShapeReport,
    diag: &mut ConfigDiagnostics,
) -> Entries<T> {
    let Some(value) = value else {
        return Entries {
            items: Vec::new(),
            complete: true,
        };
    };
    let Value::Array(array) = value else {
        return Entries {
            items: Vec::new(),
            complete: false,
        };
    };
    let root = FieldPath::new(key);
    let items: Vec<_> = array
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let path = root.index(i);
            if shape.has_errors_under(path.as_str()) {
                return None;
            }
            deserialize(item.clone(), &path, diag).map(|item| (i, item))
        })
        .collect();
    Entries {
        complete: items.len() == array.len(),
        items,
    }
}

fn without(value: &Value, key: &str) -> Value {
    let mut value = value.clone();
    if let Value::Table(table) = &mut value {
        table.remove(key);
    }
    value
}

/// Typed view of an already shape-checked value.
fn deserialize<T: DeserializeOwned>(
    value: Value,
    path: &FieldPath,
    diag: &mut ConfigDiagnostics,
) -> Option<T> {
    match value.try_into::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            diag.error(ErrorCode::TypeMismatch, path.clone(), err.message().to_string());
            None
        }
    }
}
