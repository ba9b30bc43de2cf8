//! Typed config sections.
//!
//! Each module corresponds to a section of the site config document:
//!
//! | Module     | Section                      | Purpose                          |
//! |------------|------------------------------|----------------------------------|
//! | `site`     | `[site]`                     | Site identity                    |
//! | `i18n`     | `[i18n]`                     | Locales                          |
//! | `presets`  | `[[presets]]`, `[[plugins]]` | Feature bundles and plugins      |
//! | `navbar`   | `[navbar]`                   | Top navigation                   |
//! | `footer`   | `[footer]`                   | Footer style, copyright, links   |
//! | `sidebars` | sidebar document             | Named sidebar trees              |
//!
//! Sections are only deserialized after they passed shape validation, so
//! the serde derives here never have to produce user-facing messages.

mod footer;
mod i18n;
mod navbar;
mod presets;
mod sidebars;
mod site;

pub use footer::{FooterColumn, FooterLink, FooterSection, FooterStyle};
pub use i18n::{Direction, I18nSection, LocaleOverrides};
pub use navbar::{Logo, NavbarItemSpec, NavbarSection, Position};
pub use presets::{FeatureToggle, PluginSpec, PresetOptions, PresetSpec};
pub use sidebars::{SidebarDocument, SidebarItemSpec, SidebarNodeSpec, SidebarSpec};
pub use site::SiteIdentity;

use serde::{Deserialize, Serialize};

/// Severity policy forwarded to the link checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    Ignore,
    Warn,
    Throw,
}
