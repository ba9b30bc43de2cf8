//! `[footer]` section.
//!
//! # Example
//!
//! ```toml
//! [footer]
//! style = "dark"
//! copyrightTemplate = "Copyright © {year} {title}. Built with docuconf."
//!
//! [[footer.links]]
//! title = "Community"
//! items = [{ label = "GitHub", href = "https://github.com/org/repo" }]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterSection {
    pub style: FooterStyle,
    /// Copyright line; `{year}` and `{title}` are substituted.
    pub copyright_template: Option<String>,
    pub links: Vec<FooterColumn>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    Dark,
    #[default]
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterColumn {
    #[serde(default)]
    pub title: Option<String>,
    pub items: Vec<FooterLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}
