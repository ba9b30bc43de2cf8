//! `[navbar]` section.
//!
//! # Example
//!
//! ```toml
//! [navbar]
//! title = "My Learning Docs"
//! logo = { alt = "Logo", src = "img/logo.svg" }
//!
//! [[navbar.items]]
//! kind = "sidebar-link"
//! sidebarId = "javaSidebar"
//! label = "Java"
//!
//! [[navbar.items]]
//! kind = "external-link"
//! href = "https://github.com/org/repo"
//! label = "GitHub"
//! position = "right"
//!
//! [[navbar.items]]
//! kind = "dropdown"
//! label = "More"
//! items = [{ kind = "external-link", href = "https://example.com", label = "Blog" }]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarSection {
    pub title: Option<String>,
    pub logo: Option<Logo>,
    pub items: Vec<NavbarItemSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// A navbar entry as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NavbarItemSpec {
    #[serde(rename_all = "camelCase")]
    SidebarLink {
        sidebar_id: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        position: Position,
    },
    ExternalLink {
        href: String,
        label: String,
        #[serde(default)]
        position: Position,
    },
    Dropdown {
        label: String,
        #[serde(default)]
        position: Position,
        items: Vec<NavbarItemSpec>,
    },
}

/// Side of the navbar an item is placed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}
