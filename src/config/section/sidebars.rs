//! Sidebar document (`sidebars.toml`).
//!
//! # Example
//!
//! ```toml
//! [[sidebars]]
//! id = "javaSidebar"
//! items = [
//!   "java/intro",
//!   { type = "category", label = "Collections", key = "collections", items = [
//!     "java/list",
//!     { type = "doc", id = "java/map", label = "Maps" },
//!   ] },
//!   { type = "autogenerated", dirName = "java/streams" },
//! ]
//!
//! [[sidebars]]
//! id = "interviewSidebar"
//! items = [{ type = "ref", key = "collections" }]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarDocument {
    pub sidebars: Vec<SidebarSpec>,
}

/// A named sidebar as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarSpec {
    pub id: String,
    pub items: Vec<SidebarItemSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItemSpec {
    /// Shorthand for `{ type = "doc", id = "..." }`.
    Doc(String),
    Node(SidebarNodeSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarNodeSpec {
    Doc {
        id: String,
        #[serde(default)]
        label: Option<String>,
    },
    Link {
        href: String,
        label: String,
    },
    Category {
        label: String,
        /// Identifier other entries can `ref`.
        #[serde(default)]
        key: Option<String>,
        #[serde(default)]
        collapsed: Option<bool>,
        items: Vec<SidebarItemSpec>,
    },
    /// Inline the category declared with `key`.
    Ref { key: String },
    #[serde(rename_all = "camelCase")]
    Autogenerated { dir_name: String },
}
