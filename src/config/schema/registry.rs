//! Field registry for the site config and sidebar documents.
//!
//! Each static below mirrors one section of the document. The typed
//! sections in [`crate::config::section`] must accept everything declared
//! here.

use super::{Field, Kind, Tagged, Variant, opt, req};

pub const LINK_POLICIES: &[&str] = &["ignore", "warn", "throw"];
pub const POSITIONS: &[&str] = &["left", "right"];
pub const FOOTER_STYLES: &[&str] = &["dark", "light"];
pub const DIRECTIONS: &[&str] = &["ltr", "rtl"];

// ============================================================================
// site config document
// ============================================================================

static DOCUMENT_FIELDS: [Field; 11] = [
    opt("site", Kind::Table(&SITE)),
    opt("i18n", Kind::Table(&I18N)),
    opt("presets", Kind::Array(&PRESET)),
    opt("plugins", Kind::Array(&PLUGIN)),
    opt("navbar", Kind::Table(&NAVBAR)),
    opt("footer", Kind::Table(&FOOTER)),
    opt("themeConfig", Kind::Opaque),
    opt("onBrokenLinks", Kind::Enum(LINK_POLICIES)),
    opt("onBrokenMarkdownLinks", Kind::Enum(LINK_POLICIES)),
    opt("trailingSlash", Kind::Bool),
    opt("docuconf", Kind::Table(&TOOL)),
];

/// Top-level keys of the site config document.
pub static DOCUMENT: &[Field] = &DOCUMENT_FIELDS;

static SITE: [Field; 7] = [
    req("title", Kind::Str),
    opt("tagline", Kind::Str),
    opt("url", Kind::Str),
    opt("baseUrl", Kind::Str),
    opt("favicon", Kind::Str),
    opt("organizationName", Kind::Str),
    opt("projectName", Kind::Str),
];

static I18N: [Field; 3] = [
    req("defaultLocale", Kind::Str),
    req("locales", Kind::Array(&Kind::Str)),
    opt("localeConfigs", Kind::Map(&LOCALE_CONFIG_TABLE)),
];

static LOCALE_CONFIG_TABLE: Kind = Kind::Table(&LOCALE_CONFIG);

static LOCALE_CONFIG: [Field; 4] = [
    opt("label", Kind::Str),
    opt("htmlLang", Kind::Str),
    opt("direction", Kind::Enum(DIRECTIONS)),
    opt("path", Kind::Str),
];

// presets / plugins

static PRESET: Kind = Kind::Table(&PRESET_FIELDS);

static PRESET_FIELDS: [Field; 2] = [
    req("name", Kind::Str),
    opt("options", Kind::Table(&PRESET_OPTIONS)),
];

// A sub-feature is either toggled with a boolean or configured with a table.
static PRESET_OPTIONS: [Field; 3] = [
    opt("docs", Kind::Either(&Kind::Bool, &Kind::Opaque)),
    opt("blog", Kind::Either(&Kind::Bool, &Kind::Opaque)),
    opt("theme", Kind::Either(&Kind::Bool, &Kind::Opaque)),
];

static PLUGIN: Kind = Kind::Table(&PLUGIN_FIELDS);

static PLUGIN_FIELDS: [Field; 2] = [req("name", Kind::Str), opt("options", Kind::Opaque)];

// navbar

static NAVBAR: [Field; 3] = [
    opt("title", Kind::Str),
    opt("logo", Kind::Table(&LOGO)),
    opt("items", Kind::Array(&NAVBAR_ITEM)),
];

static LOGO: [Field; 3] = [
    req("src", Kind::Str),
    opt("alt", Kind::Str),
    opt("href", Kind::Str),
];

static NAVBAR_ITEM: Kind = Kind::Tagged(&NAVBAR_ITEM_KINDS);

static NAVBAR_ITEM_KINDS: Tagged = Tagged {
    tag: "kind",
    variants: &NAVBAR_VARIANTS,
};

static NAVBAR_VARIANTS: [Variant; 3] = [
    Variant {
        name: "sidebar-link",
        fields: &SIDEBAR_LINK,
    },
    Variant {
        name: "external-link",
        fields: &EXTERNAL_LINK,
    },
    Variant {
        name: "dropdown",
        fields: &DROPDOWN,
    },
];

static SIDEBAR_LINK: [Field; 3] = [
    req("sidebarId", Kind::Str),
    opt("label", Kind::Str),
    opt("position", Kind::Enum(POSITIONS)),
];

static EXTERNAL_LINK: [Field; 3] = [
    req("href", Kind::Str),
    req("label", Kind::Str),
    opt("position", Kind::Enum(POSITIONS)),
];

// Children share the item kind so that nested dropdowns parse and are
// rejected with `NestedDropdown` during assembly.
static DROPDOWN: [Field; 3] = [
    req("label", Kind::Str),
    opt("position", Kind::Enum(POSITIONS)),
    req("items", Kind::Array(&NAVBAR_ITEM)),
];

// footer

static FOOTER: [Field; 3] = [
    opt("style", Kind::Enum(FOOTER_STYLES)),
    opt("copyrightTemplate", Kind::Str),
    opt("links", Kind::Array(&FOOTER_COLUMN)),
];

static FOOTER_COLUMN: Kind = Kind::Table(&FOOTER_COLUMN_FIELDS);

static FOOTER_COLUMN_FIELDS: [Field; 2] = [
    opt("title", Kind::Str),
    req("items", Kind::Array(&FOOTER_LINK)),
];

static FOOTER_LINK: Kind = Kind::Table(&FOOTER_LINK_FIELDS);

static FOOTER_LINK_FIELDS: [Field; 2] = [req("label", Kind::Str), req("href", Kind::Str)];

// tool settings

static TOOL: [Field; 1] = [opt("unknownKeys", Kind::Enum(&["strict", "permissive"]))];

// ============================================================================
// sidebar document
// ============================================================================

static SIDEBAR_DOCUMENT_FIELDS: [Field; 1] = [opt("sidebars", Kind::Array(&SIDEBAR))];

/// Top-level keys of the sidebar document.
pub static SIDEBAR_DOCUMENT: &[Field] = &SIDEBAR_DOCUMENT_FIELDS;

static SIDEBAR: Kind = Kind::Table(&SIDEBAR_FIELDS);

static SIDEBAR_FIELDS: [Field; 2] = [
    req("id", Kind::Str),
    req("items", Kind::Array(&SIDEBAR_ITEM)),
];

/// A bare string is shorthand for a doc reference.
static SIDEBAR_ITEM: Kind = Kind::Either(&Kind::Str, &SIDEBAR_NODE);

static SIDEBAR_NODE: Kind = Kind::Tagged(&SIDEBAR_NODE_TYPES);

static SIDEBAR_NODE_TYPES: Tagged = Tagged {
    tag: "type",
    variants: &SIDEBAR_VARIANTS,
};

static SIDEBAR_VARIANTS: [Variant; 5] = [
    Variant {
        name: "doc",
        fields: &SIDEBAR_DOC,
    },
    Variant {
        name: "link",
        fields: &SIDEBAR_EXTERNAL,
    },
    Variant {
        name: "category",
        fields: &SIDEBAR_CATEGORY,
    },
    Variant {
        name: "ref",
        fields: &SIDEBAR_REF,
    },
    Variant {
        name: "autogenerated",
        fields: &SIDEBAR_AUTOGENERATED,
    },
];

static SIDEBAR_DOC: [Field; 2] = [req("id", Kind::Str), opt("label", Kind::Str)];

static SIDEBAR_EXTERNAL: [Field; 2] = [req("href", Kind::Str), req("label", Kind::Str)];

static SIDEBAR_CATEGORY: [Field; 4] = [
    req("label", Kind::Str),
    opt("key", Kind::Str),
    opt("collapsed", Kind::Bool),
    req("items", Kind::Array(&SIDEBAR_ITEM)),
];

static SIDEBAR_REF: [Field; 1] = [req("key", Kind::Str)];

static SIDEBAR_AUTOGENERATED: [Field; 1] = [req("dirName", Kind::Str)];
