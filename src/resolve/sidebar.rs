//! Sidebar registry construction.
//!
//! Builds the id → tree mapping from the sidebar document. Categories may
//! declare a `key`; a `ref` entry inlines the category with that key. The
//! walk keeps the chain of category keys on the current path, so a `ref` to
//! an ancestor is reported as a cycle instead of recursing forever.
//!
//! Refs are inlined as copies, so a chain of categories that each ref the
//! previous one more than once grows exponentially. Expansion stops at
//! [`MAX_EXPANDED_ENTRIES`] and the ref that crossed the limit is reported.
//!
//! Doc ids are not checked for existence; that is a content concern.

use crate::config::section::{SidebarDocument, SidebarItemSpec, SidebarNodeSpec, SidebarSpec};
use crate::config::types::{ConfigDiagnostics, ErrorCode, FieldPath};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Upper bound on entries produced across all sidebars.
pub const MAX_EXPANDED_ENTRIES: usize = 50_000;

/// One entry of a resolved sidebar tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarEntry {
    Doc {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Link {
        href: String,
        label: String,
    },
    Category {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        collapsed: bool,
        items: Vec<SidebarEntry>,
    },
    #[serde(rename_all = "camelCase")]
    Autogenerated { dir_name: String },
}

/// A named, fully expanded sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub id: String,
    pub items: Vec<SidebarEntry>,
}

impl Sidebar {
    /// Doc ids in tree order.
    pub fn doc_ids(&self) -> Vec<&str> {
        fn walk<'a>(items: &'a [SidebarEntry], out: &mut Vec<&'a str>) {
            for item in items {
                match item {
                    SidebarEntry::Doc { id, .. } => out.push(id),
                    SidebarEntry::Category { items, .. } => walk(items, out),
                    SidebarEntry::Link { .. } | SidebarEntry::Autogenerated { .. } => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.items, &mut out);
        out
    }
}

/// Sidebars by id, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SidebarRegistry {
    sidebars: Vec<Sidebar>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl SidebarRegistry {
    pub fn get(&self, id: &str) -> Option<&Sidebar> {
        self.index.get(id).map(|&i| &self.sidebars[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.sidebars.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sidebar> {
        self.sidebars.iter()
    }

    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    fn insert(&mut self, sidebar: Sidebar) {
        self.index.insert(sidebar.id.clone(), self.sidebars.len());
        self.sidebars.push(sidebar);
    }
}

/// Build the registry, reporting duplicate ids, duplicate or unknown
/// category keys, and cyclic references.
pub fn build_registry(document: &SidebarDocument) -> Result<SidebarRegistry, ConfigDiagnostics> {
    let root = FieldPath::new("sidebars");
    let mut expander = Expander {
        categories: FxHashMap::default(),
        diag: ConfigDiagnostics::new(),
        reported: FxHashSet::default(),
        expanded: 0,
    };

    for (i, sidebar) in document.sidebars.iter().enumerate() {
        expander.collect_keys(&sidebar.items, &root.index(i).key("items"));
    }

    let mut registry = SidebarRegistry::default();
    let mut first_seen: FxHashMap<&str, usize> = FxHashMap::default();

    for (i, SidebarSpec { id, items }) in document.sidebars.iter().enumerate() {
        let path = root.index(i);
        if id.trim().is_empty() {
            expander.report(ErrorCode::InvalidValue, path.key("id"), "sidebar id must not be empty");
            continue;
        }
        if let Some(&first) = first_seen.get(id.as_str()) {
            expander.report(
                ErrorCode::DuplicateSidebarId,
                path.key("id"),
                format!("sidebar id \"{id}\" is already declared at sidebars[{first}]"),
            );
            continue;
        }
        first_seen.insert(id, i);

        let mut chain = Vec::new();
        let items = expander.expand_items(items, &path.key("items"), &mut chain);
        registry.insert(Sidebar {
            id: id.clone(),
            items,
        });
    }

    expander.diag.finish(registry)
}

/// A category declared with a `key`.
struct CategoryDecl<'a> {
    label: &'a str,
    collapsed: Option<bool>,
    items: &'a [SidebarItemSpec],
    path: FieldPath,
}

struct Expander<'a> {
    categories: FxHashMap<&'a str, CategoryDecl<'a>>,
    diag: ConfigDiagnostics,
    /// A referenced category is expanded at every use site; report its
    /// problems only once.
    reported: FxHashSet<(ErrorCode, FieldPath)>,
    /// Entries produced so far, bounded by `MAX_EXPANDED_ENTRIES`.
    expanded: usize,
}

impl<'a> Expander<'a> {
    fn report(&mut self, code: ErrorCode, path: FieldPath, message: impl Into<String>) {
        if self.reported.insert((code, path.clone())) {
            self.diag.error(code, path, message);
        }
    }

    fn report_with_hint(
        &mut self,
        code: ErrorCode,
        path: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        if self.reported.insert((code, path.clone())) {
            self.diag.error_with_hint(code, path, message, hint);
        }
    }

    fn collect_keys(&mut self, items: &'a [SidebarItemSpec], path: &FieldPath) {
        for (i, item) in items.iter().enumerate() {
            let SidebarItemSpec::Node(SidebarNodeSpec::Category {
                label,
                key,
                collapsed,
                items,
            }) = item
            else {
                continue;
            };
            let item_path = path.index(i);
            if let Some(key) = key {
                if let Some(existing) = self.categories.get(key.as_str()) {
                    let message = format!(
                        "category key \"{key}\" is already declared at {}",
                        existing.path.as_str()
                    );
                    self.report(ErrorCode::DuplicateCategoryKey, item_path.key("key"), message);
                } else {
                    self.categories.insert(
                        key,
                        CategoryDecl {
                            label,
                            collapsed: *collapsed,
                            items,
                            path: item_path.clone(),
                        },
                    );
                }
            }
            self.collect_keys(items, &item_path.key("items"));
        }
    }

    fn expand_items(
        &mut self,
        items: &'a [SidebarItemSpec],
        path: &FieldPath,
        chain: &mut Vec<&'a str>,
    ) -> Vec<SidebarEntry> {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.expand_item(item, &path.index(i), chain))
            .collect()
    }

    fn expand_item(
        &mut self,
        item: &'a SidebarItemSpec,
        path: &FieldPath,
        chain: &mut Vec<&'a str>,
    ) -> Option<SidebarEntry> {
        self.expanded += 1;
        let node = match item {
            SidebarItemSpec::Doc(id) => {
                return Some(SidebarEntry::Doc {
                    id: id.clone(),
                    label: None,
                });
            }
            SidebarItemSpec::Node(node) => node,
        };

        match node {
            SidebarNodeSpec::Doc { id, label } => Some(SidebarEntry::Doc {
                id: id.clone(),
                label: label.clone(),
            }),
            SidebarNodeSpec::Link { href, label } => Some(SidebarEntry::Link {
                href: href.clone(),
                label: label.clone(),
            }),
            SidebarNodeSpec::Autogenerated { dir_name } => Some(SidebarEntry::Autogenerated {
                dir_name: dir_name.clone(),
            }),
            SidebarNodeSpec::Category {
                label,
                key,
                collapsed,
                items,
            } => {
                if let Some(key) = key {
                    chain.push(key);
                }
                let children = self.expand_items(items, &path.key("items"), chain);
                if key.is_some() {
                    chain.pop();
                }
                Some(SidebarEntry::Category {
                    label: label.clone(),
                    key: key.clone(),
                    collapsed: collapsed.unwrap_or(true),
                    items: children,
                })
            }
            SidebarNodeSpec::Ref { key } => self.expand_ref(key, path, chain),
        }
    }

    fn expand_ref(
        &mut self,
        key: &'a str,
        path: &FieldPath,
        chain: &mut Vec<&'a str>,
    ) -> Option<SidebarEntry> {
        if chain.contains(&key) {
            let mut cycle = chain.clone();
            cycle.push(key);
            let message = format!(
                "category \"{key}\" references its own ancestor: {}",
                cycle.join(" -> ")
            );
            self.report(ErrorCode::CyclicSidebarReference, path.key("key"), message);
            return None;
        }

        let Some(decl) = self.categories.get(key) else {
            let mut known: Vec<&str> = self.categories.keys().copied().collect();
            known.sort_unstable();
            let hint = format!("known keys: [{}]", known.join(", "));
            self.report_with_hint(
                ErrorCode::UnknownCategoryKey,
                path.key("key"),
                format!("no category is declared with key \"{key}\""),
                hint,
            );
            return None;
        };
        if self.expanded >= MAX_EXPANDED_ENTRIES {
            self.report_with_hint(
                ErrorCode::InvalidValue,
                path.key("key"),
                format!("expanding \"{key}\" exceeds {MAX_EXPANDED_ENTRIES} sidebar entries"),
                "refs are inlined as copies; reference the category fewer times",
            );
            return None;
        }
        let (label, collapsed, items, decl_path) =
            (decl.label, decl.collapsed, decl.items, decl.path.clone());

        chain.push(key);
        // errors inside the referenced category point at its declaration
        let children = self.expand_items(items, &decl_path.key("items"), chain);
        chain.pop();

        Some(SidebarEntry::Category {
            label: label.to_string(),
            key: Some(key.to_string()),
            collapsed: collapsed.unwrap_or(true),
            items: children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(src: &str) -> SidebarDocument {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn test_registry_preserves_order_and_shorthand() {
        let registry = build_registry(&document(
            r#"
[[sidebars]]
id = "tutorialSidebar"
items = ["intro", { type = "doc", id = "setup", label = "Setup" }]

[[sidebars]]
id = "apiSidebar"
items = [{ type = "autogenerated", dirName = "api" }]
"#,
        ))
        .unwrap();

        assert_eq!(registry.ids(), vec!["tutorialSidebar", "apiSidebar"]);
        let tutorial = registry.get("tutorialSidebar").unwrap();
        assert_eq!(tutorial.doc_ids(), vec!["intro", "setup"]);
        assert!(registry.contains("apiSidebar"));
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn test_duplicate_sidebar_id() {
        let err = build_registry(&document(
            r#"
[[sidebars]]
id = "guide"
items = ["a"]

[[sidebars]]
id = "guide"
items = ["b"]
"#,
        ))
        .unwrap_err();
        assert_eq!(err.codes(), vec![ErrorCode::DuplicateSidebarId]);
        assert_eq!(err.errors()[0].field_path.as_str(), "sidebars[1].id");
    }

    #[test]
    fn test_ref_inlines_category() {
        let registry = build_registry(&document(
            r#"
[[sidebars]]
id = "java"
items = [{ type = "category", label = "Collections", key = "collections", items = ["list", "map"] }]

[[sidebars]]
id = "interview"
items = ["start", { type = "ref", key = "collections" }]
"#,
        ))
        .unwrap();

        let interview = registry.get("interview").unwrap();
        assert_eq!(interview.doc_ids(), vec!["start", "list", "map"]);
        assert!(matches!(
            &interview.items[1],
            SidebarEntry::Category { label, collapsed: true, .. } if label == "Collections"
        ));
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let err = build_registry(&document(
            r#"
[[sidebars]]
id = "loop"
items = [{ type = "category", label = "A", key = "a", items = [{ type = "ref", key = "a" }] }]
"#,
        ))
        .unwrap_err();
        assert_eq!(err.codes(), vec![ErrorCode::CyclicSidebarReference]);
        assert_eq!(
            err.errors()[0].field_path.as_str(),
            "sidebars[0].items[0].items[0].key"
        );
    }

    #[test]
    fn test_mutual_reference_is_a_cycle() {
        let err = build_registry(&document(
            r#"
[[sidebars]]
id = "one"
items = [{ type = "category", label = "A", key = "a", items = [{ type = "ref", key = "b" }] }]

[[sidebars]]
id = "two"
items = [{ type = "category", label = "B", key = "b", items = [{ type = "ref", key = "a" }] }]
"#,
        ))
        .unwrap_err();
        // one report per ref site that closes the loop
        assert_eq!(
            err.codes(),
            vec![
                ErrorCode::CyclicSidebarReference,
                ErrorCode::CyclicSidebarReference
            ]
        );
        assert!(err.errors()[0].message.contains("a -> b -> a"));
        assert_eq!(
            err.errors()[0].field_path.as_str(),
            "sidebars[1].items[0].items[0].key"
        );
    }

    #[test]
    fn test_sibling_refs_are_not_cycles() {
        let registry = build_registry(&document(
            r#"
[[sidebars]]
id = "s"
items = [
  { type = "category", label = "Shared", key = "shared", items = ["x"] },
  { type = "ref", key = "shared" },
  { type = "category", label = "Wrap", items = [{ type = "ref", key = "shared" }] },
]
"#,
        ))
        .unwrap();
        assert_eq!(registry.get("s").unwrap().doc_ids(), vec!["x", "x", "x"]);
    }

    #[test]
    fn test_ref_fan_out_is_bounded() {
        // c{n} holds two refs to c{n-1}: 2^30 docs if fully inlined
        let mut items = vec![r#"{ type = "category", label = "c0", key = "c0", items = ["doc"] }"#.to_string()];
        for n in 1..30 {
            let prev = n - 1;
            items.push(format!(
                r#"{{ type = "category", label = "c{n}", key = "c{n}", items = [{{ type = "ref", key = "c{prev}" }}, {{ type = "ref", key = "c{prev}" }}] }}"#
            ));
        }
        let src = format!("[[sidebars]]\nid = \"s\"\nitems = [\n{}\n]\n", items.join(",\n"));

        let err = build_registry(&document(&src)).unwrap_err();
        assert!(!err.errors().is_empty());
        assert!(err.codes().iter().all(|code| *code == ErrorCode::InvalidValue));
        assert!(err.errors()[0].message.contains("exceeds"));
    }

    #[test]
    fn test_unknown_and_duplicate_category_keys() {
        let err = build_registry(&document(
            r#"
[[sidebars]]
id = "s"
items = [
  { type = "category", label = "A", key = "k", items = [] },
  { type = "category", label = "B", key = "k", items = [] },
  { type = "ref", key = "nope" },
]
"#,
        ))
        .unwrap_err();
        assert_eq!(
            err.codes(),
            vec![ErrorCode::DuplicateCategoryKey, ErrorCode::UnknownCategoryKey]
        );
    }
}
