//! Navbar assembly.
//!
//! Items keep their declared order and position; sidebar links are replaced
//! by the sidebar tree they point at. Dropdowns hold one level of children.

use super::sidebar::{Sidebar, SidebarRegistry};
use crate::config::section::{Logo, NavbarItemSpec, Position};
use crate::config::types::{ConfigDiagnostics, ErrorCode, FieldPath};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResolvedNavbarItem {
    #[serde(rename_all = "camelCase")]
    SidebarLink {
        sidebar_id: String,
        label: String,
        position: Position,
        sidebar: Sidebar,
    },
    ExternalLink {
        href: String,
        label: String,
        position: Position,
    },
    Dropdown {
        label: String,
        position: Position,
        items: Vec<ResolvedNavbarItem>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedNavbar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    pub items: Vec<ResolvedNavbarItem>,
}

/// Resolve navbar items against the sidebar registry.
pub fn assemble_navbar(
    items: &[NavbarItemSpec],
    registry: &SidebarRegistry,
) -> Result<Vec<ResolvedNavbarItem>, ConfigDiagnostics> {
    assemble_items(items.iter().enumerate(), Some(registry))
}

/// Resolve items paired with their index in `navbar.items`, so paths stay
/// right when malformed entries were left out. Without a registry only
/// structural problems are reported.
pub(crate) fn assemble_items<'a>(
    items: impl IntoIterator<Item = (usize, &'a NavbarItemSpec)>,
    registry: Option<&SidebarRegistry>,
) -> Result<Vec<ResolvedNavbarItem>, ConfigDiagnostics> {
    let mut diag = ConfigDiagnostics::new();
    let root = FieldPath::new("navbar").key("items");
    let resolved: Vec<_> = items
        .into_iter()
        .filter_map(|(i, item)| assemble_item(item, &root.index(i), false, registry, &mut diag))
        .collect();
    diag.finish(resolved)
}

fn assemble_item(
    item: &NavbarItemSpec,
    path: &FieldPath,
    nested: bool,
    registry: Option<&SidebarRegistry>,
    diag: &mut ConfigDiagnostics,
) -> Option<ResolvedNavbarItem> {
    match item {
        NavbarItemSpec::SidebarLink {
            sidebar_id,
            label,
            position,
        } => {
            let registry = registry?;
            let Some(sidebar) = registry.get(sidebar_id) else {
                diag.error_with_hint(
                    ErrorCode::UnknownSidebarId,
                    path.key("sidebarId"),
                    format!("no sidebar is declared with id \"{sidebar_id}\""),
                    format!("known sidebars: [{}]", registry.ids().join(", ")),
                );
                return None;
            };
            Some(ResolvedNavbarItem::SidebarLink {
                sidebar_id: sidebar_id.clone(),
                label: label.clone().unwrap_or_else(|| sidebar_id.clone()),
                position: *position,
                sidebar: sidebar.clone(),
            })
        }
        NavbarItemSpec::ExternalLink {
            href,
            label,
            position,
        } => Some(ResolvedNavbarItem::ExternalLink {
            href: href.clone(),
            label: label.clone(),
            position: *position,
        }),
        NavbarItemSpec::Dropdown { .. } if nested => {
            diag.error_with_hint(
                ErrorCode::NestedDropdown,
                path.clone(),
                "dropdowns cannot contain other dropdowns",
                "move the inner dropdown to the top level of navbar.items",
            );
            None
        }
        NavbarItemSpec::Dropdown {
            label,
            position,
            items,
        } => {
            let children = path.key("items");
            let items = items
                .iter()
                .enumerate()
                .filter_map(|(j, child)| {
                    assemble_item(child, &children.index(j), true, registry, diag)
                })
                .collect();
            Some(ResolvedNavbarItem::Dropdown {
                label: label.clone(),
                position: *position,
                items,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::{NavbarSection, SidebarDocument};
    use crate::resolve::sidebar::build_registry;

    fn registry() -> SidebarRegistry {
        let doc: SidebarDocument = toml::from_str(
            r#"
[[sidebars]]
id = "tutorialSidebar"
items = ["intro"]
"#,
        )
        .unwrap();
        build_registry(&doc).unwrap()
    }

    fn navbar(src: &str) -> NavbarSection {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn test_sidebar_link_resolves_to_tree() {
        let section = navbar(
            r#"
[[items]]
kind = "sidebar-link"
sidebarId = "tutorialSidebar"
"#,
        );
        let items = assemble_navbar(&section.items, &registry()).unwrap();
        let ResolvedNavbarItem::SidebarLink { label, sidebar, position, .. } = &items[0] else {
            panic!("expected sidebar link");
        };
        assert_eq!(label, "tutorialSidebar");
        assert_eq!(*position, Position::Left);
        assert_eq!(sidebar.doc_ids(), vec!["intro"]);
    }

    #[test]
    fn test_order_and_position_are_kept() {
        let section = navbar(
            r#"
[[items]]
kind = "external-link"
href = "https://github.com/acme"
label = "GitHub"
position = "right"

[[items]]
kind = "sidebar-link"
sidebarId = "tutorialSidebar"
label = "Tutorial"
"#,
        );
        let items = assemble_navbar(&section.items, &registry()).unwrap();
        assert!(matches!(
            &items[0],
            ResolvedNavbarItem::ExternalLink { position: Position::Right, .. }
        ));
        assert!(matches!(&items[1], ResolvedNavbarItem::SidebarLink { .. }));
    }

    #[test]
    fn test_unknown_sidebar_id() {
        let section = navbar(
            r#"
[[items]]
kind = "sidebar-link"
sidebarId = "guideSidebar"
"#,
        );
        let err = assemble_navbar(&section.items, &registry()).unwrap_err();
        assert_eq!(err.codes(), vec![ErrorCode::UnknownSidebarId]);
        assert_eq!(err.errors()[0].field_path.as_str(), "navbar.items[0].sidebarId");
        assert_eq!(
            err.errors()[0].hint.as_deref(),
            Some("known sidebars: [tutorialSidebar]")
        );
    }

    #[test]
    fn test_nested_dropdown_is_rejected() {
        let section = navbar(
            r#"
[[items]]
kind = "dropdown"
label = "More"

[[items.items]]
kind = "external-link"
href = "https://example.com"
label = "Example"

[[items.items]]
kind = "dropdown"
label = "Deeper"
items = []
"#,
        );
        let err = assemble_navbar(&section.items, &registry()).unwrap_err();
        assert_eq!(err.codes(), vec![ErrorCode::NestedDropdown]);
        assert_eq!(err.errors()[0].field_path.as_str(), "navbar.items[0].items[1]");
    }

    #[test]
    fn test_without_registry_only_structure_is_checked() {
        let section = navbar(
            r#"
[[items]]
kind = "sidebar-link"
sidebarId = "whatever"

[[items]]
kind = "dropdown"
label = "More"
items = [{ kind = "dropdown", label = "Inner", items = [] }]
"#,
        );
        let err = assemble_items(section.items.iter().enumerate(), None).unwrap_err();
        assert_eq!(err.codes(), vec![ErrorCode::NestedDropdown]);
    }

    #[test]
    fn test_paths_follow_document_index() {
        let section = navbar(
            r#"
[[items]]
kind = "sidebar-link"
sidebarId = "missing"
"#,
        );
        // entry 0 was dropped upstream; this one sits at index 2
        let err = assemble_items([(2, &section.items[0])], Some(&registry())).unwrap_err();
        assert_eq!(err.errors()[0].field_path.as_str(), "navbar.items[2].sidebarId");
    }
}
