//! Footer assembly and copyright rendering.

use crate::config::section::{FooterColumn, FooterSection, FooterStyle};
use crate::config::types::{ConfigDiagnostics, ErrorCode, FieldPath};
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

/// `{token}` placeholders in the copyright template.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([A-Za-z_]+)\}").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedFooter {
    pub style: FooterStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub links: Vec<FooterColumn>,
}

/// Values substituted into the copyright template.
#[derive(Debug, Clone, Copy)]
pub struct CopyrightContext<'a> {
    pub year: i32,
    pub title: &'a str,
}

/// Render the footer. Unknown tokens stay verbatim; see
/// [`unknown_copyright_tokens`].
pub fn assemble_footer(
    section: &FooterSection,
    context: CopyrightContext<'_>,
) -> Result<ResolvedFooter, ConfigDiagnostics> {
    let root = FieldPath::new("footer");
    let mut diag = ConfigDiagnostics::new();

    for (i, column) in section.links.iter().enumerate() {
        for (j, link) in column.items.iter().enumerate() {
            if link.href.trim().is_empty() {
                diag.error(
                    ErrorCode::InvalidValue,
                    root.key("links").index(i).key("items").index(j).key("href"),
                    format!("link \"{}\" has an empty href", link.label),
                );
            }
        }
    }

    let copyright = section
        .copyright_template
        .as_deref()
        .map(|template| render_copyright(template, context));

    diag.finish(ResolvedFooter {
        style: section.style,
        copyright,
        links: section.links.clone(),
    })
}

/// Substitute `{year}` and `{title}`.
fn render_copyright(template: &str, context: CopyrightContext<'_>) -> String {
    TOKEN
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "year" => context.year.to_string(),
            "title" => context.title.to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Tokens the copyright template uses but nothing substitutes, reported as
/// warnings by the linker.
pub fn unknown_copyright_tokens(template: &str) -> Vec<String> {
    TOKEN
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .filter(|token| !matches!(token.as_str(), "year" | "title"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: CopyrightContext<'static> = CopyrightContext {
        year: 2026,
        title: "Acme Docs",
    };

    fn footer(src: &str) -> FooterSection {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn test_defaults() {
        let resolved = assemble_footer(&FooterSection::default(), CONTEXT).unwrap();
        assert_eq!(resolved.style, FooterStyle::Light);
        assert_eq!(resolved.copyright, None);
        assert!(resolved.links.is_empty());
    }

    #[test]
    fn test_copyright_tokens() {
        let resolved = assemble_footer(
            &footer(r#"copyrightTemplate = "Copyright © {year} {title}. Built with docuconf.""#),
            CONTEXT,
        )
        .unwrap();
        assert_eq!(
            resolved.copyright.as_deref(),
            Some("Copyright © 2026 Acme Docs. Built with docuconf.")
        );
    }

    #[test]
    fn test_unknown_token_is_kept() {
        assert_eq!(render_copyright("{year} {owner}", CONTEXT), "2026 {owner}");
        assert_eq!(unknown_copyright_tokens("{year} {owner} {title}"), vec!["owner"]);
    }

    #[test]
    fn test_empty_href() {
        let err = assemble_footer(
            &footer(
                r#"
style = "dark"
[[links]]
title = "Community"
items = [{ label = "Chat", href = "https://chat.example.com" }, { label = "Forum", href = "" }]
"#,
            ),
            CONTEXT,
        )
        .unwrap_err();
        assert_eq!(err.codes(), vec![ErrorCode::InvalidValue]);
        assert_eq!(err.errors()[0].field_path.as_str(), "footer.links[0].items[1].href");
    }
}
