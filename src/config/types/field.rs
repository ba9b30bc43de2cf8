//! Config field paths.

use owo_colors::OwoColorize;
use serde::{Serialize, Serializer};
use std::fmt;

/// Dot-notation path to a field of the config document.
///
/// Array elements are addressed with brackets, so the sidebar id of the
/// first navbar item is `navbar.items[0].sidebarId`.
///
/// # Example
///
/// ```ignore
/// let path = FieldPath::new("navbar").key("items").index(0).key("sidebarId");
/// assert_eq!(path.as_str(), "navbar.items[0].sidebarId");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(String);

impl FieldPath {
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The empty path (document root).
    #[inline]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Append an object key.
    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{}", self.0, key))
        }
    }

    /// Append an array index.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_nested_path() {
        let path = FieldPath::root().key("navbar").key("items").index(2).key("href");
        assert_eq!(path.as_str(), "navbar.items[2].href");
    }

    #[test]
    fn test_root_key_has_no_leading_dot() {
        assert_eq!(FieldPath::root().key("site").as_str(), "site");
        assert!(FieldPath::root().is_root());
    }
}
