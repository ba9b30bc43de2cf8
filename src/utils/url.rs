//! URL derivation under the site's trailing-slash policy.

/// Base URL plus trailing-slash flag, applied to every derived URL.
///
/// - `Some(true)`: derived URLs end with `/`
/// - `Some(false)`: trailing `/` is stripped (root `/` is kept)
/// - `None`: URLs are left as derived (directory style, ending in `/`)
#[derive(Debug, Clone, Copy)]
pub struct UrlPolicy<'a> {
    base_url: &'a str,
    trailing_slash: Option<bool>,
}

impl<'a> UrlPolicy<'a> {
    pub const fn new(base_url: &'a str, trailing_slash: Option<bool>) -> Self {
        Self {
            base_url,
            trailing_slash,
        }
    }

    /// The base URL itself, normalized.
    pub fn base(&self) -> String {
        self.apply(self.base_url)
    }

    /// `<baseUrl><segment>/`, normalized.
    pub fn join(&self, segment: &str) -> String {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            return self.base();
        }
        let base = self.base_url.trim_end_matches('/');
        self.apply(&format!("{base}/{segment}/"))
    }

    fn apply(&self, url: &str) -> String {
        match self.trailing_slash {
            Some(false) if url != "/" => url.trim_end_matches('/').to_string(),
            Some(true) if !url.ends_with('/') => format!("{url}/"),
            _ => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_default_policy() {
        let urls = UrlPolicy::new("/docs/", None);
        assert_eq!(urls.base(), "/docs/");
        assert_eq!(urls.join("fr"), "/docs/fr/");
        assert_eq!(urls.join("/fr/"), "/docs/fr/");
    }

    #[test]
    fn test_strip_trailing_slash() {
        let urls = UrlPolicy::new("/docs/", Some(false));
        assert_eq!(urls.base(), "/docs");
        assert_eq!(urls.join("fr"), "/docs/fr");

        let root = UrlPolicy::new("/", Some(false));
        assert_eq!(root.base(), "/");
        assert_eq!(root.join("fr"), "/fr");
    }

    #[test]
    fn test_force_trailing_slash() {
        let urls = UrlPolicy::new("/docs", Some(true));
        assert_eq!(urls.base(), "/docs/");
        assert_eq!(urls.join("zh-Hans"), "/docs/zh-Hans/");
    }
}
