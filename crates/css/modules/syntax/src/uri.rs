//! Relative URI resolution for `url()` values.

use log::debug;
use url::Url;

/// Parse a base URI. Empty or unparsable input yields `None`, which leaves
/// relative URIs untouched.
pub fn parse_base_uri(base_uri: &str) -> Option<Url> {
    if base_uri.is_empty() {
        return None;
    }
    match Url::parse(base_uri) {
        Ok(url) => Some(url),
        Err(err) => {
            debug!("[CSS] ignoring base uri {base_uri:?}: {err}");
            None
        }
    }
}

/// Resolve `reference` against `base`, returning it unchanged when that is not possible.
pub fn resolve_uri(base: Option<&Url>, reference: &str) -> String {
    match base.map(|base_url| base_url.join(reference)) {
        Some(Ok(resolved)) => resolved.into(),
        _ => reference.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Relative references join onto the base directory.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn resolves_against_base() {
        let base = parse_base_uri("http://example.com/styles/");
        assert_eq!(
            resolve_uri(base.as_ref(), "images/x.png"),
            "http://example.com/styles/images/x.png"
        );
        assert_eq!(
            resolve_uri(base.as_ref(), "/root.png"),
            "http://example.com/root.png"
        );
        assert_eq!(
            resolve_uri(base.as_ref(), "https://cdn.example.org/a.png"),
            "https://cdn.example.org/a.png"
        );
    }

    /// Without a usable base the reference is kept as written.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn keeps_reference_without_base() {
        assert!(parse_base_uri("").is_none());
        assert!(parse_base_uri("not a uri").is_none());
        assert_eq!(resolve_uri(None, "images/x.png"), "images/x.png");
    }
}
