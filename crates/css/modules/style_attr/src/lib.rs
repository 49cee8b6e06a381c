//! CSS style attributes: `style="..."` declaration lists.
//! Spec: <https://www.w3.org/TR/css-style-attr/#interpreting>

#![forbid(unsafe_code)]

use css_syntax::{Property, TokenKind, TokenStream, Url, read_property, skip_declaration};
use log::trace;

/// Parse the value of a `style` attribute into its declarations, in source order.
///
/// Uses the same declaration reader as stylesheets, so `!important` markers are
/// recognized and `url()` values are resolved against `base`. Malformed
/// declarations are skipped.
pub fn get_style_properties(style: &str, base: Option<&Url>) -> Vec<Property> {
    let mut tokens = TokenStream::new(style);
    let mut properties = Vec::new();
    loop {
        let token = tokens.next_token(true);
        match token.kind {
            TokenKind::Null => break,
            TokenKind::Ident => {
                if let Some(property) = read_property(&mut tokens, &token, base) {
                    properties.push(property);
                }
            }
            // Stray terminators; a `}` is also what the readers leave unread.
            TokenKind::Semicolon | TokenKind::CurlyBracketEnd => {}
            _ => {
                trace!("[STYLE_ATTR] skipping declaration at {:?}", token.kind);
                skip_declaration(&mut tokens, token);
            }
        }
    }
    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::parse_base_uri;

    fn texts(style: &str) -> Vec<String> {
        get_style_properties(style, None)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Declarations come back in source order, duplicates included.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn source_order() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(
            texts("color: red; MARGIN: 0 auto;color:blue"),
            vec!["color: red", "margin: 0 auto", "color: blue"]
        );
        assert!(texts("").is_empty());
        assert!(texts(" ; ; ").is_empty());
    }

    /// Broken declarations are dropped without losing the ones after them.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn recovers_from_garbage() {
        assert_eq!(
            texts("color red; 12px; } width: 1px !important; height:"),
            vec!["width: 1px !important"]
        );
        assert_eq!(texts("[a; b]; top: 0"), vec!["top: 0"]);
    }

    /// `url()` values resolve against the document base.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn resolves_urls() {
        let base = parse_base_uri("http://example.com/a/");
        let properties = get_style_properties("background: url(b.png)", base.as_ref());
        assert_eq!(
            properties.first().map(Property::value_text),
            Some("url(http://example.com/a/b.png)".to_owned())
        );
    }
}
