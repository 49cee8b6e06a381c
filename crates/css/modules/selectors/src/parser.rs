//! CSS selector parsing from the token stream.
//! Spec: <https://www.w3.org/TR/CSS21/selector.html#selector-syntax>

use crate::{
    AttributeMatch, AttributeSelector, Combinator, CompoundSelector, SelectorChain, SelectorLink,
};
use core::mem;
use css_syntax::{Token, TokenKind, TokenStream};

/// Read one selector chain.
///
/// `token` holds the first token of the selector on entry and the token that
/// ended the chain on return (normally `,` or `{`; anything else is left for
/// the caller to reject). Returns `None` for a selector this engine does not
/// accept, in which case the enclosing rule should be skipped; `token` is then
/// the last token read.
pub fn read_selector_chain(tokens: &mut TokenStream, token: &mut Token) -> Option<SelectorChain> {
    let mut links = Vec::new();
    let mut pseudo_element = String::new();
    loop {
        let compound = read_compound(tokens, token, &mut pseudo_element)?;
        links.push(SelectorLink::Compound(compound));

        if !pseudo_element.is_empty() {
            // A pseudo-element ends the selector.
            if token.kind == TokenKind::Whitespace {
                *token = tokens.next_token(true);
            }
            if !is_chain_end(token) {
                return None;
            }
            return Some(SelectorChain::from_links(links, pseudo_element));
        }

        let combinator = match token.kind {
            TokenKind::Whitespace => {
                *token = tokens.next_token(true);
                if is_chain_end(token) {
                    return Some(SelectorChain::from_links(links, pseudo_element));
                }
                read_explicit_combinator(tokens, token).unwrap_or(Combinator::Descendant)
            }
            _ => match read_explicit_combinator(tokens, token) {
                Some(combinator) => combinator,
                None => return Some(SelectorChain::from_links(links, pseudo_element)),
            },
        };
        links.push(SelectorLink::Combinator(combinator));
    }
}

/// `>` or `+`, consuming it and the whitespace after it.
fn read_explicit_combinator(tokens: &mut TokenStream, token: &mut Token) -> Option<Combinator> {
    let combinator = if token.is_delim(">") {
        Combinator::Child
    } else if token.is_delim("+") {
        Combinator::NextSibling
    } else {
        return None;
    };
    *token = tokens.next_token(true);
    Some(combinator)
}

/// Tokens that end a selector inside a selector list.
fn is_chain_end(token: &Token) -> bool {
    token.kind == TokenKind::CurlyBracketBegin || token.is_delim(",")
}

/// Read a compound selector starting at `token`, leaving `token` on the first
/// token after it. A `:before`/`:after` is stored in `pseudo_element` and ends
/// the compound.
fn read_compound(
    tokens: &mut TokenStream,
    token: &mut Token,
    pseudo_element: &mut String,
) -> Option<CompoundSelector> {
    let mut compound = match token.kind {
        TokenKind::Ident => {
            let element = CompoundSelector::element(token.value.as_str());
            *token = tokens.next_token(false);
            element
        }
        TokenKind::Delim if token.is_delim("*") => {
            *token = tokens.next_token(false);
            CompoundSelector::universal()
        }
        TokenKind::IdHash | TokenKind::Colon | TokenKind::SquareBracketBegin => {
            CompoundSelector::universal()
        }
        TokenKind::Delim if token.is_delim(".") => CompoundSelector::universal(),
        _ => return None,
    };

    loop {
        match token.kind {
            TokenKind::IdHash => {
                compound.element_id = mem::take(&mut token.value);
                *token = tokens.next_token(false);
            }
            TokenKind::Colon => {
                *token = tokens.next_token(false);
                // `::name` and functional forms such as `:lang(en)` are not supported.
                if token.kind != TokenKind::Ident {
                    return None;
                }
                let name = token.value.to_ascii_lowercase();
                *token = tokens.next_token(false);
                if name == "before" || name == "after" {
                    *pseudo_element = name;
                    return Some(compound);
                }
                compound.pseudo_classes.push(name);
            }
            TokenKind::Delim if token.is_delim(".") => {
                *token = tokens.next_token(false);
                if token.kind != TokenKind::Ident {
                    return None;
                }
                compound
                    .element_classes
                    .push(mem::take(&mut token.value));
                *token = tokens.next_token(false);
            }
            TokenKind::SquareBracketBegin => {
                compound
                    .attribute_selectors
                    .push(read_attribute_selector(tokens, token)?);
                *token = tokens.next_token(false);
            }
            _ => return Some(compound),
        }
    }
}

/// Read the inside of `[...]`; the opening bracket has been consumed.
///
/// `token` is left on the last token read, so on failure it is the token that
/// broke the grammar.
fn read_attribute_selector(tokens: &mut TokenStream, token: &mut Token) -> Option<AttributeSelector> {
    *token = tokens.next_token(true);
    if token.kind != TokenKind::Ident {
        return None;
    }
    let name = mem::take(&mut token.value);
    *token = tokens.next_token(true);
    let kind = match token.kind {
        TokenKind::SquareBracketEnd => {
            return Some(AttributeSelector::new(name, AttributeMatch::Set, ""));
        }
        TokenKind::Includes => AttributeMatch::SpaceSeparated,
        TokenKind::DashMatch => AttributeMatch::LangPrefix,
        TokenKind::Delim if token.is_delim("=") => AttributeMatch::Exact,
        TokenKind::Delim if token.is_delim("-") => {
            *token = tokens.next_token(false);
            if !token.is_delim("=") {
                return None;
            }
            AttributeMatch::HyphenSeparated
        }
        _ => return None,
    };
    *token = tokens.next_token(true);
    if !matches!(token.kind, TokenKind::Ident | TokenKind::String) {
        return None;
    }
    let value = mem::take(&mut token.value);
    *token = tokens.next_token(true);
    if token.kind != TokenKind::SquareBracketEnd {
        return None;
    }
    Some(AttributeSelector::new(name, kind, value))
}

impl SelectorChain {
    /// Assemble a chain the reader has already validated.
    fn from_links(links: Vec<SelectorLink>, pseudo_element: String) -> Self {
        Self {
            links,
            pseudo_element,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse a selector the way a statement reader would, returning the chain
    /// and the token that ended it.
    fn parse(selector: &str) -> (Option<SelectorChain>, Token) {
        let mut tokens = TokenStream::new(selector);
        let mut token = tokens.next_token(true);
        let chain = read_selector_chain(&mut tokens, &mut token);
        (chain, token)
    }

    fn parse_ok(selector: &str) -> SelectorChain {
        let (chain, end) = parse(selector);
        assert!(chain.is_some(), "expected {selector:?} to parse");
        assert!(is_chain_end(&end), "expected {selector:?} to end at , or {{");
        chain.unwrap_or_else(|| SelectorChain::new(CompoundSelector::universal()))
    }

    /// Combinators, with and without surrounding whitespace.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn combinators() {
        let expected = SelectorChain::new(CompoundSelector::element("div"))
            .then(Combinator::Child, CompoundSelector::element("p"))
            .then(Combinator::Descendant, CompoundSelector::element("em"))
            .then(Combinator::NextSibling, CompoundSelector::element("b"));
        assert_eq!(parse_ok("div > p em + b {"), expected);
        assert_eq!(parse_ok("div>p em+b {"), expected);
    }

    /// Compound selectors absorb ids, classes, pseudo-classes and attributes.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn compound_parts() {
        let expected = SelectorChain::new(
            CompoundSelector::element("a")
                .with_id("home")
                .with_class("nav")
                .with_pseudo_class("hover")
                .with_attribute(AttributeSelector::new("href", AttributeMatch::Set, ""))
                .with_attribute(AttributeSelector::new("rel", AttributeMatch::SpaceSeparated, "next"))
                .with_attribute(AttributeSelector::new("lang", AttributeMatch::LangPrefix, "en"))
                .with_attribute(AttributeSelector::new("title", AttributeMatch::Exact, "x y"))
                .with_attribute(AttributeSelector::new("data", AttributeMatch::HyphenSeparated, "b")),
        );
        assert_eq!(
            parse_ok("a#home.nav:HOVER[href][rel~=next][lang|=\"en\"][title=\"x y\"][data -= b],"),
            expected
        );
    }

    /// `#`, `.`, `:` and `[` start an implicit universal selector.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn implicit_universal() {
        for selector in ["#a {", ".a {", ":hover {", "[a] {", "* {"] {
            let chain = parse_ok(selector);
            assert!(
                chain.subject().is_some_and(CompoundSelector::is_universal),
                "{selector}"
            );
        }
    }

    /// `:before`/`:after` become the chain's pseudo-element.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn pseudo_elements() {
        let chain = parse_ok("p.note:before {");
        assert_eq!(chain.pseudo_element(), "before");
        assert_eq!(
            chain.subject(),
            Some(&CompoundSelector::element("p").with_class("note"))
        );
        assert!(parse("p:before span {").0.is_none());
        assert!(parse("p:after:hover {").0.is_none());
    }

    /// Unsupported and malformed selectors are rejected.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn rejects_unsupported() {
        for selector in [
            "p::first-line {",
            "p:lang(en) {",
            "#1a {",
            "a[href^=\"http\"] {",
            "a[href= {",
            "a[=x] {",
            "div > {",
            "> p {",
            ". {",
        ] {
            assert!(parse(selector).0.is_none(), "{selector}");
        }
    }

    /// A rejected attribute selector reports the token that broke it.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn rejection_reports_breaking_token() {
        let (chain, end) = parse("a[href = ] { }");
        assert!(chain.is_none());
        assert_eq!(end.kind, TokenKind::SquareBracketEnd);
        let (numeric_id, hash) = parse("p#2x { }");
        assert!(numeric_id.is_some());
        assert_eq!(hash.kind, TokenKind::Hash);
        assert!(!is_chain_end(&hash));
        let (missing, brace) = parse("a > { }");
        assert!(missing.is_none());
        assert_eq!(brace.kind, TokenKind::CurlyBracketBegin);
    }

    /// A combinator this engine does not know ends the chain at that token.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn unknown_combinator_ends_chain() {
        let (chain, end) = parse("h1~p {");
        assert!(chain.is_some());
        assert!(end.is_delim("~"));
        let (spaced, _) = parse("h1 ~ p {");
        assert!(spaced.is_none());
    }
}
