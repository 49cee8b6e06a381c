//! Declaration reading: `name: value [!important]`.
//! Spec: <https://www.w3.org/TR/CSS21/syndata.html#declaration>

use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};
use crate::uri::resolve_uri;
use core::fmt;
use url::Url;

/// A single declared property.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Property {
    /// Lowercased property name.
    pub name: String,
    /// Value tokens, trimmed of flanking whitespace and of a trailing `!important`.
    pub value: Vec<Token>,
    /// Whether the declaration was marked as `!important`.
    pub important: bool,
}

impl Property {
    /// Render the value tokens back into CSS text.
    pub fn value_text(&self) -> String {
        let mut out = String::new();
        for token in &self.value {
            push_token_text(&mut out, token);
        }
        out
    }
}

impl fmt::Display for Property {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.important {
            write!(formatter, "{}: {} !important", self.name, self.value_text())
        } else {
            write!(formatter, "{}: {}", self.name, self.value_text())
        }
    }
}

/// Append the CSS spelling of `token` to `out`.
fn push_token_text(out: &mut String, token: &Token) {
    match token.kind {
        TokenKind::Null => {}
        TokenKind::Whitespace => out.push(' '),
        TokenKind::String => {
            out.push('"');
            out.push_str(&token.value);
            out.push('"');
        }
        TokenKind::Hash | TokenKind::IdHash => {
            out.push('#');
            out.push_str(&token.value);
        }
        TokenKind::AtKeyword => {
            out.push('@');
            out.push_str(&token.value);
        }
        TokenKind::Percentage => {
            out.push_str(&token.value);
            out.push('%');
        }
        TokenKind::Dimension => {
            out.push_str(&token.value);
            out.push_str(&token.dimension);
        }
        TokenKind::Uri => {
            out.push_str("url(");
            out.push_str(&token.value);
            out.push(')');
        }
        TokenKind::Function => {
            out.push_str(&token.value);
            out.push('(');
        }
        _ => out.push_str(&token.value),
    }
}

/// Read one declaration whose name token has just been consumed.
///
/// Stops after the terminating top-level `;`, in front of a top-level `}`, or
/// at end of input. Returns `None` for a missing colon or an empty value.
pub fn read_property(
    tokens: &mut TokenStream,
    name: &Token,
    base: Option<&Url>,
) -> Option<Property> {
    let token = tokens.next_token(true);
    if token.kind != TokenKind::Colon {
        skip_declaration(tokens, token);
        return None;
    }
    let mut value = read_property_value(tokens, base);
    let important = strip_important(&mut value);
    if value.is_empty() {
        return None;
    }
    Some(Property {
        name: name.value.to_ascii_lowercase(),
        value,
        important,
    })
}

/// Collect value tokens up to the end of the declaration, resolving `url()` values.
fn read_property_value(tokens: &mut TokenStream, base: Option<&Url>) -> Vec<Token> {
    let mut value = Vec::new();
    let mut depth = 0usize;
    loop {
        let mut token = tokens.next_token(false);
        match token.kind {
            TokenKind::Null => break,
            TokenKind::Semicolon if depth == 0 => break,
            TokenKind::CurlyBracketEnd if depth == 0 => {
                tokens.unread();
                break;
            }
            TokenKind::CurlyBracketBegin
            | TokenKind::SquareBracketBegin
            | TokenKind::BracketBegin
            | TokenKind::Function => depth = depth.saturating_add(1),
            TokenKind::CurlyBracketEnd | TokenKind::SquareBracketEnd | TokenKind::BracketEnd => {
                depth = depth.saturating_sub(1);
            }
            TokenKind::Uri => token.value = resolve_uri(base, &token.value),
            _ => {}
        }
        value.push(token);
    }
    trim_whitespace(&mut value);
    value
}

/// Drop a trailing `!important` (whitespace allowed around the `!`).
fn strip_important(value: &mut Vec<Token>) -> bool {
    if !value.last().is_some_and(|token| token.is_ident("important")) {
        return false;
    }
    let head = value.len().saturating_sub(1);
    let bang = value
        .get(..head)
        .and_then(|rest| rest.iter().rposition(|token| token.kind != TokenKind::Whitespace));
    match bang {
        Some(index) if value.get(index).is_some_and(|token| token.is_delim("!")) => {
            value.truncate(index);
            trim_whitespace(value);
            true
        }
        _ => false,
    }
}

/// Remove leading and trailing whitespace tokens.
fn trim_whitespace(value: &mut Vec<Token>) {
    while value
        .last()
        .is_some_and(|token| token.kind == TokenKind::Whitespace)
    {
        value.pop();
    }
    let leading = value
        .iter()
        .take_while(|token| token.kind == TokenKind::Whitespace)
        .count();
    value.drain(..leading);
}

/// Skip the rest of a malformed declaration starting at `token`.
///
/// Consumes through the next top-level `;`; a top-level `}` is left unread for
/// the enclosing block.
pub fn skip_declaration(tokens: &mut TokenStream, first: Token) {
    let mut token = first;
    let mut depth = 0usize;
    loop {
        match token.kind {
            TokenKind::Null => return,
            TokenKind::Semicolon if depth == 0 => return,
            TokenKind::CurlyBracketEnd if depth == 0 => {
                tokens.unread();
                return;
            }
            TokenKind::CurlyBracketBegin
            | TokenKind::SquareBracketBegin
            | TokenKind::BracketBegin
            | TokenKind::Function => depth = depth.saturating_add(1),
            TokenKind::CurlyBracketEnd | TokenKind::SquareBracketEnd | TokenKind::BracketEnd => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        token = tokens.next_token(false);
    }
}
