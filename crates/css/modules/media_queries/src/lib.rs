//! CSS 2.1 media types for `@media` rules.
//! Spec: <https://www.w3.org/TR/CSS21/media.html#at-media-rule>

#![forbid(unsafe_code)]

use css_syntax::{Token, TokenKind, TokenStream};
use log::trace;

/// The media types whose `@media` blocks are honored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFilter {
    accepted: Vec<String>,
}

impl Default for MediaFilter {
    /// `all` and `screen`.
    fn default() -> Self {
        Self::new(["all", "screen"])
    }
}

impl MediaFilter {
    pub fn new<I, S>(accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accepted: accepted
                .into_iter()
                .map(|media| media.into().to_ascii_lowercase())
                .collect(),
        }
    }

    #[inline]
    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }

    /// True if any of `media_types` is accepted, ignoring ASCII case.
    pub fn matches<S: AsRef<str>>(&self, media_types: &[S]) -> bool {
        media_types.iter().any(|media| {
            self.accepted
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(media.as_ref()))
        })
    }
}

/// Read `ident [, ident]* {` after an `@media` keyword.
///
/// On success the opening `{` has been consumed. On a malformed list `None` is
/// returned and the offending token is left unread so the caller can skip the
/// whole at-rule.
pub fn read_media_type_list(tokens: &mut TokenStream) -> Option<Vec<String>> {
    let mut media_types = Vec::new();
    let mut expect_ident = true;
    loop {
        let token = tokens.next_token(true);
        match token.kind {
            TokenKind::Ident if expect_ident => {
                media_types.push(token.value.to_ascii_lowercase());
                expect_ident = false;
            }
            TokenKind::Delim if !expect_ident && token.is_delim(",") => expect_ident = true,
            TokenKind::CurlyBracketBegin if !expect_ident => return Some(media_types),
            _ => {
                reject(&token);
                tokens.unread();
                return None;
            }
        }
    }
}

fn reject(token: &Token) {
    trace!(
        "[MEDIA] unsupported media list at {:?} {:?}",
        token.kind, token.value
    );
}
