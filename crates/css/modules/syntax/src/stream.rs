//! Sequential token reader used by the stylesheet, selector and declaration readers.

use crate::token::{Token, TokenKind, tokenize};

/// A forward-only reader over a tokenized stylesheet.
///
/// Comments are never returned. Reading past the end yields [`TokenKind::Null`]
/// tokens forever.
#[derive(Clone, Debug, Default)]
pub struct TokenStream {
    /// Flattened tokens of the whole input.
    tokens: Vec<Token>,
    /// Index of the next token to inspect.
    position: usize,
    /// Index of the token handed out by the last read.
    last_read: usize,
}

impl TokenStream {
    /// Tokenize `css` and position the reader at its first token.
    #[inline]
    pub fn new(css: &str) -> Self {
        Self::from_tokens(tokenize(css))
    }

    /// Read from an already tokenized list.
    #[inline]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            last_read: 0,
        }
    }

    /// Read the next token, optionally skipping whitespace first.
    pub fn next_token(&mut self, skip_whitespace: bool) -> Token {
        while let Some(token) = self.tokens.get(self.position) {
            let index = self.position;
            self.position = self.position.saturating_add(1);
            match token.kind {
                TokenKind::Comment => {}
                TokenKind::Whitespace if skip_whitespace => {}
                _ => {
                    self.last_read = index;
                    return token.clone();
                }
            }
        }
        self.last_read = self.tokens.len();
        Token::default()
    }

    /// Step back so the next read returns the last token read again.
    #[inline]
    pub fn unread(&mut self) {
        self.position = self.last_read;
    }

    /// True once every token has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }
}
