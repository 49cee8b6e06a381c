//! CSS Syntax: tokens, the token stream and declaration reading.
//! Spec: <https://www.w3.org/TR/CSS21/syndata.html>
//!
//! Tokenization itself is done by `cssparser`; this crate flattens its block
//! structure into a linear stream that the stylesheet and selector readers
//! consume one token at a time.

#![forbid(unsafe_code)]

mod declaration;
mod stream;
mod token;
mod uri;

pub use declaration::{Property, read_property, skip_declaration};
pub use stream::TokenStream;
pub use token::{Token, TokenKind, tokenize};
pub use uri::{parse_base_uri, resolve_uri};
pub use url::Url;
