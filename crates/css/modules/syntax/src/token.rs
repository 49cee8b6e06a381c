//! CSS tokens and the `cssparser` flattening tokenizer.
//! Spec: <https://www.w3.org/TR/CSS21/syndata.html#tokenization>

use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token as CssToken};

/// Token categories produced by [`tokenize`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Every read past the last token yields this kind.
    #[default]
    Null,
    Ident,
    AtKeyword,
    String,
    /// `#name` whose name is not a valid identifier, such as `#1a`.
    Hash,
    /// `#name` whose name is a valid identifier; the only kind usable as an id selector.
    IdHash,
    Number,
    Percentage,
    Dimension,
    /// `url(...)`/`uri(...)`; the value is the unquoted address.
    Uri,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    CurlyBracketBegin,
    CurlyBracketEnd,
    SquareBracketBegin,
    SquareBracketEnd,
    BracketBegin,
    BracketEnd,
    Whitespace,
    Comment,
    /// Function name without the opening parenthesis. The arguments follow as
    /// ordinary tokens and end with a [`TokenKind::BracketEnd`].
    Function,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    Delim,
}

/// One CSS token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Token text: identifier, unescaped string, numeric text, delimiter, ...
    pub value: String,
    /// Unit of a [`TokenKind::Dimension`]; empty otherwise.
    pub dimension: String,
}

impl Token {
    /// Build a token without a unit.
    #[inline]
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            dimension: String::new(),
        }
    }

    /// True for a delimiter token with exactly this text.
    #[inline]
    pub fn is_delim(&self, delim: &str) -> bool {
        self.kind == TokenKind::Delim && self.value == delim
    }

    /// True for an identifier equal to `ident`, ignoring ASCII case.
    #[inline]
    pub fn is_ident(&self, ident: &str) -> bool {
        self.kind == TokenKind::Ident && self.value.eq_ignore_ascii_case(ident)
    }

    /// True for the end-of-input token.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.kind == TokenKind::Null
    }
}

/// Tokenize CSS text into a flat token list.
///
/// `cssparser` hands out blocks as a single token plus a nested parser; this
/// walks into every block and emits explicit begin/end tokens instead. A block
/// cut off by the end of input gets no end token, so readers can tell a closed
/// block from an unterminated one.
pub fn tokenize(css: &str) -> Vec<Token> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut out = Vec::new();
    flatten_block(&mut parser, &mut out);
    out
}

/// Emit every token of the current block (or the top level) into `out`.
fn flatten_block(parser: &mut Parser<'_, '_>, out: &mut Vec<Token>) {
    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return,
        };
        match token {
            CssToken::CurlyBracketBlock => {
                out.push(Token::new(TokenKind::CurlyBracketBegin, "{"));
                flatten_nested(parser, out, Token::new(TokenKind::CurlyBracketEnd, "}"));
            }
            CssToken::SquareBracketBlock => {
                out.push(Token::new(TokenKind::SquareBracketBegin, "["));
                flatten_nested(parser, out, Token::new(TokenKind::SquareBracketEnd, "]"));
            }
            CssToken::ParenthesisBlock => {
                out.push(Token::new(TokenKind::BracketBegin, "("));
                flatten_nested(parser, out, Token::new(TokenKind::BracketEnd, ")"));
            }
            CssToken::Function(name) if is_uri_function(&name) => {
                out.push(read_uri_function(parser));
            }
            CssToken::Function(name) => {
                out.push(Token::new(TokenKind::Function, name.to_string()));
                flatten_nested(parser, out, Token::new(TokenKind::BracketEnd, ")"));
            }
            other => out.push(convert(&other, parser.slice_from(start))),
        }
    }
}

/// Flatten the block just opened and push `close` only if the block really was closed.
fn flatten_nested(parser: &mut Parser<'_, '_>, out: &mut Vec<Token>, close: Token) {
    let content_end = parser.parse_nested_block(|block| {
        flatten_block(block, out);
        Ok::<SourcePosition, ParseError<'_, ()>>(block.position())
    });
    // The nested parser stops in front of the closing bracket; the outer one
    // only moves past `content_end` when that bracket exists.
    if let Ok(content_end) = content_end
        && parser.position() != content_end
    {
        out.push(close);
    }
}

/// `url(` and the legacy `uri(` spelling.
fn is_uri_function(name: &str) -> bool {
    name.eq_ignore_ascii_case("url") || name.eq_ignore_ascii_case("uri")
}

/// Read the arguments of a `url("...")`/`uri(...)` function as one address.
fn read_uri_function(parser: &mut Parser<'_, '_>) -> Token {
    let address = parser.parse_nested_block(|block| {
        let start = block.position();
        let mut pieces = 0usize;
        let mut quoted = None;
        while let Ok(token) = block.next() {
            pieces = pieces.saturating_add(1);
            if let CssToken::QuotedString(value) = token {
                quoted = Some(value.to_string());
            }
        }
        let raw = block.slice_from(start).trim().to_owned();
        let address = match quoted {
            Some(value) if pieces == 1 => value,
            _ => raw,
        };
        Ok::<String, ParseError<'_, ()>>(address)
    });
    Token::new(TokenKind::Uri, address.unwrap_or_default())
}

/// Convert a non-block `cssparser` token. `raw` is its source text.
fn convert(token: &CssToken<'_>, raw: &str) -> Token {
    match token {
        CssToken::Ident(value) => Token::new(TokenKind::Ident, value.to_string()),
        CssToken::AtKeyword(value) => Token::new(TokenKind::AtKeyword, value.to_string()),
        CssToken::Hash(value) => Token::new(TokenKind::Hash, value.to_string()),
        CssToken::IDHash(value) => Token::new(TokenKind::IdHash, value.to_string()),
        CssToken::QuotedString(value) | CssToken::BadString(value) => {
            Token::new(TokenKind::String, value.to_string())
        }
        CssToken::UnquotedUrl(value) | CssToken::BadUrl(value) => {
            Token::new(TokenKind::Uri, value.to_string())
        }
        CssToken::Delim(character) => Token::new(TokenKind::Delim, character.to_string()),
        CssToken::Number { .. } => Token::new(TokenKind::Number, raw),
        CssToken::Percentage { .. } => {
            Token::new(TokenKind::Percentage, raw.strip_suffix('%').unwrap_or(raw))
        }
        CssToken::Dimension {
            value,
            int_value,
            unit,
            ..
        } => {
            let number = raw.strip_suffix(&**unit).map_or_else(
                || int_value.map_or_else(|| value.to_string(), |int| int.to_string()),
                ToOwned::to_owned,
            );
            Token {
                kind: TokenKind::Dimension,
                value: number,
                dimension: unit.to_string(),
            }
        }
        CssToken::WhiteSpace(text) => Token::new(TokenKind::Whitespace, *text),
        CssToken::Comment(text) => Token::new(TokenKind::Comment, *text),
        CssToken::Colon => Token::new(TokenKind::Colon, ":"),
        CssToken::Semicolon => Token::new(TokenKind::Semicolon, ";"),
        CssToken::Comma => Token::new(TokenKind::Delim, ","),
        CssToken::IncludeMatch => Token::new(TokenKind::Includes, "~="),
        CssToken::DashMatch => Token::new(TokenKind::DashMatch, "|="),
        CssToken::PrefixMatch => Token::new(TokenKind::Delim, "^="),
        CssToken::SuffixMatch => Token::new(TokenKind::Delim, "$="),
        CssToken::SubstringMatch => Token::new(TokenKind::Delim, "*="),
        CssToken::CDO => Token::new(TokenKind::Cdo, "<!--"),
        CssToken::CDC => Token::new(TokenKind::Cdc, "-->"),
        // Blocks and functions are opened by `flatten_block` and never get here.
        CssToken::Function(_)
        | CssToken::ParenthesisBlock
        | CssToken::SquareBracketBlock
        | CssToken::CurlyBracketBlock => Token::new(TokenKind::Delim, raw),
        CssToken::CloseParenthesis => Token::new(TokenKind::BracketEnd, ")"),
        CssToken::CloseSquareBracket => Token::new(TokenKind::SquareBracketEnd, "]"),
        CssToken::CloseCurlyBracket => Token::new(TokenKind::CurlyBracketEnd, "}"),
    }
}
