//! Stylesheet reader: statements, at-rules and declaration blocks.
//! Spec: <https://www.w3.org/TR/CSS21/syndata.html#rule-sets>
//!
//! Every malformed construct is recovered from locally. The reader never
//! fails; bad input just contributes fewer rulesets.

use css_cascade::{Ruleset, RulesetStore};
use css_media_queries::{MediaFilter, read_media_type_list};
use css_selectors::read_selector_chain;
use css_syntax::{
    Property, Token, TokenKind, TokenStream, Url, parse_base_uri, read_property, skip_declaration,
};
use log::{debug, trace};

/// How a block of rules ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlockEnd {
    Closed,
    EndOfInput,
}

/// Reads one stylesheet into a ruleset store.
pub struct SheetParser<'doc> {
    tokens: TokenStream,
    store: &'doc mut RulesetStore,
    media: &'doc MediaFilter,
    /// Base for relative `url()` values; `@-clan-base-uri` replaces it.
    base: Option<Url>,
    /// Origin stamped on every ruleset of this sheet.
    origin: u32,
}

impl<'doc> SheetParser<'doc> {
    pub fn new(
        css: &str,
        store: &'doc mut RulesetStore,
        media: &'doc MediaFilter,
        base: Option<Url>,
        origin: u32,
    ) -> Self {
        Self {
            tokens: TokenStream::new(css),
            store,
            media,
            base,
            origin,
        }
    }

    /// Read the whole sheet.
    pub fn read_stylesheet(&mut self) {
        self.read_rules(false);
    }

    /// Read statements and at-rules until end of input or, inside a block,
    /// until the `}` closing it.
    fn read_rules(&mut self, in_block: bool) -> BlockEnd {
        loop {
            let token = self.tokens.next_token(true);
            match token.kind {
                TokenKind::Null => return BlockEnd::EndOfInput,
                TokenKind::CurlyBracketEnd if in_block => return BlockEnd::Closed,
                TokenKind::CurlyBracketEnd => trace!("[CSS] ignoring stray '}}'"),
                TokenKind::Cdo | TokenKind::Cdc => {}
                TokenKind::AtKeyword => self.read_at_rule(&token),
                _ => self.read_statement(token),
            }
        }
    }

    /// Dispatch on the at-keyword that was just read.
    fn read_at_rule(&mut self, keyword: &Token) {
        let name = keyword.value.to_ascii_lowercase();
        match name.as_str() {
            "-clan-base-uri" => self.read_base_uri(),
            "media" => self.read_media(),
            _ => {
                debug!("[CSS] ignoring unsupported at-rule @{name}");
                self.skip_at_rule();
            }
        }
    }

    /// `@-clan-base-uri "uri";` sets the base for the rest of the sheet.
    fn read_base_uri(&mut self) {
        let token = self.tokens.next_token(true);
        if token.kind == TokenKind::String {
            let resolved = match &self.base {
                Some(base) => base.join(&token.value).ok(),
                None => parse_base_uri(&token.value),
            };
            match resolved {
                Some(base) => {
                    debug!("[CSS] base uri is now {base}");
                    self.base = Some(base);
                }
                None => debug!("[CSS] keeping base uri, cannot use {:?}", token.value),
            }
        } else {
            self.tokens.unread();
        }
        self.skip_at_rule();
    }

    /// `@media type[, type]* { ... }`
    fn read_media(&mut self) {
        let Some(media_types) = read_media_type_list(&mut self.tokens) else {
            debug!("[CSS] ignoring malformed @media rule");
            self.skip_at_rule();
            return;
        };
        if !self.media.matches(&media_types) {
            debug!("[CSS] skipping @media {}", media_types.join(", "));
            self.skip_block();
            return;
        }
        let mark = self.store.len();
        if self.read_rules(true) == BlockEnd::EndOfInput {
            let removed = self.store.rollback_to(mark);
            debug!("[CSS] unterminated @media block, rolled back {removed} ruleset(s)");
        }
    }

    /// A selector list followed by a declaration block. `first` is the first
    /// token of the selector.
    fn read_statement(&mut self, first: Token) {
        let mut token = first;
        let mut selectors = Vec::new();
        loop {
            let Some(chain) = read_selector_chain(&mut self.tokens, &mut token) else {
                debug!("[CSS] discarding rule with unsupported selector");
                self.skip_statement(&token);
                return;
            };
            selectors.push(chain);
            if token.is_delim(",") {
                token = self.tokens.next_token(true);
            } else if token.kind == TokenKind::CurlyBracketBegin {
                break;
            } else {
                debug!("[CSS] discarding rule, unexpected {:?} after selector", token.kind);
                self.skip_statement(&token);
                return;
            }
        }

        let mut ruleset = Ruleset::new(selectors, self.origin);
        if self.read_declarations(&mut ruleset.properties) == BlockEnd::Closed {
            self.store.push(ruleset);
        } else {
            debug!("[CSS] discarding ruleset cut off by end of input");
        }
    }

    /// Declarations up to and including the closing `}`.
    fn read_declarations(&mut self, properties: &mut Vec<Property>) -> BlockEnd {
        loop {
            let token = self.tokens.next_token(true);
            match token.kind {
                TokenKind::Null => return BlockEnd::EndOfInput,
                TokenKind::CurlyBracketEnd => return BlockEnd::Closed,
                TokenKind::Semicolon => {}
                TokenKind::Ident => {
                    if let Some(property) =
                        read_property(&mut self.tokens, &token, self.base.as_ref())
                    {
                        properties.push(property);
                    }
                }
                _ => {
                    trace!("[CSS] skipping declaration starting with {:?}", token.kind);
                    skip_declaration(&mut self.tokens, token);
                }
            }
        }
    }

    /// Skip the rest of an at-rule: through the next top-level `;` or the end
    /// of its block. A `}` closing an enclosing block is left unread.
    fn skip_at_rule(&mut self) {
        let mut depth = 0usize;
        loop {
            let token = self.tokens.next_token(false);
            match token.kind {
                TokenKind::Null => return,
                TokenKind::Semicolon if depth == 0 => return,
                TokenKind::CurlyBracketEnd if depth == 0 => {
                    self.tokens.unread();
                    return;
                }
                TokenKind::CurlyBracketEnd => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                TokenKind::CurlyBracketBegin
                | TokenKind::SquareBracketBegin
                | TokenKind::BracketBegin
                | TokenKind::Function => depth = depth.saturating_add(1),
                TokenKind::SquareBracketEnd | TokenKind::BracketEnd => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
        }
    }

    /// Skip the rest of a malformed statement: through the next top-level `;`
    /// or the end of its block. `last` is the token last read; a `}` closing an
    /// enclosing block is left unread.
    fn skip_statement(&mut self, last: &Token) {
        let mut depth = 0usize;
        let mut token_kind = last.kind;
        loop {
            match token_kind {
                TokenKind::Null => return,
                TokenKind::Semicolon if depth == 0 => return,
                TokenKind::CurlyBracketBegin => depth = depth.saturating_add(1),
                TokenKind::CurlyBracketEnd if depth == 0 => {
                    self.tokens.unread();
                    return;
                }
                TokenKind::CurlyBracketEnd => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
            token_kind = self.tokens.next_token(false).kind;
        }
    }

    /// Skip the contents of a block whose `{` was just read.
    fn skip_block(&mut self) {
        let mut depth = 1usize;
        loop {
            match self.tokens.next_token(false).kind {
                TokenKind::Null => return,
                TokenKind::CurlyBracketBegin => depth = depth.saturating_add(1),
                TokenKind::CurlyBracketEnd => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }
}
