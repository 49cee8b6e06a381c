//! CSS 2.1 style documents: stylesheet loading, selector matching and the cascade.
//! Spec: <https://www.w3.org/TR/CSS21/cascade.html>
//!
//! A [`StyleDocument`] collects rulesets from any number of stylesheets and,
//! for an element reached through a [`SelectableNode`] cursor, returns the
//! declarations that apply to it in cascade order.

#![forbid(unsafe_code)]

pub mod dom;
mod parser;

use anyhow::{Context as _, Result};
use core::fmt;
use css_syntax::parse_base_uri;
use log::debug;
use parser::SheetParser;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub use css_cascade::{PropertyList, Ruleset, RulesetMatch, RulesetStore, cascade};
pub use css_media_queries::MediaFilter;
pub use css_selectors::{
    AttributeMatch, AttributeSelector, Combinator, CompoundSelector, CursorGuard, SelectableNode,
    SelectorChain, SelectorLink, Specificity,
};
pub use css_syntax::{Property, Token, TokenKind, Url};

/// Rulesets of every stylesheet added so far, queried per element.
#[derive(Clone, Default)]
pub struct StyleDocument {
    store: RulesetStore,
    /// Origin given to the rulesets of the next sheet. Starts at 0 and grows by
    /// one per added sheet.
    next_origin: u32,
    media: MediaFilter,
}

impl StyleDocument {
    /// An empty document honoring `@media all` and `@media screen`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document honoring the media types accepted by `media`.
    #[inline]
    pub fn with_media_filter(media: MediaFilter) -> Self {
        Self {
            media,
            ..Self::default()
        }
    }

    /// Read a stylesheet from `source` and add its rulesets.
    ///
    /// Relative `url()` values are resolved against `base_uri`; an empty or
    /// invalid base leaves them as written.
    ///
    /// # Errors
    /// Returns an error if `source` cannot be read as UTF-8 text. Malformed CSS
    /// is never an error.
    pub fn add_sheet<R: Read>(&mut self, mut source: R, base_uri: &str) -> Result<()> {
        let mut css = String::new();
        source
            .read_to_string(&mut css)
            .context("Failed to read stylesheet")?;
        self.add_sheet_str(&css, base_uri);
        Ok(())
    }

    /// Open `path` and add it as a stylesheet.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn add_sheet_file<P: AsRef<Path>>(&mut self, path: P, base_uri: &str) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open stylesheet {}", path.display()))?;
        self.add_sheet(BufReader::new(file), base_uri)
            .with_context(|| format!("Failed to load stylesheet {}", path.display()))
    }

    /// Add the rulesets of `css`.
    pub fn add_sheet_str(&mut self, css: &str, base_uri: &str) {
        let before = self.store.len();
        let origin = self.next_origin;
        SheetParser::new(
            css,
            &mut self.store,
            &self.media,
            parse_base_uri(base_uri),
            origin,
        )
        .read_stylesheet();
        self.next_origin = self.next_origin.saturating_add(1);
        debug!(
            "[CSS] sheet {origin}: {} ruleset(s) added, {} total",
            self.store.len().saturating_sub(before),
            self.store.len()
        );
    }

    /// Declarations that apply to the element under `node` for `pseudo_element`
    /// (`""`, `"before"` or `"after"`), most authoritative first.
    ///
    /// See [`PropertyList`] for how to apply them.
    pub fn select<N: SelectableNode + ?Sized>(
        &self,
        node: &mut N,
        pseudo_element: &str,
    ) -> PropertyList {
        cascade(&self.select_rulesets(node, pseudo_element))
    }

    /// Rulesets that match the element under `node`, least authoritative first.
    pub fn select_rulesets<N: SelectableNode + ?Sized>(
        &self,
        node: &mut N,
        pseudo_element: &str,
    ) -> Vec<RulesetMatch<'_>> {
        css_cascade::select_rulesets(&self.store, node, pseudo_element)
    }

    /// Declarations of an inline `style="..."` value, in source order.
    pub fn get_style_properties(style: &str, base_uri: &str) -> Vec<Property> {
        let base = parse_base_uri(base_uri);
        css_style_attr::get_style_properties(style, base.as_ref())
    }

    #[inline]
    pub fn rulesets(&self) -> &[Ruleset] {
        self.store.as_slice()
    }

    #[inline]
    pub fn ruleset_count(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub const fn next_origin(&self) -> u32 {
        self.next_origin
    }

    #[inline]
    pub const fn media_filter(&self) -> &MediaFilter {
        &self.media
    }
}

impl fmt::Debug for StyleDocument {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StyleDocument")
            .field("rulesets", &self.store.len())
            .field("next_origin", &self.next_origin)
            .field("media", &self.media.accepted())
            .finish()
    }
}
