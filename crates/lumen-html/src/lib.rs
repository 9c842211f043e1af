//! Tolerant HTML parser for the lumen renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner**: a single left-to-right pass over the markup with three
//!   mutually exclusive states (text, tag, entity reference) and no
//!   backtracking. See [`scanner`].
//! - **Tag sub-parser**: the attribute grammar inside `<...>`. See [`tag`].
//! - **Tree builder**: the open-element stack that turns scanner output into
//!   a [`DomTree`]. See [`parser`].
//! - **View-source builder**: renders the literal markup as alternating bold
//!   text and text nodes. See [`view_source`].
//!
//! None of the entry points fail: malformed markup degrades to a best-effort
//! tree, and recovered errors are reported through `log::debug!`.
//!
//! # Not Implemented
//!
//! - Insertion modes, implied end tags and foster parenting
//! - Comments as nodes (tags beginning with `!` are dropped)
//! - Named character references beyond `lt`, `gt`, `amp` and `quot`

/// HTML tree construction from scanner output.
pub mod parser;
/// Three-state markup scanner.
pub mod scanner;
/// Attribute grammar for the contents of a tag.
pub mod tag;
/// Content tree debug printing.
pub mod tree_printer;
/// Tree builder for `view-source:` documents.
pub mod view_source;

use lumen_dom::DomTree;

pub use parser::{HtmlParser, SELF_CLOSING_TAGS};
pub use scanner::{TokenSink, decode_entity, scan};
pub use tag::{Tag, TagError, TagParser};
pub use tree_printer::{format_tree, print_tree};
pub use view_source::ViewSourceBuilder;

/// Parse `markup` into a content tree.
///
/// Never fails; see the crate documentation for the recovery rules.
#[must_use]
pub fn parse(markup: &str) -> DomTree {
    log::info!(target: "lumen::html", "parsing {} bytes of HTML", markup.len());
    let mut parser = HtmlParser::new();
    scan(markup, &mut parser);
    parser.finish()
}

/// Parse `markup` in view-source mode: the result displays the markup
/// itself instead of its structure.
#[must_use]
pub fn parse_view_source(markup: &str) -> DomTree {
    log::info!(target: "lumen::html", "building view-source tree for {} bytes", markup.len());
    let mut builder = ViewSourceBuilder::new();
    scan(markup, &mut builder);
    builder.finish()
}
