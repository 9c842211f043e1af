//! CSS parser, selector matching, cascade, layout and painting for the
//! lumen renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Parser**: a tolerant recursive-descent grammar for rules
//!   (`selector { property: value; ... }`) and declaration blocks, with
//!   scan-forward recovery. See [`parser`].
//! - **Selectors**: tag, class, sequence (`div.note`) and descendant
//!   (`ul li`) selectors with integer specificity. See [`selector`].
//! - **Cascade**: a pre-order walk producing a [`StyleTable`] of resolved
//!   properties per node, with inheritance of font and colour properties and
//!   percentage font sizes. See [`cascade`].
//! - **Layout**: a box tree built from the styled content tree with block and
//!   inline modes, anonymous grouping and greedy line breaking. See
//!   [`layout`].
//! - **Painting**: a display list of abstract draw commands. See [`paint`].
//!
//! # Not Implemented
//!
//! - Selector lists (`a, b`), combinators other than descendant, ids,
//!   attributes and pseudo-classes
//! - Multi-token values (`font-family: Times New Roman` keeps `Times`)
//! - Margins, padding, borders and floats

/// Style resolution over the content tree.
pub mod cascade;
/// Box tree construction and geometry.
pub mod layout;
/// Display list generation.
pub mod paint;
/// Stylesheet and declaration block parsing.
pub mod parser;
/// Selector variants, specificity and matching.
pub mod selector;
/// Resolved style maps and typed font values.
pub mod style;
/// The built-in default stylesheet.
pub mod ua_stylesheet;

pub use cascade::{INHERITED_PROPERTIES, StyleTable, compute_styles, sort_by_specificity};
pub use layout::{
    ApproximateFontMetrics, BoxKind, FontMetrics, LayoutBox, LayoutMode, Rect, layout_document,
};
pub use paint::{DisplayCommand, DisplayList, Painter};
pub use parser::{CssParser, ParseError, Rule, parse_declarations, parse_stylesheet};
pub use selector::Selector;
pub use style::{FontDescriptor, FontStyle, FontWeight, StyleMap};
pub use ua_stylesheet::ua_rules;
