//! Layout engine.
//!
//! Builds a [`LayoutBox`] tree from a styled content tree. The box tree is
//! rebuilt from scratch on every pass; nothing is mutated incrementally, so
//! laying out the same tree at the same width twice gives identical
//! geometry.
//!
//! # Module Structure
//!
//! - [`layout_box`] - Box kinds, rectangles and tree helpers
//! - [`font`] - Text measurement
//! - [`block`] - Block mode and anonymous grouping
//! - [`inline`] - Inline mode, line breaking and line finalization
//!
//! # Geometry
//!
//! All coordinates are whole pixels. Each box's `y` is chained from its
//! previous sibling (`previous.y + previous.height`) or, for a first child,
//! from its parent. That cursor is threaded through the recursion as an
//! argument and not stored on the boxes.

pub mod block;
pub mod font;
pub mod inline;
pub mod layout_box;

pub use font::{ApproximateFontMetrics, FontMetrics};
pub use layout_box::{BoxKind, LayoutBox, Rect};

use lumen_dom::{DomTree, NodeId, NodeType};
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::cascade::StyleTable;
use crate::style::FontDescriptor;

/// Horizontal inset of the document box.
pub const HSTEP: i32 = 13;

/// Vertical start of the document box, and the step added below paragraphs.
pub const VSTEP: i32 = 18;

/// Fixed width of `input` and `button` boxes.
pub const INPUT_WIDTH: i32 = 200;

/// Left indent of list items.
pub const LIST_INDENT: i32 = 12;

/// Line height and baseline factor applied to the tallest font on a line.
pub const LINE_SPACING: f32 = 1.25;

/// Elements that start a block box.
pub const BLOCK_ELEMENTS: [&str; 37] = [
    "html", "body", "article", "section", "nav", "aside", "h1", "h2", "h3", "h4", "h5", "h6",
    "hgroup", "header", "footer", "address", "p", "hr", "pre", "blockquote", "ol", "ul", "menu",
    "li", "dl", "dt", "dd", "figure", "figcaption", "main", "div", "table", "form", "fieldset",
    "legend", "details", "summary",
];

/// Elements that produce no visible boxes.
pub const HIDDEN_ELEMENTS: [&str; 6] = ["head", "script", "style", "title", "meta", "link"];

/// Form controls laid out as fixed-width replaced boxes.
pub const REPLACED_ELEMENTS: [&str; 2] = ["input", "button"];

/// How a node lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Children stack vertically; inline runs are grouped into anonymous boxes.
    Block,
    /// Content flows into lines.
    Inline,
}

/// True if `id` is an element whose tag starts a block box.
#[must_use]
pub fn is_block_element(tree: &DomTree, id: NodeId) -> bool {
    tree.tag_name(id)
        .is_some_and(|tag| BLOCK_ELEMENTS.contains(&tag))
}

/// Decide the layout mode of a node.
///
/// - Text is inline.
/// - An element with any block-level child element is block.
/// - An element with other children, or an empty form control, is inline.
/// - An empty element is block.
#[must_use]
pub fn layout_mode(tree: &DomTree, id: NodeId) -> LayoutMode {
    let Some(node) = tree.get(id) else {
        return LayoutMode::Block;
    };
    match &node.node_type {
        NodeType::Text(_) => LayoutMode::Inline,
        NodeType::Element(data) => {
            if node.children.iter().any(|&child| is_block_element(tree, child)) {
                LayoutMode::Block
            } else if !node.children.is_empty()
                || REPLACED_ELEMENTS.contains(&data.tag_name.as_str())
            {
                LayoutMode::Inline
            } else {
                LayoutMode::Block
            }
        }
    }
}

/// Shared, read-only inputs to one layout pass.
pub struct LayoutContext<'a> {
    /// The content tree.
    pub tree: &'a DomTree,
    /// Resolved styles for every node.
    pub styles: &'a StyleTable,
    /// Text measurement.
    pub metrics: &'a dyn FontMetrics,
}

impl LayoutContext<'_> {
    /// The font `node` is drawn with.
    ///
    /// Size, weight and style come from the node's own resolved style.
    /// `font-family` is not inherited by the cascade, so it is taken from
    /// the nearest of `node` and its ancestors that sets one.
    #[must_use]
    pub fn font_for(&self, node: NodeId) -> FontDescriptor {
        let mut font = FontDescriptor::from_style(self.styles.get(&node));
        if let Some(family) = std::iter::once(node)
            .chain(self.tree.ancestors(node))
            .find_map(|id| self.styles.get(&id)?.get("font-family"))
        {
            font.family.clone_from(family);
        }
        font
    }

    /// True if `node` sits inside a `pre` element.
    #[must_use]
    pub fn is_preformatted(&self, node: NodeId) -> bool {
        self.tree
            .ancestors(node)
            .any(|id| self.tree.is_element_named(id, "pre"))
    }
}

/// Lay out a whole document for a viewport `viewport_width` pixels wide.
///
/// The document box is inset by [`HSTEP`] on both sides and starts at
/// [`VSTEP`]; its only child is the block box of the root element.
#[must_use]
pub fn layout_document(
    tree: &DomTree,
    styles: &StyleTable,
    viewport_width: i32,
    metrics: &dyn FontMetrics,
) -> LayoutBox {
    let ctx = LayoutContext {
        tree,
        styles,
        metrics,
    };
    let mut rect = Rect {
        x: HSTEP,
        y: VSTEP,
        width: (viewport_width - 2 * HSTEP).max(0),
        height: 0,
    };
    let root = ctx.layout_block(tree.root(), rect, None);
    rect.height = root.rect.height;
    log::debug!(
        target: "lumen::layout",
        "laid out document at width {viewport_width}: height {}",
        rect.height
    );
    LayoutBox {
        kind: BoxKind::Document,
        node: tree.root(),
        rect,
        children: vec![root],
    }
}
