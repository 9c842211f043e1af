//! Box kinds, geometry and box tree helpers.

use std::fmt;

use lumen_dom::NodeId;
use serde::{Serialize, Serializer};
use strum_macros::Display;

use crate::style::FontDescriptor;

/// A rectangle in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// The right edge, `x + width`.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge, `y + height`. The next sibling box starts here.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True if the point lies inside the rectangle, edges included.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// The kinds of box in the box tree.
#[derive(Debug, Clone, PartialEq, Display, Serialize)]
#[serde(tag = "type")]
pub enum BoxKind {
    /// The viewport-wide root box.
    Document,
    /// A block-level element.
    Block,
    /// Groups a run of non-block content inside a block.
    AnonymousInline,
    /// One visual line inside an anonymous box.
    Line,
    /// One word of text, or one row of preformatted text.
    TextRun {
        /// The word without surrounding whitespace, or the row as written.
        word: String,
        /// Font the word is measured and drawn with.
        font: FontDescriptor,
        /// Text colour.
        color: String,
    },
    /// A form control drawn as a fixed-width box with a label.
    Replaced {
        /// The `value` of an input or the text of a button.
        text: String,
        /// Font of the label.
        font: FontDescriptor,
        /// Label colour.
        color: String,
    },
}

/// A node of the box tree.
///
/// Boxes own their children. `node` refers back to the content node the box
/// represents (for anonymous and line boxes, the first node of their run),
/// which is how hit testing maps a point back to content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBox {
    /// Kind and kind-specific data.
    #[serde(flatten)]
    pub kind: BoxKind,
    /// The content node this box represents.
    #[serde(serialize_with = "serialize_node_id")]
    pub node: NodeId,
    /// Resolved geometry.
    pub rect: Rect,
    /// Child boxes in paint order.
    pub children: Vec<LayoutBox>,
}

fn serialize_node_id<S: Serializer>(id: &NodeId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(id.0 as u64)
}

impl LayoutBox {
    /// A box with no children.
    #[must_use]
    pub const fn leaf(kind: BoxKind, node: NodeId, rect: Rect) -> Self {
        Self {
            kind,
            node,
            rect,
            children: Vec::new(),
        }
    }

    /// All boxes of the subtree in pre-order, this box first.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(layout_box) = stack.pop() {
            out.push(layout_box);
            stack.extend(layout_box.children.iter().rev());
        }
        out
    }

    /// Number of boxes in the subtree.
    #[must_use]
    pub fn box_count(&self) -> usize {
        1 + self.children.iter().map(Self::box_count).sum::<usize>()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        let indent = "  ".repeat(depth);
        match &self.kind {
            BoxKind::TextRun { word, .. } => writeln!(
                f,
                "{indent}TextRun(word='{word}', x={x}, y={y}, width={width}, height={height})"
            )?,
            BoxKind::Replaced { text, .. } => writeln!(
                f,
                "{indent}Replaced(text='{text}', x={x}, y={y}, width={width}, height={height})"
            )?,
            kind => writeln!(
                f,
                "{indent}{kind}(node={}, x={x}, y={y}, width={width}, height={height})",
                self.node.0
            )?,
        }
        self.children
            .iter()
            .try_for_each(|child| child.write_indented(f, depth + 1))
    }
}

/// Indented dump of the subtree, one box per line.
impl fmt::Display for LayoutBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
