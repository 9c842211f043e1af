//! Painter - generates a display list from a box tree

use lumen_dom::{DomTree, NodeId};

use super::{DisplayCommand, DisplayList};
use crate::cascade::StyleTable;
use crate::layout::{BoxKind, FontMetrics, LayoutBox, Rect};
use crate::style::background_of;

/// Colour of list item bullets.
pub const BULLET_COLOR: &str = "lightgray";

/// Colour of the focus outline and text caret.
const FOCUS_COLOR: &str = "black";

/// Walks a box tree and emits drawing commands.
pub struct Painter<'a> {
    tree: &'a DomTree,
    styles: &'a StyleTable,
    metrics: &'a dyn FontMetrics,
    focused: Option<NodeId>,
}

impl<'a> Painter<'a> {
    /// Create a painter with access to the content tree (for element
    /// types), the resolved styles (for backgrounds) and the font metrics
    /// (for caret placement).
    #[must_use]
    pub fn new(tree: &'a DomTree, styles: &'a StyleTable, metrics: &'a dyn FontMetrics) -> Self {
        Self {
            tree,
            styles,
            metrics,
            focused: None,
        }
    }

    /// Paint the form control `focused` with an outline and caret.
    #[must_use]
    pub const fn with_focus(mut self, focused: Option<NodeId>) -> Self {
        self.focused = focused;
        self
    }

    /// Paint a box tree and return the display list.
    #[must_use]
    pub fn paint(&self, root: &LayoutBox) -> DisplayList {
        let mut display_list = DisplayList::new();
        self.paint_box(root, &mut display_list);
        display_list
    }

    /// Paint one box, then its children in order.
    ///
    /// - Blocks draw their background and, for list items, a bullet.
    /// - Text runs draw their word.
    /// - Form controls draw their background and label; the focused one
    ///   also gets an outline and a caret after the label.
    /// - Document, anonymous and line boxes draw nothing themselves.
    fn paint_box(&self, layout_box: &LayoutBox, display_list: &mut DisplayList) {
        let rect = layout_box.rect;
        let node = layout_box.node;

        match &layout_box.kind {
            BoxKind::Document | BoxKind::AnonymousInline | BoxKind::Line => {}
            BoxKind::Block => {
                self.paint_background(node, rect, display_list);
                if self.tree.is_element_named(node, "li") {
                    display_list.push(DisplayCommand::FillRect {
                        rect: Rect {
                            x: rect.x - 10,
                            y: rect.y + 6,
                            width: 8,
                            height: 8,
                        },
                        color: BULLET_COLOR.to_string(),
                    });
                }
            }
            // A blank preformatted row only holds its line open.
            BoxKind::TextRun { word, .. } if word.is_empty() => {}
            BoxKind::TextRun { word, font, color } => {
                display_list.push(DisplayCommand::Text {
                    x: rect.x,
                    y: rect.y,
                    text: word.clone(),
                    font: font.clone(),
                    color: color.clone(),
                });
            }
            BoxKind::Replaced { text, font, color } => {
                self.paint_background(node, rect, display_list);
                display_list.push(DisplayCommand::Text {
                    x: rect.x,
                    y: rect.y,
                    text: text.clone(),
                    font: font.clone(),
                    color: color.clone(),
                });
                if self.focused == Some(node) {
                    display_list.push(DisplayCommand::Outline {
                        rect,
                        color: FOCUS_COLOR.to_string(),
                        thickness: 1,
                    });
                    let caret_x = rect.x + self.metrics.text_width(text, font) as i32;
                    display_list.push(DisplayCommand::Line {
                        x1: caret_x,
                        y1: rect.y,
                        x2: caret_x,
                        y2: rect.bottom(),
                        color: FOCUS_COLOR.to_string(),
                        thickness: 1,
                    });
                }
            }
        }

        for child in &layout_box.children {
            self.paint_box(child, display_list);
        }
    }

    fn paint_background(&self, node: NodeId, rect: Rect, display_list: &mut DisplayList) {
        if let Some(color) = background_of(self.styles.get(&node)) {
            display_list.push(DisplayCommand::FillRect { rect, color });
        }
    }
}
