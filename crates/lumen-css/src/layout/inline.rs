//! Inline mode: words and form controls flow into lines.

use lumen_common::warning::warn_once;
use lumen_dom::{NodeId, NodeType};

use super::{
    BoxKind, HIDDEN_ELEMENTS, INPUT_WIDTH, LINE_SPACING, LayoutBox, LayoutContext, Rect,
};
use crate::style::{FontDescriptor, color_of};

/// Line separator kept inside `pre` text.
const PREFORMATTED_NEWLINE: char = '\n';

/// A box placed on a line whose vertical position is not known yet.
struct PendingItem {
    kind: BoxKind,
    node: NodeId,
    /// Offset from the line's left edge.
    x: i32,
    width: i32,
    height: i32,
    ascent: f32,
    descent: f32,
}

struct PendingLine {
    node: NodeId,
    items: Vec<PendingItem>,
}

/// Greedy line breaker for one anonymous box.
struct LineBuilder<'c, 'a> {
    ctx: &'c LayoutContext<'a>,
    /// Available line width.
    width: i32,
    /// Horizontal cursor relative to the line's left edge.
    cursor_x: i32,
    /// Set after preformatted text; the next box starts a fresh line.
    break_pending: bool,
    lines: Vec<PendingLine>,
}

impl LineBuilder<'_, '_> {
    fn new_line(&mut self, node: NodeId) {
        self.cursor_x = 0;
        self.break_pending = false;
        self.lines.push(PendingLine {
            node,
            items: Vec::new(),
        });
    }

    fn recurse(&mut self, node: NodeId) {
        let tree = self.ctx.tree;
        let Some(content) = tree.get(node) else {
            return;
        };
        match &content.node_type {
            NodeType::Text(text) => self.text(node, text),
            NodeType::Element(data) => match data.tag_name.as_str() {
                "br" => self.new_line(node),
                "input" => {
                    let value = data.attr("value").unwrap_or_default().to_string();
                    self.replaced(node, value);
                }
                "button" => {
                    let label = self.button_label(node);
                    self.replaced(node, label);
                }
                tag if HIDDEN_ELEMENTS.contains(&tag) => {}
                _ => {
                    for &child in tree.children(node) {
                        self.recurse(child);
                    }
                }
            },
        }
    }

    /// A button shows its single text child; other content is not rendered.
    fn button_label(&self, node: NodeId) -> String {
        let tree = self.ctx.tree;
        if let [only] = tree.children(node)
            && let Some(text) = tree.as_text(*only)
        {
            return text.to_string();
        }
        if !tree.children(node).is_empty() {
            warn_once("Layout", "ignoring HTML contents inside button");
        }
        String::new()
    }

    fn text(&mut self, node: NodeId, text: &str) {
        if self.ctx.is_preformatted(node) {
            self.preformatted(node, text);
            return;
        }
        let font = self.ctx.font_for(node);
        let color = color_of(self.ctx.styles.get(&node));
        for word in text.split_whitespace() {
            let width = self.ctx.metrics.text_width(word, &font) as i32;
            let kind = BoxKind::TextRun {
                word: word.to_string(),
                font: font.clone(),
                color: color.clone(),
            };
            self.place(node, kind, width, &font);
        }
    }

    /// Text inside `pre`: one unwrapped row per source line, whitespace
    /// kept. The text starts on a line of its own and whatever follows it
    /// starts on the next one. A blank source line still takes up a row.
    fn preformatted(&mut self, node: NodeId, text: &str) {
        let font = self.ctx.font_for(node);
        let color = color_of(self.ctx.styles.get(&node));
        if self.line_has_content() {
            self.new_line(node);
        }
        for (index, row) in text.split(PREFORMATTED_NEWLINE).enumerate() {
            if index > 0 {
                self.new_line(node);
            }
            let width = self.ctx.metrics.text_width(row, &font) as i32;
            let kind = BoxKind::TextRun {
                word: row.to_string(),
                font: font.clone(),
                color: color.clone(),
            };
            self.push_item(node, kind, width, &font);
        }
        self.break_pending = true;
    }

    fn replaced(&mut self, node: NodeId, text: String) {
        let font = self.ctx.font_for(node);
        let kind = BoxKind::Replaced {
            text,
            font: font.clone(),
            color: color_of(self.ctx.styles.get(&node)),
        };
        self.place(node, kind, INPUT_WIDTH, &font);
    }

    /// Put a box at the cursor, starting a new line first if the current
    /// one already has content and either the box would overflow it or
    /// preformatted text came just before. A box wider than the whole line
    /// is placed alone and overflows.
    fn place(&mut self, node: NodeId, kind: BoxKind, width: i32, font: &FontDescriptor) {
        if self.line_has_content() && (self.break_pending || self.cursor_x + width > self.width) {
            self.new_line(node);
        }
        self.push_item(node, kind, width, font);
    }

    fn line_has_content(&self) -> bool {
        self.lines.last().is_some_and(|line| !line.items.is_empty())
    }

    /// Put a box at the cursor on the current line and advance past it.
    fn push_item(&mut self, node: NodeId, kind: BoxKind, width: i32, font: &FontDescriptor) {
        let metrics = self.ctx.metrics;
        let item = PendingItem {
            kind,
            node,
            x: self.cursor_x,
            width,
            height: metrics.line_height(font) as i32,
            ascent: metrics.ascent(font),
            descent: metrics.descent(font),
        };
        if let Some(line) = self.lines.last_mut() {
            line.items.push(item);
        }
        self.cursor_x += width + metrics.text_width(" ", font) as i32;
    }
}

/// Size a line and place its children vertically.
///
/// The baseline sits `1.25 × max ascent` below the line's top; each child's
/// top is the baseline minus its own ascent; the line is
/// `1.25 × (max ascent + max descent)` tall. An empty line has zero height.
fn finalize_line(line: PendingLine, x: i32, y: i32, width: i32) -> LayoutBox {
    let max_ascent = line.items.iter().map(|item| item.ascent).fold(0.0_f32, f32::max);
    let max_descent = line.items.iter().map(|item| item.descent).fold(0.0_f32, f32::max);
    let baseline = y + (LINE_SPACING * max_ascent) as i32;

    let children = line
        .items
        .into_iter()
        .map(|item| {
            assert!(
                item.ascent.is_finite() && item.descent.is_finite(),
                "line child without usable font metrics"
            );
            LayoutBox::leaf(
                item.kind,
                item.node,
                Rect {
                    x: x + item.x,
                    y: baseline - item.ascent as i32,
                    width: item.width,
                    height: item.height,
                },
            )
        })
        .collect();

    LayoutBox {
        kind: BoxKind::Line,
        node: line.node,
        rect: Rect {
            x,
            y,
            width,
            height: (LINE_SPACING * (max_ascent + max_descent)) as i32,
        },
        children,
    }
}

impl LayoutContext<'_> {
    /// Lay out a run of inline content in one anonymous box inside
    /// `container`, directly below `previous`.
    ///
    /// Words and controls are first placed horizontally into lines; each
    /// line is then sized from the metrics of everything on it and stacked
    /// below the previous line.
    ///
    /// # Panics
    ///
    /// Panics if `nodes` is empty; every run has at least one node.
    pub fn layout_anonymous(
        &self,
        nodes: &[NodeId],
        container: Rect,
        previous: Option<Rect>,
    ) -> LayoutBox {
        assert!(!nodes.is_empty(), "anonymous box needs at least one node");
        let mut rect = Rect {
            x: container.x,
            y: previous.map_or(container.y, |p| p.bottom()),
            width: container.width,
            height: 0,
        };

        let mut builder = LineBuilder {
            ctx: self,
            width: rect.width,
            cursor_x: 0,
            break_pending: false,
            lines: Vec::new(),
        };
        builder.new_line(nodes[0]);
        for &node in nodes {
            builder.recurse(node);
        }

        let mut children: Vec<LayoutBox> = Vec::with_capacity(builder.lines.len());
        let mut y = rect.y;
        for line in builder.lines {
            let line_box = finalize_line(line, rect.x, y, rect.width);
            y = line_box.rect.bottom();
            children.push(line_box);
        }
        rect.height = children.iter().map(|line| line.rect.height).sum();

        LayoutBox {
            kind: BoxKind::AnonymousInline,
            node: nodes[0],
            rect,
            children,
        }
    }
}
