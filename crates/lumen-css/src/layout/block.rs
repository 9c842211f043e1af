//! Block mode.

use lumen_dom::{DomTree, NodeId};

use super::{
    BoxKind, HIDDEN_ELEMENTS, LIST_INDENT, LayoutBox, LayoutContext, LayoutMode, Rect, VSTEP,
    is_block_element, layout_mode,
};

/// A maximal run of a block's children laid out together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildGroup {
    /// Consecutive non-block children, laid out in one anonymous box.
    Inline(Vec<NodeId>),
    /// A single block-level child.
    Block(NodeId),
}

/// Partition the children of `id`, splitting at each block-level child.
#[must_use]
pub fn group_children(tree: &DomTree, id: NodeId) -> Vec<ChildGroup> {
    let mut groups = Vec::new();
    let mut run = Vec::new();
    for &child in tree.children(id) {
        if is_block_element(tree, child) {
            if !run.is_empty() {
                groups.push(ChildGroup::Inline(std::mem::take(&mut run)));
            }
            groups.push(ChildGroup::Block(child));
        } else {
            run.push(child);
        }
    }
    if !run.is_empty() {
        groups.push(ChildGroup::Inline(run));
    }
    groups
}

impl LayoutContext<'_> {
    /// Lay out the block box of `node` inside `container`, directly below
    /// `previous` (or at the container's top for a first child).
    ///
    /// # Algorithm
    ///
    /// STEP 1: Take `x` and `width` from the container; chain `y`.
    ///
    /// STEP 2: Hidden elements stop here with zero height. List items are
    ///         indented.
    ///
    /// STEP 3: In block mode, lay out each child group in order, each below
    ///         the previous one. In inline mode, lay out the node itself in a
    ///         single anonymous box.
    ///
    /// STEP 4: Height is the sum of the children's heights, plus a fixed
    ///         step below paragraphs.
    pub fn layout_block(&self, node: NodeId, container: Rect, previous: Option<Rect>) -> LayoutBox {
        // STEP 1
        let mut rect = Rect {
            x: container.x,
            y: previous.map_or(container.y, |p| p.bottom()),
            width: container.width,
            height: 0,
        };

        // STEP 2
        let tag = self.tree.tag_name(node);
        if tag.is_some_and(|tag| HIDDEN_ELEMENTS.contains(&tag)) {
            return LayoutBox::leaf(BoxKind::Block, node, rect);
        }
        if tag == Some("li") {
            rect.x += LIST_INDENT;
            rect.width = (rect.width - LIST_INDENT).max(0);
        }

        // STEP 3
        let mut children: Vec<LayoutBox> = Vec::new();
        match layout_mode(self.tree, node) {
            LayoutMode::Block => {
                for group in group_children(self.tree, node) {
                    let previous = children.last().map(|child| child.rect);
                    let child = match group {
                        ChildGroup::Inline(nodes) => self.layout_anonymous(&nodes, rect, previous),
                        ChildGroup::Block(child) => self.layout_block(child, rect, previous),
                    };
                    children.push(child);
                }
            }
            LayoutMode::Inline => children.push(self.layout_anonymous(&[node], rect, None)),
        }

        // STEP 4
        rect.height = children.iter().map(|child| child.rect.height).sum();
        if tag == Some("p") {
            rect.height += VSTEP;
        }

        LayoutBox {
            kind: BoxKind::Block,
            node,
            rect,
            children,
        }
    }
}
