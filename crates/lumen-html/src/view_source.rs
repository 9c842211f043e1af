use lumen_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::scanner::TokenSink;

/// Builds the display tree for a `view-source:` page.
///
/// Every non-blank text run becomes `<b>text</b>` and every tag becomes a
/// text node showing the tag as written, all as direct children of an
/// `html` root.
#[derive(Debug)]
pub struct ViewSourceBuilder {
    tree: DomTree,
}

impl Default for ViewSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSourceBuilder {
    /// Create a builder with an empty `html` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: DomTree::with_root_element("html"),
        }
    }

    /// Return the finished tree.
    #[must_use]
    pub fn finish(self) -> DomTree {
        self.tree
    }
}

impl TokenSink for ViewSourceBuilder {
    fn text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let bold = self
            .tree
            .append_new(NodeId::ROOT, NodeType::Element(ElementData::new("b")));
        let _ = self.tree.append_new(bold, NodeType::Text(text.to_string()));
    }

    fn tag(&mut self, raw: &str) {
        let _ = self
            .tree
            .append_new(NodeId::ROOT, NodeType::Text(format!("<{raw}>")));
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_view_source;
    use lumen_dom::NodeId;

    #[test]
    fn test_alternating_tags_and_bold_text() {
        let tree = parse_view_source("<!doctype html><p class=x>Hi</p>");
        let kids = tree.children(NodeId::ROOT);
        assert_eq!(kids.len(), 4);
        assert_eq!(tree.as_text(kids[0]), Some("<!doctype html>"));
        assert_eq!(tree.as_text(kids[1]), Some("<p class=x>"));
        assert!(tree.is_element_named(kids[2], "b"));
        assert_eq!(tree.text_content(kids[2]), "Hi");
        assert_eq!(tree.as_text(kids[3]), Some("</p>"));
    }

    #[test]
    fn test_blank_text_is_skipped() {
        let tree = parse_view_source("<a>\n  <b>");
        assert_eq!(tree.children(NodeId::ROOT).len(), 2);
    }
}
