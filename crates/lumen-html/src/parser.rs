//! Tree construction.
//!
//! The builder keeps a stack of unfinished elements. An element is attached
//! to the current stack top as soon as it opens, so children always appear in
//! document order, and a closing tag only pops the stack.

use lumen_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::scanner::TokenSink;
use crate::tag::TagParser;

/// Void elements: appended as leaves, never pushed on the open stack.
pub const SELF_CLOSING_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Root element created when markup has text before any tag, or no tags.
const IMPLICIT_ROOT: &str = "html";

/// Builds a [`DomTree`] from scanner output.
///
/// # Example
///
/// ```
/// use lumen_html::{HtmlParser, scan};
///
/// let mut parser = HtmlParser::new();
/// scan("<p>Hello</p>", &mut parser);
/// let tree = parser.finish();
/// assert_eq!(tree.tag_name(tree.root()), Some("p"));
/// ```
#[derive(Debug, Default)]
pub struct HtmlParser {
    /// Created lazily: the first opened element becomes the root.
    tree: Option<DomTree>,
    /// The stack of open elements; `ROOT` is always at the bottom once the
    /// tree exists.
    unfinished: Vec<NodeId>,
}

impl HtmlParser {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwind the remaining open elements and return the tree.
    ///
    /// Elements are attached when opened, so unwinding is just a matter of
    /// dropping the stack.
    #[must_use]
    pub fn finish(mut self) -> DomTree {
        if self.unfinished.len() > 1 {
            log::debug!(
                target: "lumen::html",
                "closing {} unclosed element(s) at end of input",
                self.unfinished.len() - 1
            );
        }
        self.unfinished.clear();
        self.tree
            .unwrap_or_else(|| DomTree::with_root_element(IMPLICIT_ROOT))
    }

    /// The current stack top, creating an implicit root if nothing is open yet.
    fn current_parent(&mut self) -> (&mut DomTree, NodeId) {
        let tree = self.tree.get_or_insert_with(|| {
            log::debug!(target: "lumen::html", "content before any tag; adding implicit <{IMPLICIT_ROOT}>");
            DomTree::with_root_element(IMPLICIT_ROOT)
        });
        if self.unfinished.is_empty() {
            self.unfinished.push(NodeId::ROOT);
        }
        let parent = self.unfinished.last().copied().unwrap_or(NodeId::ROOT);
        (tree, parent)
    }

    fn open_element(&mut self, data: ElementData) {
        if self.tree.is_none() {
            self.tree = Some(DomTree::new(NodeType::Element(data)));
            self.unfinished.push(NodeId::ROOT);
            return;
        }
        let (tree, parent) = self.current_parent();
        let id = tree.append_new(parent, NodeType::Element(data));
        self.unfinished.push(id);
    }

    fn close_element(&mut self) {
        // The root is never popped.
        if self.unfinished.len() > 1 {
            let _ = self.unfinished.pop();
        }
    }
}

impl TokenSink for HtmlParser {
    fn text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let (tree, parent) = self.current_parent();
        let _ = tree.append_new(parent, NodeType::Text(text.to_string()));
    }

    fn tag(&mut self, raw: &str) {
        if raw.starts_with('!') {
            return;
        }
        let tag = match TagParser::new(raw).tag() {
            Ok(tag) => tag,
            Err(err) => {
                log::debug!(target: "lumen::html", "ignoring malformed tag '<{raw}>': {err}");
                return;
            }
        };

        if tag.closing {
            self.close_element();
        } else if SELF_CLOSING_TAGS.contains(&tag.name.as_str()) {
            let (tree, parent) = self.current_parent();
            let _ = tree.append_new(
                parent,
                NodeType::Element(ElementData::with_attrs(&tag.name, tag.attrs)),
            );
        } else {
            self.open_element(ElementData::with_attrs(&tag.name, tag.attrs));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_first_element_is_root() {
        let tree = parse("<html><body></body></html>");
        assert_eq!(tree.tag_name(NodeId::ROOT), Some("html"));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_closing_the_root_is_a_no_op() {
        let tree = parse("<p>a</p><p>b</p>");
        // The second paragraph lands under the first, which stays open.
        assert_eq!(tree.tag_name(NodeId::ROOT), Some("p"));
        let children = tree.children(NodeId::ROOT);
        assert_eq!(children.len(), 2);
        assert_eq!(tree.as_text(children[0]), Some("a"));
        assert_eq!(tree.tag_name(children[1]), Some("p"));
    }

    #[test]
    fn test_text_before_any_tag_gets_implicit_root() {
        let tree = parse("hello <b>there</b>");
        assert_eq!(tree.tag_name(NodeId::ROOT), Some("html"));
        assert_eq!(tree.as_text(tree.children(NodeId::ROOT)[0]), Some("hello "));
    }

    #[test]
    fn test_empty_document() {
        let tree = parse("");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.tag_name(NodeId::ROOT), Some("html"));
    }

    #[test]
    fn test_self_closing_tags_are_leaves() {
        let tree = parse("<p>a<br>b<img src=x.png>c</p>");
        let kids = tree.children(NodeId::ROOT);
        assert_eq!(kids.len(), 5);
        assert!(tree.is_element_named(kids[1], "br"));
        assert!(tree.children(kids[1]).is_empty());
        assert_eq!(tree.as_element(kids[3]).unwrap().attr("src"), Some("x.png"));
        assert_eq!(tree.as_text(kids[4]), Some("c"));
    }
}
