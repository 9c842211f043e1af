//! Mapping points back to content.
//!
//! Coordinates are in document space: a consumer that scrolls adds its
//! scroll offset before asking.

use lumen_common::url::resolve_url;
use lumen_css::{BoxKind, LayoutBox};
use lumen_dom::{DomTree, NodeId};
use url::form_urlencoded;

/// What activating a point on the page would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Follow a link to this absolute URL.
    Link(String),
    /// Focus this text input.
    Input(NodeId),
    /// Submit `form` to its absolute `action` URL.
    Submit {
        /// The `form` element enclosing the pressed button.
        form: NodeId,
        /// Resolved `action` attribute.
        action: String,
    },
}

/// The content node of the last box, in box-tree pre-order, whose bounds
/// contain the point.
///
/// Line and anonymous boxes are skipped: their node is only the content
/// that opened them, so empty space beside a line's words resolves to the
/// enclosing block.
#[must_use]
pub fn node_at(layout: &LayoutBox, x: i32, y: i32) -> Option<NodeId> {
    layout
        .flatten()
        .into_iter()
        .rev()
        .filter(|layout_box| !matches!(layout_box.kind, BoxKind::Line | BoxKind::AnonymousInline))
        .find(|layout_box| layout_box.rect.contains(x, y))
        .map(|layout_box| layout_box.node)
}

/// Classify the nearest actionable element at or above `node`.
///
/// Walks from `node` through its ancestors:
/// - `a` with an `href` is a link, resolved against `base_url`
/// - `input` is an input to focus
/// - `button` inside a `form` with an `action` is a submission
///
/// A button outside such a form does nothing itself; the walk continues
/// past it.
#[must_use]
pub fn actionable(tree: &DomTree, node: NodeId, base_url: Option<&str>) -> Option<Action> {
    std::iter::once(node)
        .chain(tree.ancestors(node))
        .find_map(|id| {
            let element = tree.as_element(id)?;
            match element.tag_name.as_str() {
                "a" => element
                    .attr("href")
                    .map(|href| Action::Link(resolve_url(href, base_url))),
                "input" => Some(Action::Input(id)),
                "button" => enclosing_form(tree, id).and_then(|form| {
                    let action = tree.as_element(form)?.attr("action")?;
                    Some(Action::Submit {
                        form,
                        action: resolve_url(action, base_url),
                    })
                }),
                _ => None,
            }
        })
}

fn enclosing_form(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    tree.ancestors(id).find(|&ancestor| tree.is_element_named(ancestor, "form"))
}

/// Encode the named `input` descendants of `form` as
/// `application/x-www-form-urlencoded` pairs, in document order.
#[must_use]
pub fn form_data(tree: &DomTree, form: NodeId) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for id in tree.descendants(form) {
        if let Some(element) = tree.as_element(id)
            && element.tag_name == "input"
            && let Some(name) = element.attr("name")
        {
            let _ = serializer.append_pair(name, element.attr("value").unwrap_or_default());
        }
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_css::{ApproximateFontMetrics, compute_styles, layout_document, ua_rules};

    fn layout(tree: &DomTree) -> LayoutBox {
        let styles = compute_styles(tree, ua_rules());
        layout_document(tree, &styles, 800, &ApproximateFontMetrics)
    }

    #[test]
    fn test_form_data_escapes_reserved_characters() {
        let tree = lumen_html::parse(
            r#"<form action="/add"><input name="a b" value="x&y=z"><input name="city" value="Zürich"></form>"#,
        );
        assert_eq!(form_data(&tree, tree.root()), "a+b=x%26y%3Dz&city=Z%C3%BCrich");
    }

    #[test]
    fn test_word_hit_resolves_to_text() {
        let tree = lumen_html::parse(r#"<div><a href="x.html">go</a></div>"#);
        let a = tree.find_element("a").unwrap();
        let text = tree.children(a)[0];
        assert_eq!(node_at(&layout(&tree), 20, 30), Some(text));
    }

    #[test]
    fn test_space_beside_words_hits_enclosing_block() {
        // The line is opened by the link, but only "go" belongs to it.
        let tree = lumen_html::parse(r#"<div><a href="x.html">go</a></div>"#);
        let hit = node_at(&layout(&tree), 400, 30);
        assert_eq!(hit, Some(tree.root()));
        assert_eq!(actionable(&tree, tree.root(), None), None);
    }

    #[test]
    fn test_form_data() {
        let tree = lumen_html::parse(
            r#"<form action="/add"><input name="q" value="two words"><input value="unnamed"><input name="empty"></form>"#,
        );
        assert_eq!(form_data(&tree, tree.root()), "q=two+words&empty=");
    }

    #[test]
    fn test_actionable_link() {
        let tree = lumen_html::parse(r#"<div><a href="next.html"><b>go</b></a></div>"#);
        let b = tree.find_element("b").unwrap();
        assert_eq!(
            actionable(&tree, b, Some("http://a.org/dir/index.html")),
            Some(Action::Link("http://a.org/dir/next.html".to_string()))
        );
    }

    #[test]
    fn test_anchor_without_href_is_inert() {
        let tree = lumen_html::parse("<div><a>plain</a></div>");
        let a = tree.find_element("a").unwrap();
        assert_eq!(actionable(&tree, a, None), None);
    }

    #[test]
    fn test_button_submits_enclosing_form() {
        let tree = lumen_html::parse(
            r#"<form action="/submit"><p><button>Send</button></p></form>"#,
        );
        let button = tree.find_element("button").unwrap();
        assert_eq!(
            actionable(&tree, button, Some("http://a.org/page")),
            Some(Action::Submit {
                form: tree.root(),
                action: "http://a.org/submit".to_string()
            })
        );
    }

    #[test]
    fn test_button_without_form() {
        let tree = lumen_html::parse("<div><button>Send</button></div>");
        let button = tree.find_element("button").unwrap();
        assert_eq!(actionable(&tree, button, None), None);
    }
}
