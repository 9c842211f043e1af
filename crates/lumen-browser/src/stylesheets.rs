//! Collecting the stylesheets a document refers to.

use lumen_dom::{DomTree, ElementData, NodeType};

/// Where a page stylesheet comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetSource {
    /// `<link rel="stylesheet" href="...">`, with the href as written.
    Link {
        /// Unresolved `href` attribute.
        href: String,
    },
    /// The text of a `<style>` element.
    Inline {
        /// Stylesheet text.
        text: String,
    },
}

/// Collect the page stylesheets of `tree` in document order.
///
/// Links without a usable `href` are ignored.
#[must_use]
pub fn collect_stylesheet_sources(tree: &DomTree) -> Vec<StylesheetSource> {
    tree.iter_all()
        .filter_map(|id| {
            let node = tree.get(id)?;
            let NodeType::Element(data) = &node.node_type else {
                return None;
            };
            match data.tag_name.as_str() {
                "link" if is_stylesheet_link(data) => {
                    let href = data.attr("href")?.trim();
                    (!href.is_empty()).then(|| StylesheetSource::Link {
                        href: href.to_string(),
                    })
                }
                "style" => Some(StylesheetSource::Inline {
                    text: tree.text_content(id),
                }),
                _ => None,
            }
        })
        .collect()
}

/// True if the `rel` attribute contains the token `stylesheet`.
fn is_stylesheet_link(data: &ElementData) -> bool {
    data.attr("rel").is_some_and(|rel| {
        rel.split_ascii_whitespace()
            .any(|token| token.eq_ignore_ascii_case("stylesheet"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(html: &str) -> Vec<StylesheetSource> {
        collect_stylesheet_sources(&lumen_html::parse(html))
    }

    #[test]
    fn test_sources_in_document_order() {
        let found = sources(
            r#"<html><head><link rel="stylesheet" href="a.css"><style>p { color: red }</style></head>
            <body><link rel="stylesheet" href="b.css"></body></html>"#,
        );
        assert_eq!(
            found,
            [
                StylesheetSource::Link {
                    href: "a.css".to_string()
                },
                StylesheetSource::Inline {
                    text: "p { color: red }".to_string()
                },
                StylesheetSource::Link {
                    href: "b.css".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_rel_token_list() {
        let found = sources(r#"<head><link rel="alternate StyleSheet" href="alt.css"></head>"#);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_non_stylesheet_links_are_ignored() {
        assert!(sources(r#"<head><link rel="icon" href="favicon.ico"></head>"#).is_empty());
        assert!(sources(r#"<head><link rel="stylesheet"></head>"#).is_empty());
        assert!(sources(r#"<head><link href="x.css"></head>"#).is_empty());
    }
}
