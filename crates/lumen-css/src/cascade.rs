//! Style resolution.
//!
//! The cascade produces a [`StyleTable`] separate from the content tree, with
//! one entry for every node (text nodes included, so layout can read the
//! font of a text run directly).

use std::collections::HashMap;

use lumen_dom::{DomTree, NodeId};

use crate::parser::{Rule, parse_declarations};
use crate::style::{StyleMap, parse_px};

/// Resolved style for every node of a tree.
pub type StyleTable = HashMap<NodeId, StyleMap>;

/// Properties copied from the parent before any rule applies, with the
/// values the root starts from.
pub const INHERITED_PROPERTIES: [(&str, &str); 4] = [
    ("font-size", "16px"),
    ("font-style", "normal"),
    ("font-weight", "normal"),
    ("color", "black"),
];

/// Default `font-size`, used to resolve a percentage on the root.
const ROOT_FONT_SIZE: &str = "16px";

/// Stable sort by ascending specificity. Rules of equal specificity keep
/// their relative order, so the later one still wins.
pub fn sort_by_specificity(rules: &mut [Rule]) {
    rules.sort_by_key(|rule| rule.selector.specificity());
}

/// Resolve the style of every node in `tree`.
///
/// # Algorithm
///
/// Nodes are visited in pre-order so a parent is always resolved before
/// its children. For each node:
///
/// STEP 1: Seed the inherited properties from the parent's resolved values,
///         or the defaults at the root.
///
/// STEP 2: Apply every matching rule in ascending specificity order; later
///         declarations overwrite earlier ones.
///
/// STEP 3: Apply the inline `style` attribute, which always wins.
///
/// STEP 4: Rewrite a percentage `font-size` to pixels against the parent's
///         resolved size.
///
/// `rules` may be in any order; they are stably sorted here. Passing rules
/// already sorted with [`sort_by_specificity`] gives the same result.
#[must_use]
pub fn compute_styles(tree: &DomTree, rules: &[Rule]) -> StyleTable {
    let mut ordered: Vec<&Rule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.selector.specificity());

    let mut styles = StyleTable::with_capacity(tree.len());
    for id in tree.iter_all() {
        let parent_style = tree.parent(id).and_then(|parent| styles.get(&parent));
        let style = compute_node_style(tree, id, &ordered, parent_style);
        let _ = styles.insert(id, style);
    }
    log::debug!(target: "lumen::css", "resolved styles for {} nodes", styles.len());
    styles
}

fn compute_node_style(
    tree: &DomTree,
    id: NodeId,
    rules: &[&Rule],
    parent_style: Option<&StyleMap>,
) -> StyleMap {
    // STEP 1: Inheritance.
    let mut style: StyleMap = INHERITED_PROPERTIES
        .iter()
        .map(|&(property, default)| {
            let value = parent_style
                .and_then(|parent| parent.get(property))
                .map_or(default, String::as_str);
            (property.to_string(), value.to_string())
        })
        .collect();

    // STEP 2: Matching rules, lowest specificity first.
    for rule in rules.iter().filter(|rule| rule.selector.matches(tree, id)) {
        style.extend(rule.declarations.clone());
    }

    // STEP 3: Inline style.
    if let Some(inline) = tree.as_element(id).and_then(|element| element.attr("style")) {
        style.extend(parse_declarations(inline));
    }

    // STEP 4: Percentage font sizes.
    let parent_size = parent_style
        .and_then(|parent| parent.get("font-size"))
        .map_or(ROOT_FONT_SIZE, String::as_str);
    if let Some(size) = style.get_mut("font-size")
        && size.ends_with('%')
    {
        *size = resolve_percentage(size, parent_size);
    }

    style
}

/// Resolve `percent` (e.g. `50%`) against `parent` (e.g. `20px`). If either
/// cannot be read the parent's value is kept as-is.
fn resolve_percentage(percent: &str, parent: &str) -> String {
    let ratio = percent.trim_end_matches('%').trim().parse::<f64>().ok();
    match (ratio, parse_px(parent)) {
        (Some(ratio), Some(parent_px)) if ratio.is_finite() && ratio >= 0.0 => {
            let px = f64::from(parent_px) * ratio / 100.0;
            format!("{px}px")
        }
        _ => {
            log::debug!(
                target: "lumen::css",
                "cannot resolve font-size {percent} against {parent}; inheriting"
            );
            parent.to_string()
        }
    }
}
