use std::collections::BTreeMap;
use std::fmt::Write;

use lumen_dom::{DomTree, NodeId, NodeType};

/// Print the subtree at `id` to stdout, indented two spaces per level.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    print!("{}", format_tree(tree, id, indent));
}

/// Render the subtree at `id` the way [`print_tree`] prints it.
///
/// Attributes are sorted by name so the output is deterministic. Spaces in
/// text are shown as `·` and newlines as `\n`.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId, indent: usize) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, id, indent);
    out
}

fn write_node(out: &mut String, tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Element(data) => {
            if data.attrs.is_empty() {
                let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
            } else {
                let sorted: BTreeMap<_, _> = data.attrs.iter().collect();
                let attrs: Vec<String> = sorted
                    .into_iter()
                    .map(|(k, v)| format!("{k}=\"{v}\""))
                    .collect();
                let _ = writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "));
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            let _ = writeln!(out, "{prefix}\"{display}\"");
        }
    }
    for &child_id in tree.children(id) {
        write_node(out, tree, child_id, indent + 1);
    }
}
