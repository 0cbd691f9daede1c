//! Human-readable dumps of the element graph.

use std::fmt::Write;

use glint_core::NodeId;

use crate::tree::ElementTree;

/// Render the graph as an indented outline, one node per line with its
/// kind, id, and laid-out frame if any.
pub(crate) fn dump_tree(tree: &ElementTree) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root_id() {
        dump_node(tree, root, 0, &mut out);
    } else {
        out.push_str("(empty)\n");
    }
    out
}

fn dump_node(tree: &ElementTree, node: NodeId, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    let name = tree.kind_name_of(node).unwrap_or("<stale>");
    match tree.frame_of(node) {
        Some(frame) => {
            let _ = writeln!(
                out,
                "{name} {node} at ({}, {}) size ({}, {})",
                frame.origin.x, frame.origin.y, frame.size.width, frame.size.height
            );
        }
        None => {
            let _ = writeln!(out, "{name} {node}");
        }
    }
    for child in tree.children_of(node) {
        dump_node(tree, child, depth + 1, out);
    }
}
