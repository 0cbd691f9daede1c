//! Single-pass constraint layout.
//!
//! Each node type owns one rule: given the available space, measure the
//! subtree, store a frame, and return it. Rules preserve the position a
//! parent seeded into the node's frame and only decide sizes; parents move
//! finished subtrees afterwards with [`shift_position`].

mod leaf;
mod modifiers;
mod stack;

use glint_core::messages;
use glint_core::NodeId;
use glint_ui_layout::{Axis, Constraint, Frame, Point};

use crate::element::ElementKind;
use crate::tree::ElementTree;

/// Lay out `node` against `constraint`. The node must exist.
pub(crate) fn layout_node(tree: &ElementTree, node: NodeId, constraint: Constraint) {
    if !tree.is_live(node) {
        panic!("{}", messages::NODE_NOT_FOUND);
    }
    try_layout(tree, node, constraint);
}

/// Apply the node's layout rule, if it has one. Storage and spacer nodes
/// return `None`; spacers are resolved by their owning stack.
pub(crate) fn try_layout(tree: &ElementTree, node: NodeId, constraint: Constraint) -> Option<Frame> {
    let kind = tree.kind_of(node)?;
    match kind {
        ElementKind::Spacer | ElementKind::Storage => None,
        ElementKind::Text { content, font_size } => {
            Some(leaf::layout_text(tree, node, &content, font_size, constraint))
        }
        ElementKind::Image { size, .. } => Some(leaf::layout_image(tree, node, size)),
        ElementKind::GeometryReader { content } => {
            Some(leaf::layout_geometry_reader(tree, node, &content, constraint))
        }
        ElementKind::Margin { insets } => {
            Some(modifiers::layout_margin(tree, node, insets, constraint))
        }
        ElementKind::SizedFrame { width, height } => {
            Some(modifiers::layout_sized_frame(tree, node, width, height, constraint))
        }
        ElementKind::FractionalFrame {
            width_percent,
            height_percent,
        } => Some(modifiers::layout_fractional_frame(
            tree,
            node,
            width_percent,
            height_percent,
            constraint,
        )),
        ElementKind::DecorationBox { .. }
        | ElementKind::TapCapture { .. }
        | ElementKind::Navigation => Some(modifiers::layout_pass_through(tree, node, constraint)),
        ElementKind::Composite => Some(modifiers::layout_composite(tree, node, constraint)),
        ElementKind::HStack { alignment, spacing } => Some(stack::layout_stack(
            tree,
            node,
            Axis::Horizontal,
            alignment,
            spacing,
            constraint,
        )),
        ElementKind::VStack { alignment, spacing } => Some(stack::layout_stack(
            tree,
            node,
            Axis::Vertical,
            alignment,
            spacing,
            constraint,
        )),
    }
}

/// Position the node keeps while its rule decides the size.
pub(crate) fn origin_of(tree: &ElementTree, node: NodeId) -> Point {
    tree.frame_of(node).map(|frame| frame.origin).unwrap_or(Point::ZERO)
}

pub(crate) fn require_single_child(tree: &ElementTree, node: NodeId) -> NodeId {
    match tree.single_child_of(node) {
        Some(child) => child,
        None => panic!("{}", messages::SINGLE_CHILD_EXPECTED),
    }
}

pub(crate) fn must_measure(frame: Option<Frame>) -> Frame {
    match frame {
        Some(frame) => frame,
        None => panic!("{}", messages::CHILD_NOT_MEASURED),
    }
}

/// Translate a finished subtree. Geometry readers absorb the shift: their
/// own frame moves, but their resolved content is re-positioned on its
/// next layout instead.
pub(crate) fn shift_position(tree: &ElementTree, node: NodeId, dx: f32, dy: f32) {
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    if let Some(mut frame) = tree.frame_of(node) {
        frame.origin.x += dx;
        frame.origin.y += dy;
        tree.set_frame(node, frame);
    }
    let stops = tree
        .kind_of(node)
        .map_or(false, |kind| kind.stops_shift_propagation());
    if stops {
        return;
    }
    for child in tree.children_of(node) {
        shift_position(tree, child, dx, dy);
    }
}

/// Walk up to the node a re-layout must start from: the nearest
/// non-propagating node, the starting node included, or the root.
pub(crate) fn find_layout_boundary(tree: &ElementTree, node: NodeId) -> NodeId {
    let mut current = node;
    loop {
        if let Some(kind) = tree.kind_of(current) {
            if kind.has_layout_rule() && !kind.propagates_layout_to_parent() {
                return current;
            }
        }
        match tree.parent_of(current) {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}
