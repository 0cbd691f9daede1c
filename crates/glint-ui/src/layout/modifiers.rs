use glint_core::NodeId;
use glint_ui_layout::{Constraint, EdgeInsets, Frame, Size};

use crate::layout::{must_measure, origin_of, require_single_child, shift_position, try_layout};
use crate::tree::ElementTree;

/// Margin insets the child and reports the child's size plus the insets.
///
/// The child's constraint loses the horizontal insets but gains the
/// vertical ones; the asymmetry is long-standing observable behavior and
/// is kept as-is.
pub(super) fn layout_margin(
    tree: &ElementTree,
    node: NodeId,
    insets: EdgeInsets,
    constraint: Constraint,
) -> Frame {
    let origin = origin_of(tree, node);
    let child = require_single_child(tree, node);
    let inner = Constraint::new(
        constraint.width - insets.horizontal(),
        constraint.height + insets.vertical(),
    );
    let child_frame = must_measure(try_layout(tree, child, inner));
    shift_position(
        tree,
        child,
        origin.x - child_frame.origin.x + insets.left,
        origin.y - child_frame.origin.y + insets.top,
    );
    let frame = Frame::new(
        origin,
        Size::new(
            child_frame.size.width + insets.horizontal(),
            child_frame.size.height + insets.vertical(),
        ),
    );
    tree.set_frame(node, frame);
    frame
}

/// Fixed frame: explicit extents replace the constraint on their axis,
/// the child's measurement fills in whichever extent is absent, and the
/// child then adopts the resulting frame wholesale.
pub(super) fn layout_sized_frame(
    tree: &ElementTree,
    node: NodeId,
    width: Option<f32>,
    height: Option<f32>,
    constraint: Constraint,
) -> Frame {
    let origin = origin_of(tree, node);
    let child = require_single_child(tree, node);
    let inner = Constraint::new(
        width.unwrap_or(constraint.width),
        height.unwrap_or(constraint.height),
    );
    let child_frame = must_measure(try_layout(tree, child, inner));
    let frame = Frame::new(
        origin,
        Size::new(
            width.unwrap_or(child_frame.size.width),
            height.unwrap_or(child_frame.size.height),
        ),
    );
    tree.set_frame(node, frame);
    tree.set_frame(child, frame);
    frame
}

/// Percentage frame: extents are percentages (0..=100) of the incoming
/// constraint, applied the same way as a fixed frame.
pub(super) fn layout_fractional_frame(
    tree: &ElementTree,
    node: NodeId,
    width_percent: f32,
    height_percent: f32,
    constraint: Constraint,
) -> Frame {
    let origin = origin_of(tree, node);
    let child = require_single_child(tree, node);
    let size = Size::new(
        constraint.width * width_percent / 100.0,
        constraint.height * height_percent / 100.0,
    );
    must_measure(try_layout(tree, child, Constraint::from_size(size)));
    let frame = Frame::new(origin, size);
    tree.set_frame(node, frame);
    tree.set_frame(child, frame);
    frame
}

/// Decoration boxes, tap captures, and navigation hosts are transparent
/// to layout: they adopt their child's frame outright.
pub(super) fn layout_pass_through(
    tree: &ElementTree,
    node: NodeId,
    constraint: Constraint,
) -> Frame {
    let child = require_single_child(tree, node);
    let frame = must_measure(try_layout(tree, child, constraint));
    tree.set_frame(node, frame);
    frame
}

/// A composite sizes to its body but keeps its own position, pulling the
/// body underneath itself.
pub(super) fn layout_composite(tree: &ElementTree, node: NodeId, constraint: Constraint) -> Frame {
    let origin = origin_of(tree, node);
    let child = require_single_child(tree, node);
    let child_frame = must_measure(try_layout(tree, child, constraint));
    let frame = Frame::new(origin, child_frame.size);
    tree.set_frame(node, frame);
    shift_position(
        tree,
        child,
        origin.x - child_frame.origin.x,
        origin.y - child_frame.origin.y,
    );
    frame
}
