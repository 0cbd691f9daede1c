use glint_core::NodeId;
use glint_ui_layout::{Constraint, Frame, Size};

use crate::builder;
use crate::element::GeometryContent;
use crate::layout::{must_measure, origin_of, shift_position, try_layout};
use crate::tree::ElementTree;

/// Text takes its unbounded single-line width when it fits, otherwise
/// wraps to the constraint's width.
pub(super) fn layout_text(
    tree: &ElementTree,
    node: NodeId,
    content: &str,
    font_size: f32,
    constraint: Constraint,
) -> Frame {
    let origin = origin_of(tree, node);
    let metrics = tree.text_metrics();
    let unbounded = metrics.unbounded_width(content, font_size, constraint.height);
    let size = if unbounded <= constraint.width {
        Size::new(
            unbounded,
            metrics.height_for_width(content, font_size, unbounded),
        )
    } else {
        Size::new(
            constraint.width,
            metrics.height_for_width(content, font_size, constraint.width),
        )
    };
    let frame = Frame::new(origin, size);
    tree.set_frame(node, frame);
    frame
}

/// Images ignore the constraint entirely and take their declared size.
pub(super) fn layout_image(tree: &ElementTree, node: NodeId, size: Size) -> Frame {
    let frame = Frame::new(origin_of(tree, node), size);
    tree.set_frame(node, frame);
    frame
}

/// Resolve a geometry reader: drop the previous generation of its
/// content, build a fresh one against the now-known constraint, and size
/// to the content's width at the constraint's full height.
pub(super) fn layout_geometry_reader(
    tree: &ElementTree,
    node: NodeId,
    content: &GeometryContent,
    constraint: Constraint,
) -> Frame {
    let origin = origin_of(tree, node);

    let mut unmounted = Vec::new();
    tree.with_inner_mut(|inner| {
        for child in inner.children_of(node) {
            inner.unlink_child(node, child);
            inner.remove_subtree(child, &mut unmounted);
        }
    });
    for composite in unmounted {
        composite.did_unmount();
    }

    let view = (**content)(constraint);
    let child = builder::build_view(tree, &view);
    tree.link(node, child);
    tree.emit_pending_mounts();

    let child_frame = must_measure(try_layout(tree, child, constraint));
    let frame = Frame::new(origin, Size::new(child_frame.size.width, constraint.height));
    tree.set_frame(node, frame);
    shift_position(
        tree,
        child,
        origin.x - child_frame.origin.x,
        origin.y - child_frame.origin.y,
    );
    frame
}
