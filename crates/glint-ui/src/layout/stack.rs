use smallvec::SmallVec;

use glint_core::messages;
use glint_core::NodeId;
use glint_ui_layout::{Axis, Constraint, Frame, StackAlignment};

use crate::element::ElementKind;
use crate::layout::{origin_of, shift_position, try_layout};
use crate::tree::ElementTree;

/// Shared rule for both stack directions.
///
/// Children are measured in order, each against the space the previous
/// ones left over; the allocation is deliberately order-dependent, and a
/// late child can be offered negative space. Spacers take no space during
/// measurement and then split whatever main-axis room remains, evenly and
/// unclamped.
pub(super) fn layout_stack(
    tree: &ElementTree,
    node: NodeId,
    axis: Axis,
    alignment: StackAlignment,
    spacing: f32,
    constraint: Constraint,
) -> Frame {
    let storage = match tree.single_child_of(node) {
        Some(storage) => storage,
        None => panic!("{}", messages::STACK_WITHOUT_STORAGE),
    };
    let children = tree.children_of(storage);
    if children.is_empty() {
        panic!("{}", messages::STACK_WITHOUT_CHILDREN);
    }

    let origin = origin_of(tree, node);
    let self_main = axis.main_point(origin);
    let self_cross = axis.cross_point(origin);

    let mut spacer_slots: SmallVec<[NodeId; 4]> = SmallVec::new();
    let mut main_offset = 0.0_f32;
    let mut max_cross = 0.0_f32;
    let mut measured_any = false;

    for &child in &children {
        if matches!(tree.kind_of(child), Some(ElementKind::Spacer)) {
            spacer_slots.push(child);
            continue;
        }
        if measured_any {
            main_offset += spacing;
        }
        tree.set_frame(
            child,
            Frame::zero_sized(axis.pack_point(self_main + main_offset, self_cross)),
        );
        let remaining = axis.shrink_main(constraint, main_offset);
        if let Some(frame) = try_layout(tree, child, remaining) {
            max_cross = max_cross.max(axis.cross(frame.size));
            main_offset += axis.main(frame.size);
            measured_any = true;
        }
    }

    let leftover = axis.main(constraint.size()) - main_offset;
    let spacer_extent = if spacer_slots.is_empty() {
        0.0
    } else {
        leftover / spacer_slots.len() as f32
    };

    // Second pass places everything in order from the stack's own origin,
    // now that spacer extents and the cross extent are known.
    let mut cursor = self_main;
    let mut placed_any = false;
    for &child in &children {
        if matches!(tree.kind_of(child), Some(ElementKind::Spacer)) {
            tree.set_frame(
                child,
                Frame::new(
                    axis.pack_point(cursor, self_cross),
                    axis.pack(spacer_extent, 0.0),
                ),
            );
            cursor += spacer_extent;
            continue;
        }
        let Some(frame) = tree.frame_of(child) else {
            continue;
        };
        if placed_any {
            cursor += spacing;
        }
        let cross = self_cross + alignment.offset(max_cross, axis.cross(frame.size));
        let delta = axis.pack_point(
            cursor - axis.main_point(frame.origin),
            cross - axis.cross_point(frame.origin),
        );
        shift_position(tree, child, delta.x, delta.y);
        cursor += axis.main(frame.size);
        placed_any = true;
    }

    let frame = Frame::new(origin, axis.pack(cursor - self_main, max_cross));
    tree.set_frame(node, frame);
    frame
}
