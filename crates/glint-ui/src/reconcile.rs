//! The reconciliation pass.
//!
//! One tick drains the invalid set: every scheduled node is torn down,
//! rebuilt from its retained view description, spliced back where it was,
//! projected into the display backend, and re-laid out from the nearest
//! layout boundary. A tick with nothing pending touches neither the graph
//! nor the backend.

use glint_core::messages;
use glint_core::NodeId;
use glint_ui_layout::Constraint;

use crate::builder;
use crate::display::{build_display_tree, DisplayBackend, DisplayHandle};
use crate::layout;
use crate::tree::ElementTree;

pub(crate) fn run(tree: &ElementTree, backend: &mut dyn DisplayBackend) {
    let pending = tree.pending_invalid();
    if pending.is_empty() {
        log::trace!("tick: nothing invalid");
        return;
    }
    log::debug!("tick: rebuilding {} node(s)", pending.len());

    for node in pending {
        // An earlier rebuild this tick may have torn this node down
        // along with its ancestor; its id is stale now.
        if !tree.is_live(node) {
            log::debug!("tick: skipping stale node {node}");
            continue;
        }
        rebuild(tree, backend, node);
    }

    tree.with_inner_mut(|inner| inner.clear_invalid());
    sync_display(tree, backend);
}

fn rebuild(tree: &ElementTree, backend: &mut dyn DisplayBackend, node: NodeId) {
    let view = match tree.view_of(node) {
        Some(view) => view,
        None => panic!("{}", messages::VIEW_BINDING_MISSING),
    };
    let parent = tree.parent_of(node);

    // Tear down the old subtree. The stale id stays in the parent's child
    // set so the replacement can take the exact same ordinal slot.
    let mut unmounted = Vec::new();
    tree.with_inner_mut(|inner| inner.remove_subtree(node, &mut unmounted));
    for composite in unmounted {
        composite.did_unmount();
    }

    let rebuilt = builder::build_view(tree, &view);

    match parent {
        Some(parent) => {
            tree.with_inner_mut(|inner| inner.replace_child(parent, node, rebuilt));
        }
        None => {
            tree.with_inner_mut(|inner| inner.set_root(rebuilt));
        }
    }
    tree.emit_pending_mounts();

    let host = display_host(tree, parent);
    let mut rendered = Vec::new();
    tree.with_inner_mut(|inner| {
        build_display_tree(inner, backend, rebuilt, host, &mut rendered);
    });
    for composite in rendered {
        composite.did_render();
    }

    relayout_from(tree, rebuilt);
}

/// The display object a rebuilt subtree attaches under: the nearest
/// ancestor that projects into the backend, or the backend root.
fn display_host(tree: &ElementTree, parent: Option<NodeId>) -> DisplayHandle {
    let mut current = parent;
    while let Some(node) = current {
        if let Some(handle) = tree.with_inner(|inner| inner.display_of(node)) {
            return handle;
        }
        current = tree.parent_of(node);
    }
    match tree.with_inner(|inner| inner.root_display) {
        Some(handle) => handle,
        None => panic!("{}", messages::ROOT_DISPLAY_MISSING),
    }
}

/// Re-layout always runs against the top-level constraint; a boundary's
/// own stored frame is a result of layout, not an input to it.
fn relayout_from(tree: &ElementTree, node: NodeId) {
    let boundary = layout::find_layout_boundary(tree, node);
    if Some(boundary) == tree.root_id() {
        tree.layout_root();
        return;
    }
    layout::layout_node(tree, boundary, Constraint::from_size(tree.constraint()));
}

/// Push every laid-out frame to its display object and detach handles
/// orphaned by removals.
fn sync_display(tree: &ElementTree, backend: &mut dyn DisplayBackend) {
    let updates: Vec<_> = tree.with_inner(|inner| {
        inner
            .displays()
            .filter_map(|(node, handle)| inner.frame_of(node).map(|frame| (handle, frame)))
            .collect()
    });
    for (handle, frame) in updates {
        backend.update_frame(handle, frame);
    }
    let orphans: Vec<_> = tree.with_inner_mut(|inner| inner.orphaned_displays.drain(..).collect());
    for handle in orphans {
        backend.detach(handle);
    }
}
