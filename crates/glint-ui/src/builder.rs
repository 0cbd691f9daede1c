//! Turns view descriptions into element graph nodes.
//!
//! Building is eager except for geometry readers, whose content waits for
//! the layout pass. Every node keeps the view it was built from so an
//! invalidated subtree can be rebuilt from the retained description.

use crate::element::ElementKind;
use crate::tree::ElementTree;
use crate::view::View;

use glint_core::NodeId;

/// Build `view` into the graph and return the node that roots it.
pub(crate) fn build_view(tree: &ElementTree, view: &View) -> NodeId {
    match view {
        View::Text { content, font_size } => register(
            tree,
            ElementKind::Text {
                content: content.clone(),
                font_size: *font_size,
            },
            view,
        ),
        View::Image { source, size } => register(
            tree,
            ElementKind::Image {
                source: source.clone(),
                size: *size,
            },
            view,
        ),
        View::Spacer => register(tree, ElementKind::Spacer, view),
        View::DecorationBox { decoration, child } => {
            build_wrapper(tree, ElementKind::DecorationBox { decoration: *decoration }, view, child)
        }
        View::Margin { insets, child } => {
            build_wrapper(tree, ElementKind::Margin { insets: *insets }, view, child)
        }
        View::SizedFrame {
            width,
            height,
            child,
        } => build_wrapper(
            tree,
            ElementKind::SizedFrame {
                width: *width,
                height: *height,
            },
            view,
            child,
        ),
        View::FractionalFrame {
            width_percent,
            height_percent,
            child,
        } => build_wrapper(
            tree,
            ElementKind::FractionalFrame {
                width_percent: *width_percent,
                height_percent: *height_percent,
            },
            view,
            child,
        ),
        View::TapCapture { action, child } => build_wrapper(
            tree,
            ElementKind::TapCapture {
                action: action.clone(),
            },
            view,
            child,
        ),
        View::Navigation { child } => build_wrapper(tree, ElementKind::Navigation, view, child),
        View::GeometryReader { content } => register(
            tree,
            ElementKind::GeometryReader {
                content: content.clone(),
            },
            view,
        ),
        View::HStack {
            alignment,
            spacing,
            children,
        } => build_stack(
            tree,
            ElementKind::HStack {
                alignment: *alignment,
                spacing: *spacing,
            },
            view,
            children,
        ),
        View::VStack {
            alignment,
            spacing,
            children,
        } => build_stack(
            tree,
            ElementKind::VStack {
                alignment: *alignment,
                spacing: *spacing,
            },
            view,
            children,
        ),
        View::Group { children } => {
            let node = register(tree, ElementKind::Storage, view);
            for child in children {
                let built = build_view(tree, child);
                tree.link(node, built);
            }
            node
        }
        View::Composite(composite) => build_composite(tree, view, composite),
    }
}

fn register(tree: &ElementTree, kind: ElementKind, view: &View) -> NodeId {
    let node = tree.allocate(kind);
    tree.bind_view(node, view.clone());
    node
}

fn build_wrapper(tree: &ElementTree, kind: ElementKind, view: &View, child: &View) -> NodeId {
    let node = register(tree, kind, view);
    let built = build_view(tree, child);
    tree.link(node, built);
    node
}

/// Stacks interpose a storage node so their ordered child list survives
/// rebuilds of individual children without disturbing the stack itself.
fn build_stack(tree: &ElementTree, kind: ElementKind, view: &View, children: &[View]) -> NodeId {
    let node = register(tree, kind, view);
    let storage = register(
        tree,
        ElementKind::Storage,
        &View::Group {
            children: children.to_vec(),
        },
    );
    tree.link(node, storage);
    for child in flatten(children) {
        let built = build_view(tree, &child);
        tree.link(storage, built);
    }
    node
}

/// Groups dissolve into the surrounding child list.
fn flatten(children: &[View]) -> Vec<View> {
    let mut flat = Vec::with_capacity(children.len());
    for child in children {
        match child {
            View::Group { children } => flat.extend(flatten(children)),
            other => flat.push(other.clone()),
        }
    }
    flat
}

/// Build a user composite: run its body between the property lifecycle
/// steps, scope its environment declarations to the subtree, and bind its
/// cells to the node that now owns them.
fn build_composite(
    tree: &ElementTree,
    view: &View,
    composite: &std::rc::Rc<dyn crate::view::Composite>,
) -> NodeId {
    let properties = composite.properties();
    for property in &properties {
        property.reset_for_build();
    }

    let declared = composite.environment();
    let mut owned_keys = Vec::new();
    for declaration in &declared {
        let key = declaration.key();
        let owned = tree.with_inner_mut(|inner| inner.add_environment(declaration.clone()));
        if owned {
            owned_keys.push(key);
        }
    }

    for property in &properties {
        property.begin_body_read();
    }
    let body = composite.body();
    for property in &properties {
        property.end_body_read();
    }

    let content = build_view(tree, &body);

    for key in owned_keys {
        tree.with_inner_mut(|inner| inner.remove_environment(key));
    }

    for property in &properties {
        property.configure_invalidation_after_build();
    }

    let node = register(tree, ElementKind::Composite, view);
    tree.link(node, content);

    for property in &properties {
        property.bind_owner(tree.owner_link(node));
    }

    // Mount fires once the caller has linked the subtree into the graph.
    tree.with_inner_mut(|inner| inner.pending_mounts.push(composite.clone()));
    node
}
