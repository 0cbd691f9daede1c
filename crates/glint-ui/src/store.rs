//! Retained storage for the element graph.
//!
//! Nodes live in a slot arena keyed by [`NodeId`]; relationships, view
//! bindings, frames, and display handles hang off side tables keyed by the
//! same ids. All methods take `&mut self` or `&self` and never call user
//! code, so callers can hold the tree's interior borrow across them.

use std::any::TypeId;
use std::rc::Rc;

use indexmap::IndexSet;

use glint_core::collections::map::HashMap;
use glint_core::collections::map::HashSet;
use glint_core::messages;
use glint_core::{EnvProperty, InvalidationSink, NodeId};
use glint_ui_layout::{Frame, Size};

use crate::display::DisplayHandle;
use crate::element::ElementKind;
use crate::text::{MonospaceMetrics, TextMetrics};
use crate::view::{Composite, View};

struct Slot {
    generation: u32,
    kind: Option<ElementKind>,
}

pub(crate) struct TreeInner {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,

    root: Option<NodeId>,
    pub(crate) root_display: Option<DisplayHandle>,
    pub(crate) constraint: Size,

    children: HashMap<NodeId, IndexSet<NodeId>>,
    parents: HashMap<NodeId, NodeId>,
    views: HashMap<NodeId, View>,
    displays: HashMap<NodeId, DisplayHandle>,
    frames: HashMap<NodeId, Frame>,
    invalid: HashSet<NodeId>,

    environment: HashMap<TypeId, Rc<dyn EnvProperty>>,

    /// Display handles whose elements were removed while no backend was
    /// in reach. Drained on the next render or reconciliation pass.
    pub(crate) orphaned_displays: Vec<DisplayHandle>,

    /// Composites built but not yet linked into the graph. Mount
    /// notifications fire only once the new subtree is reachable.
    pub(crate) pending_mounts: Vec<Rc<dyn Composite>>,

    pub(crate) text_metrics: Rc<dyn TextMetrics>,
}

impl TreeInner {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            root: None,
            root_display: None,
            constraint: Size::ZERO,
            children: HashMap::default(),
            parents: HashMap::default(),
            views: HashMap::default(),
            displays: HashMap::default(),
            frames: HashMap::default(),
            invalid: HashSet::default(),
            environment: HashMap::default(),
            orphaned_displays: Vec::new(),
            pending_mounts: Vec::new(),
            text_metrics: Rc::new(MonospaceMetrics::default()),
        }
    }

    // Slot arena.

    pub(crate) fn allocate(&mut self, kind: ElementKind) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.kind = Some(kind);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 1,
                    kind: Some(kind),
                });
                NodeId::new(index, 1)
            }
        }
    }

    pub(crate) fn is_live(&self, node: NodeId) -> bool {
        self.slots
            .get(node.index() as usize)
            .map_or(false, |slot| {
                slot.generation == node.generation() && slot.kind.is_some()
            })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub(crate) fn kind_of(&self, node: NodeId) -> Option<&ElementKind> {
        let slot = self.slots.get(node.index() as usize)?;
        if slot.generation != node.generation() {
            return None;
        }
        slot.kind.as_ref()
    }

    /// Vacate the node's slot and drop every table entry it owns. The
    /// slot generation advances so outstanding ids for it go stale.
    pub(crate) fn remove_node(&mut self, node: NodeId) {
        if !self.is_live(node) {
            return;
        }
        let slot = &mut self.slots[node.index() as usize];
        slot.kind = None;
        slot.generation += 1;
        self.free.push(node.index());
        self.live -= 1;

        self.children.remove(&node);
        self.parents.remove(&node);
        self.views.remove(&node);
        self.frames.remove(&node);
        self.invalid.remove(&node);
        if let Some(handle) = self.displays.remove(&node) {
            self.orphaned_displays.push(handle);
        }
        if self.root == Some(node) {
            self.root = None;
        }
    }

    /// Remove the node and everything below it, children before parents.
    /// Composites found on the way are appended to `unmounted` so the
    /// caller can notify them once the tree borrow is released.
    pub(crate) fn remove_subtree(&mut self, node: NodeId, unmounted: &mut Vec<Rc<dyn Composite>>) {
        for child in self.children_of(node) {
            self.remove_subtree(child, unmounted);
        }
        if let Some(View::Composite(composite)) = self.views.get(&node) {
            unmounted.push(Rc::clone(composite));
        }
        self.remove_node(node);
    }

    // Root.

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, node: NodeId) {
        self.root = Some(node);
    }

    // Relationships.

    pub(crate) fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.children
            .get(&node)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn single_child_of(&self, node: NodeId) -> Option<NodeId> {
        let set = self.children.get(&node)?;
        if set.len() == 1 {
            set.first().copied()
        } else {
            None
        }
    }

    pub(crate) fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied()
    }

    /// Link `child` under `parent`, appending to the ordered child set.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        self.children.entry(parent).or_default().insert(child);
        self.parents.insert(child, parent);
    }

    pub(crate) fn unlink_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(set) = self.children.get_mut(&parent) {
            set.shift_remove(&child);
        }
        self.parents.remove(&child);
    }

    /// Swap `old` for `new` under `parent`, keeping `new` at the ordinal
    /// position `old` occupied.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        let Some(set) = self.children.get_mut(&parent) else {
            self.link(parent, new);
            return;
        };
        match set.shift_remove_full(&old) {
            Some((index, _)) => {
                set.shift_insert(index, new);
            }
            None => {
                set.insert(new);
            }
        }
        self.parents.remove(&old);
        self.parents.insert(new, parent);
    }

    // View bindings.

    pub(crate) fn bind_view(&mut self, node: NodeId, view: View) {
        self.views.insert(node, view);
    }

    pub(crate) fn view_of(&self, node: NodeId) -> Option<View> {
        self.views.get(&node).cloned()
    }

    // Frames.

    pub(crate) fn frame_of(&self, node: NodeId) -> Option<Frame> {
        self.frames.get(&node).copied()
    }

    pub(crate) fn set_frame(&mut self, node: NodeId, frame: Frame) {
        self.frames.insert(node, frame);
    }

    pub(crate) fn frames(&self) -> impl Iterator<Item = (NodeId, Frame)> + '_ {
        self.frames.iter().map(|(node, frame)| (*node, *frame))
    }

    // Displays.

    pub(crate) fn set_display(&mut self, node: NodeId, handle: DisplayHandle) {
        self.displays.insert(node, handle);
    }

    pub(crate) fn display_of(&self, node: NodeId) -> Option<DisplayHandle> {
        self.displays.get(&node).copied()
    }

    pub(crate) fn displays(&self) -> impl Iterator<Item = (NodeId, DisplayHandle)> + '_ {
        self.displays.iter().map(|(node, handle)| (*node, *handle))
    }

    // Invalidation.

    pub(crate) fn pending_invalid(&self) -> Vec<NodeId> {
        self.invalid.iter().copied().collect()
    }

    pub(crate) fn clear_invalid(&mut self) {
        self.invalid.clear();
    }

    pub(crate) fn mark_root_invalid(&mut self) {
        let root = match self.root {
            Some(root) => root,
            None => panic!("{}", messages::ROOT_MISSING),
        };
        self.invalid.clear();
        self.invalid.insert(root);
    }

    // Environment scope stack.

    /// Register an environment declaration while building a composite.
    ///
    /// A publication for an already-present type overwrites the stored
    /// value in place; an empty declaration is filled from the stored one.
    /// Returns whether the caller owns the entry and must remove it when
    /// its subtree finishes building.
    pub(crate) fn add_environment(&mut self, property: Rc<dyn EnvProperty>) -> bool {
        let key = property.key();
        if let Some(existing) = self.environment.get(&key) {
            match property.content() {
                Some(content) => existing.fill(content),
                None => {
                    if let Some(content) = existing.content() {
                        property.fill(content);
                    }
                }
            }
            return false;
        }
        self.environment.insert(key, property);
        true
    }

    pub(crate) fn remove_environment(&mut self, key: TypeId) {
        self.environment.remove(&key);
    }
}

impl InvalidationSink for TreeInner {
    fn mark_invalid(&mut self, node: NodeId) {
        if !self.is_live(node) {
            log::debug!("ignoring invalidation for stale node {node}");
            return;
        }
        self.invalid.insert(node);
    }
}
