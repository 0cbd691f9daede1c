use std::cell::RefCell;
use std::rc::Rc;

use glint_core::messages;
use glint_core::{InvalidationSink, NodeId, OwnerLink};
use glint_ui_layout::{Constraint, Frame, Size};

use crate::builder;
use crate::display::{build_display_tree, DisplayBackend, DisplayHandle};
use crate::element::ElementKind;
use crate::layout;
use crate::reconcile;
use crate::store::TreeInner;
use crate::text::TextMetrics;
use crate::view::{Composite, View};

/// The retained element graph and the driver API around it.
///
/// A tree is a cheaply clonable handle; clones share one graph. All user
/// code the tree triggers (view bodies, geometry content, lifecycle
/// notifications) runs with the graph unborrowed, so callbacks are free
/// to read and write state cells that point back into this tree.
pub struct ElementTree {
    inner: Rc<RefCell<TreeInner>>,
}

impl Clone for ElementTree {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TreeInner::new())),
        }
    }

    /// Replace the text measurement oracle. Call before building views.
    pub fn set_text_metrics(&self, metrics: Rc<dyn TextMetrics>) {
        self.inner.borrow_mut().text_metrics = metrics;
    }

    /// Set the space available to the root, typically the window size.
    pub fn set_constraint(&self, size: Size) {
        self.inner.borrow_mut().constraint = size;
    }

    /// Build `view` as the new root of the graph.
    pub fn set_root(&self, view: View) {
        let root = builder::build_view(self, &view);
        let constraint = {
            let mut inner = self.inner.borrow_mut();
            inner.set_root(root);
            inner.constraint
        };
        self.set_frame(root, Frame::from_size(constraint));
        self.emit_pending_mounts();
    }

    /// Lay out the whole graph from the root against the stored
    /// constraint.
    pub fn layout_root(&self) {
        let (root, constraint) = {
            let inner = self.inner.borrow();
            match inner.root() {
                Some(root) => (root, inner.constraint),
                None => panic!("{}", messages::ROOT_MISSING),
            }
        };
        self.set_frame(root, Frame::from_size(constraint));
        layout::layout_node(self, root, Constraint::from_size(constraint));
    }

    /// Project the graph into `backend`, attaching the root's display
    /// subtree under `host`.
    pub fn render(&self, backend: &mut dyn DisplayBackend, host: DisplayHandle) {
        let mut rendered = Vec::new();
        {
            let mut inner = self.inner.borrow_mut();
            inner.root_display = Some(host);
            if let Some(root) = inner.root() {
                build_display_tree(&mut inner, backend, root, host, &mut rendered);
            }
            for handle in inner.orphaned_displays.drain(..) {
                backend.detach(handle);
            }
        }
        for composite in rendered {
            composite.did_render();
        }
    }

    /// Run one reconciliation pass: rebuild every invalidated subtree,
    /// re-render it, re-lay out from each affected layout boundary, and
    /// push the resulting frames to the backend.
    pub fn tick(&self, backend: &mut dyn DisplayBackend) {
        reconcile::run(self, backend);
    }

    /// Force a full rebuild of the root on the next tick.
    pub fn mark_root_invalid(&self) {
        self.inner.borrow_mut().mark_root_invalid();
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.inner.borrow().root()
    }

    /// Whether the graph currently holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn frame_of(&self, node: NodeId) -> Option<Frame> {
        self.inner.borrow().frame_of(node)
    }

    pub fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.borrow().children_of(node)
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.inner.borrow().parent_of(node)
    }

    pub fn kind_name_of(&self, node: NodeId) -> Option<&'static str> {
        self.inner.borrow().kind_of(node).map(ElementKind::name)
    }

    /// Node ids currently scheduled for rebuild, in no particular order.
    pub fn pending_invalid(&self) -> Vec<NodeId> {
        self.inner.borrow().pending_invalid()
    }

    /// Snapshot of every laid-out frame, for assertions and debugging.
    pub fn all_frames(&self) -> Vec<(NodeId, Frame)> {
        self.inner.borrow().frames().collect()
    }

    /// Indented outline of the graph, for debugging.
    pub fn dump_tree(&self) -> String {
        crate::debug::dump_tree(self)
    }

    // Internal accessors. Each takes a borrow only for its own duration,
    // so builder/layout/reconcile code can interleave them with calls
    // into user closures.

    /// Fire the mount notification for every composite built since the
    /// last drain. Called once the new subtree is reachable.
    pub(crate) fn emit_pending_mounts(&self) {
        let mounted: Vec<Rc<dyn Composite>> =
            std::mem::take(&mut self.inner.borrow_mut().pending_mounts);
        for composite in mounted {
            composite.did_mount();
        }
    }

    pub(crate) fn owner_link(&self, node: NodeId) -> OwnerLink {
        let sink: Rc<RefCell<dyn InvalidationSink>> = self.inner.clone();
        OwnerLink::new(node, Rc::downgrade(&sink))
    }

    pub(crate) fn with_inner<R>(&self, f: impl FnOnce(&TreeInner) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub(crate) fn with_inner_mut<R>(&self, f: impl FnOnce(&mut TreeInner) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    pub(crate) fn allocate(&self, kind: ElementKind) -> NodeId {
        self.inner.borrow_mut().allocate(kind)
    }

    pub(crate) fn is_live(&self, node: NodeId) -> bool {
        self.inner.borrow().is_live(node)
    }

    pub(crate) fn kind_of(&self, node: NodeId) -> Option<ElementKind> {
        self.inner.borrow().kind_of(node).cloned()
    }

    pub(crate) fn single_child_of(&self, node: NodeId) -> Option<NodeId> {
        self.inner.borrow().single_child_of(node)
    }

    pub(crate) fn link(&self, parent: NodeId, child: NodeId) {
        self.inner.borrow_mut().link(parent, child);
    }

    pub(crate) fn set_frame(&self, node: NodeId, frame: Frame) {
        self.inner.borrow_mut().set_frame(node, frame);
    }

    pub(crate) fn view_of(&self, node: NodeId) -> Option<View> {
        self.inner.borrow().view_of(node)
    }

    pub(crate) fn bind_view(&self, node: NodeId, view: View) {
        self.inner.borrow_mut().bind_view(node, view);
    }

    pub(crate) fn text_metrics(&self) -> Rc<dyn TextMetrics> {
        Rc::clone(&self.inner.borrow().text_metrics)
    }

    pub(crate) fn constraint(&self) -> Size {
        self.inner.borrow().constraint
    }
}
