use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::messages;
use crate::node_id::NodeId;
use crate::shared::Shared;

/// Receiver for invalidation requests raised by state cells.
///
/// The element tree implements this; cells only ever see it through a weak
/// reference so that a cell captured in a long-lived closure cannot keep a
/// discarded tree alive.
pub trait InvalidationSink {
    fn mark_invalid(&mut self, node: NodeId);
}

/// Back-reference from a state cell to the node whose body read it.
pub struct OwnerLink {
    node: NodeId,
    sink: Weak<RefCell<dyn InvalidationSink>>,
}

impl OwnerLink {
    pub fn new(node: NodeId, sink: Weak<RefCell<dyn InvalidationSink>>) -> Self {
        Self { node, sink }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Request a rebuild of the owning node. Writes that outlive the tree
    /// (or the node) are dropped silently.
    pub fn invalidate(&self) {
        match self.sink.upgrade() {
            Some(sink) => sink.borrow_mut().mark_invalid(self.node),
            None => log::debug!("dropping invalidation for detached owner {}", self.node),
        }
    }
}

/// Per-cell bookkeeping shared between a `State`, its bindings, and the
/// build pipeline.
struct CellFlags {
    /// Set when the owning body read the cell. A cell that is written but
    /// never read does not schedule a rebuild.
    read: Cell<bool>,
    /// Latched from `read` once the owning body finishes. Writes only
    /// invalidate after this point.
    invalidate_on_write: Cell<bool>,
    /// True while the owning body executes, before the owner link exists.
    body_reading: Cell<bool>,
    owner: RefCell<Option<OwnerLink>>,
}

impl CellFlags {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            read: Cell::new(false),
            invalidate_on_write: Cell::new(false),
            body_reading: Cell::new(false),
            owner: RefCell::new(None),
        })
    }

    fn has_owner(&self) -> bool {
        self.owner.borrow().is_some()
    }

    fn invalidate_owner_if_read(&self) {
        if !self.read.get() || !self.invalidate_on_write.get() {
            return;
        }
        if let Some(owner) = &*self.owner.borrow() {
            owner.invalidate();
        }
    }
}

/// Build-time lifecycle of a declared property, type-erased so the builder
/// can walk a heterogeneous property list.
pub trait DynProperty {
    /// Clear the read footprint before the owning body runs.
    fn reset_for_build(&self);
    /// Open the window in which reads are legal without an owner.
    fn begin_body_read(&self);
    fn end_body_read(&self);
    /// Latch the invalidate-on-write flag from the recorded footprint.
    fn configure_invalidation_after_build(&self);
    /// Attach the cell to the node the body produced.
    fn bind_owner(&self, owner: OwnerLink);
}

/// Observable state cell owned by a composite node.
///
/// Reads during the owner's body are recorded; writes after the build
/// invalidate the owner only if that body actually read the value.
pub struct State<Value> {
    value: Shared<Value>,
    flags: Rc<CellFlags>,
    derived: Rc<RefCell<Vec<Rc<CellFlags>>>>,
}

impl<Value> Clone for State<Value> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            flags: Rc::clone(&self.flags),
            derived: Rc::clone(&self.derived),
        }
    }
}

impl<Value> State<Value> {
    pub fn new(value: Value) -> Self {
        Self {
            value: Shared::new(value),
            flags: CellFlags::new(),
            derived: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn assert_readable(&self) {
        if !self.flags.has_owner() && !self.flags.body_reading.get() {
            panic!("{}", messages::STATE_USED_BEFORE_BUILD);
        }
    }

    /// Read the value through `f`, recording the access.
    pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        self.assert_readable();
        self.flags.read.set(true);
        self.value.with(f)
    }

    /// Replace the value, notifying derived bindings and, if the owning
    /// body read this cell, scheduling the owner for rebuild.
    pub fn set(&self, new_value: Value) {
        if !self.flags.has_owner() {
            panic!("{}", messages::STATE_USED_BEFORE_BUILD);
        }
        self.value.replace(new_value);
        for derived in self.derived.borrow().iter() {
            derived.invalidate_owner_if_read();
        }
        self.flags.invalidate_owner_if_read();
    }

    /// Derive a binding over this cell. The binding records its own read
    /// footprint, and writes through it also invalidate this cell's owner.
    pub fn binding(&self) -> Binding<Value>
    where
        Value: Clone + 'static,
    {
        let flags = CellFlags::new();
        self.derived.borrow_mut().push(Rc::clone(&flags));

        let value = self.value.clone();
        let getter: Rc<dyn Fn() -> Value> = Rc::new(move || value.cloned());

        let value = self.value.clone();
        let derived = Rc::clone(&self.derived);
        let state_flags = Rc::clone(&self.flags);
        let setter: Rc<dyn Fn(Value)> = Rc::new(move |new_value| {
            value.replace(new_value);
            for other in derived.borrow().iter() {
                other.invalidate_owner_if_read();
            }
            // A write through a binding reaches the source cell's owner as
            // long as that owner's body read the source.
            if state_flags.read.get() {
                if let Some(owner) = &*state_flags.owner.borrow() {
                    owner.invalidate();
                }
            }
        });

        Binding {
            getter,
            setter,
            flags,
        }
    }
}

impl<Value: Clone> State<Value> {
    pub fn get(&self) -> Value {
        self.with(Value::clone)
    }
}

impl<Value> DynProperty for State<Value> {
    fn reset_for_build(&self) {
        self.flags.read.set(false);
        self.flags.invalidate_on_write.set(false);
    }

    fn begin_body_read(&self) {
        self.flags.body_reading.set(true);
    }

    fn end_body_read(&self) {
        self.flags.body_reading.set(false);
    }

    fn configure_invalidation_after_build(&self) {
        self.flags.invalidate_on_write.set(self.flags.read.get());
    }

    fn bind_owner(&self, owner: OwnerLink) {
        *self.flags.owner.borrow_mut() = Some(owner);
    }
}

/// Read/write projection of a `State`, usable by a node other than the
/// cell's owner.
pub struct Binding<Value> {
    getter: Rc<dyn Fn() -> Value>,
    setter: Rc<dyn Fn(Value)>,
    flags: Rc<CellFlags>,
}

impl<Value> Clone for Binding<Value> {
    fn clone(&self) -> Self {
        Self {
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
            flags: Rc::clone(&self.flags),
        }
    }
}

impl<Value> Binding<Value> {
    pub fn get(&self) -> Value {
        if !self.flags.has_owner() && !self.flags.body_reading.get() {
            panic!("{}", messages::BINDING_USED_BEFORE_BUILD);
        }
        self.flags.read.set(true);
        (self.getter)()
    }

    pub fn set(&self, new_value: Value) {
        (self.setter)(new_value);
        self.flags.invalidate_owner_if_read();
    }
}

impl<Value> DynProperty for Binding<Value> {
    fn reset_for_build(&self) {
        self.flags.read.set(false);
        self.flags.invalidate_on_write.set(false);
    }

    fn begin_body_read(&self) {
        self.flags.body_reading.set(true);
    }

    fn end_body_read(&self) {
        self.flags.body_reading.set(false);
    }

    fn configure_invalidation_after_build(&self) {
        self.flags.invalidate_on_write.set(self.flags.read.get());
    }

    fn bind_owner(&self, owner: OwnerLink) {
        *self.flags.owner.borrow_mut() = Some(owner);
    }
}
