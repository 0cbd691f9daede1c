//! Core state primitives for the Glint retained UI runtime.
//!
//! This crate carries everything below the element graph: node identifiers,
//! observable state cells with read-tracked invalidation, type-keyed
//! environment values, and the map/collection shims shared by the rest of
//! the workspace.

pub mod collections;
pub mod messages;

mod environment;
mod node_id;
mod shared;
mod state;

pub use environment::{EnvProperty, Environment};
pub use node_id::NodeId;
pub use shared::Shared;
pub use state::{Binding, DynProperty, InvalidationSink, OwnerLink, State};
