//! Glint: a retained-mode UI runtime.
//!
//! Views describe a UI; the builder turns them into a retained element
//! graph; observable state cells record which node's body read them and
//! schedule exactly that node for rebuild when written. A reconciliation
//! tick rebuilds the invalidated subtrees in place, re-lays them out from
//! the nearest layout boundary, and projects the result onto a pluggable
//! display backend.
//!
//! The whole runtime is single-threaded; trees, views, and cells are all
//! `Rc`-based handles on one logical timeline.

mod builder;
mod debug;
mod display;
mod element;
mod layout;
mod reconcile;
mod store;
mod text;
mod tree;
mod view;

pub use display::{DisplayBackend, DisplayHandle, DisplayKind};
pub use element::{Decoration, ElementKind, GeometryContent, TapAction};
pub use text::{MonospaceMetrics, TextMetrics};
pub use tree::ElementTree;
pub use view::{Composite, View};

pub use glint_core::{Binding, DynProperty, EnvProperty, Environment, NodeId, State};
pub use glint_ui_layout::{Constraint, EdgeInsets, Frame, Point, Size, StackAlignment};
