//! Geometry and constraint primitives for the Glint layout engine.
//!
//! Everything here is measurement vocabulary: sizes, frames, edge insets,
//! the single available-size constraint the layout pass threads down, and
//! axis/alignment helpers that let stacks share one implementation.

mod alignment;
mod axis;
mod constraint;
mod geometry;

pub use alignment::StackAlignment;
pub use axis::Axis;
pub use constraint::Constraint;
pub use geometry::{EdgeInsets, Frame, Point, Size};

pub mod prelude {
    pub use crate::{Axis, Constraint, EdgeInsets, Frame, Point, Size, StackAlignment};
}
