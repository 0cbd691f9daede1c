use crate::constraint::Constraint;
use crate::geometry::{Point, Size};

/// The main direction of a stack. Horizontal stacks lay children out
/// along x, vertical stacks along y; "main" and "cross" below are always
/// relative to this choice.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn main(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    pub fn cross(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    pub fn pack(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    pub fn main_point(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    pub fn cross_point(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.y,
            Axis::Vertical => point.x,
        }
    }

    pub fn pack_point(self, main: f32, cross: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }

    /// Reduce the constraint's main extent by `by`, leaving cross alone.
    pub fn shrink_main(self, constraint: Constraint, by: f32) -> Constraint {
        match self {
            Axis::Horizontal => constraint.with_width(constraint.width - by),
            Axis::Vertical => constraint.with_height(constraint.height - by),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_respects_axis() {
        assert_eq!(Axis::Horizontal.pack(10.0, 4.0), Size::new(10.0, 4.0));
        assert_eq!(Axis::Vertical.pack(10.0, 4.0), Size::new(4.0, 10.0));
        assert_eq!(Axis::Vertical.pack_point(10.0, 4.0), Point::new(4.0, 10.0));
    }

    #[test]
    fn shrink_main_leaves_cross_untouched() {
        let constraint = Constraint::new(100.0, 50.0);
        assert_eq!(
            Axis::Vertical.shrink_main(constraint, 20.0),
            Constraint::new(100.0, 30.0)
        );
        assert_eq!(
            Axis::Horizontal.shrink_main(constraint, 20.0),
            Constraint::new(80.0, 50.0)
        );
    }
}
