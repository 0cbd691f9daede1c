use crate::geometry::Size;

/// The space a parent offers a child: a single available width and height.
///
/// There is deliberately no min/max pair here. A child may return a frame
/// larger than the constraint; parents that care clamp the result
/// themselves.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Constraint {
    pub width: f32,
    pub height: f32,
}

impl Constraint {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn with_width(self, width: f32) -> Self {
        Self { width, ..self }
    }

    pub fn with_height(self, height: f32) -> Self {
        Self { height, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_round_trips_through_size() {
        let constraint = Constraint::from_size(Size::new(120.0, 40.0));
        assert_eq!(constraint.size(), Size::new(120.0, 40.0));
    }

    #[test]
    fn with_axis_replaces_only_that_axis() {
        let constraint = Constraint::new(100.0, 50.0);
        assert_eq!(constraint.with_width(30.0), Constraint::new(30.0, 50.0));
        assert_eq!(constraint.with_height(25.0), Constraint::new(100.0, 25.0));
    }
}
