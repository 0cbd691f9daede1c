/// A position in the parent's coordinate space, in logical pixels.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A resolved rectangle: where a node sits and how big it is.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Frame {
    pub origin: Point,
    pub size: Size,
}

impl Frame {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// A frame of the given size placed at the coordinate origin.
    pub fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    /// A zero-sized frame used to pre-seed a child's position before it
    /// is measured.
    pub fn zero_sized(origin: Point) -> Self {
        Self {
            origin,
            size: Size::ZERO,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }
}

/// Distances from each edge, used by margin elements.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct EdgeInsets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn uniform(all: f32) -> Self {
        Self::new(all, all, all, all)
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, horizontal, vertical, vertical)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}
