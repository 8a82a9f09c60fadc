#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Clamps both components into `[0, 1]`, each axis independently.
    pub fn clamped_unit(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    /// Whether both dimensions are strictly positive. Degenerate rects
    /// cannot be used to normalize pointer coordinates.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Maps a point in device space to fractional coordinates of this
    /// rect, `(0, 0)` at the origin corner and `(1, 1)` at the opposite
    /// one. Points outside the rect map outside `[0, 1]`.
    pub fn normalized(&self, point: Point) -> Point {
        Point {
            x: (point.x - self.x) / self.width,
            y: (point.y - self.y) / self.height,
        }
    }
}

/// A 2D velocity in normalized surface units per second.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    /// Speed: the Euclidean magnitude of the vector.
    pub fn magnitude(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Heading in degrees, `atan2(y, x)` convention. The zero vector has
    /// direction `0`, not NaN (`atan2(0, 0) == 0`).
    pub fn direction_degrees(&self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }
}
