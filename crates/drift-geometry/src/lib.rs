//! Geometric primitives: Point, Size, Rect, Velocity

mod geometry;

pub use geometry::{Point, Rect, Size, Velocity};
