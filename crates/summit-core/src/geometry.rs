use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen-style world units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict AABB intersection: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Anything that occupies a rectangle in the world.
pub trait Bounds {
    fn bounds(&self) -> Rect;

    fn overlaps<B: Bounds + ?Sized>(&self, other: &B) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}
