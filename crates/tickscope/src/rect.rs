//! Rectangular bounds utility for chart rendering.

use glam::Vec2;

/// Rectangular bounds in surface pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left)
    pub x: f32,
    /// Y position (top)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rect.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering a whole surface of the given size.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// Check if a point is inside the rect.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Get the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Overlap of two rects, `None` when they do not intersect.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}
