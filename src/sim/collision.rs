//! Axis-aligned rectangle geometry
//!
//! Every entity in the scene collides as an AABB. Rectangles are cheap value
//! types rebuilt from the owning entity's position each time they are needed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in scene units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square rect anchored at its top-left corner
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Same rect shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// True if `x` lies within the horizontal span (edges inclusive)
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }
}

/// Check whether two rectangles overlap on both axes
///
/// Edges that merely touch count as overlapping. A resting entity sits with its
/// bottom exactly on a platform top, so contact must register.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left() <= b.right() && b.left() <= a.right() && a.top() <= b.bottom() && b.top() <= a.bottom()
}
