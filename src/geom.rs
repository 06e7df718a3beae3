//! Geometric primitives used by the sparkline pipeline.
//!
//! [`Point`] lives in surface space: X grows by the configured step per
//! committed sample and Y is the raw sample value. Screen-space types carry
//! pixel coordinates produced by the render list.

use serde::{Deserialize, Serialize};

/// A point in surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal position (`ordinal * step_width`).
    pub x: f64,
    /// Vertical position, equal to the sample value.
    pub y: f64,
}

impl Point {
    /// Create a new surface point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Shrink the rectangle by the given insets.
    ///
    /// Insets larger than the rectangle collapse it to zero size instead of
    /// inverting it.
    pub fn inset(&self, insets: Insets) -> Self {
        let min_x = self.min.x + insets.left as f32;
        let min_y = self.min.y + insets.top as f32;
        let max_x = (self.max.x - insets.right as f32).max(min_x);
        let max_y = (self.max.y - insets.bottom as f32).max(min_y);
        Self::new(ScreenPoint::new(min_x, min_y), ScreenPoint::new(max_x, max_y))
    }

    /// Check whether `point` lies inside the rectangle, edges included.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Per-edge insets, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    /// Same inset on every edge.
    pub const fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Zero insets.
    pub const ZERO: Self = Self::uniform(0.0);
}
