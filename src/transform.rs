//! Coordinate mapping.
//!
//! [`map_point`] places a sample on the drawing surface. [`Transform`] maps
//! surface coordinates onto a screen rectangle, flipping the vertical axis so
//! larger values sit higher on screen.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::{Range, Viewport};

const MIN_SPAN: f64 = 1e-12;

/// Map the `ordinal`-th committed sample onto the drawing surface.
///
/// `x` advances by `step_width` per sample and `y` is the raw value.
pub fn map_point(ordinal: usize, value: f64, step_width: f64) -> Point {
    Point::new(ordinal as f64 * step_width, value)
}

/// Transform from surface coordinates into screen coordinates.
#[derive(Debug, Clone)]
pub struct Transform {
    viewport: Viewport,
    screen: ScreenRect,
}

impl Transform {
    /// Create a transform for the given viewport and screen rectangle.
    ///
    /// Returns `None` for an empty screen rectangle or non-finite viewport.
    pub fn new(viewport: Viewport, screen: ScreenRect) -> Option<Self> {
        if !screen.is_valid() || !viewport.x.is_finite() || !viewport.y.is_finite() {
            return None;
        }
        let viewport = Viewport::new(
            viewport.x.with_min_span(MIN_SPAN),
            viewport.y.with_min_span(MIN_SPAN),
        );
        Some(Self { viewport, screen })
    }

    /// Access the viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the screen rectangle.
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a surface point into screen space.
    pub fn data_to_screen(&self, point: Point) -> ScreenPoint {
        let x_norm = (point.x - self.viewport.x.min) / self.viewport.x.span();
        let y_norm = (point.y - self.viewport.y.min) / self.viewport.y.span();
        let sx = self.screen.min.x as f64 + x_norm * self.screen.width() as f64;
        let sy = self.screen.max.y as f64 - y_norm * self.screen.height() as f64;
        ScreenPoint::new(sx as f32, sy as f32)
    }

    /// Map a surface Y value to a screen Y coordinate.
    pub fn y_to_screen(&self, y: f64) -> f32 {
        self.data_to_screen(Point::new(self.viewport.x.min, y)).y
    }

    /// Map a screen point into surface space.
    pub fn screen_to_data(&self, point: ScreenPoint) -> Point {
        let x_norm = (point.x as f64 - self.screen.min.x as f64) / self.screen.width() as f64;
        let y_norm = (self.screen.max.y as f64 - point.y as f64) / self.screen.height() as f64;
        Point::new(
            self.viewport.x.min + x_norm * self.viewport.x.span(),
            self.viewport.y.min + y_norm * self.viewport.y.span(),
        )
    }

    /// Pixels per surface unit on the horizontal axis.
    pub fn x_scale(&self) -> f64 {
        self.screen.width() as f64 / self.viewport.x.span()
    }
}

/// Build a viewport that shows `width` surface units ending at `right`.
pub(crate) fn trailing_window(right: f64, width: f64, y: Range) -> Viewport {
    let left = (right - width).max(0.0);
    Viewport::new(Range::new(left, left + width), y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_point_steps_by_ordinal() {
        assert_eq!(map_point(0, 5.0, 2.0), Point::new(0.0, 5.0));
        assert_eq!(map_point(3, -1.5, 2.0), Point::new(6.0, -1.5));
        assert_eq!(map_point(4, 0.0, 0.5), Point::new(2.0, 0.0));
    }

    #[test]
    fn linear_roundtrip() {
        let viewport = Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0));
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0));
        let transform = Transform::new(viewport, screen).expect("valid transform");
        let point = Point::new(5.0, 7.5);
        let roundtrip = transform.screen_to_data(transform.data_to_screen(point));
        assert!((roundtrip.x - point.x).abs() < 1e-6);
        assert!((roundtrip.y - point.y).abs() < 1e-6);
    }

    #[test]
    fn vertical_axis_is_flipped() {
        let viewport = Viewport::new(Range::new(0.0, 10.0), Range::new(-20.0, 30.0));
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 50.0));
        let transform = Transform::new(viewport, screen).expect("valid transform");
        assert_eq!(transform.y_to_screen(30.0), 0.0);
        assert_eq!(transform.y_to_screen(-20.0), 50.0);
        assert_eq!(transform.y_to_screen(5.0), 25.0);
    }

    #[test]
    fn rejects_empty_screen() {
        let viewport = Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0));
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 10.0));
        assert!(Transform::new(viewport, screen).is_none());
    }

    #[test]
    fn trailing_window_pins_to_origin() {
        let y = Range::new(0.0, 1.0);
        assert_eq!(trailing_window(5.0, 10.0, y).x, Range::new(0.0, 10.0));
        assert_eq!(trailing_window(50.0, 10.0, y).x, Range::new(40.0, 50.0));
    }
}
