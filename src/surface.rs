//! Retained drawing surface.
//!
//! The surface is what the sparkline draws into: a [`Polyline`] receiving one
//! point per committed sample, and a [`Canvas`] carrying the layout
//! properties decided by auto-ranging plus the overlay lines and point
//! markers. Both parts are handed over explicitly at construction; a surface
//! missing either one is rejected up front by [`SurfaceBuilder::build`].

use std::cell::Cell;
use std::rc::Rc;

use crate::error::SetupError;
use crate::geom::Point;
use crate::render::Color;
use crate::state::Level;
use crate::view::{Range, Viewport};

/// Vertical extent of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceHeight {
    /// Fixed height in surface units.
    Fixed(f64),
    /// Sized to fit the content.
    Auto,
}

/// Growing polyline through every committed point.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    points: Vec<Point>,
    bounds: Option<Viewport>,
}

impl Polyline {
    /// Create an empty polyline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
        match self.bounds {
            None => {
                self.bounds = Some(Viewport::new(
                    Range::new(point.x, point.x),
                    Range::new(point.y, point.y),
                ));
            }
            Some(mut bounds) => {
                bounds.x.expand_to_include(point.x);
                bounds.y.expand_to_include(point.y);
                self.bounds = Some(bounds);
            }
        }
    }

    /// All points in commit order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Most recent point.
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Bounding box of all points.
    pub fn bounds(&self) -> Option<Viewport> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop all points.
    pub fn clear(&mut self) {
        self.points.clear();
        self.bounds = None;
    }
}

/// Filled circle drawn at a committed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Circle centre in surface space.
    pub center: Point,
    /// Radius in logical pixels.
    pub radius: f64,
    /// Fill colour.
    pub fill: Color,
}

/// Horizontal line tracking one [`Level`].
///
/// Clones share the same position, so a clone taken before the overlay is
/// removed keeps reporting the last position it was moved to.
#[derive(Debug, Clone)]
pub struct OverlayLine {
    level: Level,
    color: Color,
    position: Rc<Cell<Option<f64>>>,
}

impl OverlayLine {
    pub(crate) fn new(level: Level, color: Color, position: Option<f64>) -> Self {
        Self {
            level,
            color,
            position: Rc::new(Cell::new(position)),
        }
    }

    /// The level this line follows.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Current tracked value, if any.
    pub fn value(&self) -> Option<f64> {
        self.position.get()
    }

    /// Vertical offset from the surface origin; zero while the value is absent.
    pub fn offset(&self) -> f64 {
        self.position.get().unwrap_or(0.0)
    }

    /// Callback that moves this line; registered as a watcher on its level.
    pub(crate) fn mover(&self) -> impl FnMut(&Option<f64>) + 'static {
        let position = Rc::clone(&self.position);
        move |value| position.set(*value)
    }

    pub(crate) fn is_same(&self, other: &OverlayLine) -> bool {
        Rc::ptr_eq(&self.position, &other.position)
    }
}

/// Layout container hosting overlays and markers.
#[derive(Debug, Clone)]
pub struct Canvas {
    height: SurfaceHeight,
    bottom_margin: f64,
    overlays: Vec<OverlayLine>,
    markers: Vec<Marker>,
}

impl Canvas {
    /// Create an empty auto-height canvas.
    pub fn new() -> Self {
        Self {
            height: SurfaceHeight::Auto,
            bottom_margin: 0.0,
            overlays: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn height(&self) -> SurfaceHeight {
        self.height
    }

    pub fn bottom_margin(&self) -> f64 {
        self.bottom_margin
    }

    pub(crate) fn set_layout(&mut self, height: SurfaceHeight, bottom_margin: f64) {
        self.height = height;
        self.bottom_margin = bottom_margin;
    }

    /// Overlay lines, bottom-most first.
    pub fn overlays(&self) -> &[OverlayLine] {
        &self.overlays
    }

    /// Point markers in commit order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Overlays go beneath everything already on the canvas.
    pub(crate) fn insert_overlay(&mut self, line: OverlayLine) {
        self.overlays.insert(0, line);
    }

    pub(crate) fn remove_overlay(&mut self, line: &OverlayLine) -> bool {
        let before = self.overlays.len();
        self.overlays.retain(|existing| !existing.is_same(line));
        self.overlays.len() != before
    }

    pub(crate) fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub(crate) fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub(crate) fn clear_overlays(&mut self) {
        self.overlays.clear();
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Canvas and polyline owned by one sparkline.
#[derive(Debug, Clone)]
pub struct Surface {
    canvas: Canvas,
    polyline: Polyline,
}

impl Surface {
    /// Create a surface with fresh parts.
    pub fn new() -> Self {
        Self {
            canvas: Canvas::new(),
            polyline: Polyline::new(),
        }
    }

    /// Assemble a surface from explicitly supplied parts.
    pub fn builder() -> SurfaceBuilder {
        SurfaceBuilder::default()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn polyline(&self) -> &Polyline {
        &self.polyline
    }

    pub(crate) fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub(crate) fn polyline_mut(&mut self) -> &mut Polyline {
        &mut self.polyline
    }

    /// Remove all committed geometry. Overlays stay attached.
    pub(crate) fn clear_geometry(&mut self) {
        self.polyline.clear();
        self.canvas.clear_markers();
        self.canvas.set_layout(SurfaceHeight::Auto, 0.0);
    }

    /// Vertical value range currently visible on the surface.
    ///
    /// The canvas spans `[0, height]`; the bottom margin extends it down to
    /// `-bottom_margin`. An auto height fits the polyline's top, never below
    /// zero. Returns `None` before any point is committed.
    pub fn visible_range(&self) -> Option<Range> {
        let bounds = self.polyline.bounds()?;
        let top = match self.canvas.height {
            SurfaceHeight::Fixed(height) => height,
            SurfaceHeight::Auto => bounds.y.max.max(0.0),
        };
        Some(Range::new(-self.canvas.bottom_margin, top))
    }

    /// Horizontal extent of the polyline.
    pub fn content_width(&self) -> f64 {
        self.polyline
            .bounds()
            .map(|bounds| bounds.x.max.max(0.0))
            .unwrap_or(0.0)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder validating that a surface has every required part.
#[derive(Debug, Default)]
pub struct SurfaceBuilder {
    canvas: Option<Canvas>,
    polyline: Option<Polyline>,
}

impl SurfaceBuilder {
    /// Supply the canvas.
    pub fn canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = Some(canvas);
        self
    }

    /// Supply the polyline.
    pub fn polyline(mut self, polyline: Polyline) -> Self {
        self.polyline = Some(polyline);
        self
    }

    /// Build the surface, failing if a part is missing.
    pub fn build(self) -> Result<Surface, SetupError> {
        let canvas = self.canvas.ok_or(SetupError::MissingCanvas)?;
        let polyline = self.polyline.ok_or(SetupError::MissingPolyline)?;
        Ok(Surface { canvas, polyline })
    }
}
