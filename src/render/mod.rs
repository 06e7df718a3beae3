//! Rendering primitives and render list construction.
//!
//! These types are backend-agnostic. [`build_render_list`] turns a
//! [`Surface`] into screen-space commands; render backends (such as the GPUI
//! backend) only replay them.

use serde::{Deserialize, Serialize};

use crate::config::SparklineConfig;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::surface::Surface;
use crate::transform::{Transform, trailing_window};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

impl RectStyle {
    /// Fill only, no border.
    pub fn filled(fill: Color) -> Self {
        Self {
            fill,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw a filled circle.
    Circle {
        /// Circle centre.
        center: ScreenPoint,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        fill: Color,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Check whether the list holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Build the render list for `surface` inside `bounds`.
///
/// The visible value range is stretched over the bounds height, inset by the
/// configured line margin. Horizontally one surface unit is one pixel; with
/// `follow_latest` the newest point is kept at the right edge once the
/// polyline outgrows the bounds.
pub fn build_render_list(
    surface: &Surface,
    config: &SparklineConfig,
    bounds: ScreenRect,
    follow_latest: bool,
) -> RenderList {
    let mut render = RenderList::new();
    if !bounds.is_valid() {
        return render;
    }
    let Some(y_range) = surface.visible_range() else {
        return render;
    };

    let plot_rect = bounds.inset(config.line_margin);
    let window = plot_rect.width() as f64;
    let right = if follow_latest {
        surface.content_width().max(window)
    } else {
        window
    };
    let Some(transform) = Transform::new(trailing_window(right, window, y_range), plot_rect)
    else {
        return render;
    };

    render.push(RenderCommand::ClipRect(bounds));
    build_overlays(&mut render, surface, config, &transform, bounds);

    let x_range = transform.viewport().x;
    let points = surface.polyline().points();
    let start = points
        .partition_point(|point| point.x < x_range.min)
        .saturating_sub(1);
    let end = (points.partition_point(|point| point.x <= x_range.max) + 1).min(points.len());
    let mut segments = Vec::new();
    build_line_segments(&points[start..end], &transform, bounds, &mut segments);
    if !segments.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle {
                color: config.stroke,
                width: config.stroke_thickness as f32,
            },
        });
    }

    let markers = surface.canvas().markers();
    let first_marker = markers.partition_point(|marker| marker.center.x < x_range.min);
    for marker in &markers[first_marker..] {
        if marker.center.x > x_range.max {
            break;
        }
        render.push(RenderCommand::Circle {
            center: transform.data_to_screen(marker.center),
            radius: marker.radius as f32,
            fill: marker.fill,
        });
    }

    render.push(RenderCommand::ClipEnd);
    render
}

fn build_overlays(
    render: &mut RenderList,
    surface: &Surface,
    config: &SparklineConfig,
    transform: &Transform,
    bounds: ScreenRect,
) {
    let half = (config.stroke_thickness as f32 * 0.5).max(0.25);
    for overlay in surface.canvas().overlays() {
        let Some(value) = overlay.value() else {
            continue;
        };
        let y = transform.y_to_screen(value);
        render.push(RenderCommand::Rect {
            rect: ScreenRect::new(
                ScreenPoint::new(bounds.min.x, y - half),
                ScreenPoint::new(bounds.max.x, y + half),
            ),
            style: RectStyle::filled(overlay.color()),
        });
    }
}

/// Build clipped line segments between consecutive points.
pub(crate) fn build_line_segments(
    points: &[Point],
    transform: &Transform,
    clip: ScreenRect,
    out: &mut Vec<LineSegment>,
) {
    out.clear();
    if points.len() < 2 {
        return;
    }
    for window in points.windows(2) {
        let start = transform.data_to_screen(window[0]);
        let end = transform.data_to_screen(window[1]);
        if let Some((clipped_start, clipped_end)) = clip_segment(start, end, clip) {
            out.push(LineSegment::new(clipped_start, clipped_end));
        }
    }
}

fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const TOP: u8 = 4;
    const BOTTOM: u8 = 8;

    let mut out_start = region_code(start, rect, LEFT, RIGHT, TOP, BOTTOM);
    let mut out_end = region_code(end, rect, LEFT, RIGHT, TOP, BOTTOM);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (mut x, mut y) = (0.0_f32, 0.0_f32);

        if (out_code & TOP) != 0 {
            x = start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y);
            y = rect.min.y;
        } else if (out_code & BOTTOM) != 0 {
            x = start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y);
            y = rect.max.y;
        } else if (out_code & RIGHT) != 0 {
            y = start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x);
            x = rect.max.x;
        } else if (out_code & LEFT) != 0 {
            y = start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x);
            x = rect.min.x;
        }

        let new_point = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = new_point;
            out_start = region_code(start, rect, LEFT, RIGHT, TOP, BOTTOM);
        } else {
            end = new_point;
            out_end = region_code(end, rect, LEFT, RIGHT, TOP, BOTTOM);
        }
    }
}

fn region_code(
    point: ScreenPoint,
    rect: ScreenRect,
    left: u8,
    right: u8,
    top: u8,
    bottom: u8,
) -> u8 {
    let mut code = 0;
    if point.x < rect.min.x {
        code |= left;
    } else if point.x > rect.max.x {
        code |= right;
    }
    if point.y < rect.min.y {
        code |= top;
    } else if point.y > rect.max.y {
        code |= bottom;
    }
    code
}
