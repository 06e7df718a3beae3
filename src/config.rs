//! Sparkline configuration.

use serde::{Deserialize, Serialize};

use crate::geom::Insets;
use crate::render::Color;

/// Configuration for a [`Sparkline`](crate::sparkline::Sparkline).
///
/// Missing fields fall back to their defaults when deserializing, so a host
/// can load a partial config from JSON or TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineConfig {
    /// Polyline stroke width in pixels. Also the thickness of overlay lines.
    pub stroke_thickness: f64,
    /// Polyline stroke colour.
    pub stroke: Color,
    /// Inset applied around the polyline.
    pub line_margin: Insets,
    /// Fill of point markers.
    pub point_fill: Color,
    /// Radius of point markers; zero disables them.
    pub point_radius: f64,
    /// Minimum vertical band around the first point after a reset.
    pub min_y_range: f64,
    /// Horizontal distance between consecutive points.
    pub step_width: f64,
    /// Show the low and high watermark overlays.
    pub show_watermarks: bool,
    /// Show the latest-value overlay.
    pub show_latest_level: bool,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            stroke_thickness: 0.5,
            stroke: Color::BLACK,
            line_margin: Insets::ZERO,
            point_fill: Color::BLACK,
            point_radius: 0.0,
            min_y_range: 25.0,
            step_width: 2.0,
            show_watermarks: false,
            show_latest_level: false,
        }
    }
}
