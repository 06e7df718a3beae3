//! Colours for the parts of a sparkline that are not configured per chart.

use serde::{Deserialize, Serialize};

use crate::render::Color;
use crate::state::Level;

const OVERLAY_OPACITY: f32 = 0.5;

/// Visual theme for sparklines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Background fill behind the surface.
    pub background: Color,
    /// Low watermark overlay colour.
    pub low_watermark: Color,
    /// High watermark overlay colour.
    pub high_watermark: Color,
    /// Latest level overlay colour.
    pub latest_level: Color,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Light background, same overlay colours.
    pub fn light() -> Self {
        Self::default()
    }

    /// Dark background variant.
    pub fn dark() -> Self {
        Self {
            background: Color::new(0.08, 0.08, 0.1, 1.0),
            ..Self::default()
        }
    }

    /// Colour used for the overlay following `level`.
    pub fn overlay_color(&self, level: Level) -> Color {
        match level {
            Level::LowWaterMark => self.low_watermark,
            Level::HighWaterMark => self.high_watermark,
            Level::Latest => self.latest_level,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            low_watermark: Color::RED.with_alpha(OVERLAY_OPACITY),
            high_watermark: Color::GREEN.with_alpha(OVERLAY_OPACITY),
            latest_level: Color::WHITE.with_alpha(OVERLAY_OPACITY),
        }
    }
}
