use crate::render::Color;

/// Configuration for the GPUI sparkline view.
#[derive(Debug, Clone)]
pub struct SparklineViewConfig {
    /// Scroll to the newest point every time one is committed.
    pub follow_latest: bool,
    /// Background override. Falls back to the sparkline theme.
    pub background: Option<Color>,
}

impl Default for SparklineViewConfig {
    fn default() -> Self {
        Self {
            follow_latest: true,
            background: None,
        }
    }
}
