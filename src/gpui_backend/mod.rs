//! GPUI integration for gpui_sparkline.
//!
//! This module provides a GPUI view that paints a
//! [`Sparkline`](crate::sparkline::Sparkline) and keeps its newest point in
//! view while data streams in.

mod config;
mod paint;
mod view;

pub use config::SparklineViewConfig;
pub use view::{SparklineHandle, SparklineView};
