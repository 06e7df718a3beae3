//! gpui_sparkline is a streaming sparkline for GPUI.
//! Points are laid out incrementally as they arrive: the vertical range grows
//! to fit new extremes without rescanning history, and optional overlay lines
//! follow the low and high watermarks and the latest value.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod geom;
mod observe;
mod overlay;
pub mod ranging;
pub mod render;
pub mod series;
pub mod sparkline;
pub mod state;
pub mod style;
pub mod surface;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use config::SparklineConfig;
pub use error::{SeriesError, SetupError};
pub use geom::{Insets, Point, ScreenPoint, ScreenRect};
pub use observe::ListenerId;
pub use ranging::{AutoRange, RangeStage, Watermarks};
pub use render::{
    Color, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, build_render_list,
};
pub use series::{SeriesChange, SubscriptionId, TimeSeries, TimeValue, TimeValueId, Timestamp};
pub use sparkline::{PointAdded, Sparkline, SparklineBuilder};
pub use state::{Level, RenderState};
pub use style::Theme;
pub use surface::{Canvas, Marker, OverlayLine, Polyline, Surface, SurfaceBuilder, SurfaceHeight};
pub use transform::{Transform, map_point};
pub use view::{Range, Viewport};

#[cfg(feature = "gpui")]
pub use gpui_backend::{SparklineHandle, SparklineView, SparklineViewConfig};
