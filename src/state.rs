//! Per-chart render state.
//!
//! [`LayoutState`] is the live state mutated point by point. Its three
//! tracked levels are [`Tracked`] cells so overlays and external bindings are
//! pushed every change. [`RenderState`] is the read-only snapshot handed out
//! to hosts.

use serde::{Deserialize, Serialize};

use crate::observe::{ListenerId, Tracked};
use crate::ranging::{AutoRange, RangeStage, Watermarks};
use crate::surface::SurfaceHeight;

/// A scalar tracked by the chart that an overlay can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Lowest value since the last reset.
    LowWaterMark,
    /// Highest value since the last reset.
    HighWaterMark,
    /// Most recently committed value.
    Latest,
}

impl Level {
    /// Every level, in overlay slot order.
    pub const ALL: [Level; 3] = [Level::LowWaterMark, Level::HighWaterMark, Level::Latest];

    pub(crate) fn slot(self) -> usize {
        match self {
            Level::LowWaterMark => 0,
            Level::HighWaterMark => 1,
            Level::Latest => 2,
        }
    }
}

/// Snapshot of a chart's derived render state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Ordinal the next committed point will get.
    pub next_ordinal: usize,
    pub low_watermark: Option<f64>,
    pub high_watermark: Option<f64>,
    pub latest_value: Option<f64>,
    pub surface_height: SurfaceHeight,
    pub surface_bottom_margin: f64,
    pub range_expanded_below: bool,
    pub range_expanded_above: bool,
    pub range_fully_auto: bool,
    /// Stage of the ranging state machine.
    pub stage: RangeStage,
}

#[derive(Debug)]
pub(crate) struct LayoutState {
    next_ordinal: usize,
    levels: [Tracked<Option<f64>>; 3],
    range: AutoRange,
}

impl LayoutState {
    pub(crate) fn new() -> Self {
        Self {
            next_ordinal: 0,
            levels: [Tracked::new(None), Tracked::new(None), Tracked::new(None)],
            range: AutoRange::new(),
        }
    }

    /// Back to initial values. Watchers see every level go absent.
    pub(crate) fn reset(&mut self) {
        self.next_ordinal = 0;
        for level in &mut self.levels {
            level.set(None);
        }
        self.range.reset();
    }

    pub(crate) fn next_ordinal(&self) -> usize {
        self.next_ordinal
    }

    pub(crate) fn level(&self, level: Level) -> Option<f64> {
        self.levels[level.slot()].get()
    }

    pub(crate) fn watch(
        &mut self,
        level: Level,
        callback: impl FnMut(&Option<f64>) + 'static,
    ) -> ListenerId {
        self.levels[level.slot()].watch(callback)
    }

    pub(crate) fn unwatch(&mut self, level: Level, id: ListenerId) -> bool {
        self.levels[level.slot()].unwatch(id)
    }

    pub(crate) fn watcher_count(&self, level: Level) -> usize {
        self.levels[level.slot()].watcher_count()
    }

    pub(crate) fn range(&self) -> &AutoRange {
        &self.range
    }

    fn watermarks(&self) -> Option<Watermarks> {
        match (self.level(Level::LowWaterMark), self.level(Level::HighWaterMark)) {
            (Some(low), Some(high)) => Some(Watermarks { low, high }),
            _ => None,
        }
    }

    /// Fold a new value into the levels and the ranging engine.
    ///
    /// Returns the new ranging stage if this value moved it.
    pub(crate) fn advance(&mut self, y: f64, min_range: f64) -> Option<RangeStage> {
        let marks = Watermarks::advance(self.watermarks(), y);
        self.levels[Level::LowWaterMark.slot()].set(Some(marks.low));
        self.levels[Level::HighWaterMark.slot()].set(Some(marks.high));
        self.levels[Level::Latest.slot()].set(Some(y));
        self.range.update(y, marks, min_range)
    }

    /// Account for a committed point.
    pub(crate) fn commit(&mut self) {
        self.next_ordinal += 1;
    }

    pub(crate) fn snapshot(&self) -> RenderState {
        RenderState {
            next_ordinal: self.next_ordinal,
            low_watermark: self.level(Level::LowWaterMark),
            high_watermark: self.level(Level::HighWaterMark),
            latest_value: self.level(Level::Latest),
            surface_height: self.range.height(),
            surface_bottom_margin: self.range.bottom_margin(),
            range_expanded_below: self.range.expanded_below(),
            range_expanded_above: self.range.expanded_above(),
            range_fully_auto: self.range.is_fully_auto(),
            stage: self.range.stage(),
        }
    }
}
