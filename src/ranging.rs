//! Incremental auto-ranging.
//!
//! The engine sizes the drawing surface so every committed point stays
//! visible without rescanning history. The first point anchors a band of
//! `min_range` units on either side of it. Later points widen that band
//! downwards (bottom margin) and upwards (height) whenever a new extreme
//! falls outside it, so one direction may widen several times while the
//! other has not moved yet. Once both directions have widened, the height
//! switches to auto-fit and the bottom margin follows the low watermark.

use crate::surface::SurfaceHeight;

/// Running extrema of the committed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Watermarks {
    /// Lowest value seen since the last reset.
    pub low: f64,
    /// Highest value seen since the last reset.
    pub high: f64,
}

impl Watermarks {
    /// Fold `y` into the watermarks.
    ///
    /// Only one side moves per value; a value equal to an extremum or between
    /// them leaves both untouched.
    pub fn advance(current: Option<Self>, y: f64) -> Self {
        match current {
            None => Self { low: y, high: y },
            Some(marks) if y > marks.high => Self { high: y, ..marks },
            Some(marks) if y < marks.low => Self { low: y, ..marks },
            Some(marks) => marks,
        }
    }
}

/// Stage of the ranging state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStage {
    /// Fewer than two points committed.
    Seeding,
    /// The band is still allowed to grow in at least one direction.
    Expanding,
    /// Both directions have grown; height is auto-fit.
    Stable,
}

/// Auto-ranging state for one series lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoRange {
    points: usize,
    height: SurfaceHeight,
    bottom_margin: f64,
    expanded_below: bool,
    expanded_above: bool,
}

impl AutoRange {
    /// Initial state: no points, auto height, zero margin.
    pub fn new() -> Self {
        Self {
            points: 0,
            height: SurfaceHeight::Auto,
            bottom_margin: 0.0,
            expanded_below: false,
            expanded_above: false,
        }
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Account for a newly committed value.
    ///
    /// `marks` must already include `y`. `min_range` only matters for the
    /// first point after a reset. Returns the new stage when this point moved
    /// the state machine.
    pub fn update(&mut self, y: f64, marks: Watermarks, min_range: f64) -> Option<RangeStage> {
        let before = self.stage();

        if self.points == 0 {
            self.height = SurfaceHeight::Fixed(y + min_range);
            self.bottom_margin = min_range - y;
        } else {
            if !self.is_fully_auto() && marks.low < -self.bottom_margin {
                self.expanded_below = true;
                self.bottom_margin = -marks.low;
            }
            if !self.is_fully_auto()
                && let SurfaceHeight::Fixed(height) = self.height
                && marks.high > height
            {
                self.expanded_above = true;
                self.height = SurfaceHeight::Fixed(marks.high);
            }
            if self.is_fully_auto() {
                self.height = SurfaceHeight::Auto;
                self.bottom_margin = -marks.low;
            }
        }
        self.points += 1;

        let after = self.stage();
        (after != before).then_some(after)
    }

    /// Current stage.
    pub fn stage(&self) -> RangeStage {
        if self.points < 2 {
            RangeStage::Seeding
        } else if self.is_fully_auto() {
            RangeStage::Stable
        } else {
            RangeStage::Expanding
        }
    }

    /// Surface height decided so far.
    pub fn height(&self) -> SurfaceHeight {
        self.height
    }

    /// Space reserved below the surface origin for negative values.
    pub fn bottom_margin(&self) -> f64 {
        self.bottom_margin
    }

    pub fn expanded_below(&self) -> bool {
        self.expanded_below
    }

    pub fn expanded_above(&self) -> bool {
        self.expanded_above
    }

    /// Both directions have expanded at least once.
    pub fn is_fully_auto(&self) -> bool {
        self.expanded_below && self.expanded_above
    }
}

impl Default for AutoRange {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(values: &[f64], min_range: f64) -> (AutoRange, Watermarks) {
        let mut range = AutoRange::new();
        let mut marks = None;
        for &y in values {
            let next = Watermarks::advance(marks, y);
            range.update(y, next, min_range);
            marks = Some(next);
        }
        (range, marks.expect("at least one value"))
    }

    #[test]
    fn watermark_tie_breaks() {
        let marks = Watermarks::advance(None, 5.0);
        assert_eq!(marks, Watermarks { low: 5.0, high: 5.0 });
        assert_eq!(Watermarks::advance(Some(marks), 5.0), marks);
        let wide = Watermarks { low: 0.0, high: 10.0 };
        assert_eq!(Watermarks::advance(Some(wide), 4.0), wide);
        assert_eq!(
            Watermarks::advance(Some(wide), 11.0),
            Watermarks { low: 0.0, high: 11.0 }
        );
        assert_eq!(
            Watermarks::advance(Some(wide), -1.0),
            Watermarks { low: -1.0, high: 10.0 }
        );
    }

    #[test]
    fn first_point_anchors_band() {
        let (range, _) = feed(&[5.0], 25.0);
        assert_eq!(range.height(), SurfaceHeight::Fixed(30.0));
        assert_eq!(range.bottom_margin(), 20.0);
        assert_eq!(range.stage(), RangeStage::Seeding);
    }

    #[test]
    fn upward_expansion() {
        let (range, _) = feed(&[5.0, 40.0], 25.0);
        assert!(range.expanded_above());
        assert!(!range.expanded_below());
        assert_eq!(range.height(), SurfaceHeight::Fixed(40.0));
        assert_eq!(range.bottom_margin(), 20.0);
        assert_eq!(range.stage(), RangeStage::Expanding);
    }

    #[test]
    fn low_inside_margin_does_not_expand() {
        let (range, marks) = feed(&[5.0, 40.0, -10.0], 25.0);
        assert_eq!(marks.low, -10.0);
        assert!(!range.expanded_below());
        assert_eq!(range.bottom_margin(), 20.0);
        assert_eq!(range.stage(), RangeStage::Expanding);
    }

    #[test]
    fn both_expansions_reach_stable() {
        let mut range = AutoRange::new();
        let mut marks = None;
        let mut transitions = Vec::new();
        for y in [5.0, 40.0, -30.0] {
            let next = Watermarks::advance(marks, y);
            if let Some(stage) = range.update(y, next, 25.0) {
                transitions.push(stage);
            }
            marks = Some(next);
        }
        assert_eq!(transitions, vec![RangeStage::Expanding, RangeStage::Stable]);
        assert_eq!(range.height(), SurfaceHeight::Auto);
        assert_eq!(range.bottom_margin(), 30.0);
        assert!(range.is_fully_auto());
    }

    #[test]
    fn margin_widens_again_before_stable() {
        let (range, _) = feed(&[5.0, -30.0, -50.0], 25.0);
        assert!(range.expanded_below());
        assert!(!range.expanded_above());
        assert_eq!(range.bottom_margin(), 50.0);
        assert_eq!(range.height(), SurfaceHeight::Fixed(30.0));
        assert_eq!(range.stage(), RangeStage::Expanding);
    }

    #[test]
    fn height_follows_high_before_stable() {
        let (range, _) = feed(&[5.0, 40.0, 60.0], 25.0);
        assert!(range.expanded_above());
        assert!(!range.expanded_below());
        assert_eq!(range.height(), SurfaceHeight::Fixed(60.0));
        assert_eq!(range.stage(), RangeStage::Expanding);
    }

    #[test]
    fn low_first_then_high_reaches_stable() {
        let mut range = AutoRange::new();
        let mut marks = None;
        let mut stages = Vec::new();
        for y in [5.0, -30.0, 40.0, 60.0] {
            let next = Watermarks::advance(marks, y);
            range.update(y, next, 25.0);
            stages.push((range.stage(), range.height(), range.bottom_margin()));
            marks = Some(next);
        }
        assert_eq!(
            stages,
            vec![
                (RangeStage::Seeding, SurfaceHeight::Fixed(30.0), 20.0),
                (RangeStage::Expanding, SurfaceHeight::Fixed(30.0), 30.0),
                (RangeStage::Stable, SurfaceHeight::Auto, 30.0),
                (RangeStage::Stable, SurfaceHeight::Auto, 30.0),
            ]
        );
    }

    #[test]
    fn stable_margin_follows_new_lows() {
        let (range, _) = feed(&[5.0, 40.0, -30.0, 100.0, -45.0, -20.0], 25.0);
        assert_eq!(range.stage(), RangeStage::Stable);
        assert_eq!(range.height(), SurfaceHeight::Auto);
        assert_eq!(range.bottom_margin(), 45.0);
    }

    #[test]
    fn zero_value_zero_range_is_not_special() {
        let (range, _) = feed(&[0.0], 0.0);
        assert_eq!(range.height(), SurfaceHeight::Fixed(0.0));
        assert_eq!(range.bottom_margin(), 0.0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let (mut range, _) = feed(&[5.0, 40.0, -30.0], 25.0);
        range.reset();
        assert_eq!(range, AutoRange::new());
        assert_eq!(range.stage(), RangeStage::Seeding);
    }
}
