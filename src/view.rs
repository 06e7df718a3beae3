//! Value intervals used for polyline bounds and the visible window.
//!
//! A [`Range`] is what [`Surface::visible_range`](crate::surface::Surface::visible_range)
//! reports; a [`Viewport`] pairs the horizontal window with that range when
//! mapping surface points to pixels.

/// Closed interval of surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Range {
    /// Build an interval; reversed bounds are put in order.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Distance between the bounds.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Finite and non-degenerate, so it can be stretched over pixels.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Grow to cover `value`. Non-finite values are ignored.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Check whether `value` lies inside, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Widen around the midpoint to at least `min_span`. A flat polyline
    /// still maps to a usable band this way.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        let span = self.span();
        if span >= min_span {
            return *self;
        }
        let center = (self.min + self.max) * 0.5;
        let half = min_span * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Rectangle of surface space: the horizontal window over ordinals scaled
/// by the step width, and the vertical value band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Horizontal extent in surface units.
    pub x: Range,
    /// Vertical extent in value units.
    pub y: Range,
}

impl Viewport {
    /// Pair a horizontal and a vertical extent.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Both extents can be mapped to pixels.
    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }
}
