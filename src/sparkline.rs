//! Sparkline widget entry points and builders.
//!
//! A [`Sparkline`] owns its [`TimeSeries`] and subscribes to its changes.
//! Each appended record runs through the pipeline once: map to a surface
//! point, update levels and auto-ranging (which repositions bound overlays),
//! commit to the polyline, optionally drop a marker, then notify
//! [`PointAdded`] listeners and the scroll hook. Any other change to the
//! series clears the surface and replays every record from ordinal zero.
//!
//! Callbacks registered on the chart run while it is mid-update and must not
//! call back into it.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::config::SparklineConfig;
use crate::error::{SeriesError, SetupError};
use crate::geom::{Insets, Point, ScreenRect};
use crate::observe::{ListenerId, Listeners};
use crate::overlay::OverlayManager;
use crate::ranging::RangeStage;
use crate::render::{Color, RenderList, build_render_list};
use crate::series::{SeriesChange, SubscriptionId, TimeSeries, TimeValue, TimeValueId, Timestamp};
use crate::state::{LayoutState, Level, RenderState};
use crate::style::Theme;
use crate::surface::{Canvas, Marker, OverlayLine, Polyline, Surface, SurfaceBuilder};
use crate::transform::map_point;

/// Payload of the point-added event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAdded {
    /// Zero-based position among the points drawn since the last reset.
    pub ordinal: usize,
    /// Surface point committed to the polyline.
    pub point: Point,
    /// Record the point was computed from.
    pub time_value: TimeValue,
}

struct ChartCore {
    config: SparklineConfig,
    theme: Theme,
    surface: Surface,
    state: LayoutState,
    overlays: OverlayManager,
    point_added: Listeners<PointAdded>,
    scroll_to_right_end: Option<Box<dyn FnMut()>>,
}

impl ChartCore {
    fn on_series_change(&mut self, change: &SeriesChange<'_>) {
        match change {
            SeriesChange::Appended(record) => self.draw(record),
            SeriesChange::Reset(records) => self.reset(records),
        }
    }

    fn reset(&mut self, records: &[TimeValue]) {
        debug!(records = records.len(), "full reset, replaying series");
        self.surface.clear_geometry();
        self.state.reset();
        for record in records {
            self.draw(record);
        }
    }

    fn draw(&mut self, record: &TimeValue) {
        let ordinal = self.state.next_ordinal();
        let point = map_point(ordinal, record.value(), self.config.step_width);

        if let Some(stage) = self.state.advance(point.y, self.config.min_y_range) {
            debug!(?stage, ordinal, "range stage changed");
        }
        let range = self.state.range();
        self.surface
            .canvas_mut()
            .set_layout(range.height(), range.bottom_margin());

        self.surface.polyline_mut().push(point);
        if self.config.point_radius > 0.0 {
            self.surface.canvas_mut().add_marker(Marker {
                center: point,
                radius: self.config.point_radius,
                fill: self.config.point_fill,
            });
        }
        self.state.commit();
        trace!(ordinal, value = point.y, "point committed");

        self.point_added.emit(&PointAdded {
            ordinal,
            point,
            time_value: *record,
        });
        if let Some(scroll) = self.scroll_to_right_end.as_mut() {
            scroll();
        }
    }

    fn set_overlay(&mut self, level: Level, visible: bool) {
        let color = self.theme.overlay_color(level);
        self.overlays.set(
            level,
            visible,
            color,
            &mut self.state,
            self.surface.canvas_mut(),
        );
    }

    fn apply_overlay_config(&mut self) {
        let watermarks = self.config.show_watermarks;
        self.set_overlay(Level::LowWaterMark, watermarks);
        self.set_overlay(Level::HighWaterMark, watermarks);
        self.set_overlay(Level::Latest, self.config.show_latest_level);
    }
}

/// Streaming line chart with auto-ranging and level overlays.
pub struct Sparkline {
    series: TimeSeries,
    subscription: SubscriptionId,
    core: Rc<RefCell<ChartCore>>,
}

impl Sparkline {
    /// Create a sparkline with default configuration and an empty series.
    pub fn new() -> Self {
        Self::from_parts(
            SparklineConfig::default(),
            Theme::default(),
            Surface::new(),
            TimeSeries::new(),
        )
    }

    /// Start building a sparkline with custom configuration.
    pub fn builder() -> SparklineBuilder {
        SparklineBuilder::default()
    }

    fn from_parts(
        config: SparklineConfig,
        theme: Theme,
        mut surface: Surface,
        mut series: TimeSeries,
    ) -> Self {
        // Overlays on a supplied canvas have no binding to this chart.
        surface.canvas_mut().clear_overlays();
        let core = Rc::new(RefCell::new(ChartCore {
            config,
            theme,
            surface,
            state: LayoutState::new(),
            overlays: OverlayManager::new(),
            point_added: Listeners::new(),
            scroll_to_right_end: None,
        }));
        let subscription = attach(&mut series, &core);
        {
            let mut core = core.borrow_mut();
            core.apply_overlay_config();
            core.reset(series.as_slice());
        }
        Self {
            series,
            subscription,
            core,
        }
    }

    /// Append a value; a missing timestamp defaults to now.
    pub fn append(
        &mut self,
        value: f64,
        timestamp: Option<Timestamp>,
    ) -> Result<TimeValueId, SeriesError> {
        self.series.append(value, timestamp)
    }

    /// Append several values in order.
    pub fn extend_values<I>(&mut self, values: I) -> Result<usize, SeriesError>
    where
        I: IntoIterator<Item = f64>,
    {
        self.series.extend_values(values)
    }

    /// Access the series.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Replace every record of the series and redraw from them.
    pub fn replace<I>(&mut self, records: I) -> Result<(), SeriesError>
    where
        I: IntoIterator<Item = TimeValue>,
    {
        self.series.replace(records)
    }

    /// Remove every record and clear the surface.
    pub fn clear(&mut self) {
        self.series.clear();
    }

    /// Keep only the records matching `keep`, redrawing if any were removed.
    pub fn retain(&mut self, keep: impl FnMut(&TimeValue) -> bool) -> usize {
        self.series.retain(keep)
    }

    /// Swap in a new series and redraw from it.
    ///
    /// The previous series is unsubscribed before the new one is attached
    /// and is returned free of this chart's listener.
    pub fn set_series(&mut self, series: TimeSeries) -> TimeSeries {
        self.series.unsubscribe(self.subscription);
        let previous = std::mem::replace(&mut self.series, series);
        self.subscription = attach(&mut self.series, &self.core);
        debug!(records = self.series.len(), "series reassigned");
        self.core.borrow_mut().reset(self.series.as_slice());
        previous
    }

    /// Swap in a new series, dropping the previous one.
    pub fn replace_series(&mut self, series: TimeSeries) {
        drop(self.set_series(series));
    }

    /// Clear the surface and replay the whole series.
    pub fn redraw(&mut self) {
        self.core.borrow_mut().reset(self.series.as_slice());
    }

    /// Current configuration.
    pub fn config(&self) -> SparklineConfig {
        self.core.borrow().config.clone()
    }

    /// Apply a whole configuration.
    ///
    /// Overlays are toggled to match; a changed step width redraws the series.
    pub fn set_config(&mut self, config: SparklineConfig) {
        let redraw = {
            let mut core = self.core.borrow_mut();
            let redraw = core.config.step_width != config.step_width;
            core.config = config;
            core.apply_overlay_config();
            redraw
        };
        if redraw {
            self.redraw();
        }
    }

    fn update_config(&self, update: impl FnOnce(&mut SparklineConfig)) {
        update(&mut self.core.borrow_mut().config);
    }

    /// Polyline stroke width. Also used for overlay thickness.
    pub fn set_stroke_thickness(&mut self, thickness: f64) {
        self.update_config(|config| config.stroke_thickness = thickness);
    }

    /// Polyline stroke colour.
    pub fn set_stroke(&mut self, color: Color) {
        self.update_config(|config| config.stroke = color);
    }

    /// Inset around the polyline.
    pub fn set_line_margin(&mut self, margin: Insets) {
        self.update_config(|config| config.line_margin = margin);
    }

    /// Fill of markers committed from now on.
    pub fn set_point_fill(&mut self, fill: Color) {
        self.update_config(|config| config.point_fill = fill);
    }

    /// Radius of markers committed from now on; zero disables markers.
    pub fn set_point_radius(&mut self, radius: f64) {
        self.update_config(|config| config.point_radius = radius);
    }

    /// Minimum band around the first point. Applies from the next reset.
    pub fn set_min_y_range(&mut self, range: f64) {
        self.update_config(|config| config.min_y_range = range);
    }

    /// Horizontal step between points. Redraws the series when it changes.
    pub fn set_step_width(&mut self, step: f64) {
        let mut config = self.config();
        config.step_width = step;
        self.set_config(config);
    }

    /// Toggle the low and high watermark overlays.
    pub fn set_show_watermarks(&mut self, show: bool) {
        let mut core = self.core.borrow_mut();
        core.config.show_watermarks = show;
        core.set_overlay(Level::LowWaterMark, show);
        core.set_overlay(Level::HighWaterMark, show);
    }

    /// Toggle the latest-value overlay.
    pub fn set_show_latest_level(&mut self, show: bool) {
        let mut core = self.core.borrow_mut();
        core.config.show_latest_level = show;
        core.set_overlay(Level::Latest, show);
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.core.borrow().theme.clone()
    }

    /// Replace the theme. Overlays already shown keep their colour until
    /// they are re-enabled.
    pub fn set_theme(&mut self, theme: Theme) {
        self.core.borrow_mut().theme = theme;
    }

    /// Highest value since the last reset.
    pub fn high_water_mark(&self) -> Option<f64> {
        self.level(Level::HighWaterMark)
    }

    /// Lowest value since the last reset.
    pub fn low_water_mark(&self) -> Option<f64> {
        self.level(Level::LowWaterMark)
    }

    /// Most recently committed value.
    pub fn latest_level(&self) -> Option<f64> {
        self.level(Level::Latest)
    }

    /// Current value of a tracked level.
    pub fn level(&self, level: Level) -> Option<f64> {
        self.core.borrow().state.level(level)
    }

    /// Snapshot of the derived render state.
    pub fn render_state(&self) -> RenderState {
        self.core.borrow().state.snapshot()
    }

    /// Stage of the auto-ranging state machine.
    pub fn range_stage(&self) -> RangeStage {
        self.core.borrow().state.range().stage()
    }

    /// Borrow the drawing surface.
    pub fn surface(&self) -> Ref<'_, Surface> {
        Ref::map(self.core.borrow(), |core| &core.surface)
    }

    /// The overlay line following `level`, if shown.
    pub fn overlay(&self, level: Level) -> Option<OverlayLine> {
        self.core.borrow().overlays.line(level).cloned()
    }

    /// Check whether the overlay for `level` is shown.
    pub fn is_overlay_visible(&self, level: Level) -> bool {
        self.core.borrow().overlays.is_enabled(level)
    }

    /// Call `callback` with the new value every time `level` changes.
    ///
    /// # Panics
    ///
    /// The callback runs while the chart is updating. Calling back into
    /// this sparkline from it panics on a `RefCell` borrow.
    pub fn watch(
        &mut self,
        level: Level,
        mut callback: impl FnMut(Option<f64>) + 'static,
    ) -> ListenerId {
        self.core
            .borrow_mut()
            .state
            .watch(level, move |value: &Option<f64>| callback(*value))
    }

    /// Remove a watcher registered with [`watch`](Self::watch).
    pub fn unwatch(&mut self, level: Level, id: ListenerId) -> bool {
        self.core.borrow_mut().state.unwatch(level, id)
    }

    /// Number of callbacks following `level`, shown overlays included.
    pub fn watcher_count(&self, level: Level) -> usize {
        self.core.borrow().state.watcher_count(level)
    }

    /// Register a listener called once per committed point, in order.
    ///
    /// # Panics
    ///
    /// The listener runs while the chart is updating. Calling back into
    /// this sparkline from it panics on a `RefCell` borrow.
    pub fn on_point_added(&mut self, listener: impl FnMut(&PointAdded) + 'static) -> ListenerId {
        self.core.borrow_mut().point_added.add(listener)
    }

    /// Remove a point-added listener.
    pub fn remove_point_added(&mut self, id: ListenerId) -> bool {
        self.core.borrow_mut().point_added.remove(id)
    }

    /// Hook invoked after every committed point so a host can keep the
    /// newest data in view.
    ///
    /// # Panics
    ///
    /// Calling back into this sparkline from the hook panics on a
    /// `RefCell` borrow.
    pub fn set_scroll_to_right_end(&mut self, hook: impl FnMut() + 'static) {
        self.core.borrow_mut().scroll_to_right_end = Some(Box::new(hook));
    }

    /// Remove the scroll hook.
    pub fn clear_scroll_to_right_end(&mut self) {
        self.core.borrow_mut().scroll_to_right_end = None;
    }

    /// Build render commands for the current surface.
    pub fn render_list(&self, bounds: ScreenRect, follow_latest: bool) -> RenderList {
        let core = self.core.borrow();
        build_render_list(&core.surface, &core.config, bounds, follow_latest)
    }
}

impl Default for Sparkline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sparkline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sparkline")
            .field("series", &self.series)
            .field("state", &self.render_state())
            .finish()
    }
}

fn attach(series: &mut TimeSeries, core: &Rc<RefCell<ChartCore>>) -> SubscriptionId {
    let core = Rc::downgrade(core);
    series.subscribe(move |change| {
        if let Some(core) = core.upgrade() {
            core.borrow_mut().on_series_change(change);
        }
    })
}

/// Builder for configuring a sparkline before construction.
#[derive(Debug)]
pub struct SparklineBuilder {
    config: SparklineConfig,
    theme: Theme,
    series: TimeSeries,
    surface: SurfaceBuilder,
}

impl Default for SparklineBuilder {
    fn default() -> Self {
        Self {
            config: SparklineConfig::default(),
            theme: Theme::default(),
            series: TimeSeries::new(),
            surface: Surface::builder()
                .canvas(Canvas::new())
                .polyline(Polyline::new()),
        }
    }
}

impl SparklineBuilder {
    /// Set the configuration.
    pub fn config(mut self, config: SparklineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Start from an existing series. Its records are drawn on build.
    pub fn series(mut self, series: TimeSeries) -> Self {
        self.series = series;
        self
    }

    /// Supply the drawing surface parts explicitly.
    pub fn surface(mut self, surface: SurfaceBuilder) -> Self {
        self.surface = surface;
        self
    }

    /// Build the sparkline.
    pub fn build(self) -> Result<Sparkline, SetupError> {
        let surface = self.surface.build().inspect_err(|err| {
            warn!(%err, "sparkline surface rejected");
        })?;
        Ok(Sparkline::from_parts(
            self.config,
            self.theme,
            surface,
            self.series,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::surface::SurfaceHeight;

    fn chart_with(values: &[f64]) -> Sparkline {
        let mut chart = Sparkline::new();
        chart.extend_values(values.iter().copied()).unwrap();
        chart
    }

    #[test]
    fn scenario_single_point_seeds_band() {
        let chart = chart_with(&[5.0]);
        let state = chart.render_state();
        assert_eq!(state.surface_height, SurfaceHeight::Fixed(30.0));
        assert_eq!(state.surface_bottom_margin, 20.0);
        assert_eq!(state.stage, RangeStage::Seeding);
        assert_eq!(chart.surface().canvas().height(), SurfaceHeight::Fixed(30.0));
        assert_eq!(chart.surface().canvas().bottom_margin(), 20.0);
    }

    #[test]
    fn scenario_upward_expansion() {
        let chart = chart_with(&[5.0, 40.0]);
        let state = chart.render_state();
        assert!(state.range_expanded_above);
        assert!(!state.range_expanded_below);
        assert_eq!(state.surface_height, SurfaceHeight::Fixed(40.0));
        assert_eq!(state.stage, RangeStage::Expanding);
    }

    #[test]
    fn scenario_low_within_margin() {
        let chart = chart_with(&[5.0, 40.0, -10.0]);
        let state = chart.render_state();
        assert_eq!(state.low_watermark, Some(-10.0));
        assert!(!state.range_expanded_below);
        assert_eq!(state.surface_bottom_margin, 20.0);
    }

    #[test]
    fn scenario_stable_after_both_expansions() {
        let chart = chart_with(&[5.0, 40.0, -30.0]);
        let state = chart.render_state();
        assert_eq!(state.stage, RangeStage::Stable);
        assert!(state.range_fully_auto);
        assert_eq!(state.surface_height, SurfaceHeight::Auto);
        assert_eq!(state.surface_bottom_margin, 30.0);
        assert_eq!(chart.surface().canvas().height(), SurfaceHeight::Auto);
    }

    #[test]
    fn points_step_by_ordinal() {
        let chart = chart_with(&[1.0, 2.0, 3.0]);
        let surface = chart.surface();
        let xs: Vec<f64> = surface.polyline().points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
        assert_eq!(chart.render_state().next_ordinal, 3);
    }

    #[test]
    fn point_added_fires_in_order_with_source_record() {
        let mut chart = Sparkline::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        chart.on_point_added(move |event| sink.borrow_mut().push(*event));

        let first = chart.append(3.0, None).unwrap();
        let second = chart.append(4.0, None).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].ordinal, 0);
        assert_eq!(seen[0].time_value.id(), first);
        assert_eq!(seen[1].point, Point::new(2.0, 4.0));
        assert_eq!(seen[1].time_value.id(), second);
    }

    #[test]
    fn removed_listener_stops_firing() {
        let mut chart = Sparkline::new();
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        let id = chart.on_point_added(move |_| sink.set(sink.get() + 1));
        chart.append(1.0, None).unwrap();
        assert!(chart.remove_point_added(id));
        chart.append(2.0, None).unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    #[should_panic(expected = "already mutably borrowed")]
    fn listener_calling_back_into_chart_panics() {
        let chart = Rc::new(RefCell::new(Sparkline::new()));
        let inner = Rc::downgrade(&chart);
        chart.borrow_mut().on_point_added(move |_| {
            if let Some(chart) = inner.upgrade() {
                let _ = chart.borrow().latest_level();
            }
        });
        let _ = chart.borrow_mut().append(1.0, None);
    }

    #[test]
    fn scroll_hook_runs_after_each_commit() {
        let mut chart = Sparkline::new();
        let calls = Rc::new(Cell::new(0));
        let sink = Rc::clone(&calls);
        chart.set_scroll_to_right_end(move || sink.set(sink.get() + 1));
        chart.extend_values([1.0, 2.0, 3.0]).unwrap();
        assert_eq!(calls.get(), 3);
        chart.clear_scroll_to_right_end();
        chart.append(4.0, None).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn markers_only_when_radius_positive() {
        let mut chart = Sparkline::new();
        chart.append(1.0, None).unwrap();
        chart.set_point_radius(2.0);
        chart.append(2.0, None).unwrap();
        let surface = chart.surface();
        let markers = surface.canvas().markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].center, Point::new(2.0, 2.0));
        assert_eq!(markers[0].radius, 2.0);
    }

    #[test]
    fn enabling_watermarks_after_points_positions_immediately() {
        let mut chart = chart_with(&[5.0, 40.0, -10.0]);
        chart.set_show_watermarks(true);
        let low = chart.overlay(Level::LowWaterMark).expect("low overlay");
        let high = chart.overlay(Level::HighWaterMark).expect("high overlay");
        assert_eq!(low.offset(), -10.0);
        assert_eq!(high.offset(), 40.0);
        assert_eq!(chart.surface().canvas().overlays().len(), 2);

        chart.append(-50.0, None).unwrap();
        assert_eq!(low.offset(), -50.0);

        chart.set_show_watermarks(false);
        chart.append(-80.0, None).unwrap();
        chart.append(90.0, None).unwrap();
        assert_eq!(low.offset(), -50.0);
        assert_eq!(high.offset(), 40.0);
        assert!(chart.surface().canvas().overlays().is_empty());
        assert!(chart.overlay(Level::LowWaterMark).is_none());
        assert_eq!(chart.watcher_count(Level::LowWaterMark), 0);
        assert_eq!(chart.watcher_count(Level::HighWaterMark), 0);
    }

    #[test]
    fn latest_level_overlay_tracks_every_point() {
        let mut chart = Sparkline::new();
        chart.set_show_latest_level(true);
        let line = chart.overlay(Level::Latest).unwrap();
        assert_eq!(line.value(), None);
        chart.append(3.0, None).unwrap();
        chart.append(1.0, None).unwrap();
        assert_eq!(line.offset(), 1.0);
        assert_eq!(chart.latest_level(), Some(1.0));
    }

    #[test]
    fn reset_replays_from_ordinal_zero() {
        let mut chart = chart_with(&[1.0, 2.0, 3.0, 4.0]);
        chart.retain(|record| record.value() >= 3.0);

        let state = chart.render_state();
        assert_eq!(state.next_ordinal, 2);
        assert_eq!(state.low_watermark, Some(3.0));
        let surface = chart.surface();
        assert_eq!(
            surface.polyline().points(),
            &[Point::new(0.0, 3.0), Point::new(2.0, 4.0)]
        );
    }

    #[test]
    fn clear_restores_initial_state_and_keeps_overlays() {
        let mut chart = chart_with(&[1.0, 2.0]);
        chart.set_show_latest_level(true);
        chart.set_point_radius(1.0);
        chart.append(3.0, None).unwrap();
        chart.clear();

        let state = chart.render_state();
        assert_eq!(state.next_ordinal, 0);
        assert_eq!(state.low_watermark, None);
        assert_eq!(state.high_watermark, None);
        assert_eq!(state.latest_value, None);
        assert_eq!(state.surface_height, SurfaceHeight::Auto);
        let surface = chart.surface();
        assert!(surface.polyline().is_empty());
        assert!(surface.canvas().markers().is_empty());
        assert_eq!(surface.canvas().overlays().len(), 1);
        assert_eq!(surface.canvas().overlays()[0].value(), None);
    }

    #[test]
    fn replaced_contents_keep_drawing_appends() {
        let mut chart = chart_with(&[1.0, 2.0]);
        let now = chrono::Utc::now();
        chart
            .replace([TimeValue::new(TimeValueId::new(10), now, 10.0)])
            .unwrap();
        chart.append(20.0, None).unwrap();

        assert_eq!(chart.series().len(), 2);
        assert_eq!(chart.series().subscriber_count(), 1);
        assert_eq!(chart.render_state().next_ordinal, 2);
        assert_eq!(chart.high_water_mark(), Some(20.0));
        assert_eq!(chart.low_water_mark(), Some(10.0));
        let surface = chart.surface();
        assert_eq!(
            surface.polyline().points(),
            &[Point::new(0.0, 10.0), Point::new(2.0, 20.0)]
        );
    }

    #[test]
    fn set_series_unsubscribes_previous() {
        let mut chart = chart_with(&[1.0, 2.0]);
        let replacement = TimeSeries::from_values([10.0, 20.0, 30.0]).unwrap();
        let mut previous = chart.set_series(replacement);

        assert_eq!(previous.subscriber_count(), 0);
        assert_eq!(chart.series().subscriber_count(), 1);
        assert_eq!(chart.render_state().next_ordinal, 3);
        assert_eq!(chart.high_water_mark(), Some(30.0));

        previous.append(99.0, None).unwrap();
        assert_eq!(chart.high_water_mark(), Some(30.0));
        assert_eq!(chart.render_state().next_ordinal, 3);
    }

    #[test]
    fn transferred_series_drives_new_owner() {
        let mut first = chart_with(&[1.0, 2.0]);
        let series = first.set_series(TimeSeries::new());
        let mut second = Sparkline::builder().series(series).build().unwrap();
        assert_eq!(second.render_state().next_ordinal, 2);

        second.append(3.0, None).unwrap();
        assert_eq!(second.render_state().next_ordinal, 3);
        assert_eq!(first.render_state().next_ordinal, 0);
    }

    #[test]
    fn builder_rejects_missing_surface_parts() {
        let err = Sparkline::builder()
            .surface(Surface::builder().canvas(Canvas::new()))
            .build()
            .unwrap_err();
        assert_eq!(err, SetupError::MissingPolyline);

        let err = Sparkline::builder()
            .surface(Surface::builder().polyline(Polyline::new()))
            .build()
            .unwrap_err();
        assert_eq!(err, SetupError::MissingCanvas);
    }

    #[test]
    fn builder_config_enables_overlays() {
        let config = SparklineConfig {
            show_watermarks: true,
            show_latest_level: true,
            ..SparklineConfig::default()
        };
        let chart = Sparkline::builder()
            .config(config)
            .series(TimeSeries::from_values([2.0, 8.0]).unwrap())
            .build()
            .unwrap();
        for level in Level::ALL {
            assert!(chart.is_overlay_visible(level));
        }
        assert_eq!(chart.overlay(Level::HighWaterMark).unwrap().offset(), 8.0);
    }

    #[test]
    fn step_width_change_redraws() {
        let mut chart = chart_with(&[1.0, 2.0, 3.0]);
        chart.set_step_width(5.0);
        let surface = chart.surface();
        assert_eq!(surface.polyline().last(), Some(Point::new(10.0, 3.0)));
    }

    #[test]
    fn min_y_range_applies_on_next_reset() {
        let mut chart = chart_with(&[5.0]);
        chart.set_min_y_range(10.0);
        assert_eq!(chart.render_state().surface_height, SurfaceHeight::Fixed(30.0));
        chart.redraw();
        assert_eq!(chart.render_state().surface_height, SurfaceHeight::Fixed(15.0));
        assert_eq!(chart.render_state().surface_bottom_margin, 5.0);
    }

    #[test]
    fn watch_pushes_level_changes() {
        let mut chart = Sparkline::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = chart.watch(Level::HighWaterMark, move |value| sink.borrow_mut().push(value));
        chart.extend_values([1.0, 0.5, 2.0]).unwrap();
        assert!(chart.unwatch(Level::HighWaterMark, id));
        chart.append(10.0, None).unwrap();
        assert_eq!(*seen.borrow(), vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn non_finite_append_leaves_chart_untouched() {
        let mut chart = chart_with(&[1.0]);
        assert!(chart.append(f64::NAN, None).is_err());
        assert_eq!(chart.render_state().next_ordinal, 1);
        assert_eq!(chart.series().len(), 1);
    }
}
