use std::cell::RefCell;
use std::rc::Rc;

use gpui_sparkline::{Level, Point, Sparkline, TimeSeries};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn finite(values: Vec<f64>) -> Vec<f64> {
    values.into_iter().filter(|value| value.is_finite()).collect()
}

fn chart_with(values: &[f64]) -> Sparkline {
    let mut chart = Sparkline::new();
    chart
        .extend_values(values.iter().copied())
        .expect("finite values");
    chart
}

#[quickcheck]
fn ordinal_counts_points_and_sets_x(values: Vec<f64>) -> bool {
    let values = finite(values);
    let chart = chart_with(&values);
    let surface = chart.surface();
    let points = surface.polyline().points();
    let step = chart.config().step_width;

    chart.render_state().next_ordinal == values.len()
        && points.len() == values.len()
        && points
            .iter()
            .enumerate()
            .all(|(ordinal, point)| point.x == ordinal as f64 * step)
}

#[quickcheck]
fn watermarks_bound_every_value(values: Vec<f64>) -> TestResult {
    let values = finite(values);
    if values.is_empty() {
        return TestResult::discard();
    }
    let mut chart = Sparkline::new();
    for (index, value) in values.iter().enumerate() {
        chart.append(*value, None).expect("finite value");
        let (Some(low), Some(high)) = (chart.low_water_mark(), chart.high_water_mark()) else {
            return TestResult::failed();
        };
        if !values[..=index].iter().all(|seen| low <= *seen && *seen <= high) {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}

#[quickcheck]
fn watermarks_move_monotonically(values: Vec<f64>) -> bool {
    let values = finite(values);
    let mut chart = Sparkline::new();
    let highs = Rc::new(RefCell::new(Vec::new()));
    let lows = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&highs);
    chart.watch(Level::HighWaterMark, move |value| sink.borrow_mut().extend(value));
    let sink = Rc::clone(&lows);
    chart.watch(Level::LowWaterMark, move |value| sink.borrow_mut().extend(value));

    chart.extend_values(values).expect("finite values");

    let highs = highs.borrow();
    let lows = lows.borrow();
    highs.windows(2).all(|pair| pair[0] <= pair[1]) && lows.windows(2).all(|pair| pair[0] >= pair[1])
}

#[quickcheck]
fn replay_is_idempotent(values: Vec<f64>) -> bool {
    let values = finite(values);
    let mut chart = chart_with(&values);
    let state = chart.render_state();
    let points: Vec<Point> = chart.surface().polyline().points().to_vec();

    chart.redraw();
    let replayed_state = chart.render_state();
    let replayed_points: Vec<Point> = chart.surface().polyline().points().to_vec();

    state == replayed_state && points == replayed_points
}

#[quickcheck]
fn reassigned_series_matches_fresh_chart(first: Vec<f64>, second: Vec<f64>) -> bool {
    let first = finite(first);
    let second = finite(second);
    let mut chart = chart_with(&first);
    let series = TimeSeries::from_values(second.iter().copied()).expect("finite values");
    chart.replace_series(series);

    let fresh = chart_with(&second);
    chart.render_state() == fresh.render_state()
        && chart.surface().polyline().points() == fresh.surface().polyline().points()
}
