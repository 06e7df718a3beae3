use std::time::{Duration, Instant};

use gpui_sparkline::{Level, ScreenPoint, ScreenRect, Sparkline, SparklineConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SparklineConfig {
        show_watermarks: true,
        show_latest_level: true,
        point_radius: 1.5,
        ..SparklineConfig::default()
    };
    let mut sparkline = match Sparkline::builder().config(config).build() {
        Ok(sparkline) => sparkline,
        Err(err) => {
            eprintln!("failed to build sparkline: {err}");
            return;
        }
    };

    sparkline.on_point_added(|event| {
        if event.ordinal % 100 == 0 {
            println!(
                "#{:<5} {} value {:>8.3}",
                event.ordinal,
                event.time_value.timestamp().format("%H:%M:%S%.3f"),
                event.time_value.value()
            );
        }
    });
    sparkline.watch(Level::HighWaterMark, |high| {
        if let Some(high) = high {
            println!("new high watermark {high:.3}");
        }
    });

    let samples: usize = std::env::var("SAMPLES")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(500);

    let start = Instant::now();
    for i in 0..samples {
        let phase = i as f64 * 0.05;
        let y = 20.0 * phase.sin() + 5.0 * (phase * 0.13).cos() + i as f64 * 0.02;
        if let Err(err) = sparkline.append(y, None) {
            eprintln!("rejected sample {i}: {err}");
        }
        if i % 50 == 0 {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    let state = sparkline.render_state();
    println!(
        "{} points in {:.2?}: low {:?} high {:?} stage {:?} height {:?} margin {:.3}",
        state.next_ordinal,
        start.elapsed(),
        state.low_watermark,
        state.high_watermark,
        state.stage,
        state.surface_height,
        state.surface_bottom_margin,
    );

    let bounds = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(400.0, 80.0));
    let render = sparkline.render_list(bounds, true);
    println!("render list: {} commands", render.commands().len());
}
