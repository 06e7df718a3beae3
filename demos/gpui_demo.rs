#[cfg(feature = "gpui")]
use std::time::Duration;

#[cfg(feature = "gpui")]
use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};

#[cfg(feature = "gpui")]
use gpui_sparkline::{Color, Sparkline, SparklineConfig, SparklineView, Theme};

#[cfg(feature = "gpui")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(600.0), px(120.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let config = SparklineConfig {
                stroke: Color::new(0.2, 0.8, 0.9, 1.0),
                stroke_thickness: 1.5,
                show_watermarks: true,
                show_latest_level: true,
                ..SparklineConfig::default()
            };
            let sparkline = Sparkline::builder()
                .config(config)
                .theme(Theme::dark())
                .build()
                .expect("default surface");

            let view = SparklineView::new(sparkline);
            let handle = view.handle();
            let view_handle = cx.new(|_| view);

            let view_for_task = view_handle.clone();
            window
                .spawn(cx, move |cx: &mut AsyncWindowContext| {
                    let mut cx = cx.clone();
                    async move {
                        let mut phase = 0.0_f64;
                        loop {
                            Timer::after(Duration::from_millis(50)).await;
                            cx.update(|_, cx| {
                                view_for_task.update(cx, |_view, view_cx| {
                                    handle.write(|sparkline| {
                                        let y = 30.0 * phase.sin() + 10.0 * (phase * 0.3).cos();
                                        let _ = sparkline.append(y, None);
                                    });
                                    phase += 0.1;
                                    view_cx.notify();
                                });
                            })
                            .ok();
                        }
                    }
                })
                .detach();

            view_handle
        })
        .unwrap();
    });
}

#[cfg(not(feature = "gpui"))]
fn main() {
    eprintln!("Enable the gpui feature to run this example.");
}
