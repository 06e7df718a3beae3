use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gpui::prelude::*;
use gpui::{Bounds, Pixels, Window, canvas, div};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::RenderList;
use crate::sparkline::Sparkline;

use super::config::SparklineViewConfig;
use super::paint::{paint_render_list, to_hsla};

/// A GPUI view that paints a [`Sparkline`].
///
/// The view installs the sparkline's scroll hook: with
/// [`follow_latest`](SparklineViewConfig::follow_latest) set, every committed
/// point pins the view to the right end again.
pub struct SparklineView {
    sparkline: Rc<RefCell<Sparkline>>,
    config: SparklineViewConfig,
    follow: Rc<Cell<bool>>,
}

impl SparklineView {
    /// Create a new view using the default [`SparklineViewConfig`].
    pub fn new(sparkline: Sparkline) -> Self {
        Self::with_config(sparkline, SparklineViewConfig::default())
    }

    /// Create a new view with a custom configuration.
    pub fn with_config(mut sparkline: Sparkline, config: SparklineViewConfig) -> Self {
        let follow = Rc::new(Cell::new(config.follow_latest));
        if config.follow_latest {
            let pin = Rc::clone(&follow);
            sparkline.set_scroll_to_right_end(move || pin.set(true));
        }
        Self {
            sparkline: Rc::new(RefCell::new(sparkline)),
            config,
            follow,
        }
    }

    /// Get a handle for updating the underlying sparkline.
    ///
    /// Notify the view entity after writing so it repaints.
    pub fn handle(&self) -> SparklineHandle {
        SparklineHandle {
            sparkline: Rc::clone(&self.sparkline),
        }
    }

    /// Stop or resume keeping the newest point at the right edge.
    ///
    /// While `follow_latest` is configured, the next committed point pins
    /// the view again.
    pub fn set_following(&mut self, follow: bool) {
        self.follow.set(follow);
    }

    /// Check whether the view currently tracks the newest point.
    pub fn is_following(&self) -> bool {
        self.follow.get()
    }
}

impl Render for SparklineView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let sparkline = Rc::clone(&self.sparkline);
        let follow = self.follow.get();
        let background = self
            .config
            .background
            .unwrap_or_else(|| self.sparkline.borrow().theme().background);

        div().size_full().bg(to_hsla(background)).child(
            canvas(
                move |bounds, _, _| build_frame(&sparkline.borrow(), bounds, follow),
                move |_, render, window, _| {
                    paint_render_list(&render, window);
                },
            )
            .size_full(),
        )
    }
}

/// A handle for mutating a [`Sparkline`] held inside a [`SparklineView`].
///
/// The handle clones cheaply and can be moved into foreground tasks.
#[derive(Clone)]
pub struct SparklineHandle {
    sparkline: Rc<RefCell<Sparkline>>,
}

impl SparklineHandle {
    /// Read the sparkline state.
    ///
    /// # Panics
    ///
    /// Panics if the sparkline is already borrowed mutably, for example
    /// when called from a sparkline callback during [`write`](Self::write).
    pub fn read<R>(&self, f: impl FnOnce(&Sparkline) -> R) -> R {
        f(&self.sparkline.borrow())
    }

    /// Mutate the sparkline state.
    ///
    /// # Panics
    ///
    /// Panics if the sparkline is already borrowed, for example when called
    /// from inside another `read` or `write`, or from a sparkline callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Sparkline) -> R) -> R {
        f(&mut self.sparkline.borrow_mut())
    }
}

fn build_frame(sparkline: &Sparkline, bounds: Bounds<Pixels>, follow: bool) -> RenderList {
    let rect = screen_rect(bounds);
    if rect.width() <= 1.0 || rect.height() <= 1.0 {
        return RenderList::new();
    }
    sparkline.render_list(rect, follow)
}

fn screen_rect(bounds: Bounds<Pixels>) -> ScreenRect {
    let min = ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));
    let max = ScreenPoint::new(
        min.x + f32::from(bounds.size.width),
        min.y + f32::from(bounds.size.height),
    );
    ScreenRect::new(min, max)
}
