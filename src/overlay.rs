//! Overlay lines bound to tracked levels.
//!
//! Enabling an overlay creates a fresh [`OverlayLine`] on the canvas and
//! registers its mover as a watcher on the matching level, so every later
//! change to that level repositions it. Disabling removes the line and drops
//! the watcher.

use tracing::debug;

use crate::observe::ListenerId;
use crate::render::Color;
use crate::state::{LayoutState, Level};
use crate::surface::{Canvas, OverlayLine};

#[derive(Debug)]
struct Binding {
    line: OverlayLine,
    watcher: ListenerId,
}

#[derive(Debug, Default)]
pub(crate) struct OverlayManager {
    bindings: [Option<Binding>; 3],
}

impl OverlayManager {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_enabled(&self, level: Level) -> bool {
        self.bindings[level.slot()].is_some()
    }

    pub(crate) fn line(&self, level: Level) -> Option<&OverlayLine> {
        self.bindings[level.slot()]
            .as_ref()
            .map(|binding| &binding.line)
    }

    /// Returns `false` if the overlay was already enabled.
    pub(crate) fn enable(
        &mut self,
        level: Level,
        color: Color,
        state: &mut LayoutState,
        canvas: &mut Canvas,
    ) -> bool {
        let slot = &mut self.bindings[level.slot()];
        if slot.is_some() {
            return false;
        }
        let line = OverlayLine::new(level, color, state.level(level));
        let watcher = state.watch(level, line.mover());
        canvas.insert_overlay(line.clone());
        *slot = Some(Binding { line, watcher });
        debug!(?level, "overlay enabled");
        true
    }

    /// Returns `false` if the overlay was not enabled.
    pub(crate) fn disable(
        &mut self,
        level: Level,
        state: &mut LayoutState,
        canvas: &mut Canvas,
    ) -> bool {
        let Some(binding) = self.bindings[level.slot()].take() else {
            return false;
        };
        state.unwatch(level, binding.watcher);
        canvas.remove_overlay(&binding.line);
        debug!(?level, "overlay disabled");
        true
    }

    pub(crate) fn set(
        &mut self,
        level: Level,
        visible: bool,
        color: Color,
        state: &mut LayoutState,
        canvas: &mut Canvas,
    ) {
        if visible {
            self.enable(level, color, state, canvas);
        } else {
            self.disable(level, state, canvas);
        }
    }
}
