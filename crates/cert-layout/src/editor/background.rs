//! Background alignment state
//!
//! Offsets and per-axis scales of the background artwork, kept apart from
//! field geometry. Only a successful save moves the baseline.

use log::{info, warn};

use crate::ports::BackgroundMutationSink;
use crate::types::{BackgroundAlignment, Result, TemplateId, clamp_scale};

#[derive(Debug, Clone, Default)]
pub struct BackgroundState {
    current: BackgroundAlignment,
    saved: BackgroundAlignment,
    linked: bool,
}

impl BackgroundState {
    pub fn new(saved: BackgroundAlignment) -> Self {
        let saved = saved.clamped();
        Self {
            current: saved,
            saved,
            linked: false,
        }
    }

    pub fn current(&self) -> BackgroundAlignment {
        self.current
    }

    pub fn saved(&self) -> BackgroundAlignment {
        self.saved
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.current.offset_x = x;
        self.current.offset_y = y;
    }

    /// Shift the artwork relative to its current offset.
    pub fn nudge(&mut self, dx: i32, dy: i32) {
        self.current.offset_x = self.current.offset_x.saturating_add(dx);
        self.current.offset_y = self.current.offset_y.saturating_add(dy);
    }

    pub fn set_scale_x(&mut self, percent: f32) {
        let percent = clamp_scale(percent);
        if self.linked {
            self.set_all_scales(percent);
        } else {
            self.current.scale_x = percent;
        }
    }

    pub fn set_scale_y(&mut self, percent: f32) {
        let percent = clamp_scale(percent);
        if self.linked {
            self.set_all_scales(percent);
        } else {
            self.current.scale_y = percent;
        }
    }

    /// Set both axes at once.
    pub fn set_scale(&mut self, percent: f32) {
        self.set_all_scales(clamp_scale(percent));
    }

    /// Toggle linked scaling. Neither direction changes the current values.
    pub fn toggle_linked(&mut self) -> bool {
        self.linked = !self.linked;
        self.linked
    }

    pub fn has_changes(&self) -> bool {
        self.current != self.saved
    }

    /// Discard unsaved edits.
    pub fn reset(&mut self) {
        self.current = self.saved;
    }

    /// Persist the current alignment. The baseline only moves when the sink
    /// accepts the snapshot; on failure the edits stay in place.
    pub async fn save<S>(&mut self, template: TemplateId, sink: &S) -> Result<()>
    where
        S: BackgroundMutationSink,
    {
        let snapshot = self.current;
        match sink.commit_background(template, snapshot).await {
            Ok(()) => {
                self.saved = snapshot;
                info!("Saved background alignment for template {}", template);
                Ok(())
            }
            Err(err) => {
                warn!(
                    "Saving background alignment for template {} failed: {}",
                    template, err
                );
                Err(err)
            }
        }
    }

    fn set_all_scales(&mut self, percent: f32) {
        self.current.scale = percent;
        self.current.scale_x = percent;
        self.current.scale_y = percent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_scaling_mirrors_axes() {
        let mut state = BackgroundState::default();
        assert!(state.toggle_linked());
        state.set_scale_x(120.0);
        let current = state.current();
        assert_eq!(current.scale_x, 120.0);
        assert_eq!(current.scale_y, 120.0);
        assert_eq!(current.scale, 120.0);

        assert!(!state.toggle_linked());
        state.set_scale_y(90.0);
        let current = state.current();
        assert_eq!(current.scale_x, 120.0);
        assert_eq!(current.scale_y, 90.0);
    }

    #[test]
    fn test_unlinking_preserves_values() {
        let mut state = BackgroundState::default();
        state.set_scale_x(110.0);
        state.toggle_linked();
        let before = state.current();
        state.toggle_linked();
        assert_eq!(state.current(), before);
    }

    #[test]
    fn test_scales_are_clamped() {
        let mut state = BackgroundState::default();
        state.set_scale_x(10.0);
        state.set_scale_y(400.0);
        assert_eq!(state.current().scale_x, 50.0);
        assert_eq!(state.current().scale_y, 150.0);
        state.set_scale(151.0);
        assert_eq!(state.current().scale, 150.0);
    }

    #[test]
    fn test_has_changes_and_reset() {
        let mut state = BackgroundState::default();
        assert!(!state.has_changes());
        state.nudge(3, -2);
        assert!(state.has_changes());
        assert_eq!(state.current().offset_x, 3);
        assert_eq!(state.current().offset_y, -2);

        state.set_offset(0, 0);
        assert!(!state.has_changes());

        state.set_offset(-40, 12);
        state.reset();
        assert!(!state.has_changes());
        assert_eq!(state.current(), BackgroundAlignment::default());
    }
}
