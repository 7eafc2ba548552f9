//! Display power state

/// Visibility and ambient flags of the display.
///
/// Only the lifecycle adapter mutates this; it never changes on its own.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerState {
    visible: bool,
    ambient: bool,
}

impl PowerState {
    /// Create a power state from its two flags.
    pub const fn new(visible: bool, ambient: bool) -> Self {
        Self { visible, ambient }
    }

    /// Update visibility. Returns whether the value changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    /// Update the ambient flag. Returns whether the value changed.
    pub fn set_ambient(&mut self, ambient: bool) -> bool {
        let changed = self.ambient != ambient;
        self.ambient = ambient;
        changed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    /// Periodic redraw only runs while visible and interactive.
    pub fn should_run_timer(&self) -> bool {
        self.visible && !self.ambient
    }
}
