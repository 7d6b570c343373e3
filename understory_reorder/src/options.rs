// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration: start parameters, runtime options, and tuning constants.

use alloc::string::String;
use core::time::Duration;

/// Default delay before a touch press turns into a drag.
pub const DEFAULT_TOUCH_PRESS_DELAY: Duration = Duration::from_millis(200);

/// Quiet time after the last pointer move before a hit test runs.
pub const HIT_TEST_DEBOUNCE: Duration = Duration::from_millis(100);

/// Duration of the shift animation before the index commit.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Period of the auto-scroll check while dragging.
pub const SCROLL_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Scroll distance applied per auto-scroll tick.
pub const SCROLL_STEP: f64 = 1.0;

/// Class marking the current drop target.
pub const TARGET_CLASS: &str = "drag_and_drop_target";

/// Class marking children that are animating toward a new slot.
pub const TRANSITION_CLASS: &str = "drag_and_drop_transition";

/// Class marking the child being dragged.
pub const DRAGGED_CLASS: &str = "dragged_element";

/// Class marking the container while a drag is active.
pub const ACTIVE_CLASS: &str = "active";

/// Parameters for [`Reorderer::start`](crate::Reorderer::start).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartConfig<N> {
    /// The scrollable container whose children are reordered.
    pub container: N,
    /// When set, only children carrying this class can be dragged or
    /// targeted. Otherwise every eligible child can.
    pub child_match_class: Option<String>,
}

impl<N> StartConfig<N> {
    /// Creates a config for `container` without a class filter.
    pub fn new(container: N) -> Self {
        Self {
            container,
            child_match_class: None,
        }
    }

    /// Restricts dragging and targeting to children carrying `class`.
    #[must_use]
    pub fn with_child_match_class(mut self, class: impl Into<String>) -> Self {
        self.child_match_class = Some(class.into());
        self
    }
}

/// A partial update for [`Settings`], applied by
/// [`Reorderer::configure`](crate::Reorderer::configure).
///
/// `None` fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReorderOptions {
    /// Whether presses may start a drag.
    pub move_enabled: Option<bool>,
    /// Delay before a touch press turns into a drag.
    pub touch_press_delay: Option<Duration>,
}

impl ReorderOptions {
    /// Sets [`ReorderOptions::move_enabled`].
    #[must_use]
    pub fn with_move_enabled(mut self, enabled: bool) -> Self {
        self.move_enabled = Some(enabled);
        self
    }

    /// Sets [`ReorderOptions::touch_press_delay`].
    #[must_use]
    pub fn with_touch_press_delay(mut self, delay: Duration) -> Self {
        self.touch_press_delay = Some(delay);
        self
    }
}

/// Effective runtime settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Whether presses may start a drag. Defaults to `true`.
    pub move_enabled: bool,
    /// Delay before a touch press turns into a drag.
    /// Defaults to [`DEFAULT_TOUCH_PRESS_DELAY`].
    pub touch_press_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_enabled: true,
            touch_press_delay: DEFAULT_TOUCH_PRESS_DELAY,
        }
    }
}

impl Settings {
    /// Applies the fields present in `options`.
    pub fn apply(&mut self, options: ReorderOptions) {
        if let Some(enabled) = options.move_enabled {
            self.move_enabled = enabled;
        }
        if let Some(delay) = options.touch_press_delay {
            self.touch_press_delay = delay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_moves_with_200ms_touch_delay() {
        let settings = Settings::default();
        assert!(settings.move_enabled);
        assert_eq!(settings.touch_press_delay, Duration::from_millis(200));
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut settings = Settings::default();

        settings.apply(ReorderOptions::default().with_move_enabled(false));
        assert!(!settings.move_enabled);
        assert_eq!(settings.touch_press_delay, DEFAULT_TOUCH_PRESS_DELAY);

        settings.apply(ReorderOptions::default().with_touch_press_delay(Duration::from_millis(50)));
        assert!(!settings.move_enabled);
        assert_eq!(settings.touch_press_delay, Duration::from_millis(50));
    }

    #[test]
    fn start_config_class_filter() {
        let config = StartConfig::new(7_u32).with_child_match_class("item");
        assert_eq!(config.container, 7);
        assert_eq!(config.child_match_class.as_deref(), Some("item"));
        assert_eq!(StartConfig::new(7_u32).child_match_class, None);
    }
}
