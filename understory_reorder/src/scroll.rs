// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolling: edge auto-scroll while dragging and swipe scroll for touch.
//!
//! Both are pure functions over [`ScrollMetrics`]; the
//! [`Reorderer`](crate::Reorderer) applies the resulting offsets through
//! [`ReorderHost::set_scroll_offset`](crate::ReorderHost::set_scroll_offset).
//! Offsets never leave `[0, content_extent - viewport_extent]`.

use kurbo::Rect;

use crate::host::ScrollMetrics;
use crate::options::SCROLL_STEP;

/// Outcome of one auto-scroll tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AutoScrollStep {
    /// New scroll offset to apply, if it changes or needs clamping.
    pub offset: Option<f64>,
    /// Whether the tick stepped the offset. A tick that starts pinned to an
    /// edge lowers it. Hit testing is skipped while set.
    pub active: bool,
}

/// Computes one auto-scroll tick for a ghost at `ghost` (container space).
///
/// Past the bottom edge the offset grows by [`SCROLL_STEP`], clamped to the
/// maximum. The step stays active until a tick starts with the offset already
/// at the maximum. The top edge mirrors this toward zero. Inside the viewport
/// nothing scrolls.
///
/// ```
/// use kurbo::Rect;
/// use understory_reorder::ScrollMetrics;
/// use understory_reorder::scroll::auto_scroll_step;
///
/// let metrics = ScrollMetrics { offset: 10.0, content_extent: 500.0, viewport_extent: 200.0 };
///
/// let below = auto_scroll_step(metrics, Rect::new(0.0, 180.0, 100.0, 230.0));
/// assert_eq!(below.offset, Some(11.0));
/// assert!(below.active);
///
/// let inside = auto_scroll_step(metrics, Rect::new(0.0, 50.0, 100.0, 100.0));
/// assert_eq!(inside.offset, None);
/// assert!(!inside.active);
/// ```
#[must_use]
pub fn auto_scroll_step(metrics: ScrollMetrics, ghost: Rect) -> AutoScrollStep {
    let max = metrics.max_offset();
    if ghost.y1 > metrics.viewport_extent {
        let next = metrics.offset + SCROLL_STEP;
        AutoScrollStep {
            offset: Some(next.min(max)),
            active: metrics.offset < max,
        }
    } else if ghost.y0 < 0.0 {
        let next = metrics.offset - SCROLL_STEP;
        AutoScrollStep {
            offset: Some(next.max(0.0)),
            active: metrics.offset > 0.0,
        }
    } else {
        AutoScrollStep::default()
    }
}

/// Tracks the last touch position for swipe scrolling.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SwipeTracker {
    last_y: Option<f64>,
}

impl SwipeTracker {
    /// Records the press position.
    pub fn begin(&mut self, y: f64) {
        self.last_y = Some(y);
    }

    /// Records a move and returns how far content should scroll.
    ///
    /// Positive values scroll down: the finger moved up. Returns `None` if no
    /// press was recorded.
    pub fn update(&mut self, y: f64) -> Option<f64> {
        let last = self.last_y.replace(y)?;
        Some(last - y)
    }

    /// Forgets the last position.
    pub fn reset(&mut self) {
        self.last_y = None;
    }
}

/// Applies a swipe `delta` to the current offset.
///
/// Returns `None` when the content fits in the viewport or the delta is
/// zero; otherwise the clamped new offset.
#[must_use]
pub fn swipe_scroll(metrics: ScrollMetrics, delta: f64) -> Option<f64> {
    if !metrics.overflows() || delta == 0.0 {
        return None;
    }
    Some(metrics.clamp(metrics.offset + delta))
}
