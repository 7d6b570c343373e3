// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer normalization: one sample shape for mouse and touch input.
//!
//! Hosts translate their native events once, at the boundary, and then call
//! the matching [`Reorderer`](crate::Reorderer) handler:
//!
//! | native event          | handler                                  |
//! |-----------------------|------------------------------------------|
//! | mouse down / touch start | [`on_press`](crate::Reorderer::on_press)   |
//! | mouse / touch move    | [`on_move`](crate::Reorderer::on_move)     |
//! | mouse up / touch end  | [`on_release`](crate::Reorderer::on_release) |
//! | mouse leave           | [`on_leave`](crate::Reorderer::on_leave)   |
//! | touch cancel          | [`on_cancel`](crate::Reorderer::on_cancel) |
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_reorder::pointer::{PointerKind, PointerSample};
//!
//! // A touch event with an active touch list uses the first touch.
//! let touch = PointerSample::touch(&[Point::new(4.0, 8.0)], Point::ZERO, Some(1_u32));
//! assert_eq!(touch.point, Point::new(4.0, 8.0));
//! assert_eq!(touch.kind, PointerKind::Touch);
//!
//! // An empty touch list falls back to the generic pointer point.
//! let bare = PointerSample::<u32>::touch(&[], Point::new(1.0, 2.0), None);
//! assert_eq!(bare.point, Point::new(1.0, 2.0));
//! ```

use kurbo::Point;

/// The input device family a sample came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    /// Mouse, pen, or any pointer that activates immediately on press.
    Mouse,
    /// Touch; press activation is delayed to tell drags from page scrolls.
    Touch,
}

/// A normalized pointer sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample<N> {
    /// Device family.
    pub kind: PointerKind,
    /// Pointer position in viewport space.
    pub point: Point,
    /// The node the native event was dispatched to, if known.
    ///
    /// Mouse hit tests use it directly. Touch hit tests ignore it and ask
    /// the host for the node under [`PointerSample::point`], because touch
    /// events keep targeting the node where the touch started.
    pub target: Option<N>,
}

impl<N> PointerSample<N> {
    /// A mouse sample.
    pub fn mouse(point: Point, target: Option<N>) -> Self {
        Self {
            kind: PointerKind::Mouse,
            point,
            target,
        }
    }

    /// A touch sample from the event's active touch points.
    ///
    /// Uses the first touch; falls back to `fallback` (the generic pointer
    /// point) when the list is empty.
    pub fn touch(touches: &[Point], fallback: Point, target: Option<N>) -> Self {
        Self {
            kind: PointerKind::Touch,
            point: touches.first().copied().unwrap_or(fallback),
            target,
        }
    }

    /// Returns `true` for touch samples.
    pub fn is_touch(&self) -> bool {
        self.kind == PointerKind::Touch
    }
}

/// A normalized pointer event, for hosts that route through one match.
///
/// See [`adapters`](crate::adapters) for conversions from event libraries.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerInput<N> {
    /// Mouse down or touch start.
    Press(PointerSample<N>),
    /// Pointer moved.
    Move(PointerSample<N>),
    /// Mouse up or touch end.
    Release,
    /// The pointer left the container.
    Leave,
    /// The platform cancelled the gesture.
    Cancel,
}
