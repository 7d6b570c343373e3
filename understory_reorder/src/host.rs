// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host contract: what the reorder engine needs from a view tree.
//!
//! The engine never owns nodes. A host (a DOM binding, a retained widget
//! tree, a terminal list, or [`SimHost`](crate::sim::SimHost) in tests)
//! implements [`ReorderHost`] and forwards pointer events to the
//! [`Reorderer`](crate::Reorderer).
//!
//! ## Coordinate spaces
//!
//! - **Viewport space**: pointer points, [`ReorderHost::client_rect`] and
//!   [`ReorderHost::node_at`].
//! - **Content space**: [`ReorderHost::offset`], relative to the container's
//!   scrolled content origin and unaffected by scrolling or translations.
//! - **Container space**: ghost rectangles, relative to the top-left corner
//!   of the container's visible area.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect, Size, Vec2};

bitflags::bitflags! {
    /// Input event kinds the engine listens to on a container.
    ///
    /// Passed to [`ReorderHost::subscribe`] on start and to
    /// [`ReorderHost::unsubscribe`] on stop.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        /// Mouse button pressed over the container.
        const MOUSE_DOWN   = 0b0000_0001;
        /// Mouse moved over the container.
        const MOUSE_MOVE   = 0b0000_0010;
        /// Mouse button released.
        const MOUSE_UP     = 0b0000_0100;
        /// Mouse left the container.
        const MOUSE_LEAVE  = 0b0000_1000;
        /// Touch started on the container.
        const TOUCH_START  = 0b0001_0000;
        /// Touch moved.
        const TOUCH_MOVE   = 0b0010_0000;
        /// Touch ended.
        const TOUCH_END    = 0b0100_0000;
        /// Touch was cancelled by the platform.
        const TOUCH_CANCEL = 0b1000_0000;

        /// Every mouse kind.
        const MOUSE = Self::MOUSE_DOWN.bits()
            | Self::MOUSE_MOVE.bits()
            | Self::MOUSE_UP.bits()
            | Self::MOUSE_LEAVE.bits();
        /// Every touch kind.
        const TOUCH = Self::TOUCH_START.bits()
            | Self::TOUCH_MOVE.bits()
            | Self::TOUCH_END.bits()
            | Self::TOUCH_CANCEL.bits();
    }
}

/// Vertical scroll state of a container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top of the content.
    pub offset: f64,
    /// Total content height (`scrollHeight`).
    pub content_extent: f64,
    /// Visible height (`clientHeight`).
    pub viewport_extent: f64,
}

impl ScrollMetrics {
    /// Largest valid scroll offset, never negative.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Returns `true` if the content is taller than the viewport.
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.content_extent > self.viewport_extent
    }

    /// Clamps `offset` into `[0, max_offset]`.
    #[must_use]
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }
}

/// Access to the view tree hosting a reorderable container.
///
/// All queries are expected to be cheap and infallible. Lookups that can not
/// be answered should return `None` (or a neutral value); the engine treats
/// them as "nothing there".
pub trait ReorderHost {
    /// Node handle. Identity (`Eq`) is how the engine recognizes children
    /// across events, so handles must be stable for the duration of a drag.
    type Node: Copy + Eq + Debug;

    /// Direct children of `parent`, in order, including disabled ones.
    fn children(&self, parent: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Parent of `node`, or `None` at the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns `true` if `node` is excluded from dragging and from index
    /// counting (the `drag-disabled` marker).
    fn is_drag_disabled(&self, node: Self::Node) -> bool;

    /// Returns `true` if `node` carries `class`.
    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    /// Adds `class` to `node`. Adding a present class is a no-op.
    fn add_class(&mut self, node: Self::Node, class: &str);

    /// Removes `class` from `node`. Removing an absent class is a no-op.
    fn remove_class(&mut self, node: Self::Node, class: &str);

    /// Layout offset of `node` in content space, ignoring translations.
    fn offset(&self, node: Self::Node) -> Point;

    /// Layout size of `node`.
    fn size(&self, node: Self::Node) -> Size;

    /// Visible rectangle of `node` in viewport space.
    fn client_rect(&self, node: Self::Node) -> Rect;

    /// Topmost node under a viewport-space point, ignoring ghosts.
    fn node_at(&self, point: Point) -> Option<Self::Node>;

    /// Vertical scroll state of `container`.
    fn scroll_metrics(&self, container: Self::Node) -> ScrollMetrics;

    /// Sets the vertical scroll offset of `container`.
    fn set_scroll_offset(&mut self, container: Self::Node, offset: f64);

    /// Sets the visual translation of `node` relative to its layout offset.
    ///
    /// [`Vec2::ZERO`] clears it.
    fn set_translation(&mut self, node: Self::Node, translation: Vec2);

    /// Creates a floating copy of `source` outside of the container's
    /// children, transparent to [`ReorderHost::node_at`].
    ///
    /// Returning `None` lets the drag proceed without a ghost.
    fn create_ghost(&mut self, source: Self::Node) -> Option<Self::Node>;

    /// Places a ghost. `rect` is in container space; `animated` asks for a
    /// short transition toward the new rectangle.
    fn set_ghost_rect(&mut self, ghost: Self::Node, rect: Rect, animated: bool);

    /// Removes a ghost created by [`ReorderHost::create_ghost`].
    fn remove_ghost(&mut self, ghost: Self::Node);

    /// Starts delivering `kinds` events on `container` to the engine.
    fn subscribe(&mut self, container: Self::Node, kinds: EventKinds);

    /// Stops delivering `kinds` events on `container`.
    fn unsubscribe(&mut self, container: Self::Node, kinds: EventKinds);

    /// Suppresses or restores text selection while a drag is active.
    fn set_selection_suppressed(&mut self, _suppressed: bool) {}

    /// Enables or disables the container's native scrolling.
    ///
    /// The engine drives scrolling itself between `start` and `stop`.
    fn set_native_scroll(&mut self, _container: Self::Node, _enabled: bool) {}
}

/// Children of `container` that take part in reordering, in order.
pub fn eligible_children<H: ReorderHost>(host: &H, container: H::Node) -> Vec<H::Node> {
    host.children(container)
        .filter(|&child| !host.is_drag_disabled(child))
        .collect()
}
