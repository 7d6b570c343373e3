// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-drag state: phase, snapshot of children, ghost, target and indices.
//!
//! A [`DragSession`] lives inside a [`Reorderer`](crate::Reorderer) and is
//! read-only to callers. The phases are:
//!
//! ```text
//! Idle ──press──▶ Armed ──target resolved──▶ Dragging ──release──▶ Ended
//!                   │                           │                    ▲
//!                   └──no target──▶ Idle        └─release while ──▶ Settling
//!                                                 animating       (commit)
//! ```
//!
//! `Ended` behaves like `Idle` for the next press.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::animate::commit_move;
use crate::emit::ReorderResult;
use crate::host::ReorderHost;

/// Lifecycle phase of a drag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No drag; presses may start one.
    #[default]
    Idle,
    /// A press was accepted and the dragged child is being resolved.
    Armed,
    /// A child is being dragged.
    Dragging,
    /// Released while a shift animation is in flight; waiting for its commit.
    Settling,
    /// The last drag finished and its cleanup ran.
    Ended,
}

impl DragPhase {
    /// Returns `true` between activation and the end of the drag.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Armed | Self::Dragging | Self::Settling)
    }
}

/// A child captured at drag start with its layout offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ChildEntry<N> {
    pub(crate) node: N,
    pub(crate) home: Point,
}

/// State of the current (or last) drag.
///
/// The snapshot of eligible children is taken at activation and never
/// re-read from the host during the drag. Its order changes only through
/// [`commit`](Self::commit) after a shift animation.
#[derive(Clone, Debug)]
pub struct DragSession<N> {
    pub(crate) phase: DragPhase,
    /// Children in drag-start order; `home` doubles as the slot position.
    pub(crate) entries: Vec<ChildEntry<N>>,
    /// Current committed order, as indices into `entries`.
    pub(crate) order: Vec<usize>,
    pub(crate) dragged: Option<N>,
    pub(crate) ghost: Option<N>,
    pub(crate) ghost_rect: Rect,
    pub(crate) target: Option<N>,
    pub(crate) start_index: Option<usize>,
    pub(crate) initial_index: Option<usize>,
    pub(crate) fetched_index: Option<usize>,
    pub(crate) animating: bool,
    pub(crate) scroll_active: bool,
}

impl<N> Default for DragSession<N> {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            entries: Vec::new(),
            order: Vec::new(),
            dragged: None,
            ghost: None,
            ghost_rect: Rect::ZERO,
            target: None,
            start_index: None,
            initial_index: None,
            fetched_index: None,
            animating: false,
            scroll_active: false,
        }
    }
}

impl<N: Copy + Eq> DragSession<N> {
    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// The child being dragged.
    #[must_use]
    pub fn dragged(&self) -> Option<N> {
        self.dragged
    }

    /// The current drop target.
    #[must_use]
    pub fn target(&self) -> Option<N> {
        self.target
    }

    /// The ghost following the pointer.
    #[must_use]
    pub fn ghost(&self) -> Option<N> {
        self.ghost
    }

    /// Last ghost rectangle, in container space.
    #[must_use]
    pub fn ghost_rect(&self) -> Rect {
        self.ghost_rect
    }

    /// Index of the dragged child in the drag-start snapshot.
    #[must_use]
    pub fn start_index(&self) -> Option<usize> {
        self.start_index
    }

    /// Returns `true` while a shift animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Returns `true` if the last auto-scroll tick moved the container.
    #[must_use]
    pub fn is_scroll_active(&self) -> bool {
        self.scroll_active
    }

    /// Number of children in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no snapshot is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Snapshot children in their current committed order.
    pub fn order(&self) -> impl Iterator<Item = N> + '_ {
        self.order.iter().map(|&entry| self.entries[entry].node)
    }

    /// Position of `node` in the committed order.
    #[must_use]
    pub fn position(&self, node: N) -> Option<usize> {
        self.order
            .iter()
            .position(|&entry| self.entries[entry].node == node)
    }

    pub(crate) fn node_at(&self, position: usize) -> N {
        self.entries[self.order[position]].node
    }

    /// Resting position of the child that occupied `position` at drag start.
    pub(crate) fn slot(&self, position: usize) -> Point {
        self.entries[position].home
    }

    pub(crate) fn home(&self, node: N) -> Point {
        self.entries
            .iter()
            .find(|entry| entry.node == node)
            .map_or(Point::ZERO, |entry| entry.home)
    }

    /// Translation that moves `node` from its layout offset into `position`.
    pub(crate) fn translation_to(&self, node: N, position: usize) -> Vec2 {
        self.slot(position) - self.home(node)
    }

    /// Returns `true` if `node` may be dragged or targeted.
    ///
    /// It must be in the snapshot (so never drag-disabled) and, when a class
    /// filter is configured, carry that class.
    pub(crate) fn is_draggable<H>(&self, host: &H, node: N, class: Option<&str>) -> bool
    where
        H: ReorderHost<Node = N>,
    {
        self.position(node).is_some() && class.is_none_or(|class| host.has_class(node, class))
    }

    pub(crate) fn arm(&mut self, entries: Vec<ChildEntry<N>>) {
        *self = Self {
            phase: DragPhase::Armed,
            order: (0..entries.len()).collect(),
            entries,
            ..Self::default()
        };
    }

    pub(crate) fn disarm(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn begin(&mut self, dragged: N, start_index: usize, ghost: Option<N>, rect: Rect) {
        self.phase = DragPhase::Dragging;
        self.dragged = Some(dragged);
        self.start_index = Some(start_index);
        self.ghost = ghost;
        self.ghost_rect = rect;
    }

    pub(crate) fn record_reorder(&mut self, initial: usize, fetched: usize) {
        self.initial_index = Some(initial);
        self.fetched_index = Some(fetched);
        self.animating = true;
    }

    /// Applies the pending move to the committed order and releases the
    /// animation lock. Returns `false` if nothing was pending.
    pub(crate) fn commit(&mut self) -> bool {
        if !self.animating {
            return false;
        }
        self.animating = false;
        match (self.initial_index, self.fetched_index) {
            (Some(from), Some(to)) => commit_move(&mut self.order, from, to),
            _ => false,
        }
    }

    /// Ends the drag, returning the result to emit if a reorder was
    /// committed. Per-drag scratch is cleared either way.
    pub(crate) fn finish(&mut self) -> Option<ReorderResult> {
        let result = match (self.start_index, self.initial_index, self.fetched_index) {
            (Some(start), Some(_), Some(fetched)) => Some(ReorderResult {
                initial_index: start,
                fetched_index: fetched,
            }),
            _ => None,
        };
        *self = Self {
            phase: DragPhase::Ended,
            ..Self::default()
        };
        result
    }
}
