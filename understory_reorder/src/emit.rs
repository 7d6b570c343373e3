// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag results and end-of-drag cleanup.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use kurbo::Vec2;

use crate::animate::commit_move;
use crate::host::{ReorderHost, eligible_children};
use crate::options::{ACTIVE_CLASS, DRAGGED_CLASS, TARGET_CLASS, TRANSITION_CLASS};

/// A committed reorder, reported once per drag.
///
/// Indices count eligible children only (drag-disabled children are
/// skipped). `initial_index` is where the dragged child sat when the drag
/// began; `fetched_index` is where it was last committed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReorderResult {
    /// Position of the dragged child at drag start.
    pub initial_index: usize,
    /// Position the dragged child was moved to.
    pub fetched_index: usize,
}

impl ReorderResult {
    /// Applies the move to a model list mirroring the eligible children.
    ///
    /// Returns `false` and leaves `items` untouched if an index is out of
    /// bounds.
    ///
    /// ```
    /// use understory_reorder::ReorderResult;
    ///
    /// let mut rows = vec!["A", "B", "C", "D"];
    /// let result = ReorderResult { initial_index: 3, fetched_index: 1 };
    /// assert!(result.apply(&mut rows));
    /// assert_eq!(rows, ["A", "D", "B", "C"]);
    /// ```
    pub fn apply<T>(&self, items: &mut Vec<T>) -> bool {
        commit_move(items, self.initial_index, self.fetched_index)
    }
}

/// FIFO of results waiting for the host.
#[derive(Clone, Debug, Default)]
pub struct ResultQueue {
    pending: VecDeque<ReorderResult>,
}

impl ResultQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result.
    pub fn push(&mut self, result: ReorderResult) {
        self.pending.push_back(result);
    }

    /// Removes and returns the oldest result.
    pub fn pop(&mut self) -> Option<ReorderResult> {
        self.pending.pop_front()
    }

    /// Removes and yields every pending result, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = ReorderResult> + '_ {
        self.pending.drain(..)
    }

    /// Number of pending results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Clears every visual side effect of a drag on `container`.
///
/// Translations and the transition and target markers are removed from all
/// eligible children. The dragged marker, the container's active marker and
/// selection suppression are reverted.
pub(crate) fn reset_visuals<H: ReorderHost>(
    host: &mut H,
    container: H::Node,
    dragged: Option<H::Node>,
) {
    for child in eligible_children(host, container) {
        host.set_translation(child, Vec2::ZERO);
        host.remove_class(child, TRANSITION_CLASS);
        host.remove_class(child, TARGET_CLASS);
    }
    if let Some(dragged) = dragged {
        host.remove_class(dragged, DRAGGED_CLASS);
    }
    host.remove_class(container, ACTIVE_CLASS);
    host.set_selection_suppressed(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimHost;
    use alloc::vec;

    #[test]
    fn queue_is_fifo() {
        let mut queue = ResultQueue::new();
        assert!(queue.is_empty());
        queue.push(ReorderResult {
            initial_index: 0,
            fetched_index: 2,
        });
        queue.push(ReorderResult {
            initial_index: 3,
            fetched_index: 1,
        });
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().map(|r| r.initial_index), Some(0));
        let rest: Vec<_> = queue.drain().collect();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].fetched_index, 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn apply_rejects_stale_indices() {
        let mut rows = vec!['A', 'B'];
        let result = ReorderResult {
            initial_index: 0,
            fetched_index: 5,
        };
        assert!(!result.apply(&mut rows));
        assert_eq!(rows, ['A', 'B']);
    }

    #[test]
    fn reset_clears_all_markers() {
        let mut host = SimHost::vertical_list(&["A", "B", "C"], 50.0, 150.0);
        let container = host.container();
        let a = host.child(0);
        let b = host.child(1);
        host.add_class(container, ACTIVE_CLASS);
        host.add_class(a, DRAGGED_CLASS);
        host.add_class(b, TARGET_CLASS);
        host.add_class(b, TRANSITION_CLASS);
        host.set_translation(b, Vec2::new(0.0, -50.0));
        host.set_selection_suppressed(true);

        reset_visuals(&mut host, container, Some(a));

        assert!(!host.has_class(container, ACTIVE_CLASS));
        assert!(!host.has_class(a, DRAGGED_CLASS));
        assert!(!host.has_class(b, TARGET_CLASS));
        assert!(!host.has_class(b, TRANSITION_CLASS));
        assert_eq!(host.translation(b), Vec2::ZERO);
        assert!(!host.is_selection_suppressed());
    }
}
