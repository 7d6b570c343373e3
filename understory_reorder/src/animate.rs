// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder animation: cascading shift offsets and the index commit.
//!
//! When the dragged child is dropped on a target, every child between them
//! slides one slot toward the dragged child's old place and the dragged child
//! slides into the target's slot. Offsets are translations relative to each
//! child's layout offset, so several reorders within one drag accumulate
//! without reading the host's layout again.
//!
//! After [`TRANSITION_DURATION`](crate::options::TRANSITION_DURATION) the
//! snapshot order is updated with [`commit_move`].

use alloc::vec::Vec;

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::host::ReorderHost;
use crate::options::TRANSITION_CLASS;
use crate::session::DragSession;

/// Translations to apply for one shift, in walk order.
pub(crate) type ShiftPlan<N> = SmallVec<[(N, Vec2); 8]>;

/// Moves the item at `from` to `to`: remove-at, then insert-at.
///
/// Returns `false` and leaves `items` untouched if either index is out of
/// bounds.
///
/// ```
/// use understory_reorder::commit_move;
///
/// let mut items = vec!['A', 'B', 'C', 'D'];
/// assert!(commit_move(&mut items, 0, 2));
/// assert_eq!(items, ['B', 'C', 'A', 'D']);
/// ```
pub fn commit_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Plans the shift for moving the child at `initial` onto the child at
/// `fetched`, both positions in the session's committed order.
///
/// The walk starts at the target and steps toward the dragged child. Its
/// direction comes from geometry: forward when the dragged child sits below
/// the target (or level with it and to the right), backward otherwise. Each
/// walked child moves to its neighbor's slot; the walk stops at the dragged
/// child or at either end of the snapshot. The dragged child is planned last,
/// into the target's slot.
pub(crate) fn plan_shift<N: Copy + Eq>(
    session: &DragSession<N>,
    initial: usize,
    fetched: usize,
) -> ShiftPlan<N> {
    let mut plan = ShiftPlan::new();
    let dragged = session.node_at(initial);
    let diff = session.slot(initial) - session.slot(fetched);
    let forward = diff.y > 0.0 || (diff.y == 0.0 && diff.x > 0.0);

    let mut position = fetched;
    while position != initial {
        let next = if forward {
            position + 1
        } else {
            match position.checked_sub(1) {
                Some(next) => next,
                None => break,
            }
        };
        if next >= session.len() {
            break;
        }
        let node = session.node_at(position);
        plan.push((node, session.translation_to(node, next)));
        position = next;
    }
    plan.push((dragged, session.translation_to(dragged, fetched)));
    plan
}

/// Applies a plan: transition class plus translation on every planned child.
pub(crate) fn apply_shift<H: ReorderHost>(host: &mut H, plan: &ShiftPlan<H::Node>) {
    for &(node, translation) in plan {
        host.add_class(node, TRANSITION_CLASS);
        host.set_translation(node, translation);
    }
}

/// Clears the transition class after a commit. Translations stay until the
/// drag ends, since the host's layout still reflects the drag-start order.
pub(crate) fn clear_transitions<H: ReorderHost>(
    host: &mut H,
    nodes: impl IntoIterator<Item = H::Node>,
) {
    for node in nodes {
        host.remove_class(node, TRANSITION_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ChildEntry;
    use alloc::vec;
    use kurbo::Point;

    fn session_with_homes(homes: &[Point]) -> DragSession<usize> {
        let mut session = DragSession::default();
        session.arm(
            homes
                .iter()
                .enumerate()
                .map(|(node, &home)| ChildEntry { node, home })
                .collect(),
        );
        session
    }

    fn column(len: usize) -> DragSession<usize> {
        let homes: Vec<Point> = (0..len).map(|i| Point::new(0.0, 50.0 * i as f64)).collect();
        session_with_homes(&homes)
    }

    #[test]
    fn commit_move_forward_and_backward() {
        let mut items = vec![0, 1, 2, 3, 4];
        assert!(commit_move(&mut items, 1, 3));
        assert_eq!(items, [0, 2, 3, 1, 4]);
        assert!(commit_move(&mut items, 4, 0));
        assert_eq!(items, [4, 0, 2, 3, 1]);
    }

    #[test]
    fn commit_move_rejects_out_of_bounds() {
        let mut items = vec![0, 1];
        assert!(!commit_move(&mut items, 2, 0));
        assert!(!commit_move(&mut items, 0, 2));
        assert_eq!(items, [0, 1]);
    }

    #[test]
    fn dragging_down_shifts_siblings_up() {
        // [A, B, C, D], drag A (0) onto C (2).
        let session = column(4);
        let plan = plan_shift(&session, 0, 2);
        assert_eq!(
            plan.as_slice(),
            &[
                (2, Vec2::new(0.0, -50.0)),
                (1, Vec2::new(0.0, -50.0)),
                (0, Vec2::new(0.0, 100.0)),
            ]
        );
    }

    #[test]
    fn dragging_up_shifts_siblings_down() {
        // Drag D (3) onto B (1).
        let session = column(4);
        let plan = plan_shift(&session, 3, 1);
        assert_eq!(
            plan.as_slice(),
            &[
                (1, Vec2::new(0.0, 50.0)),
                (2, Vec2::new(0.0, 50.0)),
                (3, Vec2::new(0.0, -100.0)),
            ]
        );
    }

    #[test]
    fn adjacent_swap_moves_two_children() {
        let session = column(3);
        let plan = plan_shift(&session, 1, 2);
        assert_eq!(
            plan.as_slice(),
            &[(2, Vec2::new(0.0, -50.0)), (1, Vec2::new(0.0, 50.0))]
        );
    }

    #[test]
    fn horizontal_ties_use_x() {
        // A row: [0, 1, 2] at x = 0, 80, 160.
        let homes = [
            Point::new(0.0, 0.0),
            Point::new(80.0, 0.0),
            Point::new(160.0, 0.0),
        ];
        let session = session_with_homes(&homes);

        let plan = plan_shift(&session, 2, 0);
        assert_eq!(
            plan.as_slice(),
            &[
                (0, Vec2::new(80.0, 0.0)),
                (1, Vec2::new(80.0, 0.0)),
                (2, Vec2::new(-160.0, 0.0)),
            ]
        );
    }

    #[test]
    fn shifts_accumulate_after_commit() {
        // Drag A onto C and commit: order is [B, C, A, D].
        let mut session = column(4);
        session.record_reorder(0, 2);
        session.commit();

        // Keep dragging A (now at 2) onto D (3).
        let plan = plan_shift(&session, 2, 3);
        assert_eq!(
            plan.as_slice(),
            &[(3, Vec2::new(0.0, -50.0)), (0, Vec2::new(0.0, 150.0))]
        );
    }

    #[test]
    fn walk_stops_at_snapshot_edge_for_inconsistent_geometry() {
        // Geometry says "forward" but the dragged child is before the target.
        let homes = [Point::new(0.0, 100.0), Point::new(0.0, 0.0)];
        let session = session_with_homes(&homes);

        let plan = plan_shift(&session, 0, 1);
        assert_eq!(plan.as_slice(), &[(0, Vec2::new(0.0, -100.0))]);
    }
}
