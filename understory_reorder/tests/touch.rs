// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input: press delay, swipe scrolling and touch hit testing.

mod common;

use common::{Harness, ms};
use kurbo::Point;
use understory_reorder::options::ACTIVE_CLASS;
use understory_reorder::sim::SimHost;
use understory_reorder::{DragPhase, ReorderHost, ReorderOptions, ReorderResult, StartConfig};

const LABELS: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

/// Ten 50 px rows in a 200 px viewport: 300 px of scroll range.
fn tall() -> Harness {
    Harness::from_host(SimHost::vertical_list(&LABELS, 50.0, 200.0))
}

#[test]
fn touch_press_activates_after_the_delay() {
    let mut h = Harness::list(&["A", "B", "C"]);
    let origin = h.touch_press(h.center("A"));
    assert_eq!(origin, Some(h.node("A")));
    assert_eq!(h.reorderer.phase(), DragPhase::Idle);
    assert_eq!(h.host.ghosts().count(), 0);

    h.wait(199);
    assert_eq!(h.reorderer.phase(), DragPhase::Idle);
    h.wait(1);
    assert_eq!(h.reorderer.phase(), DragPhase::Dragging);
    assert_eq!(h.reorderer.session().dragged(), origin);
}

#[test]
fn touch_targets_follow_the_finger() {
    let mut h = Harness::list(&["A", "B", "C"]);
    let origin = h.touch_press(h.center("A"));
    h.wait(200);

    // The touch keeps reporting A as its target; the hit test looks under
    // the finger instead.
    h.wait(16);
    h.touch_move(h.center("C"), origin);
    h.wait(450);
    h.reorderer.on_release(&mut h.host, h.now);

    assert_eq!(
        h.results(),
        [ReorderResult {
            initial_index: 0,
            fetched_index: 2,
        }]
    );
}

#[test]
fn release_before_the_delay_never_activates() {
    let mut h = Harness::list(&["A", "B", "C"]);
    h.touch_press(h.center("A"));
    h.wait(150);
    h.release();

    assert_eq!(h.reorderer.next_deadline(), None);
    h.wait(500);
    assert_eq!(h.reorderer.phase(), DragPhase::Idle);
    assert_eq!(h.host.ghosts().count(), 0);
    assert!(!h.host.has_class(h.host.container(), ACTIVE_CLASS));
    assert!(h.results().is_empty());
}

#[test]
fn moving_before_the_delay_scrolls_instead() {
    let mut h = tall();
    let container = h.host.container();
    let origin = h.touch_press(Point::new(50.0, 140.0));
    h.wait(50);

    // Finger moves up 30 px: content scrolls down 30 px.
    h.touch_move(Point::new(50.0, 110.0), origin);
    assert_eq!(h.host.scroll_offset(), 30.0);
    h.wait(500);
    assert_eq!(h.reorderer.phase(), DragPhase::Idle);

    // Offsets clamp at both ends.
    h.touch_move(Point::new(50.0, 200.0), origin);
    assert_eq!(h.host.scroll_offset(), 0.0);
    h.touch_move(Point::new(50.0, -1_000.0), origin);
    assert_eq!(h.host.scroll_metrics(container).offset, 300.0);
}

#[test]
fn swipes_do_not_scroll_content_that_fits() {
    let mut h = Harness::list(&["A", "B", "C"]);
    let origin = h.touch_press(h.center("B"));
    h.wait(20);
    h.touch_move(h.center("A"), origin);
    assert_eq!(h.host.scroll_offset(), 0.0);
    assert_eq!(h.reorderer.phase(), DragPhase::Idle);
}

#[test]
fn swipes_stop_after_release() {
    let mut h = tall();
    let origin = h.touch_press(Point::new(50.0, 140.0));
    h.release();
    h.touch_move(Point::new(50.0, 100.0), origin);
    assert_eq!(h.host.scroll_offset(), 0.0);
}

#[test]
fn custom_press_delay_is_honored() {
    let host = SimHost::vertical_list(&["A", "B", "C"], 50.0, 150.0);
    let options = ReorderOptions::default().with_touch_press_delay(ms(50));
    let mut h = Harness::with(host, options, StartConfig::new);

    h.touch_press(h.center("A"));
    h.wait(49);
    assert_eq!(h.reorderer.phase(), DragPhase::Idle);
    h.wait(1);
    assert_eq!(h.reorderer.phase(), DragPhase::Dragging);
    h.release();

    h.reorderer
        .configure(ReorderOptions::default().with_touch_press_delay(ms(300)));
    assert_eq!(h.reorderer.settings().touch_press_delay, ms(300));
    h.touch_press(h.center("B"));
    h.wait(299);
    assert_eq!(h.reorderer.phase(), DragPhase::Ended);
    h.wait(1);
    assert_eq!(h.reorderer.phase(), DragPhase::Dragging);
}

#[test]
fn disabled_moves_still_allow_swipes() {
    let mut h = tall();
    h.reorderer
        .configure(ReorderOptions::default().with_move_enabled(false));
    let origin = h.touch_press(Point::new(50.0, 140.0));
    assert_eq!(h.reorderer.next_deadline(), None);

    h.touch_move(Point::new(50.0, 100.0), origin);
    assert_eq!(h.host.scroll_offset(), 40.0);
}

#[test]
fn touch_cancel_ends_an_active_drag() {
    let mut h = Harness::list(&["A", "B", "C"]);
    h.touch_press(h.center("A"));
    h.wait(200);
    assert_eq!(h.reorderer.phase(), DragPhase::Dragging);

    h.reorderer.on_cancel(&mut h.host, h.now);
    assert_eq!(h.reorderer.phase(), DragPhase::Ended);
    assert_eq!(h.host.ghosts().count(), 0);
    assert!(!h.host.is_selection_suppressed());
    assert!(h.results().is_empty());
}
