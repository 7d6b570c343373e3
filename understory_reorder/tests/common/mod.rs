// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for reorder integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each test binary uses a different subset of the helpers."
)]

use core::time::Duration;

use kurbo::Point;
use understory_reorder::sim::{SimHost, SimNodeId};
use understory_reorder::{
    PointerSample, ReorderHost, ReorderOptions, ReorderResult, Reorderer, StartConfig,
};

pub(crate) const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// A started reorderer over a [`SimHost`], with a test clock.
pub(crate) struct Harness {
    pub(crate) host: SimHost,
    pub(crate) reorderer: Reorderer<SimNodeId>,
    pub(crate) now: Duration,
}

impl Harness {
    /// A 50 px per row column in a viewport tall enough to show every row.
    pub(crate) fn list(labels: &[&str]) -> Self {
        let height = 50.0 * labels.len() as f64;
        Self::from_host(SimHost::vertical_list(labels, 50.0, height))
    }

    pub(crate) fn from_host(host: SimHost) -> Self {
        Self::with(host, ReorderOptions::default(), StartConfig::new)
    }

    pub(crate) fn with(
        mut host: SimHost,
        options: ReorderOptions,
        config: impl FnOnce(SimNodeId) -> StartConfig<SimNodeId>,
    ) -> Self {
        let mut reorderer = Reorderer::with_options(options);
        let container = host.container();
        reorderer
            .start(&mut host, config(container))
            .expect("container should be reorderable");
        Self {
            host,
            reorderer,
            now: Duration::ZERO,
        }
    }

    pub(crate) fn node(&self, label: &str) -> SimNodeId {
        self.host
            .find(label)
            .unwrap_or_else(|| panic!("no node labelled {label}"))
    }

    /// A mouse sample whose target is whatever is drawn at `point`.
    pub(crate) fn mouse(&self, point: Point) -> PointerSample<SimNodeId> {
        PointerSample::mouse(point, self.host.node_at(point))
    }

    /// Starts a touch at `point` and returns the node it landed on.
    pub(crate) fn touch_press(&mut self, point: Point) -> Option<SimNodeId> {
        let origin = self.host.node_at(point);
        let sample = PointerSample::touch(&[point], Point::ZERO, origin);
        self.reorderer.on_press(&mut self.host, sample, self.now);
        origin
    }

    /// Moves a touch to `point`. Touch targets stick to `origin`, the node
    /// the touch started on.
    pub(crate) fn touch_move(&mut self, point: Point, origin: Option<SimNodeId>) {
        let sample = PointerSample::touch(&[point], Point::ZERO, origin);
        self.reorderer.on_move(&mut self.host, sample, self.now);
    }

    pub(crate) fn center(&self, label: &str) -> Point {
        self.host.center_of(self.node(label))
    }

    pub(crate) fn press(&mut self, label: &str) {
        let sample = self.mouse(self.center(label));
        self.reorderer.on_press(&mut self.host, sample, self.now);
    }

    pub(crate) fn press_at(&mut self, point: Point) {
        let sample = self.mouse(point);
        self.reorderer.on_press(&mut self.host, sample, self.now);
    }

    /// Moves the mouse over the current visual center of `label`, 16 ms later.
    pub(crate) fn move_to(&mut self, label: &str) {
        let point = self.center(label);
        self.move_to_point(point);
    }

    pub(crate) fn move_to_point(&mut self, point: Point) {
        self.wait(16);
        let sample = self.mouse(point);
        self.reorderer.on_move(&mut self.host, sample, self.now);
    }

    pub(crate) fn release(&mut self) {
        self.reorderer.on_release(&mut self.host, self.now);
    }

    /// Lets `millis` pass, running every timer at its own deadline.
    pub(crate) fn wait(&mut self, millis: u64) {
        let until = self.now + ms(millis);
        while let Some(deadline) = self.reorderer.next_deadline() {
            if deadline > until {
                break;
            }
            self.now = self.now.max(deadline);
            self.reorderer.advance(&mut self.host, self.now);
        }
        self.now = until;
        self.reorderer.advance(&mut self.host, self.now);
    }

    /// Presses `from`, hovers each of `over` long enough for the shift to
    /// commit, then releases.
    pub(crate) fn drag(&mut self, from: &str, over: &[&str]) {
        self.press(from);
        for label in over {
            self.move_to(label);
            self.wait(450);
        }
        self.release();
    }

    pub(crate) fn results(&mut self) -> Vec<ReorderResult> {
        self.reorderer.results().collect()
    }

    /// Applies every pending result to the host, as a bound list would.
    pub(crate) fn apply_results(&mut self) -> Vec<ReorderResult> {
        let results = self.results();
        for &result in &results {
            assert!(self.host.apply_result(result), "stale result {result:?}");
        }
        results
    }
}
