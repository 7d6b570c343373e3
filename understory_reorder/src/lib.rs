// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reorder --heading-base-level=0

//! Understory Reorder: pointer-driven reordering of siblings in a scrollable container.
//!
//! A user presses on a child of a container, drags a floating copy (the
//! *ghost*) over its siblings, and releases. Siblings slide out of the way as
//! the ghost passes over them, the container scrolls when the ghost reaches
//! an edge, and at the end the host receives one [`ReorderResult`] describing
//! the move. Applying that result to the host's model is the host's job.
//!
//! The crate is headless. It reaches the view tree only through the
//! [`ReorderHost`] trait and never reads a clock: the host forwards pointer
//! events to a [`Reorderer`] and calls [`Reorderer::advance`] when
//! [`Reorderer::next_deadline`] passes.
//!
//! ## Modules
//!
//! - [`pointer`]: one [`PointerSample`] shape for mouse and touch input.
//! - [`session`]: the drag lifecycle ([`DragPhase`]) and per-drag state.
//! - [`scroll`]: edge auto-scroll while dragging and touch swipe scroll.
//! - [`hit`]: resolving pointer targets to direct children of the container.
//! - [`animate`]: cascading shift offsets and the order commit.
//! - [`emit`]: results and end-of-drag cleanup.
//! - [`sim`]: [`SimHost`](sim::SimHost), an in-memory host for tests.
//!
//! ## Drag lifecycle
//!
//! 1. **Press.** A mouse press activates immediately. A touch press waits for
//!    the touch press delay (200 ms by default) so that a vertical swipe can
//!    scroll the container instead; moving or lifting the finger first cancels
//!    the activation.
//! 2. **Activation.** The eligible children (those not drag-disabled) are
//!    captured with their layout offsets. The press target is walked up to a
//!    direct child of the container; if that child is draggable it becomes
//!    the dragged child and a ghost is centered on the pointer.
//! 3. **Dragging.** The ghost follows the pointer. 100 ms after the last move
//!    a hit test picks the child under the pointer as the drop target and
//!    starts a 300 ms shift animation; at its end the move is committed to the
//!    session's order. While the ghost is past the top or bottom edge the
//!    container scrolls by one pixel every 10 ms.
//! 4. **End.** Release, leave and cancel remove the ghost and reset styling.
//!    If a shift is still animating the drag settles first. A result is
//!    emitted only if at least one move was committed.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_reorder::sim::SimHost;
//! use understory_reorder::{PointerSample, ReorderHost, Reorderer, StartConfig};
//!
//! let mut host = SimHost::vertical_list(&["A", "B", "C", "D"], 50.0, 200.0);
//! let mut reorderer = Reorderer::new();
//! let container = host.container();
//! reorderer.start(&mut host, StartConfig::new(container)).unwrap();
//!
//! // Mouse samples carry the node the event was dispatched to.
//! let at = |host: &SimHost, label: &str| {
//!     let point = host.center_of(host.find(label).unwrap());
//!     PointerSample::mouse(point, host.node_at(point))
//! };
//! let ms = Duration::from_millis;
//!
//! let press = at(&host, "A");
//! reorderer.on_press(&mut host, press, ms(0));
//! let over = at(&host, "C");
//! reorderer.on_move(&mut host, over, ms(16));
//! while let Some(deadline) = reorderer.next_deadline() {
//!     if deadline > ms(500) {
//!         break;
//!     }
//!     reorderer.advance(&mut host, deadline);
//! }
//! reorderer.on_release(&mut host, ms(500));
//!
//! for result in reorderer.results().collect::<Vec<_>>() {
//!     host.apply_result(result);
//! }
//! assert_eq!(host.labels(), ["B", "C", "A", "D"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` targets.
//! - `tracing`: logs phase transitions, targets, commits and results with
//!   [`tracing`](https://docs.rs/tracing).
//! - `serde`: derives `Serialize`/`Deserialize` for [`ReorderOptions`],
//!   [`ReorderResult`] and [`PointerKind`].
//! - `ui_events_adapter`: converts `ui_events` pointer events with
//!   [`adapters::ui_events::from_pointer_event`].
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod animate;
pub mod emit;
pub mod error;
pub mod hit;
pub mod host;
pub mod options;
pub mod pointer;
mod reorderer;
pub mod scroll;
pub mod session;
pub mod sim;

pub use animate::commit_move;
pub use emit::{ReorderResult, ResultQueue};
pub use error::ReorderError;
pub use host::{EventKinds, ReorderHost, ScrollMetrics, eligible_children};
pub use options::{ReorderOptions, Settings, StartConfig};
pub use pointer::{PointerInput, PointerKind, PointerSample};
pub use reorderer::Reorderer;
pub use session::{DragPhase, DragSession};
