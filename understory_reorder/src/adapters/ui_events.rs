// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `ui-events` adapter.
//!
//! Converts a [`PointerEvent`] into a [`PointerInput`]. The event carries no
//! node, so the host passes the node it dispatched the event to.

use ::ui_events::pointer::{PointerEvent, PointerType};

use crate::pointer::{PointerInput, PointerKind, PointerSample};

fn kind_of(pointer_type: PointerType) -> PointerKind {
    match pointer_type {
        PointerType::Touch => PointerKind::Touch,
        _ => PointerKind::Mouse,
    }
}

/// Normalizes a `ui-events` pointer event.
///
/// Returns `None` for events the reorder engine does not consume (enter,
/// scroll, gestures).
pub fn from_pointer_event<N>(event: &PointerEvent, target: Option<N>) -> Option<PointerInput<N>> {
    match event {
        PointerEvent::Down(e) => Some(PointerInput::Press(PointerSample {
            kind: kind_of(e.pointer.pointer_type),
            point: e.state.logical_point(),
            target,
        })),
        PointerEvent::Move(e) => Some(PointerInput::Move(PointerSample {
            kind: kind_of(e.pointer.pointer_type),
            point: e.current.logical_point(),
            target,
        })),
        PointerEvent::Up(_) => Some(PointerInput::Release),
        PointerEvent::Leave(_) => Some(PointerInput::Leave),
        PointerEvent::Cancel(_) => Some(PointerInput::Cancel),
        _ => None,
    }
}
