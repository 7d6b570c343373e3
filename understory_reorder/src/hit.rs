// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing: resolve a pointer target to a direct child of the container.

use crate::host::ReorderHost;
use crate::options::TARGET_CLASS;
use crate::pointer::PointerSample;

/// Walks up from `node` to the ancestor whose parent is `container`.
///
/// Returns `None` if `node` is the container itself or lies outside of it.
///
/// ```
/// use kurbo::Rect;
/// use understory_reorder::hit::direct_child;
/// use understory_reorder::sim::SimHost;
///
/// let mut host = SimHost::vertical_list(&["A", "B"], 50.0, 100.0);
/// let container = host.container();
/// let b = host.child(1);
/// let label = host.add_child(b, "label", Rect::new(4.0, 54.0, 40.0, 70.0));
///
/// assert_eq!(direct_child(&host, container, label), Some(b));
/// assert_eq!(direct_child(&host, container, container), None);
/// ```
pub fn direct_child<H: ReorderHost>(
    host: &H,
    container: H::Node,
    mut node: H::Node,
) -> Option<H::Node> {
    while let Some(parent) = host.parent(node) {
        if parent == container {
            return Some(node);
        }
        node = parent;
    }
    None
}

/// The node a sample points at, before the walk to a direct child.
///
/// Touch events keep targeting the node where the touch began, so touch
/// samples ask the host what is under the point. Mouse samples use the
/// event's own target.
pub(crate) fn raw_target<H: ReorderHost>(host: &H, sample: &PointerSample<H::Node>) -> Option<H::Node> {
    if sample.is_touch() {
        host.node_at(sample.point)
    } else {
        sample.target
    }
}

/// Resolves `sample` to a direct child of `container`.
pub(crate) fn resolve<H: ReorderHost>(
    host: &H,
    container: H::Node,
    sample: &PointerSample<H::Node>,
) -> Option<H::Node> {
    raw_target(host, sample).and_then(|node| direct_child(host, container, node))
}

/// Moves the target marker to `target`, clearing it from every other node.
pub(crate) fn mark_target<H: ReorderHost>(
    host: &mut H,
    nodes: impl IntoIterator<Item = H::Node>,
    target: Option<H::Node>,
) {
    for node in nodes {
        if Some(node) == target {
            host.add_class(node, TARGET_CLASS);
        } else {
            host.remove_class(node, TARGET_CLASS);
        }
    }
}
