// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`ReorderHost`] for tests, documentation and prototyping.
//!
//! [`SimHost`] models a root node holding one scrollable container. Layout
//! rectangles are given in the container's content space; the container's
//! visible area is its client rectangle in viewport space. Translations and
//! scrolling move nodes visually without touching their layout, and
//! [`SimHost::node_at`](ReorderHost::node_at) hit tests the visual result the
//! way a browser's `elementFromPoint` would.
//!
//! ```
//! use kurbo::Point;
//! use understory_reorder::ReorderHost;
//! use understory_reorder::sim::SimHost;
//!
//! let host = SimHost::vertical_list(&["A", "B", "C"], 40.0, 100.0);
//! let b = host.child(1);
//! assert_eq!(host.label(b), "B");
//! assert_eq!(host.node_at(Point::new(10.0, 50.0)), Some(b));
//! assert_eq!(host.scroll_metrics(host.container()).content_extent, 120.0);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::emit::ReorderResult;
use crate::host::{EventKinds, ReorderHost, ScrollMetrics, eligible_children};

/// Handle of a [`SimHost`] node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimNodeId(u32);

impl SimNodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Ghost {
    source: SimNodeId,
    rect: Rect,
    animated: bool,
}

#[derive(Clone, Debug)]
struct SimNode {
    label: String,
    parent: Option<SimNodeId>,
    children: Vec<SimNodeId>,
    rect: Rect,
    classes: Vec<String>,
    disabled: bool,
    translation: Vec2,
    subscriptions: EventKinds,
    native_scroll: bool,
    ghost: Option<Ghost>,
    alive: bool,
}

impl SimNode {
    fn new(label: &str, parent: Option<SimNodeId>, rect: Rect) -> Self {
        Self {
            label: label.into(),
            parent,
            children: Vec::new(),
            rect,
            classes: Vec::new(),
            disabled: false,
            translation: Vec2::ZERO,
            subscriptions: EventKinds::empty(),
            native_scroll: true,
            ghost: None,
            alive: true,
        }
    }
}

/// A simulated view tree with one scrollable container.
#[derive(Clone, Debug)]
pub struct SimHost {
    nodes: Vec<SimNode>,
    client_rect: Rect,
    scroll_offset: f64,
    ghosts_supported: bool,
    selection_suppressed: bool,
}

impl SimHost {
    const ROOT: SimNodeId = SimNodeId(0);
    const CONTAINER: SimNodeId = SimNodeId(1);

    /// Creates an empty container whose visible area is `client_rect`.
    #[must_use]
    pub fn new(client_rect: Rect) -> Self {
        let root = SimNode::new("root", None, client_rect);
        let mut container = SimNode::new("container", Some(Self::ROOT), client_rect);
        container.rect = Rect::from_origin_size(Point::ZERO, client_rect.size());
        let mut host = Self {
            nodes: Vec::from([root, container]),
            client_rect,
            scroll_offset: 0.0,
            ghosts_supported: true,
            selection_suppressed: false,
        };
        host.nodes[Self::ROOT.index()].children.push(Self::CONTAINER);
        host
    }

    /// A 100 px wide column of `item_height` rows in a viewport
    /// `viewport_height` tall, positioned at the viewport origin.
    #[must_use]
    pub fn vertical_list(labels: &[&str], item_height: f64, viewport_height: f64) -> Self {
        let mut host = Self::new(Rect::new(0.0, 0.0, 100.0, viewport_height));
        let container = host.container();
        for (i, label) in labels.iter().enumerate() {
            let y = item_height * i as f64;
            host.add_child(container, label, Rect::new(0.0, y, 100.0, y + item_height));
        }
        host
    }

    /// The node above the container.
    #[must_use]
    pub fn root(&self) -> SimNodeId {
        Self::ROOT
    }

    /// The scrollable container.
    #[must_use]
    pub fn container(&self) -> SimNodeId {
        Self::CONTAINER
    }

    /// Adds a node under `parent` with a layout rectangle in content space.
    pub fn add_child(&mut self, parent: SimNodeId, label: &str, rect: Rect) -> SimNodeId {
        let id = self.push(SimNode::new(label, Some(parent), rect));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Marks `node` as drag-disabled.
    pub fn set_drag_disabled(&mut self, node: SimNodeId, disabled: bool) {
        self.nodes[node.index()].disabled = disabled;
    }

    /// Makes [`create_ghost`](ReorderHost::create_ghost) fail.
    pub fn set_ghost_support(&mut self, supported: bool) {
        self.ghosts_supported = supported;
    }

    /// The `i`-th direct child of the container, disabled children included.
    ///
    /// # Panics
    ///
    /// Panics if the container has no such child.
    #[must_use]
    pub fn child(&self, i: usize) -> SimNodeId {
        self.nodes[Self::CONTAINER.index()].children[i]
    }

    /// Label given at creation.
    #[must_use]
    pub fn label(&self, node: SimNodeId) -> &str {
        &self.nodes[node.index()].label
    }

    /// First live node carrying `label`.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<SimNodeId> {
        self.ids()
            .find(|&id| self.nodes[id.index()].alive && self.nodes[id.index()].label == label)
    }

    /// Labels of the container's children, in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.nodes[Self::CONTAINER.index()]
            .children
            .iter()
            .map(|&child| self.label(child))
            .collect()
    }

    /// Classes currently on `node`.
    #[must_use]
    pub fn classes(&self, node: SimNodeId) -> &[String] {
        &self.nodes[node.index()].classes
    }

    /// Children of the container carrying `class`.
    #[must_use]
    pub fn with_class(&self, class: &str) -> Vec<SimNodeId> {
        self.nodes[Self::CONTAINER.index()]
            .children
            .iter()
            .copied()
            .filter(|&child| self.has_class(child, class))
            .collect()
    }

    /// Visual translation of `node`.
    #[must_use]
    pub fn translation(&self, node: SimNodeId) -> Vec2 {
        self.nodes[node.index()].translation
    }

    /// Where `node` is drawn, in viewport space.
    ///
    /// Includes scrolling and the translations of `node` and its ancestors.
    #[must_use]
    pub fn visual_rect(&self, node: SimNodeId) -> Rect {
        if node == Self::ROOT || node == Self::CONTAINER {
            return self.client_rect;
        }
        let mut shift = Vec2::ZERO;
        let mut current = Some(node);
        while let Some(id) = current {
            if id == Self::CONTAINER {
                break;
            }
            shift += self.nodes[id.index()].translation;
            current = self.nodes[id.index()].parent;
        }
        let origin = self.client_rect.origin().to_vec2() - Vec2::new(0.0, self.scroll_offset);
        self.nodes[node.index()].rect + origin + shift
    }

    /// Center of [`visual_rect`](Self::visual_rect).
    #[must_use]
    pub fn center_of(&self, node: SimNodeId) -> Point {
        self.visual_rect(node).center()
    }

    /// Live ghosts.
    pub fn ghosts(&self) -> impl Iterator<Item = SimNodeId> + '_ {
        self.ids()
            .filter(|&id| self.nodes[id.index()].alive && self.nodes[id.index()].ghost.is_some())
    }

    /// The node a ghost was cloned from.
    #[must_use]
    pub fn ghost_source(&self, ghost: SimNodeId) -> Option<SimNodeId> {
        self.nodes[ghost.index()].ghost.as_ref().map(|g| g.source)
    }

    /// Last rectangle a ghost was placed at, in container space.
    #[must_use]
    pub fn ghost_rect(&self, ghost: SimNodeId) -> Option<Rect> {
        self.nodes[ghost.index()].ghost.as_ref().map(|g| g.rect)
    }

    /// Whether the last placement of a ghost asked for a transition.
    #[must_use]
    pub fn ghost_animated(&self, ghost: SimNodeId) -> bool {
        self.nodes[ghost.index()]
            .ghost
            .as_ref()
            .is_some_and(|g| g.animated)
    }

    /// Current scroll offset of the container.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Event kinds subscribed on `node`.
    #[must_use]
    pub fn subscriptions(&self, node: SimNodeId) -> EventKinds {
        self.nodes[node.index()].subscriptions
    }

    /// Whether text selection is suppressed.
    #[must_use]
    pub fn is_selection_suppressed(&self) -> bool {
        self.selection_suppressed
    }

    /// Whether native scrolling is enabled on `node`.
    #[must_use]
    pub fn native_scroll_enabled(&self, node: SimNodeId) -> bool {
        self.nodes[node.index()].native_scroll
    }

    /// Applies a result to the container the way a bound list re-renders:
    /// eligible children are reordered and laid out in the slots they
    /// occupied before. Disabled children keep their place.
    ///
    /// Returns `false` if the result's indices are out of bounds.
    pub fn apply_result(&mut self, result: ReorderResult) -> bool {
        let before = eligible_children(self, Self::CONTAINER);
        let mut after = before.clone();
        if !result.apply(&mut after) {
            return false;
        }

        let slots: Vec<Point> = before
            .iter()
            .map(|&node| self.nodes[node.index()].rect.origin())
            .collect();
        for (&node, slot) in after.iter().zip(slots) {
            let delta = slot - self.nodes[node.index()].rect.origin();
            self.shift_subtree(node, delta);
        }

        let mut reordered = after.into_iter();
        for child in &mut self.nodes[Self::CONTAINER.index()].children {
            if before.contains(child)
                && let Some(next) = reordered.next()
            {
                *child = next;
            }
        }
        true
    }

    fn push(&mut self, node: SimNode) -> SimNodeId {
        let id = SimNodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    fn ids(&self) -> impl DoubleEndedIterator<Item = SimNodeId> + '_ {
        (0..self.nodes.len()).map(|i| SimNodeId(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    fn shift_subtree(&mut self, node: SimNodeId, delta: Vec2) {
        let mut stack = Vec::from([node]);
        while let Some(id) = stack.pop() {
            let entry = &mut self.nodes[id.index()];
            entry.rect = entry.rect + delta;
            stack.extend(entry.children.iter().copied());
        }
    }

    fn is_in_container(&self, mut node: SimNodeId) -> bool {
        while let Some(parent) = self.nodes[node.index()].parent {
            if parent == Self::CONTAINER {
                return true;
            }
            node = parent;
        }
        false
    }
}

impl ReorderHost for SimHost {
    type Node = SimNodeId;

    fn children(&self, parent: SimNodeId) -> impl Iterator<Item = SimNodeId> + '_ {
        self.nodes[parent.index()].children.iter().copied()
    }

    fn parent(&self, node: SimNodeId) -> Option<SimNodeId> {
        self.nodes[node.index()].parent
    }

    fn is_drag_disabled(&self, node: SimNodeId) -> bool {
        self.nodes[node.index()].disabled
    }

    fn has_class(&self, node: SimNodeId, class: &str) -> bool {
        self.nodes[node.index()].classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: SimNodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.index()].classes.push(class.into());
        }
    }

    fn remove_class(&mut self, node: SimNodeId, class: &str) {
        self.nodes[node.index()].classes.retain(|c| c != class);
    }

    fn offset(&self, node: SimNodeId) -> Point {
        self.nodes[node.index()].rect.origin()
    }

    fn size(&self, node: SimNodeId) -> Size {
        self.nodes[node.index()].rect.size()
    }

    fn client_rect(&self, node: SimNodeId) -> Rect {
        self.visual_rect(node)
    }

    fn node_at(&self, point: Point) -> Option<SimNodeId> {
        if !self.client_rect.contains(point) {
            return Some(Self::ROOT);
        }
        self.ids()
            .rev()
            .filter(|&id| {
                let node = &self.nodes[id.index()];
                node.alive && node.ghost.is_none() && self.is_in_container(id)
            })
            .find(|&id| self.visual_rect(id).contains(point))
            .or(Some(Self::CONTAINER))
    }

    fn scroll_metrics(&self, _container: SimNodeId) -> ScrollMetrics {
        let content_extent = self.nodes[Self::CONTAINER.index()]
            .children
            .iter()
            .map(|&child| self.nodes[child.index()].rect.y1)
            .fold(0.0, f64::max);
        ScrollMetrics {
            offset: self.scroll_offset,
            content_extent,
            viewport_extent: self.client_rect.height(),
        }
    }

    fn set_scroll_offset(&mut self, _container: SimNodeId, offset: f64) {
        self.scroll_offset = offset;
    }

    fn set_translation(&mut self, node: SimNodeId, translation: Vec2) {
        self.nodes[node.index()].translation = translation;
    }

    fn create_ghost(&mut self, source: SimNodeId) -> Option<SimNodeId> {
        if !self.ghosts_supported {
            return None;
        }
        let source_node = &self.nodes[source.index()];
        let mut ghost = SimNode::new(&source_node.label, None, source_node.rect);
        ghost.classes = source_node.classes.clone();
        ghost.ghost = Some(Ghost {
            source,
            rect: source_node.rect,
            animated: false,
        });
        Some(self.push(ghost))
    }

    fn set_ghost_rect(&mut self, ghost: SimNodeId, rect: Rect, animated: bool) {
        if let Some(state) = self.nodes[ghost.index()].ghost.as_mut() {
            state.rect = rect;
            state.animated = animated;
        }
    }

    fn remove_ghost(&mut self, ghost: SimNodeId) {
        let node = &mut self.nodes[ghost.index()];
        if node.ghost.is_some() {
            node.alive = false;
        }
    }

    fn subscribe(&mut self, container: SimNodeId, kinds: EventKinds) {
        self.nodes[container.index()].subscriptions |= kinds;
    }

    fn unsubscribe(&mut self, container: SimNodeId, kinds: EventKinds) {
        self.nodes[container.index()].subscriptions.remove(kinds);
    }

    fn set_selection_suppressed(&mut self, suppressed: bool) {
        self.selection_suppressed = suppressed;
    }

    fn set_native_scroll(&mut self, container: SimNodeId, enabled: bool) {
        self.nodes[container.index()].native_scroll = enabled;
    }
}
