// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reorder engine: event handlers, timers and the drag lifecycle.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use understory_timing::{TimerId, TimerQueue};

use crate::animate::{apply_shift, clear_transitions, plan_shift};
use crate::emit::{ReorderResult, ResultQueue, reset_visuals};
use crate::error::ReorderError;
use crate::hit::{mark_target, resolve};
use crate::host::{EventKinds, ReorderHost, eligible_children};
use crate::options::{
    ACTIVE_CLASS, DRAGGED_CLASS, HIT_TEST_DEBOUNCE, ReorderOptions, SCROLL_TICK_PERIOD,
    Settings, StartConfig, TRANSITION_DURATION,
};
use crate::pointer::{PointerInput, PointerSample};
use crate::scroll::{SwipeTracker, auto_scroll_step, swipe_scroll};
use crate::session::{ChildEntry, DragPhase, DragSession};

/// Scheduled continuations.
#[derive(Clone, Debug)]
enum Task<N> {
    /// A touch press waiting for the press delay.
    PressDelay(PointerSample<N>),
    /// A debounced hit test for the last move.
    HitTest(PointerSample<N>),
    /// End of the shift animation.
    Settle,
    /// Auto-scroll check.
    ScrollTick,
}

#[derive(Copy, Clone, Debug, Default)]
struct PendingTimers {
    press: Option<TimerId>,
    hit_test: Option<TimerId>,
    settle: Option<TimerId>,
    scroll: Option<TimerId>,
}

#[derive(Clone, Debug)]
struct Attached<N> {
    container: N,
    child_match_class: Option<String>,
}

/// Pointer-driven reordering of the children of one container.
///
/// A `Reorderer` owns no nodes and reads no clock. The host forwards its
/// input events to the `on_*` handlers (or [`handle`](Self::handle)), calls
/// [`advance`](Self::advance) when [`next_deadline`](Self::next_deadline)
/// passes, and collects [`ReorderResult`]s with
/// [`poll_result`](Self::poll_result) or [`results`](Self::results).
///
/// Times are [`Duration`]s since an epoch the host chooses; they only need to
/// be monotonic.
///
/// ```
/// use core::time::Duration;
/// use understory_reorder::sim::SimHost;
/// use understory_reorder::{PointerSample, ReorderResult, Reorderer, StartConfig};
///
/// let mut host = SimHost::vertical_list(&["A", "B", "C", "D"], 50.0, 200.0);
/// let mut reorderer = Reorderer::new();
/// let container = host.container();
/// reorderer.start(&mut host, StartConfig::new(container)).unwrap();
///
/// let a = host.child(0);
/// let c = host.child(2);
/// let ms = Duration::from_millis;
///
/// let press = PointerSample::mouse(host.center_of(a), Some(a));
/// reorderer.on_press(&mut host, press, ms(0));
/// let over = PointerSample::mouse(host.center_of(c), Some(c));
/// reorderer.on_move(&mut host, over, ms(10));
/// reorderer.advance(&mut host, ms(110)); // hit test: C becomes the target
/// reorderer.advance(&mut host, ms(410)); // shift animation commits
/// reorderer.on_release(&mut host, ms(420));
///
/// let result = reorderer.poll_result().unwrap();
/// assert_eq!(result, ReorderResult { initial_index: 0, fetched_index: 2 });
/// ```
#[derive(Clone, Debug)]
pub struct Reorderer<N> {
    settings: Settings,
    attached: Option<Attached<N>>,
    session: DragSession<N>,
    timers: TimerQueue<Task<N>>,
    pending: PendingTimers,
    swipe: SwipeTracker,
    results: ResultQueue,
}

impl<N: Copy + Eq + Debug> Default for Reorderer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy + Eq + Debug> Reorderer<N> {
    /// Creates a stopped reorderer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ReorderOptions::default())
    }

    /// Creates a stopped reorderer with `options` applied over the defaults.
    #[must_use]
    pub fn with_options(options: ReorderOptions) -> Self {
        let mut settings = Settings::default();
        settings.apply(options);
        Self {
            settings,
            attached: None,
            session: DragSession::default(),
            timers: TimerQueue::new(),
            pending: PendingTimers::default(),
            swipe: SwipeTracker::default(),
            results: ResultQueue::new(),
        }
    }

    /// Updates settings. Absent fields keep their current value.
    ///
    /// Takes effect for the next press; a drag in progress is not affected.
    pub fn configure(&mut self, options: ReorderOptions) {
        self.settings.apply(options);
        #[cfg(feature = "tracing")]
        tracing::debug!(settings = ?self.settings, "reorder settings updated");
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// The managed container, while started.
    #[must_use]
    pub fn container(&self) -> Option<N> {
        self.attached.as_ref().map(|attached| attached.container)
    }

    /// Returns `true` between [`start`](Self::start) and [`stop`](Self::stop).
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.attached.is_some()
    }

    /// State of the current (or last) drag.
    #[must_use]
    pub fn session(&self) -> &DragSession<N> {
        &self.session
    }

    /// Current drag phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.session.phase()
    }

    /// Earliest pending timer deadline. The host should call
    /// [`advance`](Self::advance) once this time has passed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Pops the oldest emitted result.
    pub fn poll_result(&mut self) -> Option<ReorderResult> {
        self.results.pop()
    }

    /// Drains every emitted result, oldest first.
    pub fn results(&mut self) -> impl Iterator<Item = ReorderResult> + '_ {
        self.results.drain()
    }

    /// Attaches to `config.container`.
    ///
    /// Subscribes the container to mouse and touch events and disables its
    /// native scrolling. Fails without side effects if already started or if
    /// the container has fewer than two eligible children.
    pub fn start<H>(&mut self, host: &mut H, config: StartConfig<N>) -> Result<(), ReorderError>
    where
        H: ReorderHost<Node = N>,
    {
        if self.attached.is_some() {
            return Err(ReorderError::AlreadyStarted);
        }
        let eligible = eligible_children(host, config.container).len();
        if eligible < 2 {
            #[cfg(feature = "tracing")]
            tracing::debug!(eligible, "not enough children to reorder");
            return Err(ReorderError::TooFewChildren { eligible });
        }

        host.subscribe(config.container, EventKinds::MOUSE | EventKinds::TOUCH);
        host.set_native_scroll(config.container, false);
        #[cfg(feature = "tracing")]
        tracing::debug!(container = ?config.container, eligible, "reorderer started");

        self.attached = Some(Attached {
            container: config.container,
            child_match_class: config.child_match_class,
        });
        self.session = DragSession::default();
        self.swipe.reset();
        Ok(())
    }

    /// Detaches from the container.
    ///
    /// Cancels every timer, removes the ghost and reverts drag styling. A drag
    /// in progress ends without emitting. Already emitted results stay queued.
    pub fn stop<H>(&mut self, host: &mut H)
    where
        H: ReorderHost<Node = N>,
    {
        let Some(attached) = self.attached.take() else {
            return;
        };
        self.timers.clear();
        self.pending = PendingTimers::default();
        if let Some(ghost) = self.session.ghost.take() {
            host.remove_ghost(ghost);
        }
        if self.session.phase().is_active() {
            reset_visuals(host, attached.container, self.session.dragged);
        }
        self.session.disarm();
        self.swipe.reset();

        host.unsubscribe(attached.container, EventKinds::MOUSE | EventKinds::TOUCH);
        host.set_native_scroll(attached.container, true);
        #[cfg(feature = "tracing")]
        tracing::debug!(container = ?attached.container, "reorderer stopped");
    }

    /// Routes a normalized input to the matching handler.
    pub fn handle<H>(&mut self, host: &mut H, input: PointerInput<N>, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        match input {
            PointerInput::Press(sample) => self.on_press(host, sample, now),
            PointerInput::Move(sample) => self.on_move(host, sample, now),
            PointerInput::Release => self.on_release(host, now),
            PointerInput::Leave => self.on_leave(host, now),
            PointerInput::Cancel => self.on_cancel(host, now),
        }
    }

    /// Mouse down or touch start.
    ///
    /// A mouse press activates at once. A touch press activates after the
    /// touch press delay unless the pointer moves or lifts first.
    pub fn on_press<H>(&mut self, host: &mut H, sample: PointerSample<N>, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        self.advance(host, now);
        if self.attached.is_none() || self.session.phase().is_active() {
            return;
        }
        if sample.is_touch() {
            self.swipe.begin(sample.point.y);
        }
        if !self.settings.move_enabled {
            return;
        }
        if sample.is_touch() {
            self.cancel_press();
            let id = self.timers.schedule_after(
                now,
                self.settings.touch_press_delay,
                Task::PressDelay(sample),
            );
            self.pending.press = Some(id);
        } else {
            self.activate(host, sample, now);
        }
    }

    /// Pointer moved.
    ///
    /// Cancels a pending touch activation. Outside of a drag, touch moves
    /// scroll the container; during a drag the ghost follows the pointer and
    /// a hit test is scheduled.
    pub fn on_move<H>(&mut self, host: &mut H, sample: PointerSample<N>, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        self.advance(host, now);
        let Some(container) = self.container() else {
            return;
        };
        self.cancel_press();

        if self.session.phase() != DragPhase::Dragging {
            if sample.is_touch()
                && !self.session.phase().is_active()
                && let Some(delta) = self.swipe.update(sample.point.y)
                && let Some(offset) = swipe_scroll(host.scroll_metrics(container), delta)
            {
                host.set_scroll_offset(container, offset);
            }
            return;
        }

        self.follow_pointer(host, container, sample.point);

        // A queued hit test always belongs to the latest move.
        self.cancel_hit_test();
        if !self.session.animating && !self.session.scroll_active {
            let id = self
                .timers
                .schedule_after(now, HIT_TEST_DEBOUNCE, Task::HitTest(sample));
            self.pending.hit_test = Some(id);
        }
    }

    /// Mouse up or touch end.
    ///
    /// Ends the drag. If a shift animation is still running the drag settles
    /// and emits once the animation commits.
    pub fn on_release<H>(&mut self, host: &mut H, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        #[cfg(feature = "tracing")]
        tracing::trace!("release");
        self.advance(host, now);
        self.end(host);
    }

    /// The pointer left the container. Ends the drag like a release.
    pub fn on_leave<H>(&mut self, host: &mut H, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        #[cfg(feature = "tracing")]
        tracing::trace!("leave");
        self.advance(host, now);
        self.end(host);
    }

    /// The platform cancelled the touch. Ends the drag like a release.
    pub fn on_cancel<H>(&mut self, host: &mut H, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        #[cfg(feature = "tracing")]
        tracing::trace!("cancel");
        self.advance(host, now);
        self.end(host);
    }

    /// Runs every timer due at `now`.
    ///
    /// The `on_*` handlers call this first, so timers that came due before an
    /// event are never skipped.
    pub fn advance<H>(&mut self, host: &mut H, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.payload {
                Task::PressDelay(sample) => {
                    self.pending.press = None;
                    if self.settings.move_enabled && !self.session.phase().is_active() {
                        self.activate(host, sample, fired.deadline);
                    }
                }
                Task::HitTest(sample) => {
                    self.pending.hit_test = None;
                    self.hit_test(host, sample, fired.deadline);
                }
                Task::Settle => {
                    self.pending.settle = None;
                    self.settle(host);
                }
                Task::ScrollTick => self.scroll_tick(host),
            }
        }
    }

    fn cancel_press(&mut self) {
        if let Some(id) = self.pending.press.take() {
            self.timers.cancel(id);
        }
    }

    fn cancel_hit_test(&mut self) {
        if let Some(id) = self.pending.hit_test.take() {
            self.timers.cancel(id);
        }
    }

    fn cancel_scroll(&mut self) {
        if let Some(id) = self.pending.scroll.take() {
            self.timers.cancel(id);
        }
        self.session.scroll_active = false;
    }

    fn class_filter(&self) -> Option<&str> {
        self.attached
            .as_ref()
            .and_then(|attached| attached.child_match_class.as_deref())
    }

    /// Ghost rectangle centered on `point`, in container space.
    fn ghost_rect_at<H>(host: &H, container: N, point: Point, size: Size) -> Rect
    where
        H: ReorderHost<Node = N>,
    {
        let origin = host.client_rect(container).origin();
        Rect::from_center_size(point - origin.to_vec2(), size)
    }

    fn activate<H>(&mut self, host: &mut H, sample: PointerSample<N>, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        let Some(container) = self.container() else {
            return;
        };
        let entries: Vec<_> = eligible_children(host, container)
            .into_iter()
            .map(|node| ChildEntry {
                node,
                home: host.offset(node),
            })
            .collect();
        if entries.len() < 2 {
            #[cfg(feature = "tracing")]
            tracing::debug!(eligible = entries.len(), "press ignored, nothing to reorder");
            return;
        }

        self.session.arm(entries);
        host.add_class(container, ACTIVE_CLASS);
        host.set_selection_suppressed(true);

        let dragged = resolve(host, container, &sample)
            .filter(|&node| self.session.is_draggable(host, node, self.class_filter()));
        let Some((dragged, start_index)) =
            dragged.and_then(|node| Some((node, self.session.position(node)?)))
        else {
            #[cfg(feature = "tracing")]
            tracing::debug!(press_target = ?sample.target, "press target is not draggable");
            host.remove_class(container, ACTIVE_CLASS);
            host.set_selection_suppressed(false);
            self.session.disarm();
            return;
        };

        host.add_class(dragged, DRAGGED_CLASS);
        let size = host.size(dragged);
        let rect = Self::ghost_rect_at(host, container, sample.point, size);
        let ghost = host.create_ghost(dragged);
        if let Some(ghost) = ghost {
            let scroll = host.scroll_metrics(container).offset;
            let resting = Rect::from_origin_size(host.offset(dragged) - Vec2::new(0.0, scroll), size);
            host.set_ghost_rect(ghost, resting, false);
            host.set_ghost_rect(ghost, rect, true);
            let id = self
                .timers
                .schedule_repeating(now + SCROLL_TICK_PERIOD, SCROLL_TICK_PERIOD, Task::ScrollTick);
            self.pending.scroll = Some(id);
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(?dragged, "host created no ghost, auto-scroll disabled");
        }

        self.session.begin(dragged, start_index, ghost, rect);
        #[cfg(feature = "tracing")]
        tracing::debug!(?dragged, start_index, "drag started");
    }

    fn follow_pointer<H>(&mut self, host: &mut H, container: N, point: Point)
    where
        H: ReorderHost<Node = N>,
    {
        let Some(ghost) = self.session.ghost else {
            return;
        };
        let rect = Self::ghost_rect_at(host, container, point, self.session.ghost_rect.size());
        host.set_ghost_rect(ghost, rect, false);
        self.session.ghost_rect = rect;
    }

    fn hit_test<H>(&mut self, host: &mut H, sample: PointerSample<N>, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        let Some(container) = self.container() else {
            return;
        };
        if self.session.phase() != DragPhase::Dragging
            || self.session.animating
            || self.session.scroll_active
        {
            return;
        }

        let target = resolve(host, container, &sample)
            .filter(|&node| self.session.is_draggable(host, node, self.class_filter()))
            .filter(|&node| Some(node) != self.session.dragged);
        mark_target(host, self.session.order(), target);
        #[cfg(feature = "tracing")]
        if target != self.session.target {
            tracing::trace!(drop_target = ?target, "drop target changed");
        }
        self.session.target = target;

        if let Some(target) = target {
            self.begin_reorder(host, target, now);
        }
    }

    fn begin_reorder<H>(&mut self, host: &mut H, target: N, now: Duration)
    where
        H: ReorderHost<Node = N>,
    {
        if self.session.animating {
            return;
        }
        let Some(dragged) = self.session.dragged else {
            return;
        };
        let (Some(initial), Some(fetched)) =
            (self.session.position(dragged), self.session.position(target))
        else {
            return;
        };
        if initial == fetched {
            return;
        }

        let plan = plan_shift(&self.session, initial, fetched);
        apply_shift(host, &plan);
        self.session.record_reorder(initial, fetched);
        let id = self
            .timers
            .schedule_after(now, TRANSITION_DURATION, Task::Settle);
        self.pending.settle = Some(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(initial, fetched, shifted = plan.len(), "reorder animating");
    }

    fn settle<H>(&mut self, host: &mut H)
    where
        H: ReorderHost<Node = N>,
    {
        if self.session.commit() {
            clear_transitions(host, self.session.order());
            #[cfg(feature = "tracing")]
            tracing::debug!(
                initial = ?self.session.initial_index,
                fetched = ?self.session.fetched_index,
                "reorder committed"
            );
        }
        if self.session.phase() == DragPhase::Settling {
            self.finish(host);
        }
    }

    fn scroll_tick<H>(&mut self, host: &mut H)
    where
        H: ReorderHost<Node = N>,
    {
        let Some(container) = self.container() else {
            return;
        };
        if self.session.phase() != DragPhase::Dragging || self.session.ghost.is_none() {
            return;
        }
        let metrics = host.scroll_metrics(container);
        let step = auto_scroll_step(metrics, self.session.ghost_rect);
        if let Some(offset) = step.offset
            && offset != metrics.offset
        {
            host.set_scroll_offset(container, offset);
        }
        #[cfg(feature = "tracing")]
        if step.active != self.session.scroll_active {
            tracing::trace!(active = step.active, offset = ?step.offset, "auto-scroll");
        }
        self.session.scroll_active = step.active;
    }

    /// Shared by release, leave and cancel.
    fn end<H>(&mut self, host: &mut H)
    where
        H: ReorderHost<Node = N>,
    {
        self.cancel_press();
        self.cancel_hit_test();
        self.cancel_scroll();
        self.swipe.reset();
        if let Some(ghost) = self.session.ghost.take() {
            host.remove_ghost(ghost);
        }

        match self.session.phase() {
            DragPhase::Dragging if self.session.animating => {
                self.session.phase = DragPhase::Settling;
                #[cfg(feature = "tracing")]
                tracing::debug!("released during animation, settling");
            }
            DragPhase::Dragging | DragPhase::Armed => self.finish(host),
            DragPhase::Idle | DragPhase::Settling | DragPhase::Ended => {}
        }
    }

    fn finish<H>(&mut self, host: &mut H)
    where
        H: ReorderHost<Node = N>,
    {
        let Some(container) = self.container() else {
            return;
        };
        reset_visuals(host, container, self.session.dragged);
        match self.session.finish() {
            Some(result) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    initial_index = result.initial_index,
                    fetched_index = result.fetched_index,
                    "reorder emitted"
                );
                self.results.push(result);
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("drag ended without reorder");
            }
        }
    }
}
