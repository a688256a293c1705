// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording host shared by the integration tests.

#![allow(
    dead_code,
    missing_docs,
    unreachable_pub,
    reason = "Integration-test helper module; not every test uses every helper."
)]

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use kurbo::{Point, Rect, Size, Vec2};
use understory_draggable::input::{
    EventType, MousePhase, PointerCoords, PointerId, PointerPhase, RawEvent, TouchActionProperty,
    TouchPhase, TouchPoint,
};
use understory_draggable::scheduler::{AutoScheduler, Clock, FrameId, FrameScheduler, TimerQueue};
use understory_draggable::{
    BindTarget, ComputedBox, Host, PositionScheme, StyleSnapshot, Translate,
};

pub const ELEMENT: u32 = 1;
pub const CONTAINER: u32 = 2;

/// Frames are fired by the test, never by a clock.
#[derive(Debug, Default)]
pub struct ManualFrames {
    next: u64,
    pub pending: Vec<FrameId>,
    pub cancelled: Vec<FrameId>,
    /// Delays passed to `set_timeout`, when used as a timer queue.
    pub delays: Vec<f64>,
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameId {
        self.next += 1;
        let id = FrameId(self.next);
        self.pending.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.pending.retain(|p| *p != id);
        self.cancelled.push(id);
    }
}

impl TimerQueue for ManualFrames {
    fn set_timeout(&mut self, delay_ms: f64) -> FrameId {
        self.delays.push(delay_ms);
        self.request_frame()
    }

    fn clear_timeout(&mut self, id: FrameId) {
        self.cancel_frame(id);
    }
}

/// A clock the test advances by hand.
#[derive(Clone, Debug, Default)]
pub struct TestClock(pub Rc<Cell<f64>>);

impl TestClock {
    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

pub type TestScheduler = AutoScheduler<ManualFrames, TestClock, ManualFrames>;

#[derive(Debug, Default)]
pub struct MockHost {
    pub bound: HashSet<(BindTarget<u32>, EventType)>,
    pub duplicate_binds: usize,
    pub unknown_unbinds: usize,
    pub styles: HashMap<u32, StyleSnapshot>,
    pub boxes: HashMap<u32, ComputedBox>,
    pub rects: HashMap<u32, Rect>,
    pub parents: HashMap<u32, u32>,
    pub selectors: HashMap<String, Vec<u32>>,
    pub position_scheme: HashMap<u32, Option<PositionScheme>>,
    pub left_top: HashMap<u32, Option<Point>>,
    pub transforms: HashMap<u32, Option<Translate>>,
    pub touch_action_blocked: HashMap<u32, bool>,
    pub dragging: HashSet<u32>,
    /// Every translate written, in order.
    pub paints: Vec<Vec2>,
    pub frames: ManualFrames,
    /// Replaces `frames` when set.
    pub auto: Option<TestScheduler>,
}

impl MockHost {
    /// A host with one absolutely positioned 50x50 element at the origin.
    pub fn new() -> Self {
        let mut host = Self::default();
        host.add_element(ELEMENT, Rect::new(0.0, 0.0, 50.0, 50.0));
        host.styles.get_mut(&ELEMENT).unwrap().position = PositionScheme::Absolute;
        host
    }

    pub fn add_element(&mut self, node: u32, rect: Rect) {
        self.styles.insert(node, StyleSnapshot::default());
        self.boxes
            .insert(node, ComputedBox::from_offset_size(rect.size()));
        self.rects.insert(node, rect);
    }

    /// Adds a 300x200 container at the origin and puts the element at (10, 10) inside it.
    pub fn with_container(mut self) -> Self {
        self.add_element(CONTAINER, Rect::new(0.0, 0.0, 300.0, 200.0));
        self.rects
            .insert(ELEMENT, Rect::from_origin_size((10.0, 10.0), Size::new(50.0, 50.0)));
        self.parents.insert(ELEMENT, CONTAINER);
        self
    }

    /// Routes frame requests through `auto` instead of `frames`.
    pub fn with_scheduler(mut self, auto: TestScheduler) -> Self {
        self.auto = Some(auto);
        self
    }

    /// The frames backing whichever scheduler is in use.
    pub fn active_frames(&mut self) -> &mut ManualFrames {
        match &mut self.auto {
            None => &mut self.frames,
            Some(AutoScheduler::Refresh(frames)) => frames,
            Some(AutoScheduler::Interval(interval)) => interval.timers_mut(),
        }
    }

    pub fn is_bound(&self, target: BindTarget<u32>, event: EventType) -> bool {
        self.bound.contains(&(target, event))
    }

    pub fn window_bindings(&self) -> usize {
        self.bound
            .iter()
            .filter(|(t, _)| *t == BindTarget::Window)
            .count()
    }

    /// Takes every pending frame, in request order.
    pub fn take_frames(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.active_frames().pending)
    }
}

impl Host for MockHost {
    type Node = u32;

    fn bind(&mut self, target: BindTarget<u32>, event: EventType) {
        if !self.bound.insert((target, event)) {
            self.duplicate_binds += 1;
        }
    }

    fn unbind(&mut self, target: BindTarget<u32>, event: EventType) {
        if !self.bound.remove(&(target, event)) {
            self.unknown_unbinds += 1;
        }
    }

    fn set_touch_action(&mut self, node: u32, _property: TouchActionProperty, blocked: bool) {
        self.touch_action_blocked.insert(node, blocked);
    }

    fn query_selector(&self, selector: &str) -> Option<u32> {
        self.selectors.get(selector).and_then(|v| v.first().copied())
    }

    fn query_selector_all(&self, _scope: u32, selector: &str) -> Vec<u32> {
        self.selectors.get(selector).cloned().unwrap_or_default()
    }

    fn parent(&self, node: u32) -> Option<u32> {
        self.parents.get(&node).copied()
    }

    fn computed_box(&self, node: u32) -> ComputedBox {
        self.boxes
            .get(&node)
            .copied()
            .unwrap_or(ComputedBox::from_offset_size(Size::ZERO))
    }

    fn bounding_rect(&self, node: u32) -> Rect {
        self.rects.get(&node).copied().unwrap_or(Rect::ZERO)
    }

    fn style(&self, node: u32) -> StyleSnapshot {
        self.styles.get(&node).copied().unwrap_or_default()
    }

    fn set_position_scheme(&mut self, node: u32, scheme: Option<PositionScheme>) {
        self.position_scheme.insert(node, scheme);
    }

    fn set_left_top(&mut self, node: u32, left_top: Option<Point>) {
        self.left_top.insert(node, left_top);
    }

    fn set_transform(&mut self, node: u32, _property: &str, value: Option<Translate>) {
        if let Some(t) = value {
            self.paints.push(t.offset);
        }
        self.transforms.insert(node, value);
    }

    fn set_dragging_marker(&mut self, node: u32, dragging: bool) {
        if dragging {
            self.dragging.insert(node);
        } else {
            self.dragging.remove(&node);
        }
    }

    fn scheduler(&mut self) -> &mut dyn FrameScheduler {
        match &mut self.auto {
            Some(auto) => auto,
            None => &mut self.frames,
        }
    }
}

pub fn at(x: f64, y: f64) -> PointerCoords {
    PointerCoords::client(Point::new(x, y))
}

pub fn pointer(phase: PointerPhase, id: i64, x: f64, y: f64) -> RawEvent {
    RawEvent::pointer(phase, PointerId(id), at(x, y))
}

pub fn touch(phase: TouchPhase, touches: &[(i64, f64, f64)]) -> RawEvent {
    RawEvent::touch(
        phase,
        touches
            .iter()
            .map(|&(id, x, y)| TouchPoint::new(PointerId(id), at(x, y))),
    )
}

pub fn mouse(phase: MousePhase, button: u16, x: f64, y: f64) -> RawEvent {
    RawEvent::mouse(phase, button, at(x, y))
}
