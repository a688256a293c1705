// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The draggable: one interactive element and its `Idle -> Dragging -> Idle` lifecycle.
//!
//! ## Usage
//!
//! 1) Create a [`Draggable`] with [`Draggable::new`]. It binds start events on its
//!    handles through the [`Host`].
//! 2) Forward every raw event the host delivers for a bound `(target, event type)` pair
//!    to [`Draggable::handle_event`]. A start event that begins a gesture returns
//!    [`EventOutcome::Started`], which asks the host to prevent the default action.
//! 3) Forward every fired frame to [`Draggable::on_frame`].
//! 4) Observe [`DragEventKind::DragStart`], [`DragEventKind::DragMove`] and
//!    [`DragEventKind::DragEnd`] through [`Draggable::on`], and read
//!    [`Draggable::position`] when needed.
//!
//! While a gesture is active only events from the pointer that started it are
//! processed; everything else is dropped. An end that arrives with no active
//! gesture does nothing, so `dragEnd` fires exactly once per gesture.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt::Debug;
use core::hash::Hash;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::binding::{BindTarget, BoundListenerSet};
use crate::capability::PlatformCapabilities;
use crate::containment::{ContainmentFrame, constrain};
use crate::emitter::{EventEmitter, Listener};
use crate::error::DragSetupError;
use crate::host::{Host, PositionScheme, Translate};
use crate::input::{EventType, InputFamily, InputSample, Phase, PointerSource, RawEvent, normalize};
use crate::options::{DragOptions, ElementRef};
use crate::scheduler::{FrameId, RenderLoop};
use crate::size::measure;

/// Lifecycle notifications.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    /// A gesture began.
    DragStart,
    /// The tracked pointer moved.
    DragMove,
    /// The gesture ended, was cancelled, or was forced to end by `disable`.
    DragEnd,
}

/// Payload delivered to listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEvent<N> {
    /// Which notification this is.
    pub kind: DragEventKind,
    /// The dragged element.
    pub element: N,
    /// Logical position after this transition.
    pub position: Point,
    /// Logical position when the gesture began.
    pub start_position: Point,
    /// Constrained pointer delta since the gesture began.
    pub drag_point: Vec2,
    /// The normalized sample; `None` when `disable` forced the end.
    pub sample: Option<InputSample>,
    /// The raw event; `None` when `disable` forced the end.
    pub event: Option<RawEvent>,
}

/// What [`Draggable::handle_event`] did with an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventOutcome {
    /// Not for this draggable, filtered, or from another pointer.
    Ignored,
    /// A gesture began.
    Started,
    /// The tracked pointer moved.
    Moved,
    /// The gesture ended.
    Ended,
}

impl EventOutcome {
    /// Whether the host should suppress the event's default action.
    #[must_use]
    pub fn prevents_default(self) -> bool {
        self == Self::Started
    }
}

/// State scoped to one gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession {
    /// The pointer that started the gesture.
    pub identity: PointerSource,
    /// The start event type, which decides the follow-up bindings.
    pub start_event: EventType,
    /// Geometry snapshot; `None` when unconstrained.
    pub frame: Option<ContainmentFrame>,
}

/// A draggable element.
#[derive(Debug)]
pub struct Draggable<N> {
    element: N,
    options: DragOptions<N>,
    family: InputFamily,
    transform_property: Option<String>,
    supports_3d: bool,
    border_box_is_outer: bool,
    position: Point,
    start_position: Point,
    start_point: Point,
    drag_point: Vec2,
    enabled: bool,
    session: Option<DragSession>,
    handles: SmallVec<[N; 2]>,
    handle_bindings: BoundListenerSet<N>,
    session_bindings: BoundListenerSet<N>,
    render: RenderLoop,
    emitter: Rc<EventEmitter<DragEventKind, DragEvent<N>>>,
}

impl<N> Draggable<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Sets up a draggable on `element`.
    ///
    /// Reads the current position from the element's style, switches the element to
    /// relative positioning when it is neither relatively nor absolutely positioned,
    /// enables it and binds its handles.
    pub fn new<H>(
        host: &mut H,
        caps: &PlatformCapabilities,
        element: ElementRef<N>,
        options: DragOptions<N>,
    ) -> Result<Self, DragSetupError>
    where
        H: Host<Node = N> + ?Sized,
    {
        options.validate()?;
        let element = match element {
            ElementRef::Node(node) => node,
            ElementRef::Selector(selector) => match host.query_selector(&selector) {
                Some(node) => node,
                None => return Err(DragSetupError::ElementNotFound { selector }),
            },
        };

        let position = read_position(host, element);
        if !host.style(element).position.is_offsettable() {
            host.set_position_scheme(element, Some(PositionScheme::Relative));
        }

        let mut this = Self {
            element,
            options,
            family: caps.input_family,
            transform_property: caps.transform_property.clone(),
            supports_3d: caps.supports_3d,
            border_box_is_outer: caps.border_box_is_outer,
            position,
            start_position: position,
            start_point: Point::ZERO,
            drag_point: Vec2::ZERO,
            enabled: false,
            session: None,
            handles: SmallVec::new(),
            handle_bindings: BoundListenerSet::new(),
            session_bindings: BoundListenerSet::new(),
            render: RenderLoop::new(),
            emitter: Rc::new(EventEmitter::new()),
        };
        this.enable();
        this.set_handles(host);
        tracing::debug!(element = ?this.element, family = ?this.family, "draggable created");
        Ok(this)
    }

    /// Entry point for raw input delivered on `target`.
    ///
    /// Events whose type is not currently bound on `target` are ignored.
    pub fn handle_event<H>(
        &mut self,
        host: &mut H,
        target: BindTarget<N>,
        event: &RawEvent,
    ) -> EventOutcome
    where
        H: Host<Node = N> + ?Sized,
    {
        let ty = event.event_type();
        if ty.phase() == Phase::Start {
            self.on_start_event(host, target, ty, event)
        } else {
            self.on_follow_up_event(host, target, ty, event)
        }
    }

    fn on_start_event<H>(
        &mut self,
        host: &mut H,
        target: BindTarget<N>,
        ty: EventType,
        event: &RawEvent,
    ) -> EventOutcome
    where
        H: Host<Node = N> + ?Sized,
    {
        if !self.handle_bindings.contains(target, ty) {
            return EventOutcome::Ignored;
        }
        if self.session.is_some() {
            tracing::trace!(event = ty.name(), "start ignored: gesture already active");
            return EventOutcome::Ignored;
        }
        if !self.enabled {
            return EventOutcome::Ignored;
        }
        let Some(normalized) = normalize(event, None) else {
            tracing::trace!(event = ty.name(), "start filtered");
            return EventOutcome::Ignored;
        };

        self.session_bindings.unbind_all(host);
        self.session_bindings
            .bind(host, BindTarget::Window, ty.follow_up());
        self.drag_start(host, ty, normalized.sample, event);
        EventOutcome::Started
    }

    fn on_follow_up_event<H>(
        &mut self,
        host: &mut H,
        target: BindTarget<N>,
        ty: EventType,
        event: &RawEvent,
    ) -> EventOutcome
    where
        H: Host<Node = N> + ?Sized,
    {
        let Some(session) = self.session else {
            return EventOutcome::Ignored;
        };
        if !self.session_bindings.contains(target, ty) {
            return EventOutcome::Ignored;
        }
        let Some(normalized) = normalize(event, Some(session.identity)) else {
            tracing::trace!(event = ty.name(), "event carries no tracked pointer");
            return EventOutcome::Ignored;
        };
        if normalized.sample.source != session.identity {
            tracing::trace!(
                event = ty.name(),
                source = ?normalized.sample.source,
                tracked = ?session.identity,
                "pointer identity mismatch"
            );
            return EventOutcome::Ignored;
        }

        match normalized.phase {
            Phase::Move => {
                self.drag_move(normalized.sample, event);
                EventOutcome::Moved
            }
            Phase::End | Phase::Cancel => {
                self.drag_end(host, Some(normalized.sample), Some(event));
                EventOutcome::Ended
            }
            Phase::Start => EventOutcome::Ignored,
        }
    }

    fn drag_start<H>(&mut self, host: &mut H, ty: EventType, sample: InputSample, event: &RawEvent)
    where
        H: Host<Node = N> + ?Sized,
    {
        self.position = read_position(host, self.element);
        let frame = self.measure_containment(host);
        self.session = Some(DragSession {
            identity: sample.source,
            start_event: ty,
            frame,
        });
        self.start_point = sample.point;
        self.start_position = self.position;
        host.set_left_top(self.element, Some(self.position));
        self.drag_point = Vec2::ZERO;
        host.set_dragging_marker(self.element, true);

        tracing::debug!(element = ?self.element, source = ?sample.source, "dragStart");
        self.dispatch(DragEventKind::DragStart, Some(sample), Some(event));

        self.render.start(host.scheduler());
        self.paint(host);
    }

    fn drag_move(&mut self, sample: InputSample, event: &RawEvent) {
        let frame = self.session.as_ref().and_then(|s| s.frame);
        let raw = sample.point - self.start_point;
        let delta = constrain(raw, self.options.grid, frame.as_ref());
        self.position = self.start_position + delta;
        self.drag_point = delta;
        self.dispatch(DragEventKind::DragMove, Some(sample), Some(event));
    }

    /// Ends the active gesture. Returns `false` if there was none.
    fn drag_end<H>(
        &mut self,
        host: &mut H,
        sample: Option<InputSample>,
        event: Option<&RawEvent>,
    ) -> bool
    where
        H: Host<Node = N> + ?Sized,
    {
        if self.session.take().is_none() {
            return false;
        }
        self.session_bindings.unbind_all(host);
        self.render.stop(host.scheduler());

        if let Some(property) = self.transform_property.as_deref() {
            host.set_transform(self.element, property, None);
        }
        host.set_left_top(self.element, Some(self.position));
        host.set_dragging_marker(self.element, false);

        tracing::debug!(element = ?self.element, position = ?self.position, "dragEnd");
        self.dispatch(DragEventKind::DragEnd, sample, event);
        true
    }

    /// Entry point for fired frames.
    ///
    /// Paints at most once per frame, and never after the gesture ended.
    pub fn on_frame<H>(&mut self, host: &mut H, id: FrameId)
    where
        H: Host<Node = N> + ?Sized,
    {
        if self.session.is_none() {
            return;
        }
        if self.render.tick(id, host.scheduler()) {
            self.paint(host);
        }
    }

    fn paint<H>(&self, host: &mut H)
    where
        H: Host<Node = N> + ?Sized,
    {
        match self.transform_property.as_deref() {
            Some(property) => host.set_transform(
                self.element,
                property,
                Some(Translate {
                    offset: self.drag_point,
                    three_d: self.supports_3d,
                }),
            ),
            None => host.set_left_top(self.element, Some(self.position)),
        }
    }

    fn measure_containment<H>(&self, host: &H) -> Option<ContainmentFrame>
    where
        H: Host<Node = N> + ?Sized,
    {
        let Some(container) = self.options.containment.resolve(host, self.element) else {
            if self.options.containment.is_some() {
                tracing::debug!(containment = ?self.options.containment, "containment unresolved; unconstrained");
            }
            return None;
        };
        let element_size = measure(&host.computed_box(self.element), self.border_box_is_outer);
        let container_size = measure(&host.computed_box(container), self.border_box_is_outer);
        Some(ContainmentFrame::from_rects(
            host.bounding_rect(self.element),
            host.bounding_rect(container),
            element_size.size(),
            container_size.size(),
        ))
    }

    fn dispatch(&self, kind: DragEventKind, sample: Option<InputSample>, event: Option<&RawEvent>) {
        if self.emitter.listener_count(kind) == 0 {
            return;
        }
        let payload = DragEvent {
            kind,
            element: self.element,
            position: self.position,
            start_position: self.start_position,
            drag_point: self.drag_point,
            sample,
            event: event.cloned(),
        };
        self.emitter.emit(kind, &payload);
    }

    /// Allows new gestures.
    pub fn enable(&mut self) {
        if !self.enabled {
            tracing::debug!(element = ?self.element, "enabled");
        }
        self.enabled = true;
    }

    /// Blocks new gestures and ends the active one, emitting `dragEnd` before returning.
    pub fn disable<H>(&mut self, host: &mut H)
    where
        H: Host<Node = N> + ?Sized,
    {
        if self.enabled {
            tracing::debug!(element = ?self.element, "disabled");
        }
        self.enabled = false;
        self.drag_end(host, None, None);
    }

    /// Disables, clears every style the engine wrote, and removes all bindings.
    pub fn destroy<H>(&mut self, host: &mut H)
    where
        H: Host<Node = N> + ?Sized,
    {
        self.disable(host);
        if let Some(property) = self.transform_property.as_deref() {
            host.set_transform(self.element, property, None);
        }
        host.set_left_top(self.element, None);
        host.set_position_scheme(self.element, None);
        self.unbind_handles(host);
        self.handles.clear();
        tracing::debug!(element = ?self.element, "destroyed");
    }

    /// Re-resolves drag handles and rebinds start events on them.
    ///
    /// Old handles are unbound first. With a handle selector, handles are the matching
    /// descendants of the element; otherwise the element itself.
    pub fn set_handles<H>(&mut self, host: &mut H)
    where
        H: Host<Node = N> + ?Sized,
    {
        self.unbind_handles(host);
        self.handles = match self.options.handle.as_deref() {
            Some(selector) => host
                .query_selector_all(self.element, selector)
                .into_iter()
                .collect(),
            None => SmallVec::from_elem(self.element, 1),
        };
        if self.handles.is_empty() {
            tracing::debug!(element = ?self.element, handle = ?self.options.handle, "no drag handles matched");
        }
        let touch_action = self.family.touch_action_property();
        for &handle in &self.handles {
            self.handle_bindings
                .bind(host, BindTarget::Handle(handle), self.family.start_events());
            if let Some(property) = touch_action {
                host.set_touch_action(handle, property, true);
            }
        }
    }

    fn unbind_handles<H>(&mut self, host: &mut H)
    where
        H: Host<Node = N> + ?Sized,
    {
        self.handle_bindings.unbind_all(host);
        if let Some(property) = self.family.touch_action_property() {
            for &handle in &self.handles {
                host.set_touch_action(handle, property, false);
            }
        }
    }

    /// Registers a listener. See [`EventEmitter::on`].
    pub fn on(&self, kind: DragEventKind, listener: Listener<DragEvent<N>>) -> bool {
        self.emitter.on(kind, listener)
    }

    /// Registers a one-shot listener. See [`EventEmitter::once`].
    pub fn once(&self, kind: DragEventKind, listener: Listener<DragEvent<N>>) -> bool {
        self.emitter.once(kind, listener)
    }

    /// Removes a listener. See [`EventEmitter::off`].
    pub fn off(&self, kind: DragEventKind, listener: &Listener<DragEvent<N>>) -> bool {
        self.emitter.off(kind, listener)
    }

    /// The emitter, for listeners that need to subscribe or unsubscribe themselves.
    #[must_use]
    pub fn emitter(&self) -> &Rc<EventEmitter<DragEventKind, DragEvent<N>>> {
        &self.emitter
    }

    /// The dragged element.
    #[must_use]
    pub fn element(&self) -> N {
        self.element
    }

    /// Options the draggable was created with.
    #[must_use]
    pub fn options(&self) -> &DragOptions<N> {
        &self.options
    }

    /// The input family bound on handles.
    #[must_use]
    pub fn input_family(&self) -> InputFamily {
        self.family
    }

    /// Current drag handles.
    #[must_use]
    pub fn handles(&self) -> &[N] {
        &self.handles
    }

    /// Logical position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Logical position when the current or last gesture began.
    #[must_use]
    pub fn start_position(&self) -> Point {
        self.start_position
    }

    /// Constrained delta of the current or last gesture.
    #[must_use]
    pub fn drag_point(&self) -> Vec2 {
        self.drag_point
    }

    /// Whether a gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Whether new gestures may begin.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The pointer driving the active gesture.
    #[must_use]
    pub fn pointer_identity(&self) -> Option<PointerSource> {
        self.session.map(|s| s.identity)
    }

    /// Containment geometry of the active gesture.
    #[must_use]
    pub fn containment_frame(&self) -> Option<&ContainmentFrame> {
        self.session.as_ref().and_then(|s| s.frame.as_ref())
    }

    /// The active gesture.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Raw-event bindings currently attached for handles.
    #[must_use]
    pub fn handle_bindings(&self) -> &BoundListenerSet<N> {
        &self.handle_bindings
    }

    /// Raw-event bindings currently attached for the active gesture.
    #[must_use]
    pub fn session_bindings(&self) -> &BoundListenerSet<N> {
        &self.session_bindings
    }
}

/// Truncated `left`/`top` plus the truncated transform translation.
///
/// Missing or non-finite values read as zero.
fn read_position<H>(host: &H, element: H::Node) -> Point
where
    H: Host + ?Sized,
{
    let style = host.style(element);
    let finite = |v: f64| if v.is_finite() { v.trunc() } else { 0.0 };
    let translation = style
        .transform
        .map_or(Vec2::ZERO, |t| t.translation());
    Point::new(
        finite(style.left.unwrap_or(0.0)) + finite(translation.x),
        finite(style.top.unwrap_or(0.0)) + finite(translation.y),
    )
}
