// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input normalization: raw mouse, touch, and pointer events into one sample shape.
//!
//! Hosts deliver a [`RawEvent`] tagged with its input family. [`normalize`] turns it
//! into a [`Normalized`] value carrying a [`Phase`] and an [`InputSample`]; nothing
//! downstream looks at the raw event shape again.
//!
//! Which start events a draggable listens to is decided once, at setup, by
//! [`InputFamily::select`]:
//!
//! 1. unified pointer events ([`InputFamily::Pointer`]),
//! 2. legacy prefixed pointer events ([`InputFamily::LegacyPointer`]),
//! 3. mouse and touch together ([`InputFamily::MouseTouch`]), for hybrid devices.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_draggable::input::{
//!     normalize, Phase, PointerCoords, PointerId, PointerSource, RawEvent, TouchPhase, TouchPoint,
//! };
//!
//! let start = RawEvent::touch(
//!     TouchPhase::Start,
//!     [TouchPoint::new(PointerId(4), PointerCoords::client(Point::new(3.0, 4.0)))],
//! );
//! let n = normalize(&start, None).unwrap();
//! assert_eq!(n.phase, Phase::Start);
//! assert_eq!(n.sample.source, PointerSource::Touch(PointerId(4)));
//!
//! // Moves only yield a sample for the touch being tracked.
//! let other = RawEvent::touch(
//!     TouchPhase::Move,
//!     [TouchPoint::new(PointerId(9), PointerCoords::client(Point::new(8.0, 8.0)))],
//! );
//! assert!(normalize(&other, Some(PointerSource::Touch(PointerId(4)))).is_none());
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Opaque correlator for one touch or pointer stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub i64);

/// Where a normalized sample came from, including its stream identity.
///
/// Only one mouse gesture can exist at a time, so [`PointerSource::Mouse`] carries no id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerSource {
    /// A mouse.
    Mouse,
    /// A touch point with its identifier.
    Touch(PointerId),
    /// A unified or legacy pointer with its pointer id.
    Pointer(PointerId),
}

impl PointerSource {
    /// Returns the stream identity, or `None` for the mouse.
    #[must_use]
    pub fn id(self) -> Option<PointerId> {
        match self {
            Self::Mouse => None,
            Self::Touch(id) | Self::Pointer(id) => Some(id),
        }
    }
}

/// The canonical `{identity, x, y}` produced from any raw input event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputSample {
    /// Source and identity of the sample.
    pub source: PointerSource,
    /// Pointer-space coordinate.
    pub point: Point,
}

/// Lifecycle phase of a normalized event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A gesture may begin.
    Start,
    /// The tracked pointer moved.
    Move,
    /// The tracked pointer was released.
    End,
    /// The input source abandoned the gesture.
    Cancel,
}

/// A raw event reduced to a phase and a sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalized {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Sample for the stream that produced the event.
    pub sample: InputSample,
}

/// Coordinates carried by a raw event.
///
/// Page coordinates are preferred when present; client coordinates are the fallback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerCoords {
    /// Document-relative position, if the host reports one.
    pub page: Option<Point>,
    /// Viewport-relative position.
    pub client: Point,
}

impl PointerCoords {
    /// Coordinates with only a client position.
    #[must_use]
    pub const fn client(client: Point) -> Self {
        Self { page: None, client }
    }

    /// Coordinates with both page and client positions.
    #[must_use]
    pub const fn with_page(page: Point, client: Point) -> Self {
        Self {
            page: Some(page),
            client,
        }
    }

    /// The pointer-space point used for drag arithmetic.
    #[must_use]
    pub fn point(&self) -> Point {
        self.page.unwrap_or(self.client)
    }
}

/// One entry of a touch event's changed-touches list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Touch identifier.
    pub identifier: PointerId,
    /// Coordinates of this touch.
    pub coords: PointerCoords,
}

impl TouchPoint {
    /// Creates a touch point.
    #[must_use]
    pub const fn new(identifier: PointerId, coords: PointerCoords) -> Self {
        Self { identifier, coords }
    }
}

/// Mouse event phases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MousePhase {
    /// `mousedown`
    Down,
    /// `mousemove`
    Move,
    /// `mouseup`
    Up,
}

/// Touch event phases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// `touchstart`
    Start,
    /// `touchmove`
    Move,
    /// `touchend`
    End,
    /// `touchcancel`
    Cancel,
}

/// Pointer event phases (unified or legacy).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// `pointerdown`
    Down,
    /// `pointermove`
    Move,
    /// `pointerup`
    Up,
    /// `pointercancel`
    Cancel,
}

/// Mouse button codes that may begin a drag: primary and auxiliary.
pub const DRAG_BUTTONS: [u16; 2] = [0, 1];

/// A low-level input event as delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum RawEvent {
    /// A mouse event.
    Mouse {
        /// Phase.
        phase: MousePhase,
        /// Button code (`0` primary, `1` auxiliary, `2` secondary, ...).
        button: u16,
        /// Coordinates.
        coords: PointerCoords,
    },
    /// A touch event.
    Touch {
        /// Phase.
        phase: TouchPhase,
        /// Touches that changed in this event.
        changed_touches: SmallVec<[TouchPoint; 2]>,
    },
    /// A pointer event.
    Pointer {
        /// Phase.
        phase: PointerPhase,
        /// `true` for the legacy prefixed event family.
        legacy: bool,
        /// Pointer id.
        pointer_id: PointerId,
        /// Coordinates.
        coords: PointerCoords,
    },
}

impl RawEvent {
    /// A mouse event.
    #[must_use]
    pub fn mouse(phase: MousePhase, button: u16, coords: PointerCoords) -> Self {
        Self::Mouse {
            phase,
            button,
            coords,
        }
    }

    /// A touch event with the given changed touches.
    #[must_use]
    pub fn touch(phase: TouchPhase, changed_touches: impl IntoIterator<Item = TouchPoint>) -> Self {
        Self::Touch {
            phase,
            changed_touches: changed_touches.into_iter().collect(),
        }
    }

    /// A unified pointer event.
    #[must_use]
    pub fn pointer(phase: PointerPhase, pointer_id: PointerId, coords: PointerCoords) -> Self {
        Self::Pointer {
            phase,
            legacy: false,
            pointer_id,
            coords,
        }
    }

    /// A legacy prefixed pointer event.
    #[must_use]
    pub fn legacy_pointer(phase: PointerPhase, pointer_id: PointerId, coords: PointerCoords) -> Self {
        Self::Pointer {
            phase,
            legacy: true,
            pointer_id,
            coords,
        }
    }

    /// The host-level event type this event is delivered as.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match *self {
            Self::Mouse { phase, .. } => match phase {
                MousePhase::Down => EventType::MouseDown,
                MousePhase::Move => EventType::MouseMove,
                MousePhase::Up => EventType::MouseUp,
            },
            Self::Touch { phase, .. } => match phase {
                TouchPhase::Start => EventType::TouchStart,
                TouchPhase::Move => EventType::TouchMove,
                TouchPhase::End => EventType::TouchEnd,
                TouchPhase::Cancel => EventType::TouchCancel,
            },
            Self::Pointer {
                phase,
                legacy: false,
                ..
            } => match phase {
                PointerPhase::Down => EventType::PointerDown,
                PointerPhase::Move => EventType::PointerMove,
                PointerPhase::Up => EventType::PointerUp,
                PointerPhase::Cancel => EventType::PointerCancel,
            },
            Self::Pointer {
                phase,
                legacy: true,
                ..
            } => match phase {
                PointerPhase::Down => EventType::MsPointerDown,
                PointerPhase::Move => EventType::MsPointerMove,
                PointerPhase::Up => EventType::MsPointerUp,
                PointerPhase::Cancel => EventType::MsPointerCancel,
            },
        }
    }
}

/// Host-level event categories a draggable can subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// `mousedown`
    MouseDown,
    /// `mousemove`
    MouseMove,
    /// `mouseup`
    MouseUp,
    /// `touchstart`
    TouchStart,
    /// `touchmove`
    TouchMove,
    /// `touchend`
    TouchEnd,
    /// `touchcancel`
    TouchCancel,
    /// `pointerdown`
    PointerDown,
    /// `pointermove`
    PointerMove,
    /// `pointerup`
    PointerUp,
    /// `pointercancel`
    PointerCancel,
    /// `MSPointerDown`
    MsPointerDown,
    /// `MSPointerMove`
    MsPointerMove,
    /// `MSPointerUp`
    MsPointerUp,
    /// `MSPointerCancel`
    MsPointerCancel,
}

impl EventType {
    /// The DOM-style event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerCancel => "pointercancel",
            Self::MsPointerDown => "MSPointerDown",
            Self::MsPointerMove => "MSPointerMove",
            Self::MsPointerUp => "MSPointerUp",
            Self::MsPointerCancel => "MSPointerCancel",
        }
    }

    /// The lifecycle phase this event type maps to.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            Self::MouseDown | Self::TouchStart | Self::PointerDown | Self::MsPointerDown => {
                Phase::Start
            }
            Self::MouseMove | Self::TouchMove | Self::PointerMove | Self::MsPointerMove => {
                Phase::Move
            }
            Self::MouseUp | Self::TouchEnd | Self::PointerUp | Self::MsPointerUp => Phase::End,
            Self::TouchCancel | Self::PointerCancel | Self::MsPointerCancel => Phase::Cancel,
        }
    }

    /// Move/end/cancel events to bind once a gesture begins with this start event.
    ///
    /// Empty for anything that is not a start event.
    #[must_use]
    pub const fn follow_up(self) -> &'static [Self] {
        match self {
            Self::MouseDown => &[Self::MouseMove, Self::MouseUp],
            Self::TouchStart => &[Self::TouchMove, Self::TouchEnd, Self::TouchCancel],
            Self::PointerDown => &[Self::PointerMove, Self::PointerUp, Self::PointerCancel],
            Self::MsPointerDown => &[Self::MsPointerMove, Self::MsPointerUp, Self::MsPointerCancel],
            _ => &[],
        }
    }
}

/// Which touch-action style property a binder writes on its handles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchActionProperty {
    /// `touch-action`
    Standard,
    /// The legacy prefixed `-ms-touch-action`.
    Legacy,
}

/// The input event family a draggable binds to. Chosen once per instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputFamily {
    /// Unified pointer events.
    Pointer,
    /// Legacy prefixed pointer events.
    LegacyPointer,
    /// Mouse and touch events bound side by side.
    MouseTouch,
}

impl InputFamily {
    /// Picks the family in priority order: unified pointer, legacy pointer, mouse+touch.
    #[must_use]
    pub const fn select(pointer_events: bool, legacy_pointer_events: bool) -> Self {
        if pointer_events {
            Self::Pointer
        } else if legacy_pointer_events {
            Self::LegacyPointer
        } else {
            Self::MouseTouch
        }
    }

    /// Start events bound on each drag handle.
    #[must_use]
    pub const fn start_events(self) -> &'static [EventType] {
        match self {
            Self::Pointer => &[EventType::PointerDown],
            Self::LegacyPointer => &[EventType::MsPointerDown],
            Self::MouseTouch => &[EventType::MouseDown, EventType::TouchStart],
        }
    }

    /// Touch-action property to set on bound handles so the browser does not scroll.
    #[must_use]
    pub const fn touch_action_property(self) -> Option<TouchActionProperty> {
        match self {
            Self::Pointer => Some(TouchActionProperty::Standard),
            Self::LegacyPointer => Some(TouchActionProperty::Legacy),
            Self::MouseTouch => None,
        }
    }
}

/// Reduces a raw event to a phase and a sample.
///
/// `tracked` is the identity of the active gesture, if any. It is needed for touch
/// events, whose changed-touches list may contain unrelated touches: the touch whose
/// identifier matches `tracked` is selected by scanning the whole list. Touch starts
/// use the first changed touch.
///
/// Returns `None` when the event cannot contribute to a gesture: a mouse press with a
/// button other than primary or auxiliary, a touch event with no changed touches, or a
/// touch move/end/cancel that does not contain the tracked touch.
#[must_use]
pub fn normalize(event: &RawEvent, tracked: Option<PointerSource>) -> Option<Normalized> {
    let phase = event.event_type().phase();
    let sample = match event {
        RawEvent::Mouse { button, coords, .. } => {
            if phase == Phase::Start && !DRAG_BUTTONS.contains(button) {
                return None;
            }
            InputSample {
                source: PointerSource::Mouse,
                point: coords.point(),
            }
        }
        RawEvent::Touch {
            changed_touches, ..
        } => {
            let touch = if phase == Phase::Start {
                changed_touches.first()?
            } else {
                let Some(PointerSource::Touch(id)) = tracked else {
                    return None;
                };
                changed_touches.iter().find(|t| t.identifier == id)?
            };
            InputSample {
                source: PointerSource::Touch(touch.identifier),
                point: touch.coords.point(),
            }
        }
        RawEvent::Pointer {
            pointer_id, coords, ..
        } => InputSample {
            source: PointerSource::Pointer(*pointer_id),
            point: coords.point(),
        },
    };
    Some(Normalized { phase, sample })
}
