// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Draggable: pointer-unified drag interactions for UI elements.
//!
//! This crate turns mouse, touch and pointer events into one dragging abstraction
//! with containment limits, grid snapping and a paint loop decoupled from input
//! frequency. It owns no element tree and no event loop: the application implements
//! [`Host`] and forwards raw events and fired frames.
//!
//! - [`emitter`]: publish/subscribe with one-shot listeners
//! - [`input`]: raw events to canonical samples, and binder selection per platform
//! - [`drag`]: the [`Draggable`] state machine and its lifecycle
//! - [`containment`]: grid quantization and per-axis clamping
//! - [`scheduler`]: frame-aligned paint loop with an interval fallback
//! - [`binding`]: idempotent bookkeeping of bound `(target, event)` pairs
//! - [`host`]: the environment interface
//! - [`capability`]: vendor-prefixed capability probing, cached process-wide
//! - [`size`]: box-model element measurement
//! - [`batch`]: many draggables set up in one pass, with isolated failures
//!
//! ## Flow
//!
//! ```text
//! raw event -> normalize -> identity check -> delta -> grid -> containment -> position
//!                                                                              |
//!                                             frame tick -> paint <-------------+
//!                                                          dragStart/dragMove/dragEnd
//! ```
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_draggable::{
//!     BindTarget, ComputedBox, DragOptions, Draggable, ElementRef, EventOutcome, FrameId,
//!     FrameScheduler, Host, PlatformCapabilities, PositionScheme, StyleSnapshot, Translate,
//! };
//! use understory_draggable::input::{EventType, PointerCoords, PointerId, PointerPhase, RawEvent};
//!
//! #[derive(Default)]
//! struct Frames(u64);
//! impl FrameScheduler for Frames {
//!     fn request_frame(&mut self) -> FrameId { self.0 += 1; FrameId(self.0) }
//!     fn cancel_frame(&mut self, _id: FrameId) {}
//! }
//!
//! #[derive(Default)]
//! struct Page { frames: Frames, left_top: Option<Point> }
//! impl Host for Page {
//!     type Node = u32;
//!     fn bind(&mut self, _t: BindTarget<u32>, _e: EventType) {}
//!     fn unbind(&mut self, _t: BindTarget<u32>, _e: EventType) {}
//!     fn computed_box(&self, _n: u32) -> ComputedBox {
//!         ComputedBox::from_offset_size(Size::new(50.0, 50.0))
//!     }
//!     fn bounding_rect(&self, _n: u32) -> Rect { Rect::new(0.0, 0.0, 50.0, 50.0) }
//!     fn style(&self, _n: u32) -> StyleSnapshot {
//!         StyleSnapshot { position: PositionScheme::Absolute, ..StyleSnapshot::default() }
//!     }
//!     fn set_position_scheme(&mut self, _n: u32, _s: Option<PositionScheme>) {}
//!     fn set_left_top(&mut self, _n: u32, p: Option<Point>) { self.left_top = p; }
//!     fn set_transform(&mut self, _n: u32, _p: &str, _t: Option<Translate>) {}
//!     fn scheduler(&mut self) -> &mut dyn FrameScheduler { &mut self.frames }
//! }
//!
//! let mut page = Page::default();
//! let caps = PlatformCapabilities::modern();
//! let mut drag =
//!     Draggable::new(&mut page, &caps, ElementRef::Node(7), DragOptions::new().with_grid(10.0, 10.0))
//!         .unwrap();
//!
//! let at = |x, y| PointerCoords::client(Point::new(x, y));
//! let down = RawEvent::pointer(PointerPhase::Down, PointerId(1), at(0.0, 0.0));
//! assert_eq!(drag.handle_event(&mut page, BindTarget::Handle(7), &down), EventOutcome::Started);
//!
//! let moved = RawEvent::pointer(PointerPhase::Move, PointerId(1), at(27.0, 14.0));
//! drag.handle_event(&mut page, BindTarget::Window, &moved);
//! assert_eq!(drag.position(), Point::new(30.0, 10.0));
//!
//! let up = RawEvent::pointer(PointerPhase::Up, PointerId(1), at(27.0, 14.0));
//! assert_eq!(drag.handle_event(&mut page, BindTarget::Window, &up), EventOutcome::Ended);
//! assert_eq!(page.left_top, Some(Point::new(30.0, 10.0)));
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math
//! - `libm`: float math through `libm` in `no_std` builds
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod batch;
pub mod binding;
pub mod capability;
pub mod containment;
pub mod drag;
pub mod emitter;
pub mod error;
pub mod host;
pub mod input;
pub mod options;
pub mod scheduler;
pub mod size;

pub use batch::{DraggableSet, DraggableSpec, SetupReport};
pub use binding::{BindTarget, BoundListenerSet};
pub use capability::{PlatformCapabilities, PlatformProbe};
pub use containment::ContainmentFrame;
pub use drag::{DragEvent, DragEventKind, DragSession, Draggable, EventOutcome};
pub use emitter::{EventEmitter, Listener};
pub use error::DragSetupError;
pub use host::{Host, PositionScheme, StyleSnapshot, Translate};
pub use input::{InputSample, PointerSource};
pub use options::{Containment, DragOptions, ElementRef};
pub use scheduler::{FrameId, FrameScheduler, RenderLoop};
pub use size::ComputedBox;
