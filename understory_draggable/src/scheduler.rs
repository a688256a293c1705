// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame scheduling: a display-refresh-aligned paint loop with an interval fallback.
//!
//! The host supplies a [`FrameScheduler`]. When the platform has a refresh-aligned
//! primitive it schedules through that; otherwise [`IntervalScheduler`] emulates one
//! with a [`TimerQueue`] and a [`Clock`] at roughly 60Hz. [`AutoScheduler`] picks
//! between the two so callers never see the difference.
//!
//! [`RenderLoop`] is the per-draggable loop: started on drag start, ticked by the
//! host for each fired frame, and stopped on drag end. A tick that arrives after the
//! loop stopped, or for a frame it no longer waits on, paints nothing.
//!
//! ## Minimal example
//!
//! ```
//! use understory_draggable::scheduler::{FrameId, FrameScheduler, RenderLoop};
//!
//! #[derive(Default)]
//! struct Frames { next: u64 }
//! impl FrameScheduler for Frames {
//!     fn request_frame(&mut self) -> FrameId { self.next += 1; FrameId(self.next) }
//!     fn cancel_frame(&mut self, _id: FrameId) {}
//! }
//!
//! let mut frames = Frames::default();
//! let mut render = RenderLoop::new();
//! render.start(&mut frames);
//! assert!(render.tick(FrameId(1), &mut frames));
//! render.stop(&mut frames);
//! assert!(!render.tick(FrameId(2), &mut frames));
//! ```

use crate::capability::PlatformCapabilities;

/// Handle of a pending frame callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Something that can call back once per display refresh.
///
/// The host invokes the draggable's frame entry point with the returned id when the
/// frame fires.
pub trait FrameScheduler {
    /// Requests one frame callback.
    fn request_frame(&mut self) -> FrameId;
    /// Cancels a pending frame callback. Cancelling a fired or unknown id is a no-op.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Millisecond clock used by the interval fallback.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> f64;
}

/// One-shot timers used by the interval fallback.
pub trait TimerQueue {
    /// Schedules a callback `delay_ms` from now.
    fn set_timeout(&mut self, delay_ms: f64) -> FrameId;
    /// Cancels a pending timer.
    fn clear_timeout(&mut self, id: FrameId);
}

/// Target frame interval of the fallback, in milliseconds.
pub const FRAME_INTERVAL_MS: f64 = 16.0;

/// Emulates refresh-aligned frames with timers.
///
/// Each request fires `max(0, 16 - (now - last))` ms from now, then advances `last`
/// to the fire time, so frames settle on a fixed cadence.
#[derive(Clone, Debug)]
pub struct IntervalScheduler<C, T> {
    clock: C,
    timers: T,
    last_time: f64,
}

impl<C: Clock, T: TimerQueue> IntervalScheduler<C, T> {
    /// Creates a fallback scheduler.
    #[must_use]
    pub fn new(clock: C, timers: T) -> Self {
        Self {
            clock,
            timers,
            last_time: 0.0,
        }
    }

    /// Scheduled fire time of the most recent request.
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// The injected clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The injected timer queue.
    #[must_use]
    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Mutable access to the injected timer queue.
    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }
}

impl<C: Clock, T: TimerQueue> FrameScheduler for IntervalScheduler<C, T> {
    fn request_frame(&mut self) -> FrameId {
        let now = self.clock.now_ms();
        let delay = (FRAME_INTERVAL_MS - (now - self.last_time)).max(0.0);
        let id = self.timers.set_timeout(delay);
        self.last_time = now + delay;
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.timers.clear_timeout(id);
    }
}

/// A refresh-aligned scheduler when one exists, the interval fallback otherwise.
#[derive(Clone, Debug)]
pub enum AutoScheduler<R, C, T> {
    /// The platform's refresh-aligned primitive.
    Refresh(R),
    /// Timer-based emulation.
    Interval(IntervalScheduler<C, T>),
}

impl<R, C, T> AutoScheduler<R, C, T>
where
    R: FrameScheduler,
    C: Clock,
    T: TimerQueue,
{
    /// Uses `refresh` if available, otherwise falls back to timers.
    #[must_use]
    pub fn new(refresh: Option<R>, clock: C, timers: T) -> Self {
        match refresh {
            Some(r) => Self::Refresh(r),
            None => {
                tracing::debug!("no refresh-aligned frames; using interval fallback");
                Self::Interval(IntervalScheduler::new(clock, timers))
            }
        }
    }

    /// Picks the variant from probed capabilities.
    ///
    /// `refresh` is used only when the platform reports both halves of the
    /// refresh-aligned primitive; otherwise the timers drive frames.
    #[must_use]
    pub fn from_capabilities(
        caps: &PlatformCapabilities,
        refresh: Option<R>,
        clock: C,
        timers: T,
    ) -> Self {
        Self::new(refresh.filter(|_| caps.animation_frames), clock, timers)
    }

    /// Returns `true` when frames follow the display refresh.
    #[must_use]
    pub fn is_refresh_aligned(&self) -> bool {
        matches!(self, Self::Refresh(_))
    }
}

impl<R, C, T> FrameScheduler for AutoScheduler<R, C, T>
where
    R: FrameScheduler,
    C: Clock,
    T: TimerQueue,
{
    fn request_frame(&mut self) -> FrameId {
        match self {
            Self::Refresh(r) => r.request_frame(),
            Self::Interval(i) => i.request_frame(),
        }
    }

    fn cancel_frame(&mut self, id: FrameId) {
        match self {
            Self::Refresh(r) => r.cancel_frame(id),
            Self::Interval(i) => i.cancel_frame(id),
        }
    }
}

/// Per-draggable paint loop: at most one pending frame, at most one paint per tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderLoop {
    pending: Option<FrameId>,
    running: bool,
}

impl RenderLoop {
    /// A stopped loop.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            running: false,
        }
    }

    /// Starts the loop and requests the first frame. Restarting replaces any pending frame.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel_frame(id);
        }
        self.running = true;
        self.pending = Some(scheduler.request_frame());
    }

    /// Stops the loop and cancels the pending frame, if any.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.running = false;
        if let Some(id) = self.pending.take() {
            scheduler.cancel_frame(id);
        }
    }

    /// Handles a fired frame.
    ///
    /// Returns `true` if the caller should paint. The loop reschedules itself before
    /// returning `true`. Frames arriving after [`RenderLoop::stop`], or with an id the
    /// loop is not waiting on, return `false` and change nothing.
    pub fn tick(&mut self, id: FrameId, scheduler: &mut dyn FrameScheduler) -> bool {
        if !self.running || self.pending != Some(id) {
            return false;
        }
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Returns `true` between `start` and `stop`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The frame the loop is waiting on.
    #[must_use]
    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }
}
