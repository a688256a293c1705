// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bookkeeping for raw-event bindings attached through the host.
//!
//! A draggable keeps two sets: start events on its handles while idle, and
//! move/end/cancel events on the window while a gesture is active. Binding a pair
//! that is already bound does nothing, so no event is ever delivered twice.

use smallvec::SmallVec;

use crate::host::Host;
use crate::input::EventType;

/// Where a binding is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindTarget<N> {
    /// A drag handle element.
    Handle(N),
    /// The window, so moves keep arriving when the pointer leaves the handle.
    Window,
}

/// The `(target, event)` pairs currently bound through the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundListenerSet<N> {
    entries: SmallVec<[(BindTarget<N>, EventType); 4]>,
}

impl<N> Default for BoundListenerSet<N> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<N: Copy + Eq> BoundListenerSet<N> {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds each of `events` on `target`, skipping pairs already bound.
    ///
    /// Returns how many new bindings were made.
    pub fn bind<H>(&mut self, host: &mut H, target: BindTarget<N>, events: &[EventType]) -> usize
    where
        H: Host<Node = N> + ?Sized,
    {
        let mut added = 0;
        for &event in events {
            if self.contains(target, event) {
                continue;
            }
            host.bind(target, event);
            self.entries.push((target, event));
            added += 1;
        }
        added
    }

    /// Unbinds every pair on `target`.
    pub fn unbind_target<H>(&mut self, host: &mut H, target: BindTarget<N>)
    where
        H: Host<Node = N> + ?Sized,
    {
        self.entries.retain(|(t, event)| {
            if *t == target {
                host.unbind(*t, *event);
                false
            } else {
                true
            }
        });
    }

    /// Unbinds everything.
    pub fn unbind_all<H>(&mut self, host: &mut H)
    where
        H: Host<Node = N> + ?Sized,
    {
        for (target, event) in self.entries.drain(..) {
            host.unbind(target, event);
        }
    }

    /// Whether `event` is bound on `target`.
    #[must_use]
    pub fn contains(&self, target: BindTarget<N>, event: EventType) -> bool {
        self.entries.iter().any(|&(t, e)| t == target && e == event)
    }

    /// Number of bound pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bound pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (BindTarget<N>, EventType)> + '_ {
        self.entries.iter().copied()
    }
}
