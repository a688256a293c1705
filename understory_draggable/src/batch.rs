// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Many draggables set up in one pass.
//!
//! A failing setup is reported and skipped; the remaining specs still produce
//! draggables. The set then routes raw events and frames to every member.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use crate::binding::BindTarget;
use crate::capability::PlatformCapabilities;
use crate::drag::{Draggable, EventOutcome};
use crate::error::DragSetupError;
use crate::host::Host;
use crate::input::RawEvent;
use crate::options::{DragOptions, ElementRef};
use crate::scheduler::FrameId;

/// One draggable to create.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggableSpec<N> {
    /// The element to drag.
    pub element: ElementRef<N>,
    /// Its options.
    pub options: DragOptions<N>,
    /// Whether it accepts gestures right after setup.
    pub enabled: bool,
}

impl<N> DraggableSpec<N> {
    /// An enabled draggable with default options.
    #[must_use]
    pub fn new(element: impl Into<ElementRef<N>>) -> Self {
        Self {
            element: element.into(),
            options: DragOptions::default(),
            enabled: true,
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: DragOptions<N>) -> Self {
        self.options = options;
        self
    }

    /// Sets the initial enabled state.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Setups that failed, by position in the input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetupReport {
    /// `(index, error)` in spec order.
    pub failures: Vec<(usize, DragSetupError)>,
}

impl SetupReport {
    /// Whether every spec produced a draggable.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A group of draggables indexed like the specs that created them.
#[derive(Debug)]
pub struct DraggableSet<N> {
    items: Vec<Option<Draggable<N>>>,
}

impl<N> Default for DraggableSet<N> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<N> DraggableSet<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Creates one draggable per spec.
    ///
    /// Slots whose setup failed stay empty and are listed in the report.
    pub fn setup<H>(
        host: &mut H,
        caps: &PlatformCapabilities,
        specs: impl IntoIterator<Item = DraggableSpec<N>>,
    ) -> (Self, SetupReport)
    where
        H: Host<Node = N> + ?Sized,
    {
        let mut items = Vec::new();
        let mut report = SetupReport::default();
        for (index, spec) in specs.into_iter().enumerate() {
            match Draggable::new(host, caps, spec.element, spec.options) {
                Ok(mut draggable) => {
                    if !spec.enabled {
                        draggable.disable(host);
                    }
                    items.push(Some(draggable));
                }
                Err(err) => {
                    tracing::error!(index, error = %err, "draggable setup failed");
                    report.failures.push((index, err));
                    items.push(None);
                }
            }
        }
        (Self { items }, report)
    }

    /// Enables or disables every draggable.
    pub fn set_all_enabled<H>(&mut self, host: &mut H, enabled: bool)
    where
        H: Host<Node = N> + ?Sized,
    {
        for draggable in self.iter_mut() {
            if enabled {
                draggable.enable();
            } else {
                draggable.disable(host);
            }
        }
    }

    /// Delivers a raw event to every draggable.
    ///
    /// Returns the members that acted on it with what they did.
    pub fn dispatch<H>(
        &mut self,
        host: &mut H,
        target: BindTarget<N>,
        event: &RawEvent,
    ) -> Vec<(usize, EventOutcome)>
    where
        H: Host<Node = N> + ?Sized,
    {
        let mut outcomes = Vec::new();
        for (index, slot) in self.items.iter_mut().enumerate() {
            let Some(draggable) = slot else { continue };
            let outcome = draggable.handle_event(host, target, event);
            if outcome != EventOutcome::Ignored {
                outcomes.push((index, outcome));
            }
        }
        outcomes
    }

    /// Delivers a fired frame to every draggable.
    pub fn on_frame<H>(&mut self, host: &mut H, id: FrameId)
    where
        H: Host<Node = N> + ?Sized,
    {
        for draggable in self.iter_mut() {
            draggable.on_frame(host, id);
        }
    }

    /// Destroys every draggable and empties the set.
    pub fn destroy_all<H>(&mut self, host: &mut H)
    where
        H: Host<Node = N> + ?Sized,
    {
        for draggable in self.iter_mut() {
            draggable.destroy(host);
        }
        self.items.clear();
    }

    /// The draggable created from spec `index`, if setup succeeded.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Draggable<N>> {
        self.items.get(index).and_then(Option::as_ref)
    }

    /// Mutable access to the draggable created from spec `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Draggable<N>> {
        self.items.get_mut(index).and_then(Option::as_mut)
    }

    /// Number of slots, including failed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Live draggables in spec order.
    pub fn iter(&self) -> impl Iterator<Item = &Draggable<N>> + '_ {
        self.items.iter().flatten()
    }

    /// Mutable live draggables in spec order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Draggable<N>> + '_ {
        self.items.iter_mut().flatten()
    }
}
