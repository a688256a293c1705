// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event emitter: minimal publish/subscribe with one-shot listeners.
//!
//! ## Semantics
//!
//! - Registering the same listener (by [`Rc`] identity) twice for one event is a no-op.
//! - A `once` listener is unregistered *before* it runs, so nested emissions of the
//!   same event from inside any listener never reach it again.
//! - [`EventEmitter::emit`] walks a snapshot taken when the emission starts, in
//!   registration order. Listeners removed during the pass are skipped; listeners
//!   added during the pass are first called on the next emission.
//! - Emitting an event without listeners does nothing.
//!
//! All methods take `&self`, so a listener holding an `Rc<EventEmitter<..>>` can
//! subscribe or unsubscribe while it is being called.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_draggable::emitter::{EventEmitter, Listener};
//!
//! let emitter = EventEmitter::<&str, u32>::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = seen.clone();
//! let listener: Listener<u32> = Rc::new(move |v: &u32| sink.set(sink.get() + *v));
//! emitter.once("tick", listener.clone());
//! emitter.once("tick", listener);
//!
//! emitter.emit("tick", &5);
//! emitter.emit("tick", &5);
//! assert_eq!(seen.get(), 5);
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// A shared listener callback. Identity is the `Rc` allocation.
pub type Listener<A> = Rc<dyn Fn(&A)>;

struct Entry<A> {
    listener: Listener<A>,
    once: bool,
}

/// Publish/subscribe primitive keyed by an event name type `E`, delivering `&A`.
pub struct EventEmitter<E, A> {
    listeners: RefCell<HashMap<E, Vec<Entry<A>>>>,
}

impl<E, A> Default for EventEmitter<E, A>
where
    E: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, A> fmt::Debug for EventEmitter<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("EventEmitter");
        if let Ok(map) = self.listeners.try_borrow() {
            s.field("events", &map.len());
            s.field("listeners", &map.values().map(Vec::len).sum::<usize>());
        }
        s.finish_non_exhaustive()
    }
}

impl<E, A> EventEmitter<E, A>
where
    E: Copy + Eq + Hash,
{
    /// Creates an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Registers `listener` for `event`.
    ///
    /// Returns `false` if the same listener was already registered for `event`.
    pub fn on(&self, event: E, listener: Listener<A>) -> bool {
        self.add(event, listener, false)
    }

    /// Registers `listener` for exactly one invocation of `event`.
    ///
    /// Returns `false` if the same listener was already registered for `event`;
    /// the existing registration keeps its one-shot flag.
    pub fn once(&self, event: E, listener: Listener<A>) -> bool {
        self.add(event, listener, true)
    }

    fn add(&self, event: E, listener: Listener<A>, once: bool) -> bool {
        let mut map = self.listeners.borrow_mut();
        let list = map.entry(event).or_default();
        if list.iter().any(|e| Rc::ptr_eq(&e.listener, &listener)) {
            return false;
        }
        list.push(Entry { listener, once });
        true
    }

    /// Unregisters `listener` from `event`. Returns `true` if it was registered.
    pub fn off(&self, event: E, listener: &Listener<A>) -> bool {
        let mut map = self.listeners.borrow_mut();
        let Some(list) = map.get_mut(&event) else {
            return false;
        };
        match list.iter().position(|e| Rc::ptr_eq(&e.listener, listener)) {
            Some(i) => {
                list.remove(i);
                true
            }
            None => false,
        }
    }

    /// Removes every listener for `event`.
    pub fn remove_event(&self, event: E) {
        self.listeners.borrow_mut().remove(&event);
    }

    /// Removes every listener for every event.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    /// Number of listeners currently registered for `event`.
    #[must_use]
    pub fn listener_count(&self, event: E) -> usize {
        self.listeners.borrow().get(&event).map_or(0, Vec::len)
    }

    /// Calls every listener registered for `event` with `args`.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: E, args: &A) -> usize {
        let snapshot: SmallVec<[Listener<A>; 4]> = match self.listeners.borrow().get(&event) {
            Some(list) => list.iter().map(|e| e.listener.clone()).collect(),
            None => return 0,
        };

        let mut invoked = 0;
        for listener in snapshot {
            if !self.claim(event, &listener) {
                continue;
            }
            listener(args);
            invoked += 1;
        }
        invoked
    }

    /// Checks that `listener` is still registered and drops it first if it is one-shot.
    ///
    /// The borrow is released before the listener runs.
    fn claim(&self, event: E, listener: &Listener<A>) -> bool {
        let mut map = self.listeners.borrow_mut();
        let Some(list) = map.get_mut(&event) else {
            return false;
        };
        let Some(i) = list.iter().position(|e| Rc::ptr_eq(&e.listener, listener)) else {
            return false;
        };
        if list[i].once {
            list.remove(i);
        }
        true
    }
}
