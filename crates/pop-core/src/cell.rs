//! Reactive cells: push streams and observable parameters.
//!
//! Every mutable scalar in the mechanism model (angle, width, distance) is a
//! `Param<T>` — a current value plus a synchronous change stream. `Subject<T>`
//! is the bare stream without a value. Fan-out is single-threaded and runs to
//! completion inside the `set`/`next` call; there is no deferral and no
//! locking. None of these types are `Send` — the whole model is confined to
//! one thread by construction.

use crate::id::DisposeToken;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::mem;
use std::rc::Rc;

// ─── Subscriptions ──────────────────────────────────────────────────────

/// Handle returned by `subscribe`. Call `unsubscribe` to stop receiving
/// notifications. Dropping the handle does NOT unsubscribe — subscriptions
/// are detached by default and end with their termination tokens instead.
pub struct Subscription {
    alive: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        self.alive.set(false);
    }
}

struct SubEntry<T> {
    callback: Box<dyn FnMut(&T)>,
    alive: Rc<Cell<bool>>,
    until: SmallVec<[DisposeToken; 2]>,
}

impl<T> SubEntry<T> {
    fn is_live(&self) -> bool {
        self.alive.get() && !self.until.iter().any(|t| t.is_fired())
    }
}

// ─── Subject ────────────────────────────────────────────────────────────

struct SubjectInner<T> {
    subs: Vec<SubEntry<T>>,
    closed: bool,
}

/// A synchronous push stream. Cheap to clone — clones alias the same
/// subscriber list.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Subject<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                subs: Vec::new(),
                closed: false,
            })),
        }
    }

    /// Register a handler with no termination tokens.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        self.subscribe_until(&[], callback)
    }

    /// Register a handler that stops firing once any of `until` fires.
    /// Terminated entries are pruned lazily on the next emission.
    pub fn subscribe_until(
        &self,
        until: &[DisposeToken],
        callback: impl FnMut(&T) + 'static,
    ) -> Subscription {
        let alive = Rc::new(Cell::new(true));
        let mut inner = self.inner.borrow_mut();
        if !inner.closed {
            inner.subs.push(SubEntry {
                callback: Box::new(callback),
                alive: Rc::clone(&alive),
                until: until.iter().cloned().collect(),
            });
        }
        Subscription { alive }
    }

    /// Emit a value to every live subscriber, synchronously, in registration
    /// order. Subscribers added during the emission are not invoked for it.
    pub fn next(&self, value: &T) {
        let mut subs = {
            let mut inner = self.inner.borrow_mut();
            if inner.closed {
                return;
            }
            mem::take(&mut inner.subs)
        };

        subs.retain_mut(|entry| {
            if entry.is_live() {
                (entry.callback)(value);
            }
            entry.is_live()
        });

        // merge back any subscribers registered during the emission
        let mut inner = self.inner.borrow_mut();
        let added = mem::take(&mut inner.subs);
        subs.extend(added);
        inner.subs = subs;
    }

    /// Close the stream and drop all subscribers. Further `next` calls are
    /// no-ops; further `subscribe` calls never fire.
    pub fn complete(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.closed = true;
        inner.subs.clear();
    }
}

// ─── Param ──────────────────────────────────────────────────────────────

struct ParamInner<T> {
    value: T,
}

/// An observable parameter: current value plus change stream.
///
/// Clones alias the same cell, which is how the undo machinery holds a
/// writable handle to a mechanism's parameter. `subscribe` fires immediately
/// with the current value and again on every change, so dependent geometry
/// is initialized by the act of wiring it up.
pub struct Param<T> {
    value: Rc<RefCell<ParamInner<T>>>,
    changed: Subject<T>,
}

impl<T> Clone for Param<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            changed: self.changed.clone(),
        }
    }
}

impl<T: Clone> Param<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(ParamInner { value })),
            changed: Subject::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().value.clone()
    }

    /// Store `value` then notify subscribers. The store happens before the
    /// fan-out, so re-reading the cell from inside a subscriber observes the
    /// new value.
    pub fn set(&self, value: T) {
        self.value.borrow_mut().value = value.clone();
        self.changed.next(&value);
    }

    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        self.subscribe_until(&[], callback)
    }

    pub fn subscribe_until(
        &self,
        until: &[DisposeToken],
        mut callback: impl FnMut(&T) + 'static,
    ) -> Subscription {
        let current = self.get();
        callback(&current);
        self.changed.subscribe_until(until, callback)
    }

    /// The bare change stream, without the immediate replay.
    pub fn changed(&self) -> &Subject<T> {
        &self.changed
    }

    pub fn complete(&self) {
        self.changed.complete();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────
