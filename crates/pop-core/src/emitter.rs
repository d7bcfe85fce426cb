//! Named-channel event emitter and the mode switch panel.
//!
//! Behaviors subscribe to string channels to learn when they should be
//! active. A `SwitchPanel` adds radio-button semantics on top: activating a
//! channel deactivates whichever channel was previously active on that panel.

use crate::cell::{Subject, Subscription};
use std::collections::HashMap;

/// Channel names for the selection and work mode panels.
pub mod channel {
    pub const SELECTION_HINGE: &str = "selection_hinge";
    pub const SELECTION_MECHANISM: &str = "selection_mechanism";
    pub const SELECTION_NOTHING: &str = "selection_nothing";
    pub const SELECTION_DEFAULT: &str = SELECTION_MECHANISM;

    pub const WORK_ADD_PFOLD: &str = "work_pfold";
    pub const WORK_SELECT_MECHANISM: &str = "work_select_mechanism";
    pub const WORK_NOTHING: &str = "work_nothing";
    pub const WORK_DEFAULT: &str = WORK_SELECT_MECHANISM;
}

/// A string-keyed event emitter. Channels are created lazily on first use.
#[derive(Default)]
pub struct Emitter<T> {
    subjects: HashMap<String, Subject<T>>,
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self {
            subjects: HashMap::new(),
        }
    }

    /// Emit `data` on the named channel.
    pub fn emit(&mut self, name: &str, data: T) {
        self.subject(name).next(&data);
    }

    /// Register a handler for the named channel.
    pub fn on(&mut self, name: &str, handler: impl FnMut(&T) + 'static) -> Subscription {
        self.subject(name).subscribe(handler)
    }

    /// Close the channel and forget it. Existing handlers stop firing.
    pub fn off(&mut self, name: &str) {
        if let Some(subject) = self.subjects.remove(name) {
            subject.complete();
        }
    }

    fn subject(&mut self, name: &str) -> &Subject<T> {
        self.subjects
            .entry(name.to_string())
            .or_insert_with(Subject::new)
    }
}

/// An `Emitter<bool>` where exactly one channel is active at a time.
/// Switching emits `false` on the previously active channel, then `true`
/// on the new one.
#[derive(Default)]
pub struct SwitchPanel {
    emitter: Emitter<bool>,
    current: String,
}

impl SwitchPanel {
    pub fn new() -> Self {
        Self {
            emitter: Emitter::new(),
            current: String::new(),
        }
    }

    /// Activate `name`, deactivating the previously active channel.
    pub fn switch_to(&mut self, name: &str) {
        if !self.current.is_empty() {
            let old = self.current.clone();
            self.emitter.emit(&old, false);
        }
        self.emitter.emit(name, true);
        self.current = name.to_string();
    }

    pub fn on(&mut self, name: &str, handler: impl FnMut(&bool) + 'static) -> Subscription {
        self.emitter.on(name, handler)
    }

    /// The currently active channel, or `""` before the first switch.
    pub fn current(&self) -> &str {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_registered_handler() {
        let mut emitter = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        emitter.on("greet", move |v: &i32| sink.borrow_mut().push(*v));
        emitter.emit("greet", 1);
        emitter.emit("other", 2);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn off_closes_the_channel() {
        let mut emitter = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        emitter.on("greet", move |v: &i32| sink.borrow_mut().push(*v));
        emitter.off("greet");
        emitter.emit("greet", 3);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn switch_panel_deactivates_previous_channel() {
        let mut panel = SwitchPanel::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        panel.on(channel::SELECTION_HINGE, move |v| {
            sink.borrow_mut().push(("hinge", *v));
        });
        let sink = Rc::clone(&log);
        panel.on(channel::SELECTION_MECHANISM, move |v| {
            sink.borrow_mut().push(("mechanism", *v));
        });

        panel.switch_to(channel::SELECTION_HINGE);
        panel.switch_to(channel::SELECTION_MECHANISM);

        assert_eq!(
            *log.borrow(),
            vec![("hinge", true), ("hinge", false), ("mechanism", true)]
        );
        assert_eq!(panel.current(), channel::SELECTION_MECHANISM);
    }
}
