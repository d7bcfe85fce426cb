//! Editor mode panels.
//!
//! Two radio-button panels drive the editor: what clicking selects
//! (hinges, mechanisms, nothing) and what the active tool does (add a
//! parallelogram fold, select mechanisms, nothing). Tools and property
//! panels register on the channel they care about and get a `true` when
//! their mode becomes active, `false` when another mode takes over.

use pop_core::{channel, Subscription, SwitchPanel};

pub struct EditorModes {
    selection: SwitchPanel,
    work: SwitchPanel,
}

impl Default for EditorModes {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorModes {
    /// Panels start on the default channels.
    pub fn new() -> Self {
        let mut modes = Self {
            selection: SwitchPanel::new(),
            work: SwitchPanel::new(),
        };
        modes.selection.switch_to(channel::SELECTION_DEFAULT);
        modes.work.switch_to(channel::WORK_DEFAULT);
        modes
    }

    pub fn register_selection(
        &mut self,
        name: &str,
        handler: impl FnMut(&bool) + 'static,
    ) -> Subscription {
        self.selection.on(name, handler)
    }

    pub fn register_work(
        &mut self,
        name: &str,
        handler: impl FnMut(&bool) + 'static,
    ) -> Subscription {
        self.work.on(name, handler)
    }

    pub fn set_selection(&mut self, name: &str) {
        self.selection.switch_to(name);
    }

    pub fn set_work(&mut self, name: &str) {
        self.work.switch_to(name);
    }

    pub fn selection(&self) -> &str {
        self.selection.current()
    }

    pub fn work(&self) -> &str {
        self.work.current()
    }
}
