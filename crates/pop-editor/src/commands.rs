//! Undoable commands.
//!
//! A command is built lazily: the do-action runs the mutation once and
//! returns the closures that can walk it back and forth. Whatever the
//! do-action captured by value at that moment (the old value above all) is
//! the whole undo state; commands never reach back into the model to ask
//! what the value used to be.
//!
//! All five operations answer with a plain `bool`. A `false` means the
//! operation did not run (never executed, hook absent, or the action
//! itself reported failure) — no error detail crosses the command
//! boundary.

use pop_core::Param;
use pop_mech::FoldForm;

pub type BoolAction = Box<dyn FnMut() -> bool>;

/// The walk-back/walk-forward closures produced by a command's do-action.
pub struct CommandParts {
    pub undo: BoolAction,
    pub redo: BoolAction,
    /// Cleanup for when the command falls off the bounded undo stack.
    pub destroy_from_undo: Option<BoolAction>,
    /// Cleanup for when a fresh execution invalidates the redo stack.
    pub destroy_from_redo: Option<BoolAction>,
}

pub trait Command {
    fn execute(&mut self) -> bool;
    fn undo(&mut self) -> bool;
    fn redo(&mut self) -> bool;
    fn destroy_from_undo(&mut self) -> bool;
    fn destroy_from_redo(&mut self) -> bool;
}

/// A command backed by a one-shot do-action.
pub struct ClosureCommand {
    do_action: Option<Box<dyn FnOnce() -> CommandParts>>,
    parts: Option<CommandParts>,
}

impl ClosureCommand {
    pub fn new(do_action: impl FnOnce() -> CommandParts + 'static) -> Self {
        Self {
            do_action: Some(Box::new(do_action)),
            parts: None,
        }
    }
}

impl Command for ClosureCommand {
    fn execute(&mut self) -> bool {
        match self.do_action.take() {
            Some(action) => {
                self.parts = Some(action());
                true
            }
            // a command only ever executes once
            None => false,
        }
    }

    fn undo(&mut self) -> bool {
        match self.parts.as_mut() {
            Some(parts) => (parts.undo)(),
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.parts.as_mut() {
            Some(parts) => (parts.redo)(),
            None => false,
        }
    }

    fn destroy_from_undo(&mut self) -> bool {
        match self.parts.as_mut().and_then(|p| p.destroy_from_undo.as_mut()) {
            Some(destroy) => destroy(),
            None => false,
        }
    }

    fn destroy_from_redo(&mut self) -> bool {
        match self.parts.as_mut().and_then(|p| p.destroy_from_redo.as_mut()) {
            Some(destroy) => destroy(),
            None => false,
        }
    }
}

/// Set a numeric parameter, undoing to whatever it held just before
/// execution.
pub fn change_number_command(value: f64, param: &Param<f64>) -> ClosureCommand {
    let param = param.clone();
    ClosureCommand::new(move || {
        let old = param.get();
        param.set(value);
        number_parts(param, old, value)
    })
}

/// Set a numeric parameter, undoing to an explicitly supplied old value.
///
/// Drag gestures write intermediate values straight to the parameter and
/// only commit one command at release; the pre-gesture value has to come
/// from the caller because by then the parameter already holds the final
/// drag value.
pub fn change_number_command_from(value: f64, param: &Param<f64>, old_value: f64) -> ClosureCommand {
    let param = param.clone();
    ClosureCommand::new(move || {
        param.set(value);
        number_parts(param, old_value, value)
    })
}

fn number_parts(param: Param<f64>, old: f64, new: f64) -> CommandParts {
    let undo_param = param.clone();
    CommandParts {
        undo: Box::new(move || {
            undo_param.set(old);
            true
        }),
        redo: Box::new(move || {
            param.set(new);
            true
        }),
        destroy_from_undo: None,
        destroy_from_redo: None,
    }
}

/// Toggle a fold-form switch set through the undo history.
pub fn change_fold_form_command(form: FoldForm, param: &Param<FoldForm>) -> ClosureCommand {
    let param = param.clone();
    ClosureCommand::new(move || {
        let old = param.get();
        param.set(form);
        let undo_param = param.clone();
        CommandParts {
            undo: Box::new(move || {
                undo_param.set(old);
                true
            }),
            redo: Box::new(move || {
                param.set(form);
                true
            }),
            destroy_from_undo: None,
            destroy_from_redo: None,
        }
    })
}
