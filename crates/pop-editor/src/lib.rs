//! Editor machinery on top of the mechanism model: undoable commands, the
//! bounded undo/redo invoker, editor mode panels, and mechanism behaviors.

pub mod behaviors;
pub mod commands;
pub mod invoker;
pub mod modes;

pub use behaviors::OrientationBehavior;
pub use commands::{
    change_fold_form_command, change_number_command, change_number_command_from, BoolAction,
    ClosureCommand, Command, CommandParts,
};
pub use invoker::{CommandInvoker, LimitedStack, DEFAULT_STACK_LIMIT};
pub use modes::EditorModes;
