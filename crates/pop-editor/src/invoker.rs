//! The bounded undo/redo engine.

use crate::commands::Command;
use std::collections::VecDeque;

pub const DEFAULT_STACK_LIMIT: usize = 50;

/// A LIFO stack that sheds its OLDEST entry when pushed past its limit.
pub struct LimitedStack<T> {
    items: VecDeque<T>,
    limit: usize,
}

impl<T> LimitedStack<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(limit.min(64)),
            limit,
        }
    }

    /// Push an entry, returning the evicted oldest one if the stack was
    /// full.
    pub fn push(&mut self, item: T) -> Option<T> {
        self.items.push_back(item);
        if self.items.len() > self.limit {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Runs commands and keeps the undo/redo history, bounded on both sides.
///
/// A command whose `execute` reports failure is still pushed onto the undo
/// stack: the failure already happened inside the do-action and whatever
/// partial effect it had is exactly what its `undo` closure knows how to
/// walk back. Callers see the `false` and can react, but the history stays
/// linear.
pub struct CommandInvoker {
    undo_stack: LimitedStack<Box<dyn Command>>,
    redo_stack: LimitedStack<Box<dyn Command>>,
}

impl Default for CommandInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInvoker {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_STACK_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: LimitedStack::new(limit),
            redo_stack: LimitedStack::new(limit),
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Run a fresh command. Any redoable future is invalidated first, each
    /// abandoned command getting its `destroy_from_redo` exactly once.
    pub fn execute(&mut self, mut command: Box<dyn Command>) -> bool {
        while let Some(mut abandoned) = self.redo_stack.pop() {
            abandoned.destroy_from_redo();
        }
        let ok = command.execute();
        if !ok {
            log::warn!("command execution failed; keeping it on the undo stack");
        }
        if let Some(mut evicted) = self.undo_stack.push(command) {
            evicted.destroy_from_undo();
        }
        ok
    }

    /// Walk one step back. `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let mut command = match self.undo_stack.pop() {
            Some(command) => command,
            None => return false,
        };
        let ok = command.undo();
        if let Some(mut evicted) = self.redo_stack.push(command) {
            evicted.destroy_from_redo();
        }
        ok
    }

    /// Walk one step forward again. `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let mut command = match self.redo_stack.pop() {
            Some(command) => command,
            None => return false,
        };
        let ok = command.redo();
        if let Some(mut evicted) = self.undo_stack.push(command) {
            evicted.destroy_from_undo();
        }
        ok
    }
}
