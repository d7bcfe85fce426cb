//! Entity identity and disposal signalling.
//!
//! Every model entity carries a process-unique `ObjectId` generated at
//! construction and stable for the entity's lifetime. Disposal is signalled
//! through a `DisposeToken` — a shared single-fire flag that doubles as the
//! termination condition for scoped subscriptions (the "takeUntil" pattern).

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// A process-unique, immutable identifier for model entities.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shared, single-fire disposal flag.
///
/// Clones alias the same flag. Firing is idempotent: consumers observe the
/// transition at most once via `is_fired()` polling inside the subscription
/// machinery, so double-dispose is harmless.
#[derive(Clone, Default)]
pub struct DisposeToken(Rc<Cell<bool>>);

impl DisposeToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owner as disposed. Safe to call more than once.
    pub fn fire(&self) {
        self.0.set(true);
    }

    pub fn is_fired(&self) -> bool {
        self.0.get()
    }
}

impl fmt::Debug for DisposeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DisposeToken").field(&self.is_fired()).finish()
    }
}
