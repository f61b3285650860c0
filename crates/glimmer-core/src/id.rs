//! Stable emitter identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an emitter inside its pool.
///
/// Assigned once when the pool is built and never reused while the pool is
/// alive. Pools never resize, so the id doubles as the slot index.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmitterId(pub u32);

impl EmitterId {
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Slot index into the owning pool
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmitterId({})", self.0)
    }
}

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
