//! Gate placement on the circuit grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a gate sits: a target qubit and a logical time-slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Target qubit index.
    pub qubit: u32,
    /// Logical step, not wall-clock time.
    pub step: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(qubit: u32, step: u32) -> Self {
        Self { qubit, step }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}@{}", self.qubit, self.step)
    }
}

impl From<(u32, u32)> for Position {
    fn from((qubit, step): (u32, u32)) -> Self {
        Position { qubit, step }
    }
}
