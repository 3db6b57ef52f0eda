#![warn(missing_docs)]
//! Core inventory primitives: slots, the cursor-held stack, and the deposit rules.

pub mod inventory;
pub mod slot;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use inventory::{DepositMode, DepositOutcome, GridInventory, InventoryError, DEFAULT_SLOT_COUNT};
pub use slot::{ItemId, Slot, EMPTY_ITEM};

/// Discrete step counter for scripted input replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}
