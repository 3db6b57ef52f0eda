//! Grid inventory with a cursor-held stack.
//!
//! The grid is a fixed-length row-major sequence of [`Slot`]s created empty.
//! All interaction goes through two deposit operations keyed by slot index:
//! [`GridInventory::deposit_all`] (primary click) and
//! [`GridInventory::deposit_one`] (secondary click).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slot::Slot;

/// Number of slots in a default inventory (three rows of nine).
pub const DEFAULT_SLOT_COUNT: usize = 27;

/// Errors reported by deposit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The slot index falls outside the grid.
    #[error("slot index {index} out of range (inventory has {len} slots)")]
    InvalidSlotIndex {
        /// Requested index.
        index: usize,
        /// Number of slots in the grid.
        len: usize,
    },
}

/// Which deposit operation a click maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepositMode {
    /// Deposit the whole held stack.
    All,
    /// Deposit a single unit, or split the target stack.
    One,
}

/// Branch taken by a successful deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DepositOutcome {
    /// Held stack and target were both empty.
    Nothing,
    /// Units added onto a stack of the same item.
    Merged {
        /// Units moved from the held stack.
        amount: u32,
    },
    /// Units placed into an empty target.
    Placed {
        /// Units moved from the held stack.
        amount: u32,
    },
    /// Half of the target picked up into the empty held stack.
    Split {
        /// Units moved into the held stack.
        amount: u32,
    },
    /// Target and held stack exchanged.
    Swapped,
}

/// Fixed-size grid of slots plus the stack currently held by the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridInventory {
    slots: Vec<Slot>,
    held: Slot,
}

impl GridInventory {
    /// Create an inventory of `len` empty slots with nothing held.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Slot::EMPTY; len],
            held: Slot::EMPTY,
        }
    }

    /// Number of slots in the grid.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether every slot and the held stack are empty.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty() && self.slots.iter().all(Slot::is_empty)
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at `index`, if in range.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// The cursor-held stack.
    pub fn held(&self) -> &Slot {
        &self.held
    }

    /// Replace the cursor-held stack, returning the previous one.
    pub fn set_held(&mut self, stack: Slot) -> Slot {
        std::mem::replace(&mut self.held, stack)
    }

    /// Empty every slot and the held stack. The grid length is unchanged.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::EMPTY);
        self.held = Slot::EMPTY;
    }

    /// Apply the deposit operation selected by `mode`.
    pub fn deposit(
        &mut self,
        mode: DepositMode,
        index: usize,
    ) -> Result<DepositOutcome, InventoryError> {
        match mode {
            DepositMode::All => self.deposit_all(index),
            DepositMode::One => self.deposit_one(index),
        }
    }

    /// Deposit the whole held stack into slot `index`.
    ///
    /// Merges onto a matching stack, fills an empty slot, or swaps with a
    /// different item, in that order of precedence. A merge stops at
    /// `u32::MAX` units and leaves the remainder held.
    pub fn deposit_all(&mut self, index: usize) -> Result<DepositOutcome, InventoryError> {
        let len = self.slots.len();
        let target = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::InvalidSlotIndex { index, len })?;
        let held = &mut self.held;

        if target.same_item(held) {
            if held.is_empty() {
                return Ok(DepositOutcome::Nothing);
            }
            let amount = target.absorb(held);
            return Ok(DepositOutcome::Merged { amount });
        }

        if target.is_empty() {
            let amount = held.amount();
            *target = std::mem::take(held);
            return Ok(DepositOutcome::Placed { amount });
        }

        std::mem::swap(target, held);
        Ok(DepositOutcome::Swapped)
    }

    /// Deposit a single unit into slot `index`.
    ///
    /// With nothing held, right-clicking a stack of two or more picks up half
    /// of it (rounded down); a single unit is picked up through the swap.
    pub fn deposit_one(&mut self, index: usize) -> Result<DepositOutcome, InventoryError> {
        let len = self.slots.len();
        let target = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::InvalidSlotIndex { index, len })?;
        let held = &mut self.held;

        if target.same_item(held) {
            if held.is_empty() {
                return Ok(DepositOutcome::Nothing);
            }
            let amount = target.take_one_from(held);
            return Ok(DepositOutcome::Merged { amount });
        }

        if target.is_empty() {
            let amount = target.take_one_from(held);
            return Ok(DepositOutcome::Placed { amount });
        }

        if held.is_empty() && target.amount() > 1 {
            *held = target.split_half();
            return Ok(DepositOutcome::Split {
                amount: held.amount(),
            });
        }

        std::mem::swap(target, held);
        Ok(DepositOutcome::Swapped)
    }
}

impl Default for GridInventory {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_COUNT)
    }
}

impl fmt::Display for GridInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            writeln!(f, "Cell: {slot}")?;
        }
        write!(f, "Hand: {}", self.held)
    }
}
