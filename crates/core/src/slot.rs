//! A single inventory cell: an item identifier and a quantity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Item identifier indexing into the sprite atlas (`id - 1` is the tile).
pub type ItemId = u16;

/// Identifier reserved for "no item".
pub const EMPTY_ITEM: ItemId = 0;

/// A stack of one item type.
///
/// The empty slot is the only value with either field zero: constructing a slot
/// with `item == EMPTY_ITEM` or `amount == 0` yields [`Slot::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "SlotFields")]
pub struct Slot {
    item: ItemId,
    amount: u32,
}

#[derive(Deserialize)]
struct SlotFields {
    item: ItemId,
    amount: u32,
}

impl From<SlotFields> for Slot {
    fn from(fields: SlotFields) -> Self {
        Slot::new(fields.item, fields.amount)
    }
}

impl Slot {
    /// The empty slot.
    pub const EMPTY: Self = Self {
        item: EMPTY_ITEM,
        amount: 0,
    };

    /// Create a stack, normalizing to [`Slot::EMPTY`] when either side is zero.
    pub fn new(item: ItemId, amount: u32) -> Self {
        if item == EMPTY_ITEM || amount == 0 {
            Self::EMPTY
        } else {
            Self { item, amount }
        }
    }

    /// Item identifier, [`EMPTY_ITEM`] when empty.
    pub fn item(&self) -> ItemId {
        self.item
    }

    /// Number of units in the stack.
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Whether the slot holds nothing.
    pub fn is_empty(&self) -> bool {
        self.item == EMPTY_ITEM
    }

    /// Whether both stacks carry the same identifier (two empty slots match).
    pub fn same_item(&self, other: &Slot) -> bool {
        self.item == other.item
    }

    /// Add as much of `other` as fits onto this stack. Units that would push
    /// the amount past `u32::MAX` stay in `other`.
    /// Returns the number of units moved.
    pub(crate) fn absorb(&mut self, other: &mut Slot) -> u32 {
        let moved = other.amount.min(u32::MAX - self.amount);
        self.amount += moved;
        other.amount -= moved;
        if other.amount == 0 {
            *other = Slot::EMPTY;
        }
        moved
    }

    /// Move a single unit from `from` into this stack, adopting its identifier.
    /// Returns 0 and leaves both stacks untouched when this stack is full.
    pub(crate) fn take_one_from(&mut self, from: &mut Slot) -> u32 {
        if self.amount == u32::MAX {
            return 0;
        }
        self.item = from.item;
        self.amount += 1;
        from.amount -= 1;
        if from.amount < 1 {
            *from = Slot::EMPTY;
        }
        1
    }

    /// Split off `floor(amount / 2)` units into a new stack.
    pub(crate) fn split_half(&mut self) -> Slot {
        let half = self.amount / 2;
        self.amount -= half;
        Slot::new(self.item, half)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.item, self.amount)
    }
}
