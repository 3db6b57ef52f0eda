//! Property-based tests for slot interactions
//!
//! Validates deposit invariants:
//! - Placing into an empty slot moves the held identifier
//! - Matching stacks merge (all) or drip a single unit (one)
//! - Differing stacks swap under both operations
//! - Splitting takes the smaller half into an empty hand
//! - Invalid indices never mutate state
//! - Merges onto a nearly full stack keep the overflow in hand
//! - Empty/quantity consistency and unit conservation hold for any click sequence

use gridstash_core::{DepositMode, DepositOutcome, GridInventory, ItemId, Slot, DEFAULT_SLOT_COUNT};
use proptest::prelude::*;

fn index() -> impl Strategy<Value = usize> {
    0..DEFAULT_SLOT_COUNT
}

fn item() -> impl Strategy<Value = ItemId> {
    1u16..16
}

fn amount() -> impl Strategy<Value = u32> {
    1u32..1000
}

fn mode() -> impl Strategy<Value = DepositMode> {
    prop_oneof![Just(DepositMode::All), Just(DepositMode::One)]
}

/// Inventory with `target` at `index` and `held` in the hand.
fn prepared(index: usize, target: Slot, held: Slot) -> GridInventory {
    let mut inv = GridInventory::default();
    inv.set_held(target);
    inv.deposit_all(index).expect("index in range");
    inv.set_held(held);
    inv
}

fn total_units(inv: &GridInventory) -> u64 {
    inv.slots()
        .iter()
        .chain(std::iter::once(inv.held()))
        .map(|slot| slot.amount() as u64)
        .sum()
}

fn consistent(slot: &Slot) -> bool {
    slot.is_empty() == (slot.amount() == 0)
}

proptest! {
    /// Property: an empty target adopts the held identifier
    #[test]
    fn empty_target_takes_held_item(
        idx in index(),
        id in item(),
        qty in amount(),
    ) {
        let mut all = prepared(idx, Slot::EMPTY, Slot::new(id, qty));
        all.deposit_all(idx).unwrap();
        prop_assert_eq!(all.slot(idx), Some(&Slot::new(id, qty)));
        prop_assert_eq!(*all.held(), Slot::EMPTY);

        let mut one = prepared(idx, Slot::EMPTY, Slot::new(id, qty));
        one.deposit_one(idx).unwrap();
        prop_assert_eq!(one.slot(idx), Some(&Slot::new(id, 1)));
        prop_assert_eq!(*one.held(), Slot::new(id, qty - 1));
    }

    /// Property: matching stacks sum (all) or move exactly one unit (one)
    #[test]
    fn matching_items_merge(
        idx in index(),
        id in item(),
        target_qty in amount(),
        held_qty in amount(),
    ) {
        let mut all = prepared(idx, Slot::new(id, target_qty), Slot::new(id, held_qty));
        prop_assert_eq!(all.deposit_all(idx), Ok(DepositOutcome::Merged { amount: held_qty }));
        prop_assert_eq!(all.slot(idx), Some(&Slot::new(id, target_qty + held_qty)));
        prop_assert_eq!(*all.held(), Slot::EMPTY);

        let mut one = prepared(idx, Slot::new(id, target_qty), Slot::new(id, held_qty));
        prop_assert_eq!(one.deposit_one(idx), Ok(DepositOutcome::Merged { amount: 1 }));
        prop_assert_eq!(one.slot(idx), Some(&Slot::new(id, target_qty + 1)));
        prop_assert_eq!(*one.held(), Slot::new(id, held_qty - 1));
    }

    /// Property: merging near `u32::MAX` moves only what fits
    #[test]
    fn merge_near_capacity_conserves_units(
        idx in index(),
        id in item(),
        headroom in 0u32..8,
        held_qty in amount(),
        mode in mode(),
    ) {
        let target_qty = u32::MAX - headroom;
        let mut inv = prepared(idx, Slot::new(id, target_qty), Slot::new(id, held_qty));
        let before = total_units(&inv);

        let moved = match inv.deposit(mode, idx) {
            Ok(DepositOutcome::Merged { amount }) => amount,
            other => return Err(TestCaseError::fail(format!("expected merge, got {other:?}"))),
        };
        let expected = match mode {
            DepositMode::All => held_qty.min(headroom),
            DepositMode::One => u32::from(headroom > 0),
        };
        prop_assert_eq!(moved, expected);
        prop_assert_eq!(inv.slot(idx), Some(&Slot::new(id, target_qty + moved)));
        prop_assert_eq!(*inv.held(), Slot::new(id, held_qty - moved));
        prop_assert_eq!(total_units(&inv), before);
    }

    /// Property: differing non-empty stacks swap under both operations
    #[test]
    fn differing_items_swap(
        idx in index(),
        target_id in item(),
        offset in 1u16..16,
        target_qty in amount(),
        held_qty in amount(),
        mode in mode(),
    ) {
        let held_id = target_id + offset;
        let target = Slot::new(target_id, target_qty);
        let held = Slot::new(held_id, held_qty);
        let mut inv = prepared(idx, target, held);

        prop_assert_eq!(inv.deposit(mode, idx), Ok(DepositOutcome::Swapped));
        prop_assert_eq!(inv.slot(idx), Some(&held));
        prop_assert_eq!(*inv.held(), target);
    }

    /// Property: splitting with an empty hand takes floor(q / 2)
    #[test]
    fn split_takes_smaller_half(
        idx in index(),
        id in item(),
        qty in 2u32..1000,
    ) {
        let mut inv = prepared(idx, Slot::new(id, qty), Slot::EMPTY);

        prop_assert_eq!(inv.deposit_one(idx), Ok(DepositOutcome::Split { amount: qty / 2 }));
        prop_assert_eq!(*inv.held(), Slot::new(id, qty / 2));
        prop_assert_eq!(inv.slot(idx), Some(&Slot::new(id, qty - qty / 2)));
    }

    /// Property: out-of-range indices are rejected with no side effects
    #[test]
    fn invalid_index_changes_nothing(
        idx in index(),
        id in item(),
        qty in amount(),
        bad in DEFAULT_SLOT_COUNT..usize::MAX,
        mode in mode(),
    ) {
        let mut inv = prepared(idx, Slot::new(id, qty), Slot::new(id, qty));
        let before = inv.clone();

        prop_assert!(inv.deposit(mode, bad).is_err());
        prop_assert_eq!(inv, before);
    }

    /// Property: arbitrary click sequences keep every slot consistent and conserve units
    #[test]
    fn click_sequences_preserve_invariants(
        seeds in proptest::collection::vec((index(), item(), amount()), 0..8),
        clicks in proptest::collection::vec((mode(), index()), 0..64),
    ) {
        let mut inv = GridInventory::default();
        for (idx, id, qty) in seeds {
            if inv.slot(idx).is_some_and(Slot::is_empty) {
                inv.set_held(Slot::new(id, qty));
                inv.deposit_all(idx).unwrap();
            }
        }
        let held = inv.set_held(Slot::EMPTY);
        prop_assert_eq!(held, Slot::EMPTY);
        let total = total_units(&inv);

        for (mode, idx) in clicks {
            prop_assert!(inv.deposit(mode, idx).is_ok());
            prop_assert!(inv.slots().iter().all(consistent));
            prop_assert!(consistent(inv.held()));
            prop_assert_eq!(inv.len(), DEFAULT_SLOT_COUNT);
        }

        prop_assert_eq!(total_units(&inv), total);
    }
}

#[test]
fn reference_scenario_matches_expected_states() {
    let mut inv = GridInventory::default();

    inv.set_held(Slot::new(1, 10));
    assert!(inv.deposit_all(1).is_ok());
    assert_eq!(inv.slot(1), Some(&Slot::new(1, 10)));
    assert_eq!(*inv.held(), Slot::EMPTY);

    inv.set_held(Slot::new(2, 20));
    assert!(inv.deposit_all(4).is_ok());
    assert_eq!(inv.slot(4), Some(&Slot::new(2, 20)));
    assert_eq!(inv.slot(1), Some(&Slot::new(1, 10)));

    inv.set_held(Slot::new(1, 5));
    assert!(inv.deposit_all(1).is_ok());
    assert_eq!(inv.slot(1), Some(&Slot::new(1, 15)));
    assert_eq!(*inv.held(), Slot::EMPTY);
}
