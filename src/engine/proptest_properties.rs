//! Property-based tests using `proptest` for pool invariant validation.
//!
//! Covers five properties of the bookkeeping core:
//!
//! 1. **Round-trip loss**: swapping A→B→A returns at most the starting input.
//! 2. **Constant-product growth**: `reserveA × reserveB` never decreases
//!    across swaps, and no swap empties a reserve.
//! 3. **Share conservation**: `total_shares` always equals the sum of the
//!    per-account ledger, and reserves are jointly zero or jointly positive.
//! 4. **Ratio preservation**: an exactly proportional deposit leaves the
//!    quoted price unchanged.
//! 5. **Deposit round-trip**: withdrawing a fresh secondary deposit never
//!    returns more than went in.

use proptest::prelude::*;

use crate::domain::{AccountId, Amount, AssetId, AssetPair, Shares};
use crate::math;

use super::state::PoolState;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset(byte: u8) -> AssetId {
    AssetId::from_bytes([byte; 32])
}

fn account(byte: u8) -> AccountId {
    AccountId::from_bytes([byte; 32])
}

fn make_pair() -> AssetPair {
    let Ok(pair) = AssetPair::new(asset(1), asset(2)) else {
        panic!("valid pair");
    };
    pair
}

/// Fresh pool seeded with `(ra, rb)` by `account(10)`.
fn seeded_pool(ra: u128, rb: u128) -> PoolState {
    let mut state = PoolState::new(make_pair());
    let Ok(plan) = state.plan_deposit(account(10), Amount::new(ra), Amount::new(rb)) else {
        panic!("seed deposit within strategy range");
    };
    state.apply_deposit(&plan);
    state
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Percentages in [1, 100], used to size deposits and burns.
fn percent_strategy() -> impl Strategy<Value = u128> {
    1u128..=100u128
}

/// Whole-number multipliers for exactly proportional deposits.
fn scale_strategy() -> impl Strategy<Value = u128> {
    1u128..=5u128
}

// ---------------------------------------------------------------------------
// Property 1: Round-Trip Loss
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_round_trip_loses_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let swap_in = (ra / 1_000).max(1);
        let mut state = seeded_pool(ra, rb);

        // A → B
        let Ok(plan_ab) = state.plan_swap(asset(1), Amount::new(swap_in)) else {
            return Ok(());
        };
        state.apply_swap(&plan_ab);
        let received_b = plan_ab.amount_out.get();

        // B → A
        let Ok(plan_ba) = state.plan_swap(asset(2), Amount::new(received_b)) else {
            return Ok(());
        };
        state.apply_swap(&plan_ba);
        let final_a = plan_ba.amount_out.get();

        prop_assert!(
            final_a <= swap_in,
            "round-trip should lose value: final={} > original={}",
            final_a, swap_in
        );
    }

    #[test]
    fn prop_larger_input_never_pays_less(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=1_000_000u128,
        extra in 1u128..=1_000_000u128,
    ) {
        let Ok(out_small) =
            math::get_amount_out(Amount::new(amount), Amount::new(ra), Amount::new(rb))
        else {
            return Ok(());
        };
        let Ok(out_large) =
            math::get_amount_out(Amount::new(amount + extra), Amount::new(ra), Amount::new(rb))
        else {
            return Ok(());
        };

        prop_assert!(
            out_large >= out_small,
            "larger input should not pay less: out({})={} < out({})={}",
            amount + extra, out_large.get(), amount, out_small.get()
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Constant-Product Growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_constant_product_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        legs in 1usize..=5,
    ) {
        let mut state = seeded_pool(ra, rb);
        let k_before = state.reserve_a().get() * state.reserve_b().get();

        for leg in 0..legs {
            // Alternate direction so reserves drift both ways.
            let (asset_in, reserve_in) = if leg % 2 == 0 {
                (asset(1), state.reserve_a())
            } else {
                (asset(2), state.reserve_b())
            };
            let amount_in = (reserve_in.get() / 500).max(1);
            let Ok(plan) = state.plan_swap(asset_in, Amount::new(amount_in)) else {
                break;
            };
            state.apply_swap(&plan);

            prop_assert!(
                !state.reserve_a().is_zero() && !state.reserve_b().is_zero(),
                "a swap must never empty a reserve"
            );
        }

        let k_after = state.reserve_a().get() * state.reserve_b().get();
        prop_assert!(
            k_after >= k_before,
            "constant product should grow from fees: k_after={} < k_before={}",
            k_after, k_before
        );
    }
}

// ---------------------------------------------------------------------------
// Property 3: Share Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_shares_conserved_across_operations(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        deposit_pct in percent_strategy(),
        burn_pct in percent_strategy(),
    ) {
        let mut state = seeded_pool(ra, rb);

        let da = (ra * deposit_pct / 100).max(1);
        let db = (rb * deposit_pct / 100).max(1);
        if let Ok(plan) = state.plan_deposit(account(11), Amount::new(da), Amount::new(db)) {
            state.apply_deposit(&plan);
        }

        let swap_in = (state.reserve_a().get() / 1_000).max(1);
        if let Ok(plan) = state.plan_swap(asset(1), Amount::new(swap_in)) {
            state.apply_swap(&plan);
        }

        let burn = (state.shares_of(&account(10)).get() * burn_pct / 100).max(1);
        if let Ok(plan) = state.plan_withdrawal(account(10), Shares::new(burn)) {
            state.apply_withdrawal(&plan);
        }

        prop_assert_eq!(state.ledger_total(), Some(state.total_shares()));

        let (res_a, res_b) = state.reserves();
        prop_assert_eq!(
            res_a.is_zero(), res_b.is_zero(),
            "reserves must be jointly zero or jointly positive: ({}, {})",
            res_a.get(), res_b.get()
        );
        prop_assert_eq!(state.is_empty(), res_a.is_zero());
    }
}

// ---------------------------------------------------------------------------
// Property 4: Ratio Preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_proportional_deposit_preserves_price(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        scale in scale_strategy(),
    ) {
        let mut state = seeded_pool(ra, rb);
        let Ok(price_before) = state.price() else {
            return Ok(());
        };

        let Ok(plan) = state.plan_deposit(
            account(11),
            Amount::new(ra * scale),
            Amount::new(rb * scale),
        ) else {
            return Ok(());
        };
        state.apply_deposit(&plan);

        let Ok(price_after) = state.price() else {
            return Ok(());
        };
        prop_assert_eq!(
            price_before, price_after,
            "an exactly proportional deposit must not move the price"
        );
    }
}

// ---------------------------------------------------------------------------
// Property 5: Deposit Round-Trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_secondary_deposit_round_trip_never_profits(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        deposit_pct in percent_strategy(),
    ) {
        let mut state = seeded_pool(ra, rb);
        let da = (ra * deposit_pct / 100).max(1);
        let db = (rb * deposit_pct / 100).max(1);

        let Ok(plan) = state.plan_deposit(account(11), Amount::new(da), Amount::new(db)) else {
            return Ok(());
        };
        state.apply_deposit(&plan);

        let Ok(wplan) = state.plan_withdrawal(account(11), plan.shares_minted) else {
            return Ok(());
        };
        state.apply_withdrawal(&wplan);

        prop_assert!(
            wplan.amount_a.get() <= da && wplan.amount_b.get() <= db,
            "withdrawing a fresh deposit must not profit: in=({}, {}) out=({}, {})",
            da, db, wplan.amount_a.get(), wplan.amount_b.get()
        );
    }
}
