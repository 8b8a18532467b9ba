//! End-to-end pool walkthrough: provide liquidity, trade, redeem.
//!
//! Events are delivered through [`TracingSink`], so every committed
//! operation shows up as a structured log line alongside the printed state.
//!
//! # Run
//!
//! ```bash
//! cargo run --example pool_walkthrough
//! ```

use pairpool::domain::{AccountId, Amount, AssetId, AssetPair, Shares};
use pairpool::engine::PoolEngine;
use pairpool::events::TracingSink;
use pairpool::transfer::InMemoryTransfers;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Constant-Product Pool Walkthrough ===\n");

    // ── 1. Define the pair and the participants ─────────────────────────
    let asset_a = AssetId::from_bytes([1u8; 32]);
    let asset_b = AssetId::from_bytes([2u8; 32]);
    let pair = AssetPair::new(asset_a, asset_b)?;

    let alice = AccountId::from_bytes([10u8; 32]);
    let bob = AccountId::from_bytes([11u8; 32]);

    // ── 2. Seed external custody ────────────────────────────────────────
    let custody = InMemoryTransfers::new();
    custody.seed(asset_a, alice, Amount::new(500_000));
    custody.seed(asset_b, alice, Amount::new(500_000));
    custody.seed(asset_a, bob, Amount::new(50_000));
    custody.seed(asset_b, bob, Amount::new(50_000));

    let pool = PoolEngine::new(pair, custody, TracingSink);

    // ── 3. Alice provides the first liquidity ───────────────────────────
    let minted = pool.add_liquidity(alice, Amount::new(100_000), Amount::new(200_000))?;
    let (ra, rb) = pool.reserves();
    println!("Alice deposited 100 000 A + 200 000 B");
    println!("  Shares minted: {minted}");
    println!("  Reserves:      ({ra}, {rb})");
    println!("  Price A in B:  {}\n", pool.price()?);

    // ── 4. Bob trades against the pool ──────────────────────────────────
    let quoted = pool.quote_swap(asset_a, Amount::new(10_000))?;
    let received = pool.swap(bob, asset_a, Amount::new(10_000))?;
    assert_eq!(quoted, received);
    let (ra, rb) = pool.reserves();
    println!("Bob swapped 10 000 A for B");
    println!("  Received:      {received} B (quoted {quoted})");
    println!("  Reserves:      ({ra}, {rb})");
    println!("  Price A in B:  {}\n", pool.price()?);

    let received_back = pool.swap(bob, asset_b, received)?;
    let (ra, rb) = pool.reserves();
    println!("Bob swapped {received} B back to A");
    println!("  Received:      {received_back} A (round trip keeps the fee in the pool)");
    println!("  Reserves:      ({ra}, {rb})\n");

    // ── 5. Alice scales her position down, then exits ───────────────────
    let (out_a, out_b) = pool.remove_liquidity(alice, Shares::new(41_421))?;
    println!("Alice burned 41 421 shares");
    println!("  Paid out:      ({out_a}, {out_b})");
    println!("  Shares left:   {}\n", pool.shares_of(&alice));

    let remaining = pool.shares_of(&alice);
    let (out_a, out_b) = pool.remove_liquidity(alice, remaining)?;
    let (ra, rb) = pool.reserves();
    println!("Alice burned her remaining {remaining} shares");
    println!("  Paid out:      ({out_a}, {out_b})");
    println!("  Reserves:      ({ra}, {rb})");
    println!("  Total shares:  {}\n", pool.total_shares());

    // ── 6. Final custody balances ───────────────────────────────────────
    let custody = pool.transfer_service();
    println!("Final balances:");
    println!(
        "  Alice:  {} A, {} B",
        custody.balance_of(asset_a, alice),
        custody.balance_of(asset_b, alice)
    );
    println!(
        "  Bob:    {} A, {} B",
        custody.balance_of(asset_a, bob),
        custody.balance_of(asset_b, bob)
    );
    println!(
        "  Pool:   {} A, {} B",
        custody.custody_of(asset_a),
        custody.custody_of(asset_b)
    );

    Ok(())
}
