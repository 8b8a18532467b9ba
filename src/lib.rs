//! # Pairpool
//!
//! Two-asset constant-product pool engine: deposit paired liquidity, swap
//! against pooled reserves, and redeem shares, with asset custody and event
//! delivery plugged in at the edges.
//!
//! The crate owns bookkeeping only. Actual asset movement goes through a
//! [`TransferService`](transfer::TransferService) implementation supplied by
//! the embedder, and every committed operation is reported to an
//! [`EventSink`](events::EventSink). That keeps the engine testable in
//! isolation and portable across custody backends.
//!
//! # Design Properties
//!
//! - **Rounding favors the pool.** Share mints, redemption payouts and swap
//!   outputs all floor; value lost to rounding accrues to remaining holders.
//! - **Operations are atomic.** Each mutation validates, moves assets and
//!   commits under one write guard; a failed transfer leg is rolled back and
//!   leaves bookkeeping untouched.
//! - **Arithmetic is widened and checked.** Reserve-scale products run in
//!   256 bits; a result that leaves `u128` is an error, never a wrap.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pairpool = "0.1"
//! ```
//!
//! ## Open a pool, provide liquidity, swap
//!
//! ```rust
//! use pairpool::prelude::*;
//!
//! // 1. Define the asset pair (asset A is the price base)
//! let asset_a = AssetId::from_bytes([1u8; 32]);
//! let asset_b = AssetId::from_bytes([2u8; 32]);
//! let pair = AssetPair::new(asset_a, asset_b).expect("distinct assets");
//!
//! // 2. Seed custody for a liquidity provider and a trader
//! let custody = InMemoryTransfers::new();
//! let alice = AccountId::from_bytes([10u8; 32]);
//! let bob = AccountId::from_bytes([11u8; 32]);
//! custody.seed(asset_a, alice, Amount::new(1_000));
//! custody.seed(asset_b, alice, Amount::new(1_000));
//! custody.seed(asset_a, bob, Amount::new(100));
//!
//! // 3. Open the pool and provide liquidity
//! let pool = PoolEngine::new(pair, custody, NullSink);
//! let minted = pool
//!     .add_liquidity(alice, Amount::new(100), Amount::new(200))
//!     .expect("first deposit");
//! assert_eq!(minted, Shares::new(141)); // floor(sqrt(100 × 200))
//!
//! // 4. Trade against the reserves (0.3% fee stays in the pool)
//! let received = pool.swap(bob, asset_a, Amount::new(10)).expect("swap ok");
//! assert_eq!(received, Amount::new(18));
//! assert_eq!(pool.reserves(), (Amount::new(110), Amount::new(182)));
//!
//! // 5. Redeem the full position: sole provider gets the reserves back
//! let (out_a, out_b) = pool.remove_liquidity(alice, minted).expect("redeem");
//! assert_eq!((out_a, out_b), (Amount::new(110), Amount::new(182)));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  add_liquidity / remove_liquidity / swap / reads
//! └──────┬───────┘
//!        │ &self
//!        ▼
//! ┌──────────────┐      ┌─────────────────┐
//! │  PoolEngine   │─────▶│ TransferService  │  custody (embedder-supplied)
//! │  (RwLock)     │─────▶│ EventSink        │  notifications
//! └──────┬───────┘      └─────────────────┘
//!        │ plan → transfer → commit
//!        ▼
//! ┌──────────────┐
//! │  PoolState    │  reserves, share supply, per-account ledger
//! └──────┬───────┘
//!        │ widened 256-bit arithmetic
//!        ▼
//! ┌──────────────┐
//! │     math      │  mul_div_floor, sqrt_product, get_amount_out
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AssetPair`](domain::AssetPair), [`Price`](domain::Price), etc. |
//! | [`engine`] | [`PoolEngine`](engine::PoolEngine) synchronization and [`PoolState`](engine::PoolState) bookkeeping |
//! | [`transfer`] | [`TransferService`](transfer::TransferService) custody boundary, [`InMemoryTransfers`](transfer::InMemoryTransfers) test double |
//! | [`events`] | [`PoolEvent`](events::PoolEvent) notifications via [`EventSink`](events::EventSink) implementations |
//! | [`math`] | Constant-product pricing: [`get_amount_out`](math::get_amount_out) and widened helpers |
//! | [`error`] | [`PoolError`](error::PoolError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod domain;
pub mod engine;
pub mod error;
pub mod events;
pub mod math;
pub mod prelude;
pub mod transfer;
