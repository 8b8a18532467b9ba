//! Fundamental domain value types for the pool engine.
//!
//! This module contains the newtype value types the engine is built from:
//! asset and account identifiers, asset quantities, liquidity shares, the
//! validated asset pair, and the 10^18-scaled price. Constructors validate
//! invariants; quantity arithmetic is checked and returns `Option`. Widened
//! reserve-scale multiplication lives in [`crate::math`].

mod account_id;
mod amount;
mod asset_id;
mod asset_pair;
mod price;
mod shares;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset_id::AssetId;
pub use asset_pair::AssetPair;
pub use price::Price;
pub use shares::Shares;
