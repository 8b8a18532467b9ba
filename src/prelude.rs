//! Convenience re-exports for the common surface of the crate.
//!
//! ```rust
//! use pairpool::prelude::*;
//!
//! let asset_a = AssetId::from_bytes([1u8; 32]);
//! let asset_b = AssetId::from_bytes([2u8; 32]);
//! let pair = AssetPair::new(asset_a, asset_b).expect("distinct assets");
//! let pool = PoolEngine::new(pair, InMemoryTransfers::new(), NullSink);
//! assert_eq!(pool.total_shares(), Shares::ZERO);
//! ```

pub use crate::domain::{AccountId, Amount, AssetId, AssetPair, Price, Shares};
pub use crate::engine::{PoolEngine, PoolState};
pub use crate::error::{PoolError, Result};
pub use crate::events::{EventSink, NullSink, PoolEvent, TracingSink};
pub use crate::math::get_amount_out;
pub use crate::transfer::{InMemoryTransfers, TransferError, TransferService};
