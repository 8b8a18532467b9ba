//! Unified error type for pool operations.
//!
//! Every fallible function in this crate returns [`Result`] with
//! [`PoolError`] as the error type. Variants that cover several call sites
//! carry a `&'static str` context message; the enum is `Copy + Eq` so
//! tests can assert on exact error values.

use thiserror::Error;

use crate::transfer::TransferError;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, PoolError>;

/// Everything a pool operation can fail with.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// A required amount argument was zero.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// An asset identifier was null, duplicated, or not in the pool pair.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// A deposit priced to zero shares.
    #[error("deposit too small: no shares would be minted")]
    InsufficientLiquidityMinted,

    /// An account asked to burn more shares than it holds.
    #[error("share balance below requested burn")]
    InsufficientShares,

    /// A swap priced to zero output.
    #[error("swap input too small: output rounds to zero")]
    InsufficientOutput,

    /// The operation needs a funded pool and a required reserve was zero.
    #[error("pool has no liquidity")]
    NoLiquidity,

    /// The Asset Transfer Service refused a custody movement.
    #[error("asset transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    /// An arithmetic result left the `u128` state range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
}
