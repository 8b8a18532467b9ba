//! The pool engine and its pure bookkeeping core.
//!
//! [`PoolState`] is the single-threaded heart: it validates, prices and
//! commits deposits, withdrawals and swaps without any I/O. [`PoolEngine`]
//! wraps one `PoolState` in a lock and coordinates the custody transfers
//! and event delivery around each commit.
//!
//! | Type | Role |
//! |------|------|
//! | [`PoolState`] | Reserves, share supply, per-account ledger |
//! | [`PoolEngine`] | Locking, transfer ordering, rollback, events |

mod pool;
mod state;

#[cfg(test)]
mod proptest_properties;

pub use pool::PoolEngine;
pub use state::PoolState;
