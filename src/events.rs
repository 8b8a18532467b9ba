//! Pool event taxonomy and delivery seam.
//!
//! Every successful mutating operation is announced once, after its
//! bookkeeping commit, as a [`PoolEvent`]. Delivery goes through an
//! [`EventSink`] supplied at engine construction; [`NullSink`] discards
//! events and [`TracingSink`] logs them through `tracing`.

use crate::domain::{AccountId, Amount, AssetId, Shares};

/// A successful mutating operation, as announced to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEvent {
    /// A deposit minted shares.
    LiquidityAdded {
        /// Depositing account.
        account: AccountId,
        /// Asset A leg of the deposit.
        amount_a: Amount,
        /// Asset B leg of the deposit.
        amount_b: Amount,
        /// Shares credited to the account.
        shares_minted: Shares,
    },

    /// A redemption burned shares and paid out reserves.
    LiquidityRemoved {
        /// Redeeming account.
        account: AccountId,
        /// Asset A payout.
        amount_a: Amount,
        /// Asset B payout.
        amount_b: Amount,
        /// Shares debited from the account.
        shares_burned: Shares,
    },

    /// An exact-input swap settled.
    Swap {
        /// Trading account.
        account: AccountId,
        /// Asset the account paid in.
        asset_in: AssetId,
        /// Asset the account received.
        asset_out: AssetId,
        /// Input amount, fee included.
        amount_in: Amount,
        /// Output amount after the fee.
        amount_out: Amount,
    },
}

/// Receives pool events.
///
/// # Contract
///
/// - Notification is fire-and-forget: the engine ignores anything the sink
///   does with the event.
/// - The engine calls `notify` while still holding its operation guard, so
///   events arrive in commit order. A sink must therefore be quick and
///   must never call back into the engine (re-entry deadlocks).
pub trait EventSink {
    /// Delivers one event.
    fn notify(&self, event: &PoolEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&self, _event: &PoolEvent) {}
}

/// Logs every event at `info` level under the `pairpool::events` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn notify(&self, event: &PoolEvent) {
        match event {
            PoolEvent::LiquidityAdded {
                account,
                amount_a,
                amount_b,
                shares_minted,
            } => {
                tracing::info!(
                    target: "pairpool::events",
                    %account,
                    %amount_a,
                    %amount_b,
                    %shares_minted,
                    "liquidity added"
                );
            }
            PoolEvent::LiquidityRemoved {
                account,
                amount_a,
                amount_b,
                shares_burned,
            } => {
                tracing::info!(
                    target: "pairpool::events",
                    %account,
                    %amount_a,
                    %amount_b,
                    %shares_burned,
                    "liquidity removed"
                );
            }
            PoolEvent::Swap {
                account,
                asset_in,
                asset_out,
                amount_in,
                amount_out,
            } => {
                tracing::info!(
                    target: "pairpool::events",
                    %account,
                    %asset_in,
                    %asset_out,
                    %amount_in,
                    %amount_out,
                    "swap settled"
                );
            }
        }
    }
}
