//! Synchronized pool engine (validate, transfer, commit).
//!
//! Every mutating operation follows the same three-phase shape under one
//! write guard:
//!
//! 1. **Plan**: validate inputs and compute the full outcome against
//!    current state. Nothing is mutated; any error leaves the pool and
//!    custody untouched.
//! 2. **Transfer**: move assets through the [`TransferService`]. If the
//!    second leg of a two-leg movement fails, the first leg is reversed
//!    best-effort and the operation reports `PoolError::TransferFailed`.
//! 3. **Commit**: apply the precomputed plan (infallible assignment) and
//!    hand the resulting event to the [`EventSink`].
//!
//! Payouts are transferred before the burn is committed, so a failed
//! payout leaves the caller's shares intact.

use parking_lot::RwLock;

use crate::domain::{AccountId, Amount, AssetId, AssetPair, Price, Shares};
use crate::error::Result;
use crate::events::{EventSink, PoolEvent};
use crate::transfer::TransferService;

use super::state::PoolState;

/// A thread-safe two-asset constant-product pool.
///
/// Owns its [`PoolState`] behind a [`RwLock`] and two collaborators: a
/// [`TransferService`] for asset custody and an [`EventSink`] for
/// notifications. Mutating operations take `&self` and serialize on the
/// write guard; reads share a read guard and always observe a fully
/// committed state.
///
/// # Concurrency
///
/// The write guard spans planning, both custody transfers, and the
/// commit, so concurrent mutations cannot interleave with a transfer in
/// flight. Collaborators are called while the guard is held and must not
/// call back into the engine. Operations run to completion once started;
/// there is no cancellation point between transfer and commit.
///
/// # Example
///
/// ```rust
/// use pairpool::domain::{AccountId, Amount, AssetId, AssetPair, Shares};
/// use pairpool::engine::PoolEngine;
/// use pairpool::events::NullSink;
/// use pairpool::transfer::InMemoryTransfers;
///
/// let asset_a = AssetId::from_bytes([1u8; 32]);
/// let asset_b = AssetId::from_bytes([2u8; 32]);
/// let pair = AssetPair::new(asset_a, asset_b).expect("distinct");
/// let alice = AccountId::from_bytes([10u8; 32]);
///
/// let transfers = InMemoryTransfers::new();
/// transfers.seed(asset_a, alice, Amount::new(1_000));
/// transfers.seed(asset_b, alice, Amount::new(1_000));
///
/// let engine = PoolEngine::new(pair, transfers, NullSink);
/// let minted = engine
///     .add_liquidity(alice, Amount::new(100), Amount::new(200))
///     .expect("first deposit");
/// assert_eq!(minted, Shares::new(141));
/// assert_eq!(engine.reserves(), (Amount::new(100), Amount::new(200)));
/// ```
#[derive(Debug)]
pub struct PoolEngine<T, S> {
    state: RwLock<PoolState>,
    transfer: T,
    events: S,
}

impl<T, S> PoolEngine<T, S>
where
    T: TransferService,
    S: EventSink,
{
    /// Creates an engine over an empty pool for `pair`.
    #[must_use]
    pub fn new(pair: AssetPair, transfer: T, events: S) -> Self {
        Self {
            state: RwLock::new(PoolState::new(pair)),
            transfer,
            events,
        }
    }

    // -- mutating operations ------------------------------------------------

    /// Deposits `amount_a` and `amount_b` for `account` and mints shares.
    ///
    /// The first deposit mints `floor(sqrt(amount_a * amount_b))` shares;
    /// later deposits mint the smaller of the two proportional prices, so
    /// off-ratio deposits donate the excess leg to the pool.
    ///
    /// # Errors
    ///
    /// - `PoolError::InvalidAmount` if either leg is zero.
    /// - `PoolError::InsufficientLiquidityMinted` if the mint prices to zero.
    /// - `PoolError::Overflow` if reserves or supply would leave `u128`.
    /// - `PoolError::TransferFailed` if a deposit leg is not honored.
    pub fn add_liquidity(
        &self,
        account: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares> {
        let mut state = self.state.write();
        let plan = state.plan_deposit(account, amount_a, amount_b)?;
        let pair = state.pair();

        self.transfer.transfer_in(pair.asset_a(), account, amount_a)?;
        if let Err(err) = self.transfer.transfer_in(pair.asset_b(), account, amount_b) {
            self.refund_deposit_leg(pair.asset_a(), account, amount_a);
            return Err(err.into());
        }

        state.apply_deposit(&plan);
        self.events.notify(&PoolEvent::LiquidityAdded {
            account,
            amount_a,
            amount_b,
            shares_minted: plan.shares_minted,
        });
        Ok(plan.shares_minted)
    }

    /// Burns `shares` for `account` and pays out both reserves pro rata.
    ///
    /// Payouts are floored; burning the entire supply returns exactly the
    /// remaining reserves. A leg that floors to zero is skipped rather
    /// than sent as a zero transfer.
    ///
    /// # Errors
    ///
    /// - `PoolError::InvalidAmount` if `shares` is zero.
    /// - `PoolError::InsufficientShares` if the account balance is short.
    /// - `PoolError::TransferFailed` if a payout leg is not honored; the
    ///   shares remain unburned.
    pub fn remove_liquidity(
        &self,
        account: AccountId,
        shares: Shares,
    ) -> Result<(Amount, Amount)> {
        let mut state = self.state.write();
        let plan = state.plan_withdrawal(account, shares)?;
        let pair = state.pair();

        if !plan.amount_a.is_zero() {
            self.transfer.transfer_out(pair.asset_a(), account, plan.amount_a)?;
        }
        if !plan.amount_b.is_zero() {
            if let Err(err) = self.transfer.transfer_out(pair.asset_b(), account, plan.amount_b) {
                if !plan.amount_a.is_zero() {
                    self.reclaim_payout_leg(pair.asset_a(), account, plan.amount_a);
                }
                return Err(err.into());
            }
        }

        state.apply_withdrawal(&plan);
        self.events.notify(&PoolEvent::LiquidityRemoved {
            account,
            amount_a: plan.amount_a,
            amount_b: plan.amount_b,
            shares_burned: plan.shares_burned,
        });
        Ok((plan.amount_a, plan.amount_b))
    }

    /// Swaps an exact `amount_in` of `asset_in` for the other asset.
    ///
    /// Pricing keeps 0.3% of the input as a fee inside the reserves:
    /// `out = floor(in * 997 * reserve_out / (reserve_in * 1000 + in * 997))`.
    ///
    /// # Errors
    ///
    /// - `PoolError::InvalidAsset` if `asset_in` is not in the pair.
    /// - `PoolError::InvalidAmount` if `amount_in` is zero.
    /// - `PoolError::NoLiquidity` if the pool is empty.
    /// - `PoolError::InsufficientOutput` if the output floors to zero.
    /// - `PoolError::Overflow` if pricing leaves the supported range.
    /// - `PoolError::TransferFailed` if either custody leg is not honored.
    pub fn swap(
        &self,
        account: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
    ) -> Result<Amount> {
        let mut state = self.state.write();
        let plan = state.plan_swap(asset_in, amount_in)?;

        self.transfer.transfer_in(plan.asset_in, account, plan.amount_in)?;
        if let Err(err) = self.transfer.transfer_out(plan.asset_out, account, plan.amount_out) {
            self.refund_deposit_leg(plan.asset_in, account, plan.amount_in);
            return Err(err.into());
        }

        state.apply_swap(&plan);
        self.events.notify(&PoolEvent::Swap {
            account,
            asset_in: plan.asset_in,
            asset_out: plan.asset_out,
            amount_in: plan.amount_in,
            amount_out: plan.amount_out,
        });
        Ok(plan.amount_out)
    }

    // -- read operations ----------------------------------------------------

    /// Price of one unit of asset A in asset B, scaled by 10^18.
    ///
    /// # Errors
    ///
    /// `PoolError::NoLiquidity` if the pool holds no asset A.
    pub fn price(&self) -> Result<Price> {
        self.state.read().price()
    }

    /// Both reserves as one consistent snapshot.
    #[must_use]
    pub fn reserves(&self) -> (Amount, Amount) {
        self.state.read().reserves()
    }

    /// Outstanding share supply.
    #[must_use]
    pub fn total_shares(&self) -> Shares {
        self.state.read().total_shares()
    }

    /// Share balance of `account`.
    #[must_use]
    pub fn shares_of(&self, account: &AccountId) -> Shares {
        self.state.read().shares_of(account)
    }

    /// The pool's asset pair.
    #[must_use]
    pub fn pair(&self) -> AssetPair {
        self.state.read().pair()
    }

    /// A point-in-time copy of the full bookkeeping state.
    #[must_use]
    pub fn snapshot(&self) -> PoolState {
        self.state.read().clone()
    }

    /// Shares a deposit would mint against the current reserves.
    ///
    /// # Errors
    ///
    /// Same validation as [`add_liquidity`](Self::add_liquidity), without
    /// touching custody.
    pub fn quote_deposit(&self, amount_a: Amount, amount_b: Amount) -> Result<Shares> {
        self.state.read().quote_deposit(amount_a, amount_b)
    }

    /// Amounts a share burn would pay out right now.
    ///
    /// # Errors
    ///
    /// Same validation as [`remove_liquidity`](Self::remove_liquidity),
    /// without touching custody.
    pub fn quote_withdrawal(&self, account: &AccountId, shares: Shares) -> Result<(Amount, Amount)> {
        self.state.read().quote_withdrawal(account, shares)
    }

    /// Output a swap would pay against the current reserves.
    ///
    /// # Errors
    ///
    /// Same validation as [`swap`](Self::swap), without touching custody.
    pub fn quote_swap(&self, asset_in: AssetId, amount_in: Amount) -> Result<Amount> {
        self.state.read().quote_swap(asset_in, amount_in)
    }

    /// The custody collaborator.
    pub const fn transfer_service(&self) -> &T {
        &self.transfer
    }

    /// The event collaborator.
    pub const fn event_sink(&self) -> &S {
        &self.events
    }

    // -- compensation -------------------------------------------------------

    /// Returns an already-collected deposit leg after the other leg failed.
    /// Custody rejecting the refund as well is logged and swallowed: the
    /// books were never touched, so pool state stays consistent either way.
    fn refund_deposit_leg(&self, asset: AssetId, account: AccountId, amount: Amount) {
        tracing::warn!(
            target: "pairpool::engine",
            %asset,
            %account,
            %amount,
            "returning collected leg after a failed counterpart transfer"
        );
        if let Err(err) = self.transfer.transfer_out(asset, account, amount) {
            tracing::error!(
                target: "pairpool::engine",
                %asset,
                %account,
                %amount,
                %err,
                "refund of collected deposit leg failed; custody holds unaccounted funds"
            );
        }
    }

    /// Pulls back an already-paid payout leg after the other leg failed.
    fn reclaim_payout_leg(&self, asset: AssetId, account: AccountId, amount: Amount) {
        tracing::warn!(
            target: "pairpool::engine",
            %asset,
            %account,
            %amount,
            "pulling back a paid leg after a failed counterpart transfer"
        );
        if let Err(err) = self.transfer.transfer_in(asset, account, amount) {
            tracing::error!(
                target: "pairpool::engine",
                %asset,
                %account,
                %amount,
                %err,
                "claw-back of half-paid redemption failed; account holds unaccounted funds"
            );
        }
    }
}
