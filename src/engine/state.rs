//! Pure pool bookkeeping.

use std::collections::HashMap;

use crate::domain::{AccountId, Amount, AssetId, AssetPair, Price, Shares};
use crate::error::{PoolError, Result};
use crate::math;

/// Fully-computed deposit, ready to commit.
///
/// Planning does every checked computation up front; applying a plan is
/// plain assignment and cannot fail. That split lets the engine order
/// custody transfers between the two halves without a failure window
/// after funds have moved.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DepositPlan {
    pub(crate) account: AccountId,
    pub(crate) amount_a: Amount,
    pub(crate) amount_b: Amount,
    pub(crate) shares_minted: Shares,
    new_reserve_a: Amount,
    new_reserve_b: Amount,
    new_total_shares: Shares,
    new_account_shares: Shares,
}

/// Fully-computed redemption, ready to commit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WithdrawalPlan {
    pub(crate) account: AccountId,
    pub(crate) amount_a: Amount,
    pub(crate) amount_b: Amount,
    pub(crate) shares_burned: Shares,
    new_reserve_a: Amount,
    new_reserve_b: Amount,
    new_total_shares: Shares,
    new_account_shares: Shares,
}

/// Fully-computed swap, ready to commit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SwapPlan {
    pub(crate) asset_in: AssetId,
    pub(crate) asset_out: AssetId,
    pub(crate) amount_in: Amount,
    pub(crate) amount_out: Amount,
    new_reserve_a: Amount,
    new_reserve_b: Amount,
}

/// Pure bookkeeping core of one two-asset constant-product pool.
///
/// Holds reserves, the outstanding share supply, and the per-account share
/// ledger. `PoolState` is single-threaded and does no I/O: every operation
/// is split into a `plan_*` step that validates and computes without
/// touching state, and an `apply_*` step that commits by assignment. The
/// public `quote_*` methods price an operation without planning a commit.
///
/// [`PoolEngine`](super::PoolEngine) wraps this type in a lock and drives
/// custody transfers between plan and apply. Embedders that bring their
/// own synchronization and custody can use `PoolState` directly through
/// the quote surface.
///
/// Invariants maintained across every committed plan:
///
/// - reserves are both zero (empty pool) or both positive;
/// - `total_shares` equals the sum of all ledger balances;
/// - `reserveA * reserveB` never decreases across a swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    pair: AssetPair,
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Shares,
    share_balances: HashMap<AccountId, Shares>,
}

impl PoolState {
    /// Creates an empty pool over `pair`: zero reserves, zero shares.
    #[must_use]
    pub fn new(pair: AssetPair) -> Self {
        Self {
            pair,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            total_shares: Shares::ZERO,
            share_balances: HashMap::new(),
        }
    }

    // -- read surface -------------------------------------------------------

    /// The pool's asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Reserve of asset A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Reserve of asset B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Both reserves as one consistent pair.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Outstanding share supply.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Share balance of `account`; zero for unknown accounts.
    #[must_use]
    pub fn shares_of(&self, account: &AccountId) -> Shares {
        self.share_balances
            .get(account)
            .copied()
            .unwrap_or(Shares::ZERO)
    }

    /// `true` while no shares are outstanding.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_shares.is_zero()
    }

    /// Sum of every ledger balance; `None` only if the ledger is corrupt
    /// enough to overflow, which no committed plan can produce.
    pub(crate) fn ledger_total(&self) -> Option<Shares> {
        self.share_balances
            .values()
            .try_fold(Shares::ZERO, |acc, bal| acc.checked_add(bal))
    }

    /// Price of one unit of asset A in asset B, scaled by 10^18.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NoLiquidity`] if `reserveA` is zero.
    /// - [`PoolError::Overflow`] if the scaled ratio exceeds `u128`.
    pub fn price(&self) -> Result<Price> {
        if self.reserve_a.is_zero() {
            return Err(PoolError::NoLiquidity);
        }
        math::mul_div_floor(self.reserve_b.get(), Price::SCALE, self.reserve_a.get())
            .map(Price::from_scaled)
            .ok_or(PoolError::Overflow("price exceeds representable range"))
    }

    // -- quotes -------------------------------------------------------------

    /// Shares a deposit of `(amount_a, amount_b)` would mint right now.
    ///
    /// # Errors
    ///
    /// Same as `addLiquidity` validation: [`PoolError::InvalidAmount`] for
    /// a zero leg, [`PoolError::InsufficientLiquidityMinted`] if the mint
    /// prices to zero, [`PoolError::Overflow`] on out-of-range arithmetic.
    pub fn quote_deposit(&self, amount_a: Amount, amount_b: Amount) -> Result<Shares> {
        self.deposit_shares(amount_a, amount_b)
    }

    /// Payout a burn of `shares` by `account` would produce right now.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidAmount`] for a zero burn,
    /// [`PoolError::InsufficientShares`] if the account balance is short.
    pub fn quote_withdrawal(&self, account: &AccountId, shares: Shares) -> Result<(Amount, Amount)> {
        self.withdrawal_amounts(account, shares)
    }

    /// Output an exact-input swap of `amount_in` of `asset_in` would pay.
    ///
    /// # Errors
    ///
    /// Same as `swap` validation: [`PoolError::InvalidAsset`],
    /// [`PoolError::InvalidAmount`], [`PoolError::NoLiquidity`],
    /// [`PoolError::InsufficientOutput`], [`PoolError::Overflow`].
    pub fn quote_swap(&self, asset_in: AssetId, amount_in: Amount) -> Result<Amount> {
        self.swap_output(asset_in, amount_in).map(|(out, _)| out)
    }

    // -- deposit ------------------------------------------------------------

    fn deposit_shares(&self, amount_a: Amount, amount_b: Amount) -> Result<Shares> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(PoolError::InvalidAmount("deposit legs must be positive"));
        }
        let minted = if self.total_shares.is_zero() {
            Shares::new(math::sqrt_product(amount_a.get(), amount_b.get()))
        } else {
            let by_a = math::mul_div_floor(
                amount_a.get(),
                self.total_shares.get(),
                self.reserve_a.get(),
            )
            .ok_or(PoolError::Overflow("share mint exceeds u128"))?;
            let by_b = math::mul_div_floor(
                amount_b.get(),
                self.total_shares.get(),
                self.reserve_b.get(),
            )
            .ok_or(PoolError::Overflow("share mint exceeds u128"))?;
            Shares::new(by_a.min(by_b))
        };
        if minted.is_zero() {
            return Err(PoolError::InsufficientLiquidityMinted);
        }
        Ok(minted)
    }

    pub(crate) fn plan_deposit(
        &self,
        account: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<DepositPlan> {
        let shares_minted = self.deposit_shares(amount_a, amount_b)?;
        let new_reserve_a = self
            .reserve_a
            .checked_add(&amount_a)
            .ok_or(PoolError::Overflow("reserve A addition overflow"))?;
        let new_reserve_b = self
            .reserve_b
            .checked_add(&amount_b)
            .ok_or(PoolError::Overflow("reserve B addition overflow"))?;
        let new_total_shares = self
            .total_shares
            .checked_add(&shares_minted)
            .ok_or(PoolError::Overflow("share supply overflow"))?;
        let new_account_shares = self
            .shares_of(&account)
            .checked_add(&shares_minted)
            .ok_or(PoolError::Overflow("account share balance overflow"))?;

        Ok(DepositPlan {
            account,
            amount_a,
            amount_b,
            shares_minted,
            new_reserve_a,
            new_reserve_b,
            new_total_shares,
            new_account_shares,
        })
    }

    pub(crate) fn apply_deposit(&mut self, plan: &DepositPlan) {
        self.reserve_a = plan.new_reserve_a;
        self.reserve_b = plan.new_reserve_b;
        self.total_shares = plan.new_total_shares;
        self.share_balances
            .insert(plan.account, plan.new_account_shares);
    }

    // -- withdrawal ---------------------------------------------------------

    fn withdrawal_amounts(&self, account: &AccountId, shares: Shares) -> Result<(Amount, Amount)> {
        if shares.is_zero() {
            return Err(PoolError::InvalidAmount("share burn must be positive"));
        }
        if self.shares_of(account) < shares {
            return Err(PoolError::InsufficientShares);
        }
        // shares <= balance <= total_shares, so both quotients fit the
        // reserve range and the divisor is positive.
        let amount_a =
            math::mul_div_floor(shares.get(), self.reserve_a.get(), self.total_shares.get())
                .ok_or(PoolError::Overflow("payout exceeds u128"))?;
        let amount_b =
            math::mul_div_floor(shares.get(), self.reserve_b.get(), self.total_shares.get())
                .ok_or(PoolError::Overflow("payout exceeds u128"))?;
        Ok((Amount::new(amount_a), Amount::new(amount_b)))
    }

    pub(crate) fn plan_withdrawal(
        &self,
        account: AccountId,
        shares: Shares,
    ) -> Result<WithdrawalPlan> {
        let (amount_a, amount_b) = self.withdrawal_amounts(&account, shares)?;
        let new_reserve_a = self
            .reserve_a
            .checked_sub(&amount_a)
            .ok_or(PoolError::Overflow("reserve A underflow"))?;
        let new_reserve_b = self
            .reserve_b
            .checked_sub(&amount_b)
            .ok_or(PoolError::Overflow("reserve B underflow"))?;
        let new_total_shares = self
            .total_shares
            .checked_sub(&shares)
            .ok_or(PoolError::Overflow("share supply underflow"))?;
        let new_account_shares = self
            .shares_of(&account)
            .checked_sub(&shares)
            .ok_or(PoolError::Overflow("account share balance underflow"))?;

        Ok(WithdrawalPlan {
            account,
            amount_a,
            amount_b,
            shares_burned: shares,
            new_reserve_a,
            new_reserve_b,
            new_total_shares,
            new_account_shares,
        })
    }

    pub(crate) fn apply_withdrawal(&mut self, plan: &WithdrawalPlan) {
        self.reserve_a = plan.new_reserve_a;
        self.reserve_b = plan.new_reserve_b;
        self.total_shares = plan.new_total_shares;
        self.share_balances
            .insert(plan.account, plan.new_account_shares);
    }

    // -- swap ---------------------------------------------------------------

    /// Resolves the swap direction and prices the output.
    fn swap_output(&self, asset_in: AssetId, amount_in: Amount) -> Result<(Amount, AssetId)> {
        let asset_out = self.pair.other(&asset_in)?;
        let (reserve_in, reserve_out) = if asset_in == self.pair.asset_a() {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        };
        let amount_out = math::get_amount_out(amount_in, reserve_in, reserve_out)?;
        if amount_out.is_zero() {
            return Err(PoolError::InsufficientOutput);
        }
        Ok((amount_out, asset_out))
    }

    pub(crate) fn plan_swap(&self, asset_in: AssetId, amount_in: Amount) -> Result<SwapPlan> {
        let (amount_out, asset_out) = self.swap_output(asset_in, amount_in)?;
        let a_to_b = asset_in == self.pair.asset_a();
        let (reserve_in, reserve_out) = if a_to_b {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        };

        let new_reserve_in = reserve_in
            .checked_add(&amount_in)
            .ok_or(PoolError::Overflow("input reserve overflow"))?;
        // amount_out < reserve_out by the pricing formula.
        let new_reserve_out = reserve_out
            .checked_sub(&amount_out)
            .ok_or(PoolError::Overflow("output reserve underflow"))?;
        let (new_reserve_a, new_reserve_b) = if a_to_b {
            (new_reserve_in, new_reserve_out)
        } else {
            (new_reserve_out, new_reserve_in)
        };

        Ok(SwapPlan {
            asset_in,
            asset_out,
            amount_in,
            amount_out,
            new_reserve_a,
            new_reserve_b,
        })
    }

    pub(crate) fn apply_swap(&mut self, plan: &SwapPlan) {
        self.reserve_a = plan.new_reserve_a;
        self.reserve_b = plan.new_reserve_b;
    }
}
