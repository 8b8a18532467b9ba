//! Asset custody seam.
//!
//! The engine never moves asset units itself: custody changes go through a
//! [`TransferService`] supplied by the embedding application. The trait is
//! deliberately small so the engine can sit on top of any custody backend
//! (an on-chain token program, a database ledger, a test double).
//!
//! [`InMemoryTransfers`] is the stock implementation used by tests,
//! doctests, and the demo.

use std::collections::HashMap;

use parking_lot::Mutex;
use thiserror::Error;

use crate::domain::{AccountId, Amount, AssetId};

/// Failure of a single custody movement.
///
/// A failed call must have no partial effect; the engine relies on that to
/// keep its own bookkeeping consistent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    /// The source ledger holds less than the requested amount.
    #[error("insufficient balance for transfer")]
    InsufficientBalance,

    /// The service refused the movement for a policy reason.
    #[error("transfer rejected: {0}")]
    Rejected(&'static str),
}

/// Moves asset units between accounts and pool custody.
///
/// # Contract
///
/// - Each call fully succeeds or fails with no partial effect.
/// - Implementations must not call back into the pool engine: the engine
///   holds its operation guard while calling this trait, so re-entry
///   deadlocks (see [`PoolEngine`](crate::engine::PoolEngine)).
/// - Methods take `&self`; implementations handle their own interior
///   synchronization.
///
/// # Errors
///
/// Both methods return [`TransferError`] describing why the movement was
/// refused. The engine surfaces it as
/// [`PoolError::TransferFailed`](crate::error::PoolError::TransferFailed).
pub trait TransferService {
    /// Pulls `amount` of `asset` from `from` into pool custody.
    fn transfer_in(
        &self,
        asset: AssetId,
        from: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Pays `amount` of `asset` from pool custody to `to`.
    fn transfer_out(
        &self,
        asset: AssetId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

#[derive(Debug, Default)]
struct Ledger {
    /// Free balances per (asset, account).
    accounts: HashMap<(AssetId, AccountId), Amount>,
    /// Pool-owned custody per asset.
    custody: HashMap<AssetId, Amount>,
}

/// Thread-safe in-memory [`TransferService`].
///
/// Keeps per-(asset, account) free balances and a per-asset pool custody
/// bucket under one mutex, so each movement is atomic. Intended for tests
/// and demos; a production deployment supplies its own custody backend.
///
/// # Examples
///
/// ```
/// use pairpool::domain::{AccountId, Amount, AssetId};
/// use pairpool::transfer::{InMemoryTransfers, TransferService};
///
/// let asset = AssetId::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([10u8; 32]);
///
/// let transfers = InMemoryTransfers::new();
/// transfers.seed(asset, alice, Amount::new(500));
/// transfers.transfer_in(asset, alice, Amount::new(200)).expect("funded");
///
/// assert_eq!(transfers.balance_of(asset, alice), Amount::new(300));
/// assert_eq!(transfers.custody_of(asset), Amount::new(200));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryTransfers {
    ledger: Mutex<Ledger>,
}

impl InMemoryTransfers {
    /// Creates an empty ledger: no balances, no custody.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `account`'s free balance.
    ///
    /// A credit that would overflow `u128` leaves the balance unchanged.
    pub fn seed(&self, asset: AssetId, account: AccountId, amount: Amount) {
        let mut ledger = self.ledger.lock();
        let entry = ledger.accounts.entry((asset, account)).or_default();
        if let Some(next) = entry.checked_add(&amount) {
            *entry = next;
        }
    }

    /// Free balance of `account` in `asset`.
    #[must_use]
    pub fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount {
        self.ledger
            .lock()
            .accounts
            .get(&(asset, account))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Pool custody held in `asset`.
    #[must_use]
    pub fn custody_of(&self, asset: AssetId) -> Amount {
        self.ledger
            .lock()
            .custody
            .get(&asset)
            .copied()
            .unwrap_or(Amount::ZERO)
    }
}

impl TransferService for InMemoryTransfers {
    fn transfer_in(
        &self,
        asset: AssetId,
        from: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let mut ledger = self.ledger.lock();

        let balance = ledger
            .accounts
            .get(&(asset, from))
            .copied()
            .unwrap_or(Amount::ZERO);
        let debited = balance
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientBalance)?;
        let custody = ledger.custody.get(&asset).copied().unwrap_or(Amount::ZERO);
        let credited = custody
            .checked_add(&amount)
            .ok_or(TransferError::Rejected("custody balance overflow"))?;

        ledger.accounts.insert((asset, from), debited);
        ledger.custody.insert(asset, credited);
        Ok(())
    }

    fn transfer_out(
        &self,
        asset: AssetId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let mut ledger = self.ledger.lock();

        let custody = ledger.custody.get(&asset).copied().unwrap_or(Amount::ZERO);
        let debited = custody
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientBalance)?;
        let balance = ledger
            .accounts
            .get(&(asset, to))
            .copied()
            .unwrap_or(Amount::ZERO);
        let credited = balance
            .checked_add(&amount)
            .ok_or(TransferError::Rejected("account balance overflow"))?;

        ledger.custody.insert(asset, debited);
        ledger.accounts.insert((asset, to), credited);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn asset(byte: u8) -> AssetId {
        AssetId::from_bytes([byte; 32])
    }

    fn account(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 32])
    }

    #[test]
    fn starts_empty() {
        let transfers = InMemoryTransfers::new();
        assert_eq!(transfers.balance_of(asset(1), account(1)), Amount::ZERO);
        assert_eq!(transfers.custody_of(asset(1)), Amount::ZERO);
    }

    #[test]
    fn seed_accumulates() {
        let transfers = InMemoryTransfers::new();
        transfers.seed(asset(1), account(1), Amount::new(100));
        transfers.seed(asset(1), account(1), Amount::new(50));
        assert_eq!(transfers.balance_of(asset(1), account(1)), Amount::new(150));
    }

    #[test]
    fn transfer_in_moves_to_custody() {
        let transfers = InMemoryTransfers::new();
        transfers.seed(asset(1), account(1), Amount::new(100));

        let Ok(()) = transfers.transfer_in(asset(1), account(1), Amount::new(60)) else {
            panic!("expected Ok");
        };
        assert_eq!(transfers.balance_of(asset(1), account(1)), Amount::new(40));
        assert_eq!(transfers.custody_of(asset(1)), Amount::new(60));
    }

    #[test]
    fn transfer_in_insufficient_balance_has_no_effect() {
        let transfers = InMemoryTransfers::new();
        transfers.seed(asset(1), account(1), Amount::new(10));

        let Err(e) = transfers.transfer_in(asset(1), account(1), Amount::new(11)) else {
            panic!("expected Err");
        };
        assert_eq!(e, TransferError::InsufficientBalance);
        assert_eq!(transfers.balance_of(asset(1), account(1)), Amount::new(10));
        assert_eq!(transfers.custody_of(asset(1)), Amount::ZERO);
    }

    #[test]
    fn transfer_out_pays_from_custody() {
        let transfers = InMemoryTransfers::new();
        transfers.seed(asset(1), account(1), Amount::new(100));
        let Ok(()) = transfers.transfer_in(asset(1), account(1), Amount::new(100)) else {
            panic!("expected Ok");
        };

        let Ok(()) = transfers.transfer_out(asset(1), account(2), Amount::new(30)) else {
            panic!("expected Ok");
        };
        assert_eq!(transfers.custody_of(asset(1)), Amount::new(70));
        assert_eq!(transfers.balance_of(asset(1), account(2)), Amount::new(30));
    }

    #[test]
    fn transfer_out_without_custody_fails() {
        let transfers = InMemoryTransfers::new();
        let Err(e) = transfers.transfer_out(asset(1), account(2), Amount::new(1)) else {
            panic!("expected Err");
        };
        assert_eq!(e, TransferError::InsufficientBalance);
    }

    #[test]
    fn assets_are_isolated() {
        let transfers = InMemoryTransfers::new();
        transfers.seed(asset(1), account(1), Amount::new(100));
        let Ok(()) = transfers.transfer_in(asset(1), account(1), Amount::new(100)) else {
            panic!("expected Ok");
        };
        assert_eq!(transfers.custody_of(asset(2)), Amount::ZERO);
        assert_eq!(transfers.balance_of(asset(2), account(1)), Amount::ZERO);
    }

    #[test]
    fn zero_transfer_is_a_no_op_success() {
        let transfers = InMemoryTransfers::new();
        let Ok(()) = transfers.transfer_in(asset(1), account(1), Amount::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(transfers.custody_of(asset(1)), Amount::ZERO);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            TransferError::InsufficientBalance.to_string(),
            "insufficient balance for transfer"
        );
        assert_eq!(
            TransferError::Rejected("custody withheld").to_string(),
            "transfer rejected: custody withheld"
        );
    }
}
