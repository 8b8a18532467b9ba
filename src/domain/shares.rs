//! Liquidity share quantity newtype.

use core::fmt;

/// A count of liquidity shares, the unit of proportional pool ownership.
///
/// Shares are minted on deposit and burned on redemption. Like
/// [`Amount`](super::Amount), the wrapper is `u128` with checked `Option`
/// arithmetic; share pricing (square roots, proportional mints) lives in
/// [`crate::math`] and the engine, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Shares(u128);

impl Shares {
    /// Zero shares.
    pub const ZERO: Self = Self(0);

    /// The largest representable share count.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128` share count.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the count is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` if `other` exceeds `self`.
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
