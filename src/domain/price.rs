//! Fixed-point instantaneous price.

use core::fmt;

/// An instantaneous pool price as a 10^18-scaled unsigned integer.
///
/// The value is `floor(reserveB * SCALE / reserveA)`: how many quote-asset
/// units one base-asset unit buys at the current reserves, with eighteen
/// decimal places of resolution. The scale matches the wad convention of
/// on-chain fixed-point math.
///
/// `Price` is a plain value; the widened-division construction lives in
/// the engine so this type stays dependency-free.
///
/// # Examples
///
/// ```
/// use pairpool::domain::Price;
///
/// let two = Price::from_scaled(2 * Price::SCALE);
/// assert_eq!(two.to_string(), "2");
///
/// let half = Price::from_scaled(Price::SCALE / 2);
/// assert_eq!(half.to_string(), "0.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use]
pub struct Price(u128);

impl Price {
    /// Fixed-point scale: one whole unit is `10^18`.
    pub const SCALE: u128 = 1_000_000_000_000_000_000;

    /// The price `1.0`.
    pub const ONE: Self = Self(Self::SCALE);

    /// Wraps an already-scaled raw value.
    pub const fn from_scaled(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw 10^18-scaled value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the price is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Decimal rendering with trailing zeros trimmed, e.g. `1.25`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::SCALE;
        let frac = self.0 % Self::SCALE;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{frac:018}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}
