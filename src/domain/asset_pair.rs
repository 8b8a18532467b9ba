//! Ordered pair of distinct pool assets.

use super::AssetId;
use crate::error::PoolError;

/// The two assets of a pool, in construction order.
///
/// Unlike canonically-sorted pair types, `AssetPair` preserves the order it
/// was built with: asset A is the base of the quoted price
/// (`reserveB / reserveA`) and the direction reported in swap events, so
/// swapping the slots would change meaning, not just representation.
///
/// Both identifiers must be distinct and non-null.
///
/// # Examples
///
/// ```
/// use pairpool::domain::{AssetId, AssetPair};
///
/// let a = AssetId::from_bytes([2u8; 32]);
/// let b = AssetId::from_bytes([1u8; 32]);
/// let pair = AssetPair::new(a, b).expect("distinct assets");
/// // Construction order is preserved even though `b < a`.
/// assert_eq!(pair.asset_a(), a);
/// assert_eq!(pair.asset_b(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a new `AssetPair` with the given slot order.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidAsset`] if the identifiers are equal or
    /// either is the null identifier.
    pub fn new(asset_a: AssetId, asset_b: AssetId) -> Result<Self, PoolError> {
        if asset_a.is_zero() || asset_b.is_zero() {
            return Err(PoolError::InvalidAsset("pool asset id must be non-null"));
        }
        if asset_a == asset_b {
            return Err(PoolError::InvalidAsset("pool assets must be distinct"));
        }
        Ok(Self { asset_a, asset_b })
    }

    /// Returns asset A, the base of the quoted price.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Returns asset B, the quote asset.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Returns `true` if `asset` is one of the two pool assets.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns the counterpart of `asset` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidAsset`] if `asset` is not in the pair.
    pub fn other(&self, asset: &AssetId) -> Result<AssetId, PoolError> {
        if *asset == self.asset_a {
            Ok(self.asset_b)
        } else if *asset == self.asset_b {
            Ok(self.asset_a)
        } else {
            Err(PoolError::InvalidAsset("asset is not part of this pool"))
        }
    }
}
