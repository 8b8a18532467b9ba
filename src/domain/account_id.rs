//! Opaque account identifier.

use core::fmt;

/// An opaque identifier for an account holding liquidity shares or trading
/// against the pool.
///
/// Wraps a fixed-size `[u8; 32]` byte array; the engine never interprets
/// the bytes beyond equality and hashing, so any addressing scheme of the
/// embedding application fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

/// Full lowercase hex with a `0x` prefix, for logs and events.
impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
