//! Widened constant-product arithmetic.
//!
//! Reserves and inputs are `u128`, so any product of two reserve-scale
//! values needs up to 256 bits. Every multiplication here goes through
//! [`U256`] with checked operations; a result that does not fit back into
//! `u128` is reported to callers as
//! [`PoolError::Overflow`](crate::error::PoolError::Overflow), never
//! silently wrapped.
//!
//! All divisions floor. That is a protocol rule, not a convenience:
//! rounding must always favor the pool.

use primitive_types::U256;

use crate::domain::Amount;
use crate::error::{PoolError, Result};

/// Swap fee numerator: the pool prices 997/1000 of the input.
pub const SWAP_FEE_NUMERATOR: u128 = 997;

/// Swap fee denominator.
pub const SWAP_FEE_DENOMINATOR: u128 = 1_000;

/// Narrows a `U256` back to `u128`, `None` if it does not fit.
fn narrow(value: U256) -> Option<u128> {
    if value.bits() <= 128 {
        Some(value.low_u128())
    } else {
        None
    }
}

/// `floor(a * b / d)` with a 256-bit intermediate product.
///
/// Returns `None` if `d` is zero or the quotient exceeds `u128`. Callers
/// map `None` to the error variant that names their context.
pub(crate) fn mul_div_floor(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    let numerator = U256::from(a).checked_mul(U256::from(b))?;
    narrow(numerator / U256::from(d))
}

/// `floor(sqrt(a * b))`, the first-deposit share mint.
///
/// The product of two `u128` values always fits `U256`, and the square
/// root of a 256-bit value always fits `u128`, so this cannot fail.
pub(crate) fn sqrt_product(a: u128, b: u128) -> u128 {
    isqrt_u256(U256::from(a) * U256::from(b))
}

/// Newton's method integer square root over `U256`.
fn isqrt_u256(n: U256) -> u128 {
    if n.is_zero() {
        return 0;
    }
    if n < U256::from(4u8) {
        return 1;
    }
    let mut x = n;
    // n/2 + 1 avoids the (n + 1) overflow at U256::MAX and stays >= sqrt(n).
    let mut y = (n >> 1) + U256::one();
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    // floor(sqrt) of a 256-bit value has at most 128 bits.
    x.low_u128()
}

/// Prices an exact-input swap against the given reserves.
///
/// `floor(amountIn * 997 * reserveOut / (reserveIn * 1000 + amountIn * 997))`
///
/// Pure function over caller-supplied values; the engine applies the same
/// formula to its own reserves. A zero result is returned as
/// `Amount::ZERO`; rejecting dust inputs is the engine's job, not the
/// formula's.
///
/// # Errors
///
/// - [`PoolError::InvalidAmount`] if `amount_in` is zero.
/// - [`PoolError::NoLiquidity`] if either reserve is zero.
/// - [`PoolError::Overflow`] if the fee-scaled numerator exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use pairpool::domain::Amount;
/// use pairpool::math::get_amount_out;
///
/// let out = get_amount_out(Amount::new(10), Amount::new(100), Amount::new(200))
///     .expect("funded reserves");
/// assert_eq!(out, Amount::new(18));
/// ```
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(PoolError::InvalidAmount("swap input must be positive"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(PoolError::NoLiquidity);
    }

    let in_with_fee = U256::from(amount_in.get())
        .checked_mul(U256::from(SWAP_FEE_NUMERATOR))
        .ok_or(PoolError::Overflow("fee-scaled input exceeds 256 bits"))?;
    let numerator = in_with_fee
        .checked_mul(U256::from(reserve_out.get()))
        .ok_or(PoolError::Overflow("swap numerator exceeds 256 bits"))?;
    let denominator = U256::from(reserve_in.get())
        .checked_mul(U256::from(SWAP_FEE_DENOMINATOR))
        .and_then(|scaled| scaled.checked_add(in_with_fee))
        .ok_or(PoolError::Overflow("swap denominator exceeds 256 bits"))?;

    // numerator < reserve_out * denominator, so the quotient fits u128.
    narrow(numerator / denominator)
        .map(Amount::new)
        .ok_or(PoolError::Overflow("swap output exceeds u128"))
}
