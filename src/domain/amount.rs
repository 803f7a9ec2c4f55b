//! Raw token amount with checked arithmetic.

use core::fmt;

use crate::error::RouterError;

/// A raw token amount in the smallest on-chain unit.
///
/// `Amount` never interprets decimals — converting to human-readable units
/// is the concern of whatever metadata service sits outside the engine.
/// All `u128` values are valid amounts.
///
/// Arithmetic methods are checked: they return `None` on overflow or
/// underflow instead of panicking. The float bridge ([`as_f64`] /
/// [`try_from_f64`]) exists because the invariant engine computes in IEEE
/// 754 doubles; values above 2⁵³ lose precision on the way through, which
/// is acceptable for an off-chain estimator.
///
/// [`as_f64`]: Amount::as_f64
/// [`try_from_f64`]: Amount::try_from_f64
///
/// # Examples
///
/// ```
/// use trident_router::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_sub(&a), Some(Amount::new(100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Converts to `f64` for the invariant engine.
    ///
    /// Values above 2⁵³ lose precision because `f64` has a 53-bit mantissa.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let v = self.0 as f64;
        v
    }

    /// Converts a solver result back to an integer amount, truncating
    /// toward zero. Negative inputs clamp to zero.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NonFinite`] if `value` is NaN or infinite.
    pub fn try_from_f64(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() {
            return Err(RouterError::NonFinite("amount conversion from f64"));
        }
        if value <= 0.0 {
            return Ok(Self::ZERO);
        }
        #[allow(clippy::cast_precision_loss)]
        let max = u128::MAX as f64;
        if value >= max {
            return Err(RouterError::InvalidAmount(
                "f64 value exceeds the representable amount range",
            ));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = value as u128;
        Ok(Self(v))
    }

    /// Like [`try_from_f64`](Self::try_from_f64) but rounding up, used where
    /// under-estimating would short-change the pool (amount-in quotes).
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NonFinite`] if `value` is NaN or infinite.
    pub fn try_from_f64_ceil(value: f64) -> crate::error::Result<Self> {
        Self::try_from_f64(value.ceil())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
