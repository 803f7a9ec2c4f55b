//! Fixed-point fractions for weights, fees, and curve flatness.

use core::fmt;

use crate::error::RouterError;

/// Scale factor: one whole unit expressed in raw fixed-point ticks.
const SCALE: u64 = 1_000_000_000_000_000_000;

/// A non-negative fixed-point fraction scaled by 10¹⁸.
///
/// Used for three pool parameters with different valid ranges, all
/// enforced at the site that cares:
///
/// | Parameter | Range | Enforced by |
/// |-----------|-------|-------------|
/// | coin weight | `(0, 1]` | `CoinState` construction |
/// | trade fee | `[0, 1)`, `>= 1` means *pair disabled* | quote functions |
/// | flatness | `[0, 1]` | `Pool` construction |
///
/// A fee of one-or-more is deliberately representable: on-chain pools
/// disable a trade direction by setting the fee to 100 %, and the engine
/// must recognise that state rather than reject the snapshot.
///
/// # Examples
///
/// ```
/// use trident_router::domain::Fraction;
///
/// let half = Fraction::from_f64(0.5).expect("valid fraction");
/// assert!((half.as_f64() - 0.5).abs() < 1e-15);
/// assert!(!half.is_at_least_one());
/// assert!(Fraction::ONE.is_at_least_one());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Fraction(u64);

impl Fraction {
    /// The zero fraction.
    pub const ZERO: Self = Self(0);

    /// Exactly one (100 %).
    pub const ONE: Self = Self(SCALE);

    /// Creates a fraction from raw 10¹⁸-scaled ticks.
    ///
    /// Infallible: snapshots arrive with raw fixed-point values and every
    /// `u64` is representable. Range policing happens at the use site.
    pub const fn from_scaled(raw: u64) -> Self {
        Self(raw)
    }

    /// Creates a fraction from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidFraction`] if `value` is negative,
    /// NaN, infinite, or too large for the fixed-point range.
    pub fn from_f64(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(RouterError::InvalidFraction(
                "fraction must be finite and non-negative",
            ));
        }
        #[allow(clippy::cast_precision_loss)]
        let scaled = value * SCALE as f64;
        #[allow(clippy::cast_precision_loss)]
        let max = u64::MAX as f64;
        if scaled >= max {
            return Err(RouterError::InvalidFraction(
                "fraction exceeds the fixed-point range",
            ));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let raw = scaled as u64;
        Ok(Self(raw))
    }

    /// Returns the raw 10¹⁸-scaled value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the fraction is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the fraction is `>= 1`.
    ///
    /// For a trade fee this means the pair side is disabled.
    #[must_use]
    pub const fn is_at_least_one(&self) -> bool {
        self.0 >= SCALE
    }

    /// Returns `true` if the fraction lies in `(0, 1]` — the valid range
    /// for a coin weight.
    #[must_use]
    pub const fn is_valid_weight(&self) -> bool {
        self.0 > 0 && self.0 <= SCALE
    }

    /// Returns `true` if the fraction lies in `[0, 1]` — the valid range
    /// for the flatness parameter.
    #[must_use]
    pub const fn is_valid_flatness(&self) -> bool {
        self.0 <= SCALE
    }

    /// Converts to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let v = self.0 as f64 / SCALE as f64;
        v
    }

    /// Returns `1 - self`, saturating at zero.
    ///
    /// Used for the `(1 − fee)` factors in quote math.
    pub const fn complement(&self) -> Self {
        Self(SCALE.saturating_sub(self.0))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}
