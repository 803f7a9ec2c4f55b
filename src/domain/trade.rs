//! Trade specification: which side of the trade is fixed.

use core::fmt;

use super::Amount;
use crate::error::RouterError;

/// Specifies what constraint drives a trade: either an exact amount the
/// caller supplies (`GivenIn`) or an exact amount the caller wants to
/// receive (`GivenOut`).
///
/// The whole pipeline reasons over forward-oriented routes; a `GivenOut`
/// trade walks each route's hops back to front through exact-output
/// quotes rather than duplicating the search and splitting logic per
/// direction.
///
/// # Invariants
///
/// The contained amount is always non-zero.
///
/// # Examples
///
/// ```
/// use trident_router::domain::{Amount, TradeSpec};
///
/// let spec = TradeSpec::given_in(Amount::new(1_000));
/// assert!(spec.is_ok());
/// assert!(TradeSpec::given_in(Amount::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeSpec {
    /// The caller fixes the amount supplied; output is computed.
    GivenIn {
        /// The fixed input amount (always non-zero).
        amount: Amount,
    },
    /// The caller fixes the amount desired; input is computed.
    GivenOut {
        /// The desired output amount (always non-zero).
        amount: Amount,
    },
}

impl TradeSpec {
    /// Creates a given-amount-in trade specification.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidAmount`] if `amount` is zero.
    pub const fn given_in(amount: Amount) -> crate::error::Result<Self> {
        if amount.is_zero() {
            return Err(RouterError::InvalidAmount("trade amount must be non-zero"));
        }
        Ok(Self::GivenIn { amount })
    }

    /// Creates a given-amount-out trade specification.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidAmount`] if `amount` is zero.
    pub const fn given_out(amount: Amount) -> crate::error::Result<Self> {
        if amount.is_zero() {
            return Err(RouterError::InvalidAmount("trade amount must be non-zero"));
        }
        Ok(Self::GivenOut { amount })
    }

    /// Returns `true` for a given-amount-in specification.
    #[must_use]
    pub const fn is_given_in(&self) -> bool {
        matches!(self, Self::GivenIn { .. })
    }

    /// Extracts the driving amount regardless of variant.
    pub const fn amount(&self) -> Amount {
        match self {
            Self::GivenIn { amount } | Self::GivenOut { amount } => *amount,
        }
    }
}

impl fmt::Display for TradeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GivenIn { amount } => write!(f, "given-in {amount}"),
            Self::GivenOut { amount } => write!(f, "given-out {amount}"),
        }
    }
}
