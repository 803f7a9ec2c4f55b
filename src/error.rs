//! Unified error types for the router library.
//!
//! All fallible operations across the crate return [`RouterError`] as their
//! error type. The taxonomy separates three very different situations:
//!
//! - **Usage errors** — the caller handed the engine something malformed
//!   (same coin on both sides of a quote, an empty pool list, an invalid
//!   fraction). Not retryable; fix the call site.
//! - **Numerical failures** — the invariant solver diverged
//!   ([`RouterError::NewtonDiverged`]) or an intermediate value left the
//!   finite range ([`RouterError::NonFinite`]). These indicate corrupted or
//!   adversarial pool data and are worth logging distinctly.
//! - **No-liquidity outcomes** are *not* errors. A pair with a disabled fee
//!   or a coin pair with no connecting path produces a quote with zero
//!   output, so callers can render "no route available" without
//!   special-casing exceptions.
//!
//! Retrying the same deterministic computation cannot change the outcome,
//! so nothing in this crate retries internally.

use crate::domain::{CoinId, PoolId};

/// Convenience alias used by every fallible function in the crate.
pub type Result<T> = core::result::Result<T, RouterError>;

/// Unified error enum for the router and pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RouterError {
    /// The caller supplied an empty pool list to the router.
    #[error("no pools supplied to the router")]
    NoLiquidity,

    /// `coin_in` and `coin_out` refer to the same coin.
    #[error("coin_in and coin_out must be different coins")]
    SameCoin,

    /// A coin id was not found where it was expected.
    #[error("coin {0} is not held by the pool")]
    UnknownCoin(CoinId),

    /// A pool id did not resolve inside the snapshot arena.
    #[error("pool id {0} is out of range for this snapshot")]
    UnknownPool(PoolId),

    /// A pool failed structural validation at construction time.
    #[error("malformed pool: {0}")]
    MalformedPool(&'static str),

    /// A fixed-point fraction was out of its valid range.
    #[error("invalid fraction: {0}")]
    InvalidFraction(&'static str),

    /// An amount failed validation or conversion.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// A router configuration value was out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Newton's method exhausted its attempt budget without converging.
    #[error("newton solver diverged after {restarts} seed restarts")]
    NewtonDiverged {
        /// Seed restarts consumed before the solver gave up.
        restarts: u32,
    },

    /// An intermediate computation produced a non-finite value.
    #[error("non-finite intermediate value: {0}")]
    NonFinite(&'static str),
}
