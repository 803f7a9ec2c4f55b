//! Coin identity and classification.

use core::fmt;

use super::PoolId;

/// A chain-agnostic, opaque coin-type identifier.
///
/// Wraps a fixed-size `[u8; 32]` digest of the coin's on-chain type. All
/// 32-byte sequences are valid identifiers, so construction is infallible.
/// Ordering is lexicographic, which gives the graph and the whole routing
/// pipeline a deterministic iteration order.
///
/// # Examples
///
/// ```
/// use trident_router::domain::CoinId;
///
/// let sui = CoinId::from_bytes([1u8; 32]);
/// assert_eq!(sui.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoinId([u8; 32]);

impl CoinId {
    /// Creates a `CoinId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero identifier.
    ///
    /// Useful as a sentinel or placeholder value; use sparingly.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl fmt::Display for CoinId {
    /// Short hex form: first four bytes, `..`-elided.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}..",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Classification of a coin inside a pool snapshot.
///
/// Decided once when the snapshot is loaded, never re-derived from type
/// formatting conventions at use time. LP coins are bookkeeping shares of a
/// pool and are excluded from the route graph: trading into an LP coin is a
/// deposit, not a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoinKind {
    /// An ordinary tradeable coin.
    #[default]
    Plain,
    /// The liquidity-provider share coin minted by a pool.
    PoolLp {
        /// The pool whose shares this coin represents.
        pool: PoolId,
    },
}

impl CoinKind {
    /// Returns `true` for an LP share coin.
    #[must_use]
    pub const fn is_lp(&self) -> bool {
        matches!(self, Self::PoolLp { .. })
    }
}
