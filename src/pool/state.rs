//! Pool state: per-coin records, pools, and the snapshot arena.
//!
//! A [`Pool`] holds two or more coins on a shared hybrid curve. Pools are
//! value types; the router works on a [`PoolSnapshot`], a plain vector of
//! pools addressed by [`PoolId`], so that candidate evaluation can clone
//! and mutate freely without touching the caller's state.

use std::collections::BTreeMap;

use tracing::warn;

use crate::domain::{Amount, CoinId, CoinKind, Fraction, PoolId};
use crate::error::{Result, RouterError};

/// Tolerance when checking whether pool weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// CoinState
// ---------------------------------------------------------------------------

/// One coin's record inside a pool.
///
/// Fees are directional: `trade_fee_in` applies when this coin enters the
/// pool, `trade_fee_out` when it leaves. A fee of one or more disables
/// trading through that side entirely (quotes return zero rather than
/// fail).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoinState {
    balance: Amount,
    weight: Fraction,
    trade_fee_in: Fraction,
    trade_fee_out: Fraction,
    kind: CoinKind,
}

impl CoinState {
    /// Creates a coin record with kind [`CoinKind::Plain`].
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidFraction`] if the weight is outside
    /// `(0, 1]`.
    pub fn new(
        balance: Amount,
        weight: Fraction,
        trade_fee_in: Fraction,
        trade_fee_out: Fraction,
    ) -> Result<Self> {
        if !weight.is_valid_weight() {
            return Err(RouterError::InvalidFraction(
                "coin weight must be in (0, 1]",
            ));
        }
        Ok(Self {
            balance,
            weight,
            trade_fee_in,
            trade_fee_out,
            kind: CoinKind::Plain,
        })
    }

    /// Replaces the coin kind, marking LP shares of another pool.
    #[must_use]
    pub const fn with_kind(mut self, kind: CoinKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> Amount {
        self.balance
    }

    /// Returns the normalized weight.
    #[must_use]
    pub const fn weight(&self) -> Fraction {
        self.weight
    }

    /// Returns the fee charged when this coin enters the pool.
    #[must_use]
    pub const fn trade_fee_in(&self) -> Fraction {
        self.trade_fee_in
    }

    /// Returns the fee charged when this coin leaves the pool.
    #[must_use]
    pub const fn trade_fee_out(&self) -> Fraction {
        self.trade_fee_out
    }

    /// Returns the coin kind.
    #[must_use]
    pub const fn kind(&self) -> CoinKind {
        self.kind
    }

    /// True when either directional fee is at or above one.
    ///
    /// Coarse filter: quoting only checks the fee charged on the
    /// requested direction, so a coin flagged here may still be
    /// tradeable the other way.
    #[must_use]
    pub fn is_fee_disabled(&self) -> bool {
        self.trade_fee_in.is_at_least_one() || self.trade_fee_out.is_at_least_one()
    }

    pub(crate) fn set_balance(&mut self, balance: Amount) {
        self.balance = balance;
    }
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// A constant-mean market-maker pool over two or more coins.
///
/// The flatness parameter interpolates the curve between a weighted
/// product (`0`) and a constant sum (`1`); the `math` module holds the
/// closed form.
///
/// Coins are keyed by [`CoinId`] in a `BTreeMap` so that iteration order,
/// and with it every floating-point accumulation downstream, is fully
/// deterministic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    coins: BTreeMap<CoinId, CoinState>,
    flatness: Fraction,
    lp_supply: Amount,
}

impl Pool {
    /// Builds a pool from its coin records.
    ///
    /// Denormalized weights (not summing to one) are tolerated with a
    /// warning; the invariant math assumes normalization, so quotes
    /// against such a pool are best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MalformedPool`] if fewer than two coins are
    /// given or a coin id repeats, and [`RouterError::InvalidFraction`]
    /// if the flatness is outside `[0, 1]`.
    pub fn new(
        coins: impl IntoIterator<Item = (CoinId, CoinState)>,
        flatness: Fraction,
        lp_supply: Amount,
    ) -> Result<Self> {
        if !flatness.is_valid_flatness() {
            return Err(RouterError::InvalidFraction(
                "pool flatness must be in [0, 1]",
            ));
        }
        let mut map = BTreeMap::new();
        let mut weight_sum = 0.0_f64;
        for (id, state) in coins {
            weight_sum += state.weight().as_f64();
            if map.insert(id, state).is_some() {
                return Err(RouterError::MalformedPool("duplicate coin id in pool"));
            }
        }
        if map.len() < 2 {
            return Err(RouterError::MalformedPool(
                "pool needs at least two coins",
            ));
        }
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            warn!(weight_sum, "pool weights are denormalized");
        }
        Ok(Self {
            coins: map,
            flatness,
            lp_supply,
        })
    }

    /// Returns the flatness parameter.
    #[must_use]
    pub const fn flatness(&self) -> Fraction {
        self.flatness
    }

    /// Returns the outstanding LP share supply.
    #[must_use]
    pub const fn lp_supply(&self) -> Amount {
        self.lp_supply
    }

    /// Number of coins in the pool.
    #[must_use]
    pub fn coin_count(&self) -> usize {
        self.coins.len()
    }

    /// Iterates the coin records in id order.
    pub fn coins(&self) -> impl Iterator<Item = (&CoinId, &CoinState)> {
        self.coins.iter()
    }

    /// True when the pool holds the given coin.
    #[must_use]
    pub fn contains_coin(&self, coin: &CoinId) -> bool {
        self.coins.contains_key(coin)
    }

    /// Looks up one coin's record.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnknownCoin`] if the pool does not hold the
    /// coin.
    pub fn coin(&self, coin: &CoinId) -> Result<&CoinState> {
        self.coins
            .get(coin)
            .ok_or(RouterError::UnknownCoin(*coin))
    }

    pub(crate) fn coin_mut(&mut self, coin: &CoinId) -> Result<&mut CoinState> {
        self.coins
            .get_mut(coin)
            .ok_or(RouterError::UnknownCoin(*coin))
    }
}

// ---------------------------------------------------------------------------
// PoolSnapshot
// ---------------------------------------------------------------------------

/// An owned, point-in-time view of every pool the router may trade
/// through.
///
/// Pools are addressed by position; [`PoolId`] is an index into the
/// vector. Cloning a snapshot deep-copies every pool, which is what the
/// split optimizer relies on when it evaluates candidate allocations
/// against throwaway copies.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSnapshot {
    pools: Vec<Pool>,
}

impl PoolSnapshot {
    /// Wraps a vector of pools; the position of each pool becomes its
    /// [`PoolId`].
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] when the vector
    /// holds more pools than a [`PoolId`] can address.
    pub fn from_pools(pools: Vec<Pool>) -> Result<Self> {
        if u32::try_from(pools.len()).is_err() {
            return Err(RouterError::InvalidConfiguration(
                "pool count exceeds id range",
            ));
        }
        Ok(Self { pools })
    }

    /// Number of pools in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// True when the snapshot holds no pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Looks up a pool by id.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnknownPool`] for an out-of-range id.
    pub fn pool(&self, id: PoolId) -> Result<&Pool> {
        self.pools.get(id.index()).ok_or(RouterError::UnknownPool(id))
    }

    pub(crate) fn pool_mut(&mut self, id: PoolId) -> Result<&mut Pool> {
        self.pools
            .get_mut(id.index())
            .ok_or(RouterError::UnknownPool(id))
    }

    /// Iterates `(id, pool)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PoolId, &Pool)> {
        self.pools
            .iter()
            .enumerate()
            // from_pools bounds the arena to u32 indices.
            .map(|(i, pool)| (PoolId::new(u32::try_from(i).unwrap_or(u32::MAX)), pool))
    }
}
