//! Route result types returned to callers.
//!
//! The hierarchy mirrors execution structure: a [`TradePath`] is one swap
//! through one pool, a [`TradeRoute`] chains paths coin-to-coin, and a
//! [`CompleteTradeRoute`] aggregates parallel routes that together fill
//! the requested trade. All types are plain immutable data; the router
//! builds them during finalization and callers only read them.

use crate::domain::{Amount, CoinId, PoolId};

// ---------------------------------------------------------------------------
// CoinSide
// ---------------------------------------------------------------------------

/// One side of a swap: a coin, the amount moved, and the fee retained on
/// that side (denominated in the same coin).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoinSide {
    coin: CoinId,
    amount: Amount,
    fee: Amount,
}

impl CoinSide {
    pub(crate) const fn new(coin: CoinId, amount: Amount, fee: Amount) -> Self {
        Self { coin, amount, fee }
    }

    /// The coin moved on this side.
    #[must_use]
    pub const fn coin(&self) -> CoinId {
        self.coin
    }

    /// Amount moved, gross of fees on the in side and net on the out
    /// side.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Fee retained by the pool on this side.
    #[must_use]
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

// ---------------------------------------------------------------------------
// TradePath
// ---------------------------------------------------------------------------

/// A single swap through a single pool.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradePath {
    pool: PoolId,
    input: CoinSide,
    output: CoinSide,
    spot_price: f64,
}

impl TradePath {
    pub(crate) const fn new(
        pool: PoolId,
        input: CoinSide,
        output: CoinSide,
        spot_price: f64,
    ) -> Self {
        Self {
            pool,
            input,
            output,
            spot_price,
        }
    }

    /// Pool the swap executes against.
    #[must_use]
    pub const fn pool(&self) -> PoolId {
        self.pool
    }

    /// The in side of the swap.
    #[must_use]
    pub const fn input(&self) -> &CoinSide {
        &self.input
    }

    /// The out side of the swap.
    #[must_use]
    pub const fn output(&self) -> &CoinSide {
        &self.output
    }

    /// Pre-trade spot price of the out coin in in-coin units.
    #[must_use]
    pub const fn spot_price(&self) -> f64 {
        self.spot_price
    }
}

// ---------------------------------------------------------------------------
// TradeRoute
// ---------------------------------------------------------------------------

/// A chain of paths where each hop's output coin feeds the next hop's
/// input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeRoute {
    paths: Vec<TradePath>,
    input: CoinSide,
    output: CoinSide,
    spot_price: f64,
}

impl TradeRoute {
    /// Builds a route from its hop sequence. The route-level sides come
    /// from the first hop's input and the last hop's output, and the
    /// route spot price is the product of hop spot prices.
    pub(crate) fn from_paths(paths: Vec<TradePath>) -> Option<Self> {
        let first = paths.first()?;
        let last = paths.last()?;
        let input = *first.input();
        let output = *last.output();
        let spot_price = paths.iter().map(TradePath::spot_price).product();
        Some(Self {
            paths,
            input,
            output,
            spot_price,
        })
    }

    /// The hop sequence, in execution order.
    #[must_use]
    pub fn paths(&self) -> &[TradePath] {
        &self.paths
    }

    /// The route's overall in side.
    #[must_use]
    pub const fn input(&self) -> &CoinSide {
        &self.input
    }

    /// The route's overall out side.
    #[must_use]
    pub const fn output(&self) -> &CoinSide {
        &self.output
    }

    /// Composed spot price across every hop.
    #[must_use]
    pub const fn spot_price(&self) -> f64 {
        self.spot_price
    }

    /// Number of pool hops.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.paths.len()
    }
}

// ---------------------------------------------------------------------------
// CompleteTradeRoute
// ---------------------------------------------------------------------------

/// The router's final answer: parallel routes whose inputs sum to the
/// aggregate input and whose outputs sum to the aggregate output.
///
/// An empty route list with a zero out side is the "cannot trade" answer
/// for a pair with no usable liquidity; it is an ordinary value, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompleteTradeRoute {
    routes: Vec<TradeRoute>,
    input: CoinSide,
    output: CoinSide,
    spot_price: f64,
}

impl CompleteTradeRoute {
    pub(crate) const fn new(
        routes: Vec<TradeRoute>,
        input: CoinSide,
        output: CoinSide,
        spot_price: f64,
    ) -> Self {
        Self {
            routes,
            input,
            output,
            spot_price,
        }
    }

    /// The parallel routes, in commit order.
    #[must_use]
    pub fn routes(&self) -> &[TradeRoute] {
        &self.routes
    }

    /// Aggregate in side across every route.
    #[must_use]
    pub const fn input(&self) -> &CoinSide {
        &self.input
    }

    /// Aggregate out side across every route.
    #[must_use]
    pub const fn output(&self) -> &CoinSide {
        &self.output
    }

    /// Volume-weighted spot price across the routes.
    #[must_use]
    pub const fn spot_price(&self) -> f64 {
        self.spot_price
    }

    /// Total pool hops across every route.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.routes.iter().map(TradeRoute::hop_count).sum()
    }

    /// Relative gap between the executed price and the volume-weighted
    /// spot price, as a fraction. Zero when the trade is empty or spot
    /// is unavailable.
    #[must_use]
    pub fn slippage_vs_spot(&self) -> f64 {
        if self.output.amount().is_zero() || self.spot_price <= 0.0 {
            return 0.0;
        }
        let executed = self.input.amount().as_f64() / self.output.amount().as_f64();
        executed / self.spot_price - 1.0
    }
}
