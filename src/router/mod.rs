//! The routing pipeline: discovery, splitting, finalization.
//!
//! [`Router`] is a thin, stateless orchestrator. Each call to
//! [`Router::complete_route`] builds a fresh coin graph from the caller's
//! snapshot, enumerates candidate routes, allocates the trade across them
//! slice by slice, and replays the winning allocations against the
//! untouched snapshot for a deterministic final quote. The caller's
//! snapshot is never mutated, so independent quotes may run in parallel
//! on clones or shared references alike.

pub mod config;
mod finalizer;
mod finder;
pub mod route;
mod splitter;

pub use config::{PruningPolicy, RouterConfig};
pub use route::{CoinSide, CompleteTradeRoute, TradePath, TradeRoute};

use tracing::{debug, info_span};

use crate::domain::{CoinId, TradeSpec};
use crate::error::{Result, RouterError};
use crate::graph::CoinGraph;
use crate::pool::PoolSnapshot;

/// Multi-pool swap router.
///
/// # Examples
///
/// ```
/// use trident_router::domain::{Amount, CoinId, Fraction, TradeSpec};
/// use trident_router::pool::{CoinState, Pool, PoolSnapshot};
/// use trident_router::router::{Router, RouterConfig};
///
/// # fn main() -> trident_router::error::Result<()> {
/// let sui = CoinId::from_bytes([1; 32]);
/// let usdc = CoinId::from_bytes([2; 32]);
/// let weight = Fraction::from_f64(0.5)?;
/// let fee = Fraction::from_f64(0.003)?;
/// let pool = Pool::new(
///     [
///         (sui, CoinState::new(Amount::new(1_000_000_000), weight, fee, fee)?),
///         (usdc, CoinState::new(Amount::new(2_000_000_000), weight, fee, fee)?),
///     ],
///     Fraction::ZERO,
///     Amount::new(1_000_000_000),
/// )?;
/// let snapshot = PoolSnapshot::from_pools(vec![pool])?;
///
/// let router = Router::new(RouterConfig::default())?;
/// let spec = TradeSpec::given_in(Amount::new(1_000_000))?;
/// let quote = router.complete_route(&snapshot, sui, usdc, spec)?;
/// assert!(!quote.output().amount().is_zero());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    /// Creates a router with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] if the configuration
    /// fails validation.
    pub fn new(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Quotes a trade across every viable route, using the configured
    /// route length limit.
    ///
    /// A tradeable pair yields routes whose amounts sum to the aggregate
    /// sides; a pair with no usable liquidity yields an empty route list
    /// with a zero computed side, which is an answer rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoLiquidity`] for an empty snapshot and
    /// [`RouterError::SameCoin`] when both sides name the same coin;
    /// numerical failures from the balance solver propagate unchanged.
    pub fn complete_route(
        &self,
        snapshot: &PoolSnapshot,
        coin_in: CoinId,
        coin_out: CoinId,
        spec: TradeSpec,
    ) -> Result<CompleteTradeRoute> {
        self.complete_route_with_length(snapshot, coin_in, coin_out, spec, None)
    }

    /// Same as [`Router::complete_route`] with a per-call override of the
    /// maximum route length.
    ///
    /// # Errors
    ///
    /// Same as [`Router::complete_route`]; a zero override is an
    /// [`RouterError::InvalidConfiguration`].
    pub fn complete_route_with_length(
        &self,
        snapshot: &PoolSnapshot,
        coin_in: CoinId,
        coin_out: CoinId,
        spec: TradeSpec,
        max_route_length: Option<usize>,
    ) -> Result<CompleteTradeRoute> {
        if snapshot.is_empty() {
            return Err(RouterError::NoLiquidity);
        }
        if coin_in == coin_out {
            return Err(RouterError::SameCoin);
        }
        let max_route_length = match max_route_length {
            Some(0) => {
                return Err(RouterError::InvalidConfiguration(
                    "max_route_length override must be positive",
                ))
            }
            Some(length) => length,
            None => self.config.max_route_length,
        };

        let span = info_span!("complete_route", %coin_in, %coin_out, %spec);
        let _guard = span.enter();

        let graph = CoinGraph::build(snapshot);
        let candidates = finder::find_routes(&graph, &coin_in, &coin_out, max_route_length);
        if candidates.is_empty() {
            debug!("no route within hop limit");
            return Ok(finalizer::empty_complete_route(coin_in, coin_out, spec));
        }

        let chosen = splitter::split_trade(snapshot, &candidates, spec, &self.config)?;
        finalizer::finalize(
            snapshot,
            &chosen,
            coin_in,
            coin_out,
            spec,
            &self.config.newton,
        )
    }
}
