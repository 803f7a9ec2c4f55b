//! # Trident Router
//!
//! Multi-pool swap router and pricing engine for hybrid constant-mean
//! market makers.
//!
//! Given a snapshot of liquidity pools, a coin pair, and a trade amount,
//! the router discovers every viable multi-hop route, splits the trade
//! across them to minimize price impact, and returns a deterministic
//! [`CompleteTradeRoute`](router::CompleteTradeRoute) describing exactly
//! how much flows through which pool.
//!
//! Pools price swaps on a hybrid curve: a flatness parameter
//! interpolates between a Balancer-style weighted product (`0`) and a
//! StableSwap-style constant sum (`1`), with per-coin weights and
//! directional fees. The general curve has no closed form for a single
//! unknown balance, so quoting solves the invariant numerically.
//!
//! # Quick Start
//!
//! ```rust
//! use trident_router::prelude::*;
//!
//! # fn main() -> trident_router::error::Result<()> {
//! // 1. Describe the pools.
//! let sui = CoinId::from_bytes([1u8; 32]);
//! let usdc = CoinId::from_bytes([2u8; 32]);
//! let weight = Fraction::from_f64(0.5)?;
//! let fee = Fraction::from_f64(0.003)?; // 0.30%
//! let pool = Pool::new(
//!     [
//!         (sui, CoinState::new(Amount::new(1_000_000_000_000), weight, fee, fee)?),
//!         (usdc, CoinState::new(Amount::new(1_000_000_000_000), weight, fee, fee)?),
//!     ],
//!     Fraction::ZERO, // pure weighted-product curve
//!     Amount::new(1_000_000_000),
//! )?;
//! let snapshot = PoolSnapshot::from_pools(vec![pool])?;
//!
//! // 2. Quote a trade.
//! let router = Router::new(RouterConfig::default())?;
//! let spec = TradeSpec::given_in(Amount::new(1_000_000))?;
//! let quote = router.complete_route(&snapshot, sui, usdc, spec)?;
//!
//! assert_eq!(quote.input().amount(), Amount::new(1_000_000));
//! assert!(!quote.output().amount().is_zero());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Snapshot    │  PoolSnapshot: caller's pools, never mutated
//! └──────┬───────┘
//!        │ CoinGraph::build
//!        ▼
//! ┌──────────────┐
//! │    Graph      │  coin adjacency with per-edge pool sets
//! └──────┬───────┘
//!        │ route discovery (bounded hop count)
//!        ▼
//! ┌──────────────┐
//! │   Splitter    │  slice-by-slice allocation across candidates
//! └──────┬───────┘
//!        │ chosen allocations
//!        ▼
//! ┌──────────────┐
//! │  Finalizer    │  deterministic replay against the original snapshot
//! └──────┬───────┘
//!        ▼
//!   CompleteTradeRoute
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`CoinId`](domain::CoinId), [`Fraction`](domain::Fraction), [`TradeSpec`](domain::TradeSpec) |
//! | [`math`] | The hybrid invariant and its Newton balance solver |
//! | [`pool`] | [`Pool`](pool::Pool) state, single-pool quoting, [`PoolSnapshot`](pool::PoolSnapshot) |
//! | [`graph`] | [`CoinGraph`](graph::CoinGraph) adjacency derived from a snapshot |
//! | [`router`] | [`Router`](router::Router) pipeline and result types |
//! | [`error`] | [`RouterError`](error::RouterError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types |

pub mod domain;
pub mod error;
pub mod graph;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod router;

#[cfg(test)]
mod proptest_properties;
