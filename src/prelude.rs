//! Convenience re-exports for common types.
//!
//! A single import brings the routing surface into scope:
//!
//! ```rust
//! use trident_router::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{Amount, CoinId, CoinKind, Fraction, PoolId, TradeSpec};

// Re-export pool state and quoting
pub use crate::pool::{CoinState, Pool, PoolSnapshot, PoolSwapQuote};

// Re-export the graph
pub use crate::graph::CoinGraph;

// Re-export the routing pipeline
pub use crate::router::{
    CoinSide, CompleteTradeRoute, PruningPolicy, Router, RouterConfig, TradePath, TradeRoute,
};

// Re-export solver tuning and errors
pub use crate::error::{Result, RouterError};
pub use crate::math::NewtonConfig;
