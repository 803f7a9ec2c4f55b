//! Pools, their coin records, and single-pool swap quoting.

pub mod quote;
pub mod state;

pub use quote::PoolSwapQuote;
pub use state::{CoinState, Pool, PoolSnapshot};
