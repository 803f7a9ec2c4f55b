//! Fundamental domain value types used throughout the router.
//!
//! This module contains the core value types that model the routing domain:
//! raw amounts, fixed-point fractions, coin identities, pool ids, and trade
//! specifications. All types use newtypes with validated constructors to
//! enforce invariants at the boundary, so the pricing and routing code can
//! assume well-formed values.

mod amount;
mod coin;
mod fraction;
mod pool_id;
mod trade;

pub use amount::Amount;
pub use coin::{CoinId, CoinKind};
pub use fraction::Fraction;
pub use pool_id::PoolId;
pub use trade::TradeSpec;
