//! Numeric core: the hybrid invariant and its balance solver.
//!
//! Everything here works in plain `f64` units; the domain layer owns the
//! conversions to and from integer [`Amount`](crate::domain::Amount)s.

pub mod invariant;
pub mod newton;

pub use invariant::{invariant, weighted_product_sum};
pub use newton::{solve_balance, NewtonConfig};
