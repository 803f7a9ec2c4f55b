//! The hybrid CMMM invariant.
//!
//! A pool's curve interpolates between a weighted product (Balancer style)
//! and a pure sum (StableSwap style) through the flatness parameter `A`:
//!
//! ```text
//! prod = Π balanceᵢ ^ weightᵢ          (computed as exp(Σ wᵢ·ln bᵢ))
//! sum  = Σ weightᵢ · balanceᵢ
//! h    = (√(prod·(prod·(A² + 4·(1−A)) + 8·A·sum)) − A·prod) / 2
//! ```
//!
//! `A = 0` collapses to `h = prod` (pure weighted product); `A = 1` at a
//! balanced pool collapses to `h = sum` behaviour (pure sum). The general
//! hybrid curve has no closed form for a single unknown balance, which is
//! why quoting solves `h` numerically (see [`newton`](super::newton))
//! instead of per-coin analytic inversion.

use crate::error::{Result, RouterError};

/// Computes the weighted product and weighted sum of a balance set.
///
/// `terms` yields `(weight, balance)` pairs in plain `f64` units. The
/// product is accumulated in log space to avoid overflow for large pools.
/// A zero balance makes the product zero (its log contribution is `−∞`,
/// and `exp(−∞) = 0`), which downstream code treats as "no liquidity".
pub fn weighted_product_sum(terms: impl Iterator<Item = (f64, f64)>) -> (f64, f64) {
    let mut log_prod = 0.0_f64;
    let mut sum = 0.0_f64;
    let mut any_zero = false;
    for (weight, balance) in terms {
        if balance <= 0.0 {
            any_zero = true;
            continue;
        }
        log_prod += weight * balance.ln();
        sum += weight * balance;
    }
    let prod = if any_zero { 0.0 } else { log_prod.exp() };
    (prod, sum)
}

/// Evaluates the invariant `h` for the given flatness, product, and sum.
///
/// # Errors
///
/// Returns [`RouterError::NonFinite`] if the closed form leaves the finite
/// range (possible only for pathological inputs such as overflowing
/// products).
pub fn invariant(flatness: f64, prod: f64, sum: f64) -> Result<f64> {
    let a = flatness;
    let inner = prod * (prod * (a * a + 4.0 * (1.0 - a)) + 8.0 * a * sum);
    let h = (inner.sqrt() - a * prod) / 2.0;
    if h.is_finite() {
        Ok(h)
    } else {
        Err(RouterError::NonFinite("invariant evaluation"))
    }
}
