//! Newton–Raphson solver for the unknown balance on the hybrid curve.
//!
//! Quoting a swap fixes every balance except one (the out-coin for
//! given-in, the in-coin for given-out) and asks which value of the
//! unknown balance `x` restores the invariant `h`. Substituting
//! `prod = p0·x^w` and `sum = s0 + w·x` into the invariant definition and
//! clearing the square root yields the residual polynomial in `x^w`:
//!
//! ```text
//! f(x) = (1−A)·p0²·x^{2w} + 2·A·p0·x^w·(s0 + w·x) − A·h·p0·x^w − h²
//! ```
//!
//! where `p0` and `s0` are the weighted product and sum over every coin
//! *except* the unknown one (with the known side's balance already
//! updated), `w` is the unknown coin's weight, and `A` the pool flatness.
//! `f` is strictly increasing on `x > 0`, so Newton from a one-sided seed
//! converges quadratically in practice.

use crate::error::{Result, RouterError};

// ---- configuration ----

/// Tuning knobs for the balance solver.
///
/// The defaults are deliberately generous: 255 iterations with a relative
/// tolerance of `1e-9` converges in well under ten steps for realistic
/// pools, and the remaining budget only matters for near-degenerate
/// balances.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonConfig {
    /// Iteration budget per seed attempt.
    pub max_iterations: u32,
    /// Relative convergence threshold, applied as
    /// `|Δx| < tolerance · max(1, |x|)`.
    pub tolerance: f64,
    /// How many times the seed may be halved after a non-finite or
    /// non-positive iterate before giving up.
    pub max_seed_restarts: u32,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 255,
            tolerance: 1e-9,
            max_seed_restarts: 255,
        }
    }
}

impl NewtonConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] if the iteration
    /// budget is zero or the tolerance is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(RouterError::InvalidConfiguration(
                "newton max_iterations must be positive",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(RouterError::InvalidConfiguration(
                "newton tolerance must be a positive finite number",
            ));
        }
        Ok(())
    }
}

// ---- solver ----

/// Solves for the unknown balance `x > 0` satisfying the invariant.
///
/// * `flatness` is the pool's interpolation parameter `A ∈ [0, 1]`.
/// * `weight` is the unknown coin's normalized weight `w ∈ (0, 1]`.
/// * `h` is the invariant value the solution must restore.
/// * `partial_prod` / `partial_sum` are the weighted product and sum over
///   every coin except the unknown one, with the known side of the swap
///   already applied.
/// * `seed` is the starting iterate; callers use the analytic
///   product-curve root `(prod / partial_prod)^{1/w}`, which is exact at
///   `A = 0`.
///
/// On a non-finite or non-positive iterate the attempt is abandoned and
/// the seed restarted at `seed / 2^attempt`, which walks the start point
/// toward zero when the analytic seed badly overshoots a small root.
///
/// # Errors
///
/// Returns [`RouterError::NewtonDiverged`] when every seed attempt
/// exhausts its iteration budget, and [`RouterError::NonFinite`] when the
/// inputs themselves are not finite positive quantities.
pub fn solve_balance(
    flatness: f64,
    weight: f64,
    h: f64,
    partial_prod: f64,
    partial_sum: f64,
    seed: f64,
    config: &NewtonConfig,
) -> Result<f64> {
    if !(seed.is_finite() && seed > 0.0) {
        return Err(RouterError::NonFinite("newton seed"));
    }
    if !(h.is_finite() && partial_prod.is_finite() && partial_sum.is_finite()) {
        return Err(RouterError::NonFinite("newton operands"));
    }

    let a = flatness;
    // Coefficients of the residual, hoisted out of the iteration.
    let coeff_prod = (1.0 - a) * partial_prod * partial_prod;
    let coeff_mix = 2.0 * a * partial_prod;
    let coeff_h = a * h * partial_prod;
    let h_sq = h * h;

    let mut restarts = 0_u32;
    'attempt: loop {
        #[allow(clippy::cast_possible_wrap)]
        let mut x = seed * 0.5_f64.powi(restarts as i32);
        for _ in 0..config.max_iterations {
            let x_w = x.powf(weight);
            let x_2w = x_w * x_w;
            let x_w1 = x_w / x;

            let residual = coeff_prod * x_2w + coeff_mix * x_w * (partial_sum + weight * x)
                - coeff_h * x_w
                - h_sq;
            let derivative = 2.0 * weight * coeff_prod * x_2w / x
                + coeff_mix * weight * x_w1 * (partial_sum + weight * x + x)
                - coeff_h * weight * x_w1;

            let next = x - residual / derivative;
            if !next.is_finite() || next <= 0.0 {
                if restarts >= config.max_seed_restarts {
                    return Err(RouterError::NewtonDiverged { restarts });
                }
                restarts += 1;
                continue 'attempt;
            }
            if (next - x).abs() < config.tolerance * next.abs().max(1.0) {
                return Ok(next);
            }
            x = next;
        }
        return Err(RouterError::NewtonDiverged { restarts });
    }
}
