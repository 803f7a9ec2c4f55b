//! Single-pool swap quoting and state transition.
//!
//! # Quote algorithm (given-in)
//!
//! 1. Deduct the in-coin fee from the input amount.
//! 2. Evaluate the pool invariant `h` over current balances.
//! 3. Update the in-coin balance and solve for the out-coin balance that
//!    restores `h` via Newton iteration.
//! 4. `raw_out = balance_out − new_out`, then deduct the out-coin fee.
//!
//! Given-out runs the same steps mirrored: gross the requested output up
//! by the out-coin fee, solve for the in-coin balance, then gross the raw
//! input up by the in-coin fee (rounding the trader's cost up).
//!
//! Quotes never mutate the pool. [`Pool::apply_swap`] commits a quote:
//! the full input amount enters the pool and only the net output leaves,
//! so both directional fees accrue to the pool's depth.

use tracing::trace;

use crate::domain::{Amount, CoinId};
use crate::error::{Result, RouterError};
use crate::math::{invariant, solve_balance, weighted_product_sum, NewtonConfig};
use crate::pool::state::{CoinState, Pool};

// ---------------------------------------------------------------------------
// PoolSwapQuote
// ---------------------------------------------------------------------------

/// The result of pricing one swap against one pool.
///
/// An all-zero quote (both amounts zero) is the "no-liquidity" outcome:
/// the pair exists but cannot be traded, either because a directional fee
/// is at or above one, a balance is empty, or a given-out request exceeds
/// the pool's depth. Callers that need to distinguish usage errors get
/// them as `Err` instead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSwapQuote {
    coin_in: CoinId,
    coin_out: CoinId,
    amount_in: Amount,
    amount_out: Amount,
    fee_in: Amount,
    fee_out: Amount,
    spot_price: f64,
}

impl PoolSwapQuote {
    fn zero(coin_in: CoinId, coin_out: CoinId) -> Self {
        Self {
            coin_in,
            coin_out,
            amount_in: Amount::ZERO,
            amount_out: Amount::ZERO,
            fee_in: Amount::ZERO,
            fee_out: Amount::ZERO,
            spot_price: 0.0,
        }
    }

    /// Coin entering the pool.
    #[must_use]
    pub const fn coin_in(&self) -> CoinId {
        self.coin_in
    }

    /// Coin leaving the pool.
    #[must_use]
    pub const fn coin_out(&self) -> CoinId {
        self.coin_out
    }

    /// Gross amount the trader pays in, fee included.
    #[must_use]
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Net amount the trader receives, fee deducted.
    #[must_use]
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Fee retained on the in side, in in-coin units.
    #[must_use]
    pub const fn fee_in(&self) -> Amount {
        self.fee_in
    }

    /// Fee retained on the out side, in out-coin units.
    #[must_use]
    pub const fn fee_out(&self) -> Amount {
        self.fee_out
    }

    /// Pre-trade spot price of the out coin in in-coin units.
    #[must_use]
    pub const fn spot_price(&self) -> f64 {
        self.spot_price
    }

    /// True when the quote carries no executable trade.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount_in.is_zero() && self.amount_out.is_zero()
    }
}

// ---------------------------------------------------------------------------
// Pool quoting
// ---------------------------------------------------------------------------

/// Pre-trade state shared by both quote directions.
struct PairView {
    balance_in: f64,
    balance_out: f64,
    weight_in: f64,
    weight_out: f64,
    /// `1 - fee` factors for the charged direction.
    keep_in: f64,
    keep_out: f64,
    flatness: f64,
    prod: f64,
    sum: f64,
    spot_price: f64,
    tradeable: bool,
}

impl Pool {
    fn pair_view(&self, coin_in: &CoinId, coin_out: &CoinId) -> Result<PairView> {
        if coin_in == coin_out {
            return Err(RouterError::SameCoin);
        }
        let state_in = self.coin(coin_in)?;
        let state_out = self.coin(coin_out)?;

        let balance_in = state_in.balance().as_f64();
        let balance_out = state_out.balance().as_f64();
        let weight_in = state_in.weight().as_f64();
        let weight_out = state_out.weight().as_f64();

        let (prod, sum) = weighted_product_sum(
            self.coins()
                .map(|(_, state)| (state.weight().as_f64(), state.balance().as_f64())),
        );

        // Only the fees actually charged on this direction gate the
        // pair; the opposite direction's fees are irrelevant here.
        let tradeable = !state_in.trade_fee_in().is_at_least_one()
            && !state_out.trade_fee_out().is_at_least_one()
            && balance_in > 0.0
            && balance_out > 0.0
            && prod > 0.0;

        let spot_price = if balance_out > 0.0 {
            (balance_in / weight_in) / (balance_out / weight_out)
        } else {
            0.0
        };

        Ok(PairView {
            balance_in,
            balance_out,
            weight_in,
            weight_out,
            keep_in: state_in.trade_fee_in().complement().as_f64(),
            keep_out: state_out.trade_fee_out().complement().as_f64(),
            flatness: self.flatness().as_f64(),
            prod,
            sum,
            spot_price,
            tradeable,
        })
    }

    /// Weighted product and sum over every coin except `skip`, with
    /// `updated` substituted for that coin's balance.
    fn partials(&self, skip: &CoinId, updated: (&CoinId, f64)) -> (f64, f64) {
        weighted_product_sum(self.coins().filter(|(id, _)| *id != skip).map(
            |(id, state): (&CoinId, &CoinState)| {
                let balance = if id == updated.0 {
                    updated.1
                } else {
                    state.balance().as_f64()
                };
                (state.weight().as_f64(), balance)
            },
        ))
    }

    /// Prices an exact-input swap without mutating the pool.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::SameCoin`] if both sides name the same
    /// coin, [`RouterError::UnknownCoin`] if the pool lacks either coin,
    /// and solver errors from the Newton iteration. Untradeable pairs
    /// (disabled fee, empty balance) yield an all-zero quote, not an
    /// error.
    pub fn quote_out_given_in(
        &self,
        coin_in: &CoinId,
        coin_out: &CoinId,
        amount_in: Amount,
        config: &NewtonConfig,
    ) -> Result<PoolSwapQuote> {
        let view = self.pair_view(coin_in, coin_out)?;
        if !view.tradeable || amount_in.is_zero() {
            return Ok(PoolSwapQuote::zero(*coin_in, *coin_out));
        }

        let gross_in = amount_in.as_f64();
        let net_in = gross_in * view.keep_in;
        let new_in = view.balance_in + net_in;

        let h = invariant(view.flatness, view.prod, view.sum)?;
        let (p0, s0) = self.partials(coin_out, (coin_in, new_in));
        let seed = (view.prod / p0).powf(1.0 / view.weight_out);
        let new_out = solve_balance(view.flatness, view.weight_out, h, p0, s0, seed, config)?;

        let raw_out = (view.balance_out - new_out).max(0.0);
        let net_out = raw_out * view.keep_out;
        trace!(raw_out, net_out, "given-in quote solved");

        Ok(PoolSwapQuote {
            coin_in: *coin_in,
            coin_out: *coin_out,
            amount_in,
            amount_out: Amount::try_from_f64(net_out)?,
            fee_in: Amount::try_from_f64(gross_in - net_in)?,
            fee_out: Amount::try_from_f64(raw_out - net_out)?,
            spot_price: view.spot_price,
        })
    }

    /// Prices an exact-output swap without mutating the pool.
    ///
    /// The trader's input is rounded up, so replaying the quote through
    /// [`Pool::quote_out_given_in`] yields at least the requested output
    /// up to solver tolerance.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Pool::quote_out_given_in`]. A request at or
    /// beyond the pool's out-side depth yields an all-zero quote.
    pub fn quote_in_given_out(
        &self,
        coin_in: &CoinId,
        coin_out: &CoinId,
        amount_out: Amount,
        config: &NewtonConfig,
    ) -> Result<PoolSwapQuote> {
        let view = self.pair_view(coin_in, coin_out)?;
        if !view.tradeable || amount_out.is_zero() {
            return Ok(PoolSwapQuote::zero(*coin_in, *coin_out));
        }

        let net_out = amount_out.as_f64();
        let gross_out = net_out / view.keep_out;
        if gross_out >= view.balance_out {
            return Ok(PoolSwapQuote::zero(*coin_in, *coin_out));
        }
        let new_out = view.balance_out - gross_out;

        let h = invariant(view.flatness, view.prod, view.sum)?;
        let (p0, s0) = self.partials(coin_in, (coin_out, new_out));
        let seed = (view.prod / p0).powf(1.0 / view.weight_in);
        let new_in = solve_balance(view.flatness, view.weight_in, h, p0, s0, seed, config)?;

        let raw_in = (new_in - view.balance_in).max(0.0);
        let gross_in = raw_in / view.keep_in;
        trace!(raw_in, gross_in, "given-out quote solved");

        Ok(PoolSwapQuote {
            coin_in: *coin_in,
            coin_out: *coin_out,
            amount_in: Amount::try_from_f64_ceil(gross_in)?,
            amount_out,
            fee_in: Amount::try_from_f64(gross_in - raw_in)?,
            fee_out: Amount::try_from_f64(gross_out - net_out)?,
            spot_price: view.spot_price,
        })
    }

    /// Pre-trade spot price of `coin_out` in `coin_in` units,
    /// `(balance_in / weight_in) / (balance_out / weight_out)`.
    ///
    /// Informational; the executable price always sits at or above spot
    /// because of slippage and fees.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::SameCoin`] or [`RouterError::UnknownCoin`]
    /// for invalid pairs.
    pub fn spot_price(&self, coin_in: &CoinId, coin_out: &CoinId) -> Result<f64> {
        Ok(self.pair_view(coin_in, coin_out)?.spot_price)
    }

    /// Commits a quote to pool state.
    ///
    /// The gross input is added to the in-coin balance and the net output
    /// removed from the out-coin balance; everything in between (both
    /// fees) stays in the pool.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnknownCoin`] if the quote names coins this
    /// pool lacks, [`RouterError::NoLiquidity`] if the out balance cannot
    /// cover the quote, and [`RouterError::InvalidAmount`] on in-balance
    /// overflow.
    pub fn apply_swap(&mut self, quote: &PoolSwapQuote) -> Result<()> {
        // Validate both sides before touching either balance.
        let new_in = self
            .coin(&quote.coin_in)?
            .balance()
            .checked_add(&quote.amount_in)
            .ok_or(RouterError::InvalidAmount("in-balance overflow"))?;
        let new_out = self
            .coin(&quote.coin_out)?
            .balance()
            .checked_sub(&quote.amount_out)
            .ok_or(RouterError::NoLiquidity)?;

        self.coin_mut(&quote.coin_in)?.set_balance(new_in);
        self.coin_mut(&quote.coin_out)?.set_balance(new_out);
        Ok(())
    }
}
