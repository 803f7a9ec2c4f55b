//! Deterministic replay of the chosen allocations.
//!
//! The splitter's per-slice search leaves rounding and ordering
//! artifacts behind: every slice was priced against a snapshot mutated
//! by whichever routes happened to win earlier slices. The finalizer
//! throws all of that away and replays each chosen route's total
//! allocation, hop by hop, against a fresh clone of the original
//! snapshot, committing route by route in result order. Routes sharing a
//! pool still see each other's impact, but exactly once, so identical
//! inputs always produce bit-identical output.

use tracing::debug;

use crate::domain::{Amount, CoinId, PoolId, TradeSpec};
use crate::error::{Result, RouterError};
use crate::math::NewtonConfig;
use crate::pool::{PoolSnapshot, PoolSwapQuote};
use crate::router::route::{CoinSide, CompleteTradeRoute, TradePath, TradeRoute};
use crate::router::splitter::{fill_route, ChosenRoute};

fn path_from_quote(quote: &PoolSwapQuote, pool: PoolId) -> TradePath {
    TradePath::new(
        pool,
        CoinSide::new(quote.coin_in(), quote.amount_in(), quote.fee_in()),
        CoinSide::new(quote.coin_out(), quote.amount_out(), quote.fee_out()),
        quote.spot_price(),
    )
}

/// The "nothing tradeable" answer: the requested side carries the
/// requested amount, the other side is zero, and the route list is
/// empty.
pub(crate) fn empty_complete_route(
    coin_in: CoinId,
    coin_out: CoinId,
    spec: TradeSpec,
) -> CompleteTradeRoute {
    let (amount_in, amount_out) = match spec {
        TradeSpec::GivenIn { amount } => (amount, Amount::ZERO),
        TradeSpec::GivenOut { amount } => (Amount::ZERO, amount),
    };
    CompleteTradeRoute::new(
        Vec::new(),
        CoinSide::new(coin_in, amount_in, Amount::ZERO),
        CoinSide::new(coin_out, amount_out, Amount::ZERO),
        0.0,
    )
}

/// Replays the chosen routes against the original snapshot and builds
/// the final aggregate.
///
/// # Errors
///
/// Propagates solver and overflow failures; a route that replays to a
/// zero fill is dropped rather than failing the quote.
pub(crate) fn finalize(
    snapshot: &PoolSnapshot,
    chosen: &[ChosenRoute],
    coin_in: CoinId,
    coin_out: CoinId,
    spec: TradeSpec,
    newton: &NewtonConfig,
) -> Result<CompleteTradeRoute> {
    let given_in = spec.is_given_in();
    let mut replay = snapshot.clone();
    let mut routes: Vec<TradeRoute> = Vec::with_capacity(chosen.len());

    for route in chosen {
        let Some(fill) = fill_route(
            &mut replay,
            &route.candidate.hops,
            route.allocated,
            given_in,
            newton,
        )?
        else {
            debug!("chosen route replayed to zero, dropped");
            continue;
        };
        let paths = fill
            .quotes
            .iter()
            .zip(&route.candidate.hops)
            .map(|(quote, hop)| path_from_quote(quote, hop.pool))
            .collect();
        if let Some(route) = TradeRoute::from_paths(paths) {
            routes.push(route);
        }
    }

    if routes.is_empty() {
        return Ok(empty_complete_route(coin_in, coin_out, spec));
    }

    let mut total_in = Amount::ZERO;
    let mut total_out = Amount::ZERO;
    let mut fee_in = Amount::ZERO;
    let mut fee_out = Amount::ZERO;
    let mut weighted_spot = 0.0_f64;
    for route in &routes {
        total_in = total_in
            .checked_add(&route.input().amount())
            .ok_or(RouterError::InvalidAmount("aggregate input overflow"))?;
        total_out = total_out
            .checked_add(&route.output().amount())
            .ok_or(RouterError::InvalidAmount("aggregate output overflow"))?;
        fee_in = fee_in
            .checked_add(&route.input().fee())
            .ok_or(RouterError::InvalidAmount("aggregate fee overflow"))?;
        fee_out = fee_out
            .checked_add(&route.output().fee())
            .ok_or(RouterError::InvalidAmount("aggregate fee overflow"))?;
        weighted_spot += route.spot_price() * route.output().amount().as_f64();
    }
    let spot_price = if total_out.is_zero() {
        0.0
    } else {
        weighted_spot / total_out.as_f64()
    };

    debug!(
        routes = routes.len(),
        %total_in,
        %total_out,
        "finalized complete route"
    );
    Ok(CompleteTradeRoute::new(
        routes,
        CoinSide::new(coin_in, total_in, fee_in),
        CoinSide::new(coin_out, total_out, fee_out),
        spot_price,
    ))
}
