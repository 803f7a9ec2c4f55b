//! Incremental trade splitting across candidate routes.
//!
//! Exhaustively optimizing the allocation across many multi-hop routes
//! is too expensive per quote, so the optimizer works in slices:
//!
//! 1. The total amount is cut into `trade_partition_count` equal slices,
//!    preceded by the division remainder so amounts are conserved
//!    exactly.
//! 2. Each slice is offered to every live candidate by simulating it
//!    against a throwaway clone of the committed snapshot, producing a
//!    marginal result per candidate.
//! 3. The best marginal result wins the slice; its clone becomes the new
//!    committed snapshot, so later slices price in the slippage earlier
//!    slices caused. Losing candidates keep their pre-slice state.
//! 4. After each slice the weakest candidates are pruned down toward
//!    `min_routes_to_check` per the configured policy. Pruned candidates
//!    that already won slices keep their allocation and reappear in the
//!    final result; candidates pruned empty-handed are gone.
//!
//! A zero-allocation candidate is also skipped permanently when its hop
//! count no longer fits under `max_pool_hops_for_complete_route` next to
//! the hops already committed. The committed hop total only grows, so a
//! candidate that misses the budget once can never fit later.
//!
//! Given-out trades run the same loop with every hop walked back to
//! front through exact-output quotes, slicing the requested output and
//! scoring by the input each slice demands.

use tracing::{debug, trace};

use crate::domain::{Amount, TradeSpec};
use crate::error::Result;
use crate::math::NewtonConfig;
use crate::pool::{PoolSnapshot, PoolSwapQuote};
use crate::router::config::{PruningPolicy, RouterConfig};
use crate::router::finder::{CandidateRoute, RouteHop};

// ---------------------------------------------------------------------------
// Route simulation
// ---------------------------------------------------------------------------

/// The materialized result of pushing one amount through one route.
#[derive(Debug, Clone)]
pub(crate) struct RouteFill {
    /// Per-hop quotes in forward execution order.
    pub quotes: Vec<PoolSwapQuote>,
    pub amount_in: Amount,
    pub amount_out: Amount,
}

/// Simulates a route fill against `snapshot`, committing each hop's swap
/// as it goes.
///
/// For given-in trades, hops run forward and the amount cascades from
/// input to output. For given-out trades, hops run back to front: the
/// requested output of the last hop determines that hop's input, which
/// becomes the previous hop's required output, and so on. In both cases
/// the returned quotes are in forward execution order.
///
/// Returns `Ok(None)` when any hop quotes to zero, which marks the route
/// untradeable for this amount without being an error.
pub(crate) fn fill_route(
    snapshot: &mut PoolSnapshot,
    hops: &[RouteHop],
    amount: Amount,
    given_in: bool,
    newton: &NewtonConfig,
) -> Result<Option<RouteFill>> {
    if given_in {
        let mut quotes = Vec::with_capacity(hops.len());
        let mut carry = amount;
        for hop in hops {
            let quote = snapshot.pool(hop.pool)?.quote_out_given_in(
                &hop.coin_in,
                &hop.coin_out,
                carry,
                newton,
            )?;
            if quote.amount_out().is_zero() {
                return Ok(None);
            }
            snapshot.pool_mut(hop.pool)?.apply_swap(&quote)?;
            carry = quote.amount_out();
            quotes.push(quote);
        }
        Ok(Some(RouteFill {
            quotes,
            amount_in: amount,
            amount_out: carry,
        }))
    } else {
        let mut quotes = Vec::with_capacity(hops.len());
        let mut carry = amount;
        for hop in hops.iter().rev() {
            let quote = snapshot.pool(hop.pool)?.quote_in_given_out(
                &hop.coin_in,
                &hop.coin_out,
                carry,
                newton,
            )?;
            if quote.amount_in().is_zero() {
                return Ok(None);
            }
            snapshot.pool_mut(hop.pool)?.apply_swap(&quote)?;
            carry = quote.amount_in();
            quotes.push(quote);
        }
        quotes.reverse();
        Ok(Some(RouteFill {
            quotes,
            amount_in: carry,
            amount_out: amount,
        }))
    }
}

// ---------------------------------------------------------------------------
// Split optimization
// ---------------------------------------------------------------------------

/// A candidate route together with its final allocated share of the
/// trade, denominated on the requested side.
#[derive(Debug, Clone)]
pub(crate) struct ChosenRoute {
    pub candidate: CandidateRoute,
    pub allocated: Amount,
}

fn slice_schedule(total: Amount, partitions: u32) -> Vec<Amount> {
    let slice = total.get() / u128::from(partitions);
    let remainder = total.get() % u128::from(partitions);
    let mut schedule = Vec::new();
    if remainder > 0 {
        schedule.push(Amount::new(remainder));
    }
    if slice > 0 {
        schedule.extend(std::iter::repeat(Amount::new(slice)).take(partitions as usize));
    }
    schedule
}

fn keep_count(live: usize, policy: PruningPolicy, floor: usize) -> usize {
    if live <= floor {
        return live;
    }
    match policy {
        PruningPolicy::Quadratic => live - (live - floor) / 2,
        PruningPolicy::Linear { step } => live.saturating_sub(step).max(floor),
    }
}

/// Allocates the trade across the candidates, slice by slice.
///
/// Returns the routes holding a non-zero allocation, largest share
/// first. The sum of allocations equals the requested amount whenever
/// the candidates can absorb it; a liquidity-starved trade allocates
/// what it can and stops.
pub(crate) fn split_trade(
    snapshot: &PoolSnapshot,
    candidates: &[CandidateRoute],
    spec: TradeSpec,
    config: &RouterConfig,
) -> Result<Vec<ChosenRoute>> {
    let given_in = spec.is_given_in();
    let schedule = slice_schedule(spec.amount(), config.trade_partition_count);

    let mut allocated = vec![0_u128; candidates.len()];
    let mut live: Vec<usize> = (0..candidates.len()).collect();
    let mut committed = snapshot.clone();
    let mut committed_hops = 0_usize;

    for slice in schedule {
        // Marginal result per live candidate, each against its own clone
        // of the committed snapshot.
        let mut scored: Vec<(usize, Amount, PoolSnapshot)> = Vec::new();
        let mut next_live: Vec<usize> = Vec::with_capacity(live.len());
        for &idx in &live {
            let candidate = &candidates[idx];
            if allocated[idx] == 0
                && committed_hops + candidate.hop_count()
                    > config.max_pool_hops_for_complete_route
            {
                trace!(candidate = idx, "dropped by hop budget");
                continue;
            }
            let mut trial = committed.clone();
            match fill_route(&mut trial, &candidate.hops, slice, given_in, &config.newton)? {
                Some(fill) => {
                    let marginal = if given_in {
                        fill.amount_out
                    } else {
                        fill.amount_in
                    };
                    scored.push((idx, marginal, trial));
                }
                None => {
                    // Untradeable at this amount. With an allocation it
                    // retires into the result; empty-handed it is gone.
                    if allocated[idx] > 0 {
                        trace!(candidate = idx, "retired after zero marginal");
                    }
                }
            }
        }
        if scored.is_empty() {
            debug!("no candidate can absorb the next slice");
            break;
        }

        // Best marginal first; ties resolve by discovery order since the
        // sort is stable and candidates were scored in index order.
        if given_in {
            scored.sort_by(|a, b| b.1.cmp(&a.1));
        } else {
            scored.sort_by(|a, b| a.1.cmp(&b.1));
        }

        let keep = keep_count(scored.len(), config.pruning, config.min_routes_to_check);
        scored.truncate(keep);

        let (winner, _, trial) = scored.swap_remove(0);
        if allocated[winner] == 0 {
            committed_hops += candidates[winner].hop_count();
        }
        allocated[winner] = allocated[winner].saturating_add(slice.get());
        committed = trial;

        next_live.push(winner);
        next_live.extend(scored.iter().map(|(idx, _, _)| *idx));
        next_live.sort_unstable();
        live = next_live;
    }

    let mut chosen: Vec<ChosenRoute> = allocated
        .iter()
        .enumerate()
        .filter(|(_, amount)| **amount > 0)
        .map(|(idx, amount)| ChosenRoute {
            candidate: candidates[idx].clone(),
            allocated: Amount::new(*amount),
        })
        .collect();
    chosen.sort_by(|a, b| b.allocated.cmp(&a.allocated));
    debug!(routes = chosen.len(), "split complete");
    Ok(chosen)
}
