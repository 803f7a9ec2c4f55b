//! Candidate route discovery over the coin graph.
//!
//! Discovery enumerates every pool-annotated path from the in coin to
//! the out coin up to the configured hop limit. The only structural
//! exclusion is the immediately-preceding pool, so a deep pool may
//! legitimately appear twice in a longer route. Paths terminate the
//! moment they reach the target; liquidity quality is the split
//! optimizer's job, not discovery's.
//!
//! Graph iteration order is fixed by coin and pool ids, so the candidate
//! list for a given snapshot is always identical.

use tracing::debug;

use crate::domain::{CoinId, PoolId};
use crate::graph::CoinGraph;

/// One hop of a candidate route, always oriented in trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RouteHop {
    pub pool: PoolId,
    pub coin_in: CoinId,
    pub coin_out: CoinId,
}

/// A discovered pool path from the in coin to the out coin. Carries no
/// amounts; allocation happens during splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CandidateRoute {
    pub hops: Vec<RouteHop>,
}

impl CandidateRoute {
    pub(crate) fn hop_count(&self) -> usize {
        self.hops.len()
    }
}

/// Enumerates all candidate routes between two coins.
///
/// Returns an empty vector when either coin is absent from the graph or
/// no path exists within the hop limit.
pub(crate) fn find_routes(
    graph: &CoinGraph,
    coin_in: &CoinId,
    coin_out: &CoinId,
    max_route_length: usize,
) -> Vec<CandidateRoute> {
    let mut results = Vec::new();
    if graph.contains(coin_in) && graph.contains(coin_out) {
        let mut prefix = Vec::with_capacity(max_route_length);
        grow(
            graph,
            *coin_in,
            coin_out,
            max_route_length,
            &mut prefix,
            &mut results,
        );
    }
    debug!(
        candidates = results.len(),
        max_route_length, "route discovery complete"
    );
    results
}

fn grow(
    graph: &CoinGraph,
    current: CoinId,
    target: &CoinId,
    remaining: usize,
    prefix: &mut Vec<RouteHop>,
    results: &mut Vec<CandidateRoute>,
) {
    if remaining == 0 {
        return;
    }
    let prev_pool = prefix.last().map(|hop| hop.pool);
    let neighbors: Vec<CoinId> = graph.neighbors(&current).copied().collect();
    for next in neighbors {
        for pool in graph.pools_for_pair(&current, &next) {
            if Some(pool) == prev_pool {
                continue;
            }
            prefix.push(RouteHop {
                pool,
                coin_in: current,
                coin_out: next,
            });
            if next == *target {
                results.push(CandidateRoute {
                    hops: prefix.clone(),
                });
            } else {
                grow(graph, next, target, remaining - 1, prefix, results);
            }
            prefix.pop();
        }
    }
}
