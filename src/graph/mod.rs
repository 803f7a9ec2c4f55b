//! Coin adjacency graph derived from a pool snapshot.
//!
//! Coins are vertices; an edge connects two coins whenever at least one
//! pool holds both, and carries the set of those pools. Everything is
//! stored in `BTreeMap`s and `BTreeSet`s so traversal order is fixed by
//! coin and pool ids alone, which keeps route discovery deterministic
//! across runs.
//!
//! LP-share coins never enter the graph: routing through a pool's own
//! share token conflates swap liquidity with mint/burn mechanics.
//! Fee-disabled pairs stay in the graph; they quote to zero downstream,
//! which prunes them from results without special-casing discovery.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::{CoinId, PoolId};
use crate::pool::PoolSnapshot;

/// Undirected coin adjacency with per-edge pool sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinGraph {
    edges: BTreeMap<CoinId, BTreeMap<CoinId, BTreeSet<PoolId>>>,
}

impl CoinGraph {
    /// Builds the graph from every pool in the snapshot.
    #[must_use]
    pub fn build(snapshot: &PoolSnapshot) -> Self {
        let mut edges: BTreeMap<CoinId, BTreeMap<CoinId, BTreeSet<PoolId>>> = BTreeMap::new();
        for (pool_id, pool) in snapshot.iter() {
            let coins: Vec<CoinId> = pool
                .coins()
                .filter(|(_, state)| !state.kind().is_lp())
                .map(|(id, _)| *id)
                .collect();
            for (i, a) in coins.iter().enumerate() {
                for b in &coins[i + 1..] {
                    edges
                        .entry(*a)
                        .or_default()
                        .entry(*b)
                        .or_default()
                        .insert(pool_id);
                    edges
                        .entry(*b)
                        .or_default()
                        .entry(*a)
                        .or_default()
                        .insert(pool_id);
                }
            }
        }
        let graph = Self { edges };
        debug!(
            coins = graph.coin_count(),
            pools = snapshot.len(),
            "coin graph built"
        );
        graph
    }

    /// Number of distinct coins with at least one edge.
    #[must_use]
    pub fn coin_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the coin appears in any pool.
    #[must_use]
    pub fn contains(&self, coin: &CoinId) -> bool {
        self.edges.contains_key(coin)
    }

    /// Iterates every coin in id order.
    pub fn coins(&self) -> impl Iterator<Item = &CoinId> {
        self.edges.keys()
    }

    /// Iterates the coins reachable from `coin` in one hop, in id order.
    pub fn neighbors(&self, coin: &CoinId) -> impl Iterator<Item = &CoinId> {
        self.edges.get(coin).into_iter().flat_map(BTreeMap::keys)
    }

    /// The pools connecting an ordered pair, in id order.
    pub fn pools_for_pair(&self, a: &CoinId, b: &CoinId) -> impl Iterator<Item = PoolId> + '_ {
        self.edges
            .get(a)
            .and_then(|adjacent| adjacent.get(b))
            .into_iter()
            .flatten()
            .copied()
    }
}
