//! Integration tests exercising the full routing pipeline through the
//! public API: single-pool scenarios from the pricing contract,
//! multi-pool splitting, both trade directions, and the failure
//! taxonomy.

#![allow(clippy::panic)]

use trident_router::domain::{Amount, CoinId, Fraction, TradeSpec};
use trident_router::error::RouterError;
use trident_router::graph::CoinGraph;
use trident_router::math::NewtonConfig;
use trident_router::pool::{CoinState, Pool, PoolSnapshot};
use trident_router::router::{Router, RouterConfig};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn coin_id(tag: u8) -> CoinId {
    let mut bytes = [0u8; 32];
    bytes[0] = tag;
    CoinId::from_bytes(bytes)
}

fn fraction(value: f64) -> Fraction {
    let Ok(f) = Fraction::from_f64(value) else {
        panic!("valid fraction");
    };
    f
}

fn coin_state(balance: u128, weight: f64, fee: f64) -> CoinState {
    let Ok(state) = CoinState::new(
        Amount::new(balance),
        fraction(weight),
        fraction(fee),
        fraction(fee),
    ) else {
        panic!("valid coin state");
    };
    state
}

fn two_coin_pool(tag_a: u8, tag_b: u8, balance: u128, fee: f64, flatness: f64) -> Pool {
    let Ok(pool) = Pool::new(
        [
            (coin_id(tag_a), coin_state(balance, 0.5, fee)),
            (coin_id(tag_b), coin_state(balance, 0.5, fee)),
        ],
        fraction(flatness),
        Amount::new(balance),
    ) else {
        panic!("valid pool");
    };
    pool
}

fn snapshot(pools: Vec<Pool>) -> PoolSnapshot {
    let Ok(snapshot) = PoolSnapshot::from_pools(pools) else {
        panic!("valid snapshot");
    };
    snapshot
}

fn router() -> Router {
    let Ok(router) = Router::new(RouterConfig::default()) else {
        panic!("valid config");
    };
    router
}

fn given_in(amount: u128) -> TradeSpec {
    let Ok(spec) = TradeSpec::given_in(Amount::new(amount)) else {
        panic!("valid spec");
    };
    spec
}

// ---------------------------------------------------------------------------
// Pricing scenarios
// ---------------------------------------------------------------------------

#[test]
fn constant_product_scenario_matches_closed_form() {
    // 50/50 weighted-product pool, 1e12 per side, fee-free: quoting
    // 1_000_000 in must land within 0.01% of the Balancer two-asset
    // closed form b_out · a / (b_in + a) ≈ 999_999.
    let pool = two_coin_pool(1, 2, 1_000_000_000_000, 0.0, 0.0);
    let Ok(quote) = pool.quote_out_given_in(
        &coin_id(1),
        &coin_id(2),
        Amount::new(1_000_000),
        &NewtonConfig::default(),
    ) else {
        panic!("quote failed");
    };
    let out = quote.amount_out().get();
    let expected = 999_999u128;
    let tolerance = expected / 10_000; // 0.01%
    assert!(
        out >= expected - tolerance && out <= expected + tolerance,
        "out = {out}, expected ≈ {expected}"
    );
}

#[test]
fn disabled_pair_quotes_zero_without_raising() {
    let pool = two_coin_pool(1, 2, 1_000_000_000, 1.0, 0.0);
    let Ok(quote) = pool.quote_out_given_in(
        &coin_id(1),
        &coin_id(2),
        Amount::new(1_000_000),
        &NewtonConfig::default(),
    ) else {
        panic!("disabled pair must not raise");
    };
    assert!(quote.is_zero());

    // The routed quote is the same non-error zero outcome.
    let snapshot = snapshot(vec![two_coin_pool(1, 2, 1_000_000_000, 1.0, 0.0)]);
    let Ok(complete) = router().complete_route(&snapshot, coin_id(1), coin_id(2), given_in(1_000))
    else {
        panic!("routed quote must not raise");
    };
    assert!(complete.routes().is_empty());
    assert!(complete.output().amount().is_zero());
}

#[test]
fn empty_snapshot_is_a_usage_error() {
    let result = router().complete_route(
        &PoolSnapshot::default(),
        coin_id(1),
        coin_id(2),
        given_in(1_000),
    );
    assert_eq!(result, Err(RouterError::NoLiquidity));
}

#[test]
fn same_coin_is_a_usage_error() {
    let snapshot = snapshot(vec![two_coin_pool(1, 2, 1_000_000, 0.0, 0.0)]);
    let result = router().complete_route(&snapshot, coin_id(1), coin_id(1), given_in(1_000));
    assert_eq!(result, Err(RouterError::SameCoin));
}

#[test]
fn unconnected_pair_yields_empty_quote() {
    let snapshot = snapshot(vec![two_coin_pool(1, 2, 1_000_000, 0.0, 0.0)]);
    let Ok(complete) = router().complete_route(&snapshot, coin_id(1), coin_id(9), given_in(1_000))
    else {
        panic!("unknown pair must not raise");
    };
    assert!(complete.routes().is_empty());
    assert_eq!(complete.input().amount(), Amount::new(1_000));
    assert!(complete.output().amount().is_zero());
}

// ---------------------------------------------------------------------------
// Routing and splitting
// ---------------------------------------------------------------------------

#[test]
fn multi_hop_route_bridges_coins() {
    // No direct 1-2 pool; the only route is 1-3-2.
    let snapshot = snapshot(vec![
        two_coin_pool(1, 3, 1_000_000_000_000, 0.003, 0.0),
        two_coin_pool(3, 2, 1_000_000_000_000, 0.003, 0.0),
    ]);
    let Ok(complete) =
        router().complete_route(&snapshot, coin_id(1), coin_id(2), given_in(1_000_000))
    else {
        panic!("route failed");
    };
    assert_eq!(complete.routes().len(), 1);
    assert_eq!(complete.routes()[0].hop_count(), 2);
    assert_eq!(complete.routes()[0].input().coin(), coin_id(1));
    assert_eq!(complete.routes()[0].output().coin(), coin_id(2));
    assert!(!complete.output().amount().is_zero());
}

#[test]
fn large_trade_splits_across_parallel_pools() {
    let snapshot = snapshot(vec![
        two_coin_pool(1, 2, 1_000_000_000, 0.003, 0.0),
        two_coin_pool(1, 2, 1_000_000_000, 0.003, 0.0),
    ]);
    let Ok(complete) =
        router().complete_route(&snapshot, coin_id(1), coin_id(2), given_in(200_000_000))
    else {
        panic!("route failed");
    };
    assert_eq!(complete.routes().len(), 2);
    let total_in: u128 = complete
        .routes()
        .iter()
        .map(|route| route.input().amount().get())
        .sum();
    assert_eq!(total_in, 200_000_000);

    // Splitting across identical pools must beat pushing everything
    // through one of them.
    let single = self::snapshot(vec![two_coin_pool(1, 2, 1_000_000_000, 0.003, 0.0)]);
    let Ok(unsplit) =
        router().complete_route(&single, coin_id(1), coin_id(2), given_in(200_000_000))
    else {
        panic!("route failed");
    };
    assert!(complete.output().amount() > unsplit.output().amount());
}

#[test]
fn conservation_with_odd_amounts() {
    // An amount not divisible by the partition count still splits
    // without losing or inventing a unit.
    let snapshot = snapshot(vec![
        two_coin_pool(1, 2, 1_000_000_000, 0.003, 0.0),
        two_coin_pool(1, 2, 2_000_000_000, 0.003, 0.5),
    ]);
    let Ok(complete) =
        router().complete_route(&snapshot, coin_id(1), coin_id(2), given_in(99_999_999))
    else {
        panic!("route failed");
    };
    let total_in: u128 = complete
        .routes()
        .iter()
        .map(|route| route.input().amount().get())
        .sum();
    assert_eq!(total_in, 99_999_999);
    assert_eq!(complete.input().amount(), Amount::new(99_999_999));
}

#[test]
fn given_out_mode_fills_the_requested_output() {
    let snapshot = snapshot(vec![
        two_coin_pool(1, 2, 1_000_000_000_000, 0.003, 0.0),
        two_coin_pool(1, 2, 1_000_000_000_000, 0.003, 1.0),
    ]);
    let Ok(spec) = TradeSpec::given_out(Amount::new(10_000_000)) else {
        panic!("valid spec");
    };
    let Ok(complete) = router().complete_route(&snapshot, coin_id(1), coin_id(2), spec) else {
        panic!("route failed");
    };
    let total_out: u128 = complete
        .routes()
        .iter()
        .map(|route| route.output().amount().get())
        .sum();
    assert_eq!(total_out, 10_000_000);
    assert_eq!(complete.output().amount(), Amount::new(10_000_000));
    assert!(complete.input().amount() > Amount::new(10_000_000));
    for route in complete.routes() {
        assert_eq!(route.input().coin(), coin_id(1));
        assert_eq!(route.output().coin(), coin_id(2));
    }
}

#[test]
fn pipeline_is_deterministic() {
    let snapshot = snapshot(vec![
        two_coin_pool(1, 2, 1_000_000_000, 0.003, 0.0),
        two_coin_pool(1, 3, 2_000_000_000, 0.001, 0.5),
        two_coin_pool(3, 2, 1_500_000_000, 0.002, 1.0),
        two_coin_pool(1, 2, 3_000_000_000, 0.0, 0.3),
    ]);
    let engine = router();
    let spec = given_in(123_456_789);
    let first = engine.complete_route(&snapshot, coin_id(1), coin_id(2), spec);
    let second = engine.complete_route(&snapshot, coin_id(1), coin_id(2), spec);
    assert_eq!(first, second);
}

#[test]
fn route_length_override_limits_discovery() {
    // The only path is two hops; an override of one hop finds nothing.
    let snapshot = snapshot(vec![
        two_coin_pool(1, 3, 1_000_000_000, 0.0, 0.0),
        two_coin_pool(3, 2, 1_000_000_000, 0.0, 0.0),
    ]);
    let Ok(complete) = router().complete_route_with_length(
        &snapshot,
        coin_id(1),
        coin_id(2),
        given_in(1_000),
        Some(1),
    ) else {
        panic!("route failed");
    };
    assert!(complete.routes().is_empty());

    let result = router().complete_route_with_length(
        &snapshot,
        coin_id(1),
        coin_id(2),
        given_in(1_000),
        Some(0),
    );
    assert!(matches!(
        result,
        Err(RouterError::InvalidConfiguration(_))
    ));
}

#[test]
fn aggregate_spot_price_is_volume_weighted() {
    let snapshot = snapshot(vec![two_coin_pool(1, 2, 1_000_000_000_000, 0.0, 0.0)]);
    let Ok(complete) =
        router().complete_route(&snapshot, coin_id(1), coin_id(2), given_in(1_000_000))
    else {
        panic!("route failed");
    };
    // Balanced 50/50 pool: spot is 1, slippage on a tiny trade is tiny.
    assert!((complete.spot_price() - 1.0).abs() < 1e-6);
    assert!(complete.slippage_vs_spot() >= 0.0);
    assert!(complete.slippage_vs_spot() < 1e-3);
}

// ---------------------------------------------------------------------------
// Graph surface
// ---------------------------------------------------------------------------

#[test]
fn graph_symmetry_over_a_three_coin_pool() {
    let Ok(pool) = Pool::new(
        [
            (coin_id(1), coin_state(1_000_000, 1.0 / 3.0, 0.0)),
            (coin_id(2), coin_state(1_000_000, 1.0 / 3.0, 0.0)),
            (coin_id(3), coin_state(1_000_000, 1.0 / 3.0, 0.0)),
        ],
        Fraction::ZERO,
        Amount::ZERO,
    ) else {
        panic!("valid pool");
    };
    let graph = CoinGraph::build(&snapshot(vec![pool]));
    for a in 1u8..=3 {
        for b in 1u8..=3 {
            if a == b {
                continue;
            }
            let pools: Vec<_> = graph.pools_for_pair(&coin_id(a), &coin_id(b)).collect();
            assert_eq!(pools.len(), 1, "missing edge {a}->{b}");
        }
    }
}
