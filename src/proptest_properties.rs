//! Property-based tests over the quoting and routing pipeline.
//!
//! 1. **Round-trip bound** — the input required to buy back a quote's
//!    output is never less than the original input.
//! 2. **Monotonicity** — more input never yields less output.
//! 3. **Fee bound** — any positive fee strictly reduces output.
//! 4. **Invariant preservation** — committing a swap never shrinks the
//!    pool invariant.
//! 5. **Conservation under split** — route inputs sum exactly to the
//!    requested amount.
//! 6. **Determinism** — identical inputs produce bit-identical quotes.
//! 7. **Hop bound** — no finalized route exceeds the length limit.

#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::domain::{Amount, CoinId, Fraction, TradeSpec};
use crate::math::{invariant, weighted_product_sum, NewtonConfig};
use crate::pool::{CoinState, Pool, PoolSnapshot};
use crate::router::{Router, RouterConfig};

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

fn make_pool(balance_a: u128, balance_b: u128, fee: f64, flatness: f64) -> Pool {
    let Ok(state_a) = CoinState::new(
        Amount::new(balance_a),
        fraction(0.5),
        fraction(fee),
        fraction(fee),
    ) else {
        panic!("valid coin state");
    };
    let Ok(state_b) = CoinState::new(
        Amount::new(balance_b),
        fraction(0.5),
        fraction(fee),
        fraction(fee),
    ) else {
        panic!("valid coin state");
    };
    let Ok(pool) = Pool::new(
        [(coin_id(1), state_a), (coin_id(2), state_b)],
        fraction(flatness),
        Amount::new(1_000_000),
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

fn pool_invariant(pool: &Pool) -> f64 {
    let (prod, sum) = weighted_product_sum(
        pool.coins()
            .map(|(_, state)| (state.weight().as_f64(), state.balance().as_f64())),
    );
    let Ok(h) = invariant(pool.flatness().as_f64(), prod, sum) else {
        panic!("invariant evaluation failed");
    };
    h
}

fn newton() -> NewtonConfig {
    NewtonConfig::default()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Balances deep enough to dodge dust effects, shallow enough to produce
/// visible slippage.
fn balance_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000u128..=1_000_000_000_000u128
}

/// Fees from zero to 1%.
fn fee_strategy() -> impl Strategy<Value = f64> {
    (0u32..=100u32).prop_map(|v| f64::from(v) / 10_000.0)
}

/// Flatness across the whole interpolation range.
fn flatness_strategy() -> impl Strategy<Value = f64> {
    (0u32..=100u32).prop_map(|v| f64::from(v) / 100.0)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_bound(
        balance_a in balance_strategy(),
        balance_b in balance_strategy(),
        fee in fee_strategy(),
        flatness in flatness_strategy(),
    ) {
        let pool = make_pool(balance_a, balance_b, fee, flatness);
        let amount_in = Amount::new((balance_a / 1_000).max(1));

        let Ok(forward) =
            pool.quote_out_given_in(&coin_id(1), &coin_id(2), amount_in, &newton())
        else {
            return Ok(());
        };
        if forward.amount_out().is_zero() {
            return Ok(());
        }
        let Ok(backward) = pool.quote_in_given_out(
            &coin_id(1),
            &coin_id(2),
            forward.amount_out(),
            &newton(),
        ) else {
            return Ok(());
        };
        if backward.is_zero() {
            return Ok(());
        }

        // Fees and curvature only ever favor the pool; allow solver
        // tolerance plus rounding.
        let slack = amount_in.get() / 100_000 + 2;
        prop_assert!(
            backward.amount_in().get() + slack >= amount_in.get(),
            "round trip cheapened the trade: {} < {}",
            backward.amount_in().get(),
            amount_in.get()
        );
    }

    #[test]
    fn prop_monotonicity(
        balance_a in balance_strategy(),
        balance_b in balance_strategy(),
        fee in fee_strategy(),
        flatness in flatness_strategy(),
    ) {
        let pool = make_pool(balance_a, balance_b, fee, flatness);
        let small = Amount::new((balance_a / 10_000).max(1));
        let Some(large) = small.checked_add(&Amount::new(balance_a / 1_000)) else {
            return Ok(());
        };

        let Ok(q_small) = pool.quote_out_given_in(&coin_id(1), &coin_id(2), small, &newton())
        else {
            return Ok(());
        };
        let Ok(q_large) = pool.quote_out_given_in(&coin_id(1), &coin_id(2), large, &newton())
        else {
            return Ok(());
        };
        prop_assert!(q_large.amount_out() >= q_small.amount_out());
    }

    #[test]
    fn prop_fee_bound(
        balance_a in balance_strategy(),
        balance_b in balance_strategy(),
        flatness in flatness_strategy(),
    ) {
        let free = make_pool(balance_a, balance_b, 0.0, flatness);
        let taxed = make_pool(balance_a, balance_b, 0.003, flatness);
        let amount_in = Amount::new((balance_a / 1_000).max(1_000));

        let Ok(q_free) = free.quote_out_given_in(&coin_id(1), &coin_id(2), amount_in, &newton())
        else {
            return Ok(());
        };
        let Ok(q_taxed) =
            taxed.quote_out_given_in(&coin_id(1), &coin_id(2), amount_in, &newton())
        else {
            return Ok(());
        };
        prop_assert!(q_taxed.amount_out() < q_free.amount_out());
    }

    #[test]
    fn prop_invariant_never_shrinks(
        balance_a in balance_strategy(),
        balance_b in balance_strategy(),
        fee in fee_strategy(),
        flatness in flatness_strategy(),
    ) {
        let mut pool = make_pool(balance_a, balance_b, fee, flatness);
        let before = pool_invariant(&pool);
        let amount_in = Amount::new((balance_a / 1_000).max(1));

        let Ok(quote) = pool.quote_out_given_in(&coin_id(1), &coin_id(2), amount_in, &newton())
        else {
            return Ok(());
        };
        if quote.amount_out().is_zero() {
            return Ok(());
        }
        let Ok(()) = pool.apply_swap(&quote) else {
            return Ok(());
        };
        let after = pool_invariant(&pool);
        prop_assert!(
            after >= before * (1.0 - 1e-9),
            "invariant shrank: {after} < {before}"
        );
    }

    #[test]
    fn prop_conservation_under_split(
        balance_a in balance_strategy(),
        balance_b in balance_strategy(),
        fee in fee_strategy(),
        amount in 1_000_000u128..=100_000_000u128,
    ) {
        let snapshot = snapshot(vec![
            make_pool(balance_a, balance_b, fee, 0.0),
            make_pool(balance_b, balance_a, fee, 0.5),
        ]);
        let Ok(router) = Router::new(RouterConfig::default()) else {
            panic!("valid config");
        };
        let Ok(spec) = TradeSpec::given_in(Amount::new(amount)) else {
            return Ok(());
        };
        let Ok(complete) = router.complete_route(&snapshot, coin_id(1), coin_id(2), spec)
        else {
            return Ok(());
        };
        if complete.routes().is_empty() {
            return Ok(());
        }
        let route_sum: u128 = complete
            .routes()
            .iter()
            .map(|route| route.input().amount().get())
            .sum();
        prop_assert_eq!(route_sum, amount);
        prop_assert_eq!(complete.input().amount().get(), amount);
    }

    #[test]
    fn prop_determinism(
        balance_a in balance_strategy(),
        balance_b in balance_strategy(),
        fee in fee_strategy(),
        flatness in flatness_strategy(),
        amount in 1_000u128..=1_000_000_000u128,
    ) {
        let snapshot = snapshot(vec![
            make_pool(balance_a, balance_b, fee, flatness),
            make_pool(balance_b, balance_a, fee, flatness),
        ]);
        let Ok(router) = Router::new(RouterConfig::default()) else {
            panic!("valid config");
        };
        let Ok(spec) = TradeSpec::given_in(Amount::new(amount)) else {
            return Ok(());
        };
        let first = router.complete_route(&snapshot, coin_id(1), coin_id(2), spec);
        let second = router.complete_route(&snapshot, coin_id(1), coin_id(2), spec);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_hop_bound(
        balance in balance_strategy(),
        amount in 1_000u128..=10_000_000u128,
    ) {
        // Chain 1-3-4-2 plus direct 1-2: candidates of both lengths.
        let mut pools = vec![make_pool(balance, balance, 0.003, 0.0)];
        for (a, b) in [(1u8, 3u8), (3, 4), (4, 2)] {
            let Ok(state_a) = CoinState::new(
                Amount::new(balance),
                fraction(0.5),
                fraction(0.003),
                fraction(0.003),
            ) else {
                panic!("valid coin state");
            };
            let Ok(pool) = Pool::new(
                [(coin_id(a), state_a), (coin_id(b), state_a)],
                Fraction::ZERO,
                Amount::ZERO,
            ) else {
                panic!("valid pool");
            };
            pools.push(pool);
        }
        let snapshot = snapshot(pools);
        let Ok(router) = Router::new(RouterConfig::default()) else {
            panic!("valid config");
        };
        let Ok(spec) = TradeSpec::given_in(Amount::new(amount)) else {
            return Ok(());
        };
        let Ok(complete) = router.complete_route(&snapshot, coin_id(1), coin_id(2), spec)
        else {
            return Ok(());
        };
        for route in complete.routes() {
            prop_assert!(route.hop_count() <= router.config().max_route_length);
        }
        prop_assert!(
            complete.hop_count() <= router.config().max_pool_hops_for_complete_route
        );
    }
}
