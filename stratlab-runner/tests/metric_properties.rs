//! Property tests for metric invariants.

use proptest::prelude::*;
use stratlab_runner::metrics::{
    cagr, max_drawdown, profit_factor, sharpe, sortino, volatility, win_rate,
};

fn arb_equity() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1_000.0..200_000.0_f64, 1..200)
}

fn arb_returns() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.1..0.1_f64, 0..200)
}

proptest! {
    #[test]
    fn max_drawdown_is_never_positive(equity in arb_equity()) {
        prop_assert!(max_drawdown(&equity) <= 0.0);
    }

    #[test]
    fn max_drawdown_of_monotonic_curve_is_zero(
        start in 1_000.0..50_000.0_f64,
        steps in prop::collection::vec(0.0..500.0_f64, 1..100),
    ) {
        let mut equity = vec![start];
        for step in steps {
            equity.push(equity.last().unwrap() + step);
        }
        prop_assert_eq!(max_drawdown(&equity), 0.0);
    }

    #[test]
    fn ratio_metrics_are_always_finite(returns in arb_returns()) {
        prop_assert!(sharpe(&returns, 0.0, 252.0).is_finite());
        prop_assert!(sortino(&returns, 0.0, 252.0).is_finite());
        prop_assert!(volatility(&returns, 252.0).is_finite());
        prop_assert!(volatility(&returns, 252.0) >= 0.0);
    }

    #[test]
    fn cagr_sign_follows_total_return(equity in arb_equity()) {
        let c = cagr(&equity, 252.0);
        prop_assert!(c.is_finite());
        if equity.len() >= 2 {
            let first = equity[0];
            let last = *equity.last().unwrap();
            if last > first {
                prop_assert!(c >= 0.0);
            } else if last < first {
                prop_assert!(c <= 0.0);
            }
        }
    }
}

#[test]
fn empty_inputs_recover_to_zero() {
    assert_eq!(win_rate(&[]), 0.0);
    assert_eq!(profit_factor(&[]), 0.0);
    assert_eq!(sharpe(&[], 0.0, 252.0), 0.0);
    assert_eq!(sortino(&[], 0.0, 252.0), 0.0);
    assert_eq!(volatility(&[], 252.0), 0.0);
    assert_eq!(max_drawdown(&[]), 0.0);
    assert_eq!(cagr(&[], 252.0), 0.0);
}
