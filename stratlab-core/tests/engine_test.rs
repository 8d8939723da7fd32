//! End-to-end engine tests over synthetic market data.

use chrono::NaiveDate;
use stratlab_core::data::{DataProvider, SyntheticProvider};
use stratlab_core::domain::Bar;
use stratlab_core::engine::BacktestEngine;
use stratlab_core::strategies::StrategySpec;

fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

#[test]
fn every_default_strategy_completes_on_a_year_of_data() {
    let bars = SyntheticProvider::new(7).fetch("SPY", "1y", "1d").unwrap();
    let engine = BacktestEngine::new(10_000.0);

    for spec in StrategySpec::all_defaults() {
        let run = engine.run(&bars, &spec).unwrap();
        assert_eq!(run.ledger.len(), bars.len(), "strategy {}", spec.kind());
        assert_eq!(run.ledger.rows()[0].position, 0);
        assert!(run
            .ledger
            .equity_curve()
            .iter()
            .all(|e| e.is_finite() && *e > 0.0));
    }
}

#[test]
fn positions_lag_generated_signals_by_one_bar() {
    let bars = SyntheticProvider::new(11).fetch("QQQ", "6mo", "1d").unwrap();
    let spec = StrategySpec::Sma { fast: 5, slow: 15 };

    let signals = spec.build().generate(&bars);
    let run = BacktestEngine::new(10_000.0).run(&bars, &spec).unwrap();

    let positions = run.ledger.positions();
    assert_eq!(positions[0], 0);
    for t in 1..bars.len() {
        assert_eq!(positions[t], signals[t - 1], "lag violated at bar {t}");
    }
}

#[test]
fn trending_market_rewards_the_sma_crossover() {
    // A clean ramp: the crossover goes long early and stays long, so final
    // equity must beat flat capital.
    let closes: Vec<f64> = (0..120).map(|i| 100.0 * 1.005_f64.powi(i)).collect();
    let bars = make_bars(&closes);

    let run = BacktestEngine::new(10_000.0)
        .run(&bars, &StrategySpec::Sma { fast: 5, slow: 20 })
        .unwrap();

    assert!(run.ledger.final_equity().unwrap() > 10_000.0);
    // One entry, never exited, force-closed at the end.
    assert_eq!(run.trades.len(), 1);
    assert!(run.trades[0].return_pct > 0.0);
}

#[test]
fn flat_market_produces_flat_equity() {
    let bars = make_bars(&vec![100.0; 80]);
    let run = BacktestEngine::new(10_000.0)
        .run(&bars, &StrategySpec::Macd { fast: 12, slow: 26, signal: 9 })
        .unwrap();

    assert!(run.trades.is_empty());
    for row in run.ledger.rows() {
        assert_eq!(row.equity, 10_000.0);
    }
}

#[test]
fn benchmark_tracks_the_asset_exactly() {
    let bars = SyntheticProvider::new(3).fetch("IWM", "6mo", "1d").unwrap();
    let run = BacktestEngine::new(10_000.0)
        .run(&bars, &StrategySpec::Ema { fast: 12, slow: 26 })
        .unwrap();

    let shares = 10_000.0 / bars[0].close;
    for (row, bar) in run.ledger.rows().iter().zip(&bars) {
        assert!((row.benchmark_equity - shares * bar.close).abs() < 1e-9);
    }
}
