//! StratLab CLI — run, study, and project commands.
//!
//! Commands:
//! - `run` — execute one backtest and print metrics plus the trade log
//! - `study` — compare every strategy variant on one ticker
//! - `project` — Monte Carlo projection from a strategy's historical returns
//!
//! All results stay in memory; `--json` prints the full report instead of
//! the human-readable summary.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use stratlab_core::data::{DataProvider, SyntheticProvider, YahooProvider};
use stratlab_runner::{
    evaluate_strategies, montecarlo, rank_strategies, run_backtest_from_bars,
    run_single_backtest, BacktestConfig, BacktestReport, MonteCarloConfig, RiskFocus,
    StrategyConfig,
};

#[derive(Parser)]
#[command(name = "stratlab", about = "StratLab CLI — rule-based strategy backtester")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one backtest and print metrics plus the trade log.
    Run {
        /// Path to a TOML config file (overrides the flags below).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Ticker symbol (e.g. AAPL).
        #[arg(long, default_value = "AAPL")]
        ticker: String,

        /// Period token: 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, max.
        #[arg(long, default_value = "1y")]
        period: String,

        /// Strategy kind: sma, ema, rsi, bollinger, macd.
        #[arg(long, default_value = "sma")]
        strategy: String,

        /// Strategy parameter override, repeatable (e.g. --param fast=5).
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        /// Initial capital.
        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,

        /// Use the seeded synthetic data provider instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Print the full report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compare every strategy variant on one ticker.
    Study {
        #[arg(long, default_value = "AAPL")]
        ticker: String,

        #[arg(long, default_value = "1y")]
        period: String,

        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,

        /// Ranking profile: return, defensive, balanced.
        #[arg(long, default_value = "balanced")]
        focus: String,

        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Monte Carlo projection from a strategy's historical returns.
    Project {
        #[arg(long, default_value = "AAPL")]
        ticker: String,

        #[arg(long, default_value = "1y")]
        period: String,

        #[arg(long, default_value = "sma")]
        strategy: String,

        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,

        /// Projection horizon in years.
        #[arg(long, default_value_t = 5)]
        years: usize,

        /// Number of simulated paths.
        #[arg(long, default_value_t = 200)]
        sims: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            ticker,
            period,
            strategy,
            params,
            capital,
            synthetic,
            json,
        } => {
            let config = match config {
                Some(path) => BacktestConfig::from_toml_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => BacktestConfig {
                    ticker,
                    period,
                    interval: "1d".to_string(),
                    initial_capital: capital,
                    strategy: StrategyConfig {
                        kind: strategy,
                        params: parse_params(&params)?,
                    },
                },
            };

            let provider = make_provider(synthetic);
            let report = run_single_backtest(&config, provider.as_ref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Study {
            ticker,
            period,
            capital,
            focus,
            synthetic,
        } => {
            let focus = parse_focus(&focus)?;
            let provider = make_provider(synthetic);
            let bars = provider.fetch(&ticker, &period, "1d")?;

            let entries = evaluate_strategies(&bars, capital)?;
            let ranked = rank_strategies(entries, focus);

            println!("Study: {ticker} over {period} ({} bars)\n", bars.len());
            println!(
                "{:<12} {:>8} {:>10} {:>12} {:>8} {:>8} {:>10}",
                "strategy", "score", "sharpe", "max_dd", "trades", "win%", "final_eq"
            );
            for entry in &ranked {
                let m = &entry.metrics;
                println!(
                    "{:<12} {:>8.3} {:>10.2} {:>11.2}% {:>8} {:>7.1}% {:>10.0}",
                    entry.strategy.kind(),
                    entry.score,
                    m.sharpe,
                    m.max_drawdown * 100.0,
                    m.trade_count,
                    m.win_rate * 100.0,
                    m.final_equity,
                );
            }
        }

        Commands::Project {
            ticker,
            period,
            strategy,
            capital,
            years,
            sims,
            seed,
            synthetic,
        } => {
            let spec = stratlab_core::strategies::StrategySpec::default_for(&strategy)?;
            let provider = make_provider(synthetic);
            let bars = provider.fetch(&ticker, &period, "1d")?;

            let report = run_backtest_from_bars(&bars, &spec, capital)?;
            let config = MonteCarloConfig {
                years,
                sims,
                seed,
                ..MonteCarloConfig::default()
            };
            let projection = montecarlo::project(
                &report.ledger.strategy_returns(),
                report.metrics.final_equity,
                &config,
            )?;

            println!(
                "Projection: {} on {ticker}, {years}y horizon, {sims} paths",
                spec.kind()
            );
            println!("  start equity: {:>12.2}", projection.start_equity);
            println!("  p10:          {:>12.2}", projection.p10);
            println!("  p50:          {:>12.2}", projection.p50);
            println!("  p90:          {:>12.2}", projection.p90);
        }
    }

    Ok(())
}

fn make_provider(synthetic: bool) -> Box<dyn DataProvider> {
    if synthetic {
        Box::new(SyntheticProvider::default())
    } else {
        Box::new(YahooProvider::new())
    }
}

fn parse_params(raw: &[String]) -> Result<BTreeMap<String, f64>> {
    let mut params = BTreeMap::new();
    for entry in raw {
        let (name, value) = entry
            .split_once('=')
            .with_context(|| format!("expected NAME=VALUE, got '{entry}'"))?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("parameter '{name}' is not a number: '{value}'"))?;
        params.insert(name.to_string(), value);
    }
    Ok(params)
}

fn parse_focus(raw: &str) -> Result<RiskFocus> {
    match raw {
        "return" => Ok(RiskFocus::Return),
        "defensive" => Ok(RiskFocus::Defensive),
        "balanced" => Ok(RiskFocus::Balanced),
        other => bail!("unknown risk focus '{other}' (return, defensive, balanced)"),
    }
}

fn print_report(report: &BacktestReport) {
    let m = &report.metrics;
    println!(
        "Backtest: {} {} on {} ({} bars, {} .. {})",
        report.strategy.kind(),
        report.period,
        report.ticker,
        report.bar_count,
        report.start_date,
        report.end_date,
    );
    println!("  run id:            {}", report.run_id);
    println!("  initial capital:   {:>12.2}", report.initial_capital);
    println!("  final equity:      {:>12.2}", m.final_equity);
    println!("  total return:      {:>11.2}%", m.total_return * 100.0);
    println!("  CAGR:              {:>11.2}%", m.cagr * 100.0);
    println!("  sharpe:            {:>12.2}", m.sharpe);
    println!("  sortino:           {:>12.2}", m.sortino);
    println!("  volatility:        {:>11.2}%", m.volatility * 100.0);
    println!("  max drawdown:      {:>11.2}%", m.max_drawdown * 100.0);
    println!("  benchmark equity:  {:>12.2}", m.final_benchmark_equity);
    println!("  benchmark sharpe:  {:>12.2}", m.benchmark_sharpe);
    println!(
        "  trades: {} (win rate {:.1}%, profit factor {:.2})",
        m.trade_count,
        m.win_rate * 100.0,
        m.profit_factor,
    );

    if !report.trades.is_empty() {
        println!("\n  {:<7} {:>11} {:>11} {:>10} {:>10} {:>9}", "dir", "entry", "exit", "entry_px", "exit_px", "return");
        for trade in &report.trades {
            println!(
                "  {:<7} {:>11} {:>11} {:>10.2} {:>10.2} {:>8.2}%",
                format!("{:?}", trade.direction),
                trade.entry_date,
                trade.exit_date,
                trade.entry_price,
                trade.exit_price,
                trade.return_pct * 100.0,
            );
        }
    }
}
