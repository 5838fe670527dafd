use anyhow::{Context, Result};
use clap::Parser;
use fundamental_analysis::IntrinsicValueEstimator;
use std::fs::File;
use technical_analysis::MovingAverageEngine;

mod cli;
mod config;
mod report;
mod source;

use cli::Cli;
use config::DashboardConfig;
use source::SnapshotSource;

fn init_tracing(json_logging: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env, parse args, init tracing
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let mut config = DashboardConfig::from_env()?;
    init_tracing(config.json_logging);

    if let Some(windows) = cli.windows.clone() {
        config.windows = windows;
    }

    tracing::info!("Starting stock dashboard");
    tracing::info!(
        "  DCF: growth {:.1}%, discount {:.1}%, terminal growth {:.1}%, {} years",
        config.assumptions.growth_rate * 100.0,
        config.assumptions.discount_rate * 100.0,
        config.assumptions.terminal_growth_rate * 100.0,
        config.assumptions.projection_years
    );
    tracing::info!("  Moving average windows: {:?}", config.windows);

    // 2. Engines
    let engine = MovingAverageEngine::new(config.windows.iter().copied())
        .context("invalid moving average windows")?;
    let estimator = IntrinsicValueEstimator::new(config.assumptions);

    // 3. Data
    let source = SnapshotSource::load(&cli.input)
        .await
        .with_context(|| format!("failed to load snapshot {}", cli.input.display()))?;
    let symbol = cli
        .symbol
        .clone()
        .unwrap_or_else(|| source.symbol().to_string());

    // 4. Report
    let report = report::build_report(&source, &symbol, &engine, &estimator)
        .await
        .with_context(|| format!("failed to build dashboard for {}", symbol))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }

    // 5. CSV download
    if let Some(dir) = &cli.csv_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(report.summary.file_name());
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        report
            .summary
            .write_csv(file)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Financial summary written to {}", path.display());
    }

    Ok(())
}
