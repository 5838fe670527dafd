//! Command-line arguments for the dashboard.
//!
//! ```bash
//! stock-dashboard --input snapshots/aapl.json
//! stock-dashboard --input snapshots/aapl.json --windows 7,50,200 --csv-dir out/
//! stock-dashboard --input snapshots/aapl.json --json
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Stock intelligence dashboard
///
/// Renders price trends with moving averages, a simple DCF intrinsic value
/// estimate and a downloadable financial summary from a market data snapshot.
#[derive(Debug, Parser)]
#[command(name = "stock-dashboard", author, version, about)]
pub struct Cli {
    /// Snapshot file (JSON) with prices, profile and cash flows.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Ticker to render. Defaults to the snapshot's symbol.
    #[arg(long)]
    pub symbol: Option<String>,

    /// Moving-average windows, e.g. `7,50,200`. Overrides MA_WINDOWS.
    #[arg(long, value_delimiter = ',')]
    pub windows: Option<Vec<usize>>,

    /// Directory to write `<SYMBOL>_financials.csv` into.
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// Print the report as JSON instead of text panels.
    #[arg(long)]
    pub json: bool,
}
