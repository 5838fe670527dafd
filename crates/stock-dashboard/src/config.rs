use analysis_core::ValuationAssumptions;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use technical_analysis::DEFAULT_WINDOWS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    // DCF assumptions
    pub assumptions: ValuationAssumptions,

    // Moving average windows, charted in this order
    pub windows: Vec<usize>,

    // RUST_LOG_FORMAT=json
    pub json_logging: bool,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys take the defaults; set but
    /// malformed keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ValuationAssumptions::default();

        let assumptions = ValuationAssumptions {
            growth_rate: parse_or(&lookup, "DCF_GROWTH_RATE", defaults.growth_rate)?,
            discount_rate: parse_or(&lookup, "DCF_DISCOUNT_RATE", defaults.discount_rate)?,
            terminal_growth_rate: parse_or(
                &lookup,
                "DCF_TERMINAL_GROWTH_RATE",
                defaults.terminal_growth_rate,
            )?,
            projection_years: parse_or(&lookup, "DCF_PROJECTION_YEARS", defaults.projection_years)?,
        };

        let windows = match lookup("MA_WINDOWS") {
            Some(raw) => parse_windows(&raw).context("invalid MA_WINDOWS")?,
            None => DEFAULT_WINDOWS.to_vec(),
        };

        let json_logging = lookup("RUST_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            assumptions,
            windows,
            json_logging,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

/// Parse a comma-separated window list such as `7, 50,200`. Blank entries
/// are skipped, but at least one window is required.
pub fn parse_windows(raw: &str) -> Result<Vec<usize>> {
    let windows = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("window {:?} is not a positive integer", s))
        })
        .collect::<Result<Vec<_>>>()?;
    if windows.is_empty() {
        bail!("no moving average windows in {:?}", raw);
    }
    Ok(windows)
}
