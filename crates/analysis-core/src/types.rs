use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::stats;

/// Raw cash-flow units per billion. Cash flow is projected in billions and
/// scaled back up when dividing by the share count.
pub const BILLION: f64 = 1e9;

/// A single closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// Chronologically ordered closing prices.
///
/// Construction rejects unordered or duplicate timestamps and closes that are
/// negative or not finite, so every engine can rely on a clean series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AnalysisError> {
        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close < 0.0 {
                return Err(AnalysisError::InvalidInput(format!(
                    "closing price at index {} is {}, expected a finite value >= 0",
                    i, point.close
                )));
            }
        }

        if let Some(i) = points
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(AnalysisError::InvalidInput(format!(
                "price series is not strictly ascending at index {} ({} follows {})",
                i + 1,
                points[i + 1].timestamp,
                points[i].timestamp
            )));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = AnalysisError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

/// Operating cash-flow samples in raw currency units, typically annual.
///
/// Only the mean is ever used, so sample order does not matter. The history is
/// never empty and never holds a non-finite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashFlowHistory {
    samples: Vec<f64>,
}

impl CashFlowHistory {
    pub fn new(samples: Vec<f64>) -> Result<Self, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::InsufficientData(
                "No cash flow history available".to_string(),
            ));
        }
        if let Some(i) = stats::first_non_finite(&samples) {
            return Err(AnalysisError::InvalidInput(format!(
                "cash flow sample at index {} is {}",
                i, samples[i]
            )));
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn mean(&self) -> f64 {
        // Non-empty by construction.
        stats::mean(&self.samples).unwrap_or(f64::NAN)
    }
}

impl TryFrom<Vec<f64>> for CashFlowHistory {
    type Error = AnalysisError;

    fn try_from(samples: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(samples)
    }
}

impl From<CashFlowHistory> for Vec<f64> {
    fn from(history: CashFlowHistory) -> Self {
        history.samples
    }
}

/// Fixed DCF assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    pub growth_rate: f64,
    pub discount_rate: f64,
    pub terminal_growth_rate: f64,
    pub projection_years: u32,
}

impl Default for ValuationAssumptions {
    fn default() -> Self {
        Self {
            growth_rate: 0.08,
            discount_rate: 0.10,
            terminal_growth_rate: 0.02,
            projection_years: 5,
        }
    }
}

impl ValuationAssumptions {
    /// Check the assumptions describe a convergent model.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let rates = [
            ("growth_rate", self.growth_rate),
            ("discount_rate", self.discount_rate),
            ("terminal_growth_rate", self.terminal_growth_rate),
        ];
        for (name, value) in rates {
            if !value.is_finite() {
                return Err(AnalysisError::InvalidInput(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.discount_rate <= -1.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "discount_rate must be greater than -1, got {}",
                self.discount_rate
            )));
        }
        if self.projection_years == 0 {
            return Err(AnalysisError::InvalidInput(
                "projection_years must be at least 1".to_string(),
            ));
        }
        if self.discount_rate <= self.terminal_growth_rate {
            return Err(AnalysisError::DivergentTerminalValue {
                discount_rate: self.discount_rate,
                terminal_growth_rate: self.terminal_growth_rate,
            });
        }
        Ok(())
    }
}

/// Outcome of a two-stage DCF run. Values other than `value_per_share` are in
/// billions of the cash-flow currency. Only built through [`ValuationResult::new`],
/// which keeps the total equal to its two stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    base_fcf: f64,
    explicit_value: f64,
    terminal_value: f64,
    intrinsic_value_total: f64,
    value_per_share: Option<f64>,
    assumptions: ValuationAssumptions,
}

impl ValuationResult {
    pub fn new(
        base_fcf: f64,
        explicit_value: f64,
        terminal_value: f64,
        value_per_share: Option<f64>,
        assumptions: ValuationAssumptions,
    ) -> Self {
        Self {
            base_fcf,
            explicit_value,
            terminal_value,
            intrinsic_value_total: explicit_value + terminal_value,
            value_per_share,
            assumptions,
        }
    }

    /// Mean cash flow the projection starts from.
    pub fn base_fcf(&self) -> f64 {
        self.base_fcf
    }

    /// Present value of the explicit projection years.
    pub fn explicit_value(&self) -> f64 {
        self.explicit_value
    }

    /// Gordon-growth terminal value discounted back to today.
    pub fn terminal_value(&self) -> f64 {
        self.terminal_value
    }

    pub fn intrinsic_value_total(&self) -> f64 {
        self.intrinsic_value_total
    }

    /// `None` when no usable share count was supplied.
    pub fn value_per_share(&self) -> Option<f64> {
        self.value_per_share
    }

    pub fn assumptions(&self) -> &ValuationAssumptions {
        &self.assumptions
    }

    /// Market price divided by the per-share estimate.
    pub fn price_to_value(&self, current_price: f64) -> Option<f64> {
        let value = self.value_per_share?;
        if !current_price.is_finite() || current_price <= 0.0 || value == 0.0 {
            return None;
        }
        Some(current_price / value)
    }

    /// Fraction of the per-share estimate left over after paying `current_price`.
    /// Negative when the market price is above the estimate.
    pub fn margin_of_safety(&self, current_price: f64) -> Option<f64> {
        let value = self.value_per_share?;
        if !current_price.is_finite() || current_price <= 0.0 || value <= 0.0 {
            return None;
        }
        Some((value - current_price) / value)
    }
}

/// Company profile and headline metrics as reported by a fundamentals
/// provider. Every field is optional: providers omit fields freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub exchange: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub current_price: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub price_to_book: Option<f64>,
    pub target_mean_price: Option<f64>,
    pub target_high_price: Option<f64>,
    pub target_low_price: Option<f64>,
    pub revenue_ttm: Option<f64>,
    pub ebitda_ttm: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub enterprise_value: Option<f64>,
    pub shares_outstanding: Option<f64>,
}

/// One period of the income statement table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementRow {
    pub date: NaiveDate,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub ebitda: Option<f64>,
    #[serde(default)]
    pub net_income: Option<f64>,
}
