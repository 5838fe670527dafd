use analysis_core::{AnalysisError, PriceSeries};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::indicators::sma_aligned;

/// Windows both dashboards chart: weekly, monthly, and the classic 50/100/200.
pub const DEFAULT_WINDOWS: [usize; 5] = [7, 28, 50, 100, 200];

/// Moving averages for one window, aligned index-for-index with the price
/// series they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageSeries {
    window: usize,
    values: Vec<Option<f64>>,
}

/// A chartable row: a price point that has a defined average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub average: f64,
}

impl MovingAverageSeries {
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Most recent average, `None` when the window never filled.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Rows with a defined average, paired with the prices they came from.
    /// Undefined warm-up rows are dropped.
    pub fn chart_points(&self, prices: &PriceSeries) -> Vec<ChartPoint> {
        prices
            .points()
            .iter()
            .zip(&self.values)
            .filter_map(|(point, &average)| {
                average.map(|average| ChartPoint {
                    timestamp: point.timestamp,
                    close: point.close,
                    average,
                })
            })
            .collect()
    }
}

/// Computes simple moving averages for a fixed set of windows.
#[derive(Debug, Clone)]
pub struct MovingAverageEngine {
    windows: Vec<usize>,
}

impl MovingAverageEngine {
    /// Build an engine for `windows`. Repeated windows are kept once, at their
    /// first position. A zero window is rejected.
    pub fn new(windows: impl IntoIterator<Item = usize>) -> Result<Self, AnalysisError> {
        let mut unique: Vec<usize> = Vec::new();
        for window in windows {
            if window == 0 {
                return Err(AnalysisError::InvalidInput(
                    "moving average window must be positive".to_string(),
                ));
            }
            if !unique.contains(&window) {
                unique.push(window);
            }
        }
        Ok(Self { windows: unique })
    }

    pub fn windows(&self) -> &[usize] {
        &self.windows
    }

    /// One series per configured window, in configuration order.
    pub fn compute(&self, prices: &PriceSeries) -> Vec<MovingAverageSeries> {
        let closes = prices.closes();

        // Windows share nothing, so each runs on its own rayon task.
        let series: Vec<MovingAverageSeries> = self
            .windows
            .par_iter()
            .map(|&window| MovingAverageSeries {
                window,
                values: sma_aligned(&closes, window),
            })
            .collect();

        tracing::debug!(
            points = closes.len(),
            windows = ?self.windows,
            "computed moving averages"
        );
        series
    }

    /// Single window without building an engine.
    pub fn compute_window(
        prices: &PriceSeries,
        window: usize,
    ) -> Result<MovingAverageSeries, AnalysisError> {
        if window == 0 {
            return Err(AnalysisError::InvalidInput(
                "moving average window must be positive".to_string(),
            ));
        }
        Ok(MovingAverageSeries {
            window,
            values: sma_aligned(&prices.closes(), window),
        })
    }
}

impl Default for MovingAverageEngine {
    fn default() -> Self {
        Self {
            windows: DEFAULT_WINDOWS.to_vec(),
        }
    }
}
