//! Offline market data: a JSON snapshot captured from the data providers.
//!
//! ```json
//! {
//!   "symbol": "AAPL",
//!   "profile": { "name": "Apple Inc.", "sector": "Technology", "shares_outstanding": 1.5e10 },
//!   "prices": [ { "timestamp": "2024-01-02T21:00:00Z", "close": 185.64 } ],
//!   "operating_cash_flows": [ 1.10e11, 1.22e11, 1.04e11 ],
//!   "income_statements": [ { "date": "2023-09-30", "revenue": 3.83e11 } ]
//! }
//! ```

use analysis_core::{
    AnalysisError, CashFlowHistory, CompanyProfile, IncomeStatementRow, MarketDataSource,
    PriceSeries,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub symbol: String,
    #[serde(default)]
    pub profile: CompanyProfile,
    pub prices: PriceSeries,
    #[serde(default)]
    pub operating_cash_flows: Vec<f64>,
    #[serde(default)]
    pub income_statements: Vec<IncomeStatementRow>,
}

pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub async fn load(path: &Path) -> Result<Self, AnalysisError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AnalysisError::DataSource(format!("{}: {}", path.display(), e)))?;
        let source = Self::from_json(&raw)?;
        tracing::info!(
            "Loaded snapshot for {} from {} ({} prices)",
            source.symbol(),
            path.display(),
            source.snapshot.prices.len()
        );
        Ok(source)
    }

    pub fn from_json(raw: &str) -> Result<Self, AnalysisError> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        Ok(Self { snapshot })
    }

    pub fn symbol(&self) -> &str {
        &self.snapshot.symbol
    }

    fn check_symbol(&self, symbol: &str) -> Result<(), AnalysisError> {
        if self.snapshot.symbol.eq_ignore_ascii_case(symbol.trim()) {
            Ok(())
        } else {
            Err(AnalysisError::DataSource(format!(
                "snapshot holds {}, not {}",
                self.snapshot.symbol, symbol
            )))
        }
    }
}

#[async_trait]
impl MarketDataSource for SnapshotSource {
    async fn price_history(&self, symbol: &str) -> Result<PriceSeries, AnalysisError> {
        self.check_symbol(symbol)?;
        Ok(self.snapshot.prices.clone())
    }

    async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile, AnalysisError> {
        self.check_symbol(symbol)?;
        Ok(self.snapshot.profile.clone())
    }

    async fn operating_cash_flows(&self, symbol: &str) -> Result<CashFlowHistory, AnalysisError> {
        self.check_symbol(symbol)?;
        CashFlowHistory::new(self.snapshot.operating_cash_flows.clone())
    }

    async fn income_statements(
        &self,
        symbol: &str,
    ) -> Result<Vec<IncomeStatementRow>, AnalysisError> {
        self.check_symbol(symbol)?;
        Ok(self.snapshot.income_statements.clone())
    }
}
