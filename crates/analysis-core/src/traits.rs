use async_trait::async_trait;
use crate::{AnalysisError, CashFlowHistory, CompanyProfile, IncomeStatementRow, PriceSeries};

/// Supplier of the raw inputs the estimation engines consume.
///
/// Implementations own all I/O concerns (HTTP, files, caching); the engines
/// only ever see the validated values returned here.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Daily closing prices, oldest first.
    async fn price_history(&self, symbol: &str) -> Result<PriceSeries, AnalysisError>;

    async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile, AnalysisError>;

    /// Operating cash flow samples in raw currency units.
    async fn operating_cash_flows(&self, symbol: &str) -> Result<CashFlowHistory, AnalysisError>;

    async fn income_statements(&self, symbol: &str) -> Result<Vec<IncomeStatementRow>, AnalysisError>;
}
