use analysis_core::{
    AnalysisError, CompanyProfile, IncomeStatementRow, MarketDataSource, PriceSeries,
    ValuationResult,
};
use fundamental_analysis::{FinancialSummary, IntrinsicValueEstimator, NOT_AVAILABLE};
use serde::Serialize;
use std::fmt::Write;
use technical_analysis::{MovingAverageEngine, MovingAverageSeries};

/// Fiscal years shown in the income statement panel.
const INCOME_YEARS: usize = 5;

/// Valuation panel state. A failed estimate is shown, not propagated.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValuationPanel {
    Estimated(ValuationResult),
    Unavailable { reason: String },
}

impl ValuationPanel {
    pub fn result(&self) -> Option<&ValuationResult> {
        match self {
            ValuationPanel::Estimated(result) => Some(result),
            ValuationPanel::Unavailable { .. } => None,
        }
    }
}

/// Everything one dashboard page shows for a ticker.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub symbol: String,
    pub profile: CompanyProfile,
    pub prices: PriceSeries,
    pub moving_averages: Vec<MovingAverageSeries>,
    pub valuation: ValuationPanel,
    pub income_statements: Vec<IncomeStatementRow>,
    pub summary: FinancialSummary,
}

/// Pull every input from `source` and run both engines.
///
/// Price, profile and income data are required. Cash-flow problems only mark
/// the valuation panel unavailable.
pub async fn build_report(
    source: &dyn MarketDataSource,
    symbol: &str,
    engine: &MovingAverageEngine,
    estimator: &IntrinsicValueEstimator,
) -> Result<DashboardReport, AnalysisError> {
    let (prices, profile, income_statements, cash_flows) = tokio::join!(
        source.price_history(symbol),
        source.company_profile(symbol),
        source.income_statements(symbol),
        source.operating_cash_flows(symbol),
    );
    let prices = prices?;
    let profile = profile?;
    let income_statements = income_statements?;

    let moving_averages = engine.compute(&prices);

    let valuation = match cash_flows
        .and_then(|history| estimator.estimate(&history, profile.shares_outstanding))
    {
        Ok(result) => ValuationPanel::Estimated(result),
        Err(e) => {
            tracing::warn!("{}: intrinsic value unavailable: {}", symbol, e);
            ValuationPanel::Unavailable {
                reason: e.to_string(),
            }
        }
    };

    let summary = FinancialSummary::new(symbol, &profile, valuation.result());

    Ok(DashboardReport {
        symbol: symbol.trim().to_uppercase(),
        profile,
        prices,
        moving_averages,
        valuation,
        income_statements,
        summary,
    })
}

fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

fn number(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl DashboardReport {
    /// Plain-text rendering of the dashboard panels.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) -> std::fmt::Result {
        let p = &self.profile;

        writeln!(out, "=== {} ({}) ===", text(&p.name), self.symbol)?;
        writeln!(out, "Sector: {}", text(&p.sector))?;
        writeln!(out, "Industry: {}", text(&p.industry))?;
        writeln!(out, "Exchange: {}", text(&p.exchange))?;
        writeln!(out, "Website: {}", text(&p.website))?;
        writeln!(out, "Description: {}", text(&p.description))?;
        writeln!(out)?;

        writeln!(out, "--- Price ---")?;
        writeln!(out, "Current Price: {}", money(p.current_price))?;
        writeln!(out, "52-Week High: {}", money(p.fifty_two_week_high))?;
        writeln!(out, "52-Week Low: {}", money(p.fifty_two_week_low))?;
        writeln!(out, "Market Cap: {}", money(p.market_cap))?;
        writeln!(out)?;

        writeln!(out, "--- Financial Metrics ---")?;
        writeln!(out, "Revenue (TTM): {}", money(p.revenue_ttm))?;
        writeln!(out, "EBITDA (TTM): {}", money(p.ebitda_ttm))?;
        writeln!(out, "Free Cash Flow (FCF): {}", money(p.free_cash_flow))?;
        writeln!(out, "Enterprise Value (EV): {}", money(p.enterprise_value))?;
        writeln!(out)?;

        writeln!(out, "--- Price Trends with Moving Averages ---")?;
        match self.prices.latest() {
            Some(last) => writeln!(
                out,
                "Last Close: ${:.2} on {}",
                last.close,
                last.timestamp.format("%Y-%m-%d")
            )?,
            None => writeln!(out, "Last Close: {}", NOT_AVAILABLE)?,
        }
        for series in &self.moving_averages {
            writeln!(
                out,
                "{}-Day MA: {} ({} chart points)",
                series.window(),
                money(series.latest()),
                series.chart_points(&self.prices).len()
            )?;
        }
        writeln!(out)?;

        writeln!(out, "--- Analyst Target Price ---")?;
        writeln!(out, "Target Mean: {}", money(p.target_mean_price))?;
        writeln!(out, "Target High: {}", money(p.target_high_price))?;
        writeln!(out, "Target Low: {}", money(p.target_low_price))?;
        writeln!(out)?;

        writeln!(out, "--- Intrinsic Value Estimate (Simple DCF) ---")?;
        match &self.valuation {
            ValuationPanel::Estimated(result) => {
                writeln!(
                    out,
                    "Intrinsic Value: {:.2}B (explicit {:.2}B + terminal {:.2}B)",
                    result.intrinsic_value_total(),
                    result.explicit_value(),
                    result.terminal_value()
                )?;
                match result.value_per_share() {
                    Some(v) => writeln!(out, "Estimated Intrinsic Value/Share: ${:.2}", v)?,
                    None => writeln!(
                        out,
                        "Estimated Intrinsic Value/Share: unavailable (no share count)"
                    )?,
                }
                if let Some(mos) = p.current_price.and_then(|price| result.margin_of_safety(price)) {
                    writeln!(out, "Margin of Safety: {:.1}%", mos * 100.0)?;
                }
            }
            ValuationPanel::Unavailable { reason } => {
                writeln!(
                    out,
                    "Insufficient data for intrinsic value calculation ({})",
                    reason
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "--- Income Statement ---")?;
        if self.income_statements.is_empty() {
            writeln!(out, "{}", NOT_AVAILABLE)?;
        } else {
            writeln!(out, "{:<12} {:>20} {:>20} {:>20}", "date", "revenue", "ebitda", "netIncome")?;
            for row in self.income_statements.iter().take(INCOME_YEARS) {
                writeln!(
                    out,
                    "{:<12} {:>20} {:>20} {:>20}",
                    row.date.to_string(),
                    number(row.revenue),
                    number(row.ebitda),
                    number(row.net_income)
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "--- Financial Summary ---")?;
        for (label, value) in self.summary.display_rows() {
            writeln!(out, "{}: {}", label, value)?;
        }

        Ok(())
    }
}
