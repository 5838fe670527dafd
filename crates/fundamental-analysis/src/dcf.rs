use analysis_core::{
    AnalysisError, CashFlowHistory, ValuationAssumptions, ValuationResult, BILLION,
};

/// Two-stage discounted cash flow model.
///
/// Stage one projects the mean historical cash flow forward at `growth_rate`
/// for `projection_years`, discounting each year at `discount_rate`. Stage two
/// capitalises the base cash flow with the Gordon growth formula and discounts
/// it back from the end of the horizon.
///
/// Cash flow is carried in billions through the projection and scaled back by
/// [`BILLION`] for the per-share figure.
#[derive(Debug, Clone, Default)]
pub struct IntrinsicValueEstimator {
    assumptions: ValuationAssumptions,
}

impl IntrinsicValueEstimator {
    pub fn new(assumptions: ValuationAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &ValuationAssumptions {
        &self.assumptions
    }

    /// Estimate intrinsic value from a validated cash-flow history.
    ///
    /// `shares_outstanding` that is absent, zero or negative produces a result
    /// without a per-share value. A non-finite share count is invalid input.
    pub fn estimate(
        &self,
        history: &CashFlowHistory,
        shares_outstanding: Option<f64>,
    ) -> Result<ValuationResult, AnalysisError> {
        self.assumptions.validate()?;

        let shares = match shares_outstanding {
            Some(s) if !s.is_finite() => {
                return Err(AnalysisError::InvalidInput(format!(
                    "shares outstanding must be finite, got {}",
                    s
                )));
            }
            Some(s) if s > 0.0 => Some(s),
            _ => None,
        };

        let years = i32::try_from(self.assumptions.projection_years).map_err(|_| {
            AnalysisError::InvalidInput(format!(
                "projection_years {} is out of range",
                self.assumptions.projection_years
            ))
        })?;

        let growth_rate = self.assumptions.growth_rate;
        let discount_rate = self.assumptions.discount_rate;
        let terminal_growth = self.assumptions.terminal_growth_rate;

        let base_fcf = history.mean() / BILLION;

        let explicit_value: f64 = (1..=years)
            .map(|year| {
                base_fcf * (1.0_f64 + growth_rate).powi(year)
                    / (1.0_f64 + discount_rate).powi(year)
            })
            .sum();

        let terminal_value =
            base_fcf * (1.0 + terminal_growth) / (discount_rate - terminal_growth);
        let terminal_pv = terminal_value / (1.0_f64 + discount_rate).powi(years);

        let total = explicit_value + terminal_pv;
        if !total.is_finite() {
            return Err(AnalysisError::InvalidInput(format!(
                "valuation is not finite (base cash flow {} B over {} years)",
                base_fcf, years
            )));
        }

        let value_per_share = match shares.map(|s| total * BILLION / s) {
            Some(v) if !v.is_finite() => {
                return Err(AnalysisError::InvalidInput(format!(
                    "value per share is not finite (total {} B over {:e} shares)",
                    total,
                    shares.unwrap_or_default()
                )));
            }
            other => other,
        };

        tracing::debug!(
            base_fcf,
            explicit_value,
            terminal_pv,
            total,
            value_per_share = ?value_per_share,
            "intrinsic value estimated"
        );

        Ok(ValuationResult::new(
            base_fcf,
            explicit_value,
            terminal_pv,
            value_per_share,
            self.assumptions,
        ))
    }

    /// Validate raw collaborator samples, then estimate.
    pub fn estimate_raw(
        &self,
        cash_flows: &[f64],
        shares_outstanding: Option<f64>,
    ) -> Result<ValuationResult, AnalysisError> {
        let history = CashFlowHistory::new(cash_flows.to_vec())?;
        self.estimate(&history, shares_outstanding)
    }
}
