use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error(
        "Divergent terminal value: discount rate {discount_rate} must exceed terminal growth rate {terminal_growth_rate}"
    )]
    DivergentTerminalValue {
        discount_rate: f64,
        terminal_growth_rate: f64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Raised by data collaborators only; the estimation core never produces it.
    #[error("Data source error: {0}")]
    DataSource(String),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::InvalidInput(err.to_string())
    }
}
