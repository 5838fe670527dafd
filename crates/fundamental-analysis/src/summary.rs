use std::fmt;
use std::io;

use analysis_core::{CompanyProfile, ValuationResult};
use serde::Serialize;

/// Label shown by text panels when a field is missing.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryValue::Text(s) => f.write_str(s),
            SummaryValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Flat key/value table offered as the "financial summary" download.
///
/// Rows keep a fixed order. Missing fields stay `None` here; CSV export writes
/// them as empty cells and [`FinancialSummary::display_rows`] as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    symbol: String,
    rows: Vec<(&'static str, Option<SummaryValue>)>,
}

impl FinancialSummary {
    pub fn new(
        symbol: &str,
        profile: &CompanyProfile,
        valuation: Option<&ValuationResult>,
    ) -> Self {
        let number = |v: Option<f64>| v.map(SummaryValue::Number);

        let rows = vec![
            ("Sector", profile.sector.clone().map(SummaryValue::Text)),
            ("Market Cap", number(profile.market_cap)),
            ("Trailing PE", number(profile.trailing_pe)),
            ("EPS (TTM)", number(profile.trailing_eps)),
            ("ROE", number(profile.return_on_equity)),
            ("Price to Book", number(profile.price_to_book)),
            ("Target Mean", number(profile.target_mean_price)),
            ("Target High", number(profile.target_high_price)),
            ("Target Low", number(profile.target_low_price)),
            (
                "Intrinsic Value (B)",
                number(valuation.map(|v| v.intrinsic_value_total())),
            ),
            (
                "Value Per Share",
                number(valuation.and_then(|v| v.value_per_share())),
            ),
        ];

        Self {
            symbol: symbol.trim().to_uppercase(),
            rows,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn rows(&self) -> &[(&'static str, Option<SummaryValue>)] {
        &self.rows
    }

    pub fn get(&self, label: &str) -> Option<&SummaryValue> {
        self.rows
            .iter()
            .find(|(l, _)| *l == label)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Rows rendered for a text panel, absent values as "N/A".
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        self.rows
            .iter()
            .map(|(label, value)| {
                let text = value
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                (*label, text)
            })
            .collect()
    }

    /// Suggested download name, e.g. `AAPL_financials.csv`.
    pub fn file_name(&self) -> String {
        format!("{}_financials.csv", self.symbol)
    }

    /// Write a two-column CSV: an unnamed label column and `Value`.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["", "Value"])?;
        for (label, value) in &self.rows {
            let cell = value.as_ref().map(|v| v.to_string()).unwrap_or_default();
            wtr.write_record([*label, cell.as_str()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}
