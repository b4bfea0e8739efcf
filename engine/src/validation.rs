// Gate in front of a market-data fetch: ticker present, dates ordered.
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterIssue {
    #[error("Please enter a valid stock ticker.")]
    EmptyTicker,

    #[error("Start date must be before end date.")]
    StartNotBeforeEnd { start: NaiveDate, end: NaiveDate },
}

/// The hosting UI's error display.
pub trait ErrorDisplay {
    fn show_error(&mut self, message: &str);
}

/// Collects messages, e.g. for a status bar or tests.
impl ErrorDisplay for Vec<String> {
    fn show_error(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

pub fn check_parameters(ticker: &str, start_date: NaiveDate, end_date: NaiveDate) -> Result<(), ParameterIssue> {
    if ticker.trim().is_empty() {
        return Err(ParameterIssue::EmptyTicker);
    }
    if start_date >= end_date {
        return Err(ParameterIssue::StartNotBeforeEnd {
            start: start_date,
            end: end_date,
        });
    }
    Ok(())
}

/// Returns `false` and shows one message on `display` when the parameters
/// cannot be used for a fetch. The caller stops its workflow on `false`.
pub fn validate_parameters(
    ticker: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    display: &mut dyn ErrorDisplay,
) -> bool {
    match check_parameters(ticker, start_date, end_date) {
        Ok(()) => true,
        Err(issue) => {
            tracing::warn!(ticker = %ticker, %start_date, %end_date, issue = ?issue, "Rejected fetch parameters");
            display.show_error(&issue.to_string());
            false
        }
    }
}
