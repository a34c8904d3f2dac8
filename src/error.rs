use thiserror::Error;

/// Failures the chart functions report instead of panicking.
/// Each one is rendered as a placeholder chart by the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("no launches recorded for site '{0}'")]
    UnknownSite(String),

    #[error("invalid payload range: low ({low}) must be a number no greater than high ({high})")]
    InvalidRange { low: f64, high: f64 },
}
