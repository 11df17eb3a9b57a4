use thiserror::Error;

/// Errors raised by the deterministic parts of the briefing pipeline.
///
/// These deliberately propagate: one malformed upstream entry or one bad
/// time bound fails the whole request, and the hosting layer turns that
/// into an error response. Network-level failures are handled at their
/// call sites instead (degrade-to-empty for reports, skip for forecasts).
#[derive(Debug, Error)]
pub enum BriefingError {
    #[error("forecast parameter '{name}' missing at {valid_time}")]
    MissingParameter {
        name: &'static str,
        valid_time: String,
    },

    #[error(transparent)]
    TimeParse(#[from] chrono::ParseError),

    #[error("'{0}' does not exist in the local timezone")]
    InvalidLocalTime(String),
}
