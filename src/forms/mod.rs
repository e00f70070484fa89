//! Form definitions backing the lead routes.

use thiserror::Error;

pub mod leads;

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("start date is after end date")]
    ReversedDateRange,

    #[error("unknown date preset `{0}`")]
    InvalidPreset(String),

    #[error("unknown lead status `{0}`")]
    InvalidStatus(String),

    #[error("search text is too long")]
    SearchTooLong,
}
