use chrono::NaiveDate;
use thiserror::Error;

/// A request was rejected before any computation took place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("end date {end} precedes start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("page size must be positive (got {0})")]
    NonPositivePageSize(i64),
    #[error("category filter must not be blank")]
    BlankCategory,
    #[error("amount tolerance must be a finite, non-negative number (got {0})")]
    InvalidTolerance(f64),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

pub type CoreResult<T> = Result<T, CoreError>;
