use finboard_domain::{Bucketing, CategoryFilter, ReportFilter};

use crate::error::ValidationError;

/// Default slack when checking that split amounts add up to their parent (half a cent).
pub const DEFAULT_AMOUNT_TOLERANCE: f64 = 0.005;

/// Tunables shared by the engine components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub tolerance: f64,
    pub bucketing: Bucketing,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_AMOUNT_TOLERANCE,
            bucketing: Bucketing::Day,
        }
    }
}

impl EngineOptions {
    pub fn with_bucketing(mut self, bucketing: Bucketing) -> Self {
        self.bucketing = bucketing;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ValidationError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Rejects filters whose end date precedes their start date.
pub fn validate_filter(filter: &ReportFilter) -> Result<(), ValidationError> {
    if filter.end < filter.start {
        return Err(ValidationError::InvertedRange {
            start: filter.start,
            end: filter.end,
        });
    }
    Ok(())
}

/// Parses a raw category argument, accepting the `All` sentinel.
pub fn parse_category_filter(raw: &str) -> Result<CategoryFilter, ValidationError> {
    CategoryFilter::parse(raw).ok_or(ValidationError::BlankCategory)
}
