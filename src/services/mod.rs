pub mod report_service;

pub use report_service::{ReportService, TransactionListing};

use crate::errors::FinboardError;

pub type ServiceResult<T> = Result<T, FinboardError>;
