//! finboard-core
//!
//! Budget-vs-actual reconciliation and aggregation engine.
//! Depends on finboard-domain. No CLI, no terminal I/O, no storage, no shared state:
//! every operation is a pure function of its inputs.

pub mod aggregator;
pub mod comparator;
pub mod error;
pub mod normalizer;
pub mod options;
pub mod pagination;
pub mod report;
pub mod time_series;

pub use aggregator::*;
pub use comparator::*;
pub use error::{CoreError, CoreResult, ValidationError};
pub use normalizer::*;
pub use options::*;
pub use pagination::*;
pub use report::*;
pub use time_series::*;
