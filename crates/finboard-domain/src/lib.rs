//! finboard-domain
//!
//! Pure data types for the reconciliation engine (transactions, budgets, atomic entries,
//! filters, report rows and integrity warnings).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod common;
pub mod entry;
pub mod filter;
pub mod report;
pub mod transaction;
pub mod warning;

pub use budget::*;
pub use common::*;
pub use entry::*;
pub use filter::*;
pub use report::*;
pub use transaction::*;
pub use warning::*;
