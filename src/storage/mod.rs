//! Data-access collaborators the engine reads from.
//!
//! The engine itself never fetches; services resolve full collections through these traits
//! and hand them over.

pub mod dataset;
pub mod memory;

use finboard_domain::{Budget, TransactionPage, TransactionQuery};

use crate::errors::FinboardError;

pub type Result<T> = std::result::Result<T, FinboardError>;

/// Source of transactions, answered one page at a time.
pub trait TransactionStore: Send + Sync {
    fn list_transactions(&self, query: &TransactionQuery) -> Result<TransactionPage>;
}

/// Source of budget targets.
pub trait BudgetStore: Send + Sync {
    fn list_budgets(&self) -> Result<Vec<Budget>>;
}

pub use dataset::{Dataset, DatasetFile};
pub use memory::InMemoryStore;
