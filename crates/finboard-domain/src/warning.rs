use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Non-fatal data problems found while preparing a report.
///
/// Each warning names the record it concerns and the fallback that was applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DataIntegrityWarning {
    /// Sub-category amounts do not add up to the parent amount. Entries were kept as given.
    SubCategoryMismatch {
        transaction_id: Uuid,
        parent_amount: f64,
        split_total: f64,
    },
    /// Sub-categories could not be used; the parent category was used instead.
    MalformedSubCategories { transaction_id: Uuid, reason: String },
    /// Negative amount clamped to a zero contribution.
    NegativeAmount { transaction_id: Uuid, amount: f64 },
    /// NaN or infinite amount clamped to a zero contribution.
    NonFiniteAmount { transaction_id: Uuid },
    /// Blank category replaced with `Uncategorized`.
    MissingCategory { transaction_id: Uuid },
    /// Several budgets share a category and flow; only the newest was kept.
    DuplicateBudget {
        budget_id: Uuid,
        kept_budget_id: Uuid,
        category: String,
    },
    /// Budget with a blank category filed under `Uncategorized`.
    MissingBudgetCategory { budget_id: Uuid },
    /// Negative or non-finite budget amount clamped to zero.
    NegativeBudget { budget_id: Uuid, amount: f64 },
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIntegrityWarning::SubCategoryMismatch {
                transaction_id,
                parent_amount,
                split_total,
            } => write!(
                f,
                "transaction {transaction_id}: sub-categories sum to {split_total:.2} but the parent amount is {parent_amount:.2}"
            ),
            DataIntegrityWarning::MalformedSubCategories {
                transaction_id,
                reason,
            } => write!(
                f,
                "transaction {transaction_id}: ignored sub-categories ({reason}); used the top-level category"
            ),
            DataIntegrityWarning::NegativeAmount {
                transaction_id,
                amount,
            } => write!(
                f,
                "transaction {transaction_id}: negative amount {amount:.2} counted as zero"
            ),
            DataIntegrityWarning::NonFiniteAmount { transaction_id } => write!(
                f,
                "transaction {transaction_id}: unreadable amount counted as zero"
            ),
            DataIntegrityWarning::MissingCategory { transaction_id } => write!(
                f,
                "transaction {transaction_id}: blank category filed as Uncategorized"
            ),
            DataIntegrityWarning::DuplicateBudget {
                budget_id,
                kept_budget_id,
                category,
            } => write!(
                f,
                "budget {budget_id}: superseded by newer budget {kept_budget_id} for `{category}`"
            ),
            DataIntegrityWarning::MissingBudgetCategory { budget_id } => write!(
                f,
                "budget {budget_id}: blank category filed as Uncategorized"
            ),
            DataIntegrityWarning::NegativeBudget { budget_id, amount } => write!(
                f,
                "budget {budget_id}: invalid amount {amount:.2} counted as zero"
            ),
        }
    }
}
