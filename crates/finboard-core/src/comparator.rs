//! Joins actual category totals against budget targets.

use std::collections::HashMap;

use finboard_domain::{
    Budget, CategoryFilter, CategoryKey, CategoryTotal, ComparisonOutcome, ComparisonRow,
    ComparisonStatus, DataIntegrityWarning, FlowKind, NoDataCondition, ReportFilter,
};
use tracing::warn;

/// Label and key used for the aggregate row.
pub const TOTALS_LABEL: &str = "Total";

// Absorbs float noise so a budget spent exactly does not flip to over-budget.
const STATUS_EPSILON: f64 = 1e-9;

/// Budget targets for one flow kind, keyed by canonical category.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTable {
    kind: FlowKind,
    targets: Vec<CategoryTotal>,
    warnings: Vec<DataIntegrityWarning>,
}

impl BudgetTable {
    /// Builds a table from already-resolved targets.
    pub fn from_targets(kind: FlowKind, targets: Vec<CategoryTotal>) -> Self {
        Self {
            kind,
            targets,
            warnings: Vec::new(),
        }
    }

    /// Selects the budgets of `kind` matching `category`.
    ///
    /// Blank categories are filed as `Uncategorized` with a warning.
    /// When several budgets share a canonical category the most recently created one wins
    /// (later position breaks ties) and the others are reported as duplicates. Negative or
    /// non-finite amounts count as zero.
    pub fn from_budgets(budgets: &[Budget], kind: FlowKind, category: &CategoryFilter) -> Self {
        let mut order: Vec<CategoryKey> = Vec::new();
        let mut chosen: HashMap<CategoryKey, &Budget> = HashMap::new();
        let mut warnings = Vec::new();

        for budget in budgets.iter().filter(|budget| budget.kind == kind) {
            let key = CategoryKey::new(&budget.category);
            if !category.matches(&key) {
                continue;
            }
            if budget.category.trim().is_empty() {
                warnings.push(DataIntegrityWarning::MissingBudgetCategory {
                    budget_id: budget.id,
                });
            }
            match chosen.get(&key).copied() {
                None => {
                    order.push(key.clone());
                    chosen.insert(key, budget);
                }
                Some(current) => {
                    let (kept, dropped) = if budget.created_at >= current.created_at {
                        (budget, current)
                    } else {
                        (current, budget)
                    };
                    warnings.push(DataIntegrityWarning::DuplicateBudget {
                        budget_id: dropped.id,
                        kept_budget_id: kept.id,
                        category: CategoryKey::new(&kept.category).label().to_string(),
                    });
                    chosen.insert(key, kept);
                }
            }
        }

        let mut targets = Vec::with_capacity(order.len());
        for key in order {
            let Some(budget) = chosen.get(&key) else {
                continue;
            };
            let amount = if budget.amount.is_finite() && budget.amount >= 0.0 {
                budget.amount
            } else {
                warnings.push(DataIntegrityWarning::NegativeBudget {
                    budget_id: budget.id,
                    amount: budget.amount,
                });
                0.0
            };
            targets.push(CategoryTotal {
                category: CategoryKey::new(&budget.category),
                amount,
            });
        }

        for warning in &warnings {
            warn!(%warning, "data integrity warning");
        }

        Self {
            kind,
            targets,
            warnings,
        }
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn targets(&self) -> &[CategoryTotal] {
        &self.targets
    }

    pub fn warnings(&self) -> &[DataIntegrityWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Stateless budget-vs-actual comparison.
pub struct BudgetComparator;

impl BudgetComparator {
    /// Compares `actuals` (from the aggregator, same kind and window) against `budgets`.
    ///
    /// Rows follow budget order, then actual-only categories in first-occurrence order.
    /// Returns [`ComparisonOutcome::NoData`] when both sides are empty.
    pub fn compare(
        budgets: &BudgetTable,
        actuals: &[CategoryTotal],
        filter: &ReportFilter,
    ) -> ComparisonOutcome {
        let kind = budgets.kind();
        if budgets.is_empty() && actuals.is_empty() {
            return ComparisonOutcome::NoData(NoDataCondition {
                filter: filter.for_kind(kind),
            });
        }

        let actual_by_key: HashMap<&CategoryKey, &CategoryTotal> =
            actuals.iter().map(|total| (&total.category, total)).collect();

        let mut rows = Vec::with_capacity(budgets.targets().len() + actuals.len());
        for target in budgets.targets() {
            let actual = actual_by_key
                .get(&target.category)
                .map(|total| total.amount)
                .unwrap_or(0.0);
            rows.push(Self::row(kind, &target.category, target.amount, actual));
        }
        for total in actuals {
            let budgeted = budgets
                .targets()
                .iter()
                .any(|target| target.category == total.category);
            if !budgeted {
                rows.push(Self::row(kind, &total.category, 0.0, total.amount));
            }
        }

        let budgeted_sum = rows.iter().fold(0.0, |acc, row| acc + row.budgeted_amount);
        let actual_sum = rows.iter().fold(0.0, |acc, row| acc + row.actual_amount);
        let totals = Self::totals_row(kind, budgeted_sum, actual_sum);

        ComparisonOutcome::Compared { rows, totals }
    }

    /// Builds a single row. Expense budgets are limits (staying under is good); income budgets
    /// are goals (reaching them is good).
    pub fn row(kind: FlowKind, category: &CategoryKey, budgeted: f64, actual: f64) -> ComparisonRow {
        build_row(kind, category.label(), category.key(), budgeted, actual)
    }

    fn totals_row(kind: FlowKind, budgeted: f64, actual: f64) -> ComparisonRow {
        build_row(kind, TOTALS_LABEL, "total", budgeted, actual)
    }
}

fn build_row(kind: FlowKind, label: &str, key: &str, budgeted: f64, actual: f64) -> ComparisonRow {
    let (difference, status) = match kind {
        FlowKind::Expense => {
            let difference = budgeted - actual;
            let status = if difference >= -STATUS_EPSILON {
                ComparisonStatus::WithinBudget
            } else {
                ComparisonStatus::OverBudget
            };
            (difference, status)
        }
        FlowKind::Income => {
            let difference = actual - budgeted;
            let status = if difference >= -STATUS_EPSILON {
                ComparisonStatus::GoalMet
            } else {
                ComparisonStatus::GoalShortfall
            };
            (difference, status)
        }
    };
    let utilization_percent = if budgeted > 0.0 {
        Some(actual / budgeted * 100.0)
    } else {
        None
    };
    ComparisonRow {
        category: label.to_string(),
        key: key.to_string(),
        budgeted_amount: budgeted,
        actual_amount: actual,
        difference,
        status,
        utilization_percent,
    }
}
