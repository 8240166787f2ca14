use finboard_core::PageWindow;
use finboard_domain::{
    Budget, CategoryFilter, CategoryKey, Transaction, TransactionPage, TransactionQuery,
};
use tracing::debug;

use super::{BudgetStore, Result, TransactionStore};

/// Store backed by owned vectors. Used for loaded datasets and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

impl InMemoryStore {
    pub fn new(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Self {
        Self {
            transactions,
            budgets,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Distinct category labels across transactions, splits and budgets, first spelling wins.
    pub fn known_categories(&self) -> Vec<String> {
        let mut seen: Vec<CategoryKey> = Vec::new();
        let raw = self
            .transactions
            .iter()
            .flat_map(|txn| {
                std::iter::once(txn.category.as_str()).chain(
                    txn.sub_categories
                        .iter()
                        .flatten()
                        .filter_map(|sub| sub.category.as_deref()),
                )
            })
            .chain(self.budgets.iter().map(|budget| budget.category.as_str()));
        for category in raw {
            if let Some(key) = CategoryKey::parse(category) {
                if !seen.contains(&key) {
                    seen.push(key);
                }
            }
        }
        seen.into_iter().map(|key| key.label().to_string()).collect()
    }

    fn matches(txn: &Transaction, query: &TransactionQuery) -> bool {
        if query.start.is_some_and(|start| txn.date < start) {
            return false;
        }
        if query.end.is_some_and(|end| txn.date > end) {
            return false;
        }
        if query.flow.is_some_and(|flow| !flow.includes(txn.flow())) {
            return false;
        }
        match &query.category {
            None | Some(CategoryFilter::All) => true,
            Some(filter) => category_matches(txn, filter),
        }
    }
}

/// A split transaction matches when any of its slices does.
fn category_matches(txn: &Transaction, filter: &CategoryFilter) -> bool {
    filter.matches(&CategoryKey::new(&txn.category))
        || txn
            .sub_categories
            .iter()
            .flatten()
            .filter_map(|sub| sub.category.as_deref())
            .any(|category| filter.matches(&CategoryKey::new(category)))
}

impl TransactionStore for InMemoryStore {
    /// Newest first; transactions on the same day keep their stored order.
    fn list_transactions(&self, query: &TransactionQuery) -> Result<TransactionPage> {
        let mut matching: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|txn| Self::matches(txn, query))
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date));

        let window = PageWindow::compute(query.page, query.page_size, matching.len())?;
        let items = matching[window.item_range()]
            .iter()
            .map(|txn| (*txn).clone())
            .collect();
        debug!(
            page = window.current_page,
            total = matching.len(),
            "listed transactions"
        );
        Ok(TransactionPage {
            items,
            total_count: matching.len(),
        })
    }
}

impl BudgetStore for InMemoryStore {
    fn list_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self.budgets.clone())
    }
}
