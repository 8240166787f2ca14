use finboard_core::{validate_filter, EngineOptions, PageWindow, ReportAssembler};
use finboard_domain::{ReportFilter, ReportOutcome, Transaction, TransactionPage, TransactionQuery};
use serde::Serialize;
use tracing::{debug, info};

use super::ServiceResult;
use crate::storage::{BudgetStore, TransactionStore};

/// Page size used when draining a store for a report.
pub const FETCH_PAGE_SIZE: i64 = 500;

/// One page of transactions plus the window describing it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListing {
    #[serde(flatten)]
    pub page: TransactionPage,
    pub window: PageWindow,
}

/// Resolves store data and runs the engine. Holds no state between calls.
pub struct ReportService;

impl ReportService {
    /// Validates the request, fetches every matching transaction plus all budgets, then
    /// assembles the report.
    pub fn build(
        transactions: &dyn TransactionStore,
        budgets: &dyn BudgetStore,
        filter: &ReportFilter,
        options: &EngineOptions,
    ) -> ServiceResult<ReportOutcome> {
        options.validate()?;
        validate_filter(filter)?;

        let fetched = Self::fetch_all(transactions, filter)?;
        let budgets = budgets.list_budgets()?;
        let outcome = ReportAssembler::new(*options).build(&fetched, &budgets, filter)?;
        info!(
            start = %filter.start,
            end = %filter.end,
            category = %filter.category,
            flow = %filter.flow,
            no_data = outcome.is_no_data(),
            "report built"
        );
        Ok(outcome)
    }

    /// Returns the requested page along with its clamped window.
    pub fn page(
        store: &dyn TransactionStore,
        query: &TransactionQuery,
    ) -> ServiceResult<TransactionListing> {
        let page = store.list_transactions(query)?;
        let window = PageWindow::compute(query.page, query.page_size, page.total_count)?;
        Ok(TransactionListing { page, window })
    }

    fn fetch_all(
        store: &dyn TransactionStore,
        filter: &ReportFilter,
    ) -> ServiceResult<Vec<Transaction>> {
        let mut query = TransactionQuery::for_report(filter, FETCH_PAGE_SIZE);
        let mut collected = Vec::new();
        loop {
            let page = store.list_transactions(&query)?;
            let received = page.items.len();
            collected.extend(page.items);
            let window = PageWindow::compute(query.page, query.page_size, page.total_count)?;
            if received == 0 || !window.has_next() {
                break;
            }
            let next = query.page + 1;
            query = query.with_page(next);
        }
        debug!(transactions = collected.len(), "fetched transactions");
        Ok(collected)
    }
}
