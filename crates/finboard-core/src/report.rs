//! Assembles aggregation, comparison and trend outputs into one report.

use finboard_domain::{
    Budget, CategoryShare, CategoryTotal, FlowKind, NoDataCondition, Report,
    ReportFilter, ReportOutcome, ReportSection, SectionSummary, Transaction,
};
use tracing::debug;

use crate::{
    aggregator::CategoryAggregator,
    comparator::{BudgetComparator, BudgetTable},
    error::CoreResult,
    normalizer::{Normalized, TransactionNormalizer},
    options::{validate_filter, EngineOptions},
    time_series::TimeSeriesBuilder,
};

/// Runs the full pipeline for a single request. Holds only configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler {
    options: EngineOptions,
}

impl ReportAssembler {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Validates the request, normalizes `transactions`, then assembles the report.
    pub fn build(
        &self,
        transactions: &[Transaction],
        budgets: &[Budget],
        filter: &ReportFilter,
    ) -> CoreResult<ReportOutcome> {
        self.options.validate()?;
        validate_filter(filter)?;
        let normalized = TransactionNormalizer::new(self.options.tolerance).normalize(transactions);
        self.assemble(normalized, budgets, filter)
    }

    /// Assembles a report from already-normalized entries.
    ///
    /// One section is produced per flow kind the filter covers. When none of them has budgets
    /// or activity the explicit no-data sentinel is returned instead of a report.
    pub fn assemble(
        &self,
        normalized: Normalized,
        budgets: &[Budget],
        filter: &ReportFilter,
    ) -> CoreResult<ReportOutcome> {
        validate_filter(filter)?;
        let Normalized {
            entries,
            mut warnings,
        } = normalized;

        let trend_builder = TimeSeriesBuilder::new(self.options.bucketing);
        let mut sections = Vec::with_capacity(filter.flow.kinds().len());
        for &kind in filter.flow.kinds() {
            let section_filter = filter.for_kind(kind);
            let aggregator = CategoryAggregator::new(&entries, &section_filter);
            let budget_table = BudgetTable::from_budgets(budgets, kind, &filter.category);
            warnings.extend(budget_table.warnings().iter().cloned());
            sections.push(build_section(
                kind,
                &aggregator,
                &budget_table,
                &trend_builder,
                &section_filter,
            ));
        }

        if sections.iter().all(|section| section.comparison.is_no_data()) {
            debug!(
                start = %filter.start,
                end = %filter.end,
                flow = %filter.flow,
                "nothing to compare"
            );
            return Ok(ReportOutcome::NoData(NoDataCondition {
                filter: filter.clone(),
            }));
        }

        debug!(
            sections = sections.len(),
            warnings = warnings.len(),
            "assembled report"
        );
        Ok(ReportOutcome::Ready(Report {
            filter: filter.clone(),
            bucketing: self.options.bucketing,
            sections,
            warnings,
        }))
    }
}

fn build_section(
    kind: FlowKind,
    aggregator: &CategoryAggregator<'_>,
    budgets: &BudgetTable,
    trend_builder: &TimeSeriesBuilder,
    filter: &ReportFilter,
) -> ReportSection {
    let totals = aggregator.by_category();
    let grand_total = totals.iter().fold(0.0, |acc, total| acc + total.amount);
    let breakdown = category_shares(&totals, grand_total);
    let comparison = BudgetComparator::compare(budgets, &totals, filter);
    let trend = trend_builder.build(aggregator);

    let transaction_count = aggregator.transaction_count();
    let average_transaction = if transaction_count > 0 {
        grand_total / transaction_count as f64
    } else {
        0.0
    };
    let top_category = breakdown
        .iter()
        .fold(None::<&CategoryShare>, |best, share| match best {
            Some(current) if current.amount >= share.amount => Some(current),
            _ => Some(share),
        })
        .cloned();

    ReportSection {
        kind,
        breakdown,
        comparison,
        trend,
        summary: SectionSummary {
            grand_total,
            entry_count: aggregator.entry_count(),
            transaction_count,
            average_transaction,
            top_category,
        },
    }
}

/// Percentage of `grand_total` per category; every share is 0 when the total is 0.
pub fn category_shares(totals: &[CategoryTotal], grand_total: f64) -> Vec<CategoryShare> {
    totals
        .iter()
        .map(|total| CategoryShare {
            category: total.category.label().to_string(),
            key: total.category.key().to_string(),
            amount: total.amount,
            percent: percent_of(total.amount, grand_total),
        })
        .collect()
}

pub fn percent_of(amount: f64, grand_total: f64) -> f64 {
    if grand_total == 0.0 {
        0.0
    } else {
        amount / grand_total * 100.0
    }
}
