//! Category and time-bucket totals over filtered atomic entries.

use std::collections::{BTreeMap, HashMap, HashSet};

use finboard_domain::{AtomicEntry, Bucketing, CategoryKey, CategoryTotal, ReportFilter, TimeSeriesPoint};

/// View over the entries that pass a filter. Construction applies the filter once; every
/// accessor is a fresh, read-only computation over that selection.
#[derive(Debug, Clone)]
pub struct CategoryAggregator<'a> {
    entries: Vec<&'a AtomicEntry>,
}

impl<'a> CategoryAggregator<'a> {
    /// Keeps entries whose date lies in `[start, end]` and whose flow and category match.
    pub fn new(entries: &'a [AtomicEntry], filter: &ReportFilter) -> Self {
        let entries = entries
            .iter()
            .filter(|entry| {
                filter.contains(entry.date)
                    && filter.flow.includes(entry.flow)
                    && filter.category.matches(&entry.category)
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[&'a AtomicEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Distinct transactions that contributed a non-zero amount.
    pub fn transaction_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.amount > 0.0)
            .map(|entry| entry.transaction_id)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, entry| acc + entry.amount)
    }

    /// Sparse per-category totals in first-occurrence order. Zero totals are omitted.
    pub fn by_category(&self) -> Vec<CategoryTotal> {
        let mut index: HashMap<&CategoryKey, usize> = HashMap::new();
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for entry in &self.entries {
            match index.get(&entry.category) {
                Some(&slot) => totals[slot].amount += entry.amount,
                None => {
                    index.insert(&entry.category, totals.len());
                    totals.push(CategoryTotal {
                        category: entry.category.clone(),
                        amount: entry.amount,
                    });
                }
            }
        }
        totals.retain(|total| total.amount != 0.0);
        totals
    }

    pub fn by_date(&self) -> Vec<TimeSeriesPoint> {
        self.by_bucket(Bucketing::Day)
    }

    /// Buckets keyed by the Monday of each entry's ISO week.
    pub fn by_week(&self) -> Vec<TimeSeriesPoint> {
        self.by_bucket(Bucketing::Week)
    }

    /// Buckets keyed by the first day of each month.
    pub fn by_month(&self) -> Vec<TimeSeriesPoint> {
        self.by_bucket(Bucketing::Month)
    }

    /// Ascending bucket totals; buckets without activity are absent rather than zero.
    pub fn by_bucket(&self, bucketing: Bucketing) -> Vec<TimeSeriesPoint> {
        let mut buckets = BTreeMap::new();
        for entry in &self.entries {
            *buckets.entry(bucketing.anchor(entry.date)).or_insert(0.0) += entry.amount;
        }
        buckets
            .into_iter()
            .filter(|(_, amount)| *amount != 0.0)
            .map(|(bucket_start, amount)| TimeSeriesPoint {
                bucket_start,
                amount,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finboard_domain::{CategoryFilter, FlowFilter, FlowKind, TransactionSource};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(category: &str, amount: f64, on: NaiveDate, flow: FlowKind) -> AtomicEntry {
        AtomicEntry {
            transaction_id: Uuid::new_v4(),
            category: CategoryKey::new(category),
            amount,
            date: on,
            flow,
            source: TransactionSource::Manual,
        }
    }

    fn january() -> ReportFilter {
        ReportFilter::new(date(2024, 1, 1), date(2024, 1, 31))
    }

    fn sample() -> Vec<AtomicEntry> {
        vec![
            entry("Food", 50.0, date(2024, 1, 1), FlowKind::Expense),
            entry("Rent", 900.0, date(2024, 1, 3), FlowKind::Expense),
            entry(" food", 25.0, date(2024, 1, 7), FlowKind::Expense),
            entry("Salary", 3000.0, date(2024, 1, 15), FlowKind::Income),
            entry("Food", 10.0, date(2024, 1, 31), FlowKind::Expense),
            entry("Food", 99.0, date(2024, 2, 1), FlowKind::Expense),
            entry("Gifts", 0.0, date(2024, 1, 20), FlowKind::Expense),
        ]
    }

    #[test]
    fn groups_by_canonical_key_in_first_occurrence_order() {
        let entries = sample();
        let filter = january().with_flow(FlowFilter::Expense);
        let totals = CategoryAggregator::new(&entries, &filter).by_category();
        let labels: Vec<_> = totals.iter().map(|t| t.category.label()).collect();
        assert_eq!(labels, vec!["Food", "Rent"]);
        assert_eq!(totals[0].amount, 85.0);
        assert_eq!(totals[1].amount, 900.0);
    }

    #[test]
    fn category_totals_conserve_the_filtered_sum() {
        let entries = sample();
        let aggregator = CategoryAggregator::new(&entries, &january());
        let summed: f64 = aggregator.by_category().iter().map(|t| t.amount).sum();
        assert!((summed - aggregator.total()).abs() < 1e-9);
        assert!((summed - 3985.0).abs() < 1e-9);
    }

    #[test]
    fn boundaries_are_inclusive_and_outside_dates_excluded() {
        let entries = sample();
        let filter = january();
        let aggregator = CategoryAggregator::new(&entries, &filter);
        assert!(aggregator
            .entries()
            .iter()
            .all(|entry| entry.date >= filter.start && entry.date <= filter.end));
        assert_eq!(aggregator.entry_count(), 6);
    }

    #[test]
    fn category_filter_restricts_entries() {
        let entries = sample();
        let filter = january().with_category(CategoryFilter::parse("FOOD").unwrap());
        let totals = CategoryAggregator::new(&entries, &filter).by_category();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].amount, 85.0);
    }

    #[test]
    fn zero_totals_are_omitted() {
        let entries = sample();
        let totals = CategoryAggregator::new(&entries, &january()).by_category();
        assert!(totals.iter().all(|t| t.category.label() != "Gifts"));
    }

    #[test]
    fn week_buckets_start_on_monday() {
        let entries = sample();
        let filter = january().with_flow(FlowFilter::Expense);
        let weeks = CategoryAggregator::new(&entries, &filter).by_week();
        let starts: Vec<_> = weeks.iter().map(|p| p.bucket_start).collect();
        assert_eq!(starts, vec![date(2024, 1, 1), date(2024, 1, 29)]);
        assert_eq!(weeks[0].amount, 975.0);
        assert_eq!(weeks[1].amount, 10.0);
    }

    #[test]
    fn daily_buckets_are_ascending_without_gap_filling() {
        let entries = sample();
        let filter = january().with_flow(FlowFilter::Expense);
        let days = CategoryAggregator::new(&entries, &filter).by_date();
        let starts: Vec<_> = days.iter().map(|p| p.bucket_start).collect();
        assert_eq!(
            starts,
            vec![date(2024, 1, 1), date(2024, 1, 3), date(2024, 1, 7), date(2024, 1, 31)]
        );
    }

    #[test]
    fn month_buckets_start_on_the_first() {
        let entries = sample();
        let filter = ReportFilter::new(date(2024, 1, 1), date(2024, 2, 29))
            .with_flow(FlowFilter::Expense);
        let months = CategoryAggregator::new(&entries, &filter).by_month();
        assert_eq!(
            months,
            vec![
                TimeSeriesPoint { bucket_start: date(2024, 1, 1), amount: 985.0 },
                TimeSeriesPoint { bucket_start: date(2024, 2, 1), amount: 99.0 },
            ]
        );
    }

    #[test]
    fn empty_selection_totals_positive_zero() {
        let entries = sample();
        let filter = ReportFilter::new(date(2023, 6, 1), date(2023, 6, 30));
        let total = CategoryAggregator::new(&entries, &filter).total();
        assert_eq!(total, 0.0);
        assert!(total.is_sign_positive());
    }

    #[test]
    fn transaction_count_ignores_zero_contributions() {
        let entries = sample();
        let aggregator = CategoryAggregator::new(&entries, &january());
        assert_eq!(aggregator.transaction_count(), 5);
    }
}
