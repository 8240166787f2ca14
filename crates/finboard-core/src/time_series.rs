//! Ordered trend points for charting.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use finboard_domain::{AtomicEntry, Bucketing, ReportFilter, TimeSeriesPoint};

use crate::aggregator::CategoryAggregator;

/// Builds ascending time series from the aggregator's bucketing. Holds only its bucketing,
/// so identical inputs always produce identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeriesBuilder {
    bucketing: Bucketing,
}

impl TimeSeriesBuilder {
    pub fn new(bucketing: Bucketing) -> Self {
        Self { bucketing }
    }

    pub fn bucketing(&self) -> Bucketing {
        self.bucketing
    }

    pub fn build(&self, aggregator: &CategoryAggregator<'_>) -> Vec<TimeSeriesPoint> {
        match self.bucketing {
            Bucketing::Day => aggregator.by_date(),
            Bucketing::Week => aggregator.by_week(),
            Bucketing::Month => aggregator.by_month(),
        }
    }

    pub fn build_from_entries(
        &self,
        entries: &[AtomicEntry],
        filter: &ReportFilter,
    ) -> Vec<TimeSeriesPoint> {
        self.build(&CategoryAggregator::new(entries, filter))
    }
}

/// Inserts zero points for every empty bucket between `start` and `end`.
///
/// Presentation helper only; the builder never fills gaps itself.
pub fn fill_gaps(
    points: &[TimeSeriesPoint],
    bucketing: Bucketing,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<TimeSeriesPoint> {
    let known: BTreeMap<NaiveDate, f64> = points
        .iter()
        .map(|point| (point.bucket_start, point.amount))
        .collect();
    let last = bucketing.anchor(end);
    let mut cursor = bucketing.anchor(start);
    let mut filled = Vec::new();
    while cursor <= last {
        filled.push(TimeSeriesPoint {
            bucket_start: cursor,
            amount: known.get(&cursor).copied().unwrap_or(0.0),
        });
        cursor = bucketing.next_anchor(cursor);
    }
    filled
}
