//! Text rendering for reports, transaction pages and configuration.

use finboard_config::Config;
use finboard_core::fill_gaps;
use finboard_domain::{ComparisonOutcome, ComparisonRow, FlowKind, Report, ReportOutcome, ReportSection};

use crate::{
    cli::{
        output::Palette,
        table::{Table, TableColumn},
    },
    services::TransactionListing,
};

/// Presentation settings shared by every renderer.
#[derive(Clone, Debug)]
pub struct Renderer {
    pub palette: Palette,
    pub money: Config,
    pub fill_gaps: bool,
}

impl Renderer {
    pub fn new(config: &Config, palette: Palette) -> Self {
        Self {
            palette,
            money: config.clone(),
            fill_gaps: false,
        }
    }

    pub fn with_fill_gaps(mut self, fill_gaps: bool) -> Self {
        self.fill_gaps = fill_gaps;
        self
    }

    // Table cells; the currency code is printed once in the report header.
    fn amount(&self, value: f64) -> String {
        format!("{:.*}", self.money.currency_precision as usize, value)
    }

    pub fn outcome(&self, outcome: &ReportOutcome) -> String {
        match outcome {
            ReportOutcome::Ready(report) => self.report(report),
            ReportOutcome::NoData(condition) => format!("No data: {condition}."),
        }
    }

    pub fn report(&self, report: &Report) -> String {
        let filter = &report.filter;
        let mut blocks = vec![self.palette.header(format!(
            "Report {} to {} | category: {} | flow: {} | amounts in {}",
            filter.start, filter.end, filter.category, filter.flow, self.money.currency
        ))];
        for section in &report.sections {
            blocks.push(self.section(report, section));
        }
        if !report.warnings.is_empty() {
            let lines: Vec<String> = report
                .warnings
                .iter()
                .map(|warning| self.palette.warning(warning))
                .collect();
            blocks.push(lines.join("\n"));
        }
        blocks.join("\n\n")
    }

    fn section(&self, report: &Report, section: &ReportSection) -> String {
        let title = match section.kind {
            FlowKind::Expense => "Expenses",
            FlowKind::Income => "Income",
        };
        let mut parts = vec![self.palette.header(title)];

        match &section.comparison {
            ComparisonOutcome::NoData(condition) => parts.push(format!("No data: {condition}.")),
            ComparisonOutcome::Compared { rows, totals } => {
                parts.push(self.comparison_table(rows, totals));
            }
        }

        if !section.breakdown.is_empty() {
            let mut table = Table::new(vec![
                TableColumn::left("Category"),
                TableColumn::right("Amount"),
                TableColumn::right("Share"),
            ]);
            for share in &section.breakdown {
                table.push(vec![
                    share.category.clone(),
                    self.amount(share.amount),
                    format!("{:.1}%", share.percent),
                ]);
            }
            parts.push(table.render());
        }

        let points = if self.fill_gaps {
            fill_gaps(
                &section.trend,
                report.bucketing,
                report.filter.start,
                report.filter.end,
            )
        } else {
            section.trend.clone()
        };
        if !points.is_empty() {
            let mut table = Table::new(vec![
                TableColumn::left(format!("Bucket ({})", report.bucketing)),
                TableColumn::right("Amount"),
            ]);
            for point in &points {
                table.push(vec![point.bucket_start.to_string(), self.amount(point.amount)]);
            }
            parts.push(table.render());
        }

        let summary = &section.summary;
        let mut line = format!(
            "Total {} across {} transaction(s), average {}",
            self.money.format_amount(summary.grand_total),
            summary.transaction_count,
            self.money.format_amount(summary.average_transaction)
        );
        if let Some(top) = &summary.top_category {
            line.push_str(&format!("; top category {} ({:.1}%)", top.category, top.percent));
        }
        parts.push(line);
        parts.join("\n\n")
    }

    fn comparison_table(&self, rows: &[ComparisonRow], totals: &ComparisonRow) -> String {
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right("Budgeted"),
            TableColumn::right("Actual"),
            TableColumn::right("Difference"),
            TableColumn::right("Used"),
            TableColumn::left("Status"),
        ]);
        for row in rows.iter().chain(std::iter::once(totals)) {
            table.push(vec![
                row.category.clone(),
                self.amount(row.budgeted_amount),
                self.amount(row.actual_amount),
                self.amount(row.difference),
                row.utilization_percent
                    .map(|percent| format!("{percent:.1}%"))
                    .unwrap_or_else(|| "-".into()),
                self.palette.status(row.status),
            ]);
        }
        table.render()
    }

    pub fn listing(&self, listing: &TransactionListing) -> String {
        let window = &listing.window;
        let mut table = Table::new(vec![
            TableColumn::left("Date"),
            TableColumn::left("Type"),
            TableColumn::left("Category"),
            TableColumn::right("Amount"),
            TableColumn::left("Source"),
            TableColumn::left("Description"),
        ]);
        for txn in &listing.page.items {
            let category = match txn.sub_categories.as_deref() {
                Some(subs) if !subs.is_empty() => format!("{} (+{} split)", txn.category, subs.len()),
                _ => txn.category.clone(),
            };
            table.push(vec![
                txn.date.to_string(),
                txn.kind.to_string(),
                category,
                self.amount(txn.amount),
                txn.source.to_string(),
                txn.description.clone().unwrap_or_default(),
            ]);
        }
        let mut footer = format!(
            "Page {} of {} ({} transaction(s))",
            window.current_page, window.total_pages, window.total_count
        );
        if window.has_previous() {
            footer.push_str(&format!(" | previous: --page {}", window.current_page - 1));
        }
        if window.has_next() {
            footer.push_str(&format!(" | next: --page {}", window.current_page + 1));
        }
        format!("{}\n\n{}", table.render(), footer)
    }

    pub fn config(&self, config: &Config) -> String {
        let mut table = Table::new(vec![TableColumn::left("Setting"), TableColumn::left("Value")]);
        let rows = [
            ("locale", config.locale.clone()),
            ("currency", config.currency.clone()),
            ("currency_precision", config.currency_precision.to_string()),
            ("ui_color_enabled", config.ui_color_enabled.to_string()),
            ("default_page_size", config.default_page_size.to_string()),
            ("default_bucketing", config.default_bucketing.to_string()),
            ("amount_tolerance", config.amount_tolerance.to_string()),
            (
                "last_dataset",
                config
                    .last_dataset
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
        ];
        for (key, value) in rows {
            table.push(vec![key.to_string(), value]);
        }
        table.render()
    }
}
