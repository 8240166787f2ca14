//! Flattens transactions into atomic per-category contributions.

use finboard_domain::{AtomicEntry, CategoryKey, DataIntegrityWarning, SubCategory, Transaction};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::options::DEFAULT_AMOUNT_TOLERANCE;

/// Output of a normalization pass: the entries plus every warning raised on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub entries: Vec<AtomicEntry>,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl Normalized {
    fn record(&mut self, warning: DataIntegrityWarning) {
        warn!(%warning, "data integrity warning");
        self.warnings.push(warning);
    }
}

/// Stateless transaction flattener.
#[derive(Debug, Clone, Copy)]
pub struct TransactionNormalizer {
    tolerance: f64,
}

impl Default for TransactionNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_AMOUNT_TOLERANCE)
    }
}

impl TransactionNormalizer {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn normalize(&self, transactions: &[Transaction]) -> Normalized {
        let mut out = Normalized::default();
        for txn in transactions {
            self.normalize_one(txn, &mut out);
        }
        debug!(
            transactions = transactions.len(),
            entries = out.entries.len(),
            warnings = out.warnings.len(),
            "normalized transactions"
        );
        out
    }

    fn normalize_one(&self, txn: &Transaction, out: &mut Normalized) {
        let parent_amount = contribution(txn.id, txn.amount, out);

        if let Some(subs) = txn.sub_categories.as_deref().filter(|subs| !subs.is_empty()) {
            match parse_splits(subs) {
                Ok(splits) => {
                    let mut split_total = 0.0;
                    for (category, amount) in splits {
                        let amount = contribution(txn.id, amount, out);
                        split_total += amount;
                        out.entries.push(entry(txn, category, amount));
                    }
                    if (split_total - parent_amount).abs() > self.tolerance {
                        out.record(DataIntegrityWarning::SubCategoryMismatch {
                            transaction_id: txn.id,
                            parent_amount,
                            split_total,
                        });
                    }
                    return;
                }
                Err(reason) => out.record(DataIntegrityWarning::MalformedSubCategories {
                    transaction_id: txn.id,
                    reason,
                }),
            }
        }

        let category = match CategoryKey::parse(&txn.category) {
            Some(key) => key,
            None => {
                out.record(DataIntegrityWarning::MissingCategory {
                    transaction_id: txn.id,
                });
                CategoryKey::uncategorized()
            }
        };
        out.entries.push(entry(txn, category, parent_amount));
    }
}

/// Validates every split up front so a bad one never produces a partial set of entries.
fn parse_splits(subs: &[SubCategory]) -> Result<Vec<(CategoryKey, f64)>, String> {
    subs.iter()
        .enumerate()
        .map(|(index, sub)| {
            let category = sub
                .category
                .as_deref()
                .and_then(CategoryKey::parse)
                .ok_or_else(|| format!("entry {index} has no category"))?;
            if !sub.amount.is_finite() {
                return Err(format!("entry {index} has an unreadable amount"));
            }
            Ok((category, sub.amount))
        })
        .collect()
}

/// Clamps an amount to a usable non-negative contribution, flagging anything clamped.
fn contribution(transaction_id: Uuid, amount: f64, out: &mut Normalized) -> f64 {
    if !amount.is_finite() {
        out.record(DataIntegrityWarning::NonFiniteAmount { transaction_id });
        return 0.0;
    }
    if amount < 0.0 {
        out.record(DataIntegrityWarning::NegativeAmount {
            transaction_id,
            amount,
        });
        return 0.0;
    }
    amount
}

fn entry(txn: &Transaction, category: CategoryKey, amount: f64) -> AtomicEntry {
    AtomicEntry {
        transaction_id: txn.id,
        category,
        amount,
        date: txn.date,
        flow: txn.flow(),
        source: txn.source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finboard_domain::{FlowKind, TransactionSource, TransactionType};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn scan(amount: f64, subs: Vec<SubCategory>) -> Transaction {
        Transaction::new("card", TransactionType::Debit, amount, "Receipt", date())
            .with_source(TransactionSource::Scan)
            .with_sub_categories(subs)
    }

    #[test]
    fn splits_inherit_parent_fields() {
        let txn = scan(
            300.0,
            vec![SubCategory::new("Food", 200.0), SubCategory::new("Transport", 100.0)],
        );
        let normalized = TransactionNormalizer::default().normalize(&[txn.clone()]);
        assert!(normalized.warnings.is_empty());
        assert_eq!(normalized.entries.len(), 2);
        let total: f64 = normalized.entries.iter().map(|e| e.amount).sum();
        assert!((total - 300.0).abs() < 1e-9);
        for entry in &normalized.entries {
            assert_eq!(entry.date, txn.date);
            assert_eq!(entry.source, TransactionSource::Scan);
            assert_eq!(entry.flow, FlowKind::Expense);
            assert_eq!(entry.transaction_id, txn.id);
        }
        assert_eq!(normalized.entries[0].category.label(), "Food");
        assert_eq!(normalized.entries[1].category.label(), "Transport");
    }

    #[test]
    fn mismatched_splits_are_kept_and_flagged() {
        let txn = scan(
            300.0,
            vec![SubCategory::new("Food", 200.0), SubCategory::new("Transport", 50.0)],
        );
        let normalized = TransactionNormalizer::default().normalize(&[txn.clone()]);
        assert_eq!(normalized.entries.len(), 2);
        assert_eq!(
            normalized.warnings,
            vec![DataIntegrityWarning::SubCategoryMismatch {
                transaction_id: txn.id,
                parent_amount: 300.0,
                split_total: 250.0,
            }]
        );
    }

    #[test]
    fn rounding_noise_within_tolerance_is_not_flagged() {
        let txn = scan(
            0.3,
            vec![SubCategory::new("Food", 0.1), SubCategory::new("Snacks", 0.2)],
        );
        let normalized = TransactionNormalizer::default().normalize(&[txn]);
        assert!(normalized.warnings.is_empty());
    }

    #[test]
    fn malformed_splits_fall_back_to_parent_category() {
        let txn = scan(
            120.0,
            vec![
                SubCategory::new("Food", 100.0),
                SubCategory {
                    category: Some("   ".into()),
                    amount: 20.0,
                },
            ],
        );
        let normalized = TransactionNormalizer::default().normalize(&[txn]);
        assert_eq!(normalized.entries.len(), 1);
        assert_eq!(normalized.entries[0].category.label(), "Receipt");
        assert_eq!(normalized.entries[0].amount, 120.0);
        assert!(matches!(
            normalized.warnings.as_slice(),
            [DataIntegrityWarning::MalformedSubCategories { reason, .. }] if reason.contains("entry 1")
        ));
    }

    #[test]
    fn blank_category_becomes_uncategorized() {
        let txn = Transaction::new("checking", TransactionType::Credit, 50.0, "  ", date());
        let normalized = TransactionNormalizer::default().normalize(&[txn]);
        assert_eq!(normalized.entries[0].category.label(), "Uncategorized");
        assert_eq!(normalized.entries[0].flow, FlowKind::Income);
        assert!(matches!(
            normalized.warnings.as_slice(),
            [DataIntegrityWarning::MissingCategory { .. }]
        ));
    }

    #[test]
    fn negative_and_non_finite_amounts_contribute_zero() {
        let negative = Transaction::new("checking", TransactionType::Debit, -40.0, "Food", date());
        let nan = Transaction::new("checking", TransactionType::Debit, f64::NAN, "Food", date());
        let normalized = TransactionNormalizer::default().normalize(&[negative, nan]);
        assert_eq!(normalized.entries.len(), 2);
        assert!(normalized.entries.iter().all(|e| e.amount == 0.0));
        assert!(matches!(
            normalized.warnings.as_slice(),
            [
                DataIntegrityWarning::NegativeAmount { amount, .. },
                DataIntegrityWarning::NonFiniteAmount { .. }
            ] if *amount == -40.0
        ));
    }

    #[test]
    fn empty_split_list_is_treated_as_absent() {
        let txn = scan(75.0, Vec::new());
        let normalized = TransactionNormalizer::default().normalize(&[txn]);
        assert!(normalized.warnings.is_empty());
        assert_eq!(normalized.entries.len(), 1);
        assert_eq!(normalized.entries[0].category.label(), "Receipt");
    }
}
