//! Normalized contributions produced by flattening transactions.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::FlowKind, transaction::TransactionSource};

/// Label used whenever a record carries no usable category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Canonical grouping key for a free-text category plus the label shown to users.
///
/// Equality and hashing only consider `key`, so `"Food"` and `" food "` group together while the
/// first spelling seen is kept as the label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryKey {
    key: String,
    label: String,
}

impl CategoryKey {
    /// Builds a key from raw text, returning `None` when nothing but whitespace remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let label = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if label.is_empty() {
            return None;
        }
        Some(Self {
            key: label.to_lowercase(),
            label,
        })
    }

    /// Builds a key, falling back to [`UNCATEGORIZED`] for blank input.
    pub fn new(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(Self::uncategorized)
    }

    pub fn uncategorized() -> Self {
        Self {
            key: UNCATEGORIZED.to_lowercase(),
            label: UNCATEGORIZED.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, raw: &str) -> bool {
        CategoryKey::parse(raw).is_some_and(|other| other.key == self.key)
    }
}

impl PartialEq for CategoryKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CategoryKey {}

impl Hash for CategoryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A single (category, amount, date, flow) contribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtomicEntry {
    pub transaction_id: Uuid,
    pub category: CategoryKey,
    pub amount: f64,
    pub date: NaiveDate,
    pub flow: FlowKind,
    pub source: TransactionSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ignore_case_and_spacing() {
        let a = CategoryKey::new("Food");
        let b = CategoryKey::new("  food ");
        let c = CategoryKey::new("Eating   Out");
        assert_eq!(a, b);
        assert_eq!(a.label(), "Food");
        assert_eq!(b.label(), "food");
        assert_eq!(c.key(), "eating out");
        assert!(c.matches("eating out"));
    }

    #[test]
    fn blank_falls_back_to_uncategorized() {
        assert!(CategoryKey::parse("   ").is_none());
        let key = CategoryKey::new("");
        assert_eq!(key.label(), UNCATEGORIZED);
        assert_eq!(key, CategoryKey::new("uncategorized"));
    }
}
