use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::FlowKind;

/// A spending limit (expense) or earning goal (income) for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    pub amount: f64,
    /// Missing timestamps read as the Unix epoch, so any dated duplicate wins over them.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(category: impl Into<String>, kind: FlowKind, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            kind,
            amount,
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
