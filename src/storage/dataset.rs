use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use finboard_domain::{Budget, Transaction};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{InMemoryStore, Result};

/// On-disk shape of an exported dataset: `{"transactions": [...], "budgets": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl Dataset {
    pub fn into_store(self) -> InMemoryStore {
        InMemoryStore::new(self.transactions, self.budgets)
    }
}

/// JSON file holding a [`Dataset`].
#[derive(Debug, Clone)]
pub struct DatasetFile {
    path: PathBuf,
}

impl DatasetFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Dataset> {
        let data = fs::read_to_string(&self.path)?;
        let dataset: Dataset = serde_json::from_str(&data)?;
        info!(
            path = %self.path.display(),
            transactions = dataset.transactions.len(),
            budgets = dataset.budgets.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn load(&self) -> Result<InMemoryStore> {
        self.read().map(Dataset::into_store)
    }

    /// Writes through a temp file and renames it into place.
    pub fn write(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(dataset)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FinboardError;

    #[test]
    fn reads_store_shaped_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("data.json");
        fs::write(
            &path,
            r#"{
                "transactions": [{
                    "id": "7d7b0f5c-6f7e-4a53-9d7c-3f0c4b8a1e11",
                    "type": "debit",
                    "amount": 500,
                    "category": "Food",
                    "date": "2024-01-05"
                }],
                "budgets": [{
                    "id": "0b8f2c1e-5a4d-4c3b-8e2f-1a9d7c6b5e40",
                    "category": "Food",
                    "type": "expense",
                    "amount": 1000,
                    "createdAt": "2024-01-01T00:00:00Z"
                }]
            }"#,
        )
        .unwrap();

        let store = DatasetFile::new(&path).load().unwrap();
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.transactions()[0].amount, 500.0);
        assert_eq!(store.budgets()[0].amount, 1000.0);
    }

    #[test]
    fn write_replaces_the_file_atomically() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("exports").join("data.json");
        let file = DatasetFile::new(&path);
        let dataset = Dataset {
            transactions: vec![Transaction::new(
                "card",
                finboard_domain::TransactionType::Debit,
                42.0,
                "Fuel",
                chrono::NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            )],
            budgets: vec![Budget::new("Fuel", finboard_domain::FlowKind::Expense, 100.0)],
        };

        file.write(&dataset).unwrap();
        file.write(&dataset).unwrap();

        assert_eq!(file.read().unwrap(), dataset);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn timestamped_transactions_load_as_calendar_days() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("data.json");
        fs::write(
            &path,
            r#"{"transactions": [{
                "id": "7d7b0f5c-6f7e-4a53-9d7c-3f0c4b8a1e11",
                "type": "debit",
                "amount": 12.5,
                "category": "Food",
                "date": "2024-01-05T23:30:00.000Z"
            }]}"#,
        )
        .unwrap();

        let store = DatasetFile::new(&path).load().unwrap();
        assert_eq!(
            store.transactions()[0].date,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = DatasetFile::new(temp.path().join("absent.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, FinboardError::Io(_)));
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "{\"transactions\": 3}").unwrap();
        let err = DatasetFile::new(&path).load().unwrap_err();
        assert!(matches!(err, FinboardError::Serde(_)));
    }
}
