use std::path::PathBuf;

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use chrono::NaiveDate;
use finboard::{
    domain::{Budget, FlowKind, SubCategory, Transaction, TransactionSource, TransactionType},
    storage::{Dataset, DatasetFile, InMemoryStore},
};
use once_cell::sync::Lazy;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// January 2024 household data shared by the scenario and CLI suites.
///
/// Expenses: Food 500 + 300 + 80 (split), Rent 900, Household 40 (split); one February
/// expense outside the month. Income: Salary 3000 against a 3500 goal.
pub static JANUARY: Lazy<Dataset> = Lazy::new(|| Dataset {
    transactions: vec![
        Transaction::new("checking", TransactionType::Debit, 900.0, "Rent", date(2024, 1, 1)),
        Transaction::new("checking", TransactionType::Debit, 500.0, "Food", date(2024, 1, 5))
            .with_description("Weekly shop"),
        Transaction::new("card", TransactionType::Debit, 300.0, "food ", date(2024, 1, 12)),
        Transaction::new("card", TransactionType::Debit, 120.0, "Groceries", date(2024, 1, 20))
            .with_source(TransactionSource::Scan)
            .with_sub_categories(vec![
                SubCategory::new("Food", 80.0),
                SubCategory::new("Household", 40.0),
            ]),
        Transaction::new("checking", TransactionType::Credit, 3000.0, "Salary", date(2024, 1, 25)),
        Transaction::new("card", TransactionType::Debit, 60.0, "Fun", date(2024, 2, 3)),
    ],
    budgets: vec![
        Budget::new("Food", FlowKind::Expense, 1000.0),
        Budget::new("Rent", FlowKind::Expense, 900.0),
        Budget::new("Salary", FlowKind::Income, 3500.0),
    ],
});

#[allow(dead_code)]
pub fn january_store() -> InMemoryStore {
    JANUARY.clone().into_store()
}

/// Isolated home directory plus a dataset file for driving the binary.
#[allow(dead_code)]
pub struct CliHarness {
    home: TempDir,
    data: PathBuf,
}

#[allow(dead_code)]
impl CliHarness {
    pub fn new() -> Self {
        Self::with_dataset(&JANUARY)
    }

    pub fn with_dataset(dataset: &Dataset) -> Self {
        let home = TempDir::new().expect("create temp dir");
        let data = home.child("data.json").path().to_path_buf();
        DatasetFile::new(&data)
            .write(dataset)
            .expect("write dataset");
        Self { data, home }
    }

    pub fn data(&self) -> &std::path::Path {
        &self.data
    }

    pub fn home(&self) -> &std::path::Path {
        self.home.path()
    }

    /// Binary invocation with `FINBOARD_HOME` pointed at the harness and colour disabled.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("finboard_cli").expect("binary exists");
        cmd.env("FINBOARD_HOME", self.home.path().join("home"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}
