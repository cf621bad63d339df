use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// An isolated home directory plus the wallet document path inside it.
pub struct TestEnv {
    pub home: PathBuf,
    pub data: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let home = temp.path().to_path_buf();
        TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
        let data = home.join("db.json");
        Self { home, data }
    }

    /// `wallet_cli` with plain output, pointed at this environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("wallet_cli").expect("wallet_cli binary");
        cmd.env("WALLET_HOME", &self.home)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("WALLET_DATA_FILE")
            .env_remove("WALLET_CURRENCY")
            .arg("--plain")
            .arg("--data")
            .arg(&self.data);
        cmd
    }

    pub fn run(&self, args: &[&str]) {
        self.cli().args(args).assert().success();
    }

    pub fn seed_household(&self) {
        self.run(&["add-transaction", "--type", "income", "--category", "Salary", "--amount", "1000", "--date", "2024-01-05"]);
        self.run(&["add-transaction", "--type", "expense", "--category", "Food", "--amount", "400", "--date", "2024-01-10"]);
        self.run(&["add-transaction", "--type", "expense", "--category", "Food", "--amount", "700", "--date", "2024-02-01"]);
    }
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read file")
}
