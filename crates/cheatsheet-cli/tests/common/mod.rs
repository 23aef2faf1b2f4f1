#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Isolated data and config directories for one test.
pub struct Sandbox {
    pub data: TempDir,
    pub config: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            data: tempfile::tempdir().expect("failed to create data dir for tests"),
            config: tempfile::tempdir().expect("failed to create config dir for tests"),
        }
    }

    /// A `cheatsheet` command bound to this sandbox.
    pub fn cmd(&self) -> Command {
        cheatsheet_cmd_with_dirs(self.data.path(), self.config.path())
    }

    /// Run `args` and return stdout, asserting success.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("stdout should be UTF-8")
    }

    /// Ids of the stored cheatsheets, via `list --format json`.
    #[allow(dead_code)]
    pub fn ids(&self) -> Vec<String> {
        let stdout = self.run(&["list", "--format", "json"]);
        let list: serde_json::Value = serde_json::from_str(&stdout).expect("list should emit JSON");
        list.as_array()
            .expect("list should emit an array")
            .iter()
            .map(|entry| entry["id"].as_str().unwrap().to_string())
            .collect()
    }
}

/// Create a configured `cheatsheet` command suitable for integration tests.
pub fn cheatsheet_cmd_with_dirs(data_dir: &Path, config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cheatsheet"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("CHEATSHEET_DATA_DIR", data_dir);
    cmd.env("CHEATSHEET_CONFIG_DIR", config_dir);
    cmd.env("NO_COLOR", "1");
    cmd
}
