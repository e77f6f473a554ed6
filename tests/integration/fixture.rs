use std::path::{Path, PathBuf};
use std::process::Command;

use rusqlite::{params, Connection};
use serde_json::Value;
use tempfile::TempDir;

/// Assert command succeeded
#[macro_export]
macro_rules! assert_command_success {
    ($output:expr) => {
        assert!(
            $output.success,
            "Command failed with exit code {}\nstdout: {}\nstderr: {}",
            $output.exit_code, $output.stdout, $output.stderr
        );
    };
}

/// Assert stdout contains expected text
#[macro_export]
macro_rules! assert_stdout_contains {
    ($output:expr, $expected:expr) => {
        assert!(
            $output.stdout.contains($expected),
            "stdout does not contain '{}'\nActual stdout:\n{}",
            $expected,
            $output.stdout
        );
    };
}

/// Three items over two phases: structure (zones A and B) and finishing.
pub const SCENARIO_JSON: &str = r#"{
  "items": [
    {"category1": "건축", "category2": "A03_철골공사", "zone": "A",
     "start_date": "2024-01-01", "end_date": "2024-03-01", "count": 1, "cost": 100},
    {"category1": "건축", "category2": "A04_철근콘크리트공사", "zone": "B",
     "start_date": "2024-02-01", "end_date": "2024-04-01", "count": 1, "cost": 200},
    {"category1": "건축", "category2": "A09_조적공사", "zone": "A",
     "start_date": "2024-05-01", "end_date": "2024-06-01", "count": 1, "cost": 50}
  ],
  "milestones": [
    {"name": "착공", "date": "2024-01-01", "kind": "start"},
    {"name": "준공", "date": "2024-07-01", "kind": "end"}
  ]
}"#;

/// One row of the `evms` table: work type, trade, zone, start, end, cost.
pub type EvmsRow<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, f64);

/// Captured output of one CLI run
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Integration test fixture providing an isolated project root
pub struct TestFixture {
    pub temp_dir: TempDir,
    /// Project root (temp_dir path)
    pub root: PathBuf,
    /// Project config file (./.hammock/config.toml)
    pub config_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let config_path = root.join(".hammock/config.toml");
        Self {
            temp_dir,
            root,
            config_path,
        }
    }

    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn write_scenario(&self) -> PathBuf {
        self.write_file("scenario.json", SCENARIO_JSON)
    }

    pub fn write_config(&self, content: &str) -> PathBuf {
        let rel = self
            .config_path
            .strip_prefix(&self.root)
            .expect("config path is under root")
            .to_string_lossy()
            .into_owned();
        self.write_file(&rel, content)
    }

    /// Build a SQLite database with the default `evms` layout.
    pub fn write_evms_db(&self, rel: &str, rows: &[EvmsRow<'_>]) -> PathBuf {
        let path = self.root.join(rel);
        let conn = Connection::open(&path).expect("Failed to open db");
        conn.execute_batch(
            r#"CREATE TABLE evms (
                "HOW1_공사" TEXT, "HOW2_대공종" TEXT, "HOW3_작업명" TEXT, "WHERE2_동" TEXT,
                "WHEN1_시작일" TEXT, "WHEN2종료일" TEXT, "R10_합계_금액" REAL
            );"#,
        )
        .expect("Failed to create evms table");
        for (c1, c2, zone, start, end, cost) in rows {
            conn.execute(
                r#"INSERT INTO evms VALUES (?1, ?2, '', ?3, ?4, ?5, ?6)"#,
                params![c1, c2, zone, start, end, cost],
            )
            .expect("Failed to insert row");
        }
        path
    }

    /// Run the CLI with HOME and the project root pointed at the fixture.
    pub fn run(&self, args: &[&str]) -> CommandOutput {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> CommandOutput {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_hammock"));
        cmd.args(args)
            .env("HOME", &self.root)
            .env("HAMMOCK_ROOT", &self.root)
            .env("RUST_LOG", "off")
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("HAMMOCK_CONFIG")
            .current_dir(&self.root);
        for key in OVERRIDE_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute hammock");
        CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

const OVERRIDE_VARS: [&str; 7] = [
    "HAMMOCK_DEFAULT_ZONE",
    "HAMMOCK_PAD_RATIO",
    "HAMMOCK_MAX_ZONE_ROWS",
    "HAMMOCK_NEAR_END_DAYS",
    "HAMMOCK_NEAR_END_PROGRESS",
    "HAMMOCK_ZONE_LAG",
    "HAMMOCK_SOURCE_TABLE",
];

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}
