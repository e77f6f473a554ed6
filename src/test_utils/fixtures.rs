use std::path::PathBuf;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tempfile::TempDir;

use crate::core::item::WorkItem;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// Two structural trades over zones A and B, then masonry in zone A.
pub fn scenario_items() -> Vec<WorkItem> {
    vec![
        WorkItem::new("건축", "철골", Some("A"), date(2024, 1, 1), date(2024, 3, 1)).with_cost(100.0),
        WorkItem::new("건축", "철근콘크리트", Some("B"), date(2024, 2, 1), date(2024, 4, 1))
            .with_cost(200.0),
        WorkItem::new("건축", "조적", Some("A"), date(2024, 5, 1), date(2024, 6, 1)).with_cost(50.0),
    ]
}

/// Test fixture providing isolated filesystem environment.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl UnitTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {:?}", data_path);

        Self { temp_dir, data_path }
    }

    /// Create a test file with content.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Create an `evms` cost-loaded schedule database with one row per tuple:
    /// (category1, category2, zone, start, end, cost).
    pub fn create_evms_db(
        &self,
        relative_path: &str,
        rows: &[(&str, &str, &str, &str, &str, f64)],
    ) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        let conn = Connection::open(&full_path).expect("Failed to open fixture db");
        conn.execute_batch(
            r#"CREATE TABLE evms (
                "HOW1_공사" TEXT,
                "HOW2_대공종" TEXT,
                "HOW3_작업명" TEXT,
                "WHERE2_동" TEXT,
                "WHEN1_시작일" TEXT,
                "WHEN2종료일" TEXT,
                "R10_합계_금액" REAL
            );"#,
        )
        .expect("Failed to create evms table");
        for (c1, c2, zone, start, end, cost) in rows {
            conn.execute(
                r#"INSERT INTO evms ("HOW1_공사", "HOW2_대공종", "HOW3_작업명", "WHERE2_동",
                    "WHEN1_시작일", "WHEN2종료일", "R10_합계_금액")
                   VALUES (?1, ?2, '', ?3, ?4, ?5, ?6)"#,
                params![c1, c2, zone, start, end, cost],
            )
            .expect("Failed to insert evms row");
        }
        println!("[FIXTURE] Created evms db: {:?} ({} rows)", full_path, rows.len());
        full_path
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}
