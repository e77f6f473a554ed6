use crate::assert_command_success;
use crate::fixture::{path_str, EvmsRow, TestFixture};

const ROWS: [EvmsRow<'static>; 5] = [
    ("건축", "A03_철골공사", "1_A동", "2024-01-01", "2024-02-01", 60.0),
    ("건축", "A03_철골공사", "1_A동", "2024-01-15", "2024-03-01", 40.0),
    ("건축", "A04_철근콘크리트공사", "2_B동", "2024-02-01", "2024-04-01", 200.0),
    ("기계설비", "M99_잡공사", "1_A동", "2024-03-01", "2024-05-01", 80.0),
    ("건축", "A09_조적공사", "1_A동", "", "2024-06-01", 999.0),
];

#[test]
fn sqlite_source_groups_rows() {
    let fixture = TestFixture::new();
    let db = fixture.write_evms_db("evms.db", &ROWS);

    let output = fixture.run(&["-m", "phases", path_str(&db)]);
    assert_command_success!(output);

    let data = &output.json()["data"];
    // undated masonry row never reaches the engine
    assert_eq!(data["total_cost"], 380.0);
    let phases = data["phases"].as_array().unwrap();
    assert_eq!(phases[0]["phase"], "구조체공사 (RC/S)");
    assert_eq!(phases[0]["count"], 3);
    assert_eq!(phases[0]["zones"]["1_A동"]["count"], 2);
    assert_eq!(phases[1]["phase"], "기계설비공사");
}

#[test]
fn sqlite_outline_strips_zone_codes() {
    let fixture = TestFixture::new();
    let db = fixture.write_evms_db("site.sqlite", &ROWS);

    let output = fixture.run(&["--as-of", "2024-02-01", "-m", "outline", path_str(&db)]);
    assert_command_success!(output);

    let structure = &output.json()["data"]["rows"][0];
    assert_eq!(structure["zones"][0]["zone"], "1_A동");
    assert_eq!(structure["zones"][0]["label"], "A동");
}

#[test]
fn configured_table_name_is_used() {
    let fixture = TestFixture::new();
    let db = fixture.write_evms_db("evms.db", &ROWS);

    let output = fixture.run_with_env(
        &["-m", "phases", path_str(&db)],
        &[("HAMMOCK_SOURCE_TABLE", "schedule")],
    );
    assert!(!output.success);
    assert_eq!(output.json()["status"]["code"], "DATABASE_ERROR");
}

#[test]
fn explicit_source_kind_overrides_extension() {
    let fixture = TestFixture::new();
    let input = fixture.write_file("export.txt", crate::fixture::SCENARIO_JSON);

    let output = fixture.run(&["-m", "phases", path_str(&input), "--source", "json"]);
    assert_command_success!(output);
    assert_eq!(output.json()["data"]["phases"].as_array().unwrap().len(), 2);
}
