use serde_json::Value;

use crate::fixture::{path_str, TestFixture};
use crate::{assert_command_success, assert_stdout_contains};

fn row_names(data: &Value) -> Vec<String> {
    data["rows"]
        .as_array()
        .expect("rows array")
        .iter()
        .map(|row| match row["row"].as_str() {
            Some("phase") => format!("[{}]", row["name"].as_str().unwrap_or_default()),
            _ => row["name"].as_str().unwrap_or_default().to_string(),
        })
        .collect()
}

#[test]
fn outline_json_interleaves_milestones_and_phases() {
    let fixture = TestFixture::new();
    let input = fixture.write_scenario();

    let output = fixture.run(&["--as-of", "2024-02-15", "-m", "outline", path_str(&input)]);
    assert_command_success!(output);

    let json = output.json();
    assert_eq!(json["status"], "ok");
    let data = &json["data"];
    assert_eq!(data["status"], "schedule");
    assert_eq!(data["as_of"], "2024-02-15");
    assert_eq!(data["total_cost"], 350.0);
    assert_eq!(
        row_names(data),
        vec!["착공", "[구조체공사 (RC/S)]", "[마감공사]", "준공"]
    );

    let structure = &data["rows"][1];
    assert_eq!(structure["progress"], 49);
    assert_eq!(structure["critical"], false);
    assert_eq!(structure["duration_days"], 91);
    assert_eq!(structure["zones"][0]["label"], "A");
    assert_eq!(structure["zones"][0]["progress"], 75);
    assert_eq!(structure["zones"][1]["progress"], 23);
    assert!(data["rows"][2]["zones"].as_array().unwrap().is_empty());
}

#[test]
fn outline_flags_near_end_phase() {
    let fixture = TestFixture::new();
    let input = fixture.write_scenario();

    let output = fixture.run(&["--as-of", "2024-03-20", "-m", "outline", path_str(&input)]);
    assert_command_success!(output);

    let structure = &output.json()["data"]["rows"][1];
    assert_eq!(structure["progress"], 87);
    assert_eq!(structure["critical"], true);
}

#[test]
fn extra_and_derived_milestones_are_added() {
    let fixture = TestFixture::new();
    let input = fixture.write_scenario();
    let extra = fixture.write_file(
        "milestones.json",
        r#"[{"name": "골조완료", "date": "2024-04-15", "kind": "other"}]"#,
    );

    let output = fixture.run(&[
        "--as-of",
        "2024-02-15",
        "-m",
        "outline",
        path_str(&input),
        "--milestones",
        path_str(&extra),
        "--derive-milestones",
    ]);
    assert_command_success!(output);

    let names = row_names(&output.json()["data"]);
    assert_eq!(
        names,
        vec![
            "착공",
            "착공 (Notice to Proceed)",
            "[구조체공사 (RC/S)]",
            "골조완료",
            "골조 상량 (Top Out)",
            "[마감공사]",
            "준공",
            "사용승인 및 준공 (Handover)",
        ]
    );
}

#[test]
fn empty_snapshot_reports_no_data() {
    let fixture = TestFixture::new();
    let input = fixture.write_file("empty.json", r#"{"items": []}"#);

    let output = fixture.run(&["-m", "outline", path_str(&input)]);
    assert_command_success!(output);
    assert_eq!(output.json()["data"], serde_json::json!({"status": "no_data"}));

    let human = fixture.run(&["outline", path_str(&input)]);
    assert_command_success!(human);
    assert_stdout_contains!(human, "No dated work items");
}

#[test]
fn plain_outline_draws_ascii_bars() {
    let fixture = TestFixture::new();
    let input = fixture.write_scenario();

    let output = fixture.run(&["--as-of", "2024-02-15", "--plain", "outline", path_str(&input)]);
    assert_command_success!(output);
    assert_stdout_contains!(output, "Schedule Outline");
    assert_stdout_contains!(output, "구조체공사 (RC/S)");
    assert_stdout_contains!(output, "#");
    assert!(!output.stdout.contains('█'));
    assert!(!output.stdout.contains("\u{1b}["), "plain output must not carry ANSI codes");
}

#[test]
fn phases_report_cost_share() {
    let fixture = TestFixture::new();
    let input = fixture.write_scenario();

    let output = fixture.run(&["-m", "phases", path_str(&input)]);
    assert_command_success!(output);

    let data = &output.json()["data"];
    assert_eq!(data["total_cost"], 350.0);
    let phases = data["phases"].as_array().unwrap();
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0]["phase"], "구조체공사 (RC/S)");
    assert_eq!(phases[0]["min_start"], "2024-01-01");
    assert_eq!(phases[0]["max_end"], "2024-04-01");
    assert!(phases[0]["zones"]["B"].is_object());
    let share = phases[1]["cost_share"].as_f64().unwrap();
    assert!((share - 50.0 / 350.0 * 100.0).abs() < 1e-9);
}

#[test]
fn milestones_command_derives_project_milestones() {
    let fixture = TestFixture::new();
    let input = fixture.write_scenario();

    let output = fixture.run(&["-m", "milestones", path_str(&input)]);
    assert_command_success!(output);

    let data = output.json()["data"].clone();
    let milestones = data.as_array().unwrap();
    assert_eq!(milestones[0]["date"], "2024-01-01");
    assert_eq!(milestones[0]["kind"], "start");
    let last = milestones.last().unwrap();
    assert_eq!(last["date"], "2024-06-01");
    assert_eq!(last["kind"], "end");
}
