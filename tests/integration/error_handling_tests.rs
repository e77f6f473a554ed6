use crate::fixture::{path_str, TestFixture};

#[test]
fn missing_source_is_structured_error() {
    let fixture = TestFixture::new();
    let missing = fixture.path("nope.json");

    let output = fixture.run(&["-m", "outline", path_str(&missing)]);
    assert!(!output.success);
    assert_eq!(output.exit_code, 1);

    let json = output.json();
    let status = &json["status"];
    assert_eq!(status["code"], "SOURCE_NOT_FOUND");
    assert_eq!(status["numeric_code"], 101);
    assert_eq!(status["category"], "input");
    assert!(status["suggestion"].as_str().unwrap().contains("nope.json"));
    assert_eq!(json["data"], serde_json::Value::Null);
}

#[test]
fn unknown_extension_is_unsupported() {
    let fixture = TestFixture::new();
    let input = fixture.write_file("plan.csv", "a,b,c\n");

    let output = fixture.run(&["-m", "phases", path_str(&input)]);
    assert!(!output.success);
    assert_eq!(output.json()["status"]["code"], "SOURCE_UNSUPPORTED");
}

#[test]
fn malformed_snapshot_is_reported() {
    let fixture = TestFixture::new();
    let input = fixture.write_file("broken.json", "{ \"items\": [ ");

    let output = fixture.run(&["-m", "outline", path_str(&input)]);
    assert!(!output.success);
    let status = &output.json()["status"];
    assert_eq!(status["code"], "SOURCE_MALFORMED");
    assert!(status["context"]["path"].as_str().unwrap().ends_with("broken.json"));
}

#[test]
fn bad_records_are_dropped_not_fatal() {
    let fixture = TestFixture::new();
    let input = fixture.write_file(
        "partial.json",
        r#"{"items": [
            {"category1": "건축", "category2": "철골", "zone": 101,
             "start_date": "2024-01-01", "end_date": "2024-03-01"},
            {"category1": "건축", "category2": "철골", "zone": "B",
             "start_date": "2024-02-01", "end_date": "2024-04-01"}
          ],
          "milestones": [
            {"name": "착공", "date": "2024-01-01", "kind": "start"},
            {"name": "미정", "date": null}
          ]}"#,
    );

    let output = fixture.run(&["-m", "--as-of", "2024-02-01", "outline", path_str(&input)]);
    assert!(output.success, "stderr: {}", output.stderr);
    let json = output.json();
    let rows = json["data"]["rows"].as_array().unwrap();
    let milestones: Vec<_> = rows.iter().filter(|r| r["row"] == "milestone").collect();
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0]["name"], "착공");
    let phase = rows.iter().find(|r| r["row"] == "phase").unwrap();
    assert_eq!(phase["zones"][0]["label"], "101");
}

#[test]
fn human_errors_go_to_stderr() {
    let fixture = TestFixture::new();
    let missing = fixture.path("nope.json");

    let output = fixture.run(&["outline", path_str(&missing)]);
    assert!(!output.success);
    assert!(output.stdout.is_empty());
    assert!(output.stderr.contains("Error: Source not found"));
}

#[test]
fn invalid_config_fails_before_the_command_runs() {
    let fixture = TestFixture::new();
    fixture.write_config("[critical]\nnear_end_days = \"soon\"\n");

    let output = fixture.run(&["-m", "config"]);
    assert!(!output.success);
    assert_eq!(output.json()["status"]["code"], "CONFIG_INVALID");
}
