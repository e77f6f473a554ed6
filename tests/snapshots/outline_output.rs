use chrono::NaiveDate;
use insta::{assert_json_snapshot, assert_snapshot};

use hammock::core::{
    build_outline, Milestone, MilestoneKind, Outline, OutlineRow, OutlineSettings, PhaseTable,
    WorkItem,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn scenario() -> Outline {
    let items = vec![
        WorkItem::new("건축", "A03_철골공사", Some("A"), date(2024, 1, 1), date(2024, 3, 1))
            .with_cost(100.0),
        WorkItem::new("건축", "A04_철근콘크리트공사", Some("B"), date(2024, 2, 1), date(2024, 4, 1))
            .with_cost(200.0),
        WorkItem::new("건축", "A09_조적공사", Some("A"), date(2024, 5, 1), date(2024, 6, 1))
            .with_cost(50.0),
    ];
    let milestones = vec![
        Milestone::new("착공", date(2024, 1, 1), MilestoneKind::Start),
        Milestone::new("준공", date(2024, 7, 1), MilestoneKind::End),
    ];
    build_outline(
        &items,
        &milestones,
        date(2024, 2, 15),
        &PhaseTable::default(),
        &OutlineSettings::default(),
    )
}

/// Date-and-percent digest of the rows; bar geometry is left out.
fn digest(outline: &Outline) -> String {
    let schedule = outline.schedule().unwrap();
    let mut lines = Vec::new();
    for row in &schedule.rows {
        match row {
            OutlineRow::Milestone(m) => {
                lines.push(format!("milestone {} {} {}", m.name, m.date, m.kind));
            }
            OutlineRow::Phase(p) => {
                lines.push(format!(
                    "phase {} {}..{} {}% critical={} share={:.1}",
                    p.name, p.start, p.end, p.progress, p.critical, p.cost_share
                ));
                for z in &p.zones {
                    lines.push(format!(
                        "  zone {} {}..{} {}% critical={}",
                        z.label, z.start, z.end, z.progress, z.critical
                    ));
                }
            }
        }
    }
    lines.join("\n")
}

#[test]
fn test_scenario_outline_digest() {
    assert_snapshot!(digest(&scenario()), @r"
    milestone 착공 2024-01-01 start
    phase 구조체공사 (RC/S) 2024-01-01..2024-04-01 49% critical=false share=85.7
      zone A 2024-01-01..2024-03-01 75% critical=false
      zone B 2024-02-01..2024-04-01 23% critical=false
    phase 마감공사 2024-05-01..2024-06-01 0% critical=false share=14.3
    milestone 준공 2024-07-01 end
    ");
}

#[test]
fn test_no_data_json() {
    let outline = build_outline(
        &[],
        &[],
        date(2024, 1, 1),
        &PhaseTable::default(),
        &OutlineSettings::default(),
    );
    assert_json_snapshot!(outline, @r#"
    {
      "status": "no_data"
    }
    "#);
}

#[test]
fn test_month_tick_labels() {
    let outline = scenario();
    let labels: Vec<_> = outline
        .schedule()
        .unwrap()
        .timeline
        .ticks
        .iter()
        .map(|t| format!("{}{}", t.label, if t.quarter { " Q" } else { "" }))
        .collect();
    assert_snapshot!(labels.join("\n"), @r"
    24.01 Q
    24.02
    24.03
    24.04 Q
    24.05
    24.06
    ");
}
