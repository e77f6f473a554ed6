use proptest::prelude::*;

use hammock::core::{aggregate, build_outline, progress, OutlineSettings, PhaseTable};

use crate::strategies::{arb_date, arb_item, arb_items};

proptest! {
    #[test]
    fn progress_stays_in_bounds(a in arb_date(), b in arb_date(), today in arb_date()) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(progress(start, end, today) <= 100);
    }

    #[test]
    fn progress_never_decreases(a in arb_date(), b in arb_date(), t1 in arb_date(), t2 in arb_date()) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let (early, late) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        prop_assert!(progress(start, end, early) <= progress(start, end, late));
    }

    #[test]
    fn adding_an_item_never_shrinks_a_phase_or_zone_hammock(items in arb_items(), extra in arb_item()) {
        let table = PhaseTable::default();
        let before = aggregate(&items, &table, "공통");
        let mut grown = items.clone();
        grown.push(extra);
        let after = aggregate(&grown, &table, "공통");

        for phase in &before {
            let widened = after.iter().find(|p| p.phase == phase.phase);
            prop_assert!(widened.is_some());
            let widened = widened.unwrap();
            prop_assert!(widened.min_start <= phase.min_start);
            prop_assert!(widened.max_end >= phase.max_end);
            prop_assert!(widened.count >= phase.count);

            for (label, zone) in &phase.zones {
                let grown_zone = widened.zones.get(label);
                prop_assert!(grown_zone.is_some(), "zone {} vanished", label);
                let grown_zone = grown_zone.unwrap();
                prop_assert!(grown_zone.start <= zone.start);
                prop_assert!(grown_zone.end >= zone.end);
                prop_assert!(grown_zone.count >= zone.count);
            }
        }
    }

    #[test]
    fn phases_come_out_in_construction_order(items in arb_items(), today in arb_date()) {
        let table = PhaseTable::default();
        let phases = aggregate(&items, &table, "공통");
        prop_assert!(phases.windows(2).all(|w| w[0].order <= w[1].order));

        let outline = build_outline(&items, &[], today, &table, &OutlineSettings::default());
        if let Some(schedule) = outline.schedule() {
            let names: Vec<_> = schedule.phases().map(|p| p.name.clone()).collect();
            let expected: Vec<_> = phases.iter().map(|p| p.phase.clone()).collect();
            prop_assert_eq!(names, expected);
        } else {
            prop_assert!(phases.is_empty());
        }
    }

    #[test]
    fn zone_spans_sit_inside_their_phase(items in arb_items()) {
        for phase in aggregate(&items, &PhaseTable::default(), "공통") {
            let zone_count: u64 = phase.zones.values().map(|z| z.count).sum();
            prop_assert_eq!(zone_count, phase.count);
            for zone in phase.zones.values() {
                prop_assert!(zone.start >= phase.min_start && zone.end <= phase.max_end);
            }
        }
    }
}
