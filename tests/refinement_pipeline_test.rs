//! Refinement Pipeline Tests
//!
//! End-to-end scenarios for the goal → trace → prune pipeline and property
//! tests over generated session logs.

use proptest::prelude::*;
use replay_refiner::capture::types::{EventKind, EventRecord, EventValue};
use replay_refiner::refinement::{
    deduce_goal, prune_noise, refine, trace_back, PrefixClassifier, ScriptRefiner,
};
use std::collections::HashSet;

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_toggle_recorded_out_of_order() {
    let log = vec![
        EventRecord::toggle("task-1", true, 10),
        EventRecord::toggle("task-1", false, 5),
    ];

    let goal = deduce_goal(&log, &PrefixClassifier::default());
    assert_eq!(goal.completed_tasks().len(), 1);
    assert!(goal.is_completed("task-1"));

    assert_eq!(refine(&log), vec![EventRecord::toggle("task-1", true, 10)]);
}

#[test]
fn test_cleared_field_drops_target() {
    let log = vec![
        EventRecord::text_input("email", "a@x.com", 1),
        EventRecord::text_input("email", "", 2),
    ];

    let goal = deduce_goal(&log, &PrefixClassifier::default());
    assert!(goal.form_value("email").is_none());
    assert!(refine(&log).is_empty());
}

#[test]
fn test_reverted_edit_selects_latest_match() {
    let log = vec![
        EventRecord::text_input("name", "Bob", 1),
        EventRecord::text_input("name", "Bob and Alice", 2),
        EventRecord::text_input("name", "Bob", 3),
    ];

    let goal = deduce_goal(&log, &PrefixClassifier::default());
    assert_eq!(goal.form_value("name"), Some("Bob"));
    assert_eq!(refine(&log), vec![EventRecord::text_input("name", "Bob", 3)]);
}

#[test]
fn test_interleaved_targets_with_untoggled_task() {
    let log = vec![
        EventRecord::toggle("task-1", true, 1),
        EventRecord::text_input("email", "a@x", 2),
        EventRecord::toggle("task-2", true, 3),
        EventRecord::text_input("email", "a@x.com", 4),
        EventRecord::toggle("task-2", false, 5),
    ];

    assert_eq!(
        refine(&log),
        vec![
            EventRecord::toggle("task-1", true, 1),
            EventRecord::text_input("email", "a@x.com", 4),
        ]
    );
}

#[test]
fn test_same_millisecond_edit_keeps_producing_record() {
    let log = vec![
        EventRecord::text_input("name", "Bob", 1),
        EventRecord::text_input("name", "Xyz", 1),
        EventRecord::text_input("name", "Bob ", 2),
    ];

    let goal = deduce_goal(&log, &PrefixClassifier::default());
    assert_eq!(goal.form_value("name"), Some("Bob"));
    assert_eq!(refine(&log), vec![EventRecord::text_input("name", "Bob", 1)]);
}

#[test]
fn test_same_millisecond_toggle_resolves_to_on() {
    let log = vec![
        EventRecord::toggle("task-1", false, 5),
        EventRecord::toggle("task-1", true, 5),
    ];
    assert_eq!(refine(&log), vec![EventRecord::toggle("task-1", true, 5)]);
}

#[test]
fn test_empty_log() {
    assert!(refine(&[]).is_empty());
}

#[test]
fn test_clicks_never_survive() {
    let log = vec![
        EventRecord::click("menu", 1),
        EventRecord::click("settings", 2),
        EventRecord::click("close", 3),
    ];
    assert!(refine(&log).is_empty());
}

#[test]
fn test_stages_compose_like_refine() {
    let log = vec![
        EventRecord::click("open", 1),
        EventRecord::text_input("city", "Pa", 2),
        EventRecord::text_input("city", "Paris", 3),
        EventRecord::toggle("task-book", true, 4),
        EventRecord::text_input("notes", "", 5),
    ];

    let goal = deduce_goal(&log, &PrefixClassifier::default());
    let keep = trace_back(&log, &goal);
    let script = prune_noise(&log, &keep);

    assert_eq!(script, refine(&log));
    assert_eq!(script.len(), 2);
}

#[test]
fn test_malformed_records_are_tolerated() {
    let json = r#"[
        {"kind": "state-toggle", "target": "task-1", "value": "yes", "recorded_at": 1},
        {"kind": "swipe", "target": "carousel", "recorded_at": 2},
        {"kind": "text-input", "target": "name", "value": true, "recorded_at": 3},
        {"kind": "text-input", "target": "city", "value": "Oslo", "recorded_at": 4}
    ]"#;
    let log: Vec<EventRecord> = serde_json::from_str(json).unwrap();

    assert_eq!(log[1].kind, EventKind::Unrecognized);
    assert_eq!(refine(&log), vec![EventRecord::text_input("city", "Oslo", 4)]);
}

#[test]
fn test_malformed_last_record_hides_earlier_value() {
    // The latest record decides the goal even when it is unusable.
    let log = vec![
        EventRecord::text_input("name", "Bob", 1),
        EventRecord {
            kind: EventKind::TextInput,
            target: "name".to_string(),
            value: Some(EventValue::Flag(true)),
            recorded_at: 2,
        },
    ];
    assert!(refine(&log).is_empty());
}

#[test]
fn test_injected_classifier() {
    let log = vec![
        EventRecord::toggle("step/confirm", true, 1),
        EventRecord::toggle("task-1", true, 2),
    ];
    let refiner = ScriptRefiner::with_classifier(|target: &str| target.starts_with("step/"));
    assert_eq!(refiner.refine(&log), vec![EventRecord::toggle("step/confirm", true, 1)]);
}

#[test]
fn test_parallel_refinement() {
    let refiner = ScriptRefiner::new();
    let refiner = &refiner;
    let logs: Vec<Vec<EventRecord>> = (0..8)
        .map(|i| {
            vec![
                EventRecord::text_input("name", format!("user-{}", i), 1),
                EventRecord::toggle("task-1", i % 2 == 0, 2),
            ]
        })
        .collect();

    let results: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = logs
            .iter()
            .map(|log| scope.spawn(move || refiner.refine(log).len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, steps) in results.into_iter().enumerate() {
        assert_eq!(steps, if i % 2 == 0 { 2 } else { 1 });
    }
}

// ============================================================================
// Properties
// ============================================================================

const TARGETS: [&str; 5] = ["task-1", "task-2", "name", "email", "save"];
const TEXTS: [&str; 5] = ["", "  ", "Bob", " Bob", "Alice"];

fn arb_record() -> impl Strategy<Value = EventRecord> {
    (0usize..TARGETS.len(), 0u8..4, any::<bool>(), 0usize..TEXTS.len(), 0i64..20).prop_map(
        |(target, kind, flag, text, recorded_at)| {
            let target = TARGETS[target];
            match kind {
                0 => EventRecord::click(target, recorded_at),
                1 => EventRecord::text_input(target, TEXTS[text], recorded_at),
                2 => EventRecord::toggle(target, flag, recorded_at),
                _ => EventRecord {
                    kind: EventKind::Unrecognized,
                    target: target.to_string(),
                    value: None,
                    recorded_at,
                },
            }
        },
    )
}

fn arb_log() -> impl Strategy<Value = Vec<EventRecord>> {
    proptest::collection::vec(arb_record(), 0..40)
}

proptest! {
    #[test]
    fn targets_are_unique(log in arb_log()) {
        let script = refine(&log);
        let targets: HashSet<&str> = script.iter().map(|r| r.target.as_str()).collect();
        prop_assert_eq!(targets.len(), script.len());
    }

    #[test]
    fn output_is_chronological(log in arb_log()) {
        let script = refine(&log);
        prop_assert!(script.windows(2).all(|w| w[0].recorded_at <= w[1].recorded_at));
    }

    #[test]
    fn output_is_subset_of_input(log in arb_log()) {
        let script = refine(&log);
        let identities: HashSet<(i64, &str)> = log.iter().map(EventRecord::identity).collect();
        for record in &script {
            prop_assert!(identities.contains(&record.identity()));
            prop_assert!(log.contains(record));
        }
    }

    #[test]
    fn output_never_exceeds_goal(log in arb_log()) {
        let goal = deduce_goal(&log, &PrefixClassifier::default());
        let script = refine(&log);
        let necessary = goal.necessary_targets();
        prop_assert!(script.len() <= necessary.len());
        for record in &script {
            prop_assert!(necessary.contains(record.target.as_str()));
        }
    }

    #[test]
    fn refinement_is_a_fixed_point(log in arb_log()) {
        let once = refine(&log);
        let twice = refine(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn goal_deduction_is_deterministic(log in arb_log()) {
        let classifier = PrefixClassifier::default();
        prop_assert_eq!(deduce_goal(&log, &classifier), deduce_goal(&log, &classifier));
    }

    #[test]
    fn refinement_is_deterministic(log in arb_log()) {
        prop_assert_eq!(refine(&log), refine(&log));
    }
}
