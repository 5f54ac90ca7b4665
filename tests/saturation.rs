//! Integration tests for the phase saturation pass (P001).

mod helpers;

use serde_json::json;

use helpers::{task, with_code, worker};
use validator::finding::Severity;
use validator::validate;

fn slotted_worker(id: &str, load: i64) -> validator::parse::types::Worker {
    worker(json!({
        "WorkerID": id,
        "Name": format!("Worker {id}"),
        "Skills": "general",
        "AvailableSlots": [{"start": "08:00", "end": "16:00"}],
        "MaxLoadPerPhase": load
    }))
}

#[test]
fn oversubscribed_phase_reports_shortfall() {
    let workers = vec![slotted_worker("W1", 2), slotted_worker("W2", 1)];
    let tasks = vec![
        task(json!({"TaskID": "T1", "Title": "a", "Duration": 3, "PreferredPhases": [2]})),
        task(json!({"TaskID": "T2", "Title": "b", "Duration": 2, "PreferredPhases": "[2]"})),
    ];

    let findings = validate::validate_all(&[], &workers, &tasks);
    let sat = with_code(&findings, "P001");
    assert_eq!(sat.len(), 1);
    let f = sat[0];
    assert_eq!(f.severity, Severity::Warning);
    assert_eq!(f.row, "phase-2");
    // demand 5, capacity 3, short 2
    assert!(f.message.contains("demand 5"), "{}", f.message);
    assert!(f.message.contains("capacity 3"), "{}", f.message);
    assert!(f.message.contains("short 2"), "{}", f.message);
}

#[test]
fn balanced_phase_is_quiet() {
    let workers = vec![slotted_worker("W1", 3)];
    let tasks = vec![task(json!({
        "TaskID": "T1",
        "Title": "a",
        "Duration": 3,
        "PreferredPhases": [1]
    }))];
    let findings = validate::validate_all(&[], &workers, &tasks);
    assert!(with_code(&findings, "P001").is_empty());
}

#[test]
fn workers_without_slots_contribute_no_capacity() {
    // Same load, but no availability: capacity drops to zero.
    let workers = vec![worker(json!({
        "WorkerID": "W1",
        "Name": "A",
        "Skills": "general",
        "MaxLoadPerPhase": 5
    }))];
    let tasks = vec![task(json!({
        "TaskID": "T1",
        "Title": "a",
        "Duration": 1,
        "PreferredPhases": [1]
    }))];
    let findings = validate::validate_all(&[], &workers, &tasks);
    let sat = with_code(&findings, "P001");
    assert_eq!(sat.len(), 1);
    assert!(sat[0].message.contains("capacity 0"), "{}", sat[0].message);
}

#[test]
fn capacity_is_phase_independent() {
    // The documented simplification: the full roster capacity is applied
    // to every phase, so two equally loaded phases both stay quiet.
    let workers = vec![slotted_worker("W1", 2)];
    let tasks = vec![
        task(json!({"TaskID": "T1", "Title": "a", "Duration": 2, "PreferredPhases": [1]})),
        task(json!({"TaskID": "T2", "Title": "b", "Duration": 2, "PreferredPhases": [2]})),
    ];
    let findings = validate::validate_all(&[], &workers, &tasks);
    assert!(with_code(&findings, "P001").is_empty());
}

#[test]
fn malformed_phases_and_durations_do_not_count() {
    let workers = vec![slotted_worker("W1", 1)];
    let tasks = vec![
        // Malformed phases: excluded from demand (reported as T003 instead).
        task(json!({"TaskID": "T1", "Title": "a", "Duration": 4, "PreferredPhases": "whenever"})),
        // Invalid duration contributes zero demand (reported as T001).
        task(json!({"TaskID": "T2", "Title": "b", "Duration": -1, "PreferredPhases": [1]})),
    ];
    let findings = validate::validate_all(&[], &workers, &tasks);
    assert!(with_code(&findings, "P001").is_empty());
    assert_eq!(with_code(&findings, "T003").len(), 1);
    assert_eq!(with_code(&findings, "T001").len(), 1);
}

#[test]
fn duplicate_phase_entries_count_once_per_task() {
    let workers = vec![slotted_worker("W1", 2)];
    let tasks = vec![task(json!({
        "TaskID": "T1",
        "Title": "a",
        "Duration": 2,
        "PreferredPhases": [1, 1, 1]
    }))];
    let findings = validate::validate_all(&[], &workers, &tasks);
    assert!(with_code(&findings, "P001").is_empty());
}
