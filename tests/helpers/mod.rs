use serde_json::Value;

use validator::finding::Finding;
use validator::parse::types::{Client, RawRow, Task, Worker};
use validator::session::DataSet;

// =============================================================================
// Row and entity builders
// =============================================================================

/// Turn a `json!({...})` literal into a raw sheet row.
pub fn row(value: Value) -> RawRow {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture row must be a JSON object, got {other}"),
    }
}

pub fn client(value: Value) -> Client {
    Client::from_row(&row(value))
}

pub fn worker(value: Value) -> Worker {
    Worker::from_row(&row(value))
}

pub fn task(value: Value) -> Task {
    Task::from_row(&row(value))
}

/// A worker that passes every rule: one skill, one slot, load 1.
pub fn able_worker(id: &str, skills: &str) -> Worker {
    worker(serde_json::json!({
        "WorkerID": id,
        "Name": format!("Worker {id}"),
        "Skills": skills,
        "AvailableSlots": [{"start": "08:00", "end": "16:00"}],
        "MaxLoadPerPhase": 1
    }))
}

// =============================================================================
// Fixture loading
// =============================================================================

pub fn fixture_dataset() -> DataSet {
    DataSet {
        clients: parse_fixture(include_str!("../fixtures/clients.json"))
            .iter()
            .map(Client::from_row)
            .collect(),
        workers: parse_fixture(include_str!("../fixtures/workers.json"))
            .iter()
            .map(Worker::from_row)
            .collect(),
        tasks: parse_fixture(include_str!("../fixtures/tasks.json"))
            .iter()
            .map(Task::from_row)
            .collect(),
    }
}

fn parse_fixture(json: &str) -> Vec<RawRow> {
    serde_json::from_str(json).expect("fixture must be a JSON array of objects")
}

// =============================================================================
// Finding inspection
// =============================================================================

pub fn codes(findings: &[Finding]) -> Vec<&'static str> {
    findings.iter().map(|f| f.code).collect()
}

pub fn with_code<'a>(findings: &'a [Finding], code: &str) -> Vec<&'a Finding> {
    findings.iter().filter(|f| f.code == code).collect()
}
