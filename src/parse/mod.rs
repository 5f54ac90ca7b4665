//! Parse phase: sheet rows (JSON) → typed collections + graph construction.

pub mod fields;
pub mod graph;
pub mod types;

pub use graph::TaskGraph;
pub use types::*;

use crate::finding::{EntityKind, Finding};

/// Deserialize one uploaded sheet into raw rows.
pub fn parse_rows(kind: EntityKind, json: &str) -> Result<Vec<RawRow>, Finding> {
    serde_json::from_str::<Vec<RawRow>>(json).map_err(|e| {
        Finding::error(
            "R001",
            kind,
            "",
            "",
            format!("failed to parse sheet rows as a JSON array of objects: {}", e),
        )
    })
}

/// Classify an uploaded sheet from its column headers.
///
/// An identifying column wins outright; `TaskID` is checked first because
/// task sheets may also carry `ClientID`/`WorkerID` reference columns.
/// Without one, `Name` plus a contact column suggests Client unless an
/// org column (`Position`/`Department`) suggests Worker; Task is the
/// fallback.
pub fn infer_kind(headers: &[String]) -> EntityKind {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let has = |name: &str| normalized.iter().any(|h| h == name);

    if has("taskid") {
        return EntityKind::Task;
    }
    if has("workerid") {
        return EntityKind::Worker;
    }
    if has("clientid") {
        return EntityKind::Client;
    }

    if has("name") && (has("email") || has("phone")) {
        if has("position") || has("department") {
            return EntityKind::Worker;
        }
        return EntityKind::Client;
    }
    EntityKind::Task
}

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}
