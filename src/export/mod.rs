//! Export surface: cleaned CSV per collection plus the rules document.
//!
//! Export runs a fresh validation first and refuses while any
//! error-severity finding exists; warnings pass through.

pub mod rules;

use serde_json::Value;

use crate::finding::Finding;
use crate::parse::types::{
    CLIENT_COLUMNS, Client, RawRow, TASK_COLUMNS, Task, WORKER_COLUMNS, Worker,
};
use crate::validate;
use rules::RulesConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExportBundle {
    pub files: Vec<ExportFile>,
}

/// Produce the full export bundle, or the findings that block it.
pub fn export_bundle(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
    config: &RulesConfig,
) -> Result<ExportBundle, Vec<Finding>> {
    let findings = validate::validate_all(clients, workers, tasks);
    if findings.iter().any(Finding::is_error) {
        return Err(findings);
    }

    let files = vec![
        ExportFile {
            path: "clients.csv".into(),
            content: gen_csv(
                &clients.iter().map(Client::to_row).collect::<Vec<_>>(),
                CLIENT_COLUMNS,
            ),
        },
        ExportFile {
            path: "workers.csv".into(),
            content: gen_csv(
                &workers.iter().map(Worker::to_row).collect::<Vec<_>>(),
                WORKER_COLUMNS,
            ),
        },
        ExportFile {
            path: "tasks.csv".into(),
            content: gen_csv(
                &tasks.iter().map(Task::to_row).collect::<Vec<_>>(),
                TASK_COLUMNS,
            ),
        },
        ExportFile {
            path: "rules.json".into(),
            content: gen_rules_json(config),
        },
    ];
    Ok(ExportBundle { files })
}

/// Generate `rules.json` content.
pub fn gen_rules_json(config: &RulesConfig) -> String {
    let mut json =
        serde_json::to_string_pretty(config).expect("rules config serialization is infallible");
    json.push('\n');
    json
}

/// Generate one collection's CSV: canonical columns that appear in the data
/// first (identifying and name columns always), then extra columns in
/// first-seen order.
pub fn gen_csv(rows: &[RawRow], canonical: &[&str]) -> String {
    let mut headers: Vec<String> = Vec::new();
    for (i, column) in canonical.iter().enumerate() {
        // The first two canonical columns are the required id/name pair.
        if i < 2 || rows.iter().any(|r| r.contains_key(*column)) {
            headers.push((*column).to_string());
        }
    }
    for row in rows {
        for key in row.keys() {
            if !canonical.contains(&key.as_str()) && !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| csv_escape(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| csv_escape(&cell_text(row.get(h))))
            .collect();
        lines.push(cells.join(","));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // Lists and objects re-serialize as compact JSON text.
        Some(other) => other.to_string(),
    }
}

fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
