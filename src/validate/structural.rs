//! Cross-collection structural checks: duplicate identifiers (D001).

use std::collections::HashMap;

use crate::finding::{EntityKind, Finding};
use crate::parse::types::{Client, Task, Worker};

/// Detect duplicated identifying values in each collection independently.
/// One error per offending value, naming every 1-based row position that
/// shares it. Empty values are skipped; the emptiness rules cover those.
pub fn duplicate_ids(clients: &[Client], workers: &[Worker], tasks: &[Task]) -> Vec<Finding> {
    let mut findings = Vec::new();
    collect_duplicates(
        EntityKind::Client,
        clients.iter().map(|c| c.id.as_str()),
        &mut findings,
    );
    collect_duplicates(
        EntityKind::Worker,
        workers.iter().map(|w| w.id.as_str()),
        &mut findings,
    );
    collect_duplicates(
        EntityKind::Task,
        tasks.iter().map(|t| t.id.as_str()),
        &mut findings,
    );
    findings
}

fn collect_duplicates<'a>(
    kind: EntityKind,
    ids: impl Iterator<Item = &'a str>,
    findings: &mut Vec<Finding>,
) {
    // First-seen order so repeated runs report identically.
    let mut order: Vec<&str> = Vec::new();
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();

    for (index, id) in ids.enumerate() {
        if id.is_empty() {
            continue;
        }
        let entry = positions.entry(id).or_default();
        if entry.is_empty() {
            order.push(id);
        }
        entry.push(index + 1);
    }

    for id in order {
        let rows = &positions[id];
        if rows.len() < 2 {
            continue;
        }
        let row_list = rows
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        findings.push(Finding::error(
            "D001",
            kind,
            id,
            kind.id_column(),
            format!(
                "duplicate {} '{}' appears in rows {}",
                kind.id_column(),
                id,
                row_list
            ),
        ));
    }
}
