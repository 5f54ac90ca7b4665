//! In-memory session state: the three collections between upload and export.
//!
//! A collection is replaced wholesale when its sheet is re-uploaded and
//! patched one field at a time by inline edits. Nothing is persisted;
//! validation re-runs from scratch after every change.

use serde_json::Value;

use crate::finding::EntityKind;
use crate::parse::types::{Client, RawRow, Task, Worker};
use crate::validate::{self, ValidationReport};

#[derive(Debug, Clone, Default)]
pub struct DataSet {
    pub clients: Vec<Client>,
    pub workers: Vec<Worker>,
    pub tasks: Vec<Task>,
}

impl DataSet {
    /// Replace one collection with freshly normalized rows.
    pub fn replace(&mut self, kind: EntityKind, rows: &[RawRow]) {
        match kind {
            EntityKind::Client => self.clients = rows.iter().map(Client::from_row).collect(),
            EntityKind::Worker => self.workers = rows.iter().map(Worker::from_row).collect(),
            EntityKind::Task => self.tasks = rows.iter().map(Task::from_row).collect(),
        }
    }

    /// Patch one field on the first row whose identifying value matches.
    /// Returns false when no such row exists.
    pub fn apply_edit(&mut self, kind: EntityKind, row_id: &str, column: &str, value: Value) -> bool {
        match kind {
            EntityKind::Client => {
                let Some(row) = self.clients.iter_mut().find(|c| c.id == row_id) else {
                    return false;
                };
                row.set_column(column, value);
            }
            EntityKind::Worker => {
                let Some(row) = self.workers.iter_mut().find(|w| w.id == row_id) else {
                    return false;
                };
                row.set_column(column, value);
            }
            EntityKind::Task => {
                let Some(row) = self.tasks.iter_mut().find(|t| t.id == row_id) else {
                    return false;
                };
                row.set_column(column, value);
            }
        }
        true
    }

    pub fn validate(&self) -> ValidationReport {
        validate::validate_report(&self.clients, &self.workers, &self.tasks)
    }
}
