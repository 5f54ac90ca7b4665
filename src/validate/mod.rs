//! Validation phase: every rule pass over the three collections.
//!
//! Pass order is fixed and the whole run is pure: row checks in collection
//! order (clients, workers, tasks), then duplicate detection, then phase
//! saturation, then dependency cycles. Re-running on identical collections
//! yields an identical finding list.

pub mod cycles;
pub mod row_rules;
pub mod saturation;
pub mod structural;

use crate::finding::Finding;
use crate::parse::types::{Client, Task, Worker};
use row_rules::RuleContext;

/// Run every validator and merge the findings in pass order.
pub fn validate_all(clients: &[Client], workers: &[Worker], tasks: &[Task]) -> Vec<Finding> {
    let cx = RuleContext::new(clients, workers, tasks);

    let mut findings = Vec::new();
    for client in clients {
        findings.extend(row_rules::validate_client(client, &cx));
    }
    for worker in workers {
        findings.extend(row_rules::validate_worker(worker, &cx));
    }
    for task in tasks {
        findings.extend(row_rules::validate_task(task, &cx));
    }
    findings.extend(structural::duplicate_ids(clients, workers, tasks));
    findings.extend(saturation::phase_saturation(workers, tasks));
    findings.extend(cycles::detect_cycles(tasks));
    findings
}

/// The merged outcome of one validation run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new(findings: Vec<Finding>) -> Self {
        ValidationReport { findings }
    }

    /// Warnings do not fail validation; errors do.
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(Finding::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings.len() - self.error_count()
    }
}

pub fn validate_report(clients: &[Client], workers: &[Worker], tasks: &[Task]) -> ValidationReport {
    ValidationReport::new(validate_all(clients, workers, tasks))
}
