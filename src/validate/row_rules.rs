//! Per-row rule checks for the three collections.
//!
//! Each check reads one row plus the shared read-only `RuleContext`; no
//! check mutates any collection. Malformed values become findings, never
//! panics, and one bad field does not stop the remaining checks on the row.

use std::collections::HashSet;

use crate::finding::{EntityKind, Finding};
use crate::parse::fields::{
    parse_integer, parse_json_object, parse_phase_list, parse_slot_list, parse_tag_list,
};
use crate::parse::types::{Client, Task, Worker};

/// Read-only cross-collection context shared by every row check.
pub struct RuleContext {
    /// All non-empty declared TaskIDs.
    pub task_ids: HashSet<String>,
    /// Union of every skill tag any worker lists.
    pub skill_pool: HashSet<String>,
    /// One skill set per worker, in upload order.
    worker_skills: Vec<HashSet<String>>,
}

impl RuleContext {
    pub fn new(_clients: &[Client], workers: &[Worker], tasks: &[Task]) -> Self {
        let task_ids = tasks
            .iter()
            .filter(|t| !t.id.is_empty())
            .map(|t| t.id.clone())
            .collect();

        let worker_skills: Vec<HashSet<String>> = workers
            .iter()
            .map(|w| {
                w.skills
                    .as_ref()
                    .map(|raw| parse_tag_list(raw).into_iter().collect())
                    .unwrap_or_default()
            })
            .collect();

        let mut skill_pool = HashSet::new();
        for skills in &worker_skills {
            skill_pool.extend(skills.iter().cloned());
        }

        RuleContext {
            task_ids,
            skill_pool,
            worker_skills,
        }
    }

    /// Number of workers whose skill set covers every required skill.
    pub fn qualified_worker_count(&self, required: &[String]) -> usize {
        self.worker_skills
            .iter()
            .filter(|skills| required.iter().all(|s| skills.contains(s)))
            .count()
    }
}

// =============================================================================
// CLIENT RULES (C001–C004)
// =============================================================================

pub fn validate_client(client: &Client, cx: &RuleContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    let kind = EntityKind::Client;

    if client.name.trim().is_empty() {
        findings.push(Finding::error(
            "C001",
            kind,
            &client.id,
            "Name",
            "Name must not be empty",
        ));
    }

    if client.id.trim().is_empty() {
        findings.push(Finding::error(
            "C002",
            kind,
            &client.id,
            "ClientID",
            "ClientID must not be empty",
        ));
    }

    if let Some(raw) = &client.attributes_json {
        if let Err(e) = parse_json_object(raw) {
            findings.push(Finding::error(
                "C003",
                kind,
                &client.id,
                "AttributesJSON",
                format!("AttributesJSON is invalid: {}", e),
            ));
        }
    }

    if let Some(raw) = &client.requested_task_ids {
        let missing: Vec<String> = parse_tag_list(raw)
            .into_iter()
            .filter(|id| !cx.task_ids.contains(id))
            .collect();
        if !missing.is_empty() {
            findings.push(Finding::warning(
                "C004",
                kind,
                &client.id,
                "RequestedTaskIDs",
                format!("requests unknown task(s): {}", missing.join(", ")),
            ));
        }
    }

    findings
}

// =============================================================================
// WORKER RULES (W001–W005)
// =============================================================================

pub fn validate_worker(worker: &Worker, _cx: &RuleContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    let kind = EntityKind::Worker;

    if worker.id.trim().is_empty() {
        findings.push(Finding::error(
            "W001",
            kind,
            &worker.id,
            "WorkerID",
            "WorkerID must not be empty",
        ));
    }

    // Malformed slots disqualify the over-commitment check below.
    let mut slots = None;
    if let Some(raw) = &worker.available_slots {
        match parse_slot_list(raw) {
            Ok(list) => slots = Some(list),
            Err(e) => findings.push(Finding::error(
                "W002",
                kind,
                &worker.id,
                "AvailableSlots",
                format!("AvailableSlots is invalid: {}", e),
            )),
        }
    }

    if let (Some(slots), Some(raw_load)) = (&slots, &worker.max_load_per_phase) {
        if let Some(max_load) = parse_integer(raw_load) {
            if max_load > 0 && (slots.len() as i64) < max_load {
                findings.push(Finding::warning(
                    "W003",
                    kind,
                    &worker.id,
                    "AvailableSlots",
                    format!(
                        "declares MaxLoadPerPhase {} but only {} available slot(s)",
                        max_load,
                        slots.len()
                    ),
                ));
            }
        }
    }

    if let Some(raw_load) = &worker.max_load_per_phase {
        match parse_integer(raw_load) {
            Some(n) if n > 0 => {}
            _ => findings.push(Finding::error(
                "W004",
                kind,
                &worker.id,
                "MaxLoadPerPhase",
                "MaxLoadPerPhase must be an integer greater than 0",
            )),
        }
    }

    let no_skills = match &worker.skills {
        None => true,
        Some(raw) => parse_tag_list(raw).is_empty(),
    };
    if no_skills {
        findings.push(Finding::error(
            "W005",
            kind,
            &worker.id,
            "Skills",
            "Skills must list at least one skill",
        ));
    }

    findings
}

// =============================================================================
// TASK RULES (T001–T007)
// =============================================================================

pub fn validate_task(task: &Task, cx: &RuleContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    let kind = EntityKind::Task;

    if let Some(raw) = &task.duration {
        match parse_integer(raw) {
            Some(n) if n >= 1 => {}
            _ => findings.push(Finding::error(
                "T001",
                kind,
                &task.id,
                "Duration",
                "Duration must be an integer of at least 1",
            )),
        }
    }

    if let Some(raw) = &task.priority_level {
        match parse_integer(raw) {
            Some(n) if (1..=5).contains(&n) => {}
            _ => findings.push(Finding::error(
                "T002",
                kind,
                &task.id,
                "PriorityLevel",
                "PriorityLevel must be an integer between 1 and 5",
            )),
        }
    }

    if let Some(raw) = &task.preferred_phases {
        if let Err(e) = parse_phase_list(raw) {
            findings.push(Finding::error(
                "T003",
                kind,
                &task.id,
                "PreferredPhases",
                format!("PreferredPhases is invalid: {}", e),
            ));
        }
    }

    if let Some(raw) = &task.required_skills {
        let required = parse_tag_list(raw);
        if !required.is_empty() {
            let unknown: Vec<&String> = required
                .iter()
                .filter(|s| !cx.skill_pool.contains(*s))
                .collect();
            if !unknown.is_empty() {
                findings.push(Finding::warning(
                    "T004",
                    kind,
                    &task.id,
                    "RequiredSkills",
                    format!(
                        "no worker on the roster lists skill(s): {}",
                        unknown
                            .iter()
                            .map(|s| s.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                ));
            }

            let qualified = cx.qualified_worker_count(&required);
            if qualified == 0 {
                findings.push(Finding::error(
                    "T005",
                    kind,
                    &task.id,
                    "RequiredSkills",
                    format!(
                        "no worker matches all required skills ({})",
                        required.join(", ")
                    ),
                ));
            } else if let Some(raw_mc) = &task.max_concurrent {
                if let Some(max_concurrent) = parse_integer(raw_mc) {
                    if max_concurrent > qualified as i64 {
                        findings.push(Finding::warning(
                            "T006",
                            kind,
                            &task.id,
                            "MaxConcurrent",
                            format!(
                                "MaxConcurrent {} exceeds the {} qualified worker(s)",
                                max_concurrent, qualified
                            ),
                        ));
                    }
                }
            }
        }
    }

    if let Some(raw) = &task.max_concurrent {
        match parse_integer(raw) {
            Some(n) if n > 0 => {}
            _ => findings.push(Finding::error(
                "T007",
                kind,
                &task.id,
                "MaxConcurrent",
                "MaxConcurrent must be an integer greater than 0",
            )),
        }
    }

    findings
}
