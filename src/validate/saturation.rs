//! Phase demand vs. roster capacity (P001).
//!
//! Demand per phase is the summed Duration of every task preferring that
//! phase. Capacity is the summed MaxLoadPerPhase of workers with at least
//! one well-formed availability slot. AvailableSlots carries no phase
//! mapping, so the same roster-wide capacity is applied to every phase;
//! this is a known simplification of the data model, pinned by tests.

use std::collections::BTreeMap;

use crate::finding::{EntityKind, Finding};
use crate::parse::fields::{parse_integer, parse_phase_list, parse_slot_list};
use crate::parse::types::{Task, Worker};

pub fn phase_saturation(workers: &[Worker], tasks: &[Task]) -> Vec<Finding> {
    // BTreeMap keeps phases in ascending order for stable output.
    let mut demand: BTreeMap<i64, i64> = BTreeMap::new();
    for task in tasks {
        let Some(raw_phases) = &task.preferred_phases else {
            continue;
        };
        let Ok(mut phases) = parse_phase_list(raw_phases) else {
            continue; // already reported by the row rules
        };
        phases.sort_unstable();
        phases.dedup();

        let duration = task
            .duration
            .as_ref()
            .and_then(parse_integer)
            .filter(|d| *d >= 1)
            .unwrap_or(0);
        for phase in phases {
            *demand.entry(phase).or_default() += duration;
        }
    }

    let capacity: i64 = workers
        .iter()
        .filter(|w| {
            w.available_slots
                .as_ref()
                .and_then(|raw| parse_slot_list(raw).ok())
                .is_some_and(|slots| !slots.is_empty())
        })
        .filter_map(|w| w.max_load_per_phase.as_ref().and_then(parse_integer))
        .filter(|load| *load > 0)
        .sum();

    let mut findings = Vec::new();
    for (phase, needed) in demand {
        if needed > capacity {
            findings.push(Finding::warning(
                "P001",
                EntityKind::Task,
                format!("phase-{}", phase),
                "PreferredPhases",
                format!(
                    "phase {} is oversubscribed: demand {} exceeds worker capacity {} (short {})",
                    phase,
                    needed,
                    capacity,
                    needed - capacity
                ),
            ));
        }
    }
    findings
}
