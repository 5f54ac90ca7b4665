//! Serde model of the exported rules configuration document.
//!
//! These types mirror the JSON the frontend rule builder edits; the engine
//! only validates shape (via serde) and re-serializes them into the export
//! bundle.

use serde::{Deserialize, Serialize};

/// A user-declared business rule, consumed by the downstream allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BusinessRule {
    /// These tasks must be scheduled together.
    #[serde(rename = "coRun")]
    CoRun { tasks: Vec<String> },

    /// A worker or client group must share at least this many common slots.
    #[serde(rename = "slotRestriction")]
    SlotRestriction {
        group: String,
        #[serde(rename = "minCommonSlots")]
        min_common_slots: u32,
    },

    /// Cap the per-phase load of a worker group.
    #[serde(rename = "loadLimit")]
    LoadLimit {
        #[serde(rename = "workerGroup")]
        worker_group: String,
        #[serde(rename = "maxSlotsPerPhase")]
        max_slots_per_phase: u32,
    },

    /// Restrict a task to an explicit set of phases.
    #[serde(rename = "phaseWindow")]
    PhaseWindow {
        task: String,
        #[serde(rename = "allowedPhases")]
        allowed_phases: Vec<i64>,
    },
}

/// The seven prioritization sliders, each 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityWeights {
    pub priority_level: u8,
    pub requested_task_fulfillment: u8,
    pub fairness: u8,
    pub workload_balance: u8,
    pub skill_match: u8,
    pub phase_preference: u8,
    pub cost_efficiency: u8,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        PriorityWeights {
            priority_level: 50,
            requested_task_fulfillment: 50,
            fairness: 50,
            workload_balance: 50,
            skill_match: 50,
            phase_preference: 50,
            cost_efficiency: 50,
        }
    }
}

/// Enabled/disabled state of each validation family, carried through the
/// export so the downstream consumer knows which checks produced the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationToggles {
    pub missing_required: bool,
    pub broken_json: bool,
    pub malformed_lists: bool,
    pub out_of_range: bool,
    pub unknown_references: bool,
    pub duplicate_ids: bool,
    pub skill_coverage: bool,
    pub concurrency_feasibility: bool,
    pub phase_saturation: bool,
    pub dependency_cycles: bool,
}

impl Default for ValidationToggles {
    fn default() -> Self {
        ValidationToggles {
            missing_required: true,
            broken_json: true,
            malformed_lists: true,
            out_of_range: true,
            unknown_references: true,
            duplicate_ids: true,
            skill_coverage: true,
            concurrency_feasibility: true,
            phase_saturation: true,
            dependency_cycles: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    pub rules: Vec<BusinessRule>,
    pub prioritization: PriorityWeights,
    pub validations: ValidationToggles,
}
