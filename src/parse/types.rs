//! Typed entities for the three uploaded collections.
//!
//! Sheets have an open schema: recognized columns are lifted into struct
//! fields, every other column rides along in `extra` keyed by its original
//! header (insertion order preserved). Normalization never fails and never
//! validates: a missing identifying value becomes an empty string, and
//! checked fields keep whatever raw value the sheet parser produced. The
//! validators interpret them.

use serde_json::{Map, Value};

/// One parsed sheet row: column header → raw cell value.
pub type RawRow = Map<String, Value>;

/// Canonical column order used when re-serializing each collection.
pub const CLIENT_COLUMNS: &[&str] = &[
    "ClientID",
    "Name",
    "Email",
    "Phone",
    "Department",
    "AttributesJSON",
    "RequestedTaskIDs",
];

pub const WORKER_COLUMNS: &[&str] = &[
    "WorkerID",
    "Name",
    "Skills",
    "AvailableSlots",
    "MaxLoadPerPhase",
    "Department",
    "Position",
    "Email",
];

pub const TASK_COLUMNS: &[&str] = &[
    "TaskID",
    "Title",
    "Duration",
    "PriorityLevel",
    "PreferredPhases",
    "RequiredSkills",
    "MaxConcurrent",
    "Dependencies",
    "ClientID",
    "WorkerID",
    "Status",
    "DueDate",
];

/// Lossy cell-to-string coercion used for identifying and plain text columns.
fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn get_string(row: &RawRow, column: &str) -> String {
    row.get(column).map(coerce_string).unwrap_or_default()
}

fn get_opt_string(row: &RawRow, column: &str) -> Option<String> {
    row.get(column).map(coerce_string)
}

fn collect_extra(row: &RawRow, known: &[&str]) -> RawRow {
    let mut extra = RawRow::new();
    for (key, value) in row {
        if !known.contains(&key.as_str()) {
            extra.insert(key.clone(), value.clone());
        }
    }
    extra
}

fn insert_opt_string(row: &mut RawRow, column: &str, value: &Option<String>) {
    if let Some(v) = value {
        row.insert(column.to_string(), Value::String(v.clone()));
    }
}

fn insert_opt_value(row: &mut RawRow, column: &str, value: &Option<Value>) {
    if let Some(v) = value {
        row.insert(column.to_string(), v.clone());
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    /// Raw cell; must parse to a JSON object to be valid.
    pub attributes_json: Option<Value>,
    /// Raw cell; comma-separated string or list of Task ids.
    pub requested_task_ids: Option<Value>,
    /// Unrecognized columns, original header → raw value, upload order.
    pub extra: RawRow,
}

impl Client {
    pub fn from_row(row: &RawRow) -> Self {
        Client {
            id: get_string(row, "ClientID"),
            name: get_string(row, "Name"),
            email: get_opt_string(row, "Email"),
            phone: get_opt_string(row, "Phone"),
            department: get_opt_string(row, "Department"),
            attributes_json: row.get("AttributesJSON").cloned(),
            requested_task_ids: row.get("RequestedTaskIDs").cloned(),
            extra: collect_extra(row, CLIENT_COLUMNS),
        }
    }

    /// Reassemble the full row: canonical columns first, extras after.
    pub fn to_row(&self) -> RawRow {
        let mut row = RawRow::new();
        row.insert("ClientID".into(), Value::String(self.id.clone()));
        row.insert("Name".into(), Value::String(self.name.clone()));
        insert_opt_string(&mut row, "Email", &self.email);
        insert_opt_string(&mut row, "Phone", &self.phone);
        insert_opt_string(&mut row, "Department", &self.department);
        insert_opt_value(&mut row, "AttributesJSON", &self.attributes_json);
        insert_opt_value(&mut row, "RequestedTaskIDs", &self.requested_task_ids);
        for (key, value) in &self.extra {
            row.insert(key.clone(), value.clone());
        }
        row
    }

    /// Replace one column's value. Unknown columns land in `extra`.
    pub fn set_column(&mut self, column: &str, value: Value) {
        match column {
            "ClientID" => self.id = coerce_string(&value),
            "Name" => self.name = coerce_string(&value),
            "Email" => self.email = Some(coerce_string(&value)),
            "Phone" => self.phone = Some(coerce_string(&value)),
            "Department" => self.department = Some(coerce_string(&value)),
            "AttributesJSON" => self.attributes_json = Some(value),
            "RequestedTaskIDs" => self.requested_task_ids = Some(value),
            _ => {
                self.extra.insert(column.to_string(), value);
            }
        }
    }
}

// =============================================================================
// WORKER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Worker {
    pub id: String,
    pub name: String,
    /// Raw cell; comma-separated tags or list, required non-empty.
    pub skills: Option<Value>,
    /// Raw cell; must be an array of `{start, end}` objects to be valid.
    pub available_slots: Option<Value>,
    /// Raw cell; must be an integer > 0 to be valid.
    pub max_load_per_phase: Option<Value>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub extra: RawRow,
}

impl Worker {
    pub fn from_row(row: &RawRow) -> Self {
        Worker {
            id: get_string(row, "WorkerID"),
            name: get_string(row, "Name"),
            skills: row.get("Skills").cloned(),
            available_slots: row.get("AvailableSlots").cloned(),
            max_load_per_phase: row.get("MaxLoadPerPhase").cloned(),
            department: get_opt_string(row, "Department"),
            position: get_opt_string(row, "Position"),
            email: get_opt_string(row, "Email"),
            extra: collect_extra(row, WORKER_COLUMNS),
        }
    }

    pub fn to_row(&self) -> RawRow {
        let mut row = RawRow::new();
        row.insert("WorkerID".into(), Value::String(self.id.clone()));
        row.insert("Name".into(), Value::String(self.name.clone()));
        insert_opt_value(&mut row, "Skills", &self.skills);
        insert_opt_value(&mut row, "AvailableSlots", &self.available_slots);
        insert_opt_value(&mut row, "MaxLoadPerPhase", &self.max_load_per_phase);
        insert_opt_string(&mut row, "Department", &self.department);
        insert_opt_string(&mut row, "Position", &self.position);
        insert_opt_string(&mut row, "Email", &self.email);
        for (key, value) in &self.extra {
            row.insert(key.clone(), value.clone());
        }
        row
    }

    pub fn set_column(&mut self, column: &str, value: Value) {
        match column {
            "WorkerID" => self.id = coerce_string(&value),
            "Name" => self.name = coerce_string(&value),
            "Skills" => self.skills = Some(value),
            "AvailableSlots" => self.available_slots = Some(value),
            "MaxLoadPerPhase" => self.max_load_per_phase = Some(value),
            "Department" => self.department = Some(coerce_string(&value)),
            "Position" => self.position = Some(coerce_string(&value)),
            "Email" => self.email = Some(coerce_string(&value)),
            _ => {
                self.extra.insert(column.to_string(), value);
            }
        }
    }
}

// =============================================================================
// TASK
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Raw cell; must be an integer >= 1 to be valid.
    pub duration: Option<Value>,
    /// Raw cell; must be an integer in [1, 5] to be valid.
    pub priority_level: Option<Value>,
    /// Raw cell; must be a list of phase numbers to be valid.
    pub preferred_phases: Option<Value>,
    /// Raw cell; comma-separated tags or list.
    pub required_skills: Option<Value>,
    /// Raw cell; must be an integer > 0 to be valid.
    pub max_concurrent: Option<Value>,
    /// Raw cell; comma-separated string or list of Task ids.
    pub dependencies: Option<Value>,
    pub client_id: Option<String>,
    pub worker_id: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
    pub extra: RawRow,
}

impl Task {
    pub fn from_row(row: &RawRow) -> Self {
        Task {
            id: get_string(row, "TaskID"),
            title: get_string(row, "Title"),
            duration: row.get("Duration").cloned(),
            priority_level: row.get("PriorityLevel").cloned(),
            preferred_phases: row.get("PreferredPhases").cloned(),
            required_skills: row.get("RequiredSkills").cloned(),
            max_concurrent: row.get("MaxConcurrent").cloned(),
            dependencies: row.get("Dependencies").cloned(),
            client_id: get_opt_string(row, "ClientID"),
            worker_id: get_opt_string(row, "WorkerID"),
            status: get_opt_string(row, "Status"),
            due_date: get_opt_string(row, "DueDate"),
            extra: collect_extra(row, TASK_COLUMNS),
        }
    }

    pub fn to_row(&self) -> RawRow {
        let mut row = RawRow::new();
        row.insert("TaskID".into(), Value::String(self.id.clone()));
        row.insert("Title".into(), Value::String(self.title.clone()));
        insert_opt_value(&mut row, "Duration", &self.duration);
        insert_opt_value(&mut row, "PriorityLevel", &self.priority_level);
        insert_opt_value(&mut row, "PreferredPhases", &self.preferred_phases);
        insert_opt_value(&mut row, "RequiredSkills", &self.required_skills);
        insert_opt_value(&mut row, "MaxConcurrent", &self.max_concurrent);
        insert_opt_value(&mut row, "Dependencies", &self.dependencies);
        insert_opt_string(&mut row, "ClientID", &self.client_id);
        insert_opt_string(&mut row, "WorkerID", &self.worker_id);
        insert_opt_string(&mut row, "Status", &self.status);
        insert_opt_string(&mut row, "DueDate", &self.due_date);
        for (key, value) in &self.extra {
            row.insert(key.clone(), value.clone());
        }
        row
    }

    pub fn set_column(&mut self, column: &str, value: Value) {
        match column {
            "TaskID" => self.id = coerce_string(&value),
            "Title" => self.title = coerce_string(&value),
            "Duration" => self.duration = Some(value),
            "PriorityLevel" => self.priority_level = Some(value),
            "PreferredPhases" => self.preferred_phases = Some(value),
            "RequiredSkills" => self.required_skills = Some(value),
            "MaxConcurrent" => self.max_concurrent = Some(value),
            "Dependencies" => self.dependencies = Some(value),
            "ClientID" => self.client_id = Some(coerce_string(&value)),
            "WorkerID" => self.worker_id = Some(coerce_string(&value)),
            "Status" => self.status = Some(coerce_string(&value)),
            "DueDate" => self.due_date = Some(coerce_string(&value)),
            _ => {
                self.extra.insert(column.to_string(), value);
            }
        }
    }
}
