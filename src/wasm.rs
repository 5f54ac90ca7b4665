//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::advisory;
use crate::export;
use crate::export::rules::RulesConfig;
use crate::finding::{EntityKind, Finding};
use crate::parse;
use crate::session::DataSet;

/// Classify a sheet from its column headers.
/// Returns "client", "worker" or "task".
#[wasm_bindgen]
pub fn infer_table_kind(headers_json: &str) -> JsValue {
    let headers: Vec<String> = match serde_json::from_str(headers_json) {
        Ok(h) => h,
        Err(_) => return JsValue::NULL,
    };
    JsValue::from_str(parse::infer_kind(&headers).label())
}

/// Validate the three collections (each a JSON array of row objects).
/// Returns a JSON array of finding objects in pass order.
#[wasm_bindgen]
pub fn validate_data(clients_json: &str, workers_json: &str, tasks_json: &str) -> JsValue {
    let result = validate_data_inner(clients_json, workers_json, tasks_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_data_inner(
    clients_json: &str,
    workers_json: &str,
    tasks_json: &str,
) -> Vec<FindingDto> {
    let data = match build_dataset(clients_json, workers_json, tasks_json) {
        Ok(d) => d,
        Err(finding) => return vec![FindingDto::from(&finding)],
    };
    data.validate().findings.iter().map(FindingDto::from).collect()
}

/// Produce the export bundle (cleaned CSVs + rules.json), or the blocking
/// findings when error-severity problems remain.
#[wasm_bindgen]
pub fn export_data(
    clients_json: &str,
    workers_json: &str,
    tasks_json: &str,
    rules_json: &str,
) -> JsValue {
    let result = export_data_inner(clients_json, workers_json, tasks_json, rules_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn export_data_inner(
    clients_json: &str,
    workers_json: &str,
    tasks_json: &str,
    rules_json: &str,
) -> ExportResult {
    let data = match build_dataset(clients_json, workers_json, tasks_json) {
        Ok(d) => d,
        Err(finding) => {
            return ExportResult::Errors {
                errors: vec![FindingDto::from(&finding)],
            };
        }
    };

    let config: RulesConfig = match serde_json::from_str(rules_json) {
        Ok(c) => c,
        Err(e) => {
            return ExportResult::Errors {
                errors: vec![FindingDto {
                    code: "R002".into(),
                    severity: "error".into(),
                    entity: String::new(),
                    row: String::new(),
                    column: String::new(),
                    message: format!("failed to parse rules configuration JSON: {}", e),
                }],
            };
        }
    };

    match export::export_bundle(&data.clients, &data.workers, &data.tasks, &config) {
        Ok(bundle) => ExportResult::Success {
            files: bundle
                .files
                .into_iter()
                .map(|f| FileDto {
                    path: f.path,
                    content: f.content,
                })
                .collect(),
        },
        Err(findings) => ExportResult::Errors {
            errors: findings.iter().map(FindingDto::from).collect(),
        },
    }
}

/// Assemble the advisory-oracle payload for one finding (JSON object).
#[wasm_bindgen]
pub fn build_suggestion_request(
    finding_json: &str,
    clients_json: &str,
    workers_json: &str,
    tasks_json: &str,
) -> JsValue {
    let Ok(descriptor) = serde_json::from_str::<advisory::FindingDescriptor>(finding_json) else {
        return JsValue::NULL;
    };
    let Ok(data) = build_dataset(clients_json, workers_json, tasks_json) else {
        return JsValue::NULL;
    };

    let request = advisory::build_request(descriptor, &data);
    serde_wasm_bindgen::to_value(&request).unwrap_or(JsValue::NULL)
}

fn build_dataset(
    clients_json: &str,
    workers_json: &str,
    tasks_json: &str,
) -> Result<DataSet, Finding> {
    let mut data = DataSet::default();
    data.replace(
        EntityKind::Client,
        &parse::parse_rows(EntityKind::Client, clients_json)?,
    );
    data.replace(
        EntityKind::Worker,
        &parse::parse_rows(EntityKind::Worker, workers_json)?,
    );
    data.replace(
        EntityKind::Task,
        &parse::parse_rows(EntityKind::Task, tasks_json)?,
    );
    Ok(data)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize, serde::Deserialize)]
struct FindingDto {
    code: String,
    severity: String,
    entity: String,
    row: String,
    column: String,
    message: String,
}

impl From<&Finding> for FindingDto {
    fn from(f: &Finding) -> Self {
        FindingDto {
            code: f.code.to_string(),
            severity: f.severity.to_string(),
            entity: f.entity.to_string(),
            row: f.row.clone(),
            column: f.column.clone(),
            message: f.message.clone(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct FileDto {
    path: String,
    content: String,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum ExportResult {
    #[serde(rename = "success")]
    Success { files: Vec<FileDto> },
    #[serde(rename = "errors")]
    Errors { errors: Vec<FindingDto> },
}
