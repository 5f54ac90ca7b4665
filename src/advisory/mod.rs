//! Interface to the optional AI suggestion oracle.
//!
//! The engine never performs network I/O. The host (browser side) owns the
//! transport; this module defines the configuration injected at
//! construction, the request/response DTOs, and the failure taxonomy the
//! host must surface as a non-fatal notice. Validation results never depend
//! on anything here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::finding::Finding;
use crate::parse::types::RawRow;
use crate::session::DataSet;

/// Suggestions below this confidence are visually deprioritized by default.
pub const DEFAULT_CONFIDENCE_FLOOR: u8 = 60;

/// Explicit oracle configuration. Constructed once by the host and handed
/// to whatever performs the call; never read from the environment at call
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub confidence_floor: u8,
}

impl AdvisoryConfig {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        AdvisoryConfig {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
        }
    }
}

/// A finding rendered for the oracle payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingDescriptor {
    pub code: String,
    pub severity: String,
    pub entity: String,
    pub row: String,
    pub column: String,
    pub message: String,
}

impl From<&Finding> for FindingDescriptor {
    fn from(finding: &Finding) -> Self {
        FindingDescriptor {
            code: finding.code.to_string(),
            severity: finding.severity.to_string(),
            entity: finding.entity.to_string(),
            row: finding.row.clone(),
            column: finding.column.clone(),
            message: finding.message.clone(),
        }
    }
}

/// What the oracle sees: the finding, the offending row as uploaded, and
/// all three collections for context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub finding: FindingDescriptor,
    pub row: RawRow,
    pub clients: Vec<RawRow>,
    pub workers: Vec<RawRow>,
    pub tasks: Vec<RawRow>,
}

/// Assemble the oracle payload for one finding. The offending row is looked
/// up by the finding's identifying value; findings not tied to a row (e.g.
/// phase saturation) get an empty row object.
pub fn build_request(finding: FindingDescriptor, data: &DataSet) -> SuggestionRequest {
    let row = match finding.entity.as_str() {
        "client" => data
            .clients
            .iter()
            .find(|c| c.id == finding.row)
            .map(|c| c.to_row()),
        "worker" => data
            .workers
            .iter()
            .find(|w| w.id == finding.row)
            .map(|w| w.to_row()),
        "task" => data
            .tasks
            .iter()
            .find(|t| t.id == finding.row)
            .map(|t| t.to_row()),
        _ => None,
    };

    SuggestionRequest {
        finding,
        row: row.unwrap_or_default(),
        clients: data.clients.iter().map(|c| c.to_row()).collect(),
        workers: data.workers.iter().map(|w| w.to_row()).collect(),
        tasks: data.tasks.iter().map(|t| t.to_row()).collect(),
    }
}

/// What the oracle returns. Applied only on explicit user confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub replacement: Value,
    pub explanation: String,
    pub confidence: u8,
}

impl Suggestion {
    /// Low-confidence suggestions are deprioritized in the UI but never
    /// mechanically blocked.
    pub fn is_confident(&self, floor: u8) -> bool {
        self.confidence >= floor
    }
}

/// Failures the host must present as a notice while keeping the local
/// validation results intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisoryError {
    #[error("advisory oracle is not configured")]
    Unconfigured,
    #[error("advisory request failed with status {status}")]
    Http { status: u16 },
    #[error("advisory quota exhausted")]
    Quota,
    #[error("advisory request timed out after {0} ms")]
    Timeout(u32),
    #[error("advisory response was malformed: {0}")]
    BadResponse(String),
}

/// Anything that can answer a suggestion request.
pub trait SuggestionOracle {
    fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestion, AdvisoryError>;
}

/// Stand-in oracle used while no configuration exists; every call fails
/// with `Unconfigured` and the caller falls back to local findings only.
pub struct Unconfigured;

impl SuggestionOracle for Unconfigured {
    fn suggest(&self, _request: &SuggestionRequest) -> Result<Suggestion, AdvisoryError> {
        Err(AdvisoryError::Unconfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::EntityKind;
    use crate::parse::types::Client;
    use serde_json::json;

    fn dataset_with_client() -> DataSet {
        let row = match json!({"ClientID": "C1", "Name": "Acme", "Tier": "gold"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        DataSet {
            clients: vec![Client::from_row(&row)],
            ..DataSet::default()
        }
    }

    fn descriptor(entity: &str, row: &str) -> FindingDescriptor {
        FindingDescriptor {
            code: "C001".into(),
            severity: "error".into(),
            entity: entity.into(),
            row: row.into(),
            column: "Name".into(),
            message: "Name must not be empty".into(),
        }
    }

    #[test]
    fn request_carries_the_offending_row_and_context() {
        let data = dataset_with_client();
        let request = build_request(descriptor("client", "C1"), &data);
        assert_eq!(request.row["ClientID"], json!("C1"));
        assert_eq!(request.row["Tier"], json!("gold"));
        assert_eq!(request.clients.len(), 1);
        assert!(request.workers.is_empty());
    }

    #[test]
    fn rowless_findings_get_an_empty_row() {
        let data = dataset_with_client();
        let request = build_request(descriptor("task", "phase-3"), &data);
        assert!(request.row.is_empty());
    }

    #[test]
    fn unconfigured_oracle_always_fails_softly() {
        let data = dataset_with_client();
        let request = build_request(descriptor("client", "C1"), &data);
        let err = Unconfigured.suggest(&request).unwrap_err();
        assert_eq!(err, AdvisoryError::Unconfigured);
    }

    #[test]
    fn config_defaults_the_confidence_floor() {
        let config = AdvisoryConfig::new("https://oracle.example/v1", "suggest-1", "key");
        assert_eq!(config.confidence_floor, DEFAULT_CONFIDENCE_FLOOR);
        assert_eq!(config.model, "suggest-1");
    }

    #[test]
    fn confidence_floor_is_inclusive() {
        let suggestion = Suggestion {
            replacement: json!("Acme"),
            explanation: "copied from duplicate row".into(),
            confidence: 60,
        };
        assert!(suggestion.is_confident(DEFAULT_CONFIDENCE_FLOOR));
        assert!(!suggestion.is_confident(61));
    }

    #[test]
    fn descriptor_mirrors_finding() {
        let finding = crate::finding::Finding::error("C001", EntityKind::Client, "C1", "Name", "empty");
        let descriptor = FindingDescriptor::from(&finding);
        assert_eq!(descriptor.code, "C001");
        assert_eq!(descriptor.severity, "error");
        assert_eq!(descriptor.entity, "client");
    }
}
