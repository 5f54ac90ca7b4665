//! Integration tests for the export surface: CSV regeneration and the
//! rules configuration document.

mod helpers;

use serde_json::json;

use helpers::{client, fixture_dataset, with_code};
use validator::export::rules::{BusinessRule, RulesConfig};
use validator::export::{self, ExportBundle};

#[test]
fn export_refuses_while_errors_exist() {
    let clients = vec![client(json!({"ClientID": "C1", "Name": ""}))];
    let err = export::export_bundle(&clients, &[], &[], &RulesConfig::default()).unwrap_err();
    assert_eq!(with_code(&err, "C001").len(), 1);
}

#[test]
fn warnings_do_not_block_export() {
    let clients = vec![client(json!({
        "ClientID": "C1",
        "Name": "A",
        "RequestedTaskIDs": "GHOST"
    }))];
    let bundle = export::export_bundle(&clients, &[], &[], &RulesConfig::default())
        .expect("warnings must not block export");
    assert_eq!(bundle.files.len(), 4);
}

#[test]
fn bundle_contains_one_file_per_collection_plus_rules() {
    let data = fixture_dataset();
    let bundle = export_fixture(&data);
    let paths: Vec<&str> = bundle.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["clients.csv", "workers.csv", "tasks.csv", "rules.json"]);
}

#[test]
fn clients_csv_snapshot() {
    let data = fixture_dataset();
    let bundle = export_fixture(&data);
    let csv = &bundle.files[0].content;
    assert!(csv.ends_with('\n'));
    insta::assert_snapshot!(csv.trim_end(), @r#"
ClientID,Name,Email,Phone,Department,AttributesJSON,RequestedTaskIDs
C1,Acme Shipyards,ops@acme.example,,Refit,"{""tier"": ""gold"", ""region"": ""north""}","T1,T2"
C2,Beta Marine,,555-0102,,,"[""T3"",""T4""]"
"#);
}

#[test]
fn extra_columns_survive_export() {
    let data = fixture_dataset();
    let bundle = export_fixture(&data);
    let tasks_csv = &bundle.files[2].content;
    let header = tasks_csv.lines().next().unwrap();
    assert!(header.ends_with(",Zone"), "extras come last: {header}");
    assert!(tasks_csv.contains("north"));
}

#[test]
fn rules_json_snapshot() {
    let rendered = export::gen_rules_json(&RulesConfig::default());
    insta::assert_snapshot!(rendered.trim_end(), @r#"
{
  "rules": [],
  "prioritization": {
    "priorityLevel": 50,
    "requestedTaskFulfillment": 50,
    "fairness": 50,
    "workloadBalance": 50,
    "skillMatch": 50,
    "phasePreference": 50,
    "costEfficiency": 50
  },
  "validations": {
    "missingRequired": true,
    "brokenJson": true,
    "malformedLists": true,
    "outOfRange": true,
    "unknownReferences": true,
    "duplicateIds": true,
    "skillCoverage": true,
    "concurrencyFeasibility": true,
    "phaseSaturation": true,
    "dependencyCycles": true
  }
}
"#);
}

#[test]
fn business_rules_serialize_with_type_tags() {
    let config = RulesConfig {
        rules: vec![
            BusinessRule::CoRun {
                tasks: vec!["T1".into(), "T2".into()],
            },
            BusinessRule::SlotRestriction {
                group: "yard".into(),
                min_common_slots: 2,
            },
            BusinessRule::LoadLimit {
                worker_group: "welders".into(),
                max_slots_per_phase: 3,
            },
            BusinessRule::PhaseWindow {
                task: "T3".into(),
                allowed_phases: vec![2, 3],
            },
        ],
        ..RulesConfig::default()
    };

    let rendered = export::gen_rules_json(&config);
    for tag in ["coRun", "slotRestriction", "loadLimit", "phaseWindow"] {
        assert!(rendered.contains(tag), "missing tag {tag}");
    }

    let parsed: RulesConfig = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn empty_collections_still_export_headers() {
    let bundle =
        export::export_bundle(&[], &[], &[], &RulesConfig::default()).expect("empty data is valid");
    assert_eq!(bundle.files[0].content, "ClientID,Name\n");
    assert_eq!(bundle.files[1].content, "WorkerID,Name\n");
    assert_eq!(bundle.files[2].content, "TaskID,Title\n");
}

fn export_fixture(data: &validator::session::DataSet) -> ExportBundle {
    export::export_bundle(&data.clients, &data.workers, &data.tasks, &RulesConfig::default())
        .expect("fixture dataset must export cleanly")
}
