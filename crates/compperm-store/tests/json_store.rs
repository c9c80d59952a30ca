//! Integration test: a JSON store on disk driving the policy engine.

use compperm_policy::{
    ActivationPolicy, Decision, IdentityService, PermissionSet, PolicyConfig, PolicyEngine,
    TicketStore,
};
use compperm_store::JsonStore;
use compperm_types::{Resource, StoreError};
use std::sync::Arc;
use tempfile::TempDir;

const DOCUMENT: &str = r#"{
    "components": [{"name": "Backend"}, {"name": "Front End"}],
    "tickets": [
        {
            "id": 10,
            "owner": "alice",
            "reporter": "bob",
            "cc": "carol; dave@x.com",
            "component": "Backend"
        }
    ],
    "users": [
        {"username": "dave", "email": "dave@x.com", "email_verified": false}
    ]
}"#;

fn write_store(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("store.json");
    std::fs::write(&path, DOCUMENT).unwrap();
    path
}

fn config() -> PolicyConfig {
    PolicyConfig {
        activation: ActivationPolicy::Always,
        allow_cc_email: true,
        ..Default::default()
    }
}

#[test]
fn open_and_enumerate() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(write_store(&dir)).unwrap();
    let engine = PolicyEngine::new(config(), Arc::new(store), None);
    let actions: Vec<String> = engine.enumerate_actions().into_iter().collect();
    assert_eq!(
        actions,
        vec![
            "COMPONENT_BACKEND_VIEW",
            "COMPONENT_FRONT_END_VIEW",
            "COMPONENT_VIEW"
        ]
    );
}

#[test]
fn unverified_email_only_bypasses_without_verifier() {
    let dir = TempDir::new().unwrap();
    let path = write_store(&dir);
    let resource = Resource::ticket(10);
    let empty = PermissionSet::new();

    let trusting = PolicyEngine::new(config(), Arc::new(JsonStore::open(&path).unwrap()), None);
    assert_eq!(
        trusting.check_permission("TICKET_VIEW", "dave", &resource, &empty),
        Decision::Abstain
    );

    let store = JsonStore::open(&path).unwrap();
    let verifier: Arc<dyn IdentityService> = Arc::new(store.verifier());
    let verifying = PolicyEngine::new(config(), Arc::new(store), Some(verifier));
    assert!(
        verifying
            .check_permission("TICKET_VIEW", "dave", &resource, &empty)
            .is_deny()
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = JsonStore::open(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}

#[test]
fn malformed_file_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{\"tickets\": [").unwrap();
    let err = JsonStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn unknown_ticket_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(write_store(&dir)).unwrap();
    assert!(store.load_ticket(11).unwrap_err().is_not_found());
}
