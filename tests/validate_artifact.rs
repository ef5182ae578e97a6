//! Tests for artifact validation: the schema engine itself and the tool
//! handler wrapped around it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gemara_mcp_server::config::ServerConfig;
use gemara_mcp_server::handlers::validate_artifact;
use gemara_mcp_server::protocol::ValidateArtifactParams;
use gemara_mcp_server::schema::{
    JsonSchemaEngine, SchemaEngine, SchemaError, ValidationOutcome,
};
use gemara_mcp_server::server::AppState;

const VALID_CONTROL_CATALOG: &str = r#"
metadata:
  id: osps-baseline
  title: Open Source Project Security Baseline
  version: "1.0.0"
control-families:
  - title: Access Control
    description: Controls governing repository access
    controls:
      - id: OSPS-AC-01
        title: Require multi-factor authentication
        objective: Reduce the risk of account takeover for maintainers.
        assessment-requirements:
          - id: OSPS-AC-01.1
            text: MFA is enforced for all members of the project organization.
            applicability:
              - Maturity Level 1
"#;

// ---------------------------------------------------------------------------
// Schema engine
// ---------------------------------------------------------------------------

#[test]
fn valid_catalog_passes() {
    let engine = JsonSchemaEngine::bundled().unwrap();
    let outcome = engine
        .validate(VALID_CONTROL_CATALOG, "#ControlCatalog")
        .unwrap();

    assert!(outcome.valid, "errors: {:?}", outcome.errors);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.message, "Artifact is valid");
}

#[test]
fn malformed_yaml_is_a_validation_failure_not_an_error() {
    let engine = JsonSchemaEngine::bundled().unwrap();
    let outcome = engine
        .validate("invalid: yaml: [unclosed", "#ControlCatalog")
        .unwrap();

    assert!(!outcome.valid);
    assert!(!outcome.errors.is_empty());
    assert!(
        outcome.message.contains("YAML"),
        "message should mention the document format: {}",
        outcome.message
    );
}

#[test]
fn definition_name_accepts_optional_hash_prefix() {
    let engine = JsonSchemaEngine::bundled().unwrap();

    let with_hash = engine
        .validate(VALID_CONTROL_CATALOG, "#ControlCatalog")
        .unwrap();
    let without_hash = engine
        .validate(VALID_CONTROL_CATALOG, "ControlCatalog")
        .unwrap();

    assert_eq!(with_hash.valid, without_hash.valid);
    assert_eq!(with_hash.errors, without_hash.errors);
}

#[test]
fn wrong_shape_document_fails_with_diagnostics() {
    let engine = JsonSchemaEngine::bundled().unwrap();
    let outcome = engine
        .validate(
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: test\n",
            "#ControlCatalog",
        )
        .unwrap();

    assert!(!outcome.valid);
    assert!(!outcome.errors.is_empty());
    assert!(outcome.errors.iter().all(|line| !line.trim().is_empty()));
    assert!(outcome.message.starts_with("Validation failed"));
}

#[test]
fn non_concrete_document_fails() {
    let engine = JsonSchemaEngine::bundled().unwrap();
    let outcome = engine.validate("---\n", "#ControlCatalog").unwrap();

    assert!(!outcome.valid, "a null document satisfies no artifact kind");
    assert!(!outcome.errors.is_empty());
}

#[test]
fn unknown_definition_is_a_function_error() {
    let engine = JsonSchemaEngine::bundled().unwrap();
    let err = engine
        .validate(VALID_CONTROL_CATALOG, "#NoSuchKind")
        .unwrap_err();

    match err {
        SchemaError::DefinitionNotFound(name) => assert_eq!(name, "NoSuchKind"),
        other => panic!("expected DefinitionNotFound, got {other:?}"),
    }
}

#[test]
fn module_file_override_matches_bundled_behavior() {
    let dir = tempfile::tempdir().unwrap();
    let module_path = dir.path().join("module.json");
    std::fs::write(
        &module_path,
        include_str!("../schemas/gemara-module.json"),
    )
    .unwrap();

    let bundled = JsonSchemaEngine::bundled().unwrap();
    let from_file = JsonSchemaEngine::from_module_file(&module_path).unwrap();

    let a = bundled
        .validate(VALID_CONTROL_CATALOG, "#ControlCatalog")
        .unwrap();
    let b = from_file
        .validate(VALID_CONTROL_CATALOG, "#ControlCatalog")
        .unwrap();

    assert_eq!(a.valid, b.valid);
    assert_eq!(a.errors, b.errors);
}

#[test]
fn unreadable_module_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonSchemaEngine::from_module_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, SchemaError::ModuleLoad { .. }), "got {err:?}");
}

#[test]
fn module_without_defs_table_is_rejected() {
    let err = JsonSchemaEngine::from_module_str(r#"{"title": "no defs here"}"#).unwrap_err();
    assert!(matches!(err, SchemaError::ModuleShape), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Tool handler
// ---------------------------------------------------------------------------

/// Engine stub that counts invocations; input errors must never reach it.
struct CountingEngine {
    calls: AtomicUsize,
}

impl SchemaEngine for CountingEngine {
    fn validate(
        &self,
        _document: &str,
        _definition: &str,
    ) -> Result<ValidationOutcome, SchemaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ValidationOutcome {
            valid: true,
            errors: Vec::new(),
            message: "Artifact is valid".to_string(),
        })
    }
}

fn test_state(engine: Arc<dyn SchemaEngine + Send + Sync>) -> AppState {
    let config = ServerConfig {
        tool_timeout: Duration::from_secs(5),
        ..ServerConfig::default()
    };
    AppState::with_engine(config, engine).unwrap()
}

#[tokio::test]
async fn empty_artifact_content_is_rejected_before_the_engine_runs() {
    let engine = Arc::new(CountingEngine {
        calls: AtomicUsize::new(0),
    });
    let state = test_state(engine.clone());

    let result = validate_artifact::handle(
        ValidateArtifactParams {
            artifact_content: String::new(),
            definition: "#ControlCatalog".to_string(),
        },
        &state,
    )
    .await;

    assert!(result.is_error);
    assert!(result.content[0].text.contains("artifact_content is required"));
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_definition_is_rejected_before_the_engine_runs() {
    let engine = Arc::new(CountingEngine {
        calls: AtomicUsize::new(0),
    });
    let state = test_state(engine.clone());

    let result = validate_artifact::handle(
        ValidateArtifactParams {
            artifact_content: "test: content".to_string(),
            definition: String::new(),
        },
        &state,
    )
    .await;

    assert!(result.is_error);
    assert!(result.content[0].text.contains("definition is required"));
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn handler_returns_outcome_json_for_a_valid_artifact() {
    let state = test_state(Arc::new(JsonSchemaEngine::bundled().unwrap()));

    let result = validate_artifact::handle(
        ValidateArtifactParams {
            artifact_content: VALID_CONTROL_CATALOG.to_string(),
            definition: "ControlCatalog".to_string(),
        },
        &state,
    )
    .await;

    assert!(!result.is_error);
    let value: serde_json::Value = serde_json::from_str(&result.content[0].text).unwrap();
    assert_eq!(value["valid"], serde_json::json!(true));
    assert_eq!(value["message"], serde_json::json!("Artifact is valid"));
    assert!(value.get("errors").is_none(), "errors omitted when valid");
}

#[tokio::test]
async fn handler_returns_outcome_json_for_an_invalid_artifact() {
    let state = test_state(Arc::new(JsonSchemaEngine::bundled().unwrap()));

    let result = validate_artifact::handle(
        ValidateArtifactParams {
            artifact_content: "invalid: yaml: [unclosed".to_string(),
            definition: "#ControlCatalog".to_string(),
        },
        &state,
    )
    .await;

    assert!(!result.is_error, "validation failure is a result, not an error");
    let value: serde_json::Value = serde_json::from_str(&result.content[0].text).unwrap();
    assert_eq!(value["valid"], serde_json::json!(false));
    assert!(!value["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_definition_surfaces_as_schema_error() {
    let state = test_state(Arc::new(JsonSchemaEngine::bundled().unwrap()));

    let result = validate_artifact::handle(
        ValidateArtifactParams {
            artifact_content: "test: content".to_string(),
            definition: "#NoSuchKind".to_string(),
        },
        &state,
    )
    .await;

    assert!(result.is_error);
    let value: serde_json::Value = serde_json::from_str(&result.content[0].text).unwrap();
    assert_eq!(value["error"]["code"], serde_json::json!("schema_unavailable"));
}
