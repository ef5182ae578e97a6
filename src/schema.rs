//! Artifact validation against the Gemara schema module.
//!
//! The schema module is a JSON document whose `$defs` table maps
//! definition names (`ControlCatalog`, `GuidanceDocument`, `Policy`,
//! `EvaluationLog`) to JSON Schemas (draft 2020-12). A bundled snapshot
//! of the module ships with the crate; `GEMARA_SCHEMA_MODULE` points at a
//! replacement file when a newer module is needed.
//!
//! The load-bearing distinction here: a document that fails to satisfy a
//! schema (or fails to parse as YAML) is a *validation failure* carried in
//! [`ValidationOutcome`], while an unresolvable definition or an unusable
//! module is a [`SchemaError`] function error.

use std::path::Path;

use jsonschema::validator_for;
use serde::Serialize;
use serde_json::Value;

/// Coordinate of the schema module this build resolves.
pub const SCHEMA_MODULE_COORDINATE: &str = "gemara.openssf.org/gemara@v1";

/// Snapshot of the module identified by [`SCHEMA_MODULE_COORDINATE`].
const BUNDLED_MODULE: &str = include_str!("../schemas/gemara-module.json");

/// Result of one validation call. Constructed fresh per call.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub message: String,
}

impl ValidationOutcome {
    fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            message: "Artifact is valid".to_string(),
        }
    }

    fn invalid(errors: Vec<String>, message: String) -> Self {
        Self {
            valid: false,
            errors,
            message,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to load schema module {coordinate}: {source}")]
    ModuleLoad {
        coordinate: String,
        #[source]
        source: std::io::Error,
    },
    #[error("schema module is not valid JSON: {0}")]
    ModuleParse(#[from] serde_json::Error),
    #[error("schema module has no $defs table")]
    ModuleShape,
    #[error("definition #{0} not found in schema module")]
    DefinitionNotFound(String),
    #[error("failed to compile schema definition #{name}: {detail}")]
    Compile { name: String, detail: String },
}

/// Capability boundary for the schema engine.
///
/// `definition` accepts an optional leading `#`; implementations must
/// treat `ControlCatalog` and `#ControlCatalog` identically.
pub trait SchemaEngine {
    fn validate(&self, document: &str, definition: &str)
        -> Result<ValidationOutcome, SchemaError>;
}

/// [`SchemaEngine`] backed by the `jsonschema` crate.
#[derive(Debug)]
pub struct JsonSchemaEngine {
    defs: serde_json::Map<String, Value>,
}

impl JsonSchemaEngine {
    /// Engine over the bundled module snapshot.
    pub fn bundled() -> Result<Self, SchemaError> {
        Self::from_module_str(BUNDLED_MODULE)
    }

    /// Engine over a module file, e.g. the `GEMARA_SCHEMA_MODULE` override.
    pub fn from_module_file(path: &Path) -> Result<Self, SchemaError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SchemaError::ModuleLoad {
            coordinate: path.display().to_string(),
            source,
        })?;
        Self::from_module_str(&raw)
    }

    pub fn from_module_str(raw: &str) -> Result<Self, SchemaError> {
        let module: Value = serde_json::from_str(raw)?;
        let defs = module
            .get("$defs")
            .and_then(Value::as_object)
            .ok_or(SchemaError::ModuleShape)?
            .clone();
        Ok(Self { defs })
    }

    /// Resolve a (normalized) definition name into a compiled validator.
    ///
    /// The whole `$defs` table rides along so cross-definition `$ref`s
    /// keep resolving.
    fn validator_for_definition(&self, name: &str) -> Result<jsonschema::Validator, SchemaError> {
        if !self.defs.contains_key(name) {
            return Err(SchemaError::DefinitionNotFound(name.to_string()));
        }

        let schema = serde_json::json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "$ref": format!("#/$defs/{name}"),
            "$defs": Value::Object(self.defs.clone()),
        });

        validator_for(&schema).map_err(|e| SchemaError::Compile {
            name: name.to_string(),
            detail: e.to_string(),
        })
    }
}

impl SchemaEngine for JsonSchemaEngine {
    fn validate(
        &self,
        document: &str,
        definition: &str,
    ) -> Result<ValidationOutcome, SchemaError> {
        let name = normalize_definition(definition);
        let validator = self.validator_for_definition(&name)?;

        // Invalid YAML is a validation failure, not a function error.
        let instance: Value = match serde_yaml::from_str(document) {
            Ok(v) => v,
            Err(e) => {
                return Ok(ValidationOutcome::invalid(
                    vec![format!("Failed to parse YAML: {e}")],
                    format!("Validation failed: invalid YAML: {e}"),
                ));
            }
        };

        let errors: Vec<String> = validator
            .iter_errors(&instance)
            .map(|err| {
                let path = err.instance_path().to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{path}: {err}")
                }
            })
            .filter(|line| !line.trim().is_empty())
            .collect();

        if errors.is_empty() {
            Ok(ValidationOutcome::valid())
        } else {
            let message = format!("Validation failed: {}", errors[0]);
            Ok(ValidationOutcome::invalid(errors, message))
        }
    }
}

/// Strip the optional leading `#` from a definition name; handlers
/// re-prepend it when reporting.
pub fn normalize_definition(definition: &str) -> String {
    definition.strip_prefix('#').unwrap_or(definition).to_string()
}
