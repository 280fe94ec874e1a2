//! Schema registry for the codelab document types.
//!
//! Schemas are built from `lab-core` types at construction time using
//! [`schemars::schema_for!`] and validated with `jsonschema`.

use std::collections::HashMap;

use lab_core::entities::ProjectDocument;
use schemars::schema_for;

use crate::error::SchemaError;

/// Name under which the canonical project document schema is registered.
pub const PROJECT_DOCUMENT: &str = "project_document";

/// Central store of the JSON Schemas codelab exchanges.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map. Panics if `serde_json::to_value` fails,
/// which `schemars` output never does.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a registry holding the project document and log entry schemas.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on a `schemars`-generated
    /// schema. Not expected in practice.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, PROJECT_DOCUMENT, ProjectDocument);
        register!(schemas, "log_entry", lab_core::entities::LogEntry);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Check that a document is in canonical form.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` for a non-canonical document.
    pub fn validate_project(&self, doc: &ProjectDocument) -> Result<(), SchemaError> {
        let instance =
            serde_json::to_value(doc).map_err(|e| SchemaError::Generation(e.to_string()))?;
        self.validate(PROJECT_DOCUMENT, &instance)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_lists_known_schemas() {
        assert_eq!(SchemaRegistry::new().list(), vec!["log_entry", "project_document"]);
    }

    #[test]
    fn get_nonexistent_schema() {
        assert!(SchemaRegistry::new().get("nonexistent").is_none());
    }

    #[test]
    fn canonical_document_validates() {
        let reg = SchemaRegistry::new();
        assert!(reg.validate_project(&ProjectDocument::starter()).is_ok());
    }

    #[test]
    fn legacy_shape_fails_canonical_schema() {
        let reg = SchemaRegistry::new();
        let legacy = json!({ "web": { "html": "a" }, "task": "t" });
        let result = reg.validate(PROJECT_DOCUMENT, &legacy);
        assert!(matches!(result, Err(SchemaError::ValidationFailed { ref errors }) if !errors.is_empty()));
    }

    #[test]
    fn normalized_legacy_shape_passes_canonical_schema() {
        let reg = SchemaRegistry::new();
        let legacy = json!({ "web": { "html": "a" }, "task": "t" });
        let doc = crate::normalize(&legacy).unwrap();
        assert!(reg.validate_project(&doc).is_ok());
    }

    #[test]
    fn validate_unknown_schema_name() {
        let reg = SchemaRegistry::new();
        let result = reg.validate("nope", &json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }
}
