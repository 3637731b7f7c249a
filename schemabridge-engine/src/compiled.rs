//! Compiled schema state owned by the engine.
//!
//! A [`CompiledSchema`] binds a parsed JSON Schema document to a compiled
//! `jsonschema` validator at construction time. The binding is immutable for
//! the lifetime of the value, so repeated queries are pure functions of
//! (schema, instance).

use jsonschema::{ValidationError, Validator};
use serde_json::Value;
use thiserror::Error;

/// Errors produced while compiling a schema or parsing an instance.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Schema text is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    SchemaJson(#[source] serde_json::Error),

    /// Schema text parsed but does not satisfy the meta-schema.
    #[error("schema rejected: {0}")]
    SchemaInvalid(String),

    /// Instance text is not valid JSON.
    #[error("instance is not valid JSON: {0}")]
    InstanceJson(#[source] serde_json::Error),
}

/// A compiled, immutable JSON Schema ready for queries.
pub struct CompiledSchema {
    validator: Validator,
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema").finish_non_exhaustive()
    }
}

impl CompiledSchema {
    /// Parse `schema_text` and compile it into a validator.
    ///
    /// Compilation runs the `jsonschema` crate's meta-schema checks, so a
    /// syntactically valid document that is not a valid schema (for example
    /// `{"type": 1}`) is rejected here.
    pub fn compile(schema_text: &str) -> Result<Self, EngineError> {
        let schema: Value =
            serde_json::from_str(schema_text).map_err(EngineError::SchemaJson)?;
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| EngineError::SchemaInvalid(e.to_string()))?;

        Ok(Self { validator })
    }

    /// Boolean check of `instance_text` against the compiled schema.
    pub fn is_valid(&self, instance_text: &str) -> Result<bool, EngineError> {
        let instance: Value =
            serde_json::from_str(instance_text).map_err(EngineError::InstanceJson)?;

        Ok(self.validator.is_valid(&instance))
    }

    /// Full validation of `instance_text`, one message per violation in the
    /// order the evaluator discovers them. An empty vector means the
    /// instance conforms.
    pub fn validate(&self, instance_text: &str) -> Result<Vec<String>, EngineError> {
        let instance: Value =
            serde_json::from_str(instance_text).map_err(EngineError::InstanceJson)?;

        Ok(self
            .validator
            .iter_errors(&instance)
            .map(|e| format_violation(&e))
            .collect())
    }
}

/// Render a violation as `path "<location>": <reason>`.
///
/// The root location serializes to an empty JSON Pointer; it is reported as
/// `/` so missing-required-property violations read as
/// `path "/": "baz" is a required property`.
fn format_violation(error: &ValidationError<'_>) -> String {
    let location = error.instance_path.to_string();
    let path = if location.is_empty() { "/" } else { &location };

    format!("path \"{path}\": {error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_rejects_malformed_json() {
        let err = CompiledSchema::compile("{not json").unwrap_err();
        assert!(matches!(err, EngineError::SchemaJson(_)));
    }

    #[test]
    fn compile_rejects_non_conforming_schema() {
        let err = CompiledSchema::compile(r#"{"type": 1}"#).unwrap_err();
        assert!(matches!(err, EngineError::SchemaInvalid(_)));
    }

    #[test]
    fn queries_agree_on_conforming_instance() {
        let compiled =
            CompiledSchema::compile(r#"{"type":"object","required":["id"]}"#).unwrap();

        assert!(compiled.is_valid(r#"{"id":1}"#).unwrap());
        assert!(compiled.validate(r#"{"id":1}"#).unwrap().is_empty());
    }

    #[test]
    fn root_violation_is_reported_against_slash() {
        let compiled =
            CompiledSchema::compile(r#"{"type":"object","required":["id"]}"#).unwrap();

        let messages = compiled.validate("{}").unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with(r#"path "/":"#), "{}", messages[0]);
    }

    #[test]
    fn debug_does_not_expose_internals() {
        let compiled = CompiledSchema::compile(r#"{"type":"object"}"#).unwrap();
        assert_eq!(format!("{compiled:?}"), "CompiledSchema { .. }");
    }

    #[test]
    fn instance_parse_failure_is_recoverable() {
        let compiled = CompiledSchema::compile(r#"{"type":"object"}"#).unwrap();

        assert!(matches!(
            compiled.is_valid("{oops").unwrap_err(),
            EngineError::InstanceJson(_)
        ));
        assert!(matches!(
            compiled.validate("{oops").unwrap_err(),
            EngineError::InstanceJson(_)
        ));
    }
}
