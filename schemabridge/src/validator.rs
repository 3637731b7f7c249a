//! The user-visible validator facade.

use std::ffi::CString;
use std::ptr::NonNull;

use serde::Serialize;

use crate::boundary::{
    Boundary, CHECK_INVALID, CHECK_NULL_ARGUMENT, CHECK_PARSE_ERROR, CHECK_VALID,
};
use crate::decode::decode_error_array;
use crate::error::{Result, ValidatorError};
use crate::handle::EngineHandle;

/// A compiled JSON Schema bound to a live engine handle.
///
/// Both query operations are pure functions of (schema, instance): the
/// compiled schema never changes after construction, so for any instance
/// text [`is_valid`] returns `true` exactly when [`validate`] returns an
/// empty list.
///
/// The native handle is released when the validator is dropped; call
/// [`close`] to make the release point explicit. A `Validator` may move
/// between threads but is not shareable across them.
///
/// # Examples
///
/// ```
/// use schemabridge::Validator;
///
/// let validator = Validator::new(r#"{"type":"object"}"#)?;
/// assert!(validator.is_valid(r#"{"anything":1}"#)?);
/// assert!(!validator.is_valid("[10, 15]")?);
/// validator.close();
/// # Ok::<(), schemabridge::ValidatorError>(())
/// ```
///
/// [`is_valid`]: Validator::is_valid
/// [`validate`]: Validator::validate
/// [`close`]: Validator::close
#[derive(Debug)]
pub struct Validator {
    handle: EngineHandle,
}

impl Validator {
    /// Compile `schema_text` against the statically linked engine.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::SchemaJson`] when the text is not valid JSON,
    /// [`ValidatorError::SchemaRejected`] when the engine's meta-schema
    /// check refuses the document. No native resource exists on either
    /// failure path.
    pub fn new(schema_text: &str) -> Result<Self> {
        ValidatorBuilder::new().build(schema_text)
    }

    /// Boolean check of `instance_text` against the compiled schema.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InstanceJson`] when the instance text is not valid
    /// JSON. The handle is not affected by a failed check.
    pub fn is_valid(&self, instance_text: &str) -> Result<bool> {
        let text = CString::new(instance_text)
            .map_err(|_| ValidatorError::InteriorNul("instance"))?;

        let status =
            unsafe { (self.handle.boundary().check)(self.handle.as_ptr(), text.as_ptr()) };

        match status {
            CHECK_VALID => Ok(true),
            CHECK_INVALID => Ok(false),
            CHECK_PARSE_ERROR => Err(instance_parse_error(instance_text)),
            CHECK_NULL_ARGUMENT => Err(ValidatorError::Boundary(
                "check reported a null argument for a live handle".to_string(),
            )),
            other => Err(ValidatorError::Boundary(format!(
                "check returned unknown status {other}"
            ))),
        }
    }

    /// Detailed check of `instance_text` against the compiled schema.
    ///
    /// Returns one message per violation, formatted by the engine as
    /// `path "<location>": <reason>`, in the order the evaluator discovers
    /// them. An empty vector means the instance conforms.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InstanceJson`] when the instance text is not valid
    /// JSON.
    pub fn validate(&self, instance_text: &str) -> Result<Vec<String>> {
        let text = CString::new(instance_text)
            .map_err(|_| ValidatorError::InteriorNul("instance"))?;

        let boundary = self.handle.boundary();
        let raw = unsafe { (boundary.validate)(self.handle.as_ptr(), text.as_ptr()) };

        match NonNull::new(raw) {
            Some(array) => {
                let messages = unsafe { decode_error_array(boundary, array) };
                tracing::trace!(violations = messages.len(), "validated instance");
                Ok(messages)
            }
            None => Err(instance_parse_error(instance_text)),
        }
    }

    /// [`is_valid`](Validator::is_valid) over a typed value, serialized to
    /// JSON text with `serde_json` at the call site.
    pub fn is_valid_value<T: Serialize>(&self, instance: &T) -> Result<bool> {
        self.is_valid(&serde_json::to_string(instance)?)
    }

    /// [`validate`](Validator::validate) over a typed value, serialized to
    /// JSON text with `serde_json` at the call site.
    pub fn validate_value<T: Serialize>(&self, instance: &T) -> Result<Vec<String>> {
        self.validate(&serde_json::to_string(instance)?)
    }

    /// Release the native handle now instead of at drop time.
    pub fn close(self) {
        self.handle.close();
    }
}

/// Builder for [`Validator`], carrying the boundary configuration.
///
/// The default boundary is the statically linked engine; tests and
/// alternative deployments inject their own table with [`boundary`].
///
/// [`boundary`]: ValidatorBuilder::boundary
#[derive(Debug)]
pub struct ValidatorBuilder {
    boundary: Boundary,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self {
            boundary: Boundary::linked(),
        }
    }

    /// Use an explicit boundary table instead of the linked engine.
    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Compile `schema_text` into a validator.
    pub fn build(self, schema_text: &str) -> Result<Validator> {
        let handle = EngineHandle::acquire(self.boundary, schema_text)?;
        Ok(Validator { handle })
    }

    /// Compile a typed schema value, serialized to JSON text with
    /// `serde_json` at the call site.
    pub fn build_value<T: Serialize>(self, schema: &T) -> Result<Validator> {
        self.build(&serde_json::to_string(schema)?)
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Recover the parse failure detail the boundary's status code cannot carry.
fn instance_parse_error(instance_text: &str) -> ValidatorError {
    match serde_json::from_str::<serde_json::Value>(instance_text) {
        Err(parse) => ValidatorError::InstanceJson(parse.to_string()),
        Ok(_) => ValidatorError::Boundary(
            "engine reported a parse failure for parseable instance text".to_string(),
        ),
    }
}
