//! Handle lifecycle management.
//!
//! [`EngineHandle`] wraps the opaque pointer returned by the engine's create
//! operation and guarantees that destroy runs exactly once: `Drop` releases
//! the handle on every exit path, and the explicit [`close`] path consumes
//! the wrapper so a second release is unrepresentable. Callers with a known
//! end of use should close explicitly; relying on drop timing alone is a
//! backstop, not a resource-management strategy.
//!
//! [`close`]: EngineHandle::close

use std::ffi::CString;
use std::ptr::NonNull;

use crate::boundary::{Boundary, CompiledSchema};
use crate::error::{Result, ValidatorError};

/// Owned, live engine handle bound to an immutable compiled schema.
#[derive(Debug)]
pub(crate) struct EngineHandle {
    ptr: NonNull<CompiledSchema>,
    boundary: Boundary,
}

impl EngineHandle {
    /// Compile `schema_text` through the boundary's create operation.
    ///
    /// On failure no handle exists and nothing needs releasing; the null
    /// return is classified host-side into a JSON parse failure or a
    /// meta-schema rejection, since the create operation carries no message.
    pub fn acquire(boundary: Boundary, schema_text: &str) -> Result<Self> {
        let text = CString::new(schema_text)
            .map_err(|_| ValidatorError::InteriorNul("schema"))?;

        let raw = unsafe { (boundary.create)(text.as_ptr()) };

        match NonNull::new(raw) {
            Some(ptr) => {
                tracing::debug!(bytes = schema_text.len(), "compiled schema");
                Ok(Self { ptr, boundary })
            }
            None => Err(classify_create_failure(schema_text)),
        }
    }

    /// The raw handle, for passing back across the boundary.
    pub fn as_ptr(&self) -> *const CompiledSchema {
        self.ptr.as_ptr()
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Release the handle now. Dropping has the same effect; this form makes
    /// the end of use explicit at the call site.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        // Depends only on the function pointer and the raw handle, so it is
        // safe to run during late teardown.
        tracing::trace!("releasing engine handle");
        unsafe { (self.boundary.destroy)(self.ptr.as_ptr()) };
    }
}

// The compiled schema is immutable after acquire, so the handle may move
// between threads. Concurrent queries on one handle are not part of the
// engine contract; `Sync` is deliberately not implemented.
unsafe impl Send for EngineHandle {}

fn classify_create_failure(schema_text: &str) -> ValidatorError {
    match serde_json::from_str::<serde_json::Value>(schema_text) {
        Err(parse) => ValidatorError::SchemaJson(parse.to_string()),
        Ok(_) => ValidatorError::SchemaRejected(
            "schema document does not satisfy the engine meta-schema".to_string(),
        ),
    }
}
