//! Boundary signature definitions.
//!
//! The engine is a separate native artifact with five flat, C-callable entry
//! points. This module names those signatures and bundles them into a
//! [`Boundary`] table. The lifecycle and decoding code is written against
//! the table, never against the linked symbols directly, so where the engine
//! came from (static link, dynamic load, test double) is a configuration
//! detail injected at construction time.

use std::ffi::{c_char, c_int};

pub use schemabridge_engine::{CompiledSchema, ErrorArray};
pub(crate) use schemabridge_engine::{
    CHECK_INVALID, CHECK_NULL_ARGUMENT, CHECK_PARSE_ERROR, CHECK_VALID,
};

/// `create`: schema text in, opaque handle out (null on failure).
pub type CreateFn = unsafe extern "C" fn(*const c_char) -> *mut CompiledSchema;
/// `destroy`: consumes a handle; exactly-once per handle.
pub type DestroyFn = unsafe extern "C" fn(*mut CompiledSchema);
/// `check`: boolean query with in-band parse-failure signaling.
pub type CheckFn = unsafe extern "C" fn(*const CompiledSchema, *const c_char) -> c_int;
/// `validate`: detailed query returning an engine-owned array (null on
/// parse failure).
pub type ValidateFn =
    unsafe extern "C" fn(*const CompiledSchema, *const c_char) -> *mut ErrorArray;
/// `array-release`: frees an array and all of its element strings.
pub type ArrayFreeFn = unsafe extern "C" fn(*mut ErrorArray);

/// The engine's flat function surface, resolved to concrete entry points.
#[derive(Clone, Copy)]
pub struct Boundary {
    pub(crate) create: CreateFn,
    pub(crate) destroy: DestroyFn,
    pub(crate) check: CheckFn,
    pub(crate) validate: ValidateFn,
    pub(crate) array_free: ArrayFreeFn,
}

impl Boundary {
    /// Build a table from explicit entry points.
    ///
    /// The five functions must implement the boundary contract as a set:
    /// handles returned by `create` are owned until `destroy`, arrays
    /// returned by `validate` are owned until `array_free`.
    pub fn new(
        create: CreateFn,
        destroy: DestroyFn,
        check: CheckFn,
        validate: ValidateFn,
        array_free: ArrayFreeFn,
    ) -> Self {
        Self {
            create,
            destroy,
            check,
            validate,
            array_free,
        }
    }

    /// The statically linked engine.
    pub fn linked() -> Self {
        Self::new(
            schemabridge_engine::schemabridge_validator_new,
            schemabridge_engine::schemabridge_validator_free,
            schemabridge_engine::schemabridge_validator_is_valid,
            schemabridge_engine::schemabridge_validator_validate,
            schemabridge_engine::schemabridge_array_free,
        )
    }
}

impl std::fmt::Debug for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Boundary").finish_non_exhaustive()
    }
}
