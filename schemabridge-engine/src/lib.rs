//! JSON Schema validation engine behind a flat C ABI.
//!
//! The engine owns all validation state: compiled schemas live behind opaque
//! handles, and detailed results cross the boundary as engine-owned
//! [`ErrorArray`] values. Exactly five entry points are exported:
//!
//! - [`schemabridge_validator_new`] — compile a schema, returning a handle
//! - [`schemabridge_validator_free`] — destroy a handle, exactly once
//! - [`schemabridge_validator_is_valid`] — boolean check of an instance
//! - [`schemabridge_validator_validate`] — detailed check, returning an array
//! - [`schemabridge_array_free`] — release an array and its element strings
//!
//! Hosts never see engine internals; they hold the handle and pass it back.
//! All calls are synchronous and run to completion. A handle is not
//! reentrant-safe: callers must confine it to one thread at a time or guard
//! it externally. Distinct handles are fully independent.

mod array;
mod compiled;
pub mod stats;

pub use array::ErrorArray;
pub use compiled::{CompiledSchema, EngineError};

use std::ffi::{CStr, c_char, c_int};
use std::ptr;

/// `is_valid` result: the instance conforms to the schema.
pub const CHECK_VALID: c_int = 1;
/// `is_valid` result: the instance does not conform.
pub const CHECK_INVALID: c_int = 0;
/// `is_valid` result: the instance text is not valid JSON.
pub const CHECK_PARSE_ERROR: c_int = -1;
/// `is_valid` result: a required argument was null or not UTF-8.
pub const CHECK_NULL_ARGUMENT: c_int = -2;

/// Compile `schema` and return an owned handle, or null when the text is not
/// valid JSON, is not a valid schema document, is null, or is not UTF-8.
///
/// # Safety
/// `schema` must be null or a valid null-terminated string. A non-null
/// return must be released with [`schemabridge_validator_free`] exactly once;
/// using it after release is undefined behavior.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn schemabridge_validator_new(
    schema: *const c_char,
) -> *mut CompiledSchema {
    let Some(text) = (unsafe { text_arg(schema) }) else {
        return ptr::null_mut();
    };

    match CompiledSchema::compile(text) {
        Ok(compiled) => {
            stats::record_handle_created();
            Box::into_raw(Box::new(compiled))
        }
        Err(_) => ptr::null_mut(),
    }
}

/// Destroy a handle returned by [`schemabridge_validator_new`].
///
/// Null is tolerated as a no-op so the failure path of create needs no
/// special casing on the host side.
///
/// # Safety
/// `handle` must be null or a handle returned by
/// [`schemabridge_validator_new`] that has not been freed before. Freeing
/// the same handle twice is undefined behavior.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn schemabridge_validator_free(handle: *mut CompiledSchema) {
    if handle.is_null() {
        return;
    }

    stats::record_handle_destroyed();
    drop(unsafe { Box::from_raw(handle) });
}

/// Boolean check of `instance` against the compiled schema.
///
/// Returns [`CHECK_VALID`], [`CHECK_INVALID`], [`CHECK_PARSE_ERROR`] when
/// the instance text is not valid JSON, or [`CHECK_NULL_ARGUMENT`]. No
/// allocation outlives the call.
///
/// # Safety
/// `handle` must be a live handle from [`schemabridge_validator_new`] (or
/// null); `instance` must be null or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn schemabridge_validator_is_valid(
    handle: *const CompiledSchema,
    instance: *const c_char,
) -> c_int {
    if handle.is_null() {
        return CHECK_NULL_ARGUMENT;
    }
    let Some(text) = (unsafe { text_arg(instance) }) else {
        return CHECK_NULL_ARGUMENT;
    };

    match unsafe { &*handle }.is_valid(text) {
        Ok(true) => CHECK_VALID,
        Ok(false) => CHECK_INVALID,
        Err(_) => CHECK_PARSE_ERROR,
    }
}

/// Detailed check of `instance` against the compiled schema.
///
/// Returns an engine-owned [`ErrorArray`] with one message per violation in
/// evaluator order — empty when the instance conforms — or null when the
/// instance text is not valid JSON or an argument is null. A non-null return
/// is owned by the engine until released.
///
/// # Safety
/// `handle` must be a live handle from [`schemabridge_validator_new`] (or
/// null); `instance` must be null or a valid null-terminated string. A
/// non-null return must be released with [`schemabridge_array_free`] exactly
/// once; reading it after release is undefined behavior.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn schemabridge_validator_validate(
    handle: *const CompiledSchema,
    instance: *const c_char,
) -> *mut ErrorArray {
    if handle.is_null() {
        return ptr::null_mut();
    }
    let Some(text) = (unsafe { text_arg(instance) }) else {
        return ptr::null_mut();
    };

    match unsafe { &*handle }.validate(text) {
        Ok(messages) => {
            stats::record_array_allocated();
            Box::into_raw(Box::new(ErrorArray::from_messages(messages)))
        }
        Err(_) => ptr::null_mut(),
    }
}

/// Release an array returned by [`schemabridge_validator_validate`],
/// freeing the backing array and every element string in one call.
///
/// Null is tolerated as a no-op.
///
/// # Safety
/// `array` must be null or an array returned by
/// [`schemabridge_validator_validate`] that has not been freed before.
/// Freeing the same array twice, or reading any field afterwards, is
/// undefined behavior.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn schemabridge_array_free(array: *mut ErrorArray) {
    if array.is_null() {
        return;
    }

    stats::record_array_freed();
    let array = *unsafe { Box::from_raw(array) };
    unsafe { array.release() };
}

/// Screen a C string argument: null or non-UTF-8 yields `None`.
unsafe fn text_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }

    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}
