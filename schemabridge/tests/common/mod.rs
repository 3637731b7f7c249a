//! Shared fixtures and boundary instrumentation for host-side tests.

#![allow(dead_code)]

use std::ffi::{CString, c_char};
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

use schemabridge::{Boundary, CompiledSchema, ErrorArray};
use schemabridge_engine as engine;

/// Install the test subscriber once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    use std::sync::Once;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Reference schema: typed `foo`/`bar`, required `baz`.
pub const SCHEMA: &str = r#"{"properties":{"foo":{"type":"string"},"bar":{"type":"number"},"baz":{}},"required":["baz"]}"#;

pub const VALID_INSTANCE: &str = r#"{"foo":"rusty","bar":1,"baz":"rusty"}"#;
pub const INVALID_INSTANCE: &str = r#"{"foo":1,"bar":"rusty"}"#;

/// Engine-ordered violations for [`INVALID_INSTANCE`] against [`SCHEMA`].
pub const EXPECTED_VIOLATIONS: [&str; 3] = [
    r#"path "/bar": "rusty" is not of type "number""#,
    r#"path "/foo": 1 is not of type "string""#,
    r#"path "/": "baz" is a required property"#,
];

pub static CREATE_CALLS: AtomicUsize = AtomicUsize::new(0);
pub static DESTROY_CALLS: AtomicUsize = AtomicUsize::new(0);
pub static VALIDATE_CALLS: AtomicUsize = AtomicUsize::new(0);
pub static ARRAY_FREE_CALLS: AtomicUsize = AtomicUsize::new(0);

pub fn create_calls() -> usize {
    CREATE_CALLS.load(Ordering::SeqCst)
}

pub fn destroy_calls() -> usize {
    DESTROY_CALLS.load(Ordering::SeqCst)
}

pub fn validate_calls() -> usize {
    VALIDATE_CALLS.load(Ordering::SeqCst)
}

pub fn array_free_calls() -> usize {
    ARRAY_FREE_CALLS.load(Ordering::SeqCst)
}

unsafe extern "C" fn counting_create(schema: *const c_char) -> *mut CompiledSchema {
    CREATE_CALLS.fetch_add(1, Ordering::SeqCst);
    unsafe { engine::schemabridge_validator_new(schema) }
}

unsafe extern "C" fn counting_destroy(handle: *mut CompiledSchema) {
    DESTROY_CALLS.fetch_add(1, Ordering::SeqCst);
    unsafe { engine::schemabridge_validator_free(handle) }
}

unsafe extern "C" fn counting_validate(
    handle: *const CompiledSchema,
    instance: *const c_char,
) -> *mut ErrorArray {
    VALIDATE_CALLS.fetch_add(1, Ordering::SeqCst);
    unsafe { engine::schemabridge_validator_validate(handle, instance) }
}

unsafe extern "C" fn counting_array_free(array: *mut ErrorArray) {
    ARRAY_FREE_CALLS.fetch_add(1, Ordering::SeqCst);
    unsafe { engine::schemabridge_array_free(array) }
}

/// A validate that hands back an array with a null element between two
/// populated ones, as a misbehaving-but-tolerated engine would.
unsafe extern "C" fn null_entry_validate(
    _handle: *const CompiledSchema,
    _instance: *const c_char,
) -> *mut ErrorArray {
    VALIDATE_CALLS.fetch_add(1, Ordering::SeqCst);

    let entries = vec![
        CString::new(r#"path "/": first"#).unwrap().into_raw(),
        ptr::null_mut(),
        CString::new(r#"path "/": second"#).unwrap().into_raw(),
    ];

    Box::into_raw(Box::new(ErrorArray::from_entries(entries)))
}

/// The real engine, with every ownership-transferring call counted.
pub fn counting_boundary() -> Boundary {
    Boundary::new(
        counting_create,
        counting_destroy,
        engine::schemabridge_validator_is_valid,
        counting_validate,
        counting_array_free,
    )
}

/// A boundary whose validate produces an array containing a null entry.
pub fn null_entry_boundary() -> Boundary {
    Boundary::new(
        counting_create,
        counting_destroy,
        engine::schemabridge_validator_is_valid,
        null_entry_validate,
        counting_array_free,
    )
}

/// Call-count snapshot for delta assertions.
pub struct Counters {
    create: usize,
    destroy: usize,
    validate: usize,
    array_free: usize,
}

impl Counters {
    pub fn snapshot() -> Self {
        Self {
            create: create_calls(),
            destroy: destroy_calls(),
            validate: validate_calls(),
            array_free: array_free_calls(),
        }
    }

    pub fn created_since(&self) -> usize {
        create_calls() - self.create
    }

    pub fn destroyed_since(&self) -> usize {
        destroy_calls() - self.destroy
    }

    pub fn validated_since(&self) -> usize {
        validate_calls() - self.validate
    }

    pub fn arrays_freed_since(&self) -> usize {
        array_free_calls() - self.array_free
    }
}
