//! Safe host-side bridge to the schemabridge validation engine.
//!
//! The engine is a native artifact with a flat, five-function C surface; it
//! owns every compiled schema and every error list it produces. This crate
//! is the other half of that contract:
//! - boundary signature definitions and an injectable function table
//!   ([`Boundary`])
//! - a handle lifecycle wrapper that releases the native handle exactly
//!   once, on drop or on explicit close
//! - an array decoder that copies native error strings out and releases the
//!   backing allocation without leaking or double-freeing
//! - the [`Validator`] facade exposing the two query operations
//!
//! # Example
//!
//! ```
//! use schemabridge::Validator;
//!
//! let schema = r#"{"properties":{"bar":{"type":"number"}}}"#;
//! let validator = Validator::new(schema)?;
//!
//! assert!(validator.is_valid(r#"{"bar":1}"#)?);
//! assert_eq!(
//!     validator.validate(r#"{"bar":"rusty"}"#)?,
//!     vec![r#"path "/bar": "rusty" is not of type "number""#.to_string()],
//! );
//! # Ok::<(), schemabridge::ValidatorError>(())
//! ```

mod boundary;
mod decode;
mod error;
mod handle;
mod validator;

pub use boundary::{
    ArrayFreeFn, Boundary, CheckFn, CompiledSchema, CreateFn, DestroyFn, ErrorArray, ValidateFn,
};
pub use error::{Result, ValidatorError};
pub use validator::{Validator, ValidatorBuilder};
