//! Error chains, stack snapshots, and the error code registry
//!
//! Failures are described by [`Error`] nodes. A node owns the error it
//! wraps, so a chain records the path a failure took through the layers of
//! a service, outermost context first. Nodes may carry a numeric code; the
//! [`Registry`] turns codes into the HTTP status and message sent to API
//! consumers.
//!
//! ```
//! use faultline_core::{Error, Registry, ResultExt};
//! use http::StatusCode;
//!
//! let registry = Registry::new();
//! registry.register(100101, StatusCode::INTERNAL_SERVER_ERROR, "Database error")?;
//!
//! let query: Result<(), std::io::Error> = Err(std::io::Error::other("connection reset"));
//! let err = query.wrap_with_code(100101, "database query failed").unwrap_err();
//!
//! assert_eq!(err.message(), "database query failed: connection reset");
//! assert_eq!(registry.http_status(err.code()), StatusCode::INTERNAL_SERVER_ERROR);
//! # Ok::<(), faultline_core::RegistryError>(())
//! ```

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod chain;
mod error;
mod ext;
pub mod registry;
mod report;
pub mod stack;

pub use chain::{Chain, get_code, is_code};
pub use error::{BoxError, Cause, Error};
pub use ext::{ResultExt, annotate, wrap, wrap_with_code};
pub use registry::{Coder, Registry, RegistryError, UNKNOWN_CODER};
pub use report::Report;
pub use stack::{Stack, StackFrame};

/// Numeric error code; 0 means "no code"
pub type Code = u32;
