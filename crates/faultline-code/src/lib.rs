//! Application error codes and the policy built on them
//!
//! [`codes`] holds the fixed code table registered at startup. [`classify`]
//! buckets codes by status and category for logging, [`wrap`] offers
//! constructors bound to the table, and [`response`] turns any error chain
//! into the `{code, msg}` payload sent to API consumers.
//!
//! ```
//! use faultline_code::{ApiError, codes, wrap};
//! use http::StatusCode;
//!
//! let registry = codes::default_registry()?;
//! let err = wrap::wrap_database_error(Some("connection reset"), "query").unwrap();
//!
//! let response = ApiError::resolve(&registry, &err);
//! assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
//! assert_eq!(response.message, "Database error");
//! # Ok::<(), faultline_core::RegistryError>(())
//! ```

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod classify;
pub mod codes;
pub mod response;
pub mod wrap;

pub use classify::{
    Classifier, ErrorCategory, ErrorInfo, ErrorType, error_category, error_info, error_type, is_client_error,
    is_server_error,
};
pub use codes::{BootstrapError, build_registry, default_registry, install_defaults};
pub use faultline_core::{get_code, is_code};
pub use response::{ApiError, HttpError, report};
pub use wrap::*;
