//! The fixed application code table
//!
//! Codes are part of the wire contract: a code that reaches a response body
//! must keep resolving to the same status and message across releases.

use std::sync::OnceLock;

use faultline_config::CodeOverride;
use faultline_core::{Code, Registry, RegistryError, registry};
use http::StatusCode;
use thiserror::Error;

// Basic (100001-100099)
pub const SUCCESS: Code = 100_001;
pub const UNKNOWN: Code = 100_002;
pub const BIND: Code = 100_003;
pub const VALIDATION: Code = 100_004;
pub const TOKEN_INVALID: Code = 100_005;

// Infrastructure (100101-100199)
pub const DATABASE: Code = 100_101;
pub const CACHE: Code = 100_102;
pub const MESSAGE_QUEUE: Code = 100_103;
pub const EXTERNAL_SERVICE: Code = 100_104;

// HTTP status aliases
pub const BAD_REQUEST: Code = 100_400;
pub const UNAUTHORIZED: Code = 100_401;
pub const FORBIDDEN: Code = 100_403;
pub const NOT_FOUND: Code = 100_404;
pub const INTERNAL_SERVER: Code = 100_500;

// Authentication and authorization (100201-100299)
pub const ENCRYPT: Code = 100_201;
pub const SIGNATURE_INVALID: Code = 100_202;
pub const EXPIRED: Code = 100_203;
pub const INVALID_AUTH_HEADER: Code = 100_204;
pub const MISSING_HEADER: Code = 100_205;
pub const PASSWORD_INCORRECT: Code = 100_206;
pub const PERMISSION_DENIED: Code = 100_207;
pub const ACCOUNT_LOCKED: Code = 100_208;
pub const ACCOUNT_DISABLED: Code = 100_209;
pub const TOO_MANY_ATTEMPTS: Code = 100_210;

// Encoding and decoding (100301-100399)
pub const ENCODING_FAILED: Code = 100_301;
pub const DECODING_FAILED: Code = 100_302;
pub const INVALID_JSON: Code = 100_303;
pub const ENCODING_JSON: Code = 100_304;
pub const DECODING_JSON: Code = 100_305;
pub const INVALID_YAML: Code = 100_306;
pub const ENCODING_YAML: Code = 100_307;
pub const DECODING_YAML: Code = 100_308;

/// One row of the initialization table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSpec {
    /// Constant name, as exported from this module
    pub name: &'static str,
    pub code: Code,
    pub status: StatusCode,
    pub message: &'static str,
}

const fn spec(name: &'static str, code: Code, status: StatusCode, message: &'static str) -> CodeSpec {
    CodeSpec {
        name,
        code,
        status,
        message,
    }
}

/// Every code registered at startup
pub const DEFAULT_CODES: &[CodeSpec] = &[
    spec("SUCCESS", SUCCESS, StatusCode::OK, "OK"),
    spec("UNKNOWN", UNKNOWN, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    spec("BIND", BIND, StatusCode::BAD_REQUEST, "Error binding request"),
    spec("VALIDATION", VALIDATION, StatusCode::BAD_REQUEST, "Validation failed"),
    spec("TOKEN_INVALID", TOKEN_INVALID, StatusCode::UNAUTHORIZED, "Token invalid"),
    spec("DATABASE", DATABASE, StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
    spec("CACHE", CACHE, StatusCode::INTERNAL_SERVER_ERROR, "Cache error"),
    spec("MESSAGE_QUEUE", MESSAGE_QUEUE, StatusCode::INTERNAL_SERVER_ERROR, "Message queue error"),
    spec("EXTERNAL_SERVICE", EXTERNAL_SERVICE, StatusCode::INTERNAL_SERVER_ERROR, "External service error"),
    spec("BAD_REQUEST", BAD_REQUEST, StatusCode::BAD_REQUEST, "Bad request"),
    spec("UNAUTHORIZED", UNAUTHORIZED, StatusCode::UNAUTHORIZED, "Unauthorized"),
    spec("FORBIDDEN", FORBIDDEN, StatusCode::FORBIDDEN, "Forbidden"),
    spec("NOT_FOUND", NOT_FOUND, StatusCode::NOT_FOUND, "Not found"),
    spec("INTERNAL_SERVER", INTERNAL_SERVER, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    spec("ENCRYPT", ENCRYPT, StatusCode::UNAUTHORIZED, "Encryption failed"),
    spec("SIGNATURE_INVALID", SIGNATURE_INVALID, StatusCode::UNAUTHORIZED, "Signature is invalid"),
    spec("EXPIRED", EXPIRED, StatusCode::UNAUTHORIZED, "Token expired"),
    spec("INVALID_AUTH_HEADER", INVALID_AUTH_HEADER, StatusCode::UNAUTHORIZED, "Invalid authorization header"),
    spec("MISSING_HEADER", MISSING_HEADER, StatusCode::UNAUTHORIZED, "Authorization header missing"),
    spec("PASSWORD_INCORRECT", PASSWORD_INCORRECT, StatusCode::UNAUTHORIZED, "Password incorrect"),
    spec("PERMISSION_DENIED", PERMISSION_DENIED, StatusCode::FORBIDDEN, "Permission denied"),
    spec("ACCOUNT_LOCKED", ACCOUNT_LOCKED, StatusCode::FORBIDDEN, "Account locked"),
    spec("ACCOUNT_DISABLED", ACCOUNT_DISABLED, StatusCode::FORBIDDEN, "Account disabled"),
    spec("TOO_MANY_ATTEMPTS", TOO_MANY_ATTEMPTS, StatusCode::FORBIDDEN, "Too many attempts"),
    spec("ENCODING_FAILED", ENCODING_FAILED, StatusCode::INTERNAL_SERVER_ERROR, "Encoding failed"),
    spec("DECODING_FAILED", DECODING_FAILED, StatusCode::INTERNAL_SERVER_ERROR, "Decoding failed"),
    spec("INVALID_JSON", INVALID_JSON, StatusCode::INTERNAL_SERVER_ERROR, "Invalid JSON"),
    spec("ENCODING_JSON", ENCODING_JSON, StatusCode::INTERNAL_SERVER_ERROR, "JSON encoding failed"),
    spec("DECODING_JSON", DECODING_JSON, StatusCode::INTERNAL_SERVER_ERROR, "JSON decoding failed"),
    spec("INVALID_YAML", INVALID_YAML, StatusCode::INTERNAL_SERVER_ERROR, "Invalid YAML"),
    spec("ENCODING_YAML", ENCODING_YAML, StatusCode::INTERNAL_SERVER_ERROR, "YAML encoding failed"),
    spec("DECODING_YAML", DECODING_YAML, StatusCode::INTERNAL_SERVER_ERROR, "YAML decoding failed"),
];

/// Table row for a fixed code
pub fn spec_for(code: Code) -> Option<&'static CodeSpec> {
    DEFAULT_CODES.iter().find(|spec| spec.code == code)
}

/// Errors raised while building a registry at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configured override with a status outside 100-999
    #[error("invalid HTTP status {status} for error code {code}")]
    InvalidStatus { code: Code, status: u16 },
}

/// Register every fixed code with strict registration
///
/// # Errors
///
/// Fails on the first code that is zero or already present in `registry`
pub fn register_defaults(registry: &Registry) -> Result<(), RegistryError> {
    for spec in DEFAULT_CODES {
        registry.register(spec.code, spec.status, spec.message)?;
    }

    tracing::debug!(count = DEFAULT_CODES.len(), "registered default error codes");
    Ok(())
}

/// Fresh registry holding the fixed code table
///
/// # Errors
///
/// Fails when the table itself contains a zero or duplicate code
pub fn default_registry() -> Result<Registry, RegistryError> {
    let registry = Registry::new();
    register_defaults(&registry)?;
    Ok(registry)
}

/// Fixed code table with configured overrides layered on top
///
/// Overrides replace the status and message of existing codes or add new
/// codes; they never fail on collisions.
///
/// # Errors
///
/// Fails on a zero code or an invalid HTTP status in the table or overrides
pub fn build_registry(overrides: &[CodeOverride]) -> Result<Registry, BootstrapError> {
    let registry = default_registry()?;

    for entry in overrides {
        let status = StatusCode::from_u16(entry.status).map_err(|_| BootstrapError::InvalidStatus {
            code: entry.code,
            status: entry.status,
        })?;

        let previous = registry.register_overwrite(entry.code, status, entry.message.clone())?;

        tracing::info!(
            code = entry.code,
            status = entry.status,
            replaced = previous.is_some(),
            "applied error code override"
        );
    }

    Ok(registry)
}

/// Populate the global registry with the fixed code table
///
/// Runs the registration once per process; later calls return the first
/// outcome.
///
/// # Errors
///
/// Fails when the global registry already held one of the fixed codes
/// before the first call
pub fn install_defaults() -> Result<(), RegistryError> {
    static INSTALLED: OnceLock<Result<(), RegistryError>> = OnceLock::new();

    INSTALLED.get_or_init(|| register_defaults(registry::global())).clone()
}
