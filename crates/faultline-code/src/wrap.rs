//! Constructors and wrappers bound to the fixed code table
//!
//! Two wrapping families exist with different contracts:
//!
//! - infrastructure wrappers (`wrap_database_error` and friends) pass "no
//!   error" through, so data-access code can wrap unconditionally;
//! - HTTP wrappers (`wrap_bad_request_error` and friends) always produce an
//!   error, creating a fresh coded root when there is nothing to wrap.

use faultline_core::{BoxError, Code, Error};

use crate::codes;

/// Coded root error
pub fn new_error(code: Code, message: impl Into<String>) -> Error {
    Error::with_code(code, message)
}

pub fn new_validation_error(field: &str, message: &str) -> Error {
    Error::with_code(codes::VALIDATION, format!("validation failed for field {field}: {message}"))
}

pub fn new_permission_denied_error(resource: &str, action: &str) -> Error {
    Error::with_code(
        codes::PERMISSION_DENIED,
        format!("permission denied for {action} on {resource}"),
    )
}

pub fn new_token_invalid_error() -> Error {
    Error::with_code(codes::TOKEN_INVALID, "token is invalid")
}

pub fn new_token_expired_error() -> Error {
    Error::with_code(codes::EXPIRED, "token is expired")
}

pub fn new_unauthorized_error() -> Error {
    Error::with_code(codes::UNAUTHORIZED, "unauthorized")
}

pub fn new_forbidden_error() -> Error {
    Error::with_code(codes::FORBIDDEN, "forbidden")
}

pub fn new_not_found_error(resource: &str) -> Error {
    Error::with_code(codes::NOT_FOUND, format!("{resource} not found"))
}

pub fn new_bad_request_error(message: &str) -> Error {
    Error::with_code(codes::BAD_REQUEST, format!("bad request: {message}"))
}

fn wrap_if_error<E: Into<BoxError>>(err: Option<E>, code: Code, message: impl FnOnce() -> String) -> Option<Error> {
    err.map(|cause| Error::wrap_with_code(cause, code, message()))
}

/// Attach [`codes::DATABASE`] to a failed database operation
pub fn wrap_database_error<E: Into<BoxError>>(err: Option<E>, operation: &str) -> Option<Error> {
    wrap_if_error(err, codes::DATABASE, || format!("database {operation} failed"))
}

/// Attach [`codes::CACHE`] to a failed cache operation
pub fn wrap_cache_error<E: Into<BoxError>>(err: Option<E>, operation: &str) -> Option<Error> {
    wrap_if_error(err, codes::CACHE, || format!("cache {operation} failed"))
}

/// Attach [`codes::MESSAGE_QUEUE`] to a failed publish or consume
pub fn wrap_queue_error<E: Into<BoxError>>(err: Option<E>, operation: &str) -> Option<Error> {
    wrap_if_error(err, codes::MESSAGE_QUEUE, || format!("message queue {operation} failed"))
}

/// Attach [`codes::EXTERNAL_SERVICE`] to a failed call to another service
pub fn wrap_external_error<E: Into<BoxError>>(err: Option<E>, service: &str, operation: &str) -> Option<Error> {
    wrap_if_error(err, codes::EXTERNAL_SERVICE, || {
        format!("external service {service} {operation} failed")
    })
}

/// Wrap `err` with `code`, or create a coded root when there is no error
pub fn wrap_error<E: Into<BoxError>>(err: Option<E>, code: Code, message: impl Into<String>) -> Error {
    match err {
        Some(cause) => Error::wrap_with_code(cause, code, message),
        None => Error::with_code(code, message),
    }
}

pub fn wrap_bad_request_error<E: Into<BoxError>>(err: Option<E>, message: impl Into<String>) -> Error {
    wrap_error(err, codes::BAD_REQUEST, message)
}

pub fn wrap_unauthorized_error<E: Into<BoxError>>(err: Option<E>, message: impl Into<String>) -> Error {
    wrap_error(err, codes::UNAUTHORIZED, message)
}

pub fn wrap_forbidden_error<E: Into<BoxError>>(err: Option<E>, message: impl Into<String>) -> Error {
    wrap_error(err, codes::FORBIDDEN, message)
}

pub fn wrap_not_found_error<E: Into<BoxError>>(err: Option<E>, message: impl Into<String>) -> Error {
    wrap_error(err, codes::NOT_FOUND, message)
}

pub fn wrap_internal_server_error<E: Into<BoxError>>(err: Option<E>, message: impl Into<String>) -> Error {
    wrap_error(err, codes::INTERNAL_SERVER, message)
}

/// Request body or parameters could not be bound
pub fn wrap_bind_error<E: Into<BoxError>>(err: Option<E>, message: impl Into<String>) -> Error {
    wrap_error(err, codes::BIND, message)
}

pub fn wrap_validation_error<E: Into<BoxError>>(err: Option<E>, message: impl Into<String>) -> Error {
    wrap_error(err, codes::VALIDATION, message)
}
