//! Error responses for API consumers
//!
//! Whatever the shape of a chain, the boundary always produces a response:
//! chains without a code are reported as [`codes::INTERNAL_SERVER`].

use std::error::Error as StdError;

use faultline_core::{Code, Error, Registry, get_code, registry};
use http::StatusCode;
use serde::Serialize;

use crate::{
    classify::{Classifier, ErrorInfo, error_category},
    codes,
};

/// Errors that can be converted to HTTP responses
///
/// The transport layer turns these into actual responses, keeping error
/// values decoupled from any HTTP framework.
pub trait HttpError: StdError {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `validation`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

impl HttpError for Error {
    fn status_code(&self) -> StatusCode {
        registry::global().http_status(effective_code(self))
    }

    fn error_type(&self) -> &str {
        let name: &'static str = error_category(effective_code(self)).into();
        name
    }

    fn client_message(&self) -> String {
        ApiError::resolve(registry::global(), self).message
    }
}

/// Code reported for a chain, with uncoded chains mapped to [`codes::INTERNAL_SERVER`]
pub fn effective_code(err: &(dyn StdError + 'static)) -> Code {
    match get_code(err) {
        0 => codes::INTERNAL_SERVER,
        code => code,
    }
}

/// Response payload for a failed request
///
/// Serializes to `{"code": 100404, "msg": "Not found"}`; the status goes on
/// the response line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub code: Code,
    #[serde(rename = "msg")]
    pub message: String,
}

impl ApiError {
    /// Resolve the status and message for an error chain
    ///
    /// The message is the registered one when the code is known, so
    /// internal details only reach the client for unregistered codes.
    pub fn resolve(registry: &Registry, err: &(dyn StdError + 'static)) -> Self {
        let code = effective_code(err);

        let message = registry
            .lookup(code)
            .map_or_else(|| err.to_string(), |coder| coder.message().to_owned());

        Self {
            status: registry.http_status(code),
            code,
            message,
        }
    }

    /// Resolve against the registry and log the failure on the way out
    pub fn respond(registry: &Registry, err: &(dyn StdError + 'static)) -> Self {
        let response = Self::resolve(registry, err);
        report(&Classifier::new(registry).error_info(err));
        response
    }
}

/// Log a classified error at a severity matching who is at fault
///
/// Internal errors go out at `error` with the verbose chain, business
/// errors at `warn` without it.
pub fn report(info: &ErrorInfo) {
    if info.is_internal() {
        tracing::error!(
            code = info.code,
            category = %info.category,
            details = %info.details,
            "{}",
            info.message
        );
    } else {
        tracing::warn!(code = info.code, category = %info.category, "{}", info.message);
    }
}
