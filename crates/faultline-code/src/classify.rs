//! Classification of error codes and chains
//!
//! Codes are bucketed by the HTTP status they are registered with, and known
//! codes are mapped to a coarse category so that logging and alerting can
//! route failures without re-deriving status logic.

use std::error::Error as StdError;

use faultline_core::{Code, Registry, Report, get_code, registry};
use serde::Serialize;

use crate::codes;

/// Who a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorType {
    /// Server-side failure; details stay internal
    Internal,
    /// Caller-facing failure; safe to describe to the client
    Business,
}

/// Coarse grouping of known codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    Database,
    Cache,
    MessageQueue,
    External,
    System,
    Auth,
    Permission,
    Validation,
    Business,
}

/// Snapshot of an error prepared for logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub category: ErrorCategory,
    pub code: Code,
    pub message: String,
    /// Verbose chain rendering; empty for business errors
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl ErrorInfo {
    pub fn is_internal(&self) -> bool {
        self.error_type == ErrorType::Internal
    }

    pub fn is_business(&self) -> bool {
        self.error_type == ErrorType::Business
    }
}

/// Classification against a specific registry
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'r> {
    registry: &'r Registry,
}

impl<'r> Classifier<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Classifier over the process-wide registry
    pub fn global() -> Classifier<'static> {
        Classifier::new(registry::global())
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Registered status is in `[400, 500)`
    pub fn is_client_error(&self, code: Code) -> bool {
        self.registry.http_status(code).is_client_error()
    }

    /// Registered status is 500 or above; unregistered codes count as server errors
    pub fn is_server_error(&self, code: Code) -> bool {
        self.registry.http_status(code).as_u16() >= 500
    }

    pub fn error_type(&self, code: Code) -> ErrorType {
        if self.is_server_error(code) {
            ErrorType::Internal
        } else {
            ErrorType::Business
        }
    }

    /// Classify an error chain
    ///
    /// Details are only filled in for internal errors, so business errors
    /// never carry internal state to whoever reads the info.
    pub fn error_info(&self, err: &(dyn StdError + 'static)) -> ErrorInfo {
        let code = get_code(err);
        let error_type = self.error_type(code);

        let details = match error_type {
            ErrorType::Internal => Report::new(err).to_string(),
            ErrorType::Business => String::new(),
        };

        ErrorInfo {
            error_type,
            category: error_category(code),
            code,
            message: err.to_string(),
            details,
        }
    }
}

/// Category of a code, independent of any registry
pub fn error_category(code: Code) -> ErrorCategory {
    match code {
        codes::DATABASE => ErrorCategory::Database,
        codes::CACHE => ErrorCategory::Cache,
        codes::MESSAGE_QUEUE => ErrorCategory::MessageQueue,
        codes::EXTERNAL_SERVICE => ErrorCategory::External,
        codes::VALIDATION | codes::BIND | codes::BAD_REQUEST => ErrorCategory::Validation,
        codes::UNAUTHORIZED
        | codes::TOKEN_INVALID
        | codes::EXPIRED
        | codes::INVALID_AUTH_HEADER
        | codes::MISSING_HEADER
        | codes::SIGNATURE_INVALID
        | codes::PASSWORD_INCORRECT => ErrorCategory::Auth,
        codes::FORBIDDEN
        | codes::PERMISSION_DENIED
        | codes::ACCOUNT_LOCKED
        | codes::ACCOUNT_DISABLED
        | codes::TOO_MANY_ATTEMPTS => ErrorCategory::Permission,
        100_300..100_400 => ErrorCategory::System,
        _ => ErrorCategory::Business,
    }
}

/// See [`Classifier::is_client_error`]; uses the global registry
pub fn is_client_error(code: Code) -> bool {
    Classifier::global().is_client_error(code)
}

/// See [`Classifier::is_server_error`]; uses the global registry
pub fn is_server_error(code: Code) -> bool {
    Classifier::global().is_server_error(code)
}

/// See [`Classifier::error_type`]; uses the global registry
pub fn error_type(code: Code) -> ErrorType {
    Classifier::global().error_type(code)
}

/// See [`Classifier::error_info`]; uses the global registry
pub fn error_info(err: &(dyn StdError + 'static)) -> ErrorInfo {
    Classifier::global().error_info(err)
}

#[cfg(test)]
mod tests {
    use faultline_core::Error;
    use http::StatusCode;

    use super::*;
    use crate::codes::default_registry;

    #[test]
    fn status_buckets() {
        let registry = Registry::new();
        registry.register(1, StatusCode::INTERNAL_SERVER_ERROR, "server").unwrap();
        registry.register(2, StatusCode::NOT_FOUND, "client").unwrap();
        registry.register(3, StatusCode::OK, "ok").unwrap();
        let classifier = Classifier::new(&registry);

        assert!(classifier.is_server_error(1));
        assert!(!classifier.is_client_error(1));
        assert!(classifier.is_client_error(2));
        assert!(!classifier.is_server_error(2));
        assert!(!classifier.is_client_error(3));
        assert!(!classifier.is_server_error(3));
    }

    #[test]
    fn unregistered_codes_are_server_errors() {
        let registry = Registry::new();
        let classifier = Classifier::new(&registry);

        assert!(classifier.is_server_error(123));
        assert_eq!(classifier.error_type(123), ErrorType::Internal);
        assert_eq!(classifier.error_type(0), ErrorType::Internal);
    }

    #[test]
    fn error_types_follow_status() {
        let registry = default_registry().unwrap();
        let classifier = Classifier::new(&registry);

        assert_eq!(classifier.error_type(codes::DATABASE), ErrorType::Internal);
        assert_eq!(classifier.error_type(codes::NOT_FOUND), ErrorType::Business);
        assert_eq!(classifier.error_type(codes::SUCCESS), ErrorType::Business);
    }

    #[test]
    fn categories() {
        assert_eq!(error_category(codes::DATABASE), ErrorCategory::Database);
        assert_eq!(error_category(codes::CACHE), ErrorCategory::Cache);
        assert_eq!(error_category(codes::MESSAGE_QUEUE), ErrorCategory::MessageQueue);
        assert_eq!(error_category(codes::EXTERNAL_SERVICE), ErrorCategory::External);
        assert_eq!(error_category(codes::BIND), ErrorCategory::Validation);
        assert_eq!(error_category(codes::EXPIRED), ErrorCategory::Auth);
        assert_eq!(error_category(codes::ACCOUNT_LOCKED), ErrorCategory::Permission);
        assert_eq!(error_category(codes::INVALID_YAML), ErrorCategory::System);
        assert_eq!(error_category(100_399), ErrorCategory::System);
        assert_eq!(error_category(codes::NOT_FOUND), ErrorCategory::Business);
        assert_eq!(error_category(0), ErrorCategory::Business);
    }

    #[test]
    fn category_names() {
        assert_eq!(ErrorCategory::MessageQueue.to_string(), "message_queue");
        assert_eq!(ErrorType::Internal.as_ref(), "internal");
    }

    #[test]
    fn business_info_hides_details() {
        let registry = default_registry().unwrap();
        let classifier = Classifier::new(&registry);
        let err = Error::wrap_with_code("missing field", codes::BAD_REQUEST, "bad request");

        let info = classifier.error_info(&err);
        assert!(info.is_business());
        assert_eq!(info.category, ErrorCategory::Validation);
        assert_eq!(info.code, codes::BAD_REQUEST);
        assert_eq!(info.message, "bad request: missing field");
        assert!(info.details.is_empty());
    }

    #[test]
    fn internal_info_keeps_details() {
        let registry = default_registry().unwrap();
        let classifier = Classifier::new(&registry);
        let err = Error::wrap_with_code(Error::new("disk full"), codes::INTERNAL_SERVER, "write failed");

        let info = classifier.error_info(&err);
        assert!(info.is_internal());
        assert!(info.details.contains("write failed: disk full"));
        assert!(info.details.contains("[100500] write failed"));
        assert!(info.details.contains("disk full"));
    }

    #[test]
    fn uncoded_chains_are_internal() {
        let registry = default_registry().unwrap();
        let info = Classifier::new(&registry).error_info(&Error::new("boom"));

        assert_eq!(info.code, 0);
        assert_eq!(info.error_type, ErrorType::Internal);
        assert_eq!(info.category, ErrorCategory::Business);
        assert!(!info.details.is_empty());
    }

    #[test]
    fn info_serialization_omits_empty_details() {
        let info = ErrorInfo {
            error_type: ErrorType::Business,
            category: ErrorCategory::Validation,
            code: codes::BAD_REQUEST,
            message: "bad request: missing field".to_owned(),
            details: String::new(),
        };

        insta::assert_json_snapshot!(info, @r#"
        {
          "type": "business",
          "category": "validation",
          "code": 100400,
          "message": "bad request: missing field"
        }
        "#);
    }
}
