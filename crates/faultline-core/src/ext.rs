//! Wrapping helpers that pass "no error" through untouched
//!
//! The free functions take an optional cause and return `None` for `None`,
//! so call sites can wrap unconditionally. [`ResultExt`] does the same for
//! `Result`: `Ok` values are returned as they are and message closures are
//! never evaluated for them.

use crate::{BoxError, Code, Error};

/// Wrap `cause` with context and a new stack snapshot
pub fn wrap<E: Into<BoxError>>(cause: Option<E>, message: impl Into<String>) -> Option<Error> {
    cause.map(|cause| Error::wrap(cause, message))
}

/// Wrap `cause` with context, without a stack snapshot
pub fn annotate<E: Into<BoxError>>(cause: Option<E>, message: impl Into<String>) -> Option<Error> {
    cause.map(|cause| Error::annotate(cause, message))
}

/// Wrap `cause` with a code and context
///
/// The code is dropped along with everything else when there is no cause;
/// use [`Error::with_code`] to originate a coded error instead.
pub fn wrap_with_code<E: Into<BoxError>>(cause: Option<E>, code: Code, message: impl Into<String>) -> Option<Error> {
    cause.map(|cause| Error::wrap_with_code(cause, code, message))
}

/// Context helpers for fallible results
pub trait ResultExt<T> {
    /// Wrap the error with context and a new stack snapshot
    fn wrap(self, message: impl Into<String>) -> Result<T, Error>;

    /// Like [`wrap`](ResultExt::wrap), building the message only on error
    fn wrap_with<M: Into<String>>(self, message: impl FnOnce() -> M) -> Result<T, Error>;

    /// Wrap the error with context, without a stack snapshot
    fn annotate(self, message: impl Into<String>) -> Result<T, Error>;

    /// Wrap the error with a code and context
    fn wrap_with_code(self, code: Code, message: impl Into<String>) -> Result<T, Error>;
}

impl<T, E: Into<BoxError>> ResultExt<T> for Result<T, E> {
    fn wrap(self, message: impl Into<String>) -> Result<T, Error> {
        self.map_err(|cause| Error::wrap(cause, message))
    }

    fn wrap_with<M: Into<String>>(self, message: impl FnOnce() -> M) -> Result<T, Error> {
        self.map_err(|cause| Error::wrap(cause, message()))
    }

    fn annotate(self, message: impl Into<String>) -> Result<T, Error> {
        self.map_err(|cause| Error::annotate(cause, message))
    }

    fn wrap_with_code(self, code: Code, message: impl Into<String>) -> Result<T, Error> {
        self.map_err(|cause| Error::wrap_with_code(cause, code, message))
    }
}
