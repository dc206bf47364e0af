//! Error code registry
//!
//! Maps numeric codes to the HTTP status and user-facing message returned to
//! API consumers. A registry is filled once during bootstrap and then only
//! read, from any number of threads. Reads share a lock; writes replace a
//! whole entry at a time, so a reader never observes a partial entry.

use std::{
    borrow::Cow,
    collections::HashMap,
    error::Error as StdError,
    sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use http::StatusCode;
use thiserror::Error;

use crate::{Code, chain};

/// Code reported when an error carries no usable code
pub const UNKNOWN_CODE: Code = 1;

/// Fallback returned by [`Registry::resolve`]
pub const UNKNOWN_CODER: Coder = Coder::from_static(UNKNOWN_CODE, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");

/// Status reported for codes that were never registered
pub const DEFAULT_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Registered metadata for one error code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coder {
    code: Code,
    status: StatusCode,
    message: Cow<'static, str>,
}

impl Coder {
    pub fn new(code: Code, status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            status,
            message: message.into(),
        }
    }

    pub const fn from_static(code: Code, status: StatusCode, message: &'static str) -> Self {
        Self {
            code,
            status,
            message: Cow::Borrowed(message),
        }
    }

    pub const fn code(&self) -> Code {
        self.code
    }

    pub const fn http_status(&self) -> StatusCode {
        self.status
    }

    /// Message safe to show to API consumers
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Registration failures
///
/// Both variants are programming errors in the code table; bootstrap should
/// refuse to serve traffic when it sees one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Code 0 means "no code" and cannot be registered
    #[error("error code 0 is reserved")]
    ReservedCode,

    /// Strict registration hit an existing entry
    #[error("error code {code} already registered")]
    Duplicate { code: Code },
}

/// Concurrent map from code to [`Coder`]
#[derive(Debug, Default)]
pub struct Registry {
    coders: RwLock<HashMap<Code, Coder>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new code
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ReservedCode`] for code 0 and
    /// [`RegistryError::Duplicate`] when the code is already registered
    pub fn register(
        &self,
        code: Code,
        status: StatusCode,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<(), RegistryError> {
        if code == 0 {
            return Err(RegistryError::ReservedCode);
        }

        let mut coders = self.write();

        if coders.contains_key(&code) {
            return Err(RegistryError::Duplicate { code });
        }

        coders.insert(code, Coder::new(code, status, message));
        tracing::trace!(code, status = status.as_u16(), "registered error code");

        Ok(())
    }

    /// Register a code, replacing any existing entry
    ///
    /// Returns the replaced entry, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ReservedCode`] for code 0
    pub fn register_overwrite(
        &self,
        code: Code,
        status: StatusCode,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<Option<Coder>, RegistryError> {
        if code == 0 {
            return Err(RegistryError::ReservedCode);
        }

        let previous = self.write().insert(code, Coder::new(code, status, message));

        if previous.is_some() {
            tracing::debug!(code, status = status.as_u16(), "replaced error code");
        }

        Ok(previous)
    }

    pub fn lookup(&self, code: Code) -> Option<Coder> {
        self.read().get(&code).cloned()
    }

    pub fn contains(&self, code: Code) -> bool {
        self.read().contains_key(&code)
    }

    /// Registered status for `code`, or [`DEFAULT_STATUS`] when unregistered
    pub fn http_status(&self, code: Code) -> StatusCode {
        self.read().get(&code).map_or(DEFAULT_STATUS, Coder::http_status)
    }

    /// Coder for the effective code of an error chain
    ///
    /// Falls back to [`UNKNOWN_CODER`] when the chain carries no code or its
    /// code is unregistered.
    pub fn resolve(&self, err: &(dyn StdError + 'static)) -> Coder {
        match chain::get_code(err) {
            0 => UNKNOWN_CODER,
            code => self.lookup(code).unwrap_or(UNKNOWN_CODER),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of every entry, ordered by code
    pub fn coders(&self) -> Vec<Coder> {
        let mut coders: Vec<Coder> = self.read().values().cloned().collect();
        coders.sort_by_key(Coder::code);
        coders
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Code, Coder>> {
        self.coders.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Code, Coder>> {
        self.coders.write().unwrap_or_else(PoisonError::into_inner)
    }
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Process-wide registry used by call sites without an injected one
pub fn global() -> &'static Registry {
    &GLOBAL
}
