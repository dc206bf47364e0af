//! A small layered service used to produce realistic error chains
//!
//! The store fails with its own error type, the repository attaches
//! infrastructure codes, and the handler maps failures to HTTP codes the way
//! a request handler would.

use faultline_code::{codes, wrap};
use faultline_core::{Error, ResultExt, chain};

/// Low-level storage failure, foreign to faultline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("connection reset by peer")]
    ConnectionReset,

    #[error("row {0} not found")]
    RowNotFound(u64),
}

/// What the fake store should do on the next call
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Succeed,
    ResetConnection,
    MissingRow,
}

pub struct Store {
    pub behaviour: Behaviour,
}

impl Store {
    fn fetch(&self, id: u64) -> Result<String, StoreError> {
        match self.behaviour {
            Behaviour::Succeed => Ok(format!("order-{id}")),
            Behaviour::ResetConnection => Err(StoreError::ConnectionReset),
            Behaviour::MissingRow => Err(StoreError::RowNotFound(id)),
        }
    }
}

pub struct Repository {
    pub store: Store,
}

impl Repository {
    /// Attaches the database code to any store failure
    pub fn find_order(&self, id: u64) -> Result<String, Error> {
        self.store.fetch(id).wrap_with_code(codes::DATABASE, "database query failed")
    }
}

/// Request handler: maps repository failures to client-facing codes
pub fn get_order(repository: &Repository, id: u64) -> Result<String, Error> {
    repository.find_order(id).map_err(|err| {
        let missing = matches!(chain::find::<StoreError>(&err), Some(StoreError::RowNotFound(_)));

        if missing {
            wrap::wrap_not_found_error(Some(err), format!("order {id}"))
        } else {
            Error::annotate(err, format!("load order {id}"))
        }
    })
}

pub fn repository(behaviour: Behaviour) -> Repository {
    Repository {
        store: Store { behaviour },
    }
}
