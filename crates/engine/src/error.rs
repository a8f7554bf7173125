//! The module contains the error the ledger can throw.
//!
//! Only storage I/O surfaces here: validation failures and stale record
//! references are reported as ordinary values by the engine, never as errors.

use sea_orm::DbErr;
use thiserror::Error;

/// Failures initializing, reading, or writing the durable relation.
///
/// Propagated to the caller of the operation that hit them; nothing is
/// retried locally.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("schema initialization failed: {0}")]
    Initialize(#[source] DbErr),
    #[error(transparent)]
    Database(#[from] DbErr),
}
