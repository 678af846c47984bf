//! Error taxonomy for contact store operations.
//!
//! Every failure path returns before performing a partial mutation, so a
//! caller seeing one of these errors can assume the store is unchanged
//! (updates and deletes are all-or-nothing per record).

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by [`ContactStore`](crate::store::ContactStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A field failed validation (malformed email, empty required field).
    /// Raised before any store mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The email is already taken by another contact.
    #[error("a contact with email '{0}' already exists")]
    DuplicateEmail(String),

    /// No contact with the given id.
    #[error("contact {0} not found")]
    NotFound(i64),

    /// Store or connectivity failure. Propagated as-is, never retried.
    #[error("storage backend error: {0}")]
    Backend(#[from] sqlx::Error),
}
