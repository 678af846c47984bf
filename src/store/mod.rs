//! Storage abstraction for contact records.
//!
//! The [`ContactStore`] trait defines the repository operations the HTTP
//! layer and CLI consume, enabling pluggable backends (Postgres,
//! in-memory). It owns field validation and email uniqueness: every
//! mutating operation validates before touching persisted state.
//!
//! Implementations must be `Send + Sync` to work across async tasks.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{Contact, ContactPatch, NewContact};

/// Abstract contact repository.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`create`](ContactStore::create) | Validate, assign an id, persist |
/// | [`get`](ContactStore::get) | Fetch one record by id |
/// | [`list`](ContactStore::list) | Page through records in id order |
/// | [`update`](ContactStore::update) | Merge a partial patch, all-or-nothing |
/// | [`delete`](ContactStore::delete) | Remove a record permanently |
/// | [`search`](ContactStore::search) | Case-insensitive substring match |
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Validate and persist a new contact, assigning a fresh id.
    ///
    /// Fails with [`DuplicateEmail`](crate::error::StoreError::DuplicateEmail)
    /// when the email is already taken; nothing is written in that case.
    async fn create(&self, new: &NewContact) -> StoreResult<Contact>;

    /// Fetch a contact by id.
    async fn get(&self, id: i64) -> StoreResult<Contact>;

    /// List contacts in ascending-id order, offset by `skip`, capped at
    /// `limit`.
    async fn list(&self, skip: i64, limit: i64) -> StoreResult<Vec<Contact>>;

    /// Apply a partial update. Only fields present in the patch change;
    /// a changed email is re-validated for uniqueness. All-or-nothing.
    async fn update(&self, id: i64, patch: &ContactPatch) -> StoreResult<Contact>;

    /// Delete a contact permanently.
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Case-insensitive substring search across first name, last name,
    /// and email. Returns all matches in ascending-id order.
    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>>;
}
