//! In-memory [`ContactStore`] implementation for tests and embedded use.
//!
//! Keeps records in a `BTreeMap` behind `std::sync::RwLock`, so iteration
//! order is ascending id and `list`/`search` need no extra sorting. Search
//! is a lowercase substring scan over all records.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ContactPatch, NewContact};

use super::ContactStore;

#[derive(Default)]
struct Inner {
    contacts: BTreeMap<i64, Contact>,
    next_id: i64,
}

/// In-memory contact store.
#[derive(Default)]
pub struct MemoryContactStore {
    inner: RwLock<Inner>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn create(&self, new: &NewContact) -> StoreResult<Contact> {
        new.validate()?;
        let mut inner = self.inner.write().unwrap();
        if inner.contacts.values().any(|c| c.email == new.email) {
            return Err(StoreError::DuplicateEmail(new.email.clone()));
        }
        inner.next_id += 1;
        let contact = Contact {
            id: inner.next_id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            phone_number: new.phone_number.clone(),
            birthday: new.birthday,
            additional_info: new.additional_info.clone(),
        };
        inner.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn get(&self, id: i64) -> StoreResult<Contact> {
        let inner = self.inner.read().unwrap();
        inner
            .contacts
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self, skip: i64, limit: i64) -> StoreResult<Vec<Contact>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .contacts
            .values()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, patch: &ContactPatch) -> StoreResult<Contact> {
        patch.validate()?;
        let mut inner = self.inner.write().unwrap();
        let current = inner
            .contacts
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;

        let mut updated = current;
        patch.apply_to(&mut updated);

        if inner
            .contacts
            .values()
            .any(|c| c.id != id && c.email == updated.email)
        {
            return Err(StoreError::DuplicateEmail(updated.email));
        }

        inner.contacts.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner
            .contacts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        let needle = query.to_lowercase();
        let inner = self.inner.read().unwrap();
        Ok(inner
            .contacts
            .values()
            .filter(|c| {
                c.first_name.to_lowercase().contains(&needle)
                    || c.last_name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}
