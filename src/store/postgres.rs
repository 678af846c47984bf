//! Postgres-backed [`ContactStore`] implementation.
//!
//! One statement per operation; partial updates read, merge, and write
//! inside a single transaction so a failed validation or conflict leaves
//! the row untouched. Email uniqueness is enforced by the unique index
//! created in [`migrate`](crate::migrate) — a violation surfaces as
//! [`StoreError::DuplicateEmail`], never as a partial write.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ContactPatch, NewContact};

use super::ContactStore;

const CONTACT_COLUMNS: &str =
    "id, first_name, last_name, email, phone_number, birthday, additional_info";

/// Contact store backed by a `sqlx` Postgres pool.
///
/// The pool is constructed once at startup ([`db::connect`](crate::db::connect))
/// and handed in explicitly; each operation checks a connection out of the
/// pool for its duration and returns it unconditionally.
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn contact_from_row(row: &PgRow) -> Contact {
    Contact {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone_number: row.get("phone_number"),
        birthday: row.get("birthday"),
        additional_info: row.get("additional_info"),
    }
}

/// Map a unique-index violation on `email` to [`StoreError::DuplicateEmail`];
/// pass every other database error through untouched.
fn map_email_conflict(email: &str, err: sqlx::Error) -> StoreError {
    let unique = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if unique {
        StoreError::DuplicateEmail(email.to_string())
    } else {
        StoreError::Backend(err)
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn create(&self, new: &NewContact) -> StoreResult<Contact> {
        new.validate()?;
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO contacts (first_name, last_name, email, phone_number, birthday, additional_info)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CONTACT_COLUMNS
        ))
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone_number)
        .bind(new.birthday)
        .bind(&new.additional_info)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_email_conflict(&new.email, e))?;

        Ok(contact_from_row(&row))
    }

    async fn get(&self, id: i64) -> StoreResult<Contact> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM contacts WHERE id = $1",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| contact_from_row(&r))
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self, skip: i64, limit: i64) -> StoreResult<Vec<Contact>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM contacts ORDER BY id ASC OFFSET $1 LIMIT $2",
            CONTACT_COLUMNS
        ))
        .bind(skip.max(0))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(contact_from_row).collect())
    }

    async fn update(&self, id: i64, patch: &ContactPatch) -> StoreResult<Contact> {
        patch.validate()?;
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM contacts WHERE id = $1",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut contact = row
            .map(|r| contact_from_row(&r))
            .ok_or(StoreError::NotFound(id))?;
        patch.apply_to(&mut contact);

        sqlx::query(
            r#"
            UPDATE contacts
            SET first_name = $1, last_name = $2, email = $3,
                phone_number = $4, birthday = $5, additional_info = $6
            WHERE id = $7
            "#,
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone_number)
        .bind(contact.birthday)
        .bind(&contact.additional_info)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_email_conflict(&contact.email, e))?;

        tx.commit().await?;
        Ok(contact)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        let pattern = format!("%{}%", query);
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM contacts
            WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1
            ORDER BY id ASC
            "#,
            CONTACT_COLUMNS
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(contact_from_row).collect())
    }
}
