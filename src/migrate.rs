use anyhow::Result;
use sqlx::PgPool;

/// Provision the contact-book schema.
///
/// Idempotent: every statement is `IF NOT EXISTS`, so `rolo init` (and the
/// pre-serve provisioning step) can run any number of times. Provisioning
/// is always an explicit call — never a load-time side effect.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            birthday DATE NOT NULL,
            additional_info TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Email uniqueness is the store-boundary invariant; duplicate inserts
    // must fail here even if a caller skipped the application-level check.
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_contacts_email ON contacts(email)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_contacts_name ON contacts(last_name, first_name)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
