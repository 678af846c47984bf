use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::Config;

/// Build a Postgres connection pool from the configured parameters.
///
/// The pool is the only process-wide store handle; it is constructed here
/// once and passed explicitly to whoever needs it.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let pg = &config.postgres;

    let options = PgConnectOptions::new()
        .host(&pg.host)
        .port(pg.port)
        .username(&pg.user)
        .password(&pg.password)
        .database(&pg.database);

    let pool = PgPoolOptions::new()
        .max_connections(pg.max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}
