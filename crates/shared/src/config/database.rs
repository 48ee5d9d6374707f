use anyhow::{Context, Result};
use sea_query::SqliteQueryBuilder;
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use tracing::info;

use crate::schema::transfer;

pub type ConnectionPool = Pool<Sqlite>;

pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn new_pool(
        connection_string: &str,
        max_connections: u32,
        run_migrations: bool,
    ) -> Result<ConnectionPool> {
        let options = SqliteConnectOptions::from_str(connection_string)
            .with_context(|| format!("Invalid database URL: {connection_string}"))?
            .create_if_missing(true);

        // Every in-memory SQLite connection is a separate database, so the
        // pool must hold exactly one connection that is never recycled.
        let pool_options = if is_in_memory(connection_string) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to connect to the database")?;

        info!("🗄️ Connected to database: {connection_string}");

        if run_migrations {
            Self::run_migrations(&pool).await?;
        }

        Ok(pool)
    }

    pub async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
        let sql = transfer::create_table().build(SqliteQueryBuilder);

        sqlx::query(&sql)
            .execute(pool)
            .await
            .context("Failed to create transfers table")?;

        info!("📐 Database schema is up to date");
        Ok(())
    }
}

fn is_in_memory(connection_string: &str) -> bool {
    connection_string.contains(":memory:") || connection_string.contains("mode=memory")
}
