use crate::core::{BoundParam, PartnerQuery};
use crate::services::registry::{PartnerRegistry, PartnerRow, RegistryError};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// PostgreSQL-backed partner registry
///
/// Expects the `partners` table and the `get_distance` function created by
/// the migrations in `./migrations`.
pub struct PostgresRegistry {
    pool: PgPool,
}

impl PostgresRegistry {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool from settings, optionally running migrations
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
        run_migrations: bool,
    ) -> Result<Self, RegistryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        if run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl PartnerRegistry for PostgresRegistry {
    async fn fetch(&self, query: &PartnerQuery) -> Result<Vec<PartnerRow>, RegistryError> {
        let sql = query.sql();
        tracing::debug!("Executing partner query: {}", sql);

        let mut statement = sqlx::query_as::<_, PartnerRow>(&sql);
        for param in query.params() {
            statement = match param {
                BoundParam::SmallInt(value) => statement.bind(value),
                BoundParam::Double(value) => statement.bind(value),
            };
        }

        let rows = statement.fetch_all(&self.pool).await?;

        tracing::debug!("Partner query returned {} rows", rows.len());

        Ok(rows)
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}
