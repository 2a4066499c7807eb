use parking_lot::RwLock;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::schema::{SchemaManager, USERS_TABLE};
use crate::config::DatabaseConfig;
use crate::error::{RegistryError, Result};
use crate::logging::{log_database_operation, log_error};
use crate::models::{UserProfile, UserRecord};

const USER_COLUMNS: &str =
    "id, user_id, username, first_name, last_name, profile_photo_url, created_at, updated_at";

/// Durable storage of [`UserRecord`]s keyed by `user_id`
///
/// Constructed once by the process entry point and shared behind an `Arc`.
/// The lock only guards the pool handle; data consistency for concurrent
/// upserts comes from the single `ON CONFLICT` statement.
pub struct RegistryStore {
    config: DatabaseConfig,
    pool: RwLock<Option<PgPool>>,
}

impl RegistryStore {
    /// Create an unconnected store; call [`RegistryStore::connect`] before use
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: RwLock::new(None),
        }
    }

    /// Wrap an already-open pool; [`RegistryStore::connect`] then only runs
    /// the schema step on it
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            config: DatabaseConfig::default(),
            pool: RwLock::new(Some(pool)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pool.read().is_some()
    }

    /// Establish the connection pool and ensure the users table exists
    ///
    /// Safe to call repeatedly: a second call reuses the existing pool and
    /// re-runs the idempotent schema step.
    pub async fn connect(&self) -> Result<()> {
        let existing = self.pool.read().clone();
        if let Some(pool) = existing {
            debug!("Registry store already connected, re-checking schema");
            SchemaManager::ensure_schema(&pool).await?;
            return Ok(());
        }

        let url = self.config.redacted_url();
        let pool = PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .min_connections(self.config.min_connections)
            .acquire_timeout(self.config.acquire_timeout())
            .connect(&self.config.url)
            .await
            .map_err(|source| {
                log_error(
                    "registry_store",
                    "connect",
                    &source.to_string(),
                    Some(url.as_str()),
                );
                RegistryError::Connection {
                    url: url.clone(),
                    source,
                }
            })?;

        info!(url = %url, "Database connection established");

        if let Err(err) = SchemaManager::ensure_schema(&pool).await {
            log_error("registry_store", "ensure_schema", &err.to_string(), None);
            pool.close().await;
            return Err(err);
        }

        let surplus = {
            let mut guard = self.pool.write();
            if guard.is_none() {
                *guard = Some(pool);
                None
            } else {
                Some(pool)
            }
        };
        if let Some(pool) = surplus {
            warn!("Concurrent connect detected, closing redundant pool");
            pool.close().await;
        }

        Ok(())
    }

    /// Release all pooled connections; no-op when never connected
    pub async fn disconnect(&self) {
        let pool = self.pool.write().take();
        if let Some(pool) = pool {
            pool.close().await;
            info!("Database connection closed");
        }
    }

    /// Insert a new user or merge the mutable fields of an existing one
    ///
    /// `created_at` is only written on insert; `updated_at` never moves
    /// backwards even if the database clock does.
    pub async fn upsert_user(&self, profile: &UserProfile) -> Result<()> {
        let pool = self.pool("upsert_user")?;
        let started = Instant::now();

        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO users (user_id, username, first_name, last_name, profile_photo_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET
                username = EXCLUDED.username,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                profile_photo_url = EXCLUDED.profile_photo_url,
                updated_at = GREATEST(NOW(), users.updated_at)
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.profile_photo_url)
        .fetch_one(&pool)
        .await
        .map_err(|source| self.storage_failure("upsert_user", Some(profile.user_id), source))?;

        log_database_operation(
            "upsert_user",
            Some(USERS_TABLE),
            Some(profile.user_id),
            if inserted { "inserted" } else { "updated" },
            Some(started.elapsed().as_millis() as u64),
            None,
        );
        info!(user_id = profile.user_id, inserted, "User added/updated");

        Ok(())
    }

    /// Fetch one user; `Ok(None)` when the id was never upserted
    pub async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        let pool = self.pool("get_user")?;
        let started = Instant::now();

        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&pool)
        .await
        .map_err(|source| self.storage_failure("get_user", Some(user_id), source))?;

        log_database_operation(
            "get_user",
            Some(USERS_TABLE),
            Some(user_id),
            if record.is_some() { "found" } else { "not_found" },
            Some(started.elapsed().as_millis() as u64),
            None,
        );

        Ok(record)
    }

    /// Every user in registration order
    pub async fn get_all_users(&self) -> Result<Vec<UserRecord>> {
        let pool = self.pool("get_all_users")?;
        let started = Instant::now();

        let records = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&pool)
        .await
        .map_err(|source| self.storage_failure("get_all_users", None, source))?;

        let details = format!("{} rows", records.len());
        log_database_operation(
            "get_all_users",
            Some(USERS_TABLE),
            None,
            "ok",
            Some(started.elapsed().as_millis() as u64),
            Some(details.as_str()),
        );

        Ok(records)
    }

    pub async fn count_users(&self) -> Result<i64> {
        let pool = self.pool("count_users")?;
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .map_err(|source| self.storage_failure("count_users", None, source))
    }

    pub async fn health_check(&self) -> Result<bool> {
        let pool = self.pool("health_check")?;
        let health = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&pool)
            .await
            .map_err(|source| self.storage_failure("health_check", None, source))?;
        Ok(health == 1)
    }

    fn pool(&self, operation: &'static str) -> Result<PgPool> {
        self.pool
            .read()
            .clone()
            .ok_or(RegistryError::NotConnected { operation })
    }

    fn storage_failure(
        &self,
        operation: &'static str,
        record_id: Option<i64>,
        source: sqlx::Error,
    ) -> RegistryError {
        log_database_operation(
            operation,
            Some(USERS_TABLE),
            record_id,
            "failed",
            None,
            Some(source.to_string().as_str()),
        );
        RegistryError::storage(operation, source)
    }
}
