//! # Schema Management
//!
//! Idempotent creation of the `users` table. There is no versioned
//! migration history: every process start runs the same statements, and
//! each of them is a no-op against an already-initialized database.
//!
//! ## Concurrency Control
//!
//! `CREATE TABLE IF NOT EXISTS` is not race-free in PostgreSQL when two
//! sessions run it at the same moment (both can pass the existence check and
//! one then fails on the catalog unique index). Schema creation therefore
//! runs in one transaction holding a transaction-scoped advisory lock:
//!
//! ```sql
//! SELECT pg_advisory_xact_lock(7318946052214729801)
//! ```

use sqlx::{PgExecutor, PgPool};
use tracing::{debug, info};

use crate::error::{RegistryError, Result};

pub const USERS_TABLE: &str = "users";

/// Advisory lock key serializing schema creation across processes
const SCHEMA_LOCK_KEY: i64 = 7_318_946_052_214_729_801;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        user_id BIGINT UNIQUE NOT NULL,
        username VARCHAR(255),
        first_name VARCHAR(255),
        last_name VARCHAR(255),
        profile_photo_url TEXT,
        created_at TIMESTAMP WITHOUT TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITHOUT TIME ZONE NOT NULL DEFAULT NOW()
    )
"#;

/// Tables created before photo tracking lack this column
const ADD_PROFILE_PHOTO_COLUMN: &str =
    "ALTER TABLE users ADD COLUMN IF NOT EXISTS profile_photo_url TEXT";

const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS index_users_on_created_at ON users (created_at, id)";

pub struct SchemaManager;

impl SchemaManager {
    /// Create the users table and its index if absent
    ///
    /// Returns `true` when this call created the table.
    pub async fn ensure_schema(pool: &PgPool) -> Result<bool> {
        let mut tx = pool.begin().await.map_err(RegistryError::Schema)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(RegistryError::Schema)?;

        let existed = Self::table_exists(&mut *tx).await?;

        for statement in [
            CREATE_USERS_TABLE,
            ADD_PROFILE_PHOTO_COLUMN,
            CREATE_CREATED_AT_INDEX,
        ] {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(RegistryError::Schema)?;
        }

        tx.commit().await.map_err(RegistryError::Schema)?;

        if existed {
            debug!(table = USERS_TABLE, "Users table already exists");
        } else {
            info!(table = USERS_TABLE, "Created users table");
        }
        Ok(!existed)
    }

    /// Check whether the users table exists in the current schema
    pub async fn table_exists<'e, E>(executor: E) -> Result<bool>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT FROM information_schema.tables WHERE table_schema = current_schema() AND table_name = $1)",
        )
        .bind(USERS_TABLE)
        .fetch_one(executor)
        .await
        .map_err(RegistryError::Schema)
    }
}
