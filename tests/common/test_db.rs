//! Database helpers for `#[sqlx::test]` functions. Each test gets its own
//! freshly created database from `DATABASE_URL`, so tests start empty.

use sqlx::PgPool;
use user_registry::database::RegistryStore;

/// Store over the per-test pool with the users table in place
pub async fn connected_store(pool: PgPool) -> RegistryStore {
    let store = RegistryStore::from_pool(pool);
    store
        .connect()
        .await
        .expect("Failed to prepare registry schema");
    store
}
