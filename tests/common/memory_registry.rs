//! In-memory [`UserRegistry`] with the same merge semantics as the
//! PostgreSQL store, for exercising the interaction handler.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use user_registry::models::{UserProfile, UserRecord};
use user_registry::registry::UserRegistry;
use user_registry::{RegistryError, Result};

#[derive(Default)]
pub struct MemoryRegistry {
    records: Mutex<Vec<UserRecord>>,
    upserts: AtomicUsize,
    fail_reads: bool,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose reads fail like a lost database connection
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }
}

#[async_trait]
impl UserRegistry for MemoryRegistry {
    async fn upsert_user(&self, profile: &UserProfile) -> Result<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        let now = chrono::Utc::now().naive_utc();
        let mut records = self.records.lock();

        if let Some(existing) = records.iter_mut().find(|r| r.user_id == profile.user_id) {
            existing.username = profile.username.clone();
            existing.first_name = profile.first_name.clone();
            existing.last_name = profile.last_name.clone();
            existing.profile_photo_url = profile.profile_photo_url.clone();
            existing.updated_at = existing.updated_at.max(now);
        } else {
            let id = records.len() as i32 + 1;
            records.push(UserRecord {
                id,
                user_id: profile.user_id,
                username: profile.username.clone(),
                first_name: profile.first_name.clone(),
                last_name: profile.last_name.clone(),
                profile_photo_url: profile.profile_photo_url.clone(),
                created_at: now,
                updated_at: now,
            });
        }
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        if self.fail_reads {
            return Err(RegistryError::storage("get_user", sqlx::Error::PoolClosed));
        }
        Ok(self
            .records
            .lock()
            .iter()
            .find(|r| r.user_id == user_id)
            .cloned())
    }

    async fn get_all_users(&self) -> Result<Vec<UserRecord>> {
        if self.fail_reads {
            return Err(RegistryError::storage(
                "get_all_users",
                sqlx::Error::PoolClosed,
            ));
        }
        Ok(self.records.lock().clone())
    }
}
