//! # User Registry Trait
//!
//! The surface the interaction handler needs from storage. [`RegistryStore`]
//! is the production implementation; tests plug in an in-memory one.

use async_trait::async_trait;

use crate::database::RegistryStore;
use crate::error::Result;
use crate::models::{UserProfile, UserRecord};

#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Insert or merge the profile, keyed by `profile.user_id`
    async fn upsert_user(&self, profile: &UserProfile) -> Result<()>;

    /// `Ok(None)` when the user has never been seen
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>>;

    /// All users ordered by registration time
    async fn get_all_users(&self) -> Result<Vec<UserRecord>>;
}

#[async_trait]
impl UserRegistry for RegistryStore {
    async fn upsert_user(&self, profile: &UserProfile) -> Result<()> {
        RegistryStore::upsert_user(self, profile).await
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        RegistryStore::get_user(self, user_id).await
    }

    async fn get_all_users(&self) -> Result<Vec<UserRecord>> {
        RegistryStore::get_all_users(self).await
    }
}
