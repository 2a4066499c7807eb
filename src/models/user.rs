use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// UserRecord represents one chat identity and its last-known profile fields
/// Maps to `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_photo_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Profile fields written by an upsert (without generated fields)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_photo_url: Option<String>,
}

impl UserProfile {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn profile_photo_url(mut self, url: Option<String>) -> Self {
        self.profile_photo_url = url;
        self
    }
}

impl UserRecord {
    pub fn has_profile_photo(&self) -> bool {
        self.profile_photo_url
            .as_deref()
            .is_some_and(|url| !url.is_empty())
    }

    /// True when the mutable fields equal those of `profile`
    pub fn matches_profile(&self, profile: &UserProfile) -> bool {
        self.user_id == profile.user_id
            && self.username == profile.username
            && self.first_name == profile.first_name
            && self.last_name == profile.last_name
            && self.profile_photo_url == profile.profile_photo_url
    }
}
