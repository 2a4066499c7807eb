use proptest::prelude::*;
use user_registry::models::UserProfile;

/// Strategy for Telegram-style usernames
pub fn username_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-zA-Z][a-zA-Z0-9_]{4,31}")
}

/// Strategy for display names, including non-ASCII
pub fn name_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Za-zА-Яа-я .'-]{1,40}")
}

pub fn photo_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("photos/file_[0-9]{1,6}\\.jpg")
}

/// Strategy for generating UserProfile instances
pub fn user_profile_strategy() -> impl Strategy<Value = UserProfile> {
    (
        1i64..=i64::MAX,
        username_strategy(),
        name_strategy(),
        name_strategy(),
        photo_strategy(),
    )
        .prop_map(
            |(user_id, username, first_name, last_name, profile_photo_url)| UserProfile {
                user_id,
                username,
                first_name,
                last_name,
                profile_photo_url,
            },
        )
}
