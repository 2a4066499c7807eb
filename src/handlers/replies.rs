//! Reply text rendering. Pure functions so the wording can be tested
//! without a transport or a database.

use chrono::NaiveDateTime;

use crate::models::{UserProfile, UserRecord};

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

pub const HELP_TEXT: &str = "\
Available commands:
/start - Start working with the bot
/help - Show this message
/myinfo - Show your information from the database
/stats - Show user statistics (developer only)";

pub const NOT_FOUND_TEXT: &str =
    "No information about you was found in the database. Use /start";

pub const FAILURE_TEXT: &str = "Sorry, something went wrong. Please try again later.";

pub fn greeting(profile: &UserProfile) -> String {
    let photo_text = if profile.profile_photo_url.is_some() {
        "profile with photo"
    } else {
        "profile without photo"
    };
    format!(
        "Hello, {}! I saved your information to the database ({photo_text}).\nYour ID: {}",
        display_first_name(profile),
        profile.user_id
    )
}

pub fn message_ack(profile: &UserProfile) -> String {
    format!(
        "Hello, {}! I received your message and updated your information in the database.",
        display_first_name(profile)
    )
}

pub fn user_info(record: Option<&UserRecord>) -> String {
    let Some(record) = record else {
        return NOT_FOUND_TEXT.to_string();
    };

    let photo = match record.profile_photo_url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => "not set",
    };

    format!(
        "Your information in the database:\n\
         ID: {}\n\
         Username: @{}\n\
         First name: {}\n\
         Last name: {}\n\
         Profile photo: {}\n\
         Registered: {}\n\
         Updated: {}",
        record.user_id,
        record.username.as_deref().unwrap_or("not set"),
        record.first_name.as_deref().unwrap_or("not set"),
        record.last_name.as_deref().unwrap_or("not set"),
        photo,
        format_timestamp(&record.created_at),
        format_timestamp(&record.updated_at),
    )
}

pub fn stats(records: &[UserRecord]) -> String {
    let with_photo = records.iter().filter(|r| r.has_profile_photo()).count();
    format!(
        "Total users in the database: {}\nUsers with a profile photo: {with_photo}",
        records.len()
    )
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn display_first_name(profile: &UserProfile) -> &str {
    profile
        .first_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("there")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn record(user_id: i64, photo: Option<&str>) -> UserRecord {
        UserRecord {
            id: user_id as i32,
            user_id,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
            profile_photo_url: photo.map(str::to_string),
            created_at: ts(1, 9, 5),
            updated_at: ts(2, 18, 45),
        }
    }

    #[test]
    fn test_greeting_mentions_photo_state() {
        let profile = UserProfile::new(42).first_name("Alice");
        assert_eq!(
            greeting(&profile),
            "Hello, Alice! I saved your information to the database (profile without photo).\nYour ID: 42"
        );

        let with_photo = profile.profile_photo_url(Some("photos/file_0.jpg".to_string()));
        assert!(greeting(&with_photo).contains("(profile with photo)"));
    }

    #[test]
    fn test_missing_first_name_falls_back() {
        assert!(message_ack(&UserProfile::new(7)).starts_with("Hello, there!"));
    }

    #[test]
    fn test_user_info_found() {
        let text = user_info(Some(&record(42, None)));
        assert!(text.contains("ID: 42"));
        assert!(text.contains("Username: @alice"));
        assert!(text.contains("Last name: not set"));
        assert!(text.contains("Profile photo: not set"));
        assert!(text.contains("Registered: 01.03.2024 09:05"));
        assert!(text.contains("Updated: 02.03.2024 18:45"));
    }

    #[test]
    fn test_user_info_not_found() {
        assert_eq!(user_info(None), NOT_FOUND_TEXT);
    }

    #[test]
    fn test_stats_counts_photos() {
        let records = vec![
            record(1, Some("photos/a.jpg")),
            record(2, None),
            record(3, Some("")),
            record(4, Some("photos/b.jpg")),
        ];
        assert_eq!(
            stats(&records),
            "Total users in the database: 4\nUsers with a profile photo: 2"
        );
        assert_eq!(
            stats(&[]),
            "Total users in the database: 0\nUsers with a profile photo: 0"
        );
    }
}
