use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::HygieneReminder;

/// (title, interval in hours, enabled)
const DEFAULT_REMINDERS: [(&str, u32, bool); 4] = [
    ("Change pad/tampon", 4, true),
    ("Drink water", 2, true),
    ("Take a break & stretch", 3, false),
    ("Wash hands after changing", 4, true),
];

/// Starter set seeded for a user with no reminders yet.
pub fn default_reminders(user_id: &str) -> Vec<HygieneReminder> {
    DEFAULT_REMINDERS
        .iter()
        .map(|&(title, interval, enabled)| HygieneReminder {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            interval,
            enabled,
            last_reminded: None,
        })
        .collect()
}

/// `None` if never fired, or if the next firing lies beyond chrono's range.
pub fn next_due(reminder: &HygieneReminder) -> Option<DateTime<Utc>> {
    reminder
        .last_reminded?
        .checked_add_signed(Duration::hours(i64::from(reminder.interval)))
}

/// Enabled reminders are due when never fired or once their interval has passed.
pub fn is_due(reminder: &HygieneReminder, now: DateTime<Utc>) -> bool {
    if !reminder.enabled {
        return false;
    }
    match reminder.last_reminded {
        None => true,
        Some(_) => next_due(reminder).map_or(false, |at| at <= now),
    }
}
