use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{duplicate_date_message, Store, StoreError, StoreResult};
use crate::models::{ChatMessage, HygieneReminder, PeriodLog, Profile};

#[derive(Default)]
struct Tables {
    profiles: HashMap<String, Profile>,
    period_logs: Vec<PeriodLog>,
    reminders: Vec<HygieneReminder>,
    reminder_owners: HashSet<String>,
    chat: Vec<ChatMessage>,
}

/// Process-local store. Everything is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn date_taken(logs: &[PeriodLog], candidate: &PeriodLog) -> bool {
    logs.iter().any(|l| {
        l.id != candidate.id && l.user_id == candidate.user_id && l.date == candidate.date
    })
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(user_id).cloned())
    }

    async fn upsert_profile(&self, profile: Profile) -> StoreResult<Profile> {
        let mut tables = self.tables.write().await;
        tables.profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn list_period_logs(&self, user_id: &str) -> StoreResult<Vec<PeriodLog>> {
        let tables = self.tables.read().await;
        let mut logs: Vec<PeriodLog> = tables
            .period_logs
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(logs)
    }

    async fn get_period_log(&self, id: Uuid) -> StoreResult<Option<PeriodLog>> {
        let tables = self.tables.read().await;
        Ok(tables.period_logs.iter().find(|l| l.id == id).cloned())
    }

    async fn insert_period_log(&self, log: PeriodLog) -> StoreResult<PeriodLog> {
        let mut tables = self.tables.write().await;
        if date_taken(&tables.period_logs, &log) {
            return Err(StoreError::Conflict(duplicate_date_message(&log)));
        }
        tables.period_logs.push(log.clone());
        Ok(log)
    }

    async fn update_period_log(&self, log: PeriodLog) -> StoreResult<Option<PeriodLog>> {
        let mut tables = self.tables.write().await;
        if date_taken(&tables.period_logs, &log) {
            return Err(StoreError::Conflict(duplicate_date_message(&log)));
        }
        match tables.period_logs.iter_mut().find(|l| l.id == log.id) {
            Some(slot) => {
                *slot = log.clone();
                Ok(Some(log))
            }
            None => Ok(None),
        }
    }

    async fn delete_period_log(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.period_logs.len();
        tables.period_logs.retain(|l| l.id != id);
        Ok(tables.period_logs.len() < before)
    }

    async fn list_reminders(&self, user_id: &str) -> StoreResult<Vec<HygieneReminder>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reminders
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_reminder(&self, id: Uuid) -> StoreResult<Option<HygieneReminder>> {
        let tables = self.tables.read().await;
        Ok(tables.reminders.iter().find(|r| r.id == id).cloned())
    }

    async fn seed_reminders(
        &self,
        user_id: &str,
        defaults: Vec<HygieneReminder>,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.reminder_owners.insert(user_id.to_string()) {
            return Ok(false);
        }
        tables.reminders.extend(defaults);
        Ok(true)
    }

    async fn insert_reminder(&self, reminder: HygieneReminder) -> StoreResult<HygieneReminder> {
        let mut tables = self.tables.write().await;
        tables.reminder_owners.insert(reminder.user_id.clone());
        tables.reminders.push(reminder.clone());
        Ok(reminder)
    }

    async fn update_reminder(
        &self,
        reminder: HygieneReminder,
    ) -> StoreResult<Option<HygieneReminder>> {
        let mut tables = self.tables.write().await;
        match tables.reminders.iter_mut().find(|r| r.id == reminder.id) {
            Some(slot) => {
                *slot = reminder.clone();
                Ok(Some(reminder))
            }
            None => Ok(None),
        }
    }

    async fn delete_reminder(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.reminders.len();
        tables.reminders.retain(|r| r.id != id);
        Ok(tables.reminders.len() < before)
    }

    async fn chat_history(&self, user_id: &str) -> StoreResult<Vec<ChatMessage>> {
        let tables = self.tables.read().await;
        let mut history: Vec<ChatMessage> = tables
            .chat
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        history.sort_by_key(|m| m.timestamp);
        Ok(history)
    }

    async fn append_chat_message(&self, message: ChatMessage) -> StoreResult<ChatMessage> {
        self.tables.write().await.chat.push(message.clone());
        Ok(message)
    }

    async fn clear_chat_history(&self, user_id: &str) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.chat.len();
        tables.chat.retain(|m| m.user_id != user_id);
        Ok((before - tables.chat.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flow, Role};
    use crate::reminders::default_reminders;
    use chrono::NaiveDate;

    fn log(user: &str, ymd: (i32, u32, u32)) -> PeriodLog {
        PeriodLog {
            id: Uuid::new_v4(),
            user_id: user.into(),
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            flow: Flow::Light,
            pain: 2,
            mood: String::new(),
            symptoms: vec![],
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_logs_listed_newest_first_per_user() {
        let store = MemoryStore::new();
        store.insert_period_log(log("a", (2024, 1, 5))).await.unwrap();
        store.insert_period_log(log("a", (2024, 2, 5))).await.unwrap();
        store.insert_period_log(log("b", (2024, 3, 5))).await.unwrap();

        let logs = store.list_period_logs("a").await.unwrap();
        let dates: Vec<_> = logs.iter().map(|l| l.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-02-05", "2024-01-05"]);
    }

    #[tokio::test]
    async fn test_duplicate_date_rejected() {
        let store = MemoryStore::new();
        store.insert_period_log(log("a", (2024, 1, 5))).await.unwrap();
        let err = store.insert_period_log(log("a", (2024, 1, 5))).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // other users may log the same day
        store.insert_period_log(log("b", (2024, 1, 5))).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_log() {
        let store = MemoryStore::new();
        let ghost = log("a", (2024, 1, 5));
        assert!(store.update_period_log(ghost.clone()).await.unwrap().is_none());
        assert!(!store.delete_period_log(ghost.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_keeps_own_date() {
        let store = MemoryStore::new();
        let mut entry = store.insert_period_log(log("a", (2024, 1, 5))).await.unwrap();
        entry.pain = 7;
        let updated = store.update_period_log(entry).await.unwrap().unwrap();
        assert_eq!(updated.pain, 7);
    }

    #[tokio::test]
    async fn test_reminders_seeded_once() {
        let store = MemoryStore::new();
        assert!(store.seed_reminders("a", default_reminders("a")).await.unwrap());
        assert!(!store.seed_reminders("a", default_reminders("a")).await.unwrap());
        assert_eq!(store.list_reminders("a").await.unwrap().len(), 4);

        for r in store.list_reminders("a").await.unwrap() {
            store.delete_reminder(r.id).await.unwrap();
        }
        assert!(!store.seed_reminders("a", default_reminders("a")).await.unwrap());
        assert!(store.list_reminders("a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_own_reminder_blocks_seeding() {
        let store = MemoryStore::new();
        let mine = default_reminders("b").remove(1);
        store.insert_reminder(mine).await.unwrap();
        assert!(!store.seed_reminders("b", default_reminders("b")).await.unwrap());
        assert_eq!(store.list_reminders("b").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_seeding_inserts_one_set() {
        let store = MemoryStore::new();
        let (first, second) = tokio::join!(
            store.seed_reminders("c", default_reminders("c")),
            store.seed_reminders("c", default_reminders("c")),
        );
        assert!(first.unwrap() ^ second.unwrap());
        assert_eq!(store.list_reminders("c").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_clear_chat_only_touches_one_user() {
        let store = MemoryStore::new();
        store.append_chat_message(ChatMessage::new("a", Role::User, "hi")).await.unwrap();
        store.append_chat_message(ChatMessage::new("b", Role::User, "hey")).await.unwrap();

        assert_eq!(store.clear_chat_history("a").await.unwrap(), 1);
        assert!(store.chat_history("a").await.unwrap().is_empty());
        assert_eq!(store.chat_history("b").await.unwrap().len(), 1);
    }
}
