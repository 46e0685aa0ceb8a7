//! Persistence behind a single trait so the router never knows which backend
//! it is talking to. One adapter is picked at startup from [`Config`].
//!
//! [`Config`]: crate::config::Config

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ChatMessage, HygieneReminder, PeriodLog, Profile};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<Profile>>;
    async fn upsert_profile(&self, profile: Profile) -> StoreResult<Profile>;

    /// Newest first. Logs sharing a date keep insertion order.
    async fn list_period_logs(&self, user_id: &str) -> StoreResult<Vec<PeriodLog>>;
    async fn get_period_log(&self, id: Uuid) -> StoreResult<Option<PeriodLog>>;
    /// Fails with [`StoreError::Conflict`] if the user already logged that date.
    async fn insert_period_log(&self, log: PeriodLog) -> StoreResult<PeriodLog>;
    async fn update_period_log(&self, log: PeriodLog) -> StoreResult<Option<PeriodLog>>;
    async fn delete_period_log(&self, id: Uuid) -> StoreResult<bool>;

    async fn list_reminders(&self, user_id: &str) -> StoreResult<Vec<HygieneReminder>>;
    async fn get_reminder(&self, id: Uuid) -> StoreResult<Option<HygieneReminder>>;
    /// Inserts `defaults` only if `user_id` has never had reminders stored,
    /// and records that they now have. Returns whether anything was seeded.
    /// Deleting every reminder later does not make a user eligible again.
    async fn seed_reminders(&self, user_id: &str, defaults: Vec<HygieneReminder>)
        -> StoreResult<bool>;
    /// Also counts as the user having stored reminders.
    async fn insert_reminder(&self, reminder: HygieneReminder) -> StoreResult<HygieneReminder>;
    async fn update_reminder(&self, reminder: HygieneReminder)
        -> StoreResult<Option<HygieneReminder>>;
    async fn delete_reminder(&self, id: Uuid) -> StoreResult<bool>;

    /// Oldest first.
    async fn chat_history(&self, user_id: &str) -> StoreResult<Vec<ChatMessage>>;
    async fn append_chat_message(&self, message: ChatMessage) -> StoreResult<ChatMessage>;
    async fn clear_chat_history(&self, user_id: &str) -> StoreResult<u64>;
}

pub(crate) fn duplicate_date_message(log: &PeriodLog) -> String {
    format!("a period log for {} already exists", log.date)
}
