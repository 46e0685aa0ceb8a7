use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{duplicate_date_message, Store, StoreError, StoreResult};
use crate::models::{ChatMessage, HygieneReminder, PeriodLog, Profile};

/// Postgres adapter. Also used for Supabase, which is Postgres underneath.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;
        tracing::info!("🗄️ Migrations applied");

        Ok(Self { pool })
    }
}

fn decode_err(msg: String) -> StoreError {
    StoreError::Database(sqlx::Error::Decode(msg.into()))
}

fn interval_hours(reminder: &HygieneReminder) -> StoreResult<i32> {
    i32::try_from(reminder.interval).map_err(|_| {
        StoreError::Database(sqlx::Error::Encode(
            format!("interval {} does not fit in INTEGER", reminder.interval).into(),
        ))
    })
}

/// Marks `user_id` as having stored reminders. True if this is the first time.
async fn claim_reminder_owner(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &str,
) -> StoreResult<bool> {
    let result = sqlx::query(
        "INSERT INTO reminder_owners (user_id) VALUES ($1)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() > 0)
}

async fn insert_reminder_row(
    tx: &mut Transaction<'_, Postgres>,
    reminder: &HygieneReminder,
) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO hygiene_reminders
            (id, user_id, title, description, interval_hours, enabled, last_reminded)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(reminder.id)
    .bind(&reminder.user_id)
    .bind(&reminder.title)
    .bind(&reminder.description)
    .bind(interval_hours(reminder)?)
    .bind(reminder.enabled)
    .bind(reminder.last_reminded)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Turns a unique-violation on `(user_id, date)` into a conflict.
fn map_write_err(e: sqlx::Error, log: &PeriodLog) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(constraint) = db_err.constraint() {
                tracing::info!("🔒 Constraint violated: {}", constraint);
            }
            return StoreError::Conflict(duplicate_date_message(log));
        }
        tracing::error!("❌ DB write failed: {}", db_err.message());
    }
    StoreError::Database(e)
}

#[derive(FromRow)]
struct ProfileRow {
    user_id: String,
    name: String,
    age: i32,
    cycle_length: i32,
    period_length: i32,
    last_period_date: Option<NaiveDate>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: row.user_id,
            name: row.name,
            age: row.age,
            cycle_length: row.cycle_length,
            period_length: row.period_length,
            last_period_date: row.last_period_date,
        }
    }
}

#[derive(FromRow)]
struct PeriodLogRow {
    id: Uuid,
    user_id: String,
    date: NaiveDate,
    flow: String,
    pain: i16,
    mood: String,
    symptoms: Vec<String>,
    notes: String,
}

impl TryFrom<PeriodLogRow> for PeriodLog {
    type Error = StoreError;

    fn try_from(row: PeriodLogRow) -> Result<Self, Self::Error> {
        Ok(PeriodLog {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            flow: row.flow.parse().map_err(decode_err)?,
            pain: u8::try_from(row.pain)
                .map_err(|_| decode_err(format!("pain {} out of range", row.pain)))?,
            mood: row.mood,
            symptoms: row.symptoms,
            notes: row.notes,
        })
    }
}

#[derive(FromRow)]
struct ReminderRow {
    id: Uuid,
    user_id: String,
    title: String,
    description: String,
    interval_hours: i32,
    enabled: bool,
    last_reminded: Option<DateTime<Utc>>,
}

impl TryFrom<ReminderRow> for HygieneReminder {
    type Error = StoreError;

    fn try_from(row: ReminderRow) -> Result<Self, Self::Error> {
        Ok(HygieneReminder {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            interval: u32::try_from(row.interval_hours)
                .map_err(|_| decode_err(format!("interval {} out of range", row.interval_hours)))?,
            enabled: row.enabled,
            last_reminded: row.last_reminded,
        })
    }
}

#[derive(FromRow)]
struct ChatRow {
    id: Uuid,
    user_id: String,
    role: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ChatRow> for ChatMessage {
    type Error = StoreError;

    fn try_from(row: ChatRow) -> Result<Self, Self::Error> {
        Ok(ChatMessage {
            id: row.id,
            user_id: row.user_id,
            role: row.role.parse().map_err(decode_err)?,
            content: row.content,
            timestamp: row.created_at,
        })
    }
}

const LOG_COLUMNS: &str = "id, user_id, date, flow, pain, mood, symptoms, notes";
const REMINDER_COLUMNS: &str =
    "id, user_id, title, description, interval_hours, enabled, last_reminded";

#[async_trait]
impl Store for PgStore {
    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, name, age, cycle_length, period_length, last_period_date
             FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Profile::from))
    }

    async fn upsert_profile(&self, profile: Profile) -> StoreResult<Profile> {
        sqlx::query(
            "INSERT INTO profiles (user_id, name, age, cycle_length, period_length, last_period_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                age = EXCLUDED.age,
                cycle_length = EXCLUDED.cycle_length,
                period_length = EXCLUDED.period_length,
                last_period_date = EXCLUDED.last_period_date,
                updated_at = now()",
        )
        .bind(&profile.user_id)
        .bind(&profile.name)
        .bind(profile.age)
        .bind(profile.cycle_length)
        .bind(profile.period_length)
        .bind(profile.last_period_date)
        .execute(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn list_period_logs(&self, user_id: &str) -> StoreResult<Vec<PeriodLog>> {
        let rows = sqlx::query_as::<_, PeriodLogRow>(&format!(
            "SELECT {LOG_COLUMNS} FROM period_logs
             WHERE user_id = $1
             ORDER BY date DESC, created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(PeriodLog::try_from).collect()
    }

    async fn get_period_log(&self, id: Uuid) -> StoreResult<Option<PeriodLog>> {
        let row = sqlx::query_as::<_, PeriodLogRow>(&format!(
            "SELECT {LOG_COLUMNS} FROM period_logs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(PeriodLog::try_from).transpose()
    }

    async fn insert_period_log(&self, log: PeriodLog) -> StoreResult<PeriodLog> {
        sqlx::query(
            "INSERT INTO period_logs (id, user_id, date, flow, pain, mood, symptoms, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(log.id)
        .bind(&log.user_id)
        .bind(log.date)
        .bind(log.flow.as_str())
        .bind(i16::from(log.pain))
        .bind(&log.mood)
        .bind(&log.symptoms)
        .bind(&log.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_err(e, &log))?;
        Ok(log)
    }

    async fn update_period_log(&self, log: PeriodLog) -> StoreResult<Option<PeriodLog>> {
        let result = sqlx::query(
            "UPDATE period_logs
             SET date = $2, flow = $3, pain = $4, mood = $5, symptoms = $6, notes = $7,
                 updated_at = now()
             WHERE id = $1",
        )
        .bind(log.id)
        .bind(log.date)
        .bind(log.flow.as_str())
        .bind(i16::from(log.pain))
        .bind(&log.mood)
        .bind(&log.symptoms)
        .bind(&log.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_err(e, &log))?;

        Ok((result.rows_affected() > 0).then_some(log))
    }

    async fn delete_period_log(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM period_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_reminders(&self, user_id: &str) -> StoreResult<Vec<HygieneReminder>> {
        let rows = sqlx::query_as::<_, ReminderRow>(&format!(
            "SELECT {REMINDER_COLUMNS} FROM hygiene_reminders
             WHERE user_id = $1
             ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(HygieneReminder::try_from).collect()
    }

    async fn get_reminder(&self, id: Uuid) -> StoreResult<Option<HygieneReminder>> {
        let row = sqlx::query_as::<_, ReminderRow>(&format!(
            "SELECT {REMINDER_COLUMNS} FROM hygiene_reminders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(HygieneReminder::try_from).transpose()
    }

    async fn seed_reminders(
        &self,
        user_id: &str,
        defaults: Vec<HygieneReminder>,
    ) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        if !claim_reminder_owner(&mut tx, user_id).await? {
            tx.rollback().await?;
            return Ok(false);
        }
        for reminder in &defaults {
            insert_reminder_row(&mut tx, reminder).await?;
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn insert_reminder(&self, reminder: HygieneReminder) -> StoreResult<HygieneReminder> {
        let mut tx = self.pool.begin().await?;
        claim_reminder_owner(&mut tx, &reminder.user_id).await?;
        insert_reminder_row(&mut tx, &reminder).await?;
        tx.commit().await?;
        Ok(reminder)
    }

    async fn update_reminder(
        &self,
        reminder: HygieneReminder,
    ) -> StoreResult<Option<HygieneReminder>> {
        let result = sqlx::query(
            "UPDATE hygiene_reminders
             SET title = $2, description = $3, interval_hours = $4, enabled = $5,
                 last_reminded = $6, updated_at = now()
             WHERE id = $1",
        )
        .bind(reminder.id)
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(interval_hours(&reminder)?)
        .bind(reminder.enabled)
        .bind(reminder.last_reminded)
        .execute(&self.pool)
        .await?;
        Ok((result.rows_affected() > 0).then_some(reminder))
    }

    async fn delete_reminder(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM hygiene_reminders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn chat_history(&self, user_id: &str) -> StoreResult<Vec<ChatMessage>> {
        let rows = sqlx::query_as::<_, ChatRow>(
            "SELECT id, user_id, role, content, created_at FROM chat_messages
             WHERE user_id = $1
             ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ChatMessage::try_from).collect()
    }

    async fn append_chat_message(&self, message: ChatMessage) -> StoreResult<ChatMessage> {
        sqlx::query(
            "INSERT INTO chat_messages (id, user_id, role, content, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(message.id)
        .bind(&message.user_id)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(message)
    }

    async fn clear_chat_history(&self, user_id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
