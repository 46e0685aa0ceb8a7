use serde::{ Serialize, Deserialize, Deserializer };
use uuid::Uuid;
use chrono::{NaiveDate, DateTime, Utc};
use std::{fmt, str::FromStr};

pub const DEFAULT_USER: &str = "default-user";
pub const DEFAULT_CYCLE_LENGTH: i32 = 28;
pub const DEFAULT_PERIOD_LENGTH: i32 = 5;
pub const MAX_CYCLE_LENGTH: i32 = 100;
pub const MAX_PAIN: u8 = 10;
/// One year, in hours.
pub const MAX_REMINDER_INTERVAL: u32 = 24 * 365;

pub fn default_user() -> String {
    DEFAULT_USER.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub name: String,
    pub age: i32,
    pub cycle_length: i32,
    pub period_length: i32,
    pub last_period_date: Option<NaiveDate>,
}

impl Profile {
    /// Profile handed out the first time a user asks for one.
    pub fn new_default(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: "User".into(),
            age: 25,
            cycle_length: DEFAULT_CYCLE_LENGTH,
            period_length: DEFAULT_PERIOD_LENGTH,
            last_period_date: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default = "default_user")]
    pub user_id: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub cycle_length: Option<i32>,
    pub period_length: Option<i32>,
    /// Absent leaves the date alone, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub last_period_date: Option<Option<NaiveDate>>,
}

/// Wraps any present value, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Spotting,
    Light,
    Medium,
    Heavy,
}

impl Flow {
    pub fn as_str(self) -> &'static str {
        match self {
            Flow::Spotting => "spotting",
            Flow::Light => "light",
            Flow::Medium => "medium",
            Flow::Heavy => "heavy",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spotting" => Ok(Flow::Spotting),
            "light" => Ok(Flow::Light),
            "medium" => Ok(Flow::Medium),
            "heavy" => Ok(Flow::Heavy),
            other => Err(format!("unknown flow '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodLog {
    pub id: Uuid,
    pub user_id: String,
    pub date: NaiveDate,
    pub flow: Flow,
    /// 0 (none) to 10 (worst).
    pub pain: u8,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPeriodLog {
    #[serde(default = "default_user")]
    pub user_id: String,
    pub date: NaiveDate,
    pub flow: Flow,
    pub pain: u8,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePeriodLog {
    pub date: Option<NaiveDate>,
    pub flow: Option<Flow>,
    pub pain: Option<u8>,
    pub mood: Option<String>,
    pub symptoms: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilityWindow {
    pub ovulation_date: NaiveDate,
    pub fertile_start: NaiveDate,
    pub fertile_end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePrediction {
    pub next_period_date: NaiveDate,
    pub days_until: i64,
    pub phase: Phase,
    pub fertility_window: Option<FertilityWindow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSummary {
    pub prediction: Option<CyclePrediction>,
    pub in_fertile_window: bool,
    pub phase_description: String,
    pub phase_color: Option<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowPattern {
    pub light: usize,
    pub medium: usize,
    pub heavy: usize,
    pub spotting: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleStats {
    pub average_pain: f64,
    pub most_common_symptoms: Vec<String>,
    pub flow_pattern: FlowPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HygieneReminder {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Hours between reminders.
    pub interval: u32,
    pub enabled: bool,
    pub last_reminded: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    #[serde(default = "default_user")]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub interval: u32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReminder {
    pub title: Option<String>,
    pub description: Option<String>,
    pub interval: Option<u32>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(user_id: &str, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default = "default_user")]
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gynecologist {
    pub id: &'static str,
    pub name: &'static str,
    pub specialty: &'static str,
    pub area: &'static str,
    pub address: &'static str,
    pub city: &'static str,
    pub phone: &'static str,
    pub rating: f32,
    pub experience: u32,
    pub education: &'static str,
    pub consultation_fee: u32,
    pub availability: &'static [&'static str],
    pub services: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(default = "default_user")]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_period_log_request_defaults() {
        let body = json!({ "date": "2024-02-01", "flow": "heavy", "pain": 4 });
        let req: NewPeriodLog = serde_json::from_value(body).unwrap();
        assert_eq!(req.user_id, DEFAULT_USER);
        assert_eq!(req.flow, Flow::Heavy);
        assert!(req.symptoms.is_empty());
        assert!(req.mood.is_empty());
    }

    #[test]
    fn test_prediction_serializes_camel_case_iso_dates() {
        let prediction = CyclePrediction {
            next_period_date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            days_until: 3,
            phase: Phase::Luteal,
            fertility_window: None,
        };
        let value = serde_json::to_value(&prediction).unwrap();
        assert_eq!(value["nextPeriodDate"], "2024-03-14");
        assert_eq!(value["daysUntil"], 3);
        assert_eq!(value["phase"], "luteal");
        assert!(value["fertilityWindow"].is_null());
    }

    #[test]
    fn test_profile_request_tells_null_from_missing() {
        let missing: ProfileRequest = serde_json::from_value(json!({ "name": "Asha" })).unwrap();
        assert_eq!(missing.last_period_date, None);

        let cleared: ProfileRequest =
            serde_json::from_value(json!({ "lastPeriodDate": null })).unwrap();
        assert_eq!(cleared.last_period_date, Some(None));

        let set: ProfileRequest =
            serde_json::from_value(json!({ "lastPeriodDate": "2024-02-01" })).unwrap();
        assert_eq!(set.last_period_date, Some(NaiveDate::from_ymd_opt(2024, 2, 1)));
    }

    #[test]
    fn test_flow_parses_from_lowercase() {
        assert_eq!("spotting".parse::<Flow>(), Ok(Flow::Spotting));
        assert!("gushing".parse::<Flow>().is_err());
        assert_eq!(Flow::Medium.to_string(), "medium");
    }
}
