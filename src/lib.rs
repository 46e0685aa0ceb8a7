//! Luna backend: period logging, cycle prediction, hygiene reminders, a
//! keyword chatbot and a gynecologist directory served over HTTP.

pub mod chatbot;
pub mod config;
pub mod cycle;
pub mod directory;
pub mod error;
pub mod logging;
pub mod models;
pub mod reminders;
pub mod routes;
pub mod stats;
pub mod store;

pub use config::{Config, StorageBackend};
pub use cycle::{is_in_fertile_window, predict_next_period, CycleError};
pub use error::AppError;
pub use routes::{app, AppState};
pub use stats::calculate_cycle_stats;
pub use store::{MemoryStore, PgStore, Store, StoreError};
