//! Library catalog: a single-user terminal form over a local SQLite table of
//! books, with a login gate and an availability summary.
pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod summary;
pub mod telemetry;
pub mod ui;

pub use auth::{Credentials, LoginGate, LoginState};
pub use config::Settings;
pub use db::ensure_schema;
pub use models::{Book, BookStatus};
pub use summary::{summarize, CatalogSummary, TitleTally};
pub use ui::{run_app, App};
