//! Ratatui front-end: a login screen followed by the catalog screen with its
//! form, listing, and counts.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
