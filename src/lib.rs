//! threedaysfit - Three-day home gym program tracker
//!
//! Upper body, back & core, legs & glutes: rest timers, set checklists
//! and workout logs, kept locally or synced to a document store.

pub mod config;
pub mod db;
pub mod log_form;
pub mod program;
pub mod remote;
pub mod session;
pub mod stats;
pub mod tracker;
pub mod tui;

pub use config::Config;
pub use db::Database;
