//! Application configuration management.
//!
//! Provides the persisted, thread-safe configuration for PinNote. A single
//! typed struct behind `parking_lot::RwLock` backs both the Rust side and the
//! frontend settings panel, with the file on disk as the source of truth
//! across restarts.

pub mod app;

pub use app::{AppConfig, APP_CONFIG};
