//! Shared library for the content planner.
//!
//! This crate provides common functionality used across all binary crates:
//! - Configuration management
//! - Data models and the error taxonomy
//! - SQLite-backed blob store
//! - Franchise library handle
//! - Logging infrastructure

pub mod config;
pub mod db;
pub mod error;
pub mod library;
pub mod logging;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use error::StrategyError;
pub use library::{Library, ManualEntry};
pub use logging::LogConfig;
pub use models::*;
pub use store::BlobStore;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
