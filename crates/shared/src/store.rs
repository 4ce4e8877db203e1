//! Key-value blob store for planner state.
//!
//! Settings, the franchise library and the schedule are each kept as one
//! JSON document under a fixed key. Every write replaces the whole document.
//! A document that fails to decode is treated as absent: the caller gets the
//! default value and a warning is logged.

use crate::error::StrategyError;
use crate::library::Library;
use crate::models::{LibraryEntry, ScheduleState, Settings};
use crate::Database;
use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

pub const SETTINGS_KEY: &str = "settings";
pub const LIBRARY_KEY: &str = "library";
pub const SCHEDULE_KEY: &str = "schedule";

/// JSON blob store backed by the `kv_store` table
pub struct BlobStore {
    db: Database,
}

impl BlobStore {
    /// Create a new store with the given database
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read the raw text stored under `key`
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.db
            .conn()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read blob '{}'", key))
    }

    /// Replace the raw text stored under `key`
    pub fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .conn()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value],
            )
            .with_context(|| format!("Failed to write blob '{}'", key))?;
        debug!(key = key, bytes = value.len(), "Blob stored");
        Ok(())
    }

    /// Decode the blob under `key`; missing or corrupt blobs yield `None`
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get_raw(key)? else {
            debug!(key = key, "Blob missing");
            return Ok(None);
        };

        match decode(key, &raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = key, error = %e, "Discarding unreadable blob");
                Ok(None)
            }
        }
    }

    /// Encode and store `value` under `key`
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize blob '{}'", key))?;
        self.put_raw(key, &raw)
    }

    /// Stored thresholds, or `fallback` when none are saved
    ///
    /// Out-of-range thresholds are discarded like an unreadable blob.
    pub fn settings_or(&self, fallback: Settings) -> Result<Settings> {
        let Some(settings) = self.load::<Settings>(SETTINGS_KEY)? else {
            return Ok(fallback);
        };
        match settings.validate() {
            Ok(()) => Ok(settings),
            Err(e) => {
                warn!(key = SETTINGS_KEY, error = %e, "Discarding out-of-range thresholds");
                Ok(fallback)
            }
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save(SETTINGS_KEY, settings)
    }

    /// Stored library, empty when none is saved
    pub fn library(&self) -> Result<Library> {
        let entries: Vec<LibraryEntry> = self.load(LIBRARY_KEY)?.unwrap_or_default();
        Ok(Library::from_entries(entries))
    }

    pub fn save_library(&self, library: &Library) -> Result<()> {
        self.save(LIBRARY_KEY, library.entries())
    }

    pub fn schedule(&self) -> Result<Option<ScheduleState>> {
        self.load(SCHEDULE_KEY)
    }

    pub fn save_schedule(&self, state: &ScheduleState) -> Result<()> {
        self.save(SCHEDULE_KEY, state)
    }
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, StrategyError> {
    serde_json::from_str(raw).map_err(|source| StrategyError::PersistenceCorrupt {
        key: key.to_string(),
        source,
    })
}
