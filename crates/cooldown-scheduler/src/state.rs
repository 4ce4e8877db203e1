//! Partial updates to the stored schedule.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use shared::{ScheduleState, Scope, VideoFormat};

/// Fields a user may change; `None` keeps the stored value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleUpdate {
    pub last_upload_date: Option<NaiveDate>,
    pub last_scope: Option<Scope>,
    pub last_format: Option<VideoFormat>,
    pub next_scope: Option<Scope>,
}

impl ScheduleUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay this update on `stored`
    ///
    /// With nothing stored yet the upload date is required; the other fields
    /// default to a full ranking video followed by a full one.
    pub fn apply(&self, stored: Option<ScheduleState>) -> Result<ScheduleState> {
        let base = match (stored, self.last_upload_date) {
            (Some(state), _) => state,
            (None, Some(date)) => ScheduleState {
                last_upload_date: date,
                last_scope: Scope::Full,
                last_format: VideoFormat::Ranking,
                next_scope: Scope::Full,
            },
            (None, None) => bail!("No upload recorded yet: a last upload date is required"),
        };

        Ok(ScheduleState {
            last_upload_date: self.last_upload_date.unwrap_or(base.last_upload_date),
            last_scope: self.last_scope.unwrap_or(base.last_scope),
            last_format: self.last_format.unwrap_or(base.last_format),
            next_scope: self.next_scope.unwrap_or(base.next_scope),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_safe_date;
    use shared::{BlobStore, Database, RiskLevel};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_update_needs_date() {
        let update = ScheduleUpdate {
            next_scope: Some(Scope::Partial),
            ..Default::default()
        };
        assert!(update.apply(None).is_err());

        let update = ScheduleUpdate {
            last_upload_date: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        let state = update.apply(None).unwrap();
        assert_eq!(state.last_scope, Scope::Full);
        assert_eq!(state.last_format, VideoFormat::Ranking);
        assert_eq!(state.next_scope, Scope::Full);
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let stored = ScheduleState {
            last_upload_date: date(2024, 1, 1),
            last_scope: Scope::Partial,
            last_format: VideoFormat::OneSitting,
            next_scope: Scope::Full,
        };
        let update = ScheduleUpdate {
            next_scope: Some(Scope::Partial),
            ..Default::default()
        };

        let state = update.apply(Some(stored)).unwrap();
        assert_eq!(state.last_upload_date, date(2024, 1, 1));
        assert_eq!(state.last_format, VideoFormat::OneSitting);
        assert_eq!(state.next_scope, Scope::Partial);
        assert!(ScheduleUpdate::default().is_empty());
        assert!(!update.is_empty());
    }

    #[test]
    fn test_persisted_schedule_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("planner.db");

        let update = ScheduleUpdate {
            last_upload_date: Some(date(2024, 1, 1)),
            last_format: Some(VideoFormat::OneSitting),
            ..Default::default()
        };
        {
            let store = BlobStore::new(Database::open(&db_path).unwrap());
            let state = update.apply(store.schedule().unwrap()).unwrap();
            store.save_schedule(&state).unwrap();
        }

        let store = BlobStore::new(Database::open(&db_path).unwrap());
        let state = store.schedule().unwrap().unwrap();
        let verdict = compute_safe_date(&state, date(2024, 1, 1));
        assert_eq!(verdict.required_cooldown_weeks, 12);
        assert_eq!(verdict.risk_level, RiskLevel::Danger);
    }
}
