//! Cooldown rules between uploads.
//!
//! | last scope | next scope | weeks | risk   |
//! |------------|------------|-------|--------|
//! | full       | full       | 12    | danger |
//! | differs    |            | 4     | safe   |
//! | partial    | partial    | 0     | safe   |
//!
//! A one-sitting last video then raises the minimum to 8 weeks and escalates
//! the risk to caution unless it is already danger.

use chrono::{Days, NaiveDate};
use shared::{RiskLevel, ScheduleState, ScheduleVerdict, Scope, VideoFormat};
use tracing::debug;

pub const FULL_REPEAT_WEEKS: u32 = 12;
pub const SCOPE_CHANGE_WEEKS: u32 = 4;
pub const ENDURANCE_RECOVERY_WEEKS: u32 = 8;

const FULL_REPEAT_REASON: &str = "Topic fatigue: two full deep-dives require 12 weeks separation.";
const SCOPE_CHANGE_REASON: &str = "Scope separation: differing scopes permit a 4-week gap.";
const ENDURANCE_REASON: &str = "Endurance rule: endurance-format videos need 8 weeks recovery.";

/// Compute the earliest safe date for the next upload, as seen from `today`
pub fn compute_safe_date(state: &ScheduleState, today: NaiveDate) -> ScheduleVerdict {
    let mut weeks = 0;
    let mut risk = RiskLevel::Safe;
    let mut reasons: Vec<&str> = Vec::new();

    match (state.last_scope, state.next_scope) {
        (Scope::Full, Scope::Full) => {
            weeks = FULL_REPEAT_WEEKS;
            risk = RiskLevel::Danger;
            reasons.push(FULL_REPEAT_REASON);
        }
        (last, next) if last != next => {
            weeks = SCOPE_CHANGE_WEEKS;
            risk = RiskLevel::Safe;
            reasons.push(SCOPE_CHANGE_REASON);
        }
        // partial after partial carries no rule of its own
        _ => {}
    }

    if state.last_format == VideoFormat::OneSitting {
        weeks = weeks.max(ENDURANCE_RECOVERY_WEEKS);
        reasons.push(ENDURANCE_REASON);
        if risk != RiskLevel::Danger {
            risk = RiskLevel::Caution;
        }
    }

    // Saturates at the last representable date
    let safe_date = state
        .last_upload_date
        .checked_add_days(Days::new(u64::from(weeks) * 7))
        .unwrap_or(NaiveDate::MAX);
    let days_remaining = (safe_date - today).num_days();

    debug!(
        last_upload = %state.last_upload_date,
        weeks = weeks,
        safe_date = %safe_date,
        days_remaining = days_remaining,
        risk = %risk,
        "Cooldown computed"
    );

    ScheduleVerdict {
        required_cooldown_weeks: weeks,
        safe_date,
        days_remaining,
        risk_level: risk,
        rationale: reasons.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state(last_scope: Scope, last_format: VideoFormat, next_scope: Scope) -> ScheduleState {
        ScheduleState {
            last_upload_date: date(2024, 1, 1),
            last_scope,
            last_format,
            next_scope,
        }
    }

    #[test]
    fn test_full_after_endurance_full() {
        let verdict = compute_safe_date(
            &state(Scope::Full, VideoFormat::OneSitting, Scope::Full),
            date(2024, 1, 1),
        );

        assert_eq!(verdict.required_cooldown_weeks, 12);
        assert_eq!(verdict.safe_date, date(2024, 3, 25));
        assert_eq!(verdict.risk_level, RiskLevel::Danger);
        assert_eq!(verdict.days_remaining, 84);
        assert!(verdict.rationale.contains("12 weeks"));
        assert!(verdict.rationale.contains("8 weeks recovery"));
    }

    #[test]
    fn test_scope_change() {
        let verdict = compute_safe_date(
            &state(Scope::Full, VideoFormat::Ranking, Scope::Partial),
            date(2024, 1, 10),
        );

        assert_eq!(verdict.required_cooldown_weeks, 4);
        assert_eq!(verdict.safe_date, date(2024, 1, 29));
        assert_eq!(verdict.days_remaining, 19);
        assert_eq!(verdict.risk_level, RiskLevel::Safe);
    }

    #[test]
    fn test_scope_change_after_endurance_is_caution() {
        let verdict = compute_safe_date(
            &state(Scope::Partial, VideoFormat::OneSitting, Scope::Full),
            date(2024, 1, 1),
        );

        assert_eq!(verdict.required_cooldown_weeks, 8);
        assert_eq!(verdict.safe_date, date(2024, 2, 26));
        assert_eq!(verdict.risk_level, RiskLevel::Caution);
    }

    #[test]
    fn test_partial_after_partial_has_no_rule() {
        let verdict = compute_safe_date(
            &state(Scope::Partial, VideoFormat::Ranking, Scope::Partial),
            date(2024, 1, 5),
        );

        assert_eq!(verdict.required_cooldown_weeks, 0);
        assert_eq!(verdict.safe_date, date(2024, 1, 1));
        assert_eq!(verdict.risk_level, RiskLevel::Safe);
        assert!(verdict.rationale.is_empty());
        assert_eq!(verdict.days_remaining, -4);
        assert_eq!(verdict.status_line(), "You are clear to post.");
    }

    #[test]
    fn test_partial_after_endurance_partial() {
        let verdict = compute_safe_date(
            &state(Scope::Partial, VideoFormat::OneSitting, Scope::Partial),
            date(2024, 1, 1),
        );

        assert_eq!(verdict.required_cooldown_weeks, 8);
        assert_eq!(verdict.risk_level, RiskLevel::Caution);
    }

    #[test]
    fn test_same_inputs_same_verdict() {
        let s = state(Scope::Full, VideoFormat::Ranking, Scope::Full);
        let today = date(2024, 2, 1);
        assert_eq!(compute_safe_date(&s, today), compute_safe_date(&s, today));
    }

    #[test]
    fn test_safe_date_saturates_at_calendar_end() {
        let s = ScheduleState {
            last_upload_date: NaiveDate::MAX,
            last_scope: Scope::Full,
            last_format: VideoFormat::OneSitting,
            next_scope: Scope::Full,
        };
        let verdict = compute_safe_date(&s, NaiveDate::MAX);

        assert_eq!(verdict.required_cooldown_weeks, 12);
        assert_eq!(verdict.safe_date, NaiveDate::MAX);
        assert_eq!(verdict.days_remaining, 0);
    }

    #[test]
    fn test_status_line_counts_down() {
        let verdict = compute_safe_date(
            &state(Scope::Full, VideoFormat::Ranking, Scope::Full),
            date(2024, 3, 24),
        );
        assert_eq!(verdict.days_remaining, 1);
        assert_eq!(verdict.status_line(), "1 days cooldown remaining");
    }
}
