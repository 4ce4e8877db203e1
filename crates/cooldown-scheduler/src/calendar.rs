//! Day-by-day risk bands for calendar rendering.
//!
//! The danger window is always the first 28 days after an upload, whatever
//! cooldown the rules computed. Days in that window stay DANGER even when the
//! computed safe date falls inside it.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

pub const DANGER_WINDOW_DAYS: i64 = 28;

/// Number of days shown in a calendar grid (six weeks)
pub const GRID_DAYS: i64 = 42;

/// Visual classification of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    /// Before the last upload, no colour
    Past,
    Danger,
    Caution,
    Safe,
}

impl RiskBand {
    /// One-character marker for text calendars
    pub fn marker(&self) -> char {
        match self {
            RiskBand::Past => ' ',
            RiskBand::Danger => '!',
            RiskBand::Caution => '~',
            RiskBand::Safe => '+',
        }
    }
}

/// Band for `day` given the last upload and the computed safe date
pub fn band_for(day: NaiveDate, last_upload: NaiveDate, safe_date: NaiveDate) -> RiskBand {
    if day < last_upload {
        RiskBand::Past
    } else if day < danger_window_end(last_upload) {
        RiskBand::Danger
    } else if day < safe_date {
        RiskBand::Caution
    } else {
        RiskBand::Safe
    }
}

/// First day after the danger window, saturating at the calendar's end
fn danger_window_end(last_upload: NaiveDate) -> NaiveDate {
    last_upload
        .checked_add_signed(Duration::days(DANGER_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// One cell of the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub band: RiskBand,
    pub is_upload_day: bool,
    pub is_safe_day: bool,
}

/// Six weeks of days starting on the first of the last upload's month
///
/// The grid is cut short when it would run past the last representable date.
pub fn month_grid(last_upload: NaiveDate, safe_date: NaiveDate) -> Vec<CalendarDay> {
    let start = last_upload.with_day(1).unwrap_or(last_upload);

    start
        .iter_days()
        .take(GRID_DAYS as usize)
        .map(|date| {
            CalendarDay {
                date,
                band: band_for(date, last_upload, safe_date),
                is_upload_day: date == last_upload,
                is_safe_day: date == safe_date,
            }
        })
        .collect()
}

/// Render a grid as text, one week per line, Sunday first
pub fn render_grid(days: &[CalendarDay]) -> String {
    let mut out = String::from(" Su  Mo  Tu  We  Th  Fr  Sa\n");
    let Some(first) = days.first() else {
        return out;
    };

    let lead = first.date.weekday().num_days_from_sunday() as usize;
    let mut column = 0;
    for _ in 0..lead {
        out.push_str("    ");
        column += 1;
    }

    for day in days {
        let marker = if day.is_upload_day {
            '^'
        } else if day.is_safe_day {
            '*'
        } else {
            day.band.marker()
        };
        out.push_str(&format!("{:>3}{}", day.date.day(), marker));
        column += 1;
        if column == 7 {
            out.push('\n');
            column = 0;
        }
    }
    if column != 0 {
        out.push('\n');
    }
    out.push_str("^ upload  * safe date  ! danger  ~ caution  + safe\n");
    out
}
