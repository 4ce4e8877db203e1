//! Cooldown scheduler.
//!
//! Derives the earliest safe upload date from the last upload and the scope
//! of the next one, and classifies calendar days into risk bands.

pub mod calendar;
pub mod cooldown;
pub mod state;

pub use calendar::{band_for, month_grid, render_grid, CalendarDay, RiskBand};
pub use cooldown::compute_safe_date;
pub use state::ScheduleUpdate;
