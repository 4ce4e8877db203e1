//! Format decision engine.
//!
//! Classifies a franchise as a ranking video or a one-sitting endurance
//! video, either by walking the manual gates or by validating a generator
//! advisory.

pub mod advisory;
pub mod analyzer;
pub mod autofill;
pub mod gates;

#[cfg(test)]
mod testing;

pub use advisory::{evaluate_from_advisory, Advisory};
pub use analyzer::{analyze_franchise, AnalysisOutcome};
pub use autofill::estimate_unit_count;
pub use gates::{evaluate, Gate, Verdict};
