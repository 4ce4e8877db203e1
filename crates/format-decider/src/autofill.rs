//! Generator-backed unit count estimate.
//!
//! A missing or unusable answer is a no-op for the caller, never an error.

use crate::advisory::non_negative_u32;
use advisor::{prompts, Generator};
use serde_json::Value;
use shared::MediaType;
use tracing::{debug, warn};

/// Estimate how many episodes or movies `franchise` has
pub async fn estimate_unit_count<G: Generator + ?Sized>(
    generator: &G,
    franchise: &str,
    media_type: MediaType,
) -> Option<u32> {
    let franchise = franchise.trim();
    if franchise.is_empty() {
        return None;
    }

    match generator.generate(&prompts::unit_count(franchise, media_type)).await {
        Ok(value) => {
            let count = extract_count(&value);
            debug!(franchise = %franchise, count = ?count, "Unit count estimate");
            count
        }
        Err(e) => {
            warn!(franchise = %franchise, error = %e, "Unit count estimate unavailable");
            None
        }
    }
}

/// Pull the `count` field out of a count-only response
pub fn extract_count(value: &Value) -> Option<u32> {
    value.get("count").and_then(non_negative_u32)
}
