//! Validation of generator advisories.
//!
//! The generator is told the gate rules in its prompt, so the verdict it
//! returns is trusted as long as it names a known format. Everything else is
//! optional and defaulted.

use crate::gates::Verdict;
use serde_json::{Map, Value};
use shared::{LibraryEntry, MediaType, Performance, StrategyError, Trend, VideoFormat};

/// Virality assumed when the generator gives none
pub const DEFAULT_VIRALITY: u8 = 5;

/// Shape-checked generator analysis
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub title: Option<String>,
    pub media_type: Option<MediaType>,
    pub count: Option<u32>,
    pub virality_score: u8,
    pub trend: Trend,
    pub recommended_format: VideoFormat,
    pub reasoning: String,
}

/// Validate a raw generator object
pub fn evaluate_from_advisory(raw: &Value) -> Result<Advisory, StrategyError> {
    let object = raw
        .as_object()
        .ok_or_else(|| StrategyError::MalformedAdvisory("advisory is not an object".to_string()))?;

    let recommended_format = match object.get("recommendedFormat") {
        Some(Value::String(s)) => s.parse::<VideoFormat>().map_err(|_| {
            StrategyError::MalformedAdvisory(format!("unknown recommendedFormat '{}'", s))
        })?,
        Some(other) => {
            return Err(StrategyError::MalformedAdvisory(format!(
                "recommendedFormat is not a string: {}",
                other
            )))
        }
        None => {
            return Err(StrategyError::MalformedAdvisory(
                "missing recommendedFormat".to_string(),
            ))
        }
    };

    Ok(Advisory {
        title: string_field(object, "title"),
        media_type: string_field(object, "mediaType").and_then(|s| s.parse().ok()),
        count: object.get("count").and_then(non_negative_u32),
        virality_score: object
            .get("viralityScore")
            .and_then(virality)
            .unwrap_or(DEFAULT_VIRALITY),
        trend: string_field(object, "trend")
            .map(|s| Trend::parse_lenient(&s))
            .unwrap_or_default(),
        recommended_format,
        reasoning: string_field(object, "reasoning").unwrap_or_default(),
    })
}

impl Advisory {
    pub fn verdict(&self) -> Verdict {
        Verdict {
            format: self.recommended_format,
            rationale: self.reasoning.clone(),
            decided_by: None,
        }
    }

    /// Build a library entry, using `fallback_title` when the advisory has none
    pub fn to_library_entry(&self, id: i64, fallback_title: &str) -> LibraryEntry {
        LibraryEntry {
            id,
            title: self
                .title
                .clone()
                .unwrap_or_else(|| fallback_title.trim().to_string()),
            format: self.recommended_format,
            media_type: self.media_type,
            unit_count: self.count,
            virality_score: self.virality_score,
            trend: self.trend,
            reasoning: self.reasoning.clone(),
            competitors: Vec::new(),
            performance: Performance::default(),
            link: None,
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract a non-negative whole number, rounding fractional values
pub(crate) fn non_negative_u32(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    (f.is_finite() && f >= 0.0 && f <= f64::from(u32::MAX)).then(|| f.round() as u32)
}

fn virality(value: &Value) -> Option<u8> {
    let f = value.as_f64()?;
    f.is_finite().then(|| f.round().clamp(0.0, 10.0) as u8)
}
