//! Data models for the content planner.
//!
//! This module defines the closed enumerations used by the decision gates and
//! the cooldown scheduler, plus the records persisted in the blob store
//! (settings, library entries, schedule state).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of franchise being evaluated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    Tv,
    Movie,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Tv => write!(f, "TV"),
            MediaType::Movie => write!(f, "MOVIE"),
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tv" | "show" | "series" => Ok(MediaType::Tv),
            "movie" | "movies" | "film" => Ok(MediaType::Movie),
            _ => Err(anyhow::anyhow!("Invalid media type: {}", s)),
        }
    }
}

/// Video format verdict: exhaustive ranking or single-sitting endurance watch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoFormat {
    Ranking,
    #[serde(alias = "ONE SITTING")]
    OneSitting,
}

impl VideoFormat {
    /// Production guidance shown next to a verdict
    pub fn pitch(&self) -> &'static str {
        match self {
            VideoFormat::OneSitting => {
                "The volume or repetitive nature makes this an endurance challenge. \
                 Focus on the psychological journey and the 'feat' of finishing it."
            }
            VideoFormat::Ranking => {
                "The variety and fandom demand analysis. \
                 Focus on quality judgment, lists, and debating 'best vs worst'."
            }
        }
    }
}

impl std::fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoFormat::Ranking => write!(f, "RANKING"),
            VideoFormat::OneSitting => write!(f, "ONE SITTING"),
        }
    }
}

impl std::str::FromStr for VideoFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RANKING" => Ok(VideoFormat::Ranking),
            "ONE_SITTING" | "ONE SITTING" | "ONE-SITTING" => Ok(VideoFormat::OneSitting),
            _ => Err(anyhow::anyhow!("Invalid video format: {}", s)),
        }
    }
}

/// How the audience perceives the franchise's length
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CulturalPerception {
    LegendaryLength,
    Standard,
}

impl std::str::FromStr for CulturalPerception {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legendary" | "legendary_length" | "legendary-length" => {
                Ok(CulturalPerception::LegendaryLength)
            }
            "standard" => Ok(CulturalPerception::Standard),
            _ => Err(anyhow::anyhow!("Invalid cultural perception: {}", s)),
        }
    }
}

/// Whether individual units stand on their own
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentVariety {
    HighVariety,
    Repetitive,
}

impl std::str::FromStr for ContentVariety {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "high_variety" | "high-variety" => Ok(ContentVariety::HighVariety),
            "low" | "repetitive" => Ok(ContentVariety::Repetitive),
            _ => Err(anyhow::anyhow!("Invalid content variety: {}", s)),
        }
    }
}

/// Dominant mood of the fan community
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FandomVibe {
    Debate,
    Chaos,
}

impl std::str::FromStr for FandomVibe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debate" => Ok(FandomVibe::Debate),
            "chaos" => Ok(FandomVibe::Chaos),
            _ => Err(anyhow::anyhow!("Invalid fandom vibe: {}", s)),
        }
    }
}

/// Popularity trend reported by the generator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
    #[default]
    Unknown,
}

impl Trend {
    /// Lenient parse; anything unrecognised is `Unknown`
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "RISING" | "UP" => Trend::Rising,
            "FALLING" | "DOWN" => Trend::Falling,
            "STABLE" | "FLAT" => Trend::Stable,
            _ => Trend::Unknown,
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Rising => write!(f, "rising"),
            Trend::Falling => write!(f, "falling"),
            Trend::Stable => write!(f, "stable"),
            Trend::Unknown => write!(f, "unknown"),
        }
    }
}

/// Scope of a video: the whole franchise or a slice of it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Scope {
    Full,
    Partial,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Full => write!(f, "full"),
            Scope::Partial => write!(f, "partial"),
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Scope::Full),
            "partial" => Ok(Scope::Partial),
            _ => Err(anyhow::anyhow!("Invalid scope: {}", s)),
        }
    }
}

/// Three-level upload risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Safe,
    Caution,
    Danger,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Safe => write!(f, "safe"),
            RiskLevel::Caution => write!(f, "caution"),
            RiskLevel::Danger => write!(f, "danger"),
        }
    }
}

/// User-tunable decision thresholds (persisted as the `settings` blob)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Episode count from which a TV franchise is automatically endurance format
    pub episode_absurd_threshold: u32,

    /// Total hours above which a TV franchise is automatically endurance format
    pub runtime_hours_threshold: u32,
}

impl Settings {
    pub const EPISODE_RANGE: std::ops::RangeInclusive<u32> = 300..=1000;
    pub const RUNTIME_HOURS_RANGE: std::ops::RangeInclusive<u32> = 50..=300;

    /// Check both thresholds are inside their calibration ranges
    pub fn validate(&self) -> anyhow::Result<()> {
        if !Self::EPISODE_RANGE.contains(&self.episode_absurd_threshold) {
            anyhow::bail!(
                "Episode threshold {} outside {}..={}",
                self.episode_absurd_threshold,
                Self::EPISODE_RANGE.start(),
                Self::EPISODE_RANGE.end()
            );
        }
        if !Self::RUNTIME_HOURS_RANGE.contains(&self.runtime_hours_threshold) {
            anyhow::bail!(
                "Runtime threshold {} outside {}..={}",
                self.runtime_hours_threshold,
                Self::RUNTIME_HOURS_RANGE.start(),
                Self::RUNTIME_HOURS_RANGE.end()
            );
        }
        Ok(())
    }

    /// Coerce both thresholds into their calibration ranges
    pub fn clamped(self) -> Self {
        Self {
            episode_absurd_threshold: self
                .episode_absurd_threshold
                .clamp(*Self::EPISODE_RANGE.start(), *Self::EPISODE_RANGE.end()),
            runtime_hours_threshold: self
                .runtime_hours_threshold
                .clamp(*Self::RUNTIME_HOURS_RANGE.start(), *Self::RUNTIME_HOURS_RANGE.end()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            episode_absurd_threshold: 600,
            runtime_hours_threshold: 150,
        }
    }
}

/// Facts about a franchise fed through the decision gates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseInput {
    pub media_type: MediaType,
    pub unit_count: u32,
    pub average_unit_length_minutes: u32,
    pub cultural_perception: CulturalPerception,
    pub content_variety: ContentVariety,
    /// Unanswered until the last gate is reached
    pub fandom_vibe: Option<FandomVibe>,
}

impl FranchiseInput {
    /// Total runtime in hours (fractional)
    pub fn total_hours(&self) -> f64 {
        f64::from(self.unit_count) * f64::from(self.average_unit_length_minutes) / 60.0
    }
}

/// Free-text performance notes for a published video
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Performance {
    #[serde(default)]
    pub views: String,
    #[serde(default)]
    pub ctr: String,
}

fn default_virality() -> u8 {
    5
}

/// One analysed franchise in the local library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub id: i64,
    pub title: String,
    pub format: VideoFormat,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub unit_count: Option<u32>,
    #[serde(default = "default_virality")]
    pub virality_score: u8,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub performance: Performance,
    #[serde(default)]
    pub link: Option<String>,
}

impl LibraryEntry {
    /// An entry with a video link has been published
    pub fn is_completed(&self) -> bool {
        self.link.as_deref().is_some_and(|l| !l.trim().is_empty())
    }
}

/// Last-known upload facts (persisted as the `schedule` blob)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub last_upload_date: NaiveDate,
    pub last_scope: Scope,
    pub last_format: VideoFormat,
    pub next_scope: Scope,
}

/// Derived cooldown verdict (never persisted)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleVerdict {
    pub required_cooldown_weeks: u32,
    pub safe_date: NaiveDate,
    pub days_remaining: i64,
    pub risk_level: RiskLevel,
    pub rationale: String,
}

impl ScheduleVerdict {
    /// Human-readable status line
    pub fn status_line(&self) -> String {
        if self.days_remaining > 0 {
            format!("{} days cooldown remaining", self.days_remaining)
        } else {
            "You are clear to post.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_and_parse() {
        assert_eq!(VideoFormat::OneSitting.to_string(), "ONE SITTING");
        assert_eq!("ONE SITTING".parse::<VideoFormat>().unwrap(), VideoFormat::OneSitting);
        assert_eq!("one_sitting".parse::<VideoFormat>().unwrap(), VideoFormat::OneSitting);
        assert_eq!("Ranking".parse::<VideoFormat>().unwrap(), VideoFormat::Ranking);
        assert!("MAYBE".parse::<VideoFormat>().is_err());
    }

    #[test]
    fn test_format_serde_accepts_display_alias() {
        let f: VideoFormat = serde_json::from_str("\"ONE SITTING\"").unwrap();
        assert_eq!(f, VideoFormat::OneSitting);
        assert_eq!(serde_json::to_string(&f).unwrap(), "\"ONE_SITTING\"");
    }

    #[test]
    fn test_settings_ranges() {
        assert!(Settings::default().validate().is_ok());

        let low = Settings {
            episode_absurd_threshold: 10,
            runtime_hours_threshold: 500,
        };
        assert!(low.validate().is_err());

        let fixed = low.clamped();
        assert_eq!(fixed.episode_absurd_threshold, 300);
        assert_eq!(fixed.runtime_hours_threshold, 300);
    }

    #[test]
    fn test_library_entry_defaults() {
        let json = r#"{"id": 1, "title": "Marvel", "format": "RANKING"}"#;
        let entry: LibraryEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.virality_score, 5);
        assert_eq!(entry.trend, Trend::Unknown);
        assert!(entry.competitors.is_empty());
        assert_eq!(entry.performance, Performance::default());
        assert!(!entry.is_completed());
    }

    #[test]
    fn test_library_entry_round_trip() {
        let entry = LibraryEntry {
            id: 1_704_067_200_000,
            title: "Naruto".to_string(),
            format: VideoFormat::OneSitting,
            media_type: Some(MediaType::Tv),
            unit_count: Some(720),
            virality_score: 8,
            trend: Trend::Rising,
            reasoning: "Huge and repetitive.".to_string(),
            competitors: Vec::new(),
            performance: Performance::default(),
            link: None,
        };

        let json = serde_json::to_string(&entry).unwrap();
        let back: LibraryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_trend_lenient() {
        assert_eq!(Trend::parse_lenient("rising"), Trend::Rising);
        assert_eq!(Trend::parse_lenient("sideways"), Trend::Unknown);
    }

    #[test]
    fn test_total_hours() {
        let input = FranchiseInput {
            media_type: MediaType::Tv,
            unit_count: 50,
            average_unit_length_minutes: 20,
            cultural_perception: CulturalPerception::Standard,
            content_variety: ContentVariety::HighVariety,
            fandom_vibe: None,
        };
        assert!((input.total_hours() - 16.666).abs() < 0.01);
    }
}
