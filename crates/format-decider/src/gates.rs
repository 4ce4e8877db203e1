//! Manual decision gates.
//!
//! Gates run strictly in order and the first one to reach a verdict ends the
//! evaluation. The media-type gate never decides; it only picks which
//! thresholds the volume and runtime gates compare against.

use serde::Serialize;
use shared::{
    ContentVariety, CulturalPerception, FandomVibe, FranchiseInput, MediaType, Settings,
    StrategyError, VideoFormat,
};
use tracing::debug;

/// Film count from which a movie franchise is endurance format
pub const MOVIE_VOLUME_THRESHOLD: u32 = 60;

/// Total hours above which a movie franchise is endurance format
pub const MOVIE_RUNTIME_HOURS: u32 = 60;

/// One step of the manual sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    MediaType,
    Volume,
    Runtime,
    CulturalPerception,
    Variety,
    Fandom,
}

impl Gate {
    /// Evaluation order
    pub const SEQUENCE: [Gate; 6] = [
        Gate::MediaType,
        Gate::Volume,
        Gate::Runtime,
        Gate::CulturalPerception,
        Gate::Variety,
        Gate::Fandom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Gate::MediaType => "media type",
            Gate::Volume => "volume",
            Gate::Runtime => "runtime",
            Gate::CulturalPerception => "cultural perception",
            Gate::Variety => "variety",
            Gate::Fandom => "fandom",
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Format verdict with its rationale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub format: VideoFormat,
    pub rationale: String,
    /// Gate that ended the sequence; `None` for advisory verdicts
    pub decided_by: Option<Gate>,
}

/// Thresholds chosen by the media-type gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GateContext {
    volume_threshold: u32,
    runtime_hours_threshold: u32,
}

impl GateContext {
    fn for_media(media_type: MediaType, settings: &Settings) -> Self {
        match media_type {
            MediaType::Movie => Self {
                volume_threshold: MOVIE_VOLUME_THRESHOLD,
                runtime_hours_threshold: MOVIE_RUNTIME_HOURS,
            },
            MediaType::Tv => Self {
                volume_threshold: settings.episode_absurd_threshold,
                runtime_hours_threshold: settings.runtime_hours_threshold,
            },
        }
    }
}

enum GateOutcome {
    Continue,
    Decide(VideoFormat, String),
}

/// Run the manual gate sequence
pub fn evaluate(input: &FranchiseInput, settings: &Settings) -> Result<Verdict, StrategyError> {
    let context = GateContext::for_media(input.media_type, settings);

    for gate in Gate::SEQUENCE {
        let outcome = match gate {
            Gate::MediaType => {
                debug!(
                    media_type = %input.media_type,
                    volume_threshold = context.volume_threshold,
                    runtime_hours_threshold = context.runtime_hours_threshold,
                    "Thresholds selected"
                );
                GateOutcome::Continue
            }
            Gate::Volume => volume_gate(input, &context),
            Gate::Runtime => runtime_gate(input, &context),
            Gate::CulturalPerception => culture_gate(input),
            Gate::Variety => variety_gate(input),
            Gate::Fandom => fandom_gate(input)?,
        };

        match outcome {
            GateOutcome::Continue => debug!(gate = %gate, "Gate passed"),
            GateOutcome::Decide(format, reason) => {
                debug!(gate = %gate, format = %format, "Gate decided");
                return Ok(Verdict {
                    format,
                    rationale: reason,
                    decided_by: Some(gate),
                });
            }
        }
    }

    // The fandom gate always decides or fails
    Err(StrategyError::IncompleteInput(
        "gate sequence ended without a verdict".to_string(),
    ))
}

fn volume_gate(input: &FranchiseInput, context: &GateContext) -> GateOutcome {
    if input.unit_count < context.volume_threshold {
        return GateOutcome::Continue;
    }
    let reason = match input.media_type {
        MediaType::Movie => format!(
            "{} movies reaches the {}-film endurance mark.",
            input.unit_count, context.volume_threshold
        ),
        MediaType::Tv => format!(
            "{} episodes reaches the {}-episode absurdity threshold.",
            input.unit_count, context.volume_threshold
        ),
    };
    GateOutcome::Decide(VideoFormat::OneSitting, reason)
}

fn runtime_gate(input: &FranchiseInput, context: &GateContext) -> GateOutcome {
    let total_hours = input.total_hours();
    if total_hours > f64::from(context.runtime_hours_threshold) {
        GateOutcome::Decide(
            VideoFormat::OneSitting,
            format!(
                "{:.1} total hours exceeds the {}-hour runtime threshold.",
                total_hours, context.runtime_hours_threshold
            ),
        )
    } else {
        GateOutcome::Continue
    }
}

fn culture_gate(input: &FranchiseInput) -> GateOutcome {
    match input.cultural_perception {
        CulturalPerception::LegendaryLength => GateOutcome::Decide(
            VideoFormat::OneSitting,
            "Known for its legendary length, so finishing it is the story.".to_string(),
        ),
        CulturalPerception::Standard => GateOutcome::Continue,
    }
}

fn variety_gate(input: &FranchiseInput) -> GateOutcome {
    match input.content_variety {
        ContentVariety::HighVariety => GateOutcome::Decide(
            VideoFormat::Ranking,
            "Entries stand apart enough to be judged best to worst.".to_string(),
        ),
        ContentVariety::Repetitive => GateOutcome::Continue,
    }
}

fn fandom_gate(input: &FranchiseInput) -> Result<GateOutcome, StrategyError> {
    match input.fandom_vibe {
        Some(FandomVibe::Debate) => Ok(GateOutcome::Decide(
            VideoFormat::Ranking,
            "The fandom argues about quality and wants lists.".to_string(),
        )),
        Some(FandomVibe::Chaos) => Ok(GateOutcome::Decide(
            VideoFormat::OneSitting,
            "The fandom memes about the pain, so lean into the endurance.".to_string(),
        )),
        None => Err(StrategyError::IncompleteInput(
            "fandom vibe is required at the fandom gate".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv(count: u32, length: u32) -> FranchiseInput {
        FranchiseInput {
            media_type: MediaType::Tv,
            unit_count: count,
            average_unit_length_minutes: length,
            cultural_perception: CulturalPerception::Standard,
            content_variety: ContentVariety::Repetitive,
            fandom_vibe: Some(FandomVibe::Debate),
        }
    }

    #[test]
    fn test_tv_volume_short_circuits() {
        let settings = Settings::default();
        for count in [600, 601, 5000] {
            let mut input = tv(count, 1);
            input.content_variety = ContentVariety::HighVariety;
            input.fandom_vibe = None;

            let verdict = evaluate(&input, &settings).unwrap();
            assert_eq!(verdict.format, VideoFormat::OneSitting);
            assert_eq!(verdict.decided_by, Some(Gate::Volume));
        }
    }

    #[test]
    fn test_movie_volume_uses_fixed_mark() {
        let settings = Settings::default();
        let mut input = tv(60, 1);
        input.media_type = MediaType::Movie;
        input.content_variety = ContentVariety::HighVariety;

        let verdict = evaluate(&input, &settings).unwrap();
        assert_eq!(verdict.format, VideoFormat::OneSitting);
        assert!(verdict.rationale.contains("60 movies"));

        input.unit_count = 59;
        let verdict = evaluate(&input, &settings).unwrap();
        assert_eq!(verdict.format, VideoFormat::Ranking);
        assert_eq!(verdict.decided_by, Some(Gate::Variety));
    }

    #[test]
    fn test_runtime_under_threshold_then_variety() {
        let settings = Settings {
            episode_absurd_threshold: 600,
            runtime_hours_threshold: 150,
        };
        let mut input = tv(50, 20);
        input.content_variety = ContentVariety::HighVariety;

        let verdict = evaluate(&input, &settings).unwrap();
        assert_eq!(verdict.format, VideoFormat::Ranking);
        assert_eq!(verdict.decided_by, Some(Gate::Variety));
    }

    #[test]
    fn test_runtime_is_strictly_greater() {
        let settings = Settings::default();

        // 300 x 30 min = exactly 150 hours, not above
        let verdict = evaluate(&tv(300, 30), &settings).unwrap();
        assert_eq!(verdict.decided_by, Some(Gate::Fandom));

        let verdict = evaluate(&tv(300, 31), &settings).unwrap();
        assert_eq!(verdict.format, VideoFormat::OneSitting);
        assert_eq!(verdict.decided_by, Some(Gate::Runtime));
    }

    #[test]
    fn test_movie_runtime_threshold() {
        let mut input = tv(40, 100);
        input.media_type = MediaType::Movie;

        // 66.7 hours > 60
        let verdict = evaluate(&input, &Settings::default()).unwrap();
        assert_eq!(verdict.decided_by, Some(Gate::Runtime));
    }

    #[test]
    fn test_legendary_length() {
        let mut input = tv(10, 20);
        input.cultural_perception = CulturalPerception::LegendaryLength;
        input.content_variety = ContentVariety::HighVariety;

        let verdict = evaluate(&input, &Settings::default()).unwrap();
        assert_eq!(verdict.format, VideoFormat::OneSitting);
        assert_eq!(verdict.decided_by, Some(Gate::CulturalPerception));
    }

    #[test]
    fn test_fandom_gate() {
        let settings = Settings::default();

        let verdict = evaluate(&tv(10, 20), &settings).unwrap();
        assert_eq!(verdict.format, VideoFormat::Ranking);

        let mut input = tv(10, 20);
        input.fandom_vibe = Some(FandomVibe::Chaos);
        let verdict = evaluate(&input, &settings).unwrap();
        assert_eq!(verdict.format, VideoFormat::OneSitting);
        assert!(!verdict.rationale.is_empty());
    }

    #[test]
    fn test_missing_fandom_is_incomplete() {
        let mut input = tv(10, 20);
        input.fandom_vibe = None;

        let result = evaluate(&input, &Settings::default());
        assert!(matches!(result, Err(StrategyError::IncompleteInput(_))));
    }

    #[test]
    fn test_calibrated_threshold_applies_to_tv_only() {
        let settings = Settings {
            episode_absurd_threshold: 300,
            runtime_hours_threshold: 300,
        };
        let verdict = evaluate(&tv(300, 1), &settings).unwrap();
        assert_eq!(verdict.decided_by, Some(Gate::Volume));
        assert!(verdict.rationale.contains("300-episode"));
    }
}
