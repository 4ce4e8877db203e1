//! Generator-backed format analysis with library auto-save.

use crate::advisory::{evaluate_from_advisory, Advisory};
use crate::gates::Verdict;
use advisor::{prompts, Generator};
use shared::{Library, Settings, StrategyError};
use tracing::{debug, info, warn};

/// Result of a successful analysis
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub advisory: Advisory,
    pub verdict: Verdict,
    /// Id of the new library entry, `None` when the title was already saved
    pub saved_id: Option<i64>,
}

/// Ask the generator about `franchise`, validate the answer and save it
///
/// A blank name is a no-op and yields `Ok(None)` without calling the
/// generator. Nothing is written to `library` unless the advisory validates.
/// The caller persists the library afterwards.
pub async fn analyze_franchise<G: Generator + ?Sized>(
    generator: &G,
    library: &mut Library,
    settings: &Settings,
    franchise: &str,
) -> Result<Option<AnalysisOutcome>, StrategyError> {
    let franchise = franchise.trim();
    if franchise.is_empty() {
        debug!("Blank franchise name, nothing to analyze");
        return Ok(None);
    }

    info!(franchise = %franchise, "Requesting format analysis");
    let raw = generator
        .generate(&prompts::format_analysis(franchise, settings))
        .await?;

    let advisory = evaluate_from_advisory(&raw).map_err(|e| {
        warn!(franchise = %franchise, error = %e, "Rejected advisory");
        e
    })?;

    let entry = advisory.to_library_entry(library.next_id(), franchise);
    let saved_id = library.insert_unique_title(entry);
    let verdict = advisory.verdict();

    info!(
        franchise = %franchise,
        format = %verdict.format,
        virality = advisory.virality_score,
        saved = saved_id.is_some(),
        "Format analysis complete"
    );

    Ok(Some(AnalysisOutcome {
        advisory,
        verdict,
        saved_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGenerator;
    use serde_json::json;
    use shared::VideoFormat;

    fn naruto() -> serde_json::Value {
        json!({
            "title": "Naruto",
            "mediaType": "TV",
            "count": 720,
            "recommendedFormat": "ONE_SITTING",
            "reasoning": "Hundreds of episodes."
        })
    }

    #[tokio::test]
    async fn test_analysis_saves_entry() {
        let generator = FakeGenerator::new(vec![Some(naruto())]);
        let mut library = Library::default();

        let outcome = analyze_franchise(&generator, &mut library, &Settings::default(), "naruto")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.verdict.format, VideoFormat::OneSitting);
        let id = outcome.saved_id.unwrap();
        assert_eq!(library.get(id).unwrap().title, "Naruto");
        assert_eq!(library.get(id).unwrap().virality_score, 5);

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("\"naruto\""));
    }

    #[tokio::test]
    async fn test_duplicate_titles_saved_once() {
        let generator = FakeGenerator::new(vec![Some(naruto()), Some(naruto())]);
        let mut library = Library::default();
        let settings = Settings::default();

        let first = analyze_franchise(&generator, &mut library, &settings, "Naruto")
            .await
            .unwrap()
            .unwrap();
        let second = analyze_franchise(&generator, &mut library, &settings, "Naruto")
            .await
            .unwrap()
            .unwrap();

        assert!(first.saved_id.is_some());
        assert!(second.saved_id.is_none());
        assert_eq!(
            library.entries().iter().filter(|e| e.title == "Naruto").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_malformed_advisory_leaves_library_untouched() {
        let generator = FakeGenerator::new(vec![Some(json!({"recommendedFormat": "MAYBE"}))]);
        let mut library = Library::default();

        let result = analyze_franchise(&generator, &mut library, &Settings::default(), "Naruto").await;

        assert!(matches!(result, Err(StrategyError::MalformedAdvisory(_))));
        assert!(library.is_empty());
    }

    #[tokio::test]
    async fn test_generator_outage() {
        let generator = FakeGenerator::new(vec![None]);
        let mut library = Library::default();

        let result = analyze_franchise(&generator, &mut library, &Settings::default(), "Naruto").await;

        assert!(matches!(result, Err(StrategyError::GenerationUnavailable(_))));
        assert!(library.is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_skips_generator() {
        let generator = FakeGenerator::new(vec![]);
        let mut library = Library::default();

        let result = analyze_franchise(&generator, &mut library, &Settings::default(), "  ").await;

        assert!(matches!(result, Ok(None)));
        assert!(library.is_empty());
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_title_uses_query() {
        let generator = FakeGenerator::new(vec![Some(json!({"recommendedFormat": "RANKING"}))]);
        let mut library = Library::default();

        let outcome = analyze_franchise(&generator, &mut library, &Settings::default(), "Pixar")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(library.get(outcome.saved_id.unwrap()).unwrap().title, "Pixar");
    }
}
