//! Tagged failures reported by the decision engine, the generator boundary
//! and the blob store.
//!
//! None of these are fatal: callers show a retry affordance or fall back to
//! defaults.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    /// Generator response is missing required fields or carries an unknown format
    #[error("malformed advisory: {0}")]
    MalformedAdvisory(String),

    /// Gate sequence reached the fandom gate without an answer
    #[error("incomplete input: {0}")]
    IncompleteInput(String),

    /// Network, HTTP or parse failure in the generator call
    #[error("generation unavailable: {0}")]
    GenerationUnavailable(String),

    /// Stored blob could not be decoded
    #[error("persisted blob '{key}' is corrupt: {source}")]
    PersistenceCorrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StrategyError {
    /// Message shown to the user for a failed analysis
    pub fn user_message(&self) -> &'static str {
        match self {
            StrategyError::MalformedAdvisory(_) | StrategyError::GenerationUnavailable(_) => {
                "Analysis failed, try again."
            }
            StrategyError::IncompleteInput(_) => "Answer every gate before asking for a verdict.",
            StrategyError::PersistenceCorrupt { .. } => "Saved data was unreadable and has been reset.",
        }
    }
}
