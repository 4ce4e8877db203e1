//! In-memory generator for flow tests.

use advisor::Generator;
use async_trait::async_trait;
use serde_json::Value;
use shared::StrategyError;
use std::sync::Mutex;

/// Replays canned responses and records every prompt it receives
pub struct FakeGenerator {
    responses: Mutex<Vec<Option<Value>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    /// Responses are served in order; `None` simulates a failed call
    pub fn new(responses: Vec<Option<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().rev().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<Value, StrategyError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop()
            .flatten()
            .ok_or_else(|| StrategyError::GenerationUnavailable("fake outage".to_string()))
    }
}
