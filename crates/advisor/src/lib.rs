//! Client for the external text generator.
//!
//! Builds natural-language prompts, sends them to the Gemini
//! `generateContent` endpoint, and turns whatever comes back into a JSON
//! object or a `GenerationUnavailable` failure. Nothing returned here is
//! trusted; callers shape-check every field they use.

pub mod client;
pub mod ideas;
pub mod parse;
pub mod prompts;
pub mod types;

pub use client::{GeminiClient, Generator};
pub use ideas::ContentIdeas;
pub use parse::parse_generated_json;
