//! Generated text: the once-a-day motivational quote and study advice.

mod advice;
mod cache;

use async_trait::async_trait;
use thiserror::Error;

pub use advice::{study_advice, ADVICE_EMPTY_FALLBACK, ADVICE_ERROR_FALLBACK};
pub use cache::{CachedQuote, QuoteCache, FALLBACK_QUOTE, QUOTE_TIMEOUT};

/// Sampling parameters for a single generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No API key configured for the text generator")]
    MissingCredential,

    #[error("Generation request failed: {0}")]
    Request(String),

    #[error("Generator returned status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Generator returned no text")]
    Empty,

    #[error("Generation timed out")]
    Timeout,
}

/// A text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, GenerationError>;
}
