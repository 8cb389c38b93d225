use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GenerationError, GenerationOptions, TextGenerator};

/// Shown whenever no generated quote is available.
pub const FALLBACK_QUOTE: &str = "Hoje, você pode ser melhor do que foi ontem.";

/// Upper bound on a single quote request.
pub const QUOTE_TIMEOUT: Duration = Duration::from_secs(10);

const QUOTE_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.8,
    max_output_tokens: 60,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedQuote {
    pub day: NaiveDate,
    pub text: String,
}

/// Single-slot cache holding at most one quote per calendar day.
///
/// The generator is asked at most once per day; failures are cached too, so
/// an unavailable generator is not retried until the day changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteCache {
    #[serde(default)]
    slot: Option<CachedQuote>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self) -> Option<&CachedQuote> {
        self.slot.as_ref()
    }

    /// Returns today's quote, generating and storing it on a miss.
    pub async fn get_quote(
        &mut self,
        generator: Option<&dyn TextGenerator>,
        user_name: &str,
        today: NaiveDate,
    ) -> String {
        if let Some(hit) = self.slot.as_ref().filter(|c| c.day == today) {
            return hit.text.clone();
        }

        let text = match generator {
            Some(generator) => match generate_quote(generator, user_name).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Quote generation failed, using fallback: {}", e);
                    FALLBACK_QUOTE.to_string()
                }
            },
            None => {
                tracing::debug!("No text generator configured, using fallback quote");
                FALLBACK_QUOTE.to_string()
            }
        };

        self.slot = Some(CachedQuote {
            day: today,
            text: text.clone(),
        });
        text
    }
}

async fn generate_quote(
    generator: &dyn TextGenerator,
    user_name: &str,
) -> Result<String, GenerationError> {
    let prompt = format!(
        "Gere uma frase motivacional curta e impactante (máximo 15 palavras) em português \
         para o usuário {}. O foco deve ser produtividade, disciplina e foco. Use \
         obrigatoriamente um tom similar a: \"{}\"",
        user_name, FALLBACK_QUOTE
    );

    let raw = tokio::time::timeout(QUOTE_TIMEOUT, generator.generate(&prompt, QUOTE_OPTIONS))
        .await
        .map_err(|_| GenerationError::Timeout)??;

    let text = raw.replace('"', "");
    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeGenerator, Reply};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[tokio::test]
    async fn test_generates_once_per_day() {
        let generator = FakeGenerator::new(Reply::Text("\"Foco total, Ana.\"".into()));
        let mut cache = QuoteCache::new();

        let first = cache.get_quote(Some(&generator), "Ana", day(1)).await;
        let second = cache.get_quote(Some(&generator), "Ana", day(1)).await;

        assert_eq!(first, "Foco total, Ana.");
        assert_eq!(second, first);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_new_day_regenerates() {
        let generator = FakeGenerator::new(Reply::Text("Bom dia".into()));
        let mut cache = QuoteCache::new();

        cache.get_quote(Some(&generator), "Ana", day(1)).await;
        cache.get_quote(Some(&generator), "Ana", day(2)).await;

        assert_eq!(generator.calls(), 2);
        assert_eq!(cache.cached().unwrap().day, day(2));
    }

    #[tokio::test]
    async fn test_prompt_mentions_user() {
        let generator = FakeGenerator::new(Reply::Text("ok".into()));
        let mut cache = QuoteCache::new();
        cache.get_quote(Some(&generator), "Bruno", day(1)).await;

        let prompts = generator.prompts();
        assert!(prompts[0].contains("Bruno"));
        assert_eq!(
            generator.last_options(),
            Some(GenerationOptions {
                temperature: 0.8,
                max_output_tokens: 60
            })
        );
    }

    #[tokio::test]
    async fn test_failure_caches_fallback() {
        let generator = FakeGenerator::new(Reply::Fail);
        let mut cache = QuoteCache::new();

        let quote = cache.get_quote(Some(&generator), "Ana", day(1)).await;
        assert_eq!(quote, FALLBACK_QUOTE);

        let again = cache.get_quote(Some(&generator), "Ana", day(1)).await;
        assert_eq!(again, FALLBACK_QUOTE);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let generator = FakeGenerator::new(Reply::Text("\"\"".into()));
        let mut cache = QuoteCache::new();
        let quote = cache.get_quote(Some(&generator), "Ana", day(1)).await;
        assert_eq!(quote, FALLBACK_QUOTE);
    }

    #[tokio::test]
    async fn test_no_generator_uses_fallback() {
        let mut cache = QuoteCache::new();
        let quote = cache.get_quote(None, "Ana", day(1)).await;
        assert_eq!(quote, FALLBACK_QUOTE);
        assert_eq!(cache.cached().unwrap().text, FALLBACK_QUOTE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_generator_times_out() {
        let generator = FakeGenerator::new(Reply::Hang);
        let mut cache = QuoteCache::new();
        let quote = cache.get_quote(Some(&generator), "Ana", day(1)).await;
        assert_eq!(quote, FALLBACK_QUOTE);
    }

    #[test]
    fn test_cache_serde() {
        let cache = QuoteCache {
            slot: Some(CachedQuote {
                day: day(3),
                text: "Avante".into(),
            }),
        };
        let json = serde_json::to_string(&cache).unwrap();
        assert!(json.contains("2024-05-03"));
        let parsed: QuoteCache = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cache);

        let empty: QuoteCache = serde_json::from_str("{}").unwrap();
        assert!(empty.cached().is_none());
    }
}
