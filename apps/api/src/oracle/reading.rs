//! Oracle reading: orchestrates one request end to end.
//!
//! Flow: catalog lookup (fallback to oracle) → card draw (card categories only)
//!       → compose prompt → generate → structure sections → response.
//!
//! Preparation is synchronous and takes the random source by reference, so the
//! thread-local generator never lives across the single `.await`.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{self, ReadingKind};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::oracle::composer::{compose, PromptRequest, Tier};
use crate::oracle::sections::{structure, StructuredSection};
use crate::tarot::{all_cards, draw, DrawnCardView};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Raw, untrusted request inputs as received from the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct ReadingRequest {
    pub category: String,
    pub tier: String,
    pub query: String,
}

/// A composed prompt ready to be sent.
#[derive(Debug, Clone)]
pub struct PreparedReading {
    pub request: PromptRequest,
    pub prompt: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadingResponse {
    /// Generated text exactly as returned. Empty when the upstream reply had no text.
    pub text: String,
    /// Category actually used, after fallback.
    pub category: &'static str,
    pub tier: Tier,
    /// `null` for categories that do not draw cards.
    pub drawn_cards: Option<Vec<DrawnCardView>>,
    pub sections: Vec<StructuredSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Resolves the category and tier, draws cards when needed, and composes the prompt.
pub fn prepare_reading<R: Rng>(
    input: &ReadingRequest,
    date: NaiveDate,
    rng: &mut R,
) -> Result<PreparedReading, AppError> {
    let category = catalog::lookup(&input.category);
    let tier = Tier::parse(&input.tier);

    let drawn_cards = match category.kind {
        ReadingKind::Cards { count } => draw(all_cards(), count, rng).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Category '{}' is misconfigured: {e}",
                category.slug
            ))
        })?,
        ReadingKind::Guidance => Vec::new(),
    };

    let request = PromptRequest {
        category,
        tier,
        date,
        query: input.query.trim().to_string(),
        drawn_cards,
    };

    Ok(PreparedReading {
        prompt: compose(&request),
        temperature: request.template().temperature(),
        request,
    })
}

/// Sends the prepared prompt and structures the reply.
pub async fn generate_reading(
    generator: &dyn TextGenerator,
    prepared: PreparedReading,
) -> Result<ReadingResponse, AppError> {
    let PreparedReading {
        request,
        prompt,
        temperature,
    } = prepared;

    let text = generator.generate(&prompt, temperature).await?;
    if text.is_empty() {
        warn!(
            "Empty generation for category '{}'; returning empty reading",
            request.category.slug
        );
    }

    let sections = structure(&text);
    let drawn_cards: Option<Vec<DrawnCardView>> = request
        .category
        .requires_cards()
        .then(|| request.drawn_cards.iter().map(DrawnCardView::from).collect());

    info!(
        "Reading complete: category={}, tier={:?}, cards={}, sections={}",
        request.category.slug,
        request.tier,
        request.drawn_cards.len(),
        sections.len()
    );

    Ok(ReadingResponse {
        text,
        category: request.category.slug,
        tier: request.tier,
        drawn_cards,
        sections,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::oracle::prompts::SAFETY_RULES;

    /// Records the prompt it receives and answers with a fixed reply.
    struct StubGenerator {
        reply: Result<String, fn() -> LlmError>,
        seen: Mutex<Vec<(String, f32)>>,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> LlmError) -> Self {
            Self {
                reply: Err(err),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.to_string(), temperature));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    const TAROT_REPLY: &str = "【カードの読み解き】流れは穏やか\n【行動のヒント】\n・深呼吸\n・散歩\n・早寝\n【ひとことメッセージ】大丈夫";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn input(category: &str, tier: &str, query: &str) -> ReadingRequest {
        ReadingRequest {
            category: category.to_string(),
            tier: tier.to_string(),
            query: query.to_string(),
        }
    }

    #[tokio::test]
    async fn test_tarot_reading_end_to_end() {
        let mut rng = StdRng::seed_from_u64(5);
        let prepared = prepare_reading(&input("tarot", "free", ""), date(), &mut rng).unwrap();

        let cards = prepared.request.drawn_cards.clone();
        assert_eq!(cards.len(), 3);
        assert_eq!(
            cards.iter().map(|c| c.position).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        for c in &cards {
            let line = format!("{}：{}（{}）", c.role, c.card.name, c.orientation_label());
            assert!(prepared.prompt.contains(&line));
        }

        let stub = StubGenerator::replying(TAROT_REPLY);
        let response = generate_reading(&stub, prepared).await.unwrap();

        assert_eq!(response.category, "tarot");
        assert_eq!(response.tier, Tier::Free);
        assert_eq!(response.text, TAROT_REPLY);

        let titles: Vec<_> = response.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["カードの読み解き", "行動のヒント", "ひとことメッセージ"]);
        assert_eq!(
            response.sections[1].hints.as_deref(),
            Some(&["深呼吸".to_string(), "散歩".to_string(), "早寝".to_string()][..])
        );

        let views = response.drawn_cards.expect("tarot returns cards");
        assert_eq!(views.len(), 3);
        let roles: Vec<_> = views.iter().map(|v| v.role.as_str()).collect();
        assert_eq!(roles, vec!["過去", "現在", "助言"]);
        for (view, card) in views.iter().zip(&cards) {
            assert_eq!(view.slug, card.card.slug);
            assert_eq!(view.reversed, card.reversed);
        }

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!((seen[0].1 - 0.7).abs() < f32::EPSILON);
        assert!(seen[0].0.contains(SAFETY_RULES));
    }

    #[tokio::test]
    async fn test_unknown_category_falls_back_to_oracle_without_cards() {
        let mut rng = StdRng::seed_from_u64(5);
        let prepared =
            prepare_reading(&input("Unknown%20Genre", "PREMIUM", "  仕事  "), date(), &mut rng)
                .unwrap();
        assert!(prepared.request.drawn_cards.is_empty());
        assert_eq!(prepared.request.query, "仕事");
        assert!((prepared.temperature - 0.9).abs() < f32::EPSILON);

        let stub = StubGenerator::replying("【今日の指針】よい日");
        let response = generate_reading(&stub, prepared).await.unwrap();
        assert_eq!(response.category, "oracle");
        assert_eq!(response.tier, Tier::Premium);
        assert!(response.drawn_cards.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["drawn_cards"].is_null());
        assert_eq!(json["tier"], "premium");
    }

    #[tokio::test]
    async fn test_empty_generation_is_not_an_error() {
        let mut rng = StdRng::seed_from_u64(5);
        let prepared = prepare_reading(&input("oracle", "free", ""), date(), &mut rng).unwrap();
        let response = generate_reading(&StubGenerator::replying(""), prepared)
            .await
            .unwrap();
        assert_eq!(response.text, "");
        assert!(response.sections.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_becomes_configuration_error() {
        let mut rng = StdRng::seed_from_u64(5);
        let prepared = prepare_reading(&input("oracle", "free", ""), date(), &mut rng).unwrap();
        let stub = StubGenerator::failing(|| LlmError::MissingCredential("OPENAI_API_KEY".into()));
        let err = generate_reading(&stub, prepared).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_upstream_error() {
        let mut rng = StdRng::seed_from_u64(5);
        let prepared = prepare_reading(&input("tarot", "free", ""), date(), &mut rng).unwrap();
        let stub = StubGenerator::failing(|| LlmError::Api {
            status: 503,
            message: "overloaded".into(),
        });
        let err = generate_reading(&stub, prepared).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
