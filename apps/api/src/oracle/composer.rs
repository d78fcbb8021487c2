//! Prompt Composer: turns a category, tier, date, query, and drawn cards into
//! the instruction text sent to the generator.
//!
//! Template choice is a dispatch on `Template`, derived from the category's
//! `ReadingKind`; the safety block is only ever filled from `SAFETY_RULES`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{normalize, Category, ReadingKind};
use crate::oracle::prompts::{
    CARDS_FREE_TEMPLATE, CARDS_PREMIUM_TEMPLATE, GUIDANCE_FREE_TEMPLATE,
    GUIDANCE_PREMIUM_TEMPLATE, NO_CARDS_PLACEHOLDER, NO_QUERY_PLACEHOLDER, QUERY_BLOCK,
    SAFETY_RULES,
};
use crate::tarot::DrawnCard;

/// Request variant. Selects template depth and nothing else: no entitlement check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Premium,
}

impl Tier {
    /// `premium` (after normalization) selects Premium; anything else is Free.
    pub fn parse(raw: &str) -> Self {
        if normalize(raw) == "premium" {
            Tier::Premium
        } else {
            Tier::Free
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Guidance,
    Cards,
}

impl Template {
    pub fn for_kind(kind: ReadingKind) -> Self {
        match kind {
            ReadingKind::Guidance => Template::Guidance,
            ReadingKind::Cards { .. } => Template::Cards,
        }
    }

    /// Card readings run cooler so the card meanings are read literally.
    pub fn temperature(self) -> f32 {
        match self {
            Template::Cards => 0.7,
            Template::Guidance => 0.9,
        }
    }

    fn body(self, tier: Tier) -> &'static str {
        match (self, tier) {
            (Template::Guidance, Tier::Free) => GUIDANCE_FREE_TEMPLATE,
            (Template::Guidance, Tier::Premium) => GUIDANCE_PREMIUM_TEMPLATE,
            (Template::Cards, Tier::Free) => CARDS_FREE_TEMPLATE,
            (Template::Cards, Tier::Premium) => CARDS_PREMIUM_TEMPLATE,
        }
    }
}

/// Everything the composer needs for one reading.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub category: &'static Category,
    pub tier: Tier,
    pub date: NaiveDate,
    /// Untrusted user text, already trimmed.
    pub query: String,
    /// Empty unless the category draws cards.
    pub drawn_cards: Vec<DrawnCard>,
}

impl PromptRequest {
    pub fn template(&self) -> Template {
        Template::for_kind(self.category.kind)
    }
}

/// One line per card: `1) 過去：愚者（正位置）`.
pub fn format_card_lines(cards: &[DrawnCard]) -> String {
    if cards.is_empty() {
        return NO_CARDS_PLACEHOLDER.to_string();
    }
    cards
        .iter()
        .map(|c| {
            format!(
                "{}) {}：{}（{}）",
                c.position + 1,
                c.role,
                c.card.name,
                c.orientation_label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the full instruction text.
///
/// The query goes in last so user text is never scanned for placeholders.
pub fn compose(request: &PromptRequest) -> String {
    let template = request.template();

    let mut prompt = template
        .body(request.tier)
        .replace("{title}", request.category.title)
        .replace("{today}", &request.date.format("%Y-%m-%d").to_string())
        .replace("{safety_rules}", SAFETY_RULES);

    if template == Template::Cards {
        prompt = prompt.replace("{cards}", &format_card_lines(&request.drawn_cards));
    }

    let query = if request.query.is_empty() {
        NO_QUERY_PLACEHOLDER
    } else {
        request.query.as_str()
    };

    prompt.replace("{query_block}", &QUERY_BLOCK.replace("{query}", query))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::lookup;
    use crate::oracle::prompts::{
        CARD_LINKS_HEADING, CARD_READING_HEADING, GUIDANCE_HEADING, HINTS_HEADING,
        KEYWORD_HEADING, MESSAGE_HEADING,
    };
    use crate::tarot::{all_cards, draw};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn request(slug: &str, tier: Tier, query: &str, drawn_cards: Vec<DrawnCard>) -> PromptRequest {
        PromptRequest {
            category: lookup(slug),
            tier,
            date: date(),
            query: query.to_string(),
            drawn_cards,
        }
    }

    fn tarot_cards() -> Vec<DrawnCard> {
        draw(all_cards(), 3, &mut StdRng::seed_from_u64(11)).unwrap()
    }

    fn heading(name: &str) -> String {
        format!("【{name}】")
    }

    #[test]
    fn test_tier_parse_defaults_to_free() {
        assert_eq!(Tier::parse("premium"), Tier::Premium);
        assert_eq!(Tier::parse(" PREMIUM "), Tier::Premium);
        assert_eq!(Tier::parse("free"), Tier::Free);
        assert_eq!(Tier::parse("gold"), Tier::Free);
        assert_eq!(Tier::parse(""), Tier::Free);
    }

    #[test]
    fn test_safety_rules_appear_verbatim_in_every_variant() {
        for slug in ["oracle", "love", "tarot"] {
            for tier in [Tier::Free, Tier::Premium] {
                let prompt = compose(&request(slug, tier, "", tarot_cards()));
                assert_eq!(
                    prompt.matches(SAFETY_RULES).count(),
                    1,
                    "{slug}/{tier:?} lacks the safety block"
                );
                assert!(!prompt.contains("{safety_rules}"));
            }
        }
    }

    #[test]
    fn test_guidance_prompt_requests_fixed_sections_in_order() {
        for tier in [Tier::Free, Tier::Premium] {
            let prompt = compose(&request("oracle", tier, "", vec![]));
            let positions: Vec<usize> = [
                GUIDANCE_HEADING,
                KEYWORD_HEADING,
                HINTS_HEADING,
                MESSAGE_HEADING,
            ]
            .iter()
            .map(|h| prompt.find(&heading(h)).expect("missing heading"))
            .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(prompt.matches("・具体的").count() + prompt.matches("・時間帯").count(), 3);
        }
    }

    #[test]
    fn test_guidance_prompt_substitutes_title_date_and_placeholder_query() {
        let prompt = compose(&request("career", Tier::Free, "", vec![]));
        assert!(prompt.contains("AI仕事占い"));
        assert!(prompt.contains("2026-10-16"));
        assert!(prompt.contains(NO_QUERY_PLACEHOLDER));
        assert!(!prompt.contains('{'), "unfilled placeholder in {prompt}");
    }

    #[test]
    fn test_premium_asks_for_more_than_free() {
        let free = compose(&request("oracle", Tier::Free, "", vec![]));
        let premium = compose(&request("oracle", Tier::Premium, "", vec![]));
        assert!(free.contains("無料"));
        assert!(premium.contains("Premium"));
        assert!(premium.contains("4〜6文"));

        let cards_premium = compose(&request("tarot", Tier::Premium, "", tarot_cards()));
        assert!(cards_premium.contains(&heading(CARD_LINKS_HEADING)));
        let cards_free = compose(&request("tarot", Tier::Free, "", tarot_cards()));
        assert!(!cards_free.contains(&heading(CARD_LINKS_HEADING)));
    }

    #[test]
    fn test_cards_prompt_lists_every_drawn_card() {
        let cards = tarot_cards();
        let prompt = compose(&request("tarot", Tier::Free, "転職すべき？", cards.clone()));

        assert!(prompt.contains(&heading(CARD_READING_HEADING)));
        assert!(prompt.contains("「転職すべき？」"));
        for c in &cards {
            let line = format!(
                "{}) {}：{}（{}）",
                c.position + 1,
                c.role,
                c.card.name,
                c.orientation_label()
            );
            assert!(prompt.contains(&line), "missing line {line}");
        }
    }

    #[test]
    fn test_cards_prompt_with_empty_draw_renders_placeholder() {
        let prompt = compose(&request("tarot", Tier::Free, "", vec![]));
        assert!(prompt.contains(NO_CARDS_PLACEHOLDER));
        assert!(!prompt.contains("{cards}"));
    }

    #[test]
    fn test_query_text_is_not_expanded_as_placeholder() {
        let prompt = compose(&request("oracle", Tier::Free, "{safety_rules} {today}", vec![]));
        assert!(prompt.contains("「{safety_rules} {today}」"));
        assert_eq!(prompt.matches(SAFETY_RULES).count(), 1);
    }

    #[test]
    fn test_temperature_by_template() {
        assert_eq!(request("tarot", Tier::Free, "", vec![]).template(), Template::Cards);
        assert_eq!(request("oracle", Tier::Free, "", vec![]).template(), Template::Guidance);
        assert!(Template::Cards.temperature() < Template::Guidance.temperature());
        for t in [Template::Cards, Template::Guidance] {
            assert!((0.0..=1.0).contains(&t.temperature()));
        }
    }

    #[test]
    fn test_format_card_lines() {
        let cards = tarot_cards();
        let lines = format_card_lines(&cards);
        assert_eq!(lines.lines().count(), 3);
        assert!(lines.starts_with("1) 過去："));
        assert_eq!(format_card_lines(&[]), NO_CARDS_PLACEHOLDER);
    }
}
