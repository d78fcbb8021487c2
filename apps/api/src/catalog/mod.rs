//! Category Catalog: the static table of reading genres.
//!
//! Lookups normalize the client-supplied slug (percent-decode, trim, lowercase)
//! and never fail: an unknown slug resolves to the general-purpose oracle.

use std::borrow::Cow;

use serde::Serialize;
use tracing::warn;

/// Slug of the category every unknown lookup falls back to.
pub const DEFAULT_SLUG: &str = "oracle";

/// Number of cards laid out for a card reading.
pub const TAROT_SPREAD_SIZE: usize = 3;

/// Marketing badge shown on the category tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Free,
    Premium,
    Soon,
}

/// How a category is read. Drives template selection and temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingKind {
    /// Free-form daily guidance with the fixed four-section layout.
    Guidance,
    /// A spread of symbolic cards drawn per request.
    Cards { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    #[serde(skip)]
    pub kind: ReadingKind,
}

impl Category {
    pub fn requires_cards(&self) -> bool {
        matches!(self.kind, ReadingKind::Cards { .. })
    }
}

const fn guidance(
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    badge: Badge,
) -> Category {
    Category {
        slug,
        title,
        description,
        badge: Some(badge),
        kind: ReadingKind::Guidance,
    }
}

pub static CATEGORIES: &[Category] = &[
    guidance(DEFAULT_SLUG, "AIオラクル", "今日の指針を静かに整える", Badge::Free),
    guidance("love", "AI恋愛占い", "恋の流れ・距離感・行動のヒント", Badge::Soon),
    guidance("palm", "AI手相占い", "手相から読み解く傾向と整え方", Badge::Soon),
    Category {
        slug: "tarot",
        title: "AIタロット",
        description: "問いに対してカードで視点を得る",
        badge: Some(Badge::Soon),
        kind: ReadingKind::Cards {
            count: TAROT_SPREAD_SIZE,
        },
    },
    guidance("zodiac", "AI星座占い", "12星座の今日の流れを読む", Badge::Soon),
    guidance("astro", "AI占星術", "運気を“行動設計”に落とし込む", Badge::Soon),
    guidance("4pillars", "AI四柱推命", "命式ベースで傾向と過ごし方", Badge::Soon),
    guidance("numerology", "AI数秘術", "数字で思考と行動のリズムを整える", Badge::Soon),
    guidance("name", "AI姓名判断", "名前の印象と方向性を言語化", Badge::Soon),
    guidance("fengshui", "AI風水", "空間の整え方を具体行動に変える", Badge::Soon),
    guidance("dream", "AI夢占い", "夢を“内面の整理”として読み解く", Badge::Soon),
    guidance("compat", "AI相性占い", "関係性の“詰まり”をほどく視点", Badge::Soon),
    guidance("career", "AI仕事占い", "選択・優先順位・集中点を整える", Badge::Soon),
    guidance("money", "AI金運占い", "金銭行動を現実的に整える", Badge::Soon),
    guidance("wellness", "AI健康運", "生活リズムの整え方（医療判断なし）", Badge::Soon),
    guidance("luck", "AI運気・厄除け", "流れを整えるルーティン提案", Badge::Soon),
    guidance("color", "AIラッキーカラー", "今日の色で“気分と行動”を整える", Badge::Soon),
    guidance("number", "AIラッキーナンバー", "行動のスイッチとして使う", Badge::Soon),
];

/// Percent-decodes, trims, and lowercases a client-supplied identifier.
/// Falls back to the raw string when decoding fails.
pub fn normalize(raw: &str) -> String {
    let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
    decoded.trim().to_lowercase()
}

/// Exact-match lookup after normalization. `None` for unknown slugs.
pub fn find(raw_slug: &str) -> Option<&'static Category> {
    let slug = normalize(raw_slug);
    CATEGORIES.iter().find(|c| c.slug == slug)
}

/// Resolves a slug to a category, degrading to the default oracle on a miss.
pub fn lookup(raw_slug: &str) -> &'static Category {
    find(raw_slug).unwrap_or_else(|| {
        warn!("Unknown category requested, falling back to '{DEFAULT_SLUG}'");
        default_category()
    })
}

pub fn default_category() -> &'static Category {
    CATEGORIES
        .iter()
        .find(|c| c.slug == DEFAULT_SLUG)
        .unwrap_or(&CATEGORIES[0])
}

/// Case-insensitive substring filter over "slug title description",
/// preserving catalog order. An empty filter returns every category.
pub fn search(filter: &str) -> Vec<&'static Category> {
    let needle = filter.trim().to_lowercase();
    CATEGORIES
        .iter()
        .filter(|c| {
            needle.is_empty()
                || format!("{} {} {}", c.slug, c.title, c.description)
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}
