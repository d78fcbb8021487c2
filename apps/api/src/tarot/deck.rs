//! The fixed 22-card major arcana deck.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Stable identifier, also the image key.
    pub slug: &'static str,
    pub name: &'static str,
    pub image_url: &'static str,
}

const fn card(slug: &'static str, name: &'static str, image_url: &'static str) -> Card {
    Card {
        slug,
        name,
        image_url,
    }
}

pub static MAJOR_ARCANA: [Card; 22] = [
    card("fool", "愚者", "/tarot/01_fool.png"),
    card("magician", "魔術師", "/tarot/02_magician.png"),
    card("high_priestess", "女教皇", "/tarot/03_high_priestess.png"),
    card("empress", "女帝", "/tarot/04_empress.png"),
    card("emperor", "皇帝", "/tarot/05_emperor.png"),
    card("hierophant", "教皇", "/tarot/06_hierophant.png"),
    card("lovers", "恋人", "/tarot/07_lovers.png"),
    card("chariot", "戦車", "/tarot/08_chariot.png"),
    card("strength", "力", "/tarot/09_strength.png"),
    card("hermit", "隠者", "/tarot/10_hermit.png"),
    card("wheel_of_fortune", "運命の輪", "/tarot/11_wheel_of_fortune.png"),
    card("justice", "正義", "/tarot/12_justice.png"),
    card("hanged_man", "吊るされた男", "/tarot/13_hanged_man.png"),
    card("death", "死神", "/tarot/14_death.png"),
    card("temperance", "節制", "/tarot/15_temperance.png"),
    card("devil", "悪魔", "/tarot/16_devil.png"),
    card("tower", "塔", "/tarot/17_tower.png"),
    card("star", "星", "/tarot/18_star.png"),
    card("moon", "月", "/tarot/19_moon.png"),
    card("sun", "太陽", "/tarot/20_sun.png"),
    card("judgement", "審判", "/tarot/21_judgement.png"),
    card("world", "世界", "/tarot/22_world.png"),
];

/// All cards in deck order.
pub fn all_cards() -> &'static [Card] {
    &MAJOR_ARCANA
}
