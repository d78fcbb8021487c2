//! Draw Engine: shuffles the deck, takes a spread, and flips a coin per card.
//!
//! The random source is passed in by the caller. Handlers use the thread-local
//! generator, so concurrent requests never share generator state; tests pass a
//! seeded `StdRng`.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::tarot::deck::Card;

/// Position meanings for a spread, in draw order.
pub const ROLE_LABELS: [&str; 3] = ["過去", "現在", "助言"];

pub const UPRIGHT_LABEL: &str = "正位置";
pub const REVERSED_LABEL: &str = "逆位置";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("cannot draw {requested} cards from a deck of {available}")]
    InvalidDrawSize { requested: usize, available: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnCard {
    pub card: Card,
    pub position: usize,
    pub role: String,
    pub reversed: bool,
}

impl DrawnCard {
    pub fn orientation_label(&self) -> &'static str {
        if self.reversed {
            REVERSED_LABEL
        } else {
            UPRIGHT_LABEL
        }
    }
}

/// Wire shape of a drawn card at the response boundary.
#[derive(Debug, Clone, Serialize)]
pub struct DrawnCardView {
    pub index: usize,
    pub role: String,
    pub slug: &'static str,
    pub name: &'static str,
    pub position: &'static str,
    pub reversed: bool,
    pub image_url: &'static str,
}

impl From<&DrawnCard> for DrawnCardView {
    fn from(d: &DrawnCard) -> Self {
        DrawnCardView {
            index: d.position,
            role: d.role.clone(),
            slug: d.card.slug,
            name: d.card.name,
            position: d.orientation_label(),
            reversed: d.reversed,
            image_url: d.card.image_url,
        }
    }
}

/// Role label for a spread position. Positions past the fixed list get an ordinal.
pub fn role_label(position: usize) -> String {
    ROLE_LABELS
        .get(position)
        .map(|r| r.to_string())
        .unwrap_or_else(|| format!("{}枚目", position + 1))
}

/// Draws `count` distinct cards from `deck` with independent orientations.
pub fn draw<R: Rng>(
    deck: &[Card],
    count: usize,
    rng: &mut R,
) -> Result<Vec<DrawnCard>, DrawError> {
    if count > deck.len() {
        return Err(DrawError::InvalidDrawSize {
            requested: count,
            available: deck.len(),
        });
    }

    let mut shuffled: Vec<&Card> = deck.iter().collect();
    shuffled.shuffle(rng);

    Ok(shuffled
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(position, card)| DrawnCard {
            card: *card,
            position,
            role: role_label(position),
            reversed: rng.gen_bool(0.5),
        })
        .collect())
}
