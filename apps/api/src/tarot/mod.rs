// Tarot: the fixed major arcana deck and the per-request draw.

pub mod deck;
pub mod draw;

pub use deck::all_cards;
pub use draw::{draw, DrawnCard, DrawnCardView};
