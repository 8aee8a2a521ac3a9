use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "K")]
    King,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "J")]
    Joker,
}

impl Rank {
    /// Ranks a round can require. Jokers are never required.
    pub const REQUIRED: [Rank; 3] = [Rank::King, Rank::Queen, Rank::Ace];

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Rank::King => "K",
            Rank::Queen => "Q",
            Rank::Ace => "A",
            Rank::Joker => "J",
        }
    }

    /// Whether a card of this rank backs up a claim of `claim`.
    #[must_use]
    pub fn satisfies(
        self,
        claim: Rank,
    ) -> bool {
        self == claim || self == Rank::Joker
    }
}

impl fmt::Display for Rank {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub fn new(rank: Rank) -> Self {
        Self { rank }
    }
}

const DECK_COMPOSITION: [(Rank, usize); 4] = [(Rank::King, 6), (Rank::Queen, 6), (Rank::Ace, 6), (Rank::Joker, 2)];

pub const DECK_SIZE: usize = 20;

/// The full deck in rank blocks: six Kings, six Queens, six Aces, two Jokers.
#[must_use]
pub fn create_deck() -> Vec<Card> {
    DECK_COMPOSITION
        .iter()
        .flat_map(|&(rank, count)| std::iter::repeat_n(Card::new(rank), count))
        .collect()
}
