use serde::Serialize;

use super::card::DECK_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Waiting,
    Running,
    Finished,
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub hand_size: usize,
    pub max_cards_per_play: usize,
    pub min_players: usize,
    pub starting_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,
            max_cards_per_play: 3,
            min_players: 2,
            starting_lives: 1,
        }
    }
}

impl GameConfig {
    /// Largest table the deck can deal a full hand to.
    #[must_use]
    pub fn max_players(&self) -> usize {
        DECK_SIZE / self.hand_size.max(1)
    }
}
