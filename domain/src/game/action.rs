use crate::PlayerId;

use super::card::Rank;

#[derive(Clone, Debug)]
pub enum GameAction {
    Join { player_id: PlayerId, name: String },
    Start,
    Play { player_id: PlayerId, cards: Vec<Rank>, claim: Rank },
    Challenge { challenger_id: PlayerId },
    Continue { player_id: PlayerId },
    Leave { player_id: PlayerId },
}

impl GameAction {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::Join { .. } => "Join",
            GameAction::Start => "Start",
            GameAction::Play { .. } => "Play",
            GameAction::Challenge { .. } => "Challenge",
            GameAction::Continue { .. } => "Continue",
            GameAction::Leave { .. } => "Leave",
        }
    }
}
