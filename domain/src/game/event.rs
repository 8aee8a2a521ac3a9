use serde::Serialize;

use crate::PlayerId;

use super::card::{Card, Rank};
use super::snapshot::GameSnapshot;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeOutcome {
    pub player_shot: PlayerId,
    pub player_shot_name: String,
    pub was_eliminated: bool,
    pub was_lie: bool,
    pub claim: Rank,
    /// The face-down cards that were called.
    pub revealed: Vec<Card>,
}

/// Visible messages delivered to players via `crate::GameEffect`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    GameState {
        #[serde(rename = "data")]
        snapshot: GameSnapshot,
    },
    Announcement {
        message: String,
    },
    ChallengeResolved {
        #[serde(rename = "data")]
        outcome: ChallengeOutcome,
    },
    GameOver {
        winner: Option<String>,
    },
}
