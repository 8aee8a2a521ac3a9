use serde::Serialize;

use crate::{GameCode, PlayerId};

use super::card::{Card, Rank};
use super::config::GamePhase;

/// One viewer's projection of a session. Hand contents are only ever filled in
/// for the viewer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub code: GameCode,
    pub started: bool,
    pub phase: GamePhase,
    pub players: Vec<PlayerView>,
    pub current_player_name: Option<String>,
    pub required_card: Option<Rank>,
    pub current_play: Option<TablePlay>,
    pub winner: Option<String>,
}

impl GameSnapshot {
    #[must_use]
    pub fn player(
        &self,
        player_id: &PlayerId,
    ) -> Option<&PlayerView> {
        self.players.iter().find(|p| &p.id == player_id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub lives: u32,
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
    pub cards_count: usize,
    pub is_current: bool,
}

/// Cards lying face-down on the table. `cards` is only set for the player who placed them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePlay {
    pub player_name: String,
    pub claim: Rank,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub code: GameCode,
    pub players: usize,
    pub started: bool,
}
