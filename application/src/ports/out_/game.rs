use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use domain::{GameCode, GameError, GameEvent, PlayerId};

#[derive(Debug, Error)]
pub enum GameServiceError {
    #[error("game {0} not found")]
    GameNotFound(GameCode),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Every frame carries its own `type` field, so both variants go out untagged.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum GameNotification {
    GameEvent(GameEvent),
    /// Sent only to the player whose intent was refused.
    Rejected(Rejection),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "rejected")]
pub struct Rejection {
    pub action: &'static str,
    pub reason: String,
}

#[async_trait]
pub trait GameEventNotifier: Send + Sync {
    async fn notify_player(
        &self,
        player_id: PlayerId,
        notification: GameNotification,
    );
}
