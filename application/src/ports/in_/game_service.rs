use std::sync::Arc;

use tracing::{debug, info};

use crate::ports::out_::{GameEventNotifier, GameNotification, GameServiceError, Rejection, SessionRepository};
use domain::{GameAction, GameCode, GameEffect, GamePhase, GameSnapshot, PlayerId, Rank, SessionSummary};

pub enum GameUseCase {
    Join {
        code: GameCode,
        player_id: PlayerId,
        name: String,
    },
    Start {
        code: GameCode,
        requested_by: PlayerId,
    },
    Play {
        code: GameCode,
        player_id: PlayerId,
        cards: Vec<Rank>,
        claim: Rank,
    },
    Challenge {
        code: GameCode,
        challenger_id: PlayerId,
    },
    Continue {
        code: GameCode,
        player_id: PlayerId,
    },
    Leave {
        code: GameCode,
        player_id: PlayerId,
    },
}

impl GameUseCase {
    /// Splits the use case into its table, the acting player and the session action.
    fn into_parts(self) -> (GameCode, PlayerId, GameAction) {
        match self {
            GameUseCase::Join { code, player_id, name } => (
                code,
                player_id.clone(),
                GameAction::Join { player_id, name },
            ),
            GameUseCase::Start { code, requested_by } => (code, requested_by, GameAction::Start),
            GameUseCase::Play {
                code,
                player_id,
                cards,
                claim,
            } => (
                code,
                player_id.clone(),
                GameAction::Play {
                    player_id,
                    cards,
                    claim,
                },
            ),
            GameUseCase::Challenge { code, challenger_id } => (
                code,
                challenger_id.clone(),
                GameAction::Challenge { challenger_id },
            ),
            GameUseCase::Continue { code, player_id } => (
                code,
                player_id.clone(),
                GameAction::Continue { player_id },
            ),
            GameUseCase::Leave { code, player_id } => (
                code,
                player_id.clone(),
                GameAction::Leave { player_id },
            ),
        }
    }
}

pub struct GameService {
    repository: Arc<dyn SessionRepository>,
    notifier: Arc<dyn GameEventNotifier>,
}

impl GameService {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        notifier: Arc<dyn GameEventNotifier>,
    ) -> Self {
        Self { repository, notifier }
    }

    /// Applies one player intent. A refused intent is reported back to the acting
    /// player only and leaves the session untouched.
    pub async fn execute(
        &self,
        use_case: GameUseCase,
    ) -> Result<(), GameServiceError> {
        let (code, actor, action) = use_case.into_parts();
        let action_name = action.name();
        let leaving = matches!(action, GameAction::Leave { .. });

        let result = self.process_action(&code, action).await;

        if let Err(err) = &result {
            debug!(game_code = %code, player_id = %actor, action = action_name, error = %err, "Intent rejected");
            self.notifier
                .notify_player(
                    actor,
                    GameNotification::Rejected(Rejection {
                        action: action_name,
                        reason: err.to_string(),
                    }),
                )
                .await;
        } else if leaving && self.repository.evict_if_empty(&code).await {
            info!(game_code = %code, "Evicted empty session");
        }

        result
    }

    pub async fn game_state(
        &self,
        code: &GameCode,
        viewer: &PlayerId,
    ) -> Result<GameSnapshot, GameServiceError> {
        let handle = self
            .repository
            .load(code)
            .await
            .ok_or_else(|| GameServiceError::GameNotFound(code.clone()))?;
        let session = handle.lock().await;
        Ok(session.game_state(viewer))
    }

    pub async fn sessions(&self) -> Vec<SessionSummary> {
        let mut summaries = Vec::new();
        for handle in self.repository.sessions().await {
            summaries.push(handle.lock().await.summary());
        }
        summaries
    }

    async fn process_action(
        &self,
        code: &GameCode,
        action: GameAction,
    ) -> Result<(), GameServiceError> {
        let handle = match action {
            GameAction::Join { .. } => self.repository.load_or_create(code).await,
            _ => self
                .repository
                .load(code)
                .await
                .ok_or_else(|| GameServiceError::GameNotFound(code.clone()))?,
        };

        let mut session = handle.lock().await;
        let phase_before = session.phase();
        let effects = session.process_action(action)?;

        match (phase_before, session.phase()) {
            (GamePhase::Waiting | GamePhase::Finished, GamePhase::Running) => {
                info!(game_code = %code, players = session.players().len(), "Game started");
            }
            (GamePhase::Running, GamePhase::Finished) => {
                let winner = session.winner().map(|p| p.name().to_owned());
                info!(game_code = %code, winner = ?winner, "Game finished");
            }
            (GamePhase::Running | GamePhase::Finished, GamePhase::Waiting) => {
                info!(game_code = %code, "Game aborted, not enough players");
            }
            _ => {}
        }

        // Delivered under the session lock so broadcasts of consecutive intents never interleave
        self.dispatch(effects).await;
        Ok(())
    }

    async fn dispatch(
        &self,
        effects: Vec<GameEffect>,
    ) {
        for effect in effects {
            match effect {
                GameEffect::Notify { player_id, event } => {
                    self.notifier.notify_player(player_id, GameNotification::GameEvent(event)).await;
                }
            }
        }
    }
}
