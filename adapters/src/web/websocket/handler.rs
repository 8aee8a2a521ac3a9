use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures::StreamExt;
use futures::stream::SplitStream;
use serde::Deserialize;
use tracing::{debug, info, warn};

use application::ports::in_::GameUseCase;
use domain::{GameCode, PlayerId, Rank};

use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum IncomingMessage {
    Join {
        name: String,
    },
    Start,
    Play {
        cards: Vec<Rank>,
        #[serde(rename = "claimRank")]
        claim_rank: Rank,
    },
    Challenge,
    Continue,
    Leave,
}

impl IncomingMessage {
    #[must_use]
    pub fn into_use_case(
        self,
        code: GameCode,
        player_id: PlayerId,
    ) -> GameUseCase {
        match self {
            IncomingMessage::Join { name } => GameUseCase::Join { code, player_id, name },
            IncomingMessage::Start => GameUseCase::Start {
                code,
                requested_by: player_id,
            },
            IncomingMessage::Play { cards, claim_rank } => GameUseCase::Play {
                code,
                player_id,
                cards,
                claim: claim_rank,
            },
            IncomingMessage::Challenge => GameUseCase::Challenge {
                code,
                challenger_id: player_id,
            },
            IncomingMessage::Continue => GameUseCase::Continue { code, player_id },
            IncomingMessage::Leave => GameUseCase::Leave { code, player_id },
        }
    }
}

pub async fn handle_connection(
    ws: WebSocketUpgrade,
    Path((game_code, player_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let code = GameCode::new(game_code);
    let player_id = PlayerId::new(player_id);

    ws.on_upgrade(move |socket| async move {
        info!(game_code = %code, player_id = %player_id, "Player connected");

        let (sender, receiver) = socket.split();
        let connection_id = state.notifier.register_player(player_id.clone(), sender).await;

        handle_messages(&code, &player_id, receiver, &state).await;

        info!(game_code = %code, player_id = %player_id, "Player disconnected");
        if state.notifier.unregister_player(&player_id, connection_id).await {
            let _ = state
                .game_service
                .execute(GameUseCase::Leave { code, player_id })
                .await;
        }
    })
}

async fn handle_messages(
    code: &GameCode,
    player_id: &PlayerId,
    mut receiver: SplitStream<WebSocket>,
    state: &AppState,
) {
    while let Some(Ok(message)) = receiver.next().await {
        if let Message::Text(text) = message {
            debug!(game_code = %code, player_id = %player_id, message = %text, "<- Received");

            match serde_json::from_str::<IncomingMessage>(&text) {
                Ok(incoming) => {
                    let use_case = incoming.into_use_case(code.clone(), player_id.clone());
                    let _ = state.game_service.execute(use_case).await;
                }
                Err(e) => {
                    warn!(game_code = %code, player_id = %player_id, error = %e, "Failed to parse message");
                }
            }
        }
    }
}
