use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use domain::{GameCode, SessionSummary};

use super::state::AppState;

#[derive(Serialize)]
pub struct GamesResponse {
    games: Vec<SessionSummary>,
    count: usize,
}

pub async fn list_games(State(state): State<Arc<AppState>>) -> Json<GamesResponse> {
    let games = state.game_service.sessions().await;
    let count = games.len();
    Json(GamesResponse { games, count })
}

#[derive(Serialize)]
pub struct NewGameResponse {
    code: GameCode,
}

/// Hands out a code no live table is using. The session itself is created on first join.
pub async fn create_game(State(state): State<Arc<AppState>>) -> Json<NewGameResponse> {
    let taken: Vec<GameCode> = state.game_service.sessions().await.into_iter().map(|s| s.code).collect();
    let mut code = GameCode::generate();
    while taken.contains(&code) {
        code = GameCode::generate();
    }
    Json(NewGameResponse { code })
}
