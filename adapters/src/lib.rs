mod in_memory;
mod web;

pub use in_memory::{InMemorySessions, RecordingNotifier};
pub use web::{AppState, GamesResponse, IncomingMessage, NewGameResponse, WebSocketNotifier, create_game, handle_connection, list_games};
