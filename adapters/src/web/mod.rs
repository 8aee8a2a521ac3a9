mod http;
mod state;
mod websocket;

pub use http::{GamesResponse, NewGameResponse, create_game, list_games};
pub use state::AppState;
pub use websocket::{IncomingMessage, WebSocketNotifier, handle_connection};
