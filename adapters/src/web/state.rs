use std::sync::Arc;

use application::ports::in_::GameService;
use application::ports::out_::{GameEventNotifier, SessionRepository};
use domain::GameConfig;

use crate::in_memory::InMemorySessions;

use super::websocket::WebSocketNotifier;

/// Shared by every handler. The service locks per session, so it is not wrapped in a mutex.
pub struct AppState {
    pub notifier: Arc<WebSocketNotifier>,
    pub game_service: Arc<GameService>,
}

impl AppState {
    pub fn new(
        notifier: Arc<WebSocketNotifier>,
        game_service: Arc<GameService>,
    ) -> Self {
        Self { notifier, game_service }
    }

    /// Wires the in-memory registry and websocket notifier together.
    #[must_use]
    pub fn in_memory(
        config: GameConfig,
        seed: Option<u64>,
    ) -> Arc<Self> {
        let notifier = Arc::new(WebSocketNotifier::new());
        let sessions = match seed {
            Some(seed) => InMemorySessions::with_seed(config, seed),
            None => InMemorySessions::new(config),
        };

        let repository: Arc<dyn SessionRepository> = Arc::new(sessions);
        let game_notifier: Arc<dyn GameEventNotifier> = notifier.clone();
        let game_service = GameService::new(repository, game_notifier);

        Arc::new(Self::new(notifier, Arc::new(game_service)))
    }
}
