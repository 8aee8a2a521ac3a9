use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock as StdRwLock};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use application::ports::out_::{GameEventNotifier, GameNotification, SessionHandle, SessionRepository};
use domain::{GameCode, GameConfig, GameSession, PlayerId, RandomSource, SeededRandom};

/// Session registry kept in process memory. Nothing survives a restart.
pub struct InMemorySessions {
    sessions: RwLock<HashMap<GameCode, SessionHandle>>,
    config: GameConfig,
    seed: Option<u64>,
    created: AtomicU64,
}

impl InMemorySessions {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            seed: None,
            created: AtomicU64::new(0),
        }
    }

    /// Every new session draws from its own stream derived from `seed`.
    #[must_use]
    pub fn with_seed(
        config: GameConfig,
        seed: u64,
    ) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(config)
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn random_source(&self) -> Box<dyn RandomSource> {
        let n = self.created.fetch_add(1, Ordering::Relaxed);
        match self.seed {
            Some(seed) => Box::new(SeededRandom::new(seed.wrapping_add(n))),
            None => Box::new(SeededRandom::from_entropy()),
        }
    }
}

impl Default for InMemorySessions {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn load_or_create(
        &self,
        code: &GameCode,
    ) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(code) {
            return Arc::clone(handle);
        }

        let mut sessions = self.sessions.write().await;
        sweep_empty(&mut sessions);
        let handle = sessions.entry(code.clone()).or_insert_with(|| {
            info!(game_code = %code, "Created session");
            let session = GameSession::new(code.clone(), self.config.clone(), self.random_source());
            Arc::new(Mutex::new(session))
        });
        Arc::clone(handle)
    }

    async fn load(
        &self,
        code: &GameCode,
    ) -> Option<SessionHandle> {
        self.sessions.read().await.get(code).cloned()
    }

    async fn evict_if_empty(
        &self,
        code: &GameCode,
    ) -> bool {
        let mut sessions = self.sessions.write().await;
        sweep_empty(&mut sessions);
        !sessions.contains_key(code)
    }

    async fn sessions(&self) -> Vec<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        sweep_empty(&mut sessions);
        sessions.values().cloned().collect()
    }
}

/// Drops every session with no players that no task still holds. Handles only
/// leave the map under its write lock, so a strong count of one means no intent
/// is in flight and none can start until the lock is released. Sessions skipped
/// here are picked up by a later sweep.
fn sweep_empty(sessions: &mut HashMap<GameCode, SessionHandle>) {
    sessions.retain(|code, handle| {
        let evict = Arc::strong_count(handle) == 1 && handle.try_lock().is_ok_and(|session| session.is_empty());
        if evict {
            debug!(game_code = %code, "Swept empty session");
        }
        !evict
    });
}

/// Notifier that keeps every delivered notification, for tests.
pub struct RecordingNotifier {
    events: StdRwLock<Vec<(PlayerId, GameNotification)>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: StdRwLock::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<(PlayerId, GameNotification)> {
        self.events.read().map(|events| events.clone()).unwrap_or_default()
    }

    pub fn events_for(
        &self,
        player_id: &PlayerId,
    ) -> Vec<GameNotification> {
        self.events()
            .into_iter()
            .filter(|(pid, _)| pid == player_id)
            .map(|(_, notification)| notification)
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.write() {
            events.clear();
        }
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameEventNotifier for RecordingNotifier {
    async fn notify_player(
        &self,
        player_id: PlayerId,
        notification: GameNotification,
    ) {
        if let Ok(mut events) = self.events.write() {
            events.push((player_id, notification));
        }
    }
}
