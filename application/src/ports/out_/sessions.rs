use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use domain::{GameCode, GameSession};

/// A session is locked for the whole of one intent, broadcast included.
pub type SessionHandle = Arc<Mutex<GameSession>>;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Returns the session for `code`, creating an empty one on first use.
    async fn load_or_create(
        &self,
        code: &GameCode,
    ) -> SessionHandle;

    async fn load(
        &self,
        code: &GameCode,
    ) -> Option<SessionHandle>;

    /// Drops every session that has no players and that no one else holds,
    /// returning whether `code` is gone. A session still held elsewhere is
    /// retried on the next eviction, creation or listing.
    async fn evict_if_empty(
        &self,
        code: &GameCode,
    ) -> bool;

    /// Live sessions. Empty unheld sessions are dropped first.
    async fn sessions(&self) -> Vec<SessionHandle>;
}
