use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::SinkExt;
use futures::stream::SplitSink;
use tokio::sync::{Mutex as TokioMutex, RwLock};
use tracing::{debug, warn};

use application::ports::out_::{GameEventNotifier, GameNotification};
use domain::PlayerId;

pub(crate) type WebSocketSender = SplitSink<WebSocket, Message>;

struct Connection {
    id: u64,
    sender: TokioMutex<WebSocketSender>,
}

/// Live websocket sinks keyed by player. One connection per player id; a newer
/// connection replaces the older one.
pub struct WebSocketNotifier {
    connections: RwLock<HashMap<PlayerId, Arc<Connection>>>,
    next_id: AtomicU64,
}

impl WebSocketNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Returns the connection id to hand back to [`Self::unregister_player`].
    pub async fn register_player(
        &self,
        player_id: PlayerId,
        sender: WebSocketSender,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let connection = Arc::new(Connection {
            id,
            sender: TokioMutex::new(sender),
        });
        self.connections.write().await.insert(player_id, connection);
        id
    }

    /// Removes the player's connection if it is still `connection_id`. Returns false
    /// when a newer connection has taken over.
    pub async fn unregister_player(
        &self,
        player_id: &PlayerId,
        connection_id: u64,
    ) -> bool {
        let mut connections = self.connections.write().await;
        match connections.get(player_id) {
            Some(connection) if connection.id == connection_id => {
                connections.remove(player_id);
                true
            }
            _ => false,
        }
    }

    async fn send_to_player(
        &self,
        player_id: &PlayerId,
        message: String,
    ) {
        let Some(connection) = self.connections.read().await.get(player_id).cloned() else {
            return;
        };

        debug!(player_id = %player_id, message = %message, "-> Sending");
        if let Err(e) = connection.sender.lock().await.send(Message::Text(message.into())).await {
            warn!(player_id = %player_id, error = %e, "Failed to send message");
        }
    }
}

impl Default for WebSocketNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameEventNotifier for WebSocketNotifier {
    async fn notify_player(
        &self,
        player_id: PlayerId,
        notification: GameNotification,
    ) {
        match serde_json::to_string(&notification) {
            Ok(message) => self.send_to_player(&player_id, message).await,
            Err(e) => warn!(player_id = %player_id, error = %e, "Failed to serialize notification"),
        }
    }
}
