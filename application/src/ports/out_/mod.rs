mod game;
mod sessions;

pub use game::{GameEventNotifier, GameNotification, GameServiceError, Rejection};
pub use sessions::{SessionHandle, SessionRepository};
