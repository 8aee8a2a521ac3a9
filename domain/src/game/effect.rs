use crate::PlayerId;

use super::event::GameEvent;

#[derive(Clone, Debug)]
pub enum GameEffect {
    Notify { player_id: PlayerId, event: GameEvent },
}
