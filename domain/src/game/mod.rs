mod action;
mod card;
mod config;
mod effect;
mod error;
mod event;
mod player;
mod random;
mod snapshot;
mod state;


pub use action::GameAction;
pub use card::{Card, DECK_SIZE, Rank, create_deck};
pub use config::{GameConfig, GamePhase};
pub use effect::GameEffect;
pub use error::GameError;
pub use event::{ChallengeOutcome, GameEvent};
pub use player::{Player, Revolver};
pub use random::{RandomSource, SeededRandom};
pub use snapshot::{GameSnapshot, PlayerView, SessionSummary, TablePlay};
pub use state::GameSession;
