mod game;
mod types;

pub use game::{
    Card, ChallengeOutcome, DECK_SIZE, GameAction, GameConfig, GameEffect, GameError, GameEvent, GamePhase, GameSession,
    GameSnapshot, Player, PlayerView, RandomSource, Rank, Revolver, SeededRandom, SessionSummary, TablePlay,
    create_deck,
};
pub use types::{GameCode, PlayerId};
