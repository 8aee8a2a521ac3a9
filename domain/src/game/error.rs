use thiserror::Error;

use crate::PlayerId;

use super::card::Rank;
use super::config::GamePhase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("action {action} not valid in phase {phase:?}")]
    InvalidPhase { action: &'static str, phase: GamePhase },

    #[error("not enough players: have {available}, need {required}")]
    NotEnoughPlayers { available: usize, required: usize },

    #[error("too many players: have {available}, the deck deals at most {max}")]
    TooManyPlayers { available: usize, max: usize },

    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("player {0} has been eliminated")]
    PlayerEliminated(PlayerId),

    #[error("must play between 1 and {max} cards, got {count}")]
    InvalidCardCount { count: usize, max: usize },

    #[error("not enough {rank} in hand: have {available}, need {required}")]
    CardsNotInHand { rank: Rank, available: usize, required: usize },

    #[error("there is no claim on the table to challenge")]
    NoClaimToChallenge,

    #[error("players cannot challenge their own claim")]
    SelfChallenge,
}
