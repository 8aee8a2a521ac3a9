use crate::{GameCode, PlayerId};

use super::card::{Card, Rank, create_deck};
use super::player::{Player, Revolver};
use super::random::RandomSource;
use super::snapshot::{GameSnapshot, PlayerView, SessionSummary, TablePlay};
use super::{ChallengeOutcome, GameAction, GameConfig, GameEffect, GameError, GameEvent, GamePhase};

pub struct GameSession {
    code: GameCode,
    config: GameConfig,
    pub(super) phase: GamePhase,
    pub(super) players: Vec<Player>,
    pub(super) current_index: usize,
    pub(super) deck: Vec<Card>,
    pub(super) required_rank: Option<Rank>,
    pub(super) current_play: Vec<Card>,
    pub(super) current_claim: Option<Rank>,
    pub(super) last_actor: Option<PlayerId>,
    winner: Option<PlayerId>,
    next_position: usize,
    rng: Box<dyn RandomSource>,
}

impl GameSession {
    pub fn process_action(
        &mut self,
        action: GameAction,
    ) -> Result<Vec<GameEffect>, GameError> {
        match action {
            GameAction::Join { player_id, name } => {
                self.add_player(player_id, name);
                Ok(self.state_notifications())
            }
            GameAction::Start => {
                self.start_game()?;
                Ok(self.state_notifications())
            }
            GameAction::Play {
                player_id,
                cards,
                claim,
            } => self.handle_play(&player_id, &cards, claim),
            GameAction::Challenge { challenger_id } => self.handle_challenge(&challenger_id),
            GameAction::Continue { player_id } => {
                self.continue_play(&player_id)?;
                Ok(self.state_notifications())
            }
            GameAction::Leave { player_id } => {
                if self.remove_player(&player_id).is_none() {
                    return Err(GameError::PlayerNotFound(player_id));
                }
                Ok(self.state_notifications())
            }
        }
    }

    fn handle_play(
        &mut self,
        player_id: &PlayerId,
        cards: &[Rank],
        claim: Rank,
    ) -> Result<Vec<GameEffect>, GameError> {
        self.play_cards(player_id, cards, claim)?;

        let name = self.player(player_id).map(Player::name).unwrap_or_default();
        let announcement = GameEvent::Announcement {
            message: format!("{} played {} {}s.", name, cards.len(), claim),
        };

        let mut effects = self.state_notifications();
        effects.extend(self.broadcast(&announcement));
        Ok(effects)
    }

    fn handle_challenge(
        &mut self,
        challenger_id: &PlayerId,
    ) -> Result<Vec<GameEffect>, GameError> {
        let outcome = self.challenge(challenger_id)?;

        let mut effects = self.broadcast(&GameEvent::ChallengeResolved { outcome });
        effects.extend(self.state_notifications());
        if self.phase == GamePhase::Finished {
            effects.extend(self.broadcast(&GameEvent::GameOver {
                winner: self.winner_name(),
            }));
        }
        Ok(effects)
    }

    fn broadcast(
        &self,
        event: &GameEvent,
    ) -> Vec<GameEffect> {
        self.players
            .iter()
            .map(|p| GameEffect::Notify {
                player_id: p.id.clone(),
                event: event.clone(),
            })
            .collect()
    }

    fn state_notifications(&self) -> Vec<GameEffect> {
        self.players
            .iter()
            .map(|p| GameEffect::Notify {
                player_id: p.id.clone(),
                event: GameEvent::GameState {
                    snapshot: self.game_state(&p.id),
                },
            })
            .collect()
    }

    fn require_phase(
        &self,
        required: GamePhase,
        action: &'static str,
    ) -> Result<(), GameError> {
        if self.phase != required {
            return Err(GameError::InvalidPhase {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    /// Index of `player_id` if they are alive and hold the turn.
    fn require_turn(
        &self,
        player_id: &PlayerId,
    ) -> Result<usize, GameError> {
        let idx = self
            .index_of(player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.clone()))?;
        if !self.players[idx].is_alive() {
            return Err(GameError::PlayerEliminated(player_id.clone()));
        }
        if idx != self.current_index {
            return Err(GameError::NotYourTurn(player_id.clone()));
        }
        Ok(idx)
    }
}

impl GameSession {
    #[must_use]
    pub fn new(
        code: GameCode,
        config: GameConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            code,
            config,
            phase: GamePhase::Waiting,
            players: Vec::new(),
            current_index: 0,
            deck: create_deck(),
            required_rank: None,
            current_play: Vec::new(),
            current_claim: None,
            last_actor: None,
            winner: None,
            next_position: 0,
            rng,
        }
    }

    /// Joins a new player, or renames one who is already seated.
    pub fn add_player(
        &mut self,
        player_id: PlayerId,
        name: String,
    ) -> &Player {
        if let Some(idx) = self.index_of(&player_id) {
            self.players[idx].name = name;
            return &self.players[idx];
        }

        let bullet = self.rng.bullet_position(Revolver::CHAMBERS);
        let player = Player::new(
            player_id,
            name,
            self.next_position,
            self.config.starting_lives,
            Revolver::new(bullet),
        );
        self.next_position += 1;

        let idx = self.players.len();
        self.players.push(player);
        &self.players[idx]
    }

    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.phase == GamePhase::Running {
            return Err(GameError::InvalidPhase {
                action: "Start",
                phase: self.phase,
            });
        }

        let available = self.players.len();
        if available < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                available,
                required: self.config.min_players,
            });
        }
        let max = self.config.max_players();
        if available > max {
            return Err(GameError::TooManyPlayers { available, max });
        }

        let mut deck = create_deck();
        self.rng.shuffle(&mut deck);

        // Dealt in seat order, five consecutive cards each
        let hand_size = self.config.hand_size;
        let lives = self.config.starting_lives;
        let mut undealt = deck.into_iter();
        for player in &mut self.players {
            player.hand = undealt.by_ref().take(hand_size).collect();
            player.lives = lives;
        }
        self.deck = undealt.collect();

        self.phase = GamePhase::Running;
        self.current_index = 0;
        self.required_rank = Some(self.rng.required_rank());
        self.winner = None;
        self.clear_table();
        Ok(())
    }

    pub fn play_cards(
        &mut self,
        player_id: &PlayerId,
        cards: &[Rank],
        claim: Rank,
    ) -> Result<(), GameError> {
        self.require_phase(GamePhase::Running, "Play")?;
        let idx = self.require_turn(player_id)?;

        let max = self.config.max_cards_per_play;
        if cards.is_empty() || cards.len() > max {
            return Err(GameError::InvalidCardCount {
                count: cards.len(),
                max,
            });
        }

        let player = &self.players[idx];
        for &rank in cards {
            let required = cards.iter().filter(|&&r| r == rank).count();
            let available = player.count_of(rank);
            if available < required {
                return Err(GameError::CardsNotInHand {
                    rank,
                    available,
                    required,
                });
            }
        }

        self.current_play = self.players[idx].take_cards(cards);
        self.current_claim = Some(claim);
        self.last_actor = Some(player_id.clone());
        self.advance_turn();
        Ok(())
    }

    /// Calls the pending claim. A truthful claim costs the challenger a pull of the
    /// trigger; a lie costs the player who made it.
    pub fn challenge(
        &mut self,
        challenger_id: &PlayerId,
    ) -> Result<ChallengeOutcome, GameError> {
        self.require_phase(GamePhase::Running, "Challenge")?;

        let challenger_idx = self
            .index_of(challenger_id)
            .ok_or_else(|| GameError::PlayerNotFound(challenger_id.clone()))?;
        if !self.players[challenger_idx].is_alive() {
            return Err(GameError::PlayerEliminated(challenger_id.clone()));
        }

        let (Some(claim), Some(actor_id)) = (self.current_claim, self.last_actor.as_ref()) else {
            return Err(GameError::NoClaimToChallenge);
        };
        if actor_id == challenger_id {
            return Err(GameError::SelfChallenge);
        }

        let was_lie = !self.current_play.iter().all(|c| c.rank.satisfies(claim));
        let shooter_idx = if was_lie {
            self.index_of(actor_id).ok_or(GameError::NoClaimToChallenge)?
        } else {
            challenger_idx
        };

        let shooter = &mut self.players[shooter_idx];
        let was_eliminated = shooter.revolver.fire();
        if was_eliminated {
            shooter.lives = 0;
        }

        let outcome = ChallengeOutcome {
            player_shot: shooter.id.clone(),
            player_shot_name: shooter.name.clone(),
            was_eliminated,
            was_lie,
            claim,
            revealed: std::mem::take(&mut self.current_play),
        };

        self.clear_table();
        self.required_rank = Some(self.rng.required_rank());

        if was_eliminated {
            if shooter_idx == self.current_index {
                self.advance_turn();
            }
            self.check_for_winner();
        }

        Ok(outcome)
    }

    /// Passes the turn without playing. The pending claim stays on the table.
    pub fn continue_play(
        &mut self,
        player_id: &PlayerId,
    ) -> Result<(), GameError> {
        self.require_phase(GamePhase::Running, "Continue")?;
        self.require_turn(player_id)?;
        self.advance_turn();
        Ok(())
    }

    #[must_use]
    pub fn game_state(
        &self,
        viewer: &PlayerId,
    ) -> GameSnapshot {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, p)| PlayerView {
                id: p.id.clone(),
                name: p.name.clone(),
                lives: p.lives,
                position: p.position,
                cards: (&p.id == viewer).then(|| p.hand.clone()),
                cards_count: p.hand.len(),
                is_current: self.phase == GamePhase::Running && idx == self.current_index,
            })
            .collect();

        let current_play = match (self.current_claim, self.last_actor.as_ref()) {
            (Some(claim), Some(actor_id)) => Some(TablePlay {
                player_name: self.player(actor_id).map(|p| p.name.clone()).unwrap_or_default(),
                claim,
                count: self.current_play.len(),
                cards: (actor_id == viewer).then(|| self.current_play.clone()),
            }),
            _ => None,
        };

        GameSnapshot {
            code: self.code.clone(),
            started: self.started(),
            phase: self.phase,
            players,
            current_player_name: self.current_player().map(|p| p.name.clone()),
            required_card: self.required_rank,
            current_play,
            winner: self.winner_name(),
        }
    }

    pub fn remove_player(
        &mut self,
        player_id: &PlayerId,
    ) -> Option<Player> {
        let idx = self.index_of(player_id)?;
        let removed = self.players.remove(idx);
        let held_turn = idx == self.current_index;

        if idx < self.current_index {
            self.current_index -= 1;
        }
        if self.current_index >= self.players.len() {
            self.current_index = 0;
        }

        if self.last_actor.as_ref() == Some(player_id) {
            self.clear_table();
        }
        if self.winner.as_ref() == Some(player_id) {
            self.winner = None;
        }

        if self.phase != GamePhase::Waiting && self.players.len() < self.config.min_players {
            self.reset_round();
        } else if self.phase == GamePhase::Running {
            let holder_eliminated = self.current_player().is_some_and(|p| !p.is_alive());
            if held_turn && holder_eliminated {
                self.advance_turn();
            }
            self.check_for_winner();
        }

        Some(removed)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            code: self.code.clone(),
            players: self.players.len(),
            started: self.started(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &GameCode {
        &self.code
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn started(&self) -> bool {
        self.phase != GamePhase::Waiting
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(
        &self,
        player_id: &PlayerId,
    ) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == player_id)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_index)
    }

    #[must_use]
    pub fn required_rank(&self) -> Option<Rank> {
        self.required_rank
    }

    #[must_use]
    pub fn current_claim(&self) -> Option<Rank> {
        self.current_claim
    }

    #[must_use]
    pub fn current_play(&self) -> &[Card] {
        &self.current_play
    }

    #[must_use]
    pub fn last_actor(&self) -> Option<&PlayerId> {
        self.last_actor.as_ref()
    }

    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_ref().and_then(|id| self.player(id))
    }

    fn winner_name(&self) -> Option<String> {
        self.winner().map(|p| p.name.clone())
    }

    fn index_of(
        &self,
        player_id: &PlayerId,
    ) -> Option<usize> {
        self.players.iter().position(|p| &p.id == player_id)
    }

    /// Moves the turn to the next live player in seat order.
    fn advance_turn(&mut self) {
        let len = self.players.len();
        if len == 0 {
            self.current_index = 0;
            return;
        }
        for step in 1..=len {
            let idx = (self.current_index + step) % len;
            if self.players[idx].is_alive() {
                self.current_index = idx;
                return;
            }
        }
    }

    fn check_for_winner(&mut self) {
        let mut alive = self.players.iter().filter(|p| p.is_alive());
        let survivor = alive.next().map(|p| p.id.clone());
        if alive.next().is_none() {
            self.phase = GamePhase::Finished;
            self.winner = survivor;
        }
    }

    fn clear_table(&mut self) {
        self.current_play.clear();
        self.current_claim = None;
        self.last_actor = None;
    }

    fn reset_round(&mut self) {
        self.phase = GamePhase::Waiting;
        self.current_index = 0;
        self.required_rank = None;
        self.winner = None;
        self.clear_table();
    }
}
