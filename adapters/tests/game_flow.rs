use std::sync::Arc;

use adapters::{InMemorySessions, RecordingNotifier};
use application::ports::in_::{GameService, GameUseCase};
use application::ports::out_::{GameNotification, GameServiceError, Rejection, SessionRepository};
use domain::{ChallengeOutcome, GameCode, GameConfig, GameError, GameEvent, GameSnapshot, PlayerId, Rank};

struct Table {
    service: Arc<GameService>,
    sessions: Arc<InMemorySessions>,
    notifier: Arc<RecordingNotifier>,
    code: GameCode,
}

impl Table {
    fn new(code: &str) -> Self {
        let sessions = Arc::new(InMemorySessions::with_seed(GameConfig::default(), 11));
        let notifier = Arc::new(RecordingNotifier::new());
        let service = Arc::new(GameService::new(sessions.clone(), notifier.clone()));
        Self {
            service,
            sessions,
            notifier,
            code: GameCode::new(code),
        }
    }

    async fn join(
        &self,
        player_id: &PlayerId,
        name: &str,
    ) {
        self.service
            .execute(GameUseCase::Join {
                code: self.code.clone(),
                player_id: player_id.clone(),
                name: name.to_owned(),
            })
            .await
            .expect("join always succeeds");
    }

    async fn start(
        &self,
        requested_by: &PlayerId,
    ) -> Result<(), GameServiceError> {
        self.service
            .execute(GameUseCase::Start {
                code: self.code.clone(),
                requested_by: requested_by.clone(),
            })
            .await
    }

    async fn play(
        &self,
        player_id: &PlayerId,
        cards: Vec<Rank>,
        claim: Rank,
    ) -> Result<(), GameServiceError> {
        self.service
            .execute(GameUseCase::Play {
                code: self.code.clone(),
                player_id: player_id.clone(),
                cards,
                claim,
            })
            .await
    }

    async fn challenge(
        &self,
        challenger_id: &PlayerId,
    ) -> Result<(), GameServiceError> {
        self.service
            .execute(GameUseCase::Challenge {
                code: self.code.clone(),
                challenger_id: challenger_id.clone(),
            })
            .await
    }

    async fn leave(
        &self,
        player_id: &PlayerId,
    ) -> Result<(), GameServiceError> {
        self.service
            .execute(GameUseCase::Leave {
                code: self.code.clone(),
                player_id: player_id.clone(),
            })
            .await
    }

    fn last_state(
        &self,
        player_id: &PlayerId,
    ) -> GameSnapshot {
        self.notifier
            .events_for(player_id)
            .into_iter()
            .rev()
            .find_map(|n| match n {
                GameNotification::GameEvent(GameEvent::GameState { snapshot }) => Some(snapshot),
                _ => None,
            })
            .expect("player never received a game state")
    }

    fn challenge_outcome(
        &self,
        player_id: &PlayerId,
    ) -> Option<ChallengeOutcome> {
        self.notifier.events_for(player_id).into_iter().find_map(|n| match n {
            GameNotification::GameEvent(GameEvent::ChallengeResolved { outcome }) => Some(outcome),
            _ => None,
        })
    }
}

fn alice() -> PlayerId {
    PlayerId::new("alice")
}

fn bob() -> PlayerId {
    PlayerId::new("bob")
}

#[tokio::test]
async fn test_two_player_round_end_to_end() {
    let t = Table::new("ABCD");
    t.join(&alice(), "Alice").await;
    t.join(&bob(), "Bob").await;

    t.start(&alice()).await.expect("two players can start");

    let state = t.last_state(&alice());
    assert!(state.started);
    assert!(state.players.iter().all(|p| p.cards_count == 5));
    assert_eq!(state.current_player_name.as_deref(), Some("Alice"));

    let card = state.player(&alice()).and_then(|p| p.cards.as_ref()).expect("alice sees her hand")[0];
    t.play(&alice(), vec![card.rank], Rank::King).await.expect("alice holds the card");
    assert_eq!(t.last_state(&bob()).current_player_name.as_deref(), Some("Bob"));

    t.challenge(&bob()).await.expect("bob can call the claim");

    let outcome = t.challenge_outcome(&alice()).expect("alice saw the challenge");
    assert_eq!(outcome.was_lie, !card.rank.satisfies(Rank::King));
    assert_eq!(outcome.player_shot, if outcome.was_lie { alice() } else { bob() });
    assert_eq!(Some(outcome), t.challenge_outcome(&bob()));

    let after = t.last_state(&bob());
    assert!(after.current_play.is_none());
    assert!(Rank::REQUIRED.contains(&after.required_card.expect("required card redrawn")));
}

#[tokio::test]
async fn test_play_is_announced_to_every_player() {
    let t = Table::new("ANNC");
    t.join(&alice(), "Alice").await;
    t.join(&bob(), "Bob").await;
    t.start(&alice()).await.expect("start");

    let card = t.last_state(&alice()).player(&alice()).and_then(|p| p.cards.clone()).expect("hand")[0];
    t.play(&alice(), vec![card.rank], Rank::Queen).await.expect("play");

    for player in [alice(), bob()] {
        let announced = t.notifier.events_for(&player).into_iter().any(|n| {
            matches!(n, GameNotification::GameEvent(GameEvent::Announcement { message }) if message == "Alice played 1 Qs.")
        });
        assert!(announced, "{player} missed the announcement");
    }
}

#[tokio::test]
async fn test_every_broadcast_hides_other_hands() {
    let t = Table::new("HIDE");
    t.join(&alice(), "Alice").await;
    t.join(&bob(), "Bob").await;
    t.start(&bob()).await.expect("start");

    for (recipient, notification) in t.notifier.events() {
        if let GameNotification::GameEvent(GameEvent::GameState { snapshot }) = notification {
            for view in snapshot.players {
                assert_eq!(view.cards.is_some(), view.id == recipient, "{recipient} saw {}'s hand", view.id);
            }
        }
    }
}

#[tokio::test]
async fn test_rejected_intent_is_reported_to_actor_only() {
    let t = Table::new("SOLO");
    t.join(&alice(), "Alice").await;
    t.join(&bob(), "Bob").await;
    t.notifier.clear();

    t.play(&bob(), vec![Rank::King], Rank::King).await.expect_err("game has not started");

    let to_bob = t.notifier.events_for(&bob());
    assert_eq!(to_bob.len(), 1);
    assert!(matches!(&to_bob[0], GameNotification::Rejected(Rejection { action: "Play", .. })));
    assert!(t.notifier.events_for(&alice()).is_empty());
}

#[tokio::test]
async fn test_start_with_one_player_broadcasts_nothing() {
    let t = Table::new("ONE1");
    t.join(&alice(), "Alice").await;
    t.notifier.clear();

    let err = t.start(&alice()).await.expect_err("one player cannot start");
    assert!(matches!(
        err,
        GameServiceError::Game(GameError::NotEnoughPlayers { available: 1, required: 2 })
    ));
    assert!(
        t.notifier
            .events()
            .iter()
            .all(|(_, n)| matches!(n, GameNotification::Rejected(_)))
    );
}

#[tokio::test]
async fn test_intent_for_unknown_game_fails() {
    let t = Table::new("NONE");

    let err = t.challenge(&alice()).await.expect_err("no such game");
    assert!(matches!(err, GameServiceError::GameNotFound(code) if code == GameCode::new("NONE")));
    assert!(t.sessions.is_empty().await, "only join creates sessions");
}

#[tokio::test]
async fn test_leaving_below_two_players_resets_game() {
    let t = Table::new("LEFT");
    t.join(&alice(), "Alice").await;
    t.join(&bob(), "Bob").await;
    t.start(&alice()).await.expect("start");

    t.leave(&bob()).await.expect("bob is seated");

    let state = t.last_state(&alice());
    assert!(!state.started);
    assert!(state.required_card.is_none());
    assert_eq!(state.players.len(), 1);
    assert_eq!(t.sessions.len().await, 1);
}

#[tokio::test]
async fn test_empty_session_is_evicted() {
    let t = Table::new("GONE");
    t.join(&alice(), "Alice").await;
    assert_eq!(t.service.sessions().await.len(), 1);

    t.leave(&alice()).await.expect("alice is seated");

    assert!(t.sessions.is_empty().await);
    assert!(t.service.sessions().await.is_empty());
}

#[tokio::test]
async fn test_session_held_during_last_leave_is_evicted_later() {
    let t = Table::new("HELD");
    t.join(&alice(), "Alice").await;
    let held = t.sessions.load(&t.code).await.expect("session exists");

    t.leave(&alice()).await.expect("alice is seated");
    assert_eq!(t.sessions.len().await, 1, "a held session is not dropped");
    assert!(held.lock().await.is_empty());

    drop(held);
    assert!(t.service.sessions().await.is_empty());
    assert!(t.sessions.is_empty().await);
}

#[tokio::test]
async fn test_creating_a_session_sweeps_abandoned_ones() {
    let t = Table::new("OLD1");
    t.join(&alice(), "Alice").await;
    let held = t.sessions.load(&t.code).await.expect("session exists");
    t.leave(&alice()).await.expect("alice is seated");
    drop(held);

    t.service
        .execute(GameUseCase::Join {
            code: GameCode::new("NEW1"),
            player_id: bob(),
            name: "Bob".into(),
        })
        .await
        .expect("join");

    assert_eq!(t.sessions.len().await, 1);
    assert!(t.sessions.load(&t.code).await.is_none());
}

#[tokio::test]
async fn test_sessions_are_listed_per_code() {
    let t = Table::new("AAAA");
    t.join(&alice(), "Alice").await;
    t.service
        .execute(GameUseCase::Join {
            code: GameCode::new("BBBB"),
            player_id: bob(),
            name: "Bob".into(),
        })
        .await
        .expect("join");

    let mut codes: Vec<String> = t.service.sessions().await.into_iter().map(|s| s.code.0).collect();
    codes.sort();
    assert_eq!(codes, vec!["AAAA".to_owned(), "BBBB".to_owned()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_are_serialized() {
    let t = Table::new("RUSH");

    let joins: Vec<_> = (0..4)
        .map(|i| {
            let service = Arc::clone(&t.service);
            let code = t.code.clone();
            tokio::spawn(async move {
                service
                    .execute(GameUseCase::Join {
                        code,
                        player_id: PlayerId::new(format!("p{i}")),
                        name: format!("P{i}"),
                    })
                    .await
            })
        })
        .collect();
    for join in joins {
        join.await.expect("task panicked").expect("join");
    }

    let state = t.service.game_state(&t.code, &PlayerId::new("p0")).await.expect("session exists");
    let mut positions: Vec<usize> = state.players.iter().map(|p| p.position).collect();
    positions.sort_unstable();
    assert_eq!(positions, vec![0, 1, 2, 3]);
}
