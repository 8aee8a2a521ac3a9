use crate::PlayerId;

use super::card::{Card, Rank};

/// Six-chamber revolver with one bullet in a fixed, hidden chamber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Revolver {
    bullet: u8,
    chamber: u8,
}

impl Revolver {
    pub const CHAMBERS: u8 = 6;

    /// `bullet` is clamped into `1..=CHAMBERS`.
    #[must_use]
    pub fn new(bullet: u8) -> Self {
        Self {
            bullet: bullet.clamp(1, Self::CHAMBERS),
            chamber: 1,
        }
    }

    /// Pulls the trigger and rotates to the next chamber. Returns true on a live round.
    pub fn fire(&mut self) -> bool {
        let live = self.chamber == self.bullet;
        self.chamber = self.chamber % Self::CHAMBERS + 1;
        live
    }

    #[must_use]
    pub fn chamber(&self) -> u8 {
        self.chamber
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub(super) id: PlayerId,
    pub(super) name: String,
    pub(super) hand: Vec<Card>,
    pub(super) lives: u32,
    pub(super) position: usize,
    pub(super) revolver: Revolver,
}

impl Player {
    pub(super) fn new(
        id: PlayerId,
        name: String,
        position: usize,
        lives: u32,
        revolver: Revolver,
    ) -> Self {
        Self {
            id,
            name,
            hand: Vec::new(),
            lives,
            position,
            revolver,
        }
    }

    #[must_use]
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub(super) fn count_of(
        &self,
        rank: Rank,
    ) -> usize {
        self.hand.iter().filter(|c| c.rank == rank).count()
    }

    /// Removes one card per requested rank, earliest in hand order first.
    /// Callers check availability beforehand.
    pub(super) fn take_cards(
        &mut self,
        ranks: &[Rank],
    ) -> Vec<Card> {
        let mut taken = Vec::with_capacity(ranks.len());
        for &rank in ranks {
            if let Some(idx) = self.hand.iter().position(|c| c.rank == rank) {
                taken.push(self.hand.remove(idx));
            }
        }
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullet_in_third_chamber_fires_every_sixth_pull() {
        let mut revolver = Revolver::new(3);
        let live_pulls: Vec<usize> = (1..=18).filter(|_| revolver.fire()).collect();
        assert_eq!(live_pulls, vec![3, 9, 15]);
    }

    #[test]
    fn chamber_wraps_after_six() {
        let mut revolver = Revolver::new(6);
        for expected in [1, 2, 3, 4, 5, 6, 1, 2] {
            assert_eq!(revolver.chamber(), expected);
            revolver.fire();
        }
    }

    #[test]
    fn out_of_range_bullet_is_clamped() {
        let mut revolver = Revolver::new(0);
        assert!(revolver.fire(), "bullet 0 clamps to the first chamber");
    }

    #[test]
    fn take_cards_removes_exact_multiset() {
        let mut player = Player::new(PlayerId::new("p"), "P".into(), 0, 1, Revolver::new(1));
        player.hand = vec![
            Card::new(Rank::King),
            Card::new(Rank::Queen),
            Card::new(Rank::King),
            Card::new(Rank::King),
        ];

        let taken = player.take_cards(&[Rank::King]);

        assert_eq!(taken, vec![Card::new(Rank::King)]);
        assert_eq!(player.count_of(Rank::King), 2);
        assert_eq!(player.hand.len(), 3);
    }
}
