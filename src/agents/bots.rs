use crate::engine::TableEngine;
use crate::table::{LegalActions, PlayerAction};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::PlayerAgent;

/// Checks when it can, otherwise calls; folds only when neither is legal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveAgent;

impl PlayerAgent for PassiveAgent {
    fn decide(&mut self, _seat: usize, legal: &LegalActions, _: &dyn TableEngine) -> PlayerAction {
        if legal.can_check {
            PlayerAction::Check
        } else if legal.can_call {
            PlayerAction::Call
        } else {
            PlayerAction::Fold
        }
    }

    fn name(&self) -> &'static str {
        "passive"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

/// Picks uniformly among the legal action kinds, then a uniform legal amount
/// for bets and raises.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    /// Deterministic decisions for reproducible simulations.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        Self { rng: ChaCha8Rng::from_seed(seed) }
    }

    fn amount(&mut self, min: u64, max: u64) -> u64 {
        // below-minimum amounts are only legal as an all-in
        let lo = min.min(max);
        if lo >= max {
            max
        } else {
            self.rng.random_range(lo..=max)
        }
    }
}

impl PlayerAgent for RandomAgent {
    fn decide(&mut self, _seat: usize, legal: &LegalActions, _: &dyn TableEngine) -> PlayerAction {
        let mut kinds = Vec::with_capacity(5);
        if legal.can_fold {
            kinds.push(Kind::Fold);
        }
        if legal.can_check {
            kinds.push(Kind::Check);
        }
        if legal.can_call {
            kinds.push(Kind::Call);
        }
        if legal.can_bet {
            kinds.push(Kind::Bet);
        }
        if legal.can_raise {
            kinds.push(Kind::Raise);
        }
        if kinds.is_empty() {
            return PlayerAction::Fold;
        }
        let pick = kinds[self.rng.random_range(0..kinds.len())];
        match pick {
            Kind::Fold => PlayerAction::Fold,
            Kind::Check => PlayerAction::Check,
            Kind::Call => PlayerAction::Call,
            Kind::Bet => PlayerAction::Bet(self.amount(legal.min_bet, legal.max_raise_to)),
            Kind::Raise => {
                PlayerAction::RaiseTo(self.amount(legal.min_raise_to, legal.max_raise_to))
            }
        }
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
