//! Showdown resolution: evaluate live hands and split every pot.

use crate::cards::Card;
use crate::error::EngineError;
use crate::evaluator::{evaluate, Evaluation};
use crate::hand::{Board, HoleCards};
use crate::pot::{clockwise_distance, split_pot, Pot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A live hand shown down.
#[derive(Debug, Clone)]
pub struct ShowdownHand {
    pub seat: usize,
    pub hole: HoleCards,
    pub evaluation: Evaluation,
}

/// How one pot was split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    /// Index into the pot list the award was computed from.
    pub pot: usize,
    pub amount: u64,
    /// `(seat, chips)` in odd-chip order.
    pub shares: Vec<(usize, u64)>,
}

#[derive(Debug, Clone, Default)]
pub struct ShowdownResult {
    pub hands: Vec<ShowdownHand>,
    pub awards: Vec<PotAward>,
    /// Total won per seat across all pots, ascending by seat.
    pub payouts: Vec<(usize, u64)>,
}

impl ShowdownResult {
    /// Seats that won anything, ordered clockwise from the button.
    pub fn winners(&self, button: usize, seat_count: usize) -> Vec<usize> {
        let mut seats: Vec<usize> =
            self.payouts.iter().filter(|(_, amt)| *amt > 0).map(|(s, _)| *s).collect();
        seats.sort_by_key(|&s| clockwise_distance(s, button, seat_count));
        seats
    }

    fn from_awards(hands: Vec<ShowdownHand>, awards: Vec<PotAward>) -> Self {
        let mut totals: BTreeMap<usize, u64> = BTreeMap::new();
        for award in &awards {
            for &(seat, amt) in &award.shares {
                *totals.entry(seat).or_insert(0) += amt;
            }
        }
        Self { hands, awards, payouts: totals.into_iter().collect() }
    }
}

/// Resolve a showdown between `contenders` on a complete `board`.
///
/// For every non-empty pot the best score among its eligible contenders wins;
/// ties split the pot with odd chips going clockwise from the button. A pot
/// with no eligible contender (dead money only) goes to the best hand overall.
pub fn resolve(
    contenders: &[(usize, HoleCards)],
    board: &Board,
    pots: &[Pot],
    button: usize,
    seat_count: usize,
) -> Result<ShowdownResult, EngineError> {
    let mut hands = Vec::with_capacity(contenders.len());
    for &(seat, hole) in contenders {
        let mut cards: Vec<Card> = hole.as_array().to_vec();
        cards.extend_from_slice(board.as_slice());
        let evaluation = evaluate(&cards)?;
        hands.push(ShowdownHand { seat, hole, evaluation });
    }

    let mut awards = Vec::new();
    for (index, pot) in pots.iter().enumerate() {
        if pot.amount == 0 {
            continue;
        }
        let mut eligible: Vec<&ShowdownHand> =
            hands.iter().filter(|h| pot.eligible.contains(&h.seat)).collect();
        if eligible.is_empty() {
            eligible = hands.iter().collect();
        }
        let Some(best) = eligible.iter().map(|h| h.evaluation.value()).max() else {
            continue;
        };
        let winners: Vec<usize> =
            eligible.iter().filter(|h| h.evaluation.value() == best).map(|h| h.seat).collect();
        let shares = split_pot(pot.amount, &winners, button, seat_count);
        awards.push(PotAward { pot: index, amount: pot.amount, shares });
    }
    Ok(ShowdownResult::from_awards(hands, awards))
}

/// Every pot goes to `seat` without a showdown.
pub fn award_uncontested(seat: usize, pots: &[Pot]) -> ShowdownResult {
    let awards = pots
        .iter()
        .enumerate()
        .filter(|(_, p)| p.amount > 0)
        .map(|(index, p)| PotAward { pot: index, amount: p.amount, shares: vec![(seat, p.amount)] })
        .collect();
    ShowdownResult::from_awards(Vec::new(), awards)
}
