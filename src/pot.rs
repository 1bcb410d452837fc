//! Side-pot construction and pot splitting.

use serde::{Deserialize, Serialize};

/// One pot and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u64,
    /// Seat indices in ascending order.
    pub eligible: Vec<usize>,
}

/// A seat's total chips put in this hand, and whether it can still win them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub seat: usize,
    pub amount: u64,
    pub folded: bool,
}

/// Build the main pot and side pots from per-seat contributions.
///
/// Distinct contribution levels are walked in ascending order; each level
/// contributes `delta * seats_at_or_above` chips, eligible to the non-folded
/// seats among them. Pots with identical eligible sets are merged. A level
/// whose contributors all folded is dead money and joins the neighbouring pot.
///
/// ```
/// use holdem_engine::pot::{compute_pots, Contribution};
///
/// let pots = compute_pots(&[
///     Contribution { seat: 0, amount: 50, folded: false },
///     Contribution { seat: 1, amount: 100, folded: false },
///     Contribution { seat: 2, amount: 100, folded: false },
/// ]);
/// assert_eq!(pots.len(), 2);
/// assert_eq!(pots[0].amount, 150);
/// assert_eq!(pots[1].amount, 100);
/// assert_eq!(pots[1].eligible, vec![1, 2]);
/// ```
pub fn compute_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut paying: Vec<Contribution> =
        contributions.iter().copied().filter(|c| c.amount > 0).collect();
    paying.sort_by_key(|c| (c.amount, c.seat));

    let mut levels: Vec<u64> = paying.iter().map(|c| c.amount).collect();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut dead = 0u64;
    let mut prev = 0u64;
    for lvl in levels {
        let at_or_above: Vec<&Contribution> = paying.iter().filter(|c| c.amount >= lvl).collect();
        let amount = (lvl - prev) * at_or_above.len() as u64;
        prev = lvl;
        let mut eligible: Vec<usize> =
            at_or_above.iter().filter(|c| !c.folded).map(|c| c.seat).collect();
        eligible.sort_unstable();

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += amount,
                None => dead += amount,
            }
            continue;
        }
        let amount = amount + std::mem::take(&mut dead);
        match pots.iter_mut().find(|p| p.eligible == eligible) {
            Some(existing) => existing.amount += amount,
            None => pots.push(Pot { amount, eligible }),
        }
    }
    if dead > 0 {
        pots.push(Pot { amount: dead, eligible: Vec::new() });
    }
    pots
}

/// Total chips across pots.
pub fn total(pots: &[Pot]) -> u64 {
    pots.iter().map(|p| p.amount).sum()
}

/// Position of `seat` clockwise from the button: the seat immediately left of
/// the button is 0, the button itself is `seat_count - 1`.
pub fn clockwise_distance(seat: usize, button: usize, seat_count: usize) -> usize {
    if seat_count == 0 {
        return 0;
    }
    (seat + seat_count - (button + 1) % seat_count) % seat_count
}

/// Split `amount` between tied `winners`.
///
/// Each winner gets `amount / winners`; the remaining odd chips go one at a
/// time to the winners closest to the button's left. Returned shares are in
/// that same order.
///
/// ```
/// use holdem_engine::pot::split_pot;
///
/// let shares = split_pot(100, &[0, 1, 2], 0, 6);
/// assert_eq!(shares, vec![(1, 34), (2, 33), (0, 33)]);
/// ```
pub fn split_pot(
    amount: u64,
    winners: &[usize],
    button: usize,
    seat_count: usize,
) -> Vec<(usize, u64)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let mut ordered = winners.to_vec();
    ordered.sort_by_key(|&s| clockwise_distance(s, button, seat_count));
    ordered.dedup();
    let n = ordered.len() as u64;
    let base = amount / n;
    let mut odd = amount % n;
    ordered
        .into_iter()
        .map(|seat| {
            let extra = if odd > 0 {
                odd -= 1;
                1
            } else {
                0
            };
            (seat, base + extra)
        })
        .collect()
}
