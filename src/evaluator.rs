use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detailed evaluation result. `value` drives ordering.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    /// Grouped ranks high-to-low, then kickers high-to-low.
    pub tiebreak: Vec<Rank>,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }

    /// Shorthand for `value().raw()`.
    pub const fn score(&self) -> u64 {
        self.value.0
    }
}

impl HandValue {
    const CAT_SHIFT: u32 = 48;
    const RANK_STRIDE: u32 = 6;

    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and up to five rank tiebreakers into a comparable value.
    ///
    /// Layout (most significant -> least):
    /// `[ category (8) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 18 zero bits ]`.
    /// Missing tiebreakers pack as zero, below every real rank.
    pub fn from_parts(category: Category, ranks_desc: &[Rank]) -> Self {
        debug_assert!(ranks_desc.len() <= 5);
        let mut v: u64 = (category as u64) << Self::CAT_SHIFT;
        for (i, r) in ranks_desc.iter().take(5).enumerate() {
            let offset = Self::CAT_SHIFT - Self::RANK_STRIDE * (i as u32 + 1);
            v |= (*r as u64) << offset;
        }
        HandValue(v)
    }

    /// Category stored in the high byte.
    pub fn category(self) -> Option<Category> {
        let ord = (self.0 >> Self::CAT_SHIFT) as u8;
        CATEGORIES.get(ord as usize).copied()
    }
}

const CATEGORIES: [Category; 9] = [
    Category::HighCard,
    Category::Pair,
    Category::TwoPair,
    Category::ThreeOfAKind,
    Category::Straight,
    Category::Flush,
    Category::FullHouse,
    Category::FourOfAKind,
    Category::StraightFlush,
];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("expected exactly 7 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    #[error("invalid hand: {0}")]
    Hand(#[from] HandError),
    #[error("board must have five cards to evaluate, got {0}")]
    IncompleteBoard(usize),
}

/// Evaluate exactly seven distinct cards, in any order.
///
/// ```
/// use holdem_engine::cards::{parse_cards, Rank};
/// use holdem_engine::evaluator::{evaluate, Category};
///
/// let cards = parse_cards("As 2h 3d 4c 5s 9h Jd").unwrap();
/// let eval = evaluate(&cards).unwrap();
/// assert_eq!(eval.category, Category::Straight);
/// assert_eq!(eval.tiebreak, vec![Rank::Five]);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EvalError> {
    let seven: [Card; 7] = cards.try_into().map_err(|_| EvalError::CardCount(cards.len()))?;
    let mut mask = 0u64;
    for c in seven {
        if mask & c.mask() != 0 {
            return Err(EvalError::DuplicateCard(c));
        }
        mask |= c.mask();
    }
    Ok(evaluate_seven(&seven))
}

/// Evaluate a Hold'em hand given hole cards and a complete board.
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let b = board.as_slice();
    if b.len() != 5 {
        return Err(EvalError::IncompleteBoard(b.len()));
    }
    let seven = [hole.first(), hole.second(), b[0], b[1], b[2], b[3], b[4]];
    Ok(evaluate_seven(&seven))
}

/// Compare two Hold'em hands on a shared board.
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}

fn straight_high(uniq_desc: &[u8]) -> Option<u8> {
    if uniq_desc.len() != 5 {
        return None;
    }
    if uniq_desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    if uniq_desc[0] - uniq_desc[4] == 4 {
        return Some(uniq_desc[0]);
    }
    None
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let mut counts = [0u8; 15]; // 2..14 used
    for c in cards {
        counts[c.rank() as usize] += 1;
    }

    // (rank, count) sorted by count desc then rank desc
    let mut groups: Vec<(u8, u8)> =
        (2u8..=14).rev().filter(|&v| counts[v as usize] > 0).map(|v| (v, counts[v as usize])).collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let uniq_desc: Vec<u8> = groups.iter().map(|&(v, _)| v).collect();
    let straight = straight_high(&uniq_desc);

    let category = match (straight, is_flush, groups[0].1, groups.get(1).map(|g| g.1)) {
        (Some(_), true, _, _) => Category::StraightFlush,
        (_, _, 4, _) => Category::FourOfAKind,
        (_, _, 3, Some(2)) => Category::FullHouse,
        (_, true, _, _) => Category::Flush,
        (Some(_), false, _, _) => Category::Straight,
        (_, _, 3, _) => Category::ThreeOfAKind,
        (_, _, 2, Some(2)) => Category::TwoPair,
        (_, _, 2, _) => Category::Pair,
        _ => Category::HighCard,
    };

    let to_rank = |v: u8| Rank::from_value(v).unwrap_or(Rank::Two);
    let tiebreak: Vec<Rank> = match (category, straight) {
        (Category::StraightFlush | Category::Straight, Some(high)) => vec![to_rank(high)],
        _ => uniq_desc.iter().map(|&v| to_rank(v)).collect(),
    };

    // Present the five cards the way the hand reads: groups first, wheel ace last.
    let mut best_five = *cards;
    let wheel = straight == Some(5);
    best_five.sort_by(|a, b| {
        let key = |c: &Card| {
            let v = c.rank().value();
            let v = if wheel && v == 14 { 1 } else { v };
            (counts[c.rank() as usize], v, c.suit())
        };
        key(b).cmp(&key(a))
    });

    let value = HandValue::from_parts(category, &tiebreak);
    Evaluation { category, tiebreak, best_five, value }
}

/// Evaluate seven cards: iterate all 21 five-card combinations and keep the best.
///
/// Cards are put into a canonical order first, so the chosen `best_five`
/// does not depend on the input order when several subsets tie.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    let mut sorted = *cards;
    sorted.sort_by(|a, b| b.cmp(a));
    let mut best = evaluate_five(&[sorted[0], sorted[1], sorted[2], sorted[3], sorted[4]]);
    for i in 0..3 {
        for j in (i + 1)..4 {
            for k in (j + 1)..5 {
                for l in (k + 1)..6 {
                    for m in (l + 1)..7 {
                        let hand = [sorted[i], sorted[j], sorted[k], sorted[l], sorted[m]];
                        let eval = evaluate_five(&hand);
                        if eval > best {
                            best = eval;
                        }
                    }
                }
            }
        }
    }
    best
}

/// Memoizes [`evaluate`] by card set. Input order does not affect the key.
#[derive(Debug, Default, Clone)]
pub struct EvalCache {
    entries: HashMap<u64, Evaluation>,
    hits: u64,
}

impl EvalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&mut self, cards: &[Card]) -> Result<Evaluation, EvalError> {
        let key = cards.iter().fold(0u64, |m, c| m | c.mask());
        if cards.len() == 7 && key.count_ones() == 7 {
            if let Some(hit) = self.entries.get(&key) {
                self.hits += 1;
                return Ok(hit.clone());
            }
        }
        let eval = evaluate(cards)?;
        self.entries.insert(key, eval.clone());
        Ok(eval)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }
}
