use crate::cards::{Card, Rank, Suit};
use crate::error::EngineError;
use crate::rng::Lcg;

/// A standard 52-card deck. The top of the deck is the end of the vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in a fixed order: suits s, h, d, c; ranks 2..A within a suit.
    ///
    /// ```
    /// use holdem_engine::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// assert_eq!(deck.as_slice()[0].to_string(), "2s");
    /// assert_eq!(deck.as_slice()[51].to_string(), "Ac");
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &Suit::DECK_ORDER {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A fresh deck shuffled with `rng`.
    pub fn shuffled(rng: &mut Lcg) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first.
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// In-place Fisher–Yates from the last index down to 1, swapping `i`
    /// with `rng.rand_int(i + 1)`. Advances `rng` exactly `len - 1` times.
    pub fn shuffle(&mut self, rng: &mut Lcg) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.rand_int(i + 1);
            self.cards.swap(i, j);
        }
    }

    /// Draw one card from the top of the deck.
    pub fn draw_one(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::DeckUnderflow { requested: 1, remaining: 0 })
    }

    /// Draw `n` cards from the top; the first returned card is the former top.
    /// Fails without removing anything when fewer than `n` cards remain.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if n > self.cards.len() {
            return Err(EngineError::DeckUnderflow { requested: n, remaining: self.cards.len() });
        }
        let mut drawn = self.cards.split_off(self.cards.len() - n);
        drawn.reverse();
        Ok(drawn)
    }

    /// Discard the top card, returning it.
    pub fn burn(&mut self) -> Result<Card, EngineError> {
        self.draw_one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let d = Deck::standard();
        assert_eq!(d.len(), 52);
        let set: HashSet<Card> = d.as_slice().iter().copied().collect();
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let d1 = Deck::shuffled(&mut Lcg::new(42));
        let d2 = Deck::shuffled(&mut Lcg::new(42));
        assert_eq!(d1, d2);
        let d3 = Deck::shuffled(&mut Lcg::new(43));
        assert_ne!(d1, d3);
    }

    #[test]
    fn shuffle_consumes_one_step_per_swap() {
        let mut rng = Lcg::new(1);
        let mut reference = Lcg::new(1);
        let _ = Deck::shuffled(&mut rng);
        for _ in 0..51 {
            reference.next_f64();
        }
        assert_eq!(rng.state(), reference.state());
    }

    #[test]
    fn draw_takes_from_the_top() {
        let mut d = Deck::standard();
        let top = d.as_slice()[51];
        let next = d.as_slice()[50];
        let drawn = d.draw(2).unwrap();
        assert_eq!(drawn, vec![top, next]);
        assert_eq!(d.len(), 50);
    }

    #[test]
    fn draw_underflow_leaves_deck_intact() {
        let mut d = Deck::standard();
        d.draw(50).unwrap();
        let err = d.draw(3).unwrap_err();
        assert_eq!(err, EngineError::DeckUnderflow { requested: 3, remaining: 2 });
        assert_eq!(d.len(), 2);
        d.burn().unwrap();
        d.draw_one().unwrap();
        assert!(d.is_empty());
        assert!(matches!(d.burn(), Err(EngineError::DeckUnderflow { .. })));
    }
}
