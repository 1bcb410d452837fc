//! Table configuration.

use crate::error::{EngineError, ValidationError};
use serde::{Deserialize, Serialize};

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

/// Everything needed to create a [`Table`](crate::table::Table).
///
/// Missing JSON fields fall back to [`TableConfig::default`].
///
/// ```
/// use holdem_engine::config::TableConfig;
///
/// let cfg = TableConfig::from_json_str(r#"{ "seats": 3, "seed": 7 }"#).unwrap();
/// assert_eq!(cfg.seats, 3);
/// assert_eq!(cfg.big_blind, 10);
/// assert!(cfg.burn_cards);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Number of seats at the table (2..=10).
    pub seats: usize,
    pub small_blind: u64,
    pub big_blind: u64,
    /// Stack for every occupied seat when `stacks` is not given.
    pub starting_stack: u64,
    /// Per-seat stacks; `None` marks an empty seat.
    pub stacks: Option<Vec<Option<u64>>>,
    /// Button seat for the first hand.
    pub button: usize,
    /// PRNG seed; reduced modulo 2^32.
    pub seed: u64,
    /// Burn one card before each street. The legacy no-burn path exists only
    /// for reproducing old hand logs.
    pub burn_cards: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seats: 6,
            small_blind: 5,
            big_blind: 10,
            starting_stack: 1000,
            stacks: None,
            button: 0,
            seed: 42,
            burn_cards: true,
        }
    }
}

impl TableConfig {
    /// `seats` occupied seats, each with `starting_stack` chips.
    pub fn new(seats: usize, starting_stack: u64, small_blind: u64, big_blind: u64) -> Self {
        Self { seats, starting_stack, small_blind, big_blind, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_button(mut self, button: usize) -> Self {
        self.button = button;
        self
    }

    pub fn with_stacks(mut self, stacks: Vec<Option<u64>>) -> Self {
        self.stacks = Some(stacks);
        self
    }

    pub fn with_burn_cards(mut self, burn: bool) -> Self {
        self.burn_cards = burn;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let cfg: TableConfig = serde_json::from_str(json)
            .map_err(|e| ValidationError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Per-seat starting stacks with `stacks` applied over `starting_stack`.
    pub fn seat_stacks(&self) -> Vec<Option<u64>> {
        match &self.stacks {
            Some(stacks) => stacks.clone(),
            None => vec![Some(self.starting_stack); self.seats],
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seats) {
            return Err(ValidationError::PlayerCount {
                got: self.seats,
                min: MIN_SEATS,
                max: MAX_SEATS,
            });
        }
        if self.big_blind == 0 || self.small_blind > self.big_blind {
            return Err(ValidationError::Blinds { small: self.small_blind, big: self.big_blind });
        }
        if let Some(stacks) = &self.stacks {
            if stacks.len() != self.seats {
                return Err(ValidationError::StackCount { got: stacks.len(), seats: self.seats });
            }
        }
        let occupied = self.seat_stacks().iter().filter(|s| s.is_some()).count();
        if occupied < MIN_SEATS {
            return Err(ValidationError::PlayerCount {
                got: occupied,
                min: MIN_SEATS,
                max: MAX_SEATS,
            });
        }
        if self.button >= self.seats {
            return Err(ValidationError::SeatIndex { seat: self.button, seats: self.seats });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        TableConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_seat_counts() {
        let err = TableConfig::new(1, 100, 1, 2).validate().unwrap_err();
        assert_eq!(err, ValidationError::PlayerCount { got: 1, min: 2, max: 10 });
        assert!(TableConfig::new(11, 100, 1, 2).validate().is_err());
    }

    #[test]
    fn rejects_bad_blinds() {
        let err = TableConfig::new(3, 100, 20, 10).validate().unwrap_err();
        assert_eq!(err, ValidationError::Blinds { small: 20, big: 10 });
        assert!(TableConfig::new(3, 100, 0, 0).validate().is_err());
    }

    #[test]
    fn stacks_must_match_seats_and_fill_two() {
        let cfg = TableConfig::new(3, 100, 1, 2).with_stacks(vec![Some(10), None]);
        assert_eq!(cfg.validate().unwrap_err(), ValidationError::StackCount { got: 2, seats: 3 });
        let cfg = TableConfig::new(3, 100, 1, 2).with_stacks(vec![Some(10), None, None]);
        assert!(matches!(cfg.validate(), Err(ValidationError::PlayerCount { got: 1, .. })));
    }

    #[test]
    fn button_in_range() {
        let cfg = TableConfig::new(3, 100, 1, 2).with_button(3);
        assert_eq!(cfg.validate().unwrap_err(), ValidationError::SeatIndex { seat: 3, seats: 3 });
    }

    #[test]
    fn json_errors_are_validation_errors() {
        assert!(matches!(
            TableConfig::from_json_str("{ not json"),
            Err(EngineError::Validation(ValidationError::Config(_)))
        ));
        assert!(matches!(
            TableConfig::from_json_str(r#"{ "seats": 12 }"#),
            Err(EngineError::Validation(ValidationError::PlayerCount { got: 12, .. }))
        ));
    }

    #[test]
    fn json_round_trip() {
        let cfg = TableConfig::new(4, 500, 5, 10)
            .with_stacks(vec![Some(500), None, Some(250), Some(800)])
            .with_burn_cards(false);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(TableConfig::from_json_str(&json).unwrap(), cfg);
    }
}
