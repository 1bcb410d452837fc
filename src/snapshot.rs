//! Serializable table snapshots and the presentation view handed to renderers.

use crate::error::{EngineError, ValidationError};
use crate::hand::{Board, HoleCards};
use crate::pot::Pot;
use crate::table::{PhaseTag, Table};
use serde::{Deserialize, Serialize};

/// Per-seat part of a [`TableSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub id: usize,
    pub stack: u64,
    pub bet: u64,
    pub contributed: u64,
    pub folded: bool,
    pub all_in: bool,
    pub hole: Option<HoleCards>,
}

/// Everything needed to check that two runs reached the same state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: PhaseTag,
    pub hand_number: u64,
    pub board: Board,
    /// Occupied seats only, ascending by id.
    pub seats: Vec<SeatSnapshot>,
    pub pots: Vec<Pot>,
    pub current_bet: u64,
    pub action_on: Option<usize>,
    pub button: usize,
    pub rng_state: u32,
    pub burn_cards: bool,
}

impl TableSnapshot {
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string(self).map_err(|e| ValidationError::Snapshot(e.to_string()).into())
    }

    pub fn to_json_pretty(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ValidationError::Snapshot(e.to_string()).into())
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| ValidationError::Snapshot(e.to_string()).into())
    }

    pub fn seat(&self, id: usize) -> Option<&SeatSnapshot> {
        self.seats.iter().find(|s| s.id == id)
    }
}

/// What a presentation view includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Seat whose hole cards are shown; `None` hides all of them.
    pub viewer: Option<usize>,
    /// Show every hole card regardless of `viewer`.
    pub reveal_all: bool,
    pub show_pot: bool,
    pub show_seed: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self { viewer: None, reveal_all: false, show_pot: true, show_seed: false }
    }
}

impl ViewOptions {
    /// Everything visible, as after a hand has been shown down.
    pub fn omniscient() -> Self {
        Self { viewer: None, reveal_all: true, show_pot: true, show_seed: true }
    }

    pub fn for_seat(seat: usize) -> Self {
        Self { viewer: Some(seat), ..Self::default() }
    }
}

/// Position markers shown next to a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "BTN")]
    Button,
    #[serde(rename = "SB")]
    SmallBlind,
    #[serde(rename = "BB")]
    BigBlind,
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Position::Button => "BTN",
            Position::SmallBlind => "SB",
            Position::BigBlind => "BB",
        }
    }
}

pub const HIDDEN_HOLE: &str = "?? ??";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLine {
    pub seat: usize,
    pub positions: Vec<Position>,
    pub stack: u64,
    pub bet: u64,
    /// Hole cards, [`HIDDEN_HOLE`] when hidden, `None` when not dealt in.
    pub hole: Option<String>,
    pub folded: bool,
    pub all_in: bool,
    pub to_act: bool,
}

impl SeatLine {
    /// One plain-text line, e.g. `Seat 1 [SB] stack 995 bet 5 | As Kd *`.
    pub fn text(&self) -> String {
        let mut line = format!("Seat {}", self.seat);
        if !self.positions.is_empty() {
            let marks: Vec<&str> = self.positions.iter().map(|p| p.label()).collect();
            line.push_str(&format!(" [{}]", marks.join(",")));
        }
        line.push_str(&format!(" stack {} bet {}", self.stack, self.bet));
        if let Some(hole) = &self.hole {
            line.push_str(&format!(" | {hole}"));
        }
        if self.folded {
            line.push_str(" (folded)");
        } else if self.all_in {
            line.push_str(" (all-in)");
        }
        if self.to_act {
            line.push_str(" *");
        }
        line
    }
}

/// Structured data a renderer draws from; carries no rendering logic itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationView {
    pub phase: String,
    pub board: Option<String>,
    pub pot: Option<u64>,
    pub seats: Vec<SeatLine>,
    pub footer: Option<String>,
}

impl PresentationView {
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![format!("Phase: {}", self.phase)];
        if let Some(board) = &self.board {
            out.push(format!("Board: {board}"));
        }
        if let Some(pot) = self.pot {
            out.push(format!("Pot: {pot}"));
        }
        out.extend(self.seats.iter().map(SeatLine::text));
        if let Some(footer) = &self.footer {
            out.push(footer.clone());
        }
        out
    }
}

impl Table {
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            phase: self.phase_tag(),
            hand_number: self.hand_number,
            board: self.board.clone(),
            seats: self
                .seats
                .iter()
                .flatten()
                .map(|s| SeatSnapshot {
                    id: s.id,
                    stack: s.stack,
                    bet: s.bet,
                    contributed: s.contributed,
                    folded: s.folded,
                    all_in: s.all_in,
                    hole: s.hole,
                })
                .collect(),
            pots: self.pots.clone(),
            current_bet: self.current_bet,
            action_on: self.action_on,
            button: self.button,
            rng_state: self.rng.state(),
            burn_cards: self.config.burn_cards,
        }
    }

    pub fn view(&self, options: &ViewOptions) -> PresentationView {
        let seats = self
            .seats
            .iter()
            .flatten()
            .map(|s| {
                let mut positions = Vec::new();
                if self.hand_number > 0 && s.id == self.button {
                    positions.push(Position::Button);
                }
                if self.small_blind_seat == Some(s.id) {
                    positions.push(Position::SmallBlind);
                }
                if self.big_blind_seat == Some(s.id) {
                    positions.push(Position::BigBlind);
                }
                let visible = options.reveal_all || options.viewer == Some(s.id);
                // hands shown down stay face up after the holes are cleared
                let hole = match self.shown_hand(s.id) {
                    Some(h) => Some(h.to_string()),
                    None => s.hole.map(|h| if visible { h.to_string() } else { HIDDEN_HOLE.to_string() }),
                };
                SeatLine {
                    seat: s.id,
                    positions,
                    stack: s.stack,
                    bet: s.bet,
                    hole,
                    folded: s.folded,
                    all_in: s.all_in,
                    to_act: self.action_on == Some(s.id),
                }
            })
            .collect();
        PresentationView {
            phase: self.phase_tag().to_string(),
            board: (!self.board.is_empty()).then(|| self.board.to_string()),
            pot: options.show_pot.then(|| self.pot_total()),
            seats,
            footer: options.show_seed.then(|| format!("Seed: {}", self.config.seed)),
        }
    }
}
