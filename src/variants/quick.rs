use crate::config::TableConfig;
use crate::engine::TableEngine;
use crate::error::EngineError;
use crate::hand::{Board, HoleCards};
use crate::table::{LegalActions, Phase, PhaseTag, PlayerAction, Street, Table};
use std::fmt;

/// Coarse phases of the reduced engine; showdown and completion are one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuickPhase {
    Init,
    Deal,
    Preflop,
    Flop,
    Turn,
    River,
    HandComplete,
}

impl From<Phase> for QuickPhase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Init => QuickPhase::Init,
            Phase::Deal => QuickPhase::Deal,
            Phase::Betting(Street::Preflop) => QuickPhase::Preflop,
            Phase::Betting(Street::Flop) => QuickPhase::Flop,
            Phase::Betting(Street::Turn) => QuickPhase::Turn,
            Phase::Betting(Street::River) => QuickPhase::River,
            Phase::Showdown | Phase::Complete => QuickPhase::HandComplete,
        }
    }
}

impl fmt::Display for QuickPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuickPhase::Init => "INIT",
            QuickPhase::Deal => "DEAL",
            QuickPhase::Preflop => "PREFLOP",
            QuickPhase::Flop => "FLOP",
            QuickPhase::Turn => "TURN",
            QuickPhase::River => "RIVER",
            QuickPhase::HandComplete => "HAND_COMPLETE",
        };
        f.write_str(s)
    }
}

/// A single-hand engine that hides side pots and the showdown step.
///
/// Every operation goes through the full [`Table`]; closing the river
/// resolves the showdown immediately and only the pot total is exposed.
///
/// ```
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::table::PlayerAction;
/// use holdem_engine::variants::quick::{QuickHand, QuickPhase};
///
/// let mut hand = QuickHand::new(TableConfig::new(2, 100, 1, 2)).unwrap();
/// hand.start().unwrap();
/// assert_eq!(hand.pot(), 3);
/// let sb = hand.table().action_on().unwrap();
/// hand.act(sb, PlayerAction::Fold).unwrap();
/// hand.end_round().unwrap();
/// assert_eq!(hand.stage(), QuickPhase::HandComplete);
/// ```
#[derive(Debug, Clone)]
pub struct QuickHand {
    table: Table,
}

impl QuickHand {
    pub fn new(config: TableConfig) -> Result<Self, EngineError> {
        Ok(Self { table: Table::new(config)? })
    }

    /// Start a hand and deal hole cards in one step.
    pub fn start(&mut self) -> Result<(), EngineError> {
        let mut next = self.table.clone();
        next.start_hand()?;
        next.deal_cards()?;
        self.table = next;
        Ok(())
    }

    pub fn stage(&self) -> QuickPhase {
        self.table.phase().into()
    }

    pub fn pot(&self) -> u64 {
        self.table.pot_total()
    }

    pub fn act(&mut self, seat: usize, action: PlayerAction) -> Result<(), EngineError> {
        self.table.act(seat, action)
    }

    /// Close the street; after the river the hand is resolved at once.
    pub fn end_round(&mut self) -> Result<(), EngineError> {
        let mut next = self.table.clone();
        next.end_round()?;
        if next.phase() == Phase::Showdown {
            next.to_showdown()?;
        }
        self.table = next;
        Ok(())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}

impl TableEngine for QuickHand {
    fn start_hand(&mut self) -> Result<(), EngineError> {
        self.table.start_hand()
    }
    fn deal_cards(&mut self) -> Result<(), EngineError> {
        self.table.deal_cards()
    }
    fn act(&mut self, seat: usize, action: PlayerAction) -> Result<(), EngineError> {
        QuickHand::act(self, seat, action)
    }
    fn end_round(&mut self) -> Result<(), EngineError> {
        QuickHand::end_round(self)
    }
    fn to_showdown(&mut self) -> Result<(), EngineError> {
        self.table.to_showdown()
    }

    /// Showdown never shows through the facade; it reports COMPLETE instead.
    fn phase(&self) -> PhaseTag {
        match self.stage() {
            QuickPhase::HandComplete => PhaseTag::Complete,
            _ => self.table.phase_tag(),
        }
    }
    fn board(&self) -> &Board {
        self.table.board()
    }
    fn legal_actions(&self, seat: usize) -> LegalActions {
        self.table.legal_actions(seat)
    }
    fn action_on(&self) -> Option<usize> {
        self.table.action_on()
    }
    fn winners(&self) -> &[usize] {
        self.table.winners()
    }
    fn is_round_closed(&self) -> bool {
        self.table.is_round_closed()
    }
    fn pot_total(&self) -> u64 {
        self.pot()
    }
    fn seat_count(&self) -> usize {
        self.table.seat_count()
    }
    fn live_count(&self) -> usize {
        self.table.live_count()
    }
    fn hole_cards(&self, seat: usize) -> Option<HoleCards> {
        self.table.seat(seat).and_then(|s| s.hole())
    }
    fn stack(&self, seat: usize) -> Option<u64> {
        self.table.seat(seat).map(|s| s.stack())
    }
}
