// Engine API boundary. Harnesses, agents and front ends drive a hand through
// this trait without depending on table internals. Implemented by the full
// `Table` and by the reduced `QuickHand` facade.

use crate::error::EngineError;
use crate::hand::{Board, HoleCards};
use crate::table::{LegalActions, PhaseTag, PlayerAction, Table};

pub trait TableEngine {
    // Hand lifecycle
    fn start_hand(&mut self) -> Result<(), EngineError>;
    fn deal_cards(&mut self) -> Result<(), EngineError>;
    fn act(&mut self, seat: usize, action: PlayerAction) -> Result<(), EngineError>;
    fn end_round(&mut self) -> Result<(), EngineError>;
    fn to_showdown(&mut self) -> Result<(), EngineError>;

    // Queries
    fn phase(&self) -> PhaseTag;
    fn board(&self) -> &Board;
    fn legal_actions(&self, seat: usize) -> LegalActions;
    fn action_on(&self) -> Option<usize>;
    /// Seats paid in the last finished hand, clockwise from the button.
    fn winners(&self) -> &[usize];
    fn is_round_closed(&self) -> bool;
    fn pot_total(&self) -> u64;
    fn seat_count(&self) -> usize;
    fn live_count(&self) -> usize;
    fn hole_cards(&self, seat: usize) -> Option<HoleCards>;
    fn stack(&self, seat: usize) -> Option<u64>;
}

impl TableEngine for Table {
    fn start_hand(&mut self) -> Result<(), EngineError> {
        Table::start_hand(self)
    }
    fn deal_cards(&mut self) -> Result<(), EngineError> {
        Table::deal_cards(self)
    }
    fn act(&mut self, seat: usize, action: PlayerAction) -> Result<(), EngineError> {
        Table::act(self, seat, action)
    }
    fn end_round(&mut self) -> Result<(), EngineError> {
        Table::end_round(self)
    }
    fn to_showdown(&mut self) -> Result<(), EngineError> {
        Table::to_showdown(self)
    }

    fn phase(&self) -> PhaseTag {
        self.phase_tag()
    }
    fn board(&self) -> &Board {
        Table::board(self)
    }
    fn legal_actions(&self, seat: usize) -> LegalActions {
        Table::legal_actions(self, seat)
    }
    fn action_on(&self) -> Option<usize> {
        Table::action_on(self)
    }
    fn winners(&self) -> &[usize] {
        Table::winners(self)
    }
    fn is_round_closed(&self) -> bool {
        Table::is_round_closed(self)
    }
    fn pot_total(&self) -> u64 {
        Table::pot_total(self)
    }
    fn seat_count(&self) -> usize {
        Table::seat_count(self)
    }
    fn live_count(&self) -> usize {
        Table::live_count(self)
    }
    fn hole_cards(&self, seat: usize) -> Option<HoleCards> {
        self.seat(seat).and_then(|s| s.hole())
    }
    fn stack(&self, seat: usize) -> Option<u64> {
        self.seat(seat).map(|s| s.stack())
    }
}
