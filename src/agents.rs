//! Agents: pluggable seat controllers for simulations and harnesses.
//!
//! `PlayerAgent` picks an action for one seat from its legal actions, and
//! `AgentTable` maps seats to agents and drives a whole hand through any
//! [`TableEngine`].

use crate::engine::TableEngine;
use crate::error::EngineError;
use crate::table::{LegalActions, PhaseTag, PlayerAction};
use core::fmt;
use log::trace;

mod bots;

pub use bots::{PassiveAgent, RandomAgent};

/// Upper bound on operations per hand. A no-limit hand with ten seats finishes
/// far below this; hitting it means an agent keeps producing rejected actions.
pub const MAX_STEPS_PER_HAND: usize = 2_000;

/// A seat controller asked to act whenever action is on its seat.
pub trait PlayerAgent {
    /// Choose an action for `seat`. Returning an illegal action makes the
    /// driving [`AgentTable`] fail the hand with that error.
    fn decide(
        &mut self,
        seat: usize,
        legal: &LegalActions,
        engine: &dyn TableEngine,
    ) -> PlayerAction;

    fn name(&self) -> &'static str {
        "agent"
    }
}

/// Manages a set of optional agents, one per seat. Seats without an agent
/// play passively.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
    fallback: PassiveAgent,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String =
            self.seats.iter().map(|a| if a.is_some() { 'A' } else { '-' }).collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all without agents.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats, fallback: PassiveAgent }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = agent;
    }

    pub fn has_agent(&self, seat: usize) -> bool {
        self.seats.get(seat).is_some_and(|a| a.is_some())
    }

    pub fn agent_name(&self, seat: usize) -> Option<&'static str> {
        self.seats.get(seat).and_then(|a| a.as_deref()).map(|a| a.name())
    }

    /// Ask the agent at `seat` for an action.
    pub fn decide(&mut self, seat: usize, engine: &dyn TableEngine) -> PlayerAction {
        let legal = engine.legal_actions(seat);
        match self.seats.get_mut(seat).and_then(|a| a.as_deref_mut()) {
            Some(agent) => agent.decide(seat, &legal, engine),
            None => self.fallback.decide(seat, &legal, engine),
        }
    }

    /// Play one hand from start to completion and return the winners.
    pub fn play_hand(&mut self, engine: &mut dyn TableEngine) -> Result<Vec<usize>, EngineError> {
        engine.start_hand()?;
        engine.deal_cards()?;
        for _ in 0..MAX_STEPS_PER_HAND {
            match engine.phase() {
                PhaseTag::Complete => return Ok(engine.winners().to_vec()),
                PhaseTag::Showdown => engine.to_showdown()?,
                PhaseTag::Preflop | PhaseTag::Flop | PhaseTag::Turn | PhaseTag::River => {
                    match engine.action_on() {
                        Some(seat) => {
                            let action = self.decide(seat, &*engine);
                            trace!("agent at seat {seat} chose {action:?}");
                            engine.act(seat, action)?;
                        }
                        None => engine.end_round()?,
                    }
                }
                PhaseTag::Init | PhaseTag::Deal => engine.deal_cards()?,
            }
        }
        Err(EngineError::Stalled { steps: MAX_STEPS_PER_HAND })
    }
}
