//! The table state machine: one hand at a time, street by street.
//!
//! Every public operation goes through [`Table::apply`], which runs the
//! transition against a working copy and commits it only on success, so a
//! rejected action never leaves a half-applied state behind.

use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::error::{EngineError, ValidationError};
use crate::evaluator::EvalError;
use crate::hand::{Board, HoleCards};
use crate::pot::{self, compute_pots, Contribution, Pot};
use crate::rng::Lcg;
use crate::showdown::{self, PotAward, ShowdownResult};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Community cards exposed when this street is dealt.
    pub const fn cards_dealt(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    /// The street whose cards complete a board of `len` cards, if any remain.
    const fn following_board(len: usize) -> Option<Street> {
        match len {
            0..=2 => Some(Street::Flop),
            3 => Some(Street::Turn),
            4 => Some(Street::River),
            _ => None,
        }
    }
}

/// Where the hand is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Deal,
    Betting(Street),
    Showdown,
    Complete,
}

impl Phase {
    pub const fn tag(self) -> PhaseTag {
        match self {
            Phase::Init => PhaseTag::Init,
            Phase::Deal => PhaseTag::Deal,
            Phase::Betting(Street::Preflop) => PhaseTag::Preflop,
            Phase::Betting(Street::Flop) => PhaseTag::Flop,
            Phase::Betting(Street::Turn) => PhaseTag::Turn,
            Phase::Betting(Street::River) => PhaseTag::River,
            Phase::Showdown => PhaseTag::Showdown,
            Phase::Complete => PhaseTag::Complete,
        }
    }

    pub const fn street(self) -> Option<Street> {
        match self {
            Phase::Betting(s) => Some(s),
            _ => None,
        }
    }
}

/// Flat phase identifier used in snapshots and phase assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseTag {
    Init,
    Deal,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

impl PhaseTag {
    pub const fn label(self) -> &'static str {
        match self {
            PhaseTag::Init => "INIT",
            PhaseTag::Deal => "DEAL",
            PhaseTag::Preflop => "PREFLOP",
            PhaseTag::Flop => "FLOP",
            PhaseTag::Turn => "TURN",
            PhaseTag::River => "RIVER",
            PhaseTag::Showdown => "SHOWDOWN",
            PhaseTag::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for PhaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A betting decision. Bet and raise amounts are street totals ("to").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Bet(u64),
    RaiseTo(u64),
}

/// Every transition the table accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableAction {
    StartHand,
    DealCards,
    Player { seat: usize, action: PlayerAction },
    EndRound,
    ToShowdown,
}

impl TableAction {
    pub const fn name(&self) -> &'static str {
        match self {
            TableAction::StartHand => "start hand",
            TableAction::DealCards => "deal cards",
            TableAction::Player { .. } => "player action",
            TableAction::EndRound => "end round",
            TableAction::ToShowdown => "showdown",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("{action} is not allowed during {phase}")]
    WrongPhase { action: &'static str, phase: PhaseTag },
    #[error("seat {seat} acted out of turn (action is on {expected:?})")]
    NotYourTurn { seat: usize, expected: Option<usize> },
    #[error("seat {0} has already folded")]
    SeatFolded(usize),
    #[error("seat {0} is all-in")]
    SeatAllIn(usize),
    #[error("cannot check while facing {to_call}")]
    CannotCheck { to_call: u64 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("betting is not allowed when facing a bet of {current_bet}")]
    BetNotAllowed { current_bet: u64 },
    #[error("raising is not allowed for seat {0}")]
    RaiseNotAllowed(usize),
    #[error("amount too small: min {min}, got {got}")]
    AmountTooSmall { min: u64, got: u64 },
    #[error("amount too large: max {max}, got {got}")]
    AmountTooLarge { max: u64, got: u64 },
    #[error("betting round is not closed")]
    RoundNotClosed,
    #[error("need at least two funded seats, have {0}")]
    NotEnoughPlayers(usize),
    #[error("need at least two live hands for a showdown, have {0}")]
    NotEnoughLiveHands(usize),
}

/// What a seat may do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    pub seat: usize,
    /// Whether action is on this seat.
    pub to_act: bool,
    pub can_fold: bool,
    pub can_check: bool,
    pub can_call: bool,
    /// Chips a call puts in, capped by the stack.
    pub call_amount: u64,
    pub call_is_all_in: bool,
    pub can_bet: bool,
    pub min_bet: u64,
    pub can_raise: bool,
    pub min_raise_to: u64,
    /// Table stakes: stack plus this street's contribution.
    pub max_raise_to: u64,
}

impl LegalActions {
    pub const fn none(seat: usize) -> Self {
        Self {
            seat,
            to_act: false,
            can_fold: false,
            can_check: false,
            can_call: false,
            call_amount: 0,
            call_is_all_in: false,
            can_bet: false,
            min_bet: 0,
            can_raise: false,
            min_raise_to: 0,
            max_raise_to: 0,
        }
    }

    pub fn any(&self) -> bool {
        self.can_fold || self.can_check || self.can_call || self.can_bet || self.can_raise
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEvent {
    SmallBlind(u64),
    BigBlind(u64),
    Fold,
    Check,
    Call(u64),
    Bet(u64),
    RaiseTo(u64),
    /// Community cards exposed for a street.
    Deal { street: Street, cards: Vec<Card> },
    /// One pot paid out, `(seat, chips)` in odd-chip order.
    Award { pot: usize, amount: u64, shares: Vec<(usize, u64)> },
}

impl HistoryEvent {
    pub fn label(&self) -> &'static str {
        match self {
            HistoryEvent::SmallBlind(_) => "SB",
            HistoryEvent::BigBlind(_) => "BB",
            HistoryEvent::Fold => "Fold",
            HistoryEvent::Check => "Check",
            HistoryEvent::Call(_) => "Call",
            HistoryEvent::Bet(_) => "Bet",
            HistoryEvent::RaiseTo(_) => "Raise to",
            HistoryEvent::Deal { .. } => "Deal",
            HistoryEvent::Award { .. } => "Award",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub phase: PhaseTag,
    pub seat: Option<usize>,
    pub event: HistoryEvent,
}

/// One occupied seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub(crate) id: usize,
    pub(crate) stack: u64,
    /// Chips put in on the current street.
    pub(crate) bet: u64,
    /// Chips put in this hand.
    pub(crate) contributed: u64,
    pub(crate) folded: bool,
    pub(crate) all_in: bool,
    pub(crate) hole: Option<HoleCards>,
    /// Acted since the last full bet or raise on this street.
    pub(crate) acted: bool,
}

impl Seat {
    pub(crate) fn new(id: usize, stack: u64) -> Self {
        Self {
            id,
            stack,
            bet: 0,
            contributed: 0,
            folded: false,
            all_in: false,
            hole: None,
            acted: false,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn stack(&self) -> u64 {
        self.stack
    }

    /// Chips put in on the current street.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Chips put in this hand.
    pub fn contributed(&self) -> u64 {
        self.contributed
    }

    pub fn folded(&self) -> bool {
        self.folded
    }

    pub fn all_in(&self) -> bool {
        self.all_in
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Still holding cards this hand.
    pub fn is_live(&self) -> bool {
        !self.folded
    }

    /// Live and able to bet.
    pub fn is_active(&self) -> bool {
        !self.folded && !self.all_in
    }

    /// Move up to `amount` chips from the stack into the pot; returns what was paid.
    fn commit(&mut self, amount: u64) -> u64 {
        let pay = self.stack.min(amount);
        self.stack -= pay;
        self.bet += pay;
        self.contributed += pay;
        if self.stack == 0 {
            self.all_in = true;
        }
        pay
    }
}

/// A table running one hand at a time.
///
/// ```
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::table::{PhaseTag, PlayerAction, Table};
///
/// let mut table = Table::new(TableConfig::new(2, 100, 1, 2)).unwrap();
/// table.start_hand().unwrap();
/// table.deal_cards().unwrap();
/// let sb = table.action_on().unwrap();
/// table.act(sb, PlayerAction::Fold).unwrap();
/// table.end_round().unwrap();
/// assert_eq!(table.phase_tag(), PhaseTag::Complete);
/// assert_eq!(table.total_chips(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) config: TableConfig,
    pub(crate) phase: Phase,
    pub(crate) seats: Vec<Option<Seat>>,
    pub(crate) board: Board,
    pub(crate) burned: Vec<Card>,
    pub(crate) deck: Deck,
    pub(crate) rng: Lcg,
    pub(crate) pots: Vec<Pot>,
    pub(crate) button: usize,
    pub(crate) small_blind_seat: Option<usize>,
    pub(crate) big_blind_seat: Option<usize>,
    pub(crate) current_bet: u64,
    pub(crate) last_raise_size: u64,
    pub(crate) last_aggressor: Option<usize>,
    pub(crate) round_starter: Option<usize>,
    pub(crate) action_on: Option<usize>,
    pub(crate) hand_number: u64,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) awards: Vec<PotAward>,
    pub(crate) winners: Vec<usize>,
    pub(crate) payouts: Vec<(usize, u64)>,
    pub(crate) shown: Vec<(usize, HoleCards)>,
}

impl Table {
    pub fn new(config: TableConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let seats = config
            .seat_stacks()
            .into_iter()
            .enumerate()
            .map(|(id, stack)| stack.map(|s| Seat::new(id, s)))
            .collect();
        Ok(Self {
            rng: Lcg::new(config.seed),
            button: config.button,
            last_raise_size: config.big_blind,
            config,
            phase: Phase::Init,
            seats,
            board: Board::default(),
            burned: Vec::new(),
            deck: Deck::standard(),
            pots: Vec::new(),
            small_blind_seat: None,
            big_blind_seat: None,
            current_bet: 0,
            last_aggressor: None,
            round_starter: None,
            action_on: None,
            hand_number: 0,
            history: Vec::new(),
            awards: Vec::new(),
            winners: Vec::new(),
            payouts: Vec::new(),
            shown: Vec::new(),
        })
    }

    /// Build a table and apply a recorded action sequence to it.
    pub fn replay(config: TableConfig, actions: &[TableAction]) -> Result<Self, EngineError> {
        let mut table = Self::new(config)?;
        for &action in actions {
            table.apply(action)?;
        }
        Ok(table)
    }

    // Queries

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_tag(&self) -> PhaseTag {
        self.phase.tag()
    }

    pub fn seats(&self) -> &[Option<Seat>] {
        &self.seats
    }

    pub fn seat(&self, index: usize) -> Option<&Seat> {
        self.seats.get(index).and_then(|s| s.as_ref())
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cards burned this hand, in burn order.
    pub fn burned(&self) -> &[Card] {
        &self.burned
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn pot_total(&self) -> u64 {
        pot::total(&self.pots)
    }

    /// Stacks plus pots; constant within a hand.
    pub fn total_chips(&self) -> u64 {
        self.seats.iter().flatten().map(|s| s.stack).sum::<u64>() + self.pot_total()
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn small_blind_seat(&self) -> Option<usize> {
        self.small_blind_seat
    }

    pub fn big_blind_seat(&self) -> Option<usize> {
        self.big_blind_seat
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn last_raise_size(&self) -> u64 {
        self.last_raise_size
    }

    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }

    /// Seat that opened the current betting round.
    pub fn round_starter(&self) -> Option<usize> {
        self.round_starter
    }

    /// Seat whose turn it is; `None` when the round is closed or no hand is running.
    pub fn action_on(&self) -> Option<usize> {
        self.action_on
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Per-pot splits of the last finished hand.
    pub fn awards(&self) -> &[PotAward] {
        &self.awards
    }

    /// Seats that won chips in the last finished hand, clockwise from the button.
    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    /// `(seat, chips won)` for the last finished hand, ascending by seat.
    pub fn payouts(&self) -> &[(usize, u64)] {
        &self.payouts
    }

    /// Hole cards revealed at the last showdown, ascending by seat.
    pub fn shown_hands(&self) -> &[(usize, HoleCards)] {
        &self.shown
    }

    pub fn shown_hand(&self, seat: usize) -> Option<HoleCards> {
        self.shown.iter().find(|(s, _)| *s == seat).map(|&(_, h)| h)
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    pub fn live_count(&self) -> usize {
        self.seats.iter().flatten().filter(|s| s.is_live()).count()
    }

    fn active_count(&self) -> usize {
        self.seats.iter().flatten().filter(|s| s.is_active()).count()
    }

    fn is_active(&self, i: usize) -> bool {
        self.seat(i).is_some_and(Seat::is_active)
    }

    fn is_funded(&self, i: usize) -> bool {
        self.seat(i).is_some_and(|s| s.stack > 0)
    }

    fn needs_action(&self, i: usize) -> bool {
        self.seat(i).is_some_and(|s| s.is_active() && (!s.acted || s.bet < self.current_bet))
    }

    /// First seat strictly after `start` (wrapping, `start` itself last) matching `pred`.
    fn next_from(&self, start: usize, pred: impl Fn(&Self, usize) -> bool) -> Option<usize> {
        let n = self.seats.len();
        (1..=n).map(|k| (start + k) % n).find(|&i| pred(self, i))
    }

    /// Like [`Table::next_from`] but `start` is checked first.
    fn first_from(&self, start: usize, pred: impl Fn(&Self, usize) -> bool) -> Option<usize> {
        let n = self.seats.len();
        (0..n).map(|k| (start + k) % n).find(|&i| pred(self, i))
    }

    /// Whether the current betting round is over.
    ///
    /// In priority order: at most one live seat; no seat left that can bet;
    /// every seat that can bet has matched the current bet and acted since
    /// the last full bet or raise. A lone seat that can still bet and has
    /// matched has nobody left to bet against.
    pub fn is_round_closed(&self) -> bool {
        if self.live_count() <= 1 {
            return true;
        }
        let mut active = self.seats.iter().flatten().filter(|s| s.is_active()).peekable();
        if active.peek().is_none() {
            return true;
        }
        if self.active_count() == 1 {
            return active.all(|s| s.bet >= self.current_bet);
        }
        active.all(|s| s.bet == self.current_bet && s.acted)
    }

    /// Legal actions for `seat` in the current state.
    pub fn legal_actions(&self, seat: usize) -> LegalActions {
        let Some(s) = self.seat(seat) else {
            return LegalActions::none(seat);
        };
        if self.phase.street().is_none() || !s.is_active() {
            return LegalActions::none(seat);
        }
        let to_act = self.action_on == Some(seat);
        let owed = self.current_bet.saturating_sub(s.bet);
        let call_amount = owed.min(s.stack);
        let max_raise_to = s.stack + s.bet;
        let big_blind = self.config.big_blind;
        LegalActions {
            seat,
            to_act,
            can_fold: to_act,
            can_check: to_act && owed == 0,
            can_call: to_act && owed > 0,
            call_amount,
            call_is_all_in: owed > 0 && call_amount == s.stack,
            can_bet: to_act && self.current_bet == 0 && s.stack > 0,
            min_bet: big_blind.min(max_raise_to),
            can_raise: to_act && self.current_bet > 0 && !s.acted && max_raise_to > self.current_bet,
            min_raise_to: self.current_bet + self.last_raise_size.max(big_blind),
            max_raise_to,
        }
    }

    // Operations

    pub fn start_hand(&mut self) -> Result<(), EngineError> {
        self.apply(TableAction::StartHand)
    }

    pub fn deal_cards(&mut self) -> Result<(), EngineError> {
        self.apply(TableAction::DealCards)
    }

    pub fn act(&mut self, seat: usize, action: PlayerAction) -> Result<(), EngineError> {
        self.apply(TableAction::Player { seat, action })
    }

    pub fn end_round(&mut self) -> Result<(), EngineError> {
        self.apply(TableAction::EndRound)
    }

    pub fn to_showdown(&mut self) -> Result<(), EngineError> {
        self.apply(TableAction::ToShowdown)
    }

    /// Apply `action` only if the table is in `expected`.
    pub fn apply_expecting(
        &mut self,
        expected: PhaseTag,
        action: TableAction,
    ) -> Result<(), EngineError> {
        let actual = self.phase_tag();
        if actual != expected {
            return Err(EngineError::StateMismatch { expected, actual });
        }
        self.apply(action)
    }

    /// Apply one transition atomically.
    pub fn apply(&mut self, action: TableAction) -> Result<(), EngineError> {
        let mut next = self.clone();
        next.transition(action)?;
        *self = next;
        Ok(())
    }

    fn transition(&mut self, action: TableAction) -> Result<(), EngineError> {
        use TableAction as A;
        let wrong = |phase: Phase| -> Result<(), EngineError> {
            Err(ActionError::WrongPhase { action: action.name(), phase: phase.tag() }.into())
        };
        match (self.phase, action) {
            (Phase::Init | Phase::Complete, A::StartHand) => self.begin_hand(),
            (Phase::Init | Phase::Complete, A::DealCards | A::Player { .. }) => wrong(self.phase),
            (Phase::Init | Phase::Complete, A::EndRound | A::ToShowdown) => wrong(self.phase),
            (Phase::Deal, A::DealCards) => self.deal_hole_cards(),
            (Phase::Deal, A::StartHand | A::Player { .. } | A::EndRound | A::ToShowdown) => {
                wrong(self.phase)
            }
            (Phase::Betting(_), A::Player { seat, action }) => self.player_action(seat, action),
            (Phase::Betting(street), A::EndRound) => self.close_round(street),
            (Phase::Betting(_), A::ToShowdown) => self.showdown(),
            (Phase::Betting(_), A::StartHand | A::DealCards) => wrong(self.phase),
            (Phase::Showdown, A::ToShowdown) => self.showdown(),
            (Phase::Showdown, A::StartHand | A::DealCards | A::Player { .. } | A::EndRound) => {
                wrong(self.phase)
            }
        }
    }

    fn record(&mut self, seat: Option<usize>, event: HistoryEvent) {
        self.history.push(HistoryEntry { phase: self.phase.tag(), seat, event });
    }

    fn refresh_pots(&mut self) {
        let contributions: Vec<Contribution> = self
            .seats
            .iter()
            .flatten()
            .map(|s| Contribution { seat: s.id, amount: s.contributed, folded: s.folded })
            .collect();
        self.pots = compute_pots(&contributions);
    }

    fn seat_mut(&mut self, index: usize) -> Result<&mut Seat, EngineError> {
        let seats = self.seats.len();
        match self.seats.get_mut(index) {
            Some(Some(seat)) => Ok(seat),
            Some(None) => Err(ValidationError::EmptySeat(index).into()),
            None => Err(ValidationError::SeatIndex { seat: index, seats }.into()),
        }
    }

    fn begin_hand(&mut self) -> Result<(), EngineError> {
        let funded = (0..self.seats.len()).filter(|&i| self.is_funded(i)).count();
        if funded < 2 {
            return Err(ActionError::NotEnoughPlayers(funded).into());
        }
        let button = if self.hand_number == 0 {
            self.first_from(self.config.button, Self::is_funded)
        } else {
            self.next_from(self.button, Self::is_funded)
        };
        self.button = button.ok_or(ActionError::NotEnoughPlayers(funded))?;

        for seat in self.seats.iter_mut().flatten() {
            seat.bet = 0;
            seat.contributed = 0;
            seat.hole = None;
            seat.acted = false;
            seat.all_in = false;
            // busted seats sit the hand out
            seat.folded = seat.stack == 0;
        }
        self.board.clear();
        self.burned.clear();
        self.pots.clear();
        self.history.clear();
        self.awards.clear();
        self.winners.clear();
        self.payouts.clear();
        self.shown.clear();
        self.current_bet = 0;
        self.last_raise_size = self.config.big_blind;
        self.last_aggressor = None;
        self.round_starter = None;
        self.action_on = None;
        self.deck = Deck::shuffled(&mut self.rng);

        let (sb, bb) = if funded == 2 {
            (Some(self.button), self.next_from(self.button, Self::is_funded))
        } else {
            let sb = self.next_from(self.button, Self::is_funded);
            (sb, sb.and_then(|s| self.next_from(s, Self::is_funded)))
        };
        self.small_blind_seat = sb;
        self.big_blind_seat = bb;
        self.hand_number += 1;
        self.phase = Phase::Deal;
        debug!(
            "hand {} started: button {}, blinds {:?}/{:?}, rng state {}",
            self.hand_number,
            self.button,
            sb,
            bb,
            self.rng.state()
        );
        Ok(())
    }

    fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        let order: Vec<usize> = {
            let n = self.seats.len();
            (1..=n)
                .map(|k| (self.button + k) % n)
                .filter(|&i| self.seat(i).is_some_and(Seat::is_live))
                .collect()
        };
        let mut first = Vec::with_capacity(order.len());
        for _ in &order {
            first.push(self.deck.draw_one()?);
        }
        for (&seat, &a) in order.iter().zip(&first) {
            let b = self.deck.draw_one()?;
            let hole = HoleCards::try_new(a, b).map_err(EvalError::from)?;
            self.seat_mut(seat)?.hole = Some(hole);
        }

        self.phase = Phase::Betting(Street::Preflop);
        if let Some(sb) = self.small_blind_seat {
            let amount = self.config.small_blind;
            let paid = self.seat_mut(sb)?.commit(amount);
            self.record(Some(sb), HistoryEvent::SmallBlind(paid));
        }
        if let Some(bb) = self.big_blind_seat {
            let amount = self.config.big_blind;
            let paid = self.seat_mut(bb)?.commit(amount);
            self.record(Some(bb), HistoryEvent::BigBlind(paid));
        }
        self.current_bet = self.seats.iter().flatten().map(|s| s.bet).max().unwrap_or(0);
        self.refresh_pots();

        let heads_up = order.len() == 2;
        let start = if heads_up {
            self.small_blind_seat.and_then(|sb| self.first_from(sb, Self::is_active))
        } else {
            self.big_blind_seat.and_then(|bb| self.next_from(bb, Self::is_active))
        };
        self.open_round(start);
        debug!("dealt {} hands, {} cards left", order.len(), self.deck.len());
        Ok(())
    }

    /// Point action at `start` unless the round is already closed.
    fn open_round(&mut self, start: Option<usize>) {
        self.round_starter = start;
        self.action_on = if self.is_round_closed() { None } else { start };
    }

    fn player_action(&mut self, seat: usize, action: PlayerAction) -> Result<(), EngineError> {
        let s = match self.seats.get(seat) {
            Some(Some(s)) => s,
            Some(None) => return Err(ValidationError::EmptySeat(seat).into()),
            None => {
                return Err(ValidationError::SeatIndex { seat, seats: self.seats.len() }.into())
            }
        };
        if s.folded {
            return Err(ActionError::SeatFolded(seat).into());
        }
        if s.all_in {
            return Err(ActionError::SeatAllIn(seat).into());
        }
        if self.action_on != Some(seat) {
            return Err(ActionError::NotYourTurn { seat, expected: self.action_on }.into());
        }
        let owed = self.current_bet.saturating_sub(s.bet);
        let legal = self.legal_actions(seat);

        match action {
            PlayerAction::Fold => {
                self.seat_mut(seat)?.folded = true;
                self.record(Some(seat), HistoryEvent::Fold);
            }
            PlayerAction::Check => {
                if !legal.can_check {
                    return Err(ActionError::CannotCheck { to_call: owed }.into());
                }
                self.record(Some(seat), HistoryEvent::Check);
            }
            PlayerAction::Call => {
                if !legal.can_call {
                    return Err(ActionError::NothingToCall.into());
                }
                let paid = self.seat_mut(seat)?.commit(legal.call_amount);
                self.record(Some(seat), HistoryEvent::Call(paid));
            }
            PlayerAction::Bet(to) => {
                if !legal.can_bet {
                    return Err(ActionError::BetNotAllowed { current_bet: self.current_bet }.into());
                }
                Self::check_amount(to, legal.min_bet, legal.max_raise_to)?;
                self.raise_to(seat, to)?;
                self.record(Some(seat), HistoryEvent::Bet(to));
            }
            PlayerAction::RaiseTo(to) => {
                if !legal.can_raise {
                    return Err(ActionError::RaiseNotAllowed(seat).into());
                }
                Self::check_amount(to, legal.min_raise_to, legal.max_raise_to)?;
                self.raise_to(seat, to)?;
                self.record(Some(seat), HistoryEvent::RaiseTo(to));
            }
        }
        self.seat_mut(seat)?.acted = true;
        self.refresh_pots();
        trace!("seat {seat} {action:?}; current bet {}", self.current_bet);

        self.action_on = if self.is_round_closed() {
            None
        } else {
            self.next_from(seat, Self::needs_action)
        };
        Ok(())
    }

    /// Amounts below `min` are only allowed as an all-in for exactly `max`.
    fn check_amount(to: u64, min: u64, max: u64) -> Result<(), ActionError> {
        if to > max {
            return Err(ActionError::AmountTooLarge { max, got: to });
        }
        if to < min && to != max {
            return Err(ActionError::AmountTooSmall { min, got: to });
        }
        if to == 0 {
            return Err(ActionError::AmountTooSmall { min: min.max(1), got: to });
        }
        Ok(())
    }

    fn raise_to(&mut self, seat: usize, to: u64) -> Result<(), EngineError> {
        let full_raise = self.last_raise_size.max(self.config.big_blind);
        let previous = self.current_bet;
        let s = self.seat_mut(seat)?;
        let need = to - s.bet;
        s.commit(need);
        let raise_size = to - previous;
        self.current_bet = to;
        // a short all-in raise does not reopen betting for seats that already acted,
        // but any opening bet does
        if raise_size >= full_raise || previous == 0 {
            self.last_raise_size = raise_size;
            self.last_aggressor = Some(seat);
            for other in self.seats.iter_mut().flatten() {
                if other.id != seat {
                    other.acted = false;
                }
            }
        }
        Ok(())
    }

    fn close_round(&mut self, street: Street) -> Result<(), EngineError> {
        if !self.is_round_closed() {
            return Err(ActionError::RoundNotClosed.into());
        }
        if self.live_count() <= 1 {
            return self.finish_uncontested();
        }
        self.reset_street();
        match street.next() {
            Some(next) => {
                self.deal_street(next)?;
                self.phase = Phase::Betting(next);
                let start = if self.dealt_count() == 2 {
                    self.small_blind_seat.and_then(|sb| self.first_from(sb, Self::is_active))
                } else {
                    self.next_from(self.button, Self::is_active)
                };
                self.open_round(start);
            }
            None => {
                self.phase = Phase::Showdown;
                self.round_starter = None;
                self.action_on = None;
            }
        }
        debug!("round closed, now {}", self.phase_tag());
        Ok(())
    }

    /// Seats dealt into this hand, folded or not.
    fn dealt_count(&self) -> usize {
        self.seats.iter().flatten().filter(|s| s.hole.is_some()).count()
    }

    fn reset_street(&mut self) {
        for seat in self.seats.iter_mut().flatten() {
            seat.bet = 0;
            seat.acted = false;
        }
        self.current_bet = 0;
        self.last_raise_size = self.config.big_blind;
        self.last_aggressor = None;
    }

    fn deal_street(&mut self, street: Street) -> Result<(), EngineError> {
        let count = street.cards_dealt();
        if self.config.burn_cards {
            // check up front so a short deck fails before anything moves
            if self.deck.len() < count + 1 {
                return Err(EngineError::DeckUnderflow {
                    requested: count + 1,
                    remaining: self.deck.len(),
                });
            }
            let burn = self.deck.burn()?;
            self.burned.push(burn);
        }
        let cards = self.deck.draw(count)?;
        self.board.extend(cards.iter().copied());
        self.history.push(HistoryEntry {
            phase: Phase::Betting(street).tag(),
            seat: None,
            event: HistoryEvent::Deal { street, cards },
        });
        debug!("{street:?} dealt, board {}", self.board);
        Ok(())
    }

    fn showdown(&mut self) -> Result<(), EngineError> {
        if self.phase.street().is_some() && !self.is_round_closed() {
            return Err(ActionError::RoundNotClosed.into());
        }
        let live = self.live_count();
        if live < 2 {
            return Err(ActionError::NotEnoughLiveHands(live).into());
        }
        self.reset_street();
        while let Some(street) = Street::following_board(self.board.len()) {
            self.deal_street(street)?;
        }
        self.phase = Phase::Showdown;
        self.action_on = None;

        let contenders: Vec<(usize, HoleCards)> = self
            .seats
            .iter()
            .flatten()
            .filter(|s| s.is_live())
            .filter_map(|s| s.hole.map(|h| (s.id, h)))
            .collect();
        let result =
            showdown::resolve(&contenders, &self.board, &self.pots, self.button, self.seats.len())?;
        self.settle(result)
    }

    fn finish_uncontested(&mut self) -> Result<(), EngineError> {
        let survivor = self.seats.iter().flatten().find(|s| s.is_live()).map(|s| s.id);
        let result = match survivor {
            Some(seat) => showdown::award_uncontested(seat, &self.pots),
            None => ShowdownResult::default(),
        };
        self.reset_street();
        self.settle(result)
    }

    /// Credit each winner once, log one award per pot, and complete the hand.
    fn settle(&mut self, result: ShowdownResult) -> Result<(), EngineError> {
        for &(seat, amount) in &result.payouts {
            self.seat_mut(seat)?.stack += amount;
        }
        self.phase = Phase::Complete;
        for award in &result.awards {
            let event = HistoryEvent::Award {
                pot: award.pot,
                amount: award.amount,
                shares: award.shares.clone(),
            };
            self.record(None, event);
        }
        self.winners = result.winners(self.button, self.seats.len());
        self.payouts = result.payouts;
        self.awards = result.awards;
        self.shown = result.hands.iter().map(|h| (h.seat, h.hole)).collect();
        for seat in self.seats.iter_mut().flatten() {
            seat.hole = None;
        }
        self.pots.clear();
        self.round_starter = None;
        self.action_on = None;
        info!("hand {} complete: payouts {:?}", self.hand_number, self.payouts);
        Ok(())
    }
}
