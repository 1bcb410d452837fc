use holdem_engine::config::TableConfig;
use holdem_engine::error::EngineError;
use holdem_engine::table::{ActionError, Phase, PhaseTag, PlayerAction, Street, Table, TableAction};

fn advance_with_checks(table: &mut Table, street: Street) {
    let max_steps = table.seat_count() + 3;
    for _ in 0..max_steps {
        match table.action_on() {
            Some(seat) => {
                let legal = table.legal_actions(seat);
                let action = if legal.can_check { PlayerAction::Check } else { PlayerAction::Call };
                table.act(seat, action).unwrap();
            }
            None => {
                assert_eq!(table.phase(), Phase::Betting(street));
                table.end_round().unwrap();
                return;
            }
        }
    }
    panic!("street did not close on {street:?}");
}

fn dealt(n: usize, stack: u64) -> Table {
    let mut t = Table::new(TableConfig::new(n, stack, 5, 10)).unwrap();
    t.start_hand().unwrap();
    t.deal_cards().unwrap();
    t
}

#[test]
fn all_in_preflop_runs_out_the_board_at_showdown() {
    let mut t = dealt(3, 20);
    t.act(0, PlayerAction::RaiseTo(20)).unwrap();
    t.act(1, PlayerAction::Call).unwrap();
    t.act(2, PlayerAction::Call).unwrap();
    assert!(t.is_round_closed());
    assert_eq!(t.action_on(), None);

    t.to_showdown().unwrap();
    assert_eq!(t.phase_tag(), PhaseTag::Complete);
    assert_eq!(t.board().len(), 5);
    assert_eq!(t.total_chips(), 60);
}

#[test]
fn closed_all_in_rounds_can_also_be_ended_street_by_street() {
    let mut t = dealt(2, 50);
    t.act(0, PlayerAction::RaiseTo(50)).unwrap();
    t.act(1, PlayerAction::Call).unwrap();
    for street in [Street::Flop, Street::Turn, Street::River] {
        t.end_round().unwrap();
        assert_eq!(t.phase(), Phase::Betting(street));
        assert_eq!(t.action_on(), None);
    }
    t.end_round().unwrap();
    assert_eq!(t.phase(), Phase::Showdown);
    t.to_showdown().unwrap();
    assert_eq!(t.phase(), Phase::Complete);
}

#[test]
fn check_down_advances_to_showdown() {
    let mut t = dealt(3, 100);
    advance_with_checks(&mut t, Street::Preflop);
    advance_with_checks(&mut t, Street::Flop);
    advance_with_checks(&mut t, Street::Turn);
    advance_with_checks(&mut t, Street::River);

    assert_eq!(t.phase(), Phase::Showdown);
    assert_eq!(t.board().len(), 5);
    t.apply_expecting(PhaseTag::Showdown, TableAction::ToShowdown).unwrap();
    assert_eq!(t.pot_total(), 0);
    assert_eq!(t.total_chips(), 300);
}

#[test]
fn postflop_bet_and_calls_advance() {
    let mut t = dealt(3, 100);
    advance_with_checks(&mut t, Street::Preflop);
    assert_eq!(t.phase(), Phase::Betting(Street::Flop));

    let seat = t.action_on().unwrap();
    let legal = t.legal_actions(seat);
    assert!(legal.can_bet && !legal.can_raise);
    assert_eq!(legal.min_bet, 10);
    t.act(seat, PlayerAction::Bet(10)).unwrap();
    advance_with_checks(&mut t, Street::Flop);

    assert_eq!(t.phase(), Phase::Betting(Street::Turn));
    assert_eq!(t.pot_total(), 60);
}

#[test]
fn end_round_before_closure_is_rejected_without_change() {
    let mut t = dealt(3, 100);
    let before = t.snapshot();
    assert_eq!(
        t.end_round().unwrap_err(),
        EngineError::IllegalAction(ActionError::RoundNotClosed)
    );
    assert_eq!(t.snapshot(), before);
}

#[test]
fn phase_assertions_fail_with_state_mismatch() {
    let mut t = dealt(3, 100);
    let err = t.apply_expecting(PhaseTag::Flop, TableAction::EndRound).unwrap_err();
    assert_eq!(err, EngineError::StateMismatch { expected: PhaseTag::Flop, actual: PhaseTag::Preflop });
}
