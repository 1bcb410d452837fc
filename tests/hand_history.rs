use holdem_engine::cards::parse_cards;
use holdem_engine::config::TableConfig;
use holdem_engine::table::{HistoryEvent, PhaseTag, PlayerAction, Street, Table};

#[test]
fn history_records_blinds_and_actions() {
    let mut t = Table::new(TableConfig::new(2, 1000, 5, 10)).unwrap();
    t.start_hand().unwrap();
    t.deal_cards().unwrap();

    let history = t.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].event, HistoryEvent::SmallBlind(5));
    assert_eq!(history[0].seat, Some(0));
    assert_eq!(history[0].phase, PhaseTag::Preflop);
    assert_eq!(history[1].event, HistoryEvent::BigBlind(10));
    assert_eq!(history[1].seat, Some(1));

    t.act(0, PlayerAction::Call).unwrap();
    let last = t.history().last().unwrap();
    assert_eq!(last.event, HistoryEvent::Call(5));
    assert_eq!(last.event.label(), "Call");
}

#[test]
fn short_blind_posts_what_it_has() {
    let cfg = TableConfig::new(3, 100, 5, 10).with_stacks(vec![Some(100), Some(100), Some(4)]);
    let mut t = Table::new(cfg).unwrap();
    t.start_hand().unwrap();
    t.deal_cards().unwrap();
    assert_eq!(t.history()[1].event, HistoryEvent::BigBlind(4));
    assert!(t.seat(2).unwrap().all_in());
    assert_eq!(t.current_bet(), 5);
}

#[test]
fn streets_and_awards_are_logged() {
    let mut t = Table::new(TableConfig::new(2, 1000, 5, 10).with_seed(42)).unwrap();
    t.start_hand().unwrap();
    t.deal_cards().unwrap();
    t.act(0, PlayerAction::Call).unwrap();
    t.act(1, PlayerAction::Check).unwrap();
    t.end_round().unwrap();

    let deal = t.history().last().unwrap();
    assert_eq!(deal.phase, PhaseTag::Flop);
    assert_eq!(deal.seat, None);
    assert_eq!(
        deal.event,
        HistoryEvent::Deal { street: Street::Flop, cards: parse_cards("3s 9h 7s").unwrap() }
    );

    t.act(0, PlayerAction::Check).unwrap();
    t.act(1, PlayerAction::Check).unwrap();
    t.to_showdown().unwrap();
    let award = t.history().last().unwrap();
    assert_eq!(award.phase, PhaseTag::Complete);
    assert_eq!(award.event, HistoryEvent::Award { pot: 0, amount: 20, shares: vec![(0, 20)] });
    let deals = t.history().iter().filter(|e| matches!(e.event, HistoryEvent::Deal { .. })).count();
    assert_eq!(deals, 3);
}

#[test]
fn new_hand_clears_history() {
    let mut t = Table::new(TableConfig::new(2, 1000, 5, 10)).unwrap();
    t.start_hand().unwrap();
    t.deal_cards().unwrap();
    t.act(0, PlayerAction::Fold).unwrap();
    t.end_round().unwrap();
    assert!(matches!(t.history().last().unwrap().event, HistoryEvent::Award { amount: 15, .. }));
    t.start_hand().unwrap();
    assert!(t.history().is_empty());
}
