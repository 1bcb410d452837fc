use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::evaluator::{
    evaluate, evaluate_five, evaluate_seven, Category, EvalCache, Evaluation,
};
use proptest::prelude::*;
use proptest::sample::subsequence;
use std::cmp::Ordering;

fn full_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
        .collect()
}

/// Seven distinct cards in random order.
fn seven_cards() -> impl Strategy<Value = Vec<Card>> {
    subsequence(full_deck(), 7).prop_shuffle()
}

fn any_card() -> impl Strategy<Value = Card> {
    (0usize..52).prop_map(|i| full_deck()[i])
}

fn rank_from_val(v: u8) -> Rank {
    Rank::from_value(v).expect("rank in 2..=14")
}

fn straight_cards(top: u8) -> [Card; 5] {
    let ranks = if top == 5 {
        [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]
    } else {
        [
            rank_from_val(top - 4),
            rank_from_val(top - 3),
            rank_from_val(top - 2),
            rank_from_val(top - 1),
            rank_from_val(top),
        ]
    };
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];
    [
        Card::new(ranks[0], suits[0]),
        Card::new(ranks[1], suits[1]),
        Card::new(ranks[2], suits[2]),
        Card::new(ranks[3], suits[3]),
        Card::new(ranks[4], suits[4]),
    ]
}

fn flush_rank_set() -> impl Strategy<Value = Vec<Rank>> {
    prop::collection::btree_set(2u8..=14u8, 5)
        .prop_filter("non-straight ranks", |set| {
            let mut vals: Vec<u8> = set.iter().copied().collect();
            vals.sort_unstable();
            let is_wheel = vals == vec![2, 3, 4, 5, 14];
            let is_straight = vals.windows(2).all(|w| w[1] == w[0] + 1);
            !(is_straight || is_wheel)
        })
        .prop_map(|set| set.into_iter().rev().map(rank_from_val).collect())
}

/// (category, tiebreak) compared lexicographically.
fn lexicographic(a: &Evaluation, b: &Evaluation) -> Ordering {
    a.category.cmp(&b.category).then_with(|| a.tiebreak.cmp(&b.tiebreak))
}

proptest! {
    #[test]
    fn score_order_matches_category_then_tiebreak(a in seven_cards(), b in seven_cards()) {
        let ea = evaluate(&a).unwrap();
        let eb = evaluate(&b).unwrap();
        prop_assert_eq!(ea.score().cmp(&eb.score()), lexicographic(&ea, &eb));
        prop_assert_eq!(ea.cmp(&eb), lexicographic(&ea, &eb));
    }

    #[test]
    fn evaluation_ignores_input_order(cards in seven_cards(), rotate in 0usize..7) {
        let mut reversed = cards.clone();
        reversed.reverse();
        let mut rotated = cards.clone();
        rotated.rotate_left(rotate);
        let e = evaluate(&cards).unwrap();
        for other in [reversed, rotated] {
            let o = evaluate(&other).unwrap();
            prop_assert_eq!(o.score(), e.score());
            prop_assert_eq!(o.best_five, e.best_five);
            prop_assert_eq!(&o.tiebreak, &e.tiebreak);
        }
    }

    #[test]
    fn seven_card_best_is_at_least_as_good_as_any_five(cards in seven_cards()) {
        let arr: [Card; 7] = cards.clone().try_into().unwrap();
        let best7 = evaluate_seven(&arr);
        for i in 0..3 { for j in (i+1)..4 { for k in (j+1)..5 { for l in (k+1)..6 { for m in (l+1)..7 {
            let five = [arr[i], arr[j], arr[k], arr[l], arr[m]];
            prop_assert!(best7 >= evaluate_five(&five));
        }}}}}
    }

    #[test]
    fn best_five_comes_from_the_input(cards in seven_cards()) {
        let e = evaluate(&cards).unwrap();
        for c in e.best_five {
            prop_assert!(cards.contains(&c));
        }
        prop_assert_eq!(evaluate_five(&e.best_five).score(), e.score());
    }

    #[test]
    fn five_card_ordering_is_antisymmetric_and_transitive(a in prop::array::uniform5(any_card()), b in prop::array::uniform5(any_card()), c in prop::array::uniform5(any_card())) {
        let ea = evaluate_five(&a);
        let eb = evaluate_five(&b);
        let ec = evaluate_five(&c);

        if ea >= eb && eb >= ea { prop_assert_eq!(ea.score(), eb.score()); }
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
    }

    #[test]
    fn straight_ordering_respects_top_card(top_hi in 6u8..=14u8, top_lo in 5u8..=13u8) {
        prop_assume!(top_hi > top_lo);
        let e_hi = evaluate_five(&straight_cards(top_hi));
        let e_lo = evaluate_five(&straight_cards(top_lo));
        prop_assert_eq!(e_hi.category, Category::Straight);
        prop_assert_eq!(e_lo.category, Category::Straight);
        prop_assert!(e_hi > e_lo);
    }

    #[test]
    fn wheel_is_lowest_straight(top in 6u8..=14u8) {
        let e_wheel = evaluate_five(&straight_cards(5));
        let e_high = evaluate_five(&straight_cards(top));
        prop_assert_eq!(e_wheel.category, Category::Straight);
        prop_assert_eq!(&e_wheel.tiebreak, &vec![Rank::Five]);
        prop_assert!(e_high > e_wheel);
    }

    #[test]
    fn flush_kicker_ordering(a in flush_rank_set(), b in flush_rank_set()) {
        let suited = |ranks: &[Rank]| -> [Card; 5] {
            [0, 1, 2, 3, 4].map(|i| Card::new(ranks[i], Suit::Hearts))
        };
        let e_a = evaluate_five(&suited(&a));
        let e_b = evaluate_five(&suited(&b));
        prop_assert_eq!(e_a.category, Category::Flush);
        prop_assert_eq!(e_b.category, Category::Flush);
        prop_assert_eq!(e_a.cmp(&e_b), a.cmp(&b));
    }

    #[test]
    fn cache_agrees_with_direct_evaluation(hands in prop::collection::vec(seven_cards(), 1..8)) {
        let mut cache = EvalCache::new();
        for cards in hands.iter().chain(hands.iter()) {
            prop_assert_eq!(cache.evaluate(cards).unwrap().score(), evaluate(cards).unwrap().score());
        }
        prop_assert!(cache.hits() >= hands.len() as u64);
    }
}
