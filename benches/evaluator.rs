use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_engine::agents::{AgentTable, RandomAgent};
use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::config::TableConfig;
use holdem_engine::evaluator::{evaluate, evaluate_five, EvalCache};
use holdem_engine::table::Table;

fn five(s: &str) -> [Card; 5] {
    let cards = parse_cards(s).expect("valid cards");
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

fn bench_evaluate_five(c: &mut Criterion) {
    let hi = five("Ah Kd 7s 5c 2d");
    let sf = five("As Ks Qs Js Ts");

    let mut g = c.benchmark_group("evaluate_five");
    g.bench_with_input(BenchmarkId::new("high_card", "A,K,7,5,2"), &hi, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("straight_flush", "royal"), &sf, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.finish();
}

fn bench_evaluate_seven(c: &mut Criterion) {
    let seven = parse_cards("As Ah Ks Qs Js Ts 9s").expect("valid cards");
    c.bench_function("evaluate_seven", |b| b.iter(|| evaluate(black_box(&seven))));

    let mut cache = EvalCache::new();
    c.bench_function("evaluate_seven_cached", |b| {
        b.iter(|| cache.evaluate(black_box(&seven)))
    });
}

fn bench_random_hand(c: &mut Criterion) {
    c.bench_function("six_max_random_hand", |b| {
        let mut table = Table::new(TableConfig::default()).expect("default config");
        let mut agents = AgentTable::for_seats(6);
        for seat in 0..6 {
            agents.set_agent(seat, Some(Box::new(RandomAgent::seeded(seat as u64))));
        }
        b.iter(|| {
            if table.seats().iter().flatten().filter(|s| s.stack() > 0).count() < 2 {
                table = Table::new(TableConfig::default()).expect("default config");
            }
            agents.play_hand(&mut table)
        })
    });
}

criterion_group!(benches, bench_evaluate_five, bench_evaluate_seven, bench_random_hand);
criterion_main!(benches);
