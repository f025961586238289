use criterion::{criterion_group, criterion_main, Criterion};
use morphite::{Engine, EngineConfig, Position};
use shakmaty::Color;

fn engine() -> Engine {
    Engine::with_config(EngineConfig {
        hash_mb: 16,
        verbose: false,
    })
}

fn bench_search(c: &mut Criterion) {
    c.bench_function("search_depth_2_startpos", |b| {
        b.iter(|| {
            let mut engine = engine();
            let mut pos = Position::new();
            engine.search(&mut pos, 2, Color::White)
        })
    });

    let kiwipete = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    c.bench_function("search_depth_2_kiwipete", |b| {
        b.iter(|| {
            let mut engine = engine();
            let mut pos = Position::from_fen(kiwipete).unwrap();
            engine.search(&mut pos, 2, Color::White)
        })
    });

    c.bench_function("search_depth_3_startpos", |b| {
        b.iter(|| {
            let mut engine = engine();
            let mut pos = Position::new();
            engine.search(&mut pos, 3, Color::White)
        })
    });
}

fn bench_move_ordering(c: &mut Criterion) {
    use morphite::movegen::order_moves;

    let mut pos = Position::new();
    c.bench_function("order_moves_startpos", |b| {
        b.iter(|| order_moves(&mut pos, true).len())
    });
}

criterion_group!(benches, bench_search, bench_move_ordering);
criterion_main!(benches);
