use criterion::{black_box, criterion_group, criterion_main, Criterion};
use th_core::engine::GameEngine;
use th_core::models::setup::{ClassicOptions, GameSetup, ModeConfig};
use th_core::models::zone::RingZone;
use th_core::target::{Dartboard, RingTarget};
use th_core::JsonSession;

fn bench_ring_resolve(c: &mut Criterion) {
    let target = RingTarget::standard();

    c.bench_function("ring_resolve_sweep", |b| {
        b.iter(|| {
            for ix in 0..32 {
                for iy in 0..32 {
                    let x = ix as f32 / 31.0;
                    let y = iy as f32 / 31.0;
                    black_box(target.resolve_unit(black_box(x), black_box(y), true));
                }
            }
        })
    });
}

fn bench_dartboard_resolve(c: &mut Criterion) {
    let board = Dartboard::standard();

    c.bench_function("dartboard_resolve_sweep", |b| {
        b.iter(|| {
            for ix in 0..32 {
                for iy in 0..32 {
                    let x = ix as f32 / 31.0;
                    let y = iy as f32 / 31.0;
                    black_box(board.resolve_unit(black_box(x), black_box(y)));
                }
            }
        })
    });
}

fn bench_classic_game(c: &mut Criterion) {
    let setup = GameSetup::new(
        ModeConfig::Classic(ClassicOptions { series: 3, throws_per_series: 5, killshot_throw: 5 }),
        vec!["Ann".into(), "Ben".into(), "Cat".into(), "Dan".into()],
    );
    let zones = [RingZone::Zone1, RingZone::Zone3, RingZone::Bullseye, RingZone::Miss];

    c.bench_function("classic_full_game", |b| {
        b.iter(|| {
            let mut engine = GameEngine::new(setup.clone()).unwrap();
            let mut i = 0;
            while engine.state().status.is_playing() {
                let zone = zones[i % zones.len()];
                engine.register_throw(zone, zone.points());
                i += 1;
            }
            black_box(engine.state().winner)
        })
    });
}

fn bench_json_round_trip(c: &mut Criterion) {
    let mut session = JsonSession::new();
    session.handle(
        r#"{"op":"new_game","setup":{"mode":{"mode":"classic","series":10,"throws_per_series":5,"killshot_throw":0},"player_names":["Ann","Ben"]}}"#,
    );
    let throw = r#"{"op":"register_throw","zone":"bullseye"}"#;
    let undo = r#"{"op":"undo_last_throw"}"#;

    c.bench_function("json_throw_and_undo", |b| {
        b.iter(|| {
            black_box(session.handle(black_box(throw)));
            black_box(session.handle(black_box(undo)));
        })
    });
}

criterion_group!(
    benches,
    bench_ring_resolve,
    bench_dartboard_resolve,
    bench_classic_game,
    bench_json_round_trip
);
criterion_main!(benches);
