//! Criterion benchmarks for costume loading and per-frame scheduling.
//!
//! - `load_guybrush`: parse the multi-chore fixture from bytes
//! - `update_draw_600`: dress, start every chore and run ten seconds of 60 Hz frames

use costume_core::{Costume, CostumeId, DrawLog, FsNameLoader};
use costume_test_fixtures::costumes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn load(bytes: &[u8]) -> Costume {
    Costume::from_bytes(
        CostumeId(0),
        "guybrush.cos",
        bytes,
        None,
        Box::new(FsNameLoader::default()),
    )
    .expect("fixture loads")
}

fn bench_load(c: &mut Criterion) {
    let bytes = costumes::bytes("guybrush").expect("fixture bytes");
    c.bench_function("load_guybrush", |b| b.iter(|| load(black_box(&bytes))));
}

fn bench_update_draw(c: &mut Criterion) {
    let bytes = costumes::bytes("guybrush").expect("fixture bytes");
    c.bench_function("update_draw_600", |b| {
        b.iter_batched(
            || {
                let mut costume = load(&bytes);
                let ids: Vec<_> = costume.chores().iter().map(|ch| ch.id).collect();
                for id in ids {
                    costume.play_chore_looping(id).expect("chore in range");
                }
                costume
            },
            |mut costume| {
                let mut log = DrawLog::default();
                for _ in 0..600 {
                    black_box(costume.update(16));
                    log.clear();
                    costume.draw(&mut log);
                }
                costume
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_load, bench_update_draw);
criterion_main!(benches);
