//! Benchmarks for attack lookups and candidate generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_core::board::{AttackTables, Bitboard, Board, Slider, Square};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_table_build(c: &mut Criterion) {
    c.bench_function("tables/build_shipped", |b| {
        b.iter(|| black_box(AttackTables::new().unwrap()))
    });
}

fn bench_slider_lookup(c: &mut Criterion) {
    let tables = AttackTables::shared().unwrap();
    let occupancy = Board::try_from_fen(KIWIPETE)
        .unwrap()
        .occupancy(chess_core::board::Side::Both);
    let mut group = c.benchmark_group("sliders");

    for slider in Slider::ALL {
        group.bench_with_input(
            BenchmarkId::new("magic", format!("{slider:?}")),
            &slider,
            |b, &slider| {
                b.iter(|| {
                    let mut acc = Bitboard::EMPTY;
                    for sq in Square::all() {
                        acc = acc | tables.slider_attacks(slider, sq, black_box(occupancy));
                    }
                    acc
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("ray_walk", format!("{slider:?}")),
            &slider,
            |b, &slider| {
                b.iter(|| {
                    let mut acc = Bitboard::EMPTY;
                    for sq in Square::all() {
                        acc = acc | slider.ray_attacks(sq, black_box(occupancy));
                    }
                    acc
                })
            },
        );
    }

    group.finish();
}

fn bench_candidates(c: &mut Criterion) {
    let tables = AttackTables::shared().unwrap();
    let mut group = c.benchmark_group("candidates");

    let startpos = Board::new();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(startpos.side_candidates(tables)))
    });

    let kiwipete = Board::try_from_fen(KIWIPETE).unwrap();
    group.bench_function("kiwipete", |b| {
        b.iter(|| black_box(kiwipete.side_candidates(tables)))
    });

    group.finish();
}

fn bench_apply_move(c: &mut Criterion) {
    let tables = AttackTables::shared().unwrap();
    let kiwipete = Board::try_from_fen(KIWIPETE).unwrap();
    let from: Square = "e1".parse().unwrap();
    let to: Square = "g1".parse().unwrap();
    c.bench_function("apply_move/castle", |b| {
        b.iter(|| {
            let mut board = kiwipete.clone();
            black_box(board.apply_move(tables, from, to))
        })
    });
}

criterion_group!(
    benches,
    bench_table_build,
    bench_slider_lookup,
    bench_candidates,
    bench_apply_move
);
criterion_main!(benches);
