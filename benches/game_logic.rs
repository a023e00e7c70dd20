use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, FigureFactory, NullView};
use blockfall::types::{Direction, FigureKind};

fn new_board() -> Board {
    Board::new(Arc::new(NullView), FigureFactory::figure(FigureKind::T))
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("wipe_4_lines", |b| {
        b.iter(|| {
            let mut board = new_board();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(FigureKind::I));
                }
            }
            let lines = board.filled_lines();
            board.wipe_lines(black_box(&lines));
        })
    });
}

fn bench_filled_lines(c: &mut Criterion) {
    let mut board = new_board();
    for y in 10..20 {
        for x in 0..9 {
            board.set(x, y, Some(FigureKind::O));
        }
    }

    c.bench_function("filled_lines_none_full", |b| {
        b.iter(|| black_box(board.filled_lines()))
    });
}

fn bench_figure_spawn(c: &mut Criterion) {
    let mut factory = FigureFactory::new(12345);

    c.bench_function("random_figure", |b| {
        b.iter(|| black_box(factory.random_figure()))
    });
}

fn bench_move_figure(c: &mut Criterion) {
    let mut board = new_board();
    let mut direction = Direction::Left;

    c.bench_function("move_figure", |b| {
        b.iter(|| {
            if !board.move_figure(black_box(direction.movement())) {
                direction = match direction {
                    Direction::Left => Direction::Right,
                    _ => Direction::Left,
                };
            }
        })
    });
}

fn bench_rotate_figure(c: &mut Criterion) {
    let mut board = new_board();

    c.bench_function("rotate_figure", |b| {
        b.iter(|| {
            board.rotate_figure();
        })
    });
}

criterion_group!(
    benches,
    bench_line_clear,
    bench_filled_lines,
    bench_figure_spawn,
    bench_move_figure,
    bench_rotate_figure
);
criterion_main!(benches);
