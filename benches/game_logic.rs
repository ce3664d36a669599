use criterion::{black_box, criterion_group, criterion_main, Criterion};
use neonlink::core::{Engine, Grid};
use neonlink::session::{MemoryStore, Session, SessionSnapshot};
use neonlink::term::{FrameBuffer, GameView, Viewport};
use neonlink::types::{GameAction, Gesture, PieceKind, TICK_MS};

fn bench_session_tick(c: &mut Criterion) {
    let mut session = Session::from_seed(12345, MemoryStore::default());
    session.apply_action(GameAction::Start);

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(TICK_MS), Gesture::None);
            if session.engine().game_over() {
                session.apply_action(GameAction::Restart);
            }
            session.drain_events().for_each(drop);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in 16..20 {
                grid.fill_row_except(y, &[], PieceKind::I);
            }
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut engine = Engine::new(12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if engine.game_over() {
                engine.reset();
            }
            black_box(engine.hard_drop());
        })
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut engine = Engine::new(12345);

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            engine.move_by(black_box(1), 0);
            engine.move_by(black_box(-1), 0);
            black_box(engine.rotate());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut session = Session::from_seed(12345, MemoryStore::default());
    session.apply_action(GameAction::Start);
    let view = GameView::default();
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            session.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
            black_box(fb.cells().len());
        })
    });
}

criterion_group!(
    benches,
    bench_session_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move_and_rotate,
    bench_render
);
criterion_main!(benches);
