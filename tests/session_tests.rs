//! Session tests through the facade: pacing, danger, persistence and restart

use std::path::PathBuf;

use neonlink::core::{Engine, Grid, ScriptedKinds};
use neonlink::session::{BestScoreStore, JsonFileStore, MemoryStore, Session, SessionEvent};
use neonlink::types::{GameAction, Gesture, PieceKind, BEST_SCORE_KEY};

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("neonlink-it-{}-{}.json", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn session_with<B: BestScoreStore>(grid: Grid, kinds: &[PieceKind], store: B) -> Session<B, ScriptedKinds> {
    let mut session = Session::new(Engine::from_parts(grid, ScriptedKinds::new(kinds)), store);
    session.apply_action(GameAction::Start);
    session
}

/// Row 19 open at columns 3 and 4, columns 0 and 1 stacked to the top
fn stacked_grid() -> Grid {
    let mut grid = Grid::new();
    grid.fill_row_except(19, &[3, 4], PieceKind::Z);
    for y in 0..19 {
        grid.set(0, y, Some(PieceKind::S));
        grid.set(1, y, Some(PieceKind::S));
    }
    grid
}

#[test]
fn test_snapshot_before_start() {
    let session = Session::from_seed(7, MemoryStore::new(250));
    let snap = session.snapshot();
    assert!(!snap.started);
    assert!(!snap.playable());
    assert_eq!(snap.best_score, 250);
    assert_eq!(snap.fall_interval_ms, 500);
    assert_eq!(snap.gesture, Gesture::None);
}

#[test]
fn test_gravity_speeds_up_with_play_time() {
    let mut session = session_with(Grid::new(), &[PieceKind::I], MemoryStore::default());
    session.tick(30_016, Gesture::None);
    assert_eq!(session.engine().current().y, 1);
    assert_eq!(session.snapshot().fall_interval_ms, 450);
}

#[test]
fn test_danger_slows_gravity() {
    let mut grid = Grid::new();
    for y in 2..20 {
        grid.set(9, y, Some(PieceKind::L));
    }
    let mut session = session_with(grid, &[PieceKind::O], MemoryStore::default());
    assert!(session.in_danger());

    let snap = session.snapshot();
    assert!(snap.danger);
    assert_eq!(snap.fall_interval_ms, 800);

    for _ in 0..50 {
        session.tick(16, Gesture::None);
    }
    // 800 ms have passed, which is not strictly past the interval
    assert_eq!(session.engine().current().y, 0);
    session.tick(16, Gesture::None);
    assert_eq!(session.engine().current().y, 1);
}

#[test]
fn test_full_game_persists_best_and_restarts_on_thumb_up() {
    let path = temp_path("full-game");
    let mut session = session_with(stacked_grid(), &[PieceKind::O], JsonFileStore::open(&path));

    assert_eq!(session.apply_action(GameAction::HardDrop), 1);
    for _ in 0..3 {
        session.apply_action(GameAction::MoveLeft);
    }
    session.apply_action(GameAction::HardDrop);
    assert!(session.snapshot().game.game_over);

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[BEST_SCORE_KEY], 100);

    // Gameplay keys are ignored after game over
    session.apply_action(GameAction::MoveRight);
    session.tick(16, Gesture::ThumbUp);

    let events: Vec<_> = session.drain_events().collect();
    assert!(events.contains(&SessionEvent::GameOver {
        score: 100,
        best: 100,
        new_best: true
    }));
    assert_eq!(events.last(), Some(&SessionEvent::Restarted));

    let snap = session.snapshot();
    assert!(!snap.game.game_over);
    assert_eq!(snap.game.score, 0);
    assert_eq!(snap.best_score, 100);
    assert_eq!(session.engine().grid().occupied_count(), 0);

    assert_eq!(JsonFileStore::open(&path).read(), 100);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_restart_key_only_after_game_over() {
    let mut session = session_with(Grid::new(), &[PieceKind::T], MemoryStore::default());
    session.apply_action(GameAction::HardDrop);
    session.apply_action(GameAction::Restart);
    assert_eq!(session.engine().grid().occupied_count(), 4);
    assert!(!session.drain_events().any(|e| e == SessionEvent::Restarted));
}

#[test]
fn test_slam_then_release_then_cooldown() {
    let mut session = session_with(Grid::new(), &[PieceKind::O], MemoryStore::default());

    session.tick(16, Gesture::ClosedFist);
    assert_eq!(session.engine().grid().occupied_count(), 4);

    // Released and clenched again inside the cooldown
    session.tick(16, Gesture::None);
    session.tick(16, Gesture::ClosedFist);
    assert_eq!(session.engine().grid().occupied_count(), 4);

    for _ in 0..70 {
        session.tick(16, Gesture::ClosedFist);
    }
    assert_eq!(session.engine().grid().occupied_count(), 8);

    let slams = session
        .drain_events()
        .filter(|e| matches!(e, SessionEvent::Slam { .. }))
        .count();
    assert_eq!(slams, 2);
}
