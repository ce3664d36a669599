//! Session - one player's run of games
//!
//! Owns the engine together with everything the engine deliberately does not
//! know about: start/pause state, gravity pacing, gesture intents, the vibe
//! meter and the best score. The frame loop feeds it key actions and frame
//! ticks, drains [`SessionEvent`]s for logging and reads snapshots for
//! rendering.

use neonlink_core::{Engine, GameSnapshot, KindSource, SimpleRng};

use crate::best_score::BestScoreStore;
use crate::clock::GravityClock;
use crate::gesture::GestureControl;
use crate::types::{GameAction, Gesture, DANGER_ROW};
use crate::vibe::VibeMeter;

/// Something observers may want to react to (sound, logging)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Paused(bool),
    SoftDrop,
    HardDrop { lines: u32 },
    /// Hard drop triggered by a closed fist
    Slam { lines: u32 },
    LinesCleared { lines: u32, score: u32 },
    GameOver { score: u32, best: u32, new_best: bool },
    BestScoreWriteFailed { score: u32, message: String },
    Restarted,
    GestureChanged(Gesture),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub game: GameSnapshot,
    pub best_score: u32,
    pub gesture: Gesture,
    /// Vibe meter as a whole percentage
    pub vibe: u8,
    pub started: bool,
    pub paused: bool,
    pub danger: bool,
    pub fall_interval_ms: u32,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            game: GameSnapshot::default(),
            best_score: 0,
            gesture: Gesture::None,
            vibe: 0,
            started: false,
            paused: false,
            danger: false,
            fall_interval_ms: 0,
        }
    }
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.started && !self.paused && !self.game.game_over
    }
}

pub struct Session<B: BestScoreStore, S: KindSource = SimpleRng> {
    engine: Engine<S>,
    clock: GravityClock,
    gesture: GestureControl,
    vibe: VibeMeter,
    store: B,
    best_score: u32,
    started: bool,
    paused: bool,
    events: Vec<SessionEvent>,
}

impl<B: BestScoreStore> Session<B, SimpleRng> {
    pub fn from_seed(seed: u32, store: B) -> Self {
        Self::new(Engine::new(seed), store)
    }
}

impl<B: BestScoreStore, S: KindSource> Session<B, S> {
    pub fn new(engine: Engine<S>, store: B) -> Self {
        let best_score = store.read();
        Self {
            engine,
            clock: GravityClock::new(),
            gesture: GestureControl::new(),
            vibe: VibeMeter::new(),
            store,
            best_score,
            started: false,
            paused: false,
            events: Vec::with_capacity(16),
        }
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    pub fn clock(&self) -> &GravityClock {
        &self.clock
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture.current()
    }

    pub fn vibe(&self) -> &VibeMeter {
        &self.vibe
    }

    /// The stack reaches the danger rows
    pub fn in_danger(&self) -> bool {
        self.engine
            .grid()
            .highest_occupied_row()
            .is_some_and(|row| row <= DANGER_ROW)
    }

    /// Apply a keyboard action. Returns rows cleared by it.
    pub fn apply_action(&mut self, action: GameAction) -> u32 {
        match action {
            GameAction::Start => {
                if !self.started {
                    self.started = true;
                    self.events.push(SessionEvent::Started);
                }
                0
            }
            GameAction::Pause => {
                if self.started {
                    self.paused = !self.paused;
                    self.events.push(SessionEvent::Paused(self.paused));
                }
                0
            }
            GameAction::Restart => {
                if self.started && self.engine.game_over() {
                    self.restart();
                }
                0
            }
            _ => self.apply_gameplay(action),
        }
    }

    fn apply_gameplay(&mut self, action: GameAction) -> u32 {
        if !self.started || self.paused || self.engine.game_over() {
            return 0;
        }

        let lines = match action {
            GameAction::MoveLeft => self.engine.move_by(-1, 0),
            GameAction::MoveRight => self.engine.move_by(1, 0),
            GameAction::Rotate => {
                self.engine.rotate();
                0
            }
            GameAction::SoftDrop => {
                self.events.push(SessionEvent::SoftDrop);
                self.engine.move_by(0, 1)
            }
            GameAction::HardDrop => {
                let lines = self.engine.hard_drop();
                self.clock.reset_accumulator();
                self.events.push(SessionEvent::HardDrop { lines });
                lines
            }
            _ => 0,
        };

        self.vibe.bump();
        self.after_engine_call(lines);
        lines
    }

    /// Advance one frame with the latest recognizer label
    pub fn tick(&mut self, elapsed_ms: u32, gesture: Gesture) {
        if self.gesture.observe(gesture) {
            self.events.push(SessionEvent::GestureChanged(gesture));
        }

        if !self.started {
            return;
        }

        if self.engine.game_over() {
            if self.gesture.wants_restart() {
                self.restart();
            }
            return;
        }

        if self.paused {
            return;
        }

        self.clock.advance(elapsed_ms);
        self.gesture.advance(elapsed_ms);
        let danger = self.in_danger();

        if self.gesture.try_slam() {
            let lines = self.engine.hard_drop();
            self.clock.reset_accumulator();
            self.events.push(SessionEvent::Slam { lines });
            self.after_engine_call(lines);
        }

        self.vibe.decay();

        if self.engine.game_over() {
            return;
        }

        if self.clock.take_step(danger, self.gesture.slow_motion()) {
            let lines = self.engine.move_by(0, 1);
            self.after_engine_call(lines);
        }
    }

    fn after_engine_call(&mut self, lines: u32) {
        if lines > 0 {
            self.events.push(SessionEvent::LinesCleared {
                lines,
                score: self.engine.score(),
            });
        }

        if self.engine.acknowledge_death() {
            self.handle_death();
        }
    }

    fn handle_death(&mut self) {
        let score = self.engine.score();
        let new_best = score > self.best_score;
        let mut failure = None;

        if new_best {
            self.best_score = score;
            if let Err(e) = self.store.write(score) {
                failure = Some(format!("{:#}", e));
            }
        }

        self.events.push(SessionEvent::GameOver {
            score,
            best: self.best_score,
            new_best,
        });
        if let Some(message) = failure {
            self.events.push(SessionEvent::BestScoreWriteFailed { score, message });
        }
    }

    fn restart(&mut self) {
        self.engine.reset();
        self.clock.reset();
        self.gesture.reset();
        self.vibe.reset();
        self.paused = false;
        self.events.push(SessionEvent::Restarted);
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SessionEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.engine.snapshot_into(&mut out.game);
        let danger = self.in_danger();
        out.best_score = self.best_score;
        out.gesture = self.gesture.current();
        out.vibe = self.vibe.percent();
        out.started = self.started;
        out.paused = self.paused;
        out.danger = danger;
        out.fall_interval_ms = self.clock.interval_ms(danger, self.gesture.slow_motion());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::MemoryStore;
    use crate::types::PieceKind;
    use neonlink_core::{Grid, ScriptedKinds};

    fn session_with(grid: Grid, kinds: &[PieceKind], best: u32) -> Session<MemoryStore, ScriptedKinds> {
        let engine = Engine::from_parts(grid, ScriptedKinds::new(kinds));
        Session::new(engine, MemoryStore::new(best))
    }

    fn started(kinds: &[PieceKind]) -> Session<MemoryStore, ScriptedKinds> {
        let mut session = session_with(Grid::new(), kinds, 0);
        session.apply_action(GameAction::Start);
        session.drain_events().for_each(drop);
        session
    }

    #[test]
    fn test_gameplay_ignored_before_start() {
        let mut session = session_with(Grid::new(), &[PieceKind::O], 0);
        session.apply_action(GameAction::MoveLeft);
        session.tick(1000, Gesture::None);
        assert_eq!(session.engine().current().x, 3);
        assert_eq!(session.engine().current().y, 0);
        assert_eq!(session.vibe().level(), 0.0);
    }

    #[test]
    fn test_pause_toggles_and_blocks_input() {
        let mut session = started(&[PieceKind::O]);
        session.apply_action(GameAction::Pause);
        assert!(session.paused());
        session.apply_action(GameAction::MoveRight);
        assert_eq!(session.engine().current().x, 3);

        session.apply_action(GameAction::Pause);
        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events, vec![SessionEvent::Paused(true), SessionEvent::Paused(false)]);
    }

    #[test]
    fn test_gravity_steps_after_interval() {
        let mut session = started(&[PieceKind::O]);
        for _ in 0..31 {
            session.tick(16, Gesture::None);
        }
        // 31 * 16 = 496, not yet past 500
        assert_eq!(session.engine().current().y, 0);
        session.tick(16, Gesture::None);
        assert_eq!(session.engine().current().y, 1);
    }

    #[test]
    fn test_open_palm_slows_gravity() {
        let mut session = started(&[PieceKind::O]);
        for _ in 0..40 {
            session.tick(16, Gesture::OpenPalm);
        }
        assert_eq!(session.engine().current().y, 0);
        assert_eq!(session.snapshot().fall_interval_ms, 1000);
    }

    #[test]
    fn test_fist_slams_once_per_fist() {
        let mut session = started(&[PieceKind::O, PieceKind::T]);
        session.tick(16, Gesture::ClosedFist);
        assert_eq!(session.engine().grid().occupied_count(), 4);

        for _ in 0..100 {
            session.tick(16, Gesture::ClosedFist);
        }
        assert_eq!(session.engine().grid().occupied_count(), 4);

        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events[0], SessionEvent::GestureChanged(Gesture::ClosedFist));
        assert_eq!(events[1], SessionEvent::Slam { lines: 0 });
    }

    #[test]
    fn test_actions_bump_vibe() {
        let mut session = started(&[PieceKind::O]);
        session.apply_action(GameAction::MoveLeft);
        session.apply_action(GameAction::Rotate);
        assert_eq!(session.vibe().percent(), 10);
    }

    /// First O clears row 19 for 100 points, an O dropped at the left wall then tops out
    fn two_drop_game_over(session: &mut Session<impl BestScoreStore, ScriptedKinds>) {
        session.apply_action(GameAction::Start);
        assert_eq!(session.apply_action(GameAction::HardDrop), 1);
        for _ in 0..3 {
            session.apply_action(GameAction::MoveLeft);
        }
        session.apply_action(GameAction::HardDrop);
        assert!(session.engine().game_over());
    }

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
    fn test_death_writes_new_best_once() {
        let mut session = session_with(stacked_grid(), &[PieceKind::O], 50);
        two_drop_game_over(&mut session);

        let events: Vec<_> = session.drain_events().collect();
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert!(events.contains(&SessionEvent::GameOver {
            score: 100,
            best: 100,
            new_best: true
        }));
        assert_eq!(session.store().read(), 100);
        assert_eq!(session.best_score(), 100);

        session.tick(16, Gesture::None);
        assert!(session.drain_events().next().is_none());
    }

    #[test]
    fn test_death_below_best_keeps_store() {
        let mut session = session_with(stacked_grid(), &[PieceKind::O], 500);
        two_drop_game_over(&mut session);

        assert!(session.drain_events().any(|e| e
            == SessionEvent::GameOver {
                score: 100,
                best: 500,
                new_best: false
            }));
        assert_eq!(session.store().read(), 500);
    }

    struct FailingStore;

    impl BestScoreStore for FailingStore {
        fn read(&self) -> u32 {
            0
        }

        fn write(&mut self, _score: u32) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn test_store_failure_is_reported_and_game_continues() {
        let engine = Engine::from_parts(stacked_grid(), ScriptedKinds::repeat(PieceKind::O));
        let mut session = Session::new(engine, FailingStore);
        two_drop_game_over(&mut session);

        let events: Vec<_> = session.drain_events().collect();
        assert!(events.contains(&SessionEvent::BestScoreWriteFailed {
            score: 100,
            message: "disk full".to_string()
        }));
        assert_eq!(session.best_score(), 100);

        session.apply_action(GameAction::Restart);
        assert!(!session.engine().game_over());
    }

    #[test]
    fn test_thumb_up_restarts_after_game_over() {
        let mut grid = Grid::new();
        grid.set(0, 0, Some(PieceKind::L));
        let mut session = session_with(grid, &[PieceKind::O], 0);
        session.apply_action(GameAction::Start);
        session.apply_action(GameAction::HardDrop);
        assert!(session.engine().game_over());

        session.tick(16, Gesture::ThumbUp);
        assert!(!session.engine().game_over());
        assert_eq!(session.engine().grid().occupied_count(), 0);
        assert!(session.drain_events().any(|e| e == SessionEvent::Restarted));
    }
}
