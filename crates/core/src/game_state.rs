//! Game state module - the engine object and its run-state machine
//!
//! This module ties together all core components: grid, pieces, RNG, and scoring.
//! It handles gravity timing, piece movement, rotation, locking, line clears and
//! the `NotStarted → Running ⇄ Paused → GameOver` lifecycle.
//!
//! Nothing here can fail. Operations that the current state disallows (moving
//! into a wall, rotating into a blocked spot, any input while paused) return
//! `false` and leave the state untouched.

use log::{debug, info};

use crate::clock::FrameClock;
use crate::pieces::{collides, try_rotate, Piece};
use crate::rng::PieceRng;
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LockEvent, RotateDir, RunState};
use crate::Grid;

/// The falling piece, its position, and the queued preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Player {
    /// Column of the piece matrix origin
    pub x: i32,
    /// Row of the piece matrix origin
    pub y: i32,
    /// Active piece (None until the first spawn)
    pub piece: Option<Piece>,
    /// Next piece (filled lazily on the first spawn)
    pub next: Option<Piece>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    player: Player,
    score: ScoreState,
    run_state: RunState,
    /// Milliseconds accumulated towards the next gravity step
    drop_counter_ms: u32,
    clock: FrameClock,
    rng: PieceRng,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            grid: Grid::new(),
            player: Player::default(),
            score: ScoreState::new(),
            run_state: RunState::NotStarted,
            drop_counter_ms: 0,
            clock: FrameClock::new(),
            rng: PieceRng::new(seed),
            last_event: None,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn active(&self) -> Option<Piece> {
        self.player.piece
    }

    pub fn next(&self) -> Option<Piece> {
        self.player.next
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn lines(&self) -> u32 {
        self.score.lines()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.score.drop_interval_ms()
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece, x: i32, y: i32) {
        self.player.piece = Some(piece);
        self.player.x = x;
        self.player.y = y;
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid.copy_from(&self.grid);
        out.active = self.player.piece.map(|piece| ActiveSnapshot {
            piece,
            x: self.player.x,
            y: self.player.y,
        });
        out.next = self.player.next;
        out.score = self.score.score();
        out.level = self.score.level();
        out.lines = self.score.lines();
        out.drop_interval_ms = self.score.drop_interval_ms();
        out.run_state = self.run_state;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a fresh run: clear the grid, reset scoring and timers, spawn a piece.
    ///
    /// Valid from any state; this is also the restart action.
    pub fn start(&mut self) {
        self.grid.clear();
        self.score.reset();
        self.drop_counter_ms = 0;
        self.clock.rebase();
        self.last_event = None;
        self.run_state = RunState::Running;
        info!("run started (seed {})", self.rng.seed());
        self.reset();
    }

    /// Flip between Running and Paused.
    ///
    /// Before the first start or after game over this starts a new run instead.
    pub fn toggle_pause(&mut self) {
        match self.run_state {
            RunState::NotStarted | RunState::GameOver => self.start(),
            RunState::Running => {
                self.run_state = RunState::Paused;
                info!("paused at score {}", self.score.score());
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                // Paused wall-clock time must not count as drop progress.
                self.clock.rebase();
                info!("resumed");
            }
        }
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Returns true if the piece was dropped (and possibly locked) this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.score.drop_interval_ms() {
            self.drop();
            return true;
        }
        false
    }

    /// Frame callback entry point taking an absolute timestamp.
    ///
    /// The first call after a start or resume only records the timestamp.
    pub fn advance_to(&mut self, timestamp_ms: u64) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        match self.clock.delta(timestamp_ms) {
            Some(elapsed) => self.tick(elapsed),
            None => false,
        }
    }

    /// Shift the active piece horizontally; rejected moves leave it in place.
    pub fn move_horizontal(&mut self, dx: i32) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        let Some(piece) = self.player.piece else {
            return false;
        };
        let x = self.player.x + dx;
        if collides(&self.grid, &piece.shape, x, self.player.y) {
            return false;
        }
        self.player.x = x;
        true
    }

    /// Soft drop: move down one row, locking the piece if it cannot move.
    ///
    /// Returns false only when the run state disallows input.
    pub fn drop(&mut self) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        let Some(piece) = self.player.piece else {
            return false;
        };
        if collides(&self.grid, &piece.shape, self.player.x, self.player.y + 1) {
            self.lock();
        } else {
            self.player.y += 1;
        }
        self.drop_counter_ms = 0;
        true
    }

    /// Hard drop the active piece to the bottom and lock it
    pub fn hard_drop(&mut self) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        let Some(piece) = self.player.piece else {
            return false;
        };

        while !collides(&self.grid, &piece.shape, self.player.x, self.player.y + 1) {
            self.player.y += 1;
        }

        self.lock();
        self.drop_counter_ms = 0;
        true
    }

    /// Rotate the active piece, kicking sideways out of walls and stacks.
    ///
    /// If no kick position fits, the piece keeps its orientation and position.
    pub fn rotate(&mut self, dir: RotateDir) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        let Some(piece) = self.player.piece.as_mut() else {
            return false;
        };
        match try_rotate(&self.grid, &piece.shape, self.player.x, self.player.y, dir) {
            Some((shape, x)) => {
                piece.shape = shape;
                self.player.x = x;
                true
            }
            None => false,
        }
    }

    /// Spawn the next piece.
    ///
    /// Promotes the queued piece (drawing one first if the queue is empty),
    /// queues a new one, and centers the spawn at the top. A spawn that
    /// collides immediately ends the run.
    pub fn reset(&mut self) -> bool {
        let piece = match self.player.next.take() {
            Some(next) => next,
            None => self.rng.next_piece(),
        };
        self.player.next = Some(self.rng.next_piece());

        let half_board = (self.grid.width() / 2) as i32;
        let half_piece = (piece.shape.side() / 2) as i32;
        self.player.x = half_board - half_piece;
        self.player.y = 0;
        self.player.piece = Some(piece);

        if collides(&self.grid, &piece.shape, self.player.x, self.player.y) {
            self.run_state = RunState::GameOver;
            info!(
                "game over: score {} level {} lines {}",
                self.score.score(),
                self.score.level(),
                self.score.lines()
            );
            return false;
        }
        true
    }

    /// Merge the active piece into the grid, spawn the next one, then sweep and score.
    fn lock(&mut self) {
        let Some(piece) = self.player.piece else {
            return;
        };
        self.grid.merge(&piece.shape, self.player.x, self.player.y);

        let spawned = self.reset();

        let lines_cleared = self.grid.sweep();
        let score_gained = self.score.apply_lines(lines_cleared);
        if lines_cleared > 0 {
            debug!(
                "cleared {} line(s) for {} points, level {}",
                lines_cleared,
                score_gained,
                self.score.level()
            );
        }

        self.last_event = Some(LockEvent {
            lines_cleared,
            score_gained,
            game_over: !spawned,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::SoftDrop => self.drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(RotateDir::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDir::CounterClockwise),
            GameAction::Pause => {
                self.toggle_pause();
                true
            }
            GameAction::Restart => {
                self.start();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::instantiate;
    use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

    fn vertical_i(color: u8) -> Piece {
        Piece::new(PieceKind::I, color)
    }

    /// Fill row `y` except the listed columns.
    fn fill_row_except(state: &mut GameState, y: i32, holes: &[i32]) {
        for x in 0..BOARD_WIDTH as i32 {
            if !holes.contains(&x) {
                state.grid_mut().set(x, y, 1);
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.run_state, RunState::NotStarted);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert!(state.player.piece.is_none());
        assert!(state.player.next.is_none());
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        state.start();

        assert_eq!(state.run_state, RunState::Running);
        let piece = state.active().unwrap();
        assert!(state.next().is_some());
        assert_eq!(state.player.y, 0);
        assert_eq!(
            state.player.x,
            (BOARD_WIDTH / 2) as i32 - (piece.shape.side() / 2) as i32
        );
    }

    #[test]
    fn test_spawn_promotes_next() {
        let mut state = GameState::new(42);
        state.start();
        let queued = state.next().unwrap();

        assert!(state.reset());
        assert_eq!(state.active(), Some(queued));
        assert!(state.next().is_some());
    }

    #[test]
    fn test_input_ignored_before_start() {
        let mut state = GameState::new(1);

        assert!(!state.move_horizontal(-1));
        assert!(!state.drop());
        assert!(!state.hard_drop());
        assert!(!state.rotate(RotateDir::Clockwise));
        assert!(!state.tick(5_000));
        assert_eq!(state.run_state, RunState::NotStarted);
    }

    #[test]
    fn test_move_stops_at_wall() {
        let mut state = GameState::new(1);
        state.start();
        state.set_active(Piece::new(PieceKind::O, 2), 4, 5);

        for _ in 0..20 {
            state.move_horizontal(-1);
        }
        assert_eq!(state.player.x, 0);
        assert!(!state.move_horizontal(-1));

        for _ in 0..20 {
            state.move_horizontal(1);
        }
        assert_eq!(state.player.x, BOARD_WIDTH as i32 - 2);
        assert!(!state.move_horizontal(1));
    }

    #[test]
    fn test_move_blocked_by_stack() {
        let mut state = GameState::new(1);
        state.start();
        state.set_active(Piece::new(PieceKind::O, 2), 4, 10);
        state.grid_mut().set(3, 11, 5);

        assert!(!state.move_horizontal(-1));
        assert_eq!(state.player.x, 4);
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut state = GameState::new(1);
        state.start();
        state.set_active(Piece::new(PieceKind::O, 4), 0, BOARD_HEIGHT as i32 - 3);

        assert!(state.drop());
        assert_eq!(state.player.y, BOARD_HEIGHT as i32 - 2);
        assert!(state.take_last_event().is_none());

        // Resting on the floor: the next drop locks.
        assert!(state.drop());
        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert!(!event.game_over);
        assert_eq!(state.grid.cell_at(0, 19), Some(4));
        assert_eq!(state.grid.cell_at(1, 18), Some(4));
        assert_eq!(state.player.y, 0);
        assert_eq!(state.drop_counter_ms, 0);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let mut state = GameState::new(1);
        state.start();
        state.set_active(vertical_i(3), 4, 0);

        assert!(state.hard_drop());

        for y in 16..20 {
            assert_eq!(state.grid.cell_at(5, y), Some(3));
        }
        assert_eq!(state.grid.cell_at(5, 15), Some(EMPTY));
    }

    #[test]
    fn test_column_fill_never_clears() {
        let mut state = GameState::new(7);
        state.start();

        for _ in 0..20 {
            if state.run_state != RunState::Running {
                break;
            }
            // Column 5 through the I matrix's filled column at offset 1.
            state.set_active(vertical_i(2), 4, 0);
            state.hard_drop();
        }

        assert_eq!(state.lines(), 0);
        assert_eq!(state.score(), 0);
        for y in 0..BOARD_HEIGHT as i32 {
            assert_ne!(state.grid.cell_at(5, y), Some(EMPTY), "row {}", y);
        }
    }

    #[test]
    fn test_single_line_clear() {
        let mut state = GameState::new(1);
        state.start();
        fill_row_except(&mut state, 19, &[0]);
        state.grid_mut().set(5, 18, 6);
        state.set_active(vertical_i(3), -1, 0);

        state.hard_drop();

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.score_gained, 100);
        assert_eq!(state.score(), 100);
        assert_eq!(state.lines(), 1);
        // The marker above the cleared row moved down one.
        assert_eq!(state.grid.cell_at(5, 19), Some(6));
        assert_eq!(state.grid.cell_at(5, 18), Some(EMPTY));
        // Remaining three cells of the I sit at rows 17..=19.
        assert_eq!(state.grid.cell_at(0, 19), Some(3));
        assert_eq!(state.grid.cell_at(0, 16), Some(EMPTY));
        assert!(state.grid.row(0).iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_four_line_clear() {
        let mut state = GameState::new(1);
        state.start();
        for y in 16..20 {
            fill_row_except(&mut state, y, &[0]);
        }
        state.set_active(vertical_i(5), -1, 0);

        state.hard_drop();

        assert_eq!(state.lines(), 4);
        assert_eq!(state.score(), 800);
        assert!(state.grid.cells().iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_line_clear_scores_at_current_level() {
        let mut state = GameState::new(1);
        state.start();
        state.score.apply_lines(10);
        assert_eq!(state.level(), 2);
        let before = state.score();

        fill_row_except(&mut state, 19, &[0]);
        state.set_active(vertical_i(3), -1, 0);
        state.hard_drop();

        assert_eq!(state.score() - before, 200);
    }

    #[test]
    fn test_spawn_collision_is_game_over() {
        let mut state = GameState::new(1);
        state.start();
        for y in 0..4 {
            for x in 3..9 {
                state.grid_mut().set(x, y, 7);
            }
        }

        assert!(!state.reset());
        assert_eq!(state.run_state, RunState::GameOver);

        let y = state.player.y;
        assert!(!state.tick(10_000));
        assert!(!state.drop());
        assert!(!state.move_horizontal(1));
        assert!(!state.rotate(RotateDir::Clockwise));
        assert_eq!(state.player.y, y);

        state.start();
        assert_eq!(state.run_state, RunState::Running);
        assert!(state.grid.cells().iter().all(|&c| c == EMPTY));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_lock_into_blocked_spawn_reports_game_over() {
        let mut state = GameState::new(1);
        state.start();
        // Every catalog shape has a cell in row 1 of its spawn position.
        for x in 3..9 {
            state.grid_mut().set(x, 1, 1);
            state.grid_mut().set(x, 2, 1);
        }
        state.set_active(Piece::new(PieceKind::O, 2), 0, 10);

        state.hard_drop();

        let event = state.take_last_event().unwrap();
        assert!(event.game_over);
        assert_eq!(state.run_state, RunState::GameOver);
    }

    #[test]
    fn test_tick_gravity_threshold() {
        let mut state = GameState::new(1);
        state.start();
        state.set_active(Piece::new(PieceKind::O, 1), 5, 0);

        assert!(!state.tick(600));
        assert!(!state.tick(400));
        assert_eq!(state.player.y, 0);

        // Strictly greater than the interval.
        assert!(state.tick(1));
        assert_eq!(state.player.y, 1);
        assert_eq!(state.drop_counter_ms, 0);
    }

    #[test]
    fn test_manual_drop_resets_counter() {
        let mut state = GameState::new(1);
        state.start();
        state.tick(900);
        assert_eq!(state.drop_counter_ms, 900);

        state.drop();
        assert_eq!(state.drop_counter_ms, 0);
    }

    #[test]
    fn test_pause_toggles_and_blocks_input() {
        let mut state = GameState::new(1);
        state.start();

        state.toggle_pause();
        assert_eq!(state.run_state, RunState::Paused);
        assert!(!state.tick(5_000));
        assert!(!state.move_horizontal(1));
        assert!(!state.hard_drop());

        state.toggle_pause();
        assert_eq!(state.run_state, RunState::Running);
        assert!(state.move_horizontal(1) || state.move_horizontal(-1));
    }

    #[test]
    fn test_toggle_pause_restarts_after_game_over() {
        let mut state = GameState::new(1);
        state.start();
        state.grid_mut().set(0, 19, 3);
        state.run_state = RunState::GameOver;

        state.toggle_pause();

        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.grid.cell_at(0, 19), Some(EMPTY));
    }

    #[test]
    fn test_toggle_pause_starts_fresh_game() {
        let mut state = GameState::new(1);
        state.toggle_pause();
        assert_eq!(state.run_state, RunState::Running);
        assert!(state.active().is_some());
    }

    #[test]
    fn test_resume_rebases_clock() {
        let mut state = GameState::new(1);
        state.start();
        state.set_active(Piece::new(PieceKind::O, 1), 5, 0);

        assert!(!state.advance_to(0));
        assert!(!state.advance_to(500));
        assert_eq!(state.drop_counter_ms, 500);

        state.toggle_pause();
        assert!(!state.advance_to(50_000));
        state.toggle_pause();

        // The first frame after resuming only re-bases.
        assert!(!state.advance_to(100_000));
        assert_eq!(state.drop_counter_ms, 500);
        assert!(!state.advance_to(100_400));
        assert_eq!(state.drop_counter_ms, 900);
        assert!(state.advance_to(100_501));
        assert_eq!(state.player.y, 1);
    }

    #[test]
    fn test_rotate_kicks_off_left_wall() {
        let mut state = GameState::new(1);
        state.start();
        let mut t = Piece::new(PieceKind::T, 4);
        t.shape.rotate(RotateDir::Clockwise);
        // Column 0 of the matrix is empty, so x = -1 is legal.
        state.set_active(t, -1, 5);

        assert!(state.rotate(RotateDir::Clockwise));
        assert_eq!(state.player.x, 0);

        let mut expected = instantiate(PieceKind::T).colored(4);
        expected.rotate(RotateDir::Clockwise);
        expected.rotate(RotateDir::Clockwise);
        assert_eq!(state.active().unwrap().shape, expected);
    }

    #[test]
    fn test_rotate_rejected_in_narrow_well() {
        let mut state = GameState::new(1);
        state.start();
        for y in 10..20 {
            fill_row_except(&mut state, y, &[5]);
        }
        let piece = vertical_i(2);
        state.set_active(piece, 4, 14);

        assert!(!state.rotate(RotateDir::Clockwise));
        assert!(!state.rotate(RotateDir::CounterClockwise));
        assert_eq!(state.player.x, 4);
        assert_eq!(state.active().unwrap().shape, piece.shape);
    }

    #[test]
    fn test_rotate_four_times_restores_piece() {
        let mut state = GameState::new(1);
        state.start();
        state.set_active(Piece::new(PieceKind::L, 6), 4, 8);
        let before = state.active().unwrap();

        for _ in 0..4 {
            assert!(state.rotate(RotateDir::CounterClockwise));
        }
        assert_eq!(state.active().unwrap(), before);
        assert_eq!(state.player.x, 4);
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = GameState::new(1);
        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.run_state, RunState::Running);

        state.set_active(Piece::new(PieceKind::O, 1), 5, 5);
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.player.x, 4);
        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.player.x, 5);
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.player.y, 6);
        assert!(state.apply_action(GameAction::RotateCw));
        assert!(state.apply_action(GameAction::RotateCcw));

        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.run_state, RunState::Paused);
        assert!(!state.apply_action(GameAction::MoveLeft));

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.run_state, RunState::Running);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(9);
        state.start();
        state.grid_mut().set(2, 19, 5);
        state.set_active(Piece::new(PieceKind::Z, 3), 4, 6);

        let snap = state.snapshot();
        assert_eq!(snap.grid.cell_at(2, 19), Some(5));
        let active = snap.active.unwrap();
        assert_eq!((active.x, active.y), (4, 6));
        assert_eq!(active.piece.color, 3);
        assert_eq!(snap.next, state.next());
        assert_eq!(snap.run_state, RunState::Running);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.drop_interval_ms, 1000);
    }

    #[test]
    fn test_default_game_state() {
        let state = GameState::default();
        assert_eq!(state.seed(), 1);
        assert_eq!(state.run_state(), RunState::NotStarted);
    }
}
