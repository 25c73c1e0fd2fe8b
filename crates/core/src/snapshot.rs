use crate::grid::Grid;
use crate::pieces::Piece;
use crate::types::RunState;

/// Active piece as seen by a renderer: its colored matrix and board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub piece: Piece,
    pub x: i32,
    pub y: i32,
}

impl ActiveSnapshot {
    /// Board coordinates and colors of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.piece
            .shape
            .colored_minos()
            .map(move |(dx, dy, c)| (self.x + dx, self.y + dy, c))
    }
}

/// Read-only copy of everything the frontend draws.
///
/// Reuse one instance with [`crate::GameState::snapshot_into`] to avoid
/// reallocating the grid every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<Piece>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub run_state: RunState,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid.clear();
        self.active = None;
        self.next = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = crate::types::BASE_DROP_MS;
        self.run_state = RunState::NotStarted;
    }

    pub fn playable(&self) -> bool {
        self.run_state.is_running()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: Grid::new(),
            active: None,
            next: None,
            score: 0,
            level: 0,
            lines: 0,
            drop_interval_ms: 0,
            run_state: RunState::NotStarted,
        };
        s.clear();
        s
    }
}
