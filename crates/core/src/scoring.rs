//! Scoring module - line clear points, levels and gravity speed
//!
//! Points for a clear come from [`LINE_SCORES`] multiplied by the level the
//! clear happened at. Every 10 cumulative lines raises the level by one, and
//! each level shaves 100ms off the drop interval down to a 100ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Calculate line clear score
/// lines: number of lines cleared at once (anything above 4 scores as 4)
/// level: current level (1-based)
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
/// 1000ms at level 1, 100ms faster per level, never below 100ms
pub fn drop_interval_for_level(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Score, level, line count and gravity of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreState {
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Back to a fresh run
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Account for `rows` cleared by a single lock.
    ///
    /// Points use the level before the clear; level and drop interval are then
    /// recomputed from the new cumulative line count. Returns the points gained.
    pub fn apply_lines(&mut self, rows: u32) -> u32 {
        if rows == 0 {
            return 0;
        }
        let gained = line_clear_score(rows, self.level);
        self.score = self.score.saturating_add(gained);
        self.lines = self.lines.saturating_add(rows);
        self.level = level_for_lines(self.lines);
        self.drop_interval_ms = drop_interval_for_level(self.level);
        gained
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}
