//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management and simulation logic.
//! It has no dependencies on the terminal or any other I/O, so it runs the same
//! under a frontend, a test, or a benchmark. Given a seed, a game replays
//! identically.
//!
//! # Module Structure
//!
//! - [`grid`]: 12x20 playfield with collision queries, merge and line sweep
//! - [`pieces`]: piece catalog, matrix rotation and wall-kick search
//! - [`rng`]: uniform random piece kinds and colors
//! - [`scoring`]: line clear points, levels and gravity speed
//! - [`clock`]: timestamp to elapsed-time conversion for the frame loop
//! - [`game_state`]: the engine object and its run-state machine
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly at random with an independent random color
//! - Rotation tries the rotated matrix in place, then shifted sideways by
//!   1, -1, 2, -2 and so on up to the matrix side
//! - A piece that cannot move down locks immediately (no lock delay)
//! - 1/2/3/4 lines score 100/300/500/800 times the level
//! - Level rises every 10 lines; gravity speeds up 100ms per level down to 100ms
//!
//! # Example
//!
//! ```
//! use neon_tetris_core::GameState;
//! use neon_tetris_types::{GameAction, RunState};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.run_state(), RunState::Running);
//! assert!(game.grid().cells().iter().any(|&c| c != 0));
//! ```
//!
//! # Timing
//!
//! Drive the game with either [`GameState::tick`](game_state::GameState::tick)
//! (elapsed milliseconds) or
//! [`GameState::advance_to`](game_state::GameState::advance_to) (absolute
//! frame timestamps).

pub mod clock;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use neon_tetris_types as types;

// Re-export commonly used types for convenience
pub use clock::FrameClock;
pub use game_state::{GameState, Player};
pub use grid::Grid;
pub use pieces::{collides, instantiate, kick_offsets, try_rotate, Piece, Shape};
pub use rng::PieceRng;
pub use scoring::{drop_interval_for_level, level_for_lines, line_clear_score, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
