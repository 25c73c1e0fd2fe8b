//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a plain framebuffer of styled cells which is then flushed to the
//! terminal, so drawing code never touches I/O.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Control the aspect ratio precisely (2 columns per board cell)
//! - Only re-emit what changed between frames

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use neon_tetris_core as core;
pub use neon_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{cell_color, AnchorY, GameView, Viewport, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
