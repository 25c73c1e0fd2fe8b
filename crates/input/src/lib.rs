//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is no
//! repeat handling here: each press or terminal auto-repeat is one action, and
//! the engine applies it immediately.

pub mod map;

pub use neon_tetris_types as types;

pub use map::{handle_key_event, should_quit};
