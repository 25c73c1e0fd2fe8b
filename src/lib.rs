//! Neon Tetris (workspace facade crate).
//!
//! Exposes `neon_tetris::{core, input, term, types}` while the implementation
//! lives in dedicated crates under `crates/`. The runner's configuration lives
//! here in [`config`].

pub mod config;

pub use neon_tetris_core as core;
pub use neon_tetris_input as input;
pub use neon_tetris_term as term;
pub use neon_tetris_types as types;
