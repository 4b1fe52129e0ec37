//! # Minimax Connect Four
//!
//! Connect Four against a computer opponent that picks its moves with a
//! depth-limited minimax search and alpha-beta pruning. Ships a terminal UI
//! built with Ratatui and a headless analysis tool.
//!
//! ## Modules
//!
//! - [`game`] — Board, sides, win detection, turn controller
//! - [`ai`] — Positional heuristic and minimax search
//! - [`engine`] — Entry points for presentation layers
//! - [`ui`] — Terminal UI
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod ui;

#[cfg(test)]
mod testing;
