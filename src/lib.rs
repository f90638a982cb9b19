//! # Autosweeper
//!
//! A heuristic minesweeper auto-player. The solver propagates each revealed
//! cell's constraint to its hidden neighbors, producing a per-cell mine
//! probability grid, and picks one action per turn: mark a certain mine,
//! reveal a certain safe cell, or guess the least likely cell when nothing is
//! certain.
//!
//! ## Modules
//!
//! - [`game`] — Board state, reveal/mark mechanics, and the [`game::MineField`]
//!   capability trait the solver works through
//! - [`solver`] — Probability estimation and move selection
//! - [`simulation`] — Batch self-play runner with aggregate statistics
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod simulation;
pub mod solver;
