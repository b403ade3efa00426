//! Checkers-Rust: a checkers (draughts) rules engine.
//!
//! This crate implements the board model, legal move generation and the
//! click-driven turn state machine of two-player checkers on an 8x8 board,
//! plus the adapters that turn pixel clicks into board squares and game state
//! into drawable frames.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and render colors
//! - [`board`] - Cells, pieces, squares and the 8x8 grid
//! - [`movegen`] - Legal destinations and jump availability
//! - [`game`] - Game state, move execution and the click transition
//! - [`render`] - Pixel-to-square conversion and frame snapshots
//! - [`protocol`] - Line-oriented command loop
//!
//! ## Example
//!
//! ```
//! use checkers_rust::board::{Color, Square};
//! use checkers_rust::game::{click, GameState};
//! use checkers_rust::render::frame;
//!
//! let mut state = GameState::new();
//! click(&mut state, Square::new(5, 2)); // select c3
//! click(&mut state, Square::new(4, 3)); // move to d4
//! assert_eq!(state.turn(), Color::Black);
//! println!("{}", frame(&state));
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod render;
