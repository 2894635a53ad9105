//! Core game and wire logic (no_std compatible)
//!
//! This module contains the pure parts of the program with no I/O: the
//! newline framer used on the hacker connection, message normalization and
//! the number guessing rules. It only needs `alloc` and `rand`.

pub mod common;
pub mod config;
pub mod framer;
pub mod game;

// Re-export commonly used types
pub use common::Message;
pub use config::*;
pub use framer::{LineFramer, Lines};
pub use game::{GameError, GameStatus, GuessingGame, Reply};
