//! Flappy Ball - Terminal Arcade Game Library
//!
//! This module exposes the game logic for testing and external use.

pub mod build_info;
pub mod game;
pub mod input;

// UI is exposed for the binary only; it is tightly coupled to the terminal
// and carries no test surface of its own.
pub mod ui;
