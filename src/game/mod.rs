//! Flappy Ball game core.
//!
//! A real-time arcade session where the player guides a falling ball
//! through scrolling pipe gaps by timing upward impulses. Gravity pulls
//! the ball down each tick, and hitting a pipe or leaving the field ends
//! the round; a restart is accepted after a short cooldown.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
