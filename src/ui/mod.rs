//! Terminal rendering for Flappy Ball.

pub mod scene;

pub use scene::render;
