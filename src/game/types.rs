//! Flappy Ball data structures.
//!
//! All gameplay coordinates live in a fixed 800x600 virtual field; the UI
//! scales to the terminal cell grid at render time. The ball falls under
//! gravity each tick and the player times upward impulses to thread the
//! gaps between scrolling pipe pairs.

use std::time::Instant;

use rand::Rng;

/// Virtual playing field width in game units.
pub const FIELD_WIDTH: i32 = 800;
/// Virtual playing field height in game units.
pub const FIELD_HEIGHT: i32 = 600;

/// Top of the ground strip. The strip itself is decorative; the lethal
/// floor threshold is `FIELD_HEIGHT - BALL_SIZE`.
pub const GROUND_Y: i32 = 580;

/// Ball fixed horizontal position (left edge of its bounding box).
pub const BALL_X: i32 = 100;
/// Ball bounding box side length.
pub const BALL_SIZE: i32 = 30;
/// Ball starting vertical position.
pub const BALL_START_Y: i32 = 300;

/// Gravity: velocity change per tick. Velocity is real-valued and
/// accumulates fractionally; only the position update truncates.
pub const GRAVITY: f64 = 1.0;

/// Jump impulse: velocity override (negative = upward) on activation.
/// Sets velocity directly rather than adding to it, so impulses never stack.
pub const JUMP_IMPULSE: f64 = -8.0;

/// Pipe width in game units.
pub const PIPE_WIDTH: i32 = 60;
/// Vertical gap height between a pipe's upper and lower regions.
pub const PIPE_GAP: i32 = 180;
/// Horizontal pipe speed in units per tick.
pub const PIPE_SPEED: i32 = 3;
/// A new pipe spawns once the rightmost pipe is this far from the right edge.
pub const PIPE_SPACING: i32 = 300;

/// Gap center range: uniform in `[GAP_CENTER_MIN, GAP_CENTER_MAX)`. Keeps
/// both pipe regions at least `PIPE_GAP / 2` short of the field edges.
pub const GAP_CENTER_MIN: i32 = 150;
pub const GAP_CENTER_MAX: i32 = 450;

/// Physics tick interval driven by the main loop (50 Hz).
pub const TICK_INTERVAL_MS: u64 = 20;

/// Minimum wall-clock time after game over before a restart is honored.
pub const RESTART_COOLDOWN_MS: u64 = 1000;

/// Blink period of the restart prompt, driven by wall-clock time.
pub const BLINK_PERIOD_MS: u64 = 500;

/// Axis-aligned rectangle in game units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Strict overlap test: edge-adjacent rectangles (zero-area contact)
    /// do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// A pipe obstacle: an upper and a lower blocking region sharing one
/// horizontal position, with a vertical gap between them.
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Left edge in game units. Decreases by `PIPE_SPEED` each tick.
    pub x: i32,
    /// Bottom of the upper region (top of the gap).
    pub gap_top: i32,
    /// Top of the lower region (bottom of the gap).
    pub gap_bottom: i32,
    /// Set once the ball has cleared this pipe, so it scores at most once.
    pub passed: bool,
}

impl Pipe {
    /// Build a pipe at `x` whose gap is centered on `gap_center`.
    pub fn from_gap_center(x: i32, gap_center: i32) -> Self {
        Pipe {
            x,
            gap_top: gap_center - PIPE_GAP / 2,
            gap_bottom: gap_center + PIPE_GAP / 2,
            passed: false,
        }
    }

    /// Upper blocking region, from the field ceiling down to the gap.
    pub fn upper(&self) -> Rect {
        Rect::new(self.x, 0, PIPE_WIDTH, self.gap_top)
    }

    /// Lower blocking region, from the gap down to the field floor.
    pub fn lower(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom, PIPE_WIDTH, FIELD_HEIGHT - self.gap_bottom)
    }

    /// Trailing (right) edge in game units.
    pub fn right_edge(&self) -> i32 {
        self.x + PIPE_WIDTH
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Entered on collision or out-of-bounds. `at` is the wall-clock
    /// moment of the transition, used for the restart cooldown.
    GameOver { at: Instant },
}

/// Main game state. Owned exclusively by the driver loop; `tick`,
/// activation, and rendering are never invoked concurrently.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Ball vertical position (top edge of its bounding box).
    pub ball_y: i32,
    /// Ball vertical velocity in units per tick (positive = downward).
    pub ball_velocity: f64,
    /// Live pipes in spawn order: leftmost (oldest) first.
    pub pipes: Vec<Pipe>,
    /// Pipes cleared this round.
    pub score: u32,
    pub phase: Phase,
}

impl GameSession {
    /// Create a fresh session. The pipe collection starts empty; the first
    /// tick spawns a pipe immediately.
    pub fn new() -> Self {
        GameSession {
            ball_y: BALL_START_Y,
            ball_velocity: 0.0,
            pipes: Vec::new(),
            score: 0,
            phase: Phase::Playing,
        }
    }

    /// Spawn one pipe at the right field edge with a random gap center.
    pub fn spawn_pipe<R: Rng>(&mut self, rng: &mut R) {
        let gap_center = rng.gen_range(GAP_CENTER_MIN..GAP_CENTER_MAX);
        self.pipes.push(Pipe::from_gap_center(FIELD_WIDTH, gap_center));
    }

    /// Ball bounding box at its current position.
    pub fn ball_rect(&self) -> Rect {
        Rect::new(BALL_X, self.ball_y, BALL_SIZE, BALL_SIZE)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
