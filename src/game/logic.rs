//! Game logic for Flappy Ball.
//!
//! The session is advanced by `process_tick` on a fixed 20ms cadence and by
//! `process_activate` on each key-down edge. Both are total functions over
//! the current state; gameplay failure is the `GameOver` phase, not an error.

use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use super::types::{
    GameSession, Phase, BALL_SIZE, BALL_START_Y, BALL_X, FIELD_HEIGHT, FIELD_WIDTH, GRAVITY,
    JUMP_IMPULSE, PIPE_SPACING, PIPE_SPEED, RESTART_COOLDOWN_MS,
};

/// Advance the simulation by one fixed time step.
///
/// Frozen while game over: physics and pipe movement stop, and only the
/// wall-clock restart cooldown keeps progressing. `now` is the wall-clock
/// moment of the tick, recorded if this tick ends the round.
pub fn process_tick<R: Rng>(session: &mut GameSession, rng: &mut R, now: Instant) {
    if session.is_game_over() {
        return;
    }

    // Gravity: velocity accumulates fractionally, the position update
    // truncates toward zero.
    session.ball_velocity += GRAVITY;
    session.ball_y += session.ball_velocity as i32;

    // Scroll pipes left.
    for pipe in &mut session.pipes {
        pipe.x -= PIPE_SPEED;
    }

    // Score each pipe the first time its trailing edge clears the ball
    // column. The `passed` latch keeps this at-most-once per pipe.
    for pipe in &mut session.pipes {
        if !pipe.passed && pipe.right_edge() < BALL_X {
            pipe.passed = true;
            session.score += 1;
        }
    }

    // Drop pipes that have scrolled off the left field edge. `retain`
    // preserves the spawn order of the survivors.
    session.pipes.retain(|pipe| pipe.right_edge() >= 0);

    // Keep the field stocked: one new pipe whenever the rightmost has
    // scrolled past the spacing threshold (or none are left).
    let needs_pipe = match session.pipes.last() {
        None => true,
        Some(last) => last.x < FIELD_WIDTH - PIPE_SPACING,
    };
    if needs_pipe {
        session.spawn_pipe(rng);
    }

    // Pipe collision: strict AABB overlap against both regions.
    let ball = session.ball_rect();
    let collided = session
        .pipes
        .iter()
        .any(|pipe| ball.intersects(&pipe.upper()) || ball.intersects(&pipe.lower()));

    // Out of bounds: below the floor threshold or above the ceiling.
    let out_of_bounds = session.ball_y > FIELD_HEIGHT - BALL_SIZE || session.ball_y < 0;

    if collided || out_of_bounds {
        session.phase = Phase::GameOver { at: now };
        info!("Game over at score {}", session.score);
    }

    // Spawn order and x order must agree.
    debug_assert!(session.pipes.windows(2).all(|pair| pair[0].x < pair[1].x));
}

/// Handle the player's activate action.
///
/// While playing this is a jump: velocity is set to the impulse constant,
/// overriding any current velocity. While game over it is a restart request,
/// honored only once the cooldown has elapsed and silently ignored before
/// that.
pub fn process_activate<R: Rng>(session: &mut GameSession, now: Instant, rng: &mut R) {
    match session.phase {
        Phase::Playing => {
            session.ball_velocity = JUMP_IMPULSE;
        }
        Phase::GameOver { at } => {
            if now.duration_since(at) >= Duration::from_millis(RESTART_COOLDOWN_MS) {
                restart(session, rng);
            }
        }
    }
}

/// Reset the session to its starting state with a single fresh pipe.
fn restart<R: Rng>(session: &mut GameSession, rng: &mut R) {
    session.ball_y = BALL_START_Y;
    session.ball_velocity = 0.0;
    session.score = 0;
    session.pipes.clear();
    session.spawn_pipe(rng);
    session.phase = Phase::Playing;
    info!("Session restarted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Pipe, GAP_CENTER_MAX, GAP_CENTER_MIN, PIPE_WIDTH};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_gravity_accumulates_each_tick() {
        let mut session = GameSession::new();
        let mut rng = rng();
        let now = Instant::now();
        for i in 1..=5 {
            process_tick(&mut session, &mut rng, now);
            assert_eq!(session.ball_velocity, i as f64 * GRAVITY);
        }
    }

    #[test]
    fn test_position_truncates_velocity() {
        let mut session = GameSession::new();
        session.ball_velocity = -0.5;
        let mut rng = rng();
        // -0.5 + 1.0 = 0.5, truncated to 0: the ball does not move yet,
        // but the fraction carries into the next tick.
        process_tick(&mut session, &mut rng, Instant::now());
        assert_eq!(session.ball_y, BALL_START_Y);
        assert_eq!(session.ball_velocity, 0.5);
        process_tick(&mut session, &mut rng, Instant::now());
        assert_eq!(session.ball_y, BALL_START_Y + 1);
    }

    #[test]
    fn test_first_tick_spawns_pipe() {
        let mut session = GameSession::new();
        let mut rng = rng();
        process_tick(&mut session, &mut rng, Instant::now());
        assert_eq!(session.pipes.len(), 1);
    }

    #[test]
    fn test_pipes_scroll_left() {
        let mut session = GameSession::new();
        session.pipes.push(Pipe::from_gap_center(400, 300));
        let mut rng = rng();
        process_tick(&mut session, &mut rng, Instant::now());
        assert_eq!(session.pipes[0].x, 400 - PIPE_SPEED);
    }

    #[test]
    fn test_scoring_latches_once() {
        let mut session = GameSession::new();
        // Trailing edge one step from crossing the ball column.
        let x = BALL_X - PIPE_WIDTH + PIPE_SPEED - 1;
        session.pipes.push(Pipe::from_gap_center(x, 300));
        let mut rng = rng();

        process_tick(&mut session, &mut rng, Instant::now());
        assert_eq!(session.score, 1);
        assert!(session.pipes[0].passed);

        process_tick(&mut session, &mut rng, Instant::now());
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_offscreen_pipes_removed_in_order() {
        let mut session = GameSession::new();
        session.pipes.push(Pipe::from_gap_center(-PIPE_WIDTH + 2, 200));
        let mut old = Pipe::from_gap_center(300, 300);
        old.passed = true;
        session.pipes.push(old);
        session.pipes[0].passed = true;
        let mut rng = rng();

        process_tick(&mut session, &mut rng, Instant::now());

        // The leftmost pipe fell off; the survivor kept its slot, and a
        // fresh pipe was appended at the right edge.
        assert_eq!(session.pipes.len(), 2);
        assert_eq!(session.pipes[0].x, 300 - PIPE_SPEED);
        assert_eq!(session.pipes[1].x, FIELD_WIDTH);
        assert!(session.pipes[0].x < session.pipes[1].x);
    }

    #[test]
    fn test_spawn_threshold() {
        let mut session = GameSession::new();
        // Ball centered in the gap so nothing collides.
        session.ball_y = 300 - BALL_SIZE / 2;
        session
            .pipes
            .push(Pipe::from_gap_center(FIELD_WIDTH - PIPE_SPACING + PIPE_SPEED, 300));
        let mut rng = rng();

        // First tick moves the pipe exactly to the threshold: no spawn yet.
        process_tick(&mut session, &mut rng, Instant::now());
        assert_eq!(session.pipes.len(), 1);

        // Next tick crosses it: one new pipe appears at the right edge.
        process_tick(&mut session, &mut rng, Instant::now());
        assert_eq!(session.pipes.len(), 2);
        assert_eq!(session.pipes[1].x, FIELD_WIDTH);
    }

    #[test]
    fn test_pipe_collision_ends_round() {
        let mut session = GameSession::new();
        session.ball_y = 10; // Inside the upper region of any pipe.
        session.ball_velocity = -GRAVITY; // Hold position this tick.
        session.pipes.push(Pipe::from_gap_center(BALL_X, 300));
        let mut rng = rng();

        process_tick(&mut session, &mut rng, Instant::now());
        assert!(session.is_game_over());
    }

    #[test]
    fn test_edge_adjacent_pipe_is_not_a_collision() {
        let mut session = GameSession::new();
        // Ball bottom exactly touching the lower region top after this
        // tick: gap_bottom = 390, ball top = 360, bottom edge = 390.
        session.ball_velocity = -GRAVITY;
        session.ball_y = 390 - BALL_SIZE;
        // Pipe left edge exactly at the ball's right edge.
        session.pipes.push(Pipe::from_gap_center(BALL_X + BALL_SIZE, 300));
        let mut rng = rng();

        process_tick(&mut session, &mut rng, Instant::now());
        // Pipe moved to BALL_X + BALL_SIZE - 3: x-ranges now overlap, but
        // the ball sits flush with the gap bottom, zero-area contact only.
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_floor_ends_round() {
        let mut session = GameSession::new();
        session.ball_y = FIELD_HEIGHT - BALL_SIZE;
        session.ball_velocity = 0.0;
        let mut rng = rng();
        process_tick(&mut session, &mut rng, Instant::now());
        assert!(session.is_game_over());
    }

    #[test]
    fn test_ceiling_ends_round() {
        let mut session = GameSession::new();
        session.ball_y = 3;
        session.ball_velocity = -6.0;
        let mut rng = rng();
        process_tick(&mut session, &mut rng, Instant::now());
        assert!(session.is_game_over());
    }

    #[test]
    fn test_tick_frozen_while_game_over() {
        let mut session = GameSession::new();
        session.phase = Phase::GameOver { at: Instant::now() };
        session.pipes.push(Pipe::from_gap_center(400, 300));
        let mut rng = rng();

        let before = session.clone();
        process_tick(&mut session, &mut rng, Instant::now());

        assert_eq!(session.ball_y, before.ball_y);
        assert_eq!(session.ball_velocity, before.ball_velocity);
        assert_eq!(session.pipes[0].x, before.pipes[0].x);
        assert_eq!(session.pipes.len(), before.pipes.len());
        assert_eq!(session.score, before.score);
    }

    #[test]
    fn test_activate_overrides_velocity() {
        let mut session = GameSession::new();
        session.ball_velocity = 14.0;
        let mut rng = rng();
        process_activate(&mut session, Instant::now(), &mut rng);
        assert_eq!(session.ball_velocity, JUMP_IMPULSE);

        // A second activation does not stack.
        process_activate(&mut session, Instant::now(), &mut rng);
        assert_eq!(session.ball_velocity, JUMP_IMPULSE);
    }

    #[test]
    fn test_restart_ignored_during_cooldown() {
        let mut session = GameSession::new();
        let at = Instant::now();
        session.phase = Phase::GameOver { at };
        session.score = 12;
        session.ball_y = 444;
        let mut rng = rng();

        process_activate(&mut session, at + Duration::from_millis(RESTART_COOLDOWN_MS - 1), &mut rng);

        assert!(session.is_game_over());
        assert_eq!(session.score, 12);
        assert_eq!(session.ball_y, 444);
    }

    #[test]
    fn test_restart_after_cooldown_resets_state() {
        let mut session = GameSession::new();
        let at = Instant::now();
        session.phase = Phase::GameOver { at };
        session.score = 12;
        session.ball_y = 444;
        session.ball_velocity = 9.5;
        session.pipes.push(Pipe::from_gap_center(50, 200));
        session.pipes.push(Pipe::from_gap_center(350, 400));
        let mut rng = rng();

        process_activate(&mut session, at + Duration::from_millis(RESTART_COOLDOWN_MS), &mut rng);

        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.ball_y, BALL_START_Y);
        assert_eq!(session.ball_velocity, 0.0);
        assert_eq!(session.score, 0);
        assert_eq!(session.pipes.len(), 1);
        assert_eq!(session.pipes[0].x, FIELD_WIDTH);
        let center = (session.pipes[0].gap_top + session.pipes[0].gap_bottom) / 2;
        assert!((GAP_CENTER_MIN..GAP_CENTER_MAX).contains(&center));
    }
}
