//! Direction controller, movement simulator and spawn rule

use glam::Vec2;
use rand::Rng;

use super::state::{Direction, GameEvent, GameState};
use super::TIMER_EPSILON_MS;
use crate::clamp_to_playfield;

/// Count down the direction interval; on expiry pick a new direction
/// uniformly from all five (repeats allowed).
pub fn update_direction(state: &mut GameState, dt_ms: f32) {
    state.direction_timer_ms -= dt_ms;
    if state.direction_timer_ms > TIMER_EPSILON_MS {
        return;
    }

    let interval = state.tuning.direction_interval_ms;
    state.direction_timer_ms += interval;
    if state.direction_timer_ms <= TIMER_EPSILON_MS {
        // Oversized dt; don't fire a burst of re-rolls
        state.direction_timer_ms = interval;
    }

    let direction = Direction::ALL[state.rng.random_range(0..Direction::ALL.len())];
    log::debug!("Direction {} -> {}", state.direction.as_str(), direction.as_str());
    state.direction = direction;
    state.events.push(GameEvent::DirectionChanged { direction });
}

/// Advance one position by one tick
pub fn step(pos: Vec2, direction: Direction, speed: f32, rng: &mut impl Rng) -> Vec2 {
    let delta = match direction {
        Direction::Up => Vec2::new(0.0, -speed),
        Direction::Down => Vec2::new(0.0, speed),
        Direction::Left => Vec2::new(-speed, 0.0),
        Direction::Right => Vec2::new(speed, 0.0),
        Direction::Diagonal => {
            let sx = if rng.random_bool(0.5) { speed } else { -speed };
            let sy = if rng.random_bool(0.5) { speed } else { -speed };
            Vec2::new(sx, sy)
        }
    };
    clamp_to_playfield(pos + delta)
}

/// Move every target (and obstacles when tuning says they drift too)
pub fn move_entities(state: &mut GameState) {
    let direction = state.direction;
    let speed = state.tuning.game_speed;

    for target in &mut state.targets {
        target.pos = step(target.pos, direction, speed, &mut state.rng);
    }
    if state.tuning.obstacles_move {
        for obstacle in &mut state.obstacles {
            obstacle.pos = step(obstacle.pos, direction, speed, &mut state.rng);
        }
    }
}

/// Second target/obstacle pair once the score crosses the threshold.
/// Fires at most once per game: afterwards more than one target exists.
pub fn check_spawn(state: &mut GameState) {
    if state.score < state.tuning.spawn_threshold || state.targets.len() != 1 {
        return;
    }
    let (target_id, obstacle_id) = state.spawn_pair();
    log::info!(
        "Score {} reached {}: spawned target {} and obstacle {}",
        state.score,
        state.tuning.spawn_threshold,
        target_id,
        obstacle_id
    );
    state.events.push(GameEvent::Spawned {
        target_id,
        obstacle_id,
    });
}
