//! Pointer targeting: click-hits, dwell lock-on and obstacle contact
//!
//! Only one dwell countdown runs at a time. The candidate is kept for as
//! long as the pointer stays within `lock_radius` of it, even if another
//! target drifts closer; a new candidate (the nearest in range) is only
//! chosen when no countdown is running.

use glam::Vec2;

use super::TIMER_EPSILON_MS;
use super::hit::resolve_hit;
use super::state::{GameEvent, GamePhase, GameState, HitSource, LockTimer};
use crate::consts::POINTER_MAX;

/// Record the latest pointer sample (percent space)
pub fn set_pointer(state: &mut GameState, pos: Vec2) {
    state.pointer = Some(pos.clamp(Vec2::ZERO, Vec2::splat(POINTER_MAX)));
}

/// Topmost target whose visual bounds contain `point`
pub fn target_at(state: &GameState, point: Vec2) -> Option<u32> {
    let size = state.tuning.target_size;
    state
        .targets
        .iter()
        .rev()
        .find(|t| {
            point.x >= t.pos.x
                && point.x <= t.pos.x + size
                && point.y >= t.pos.y
                && point.y <= t.pos.y + size
        })
        .map(|t| t.id)
}

/// Explicit click; scores immediately if it lands on a target
pub fn click(state: &mut GameState, point: Vec2) -> Option<u64> {
    if state.phase != GamePhase::Active {
        return None;
    }
    let target_id = target_at(state, point)?;
    resolve_hit(state, target_id, HitSource::Click)
}

/// Nearest target strictly inside the lock radius
fn nearest_in_range(state: &GameState, pointer: Vec2) -> Option<u32> {
    let radius = state.tuning.lock_radius;
    state
        .targets
        .iter()
        .map(|t| (t.id, t.pos.distance(pointer)))
        .filter(|&(_, d)| d < radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Advance the dwell countdown by `dt_ms`.
///
/// A countdown starts on the first sample in range and only counts
/// time from the following ticks. Leaving range cancels it and clears
/// `is_locked`; completing it sets `is_locked` and lands one dwell hit.
/// A target that already paid out stays spent until the pointer leaves it.
pub fn update_lock(state: &mut GameState, dt_ms: f32) {
    let Some(pointer) = state.pointer else {
        state.lock = None;
        state.lock_spent = None;
        state.release_lock();
        return;
    };
    let radius = state.tuning.lock_radius;
    let in_range = |state: &GameState, id: u32| {
        state
            .targets
            .iter()
            .find(|t| t.id == id)
            .is_some_and(|t| t.pos.distance(pointer) < radius)
    };

    if let Some(timer) = state.lock {
        if in_range(state, timer.target_id) {
            let remaining_ms = timer.remaining_ms - dt_ms;
            if remaining_ms <= TIMER_EPSILON_MS {
                state.lock = None;
                state.lock_spent = Some(timer.target_id);
                state.is_locked = true;
                state.events.push(GameEvent::LockAcquired {
                    target_id: timer.target_id,
                });
                resolve_hit(state, timer.target_id, HitSource::Dwell);
            } else {
                state.lock = Some(LockTimer {
                    remaining_ms,
                    ..timer
                });
            }
            return;
        }

        state.lock = None;
        state.release_lock();
    }

    if let Some(spent) = state.lock_spent {
        if in_range(state, spent) {
            return;
        }
        state.lock_spent = None;
        state.release_lock();
    }

    match nearest_in_range(state, pointer) {
        Some(target_id) => {
            state.lock = Some(LockTimer {
                target_id,
                remaining_ms: state.tuning.lock_dwell_ms,
            });
        }
        None => state.release_lock(),
    }
}

/// Pointer resting on an obstacle costs one life per contact
pub fn update_obstacle_contact(state: &mut GameState) {
    if !state.tuning.obstacle_contact {
        return;
    }
    let Some(pointer) = state.pointer else {
        state.obstacle_contact = None;
        return;
    };
    let radius = state.tuning.lock_radius;
    let touching = state
        .obstacles
        .iter()
        .find(|o| o.pos.distance(pointer) < radius)
        .map(|o| o.id);

    match touching {
        Some(id) if state.obstacle_contact == Some(id) => {}
        Some(id) => {
            log::debug!("Pointer touched obstacle {}", id);
            state.obstacle_contact = Some(id);
            state.lose_life();
        }
        None => state.obstacle_contact = None,
    }
}
