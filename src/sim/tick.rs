//! Fixed timestep simulation tick
//!
//! One call advances the logical clock by `dt` and evaluates every timer
//! against the live state in a fixed order: direction countdown, movement,
//! click, dwell countdown, obstacle contact.

use glam::Vec2;

use super::movement;
use super::state::{GamePhase, GameState};
use super::targeting;
use super::weapon::Weapon;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position (percent space)
    pub pointer: Option<Vec2>,
    /// Pointer left the playfield; drops the last sample
    pub pointer_left: bool,
    /// Click position (percent space)
    pub click: Option<Vec2>,
    /// "Got it" on the tutorial
    pub acknowledge: bool,
    /// "Start"
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Switch weapon
    pub weapon: Option<Weapon>,
}

/// Advance the game state by one timestep of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(weapon) = input.weapon {
        state.select_weapon(weapon);
    }
    // Pointer is observed in every phase; it only scores while active
    if input.pointer_left {
        state.pointer = None;
    } else if let Some(pointer) = input.pointer {
        targeting::set_pointer(state, pointer);
    }

    if input.acknowledge {
        state.acknowledge_tutorial();
    }
    if input.start {
        state.start_game();
    }
    if input.pause {
        state.toggle_pause();
    }

    if state.phase != GamePhase::Active {
        return;
    }

    let dt_ms = dt.max(0.0) * 1000.0;
    state.time_ticks += 1;
    state.elapsed_ms += f64::from(dt_ms);

    movement::update_direction(state, dt_ms);
    movement::move_entities(state);

    if let Some(point) = input.click {
        targeting::click(state, point);
    }
    targeting::update_lock(state, dt_ms);
    targeting::update_obstacle_contact(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::Direction;
    use crate::tuning::Tuning;

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_tick_tutorial_to_active() {
        let mut state = GameState::new(12345, 0, Tuning::default());
        assert_eq!(state.phase, GamePhase::Tutorial);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Tutorial);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &press(|i| i.acknowledge = true), SIM_DT);
        assert_eq!(state.phase, GamePhase::ReadyToStart);
        tick(&mut state, &press(|i| i.start = true), SIM_DT);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_tick_pause_freezes_world() {
        let mut state = GameState::new_session(12345, 0, Tuning::default());
        tick(&mut state, &press(|i| i.start = true), SIM_DT);
        state.direction = Direction::Right;
        state.targets[0].pos = Vec2::new(10.0, 10.0);

        tick(&mut state, &press(|i| i.pause = true), SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.targets[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(state.direction, Direction::Right);

        tick(&mut state, &press(|i| i.pause = true), SIM_DT);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.targets[0].pos, Vec2::new(10.5, 10.0));
    }

    #[test]
    fn test_paused_click_ignored() {
        let mut state = GameState::new_session(5, 0, Tuning::default());
        tick(&mut state, &press(|i| i.start = true), SIM_DT);
        tick(&mut state, &press(|i| i.pause = true), SIM_DT);
        let at = state.targets[0].pos + Vec2::splat(1.0);
        tick(&mut state, &press(|i| i.click = Some(at)), SIM_DT);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_weapon_switch_any_phase() {
        let mut state = GameState::new(5, 0, Tuning::default());
        tick(&mut state, &press(|i| i.weapon = Some(Weapon::Laser)), SIM_DT);
        assert_eq!(state.weapon, Weapon::Laser);
    }

    #[test]
    fn test_dwell_through_ticks() {
        let mut state = GameState::new_session(8, 0, Tuning::default());
        tick(&mut state, &press(|i| i.start = true), SIM_DT);
        state.tuning.game_speed = 0.0;
        state.targets[0].pos = Vec2::new(30.0, 30.0);
        state.obstacles[0].pos = Vec2::new(90.0, 90.0);

        let hold = press(|i| i.pointer = Some(Vec2::new(31.0, 31.0)));
        tick(&mut state, &hold, 0.1); // arms
        for _ in 0..4 {
            tick(&mut state, &hold, 0.1);
        }
        assert_eq!(state.score, 0);
        tick(&mut state, &hold, 0.1);
        assert_eq!(state.score, 2);
        assert!(state.is_locked);

        // A stationary pointer does not keep scoring
        for _ in 0..30 {
            tick(&mut state, &hold, 0.1);
        }
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_pointer_left_cancels_dwell() {
        let mut state = GameState::new_session(8, 0, Tuning::default());
        tick(&mut state, &press(|i| i.start = true), SIM_DT);
        state.tuning.game_speed = 0.0;
        state.targets[0].pos = Vec2::new(30.0, 30.0);
        state.obstacles[0].pos = Vec2::new(90.0, 90.0);

        let mut input = press(|i| i.pointer = Some(Vec2::new(31.0, 31.0)));
        tick(&mut state, &input, 0.1);
        tick(&mut state, &input, 0.3);
        assert!(state.lock.is_some());

        input.pointer = None;
        input.pointer_left = true;
        tick(&mut state, &input, 0.1);
        assert_eq!(state.pointer, None);
        assert!(state.lock.is_none());

        input.pointer_left = false;
        for _ in 0..10 {
            tick(&mut state, &input, 0.1);
        }
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new_session(99999, 0, Tuning::default());
        let mut state2 = GameState::new_session(99999, 0, Tuning::default());

        let inputs = [
            press(|i| i.start = true),
            press(|i| i.pointer = Some(Vec2::new(20.0, 20.0))),
            TickInput::default(),
            press(|i| i.click = Some(Vec2::new(50.0, 50.0))),
        ];

        for _ in 0..500 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.direction, state2.direction);
        assert_eq!(state1.targets, state2.targets);
    }
}
