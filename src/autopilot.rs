//! Scripted player for headless runs
//!
//! Walks the menus, then chases the nearest target with a speed-limited
//! pointer, side-stepping obstacles and clicking while over a target.

use glam::Vec2;

use crate::sim::{GamePhase, GameState, TickInput};

#[derive(Debug, Clone)]
pub struct Autopilot {
    pointer: Vec2,
    /// Pointer travel per tick (percent)
    max_speed: f32,
    /// Click once every N ticks while over a target (0 = never click)
    click_every: u32,
    ticks: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(1.5, 12)
    }
}

impl Autopilot {
    pub fn new(max_speed: f32, click_every: u32) -> Self {
        Self {
            pointer: Vec2::splat(50.0),
            max_speed,
            click_every,
            ticks: 0,
        }
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Decide this tick's input from the live state
    pub fn drive(&mut self, state: &GameState) -> TickInput {
        self.ticks = self.ticks.wrapping_add(1);
        match state.phase {
            GamePhase::Tutorial => TickInput {
                acknowledge: true,
                ..Default::default()
            },
            GamePhase::ReadyToStart => TickInput {
                start: true,
                ..Default::default()
            },
            GamePhase::Active => self.chase(state),
            GamePhase::Paused | GamePhase::GameOver => TickInput::default(),
        }
    }

    fn chase(&mut self, state: &GameState) -> TickInput {
        // Aim just inside the top-left corner: in click bounds and in lock range
        let aim = state
            .targets
            .iter()
            .map(|t| t.pos + Vec2::splat(1.0))
            .min_by(|a, b| {
                a.distance(self.pointer)
                    .total_cmp(&b.distance(self.pointer))
            });

        if let Some(aim) = aim {
            let mut step = (aim - self.pointer).clamp_length_max(self.max_speed);

            // Never brush an obstacle
            let danger = state.tuning.lock_radius * 1.5;
            let blocked = |p: Vec2| state.obstacles.iter().any(|o| o.pos.distance(p) < danger);
            if blocked(self.pointer + step) {
                let side = step.perp();
                step = if !blocked(self.pointer + side) {
                    side
                } else if !blocked(self.pointer - side) {
                    -side
                } else {
                    Vec2::ZERO
                };
            }
            self.pointer = (self.pointer + step).clamp(Vec2::ZERO, Vec2::splat(100.0));
        }

        let over_target = crate::sim::targeting::target_at(state, self.pointer).is_some();
        let click = (over_target && self.click_every > 0 && self.ticks % self.click_every == 0)
            .then_some(self.pointer);

        TickInput {
            pointer: Some(self.pointer),
            click,
            ..Default::default()
        }
    }
}
