//! Reticle - a pointer-driven target lock-on arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, lock-on, scoring, phases)
//! - `arcade`: Host-facing driver wiring the sim to storage and audio
//! - `persistence`: Key-value storage backends
//! - `highscores`: The persisted high score
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences
//! - `view`: Parameters handed to the grid and crosshair renderers

pub mod arcade;
pub mod audio;
pub mod autopilot;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use arcade::Arcade;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Largest x/y an entity may occupy (percent of playfield)
    pub const PLAYFIELD_MAX: f32 = 90.0;
    /// Pointer coordinates span the full playfield (percent)
    pub const POINTER_MAX: f32 = 100.0;

    /// Lives at the start of every game
    pub const STARTING_LIVES: u8 = 5;
    /// Distance moved per tick (percent)
    pub const GAME_SPEED: f32 = 0.5;
    /// Direction re-roll period (simulated ms)
    pub const DIRECTION_INTERVAL_MS: f32 = 5000.0;
    /// Pointer-to-target distance below which a dwell lock starts
    pub const LOCK_RADIUS: f32 = 5.0;
    /// Continuous dwell needed for an automatic lock-hit (ms)
    pub const LOCK_DWELL_MS: f32 = 500.0;
    /// Score at which the second target/obstacle pair appears
    pub const SPAWN_THRESHOLD: u64 = 1000;
    /// Visual extent of a target, used for click bounds (percent)
    pub const TARGET_SIZE: f32 = 10.0;
}

/// Clamp a position so the entity's visual extent stays on-screen
#[inline]
pub fn clamp_to_playfield(pos: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, Vec2::splat(consts::PLAYFIELD_MAX))
}

/// Screen-space bounding rectangle of the playfield element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayfieldRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PlayfieldRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Convert a screen-space point to the 0-100 percent playfield space.
    ///
    /// Points outside the rectangle are clamped to its edges; a degenerate
    /// rectangle maps everything to the origin.
    pub fn to_playfield(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        let x = (screen_x - self.left) / self.width * consts::POINTER_MAX;
        let y = (screen_y - self.top) / self.height * consts::POINTER_MAX;
        Vec2::new(x, y).clamp(Vec2::ZERO, Vec2::splat(consts::POINTER_MAX))
    }
}
