//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Logical clock only (no wall-clock timers)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No audio, storage or platform dependencies

pub mod hit;
pub mod movement;
pub mod state;
pub mod targeting;
pub mod tick;
pub mod weapon;

pub use hit::resolve_hit;
pub use state::{
    Direction, GameEvent, GamePhase, GameState, HitSource, LockTimer, Obstacle, Target,
};
pub use tick::{TickInput, tick};
pub use weapon::{Weapon, WeaponPreset};

/// Countdowns at or below this many ms count as expired (absorbs f32 drift)
pub const TIMER_EPSILON_MS: f32 = 1e-3;
