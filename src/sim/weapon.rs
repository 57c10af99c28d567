//! Weapon registry
//!
//! A closed catalog of four presets. The selected weapon is a `Weapon` tag;
//! its preset is a `'static` record that is never copied into the game state.

use serde::{Deserialize, Serialize};

/// Immutable combat parameters for one weapon
#[derive(Debug, PartialEq)]
pub struct WeaponPreset {
    pub name: &'static str,
    /// Score per unlocked hit
    pub damage: u64,
    /// Shots per second (only enforced when tuning asks for it)
    pub fire_rate: f32,
    /// Spread angle in degrees, purely cosmetic
    pub spread: Option<f32>,
    /// Crosshair color
    pub color: &'static str,
    /// Hit sound asset
    pub sound: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weapon {
    #[default]
    Default,
    Laser,
    Lightning,
    Shotgun,
}

static DEFAULT: WeaponPreset = WeaponPreset {
    name: "default",
    damage: 1,
    fire_rate: 4.0,
    spread: None,
    color: "#ef4444",
    sound: "sounds/default.mp3",
};

static LASER: WeaponPreset = WeaponPreset {
    name: "laser",
    damage: 2,
    fire_rate: 6.0,
    spread: None,
    color: "#22d3ee",
    sound: "sounds/laser.mp3",
};

static LIGHTNING: WeaponPreset = WeaponPreset {
    name: "lightning",
    damage: 3,
    fire_rate: 2.0,
    spread: None,
    color: "#facc15",
    sound: "sounds/lightning.mp3",
};

static SHOTGUN: WeaponPreset = WeaponPreset {
    name: "shotgun",
    damage: 1,
    fire_rate: 3.0,
    spread: Some(15.0),
    color: "#f97316",
    sound: "sounds/shotgun.mp3",
};

impl Weapon {
    pub const ALL: [Weapon; 4] = [
        Weapon::Default,
        Weapon::Laser,
        Weapon::Lightning,
        Weapon::Shotgun,
    ];

    pub fn preset(self) -> &'static WeaponPreset {
        match self {
            Weapon::Default => &DEFAULT,
            Weapon::Laser => &LASER,
            Weapon::Lightning => &LIGHTNING,
            Weapon::Shotgun => &SHOTGUN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.preset().name
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Minimum simulated ms between two scoring hits with this weapon
    pub fn cooldown_ms(self) -> f32 {
        1000.0 / self.preset().fire_rate
    }
}
