//! Presentation preferences
//!
//! Audio levels and the look of the grid and crosshair. None of this affects
//! the simulation and none of it is persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === Grid ===
    /// Background grid cell size (px)
    pub grid_square_size: u32,
    /// Background grid line color
    pub grid_border_color: String,

    // === Crosshair ===
    /// Crosshair color while a lock is held (overrides the weapon color)
    pub lock_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            grid_square_size: 40,
            grid_border_color: "#1f2937".to_string(),

            lock_color: "#22c55e".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Effective cue volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
        settings.muted = false;
        settings.master_volume = 3.0;
        assert_eq!(settings.effective_volume(), 1.0);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r##"{ "lock_color": "#ffffff" }"##).unwrap();
        assert_eq!(settings.lock_color, "#ffffff");
        assert_eq!(settings.grid_square_size, 40);
    }
}
