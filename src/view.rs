//! Renderer parameters
//!
//! The grid and crosshair renderers live outside this crate; these are the
//! records they consume, derived from the live state each frame.

use glam::Vec2;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{Direction, GamePhase, GameState};

/// Scrolling background grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridParams {
    pub direction: Direction,
    pub speed: f32,
    pub square_size: u32,
    pub border_color: String,
}

/// Crosshair overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrosshairParams {
    /// Pointer position (percent space), hidden when `None`
    pub position: Option<Vec2>,
    pub color: String,
}

pub fn grid(state: &GameState, settings: &Settings) -> GridParams {
    // The grid stands still whenever the world does
    let speed = if state.phase == GamePhase::Active {
        state.tuning.game_speed
    } else {
        0.0
    };
    GridParams {
        direction: state.direction,
        speed,
        square_size: settings.grid_square_size,
        border_color: settings.grid_border_color.clone(),
    }
}

pub fn crosshair(state: &GameState, settings: &Settings) -> CrosshairParams {
    let color = if state.is_locked {
        settings.lock_color.clone()
    } else {
        state.weapon.preset().color.to_string()
    };
    CrosshairParams {
        position: state.pointer,
        color,
    }
}
