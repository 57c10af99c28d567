//! Hit sound cues
//!
//! Each cue rewinds its clip and plays it again. There is no queue, and
//! playback failures (autoplay policy, missing asset) are ignored.
//! Native builds have no audio backend and only log the cue.

#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;

#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAudioElement;

use crate::settings::Settings;
use crate::sim::Weapon;

/// Audio manager for the game
pub struct SoundBoard {
    volume: f32,
    plays: u64,
    #[cfg(target_arch = "wasm32")]
    clips: HashMap<&'static str, HtmlAudioElement>,
}

impl Default for SoundBoard {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl SoundBoard {
    pub fn new(settings: &Settings) -> Self {
        Self {
            volume: settings.effective_volume(),
            plays: 0,
            #[cfg(target_arch = "wasm32")]
            clips: HashMap::new(),
        }
    }

    /// Re-read volume/mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Cues started so far
    pub fn plays(&self) -> u64 {
        self.plays
    }

    /// Play the current weapon's hit sound
    pub fn play_hit(&mut self, weapon: Weapon) {
        self.play(weapon.preset().sound);
    }

    /// Rewind then play `sound`
    pub fn play(&mut self, sound: &'static str) {
        if self.volume <= 0.0 {
            return;
        }
        self.plays += 1;
        self.start(sound);
    }

    #[cfg(target_arch = "wasm32")]
    fn start(&mut self, sound: &'static str) {
        if !self.clips.contains_key(sound) {
            match HtmlAudioElement::new_with_src(sound) {
                Ok(clip) => {
                    self.clips.insert(sound, clip);
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {:?}", sound, e);
                    return;
                }
            }
        }
        let Some(clip) = self.clips.get(sound) else {
            return;
        };
        clip.set_volume(f64::from(self.volume));
        clip.set_current_time(0.0);
        // Rejected promises (autoplay policy) are not our problem
        let _ = clip.play();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn start(&mut self, sound: &'static str) {
        log::debug!("Cue {} at volume {:.2}", sound, self.volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut board = SoundBoard::new(&settings);
        board.play_hit(Weapon::Laser);
        assert_eq!(board.plays(), 0);
    }

    #[test]
    fn test_overlapping_hits_each_play() {
        let mut board = SoundBoard::default();
        board.play_hit(Weapon::Default);
        board.play_hit(Weapon::Default);
        board.play_hit(Weapon::Shotgun);
        assert_eq!(board.plays(), 3);
    }

    #[test]
    fn test_apply_settings() {
        let mut board = SoundBoard::default();
        board.apply_settings(&Settings {
            muted: true,
            ..Settings::default()
        });
        assert_eq!(board.volume(), 0.0);
    }
}
