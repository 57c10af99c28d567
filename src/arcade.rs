//! Host-facing game driver
//!
//! Owns the simulation state together with its side-effect collaborators.
//! After every tick the pending events are routed synchronously: hits play
//! their weapon's cue, new high scores are written to the store.

use crate::audio::SoundBoard;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::view::{self, CrosshairParams, GridParams};

pub struct Arcade<S: KeyValueStore> {
    pub state: GameState,
    high_score: HighScore<S>,
    audio: SoundBoard,
    settings: Settings,
    tuning: Tuning,
    accumulator: f32,
}

impl<S: KeyValueStore> Arcade<S> {
    /// Load the high score from `store` and open on the tutorial
    pub fn new(seed: u64, store: S, tuning: Tuning, settings: Settings) -> Self {
        let high_score = HighScore::load(store);
        let state = GameState::new(seed, high_score.best(), tuning);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state,
            high_score,
            audio: SoundBoard::new(&settings),
            settings,
            tuning,
            accumulator: 0.0,
        }
    }

    /// Throw away the current game and wait for "Start" again.
    /// The tutorial is not shown a second time.
    pub fn restart(&mut self, seed: u64) {
        self.state = GameState::new_session(seed, self.high_score.best(), self.tuning);
        self.accumulator = 0.0;
        log::info!("Game restarted with seed: {}", seed);
    }

    /// One fixed step; returns the events it produced
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        tick(&mut self.state, input, dt);
        let events = self.state.drain_events();
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    /// Feed a variable frame time through the fixed-step clock.
    ///
    /// One-shot inputs (clicks, buttons, weapon switch, pointer exit) are
    /// consumed by the first substep; the pointer sample is kept.
    pub fn advance(&mut self, frame_dt: f32, input: &mut TickInput) -> Vec<GameEvent> {
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.tick(input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            input.click = None;
            input.pointer_left = false;
            input.acknowledge = false;
            input.start = false;
            input.pause = false;
            input.weapon = None;
        }
        events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Hit { weapon, .. } => self.audio.play_hit(*weapon),
            GameEvent::NewHighScore { score } => {
                self.high_score.record(*score);
            }
            GameEvent::PhaseChanged {
                to: GamePhase::GameOver,
                ..
            } => {
                log::info!(
                    "Game over: score {}, high score {}",
                    self.state.score,
                    self.high_score.best()
                );
            }
            _ => {}
        }
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn store(&self) -> &S {
        self.high_score.store()
    }

    pub fn into_store(self) -> S {
        self.high_score.into_store()
    }

    pub fn audio(&self) -> &SoundBoard {
        &self.audio
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    pub fn grid(&self) -> GridParams {
        view::grid(&self.state, &self.settings)
    }

    pub fn crosshair(&self) -> CrosshairParams {
        view::crosshair(&self.state, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use glam::Vec2;

    fn arcade() -> Arcade<MemoryStore> {
        Arcade::new(4, MemoryStore::new(), Tuning::default(), Settings::default())
    }

    #[test]
    fn test_hit_plays_cue_and_saves() {
        let mut game = arcade();
        game.tick(
            &TickInput {
                acknowledge: true,
                ..Default::default()
            },
            SIM_DT,
        );
        game.tick(
            &TickInput {
                start: true,
                ..Default::default()
            },
            SIM_DT,
        );
        game.state.tuning.game_speed = 0.0;
        game.state.targets[0].pos = Vec2::new(20.0, 20.0);
        game.state.obstacles[0].pos = Vec2::new(90.0, 90.0);

        let events = game.tick(
            &TickInput {
                click: Some(Vec2::new(25.0, 25.0)),
                ..Default::default()
            },
            SIM_DT,
        );
        assert!(events.iter().any(|e| matches!(e, GameEvent::Hit { .. })));
        assert_eq!(game.audio().plays(), 1);
        assert_eq!(game.high_score(), 1);
        assert_eq!(
            game.store()
                .get(HighScore::<MemoryStore>::STORAGE_KEY)
                .unwrap()
                .as_deref(),
            Some("1")
        );
    }

    #[test]
    fn test_advance_consumes_one_shots() {
        let mut game = arcade();
        let mut input = TickInput {
            acknowledge: true,
            pointer: Some(Vec2::new(3.0, 3.0)),
            ..Default::default()
        };
        game.advance(SIM_DT * 3.5, &mut input);
        assert_eq!(game.state.phase, GamePhase::ReadyToStart);
        assert!(!input.acknowledge);
        assert_eq!(input.pointer, Some(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn test_advance_pointer_exit() {
        let mut game = arcade();
        let mut input = TickInput {
            pointer: Some(Vec2::new(3.0, 3.0)),
            ..Default::default()
        };
        game.advance(SIM_DT * 1.5, &mut input);
        assert_eq!(game.state.pointer, Some(Vec2::new(3.0, 3.0)));

        input.pointer = None;
        input.pointer_left = true;
        game.advance(SIM_DT * 1.5, &mut input);
        assert!(!input.pointer_left);
        assert_eq!(game.state.pointer, None);
        assert!(game.crosshair().position.is_none());
    }

    #[test]
    fn test_advance_clamps_long_frames() {
        let mut game = arcade();
        game.restart(9);
        let mut input = TickInput {
            start: true,
            ..Default::default()
        };
        game.advance(10.0, &mut input);
        // Frame time is clamped to 100ms: about 6 steps at 60 Hz
        assert!((5..=6).contains(&game.state.time_ticks));
    }

    #[test]
    fn test_restart_skips_tutorial() {
        let mut game = arcade();
        game.restart(5);
        assert_eq!(game.state.phase, GamePhase::ReadyToStart);
        assert!(!game.state.first_game);
    }
}
