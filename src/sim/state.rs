//! Game state and core simulation types
//!
//! `GameState` is the one authoritative record. Every countdown the game
//! needs (direction re-roll, dwell lock) lives inside it and is advanced by
//! `tick`, so nothing ever acts on a stale copy.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::weapon::Weapon;
use crate::consts::PLAYFIELD_MAX;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Instructions on screen, waiting for "Got it"
    Tutorial,
    /// Waiting for "Start"
    ReadyToStart,
    /// Clock running, hits score
    Active,
    /// Clock frozen
    Paused,
    /// Out of lives (terminal)
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Tutorial => "tutorial",
            GamePhase::ReadyToStart => "readyToStart",
            GamePhase::Active => "active",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Playfield movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Per-axis random jitter, re-rolled every tick
    Diagonal,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Diagonal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Diagonal => "diagonal",
        }
    }
}

/// A target entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
}

/// An obstacle entity (paired with a target at spawn)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
}

/// Dwell countdown on the single lock candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockTimer {
    pub target_id: u32,
    pub remaining_ms: f32,
}

/// How a hit was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitSource {
    Click,
    Dwell,
}

/// Things that happened during a tick, drained by the host for audio,
/// persistence and UI feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    DirectionChanged {
        direction: Direction,
    },
    Hit {
        target_id: u32,
        weapon: Weapon,
        source: HitSource,
        locked: bool,
        delta: u64,
        score: u64,
    },
    LockAcquired {
        target_id: u32,
    },
    LockReleased,
    Spawned {
        target_id: u32,
        obstacle_id: u32,
    },
    LifeLost {
        remaining: u8,
    },
    NewHighScore {
        score: u64,
    },
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (directions, jitter, spawn positions)
    pub rng: Pcg32,
    /// Balance parameters for this run
    pub tuning: Tuning,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Cleared the first time a game is started
    pub first_game: bool,
    /// Set when a dwell lock completes, cleared when the pointer leaves
    pub is_locked: bool,
    pub weapon: Weapon,
    pub direction: Direction,
    pub targets: Vec<Target>,
    pub obstacles: Vec<Obstacle>,
    /// Last pointer sample (percent space)
    pub pointer: Option<Vec2>,
    /// Running dwell countdown, if any
    pub lock: Option<LockTimer>,
    /// Target whose dwell already paid out; no new countdown on it until
    /// the pointer leaves its radius
    pub lock_spent: Option<u32>,
    /// Obstacle the pointer is currently resting on
    pub obstacle_contact: Option<u32>,
    /// Simulated ms until the next direction re-roll
    pub direction_timer_ms: f32,
    /// Simulated active time (ms)
    pub elapsed_ms: f64,
    /// `elapsed_ms` of the last scoring hit
    pub last_hit_ms: Option<f64>,
    /// Active ticks simulated
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state for a first-time player, starting at the tutorial
    pub fn new(seed: u64, high_score: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        Self {
            seed,
            rng,
            tuning,
            score: 0,
            high_score,
            lives: tuning.starting_lives,
            phase: GamePhase::Tutorial,
            first_game: true,
            is_locked: false,
            weapon: Weapon::Default,
            direction,
            targets: Vec::new(),
            obstacles: Vec::new(),
            pointer: None,
            lock: None,
            lock_spent: None,
            obstacle_contact: None,
            direction_timer_ms: tuning.direction_interval_ms,
            elapsed_ms: 0.0,
            last_hit_ms: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Fresh state for a returning player: tutorial already acknowledged
    pub fn new_session(seed: u64, high_score: u64, tuning: Tuning) -> Self {
        let mut state = Self::new(seed, high_score, tuning);
        state.first_game = false;
        state.phase = GamePhase::ReadyToStart;
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform position inside the playfield bounds
    pub fn random_position(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(0.0..=PLAYFIELD_MAX),
            self.rng.random_range(0.0..=PLAYFIELD_MAX),
        )
    }

    /// Add one target and its obstacle at random positions
    pub fn spawn_pair(&mut self) -> (u32, u32) {
        let target_id = self.next_entity_id();
        let pos = self.random_position();
        self.targets.push(Target { id: target_id, pos });

        let obstacle_id = self.next_entity_id();
        let pos = self.random_position();
        self.obstacles.push(Obstacle {
            id: obstacle_id,
            pos,
        });
        // Appearing under a resting pointer is free; contact counts on re-entry
        let radius = self.tuning.lock_radius;
        if self.obstacle_contact.is_none() && self.pointer.is_some_and(|p| p.distance(pos) < radius)
        {
            self.obstacle_contact = Some(obstacle_id);
        }

        (target_id, obstacle_id)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Whether the pause control is enabled
    pub fn can_pause(&self) -> bool {
        self.lives > 0 && matches!(self.phase, GamePhase::Active | GamePhase::Paused)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {} -> {}", from.as_str(), to.as_str());
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// `tutorial -> readyToStart` ("Got it")
    pub fn acknowledge_tutorial(&mut self) {
        if self.phase == GamePhase::Tutorial {
            self.set_phase(GamePhase::ReadyToStart);
        } else {
            log::debug!("Ignoring tutorial acknowledgement in {}", self.phase.as_str());
        }
    }

    /// `readyToStart -> active` ("Start"): resets lives, score and entities
    pub fn start_game(&mut self) {
        if self.phase != GamePhase::ReadyToStart {
            log::debug!("Ignoring start in {}", self.phase.as_str());
            return;
        }
        self.first_game = false;
        self.lives = self.tuning.starting_lives;
        self.score = 0;
        self.last_hit_ms = None;
        self.targets.clear();
        self.obstacles.clear();
        self.cancel_timers();
        self.spawn_pair();
        self.set_phase(GamePhase::Active);
    }

    /// `active <-> paused`, only while lives remain
    pub fn toggle_pause(&mut self) {
        if !self.can_pause() {
            log::debug!("Pause control disabled in {}", self.phase.as_str());
            return;
        }
        match self.phase {
            GamePhase::Active => {
                self.cancel_timers();
                self.set_phase(GamePhase::Paused);
            }
            GamePhase::Paused => self.set_phase(GamePhase::Active),
            _ => {}
        }
    }

    /// Lose one life while active; the last one ends the game
    pub fn lose_life(&mut self) {
        if self.phase != GamePhase::Active || self.lives == 0 {
            return;
        }
        self.lives -= 1;
        log::info!("Life lost, {} remaining", self.lives);
        self.events.push(GameEvent::LifeLost {
            remaining: self.lives,
        });
        if self.lives == 0 {
            self.cancel_timers();
            self.set_phase(GamePhase::GameOver);
        }
    }

    /// Point at a different preset; takes effect on the next hit
    pub fn select_weapon(&mut self, weapon: Weapon) {
        if self.weapon != weapon {
            log::debug!("Weapon {} -> {}", self.weapon.as_str(), weapon.as_str());
            self.weapon = weapon;
        }
    }

    /// Drop the dwell lock and restart the direction interval
    pub fn cancel_timers(&mut self) {
        self.lock = None;
        self.lock_spent = None;
        self.obstacle_contact = None;
        self.direction_timer_ms = self.tuning.direction_interval_ms;
        self.release_lock();
    }

    pub(crate) fn release_lock(&mut self) {
        if self.is_locked {
            self.is_locked = false;
            self.events.push(GameEvent::LockReleased);
        }
    }
}
