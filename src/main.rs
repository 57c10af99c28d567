//! Reticle entry point
//!
//! Browser builds wire DOM pointer/keyboard events into the fixed-step loop.
//! Native builds are a headless runner: the autopilot plays a seeded session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlElement, KeyboardEvent, MouseEvent, PointerEvent};

    use reticle::consts::SIM_DT;
    use reticle::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use reticle::sim::{GamePhase, TickInput, Weapon};
    use reticle::{Arcade, PlayfieldRect, Settings, Tuning};

    type Store = Box<dyn KeyValueStore>;

    /// Game instance holding all state
    struct Game {
        arcade: Arcade<Store>,
        input: TickInput,
        playfield: HtmlElement,
        /// Entity element ids currently in the DOM
        shown: Vec<String>,
        last_time: f64,
    }

    impl Game {
        /// Map a client-space point into the playfield's percent space
        fn to_playfield(&self, client_x: i32, client_y: i32) -> glam::Vec2 {
            let r = self.playfield.get_bounding_client_rect();
            PlayfieldRect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
                .to_playfield(client_x as f32, client_y as f32)
        }

        fn update(&mut self, dt: f32) {
            self.arcade.advance(dt, &mut self.input);
        }

        /// Push state into the DOM: HUD text, phase class, crosshair, entities
        fn render(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.arcade.state;

            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            set_text("hud-score", &state.score.to_string());
            set_text("hud-high-score", &self.arcade.high_score().to_string());
            set_text("hud-lives", &state.lives.to_string());
            set_text("hud-weapon", state.weapon.as_str());

            let _ = self
                .playfield
                .set_attribute("data-phase", state.phase.as_str());
            let _ = self
                .playfield
                .set_attribute("data-direction", state.direction.as_str());

            if let Some(btn) = document.get_element_by_id("pause-btn") {
                if state.can_pause() {
                    let _ = btn.remove_attribute("disabled");
                } else {
                    let _ = btn.set_attribute("disabled", "");
                }
            }

            let crosshair = self.arcade.crosshair();
            if let Some(el) = document
                .get_element_by_id("crosshair")
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            {
                let style = el.style();
                match crosshair.position {
                    Some(p) => {
                        let _ = style.set_property("display", "block");
                        let _ = style.set_property("left", &format!("{}%", p.x));
                        let _ = style.set_property("top", &format!("{}%", p.y));
                    }
                    None => {
                        let _ = style.set_property("display", "none");
                    }
                }
                let _ = style.set_property("color", &crosshair.color);
            }

            let entities: Vec<(String, &str, glam::Vec2)> = state
                .targets
                .iter()
                .map(|t| (format!("target-{}", t.id), "target", t.pos))
                .chain(
                    state
                        .obstacles
                        .iter()
                        .map(|o| (format!("obstacle-{}", o.id), "obstacle", o.pos)),
                )
                .collect();

            // Drop elements for entities that no longer exist (new game)
            for stale in self.shown.iter().filter(|id| !entities.iter().any(|(e, _, _)| e == *id)) {
                if let Some(el) = document.get_element_by_id(stale) {
                    el.remove();
                }
            }
            self.shown = entities.iter().map(|(id, _, _)| id.clone()).collect();

            for (id, class, pos) in &entities {
                let el = match document.get_element_by_id(id) {
                    Some(el) => el,
                    None => {
                        let Ok(el) = document.create_element("div") else {
                            continue;
                        };
                        el.set_id(id);
                        el.set_class_name(class);
                        if self.playfield.append_child(&el).is_err() {
                            continue;
                        }
                        el
                    }
                };
                if let Ok(el) = el.dyn_into::<HtmlElement>() {
                    let _ = el.style().set_property("left", &format!("{}%", pos.x));
                    let _ = el.style().set_property("top", &format!("{}%", pos.y));
                }
            }
        }
    }

    fn open_store() -> Store {
        match LocalStore::open() {
            Some(store) => Box::new(store),
            None => {
                log::warn!("LocalStorage unavailable - high score will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }
        log::info!("Reticle starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(playfield) = document
            .get_element_by_id("playfield")
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            log::error!("No #playfield element");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            arcade: Arcade::new(seed, open_store(), Tuning::default(), Settings::default()),
            input: TickInput::default(),
            playfield,
            shown: Vec::new(),
            last_time: 0.0,
        }));

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        request_animation_frame(game);
        log::info!("Reticle running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let playfield = game.borrow().playfield.clone();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_playfield(event.client_x(), event.client_y());
                g.input.pointer = Some(pos);
                g.input.pointer_left = false;
            });
            let _ = playfield
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer = None;
                g.input.pointer_left = true;
            });
            let _ = playfield
                .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_playfield(event.client_x(), event.client_y());
                g.input.pointer = Some(pos);
                g.input.click = Some(pos);
            });
            let _ = playfield
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            let phase = g.arcade.state.phase;
            match event.key().as_str() {
                "Enter" | " " => match phase {
                    GamePhase::Tutorial => g.input.acknowledge = true,
                    GamePhase::ReadyToStart => g.input.start = true,
                    _ => {}
                },
                "p" | "P" | "Escape" => g.input.pause = true,
                "1" => g.input.weapon = Some(Weapon::Default),
                "2" => g.input.weapon = Some(Weapon::Laser),
                "3" => g.input.weapon = Some(Weapon::Lightning),
                "4" => g.input.weapon = Some(Weapon::Shotgun),
                _ => {}
            }
        });
        if let Some(window) = web_sys::window() {
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let bind = |id: &str, action: fn(&mut TickInput)| {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    action(&mut game.borrow_mut().input);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        };

        bind("got-it-btn", |input| input.acknowledge = true);
        bind("start-btn", |input| input.start = true);
        bind("pause-btn", |input| input.pause = true);
        for weapon in Weapon::ALL {
            if let Some(btn) = document.get_element_by_id(&format!("weapon-{}", weapon.as_str())) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().input.weapon = Some(weapon);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow};
    use clap::{Parser, Subcommand};
    use serde::Serialize;

    use reticle::autopilot::Autopilot;
    use reticle::consts::SIM_DT;
    use reticle::persistence::{FileStore, KeyValueStore, MemoryStore};
    use reticle::sim::{GameEvent, GamePhase, HitSource};
    use reticle::{Arcade, HighScore, Settings, Tuning};

    #[derive(Parser)]
    #[command(name = "reticle")]
    #[command(about = "Headless runner for the Reticle lock-on arcade engine")]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Let the autopilot play one seeded session
        Play {
            /// Run seed
            #[arg(long, default_value_t = 1)]
            seed: u64,
            /// Simulated seconds to run for (stops early on game over)
            #[arg(long, default_value_t = 60.0)]
            seconds: f32,
            /// Directory holding the persisted high score
            #[arg(long)]
            store: Option<PathBuf>,
            /// Tuning overrides (JSON)
            #[arg(long)]
            tuning: Option<PathBuf>,
            /// Print the summary as JSON
            #[arg(long)]
            json: bool,
        },
        /// Print the persisted high score
        HighScore {
            #[arg(long)]
            store: PathBuf,
        },
    }

    #[derive(Debug, Default, Serialize)]
    struct Summary {
        seed: u64,
        ticks: u64,
        phase: &'static str,
        score: u64,
        high_score: u64,
        lives: u8,
        click_hits: u32,
        dwell_hits: u32,
        direction_changes: u32,
        spawned_pair: bool,
        cues_played: u64,
    }

    fn play<S: KeyValueStore>(seed: u64, seconds: f32, store: S, tuning: Tuning) -> Summary {
        let mut arcade = Arcade::new(seed, store, tuning, Settings::default());
        let mut pilot = Autopilot::default();
        let mut summary = Summary {
            seed,
            ..Default::default()
        };

        let steps = (seconds.max(0.0) / SIM_DT).round() as u64;
        for _ in 0..steps {
            let input = pilot.drive(&arcade.state);
            for event in arcade.tick(&input, SIM_DT) {
                match event {
                    GameEvent::Hit { source, .. } => match source {
                        HitSource::Click => summary.click_hits += 1,
                        HitSource::Dwell => summary.dwell_hits += 1,
                    },
                    GameEvent::DirectionChanged { .. } => summary.direction_changes += 1,
                    GameEvent::Spawned { .. } => summary.spawned_pair = true,
                    _ => {}
                }
            }
            if arcade.state.phase == GamePhase::GameOver {
                break;
            }
        }

        summary.ticks = arcade.state.time_ticks;
        summary.phase = arcade.state.phase.as_str();
        summary.score = arcade.state.score;
        summary.high_score = arcade.high_score();
        summary.lives = arcade.state.lives;
        summary.cues_played = arcade.audio().plays();
        summary
    }

    fn load_tuning(path: Option<PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading tuning {}", path.display()))?;
        Tuning::from_json(&raw).with_context(|| format!("parsing tuning {}", path.display()))
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        match cli.command {
            Command::Play {
                seed,
                seconds,
                store,
                tuning,
                json,
            } => {
                if !seconds.is_finite() {
                    return Err(anyhow!("--seconds must be finite"));
                }
                let tuning = load_tuning(tuning)?;
                let summary = match store {
                    Some(dir) => {
                        let store = FileStore::open(&dir)
                            .with_context(|| format!("opening store {}", dir.display()))?;
                        play(seed, seconds, store, tuning)
                    }
                    None => play(seed, seconds, MemoryStore::new(), tuning),
                };

                if json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    println!("=== SESSION ===");
                    println!("  Seed:        {}", summary.seed);
                    println!("  Ticks:       {}", summary.ticks);
                    println!("  Phase:       {}", summary.phase);
                    println!("  Score:       {}", summary.score);
                    println!("  High score:  {}", summary.high_score);
                    println!("  Lives:       {}", summary.lives);
                    println!(
                        "  Hits:        {} click / {} dwell",
                        summary.click_hits, summary.dwell_hits
                    );
                    println!("  Directions:  {}", summary.direction_changes);
                    println!("  Second pair: {}", summary.spawned_pair);
                }
            }
            Command::HighScore { store } => {
                let store = FileStore::open(&store)
                    .with_context(|| format!("opening store {}", store.display()))?;
                println!("{}", HighScore::load(store).best());
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    headless::run()
}
