use glam::Vec2;
use proptest::prelude::*;
use reticle::consts::{PLAYFIELD_MAX, SIM_DT};
use reticle::sim::{GamePhase, GameState, TickInput, Weapon, tick};
use reticle::Tuning;

#[derive(Debug, Clone)]
enum Action {
    Idle,
    Point(f32, f32),
    Click(f32, f32),
    Pause,
    Arm(usize),
    Frame(f32),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => Just(Action::Idle),
        6 => (0.0f32..100.0, 0.0f32..100.0).prop_map(|(x, y)| Action::Point(x, y)),
        4 => (0.0f32..100.0, 0.0f32..100.0).prop_map(|(x, y)| Action::Click(x, y)),
        1 => Just(Action::Pause),
        1 => (0usize..4).prop_map(Action::Arm),
        2 => (0.0f32..0.5).prop_map(Action::Frame),
    ]
}

fn to_input(action: &Action) -> (TickInput, f32) {
    let mut input = TickInput::default();
    let mut dt = SIM_DT;
    match *action {
        Action::Idle => {}
        Action::Point(x, y) => input.pointer = Some(Vec2::new(x, y)),
        Action::Click(x, y) => {
            input.pointer = Some(Vec2::new(x, y));
            input.click = Some(Vec2::new(x, y));
        }
        Action::Pause => input.pause = true,
        Action::Arm(i) => input.weapon = Some(Weapon::ALL[i]),
        Action::Frame(secs) => dt = secs,
    }
    (input, dt)
}

fn in_bounds(p: Vec2) -> bool {
    (0.0..=PLAYFIELD_MAX).contains(&p.x) && (0.0..=PLAYFIELD_MAX).contains(&p.y)
}

proptest! {
    #[test]
    fn entities_stay_in_bounds(
        seed in any::<u64>(),
        speed in 0.0f32..40.0,
        obstacles_move in any::<bool>(),
        actions in prop::collection::vec(action(), 1..400),
    ) {
        let tuning = Tuning { game_speed: speed, obstacles_move, ..Tuning::default() };
        let mut state = GameState::new_session(seed, 0, tuning);
        state.start_game();
        // Force the second pair early so both entity kinds are covered
        state.score = tuning.spawn_threshold;
        reticle::sim::movement::check_spawn(&mut state);

        for a in &actions {
            let (input, dt) = to_input(a);
            tick(&mut state, &input, dt);
            for t in &state.targets {
                prop_assert!(in_bounds(t.pos), "target out of bounds: {:?}", t.pos);
            }
            for o in &state.obstacles {
                prop_assert!(in_bounds(o.pos), "obstacle out of bounds: {:?}", o.pos);
            }
        }
    }

    #[test]
    fn score_never_decreases(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..400),
    ) {
        let mut state = GameState::new_session(seed, 0, Tuning::default());
        state.start_game();
        let mut last = state.score;
        let mut best = state.high_score;

        for a in &actions {
            let (input, dt) = to_input(a);
            tick(&mut state, &input, dt);
            prop_assert!(state.score >= last);
            last = state.score;
            best = best.max(state.score);
            prop_assert_eq!(state.high_score, best);
            prop_assert!(state.lives <= 5);
            if state.lives == 0 {
                prop_assert_eq!(state.phase, GamePhase::GameOver);
            }
        }
    }
}
