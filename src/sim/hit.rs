//! Hit resolution: score delta, spawn check and high score

use super::movement::check_spawn;
use super::state::{GameEvent, GamePhase, GameState, HitSource};

/// Apply one hit on `target_id` with the current weapon and lock state.
///
/// Returns the score delta, or `None` if the hit was dropped (not active,
/// or inside the weapon cooldown when fire rate is enforced).
pub fn resolve_hit(state: &mut GameState, target_id: u32, source: HitSource) -> Option<u64> {
    if state.phase != GamePhase::Active {
        return None;
    }

    let weapon = state.weapon;
    if state.tuning.enforce_fire_rate {
        if let Some(last) = state.last_hit_ms {
            let since = state.elapsed_ms - last;
            if since < f64::from(weapon.cooldown_ms()) {
                log::debug!(
                    "{} hit dropped: {:.0}ms since last, cooldown {:.0}ms",
                    weapon.as_str(),
                    since,
                    weapon.cooldown_ms()
                );
                return None;
            }
        }
    }

    let locked = state.is_locked;
    let multiplier = if locked { 2 } else { 1 };
    let delta = weapon.preset().damage * multiplier;
    state.score = state.score.saturating_add(delta);
    state.last_hit_ms = Some(state.elapsed_ms);
    log::debug!(
        "Hit target {} ({:?}, {}, locked={}): +{} = {}",
        target_id,
        source,
        weapon.as_str(),
        locked,
        delta,
        state.score
    );
    state.events.push(GameEvent::Hit {
        target_id,
        weapon,
        source,
        locked,
        delta,
        score: state.score,
    });

    check_spawn(state);

    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore { score: state.score });
    }

    Some(delta)
}
