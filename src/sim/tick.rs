//! Simulation tick
//!
//! Advances an Active session by one delta-time step.
//!
//! Race `distance` accrues at a constant rate no matter how the player steers.
//! Passing, on the other hand, is judged purely from the player's vertical
//! position against each competitor's midpoint inside the fixed field. The two
//! are loose proxies for the same race and are kept independent on purpose.

use super::state::{GameEvent, GamePhase, GameState, Outcome};
use crate::controls::ControlState;

/// Advance the session by `dt` seconds using the current controls
pub fn tick(state: &mut GameState, controls: &ControlState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Active || !dt.is_finite() || dt <= 0.0 {
        return events;
    }

    state.time_ticks += 1;
    state.elapsed_time = (state.elapsed_time + dt).min(state.settings.total_time);

    // Steering: each pressed axis contributes speed * dt, diagonals stack
    let move_speed = state.player.speed * dt;
    state.player.pos += controls.axis() * move_speed;
    let field = state.field();
    state.player.clamp_to(field);

    // Progress
    let total_distance = state.settings.total_distance;
    state.distance = (state.distance + state.settings.progress_rate * dt).min(total_distance);

    // Passing: every competitor is judged on its own, the latch never reopens
    let player_top = state.player.pos.y;
    for competitor in state.competitors.iter_mut() {
        if !competitor.passed && player_top < competitor.pass_line() {
            competitor.passed = true;
            log::debug!("Passed {}", competitor.id);
            events.push(GameEvent::CompetitorPassed {
                id: competitor.id.clone(),
            });
        }
    }

    // Collision is a signal only
    state.collision = false;
    for competitor in state.competitors.iter().filter(|c| !c.passed) {
        if state.player.overlaps(competitor) {
            state.collision = true;
            log::debug!("Collision with {}", competitor.id);
            events.push(GameEvent::Collision {
                id: competitor.id.clone(),
            });
        }
    }

    // Termination: the clock is checked first so only one outcome is claimed
    if state.elapsed_time >= state.settings.total_time {
        finish(state, Outcome::TimedOut, &mut events);
    } else if state.distance >= total_distance {
        state.distance = total_distance;
        state.destination.passed = true;
        finish(state, Outcome::Arrived, &mut events);
    }

    events
}

fn finish(state: &mut GameState, outcome: Outcome, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Over;
    state.outcome = Some(outcome);
    log::info!(
        "Race over ({:?}) after {:.1}s, distance {:.0}, {} competitors passed",
        outcome,
        state.elapsed_time,
        state.distance,
        state.competitors_passed()
    );
    events.push(GameEvent::Finished(outcome));
}
