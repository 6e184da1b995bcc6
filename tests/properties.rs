//! Property tests for the race simulation.
//!
//! Random sequences of control states and frame deltas are fed through
//! `sim::tick`, and the session invariants are checked after every step.

use diamond_street::consts::*;
use diamond_street::sim::{GameEvent, GamePhase, GameState, tick};
use diamond_street::{ControlState, Settings, discount_for};
use proptest::prelude::*;

/// One host frame: which keys are held and how long the frame lasted
#[derive(Debug, Clone)]
struct Step {
    controls: ControlState,
    dt: f32,
}

fn controls_strategy() -> impl Strategy<Value = ControlState> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left, right, up, down)| ControlState {
            left,
            right,
            up,
            down,
        },
    )
}

fn step_strategy() -> impl Strategy<Value = Step> {
    // Whole milliseconds up to 200; zero-length frames included
    (controls_strategy(), 0u32..=200).prop_map(|(controls, ms)| Step {
        controls,
        dt: ms as f32 / 1000.0,
    })
}

/// Default race, or one slow enough that the budget runs out first
fn session(slow: bool) -> GameState {
    let settings = if slow {
        Settings {
            progress_rate: 40.0,
            ..Default::default()
        }
    } else {
        Settings::default()
    };
    let mut state = GameState::new(settings);
    state.start();
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn player_never_leaves_the_field(
        slow in any::<bool>(),
        steps in prop::collection::vec(step_strategy(), 1..400),
    ) {
        let mut state = session(slow);
        let max_x = FIELD_WIDTH - PLAYER_WIDTH;
        let max_y = FIELD_HEIGHT - PLAYER_HEIGHT;
        for step in &steps {
            tick(&mut state, &step.controls, step.dt);
            let pos = state.player().pos;
            prop_assert!((0.0..=max_x).contains(&pos.x), "x = {}", pos.x);
            prop_assert!((0.0..=max_y).contains(&pos.y), "y = {}", pos.y);
        }
    }

    #[test]
    fn progress_is_monotonic_and_frozen_when_over(
        slow in any::<bool>(),
        steps in prop::collection::vec(step_strategy(), 1..600),
    ) {
        let mut state = session(slow);
        for step in &steps {
            let was_over = state.phase() == GamePhase::Over;
            let (distance, elapsed) = (state.distance(), state.elapsed_time());

            tick(&mut state, &step.controls, step.dt);

            prop_assert!(state.distance() >= distance);
            prop_assert!(state.elapsed_time() >= elapsed);
            prop_assert!(state.distance() <= TOTAL_DISTANCE);
            prop_assert!(state.elapsed_time() <= TOTAL_TIME);
            if was_over {
                prop_assert_eq!(state.distance(), distance);
                prop_assert_eq!(state.elapsed_time(), elapsed);
            }
        }
    }

    #[test]
    fn passes_latch_and_count_matches_flags(
        steps in prop::collection::vec(step_strategy(), 1..400),
    ) {
        let mut state = session(true);
        let mut latched = vec![false; COMPETITOR_COUNT];
        for step in &steps {
            let events = tick(&mut state, &step.controls, step.dt);
            for (i, competitor) in state.competitors().iter().enumerate() {
                prop_assert!(!latched[i] || competitor.passed, "{} un-passed", competitor.id);
                latched[i] = competitor.passed;
            }
            let flagged = state.competitors().iter().filter(|c| c.passed).count();
            prop_assert_eq!(state.competitors_passed(), flagged);

            // Each pass is announced exactly once
            let announced = events
                .iter()
                .filter(|e| matches!(e, GameEvent::CompetitorPassed { .. }))
                .count();
            prop_assert!(announced <= COMPETITOR_COUNT);
        }
    }

    #[test]
    fn discount_follows_policy(passed in 0usize..=COMPETITOR_COUNT) {
        let discount = discount_for(passed);
        prop_assert_eq!(discount, (passed as u8 * 10).min(50));
        prop_assert!(discount <= MAX_DISCOUNT);
    }

    #[test]
    fn session_ends_exactly_once(
        slow in any::<bool>(),
        steps in prop::collection::vec(step_strategy(), 1..800),
    ) {
        let mut state = session(slow);
        let mut finished = Vec::new();
        let mut passed_events = 0;
        for step in &steps {
            let was_over = state.phase() == GamePhase::Over;
            let events = tick(&mut state, &step.controls, step.dt);
            if was_over {
                prop_assert!(events.is_empty());
            }
            for event in events {
                match event {
                    GameEvent::Finished(outcome) => finished.push(outcome),
                    GameEvent::CompetitorPassed { .. } => passed_events += 1,
                    GameEvent::Collision { .. } => {}
                }
            }
        }
        prop_assert!(finished.len() <= 1);
        prop_assert_eq!(passed_events, state.competitors_passed());
        match state.phase() {
            GamePhase::Over => {
                prop_assert_eq!(finished.len(), 1);
                prop_assert_eq!(state.outcome(), Some(finished[0]));
            }
            _ => prop_assert!(finished.is_empty() && state.outcome().is_none()),
        }
    }
}
