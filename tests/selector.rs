//! Native tests for the selection core, driven by a fake clock.
//!
//! Every test passes explicit timestamps into the state machine, so runs
//! complete in microseconds regardless of their nominal 10-15s duration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use random_picker::{
    defaults, CandidateState, Selector, SelectorConfig, StartError, Tick,
};

/// Simulated frame interval. Deliberately not a divisor of the delay bounds
/// so switch instants fall between frames, as they do in a real browser.
const FRAME_MS: f64 = 16.0;

struct CompletedRun {
    winner: usize,
    duration_ms: f64,
    /// Active index after every switch, starting with the initial draw.
    sequence: Vec<usize>,
    /// (time, applied delay) recorded at each switch event.
    switches: Vec<(f64, f64)>,
}

/// Drive a freshly started run to commit, recording every switch.
fn drive_to_commit(config: SelectorConfig, rng: &mut StdRng) -> CompletedRun {
    let mut selector = Selector::default();
    let info = selector
        .start(config, 0.0, rng)
        .expect("idle selector accepts a start");

    let mut now = 0.0;
    let mut sequence = vec![info.initial_index];
    let mut switches = Vec::new();

    loop {
        now += FRAME_MS;
        match selector.step(now, rng).expect("run is active") {
            Tick::Continue { switched: Some(i) } => {
                let delay = selector
                    .run()
                    .expect("still running")
                    .current_delay_ms();
                sequence.push(i);
                switches.push((now, delay));
            }
            Tick::Continue { switched: None } => {}
            Tick::Commit { winner } => {
                assert!(!selector.is_running(), "commit leaves the running state");
                return CompletedRun {
                    winner,
                    duration_ms: info.duration_ms,
                    sequence,
                    switches,
                };
            }
        }
    }
}

#[test]
fn duration_is_drawn_from_the_specified_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let mut selector = Selector::default();
        let info = selector
            .start(SelectorConfig::digits(), 0.0, &mut rng)
            .unwrap();
        assert!(info.duration_ms >= defaults::MIN_DURATION_MS);
        assert!(info.duration_ms < defaults::MAX_DURATION_MS);
    }
}

#[test]
fn card_mode_strictly_alternates() {
    let mut rng = StdRng::seed_from_u64(11);
    let run = drive_to_commit(SelectorConfig::cards(), &mut rng);

    assert!(run.sequence.len() > 2, "a 10s run switches more than once");
    for pair in run.sequence.windows(2) {
        assert_eq!(pair[1], (pair[0] + 1) % 2, "forced toggle between cards");
    }
    assert!(run.winner < 2);
}

#[test]
fn digit_mode_never_repeats_consecutively() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let run = drive_to_commit(SelectorConfig::digits(), &mut rng);

        for pair in run.sequence.windows(2) {
            assert_ne!(pair[0], pair[1], "every switch changes the digit");
        }
        assert!(run.winner < 10, "committed value is a single digit");
    }
}

#[test]
fn applied_delays_stay_within_bounds_and_never_shrink() {
    for (seed, config) in [(3, SelectorConfig::cards()), (4, SelectorConfig::digits())] {
        let mut rng = StdRng::seed_from_u64(seed);
        let run = drive_to_commit(config, &mut rng);

        let mut previous = config.min_delay_ms;
        for &(_, delay) in &run.switches {
            assert!(delay >= config.min_delay_ms);
            assert!(delay <= config.max_delay_ms);
            assert!(delay >= previous, "cubic easing only grows the delay");
            previous = delay;
        }
    }
}

#[test]
fn first_switch_waits_the_minimum_delay() {
    // The delay applied at each switch is the one computed at the previous
    // switch, so the opening wait is exactly min_delay regardless of how
    // far the easing curve has progressed by then.
    let config = SelectorConfig::cards();
    let mut rng = StdRng::seed_from_u64(23);
    let run = drive_to_commit(config, &mut rng);

    let (first_switch_time, _) = run.switches[0];
    assert!(first_switch_time >= config.min_delay_ms);
    assert!(first_switch_time < config.min_delay_ms + FRAME_MS);
}

#[test]
fn start_while_running_is_rejected_and_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(41);
    let mut selector = Selector::default();
    selector
        .start(SelectorConfig::digits(), 0.0, &mut rng)
        .unwrap();

    // Advance a little so the run has real state to disturb.
    for frame in 1..=10 {
        let _ = selector.step(frame as f64 * FRAME_MS, &mut rng);
    }
    let before = selector.run().unwrap().clone();

    let rejected = selector.start(SelectorConfig::cards(), 200.0, &mut rng);
    assert_eq!(rejected, Err(StartError::RunInProgress));
    assert_eq!(selector.run(), Some(&before), "rejected start is a no-op");

    // Only the original run commits, and it honors the original config.
    let mut now = 10.0 * FRAME_MS;
    let winner = loop {
        now += FRAME_MS;
        if let Some(Tick::Commit { winner }) = selector.step(now, &mut rng) {
            break winner;
        }
    };
    assert!(winner < 10);
    assert_eq!(selector.step(now + FRAME_MS, &mut rng), None);
}

#[test]
fn commit_marks_exactly_one_winner() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut selector = Selector::default();
    selector
        .start(SelectorConfig::digits(), 0.0, &mut rng)
        .unwrap();

    let mut now = 0.0;
    while selector.is_running() {
        now += FRAME_MS;
        let _ = selector.step(now, &mut rng);
    }

    let states = selector.candidate_states();
    assert_eq!(states.len(), 10);
    let winners = states
        .iter()
        .filter(|s| **s == CandidateState::Winner)
        .count();
    let losers = states
        .iter()
        .filter(|s| **s == CandidateState::Loser)
        .count();
    assert_eq!(winners, 1);
    assert_eq!(losers, 9);

    let outcome = selector.outcome().unwrap();
    assert_eq!(states[outcome.winner], CandidateState::Winner);
}

#[test]
fn new_start_is_accepted_after_commit() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut selector = Selector::default();
    let first = selector
        .start(SelectorConfig::cards(), 0.0, &mut rng)
        .unwrap();

    // No tick fires until well past the whole duration; the run still
    // commits on the next step because it is clock-driven, not tick-driven.
    let late = first.duration_ms + 5_000.0;
    match selector.step(late, &mut rng) {
        Some(Tick::Commit { winner }) => assert!(winner < 2),
        other => panic!("expected immediate commit, got {other:?}"),
    }

    let again = selector.start(SelectorConfig::cards(), late + 1.0, &mut rng);
    assert!(again.is_ok(), "committed selector accepts a new start");
}

#[test]
fn running_state_highlights_only_the_active_candidate() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut selector = Selector::default();
    let info = selector
        .start(SelectorConfig::cards(), 0.0, &mut rng)
        .unwrap();

    let states = selector.candidate_states();
    assert_eq!(states.len(), 2);
    assert_eq!(states[info.initial_index], CandidateState::Highlighted);
    let highlighted = states
        .iter()
        .filter(|s| **s == CandidateState::Highlighted)
        .count();
    assert_eq!(highlighted, 1);
}

#[test]
fn idle_selector_has_nothing_to_step() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut selector = Selector::default();
    assert_eq!(selector.step(100.0, &mut rng), None);
    assert!(selector.candidate_states().is_empty());
    assert_eq!(selector.outcome(), None);
}

#[test]
fn digit_winners_are_roughly_uniform() {
    // 2000 runs, expected 200 per digit; [120, 300] is ~6 sigma, so this
    // only trips on a genuinely skewed selection.
    let mut counts = [0usize; 10];
    for seed in 0..2_000 {
        let mut rng = StdRng::seed_from_u64(seed);
        let run = drive_to_commit(SelectorConfig::digits(), &mut rng);
        counts[run.winner] += 1;
    }

    for (digit, &count) in counts.iter().enumerate() {
        assert!(
            (120..=300).contains(&count),
            "digit {digit} won {count} of 2000 runs"
        );
    }
}

#[test]
fn run_outlives_its_nominal_duration_only_until_the_next_step() {
    let mut rng = StdRng::seed_from_u64(29);
    let run = drive_to_commit(SelectorConfig::cards(), &mut rng);

    // The commit fires on the first frame at or after the drawn duration.
    if let Some(&(last_switch, _)) = run.switches.last() {
        assert!(last_switch < run.duration_ms + FRAME_MS);
    }
    assert!(run.duration_ms >= defaults::MIN_DURATION_MS);
}
