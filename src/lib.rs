use std::fmt;

use rand::Rng;

/// Default animation parameters
pub mod defaults {
    /// Lower bound (inclusive) of the randomized run duration.
    pub const MIN_DURATION_MS: f64 = 10_000.0;
    /// Upper bound (exclusive) of the randomized run duration.
    pub const MAX_DURATION_MS: f64 = 15_000.0;

    pub const CARD_COUNT: usize = 2;
    pub const CARD_MIN_DELAY_MS: f64 = 500.0;
    pub const CARD_MAX_DELAY_MS: f64 = 1_500.0;

    pub const DIGIT_COUNT: usize = 10;
    pub const DIGIT_MIN_DELAY_MS: f64 = 50.0;
    pub const DIGIT_MAX_DELAY_MS: f64 = 600.0;
}

/// Display state of a single candidate, mapped to visuals by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateState {
    Idle,
    Highlighted,
    Winner,
    Loser,
}

/// How the next active candidate is chosen at a switch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchRule {
    /// Deterministically toggle to the other candidate (two-candidate mode).
    Alternate,
    /// Uniform random candidate, resampled until it differs from the
    /// current one so every switch visibly changes the display.
    RandomDistinct,
}

/// Parameters of one selection animation; fixed for the run's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    pub candidate_count: usize,
    pub min_delay_ms: f64,
    pub max_delay_ms: f64,
    pub switch_rule: SwitchRule,
}

impl SelectorConfig {
    /// Two-candidate (left/right) mode: slow flicker, forced alternation.
    pub fn cards() -> Self {
        Self {
            candidate_count: defaults::CARD_COUNT,
            min_delay_ms: defaults::CARD_MIN_DELAY_MS,
            max_delay_ms: defaults::CARD_MAX_DELAY_MS,
            switch_rule: SwitchRule::Alternate,
        }
    }

    /// Ten-candidate (digit) mode: fast flicker, random distinct digits.
    pub fn digits() -> Self {
        Self {
            candidate_count: defaults::DIGIT_COUNT,
            min_delay_ms: defaults::DIGIT_MIN_DELAY_MS,
            max_delay_ms: defaults::DIGIT_MAX_DELAY_MS,
            switch_rule: SwitchRule::RandomDistinct,
        }
    }
}

// Error type for start requests rejected by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    /// A run is already animating; the request is dropped, never queued.
    RunInProgress,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::RunInProgress => {
                write!(f, "a selection run is already in progress")
            }
        }
    }
}

impl std::error::Error for StartError {}

/// What a single step of the animation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The run continues; a switch may have fired on this frame.
    Continue { switched: Option<usize> },
    /// The duration elapsed; the run is committed to this winner.
    Commit { winner: usize },
}

/// Snapshot handed back by [`Selector::start`] so the caller can emit the
/// initial highlight and log the planned duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunInfo {
    pub initial_index: usize,
    pub duration_ms: f64,
}

/// Committed terminal state of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: usize,
    pub candidate_count: usize,
}

/// Cubic ease-in: delay grows slowly at first and accelerates near the end,
/// producing the "spinning to a stop" cadence.
#[inline]
pub(crate) fn ease_in_cubic(progress: f64) -> f64 {
    progress * progress * progress
}

/// One execution of the selection animation.
///
/// The run owns no clock and emits no side effects: the host passes a
/// monotonic `now` (milliseconds) into [`SelectionRun::step`] on every frame
/// and reacts to the returned [`Tick`]. The algorithm is therefore
/// frame-rate independent and testable with plain numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRun {
    config: SelectorConfig,
    start_time: f64,
    duration: f64,
    active_index: usize,
    last_switch_time: f64,
    current_delay: f64,
}

impl SelectionRun {
    /// Draw the duration and initial candidate and start the clock at `now`.
    pub fn new(config: SelectorConfig, now: f64, rng: &mut impl Rng) -> Self {
        let duration = rng.random_range(defaults::MIN_DURATION_MS..defaults::MAX_DURATION_MS);
        let active_index = rng.random_range(0..config.candidate_count);

        Self {
            config,
            start_time: now,
            duration,
            active_index,
            last_switch_time: now,
            current_delay: config.min_delay_ms,
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// The currently highlighted candidate. Changes only at switch events.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Planned duration of this run in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration
    }

    /// Delay that must elapse before the next switch fires.
    pub fn current_delay_ms(&self) -> f64 {
        self.current_delay
    }

    /// Fraction of the duration elapsed at `now`, clamped to [0, 1].
    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    fn next_index(&self, rng: &mut impl Rng) -> usize {
        match self.config.switch_rule {
            SwitchRule::Alternate => (self.active_index + 1) % self.config.candidate_count,
            SwitchRule::RandomDistinct => loop {
                let candidate = rng.random_range(0..self.config.candidate_count);
                if candidate != self.active_index {
                    break candidate;
                }
            },
        }
    }

    /// Advance the run to wall-clock time `now`.
    ///
    /// The delay computed on the frame a switch fires becomes the wait for
    /// the *next* switch, so delay growth lags one step behind progress.
    /// This reproduces the original cadence: the final switch uses the
    /// second-to-last computed delay rather than jumping to `max_delay_ms`.
    pub fn step(&mut self, now: f64, rng: &mut impl Rng) -> Tick {
        let progress = self.progress(now);
        let ease = ease_in_cubic(progress);
        let target_delay =
            self.config.min_delay_ms + (self.config.max_delay_ms - self.config.min_delay_ms) * ease;

        let mut switched = None;
        if now - self.last_switch_time >= self.current_delay {
            self.active_index = self.next_index(rng);
            switched = Some(self.active_index);
            self.last_switch_time = now;
            self.current_delay = target_delay;
        }

        if progress < 1.0 {
            Tick::Continue { switched }
        } else {
            Tick::Commit {
                winner: self.active_index,
            }
        }
    }
}

/// State machine owning the single in-flight run.
///
/// Replaces a module-level "is animating" flag: start requests are accepted
/// or rejected by matching on the current state, and the machine lives in
/// whatever context the host threads it through.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selector {
    #[default]
    Idle,
    Running(SelectionRun),
    Committed(Outcome),
}

impl Selector {
    /// Begin a new run at `now`, superseding any committed outcome.
    ///
    /// Rejected with [`StartError::RunInProgress`] while a run is animating;
    /// the rejected request has no effect on the active run.
    pub fn start(
        &mut self,
        config: SelectorConfig,
        now: f64,
        rng: &mut impl Rng,
    ) -> Result<RunInfo, StartError> {
        if matches!(self, Selector::Running(_)) {
            return Err(StartError::RunInProgress);
        }

        let run = SelectionRun::new(config, now, rng);
        let info = RunInfo {
            initial_index: run.active_index(),
            duration_ms: run.duration_ms(),
        };
        *self = Selector::Running(run);
        Ok(info)
    }

    /// Advance the active run, transitioning to `Committed` when its
    /// duration has elapsed. Returns `None` when no run is active.
    pub fn step(&mut self, now: f64, rng: &mut impl Rng) -> Option<Tick> {
        let Selector::Running(run) = self else {
            return None;
        };

        let tick = run.step(now, rng);
        if let Tick::Commit { winner } = tick {
            let outcome = Outcome {
                winner,
                candidate_count: run.config().candidate_count,
            };
            *self = Selector::Committed(outcome);
        }
        Some(tick)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Selector::Running(_))
    }

    pub fn run(&self) -> Option<&SelectionRun> {
        match self {
            Selector::Running(run) => Some(run),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Selector::Committed(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Per-candidate display states for the current machine state.
    ///
    /// While running, the active candidate is highlighted and the rest are
    /// idle; after commit, the winner is marked and the rest are losers.
    pub fn candidate_states(&self) -> Vec<CandidateState> {
        match self {
            Selector::Idle => Vec::new(),
            Selector::Running(run) => (0..run.config().candidate_count)
                .map(|i| {
                    if i == run.active_index() {
                        CandidateState::Highlighted
                    } else {
                        CandidateState::Idle
                    }
                })
                .collect(),
            Selector::Committed(outcome) => (0..outcome.candidate_count)
                .map(|i| {
                    if i == outcome.winner {
                        CandidateState::Winner
                    } else {
                        CandidateState::Loser
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_curve_endpoints_and_midpoint() {
        assert_eq!(ease_in_cubic(0.0), 0.0);
        assert_eq!(ease_in_cubic(1.0), 1.0);
        assert!((ease_in_cubic(0.5) - 0.125).abs() < 1e-12);
    }

    #[test]
    fn mode_configs_match_animation_parameters() {
        let cards = SelectorConfig::cards();
        assert_eq!(cards.candidate_count, 2);
        assert_eq!(cards.min_delay_ms, 500.0);
        assert_eq!(cards.max_delay_ms, 1_500.0);
        assert_eq!(cards.switch_rule, SwitchRule::Alternate);

        let digits = SelectorConfig::digits();
        assert_eq!(digits.candidate_count, 10);
        assert_eq!(digits.min_delay_ms, 50.0);
        assert_eq!(digits.max_delay_ms, 600.0);
        assert_eq!(digits.switch_rule, SwitchRule::RandomDistinct);
    }
}
