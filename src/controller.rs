use rand::RngCore;

use crate::clock::Clock;
use crate::history::{History, ScoreRecord};
use crate::metrics::Metrics;
use crate::passages::{self, PASSAGES};
use crate::session::{AppState, Session, TestDuration};
use crate::sound::SoundFeedback;
use crate::store::{KeyValueStore, Persistence};
use crate::theme::Theme;

/// Largest growth in input length accepted from one update. A keystroke adds
/// one character; anything bigger is treated as a paste. The value is a
/// heuristic, not a hard limit.
pub const MAX_INPUT_GROWTH: usize = 2;

const TICK_MS: i64 = 1_000;

/// Handle for the one-second countdown of a running session. Ticks are
/// counted from the session's start time so they stay aligned however often
/// the countdown is polled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    fired: u64,
}

impl Countdown {
    /// Whole seconds elapsed between `started_at_ms` and `now_ms` that have
    /// not been fired yet
    fn due(&self, started_at_ms: i64, now_ms: i64) -> u64 {
        let elapsed = ((now_ms - started_at_ms).max(0) / TICK_MS) as u64;
        elapsed.saturating_sub(self.fired)
    }
}

/// Borrowed view of everything the presentation layer needs
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: AppState,
    pub session: Option<&'a Session>,
    pub history: &'a History,
    pub selected: TestDuration,
    pub theme: Theme,
}

/// Owns the typing session state machine.
///
/// Home -> Typing -> Result -> Typing | Home, with History as an overlay
/// that can be opened from anywhere without pausing the countdown.
pub struct Controller<S: KeyValueStore, C: Clock, R: RngCore> {
    phase: AppState,
    history_open: bool,
    selected: TestDuration,
    session: Option<Session>,
    countdown: Option<Countdown>,
    history: History,
    theme: Theme,
    persistence: Persistence<S>,
    clock: C,
    rng: R,
    sound: Box<dyn SoundFeedback>,
}

impl<S: KeyValueStore, C: Clock, R: RngCore> Controller<S, C, R> {
    pub fn new(persistence: Persistence<S>, clock: C, rng: R, sound: Box<dyn SoundFeedback>) -> Self {
        let history = persistence.load_history();
        let theme = persistence.load_theme();
        Self {
            phase: AppState::Home,
            history_open: false,
            selected: TestDuration::default(),
            session: None,
            countdown: None,
            history,
            theme,
            persistence,
            clock,
            rng,
            sound,
        }
    }

    pub fn with_duration(mut self, duration: TestDuration) -> Self {
        self.selected = duration;
        self
    }

    /// Current screen, with History taking precedence while open
    pub fn state(&self) -> AppState {
        if self.history_open {
            AppState::History
        } else {
            self.phase
        }
    }

    /// State underneath the History overlay
    pub fn phase(&self) -> AppState {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn selected_duration(&self) -> TestDuration {
        self.selected
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn timer_active(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state(),
            session: self.session.as_ref(),
            history: &self.history,
            selected: self.selected,
            theme: self.theme,
        }
    }

    /// Start a test with the selected duration and the built-in passages.
    pub fn start(&mut self) {
        self.start_session(self.selected, PASSAGES);
    }

    /// Begin a fresh session, replacing any session and countdown in flight.
    pub fn start_session(&mut self, duration: TestDuration, pool: &[&str]) {
        let passage = passages::pick(pool, &mut self.rng);
        let reference = passages::for_duration(passage, duration);
        let now_ms = self.clock.now_ms();

        log::info!(
            "starting {duration} session ({} chars)",
            reference.chars().count()
        );

        self.selected = duration;
        self.session = Some(Session::new(reference, duration, now_ms));
        self.countdown = Some(Countdown::default());
        self.history_open = false;
        self.phase = AppState::Typing;
    }

    /// Fire any whole-second ticks that are due at the clock's current time.
    pub fn poll_timer(&mut self) {
        let now_ms = self.clock.now_ms();
        while let (Some(countdown), Some(session)) =
            (self.countdown.as_mut(), self.session.as_ref())
        {
            if countdown.due(session.started_at_ms, now_ms) == 0 {
                break;
            }
            countdown.fired += 1;
            self.on_tick();
        }
    }

    /// One second of the countdown has passed.
    pub fn on_tick(&mut self) {
        if self.countdown.is_none() {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.time_left = session.time_left.saturating_sub(1);
        if session.time_left == 0 {
            self.end_session();
        }
    }

    /// Replace the typed input with `new_value`. Returns false when the
    /// update was rejected. Due countdown ticks are applied first, so input
    /// arriving after the deadline ends the session instead.
    pub fn on_input(&mut self, new_value: &str) -> bool {
        // a session that ran out of time must not accept late keystrokes
        self.poll_timer();
        if self.state() != AppState::Typing {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let new_len = new_value.chars().count();
        if new_len.saturating_sub(session.typed_len()) > MAX_INPUT_GROWTH {
            log::debug!(
                "rejected bulk input of {} chars",
                new_len - session.typed_len()
            );
            return false;
        }
        if new_len > session.reference_len() {
            return false;
        }

        if let Some(last) = new_value.chars().last() {
            if let Some(expected) = session.expected_at(new_len - 1) {
                let correct = last == expected;
                if !correct {
                    session.errors += 1;
                }
                self.sound.keystroke(correct);
            }
        }

        session.set_typed(new_value.to_string(), new_len);

        if session.is_complete() {
            self.end_session();
        }
        true
    }

    /// Append one typed character.
    pub fn type_char(&mut self, c: char) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let mut value = session.typed.clone();
        value.push(c);
        self.on_input(&value)
    }

    /// Remove the last typed character.
    pub fn backspace(&mut self) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if session.typed.is_empty() {
            return false;
        }
        let mut value = session.typed.clone();
        value.pop();
        self.on_input(&value)
    }

    /// Finish the running session: stop the countdown, record the score and
    /// move to Result. Does nothing unless a session is being typed.
    pub fn end_session(&mut self) {
        if self.phase != AppState::Typing {
            return;
        }
        self.countdown = None;
        self.phase = AppState::Result;

        let metrics = self.compute_metrics();
        let Some(session) = self.session.as_ref() else {
            return;
        };

        log::info!(
            "session finished: {} wpm, {}% accuracy, {} errors",
            metrics.wpm,
            metrics.accuracy,
            metrics.errors
        );

        let record = ScoreRecord::new(self.clock.date_label(), &metrics, session.duration);
        self.history.push(record);
        if let Err(e) = self.persistence.save_history(&self.history) {
            log::warn!("failed to save score history: {e:#}");
        }
    }

    /// Stop the test before time runs out.
    pub fn end_early(&mut self) {
        self.end_session();
    }

    pub fn compute_metrics(&self) -> Metrics {
        Metrics::compute(self.session.as_ref())
    }

    pub fn toggle_history(&mut self) {
        self.history_open = !self.history_open;
    }

    /// Leave the result screen. Ignored while a test is running.
    pub fn back_home(&mut self) {
        if self.phase == AppState::Typing {
            return;
        }
        self.phase = AppState::Home;
        self.history_open = false;
        self.session = None;
    }

    /// Pick the length of the next test. Ignored while a test is running.
    pub fn select_duration(&mut self, duration: TestDuration) {
        if self.phase != AppState::Typing {
            self.selected = duration;
        }
    }

    pub fn cycle_duration(&mut self, step: i32) {
        self.select_duration(self.selected.cycle(step));
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.persistence.save_theme(theme) {
            log::warn!("failed to save theme: {e:#}");
        }
    }
}
