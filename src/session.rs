use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Screen the controller is on. `History` is an overlay that can sit on top
/// of any of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Typing,
    Result,
    History,
}

/// Allowed test lengths
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub enum TestDuration {
    #[value(name = "30")]
    Thirty,
    #[default]
    #[value(name = "60")]
    Sixty,
    #[value(name = "120")]
    OneTwenty,
}

impl TestDuration {
    pub const ALL: [TestDuration; 3] = [Self::Thirty, Self::Sixty, Self::OneTwenty];

    pub fn secs(self) -> u64 {
        match self {
            Self::Thirty => 30,
            Self::Sixty => 60,
            Self::OneTwenty => 120,
        }
    }

    /// Step through [`TestDuration::ALL`], wrapping at both ends.
    pub fn cycle(self, step: i32) -> Self {
        let len = Self::ALL.len() as i32;
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0) as i32;
        Self::ALL[(idx + step).rem_euclid(len) as usize]
    }
}

impl TryFrom<u64> for TestDuration {
    type Error = String;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        match secs {
            30 => Ok(Self::Thirty),
            60 => Ok(Self::Sixty),
            120 => Ok(Self::OneTwenty),
            other => Err(format!("unsupported test duration: {other}s")),
        }
    }
}

impl From<TestDuration> for u64 {
    fn from(d: TestDuration) -> Self {
        d.secs()
    }
}

impl fmt::Display for TestDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.secs())
    }
}

/// One timed typing attempt
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub reference: String,
    pub typed: String,
    pub errors: u32,
    pub duration: TestDuration,
    pub time_left: u64,
    pub started_at_ms: i64,
    reference_len: usize,
    typed_len: usize,
}

impl Session {
    pub fn new(reference: String, duration: TestDuration, started_at_ms: i64) -> Self {
        let reference_len = reference.chars().count();
        Self {
            reference,
            typed: String::new(),
            errors: 0,
            duration,
            time_left: duration.secs(),
            started_at_ms,
            reference_len,
            typed_len: 0,
        }
    }

    /// Length of the reference text in characters
    pub fn reference_len(&self) -> usize {
        self.reference_len
    }

    /// Length of the typed input in characters
    pub fn typed_len(&self) -> usize {
        self.typed_len
    }

    pub fn expected_at(&self, idx: usize) -> Option<char> {
        self.reference.chars().nth(idx)
    }

    pub(crate) fn set_typed(&mut self, value: String, len: usize) {
        self.typed = value;
        self.typed_len = len;
    }

    pub fn is_complete(&self) -> bool {
        self.typed_len == self.reference_len
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.duration.secs() - self.time_left
    }

    /// Fraction of the countdown used, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        self.elapsed_secs() as f64 / self.duration.secs() as f64
    }
}
