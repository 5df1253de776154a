//! Pure description of what each screen shows.
//!
//! [`render`] turns controller state plus metrics into a [`View`] that the
//! terminal widget in `ui` draws. Nothing here touches the terminal, so
//! screens can be checked without a UI harness.

use crate::controller::Snapshot;
use crate::history::ScoreRecord;
use crate::metrics::Metrics;
use crate::session::{AppState, Session, TestDuration};
use crate::theme::Theme;

/// Highlight class of one reference character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Unvisited,
    Cursor,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCell {
    pub ch: char,
    pub class: CharClass,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Home {
        selected: TestDuration,
        durations: [TestDuration; 3],
    },
    Typing {
        cells: Vec<CharCell>,
        time_left: u64,
        wpm: u32,
        accuracy: u32,
        progress: f64,
    },
    Result {
        wpm: u32,
        accuracy: u32,
        errors: u32,
    },
    History {
        records: Vec<ScoreRecord>,
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub theme: Theme,
    pub history_open: bool,
    pub body: Body,
}

pub fn render(snapshot: &Snapshot<'_>, metrics: &Metrics) -> View {
    let body = match (snapshot.state, snapshot.session) {
        (AppState::History, _) => Body::History {
            records: snapshot.history.records().to_vec(),
        },
        (AppState::Typing, Some(session)) => Body::Typing {
            cells: classify(session),
            time_left: session.time_left,
            wpm: metrics.wpm,
            accuracy: metrics.accuracy,
            progress: session.progress(),
        },
        (AppState::Result, Some(_)) => Body::Result {
            wpm: metrics.wpm,
            accuracy: metrics.accuracy,
            errors: metrics.errors,
        },
        _ => Body::Home {
            selected: snapshot.selected,
            durations: TestDuration::ALL,
        },
    };

    View {
        theme: snapshot.theme,
        history_open: snapshot.state == AppState::History,
        body,
    }
}

/// Classify every reference character against the typed input
pub fn classify(session: &Session) -> Vec<CharCell> {
    let mut typed = session.typed.chars();
    let cursor = session.typed_len();

    session
        .reference
        .chars()
        .enumerate()
        .map(|(idx, ch)| {
            let class = match typed.next() {
                Some(t) if t == ch => CharClass::Correct,
                Some(_) => CharClass::Incorrect,
                None if idx == cursor => CharClass::Cursor,
                None => CharClass::Unvisited,
            };
            CharCell { ch, class }
        })
        .collect()
}
