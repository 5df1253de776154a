use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;
use crate::session::TestDuration;

/// Most results kept on disk
pub const HISTORY_LIMIT: usize = 10;

/// Outcome of one finished test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub date: String,
    #[serde(rename = "wpm")]
    pub words_per_minute: u32,
    #[serde(rename = "accuracy")]
    pub accuracy_percent: u32,
    #[serde(rename = "duration")]
    pub duration_secs: u64,
}

impl ScoreRecord {
    pub fn new(date: String, metrics: &Metrics, duration: TestDuration) -> Self {
        Self {
            date,
            words_per_minute: metrics.wpm,
            accuracy_percent: metrics.accuracy.min(100),
            duration_secs: duration.secs(),
        }
    }
}

/// Past results, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<ScoreRecord>,
}

impl History {
    /// Build from stored records, dropping anything past the limit.
    pub fn from_records(mut records: Vec<ScoreRecord>) -> Self {
        records.truncate(HISTORY_LIMIT);
        Self { records }
    }

    /// Put `record` at the front, evicting the oldest entry when full.
    pub fn push(&mut self, record: ScoreRecord) {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_LIMIT);
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }
}
