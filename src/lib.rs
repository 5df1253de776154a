// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod controller;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod passages;
pub mod runtime;
pub mod session;
pub mod sound;
pub mod store;
pub mod theme;
pub mod ui;
pub mod view;

use crate::config::Config;
use crate::session::TestDuration;

/// Settings in effect for this run: the saved config with command line
/// overrides applied
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    pub duration: TestDuration,
    pub sound: bool,
}

impl RuntimeSettings {
    pub fn resolve(config: &Config, duration: Option<TestDuration>, mute: bool) -> Self {
        Self {
            duration: duration.unwrap_or(config.duration),
            sound: config.sound && !mute,
        }
    }
}
