use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::app_dirs::AppDirs;
use crate::history::{History, ScoreRecord};
use crate::theme::Theme;

pub const THEME_KEY: &str = "theme";
pub const HISTORY_KEY: &str = "typingHistory";

/// String-keyed storage for small pieces of app state
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Stores every key in one JSON object on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn in_dirs(dirs: &AppDirs) -> Self {
        Self::with_path(dirs.store_path())
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(bytes) = fs::read(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("ignoring unreadable store {}: {e}", self.path.display());
                BTreeMap::new()
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut map = self.read_all();
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let data = serde_json::to_vec_pretty(&map)?;
        fs::write(&self.path, data).with_context(|| format!("writing {}", self.path.display()))
    }
}

/// In-memory store for tests and for running without a writable data dir
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the theme and score history. Bad or missing data falls
/// back to defaults instead of failing.
#[derive(Debug)]
pub struct Persistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_history(&self) -> History {
        let Some(raw) = self.store.get(HISTORY_KEY) else {
            return History::default();
        };
        match serde_json::from_str::<Vec<ScoreRecord>>(&raw) {
            Ok(records) => History::from_records(records),
            Err(e) => {
                log::warn!("discarding malformed score history: {e}");
                History::default()
            }
        }
    }

    pub fn save_history(&self, history: &History) -> anyhow::Result<()> {
        let raw = serde_json::to_string(history)?;
        self.store.set(HISTORY_KEY, &raw)
    }

    pub fn load_theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                log::warn!("unknown theme {raw:?}, using default");
                Theme::default()
            }),
            None => Theme::default(),
        }
    }

    pub fn save_theme(&self, theme: Theme) -> anyhow::Result<()> {
        self.store.set(THEME_KEY, &theme.to_string())
    }
}
