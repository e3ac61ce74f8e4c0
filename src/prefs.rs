//! Per-user sidebar selection memory.
//!
//! Two small facts are remembered between visits: the last active team and
//! the last active sidebar button (the chat / join-teams pair at the bottom
//! of the rail). Both live in a flat string key-value store keyed by purpose
//! tag plus user id. By contract nothing in here ever fails: writes to an
//! unavailable store are dropped and reads degrade to `None`.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Flat string key-value store the preference store persists through.
///
/// Implementations must not panic; a broken backing store simply loses
/// writes and answers `None`.
pub trait KvStore {
    /// Look up a value, `None` when never set or storage is unavailable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, last write wins. Failures are swallowed.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
}

impl MemoryKvStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// JSON-file-backed store under the platform config directory.
///
/// The whole map is rewritten on every set; the values here are a handful of
/// short strings, not a database.
#[derive(Debug)]
pub struct FileKvStore {
    entries: HashMap<String, String>,
    path: PathBuf,
}

impl FileKvStore {
    /// Load the store from `<config_dir>/teamdeck/sidebar_prefs.json`.
    ///
    /// Missing or unparseable files degrade to an empty map; with no config
    /// directory at all the store stays purely in memory.
    pub fn load() -> Self {
        match dirs::config_dir() {
            Some(dir) => Self::at_path(dir.join("teamdeck").join("sidebar_prefs.json")),
            None => Self {
                entries: HashMap::new(),
                path: PathBuf::new(),
            },
        }
    }

    /// Load the store from an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();
        Self { entries, path }
    }

    /// Best-effort write-through; I/O errors are dropped per the store
    /// contract.
    fn persist(&self) {
        if self.path.as_os_str().is_empty() {
            return;
        }
        if let Some(parent) = self.path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        if let Ok(contents) = serde_json::to_string_pretty(&self.entries) {
            let _ = fs::write(&self.path, contents);
        }
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

/// The two buttons below the team rail whose selection is remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarButton {
    /// The chat (home) button
    Chat,
    /// The join-other-teams button
    Team,
}

impl SidebarButton {
    /// Stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            SidebarButton::Chat => "chat",
            SidebarButton::Team => "team",
        }
    }

    /// Parse the stored string form; unknown values read as `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "chat" => Some(SidebarButton::Chat),
            "team" => Some(SidebarButton::Team),
            _ => None,
        }
    }
}

/// Per-user sidebar selection memory over any [`KvStore`].
pub struct PreferenceStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> PreferenceStore<S> {
    /// Wrap a backing store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Remember the team the user last had active.
    pub fn set_last_team(&mut self, user_id: &str, team_id: &str) {
        self.store.set(&last_team_key(user_id), team_id);
    }

    /// The team the user last had active, if ever recorded.
    pub fn last_team(&self, user_id: &str) -> Option<String> {
        self.store.get(&last_team_key(user_id))
    }

    /// Remember which sidebar button the user last activated.
    pub fn set_last_button(&mut self, user_id: &str, button: SidebarButton) {
        self.store.set(&last_button_key(user_id), button.as_str());
    }

    /// The sidebar button the user last activated, if ever recorded.
    pub fn last_button(&self, user_id: &str) -> Option<SidebarButton> {
        self.store
            .get(&last_button_key(user_id))
            .and_then(|value| SidebarButton::parse(&value))
    }

    /// Access the backing store (the host also keeps its team ordering here).
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Read-only access to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn last_team_key(user_id: &str) -> String {
    format!("previous_team:{user_id}")
}

fn last_button_key(user_id: &str) -> String {
    format!("previous_button:{user_id}")
}
