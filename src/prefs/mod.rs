//! Key-value preference persistence
//!
//! The last-used location, timestamp, and timezone are persisted through
//! an injected string key-value capability rather than a process-wide
//! singleton. Loading degrades gracefully: any missing or unparseable key
//! falls back to its built-in default.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::warn;

/// Preference keys
pub const PREF_GEOLAT: &str = "geolat";
pub const PREF_GEOLON: &str = "geolon";
pub const PREF_TIME: &str = "time";
pub const PREF_TIMEZONE: &str = "timezone";

/// Built-in location default: Belo Horizonte
pub const DEFAULT_GEOLAT: f64 = -19.9167;
pub const DEFAULT_GEOLON: f64 = -43.9333;
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// String key-value persistence capability
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used in tests and as a no-persistence fallback
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    values: HashMap<String, String>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        MemoryPrefs {
            values: HashMap::new(),
        }
    }
}

impl PrefStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// JSON-file-backed store with write-through semantics
///
/// A missing or corrupt file degrades to an empty store; write failures
/// are logged and the in-memory copy stays authoritative for the session.
#[derive(Debug)]
pub struct FilePrefs {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FilePrefs {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(err) => {
                    warn!("preference file {:?} is corrupt: {}", path, err);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        FilePrefs { path, values }
    }

    fn flush(&self) {
        let serialized = match serde_json::to_string_pretty(&self.values) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!("failed to serialize preferences: {}", err);
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, serialized) {
            warn!("failed to write preferences to {:?}: {}", self.path, err);
        }
    }
}

impl PrefStore for FilePrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

/// The persisted user preferences, with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub geolat: f64,
    pub geolon: f64,
    /// Last-used chart instant as epoch milliseconds, if ever stored
    pub timestamp_millis: Option<i64>,
    pub timezone: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            geolat: DEFAULT_GEOLAT,
            geolon: DEFAULT_GEOLON,
            timestamp_millis: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Preferences {
    /// Load preferences, falling back per key on anything unparseable
    pub fn load(store: &dyn PrefStore) -> Self {
        let defaults = Preferences::default();
        let parse_f64 = |key: &str, fallback: f64| {
            store
                .get(key)
                .and_then(|raw| raw.parse::<f64>().ok())
                .unwrap_or(fallback)
        };
        Preferences {
            geolat: parse_f64(PREF_GEOLAT, defaults.geolat),
            geolon: parse_f64(PREF_GEOLON, defaults.geolon),
            timestamp_millis: store.get(PREF_TIME).and_then(|raw| raw.parse::<i64>().ok()),
            timezone: store.get(PREF_TIMEZONE).unwrap_or(defaults.timezone),
        }
    }

    /// Write every field back to the store
    pub fn save(&self, store: &mut dyn PrefStore) {
        store.set(PREF_GEOLAT, &self.geolat.to_string());
        store.set(PREF_GEOLON, &self.geolon.to_string());
        if let Some(millis) = self.timestamp_millis {
            store.set(PREF_TIME, &millis.to_string());
        }
        store.set(PREF_TIMEZONE, &self.timezone);
    }

    /// The stored chart instant, when present and representable
    pub fn moment(&self) -> Option<DateTime<Utc>> {
        self.timestamp_millis
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}
