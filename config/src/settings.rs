//! Runtime settings lookup
//!
//! Flat string settings that may change while the process runs. Consumers
//! re-read them on every use instead of caching the value at construction.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// Setting that gates the product-list cache; only the exact value `"true"` enables it
pub const ENABLE_REDIS_CACHING: &str = "EnableRedisCaching";

/// Read-only view over key/value settings
pub trait SettingsSource: Send + Sync {
    /// Current value for `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// True only when the setting is present and equals the string `"true"`
    fn is_enabled(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some("true")
    }
}

/// Thread-safe, runtime-mutable settings map
#[derive(Debug, Default)]
pub struct Settings {
    values: RwLock<HashMap<String, String>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            values: RwLock::new(values.into_iter().collect()),
        }
    }

    /// Replace the listed keys with same-named environment variables when they are set
    pub fn with_env_overrides(self, keys: &[&str]) -> Self {
        for key in keys {
            if let Ok(value) = std::env::var(key) {
                self.set(*key, value);
            }
        }
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value.into());
        }
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().ok().and_then(|mut values| values.remove(key))
    }
}

impl SettingsSource for Settings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok().and_then(|values| values.get(key).cloned())
    }
}

impl SettingsSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}
