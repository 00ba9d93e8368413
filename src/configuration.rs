use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::DEFAULT_SETTINGS;

/// Largest magnitude at which every integer is exactly representable in an f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Values reported by a panel group, keyed by setting
pub type LocalState = BTreeMap<String, f64>;

/// The full mapping of setting keys to their current values.
///
/// Keys are never removed. A merge only overwrites or adds entries, so a
/// configuration built from [`Configuration::defaults`] always holds every
/// known key.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    values: BTreeMap<String, f64>,
}

impl Configuration {
    /// Create the startup configuration from the literal defaults
    pub fn defaults() -> Self {
        let values = DEFAULT_SETTINGS
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Pure merge: reported keys overwrite, everything else is retained.
    pub fn merged_with(&self, reported: &LocalState) -> Self {
        let mut values = self.values.clone();
        for (key, value) in reported {
            values.insert(key.clone(), *value);
        }
        Self { values }
    }

    /// Restrict the configuration to the given keys.
    ///
    /// Keys missing from the configuration are skipped.
    pub fn project<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> LocalState {
        keys.into_iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }

    /// Encode as a flat JSON object with keys in sorted order
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            // Integral values go out as integers so count fields parse as usize
            if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
                map.serialize_entry(key, &(*value as i64))?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
