use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Engine-side view of the configuration payload.
///
/// Keys the engine does not use (tick delay, scale factor) are ignored and
/// missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct UserConf {
    // universe gen
    #[serde(deserialize_with = "whole_number")]
    pub food_patch_count: usize,
    #[serde(deserialize_with = "whole_number")]
    pub food_patch_size: usize,
    #[serde(deserialize_with = "whole_number")]
    pub food_patch_size_variance: usize,
    #[serde(deserialize_with = "whole_number")]
    pub food_patch_capacity: usize,
    #[serde(deserialize_with = "whole_number")]
    pub barrier_patch_count: usize,
    #[serde(deserialize_with = "whole_number")]
    pub barrier_patch_size: usize,
    // ant behavior
    pub wander_transition_chance_percent: f32,
    // environment
    pub pheremone_decay_interval: f32,
    pub pheremone_decay_multiplier: f32,
}

impl Default for UserConf {
    fn default() -> Self {
        Self {
            food_patch_count: 27,
            food_patch_size: 60,
            food_patch_size_variance: 3,
            food_patch_capacity: 50,
            barrier_patch_count: 36,
            barrier_patch_size: 128,
            wander_transition_chance_percent: 4.25,
            pheremone_decay_interval: 500.0,
            pheremone_decay_multiplier: 0.9,
        }
    }
}

impl UserConf {
    pub fn from_json(serialized: &str) -> serde_json::Result<Self> {
        serde_json::from_str(serialized)
    }
}

/// Accept any non-negative number for a count, rounding to the nearest integer.
/// Sliders with a step count can land between integers.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(D::Error::custom(format!(
            "expected a non-negative count, got {}",
            value
        )));
    }
    Ok(value.round() as usize)
}
