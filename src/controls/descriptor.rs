use crate::config::{
    BARRIER_PATCH_COUNT, BARRIER_PATCH_SIZE, FOOD_PATCH_CAPACITY, FOOD_PATCH_COUNT,
    FOOD_PATCH_SIZE, FOOD_PATCH_SIZE_VARIANCE, PHEREMONE_DECAY_INTERVAL,
    PHEREMONE_DECAY_MULTIPLIER, SCALE_FACTOR, SIMULATION_TICK_DELAY,
    WANDER_TRANSITION_CHANCE_PERCENT,
};

/// Snapped values are rounded to this many decimal places to drop float noise
const SNAP_PRECISION: f64 = 1e9;

/// How slider positions map onto values
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scale {
    Linear,
    /// Equal slider distances cover equal ratios; requires min > 0
    Log,
}

/// Granularity of a range control
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Continuous,
    /// Fixed increment from the minimum
    Size(f64),
    /// Number of evenly spaced slider positions between min and max
    Count(u32),
}

/// Bounded numeric range edited by a slider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: Step,
    pub scale: Scale,
}

impl Range {
    pub const fn linear(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: Step::Continuous,
            scale: Scale::Linear,
        }
    }

    pub const fn log(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: Step::Continuous,
            scale: Scale::Log,
        }
    }

    pub const fn with_step(mut self, size: f64) -> Self {
        self.step = Step::Size(size);
        self
    }

    pub const fn with_steps(mut self, count: u32) -> Self {
        self.step = Step::Count(count);
        self
    }

    /// Value at a slider position in [0, 1]
    pub fn value_at(&self, position: f64) -> f64 {
        let t = position.clamp(0.0, 1.0);
        match self.scale {
            Scale::Linear => self.min + (self.max - self.min) * t,
            Scale::Log => self.min * (self.max / self.min).powf(t),
        }
    }

    /// Slider position in [0, 1] of a value
    pub fn position_of(&self, value: f64) -> f64 {
        let value = value.clamp(self.min, self.max);
        let t = match self.scale {
            Scale::Linear => (value - self.min) / (self.max - self.min),
            Scale::Log => (value / self.min).ln() / (self.max / self.min).ln(),
        };
        if t.is_finite() {
            t
        } else {
            0.0
        }
    }

    /// Clamp a value into the range and snap it to the nearest step
    pub fn constrain(&self, value: f64) -> f64 {
        let value = if value.is_nan() { self.min } else { value };
        let clamped = value.clamp(self.min, self.max);
        let snapped = match self.step {
            Step::Continuous => clamped,
            Step::Size(size) if size > 0.0 => {
                self.min + ((clamped - self.min) / size).round() * size
            }
            Step::Size(_) => clamped,
            Step::Count(count) if count > 0 => {
                let slots = count as f64;
                self.value_at((self.position_of(clamped) * slots).round() / slots)
            }
            Step::Count(_) => clamped,
        };
        ((snapped * SNAP_PRECISION).round() / SNAP_PRECISION).clamp(self.min, self.max)
    }
}

/// Shape of the control editing a setting
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Range(Range),
}

/// Static description of one tunable setting
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettingDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
    /// Display index override within the owning panel
    pub position: Option<usize>,
}

impl SettingDescriptor {
    /// Range control labelled with its own key
    pub const fn range(key: &'static str, range: Range) -> Self {
        Self {
            key,
            label: key,
            kind: ControlKind::Range(range),
            position: None,
        }
    }

    pub fn range_bounds(&self) -> Option<&Range> {
        match &self.kind {
            ControlKind::Range(range) => Some(range),
        }
    }

    /// Constrain a value the way this control would
    pub fn constrain(&self, value: f64) -> f64 {
        match &self.kind {
            ControlKind::Range(range) => range.constrain(value),
        }
    }
}

// ============================================
// Descriptor set
// ============================================

pub const SIMULATION_SETTINGS: [SettingDescriptor; 4] = [
    SettingDescriptor::range(SIMULATION_TICK_DELAY, Range::log(0.1, 1000.0).with_steps(250)),
    SettingDescriptor::range(SCALE_FACTOR, Range::linear(3.0, 20.0).with_step(0.1)),
    SettingDescriptor::range(PHEREMONE_DECAY_INTERVAL, Range::linear(10.0, 2500.0).with_step(25.0)),
    SettingDescriptor::range(PHEREMONE_DECAY_MULTIPLIER, Range::linear(0.0, 1.0)),
];

pub const WORLD_GENERATION_SETTINGS: [SettingDescriptor; 6] = [
    SettingDescriptor::range(FOOD_PATCH_COUNT, Range::linear(0.0, 500.0).with_steps(200)),
    SettingDescriptor::range(FOOD_PATCH_SIZE, Range::linear(0.0, 100.0).with_steps(100)),
    SettingDescriptor::range(FOOD_PATCH_SIZE_VARIANCE, Range::linear(0.0, 100.0).with_steps(100)),
    SettingDescriptor::range(FOOD_PATCH_CAPACITY, Range::log(1.0, 5000.0)),
    SettingDescriptor::range(BARRIER_PATCH_COUNT, Range::linear(0.0, 100.0).with_steps(100)),
    SettingDescriptor::range(BARRIER_PATCH_SIZE, Range::linear(0.0, 500.0).with_steps(100)),
];

pub const ANT_BEHAVIOR_SETTINGS: [SettingDescriptor; 1] = [SettingDescriptor::range(
    WANDER_TRANSITION_CHANCE_PERCENT,
    Range::log(0.25, 100.0).with_steps(400),
)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_step_snaps() {
        let range = Range::linear(3.0, 20.0).with_step(0.1);
        assert_eq!(range.constrain(7.5), 7.5);
        assert_eq!(range.constrain(7.54), 7.5);
        assert_eq!(range.constrain(100.0), 20.0);
        assert_eq!(range.constrain(-1.0), 3.0);
    }

    #[test]
    fn test_step_count_snaps() {
        // 200 positions over 0..500 is 2.5 per position
        let range = Range::linear(0.0, 500.0).with_steps(200);
        assert_eq!(range.constrain(101.0), 100.0);
        assert_eq!(range.constrain(101.3), 102.5);
    }

    #[test]
    fn test_log_scale_endpoints() {
        let range = Range::log(0.1, 1000.0);
        assert!((range.value_at(0.0) - 0.1).abs() < 1e-12);
        assert!((range.value_at(1.0) - 1000.0).abs() < 1e-9);
        assert!((range.value_at(0.5) - 10.0).abs() < 1e-9);
        assert!((range.position_of(10.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_log_steps_keep_bounds() {
        let range = Range::log(0.1, 1000.0).with_steps(250);
        let value = range.constrain(50.0);
        assert!(value > 45.0 && value < 55.0, "snapped to {}", value);
        assert_eq!(range.constrain(0.0), 0.1);
    }

    #[test]
    fn test_nan_constrains_to_min() {
        assert_eq!(Range::linear(0.0, 1.0).constrain(f64::NAN), 0.0);
    }

    #[test]
    fn test_every_default_sits_inside_its_range() {
        let all = SIMULATION_SETTINGS
            .iter()
            .chain(WORLD_GENERATION_SETTINGS.iter())
            .chain(ANT_BEHAVIOR_SETTINGS.iter());
        for descriptor in all {
            let (_, default) = crate::config::DEFAULT_SETTINGS
                .iter()
                .find(|(key, _)| *key == descriptor.key)
                .expect("descriptor without a default");
            let range = descriptor.range_bounds().unwrap();
            assert!(
                *default >= range.min && *default <= range.max,
                "{} default {} outside {}..{}",
                descriptor.key,
                default,
                range.min,
                range.max
            );
        }
    }
}
