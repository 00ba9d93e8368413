use std::collections::HashMap;
use std::fmt;

use crate::config::{SCALE_FACTOR, SIMULATION_TICK_DELAY};
use crate::engine::{Engine, EngineError};

/// Imperative engine action fired with the new value of its key
pub type SideEffect = fn(&mut dyn Engine, f64) -> Result<(), EngineError>;

/// Settings that need an engine call when edited.
///
/// Keys without an entry are passive: the engine picks them up from the
/// next configuration payload.
#[derive(Clone, Default)]
pub struct SideEffectRegistry {
    entries: HashMap<&'static str, SideEffect>,
}

impl SideEffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick delay restarts the tick loop, scale factor resizes the canvas
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(SIMULATION_TICK_DELAY, restart_tick_loop);
        registry.register(SCALE_FACTOR, rescale_canvas);
        registry
    }

    pub fn register(&mut self, key: &'static str, effect: SideEffect) {
        self.entries.insert(key, effect);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Fire the action registered for `key`, if any.
    ///
    /// Returns whether an action ran.
    pub fn dispatch(
        &self,
        key: &str,
        value: f64,
        engine: &mut dyn Engine,
    ) -> Result<bool, EngineError> {
        match self.entries.get(key) {
            Some(effect) => {
                log::debug!("Dispatching {} = {}", key, value);
                effect(engine, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl fmt::Debug for SideEffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("SideEffectRegistry").field("keys", &keys).finish()
    }
}

fn restart_tick_loop(engine: &mut dyn Engine, delay: f64) -> Result<(), EngineError> {
    engine.pause();
    engine.resume(delay)
}

fn rescale_canvas(engine: &mut dyn Engine, factor: f64) -> Result<(), EngineError> {
    engine.set_render_scale(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FOOD_PATCH_COUNT;
    use crate::engine::testing::{EngineCall, RecordingEngine};

    #[test]
    fn test_tick_delay_pauses_then_resumes() {
        let mut engine = RecordingEngine::new();
        let fired = SideEffectRegistry::standard()
            .dispatch(SIMULATION_TICK_DELAY, 50.0, &mut engine)
            .unwrap();

        assert!(fired);
        assert_eq!(engine.calls, vec![EngineCall::Pause, EngineCall::Resume(50.0)]);
    }

    #[test]
    fn test_scale_factor_only_rescales() {
        let mut engine = RecordingEngine::new();
        SideEffectRegistry::standard()
            .dispatch(SCALE_FACTOR, 7.5, &mut engine)
            .unwrap();

        assert_eq!(engine.calls, vec![EngineCall::SetRenderScale(7.5)]);
    }

    #[test]
    fn test_unregistered_key_is_passive() {
        let mut engine = RecordingEngine::new();
        let registry = SideEffectRegistry::standard();

        assert!(!registry.contains(FOOD_PATCH_COUNT));
        assert!(!registry.dispatch(FOOD_PATCH_COUNT, 100.0, &mut engine).unwrap());
        assert!(engine.calls.is_empty());
    }

    #[test]
    fn test_repeated_dispatch_is_not_deduplicated() {
        let mut engine = RecordingEngine::new();
        let registry = SideEffectRegistry::standard();
        registry.dispatch(SIMULATION_TICK_DELAY, 20.0, &mut engine).unwrap();
        registry.dispatch(SIMULATION_TICK_DELAY, 20.0, &mut engine).unwrap();

        assert_eq!(
            engine.calls,
            vec![
                EngineCall::Pause,
                EngineCall::Resume(20.0),
                EngineCall::Pause,
                EngineCall::Resume(20.0),
            ]
        );
    }
}
