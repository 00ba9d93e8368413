use thiserror::Error;

/// Faults raised by the simulation engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("resume requested while the tick loop is running")]
    AlreadyRunning,
    #[error("invalid tick delay: {0}")]
    InvalidDelay(f64),
    #[error("invalid render scale: {0}")]
    InvalidScale(f64),
    #[error("invalid configuration payload: {0}")]
    InvalidConfiguration(#[from] serde_json::Error),
}

/// Operations the control layer may invoke on the running simulation
pub trait Engine {
    /// Halt autonomous stepping. Pausing a paused engine does nothing.
    fn pause(&mut self);

    /// Resume stepping with the given inter-step delay in milliseconds.
    ///
    /// Only valid after [`Engine::pause`].
    fn resume(&mut self, delay: f64) -> Result<(), EngineError>;

    /// Update the rendering scale in place, effective on the next frame
    fn set_render_scale(&mut self, factor: f64) -> Result<(), EngineError>;

    /// Receive the full merged configuration as a JSON object
    fn accept_configuration(&mut self, serialized: &str) -> Result<(), EngineError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum EngineCall {
        Pause,
        Resume(f64),
        SetRenderScale(f64),
        AcceptConfiguration(String),
    }

    /// Engine double that records every call, starting out running
    #[derive(Debug)]
    pub struct RecordingEngine {
        pub calls: Vec<EngineCall>,
        pub running: bool,
        pub reject_configuration: bool,
    }

    impl RecordingEngine {
        pub fn new() -> Self {
            Self {
                calls: Vec::new(),
                running: true,
                reject_configuration: false,
            }
        }

        /// Calls other than configuration deliveries
        pub fn side_effects(&self) -> Vec<EngineCall> {
            self.calls
                .iter()
                .filter(|c| !matches!(c, EngineCall::AcceptConfiguration(_)))
                .cloned()
                .collect()
        }

        pub fn payloads(&self) -> Vec<String> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    EngineCall::AcceptConfiguration(json) => Some(json.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Engine for RecordingEngine {
        fn pause(&mut self) {
            self.running = false;
            self.calls.push(EngineCall::Pause);
        }

        fn resume(&mut self, delay: f64) -> Result<(), EngineError> {
            if self.running {
                return Err(EngineError::AlreadyRunning);
            }
            self.running = true;
            self.calls.push(EngineCall::Resume(delay));
            Ok(())
        }

        fn set_render_scale(&mut self, factor: f64) -> Result<(), EngineError> {
            self.calls.push(EngineCall::SetRenderScale(factor));
            Ok(())
        }

        fn accept_configuration(&mut self, serialized: &str) -> Result<(), EngineError> {
            if self.reject_configuration {
                return Err(EngineError::InvalidConfiguration(
                    serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
                ));
            }
            self.calls
                .push(EngineCall::AcceptConfiguration(serialized.to_string()));
            Ok(())
        }
    }
}
