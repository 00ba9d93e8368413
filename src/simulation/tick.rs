use std::time::{Duration, Instant};

use crate::engine::EngineError;

/// Upper bound on steps run by one `advance`; any further backlog is dropped
const MAX_CATCH_UP_STEPS: u32 = 64;

/// Paused/running state of the autonomous step loop
#[derive(Clone, Debug)]
pub struct TickLoop {
    delay: Duration,
    /// Instant the next step is due, `None` while paused
    next_due: Option<Instant>,
}

impl TickLoop {
    /// A paused loop
    pub fn new() -> Self {
        Self {
            delay: Duration::ZERO,
            next_due: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn pause(&mut self) {
        self.next_due = None;
    }

    /// Start stepping every `delay_ms` milliseconds, first step one delay from `now`
    pub fn resume(&mut self, delay_ms: f64, now: Instant) -> Result<(), EngineError> {
        if self.is_running() {
            return Err(EngineError::AlreadyRunning);
        }
        if !delay_ms.is_finite() || delay_ms < 0.0 {
            return Err(EngineError::InvalidDelay(delay_ms));
        }
        self.delay = Duration::from_secs_f64(delay_ms / 1000.0);
        self.next_due = Some(now + self.delay);
        Ok(())
    }

    /// Number of steps due at `now`
    pub fn advance(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut steps = 0;
        while due <= now && steps < MAX_CATCH_UP_STEPS {
            steps += 1;
            due += self.delay;
        }
        if due <= now {
            due = now + self.delay;
        }
        self.next_due = Some(due);
        steps
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_loop_never_steps() {
        let mut ticks = TickLoop::new();
        assert!(!ticks.is_running());
        assert_eq!(ticks.advance(Instant::now() + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_steps_follow_delay() {
        let start = Instant::now();
        let mut ticks = TickLoop::new();
        ticks.resume(10.0, start).unwrap();

        assert_eq!(ticks.advance(start + Duration::from_millis(5)), 0);
        assert_eq!(ticks.advance(start + Duration::from_millis(35)), 3);
        assert_eq!(ticks.advance(start + Duration::from_millis(39)), 0);
        assert_eq!(ticks.advance(start + Duration::from_millis(40)), 1);
    }

    #[test]
    fn test_resume_while_running_is_rejected() {
        let now = Instant::now();
        let mut ticks = TickLoop::new();
        ticks.resume(10.0, now).unwrap();
        assert!(matches!(ticks.resume(20.0, now), Err(EngineError::AlreadyRunning)));
        assert_eq!(ticks.delay(), Duration::from_millis(10));

        ticks.pause();
        ticks.pause();
        ticks.resume(20.0, now).unwrap();
        assert_eq!(ticks.delay(), Duration::from_millis(20));
    }

    #[test]
    fn test_invalid_delay_is_rejected() {
        let mut ticks = TickLoop::new();
        assert!(matches!(
            ticks.resume(-1.0, Instant::now()),
            Err(EngineError::InvalidDelay(_))
        ));
        assert!(!ticks.is_running());
    }

    #[test]
    fn test_backlog_is_capped() {
        let start = Instant::now();
        let mut ticks = TickLoop::new();
        ticks.resume(1.0, start).unwrap();

        assert_eq!(ticks.advance(start + Duration::from_secs(60)), MAX_CATCH_UP_STEPS);
        assert_eq!(ticks.advance(start + Duration::from_secs(60)), 0);
    }
}
