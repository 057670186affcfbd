use std::time::Instant;

/// Monotonic time source. The session polls it once per tick and feeds
/// the same timestamp to every cooldown, so one tick sees one "now".
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by [`Instant`], with its origin at construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Measures time actually played: started when the pre-level countdown
/// ends, stopped (and frozen) when the level finishes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameTimer {
    started_at: Option<u64>,
    frozen_ms: u64,
}

impl GameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.started_at.is_none() {
            self.started_at = Some(now_ms);
        }
    }

    pub fn stop(&mut self, now_ms: u64) {
        if let Some(started) = self.started_at.take() {
            self.frozen_ms += now_ms.saturating_sub(started);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.frozen_ms
            + self
                .started_at
                .map_or(0, |started| now_ms.saturating_sub(started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_counts_while_running() {
        let mut timer = GameTimer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_ms(500), 0);

        timer.start(1000);
        assert!(timer.is_running());
        assert_eq!(timer.elapsed_ms(1250), 250);
    }

    #[test]
    fn test_timer_freezes_on_stop() {
        let mut timer = GameTimer::new();
        timer.start(1000);
        timer.stop(1600);
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_ms(9999), 600);
    }

    #[test]
    fn test_timer_start_is_idempotent_while_running() {
        let mut timer = GameTimer::new();
        timer.start(1000);
        timer.start(2000);
        assert_eq!(timer.elapsed_ms(3000), 2000);
    }
}
