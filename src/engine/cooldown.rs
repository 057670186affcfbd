use color_eyre::eyre::{Result, ensure};
use rand::Rng;

/// Deadline-based countdown gating repeatable actions.
///
/// `is_finished` is a pure query; `reset` is the only mutator and
/// rearms the deadline from the supplied "now". A freshly constructed
/// cooldown reports finished until its first reset. Durations are
/// unsigned, so a negative duration is unrepresentable.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    duration_ms: u64,
    deadline_ms: u64,
}

impl Cooldown {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            deadline_ms: 0,
        }
    }

    pub fn reset(&mut self, now_ms: u64) {
        self.deadline_ms = now_ms + self.duration_ms;
    }

    /// Rearms with the base duration stretched by `scale`; used while
    /// a slowdown effect is active.
    pub fn reset_scaled(&mut self, now_ms: u64, scale: u64) {
        self.deadline_ms = now_ms + self.duration_ms * scale;
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.deadline_ms.saturating_sub(now_ms)
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

/// Cooldown whose deadline gets a jitter re-sampled on every reset,
/// uniform in `[-variance, +variance]`.
#[derive(Debug, Clone, Copy)]
pub struct VariableCooldown {
    base_ms: u64,
    variance_ms: u64,
    deadline_ms: u64,
}

impl VariableCooldown {
    pub fn new(base_ms: u64, variance_ms: u64) -> Result<Self> {
        ensure!(
            variance_ms <= base_ms,
            "cooldown variance {variance_ms}ms exceeds base duration {base_ms}ms"
        );
        Ok(Self {
            base_ms,
            variance_ms,
            deadline_ms: 0,
        })
    }

    pub fn reset(&mut self, now_ms: u64, rng: &mut impl Rng) {
        self.reset_scaled(now_ms, 1, rng);
    }

    pub fn reset_scaled(&mut self, now_ms: u64, scale: u64, rng: &mut impl Rng) {
        let variance = self.variance_ms as i64;
        let jitter = if variance == 0 {
            0
        } else {
            rng.random_range(-variance..=variance)
        };
        let duration = (self.base_ms * scale) as i64 + jitter * scale as i64;
        self.deadline_ms = now_ms + duration.max(0) as u64;
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.deadline_ms.saturating_sub(now_ms)
    }

    pub fn base_ms(&self) -> u64 {
        self.base_ms
    }

    /// Upper bound on the rearmed duration at scale 1.
    pub fn max_duration_ms(&self) -> u64 {
        self.base_ms + self.variance_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fresh_cooldown_is_finished() {
        let cooldown = Cooldown::new(500);
        assert!(cooldown.is_finished(0));
    }

    #[test]
    fn test_reset_rearm_and_expiry() {
        let mut cooldown = Cooldown::new(500);
        cooldown.reset(1000);
        assert!(!cooldown.is_finished(1000));
        assert!(!cooldown.is_finished(1499));
        assert!(cooldown.is_finished(1500));
    }

    #[test]
    fn test_is_finished_has_no_side_effects() {
        let mut cooldown = Cooldown::new(100);
        cooldown.reset(0);
        assert!(cooldown.is_finished(100));
        assert!(cooldown.is_finished(100));
        assert_eq!(cooldown.remaining_ms(40), 60);
    }

    #[test]
    fn test_reset_scaled_stretches_duration() {
        let mut cooldown = Cooldown::new(100);
        cooldown.reset_scaled(0, 2);
        assert!(!cooldown.is_finished(199));
        assert!(cooldown.is_finished(200));
    }

    #[test]
    fn test_variable_cooldown_rejects_oversized_variance() {
        assert!(VariableCooldown::new(100, 101).is_err());
        assert!(VariableCooldown::new(100, 100).is_ok());
    }

    #[test]
    fn test_variable_cooldown_within_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cooldown = VariableCooldown::new(1000, 200).expect("valid cooldown");
        for _ in 0..50 {
            cooldown.reset(5000, &mut rng);
            // never finished before base - variance, always after base + variance
            assert!(!cooldown.is_finished(5000 + 799));
            assert!(cooldown.is_finished(5000 + 1200));
        }
    }

    #[test]
    fn test_variable_cooldown_not_finished_right_after_reset() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut cooldown = VariableCooldown::new(100, 100).expect("valid cooldown");
        for _ in 0..50 {
            cooldown.reset(42, &mut rng);
            // duration may jitter down to zero but never below
            assert!(cooldown.remaining_ms(42) <= 200);
        }
    }
}
