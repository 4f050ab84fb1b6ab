//! Short/long exponential moving averages.
//!
//! Two independent trackers over the incoming internal-tick stream, updated
//! once per engine update regardless of how long the previous value was in
//! force. Pure running state; no historical records back these.

use oracle_core::{config::ALPHA_ONE_Q16, EmaSnapshot, InternalTick};

/// Pair of exponential moving averages with Q16 fixed-point smoothing.
#[derive(Debug, Clone)]
pub struct EmaSet {
    short_mean: InternalTick,
    long_mean: InternalTick,
    short_alpha_q16: u32,
    long_alpha_q16: u32,
}

impl EmaSet {
    /// Create a new EMA pair. Alphas are Q16 numerators; the short one must
    /// be larger (engine config validation enforces this).
    pub fn new(short_alpha_q16: u32, long_alpha_q16: u32) -> Self {
        Self {
            short_mean: 0,
            long_mean: 0,
            short_alpha_q16,
            long_alpha_q16,
        }
    }

    /// Seed both means with the first observed value.
    pub fn seed(&mut self, value: InternalTick) {
        self.short_mean = value;
        self.long_mean = value;
    }

    /// Apply one smoothing step toward `value`.
    ///
    /// `mean += (value - mean) * alpha / 2^16`, with the division truncating
    /// toward zero.
    pub fn update(&mut self, value: InternalTick) {
        self.short_mean = step(self.short_mean, value, self.short_alpha_q16);
        self.long_mean = step(self.long_mean, value, self.long_alpha_q16);
    }

    /// Current means. Pure read, no side effects.
    #[inline]
    pub fn snapshot(&self) -> EmaSnapshot {
        EmaSnapshot {
            short_mean: self.short_mean,
            long_mean: self.long_mean,
        }
    }
}

#[inline]
fn step(mean: InternalTick, value: InternalTick, alpha_q16: u32) -> InternalTick {
    mean + (value - mean) * alpha_q16 as i64 / ALPHA_ONE_Q16 as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sets_both_means() {
        let mut emas = EmaSet::new(8192, 1024);
        emas.seed(945);
        let snap = emas.snapshot();
        assert_eq!(snap.short_mean, 945);
        assert_eq!(snap.long_mean, 945);
    }

    #[test]
    fn test_short_reacts_faster() {
        let mut emas = EmaSet::new(8192, 1024);
        emas.seed(1000);
        emas.update(2000);

        let snap = emas.snapshot();
        // short: 1000 + 1000/8 = 1125; long: 1000 + 1000/64 = 1015
        assert_eq!(snap.short_mean, 1125);
        assert_eq!(snap.long_mean, 1015);
        assert!(snap.short_mean > snap.long_mean);
    }

    #[test]
    fn test_truncation_toward_zero() {
        let mut emas = EmaSet::new(8192, 1024);
        emas.seed(0);
        emas.update(7);
        let snap = emas.snapshot();
        // 7 * 8192 / 65536 = 0.875 -> 0; 7 * 1024 / 65536 -> 0
        assert_eq!(snap.short_mean, 0);
        assert_eq!(snap.long_mean, 0);

        emas.seed(0);
        emas.update(-7);
        let snap = emas.snapshot();
        // Truncation, not floor: stays at zero from below as well.
        assert_eq!(snap.short_mean, 0);
        assert_eq!(snap.long_mean, 0);
    }

    #[test]
    fn test_approaches_constant_input() {
        let mut emas = EmaSet::new(8192, 1024);
        emas.seed(0);
        for _ in 0..2000 {
            emas.update(10_000);
        }
        let snap = emas.snapshot();
        // Truncated steps stall once the gap drops below 1/alpha, so the
        // means settle just under the input rather than on it.
        assert!(10_000 - snap.short_mean < 8, "short={}", snap.short_mean);
        assert!(10_000 - snap.long_mean < 64, "long={}", snap.long_mean);
        assert!(snap.short_mean >= snap.long_mean);
    }

    #[test]
    fn test_full_alpha_tracks_input_exactly() {
        let mut emas = EmaSet::new(ALPHA_ONE_Q16, 1);
        emas.seed(5);
        emas.update(-123);
        assert_eq!(emas.snapshot().short_mean, -123);
    }
}
