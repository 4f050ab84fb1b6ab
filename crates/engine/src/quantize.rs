//! Tick quantization.
//!
//! Converts between the external log-price unit (base 1.0001) and the
//! engine's finer internal unit, and downscales internal values for compact
//! ring-buffer storage.

use oracle_core::{InternalTick, Tick};

/// External tick base: one tick is a factor of 1.0001.
pub const EXTERNAL_TICK_BASE: f64 = 1.0001;

/// Internal tick base, chosen so that 256 internal sub-ticks make up roughly
/// 27 external ticks and a downscaled value fits compact storage.
pub const INTERNAL_TICK_BASE: f64 = 1.000010576643810561;

/// Width of one compact storage bucket, in internal units.
pub const BUCKET_SIZE: InternalTick = 256;

/// Convert a log-price tick between two logarithmic bases.
#[inline]
pub fn rescale(x: i64, from_base: f64, to_base: f64) -> i64 {
    (x as f64 * from_base.ln() / to_base.ln()).round() as i64
}

/// Convert an external tick to internal units.
#[inline]
pub fn to_internal(tick: Tick) -> InternalTick {
    rescale(tick as i64, EXTERNAL_TICK_BASE, INTERNAL_TICK_BASE)
}

/// Convert an internal tick back to external units.
#[inline]
pub fn to_external(tick: InternalTick) -> Tick {
    rescale(tick, INTERNAL_TICK_BASE, EXTERNAL_TICK_BASE) as Tick
}

/// Downscale an internal tick to a compact storage bucket.
///
/// Not standard rounding: the value is biased away from zero by half a
/// bucket and then truncated toward zero, including when it is already an
/// exact bucket multiple. Kept bit-for-bit identical to the reference
/// behavior.
#[inline]
pub fn downscale(x: InternalTick) -> i32 {
    ((x + (BUCKET_SIZE / 2) * x.signum()) / BUCKET_SIZE) as i32
}

/// Expand a compact storage bucket back to internal units.
#[inline]
pub fn upscale(x: i32) -> InternalTick {
    x as InternalTick * BUCKET_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Reference formula: trunc((t + 128*sign(t)) / 256).
    fn downscale_reference(t: i64) -> i64 {
        let biased = t as f64 + 128.0 * (t as f64).signum();
        (biased / 256.0).trunc() as i64
    }

    #[test]
    fn test_downscale_matches_reference() {
        for t in -100_000..=100_000i64 {
            assert_eq!(downscale(t) as i64, downscale_reference(t), "t={t}");
        }
    }

    #[test]
    fn test_downscale_bucket_multiples_bias_away_from_zero() {
        // 256 + 128 = 384 -> trunc(1.5) = 1, not round-half-even.
        assert_eq!(downscale(256), 1);
        assert_eq!(downscale(-256), -1);
        assert_eq!(downscale(512), 2);
        assert_eq!(downscale(-512), -2);
    }

    #[test]
    fn test_downscale_edges() {
        assert_eq!(downscale(0), 0);
        assert_eq!(downscale(127), 0);
        assert_eq!(downscale(128), 1);
        assert_eq!(downscale(-127), 0);
        assert_eq!(downscale(-128), -1);
        assert_eq!(downscale(383), 1);
        assert_eq!(downscale(384), 2);
    }

    #[test]
    fn test_internal_scale_factor() {
        // One external tick is roughly 9.45 internal sub-ticks.
        let factor = EXTERNAL_TICK_BASE.ln() / INTERNAL_TICK_BASE.ln();
        assert_relative_eq!(factor, 9.4544, epsilon = 1e-3);
    }

    #[test]
    fn test_rescale_round_trip_within_one_unit() {
        // Composing the two directions is not exact; +/-1 is acceptable.
        for tick in (-887_272..=887_272).step_by(997) {
            let internal = to_internal(tick);
            let back = to_external(internal);
            assert!(
                (back - tick).abs() <= 1,
                "tick={tick} internal={internal} back={back}"
            );
        }
    }

    #[test]
    fn test_upscale_is_bucket_multiple() {
        assert_eq!(upscale(0), 0);
        assert_eq!(upscale(7), 1792);
        assert_eq!(upscale(-7), -1792);
    }
}
