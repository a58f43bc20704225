//! Passive deterioration: untreated patients slowly get worse.
//!
//! A pure function of elapsed time and current vitals. The caller owns the
//! elapsed-time accumulator and resets it whenever a step fires.

use rand::Rng;

use crate::constants::deterioration::{HEART_RATE_RISE, RESP_RATE_RISE, SPO2_FALL};
use crate::vitals::Vitals;

/// Returns the drifted vitals if `elapsed_secs` has reached `threshold_secs`,
/// or `None` when it is not yet time.
pub fn deteriorate(
    vitals: &Vitals,
    elapsed_secs: f64,
    threshold_secs: f64,
    rng: &mut impl Rng,
) -> Option<Vitals> {
    if elapsed_secs < threshold_secs {
        return None;
    }

    let mut next = *vitals;
    next.heart_rate += rng.gen_range(HEART_RATE_RISE.0..=HEART_RATE_RISE.1);
    next.oxygen_saturation -= rng.gen_range(SPO2_FALL.0..=SPO2_FALL.1);
    next.respiratory_rate += rng.gen_range(RESP_RATE_RISE.0..=RESP_RATE_RISE.1);
    next.clamp();
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::bounds;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_no_change_before_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let v = Vitals::default();
        assert!(deteriorate(&v, 29.9, 30.0, &mut rng).is_none());
    }

    #[test]
    fn test_step_within_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let v = Vitals::default();
        for _ in 0..200 {
            let next = deteriorate(&v, 30.0, 30.0, &mut rng).unwrap();
            let dhr = next.heart_rate - v.heart_rate;
            let dspo2 = v.oxygen_saturation - next.oxygen_saturation;
            let drr = next.respiratory_rate - v.respiratory_rate;
            assert!((1..=5).contains(&dhr), "hr delta {}", dhr);
            assert!((1..=3).contains(&dspo2), "spo2 delta {}", dspo2);
            assert!((0..=1).contains(&drr), "rr delta {}", drr);
            // Blood pressure and temperature are not touched
            assert_eq!(next.blood_pressure, v.blood_pressure);
        }
    }

    #[test]
    fn test_repeated_drift_stays_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut v = Vitals::default();
        for _ in 0..500 {
            v = deteriorate(&v, 60.0, 30.0, &mut rng).unwrap();
            assert!(v.in_bounds());
        }
        assert_eq!(v.oxygen_saturation, bounds::SPO2_MIN);
        assert_eq!(v.heart_rate, bounds::HEART_RATE_MAX);
        assert!(v.is_fatal());
    }

    #[test]
    fn test_deterministic_with_seed() {
        let v = Vitals::default();
        let a = deteriorate(&v, 45.0, 30.0, &mut ChaCha8Rng::seed_from_u64(3));
        let b = deteriorate(&v, 45.0, 30.0, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
