//! Naismith's rule travel-time estimation
//!
//! Used to fill in missing surveyed times from the physical metrics:
//! 5 km/h on the flat, one extra hour per 600 m of climb, and a descent
//! credit of 10 minutes per 300 m of loss.

const FLAT_SPEED_KMH: f64 = 5.0;
const GAIN_RATE_M_PER_H: f64 = 600.0;
const LOSS_RATE_M_PER_10MIN: f64 = 300.0;

/// Estimated walking time in seconds for a segment.
///
/// The descent credit can push the raw estimate below zero on steep
/// downhill segments; the result is clamped at zero since a negative
/// edge cost would corrupt shortest-path invariants.
#[must_use]
pub fn naismith_seconds(distance_km: f64, gain_m: f64, loss_m: f64) -> f64 {
    let flat_hours = distance_km / FLAT_SPEED_KMH;
    let gain_hours = gain_m / GAIN_RATE_M_PER_H;
    let loss_hours = (loss_m / LOSS_RATE_M_PER_10MIN) * (10.0 / 60.0);
    ((flat_hours + gain_hours - loss_hours) * 3600.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_walk_at_five_kmh() {
        assert_eq!(naismith_seconds(5.0, 0.0, 0.0), 3600.0);
        assert_eq!(naismith_seconds(1.0, 0.0, 0.0), 720.0);
    }

    #[test]
    fn climb_adds_an_hour_per_600m() {
        assert_eq!(naismith_seconds(0.0, 600.0, 0.0), 3600.0);
        assert_eq!(naismith_seconds(5.0, 300.0, 0.0), 5400.0);
    }

    #[test]
    fn descent_credit_is_clamped_at_zero() {
        assert_eq!(naismith_seconds(0.0, 0.0, 3000.0), 0.0);
        // 1 km flat (720 s) minus 300 m descent credit (600 s)
        assert!((naismith_seconds(1.0, 0.0, 300.0) - 120.0).abs() < 1e-9);
    }
}
