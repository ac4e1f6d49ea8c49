//! Classification of a reading against its normal range.
//!
//! Pure and total: no I/O, no allocation. The caller is responsible for
//! passing a finite value.

use serde::{Deserialize, Serialize};

use crate::catalog::NormalRange;

// ---

/// Deviation above which an out-of-range reading is critical (exclusive).
pub const CRITICAL_DEVIATION_PERCENT: f64 = 30.0;

/// Status tier derived from deviation magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Critical,
}

/// Which side of the normal range a reading falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Below,
    Within,
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub status: Status,
    pub deviation_percent: f64,
    pub band: Band,
}

/// Classify `value` against `range`.
///
/// Deviation is measured relative to the violated bound. A bound of zero
/// cannot be divided by, so any violation of it counts as a 100% deviation.
pub fn classify(value: f64, range: NormalRange) -> Classification {
    // ---
    let (band, deviation_percent) = if value < range.min {
        (Band::Below, relative_deviation(range.min - value, range.min))
    } else if value > range.max {
        (Band::Above, relative_deviation(value - range.max, range.max))
    } else {
        (Band::Within, 0.0)
    };

    let status = match band {
        Band::Within => Status::Good,
        _ if deviation_percent > CRITICAL_DEVIATION_PERCENT => Status::Critical,
        _ => Status::Warning,
    };

    Classification {
        status,
        deviation_percent,
        band,
    }
}

/// `distance` is strictly positive here, so only the bound needs guarding.
fn relative_deviation(distance: f64, bound: f64) -> f64 {
    // ---
    if bound == 0.0 {
        100.0
    } else {
        distance / bound.abs() * 100.0
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::catalog::{self, SensorType};

    fn range(min: f64, max: f64) -> NormalRange {
        NormalRange::new(min, max)
    }

    #[test]
    fn test_values_inside_range_are_good() {
        // ---
        for info in catalog::all() {
            let r = info.normal_range;
            let mid = (r.min + r.max) / 2.0;

            for value in [r.min, mid, r.max] {
                let c = classify(value, r);
                assert_eq!(c.status, Status::Good, "{} at {}", info.sensor_type, value);
                assert_eq!(c.deviation_percent, 0.0);
                assert_eq!(c.band, Band::Within);
            }
        }
    }

    #[test]
    fn test_below_range_deviation() {
        // ---
        let c = classify(10.0, range(20.0, 60.0));
        assert_eq!(c.band, Band::Below);
        assert_eq!(c.deviation_percent, 50.0);
        assert_eq!(c.status, Status::Critical);

        let c = classify(16.0, range(20.0, 60.0));
        assert_eq!(c.deviation_percent, 20.0);
        assert_eq!(c.status, Status::Warning);
    }

    #[test]
    fn test_above_range_deviation() {
        // ---
        let c = classify(8.0, range(5.5, 7.5));
        assert_eq!(c.band, Band::Above);
        assert!((c.deviation_percent - 6.666_666).abs() < 1e-3);
        assert_eq!(c.status, Status::Warning);

        let c = classify(90.0, range(20.0, 60.0));
        assert_eq!(c.deviation_percent, 50.0);
        assert_eq!(c.status, Status::Critical);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // ---
        // Exactly 30% below 100 stays a warning
        let c = classify(70.0, range(100.0, 300.0));
        assert_eq!(c.deviation_percent, 30.0);
        assert_eq!(c.status, Status::Warning);

        let c = classify(69.0, range(100.0, 300.0));
        assert_eq!(c.status, Status::Critical);

        let c = classify(390.0, range(100.0, 300.0));
        assert_eq!(c.deviation_percent, 30.0);
        assert_eq!(c.status, Status::Warning);
    }

    #[test]
    fn test_deviation_grows_with_distance() {
        // ---
        let r = range(20.0, 60.0);
        let below: Vec<f64> = [19.0, 15.0, 10.0, 0.0, -5.0]
            .iter()
            .map(|v| classify(*v, r).deviation_percent)
            .collect();
        assert!(below.windows(2).all(|w| w[0] < w[1]));

        let above: Vec<f64> = [61.0, 70.0, 100.0, 500.0]
            .iter()
            .map(|v| classify(*v, r).deviation_percent)
            .collect();
        assert!(above.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_min_does_not_divide_by_zero() {
        // ---
        let rainfall = catalog::lookup(SensorType::Rainfall).normal_range;

        let c = classify(0.0, rainfall);
        assert_eq!(c.status, Status::Good);
        assert_eq!(c.deviation_percent, 0.0);

        let c = classify(-2.0, rainfall);
        assert_eq!(c.band, Band::Below);
        assert_eq!(c.deviation_percent, 100.0);
        assert_eq!(c.status, Status::Critical);
        assert!(c.deviation_percent.is_finite());
    }

    #[test]
    fn test_zero_or_negative_bounds_stay_non_negative() {
        // ---
        let c = classify(1.0, range(-10.0, 0.0));
        assert_eq!(c.deviation_percent, 100.0);
        assert_eq!(c.status, Status::Critical);

        let c = classify(-11.0, range(-10.0, 0.0));
        assert_eq!(c.deviation_percent, 10.0);
        assert_eq!(c.status, Status::Warning);
    }

    #[test]
    fn test_nonzero_deviation_iff_not_good() {
        // ---
        let r = range(0.5, 3.0);
        for value in [-1.0, 0.0, 0.4, 0.5, 1.7, 3.0, 3.1, 4.0, 10.0] {
            let c = classify(value, r);
            assert_eq!(c.deviation_percent == 0.0, c.status == Status::Good, "value {value}");
            assert!(c.deviation_percent >= 0.0);
        }
    }
}
