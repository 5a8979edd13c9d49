use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Disc population from a point density
///
/// `population = π·r²·density·factor`, where the factor discounts peak
/// densities that do not hold across the whole disc:
///
/// | Density (/km²) | Factor |
/// |----------------|--------|
/// | > 10000 | 0.7 |
/// | > 1000  | 0.8 |
/// | otherwise | 0.9 |
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationEstimator;

impl PopulationEstimator {
    pub fn distribution_factor(density: f64) -> f64 {
        if density > 10000.0 {
            0.7
        } else if density > 1000.0 {
            0.8
        } else {
            0.9
        }
    }

    /// Population within `radius_km` of the point. The coordinate does not
    /// enter the estimate; density carries all location information.
    pub fn estimate(&self, _lat: f64, _lon: f64, radius_km: f64, density: f64) -> f64 {
        if !(radius_km > 0.0) || !(density > 0.0) {
            return 0.0;
        }
        let area_km2 = PI * radius_km.powi(2);
        area_km2 * density * Self::distribution_factor(density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_factor_bands() {
        assert_eq!(PopulationEstimator::distribution_factor(15000.0), 0.7);
        assert_eq!(PopulationEstimator::distribution_factor(10000.0), 0.8);
        assert_eq!(PopulationEstimator::distribution_factor(1000.0), 0.9);
        assert_eq!(PopulationEstimator::distribution_factor(0.0), 0.9);
    }

    #[test]
    fn test_disc_population() {
        let est = PopulationEstimator;
        // π·10²·100·0.9
        let p = est.estimate(0.0, 0.0, 10.0, 100.0);
        assert!((p - PI * 100.0 * 90.0).abs() < 1e-6);
        // Coordinates do not move the estimate
        assert_eq!(est.estimate(35.6762, 139.6503, 10.0, 100.0), p);
    }

    #[test]
    fn test_degenerate_inputs() {
        let est = PopulationEstimator;
        assert_eq!(est.estimate(0.0, 0.0, 0.0, 5000.0), 0.0);
        assert_eq!(est.estimate(0.0, 0.0, -3.0, 5000.0), 0.0);
        assert_eq!(est.estimate(0.0, 0.0, 10.0, 0.0), 0.0);
        assert_eq!(est.estimate(0.0, 0.0, f64::NAN, 5000.0), 0.0);
    }
}
