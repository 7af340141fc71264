//! Square root scale for proportional symbols.

use std::f64::consts::PI;

use crate::data::IncidentSnapshot;

/// Radius in pixels of the symbol of the largest magnitude, if not configured otherwise.
pub const DEFAULT_MAX_RADIUS: f64 = 15.0;

/// Maps a magnitude to a symbol radius so that the symbol *area* is linear in the magnitude.
///
/// `radius(v) = R * sqrt(v / M)`, where `M` is the domain maximum (usually the largest magnitude of the dataset) and
/// `R` is the maximum radius. A scale with `M = 0` maps every value to `0`.
///
/// ```
/// use symbolmap::RadiusScale;
///
/// let scale = RadiusScale::new(100.0, 15.0);
/// assert_eq!(scale.radius(25.0), 7.5);
/// assert_eq!(scale.radius(100.0), 15.0);
/// assert_eq!(RadiusScale::new(0.0, 15.0).radius(42.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    domain_max: f64,
    range_max: f64,
    clamp: bool,
}

impl RadiusScale {
    /// Creates a new scale. A non-finite or negative `domain_max` produces a degenerate scale.
    pub fn new(domain_max: f64, range_max: f64) -> Self {
        let domain_max = if domain_max.is_finite() && domain_max > 0.0 {
            domain_max
        } else {
            0.0
        };
        let range_max = if range_max.is_finite() && range_max > 0.0 {
            range_max
        } else {
            0.0
        };

        Self {
            domain_max,
            range_max,
            clamp: false,
        }
    }

    /// Creates a scale with the largest magnitude of the snapshot as the domain maximum.
    pub fn from_snapshot(incidents: &IncidentSnapshot, range_max: f64) -> Self {
        Self::new(incidents.max_magnitude(), range_max)
    }

    /// Sets whether values above the domain maximum are mapped to the maximum radius. If clamping is off (default),
    /// such values are extrapolated.
    pub fn with_clamp(self, clamp: bool) -> Self {
        Self { clamp, ..self }
    }

    /// Largest value of the domain.
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// Radius of the domain maximum.
    pub fn range_max(&self) -> f64 {
        self.range_max
    }

    /// Returns true if every value is mapped to `0`.
    pub fn is_degenerate(&self) -> bool {
        self.domain_max == 0.0
    }

    /// Radius of the symbol for the value. Negative and non-finite values get `0`.
    pub fn radius(&self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() || value <= 0.0 {
            return 0.0;
        }

        let value = if self.clamp {
            value.min(self.domain_max)
        } else {
            value
        };

        self.range_max * (value / self.domain_max).sqrt()
    }

    /// Area of the symbol for the value.
    pub fn area(&self, value: f64) -> f64 {
        let radius = self.radius(value);
        PI * radius * radius
    }
}

impl Default for RadiusScale {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_MAX_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use symbolmap_types::lonlat;

    use super::*;
    use crate::data::{IncidentId, IncidentRecord};

    #[test]
    fn quarter_magnitude_gives_half_radius() {
        let scale = RadiusScale::new(100.0, DEFAULT_MAX_RADIUS);
        assert_abs_diff_eq!(scale.radius(25.0), 7.5, epsilon = 1e-12);
    }

    #[test]
    fn domain_bounds() {
        let scale = RadiusScale::new(1234.0, 15.0);
        assert_eq!(scale.radius(0.0), 0.0);
        assert_abs_diff_eq!(scale.radius(1234.0), 15.0, epsilon = 1e-12);
    }

    #[test]
    fn radius_is_monotonic() {
        let scale = RadiusScale::new(500.0, 15.0);
        let mut previous = 0.0;
        for i in 0..=1000 {
            let radius = scale.radius(i as f64 * 0.5);
            assert!(radius >= previous);
            previous = radius;
        }
    }

    #[test]
    fn area_is_linear_in_value() {
        let scale = RadiusScale::new(750.0, 15.0);
        let ratio = scale.area(1.0) / 1.0;
        for value in [3.0, 17.5, 100.0, 749.0, 750.0] {
            assert_relative_eq!(scale.area(value) / value, ratio, max_relative = 1e-12);
        }
    }

    #[test]
    fn degenerate_domain_gives_zero() {
        for max in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let scale = RadiusScale::new(max, 15.0);
            assert!(scale.is_degenerate());
            assert_eq!(scale.radius(0.0), 0.0);
            assert_eq!(scale.radius(10.0), 0.0);
        }
        assert_eq!(RadiusScale::default().radius(1.0), 0.0);
    }

    #[test]
    fn invalid_values_give_zero() {
        let scale = RadiusScale::new(100.0, 15.0);
        assert_eq!(scale.radius(-1.0), 0.0);
        assert_eq!(scale.radius(f64::NAN), 0.0);
        assert_eq!(scale.radius(f64::INFINITY), 0.0);
    }

    #[test]
    fn clamping() {
        let scale = RadiusScale::new(100.0, 15.0);
        assert_abs_diff_eq!(scale.radius(400.0), 30.0, epsilon = 1e-12);
        assert_eq!(scale.with_clamp(true).radius(400.0), 15.0);
        assert_abs_diff_eq!(scale.with_clamp(true).radius(25.0), 7.5, epsilon = 1e-12);
    }

    #[test]
    fn domain_from_snapshot() {
        let snapshot = IncidentSnapshot::new(vec![
            IncidentRecord::new_unchecked(IncidentId::Index(0), lonlat!(0.0, 0.0), 4.0),
            IncidentRecord::new_unchecked(IncidentId::Index(1), lonlat!(10.0, 0.0), 16.0),
        ]);
        let scale = RadiusScale::from_snapshot(&snapshot, 10.0);
        assert_eq!(scale.domain_max(), 16.0);
        assert_eq!(scale.radius(4.0), 5.0);
    }
}
