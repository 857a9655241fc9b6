use skyfit::constants::Year;
use skyfit::orbit_type::orbit_shape::OrbitShape;

/// Reference orbit used by the recovery tests: moderate eccentricity, generic
/// orientation, 40-year period.
pub fn reference_shape() -> OrbitShape {
    OrbitShape::new(0.3, 0.6, 2.0, 1.0, 0.5, 40.0).unwrap()
}

/// Evenly spaced observation epochs starting at 2000.
pub fn sampling_times(count: usize, step: f64) -> Vec<Year> {
    (0..count).map(|k| 2000.0 + step * k as f64).collect()
}
