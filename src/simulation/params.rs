//! Physical constants and numerical parameters for a run
//!
//! The constants are process-wide and immutable. `Parameters` holds the
//! per-run settings:
//! - integration step size `dt`,
//! - energy-conservation threshold,
//! - optional random seed for generated systems

use std::f64::consts::PI;

/// Solar mass in units where G = 1 (AU, years)
pub const SOLAR_MASS: f64 = 4.0 * PI * PI;
/// Converts AU/day velocities into AU/year
pub const DAYS_PER_YEAR: f64 = 365.24;
pub const DELTA_T: f64 = 0.01;
pub const ENERGY_DIFF_THRESHOLD: f64 = 1e-4;
/// Mass scale of randomly generated satellites, before the uniform factor
pub const BASE_MASS_UNIT: f64 = 5.0e-5 * SOLAR_MASS;

pub const DEFAULT_STEPS: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64,               // step size
    pub energy_threshold: f64, // max |start - end| for a conserved verdict
    pub seed: Option<u64>,     // deterministic seed for random systems
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: DELTA_T,
            energy_threshold: ENERGY_DIFF_THRESHOLD,
            seed: None,
        }
    }
}

impl Parameters {
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
