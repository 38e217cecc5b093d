//! Numerical parameters for a simulation run.
//!
//! `Parameters` holds runtime settings:
//! - screen bounds and population size,
//! - spawn radius range and initial velocity,
//! - fixed step size and RNG seed,
//! - grid resolution for the uniform-grid index

use crate::simulation::states::NVec2;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub screen_width: f64,
    pub screen_height: f64,
    pub particle_count: usize,
    pub radius_min: f64, // spawn radius range, uniform
    pub radius_max: f64,
    pub initial_velocity: NVec2, // every spawned body starts with this
    pub dt: f64,                 // fixed step size
    pub seed: u64,               // deterministic spawn seed
    pub grid_rows: usize,
    pub grid_cols: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            screen_width: 1920.0,
            screen_height: 900.0,
            particle_count: 100,
            radius_min: 4.1,
            radius_max: 8.9,
            initial_velocity: NVec2::new(3.0, 3.0),
            dt: 0.15,
            seed: 42,
            grid_rows: 50,
            grid_cols: 96,
        }
    }
}
