//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – active index strategy and debug-line drawing
//! - [`ParametersConfig`] – screen bounds, population and spawn parameters
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   index: quadtree        # quadtree | grid | bvh
//!   draw_lines: true
//!
//! parameters:
//!   screen_width: 1920.0
//!   screen_height: 900.0
//!   particle_count: 100
//!   radius_min: 4.1
//!   radius_max: 8.9
//!   initial_velocity: [3.0, 3.0]
//!   dt: 0.15
//!   seed: 42
//!   grid_rows: 50
//!   grid_cols: 96
//! ```
//!
//! The scenario builder maps this configuration into the runtime types
//! used by the manager and the viewer.

use serde::Deserialize;

/// Which broad-phase index the scenario starts with
/// `index: quadtree`, `index: grid` or `index: bvh`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexConfig {
    #[serde(rename = "quadtree")]
    QuadTree,

    #[serde(rename = "grid")]
    Grid,

    #[serde(rename = "bvh")]
    Bvh,
}

/// High-level engine configuration
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub index: IndexConfig, // active broad-phase strategy
    pub draw_lines: bool,   // draw the index's debug geometry
}

/// Numerical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub screen_width: f64,
    pub screen_height: f64,
    pub particle_count: usize,
    pub radius_min: f64,            // spawn radius range, uniform
    pub radius_max: f64,
    pub initial_velocity: Vec<f64>, // [vx, vy]
    pub dt: f64,                    // fixed step size
    pub seed: u64,                  // deterministic spawn seed
    pub grid_rows: usize,           // uniform-grid resolution
    pub grid_cols: usize,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
}
