//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! consumed by the viewer, the REPL and the benchmarks:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the particle manager with its spawned population
//!
//! The scenario is inserted into Bevy as a `Resource` and read by the step
//! and drawing systems

use bevy::prelude::Resource;

use crate::configuration::config::{IndexConfig, ScenarioConfig};
use crate::simulation::engine::{Engine, IndexKind};
use crate::simulation::manager::ParticleManager;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec2;

#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub manager: ParticleManager,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            screen_width: p_cfg.screen_width,
            screen_height: p_cfg.screen_height,
            particle_count: p_cfg.particle_count,
            radius_min: p_cfg.radius_min,
            radius_max: p_cfg.radius_max,
            initial_velocity: NVec2::new(p_cfg.initial_velocity[0], p_cfg.initial_velocity[1]),
            dt: p_cfg.dt,
            seed: p_cfg.seed,
            grid_rows: p_cfg.grid_rows,
            grid_cols: p_cfg.grid_cols,
        };

        let index = match cfg.engine.index {
            IndexConfig::QuadTree => IndexKind::QuadTree,
            IndexConfig::Grid => IndexKind::Grid,
            IndexConfig::Bvh => IndexKind::Bvh,
        };
        let engine = Engine {
            index,
            draw_lines: cfg.engine.draw_lines,
        };

        let mut manager = ParticleManager::new(parameters.clone(), index);
        manager.set_draw_lines(engine.draw_lines);

        Self {
            engine,
            parameters,
            manager,
        }
    }
}
