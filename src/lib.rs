pub mod simulation;
pub mod configuration;
pub mod metrics;
pub mod ui;
pub mod visualization;
pub mod benchmark;

pub use simulation::collision::{circles_overlap, resolve_elastic};
pub use simulation::engine::{Engine, IndexKind};
pub use simulation::geometry::{Aabb, Rect};
pub use simulation::manager::ParticleManager;
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;
pub use simulation::states::{Body, BodyColor, BodyId, NVec2, World};

pub use configuration::config::{EngineConfig, IndexConfig, ParametersConfig, ScenarioConfig};

pub use metrics::collector::MeasurementCollector;

pub use visualization::vis2d::run_2d;

pub use benchmark::benchmark::{bench_rebuild, bench_step, bench_step_curve};
