//! Frame orchestration over the body store and the three indices.
//!
//! `ParticleManager` owns the world, spawns populations, and drives one
//! frame at a time: integrate positions, reflect at the screen edges,
//! rebuild or patch the active index, then feed its candidates through the
//! narrow phase into the resolver. Each index update records its elapsed
//! time and byte footprint into the metrics collector.
//!
//! A step is one atomic unit of work; everything here is single-threaded
//! and synchronous, and none of the local error cases (rejected grid
//! inserts, degenerate splits, coincident centers) unwinds past `step`.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::metrics::collector::MeasurementCollector;
use crate::simulation::bvh::BvhIndex;
use crate::simulation::collision::{circles_overlap, resolve_elastic};
use crate::simulation::engine::IndexKind;
use crate::simulation::geometry::Rect;
use crate::simulation::grid::GridIndex;
use crate::simulation::motion::{advance, reflect_at_bounds};
use crate::simulation::params::Parameters;
use crate::simulation::quadtree::QuadTree;
use crate::simulation::states::{BodyId, NVec2, World};

pub struct ParticleManager {
    params: Parameters,
    active: IndexKind,
    draw_lines: bool,
    world: World,
    quadtree: QuadTree<BodyId>,
    grid: GridIndex,
    bvh: BvhIndex,
    metrics: MeasurementCollector,
    rng: StdRng,
}

impl ParticleManager {
    pub fn new(params: Parameters, active: IndexKind) -> Self {
        let bounds = Rect::new(0.0, 0.0, params.screen_width, params.screen_height);
        let grid = GridIndex::new(
            params.grid_rows,
            params.grid_cols,
            params.screen_width,
            params.screen_height,
        );
        let rng = StdRng::seed_from_u64(params.seed);
        let count = params.particle_count;

        let mut manager = Self {
            params,
            active,
            draw_lines: true,
            world: World::new(),
            quadtree: QuadTree::new(bounds),
            grid,
            bvh: BvhIndex::new(),
            metrics: MeasurementCollector::new(),
            rng,
        };
        manager.init_particles(count);
        manager
    }

    /// Discards the whole population, spawns `count` fresh bodies uniformly
    /// within the screen bounds and rebuilds every index from them.
    pub fn init_particles(&mut self, count: usize) {
        info!(count, "respawning particle population");
        self.params.particle_count = count;

        let start = Instant::now();

        self.world.clear();
        self.quadtree.clear();
        self.bvh.reset();
        self.grid.clear();

        for _ in 0..count {
            let x = self.rng.gen_range(0.0..self.params.screen_width);
            let y = self.rng.gen_range(0.0..self.params.screen_height);
            let radius = self
                .rng
                .gen_range(self.params.radius_min..self.params.radius_max);
            self.world.spawn(radius, NVec2::new(x, y));
        }
        for body in self.world.bodies_mut() {
            body.v = self.params.initial_velocity;
        }

        for body in self.world.bodies() {
            self.quadtree.insert(body.id, body.rect());
        }
        self.bvh.build(&self.world);
        for body in self.world.bodies() {
            self.grid.insert(body.id, body.x.x, body.x.y);
        }

        self.metrics.record_timing(
            "init_particles",
            start.elapsed().as_secs_f64() * 1000.0,
            count,
        );
    }

    /// Full respawn; no incremental migration between populations.
    pub fn set_body_count(&mut self, count: usize) {
        self.init_particles(count);
    }

    /// Switching strategies also respawns the population and rebuilds all
    /// indices, mirroring `set_body_count`.
    pub fn switch_index(&mut self, kind: IndexKind) {
        self.active = kind;
        let count = self.params.particle_count;
        self.init_particles(count);
    }

    pub fn scale_velocity(&mut self, factor: f64) {
        for body in self.world.bodies_mut() {
            body.v *= factor;
        }
    }

    pub fn toggle_lines(&mut self) {
        self.draw_lines = !self.draw_lines;
    }

    pub fn set_draw_lines(&mut self, on: bool) {
        self.draw_lines = on;
    }

    pub fn draw_lines(&self) -> bool {
        self.draw_lines
    }

    pub fn active_index(&self) -> IndexKind {
        self.active
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn quadtree(&self) -> &QuadTree<BodyId> {
        &self.quadtree
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn bvh(&self) -> &BvhIndex {
        &self.bvh
    }

    pub fn metrics(&self) -> &MeasurementCollector {
        &self.metrics
    }

    /// One frame: motion, boundary reflection, index refresh, broad-phase
    /// query, narrow phase and resolution.
    pub fn step(&mut self, dt: f64) {
        match self.active {
            IndexKind::QuadTree => self.step_with_quadtree(dt),
            IndexKind::Grid => self.step_with_grid(dt),
            IndexKind::Bvh => self.step_with_bvh(dt),
        }
    }

    fn move_bodies(&mut self, dt: f64) {
        let (w, h) = (self.params.screen_width, self.params.screen_height);
        for body in self.world.bodies_mut() {
            advance(body, dt);
            reflect_at_bounds(body, w, h);
        }
    }

    fn step_with_quadtree(&mut self, dt: f64) {
        self.move_bodies(dt);

        let count = self.world.len();
        let start = Instant::now();
        self.quadtree.clear();
        for body in self.world.bodies() {
            self.quadtree.insert(body.id, body.rect());
        }
        self.metrics.record_timing(
            "update_with_quadtree",
            start.elapsed().as_secs_f64() * 1000.0,
            count,
        );
        self.metrics
            .record_size("update_with_quadtree", self.quadtree.byte_size(), count);

        for slot in 0..self.world.len() {
            let probe = {
                let body = &self.world.bodies()[slot];
                (body.id, body.rect())
            };
            for candidate in self.quadtree.search(probe.1) {
                self.resolve_candidate(probe.0, candidate);
            }
        }
    }

    fn step_with_grid(&mut self, dt: f64) {
        self.move_bodies(dt);

        let count = self.world.len();
        let start = Instant::now();
        self.grid.update(&self.world);
        self.metrics.record_timing(
            "update_with_grid",
            start.elapsed().as_secs_f64() * 1000.0,
            count,
        );
        self.metrics
            .record_size("update_with_grid", self.grid.byte_size(), count);

        for slot in 0..self.world.len() {
            let id = self.world.bodies()[slot].id;
            for candidate in self.grid.query(id) {
                self.resolve_candidate(id, candidate);
            }
        }
    }

    fn step_with_bvh(&mut self, dt: f64) {
        self.move_bodies(dt);

        let count = self.world.len();
        let start = Instant::now();
        self.bvh.update(&self.world);
        self.metrics.record_timing(
            "update_with_bvh",
            start.elapsed().as_secs_f64() * 1000.0,
            count,
        );
        self.metrics
            .record_size("update_with_bvh", self.bvh.byte_size(), count);

        for (a, b) in self.bvh.detect_collisions() {
            self.resolve_candidate(a, b);
        }
    }

    /// Narrow phase plus resolution for one broad-phase candidate pair.
    fn resolve_candidate(&mut self, a: BodyId, b: BodyId) {
        if a == b {
            return;
        }
        let (Some(body_a), Some(body_b)) = (self.world.get(a), self.world.get(b)) else {
            return;
        };
        if !circles_overlap(body_a.x, body_a.radius, body_b.x, body_b.radius) {
            return;
        }
        if let Some((body_a, body_b)) = self.world.pair_mut(a, b) {
            resolve_elastic(body_a, body_b);
        }
    }
}
