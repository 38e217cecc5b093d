use std::time::Instant;

use crate::simulation::engine::IndexKind;
use crate::simulation::manager::ParticleManager;
use crate::simulation::params::Parameters;

/// Helper to build a manager with `n` bodies and a fixed seed
fn make_manager(n: usize, kind: IndexKind) -> ParticleManager {
    let params = Parameters {
        particle_count: n,
        seed: 42,
        ..Parameters::default()
    };
    ParticleManager::new(params, kind)
}

/// Compare one full step across the three indices for a few system sizes
pub fn bench_step() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let mut row = format!("N = {n:5}");
        for (kind, label) in [
            (IndexKind::QuadTree, "quadtree"),
            (IndexKind::Grid, "grid"),
            (IndexKind::Bvh, "bvh"),
        ] {
            let mut manager = make_manager(n, kind);

            // Warm up
            manager.step(0.15);

            let t0 = Instant::now();
            manager.step(0.15);
            let elapsed = t0.elapsed().as_secs_f64() * 1000.0;

            row.push_str(&format!(", {label} = {elapsed:8.4} ms"));
        }
        println!("{row}");
    }
}

/// Benchmark the full step for a range of n, one row per size
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,quadtree_ms,grid_ms,bvh_ms");

    // Steps of 200 to give a smoother graph
    for n in (200..=6400).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 1600 { 5 } else { 1 };

        let mut cells = Vec::with_capacity(3);
        for kind in [IndexKind::QuadTree, IndexKind::Grid, IndexKind::Bvh] {
            let mut manager = make_manager(n, kind);

            // Warm-up one step
            manager.step(0.15);

            let t0 = Instant::now();
            for _ in 0..steps {
                manager.step(0.15);
            }
            let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
            cells.push(format!("{ms:.6}"));
        }

        println!("{},{}", n, cells.join(","));
    }
}

/// Time only the index refresh by stepping with zero dt (no motion, the
/// narrow phase still runs on whatever overlaps the spawn produced)
pub fn bench_rebuild() {
    println!("N,quadtree_rebuild_ms,grid_update_ms,bvh_build_ms");

    for n in (500..=8000).step_by(500) {
        let mut cells = Vec::with_capacity(3);
        for kind in [IndexKind::QuadTree, IndexKind::Grid, IndexKind::Bvh] {
            let mut manager = make_manager(n, kind);
            manager.step(0.0);

            let label = match kind {
                IndexKind::QuadTree => "update_with_quadtree",
                IndexKind::Grid => "update_with_grid",
                IndexKind::Bvh => "update_with_bvh",
            };
            let key = format!("{label}{n}");
            let ms = manager
                .metrics()
                .timings()
                .get(&key)
                .map(|&(_, ms)| ms)
                .unwrap_or(0.0);
            cells.push(format!("{ms:.6}"));
        }
        println!("{},{}", n, cells.join(","));
    }
}
