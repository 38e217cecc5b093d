use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::simulation::engine::IndexKind;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{BodyColor, BodyId, NVec2};

#[derive(Component)]
struct BodySlot(pub BodyId);

pub fn run_2d(scenario: Scenario) {
    println!(
        "run_2d: starting Bevy viewer with {} bodies ({:?} index)",
        scenario.manager.world().len(),
        scenario.manager.active_index()
    );

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (physics_step_system, sync_bodies_system, draw_lines_system),
        )
        .run();
}

/// Simulation space has its origin at the top-left corner with y growing
/// downwards; Bevy's 2D camera is centered with y growing upwards.
fn to_screen(position: NVec2, width: f64, height: f64) -> Vec3 {
    Vec3::new(
        (position.x - width / 2.0) as f32,
        (height / 2.0 - position.y) as f32,
        0.0,
    )
}

fn setup_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    let (w, h) = (
        scenario.parameters.screen_width,
        scenario.parameters.screen_height,
    );
    for body in scenario.manager.world().bodies() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(body.radius as f32))),
                material: materials.add(ColorMaterial::from(Color::WHITE)),
                transform: Transform::from_translation(to_screen(body.x, w, h)),
                ..Default::default()
            },
            BodySlot(body.id),
        ));
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario {
        manager,
        parameters,
        ..
    } = &mut *scenario;

    manager.step(parameters.dt);
}

fn sync_bodies_system(
    scenario: Res<Scenario>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(&BodySlot, &mut Transform, &Handle<ColorMaterial>)>,
) {
    let (w, h) = (
        scenario.parameters.screen_width,
        scenario.parameters.screen_height,
    );
    for (BodySlot(id), mut transform, material) in &mut query {
        if let Some(body) = scenario.manager.world().get(*id) {
            transform.translation = to_screen(body.x, w, h);
            if body.color == BodyColor::Collided {
                if let Some(material) = materials.get_mut(material) {
                    material.color = Color::BLUE;
                }
            }
        }
    }
}

/// Debug geometry of the active index: quadtree node rectangles, BVH node
/// boxes or the grid's cell lines.
fn draw_lines_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    if !scenario.manager.draw_lines() {
        return;
    }

    let manager = &scenario.manager;
    let (w, h) = (
        scenario.parameters.screen_width,
        scenario.parameters.screen_height,
    );

    match manager.active_index() {
        IndexKind::QuadTree => {
            for rect in manager.quadtree().node_rects() {
                let center = to_screen(rect.center(), w, h).truncate();
                gizmos.rect_2d(
                    center,
                    0.0,
                    Vec2::new(rect.w as f32, rect.h as f32),
                    Color::GRAY,
                );
            }
        }
        IndexKind::Bvh => {
            for node in manager.bvh().nodes() {
                let center = to_screen((node.aabb_min + node.aabb_max) * 0.5, w, h).truncate();
                let size = node.aabb_max - node.aabb_min;
                gizmos.rect_2d(
                    center,
                    0.0,
                    Vec2::new(size.x as f32, size.y as f32),
                    Color::GRAY,
                );
            }
        }
        IndexKind::Grid => {
            let grid = manager.grid();
            for col in 0..=grid.cols() {
                let x = col as f64 * grid.cell_width();
                let top = to_screen(NVec2::new(x, 0.0), w, h).truncate();
                let bottom = to_screen(NVec2::new(x, h), w, h).truncate();
                gizmos.line_2d(top, bottom, Color::GRAY);
            }
            for row in 0..=grid.rows() {
                let y = row as f64 * grid.cell_height();
                let left = to_screen(NVec2::new(0.0, y), w, h).truncate();
                let right = to_screen(NVec2::new(w, y), w, h).truncate();
                gizmos.line_2d(left, right, Color::GRAY);
            }
        }
    }
}
