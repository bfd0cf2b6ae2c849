//! The demo level and the scripted input used by `--headless-frames`.

use glam::{Vec2, Vec3};
use orbitcam_app::{FIXED_DT, GameLoop};
use orbitcam_config::Config;
use orbitcam_input::InputFrame;
use orbitcam_physics::{Aabb, Collider, StaticWorld};
use orbitcam_scene::{Scene, Transform};
use tracing::info;

use crate::Game;

/// Distance from the origin to the inner face of the wall behind the
/// player's start.
pub const BACK_WALL_Z: f32 = 8.0;

fn add_box(scene: &mut Scene, world: &mut StaticWorld, name: &str, min: Vec3, max: Vec3) {
    let aabb = Aabb::new(min, max);
    let entity = scene.spawn(name, Transform::from_translation(aabb.center()));
    world.insert(Collider::cuboid(aabb).owned_by(entity));
}

/// Builds the sandbox: a ground slab, four pillars, a wall ahead of and a
/// wall behind the player, and the player with a body collider.
pub fn build(config: &Config) -> (Scene, StaticWorld) {
    let mut scene = Scene::new();
    let mut world = StaticWorld::new();

    add_box(
        &mut scene,
        &mut world,
        "Ground",
        Vec3::new(-50.0, -1.0, -50.0),
        Vec3::new(50.0, 0.0, 50.0),
    );
    for (i, (x, z)) in [(-4.0, -6.0), (4.0, -6.0), (-4.0, 4.0), (4.0, 4.0)]
        .into_iter()
        .enumerate()
    {
        add_box(
            &mut scene,
            &mut world,
            &format!("Pillar{}", i + 1),
            Vec3::new(x - 0.5, 0.0, z - 0.5),
            Vec3::new(x + 0.5, 4.0, z + 0.5),
        );
    }
    add_box(
        &mut scene,
        &mut world,
        "NorthWall",
        Vec3::new(-12.0, 0.0, -14.0),
        Vec3::new(12.0, 3.0, -13.5),
    );
    add_box(
        &mut scene,
        &mut world,
        "BackWall",
        Vec3::new(-12.0, 0.0, BACK_WALL_Z),
        Vec3::new(12.0, 5.0, BACK_WALL_Z + 0.5),
    );

    let player = scene.spawn(config.player.name.as_str(), Transform::IDENTITY);
    world.insert(
        Collider::cuboid(Aabb::from_center_half_extents(
            Vec3::new(0.0, 0.9, 0.0),
            Vec3::new(0.3, 0.9, 0.3),
        ))
        .owned_by(player),
    );

    (scene, world)
}

/// Input for frame `index` of a `total`-frame script.
///
/// The first quarter orbits the camera, the second zooms out while
/// raising it, and the second half walks the player backwards toward
/// the back wall so the camera is squeezed between them.
pub fn scripted_input(index: u32, total: u32) -> InputFrame {
    let quarter = (total / 4).max(1);
    match index / quarter {
        0 => InputFrame {
            look: Vec2::new(1.5, 0.0),
            look_held: true,
            ..Default::default()
        },
        1 => InputFrame {
            scroll: -0.05,
            look: Vec2::new(0.0, -0.5),
            look_held: true,
            ..Default::default()
        },
        _ => InputFrame {
            movement: Vec2::new(0.0, -1.0),
            ..Default::default()
        },
    }
}

/// Runs `frames` scripted frames at the fixed rate and logs the final pose.
pub fn run_scripted(game: &mut Game, frames: u32) {
    info!("Running {frames} scripted frames");
    let mut game_loop = GameLoop::new();
    for i in 0..frames {
        game.set_input(scripted_input(i, frames));
        game_loop.tick_with(FIXED_DT, game);
    }
    game.log_pose();
}
