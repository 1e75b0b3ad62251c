use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use overrun::config::{self, GameConfig};
use overrun::menu::MenuPlugin;
use overrun::rendering;
use overrun::session::SessionPlugin;

/// Configure Rapier physics: disable gravity for the top-down arena.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Overrun".into(),
                resolution: WindowResolution::new(800, 600),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Insert GameConfig with compiled defaults; load_game_config will
        // overwrite it from assets/gameplay.toml (if present) in the Startup
        // schedule.
        .insert_resource(GameConfig::default())
        // pixels_per_meter(1.0) keeps world units and screen pixels identical,
        // so collider radii and speeds in the config read directly as pixels.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        // MenuPlugin registers GameState and must come before anything that
        // gates on in_state(...).
        .add_plugins(MenuPlugin)
        .add_plugins(SessionPlugin)
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the final values.
                config::load_game_config,
                rendering::setup_camera.after(config::load_game_config),
                setup_physics_config,
            ),
        )
        .run();
}
