//! Player avatar: movement, firing, and bullet bookkeeping.
//!
//! The avatar is a velocity-driven kinematic body so enemies cannot shove it
//! around; movement is axis-exclusive (left wins over right, up over down)
//! at a flat speed, clamped to the arena.  Bullets fly along the last
//! movement direction, live for a fixed time, and are capped in number.

use crate::config::GameConfig;
use crate::constants::PLAYER_MAX_HP;
use crate::rendering::{filled_polygon_mesh, ngon_vertices};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::f32::consts::FRAC_PI_2;

// ── Components & resources ────────────────────────────────────────────────────

/// Marker plus aim state for the player avatar.
#[derive(Component, Debug, Clone, Copy)]
pub struct Player {
    /// Unit vector of the last movement direction; bullets fire along it.
    pub facing: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        // A fresh avatar aims at the top edge.
        Self { facing: Vec2::Y }
    }
}

/// Player hit points.  `hp` never goes below zero.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerHealth {
    pub hp: f32,
    pub max_hp: f32,
}

impl Default for PlayerHealth {
    fn default() -> Self {
        Self {
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
        }
    }
}

/// A live bullet.  `age` is seconds since firing.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bullet {
    pub age: f32,
}

/// Kill counter for the current run.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerScore {
    pub kills: u32,
}

impl PlayerScore {
    #[inline]
    pub fn record_kills(&mut self, count: u32) {
        self.kills += count;
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Seconds until the next shot is allowed.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FireCooldown {
    pub timer: f32,
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawns the player avatar at the arena centre.
pub fn spawn_player(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Player::default(),
        PlayerHealth {
            hp: config.player_max_hp,
            max_hp: config.player_max_hp,
        },
        Transform::from_translation(Vec3::new(0.0, 0.0, 0.5)),
        Visibility::default(),
        RigidBody::KinematicVelocityBased,
        Collider::ball(config.player_collider_radius),
        Velocity::zero(),
        // Group 1 = player; only enemy contacts matter.
        CollisionGroups::new(Group::GROUP_1, Group::GROUP_2),
        ActiveEvents::COLLISION_EVENTS,
    ));
    println!("✓ Player spawned at arena centre");
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Reads the keyboard, sets the avatar's velocity, updates its facing, and
/// clamps it to the arena.
///
/// Arrows and WASD are both bound.  Axes are exclusive: when both directions
/// of an axis are held, left beats right and up beats down.
pub fn player_move_system(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    mut q_player: Query<(&mut Transform, &mut Velocity, &mut Player)>,
) {
    let Ok((mut transform, mut velocity, mut player)) = q_player.single_mut() else {
        return;
    };

    let mut vel = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) || keys.pressed(KeyCode::KeyA) {
        vel.x = -config.player_speed;
    } else if keys.pressed(KeyCode::ArrowRight) || keys.pressed(KeyCode::KeyD) {
        vel.x = config.player_speed;
    }
    if keys.pressed(KeyCode::ArrowUp) || keys.pressed(KeyCode::KeyW) {
        vel.y = config.player_speed;
    } else if keys.pressed(KeyCode::ArrowDown) || keys.pressed(KeyCode::KeyS) {
        vel.y = -config.player_speed;
    }

    velocity.linvel = vel;
    if vel != Vec2::ZERO {
        player.facing = vel.normalize();
        // The ship dart points +Y at identity; steer it toward the aim.
        transform.rotation =
            Quat::from_rotation_z(player.facing.y.atan2(player.facing.x) - FRAC_PI_2);
    }

    // The physics step integrates velocity after this system, so the clamp
    // trails the boundary by one frame at most.
    let half_w = config.arena_width / 2.0 - config.player_collider_radius;
    let half_h = config.arena_height / 2.0 - config.player_collider_radius;
    transform.translation.x = transform.translation.x.clamp(-half_w, half_w);
    transform.translation.y = transform.translation.y.clamp(-half_h, half_h);
}

/// Fires a bullet along the avatar's facing while Space is held, subject to
/// the cooldown and the live-bullet cap.
pub fn player_fire_system(
    mut commands: Commands,
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    mut cooldown: ResMut<FireCooldown>,
    q_player: Query<(&Transform, &Player)>,
    q_bullets: Query<(), With<Bullet>>,
) {
    cooldown.timer = (cooldown.timer - time.delta_secs()).max(0.0);

    let Ok((transform, player)) = q_player.single() else {
        return;
    };
    if !keys.pressed(KeyCode::Space) || cooldown.timer > 0.0 {
        return;
    }
    if q_bullets.iter().count() as u32 >= config.max_live_bullets {
        return;
    }
    cooldown.timer = config.fire_cooldown_secs;

    let dir = player.facing;
    let muzzle = transform.translation.truncate() + dir * (config.player_collider_radius + 2.0);
    commands.spawn((
        Bullet::default(),
        Transform::from_translation(muzzle.extend(0.2)),
        Visibility::default(),
        RigidBody::KinematicVelocityBased,
        Velocity {
            linvel: dir * config.bullet_speed,
            angvel: 0.0,
        },
        Collider::ball(config.bullet_collider_radius),
        // Sensor: a solid kinematic bullet would shove dynamic enemies around.
        Sensor,
        Ccd { enabled: true },
        // Group 3 = player bullets; they only register against enemies.
        CollisionGroups::new(Group::GROUP_3, Group::GROUP_2),
        ActiveCollisionTypes::DYNAMIC_KINEMATIC,
        ActiveEvents::COLLISION_EVENTS,
    ));
}

/// Ages every bullet and despawns the expired ones.
pub fn bullet_lifetime_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut q_bullets: Query<(Entity, &mut Bullet)>,
) {
    for (entity, mut bullet) in q_bullets.iter_mut() {
        bullet.age += time.delta_secs();
        if bullet.age >= config.bullet_lifetime_secs {
            commands.entity(entity).despawn();
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Local-space dart silhouette for the avatar, nose on +Y.
const PLAYER_SILHOUETTE: [Vec2; 4] = [
    Vec2::new(0.0, 14.0),
    Vec2::new(9.0, -10.0),
    Vec2::new(0.0, -5.0),
    Vec2::new(-9.0, -10.0),
];

/// Attach the dart silhouette to a newly spawned avatar.
pub fn attach_player_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        // The dart is star-shaped from vertex 0, so the fan fill covers it
        // despite the tail notch.
        let mesh_handle = meshes.add(filled_polygon_mesh(&PLAYER_SILHOUETTE));
        let material_handle =
            materials.add(ColorMaterial::from_color(Color::srgb(0.55, 0.80, 1.0)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh_handle), MeshMaterial2d(material_handle)));
    }
}

/// Attach a small filled disc to every newly spawned bullet.
pub fn attach_bullet_mesh_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    query: Query<Entity, Added<Bullet>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        let vertices = ngon_vertices(8, config.bullet_collider_radius);
        let mesh_handle = meshes.add(filled_polygon_mesh(&vertices));
        let material_handle =
            materials.add(ColorMaterial::from_color(Color::srgb(1.0, 0.95, 0.75)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh_handle), MeshMaterial2d(material_handle)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PLAYER_SPEED;

    fn input_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.insert_resource(GameConfig::default());
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    fn release(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    #[test]
    fn fresh_avatar_aims_up() {
        assert_eq!(Player::default().facing, Vec2::Y);
    }

    #[test]
    fn movement_is_axis_exclusive() {
        let mut app = input_test_app();
        app.add_systems(Update, player_move_system);
        let avatar = app
            .world_mut()
            .spawn((Player::default(), Transform::default(), Velocity::zero()))
            .id();

        // Left and right held together: left wins. Up alone: up wins.
        press(&mut app, KeyCode::ArrowLeft);
        press(&mut app, KeyCode::ArrowRight);
        press(&mut app, KeyCode::ArrowUp);
        app.update();

        let velocity = app.world().get::<Velocity>(avatar).expect("velocity");
        assert_eq!(velocity.linvel, Vec2::new(-PLAYER_SPEED, PLAYER_SPEED));
    }

    #[test]
    fn facing_persists_after_keys_release() {
        let mut app = input_test_app();
        app.add_systems(Update, player_move_system);
        let avatar = app
            .world_mut()
            .spawn((Player::default(), Transform::default(), Velocity::zero()))
            .id();

        press(&mut app, KeyCode::ArrowRight);
        app.update();
        release(&mut app, KeyCode::ArrowRight);
        app.update();

        let player = app.world().get::<Player>(avatar).expect("player");
        assert_eq!(player.facing, Vec2::X, "facing keeps the last aim");
        let velocity = app.world().get::<Velocity>(avatar).expect("velocity");
        assert_eq!(velocity.linvel, Vec2::ZERO, "no keys, no movement");
    }

    #[test]
    fn avatar_is_clamped_to_the_arena() {
        let mut app = input_test_app();
        app.add_systems(Update, player_move_system);
        let avatar = app
            .world_mut()
            .spawn((
                Player::default(),
                Transform::from_translation(Vec3::new(900.0, -900.0, 0.5)),
                Velocity::zero(),
            ))
            .id();

        app.update();

        let config = GameConfig::default();
        let transform = app.world().get::<Transform>(avatar).expect("transform");
        assert_eq!(
            transform.translation.x,
            config.arena_width / 2.0 - config.player_collider_radius
        );
        assert_eq!(
            transform.translation.y,
            -(config.arena_height / 2.0 - config.player_collider_radius)
        );
    }

    #[test]
    fn fire_spawns_one_bullet_along_facing() {
        let mut app = input_test_app();
        app.init_resource::<FireCooldown>();
        app.add_systems(Update, player_fire_system);
        app.world_mut()
            .spawn((Player::default(), Transform::default()));

        press(&mut app, KeyCode::Space);
        app.update();

        let config = GameConfig::default();
        let world = app.world_mut();
        let bullets: Vec<(Vec2, Vec2)> = world
            .query::<(&Bullet, &Transform, &Velocity)>()
            .iter(world)
            .map(|(_, t, v)| (t.translation.truncate(), v.linvel))
            .collect();
        assert_eq!(bullets.len(), 1);
        let (muzzle, linvel) = bullets[0];
        assert_eq!(linvel, Vec2::new(0.0, config.bullet_speed));
        assert!(
            muzzle.y > 0.0,
            "bullet starts ahead of the avatar, got {muzzle:?}"
        );
    }

    #[test]
    fn fire_respects_the_cooldown() {
        let mut app = input_test_app();
        // A cooldown no pair of headless frames can outlast.
        app.insert_resource(GameConfig {
            fire_cooldown_secs: 60.0,
            ..GameConfig::default()
        });
        app.init_resource::<FireCooldown>();
        app.add_systems(Update, player_fire_system);
        app.world_mut()
            .spawn((Player::default(), Transform::default()));

        press(&mut app, KeyCode::Space);
        app.update();
        app.update();

        let world = app.world_mut();
        let live = world.query::<&Bullet>().iter(world).count();
        assert_eq!(live, 1, "second frame must not fire inside the cooldown");
    }

    #[test]
    fn fire_is_blocked_at_the_bullet_cap() {
        let mut app = input_test_app();
        app.init_resource::<FireCooldown>();
        app.add_systems(Update, player_fire_system);
        app.world_mut()
            .spawn((Player::default(), Transform::default()));

        let cap = GameConfig::default().max_live_bullets;
        for _ in 0..cap {
            app.world_mut().spawn(Bullet::default());
        }

        press(&mut app, KeyCode::Space);
        app.update();

        let world = app.world_mut();
        let live = world.query::<&Bullet>().iter(world).count() as u32;
        assert_eq!(live, cap, "cap reached: no new bullet");
    }

    #[test]
    fn lifetime_reaps_expired_bullets() {
        let mut app = input_test_app();
        app.add_systems(Update, bullet_lifetime_system);

        let young = app.world_mut().spawn(Bullet { age: 0.0 }).id();
        let expired = app.world_mut().spawn(Bullet { age: 2.0 }).id();

        app.update();

        assert!(app.world().get_entity(young).is_ok());
        assert!(
            app.world().get_entity(expired).is_err(),
            "bullet past its lifetime must despawn"
        );
    }

    #[test]
    fn score_accumulates_and_resets() {
        let mut score = PlayerScore::default();
        score.record_kills(1);
        score.record_kills(2);
        assert_eq!(score.kills, 3);
        score.reset();
        assert_eq!(score.kills, 0);
    }
}
