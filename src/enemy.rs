//! Enemy kinds, stat table, and chase behavior.
//!
//! | Kind     | Role                                  |
//! |----------|---------------------------------------|
//! | Crawler  | slow filler fodder                    |
//! | Chaser   | baseline pursuer                      |
//! | Bouncer  | mid-speed harasser                    |
//! | Leaper   | fast, fragile rusher                  |
//! | Exploder | fragile but punishing on contact      |
//! | Bruiser  | slow tank (phase 2+)                  |
//! | Reaper   | fast lethal elite (phase 2+)          |
//! | Overlord | one-per-run boss                      |
//!
//! Kinds differ in stats and silhouette only; every enemy chases the player in
//! a straight line at its own speed.  Which kinds a phase may spawn is decided
//! in [`crate::waves`].

use crate::player::Player;
use crate::rendering::{filled_polygon_mesh, ngon_vertices};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Kinds & stats ─────────────────────────────────────────────────────────────

/// Every enemy kind in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Crawler,
    Chaser,
    Bouncer,
    Leaper,
    Exploder,
    Bruiser,
    Reaper,
    Overlord,
}

impl EnemyKind {
    /// All kinds, in stat-table order.
    pub const ALL: [EnemyKind; 8] = [
        EnemyKind::Crawler,
        EnemyKind::Chaser,
        EnemyKind::Bouncer,
        EnemyKind::Leaper,
        EnemyKind::Exploder,
        EnemyKind::Bruiser,
        EnemyKind::Reaper,
        EnemyKind::Overlord,
    ];

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Crawler => "crawler",
            EnemyKind::Chaser => "chaser",
            EnemyKind::Bouncer => "bouncer",
            EnemyKind::Leaper => "leaper",
            EnemyKind::Exploder => "exploder",
            EnemyKind::Bruiser => "bruiser",
            EnemyKind::Reaper => "reaper",
            EnemyKind::Overlord => "overlord",
        }
    }

    /// Ball collider radius (u); also the circumradius of the silhouette.
    pub fn radius(self) -> f32 {
        match self {
            EnemyKind::Crawler => 10.0,
            EnemyKind::Chaser => 9.0,
            EnemyKind::Bouncer => 9.0,
            EnemyKind::Leaper => 7.0,
            EnemyKind::Exploder => 8.0,
            EnemyKind::Bruiser => 13.0,
            EnemyKind::Reaper => 11.0,
            EnemyKind::Overlord => 22.0,
        }
    }

    /// Number of sides of the rendered silhouette polygon.
    pub fn silhouette_sides(self) -> u32 {
        match self {
            EnemyKind::Crawler => 4,
            EnemyKind::Chaser => 3,
            EnemyKind::Bouncer => 6,
            EnemyKind::Leaper => 3,
            EnemyKind::Exploder => 8,
            EnemyKind::Bruiser => 4,
            EnemyKind::Reaper => 5,
            EnemyKind::Overlord => 10,
        }
    }

    /// Fill color of the rendered silhouette.
    pub fn tint(self) -> Color {
        match self {
            EnemyKind::Crawler => Color::srgb(0.55, 0.75, 0.35),
            EnemyKind::Chaser => Color::srgb(0.90, 0.38, 0.25),
            EnemyKind::Bouncer => Color::srgb(0.30, 0.65, 0.90),
            EnemyKind::Leaper => Color::srgb(0.95, 0.80, 0.25),
            EnemyKind::Exploder => Color::srgb(0.95, 0.52, 0.10),
            EnemyKind::Bruiser => Color::srgb(0.60, 0.40, 0.75),
            EnemyKind::Reaper => Color::srgb(0.85, 0.20, 0.55),
            EnemyKind::Overlord => Color::srgb(0.95, 0.15, 0.15),
        }
    }
}

/// Movement, contact damage, and durability numbers for one enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    /// Chase speed (u/s).
    pub speed: f32,
    /// HP subtracted from the player on contact.
    pub damage: f32,
    /// Starting and maximum HP.
    pub max_hp: f32,
}

impl Default for EnemyStats {
    /// Fallback record for a kind with no table row.
    ///
    /// The enum is exhaustive so [`stats_for`] never actually falls back, but
    /// this is the documented record deserialisers should use for an unknown
    /// kind name.
    fn default() -> Self {
        Self {
            speed: 100.0,
            damage: 20.0,
            max_hp: 20.0,
        }
    }
}

/// The canonical stat table.
///
/// A chaser dies to exactly two bullets (20 hp at 10 damage each); a reaper
/// kills a sub-40-hp player in one touch.  Tuning either of those rows changes
/// the feel of the whole mid-game.
pub fn stats_for(kind: EnemyKind) -> EnemyStats {
    match kind {
        EnemyKind::Crawler => EnemyStats {
            speed: 60.0,
            damage: 10.0,
            max_hp: 30.0,
        },
        EnemyKind::Chaser => EnemyStats {
            speed: 80.0,
            damage: 20.0,
            max_hp: 20.0,
        },
        EnemyKind::Bouncer => EnemyStats {
            speed: 70.0,
            damage: 15.0,
            max_hp: 25.0,
        },
        EnemyKind::Leaper => EnemyStats {
            speed: 120.0,
            damage: 15.0,
            max_hp: 10.0,
        },
        EnemyKind::Exploder => EnemyStats {
            speed: 90.0,
            damage: 30.0,
            max_hp: 10.0,
        },
        EnemyKind::Bruiser => EnemyStats {
            speed: 50.0,
            damage: 30.0,
            max_hp: 60.0,
        },
        EnemyKind::Reaper => EnemyStats {
            speed: 110.0,
            damage: 40.0,
            max_hp: 40.0,
        },
        EnemyKind::Overlord => EnemyStats {
            speed: 40.0,
            damage: 50.0,
            max_hp: 200.0,
        },
    }
}

// ── Components ────────────────────────────────────────────────────────────────

/// Per-entity enemy state.  `speed` is mutable: phase transitions buff it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Current chase speed (u/s); base table speed plus any phase bonuses.
    pub speed: f32,
    /// HP subtracted from the player when this enemy makes contact.
    pub damage: f32,
}

/// Hit points of one enemy.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyHealth {
    pub hp: f32,
    pub max_hp: f32,
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawns one enemy of `kind` at `position` with its base table stats and the
/// full physics bundle.  Returns the new entity id.
pub fn spawn_enemy(commands: &mut Commands, kind: EnemyKind, position: Vec2) -> Entity {
    let stats = stats_for(kind);
    commands
        .spawn((
            Enemy {
                kind,
                speed: stats.speed,
                damage: stats.damage,
            },
            EnemyHealth {
                hp: stats.max_hp,
                max_hp: stats.max_hp,
            },
            Transform::from_translation(position.extend(0.25)),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::ball(kind.radius()),
            Velocity::zero(),
            Damping {
                linear_damping: 0.0,
                angular_damping: 4.0,
            },
            Restitution::coefficient(0.25),
            // Group 2 = enemies; they collide with the player (1), each other (2),
            // and bullets (3).
            CollisionGroups::new(
                Group::GROUP_2,
                Group::GROUP_1 | Group::GROUP_2 | Group::GROUP_3,
            ),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Points every enemy's velocity straight at the player at `enemy.speed`.
///
/// With no player alive (between despawn and the game-over transition) the
/// system leaves velocities untouched; the pipeline freeze handles the rest.
pub fn enemy_chase_system(
    q_player: Query<&Transform, With<Player>>,
    mut q_enemies: Query<(&Transform, &Enemy, &mut Velocity)>,
) {
    let Ok(player_transform) = q_player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();

    for (transform, enemy, mut velocity) in q_enemies.iter_mut() {
        let dir = (target - transform.translation.truncate()).normalize_or_zero();
        velocity.linvel = dir * enemy.speed;
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Attach a filled `Mesh2d` silhouette to every newly spawned enemy.
///
/// Uses [`Added<Enemy>`] so only entities that appeared since the previous
/// frame pay the cost; the silhouette and tint come straight off the kind.
pub fn attach_enemy_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &Enemy), Added<Enemy>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, enemy) in query.iter() {
        let vertices = ngon_vertices(enemy.kind.silhouette_sides(), enemy.kind.radius());
        let mesh_handle = meshes.add(filled_polygon_mesh(&vertices));
        let material_handle = materials.add(ColorMaterial::from_color(enemy.kind.tint()));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh_handle), MeshMaterial2d(material_handle)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_table_matches_tuning() {
        // The two rows the rest of the balance hangs off.
        let chaser = stats_for(EnemyKind::Chaser);
        assert_eq!(chaser.speed, 80.0);
        assert_eq!(chaser.damage, 20.0);
        assert_eq!(chaser.max_hp, 20.0);

        let reaper = stats_for(EnemyKind::Reaper);
        assert!(
            reaper.damage >= 40.0,
            "reaper must one-shot a low-hp player, got damage {}",
            reaper.damage
        );
    }

    #[test]
    fn overlord_is_the_tank_of_the_table() {
        let overlord = stats_for(EnemyKind::Overlord);
        for kind in EnemyKind::ALL {
            if kind != EnemyKind::Overlord {
                assert!(
                    stats_for(kind).max_hp < overlord.max_hp,
                    "{} should have less hp than the overlord",
                    kind.name()
                );
            }
        }
    }

    #[test]
    fn fallback_record_is_fixed() {
        let fallback = EnemyStats::default();
        assert_eq!(fallback.speed, 100.0);
        assert_eq!(fallback.damage, 20.0);
        assert_eq!(fallback.max_hp, 20.0);
    }

    #[test]
    fn every_kind_has_valid_geometry() {
        for kind in EnemyKind::ALL {
            assert!(kind.radius() > 0.0, "{} radius", kind.name());
            assert!(
                kind.silhouette_sides() >= 3,
                "{} needs a fillable polygon",
                kind.name()
            );
        }
    }

    #[test]
    fn chase_sets_velocity_toward_player() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, enemy_chase_system);

        app.world_mut().spawn((
            Player::default(),
            Transform::from_translation(Vec3::new(100.0, 0.0, 0.0)),
        ));
        let enemy = app
            .world_mut()
            .spawn((
                Enemy {
                    kind: EnemyKind::Chaser,
                    speed: 80.0,
                    damage: 20.0,
                },
                Transform::from_translation(Vec3::ZERO),
                Velocity::zero(),
            ))
            .id();

        app.update();

        let velocity = app
            .world()
            .get::<Velocity>(enemy)
            .expect("enemy keeps its velocity component");
        assert!((velocity.linvel.x - 80.0).abs() < 1e-3);
        assert!(velocity.linvel.y.abs() < 1e-3);
    }

    #[test]
    fn chase_without_player_is_a_no_op() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, enemy_chase_system);

        let enemy = app
            .world_mut()
            .spawn((
                Enemy {
                    kind: EnemyKind::Crawler,
                    speed: 60.0,
                    damage: 10.0,
                },
                Transform::from_translation(Vec3::new(50.0, 50.0, 0.0)),
                Velocity {
                    linvel: Vec2::new(1.0, 2.0),
                    angvel: 0.0,
                },
            ))
            .id();

        app.update();

        let velocity = app.world().get::<Velocity>(enemy).expect("velocity");
        assert_eq!(velocity.linvel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn enemy_on_top_of_player_holds_position() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, enemy_chase_system);

        app.world_mut()
            .spawn((Player::default(), Transform::from_translation(Vec3::ZERO)));
        let enemy = app
            .world_mut()
            .spawn((
                Enemy {
                    kind: EnemyKind::Leaper,
                    speed: 120.0,
                    damage: 15.0,
                },
                Transform::from_translation(Vec3::ZERO),
                Velocity {
                    linvel: Vec2::new(5.0, 5.0),
                    angvel: 0.0,
                },
            ))
            .id();

        app.update();

        let velocity = app.world().get::<Velocity>(enemy).expect("velocity");
        assert_eq!(velocity.linvel, Vec2::ZERO);
    }
}
