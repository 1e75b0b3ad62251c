//! Camera, filled-polygon mesh helpers, and the in-run HUD.
//!
//! ## Why Mesh2d?
//!
//! Every visible body in the arena is a flat-colour convex polygon, so each
//! one gets a retained `Mesh2d` + `ColorMaterial` built once at spawn time
//! (the `attach_*_mesh_system`s query `Added<T>`). Bevy batches compatible
//! `Mesh2d` draw calls, which keeps a few dozen enemies and bullets at a
//! single-digit draw-call count without an asset pipeline.
//!
//! ## HUD
//!
//! The HUD is one `HudRoot` tree in screen space: a red health bar with a
//! white label in the top-left corner, and the kill counter with the phase
//! label beneath it in the top-right. It is spawned per run and swept with
//! the rest of the session, so a fresh run always starts from a fresh tree.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

use crate::config::GameConfig;
use crate::player::{PlayerHealth, PlayerScore};
use crate::waves::PhaseState;

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the in-run HUD tree; swept with the rest of the session.
#[derive(Component)]
pub struct HudRoot;

/// Tags the red health-bar fill node; its width tracks current hp.
#[derive(Component)]
pub struct HpBarFill;

/// Tags the "HP: n" label drawn over the bar.
#[derive(Component)]
pub struct HpBarLabel;

/// Tags the kill counter in the top-right corner.
#[derive(Component)]
pub struct KillCounterText;

/// Tags the phase label beneath the kill counter.
#[derive(Component)]
pub struct PhaseLabelText;

// ── Startup: camera ───────────────────────────────────────────────────────────

/// Spawn the 2D camera.
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d with default scale shows roughly the full window area
    commands.spawn(Camera2d);
}

// ── Session setup: HUD ────────────────────────────────────────────────────────

/// Spawn the in-run HUD tree.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │ ▓▓▓▓▓▓▓ HP: 100 ▓▓▓▓▓▓▓          Kills: 0  │
/// │                                   Phase 1   │
/// │                                             │
/// │                  (arena)                    │
/// └─────────────────────────────────────────────┘
/// ```
///
/// The bar fill is a plain coloured node whose pixel width is
/// `hud_bar_px_per_hp × hp`, so it shrinks left-to-right as the player takes
/// hits. The label sits in its own absolute node painted after the fill.
pub fn setup_hud(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|hud| {
            // ── Health bar fill ───────────────────────────────────────────────
            hud.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(10.0),
                    top: Val::Px(10.0),
                    width: Val::Px(config.hud_bar_px_per_hp * config.player_max_hp),
                    height: Val::Px(config.hud_bar_height),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.86, 0.10, 0.10)),
                HpBarFill,
            ));

            // ── HP label over the bar ─────────────────────────────────────────
            hud.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(16.0),
                    top: Val::Px(12.0),
                    ..default()
                },
                HpBarLabel,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new(format!("HP: {}", config.player_max_hp as i32)),
                    TextFont {
                        font_size: config.hud_font_size,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });

            // ── Kill counter ──────────────────────────────────────────────────
            hud.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(12.0),
                    top: Val::Px(10.0),
                    ..default()
                },
                KillCounterText,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new("Kills: 0"),
                    TextFont {
                        font_size: config.hud_font_size,
                        ..default()
                    },
                    TextColor(Color::srgb(0.95, 0.88, 0.45)),
                ));
            });

            // ── Phase label ───────────────────────────────────────────────────
            hud.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(12.0),
                    top: Val::Px(10.0 + config.hud_font_size + 6.0),
                    ..default()
                },
                PhaseLabelText,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new("Phase 1"),
                    TextFont {
                        font_size: config.hud_font_size,
                        ..default()
                    },
                    TextColor(Color::srgb(0.0, 1.0, 1.0)),
                ));
            });
        });
}

// ── Update: HUD refresh ───────────────────────────────────────────────────────

/// Shrink the health bar and rewrite its label when player health changes.
pub fn refresh_hp_bar_system(
    config: Res<GameConfig>,
    q_player: Query<&PlayerHealth, Changed<PlayerHealth>>,
    mut fill_query: Query<&mut Node, With<HpBarFill>>,
    label_query: Query<&Children, With<HpBarLabel>>,
    mut text_query: Query<&mut Text>,
) {
    let Ok(health) = q_player.single() else {
        return;
    };
    let hp = health.hp.max(0.0);
    for mut node in fill_query.iter_mut() {
        node.width = Val::Px(config.hud_bar_px_per_hp * hp);
    }
    for children in label_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!("HP: {}", hp as i32));
            }
        }
    }
}

/// Refresh the kill counter when the score changes.
pub fn refresh_kill_counter_system(
    score: Res<PlayerScore>,
    parent_query: Query<&Children, With<KillCounterText>>,
    mut text_query: Query<&mut Text>,
) {
    if !score.is_changed() {
        return;
    }
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!("Kills: {}", score.kills));
            }
        }
    }
}

/// Refresh the phase label when the phase number actually moves.
///
/// `PhaseState` mutates every frame through its clocks, so resource change
/// detection cannot gate this; the last shown phase is tracked locally.
pub fn refresh_phase_label_system(
    phase_state: Res<PhaseState>,
    mut last_phase: Local<u32>,
    parent_query: Query<&Children, With<PhaseLabelText>>,
    mut text_query: Query<&mut Text>,
) {
    if *last_phase == phase_state.phase {
        return;
    }
    *last_phase = phase_state.phase;
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!("Phase {}", phase_state.phase));
            }
        }
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Fan-triangulate a convex polygon into a renderable [`Mesh`].
///
/// Triangle fan from vertex 0: triangles `(0, i, i+1)` for `i ∈ 1..n-2`.
/// Valid for any polygon that is star-shaped as seen from vertex 0, which
/// covers the regular n-gons from [`ngon_vertices`] and the player dart.
///
/// UVs are mapped from local-space coordinates so a future texture atlas can
/// be dropped in without a UV re-bake step.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n];
    // Map ±50 world-unit local coords to roughly 0–1 UV range.
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [(v.x / 100.0) + 0.5, (v.y / 100.0) + 0.5])
        .collect();

    let mut indices: Vec<u32> = Vec::with_capacity((n - 2) * 3);
    for i in 1..(n as u32 - 1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Vertices of a regular n-gon in local space, first vertex pointing up.
pub fn ngon_vertices(sides: u32, radius: f32) -> Vec<Vec2> {
    debug_assert!(sides >= 3, "polygon must have ≥ 3 sides");
    (0..sides)
        .map(|i| {
            let theta =
                std::f32::consts::TAU * i as f32 / sides as f32 + std::f32::consts::FRAC_PI_2;
            Vec2::new(theta.cos(), theta.sin()) * radius
        })
        .collect()
}
