//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Every field of [`crate::config::GameConfig`] defaults to one of these
//! constants; edit the TOML overrides for quick experiments and promote the
//! numbers here once they stick.

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Width of the playfield (world units; 1 unit = 1 pixel).
///
/// The arena is centred on the origin, so entities live within ±ARENA_WIDTH/2
/// horizontally. The window resolution matches so the whole arena is visible
/// through a static camera.
pub const ARENA_WIDTH: f32 = 800.0;

/// Height of the playfield (world units).
pub const ARENA_HEIGHT: f32 = 600.0;

/// Distance outside the arena edge at which enemies materialise.
///
/// Spawns are offset outward by exactly this amount so enemies walk into view
/// instead of popping into existence on-screen.
pub const EDGE_SPAWN_BUFFER: f32 = 10.0;

// ── Difficulty Phases ─────────────────────────────────────────────────────────

/// Seconds each difficulty phase lasts before the next transition.
pub const PHASE_DURATION_SECS: f32 = 60.0;

/// Spawn interval numerator: the interval for phase `p` is
/// `max(floor, base − p × step)` milliseconds.
///
/// At base 1000 / step 100 / floor 300 the schedule runs
/// 900, 800, 700, … and bottoms out at 300 ms from phase 7 onward.
pub const SPAWN_INTERVAL_BASE_MS: u32 = 1000;

/// Per-phase reduction of the spawn interval (ms). See [`SPAWN_INTERVAL_BASE_MS`].
pub const SPAWN_INTERVAL_STEP_MS: u32 = 100;

/// Hard floor for the spawn interval (ms).
///
/// Below ~250 ms the arena saturates faster than a player can clear it even
/// with perfect aim; 300 keeps late phases frantic but survivable.
pub const SPAWN_INTERVAL_FLOOR_MS: u32 = 300;

/// Flat speed bonus (u/s) granted to every live enemy on each phase transition.
///
/// Veterans that survive several transitions stack the bonus, so clearing old
/// enemies before a transition is rewarded.
pub const PHASE_SPEED_STEP: f32 = 10.0;

/// Phase on which the one-per-run boss is injected into the spawn stream.
pub const BOSS_PHASE: u32 = 3;

/// Maximum number of live enemies.
///
/// When the cap is reached the spawn timer still fires and resets, but the
/// spawn itself is skipped, so the cadence is preserved once room frees up.
pub const MAX_LIVE_ENEMIES: u32 = 48;

// ── Player ────────────────────────────────────────────────────────────────────

/// Player movement speed (u/s) along each axis while a direction key is held.
pub const PLAYER_SPEED: f32 = 200.0;

/// Player starting and maximum HP.
pub const PLAYER_MAX_HP: f32 = 100.0;

/// Radius (u) of the player's ball collider.
pub const PLAYER_COLLIDER_RADIUS: f32 = 12.0;

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Speed (u/s) of fired bullets.
pub const BULLET_SPEED: f32 = 400.0;

/// Damage one bullet deals to the enemy it hits.
pub const BULLET_DAMAGE: f32 = 10.0;

/// Seconds after which a live bullet is despawned.
///
/// At 400 u/s a bullet covers 400 u in its lifetime (half the arena width),
/// so misses clean themselves up quickly.
pub const BULLET_LIFETIME_SECS: f32 = 1.0;

/// Radius (u) of a bullet's ball collider.
pub const BULLET_COLLIDER_RADIUS: f32 = 3.0;

/// Minimum seconds between consecutive shots while Space is held.
pub const FIRE_COOLDOWN_SECS: f32 = 0.15;

/// Maximum number of bullets alive at once. Firing is blocked at the cap.
pub const MAX_LIVE_BULLETS: u32 = 30;

// ── Score ─────────────────────────────────────────────────────────────────────

/// Kills credited per enemy destroyed by a bullet.
/// Contact kills (enemy rams the player) award nothing.
pub const KILL_SCORE: u32 = 1;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size for the HUD labels (HP, kills, phase).
pub const HUD_FONT_SIZE: f32 = 14.0;

/// Width of the HP bar per point of HP (px). At 2.0 a full bar spans 200 px.
pub const HUD_BAR_PX_PER_HP: f32 = 2.0;

/// Height of the HP bar (px).
pub const HUD_BAR_HEIGHT: f32 = 20.0;
