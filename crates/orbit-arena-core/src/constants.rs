//! Simulation constants and tuning parameters.

// --- Frame timing ---

/// Largest frame delta fed to the physics step (seconds).
/// Keeps a stalled tab from producing a spiral of death.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Rendering layer for every simulated entity. Not simulated.
pub const RENDER_Z: f32 = 0.0;

// --- Arena ---

/// Radius of the circular arena.
pub const ARENA_RADIUS: f32 = 15.0;

/// Enemies spawn this far outside the arena edge.
pub const ENEMY_SPAWN_MARGIN: f32 = 3.0;

/// Obstacles and items spawn inside this fraction of the arena radius.
pub const INNER_SPAWN_FRACTION: f32 = 0.8;

/// Radius of the circle PVP players start on.
pub const PVP_SPAWN_RADIUS: f32 = 5.0;

// --- Collision categories ---

pub const CATEGORY_PLAYER: u32 = 1;
pub const CATEGORY_PLAYER_WEAPON: u32 = 2;
pub const CATEGORY_ENEMY_WEAPON: u32 = 4;
pub const CATEGORY_ENEMY: u32 = 8;
pub const CATEGORY_OBSTACLE: u32 = 16;
pub const CATEGORY_ITEM: u32 = 32;

pub const MASK_PLAYER: u32 =
    CATEGORY_ENEMY_WEAPON | CATEGORY_ENEMY | CATEGORY_OBSTACLE | CATEGORY_ITEM;
/// PVP players are also hit by rival orbit weapons.
pub const MASK_PLAYER_PVP: u32 = MASK_PLAYER | CATEGORY_PLAYER_WEAPON;
pub const MASK_PLAYER_WEAPON: u32 = CATEGORY_ENEMY;
pub const MASK_PLAYER_WEAPON_PVP: u32 = CATEGORY_ENEMY | CATEGORY_PLAYER;
pub const MASK_ENEMY_WEAPON: u32 = CATEGORY_PLAYER | CATEGORY_OBSTACLE;
pub const MASK_ENEMY: u32 = CATEGORY_PLAYER | CATEGORY_PLAYER_WEAPON | CATEGORY_OBSTACLE;
pub const MASK_OBSTACLE: u32 =
    CATEGORY_PLAYER | CATEGORY_PLAYER_WEAPON | CATEGORY_ENEMY_WEAPON | CATEGORY_ENEMY;
pub const MASK_ITEM: u32 = CATEGORY_PLAYER;

// --- Collider sizes ---

pub const CHARACTER_RADIUS: f32 = 0.5;
pub const WEAPON_RADIUS: f32 = 0.15;
pub const PROJECTILE_RADIUS: f32 = 0.2;
pub const OBSTACLE_RADIUS: f32 = 0.5;
pub const ITEM_RADIUS: f32 = 0.4;

// --- Lifetimes (seconds) ---

pub const PROJECTILE_TTL_SECS: f32 = 5.0;
pub const OBSTACLE_TTL_SECS: f32 = 10.0;
pub const ITEM_TTL_SECS: f32 = 15.0;
pub const DECAL_TTL_SECS: f64 = 5.0;

// --- Orbit weapons ---

/// Count/radius changes smaller than this do not rebuild the ring.
pub const ORBIT_REBUILD_EPSILON: f32 = 0.01;

// --- Player progression ---

pub const PLAYER_MAX_LEVEL: u32 = 10;
pub const PLAYER_MAX_ORBIT_WEAPONS: u32 = 6;
pub const PLAYER_BASE_ORBIT_RADIUS: f32 = 1.2;
pub const PLAYER_ORBIT_RADIUS_PER_LEVEL: f32 = 0.2;
pub const PLAYER_BASE_ORBIT_SPEED: f32 = 2.0;
pub const PLAYER_ORBIT_SPEED_PER_LEVEL: f32 = 0.3;
pub const PLAYER_MOVE_SPEED: f32 = 7.0;

/// Invulnerability granted after a shield absorbs a hit.
pub const SHIELD_INVULNERABILITY_SECS: f32 = 0.5;

/// Kills credited to a player before an automatic level-up.
pub const KILLS_PER_LEVEL: u32 = 3;

pub const SPEED_BOOST_FACTOR: f32 = 1.5;
pub const SPEED_BOOST_SECS: f64 = 5.0;
pub const LEVEL_UP_PULSE_SECS: f64 = 0.2;

// --- Spawning ---

pub const ENEMY_SPAWN_CHANCE: f64 = 0.02;
pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.01;
pub const ITEM_SPAWN_CHANCE: f64 = 0.005;
pub const MAX_OBSTACLES: usize = 4;
/// Share of obstacle spawns that are bombs (the rest are walls).
pub const BOMB_SHARE: f64 = 0.6;
/// Concurrent item cap in PVP sessions.
pub const PVP_ITEM_CAP: usize = 2;

// --- Phase director quotas ---

pub const TUTORIAL_SUB_LEVELS: u32 = 4;
pub const TUTORIAL_ENEMIES_PER_SUB_LEVEL: u32 = 3;
pub const ESCALATION_ROUNDS: u32 = 3;
pub const ESCALATION_ENEMIES_PER_ROUND: u32 = 10;
pub const OBSTACLE_ITERATIONS: u32 = 2;
pub const OBSTACLE_ENEMIES_PER_ITERATION: u32 = 10;
pub const FREE_BASE_ENEMIES: u32 = 10;
pub const MAX_ENEMY_TIER: u32 = 3;

// --- Enemies ---

pub const ENEMY_ARRIVE_DISTANCE: f32 = 0.1;
pub const LAUNCHER_PREFERRED_RANGE: f32 = 6.0;
pub const LAUNCHER_RANGE_TOLERANCE: f32 = 1.0;
pub const LAUNCHER_FIRE_INTERVAL_SECS: f32 = 2.5;
pub const PROJECTILE_SPEED: f32 = 8.0;
pub const TANK_SPEED_FACTOR: f32 = 0.6;
pub const TANK_EXTRA_WEAPONS: u32 = 2;
pub const TANK_EXTRA_RADIUS: f32 = 0.4;
