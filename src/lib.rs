//! Arcstick - a side-scrolling arcade combat game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (modes, spawning, combat, economy)
//! - `session`: Session wiring (save lifecycle, discrete UI commands)
//! - `persistence`: Flat save-blob load/merge/save
//! - `net`: Position-relay protocol and bookkeeping
//! - `advisor`: Text tips derived from a stats snapshot

pub mod advisor;
pub mod net;
pub mod persistence;
pub mod session;
pub mod sim;

pub use persistence::{SaveBlob, SaveStore};
pub use session::GameSession;
pub use sim::{GameEvent, GameState, Mode, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions
    pub const WORLD_WIDTH: f32 = 960.0;
    pub const WORLD_HEIGHT: f32 = 540.0;
    /// Top surface of the ground slab
    pub const GROUND_Y: f32 = 500.0;
    /// Downward acceleration, px/s^2
    pub const GRAVITY: f32 = 1200.0;

    /// Player defaults
    pub const PLAYER_BASE_HP: i32 = 100;
    pub const PLAYER_MOVE_SPEED: f32 = 240.0;
    pub const PLAYER_JUMP_VEL: f32 = 520.0;
    pub const PLAYER_HALF_WIDTH: f32 = 13.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 32.0;
    pub const PLAYER_SPAWN_X: f32 = 200.0;

    /// Enemy defaults
    pub const ENEMY_HALF_WIDTH: f32 = 12.0;
    pub const ENEMY_HALF_HEIGHT: f32 = 30.0;
    pub const ENEMY_WALK_SPEED: f32 = 120.0;
    pub const ENEMY_JUMP_VEL: f32 = 420.0;
    /// Per-tick chance of a grounded enemy hopping
    pub const ENEMY_JUMP_CHANCE: f64 = 0.005;
    /// Horizontal knockback applied to a surviving melee target
    pub const KNOCKBACK_SPEED: f32 = 260.0;
    /// Boss HP multiplier over a normal spawn
    pub const BOSS_HP_MULT: f32 = 6.0;

    /// Melee attack
    pub const MELEE_COOLDOWN_MS: f64 = 400.0;
    pub const MELEE_RADIUS: f32 = 60.0;
    pub const MELEE_OFFSET: f32 = 30.0;
    pub const MELEE_DAMAGE: f32 = 10.0;

    /// Contact damage
    pub const CONTACT_DAMAGE: i32 = 5;
    pub const CONTACT_INVULN_MS: f64 = 500.0;

    /// Hit-flash durations (cleared via the timer queue)
    pub const MELEE_FLASH_MS: f64 = 80.0;
    pub const PROJECTILE_FLASH_MS: f64 = 60.0;

    /// Rewards and progression
    pub const COINS_PER_KILL: i64 = 1;
    pub const GEM_DROP_CHANCE: f64 = 0.05;
    pub const SCORE_PER_KILL: u64 = 10;
    pub const KILLS_PER_LEVEL: u64 = 25;
    pub const LEVEL_UP_HEAL: i32 = 20;
    pub const ARENA_CLEAR_COINS: i64 = 10;
}
