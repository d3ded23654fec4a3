//! Super Pug - A side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, entities, game state)
//! - `renderer`: Read-only frame snapshots and a text renderer
//! - `platform`: Input adaptation and fixed-step timing
//! - `settings`: Runner configuration loaded from JSON
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Pixel values are given for the 800x600 reference resolution and get
/// multiplied by the display scale in [`Tuning::for_screen`].
pub mod consts {
    /// Reference resolution
    pub const REFERENCE_WIDTH: f32 = 800.0;
    pub const REFERENCE_HEIGHT: f32 = 600.0;

    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;
    /// Milliseconds per tick at the default rate
    pub const TICK_MS: f32 = 1000.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Physics (per tick)
    pub const GRAVITY: f32 = 0.8;
    pub const PLAYER_SPEED: f32 = 8.0;
    pub const JUMP_FORCE: f32 = -18.0;
    /// How far below a platform top the previous bottom may sit and still land
    pub const LANDING_TOLERANCE: f32 = 0.5;

    /// Player
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;

    /// Combat
    pub const FIRE_INTERVAL_MS: f32 = 250.0;
    pub const CONTACT_DAMAGE: i32 = 1;
    pub const KNOCKBACK: f32 = 10.0;
    pub const ENEMY_SHOT_DAMAGE: i32 = 10;
    pub const ENEMY_SHOT_SPEED: f32 = 6.0;
    pub const ENEMY_SHOT_WIDTH: f32 = 10.0;
    pub const ENEMY_SHOT_HEIGHT: f32 = 14.0;
    pub const ENEMY_HEALTH: i32 = 10;
    pub const AERIAL_FIRE_COOLDOWN_MS: f32 = 2000.0;
    pub const AERIAL_FIRE_CHANCE: f64 = 0.7;
    pub const AERIAL_BOB_AMPLITUDE: f32 = 12.0;
    pub const UMBRELLA_JITTER: f32 = 2.0;

    /// Scoring
    pub const KILL_SCORE: u64 = 100;
    pub const PICKUP_SCORE: u64 = 50;

    /// Effects
    pub const EXPLOSION_SIZE: f32 = 80.0;
    pub const EXPLOSION_FRAMES: u32 = 8;
    pub const EXPLOSION_FRAME_MS: f32 = 60.0;

    /// Pickups and goal
    pub const BONE_WIDTH: f32 = 30.0;
    pub const BONE_HEIGHT: f32 = 16.0;
    pub const BONE_HOVER: f32 = 20.0;
    pub const BONE_BOB_AMPLITUDE: f32 = 4.0;
    pub const BONE_BOB_SPEED: f32 = 0.1; // radians per tick
    pub const FLAG_WIDTH: f32 = 40.0;
    pub const FLAG_HEIGHT: f32 = 100.0;

    /// Level generation
    pub const PLATFORM_THICKNESS: f32 = 60.0;
    pub const BASE_SEGMENTS: u32 = 15;
    pub const SEGMENT_GROWTH: u32 = 2;
    pub const MAX_SEGMENTS: u32 = 60;
    pub const MIN_GAP_BASE: f32 = 50.0;
    pub const MIN_GAP_GROWTH: f32 = 5.0;
    pub const MAX_GAP_BASE: f32 = 120.0;
    pub const MAX_GAP_GROWTH: f32 = 15.0;
    pub const MAX_GAP_CEILING: f32 = 300.0;
    pub const PLATFORM_MIN_WIDTH: f32 = 200.0;
    pub const PLATFORM_MAX_WIDTH: f32 = 500.0;
    pub const FLOOR_CHANCE: f64 = 0.7;
    pub const MIN_ELEVATION: f32 = 50.0;
    pub const ELEVATION_GROWTH: f32 = 50.0;
    pub const MAX_ELEVATION_CEILING: f32 = 250.0;
    pub const BONES_CHANCE: f64 = 0.5;
    pub const BONE_SPACING: f32 = 50.0;
    pub const ENEMY_CHANCE: f64 = 0.6;
    pub const ENEMY_DROP_HEIGHT: f32 = 150.0;
    pub const FINAL_GAP: f32 = 150.0;
    pub const FINAL_PLATFORM_WIDTH: f32 = 500.0;
    pub const FLAG_OFFSET: f32 = 400.0;
    pub const AERIAL_MIN_Y: f32 = 50.0;
    pub const AERIAL_MAX_Y: f32 = 200.0;

    /// Endless mode streaming
    pub const ENDLESS_GROUND_SCREENS: f32 = 2.0;
    pub const ENDLESS_PLATFORM_THICKNESS: f32 = 30.0;
    pub const ENDLESS_PLATFORM_MIN_WIDTH: f32 = 150.0;
    pub const ENDLESS_PLATFORM_MAX_WIDTH: f32 = 300.0;
    pub const ENDLESS_PLATFORM_SPREAD: f32 = 200.0;
    pub const ENDLESS_ENEMY_MIN_OFFSET: f32 = 100.0;
    pub const ENDLESS_ENEMY_MAX_OFFSET: f32 = 300.0;
    pub const ENDLESS_ENEMY_HEIGHT: f32 = 120.0;
    pub const ENDLESS_UMBRELLA_LIFT: f32 = 150.0;
    pub const ENDLESS_MIN_PLATFORMS: usize = 5;
    pub const ENDLESS_MIN_ENEMIES: usize = 2;
    pub const ENDLESS_SPAWN_CHANCE: f64 = 0.02;

    /// Mission mode offers this many levels
    pub const MISSION_COUNT: u32 = 5;
}
