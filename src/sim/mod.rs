//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod levelgen;
pub mod rect;
pub mod state;
pub mod tick;
pub mod weapon;
pub mod world;

pub use collision::{LandingResult, aabb_overlap, fall_and_land};
pub use enemy::{Enemy, EnemyBehavior, EnemyKind, PatrolState};
pub use entity::{Actor, Bone, Damageable, EnemyProjectile, Explosion, Flag, Platform, Player, Projectile, StepContext};
pub use levelgen::{Difficulty, LevelLayout, LevelParams, Placement, generate};
pub use rect::Rect;
pub use state::{Game, GameEvent, GameMode, GamePhase};
pub use tick::{MenuAction, TickInput, tick};
pub use weapon::{Character, WEAPONS, Weapon, weapon};
pub use world::World;
