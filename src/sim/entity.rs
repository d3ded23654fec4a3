//! Entity types and their per-kind update rules
//!
//! Every kind except the player implements [`Actor`]; the world calls
//! `update` once per tick with a [`StepContext`] instead of entities holding
//! a reference back to the world.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::collision::{clamp_left, fall_and_land};
use super::rect::Rect;
use super::weapon::{Character, next_weapon_index, weapon};
use crate::tuning::Tuning;

/// Monotonic entity id source (one per world)
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Everything an entity may read or spawn into during its update
pub struct StepContext<'a> {
    pub platforms: &'a [Platform],
    pub tuning: &'a Tuning,
    /// World clock in milliseconds
    pub now_ms: f64,
    pub rng: &'a mut Pcg32,
    pub ids: &'a mut EntityIds,
    /// Enemy shots spawned this tick
    pub enemy_shots: &'a mut Vec<EnemyProjectile>,
}

/// Per-kind behaviour shared by all world-owned entities
pub trait Actor {
    fn rect(&self) -> &Rect;
    fn rect_mut(&mut self) -> &mut Rect;

    /// Advance one tick
    fn update(&mut self, _ctx: &mut StepContext<'_>) {}

    /// False once the entity should be dropped from the world
    fn is_alive(&self) -> bool {
        true
    }

    /// Camera scroll translation
    fn shift_x(&mut self, dx: f32) {
        self.rect_mut().pos.x -= dx;
    }
}

/// Collision response for things with health
pub trait Damageable {
    /// Apply damage; returns true if this hit took health from positive to <= 0
    fn take_damage(&mut self, amount: i32) -> bool;
}

/// A one-sided solid platform
#[derive(Debug, Clone)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
}

impl Platform {
    pub fn new(id: u32, rect: Rect) -> Self {
        debug_assert!(rect.width() > 0.0 && rect.height() > 0.0);
        Self { id, rect }
    }
}

impl Actor for Platform {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub vel_y: f32,
    pub facing_right: bool,
    pub on_ground: bool,
    /// Increments every tick the player walks
    pub anim_phase: u32,
    pub weapon_index: usize,
    pub character: Character,
    pub health: i32,
    pub max_health: i32,
    /// World time of the last shot (ms)
    pub last_shot_ms: Option<f64>,
}

impl Player {
    /// Fresh player centred on screen
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::centered(tuning.screen / 2.0, tuning.player_size),
            vel_y: 0.0,
            facing_right: true,
            on_ground: false,
            anim_phase: 0,
            weapon_index: 0,
            character: Character::default(),
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            last_shot_ms: None,
        }
    }

    /// Keep health and loadout from the previous level, reset everything else
    pub fn carry_over(&mut self, previous: &Player) {
        self.health = previous.health;
        self.weapon_index = previous.weapon_index;
        self.character = previous.character;
    }

    /// Animation frame for walk cycles (4 frames)
    pub fn anim_frame(&self) -> u32 {
        (self.anim_phase / 6) % 4
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn cycle_weapon(&mut self) {
        self.weapon_index = next_weapon_index(self.weapon_index);
    }

    pub fn cycle_character(&mut self) {
        self.character = self.character.next();
    }

    /// Jump if standing on something
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.on_ground {
            self.vel_y = tuning.jump_force;
            self.on_ground = false;
            true
        } else {
            false
        }
    }

    /// Apply the tri-state movement intent
    pub fn apply_intent(&mut self, left: bool, right: bool, tuning: &Tuning) {
        if left {
            self.rect.pos.x -= tuning.player_speed;
            self.facing_right = false;
        }
        if right {
            self.rect.pos.x += tuning.player_speed;
            self.facing_right = true;
        }
        if left != right {
            self.anim_phase = self.anim_phase.wrapping_add(1);
        } else {
            self.anim_phase = 0;
        }
    }

    /// Gravity, platform landing and the left screen clamp
    pub fn step_physics(&mut self, platforms: &[Platform], tuning: &Tuning) {
        let result = fall_and_land(
            &mut self.rect,
            &mut self.vel_y,
            tuning.gravity,
            platforms,
            tuning.landing_tolerance,
        );
        self.on_ground = result.grounded;
        clamp_left(&mut self.rect);
    }

    /// Fire the equipped weapon if the minimum shot interval has passed
    pub fn try_fire(&mut self, now_ms: f64, tuning: &Tuning, ids: &mut EntityIds) -> Option<Projectile> {
        if let Some(last) = self.last_shot_ms {
            if ((now_ms - last) as f32) < tuning.fire_interval_ms {
                return None;
            }
        }
        self.last_shot_ms = Some(now_ms);
        let direction = if self.facing_right { 1.0 } else { -1.0 };
        Some(Projectile::fired(
            ids.next(),
            self.weapon_index,
            self.rect.center(),
            direction,
            tuning.scale,
        ))
    }

    /// Push the player horizontally away from a point
    pub fn knock_back_from(&mut self, source_x: f32, distance: f32) {
        if source_x > self.rect.center().x {
            self.rect.pos.x -= distance;
        } else {
            self.rect.pos.x += distance;
        }
        clamp_left(&mut self.rect);
    }
}

impl Damageable for Player {
    fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.health > 0;
        self.health = (self.health - amount.max(0)).max(0);
        was_alive && self.health == 0
    }
}

/// A player-fired projectile travelling horizontally
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
    /// Signed horizontal speed (pixels per tick)
    pub speed: f32,
    pub damage: i32,
    pub weapon_index: usize,
    pub alive: bool,
}

impl Projectile {
    /// Build a projectile for the given weapon centred on `origin`
    pub fn fired(id: u32, weapon_index: usize, origin: Vec2, direction: f32, scale: f32) -> Self {
        let w = weapon(weapon_index);
        Self {
            id,
            rect: Rect::centered(origin, Vec2::new(w.width, w.height) * scale),
            speed: w.speed * scale * direction,
            damage: w.damage,
            weapon_index,
            alive: true,
        }
    }
}

impl Actor for Projectile {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn update(&mut self, ctx: &mut StepContext<'_>) {
        self.rect.pos.x += self.speed;
        if self.rect.right() < 0.0 || self.rect.left() > ctx.tuning.screen.x {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// An enemy-fired projectile falling straight down
#[derive(Debug, Clone)]
pub struct EnemyProjectile {
    pub id: u32,
    pub rect: Rect,
    pub speed: f32,
    pub damage: i32,
    pub alive: bool,
}

impl EnemyProjectile {
    /// Spawn a shot whose top edge is centred on `origin`
    pub fn dropped(id: u32, origin: Vec2, tuning: &Tuning) -> Self {
        let size = tuning.enemy_shot_size;
        Self {
            id,
            rect: Rect::new(origin.x - size.x / 2.0, origin.y, size.x, size.y),
            speed: tuning.enemy_shot_speed,
            damage: tuning.enemy_shot_damage,
            alive: true,
        }
    }
}

impl Actor for EnemyProjectile {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn update(&mut self, ctx: &mut StepContext<'_>) {
        self.rect.pos.y += self.speed;
        if self.rect.top() > ctx.tuning.screen.y || self.rect.bottom() < 0.0 {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A collectible bone
#[derive(Debug, Clone)]
pub struct Bone {
    pub id: u32,
    /// Collision bounds (the bob never moves these)
    pub rect: Rect,
    pub bob_phase: f32,
    pub bob_amplitude: f32,
}

impl Bone {
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            rect: Rect {
                pos,
                size: tuning.bone_size,
            },
            bob_phase: 0.0,
            bob_amplitude: tuning.bone_bob_amplitude,
        }
    }

    /// Vertical draw offset from the bob
    pub fn bob_offset(&self) -> f32 {
        self.bob_phase.sin() * self.bob_amplitude
    }
}

impl Actor for Bone {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn update(&mut self, ctx: &mut StepContext<'_>) {
        self.bob_phase = (self.bob_phase + ctx.tuning.bone_bob_speed) % std::f32::consts::TAU;
    }
}

/// The level goal
#[derive(Debug, Clone)]
pub struct Flag {
    pub id: u32,
    pub rect: Rect,
}

impl Actor for Flag {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }
}

/// Explosion effect left behind by a destroyed enemy
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: u32,
    pub rect: Rect,
    pub frame: u32,
    pub frame_count: u32,
    /// World time the current frame started (set on first update)
    pub frame_started_ms: Option<f64>,
}

impl Explosion {
    pub fn new(id: u32, center: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            rect: Rect::centered(center, Vec2::splat(tuning.explosion_size)),
            frame: 0,
            frame_count: tuning.explosion_frames.max(1),
            frame_started_ms: None,
        }
    }
}

impl Actor for Explosion {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn update(&mut self, ctx: &mut StepContext<'_>) {
        let started = *self.frame_started_ms.get_or_insert(ctx.now_ms);
        if (ctx.now_ms - started) as f32 > ctx.tuning.explosion_frame_ms {
            self.frame += 1;
            self.frame_started_ms = Some(ctx.now_ms);
        }
    }

    fn is_alive(&self) -> bool {
        self.frame < self.frame_count
    }
}
