//! Presentation boundary
//!
//! The simulation is never handed to a renderer directly. Each frame a
//! [`RenderSnapshot`] copies out what is visible, in draw order, and a
//! [`Renderer`] turns it into output.

pub mod json;
pub mod text;

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Character, EnemyKind, Game, GameMode, GamePhase, Rect, World, weapon};

pub use json::JsonRenderer;
pub use text::TextRenderer;

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SpriteKind {
    Platform,
    Flag,
    Bone,
    Enemy(EnemyKind),
    Projectile { weapon_index: usize },
    EnemyProjectile,
    Explosion,
    Player(Character),
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Draw bounds (bob offsets applied)
    pub rect: Rect,
    pub facing_right: bool,
    pub frame: u32,
    /// Health bar fill, for things that have one
    pub health: Option<f32>,
}

impl Sprite {
    fn plain(kind: SpriteKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            facing_right: true,
            frame: 0,
            health: None,
        }
    }
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub level: u32,
    pub score: u64,
    pub weapon: &'static str,
    pub character: &'static str,
    pub health: i32,
    pub max_health: i32,
    pub camera_offset: f32,
}

/// Read-only copy of one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub screen: Vec2,
    /// Back to front
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

impl RenderSnapshot {
    pub fn capture(game: &Game) -> Self {
        let mut hud = Hud {
            phase: game.phase,
            mode: game.mode,
            level: game.level.get(),
            score: game.score,
            weapon: weapon(0).name,
            character: Character::default().name(),
            health: game.tuning.player_max_health,
            max_health: game.tuning.player_max_health,
            camera_offset: 0.0,
        };

        let sprites = match &game.world {
            Some(world) if game.phase == GamePhase::Playing => {
                let player = &world.player;
                hud.weapon = weapon(player.weapon_index).name;
                hud.character = player.character.name();
                hud.health = player.health;
                hud.max_health = player.max_health;
                hud.camera_offset = world.camera_offset;
                hud.score = world.score;
                world_sprites(world)
            }
            _ => Vec::new(),
        };

        Self {
            screen: game.tuning.screen,
            sprites,
            hud,
        }
    }
}

fn world_sprites(world: &World) -> Vec<Sprite> {
    let mut sprites = Vec::new();

    sprites.extend(world.platforms.iter().map(|p| Sprite::plain(SpriteKind::Platform, p.rect)));
    sprites.extend(world.flags.iter().map(|f| Sprite::plain(SpriteKind::Flag, f.rect)));
    sprites.extend(world.bones.iter().map(|b| {
        let mut rect = b.rect;
        rect.pos.y += b.bob_offset();
        Sprite::plain(SpriteKind::Bone, rect)
    }));
    sprites.extend(world.enemies.iter().map(|e| Sprite {
        kind: SpriteKind::Enemy(e.kind),
        rect: e.rect,
        facing_right: e.facing_right(),
        frame: 0,
        health: Some(e.health_fraction()),
    }));
    sprites.extend(world.projectiles.iter().map(|p| Sprite {
        kind: SpriteKind::Projectile {
            weapon_index: p.weapon_index,
        },
        rect: p.rect,
        facing_right: p.speed >= 0.0,
        frame: 0,
        health: None,
    }));
    sprites.extend(
        world
            .enemy_projectiles
            .iter()
            .map(|p| Sprite::plain(SpriteKind::EnemyProjectile, p.rect)),
    );
    sprites.extend(world.explosions.iter().map(|e| Sprite {
        frame: e.frame,
        ..Sprite::plain(SpriteKind::Explosion, e.rect)
    }));

    let player = &world.player;
    sprites.push(Sprite {
        kind: SpriteKind::Player(player.character),
        rect: player.rect,
        facing_right: player.facing_right,
        frame: player.anim_frame(),
        health: Some(player.health_fraction()),
    });

    sprites
}

/// Something that can present a frame
pub trait Renderer {
    type Error;

    fn render(&mut self, frame: &RenderSnapshot) -> Result<(), Self::Error>;
}
