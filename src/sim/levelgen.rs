//! Procedural level generation
//!
//! A level is a left-to-right run of platforms separated by gaps, dotted with
//! bones and enemies, ending on a wide platform with the goal flag. Structure
//! is fixed; sizes, heights and contents come from an injected RNG so tests
//! can seed it.

use glam::Vec2;
use rand::Rng;

use super::enemy::EnemyKind;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::{GeneratorTuning, Tuning};

/// A positive level number, built only through `new` or `clamped`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u32);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(1);

    /// Reject non-positive difficulties
    pub fn new(level: u32) -> Option<Self> {
        (level > 0).then_some(Self(level))
    }

    /// Clamp into the valid range (internal callers only)
    pub fn clamped(level: u32) -> Self {
        Self(level.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Difficulty-derived generator ranges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    pub segments: u32,
    pub min_gap: f32,
    pub max_gap: f32,
    /// Highest elevation above ground for raised platforms
    pub max_elevation: f32,
    /// Chance that a spawned enemy is aerial
    pub aerial_chance: f64,
}

impl LevelParams {
    pub fn for_difficulty(difficulty: Difficulty, g: &GeneratorTuning) -> Self {
        let d = difficulty.get();
        let df = d as f32;

        let segments = g
            .base_segments
            .saturating_add(g.segment_growth.saturating_mul(d))
            .min(g.max_segments);

        let max_gap = (g.max_gap_base + g.max_gap_growth * df).min(g.max_gap_ceiling);
        let min_gap = (g.min_gap_base + g.min_gap_growth * df).min(max_gap);

        let max_elevation = (g.elevation_growth * df).clamp(g.min_elevation, g.max_elevation_ceiling);

        let aerial_chance = if d < 2 {
            0.0
        } else {
            (0.5 + 0.1 * (d - 2) as f64).min(0.8)
        };

        Self {
            segments,
            min_gap,
            max_gap,
            max_elevation,
            aerial_chance,
        }
    }
}

/// One generated entity
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Platform { rect: Rect },
    /// Top-left corner of a bone
    Bone { pos: Vec2 },
    /// Top-left corner of an enemy; `platform` indexes the layout's platforms
    Enemy {
        kind: EnemyKind,
        pos: Vec2,
        platform: Option<usize>,
    },
    /// Top-left corner of the goal flag
    Flag { pos: Vec2 },
}

/// Ordered output of the generator
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub difficulty: Difficulty,
    pub params: LevelParams,
    pub placements: Vec<Placement>,
}

impl LevelLayout {
    pub fn platforms(&self) -> impl Iterator<Item = &Rect> {
        self.placements.iter().filter_map(|p| match p {
            Placement::Platform { rect } => Some(rect),
            _ => None,
        })
    }

    pub fn bone_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| matches!(p, Placement::Bone { .. }))
            .count()
    }

    pub fn enemies(&self) -> impl Iterator<Item = (EnemyKind, Vec2, Option<usize>)> + '_ {
        self.placements.iter().filter_map(|p| match p {
            Placement::Enemy {
                kind,
                pos,
                platform,
            } => Some((*kind, *pos, *platform)),
            _ => None,
        })
    }

    pub fn flag(&self) -> Option<Vec2> {
        self.placements.iter().find_map(|p| match p {
            Placement::Flag { pos } => Some(*pos),
            _ => None,
        })
    }
}

/// Generate a campaign/mission level
pub fn generate<R: Rng>(difficulty: Difficulty, tuning: &Tuning, rng: &mut R) -> LevelLayout {
    let g = &tuning.generator;
    let params = LevelParams::for_difficulty(difficulty, g);
    let ground_y = tuning.ground_y();
    let thickness = g.platform_thickness;

    log::info!(
        "Generating level {}: {} segments, gaps {:.0}..{:.0}, elevation <= {:.0}",
        difficulty.get(),
        params.segments,
        params.min_gap,
        params.max_gap,
        params.max_elevation
    );

    let mut placements = Vec::new();
    let mut platform_count = 0usize;
    let mut push_platform = |placements: &mut Vec<Placement>, rect: Rect| -> usize {
        placements.push(Placement::Platform { rect });
        platform_count += 1;
        platform_count - 1
    };

    // Safe opening ground
    let opening_width = tuning.screen.x * 1.5;
    push_platform(&mut placements, Rect::new(0.0, ground_y, opening_width, thickness));
    let mut current_x = opening_width;

    let (min_width, max_width) = ordered(g.platform_min_width, g.platform_max_width);

    for _ in 0..params.segments {
        current_x += rng.random_range(params.min_gap..=params.max_gap);

        let width = rng.random_range(min_width..=max_width);
        let plat_y = if rng.random_bool(g.floor_chance) {
            ground_y
        } else {
            ground_y - rng.random_range(g.min_elevation..=params.max_elevation)
        };
        let platform_index = push_platform(&mut placements, Rect::new(current_x, plat_y, width, thickness));

        if rng.random_bool(g.bones_chance) {
            let count = rng.random_range(1..=3);
            place_bones(&mut placements, current_x, width, plat_y, count, tuning);
        }

        if rng.random_bool(g.enemy_chance) {
            let placement = place_enemy(difficulty, &params, current_x, width, plat_y, platform_index, tuning, rng);
            placements.push(placement);
        }

        current_x += width;
    }

    // Final platform and goal
    current_x += g.final_gap.min(params.max_gap);
    push_platform(
        &mut placements,
        Rect::new(current_x, ground_y, g.final_platform_width, thickness),
    );
    placements.push(Placement::Flag {
        pos: Vec2::new(current_x + g.flag_offset, ground_y - tuning.flag_size.y),
    });

    LevelLayout {
        difficulty,
        params,
        placements,
    }
}

/// Bones spaced along a platform; any that would crowd the right edge are skipped
fn place_bones(placements: &mut Vec<Placement>, plat_x: f32, width: f32, plat_y: f32, count: u32, tuning: &Tuning) {
    let spacing = tuning.generator.bone_spacing;
    let y = plat_y - tuning.bone_size.y - BONE_HOVER * tuning.scale;
    for i in 0..count {
        let x = plat_x + spacing + i as f32 * spacing;
        if x < plat_x + width - spacing {
            placements.push(Placement::Bone { pos: Vec2::new(x, y) });
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn place_enemy<R: Rng>(
    difficulty: Difficulty,
    params: &LevelParams,
    plat_x: f32,
    width: f32,
    plat_y: f32,
    platform_index: usize,
    tuning: &Tuning,
    rng: &mut R,
) -> Placement {
    let mid_x = plat_x + width / 2.0;
    let drop_y = plat_y - tuning.generator.enemy_drop_height;

    let ground = |kind: EnemyKind| Placement::Enemy {
        kind,
        pos: Vec2::new(mid_x - kind.size(tuning.scale).x / 2.0, drop_y),
        platform: Some(platform_index),
    };

    if difficulty.get() == 1 {
        let kind = [EnemyKind::Cat, EnemyKind::Cow, EnemyKind::Umbrella][rng.random_range(0..3usize)];
        return ground(kind);
    }

    if rng.random_bool(params.aerial_chance) {
        let x = plat_x + rng.random_range(0.0..=width);
        let y = rng.random_range(AERIAL_MIN_Y..=AERIAL_MAX_Y) * tuning.scale;
        Placement::Enemy {
            kind: EnemyKind::Pigeon,
            pos: Vec2::new(x, y),
            platform: None,
        }
    } else {
        let kind = [EnemyKind::Cat, EnemyKind::Crab][rng.random_range(0..2usize)];
        ground(kind)
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Opening of an endless run: long ground plus two floating platforms
pub fn endless_opening<R: Rng>(tuning: &Tuning, rng: &mut R) -> Vec<Rect> {
    let w = tuning.screen.x;
    let ground = Rect::new(
        0.0,
        tuning.ground_y(),
        w * ENDLESS_GROUND_SCREENS,
        tuning.generator.platform_thickness,
    );
    log::info!("Generating endless opening ({}px of ground)", ground.width());

    vec![
        ground,
        endless_platform(tuning, w * 0.5, w * 0.8, rng),
        endless_platform(tuning, w * 0.9, w * 1.2, rng),
    ]
}

/// A floating platform with its left edge somewhere in `[min_x, max_x]`
pub fn endless_platform<R: Rng>(tuning: &Tuning, min_x: f32, max_x: f32, rng: &mut R) -> Rect {
    let s = tuning.scale;
    let h = tuning.screen.y;
    let width = rng.random_range(ENDLESS_PLATFORM_MIN_WIDTH..=ENDLESS_PLATFORM_MAX_WIDTH) * s;
    let (min_x, max_x) = ordered(min_x, max_x);
    let x = rng.random_range(min_x..=max_x);
    let y = rng.random_range(h * 0.4..=h * 0.75);
    Rect::new(x, y, width, ENDLESS_PLATFORM_THICKNESS * s)
}

/// A platform streamed in just past the right edge
pub fn endless_next_platform<R: Rng>(tuning: &Tuning, rng: &mut R) -> Rect {
    let w = tuning.screen.x;
    endless_platform(tuning, w, w + ENDLESS_PLATFORM_SPREAD * tuning.scale, rng)
}

/// A ground enemy entering from off-screen right; it has no owning platform
pub fn endless_enemy<R: Rng>(tuning: &Tuning, rng: &mut R) -> (EnemyKind, Vec2) {
    let s = tuning.scale;
    let kind = [EnemyKind::Cat, EnemyKind::Cow, EnemyKind::Umbrella][rng.random_range(0..3usize)];
    let x = tuning.screen.x + rng.random_range(ENDLESS_ENEMY_MIN_OFFSET..=ENDLESS_ENEMY_MAX_OFFSET) * s;
    let mut y = tuning.screen.y - ENDLESS_ENEMY_HEIGHT * s;
    if kind == EnemyKind::Umbrella {
        y -= ENDLESS_UMBRELLA_LIFT * s;
    }
    (kind, Vec2::new(x, y))
}
