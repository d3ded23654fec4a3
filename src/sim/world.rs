//! The running level: every live entity plus clock, camera and score
//!
//! A `World` is rebuilt wholesale on level start, level advance and game
//! over. The per-tick phases live in [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::enemy::{Enemy, EnemyKind};
use super::entity::{Bone, EnemyProjectile, EntityIds, Explosion, Flag, Platform, Player, Projectile};
use super::levelgen::{self, Difficulty, LevelLayout, Placement};
use super::rect::Rect;
use crate::tuning::Tuning;

/// Live level state
#[derive(Debug, Clone)]
pub struct World {
    pub difficulty: Difficulty,
    /// Streaming infinite-runner level with no goal
    pub endless: bool,
    /// Seed the level was generated from
    pub seed: u64,
    pub score: u64,
    /// Total distance scrolled
    pub camera_offset: f32,
    /// World clock (ms), advanced by `dt_ms` every tick
    pub now_ms: f64,
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<EnemyProjectile>,
    pub bones: Vec<Bone>,
    pub flags: Vec<Flag>,
    pub explosions: Vec<Explosion>,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) ids: EntityIds,
}

impl World {
    /// A world with only the player in it
    pub fn empty(tuning: Tuning, seed: u64) -> Self {
        Self {
            difficulty: Difficulty::MIN,
            endless: false,
            seed,
            score: 0,
            camera_offset: 0.0,
            now_ms: 0.0,
            time_ticks: 0,
            player: Player::new(&tuning),
            platforms: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            bones: Vec::new(),
            flags: Vec::new(),
            explosions: Vec::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            ids: EntityIds::default(),
        }
    }

    /// Generate and populate a campaign or mission level
    pub fn new_level(difficulty: Difficulty, tuning: Tuning, seed: u64, score: u64) -> Self {
        let mut world = Self::empty(tuning, seed);
        world.difficulty = difficulty;
        world.score = score;
        let layout = levelgen::generate(difficulty, &world.tuning, &mut world.rng);
        world.populate(&layout);
        log::info!(
            "Level {} ready: {} platforms, {} enemies, {} bones",
            difficulty.get(),
            world.platforms.len(),
            world.enemies.len(),
            world.bones.len()
        );
        world
    }

    /// Opening of an endless run
    pub fn endless(tuning: Tuning, seed: u64) -> Self {
        let mut world = Self::empty(tuning, seed);
        world.endless = true;
        for rect in levelgen::endless_opening(&world.tuning, &mut world.rng) {
            world.spawn_platform(rect);
        }
        let (kind, pos) = levelgen::endless_enemy(&world.tuning, &mut world.rng);
        world.spawn_enemy(kind, pos, None);
        world
    }

    /// Spawn every placement of a generated layout
    fn populate(&mut self, layout: &LevelLayout) {
        // Layout platform index -> entity id
        let mut platform_ids = Vec::new();
        for placement in &layout.placements {
            match placement {
                Placement::Platform { rect } => platform_ids.push(self.spawn_platform(*rect)),
                Placement::Bone { pos } => {
                    self.spawn_bone(*pos);
                }
                Placement::Enemy {
                    kind,
                    pos,
                    platform,
                } => {
                    let owner = (*platform).and_then(|i| platform_ids.get(i).copied());
                    self.spawn_enemy(*kind, *pos, owner);
                }
                Placement::Flag { pos } => {
                    self.spawn_flag(*pos);
                }
            }
        }
    }

    pub fn spawn_platform(&mut self, rect: Rect) -> u32 {
        let id = self.ids.next();
        self.platforms.push(Platform::new(id, rect));
        id
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2, platform: Option<u32>) -> u32 {
        let id = self.ids.next();
        self.enemies.push(Enemy::new(id, kind, pos, platform, &self.tuning));
        log::debug!("Spawned {} {} at ({:.0}, {:.0})", kind.name(), id, pos.x, pos.y);
        id
    }

    pub fn spawn_bone(&mut self, pos: Vec2) -> u32 {
        let id = self.ids.next();
        self.bones.push(Bone::new(id, pos, &self.tuning));
        id
    }

    pub fn spawn_flag(&mut self, pos: Vec2) -> u32 {
        let id = self.ids.next();
        self.flags.push(Flag {
            id,
            rect: Rect {
                pos,
                size: self.tuning.flag_size,
            },
        });
        id
    }

    pub fn spawn_explosion(&mut self, center: Vec2) -> u32 {
        let id = self.ids.next();
        self.explosions.push(Explosion::new(id, center, &self.tuning));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_level_matches_layout() {
        let tuning = Tuning::default();
        let world = World::new_level(Difficulty::MIN, tuning.clone(), 42, 300);

        let mut rng = Pcg32::seed_from_u64(42);
        let layout = levelgen::generate(Difficulty::MIN, &tuning, &mut rng);

        assert_eq!(world.platforms.len(), layout.platforms().count());
        assert_eq!(world.enemies.len(), layout.enemies().count());
        assert_eq!(world.bones.len(), layout.bone_count());
        assert_eq!(world.flags.len(), 1);
        assert_eq!(world.score, 300);
        assert_eq!(world.player.health, 100);
    }

    #[test]
    fn test_enemy_owner_is_platform_id() {
        let world = World::new_level(Difficulty::MIN, Tuning::default(), 9, 0);
        for enemy in &world.enemies {
            if let crate::sim::enemy::EnemyBehavior::Ground {
                platform: Some(id), ..
            } = enemy.behavior
            {
                let owner = world.platforms.iter().find(|p| p.id == id).unwrap();
                assert!(enemy.rect.bottom() < owner.rect.top());
            }
        }
    }

    #[test]
    fn test_ids_unique() {
        let world = World::new_level(Difficulty::clamped(3), Tuning::default(), 5, 0);
        let mut ids: Vec<u32> = world
            .platforms
            .iter()
            .map(|p| p.id)
            .chain(world.enemies.iter().map(|e| e.id))
            .chain(world.bones.iter().map(|b| b.id))
            .chain(world.flags.iter().map(|f| f.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_endless_world_has_no_goal() {
        let world = World::endless(Tuning::default(), 1);
        assert!(world.endless);
        assert_eq!(world.platforms.len(), 3);
        assert!(world.flags.is_empty());
    }

    #[test]
    fn test_endless_world_starts_with_one_enemy() {
        let world = World::endless(Tuning::default(), 1);
        assert_eq!(world.enemies.len(), 1);
        let enemy = &world.enemies[0];
        assert!(enemy.rect.left() > world.tuning.screen.x);
        assert!(matches!(
            enemy.kind,
            EnemyKind::Cat | EnemyKind::Cow | EnemyKind::Umbrella
        ));
    }
}
