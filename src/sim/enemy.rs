//! Enemy variants and their AI
//!
//! Ground patrollers walk back and forth inside a patrol bound (their owning
//! platform, or the screen once they have walked in from off-screen).
//! Aerial drifters ignore gravity, roam well past both screen edges and drop
//! shots while they are over the visible area.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::collision::resolve_landing;
use super::entity::{Actor, Damageable, EnemyProjectile, StepContext};
use super::rect::Rect;
use crate::tuning::Tuning;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnemyKind {
    Cat,
    Cow,
    Umbrella,
    Crab,
    Pigeon,
}

impl EnemyKind {
    /// Size and horizontal speed at reference scale
    fn base_stats(&self) -> (Vec2, f32) {
        match self {
            EnemyKind::Cat => (Vec2::new(50.0, 40.0), 4.0),
            EnemyKind::Cow => (Vec2::new(70.0, 60.0), 1.0),
            EnemyKind::Umbrella => (Vec2::new(40.0, 60.0), 2.0),
            EnemyKind::Crab => (Vec2::new(50.0, 50.0), 2.0),
            EnemyKind::Pigeon => (Vec2::new(50.0, 40.0), 3.0),
        }
    }

    pub fn size(&self, scale: f32) -> Vec2 {
        self.base_stats().0 * scale
    }

    pub fn speed(&self, scale: f32) -> f32 {
        self.base_stats().1 * scale
    }

    pub fn is_aerial(&self) -> bool {
        matches!(self, EnemyKind::Pigeon)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Cat => "cat",
            EnemyKind::Cow => "cow",
            EnemyKind::Umbrella => "umbrella",
            EnemyKind::Crab => "crab",
            EnemyKind::Pigeon => "pigeon",
        }
    }
}

/// Ground patrol AI state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolState {
    /// Walking in from outside the visible area
    Entering,
    /// Turning around at the patrol bound
    Patrolling,
}

/// Kind-specific movement state
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyBehavior {
    Ground {
        state: PatrolState,
        /// Owning platform id (back-reference only)
        platform: Option<u32>,
        vel_y: f32,
        grounded: bool,
    },
    Aerial {
        /// Centre line of the vertical bob
        base_y: f32,
        bob_phase: f32,
        /// World time of the last fire attempt (ms)
        last_fire_ms: Option<f64>,
    },
}

/// An enemy entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub rect: Rect,
    pub hp: i32,
    pub max_hp: i32,
    /// -1 = left, 1 = right
    pub direction: f32,
    pub speed: f32,
    pub behavior: EnemyBehavior,
    /// Set when a ground enemy drops out of the bottom of the screen
    pub fell: bool,
}

impl Enemy {
    /// Create an enemy with its top-left corner at `pos`
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, platform: Option<u32>, tuning: &Tuning) -> Self {
        let behavior = if kind.is_aerial() {
            EnemyBehavior::Aerial {
                base_y: pos.y,
                bob_phase: 0.0,
                last_fire_ms: None,
            }
        } else {
            EnemyBehavior::Ground {
                state: PatrolState::Entering,
                platform,
                vel_y: 0.0,
                grounded: false,
            }
        };

        Self {
            id,
            kind,
            rect: Rect {
                pos,
                size: kind.size(tuning.scale),
            },
            hp: tuning.enemy_health,
            max_hp: tuning.enemy_health,
            direction: -1.0,
            speed: kind.speed(tuning.scale),
            behavior,
            fell: false,
        }
    }

    pub fn facing_right(&self) -> bool {
        self.direction > 0.0
    }

    pub fn health_fraction(&self) -> f32 {
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Current patrol state (aerial enemies are always patrolling)
    pub fn patrol_state(&self) -> PatrolState {
        match self.behavior {
            EnemyBehavior::Ground { state, .. } => state,
            EnemyBehavior::Aerial { .. } => PatrolState::Patrolling,
        }
    }

    /// Decide whether an aerial enemy fires this tick
    ///
    /// One attempt per cooldown window, only while over the visible area;
    /// each attempt succeeds with the configured chance.
    pub fn try_fire<R: Rng>(&mut self, now_ms: f64, tuning: &Tuning, rng: &mut R) -> bool {
        let center_x = self.rect.center().x;
        let EnemyBehavior::Aerial { last_fire_ms, .. } = &mut self.behavior else {
            return false;
        };
        if center_x < 0.0 || center_x > tuning.screen.x {
            return false;
        }
        if let Some(last) = *last_fire_ms {
            if ((now_ms - last) as f32) < tuning.aerial_fire_cooldown_ms {
                return false;
            }
        }
        *last_fire_ms = Some(now_ms);
        rng.random_bool(tuning.aerial_fire_chance)
    }

    fn update_ground(&mut self, ctx: &mut StepContext<'_>) {
        let tuning = ctx.tuning;
        let screen_w = tuning.screen.x;

        self.rect.pos.x += self.speed * self.direction;

        let prev_bottom = self.rect.bottom();
        if self.kind == EnemyKind::Umbrella {
            let jitter = if ctx.rng.random_bool(0.5) {
                tuning.umbrella_jitter
            } else {
                -tuning.umbrella_jitter
            };
            self.rect.pos.y += jitter;
        }

        let EnemyBehavior::Ground {
            state,
            platform,
            vel_y,
            grounded,
        } = &mut self.behavior
        else {
            return;
        };

        *vel_y += tuning.gravity;
        self.rect.pos.y += *vel_y;
        let landing = resolve_landing(
            &mut self.rect,
            vel_y,
            prev_bottom,
            ctx.platforms,
            tuning.landing_tolerance,
        );
        *grounded = landing.grounded;

        if *state == PatrolState::Entering && self.rect.left() >= 0.0 && self.rect.right() <= screen_w {
            *state = PatrolState::Patrolling;
            log::debug!("{} {} entered the screen", self.kind.name(), self.id);
        }

        // A platform that scrolled away no longer bounds the patrol
        let owner = (*platform).and_then(|id| ctx.platforms.iter().find(|p| p.id == id));
        let bound = match (owner, *state) {
            (Some(p), _) => Some((p.rect.left(), p.rect.right())),
            (None, PatrolState::Patrolling) => Some((0.0, screen_w)),
            (None, PatrolState::Entering) => None,
        };
        if let Some((left, right)) = bound {
            if self.rect.right() > right {
                self.direction = -1.0;
            } else if self.rect.left() < left {
                self.direction = 1.0;
            }
        }

        if self.rect.top() > tuning.screen.y {
            self.fell = true;
        }
    }

    fn update_aerial(&mut self, ctx: &mut StepContext<'_>) {
        let screen_w = ctx.tuning.screen.x;
        let amplitude = ctx.tuning.aerial_bob_amplitude;

        self.rect.pos.x += self.speed * self.direction;
        if self.direction < 0.0 && self.rect.left() < -screen_w {
            self.direction = 1.0;
        } else if self.direction > 0.0 && self.rect.left() > 2.0 * screen_w {
            self.direction = -1.0;
        }

        if let EnemyBehavior::Aerial {
            base_y, bob_phase, ..
        } = &mut self.behavior
        {
            *bob_phase = (*bob_phase + 0.05) % std::f32::consts::TAU;
            self.rect.pos.y = *base_y + bob_phase.sin() * amplitude;
        }

        if self.try_fire(ctx.now_ms, ctx.tuning, &mut *ctx.rng) {
            let origin = Vec2::new(self.rect.center().x, self.rect.bottom());
            let shot = EnemyProjectile::dropped(ctx.ids.next(), origin, ctx.tuning);
            log::debug!("pigeon {} dropped shot {}", self.id, shot.id);
            ctx.enemy_shots.push(shot);
        }
    }
}

impl Actor for Enemy {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn update(&mut self, ctx: &mut StepContext<'_>) {
        match self.behavior {
            EnemyBehavior::Ground { .. } => self.update_ground(ctx),
            EnemyBehavior::Aerial { .. } => self.update_aerial(ctx),
        }
    }

    fn is_alive(&self) -> bool {
        self.hp > 0 && !self.fell
    }
}

impl Damageable for Enemy {
    fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.hp > 0;
        self.hp -= amount;
        was_alive && self.hp <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityIds, Platform};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Harness {
        tuning: Tuning,
        rng: Pcg32,
        ids: EntityIds,
        shots: Vec<EnemyProjectile>,
        now_ms: f64,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                tuning: Tuning::default(),
                rng: Pcg32::seed_from_u64(7),
                ids: EntityIds::default(),
                shots: Vec::new(),
                now_ms: 0.0,
            }
        }

        fn step(&mut self, enemy: &mut Enemy, platforms: &[Platform]) {
            let mut ctx = StepContext {
                platforms,
                tuning: &self.tuning,
                now_ms: self.now_ms,
                rng: &mut self.rng,
                ids: &mut self.ids,
                enemy_shots: &mut self.shots,
            };
            enemy.update(&mut ctx);
            self.now_ms += 1000.0 / 60.0;
        }
    }

    #[test]
    fn test_ground_enemy_patrols_owning_platform() {
        let mut h = Harness::new();
        let platforms = vec![Platform::new(1, Rect::new(100.0, 540.0, 300.0, 60.0))];
        let mut cat = Enemy::new(2, EnemyKind::Cat, Vec2::new(225.0, 390.0), Some(1), &h.tuning);

        let mut turned_right = false;
        let mut turned_left = false;
        for _ in 0..600 {
            let before = cat.direction;
            h.step(&mut cat, &platforms);
            if before < 0.0 && cat.direction > 0.0 {
                turned_right = true;
                assert!(cat.rect.left() < 100.0);
            }
            if before > 0.0 && cat.direction < 0.0 {
                turned_left = true;
                assert!(cat.rect.right() > 400.0);
            }
            // Never strays more than one step past the platform
            assert!(cat.rect.left() >= 100.0 - cat.speed);
            assert!(cat.rect.right() <= 400.0 + cat.speed);
        }
        assert!(turned_right && turned_left);
        assert!(cat.is_alive());
        assert_eq!(cat.rect.bottom(), 540.0);
        assert_eq!(cat.patrol_state(), PatrolState::Patrolling);
    }

    #[test]
    fn test_offscreen_enemy_walks_in_then_bounces_at_screen_edges() {
        let mut h = Harness::new();
        let platforms = vec![Platform::new(1, Rect::new(-2000.0, 540.0, 5000.0, 60.0))];
        let mut cow = Enemy::new(2, EnemyKind::Cow, Vec2::new(900.0, 480.0), None, &h.tuning);
        assert_eq!(cow.patrol_state(), PatrolState::Entering);

        // Entering: no bounce off the right edge while still outside
        h.step(&mut cow, &platforms);
        assert_eq!(cow.direction, -1.0);
        assert_eq!(cow.patrol_state(), PatrolState::Entering);

        while cow.patrol_state() == PatrolState::Entering {
            h.step(&mut cow, &platforms);
        }
        assert!(cow.rect.right() <= 800.0);

        let mut bounced = false;
        for _ in 0..1000 {
            h.step(&mut cow, &platforms);
            if cow.direction > 0.0 {
                bounced = true;
                break;
            }
        }
        assert!(bounced);
        assert!(cow.rect.left() < 0.0);
    }

    #[test]
    fn test_lost_platform_falls_back_to_screen_bounds() {
        let mut h = Harness::new();
        let ground = vec![Platform::new(9, Rect::new(-1000.0, 540.0, 3000.0, 60.0))];
        let mut cat = Enemy::new(2, EnemyKind::Cat, Vec2::new(700.0, 500.0), Some(1), &h.tuning);
        cat.direction = 1.0;
        for _ in 0..40 {
            h.step(&mut cat, &ground);
        }
        assert_eq!(cat.direction, -1.0);
        assert!(cat.rect.right() <= 800.0 + cat.speed);
    }

    #[test]
    fn test_ground_enemy_falls_into_void() {
        let mut h = Harness::new();
        let mut crab = Enemy::new(2, EnemyKind::Crab, Vec2::new(300.0, 500.0), None, &h.tuning);
        for _ in 0..120 {
            h.step(&mut crab, &[]);
        }
        assert!(crab.fell);
        assert!(!crab.is_alive());
    }

    #[test]
    fn test_umbrella_jitter_stays_on_platform() {
        let mut h = Harness::new();
        let platforms = vec![Platform::new(1, Rect::new(0.0, 540.0, 800.0, 60.0))];
        let mut umbrella = Enemy::new(2, EnemyKind::Umbrella, Vec2::new(380.0, 470.0), Some(1), &h.tuning);
        for _ in 0..300 {
            h.step(&mut umbrella, &platforms);
            assert!(umbrella.rect.bottom() <= 540.0);
        }
        assert!(umbrella.is_alive());
    }

    #[test]
    fn test_aerial_fire_cooldown_limits_shots() {
        let mut tuning = Tuning::default();
        tuning.aerial_fire_chance = 1.0;
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pigeon = Enemy::new(1, EnemyKind::Pigeon, Vec2::new(300.0, 100.0), None, &tuning);

        // Two attempts 1000ms apart inside a 2000ms cooldown
        let first = pigeon.try_fire(5000.0, &tuning, &mut rng);
        let second = pigeon.try_fire(6000.0, &tuning, &mut rng);
        assert!(first);
        assert!(!second);
        assert!(pigeon.try_fire(7000.0, &tuning, &mut rng));
    }

    #[test]
    fn test_aerial_fire_at_most_once_per_window_with_default_chance() {
        let tuning = Tuning::default();
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut pigeon = Enemy::new(1, EnemyKind::Pigeon, Vec2::new(300.0, 100.0), None, &tuning);
            let shots = [0.0, 1000.0]
                .iter()
                .filter(|&&t| pigeon.try_fire(t, &tuning, &mut rng))
                .count();
            assert!(shots <= 1);
        }
    }

    #[test]
    fn test_aerial_holds_fire_off_screen() {
        let mut tuning = Tuning::default();
        tuning.aerial_fire_chance = 1.0;
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pigeon = Enemy::new(1, EnemyKind::Pigeon, Vec2::new(1200.0, 100.0), None, &tuning);
        assert!(!pigeon.try_fire(0.0, &tuning, &mut rng));
        pigeon.rect.pos.x = 300.0;
        assert!(pigeon.try_fire(0.0, &tuning, &mut rng));
    }

    #[test]
    fn test_aerial_turns_far_off_screen_and_bobs() {
        let mut h = Harness::new();
        let mut pigeon = Enemy::new(1, EnemyKind::Pigeon, Vec2::new(-700.0, 100.0), None, &h.tuning);
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for _ in 0..200 {
            h.step(&mut pigeon, &[]);
            min_y = min_y.min(pigeon.rect.top());
            max_y = max_y.max(pigeon.rect.top());
        }
        assert_eq!(pigeon.direction, 1.0);
        assert!(pigeon.rect.left() > -800.0 - pigeon.speed);
        assert!(max_y - min_y > 1.0);
        assert!(max_y - min_y <= 2.0 * h.tuning.aerial_bob_amplitude + 0.01);
        // Ignores gravity
        assert!(pigeon.rect.top() < 200.0);
    }

    #[test]
    fn test_enemy_damage_transitions_once() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(1, EnemyKind::Cat, Vec2::ZERO, None, &tuning);
        assert!(!enemy.take_damage(5));
        assert_eq!(enemy.hp, 5);
        assert!(enemy.take_damage(6));
        assert_eq!(enemy.hp, -1);
        assert!(!enemy.take_damage(1));
        assert!(!enemy.is_alive());
    }
}
