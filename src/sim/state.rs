//! Game-state controller
//!
//! Owns the menu/mission-select/playing state machine and the current
//! [`World`]. Level changes and game over rebuild the world from a seed drawn
//! from the game's own RNG, so a whole session replays from one seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::enemy::EnemyKind;
use super::levelgen::Difficulty;
use super::world::World;
use crate::consts::MISSION_COUNT;
use crate::tuning::Tuning;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Title menu
    Menu,
    /// A level is running
    Playing,
    /// Direct level selection
    MissionSelect,
}

/// How a run progresses after the goal or a death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GameMode {
    /// Levels advance on the goal; death restarts from level 1
    #[default]
    Campaign,
    /// One chosen level; goal or death return to level select
    Mission,
    /// Streaming level with no goal
    Endless,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped,
    ShotFired { weapon_index: usize },
    EnemyFired { shot_id: u32 },
    PickupCollected { id: u32 },
    EnemyHit { id: u32, damage: i32 },
    EnemyKilled { id: u32, kind: EnemyKind },
    PlayerHit { damage: i32 },
    LevelComplete,
    PlayerFell,
    PlayerDied,
}

impl GameEvent {
    /// Whether this event ends the current run
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameEvent::PlayerFell | GameEvent::PlayerDied)
    }
}

/// Whole-session state
#[derive(Debug, Clone)]
pub struct Game {
    pub phase: GamePhase,
    pub mode: GameMode,
    /// Current (or last selected) level
    pub level: Difficulty,
    pub score: u64,
    /// Running level; `None` outside `Playing`
    pub world: Option<World>,
    pub tuning: Tuning,
    /// Session seed
    pub seed: u64,
    rng: Pcg32,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            mode: GameMode::Campaign,
            level: Difficulty::MIN,
            score: 0,
            world: None,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// New campaign from level 1
    pub fn start_campaign(&mut self) {
        self.mode = GameMode::Campaign;
        self.level = Difficulty::MIN;
        self.score = 0;
        self.start_level(None);
    }

    /// Play a single chosen level; out-of-range choices are clamped
    pub fn start_mission(&mut self, level: u32) {
        self.mode = GameMode::Mission;
        self.level = Difficulty::clamped(level.clamp(1, MISSION_COUNT));
        self.score = 0;
        self.start_level(None);
    }

    pub fn start_endless(&mut self) {
        self.mode = GameMode::Endless;
        self.level = Difficulty::MIN;
        self.score = 0;
        let seed = self.rng.random::<u64>();
        self.world = Some(World::endless(self.tuning.clone(), seed));
        self.set_phase(GamePhase::Playing);
    }

    pub fn open_mission_select(&mut self) {
        self.world = None;
        self.set_phase(GamePhase::MissionSelect);
    }

    /// Abandon any run and go back to the title
    pub fn return_to_menu(&mut self) {
        self.world = None;
        self.set_phase(GamePhase::Menu);
    }

    /// Goal reached
    pub fn complete_level(&mut self) {
        match self.mode {
            GameMode::Campaign => {
                let previous = self.world.take();
                self.level = self.level.next();
                log::info!("Level complete, advancing to level {} (score {})", self.level.get(), self.score);
                self.start_level(previous.as_ref());
            }
            GameMode::Mission => {
                log::info!("Mission {} complete (score {})", self.level.get(), self.score);
                self.open_mission_select();
            }
            // Endless levels have no goal
            GameMode::Endless => {}
        }
    }

    /// Player died or fell
    pub fn game_over(&mut self) {
        log::info!("Game over in {:?} mode, final score {}", self.mode, self.score);
        match self.mode {
            GameMode::Campaign | GameMode::Endless => {
                self.level = Difficulty::MIN;
                self.score = 0;
                self.return_to_menu();
            }
            GameMode::Mission => {
                self.score = 0;
                self.open_mission_select();
            }
        }
    }

    /// Build a level world at `self.level`, carrying the loadout of `previous`
    fn start_level(&mut self, previous: Option<&World>) {
        let seed = self.rng.random::<u64>();
        let mut world = World::new_level(self.level, self.tuning.clone(), seed, self.score);
        if let Some(previous) = previous {
            world.player.carry_over(&previous.player);
        }
        self.world = Some(world);
        self.set_phase(GamePhase::Playing);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
    }
}
