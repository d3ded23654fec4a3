//! Fixed timestep simulation tick
//!
//! One tick runs four phases in a fixed order: motion, camera scroll,
//! interactions, life-cycle. Interactions are resolved in the order pickups,
//! goal, void, enemy shots, player shots, enemy contact; reaching the goal or
//! falling ends resolution for the tick.

use rand::Rng;

use super::collision::aabb_overlap;
use super::entity::{Actor, Damageable, StepContext};
use super::levelgen;
use super::state::{Game, GameEvent, GamePhase};
use super::world::World;
use crate::consts::{ENDLESS_MIN_ENEMIES, ENDLESS_MIN_PLATFORMS, ENDLESS_SPAWN_CHANCE};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Movement intent; both held cancel out
    pub left: bool,
    pub right: bool,
    /// Jump (ignored while airborne)
    pub jump: bool,
    /// Fire (may be held; the shot interval is enforced here)
    pub fire: bool,
    /// One-shot loadout changes
    pub cycle_weapon: bool,
    pub cycle_character: bool,
    /// Menu navigation
    pub menu: Option<MenuAction>,
}

/// Discrete menu commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartCampaign,
    OpenMissionSelect,
    StartEndless,
    /// Choose a mission level (clamped to the available range)
    SelectLevel(u32),
    Back,
}

/// Advance the whole game by one fixed timestep
pub fn tick(game: &mut Game, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    if let Some(action) = input.menu {
        apply_menu_action(game, action);
    }

    if game.phase != GamePhase::Playing {
        return Vec::new();
    }
    let Some(world) = game.world.as_mut() else {
        return Vec::new();
    };

    let events = world.step(input, dt_ms);
    game.score = world.score;

    if events.contains(&GameEvent::LevelComplete) {
        game.complete_level();
    } else if events.iter().any(GameEvent::is_fatal) {
        game.game_over();
    }
    events
}

fn apply_menu_action(game: &mut Game, action: MenuAction) {
    match (game.phase, action) {
        (GamePhase::Menu, MenuAction::StartCampaign) => game.start_campaign(),
        (GamePhase::Menu, MenuAction::OpenMissionSelect) => game.open_mission_select(),
        (GamePhase::Menu, MenuAction::StartEndless) => game.start_endless(),
        (GamePhase::MissionSelect, MenuAction::SelectLevel(level)) => game.start_mission(level),
        (GamePhase::MissionSelect | GamePhase::Playing, MenuAction::Back) => game.return_to_menu(),
        (phase, action) => log::debug!("Ignoring {action:?} in {phase:?}"),
    }
}

/// Whether interaction resolution continues after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Continue,
    Stop,
}

impl World {
    /// Advance the level by one tick and report what happened
    pub fn step(&mut self, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.now_ms += dt_ms as f64;
        self.time_ticks += 1;

        self.motion_phase(input, &mut events);
        self.scroll_phase();
        if self.interaction_phase(&mut events) == Resolution::Stop {
            return events;
        }

        if self.player.health <= 0 {
            log::info!("Player died with score {}", self.score);
            events.push(GameEvent::PlayerDied);
        }
        events
    }

    fn motion_phase(&mut self, input: &TickInput, events: &mut Vec<GameEvent>) {
        let tuning = &self.tuning;
        let player = &mut self.player;

        if input.cycle_weapon {
            player.cycle_weapon();
        }
        if input.cycle_character {
            player.cycle_character();
        }
        if input.jump && player.jump(tuning) {
            events.push(GameEvent::Jumped);
        }
        if input.fire {
            if let Some(shot) = player.try_fire(self.now_ms, tuning, &mut self.ids) {
                events.push(GameEvent::ShotFired {
                    weapon_index: shot.weapon_index,
                });
                self.projectiles.push(shot);
            }
        }
        player.apply_intent(input.left, input.right, tuning);
        player.step_physics(&self.platforms, tuning);

        let mut spawned = Vec::new();
        let mut ctx = StepContext {
            platforms: &self.platforms,
            tuning,
            now_ms: self.now_ms,
            rng: &mut self.rng,
            ids: &mut self.ids,
            enemy_shots: &mut spawned,
        };
        update_all(&mut self.enemies, &mut ctx);
        update_all(&mut self.projectiles, &mut ctx);
        update_all(&mut self.enemy_projectiles, &mut ctx);
        update_all(&mut self.bones, &mut ctx);
        update_all(&mut self.explosions, &mut ctx);

        events.extend(spawned.iter().map(|s| GameEvent::EnemyFired { shot_id: s.id }));
        self.enemy_projectiles.append(&mut spawned);
    }

    /// Keep the player left of the scroll threshold by moving the world instead
    fn scroll_phase(&mut self) {
        let overshoot = self.player.rect.right() - self.tuning.scroll_threshold;
        if overshoot <= 0.0 {
            return;
        }

        self.player.rect.set_right(self.tuning.scroll_threshold);
        shift_all(&mut self.platforms, overshoot);
        shift_all(&mut self.enemies, overshoot);
        shift_all(&mut self.projectiles, overshoot);
        shift_all(&mut self.enemy_projectiles, overshoot);
        shift_all(&mut self.bones, overshoot);
        shift_all(&mut self.flags, overshoot);
        shift_all(&mut self.explosions, overshoot);
        self.camera_offset += overshoot;

        self.platforms.retain(|p| p.rect.right() >= 0.0);

        if self.endless {
            self.top_up_endless();
        }
    }

    fn top_up_endless(&mut self) {
        if self.platforms.len() < ENDLESS_MIN_PLATFORMS {
            let rect = levelgen::endless_next_platform(&self.tuning, &mut self.rng);
            self.spawn_platform(rect);
        }
        if self.enemies.len() < ENDLESS_MIN_ENEMIES && self.rng.random_bool(ENDLESS_SPAWN_CHANCE) {
            let (kind, pos) = levelgen::endless_enemy(&self.tuning, &mut self.rng);
            self.spawn_enemy(kind, pos, None);
        }
    }

    fn interaction_phase(&mut self, events: &mut Vec<GameEvent>) -> Resolution {
        let player_rect = self.player.rect;

        // Pickups
        let mut collected = 0;
        self.bones.retain(|bone| {
            let hit = aabb_overlap(&bone.rect, &player_rect);
            if hit {
                events.push(GameEvent::PickupCollected { id: bone.id });
                collected += 1;
            }
            !hit
        });
        self.score += collected * self.tuning.pickup_score;

        // Goal
        if self.flags.iter().any(|f| aabb_overlap(&f.rect, &player_rect)) {
            log::info!("Goal reached at camera offset {:.0}", self.camera_offset);
            events.push(GameEvent::LevelComplete);
            return Resolution::Stop;
        }

        // Void
        if player_rect.top() > self.tuning.screen.y {
            log::info!("Player fell with score {}", self.score);
            events.push(GameEvent::PlayerFell);
            return Resolution::Stop;
        }

        // Enemy shots
        let player = &mut self.player;
        self.enemy_projectiles.retain(|shot| {
            let hit = aabb_overlap(&shot.rect, &player_rect);
            if hit {
                player.take_damage(shot.damage);
                events.push(GameEvent::PlayerHit { damage: shot.damage });
            }
            !hit
        });

        // Player shots hit the first living enemy they overlap
        let mut kills = Vec::new();
        for shot in self.projectiles.iter_mut() {
            let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|e| e.hp > 0 && aabb_overlap(&shot.rect, &e.rect))
            else {
                continue;
            };
            shot.alive = false;
            events.push(GameEvent::EnemyHit {
                id: enemy.id,
                damage: shot.damage,
            });
            if enemy.take_damage(shot.damage) {
                kills.push((enemy.id, enemy.kind, enemy.rect.center()));
            }
        }
        self.projectiles.retain(|p| p.alive);
        self.enemies.retain(|e| e.is_alive());
        for (id, kind, center) in kills {
            log::debug!("{} {} destroyed", kind.name(), id);
            self.spawn_explosion(center);
            self.score += self.tuning.kill_score;
            events.push(GameEvent::EnemyKilled { id, kind });
        }

        // Contact damage is per tick; knockback is per touching enemy
        let touching: Vec<f32> = self
            .enemies
            .iter()
            .filter(|e| aabb_overlap(&e.rect, &player_rect))
            .map(|e| e.rect.center().x)
            .collect();
        if !touching.is_empty() {
            self.player.take_damage(self.tuning.contact_damage);
            events.push(GameEvent::PlayerHit {
                damage: self.tuning.contact_damage,
            });
        }
        for source_x in touching {
            self.player.knock_back_from(source_x, self.tuning.knockback);
        }

        Resolution::Continue
    }
}

fn update_all<A: Actor>(actors: &mut Vec<A>, ctx: &mut StepContext<'_>) {
    for actor in actors.iter_mut() {
        actor.update(ctx);
    }
    actors.retain(|a| a.is_alive());
}

fn shift_all<A: Actor>(actors: &mut [A], dx: f32) {
    for actor in actors.iter_mut() {
        actor.shift_x(dx);
    }
}
