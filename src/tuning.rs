//! Data-driven game balance
//!
//! Every pixel-valued constant is scaled by the display factor so larger
//! screens play the same as the 800x600 reference.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;

/// Balance values consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tuning {
    /// Visible play area
    pub screen: Vec2,
    /// Display scale relative to the reference resolution (never below 1)
    pub scale: f32,

    // === Physics ===
    pub gravity: f32,
    pub player_speed: f32,
    pub jump_force: f32,
    pub landing_tolerance: f32,
    /// Player right edge beyond which the camera scrolls
    pub scroll_threshold: f32,

    // === Player ===
    pub player_size: Vec2,
    pub player_max_health: i32,
    pub fire_interval_ms: f32,

    // === Combat ===
    pub contact_damage: i32,
    pub knockback: f32,
    pub enemy_health: i32,
    pub enemy_shot_damage: i32,
    pub enemy_shot_speed: f32,
    pub enemy_shot_size: Vec2,
    pub aerial_fire_cooldown_ms: f32,
    pub aerial_fire_chance: f64,
    pub aerial_bob_amplitude: f32,
    pub umbrella_jitter: f32,
    pub kill_score: u64,
    pub pickup_score: u64,

    // === Effects and props ===
    pub explosion_size: f32,
    pub explosion_frames: u32,
    pub explosion_frame_ms: f32,
    pub bone_size: Vec2,
    pub bone_bob_amplitude: f32,
    pub bone_bob_speed: f32,
    pub flag_size: Vec2,

    /// Level generator ranges
    pub generator: GeneratorTuning,
}

/// Level generator balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorTuning {
    pub platform_thickness: f32,
    pub base_segments: u32,
    pub segment_growth: u32,
    pub max_segments: u32,
    pub min_gap_base: f32,
    pub min_gap_growth: f32,
    pub max_gap_base: f32,
    pub max_gap_growth: f32,
    pub max_gap_ceiling: f32,
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub floor_chance: f64,
    pub min_elevation: f32,
    pub elevation_growth: f32,
    pub max_elevation_ceiling: f32,
    pub bones_chance: f64,
    pub bone_spacing: f32,
    pub enemy_chance: f64,
    pub enemy_drop_height: f32,
    pub final_gap: f32,
    pub final_platform_width: f32,
    pub flag_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_screen(REFERENCE_WIDTH, REFERENCE_HEIGHT)
    }
}

impl Tuning {
    /// Build balance values for a screen of the given size
    pub fn for_screen(width: f32, height: f32) -> Self {
        let scale = (width / REFERENCE_WIDTH).max(1.0);
        let px = |v: f32| v * scale;

        Self {
            screen: Vec2::new(width, height),
            scale,

            gravity: px(GRAVITY),
            player_speed: px(PLAYER_SPEED),
            jump_force: px(JUMP_FORCE),
            landing_tolerance: px(LANDING_TOLERANCE),
            scroll_threshold: width / 2.0,

            player_size: Vec2::new(px(PLAYER_WIDTH), px(PLAYER_HEIGHT)),
            player_max_health: PLAYER_MAX_HEALTH,
            fire_interval_ms: FIRE_INTERVAL_MS,

            contact_damage: CONTACT_DAMAGE,
            knockback: px(KNOCKBACK),
            enemy_health: ENEMY_HEALTH,
            enemy_shot_damage: ENEMY_SHOT_DAMAGE,
            enemy_shot_speed: px(ENEMY_SHOT_SPEED),
            enemy_shot_size: Vec2::new(px(ENEMY_SHOT_WIDTH), px(ENEMY_SHOT_HEIGHT)),
            aerial_fire_cooldown_ms: AERIAL_FIRE_COOLDOWN_MS,
            aerial_fire_chance: AERIAL_FIRE_CHANCE,
            aerial_bob_amplitude: px(AERIAL_BOB_AMPLITUDE),
            umbrella_jitter: px(UMBRELLA_JITTER),
            kill_score: KILL_SCORE,
            pickup_score: PICKUP_SCORE,

            explosion_size: px(EXPLOSION_SIZE),
            explosion_frames: EXPLOSION_FRAMES,
            explosion_frame_ms: EXPLOSION_FRAME_MS,
            bone_size: Vec2::new(px(BONE_WIDTH), px(BONE_HEIGHT)),
            bone_bob_amplitude: px(BONE_BOB_AMPLITUDE),
            bone_bob_speed: BONE_BOB_SPEED,
            flag_size: Vec2::new(px(FLAG_WIDTH), px(FLAG_HEIGHT)),

            generator: GeneratorTuning {
                platform_thickness: px(PLATFORM_THICKNESS),
                base_segments: BASE_SEGMENTS,
                segment_growth: SEGMENT_GROWTH,
                max_segments: MAX_SEGMENTS,
                min_gap_base: px(MIN_GAP_BASE),
                min_gap_growth: MIN_GAP_GROWTH,
                max_gap_base: px(MAX_GAP_BASE),
                max_gap_growth: MAX_GAP_GROWTH,
                max_gap_ceiling: px(MAX_GAP_CEILING),
                platform_min_width: px(PLATFORM_MIN_WIDTH),
                platform_max_width: px(PLATFORM_MAX_WIDTH),
                floor_chance: FLOOR_CHANCE,
                min_elevation: px(MIN_ELEVATION),
                elevation_growth: px(ELEVATION_GROWTH),
                max_elevation_ceiling: px(MAX_ELEVATION_CEILING),
                bones_chance: BONES_CHANCE,
                bone_spacing: px(BONE_SPACING),
                enemy_chance: ENEMY_CHANCE,
                enemy_drop_height: px(ENEMY_DROP_HEIGHT),
                final_gap: px(FINAL_GAP),
                final_platform_width: px(FINAL_PLATFORM_WIDTH),
                flag_offset: px(FLAG_OFFSET),
            },
        }
    }

    /// Ground height: top of a floor-level platform
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.screen.y - self.generator.platform_thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_screen_is_unscaled() {
        let t = Tuning::default();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.gravity, 0.8);
        assert_eq!(t.ground_y(), 540.0);
        assert_eq!(t.scroll_threshold, 400.0);
    }

    #[test]
    fn test_small_screens_never_shrink() {
        let t = Tuning::for_screen(640.0, 480.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.player_size, Vec2::new(60.0, 50.0));
        assert_eq!(t.scroll_threshold, 320.0);
    }

    #[test]
    fn test_large_screens_scale_pixels_not_timers() {
        let t = Tuning::for_screen(1600.0, 900.0);
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.player_speed, 16.0);
        assert_eq!(t.generator.platform_thickness, 120.0);
        assert_eq!(t.fire_interval_ms, FIRE_INTERVAL_MS);
        assert_eq!(t.kill_score, KILL_SCORE);
    }

    #[test]
    fn test_dump_as_json() {
        let value = serde_json::to_value(Tuning::for_screen(1600.0, 900.0)).unwrap();
        assert_eq!(value["scale"], 2.0);
        assert_eq!(value["screen"][0], 1600.0);
        assert_eq!(value["generator"]["platform_thickness"], 120.0);
    }
}
