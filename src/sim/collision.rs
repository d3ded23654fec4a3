//! Collision detection and response for one-sided platforms
//!
//! Platforms are solid from above only: a falling body lands on the top
//! surface, a rising body passes through from below, and sides never block.

use super::entity::Platform;
use super::rect::Rect;

/// Outcome of a vertical physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingResult {
    /// Whether the body ended the step resting on a platform
    pub grounded: bool,
    /// Id of the platform landed on (if any)
    pub platform: Option<u32>,
}

impl LandingResult {
    pub fn airborne() -> Self {
        Self {
            grounded: false,
            platform: None,
        }
    }
}

/// Check overlap between two boxes
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Integrate gravity and resolve landing against every platform
///
/// `vel_y += gravity; y += vel_y`, then the body lands on the highest
/// platform whose top it crossed this step. The crossing test uses the
/// bottom edge before integration, so a fast fall cannot skip past a thin
/// platform.
pub fn fall_and_land(
    rect: &mut Rect,
    vel_y: &mut f32,
    gravity: f32,
    platforms: &[Platform],
    tolerance: f32,
) -> LandingResult {
    *vel_y += gravity;
    let prev_bottom = rect.bottom();
    rect.pos.y += *vel_y;
    resolve_landing(rect, vel_y, prev_bottom, platforms, tolerance)
}

/// Snap a body that moved downward onto the first platform top it crossed
pub fn resolve_landing(
    rect: &mut Rect,
    vel_y: &mut f32,
    prev_bottom: f32,
    platforms: &[Platform],
    tolerance: f32,
) -> LandingResult {
    if *vel_y < 0.0 {
        return LandingResult::airborne();
    }

    let bottom = rect.bottom();
    let landing = platforms
        .iter()
        .filter(|p| {
            let top = p.rect.top();
            rect.overlaps_horizontally(&p.rect) && bottom >= top && prev_bottom <= top + tolerance
        })
        .min_by(|a, b| {
            a.rect
                .top()
                .partial_cmp(&b.rect.top())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match landing {
        Some(platform) => {
            rect.set_bottom(platform.rect.top());
            *vel_y = 0.0;
            LandingResult {
                grounded: true,
                platform: Some(platform.id),
            }
        }
        None => LandingResult::airborne(),
    }
}

/// Keep a body's left edge on screen
#[inline]
pub fn clamp_left(rect: &mut Rect) {
    if rect.left() < 0.0 {
        rect.set_left(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ground() -> Vec<Platform> {
        vec![Platform::new(1, Rect::new(0.0, 540.0, 1000.0, 60.0))]
    }

    #[test]
    fn test_falling_player_grounds_on_the_crossing_tick() {
        let platforms = ground();
        let mut rect = Rect::new(100.0, 480.0, 60.0, 50.0); // bottom = 530
        let mut vel_y = 0.0;

        // Tick 1: vel 0.8, bottom 530.8, still above
        let result = fall_and_land(&mut rect, &mut vel_y, 0.8, &platforms, 0.5);
        assert!(!result.grounded);
        assert!((rect.bottom() - 530.8).abs() < 1e-4);
        assert!((vel_y - 0.8).abs() < 1e-6);

        let mut ticks = 1;
        loop {
            let predicted = rect.bottom() + vel_y + 0.8;
            let result = fall_and_land(&mut rect, &mut vel_y, 0.8, &platforms, 0.5);
            ticks += 1;
            if predicted >= 540.0 {
                assert!(result.grounded);
                assert_eq!(result.platform, Some(1));
                break;
            }
            assert!(!result.grounded);
            assert!(ticks < 20, "never landed");
        }
        assert_eq!(rect.bottom(), 540.0);
        assert_eq!(vel_y, 0.0);
    }

    #[test]
    fn test_grounded_body_stays_grounded() {
        let platforms = ground();
        let mut rect = Rect::new(100.0, 490.0, 60.0, 50.0);
        let mut vel_y = 0.0;
        for _ in 0..10 {
            let result = fall_and_land(&mut rect, &mut vel_y, 0.8, &platforms, 0.5);
            assert!(result.grounded);
            assert_eq!(rect.bottom(), 540.0);
            assert_eq!(vel_y, 0.0);
        }
    }

    #[test]
    fn test_rising_body_passes_through() {
        let platforms = vec![Platform::new(1, Rect::new(0.0, 400.0, 500.0, 60.0))];
        // Overlapping the platform while moving up
        let mut rect = Rect::new(100.0, 420.0, 60.0, 50.0);
        let mut vel_y = -10.0;
        let result = fall_and_land(&mut rect, &mut vel_y, 0.8, &platforms, 0.5);
        assert!(!result.grounded);
        assert!(vel_y < 0.0);
    }

    #[test]
    fn test_side_entry_does_not_snap() {
        let platforms = vec![Platform::new(1, Rect::new(200.0, 400.0, 300.0, 60.0))];
        // Bottom already well below the platform top when the fall starts
        let mut rect = Rect::new(210.0, 380.0, 60.0, 50.0);
        let mut vel_y = 2.0;
        let result = fall_and_land(&mut rect, &mut vel_y, 0.8, &platforms, 0.5);
        assert!(!result.grounded);
    }

    #[test]
    fn test_fast_fall_does_not_tunnel() {
        let platforms = vec![Platform::new(1, Rect::new(0.0, 400.0, 500.0, 4.0))];
        let mut rect = Rect::new(100.0, 340.0, 60.0, 50.0); // bottom 390
        let mut vel_y = 40.0; // one step ends far below the 4px platform
        let result = fall_and_land(&mut rect, &mut vel_y, 0.8, &platforms, 0.5);
        assert!(result.grounded);
        assert_eq!(rect.bottom(), 400.0);
    }

    #[test]
    fn test_lands_on_highest_crossed_platform() {
        let platforms = vec![
            Platform::new(1, Rect::new(0.0, 500.0, 500.0, 60.0)),
            Platform::new(2, Rect::new(0.0, 450.0, 500.0, 60.0)),
        ];
        let mut rect = Rect::new(100.0, 390.0, 60.0, 50.0); // bottom 440
        let mut vel_y = 70.0;
        let result = fall_and_land(&mut rect, &mut vel_y, 0.8, &platforms, 0.5);
        assert_eq!(result.platform, Some(2));
        assert_eq!(rect.bottom(), 450.0);
    }

    #[test]
    fn test_clamp_left() {
        let mut rect = Rect::new(-12.0, 0.0, 60.0, 50.0);
        clamp_left(&mut rect);
        assert_eq!(rect.left(), 0.0);
        let mut rect = Rect::new(900.0, 0.0, 60.0, 50.0);
        clamp_left(&mut rect);
        assert_eq!(rect.left(), 900.0);
    }

    proptest! {
        #[test]
        fn prop_downward_overlap_from_above_lands_exactly(
            x in 0.0f32..900.0,
            gap in 0.0f32..30.0,
            vel in 0.0f32..30.0,
        ) {
            let platforms = ground();
            let mut rect = Rect::new(x, 540.0 - 50.0 - gap, 60.0, 50.0);
            let mut vel_y = vel;
            let result = fall_and_land(&mut rect, &mut vel_y, 0.8, &platforms, 0.5);
            if result.grounded {
                prop_assert_eq!(rect.bottom(), 540.0);
                prop_assert_eq!(vel_y, 0.0);
                // One more tick keeps it grounded
                let again = fall_and_land(&mut rect, &mut vel_y, 0.8, &platforms, 0.5);
                prop_assert!(again.grounded);
                prop_assert_eq!(rect.bottom(), 540.0);
            } else {
                prop_assert!(rect.bottom() < 540.0);
            }
        }
    }
}
