//! ASCII frame output for the headless runner

use std::io::{self, Write};

use super::{RenderSnapshot, Renderer, SpriteKind};
use crate::sim::EnemyKind;

/// Draws frames as a character grid followed by a HUD line
pub struct TextRenderer<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, cols: usize, rows: usize) -> Self {
        Self {
            out,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Rasterize a frame; later sprites overwrite earlier ones
    pub fn rasterize(&self, frame: &RenderSnapshot) -> Vec<String> {
        let mut grid = vec![vec![' '; self.cols]; self.rows];
        let cell_w = frame.screen.x / self.cols as f32;
        let cell_h = frame.screen.y / self.rows as f32;

        for sprite in &frame.sprites {
            let r = sprite.rect;
            let (c0, c1) = cell_span(r.left(), r.right(), cell_w, self.cols);
            let (r0, r1) = cell_span(r.top(), r.bottom(), cell_h, self.rows);
            let glyph = glyph(sprite.kind, sprite.facing_right);
            for row in grid.iter_mut().take(r1).skip(r0) {
                for cell in row.iter_mut().take(c1).skip(c0) {
                    *cell = glyph;
                }
            }
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = io::Error;

    fn render(&mut self, frame: &RenderSnapshot) -> io::Result<()> {
        let lines = self.rasterize(frame);
        let hud = &frame.hud;
        writeln!(self.out, "+{}+", "-".repeat(self.cols))?;
        for line in lines {
            writeln!(self.out, "|{line}|")?;
        }
        writeln!(self.out, "+{}+", "-".repeat(self.cols))?;
        writeln!(
            self.out,
            "{:?}/{:?} level {} score {} hp {}/{} {} [{}] x={:.0}",
            hud.phase,
            hud.mode,
            hud.level,
            hud.score,
            hud.health,
            hud.max_health,
            hud.character,
            hud.weapon,
            hud.camera_offset
        )?;
        self.out.flush()
    }
}

/// Cells covered by `[start, end)`, clipped to the grid
fn cell_span(start: f32, end: f32, cell: f32, count: usize) -> (usize, usize) {
    let max = count as f32;
    let first = (start / cell).floor().clamp(0.0, max) as usize;
    let last = (end / cell).ceil().clamp(0.0, max) as usize;
    (first, last.max(first))
}

fn glyph(kind: SpriteKind, facing_right: bool) -> char {
    match kind {
        SpriteKind::Platform => '=',
        SpriteKind::Flag => 'F',
        SpriteKind::Bone => 'b',
        SpriteKind::Enemy(EnemyKind::Cat) => 'c',
        SpriteKind::Enemy(EnemyKind::Cow) => 'w',
        SpriteKind::Enemy(EnemyKind::Umbrella) => 'u',
        SpriteKind::Enemy(EnemyKind::Crab) => 'x',
        SpriteKind::Enemy(EnemyKind::Pigeon) => 'v',
        SpriteKind::Projectile { .. } if facing_right => '>',
        SpriteKind::Projectile { .. } => '<',
        SpriteKind::EnemyProjectile => '!',
        SpriteKind::Explosion => '*',
        SpriteKind::Player(_) => 'P',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Hud, Sprite};
    use crate::sim::{Character, GameMode, GamePhase, Rect};
    use glam::Vec2;

    fn frame(sprites: Vec<Sprite>) -> RenderSnapshot {
        RenderSnapshot {
            screen: Vec2::new(800.0, 600.0),
            sprites,
            hud: Hud {
                phase: GamePhase::Playing,
                mode: GameMode::Campaign,
                level: 2,
                score: 150,
                weapon: "Laser",
                character: "BOB",
                health: 80,
                max_health: 100,
                camera_offset: 12.0,
            },
        }
    }

    fn sprite(kind: SpriteKind, rect: Rect) -> Sprite {
        Sprite {
            kind,
            rect,
            facing_right: true,
            frame: 0,
            health: None,
        }
    }

    #[test]
    fn test_rasterize_ground_and_player() {
        let renderer = TextRenderer::new(Vec::new(), 80, 30);
        let lines = renderer.rasterize(&frame(vec![
            sprite(SpriteKind::Platform, Rect::new(0.0, 540.0, 800.0, 60.0)),
            sprite(SpriteKind::Player(Character::Bob), Rect::new(100.0, 490.0, 60.0, 50.0)),
        ]));
        assert_eq!(lines.len(), 30);
        assert_eq!(lines[29], "=".repeat(80));
        assert_eq!(&lines[26][10..16], "PPPPPP");
    }

    #[test]
    fn test_off_screen_sprites_clip() {
        let renderer = TextRenderer::new(Vec::new(), 40, 10);
        let lines = renderer.rasterize(&frame(vec![
            sprite(SpriteKind::Bone, Rect::new(-500.0, -500.0, 30.0, 16.0)),
            sprite(SpriteKind::Enemy(EnemyKind::Cat), Rect::new(790.0, 100.0, 50.0, 40.0)),
        ]));
        assert!(lines.iter().all(|l| l.chars().count() == 40));
        assert!(!lines.iter().any(|l| l.contains('b')));
        assert!(lines[1].ends_with('c'));
    }

    #[test]
    fn test_render_writes_hud() {
        let mut renderer = TextRenderer::new(Vec::new(), 20, 5);
        renderer.render(&frame(Vec::new())).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 5 + 3);
        assert!(text.contains("score 150"));
        assert!(text.contains("BOB [Laser]"));
    }
}
