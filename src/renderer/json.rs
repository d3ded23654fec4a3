//! One JSON object per frame, for tooling that replays or inspects runs

use std::io::Write;

use super::{RenderSnapshot, Renderer};

/// Writes each frame as a single line of JSON
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    type Error = serde_json::Error;

    fn render(&mut self, frame: &RenderSnapshot) -> Result<(), serde_json::Error> {
        serde_json::to_writer(&mut self.out, frame)?;
        writeln!(self.out).map_err(serde_json::Error::io)?;
        self.out.flush().map_err(serde_json::Error::io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Game;
    use crate::tuning::Tuning;

    #[test]
    fn test_frames_are_json_lines() {
        let mut game = Game::new(Tuning::default(), 3);
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.render(&RenderSnapshot::capture(&game)).unwrap();
        game.start_campaign();
        renderer.render(&RenderSnapshot::capture(&game)).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let frames: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(frames.len(), 2);

        assert_eq!(frames[0]["hud"]["phase"], "Menu");
        assert!(frames[0]["sprites"].as_array().unwrap().is_empty());

        let playing = &frames[1];
        assert_eq!(playing["hud"]["phase"], "Playing");
        assert_eq!(playing["hud"]["character"], "DINO");
        let sprites = playing["sprites"].as_array().unwrap();
        assert_eq!(sprites.last().unwrap()["kind"]["Player"], "Dino");
        assert_eq!(sprites[0]["kind"], "Platform");
        assert!(sprites[0]["rect"]["size"][0].as_f64().unwrap() > 0.0);
    }
}
