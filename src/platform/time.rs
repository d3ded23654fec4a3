//! Fixed-step timing
//!
//! Wall-clock frame time goes into an accumulator that is drained in whole
//! simulation ticks, capped per frame to prevent a spiral of death.

/// Longest frame accepted before clamping (ms)
const MAX_FRAME_MS: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct FixedStep {
    step_ms: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(tick_rate: u32, max_substeps: u32) -> Self {
        Self {
            step_ms: 1000.0 / tick_rate.max(1) as f32,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Tick length in milliseconds
    pub fn step_ms(&self) -> f32 {
        self.step_ms
    }

    /// Add a frame's elapsed time and return how many ticks to run
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= self.step_ms && substeps < self.max_substeps {
            self.accumulator -= self.step_ms;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.step_ms {
            log::debug!("Dropping {:.1}ms of backlog", self.accumulator);
            self.accumulator %= self.step_ms;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks_only() {
        let mut step = FixedStep::new(60, 8);
        assert_eq!(step.advance(10.0), 0);
        assert_eq!(step.advance(10.0), 1);
        // The remainder carries into the next frame
        assert_eq!(step.advance(10.0), 0);
        assert_eq!(step.advance(5.0), 1);
    }

    #[test]
    fn test_substeps_capped() {
        let mut step = FixedStep::new(60, 4);
        assert_eq!(step.advance(1000.0), 4);
        // Backlog is dropped instead of carried into the next frame
        assert_eq!(step.advance(0.0), 0);
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        let mut step = FixedStep::new(60, 8);
        assert_eq!(step.advance(-50.0), 0);
        assert_eq!(step.advance(16.0), 0);
        assert_eq!(step.advance(1.0), 1);
    }
}
