//! Engine configuration
//!
//! Every tunable of a game lives here, including the RNG seed, so an engine
//! is a pure function of its config and the inputs it receives.

use anyhow::{ensure, Result};

use crate::shapes::{Shape, SHAPES};
use crate::types::{
    Side, BASE_POINTS, BOARD_HEIGHT, BOARD_WIDTH, FALL_INTERVAL_MS, POWER_DURATION_MS,
    POWER_THRESHOLD, RIGHT_SPAWN_INSET,
};

/// Largest supported board side; coordinates are `i8`.
pub const MAX_BOARD_SIDE: u8 = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub rows: u8,
    pub cols: u8,
    pub fall_interval_ms: u32,
    pub base_points: u32,
    pub power_threshold: u32,
    pub power_duration_ms: u32,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_HEIGHT,
            cols: BOARD_WIDTH,
            fall_interval_ms: FALL_INTERVAL_MS,
            base_points: BASE_POINTS,
            power_threshold: POWER_THRESHOLD,
            power_duration_ms: POWER_DURATION_MS,
            seed: 1,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Check that both spawn columns can hold every catalog shape.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.rows >= 2 && self.rows <= MAX_BOARD_SIDE,
            "rows must be in 2..={}, got {}",
            MAX_BOARD_SIDE,
            self.rows
        );
        ensure!(
            self.cols >= RIGHT_SPAWN_INSET as u8 + 1 && self.cols <= MAX_BOARD_SIDE,
            "cols must be in {}..={}, got {}",
            RIGHT_SPAWN_INSET + 1,
            MAX_BOARD_SIDE,
            self.cols
        );
        ensure!(self.fall_interval_ms > 0, "fall interval must be positive");
        ensure!(self.power_duration_ms > 0, "power duration must be positive");
        ensure!(self.power_threshold > 0, "power threshold must be positive");

        let widest = SHAPES.iter().map(Shape::width).max().unwrap_or(0) as i8;
        for side in Side::ORDER {
            let x = side.spawn_x(self.cols);
            ensure!(
                x >= 0 && x + widest <= self.cols as i8,
                "{} spawn column {} cannot fit a {}-wide shape on {} columns",
                side.as_str(),
                x,
                widest,
                self.cols
            );
        }
        Ok(())
    }
}
