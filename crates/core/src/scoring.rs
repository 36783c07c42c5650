//! Scoring module - line-clear points and power mode
//!
//! Rules:
//! - A lock that clears `n` lines awards `base_points * n * multiplier`.
//! - When the score reaches the current threshold and power mode is off, power
//!   mode starts: for `power_duration_ms` the multiplier in effect is raised by
//!   [`POWER_BONUS`].
//! - When the window ends, the bonus is folded into the base multiplier and
//!   the threshold doubles.
//!
//! The multiplier in effect therefore never drops: `m` before a trigger,
//! `m + 1` during the window and `m + 1` afterwards.

use crate::config::EngineConfig;
use crate::types::POWER_BONUS;

/// Points for clearing `lines` lines at `multiplier`.
pub fn line_clear_points(base_points: u32, lines: u32, multiplier: u32) -> u32 {
    base_points.saturating_mul(lines).saturating_mul(multiplier)
}

/// Result of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockScore {
    pub points: u32,
    /// Power mode started because of this lock.
    pub power_activated: bool,
}

/// Score, multiplier and power-mode window of one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    /// Persistent multiplier (without the power bonus).
    multiplier: u32,
    power_active: bool,
    power_deadline_ms: u64,
    /// Score that triggers the next power mode.
    threshold: u32,
    base_points: u32,
    power_duration_ms: u32,
}

impl ScoreState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            score: 0,
            multiplier: 1,
            power_active: false,
            power_deadline_ms: 0,
            threshold: config.power_threshold,
            base_points: config.base_points,
            power_duration_ms: config.power_duration_ms,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Multiplier currently applied to line clears.
    pub fn multiplier(&self) -> u32 {
        if self.power_active {
            self.multiplier + POWER_BONUS
        } else {
            self.multiplier
        }
    }

    pub fn power_active(&self) -> bool {
        self.power_active
    }

    pub fn power_deadline_ms(&self) -> u64 {
        self.power_deadline_ms
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Milliseconds left in the power window at `now_ms` (0 when inactive).
    pub fn power_remaining_ms(&self, now_ms: u64) -> u64 {
        if self.power_active {
            self.power_deadline_ms.saturating_sub(now_ms)
        } else {
            0
        }
    }

    /// Score a lock that cleared `lines` lines at engine time `now_ms`.
    ///
    /// The threshold is checked after every lock, cleared lines or not.
    pub fn on_lock(&mut self, lines: u32, now_ms: u64) -> LockScore {
        let points = line_clear_points(self.base_points, lines, self.multiplier());
        self.score = self.score.saturating_add(points);

        let power_activated = !self.power_active && self.score >= self.threshold;
        if power_activated {
            self.power_active = true;
            self.power_deadline_ms = now_ms + self.power_duration_ms as u64;
        }

        LockScore {
            points,
            power_activated,
        }
    }

    /// End the power window if `now_ms` has reached its deadline.
    ///
    /// Returns true when the window ended on this call.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        if !self.power_active || now_ms < self.power_deadline_ms {
            return false;
        }
        self.power_active = false;
        self.multiplier += POWER_BONUS;
        self.threshold = self.threshold.saturating_mul(2);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ScoreState {
        ScoreState::new(&EngineConfig::default())
    }

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(67, 0, 1), 0);
        assert_eq!(line_clear_points(67, 1, 1), 67);
        assert_eq!(line_clear_points(67, 2, 3), 402);
        assert_eq!(line_clear_points(u32::MAX, 2, 2), u32::MAX);
    }

    #[test]
    fn test_new_state() {
        let s = state();
        assert_eq!(s.score(), 0);
        assert_eq!(s.multiplier(), 1);
        assert!(!s.power_active());
        assert_eq!(s.threshold(), 200);
    }

    #[test]
    fn test_lock_without_lines_scores_nothing() {
        let mut s = state();
        assert_eq!(s.on_lock(0, 0), LockScore::default());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_power_triggers_at_threshold() {
        let mut s = state();
        // 67 * 2 = 134, below 200.
        assert!(!s.on_lock(2, 100).power_activated);
        // +67 = 201.
        let r = s.on_lock(1, 500);
        assert!(r.power_activated);
        assert!(s.power_active());
        assert_eq!(s.multiplier(), 2);
        assert_eq!(s.power_deadline_ms(), 10_500);
        assert_eq!(s.power_remaining_ms(1_500), 9_000);
    }

    #[test]
    fn test_power_does_not_retrigger_while_active() {
        let mut s = state();
        s.on_lock(3, 0);
        assert!(s.power_active());
        assert!(!s.on_lock(1, 10).power_activated);
        // The second clear used the boosted multiplier.
        assert_eq!(s.score(), 201 + 134);
    }

    #[test]
    fn test_expiry_folds_bonus_and_doubles_threshold() {
        let mut s = state();
        s.on_lock(3, 0);
        assert!(!s.expire(9_999));
        assert!(s.power_active());

        assert!(s.expire(10_000));
        assert!(!s.power_active());
        assert_eq!(s.multiplier(), 2);
        assert_eq!(s.threshold(), 400);
        assert_eq!(s.power_remaining_ms(10_000), 0);

        // Already inactive: nothing more to do.
        assert!(!s.expire(20_000));
        assert_eq!(s.multiplier(), 2);
    }

    /// Drive `cycles` trigger/expire rounds, checking each step of the window.
    fn assert_power_cycles_step_by_one(config: &EngineConfig, cycles: u32) {
        let mut s = ScoreState::new(config);
        let mut now = 0u64;
        for _ in 0..cycles {
            let before = s.multiplier();
            // Clear lines until the threshold is crossed.
            while !s.on_lock(4, now).power_activated {
                assert_eq!(s.multiplier(), before);
                now += 1;
            }
            assert_eq!(s.multiplier(), before + 1, "{:?}", config);

            now += config.power_duration_ms as u64;
            assert!(s.expire(now));
            assert_eq!(s.multiplier(), before + 1, "{:?}", config);
        }
    }

    #[test]
    fn test_multiplier_never_decreases_across_cycles() {
        assert_power_cycles_step_by_one(&EngineConfig::default(), 5);
    }

    #[test]
    fn test_power_cycle_steps_by_one_for_any_scoring_config() {
        for base_points in [1, 67, 1_000] {
            for power_threshold in [1, 200, 5_000] {
                for power_duration_ms in [1, 10_000, 60_000] {
                    let config = EngineConfig {
                        base_points,
                        power_threshold,
                        power_duration_ms,
                        ..EngineConfig::default()
                    };
                    assert!(config.validate().is_ok());
                    assert_power_cycles_step_by_one(&config, 4);
                }
            }
        }
    }
}
