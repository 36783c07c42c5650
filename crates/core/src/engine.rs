//! Simulation engine - one running two-piece game
//!
//! This ties together the grid, the two pieces, the RNG and the score state.
//! It advances time, resolves forced descents and locks, and detects game
//! over. The engine knows nothing about menus or pausing; the flow state
//! machine decides when to call it.
//!
//! Both pieces collide with the shared grid only, never with each other, so a
//! piece may roam across the whole board.

use crate::config::EngineConfig;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::scoring::ScoreState;
use crate::snapshot::{EngineSnapshot, PieceSnapshot};
use crate::types::{GameEvent, PieceOp, Side};

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    grid: Grid,
    left: Piece,
    right: Piece,
    rng: SimpleRng,
    /// Engine time: sum of every `dt` passed to `tick`.
    clock_ms: u64,
    /// Time since the last forced descent.
    fall_accumulator_ms: u32,
    score: ScoreState,
    game_over: bool,
    /// Signals not yet handed to the presentation layer.
    events: Vec<GameEvent>,
}

impl Engine {
    /// Fresh game: empty grid, one random piece per side at its spawn column
    ///
    /// `config` must pass [`EngineConfig::validate`]; untrusted configs go
    /// through [`crate::Game::try_new`].
    pub fn new(config: EngineConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid engine config: {:?}",
            config.validate().err()
        );
        let mut rng = SimpleRng::new(config.seed);
        let left = Piece::spawn_at(Side::Left.spawn_x(config.cols), &mut rng);
        let right = Piece::spawn_at(Side::Right.spawn_x(config.cols), &mut rng);
        let grid = Grid::new(config.rows, config.cols);
        Self::from_parts(config, grid, left, right, rng)
    }

    /// Game built from an existing grid and pieces (fixtures, replays)
    ///
    /// The RNG is only used for the pieces spawned after these lock.
    pub fn from_parts(
        config: EngineConfig,
        grid: Grid,
        left: Piece,
        right: Piece,
        rng: SimpleRng,
    ) -> Self {
        debug_assert_eq!((grid.rows(), grid.cols()), (config.rows, config.cols));
        Self {
            score: ScoreState::new(&config),
            config,
            grid,
            left,
            right,
            rng,
            clock_ms: 0,
            fall_accumulator_ms: 0,
            game_over: false,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self, side: Side) -> &Piece {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn piece_mut(&mut self, side: Side) -> &mut Piece {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    /// Multiplier currently applied to line clears (includes the power bonus)
    pub fn multiplier(&self) -> u32 {
        self.score.multiplier()
    }

    pub fn power_active(&self) -> bool {
        self.score.power_active()
    }

    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn fall_accumulator_ms(&self) -> u32 {
        self.fall_accumulator_ms
    }

    /// Replace a side's piece if the new one fits where it stands
    pub fn set_piece(&mut self, side: Side, piece: Piece) -> bool {
        if !piece.fits(&self.grid, 0, 0) {
            return false;
        }
        *self.piece_mut(side) = piece;
        true
    }

    /// Try to move a piece by (dx, dy)
    ///
    /// Rejected moves leave the engine untouched.
    pub fn move_piece(&mut self, side: Side, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let piece = self.piece(side);
        if !piece.fits(&self.grid, dx, dy) {
            return false;
        }
        let piece = self.piece_mut(side);
        piece.x += dx;
        piece.y += dy;
        true
    }

    /// Try to rotate a piece clockwise in place (no wall kicks)
    pub fn rotate_piece(&mut self, side: Side) -> bool {
        if self.game_over {
            return false;
        }
        let piece = self.piece(side);
        let rotated = piece.rotated_shape();
        if !self
            .grid
            .is_valid_placement(&rotated, piece.x, piece.y, 0, 0)
        {
            return false;
        }
        self.piece_mut(side).shape = rotated;
        true
    }

    /// Apply a decoded piece command
    pub fn apply(&mut self, side: Side, op: PieceOp) -> bool {
        match op {
            PieceOp::Move { dx, dy } => self.move_piece(side, dx, dy),
            PieceOp::Rotate => self.rotate_piece(side),
        }
    }

    /// Advance the game by `dt_ms`
    ///
    /// Returns true if a descent step ran. Does nothing once the game is over.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        if self.game_over {
            return false;
        }

        self.clock_ms += dt_ms as u64;
        self.score.expire(self.clock_ms);

        self.fall_accumulator_ms = self.fall_accumulator_ms.saturating_add(dt_ms);
        if self.fall_accumulator_ms <= self.config.fall_interval_ms {
            return false;
        }
        self.fall_accumulator_ms = 0;

        for side in Side::ORDER {
            self.descend(side);
            if self.game_over {
                break;
            }
        }
        true
    }

    /// One forced descent: move down, or lock and respawn
    fn descend(&mut self, side: Side) {
        if self.move_piece(side, 0, 1) {
            return;
        }
        self.lock_piece(side);
    }

    /// Lock a piece that cannot descend, score the clear, spawn its successor
    fn lock_piece(&mut self, side: Side) {
        let piece = *self.piece(side);

        // The other side's lock (or a clear) can leave this piece overlapping
        // filled cells; those cells keep their color.
        self.grid.lock(&piece.shape, piece.x, piece.y, piece.color);
        self.events.push(GameEvent::PieceLocked(side));

        let lines = self.grid.clear_full_rows();
        if lines > 0 {
            self.events.push(GameEvent::LinesCleared { side, count: lines });
        }

        let scored = self.score.on_lock(lines, self.clock_ms);
        if scored.power_activated {
            self.events.push(GameEvent::PowerModeActivated);
        }

        self.respawn(side);
    }

    /// Spawn a new random piece for `side` at its spawn column
    ///
    /// If it does not fit, the game is over and the old piece stays in place.
    pub fn respawn(&mut self, side: Side) -> bool {
        let x = side.spawn_x(self.config.cols);
        let piece = Piece::spawn_at(x, &mut self.rng);
        if !piece.fits(&self.grid, 0, 0) {
            if !self.game_over {
                self.game_over = true;
                self.events.push(GameEvent::GameOver);
            }
            return false;
        }
        *self.piece_mut(side) = piece;
        true
    }

    /// Take and clear the queued signals, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.left = PieceSnapshot::from(self.left);
        out.right = PieceSnapshot::from(self.right);
        out.score = self.score.score();
        out.multiplier = self.score.multiplier();
        out.power_active = self.score.power_active();
        out.power_remaining_ms = self.score.power_remaining_ms(self.clock_ms);
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            cells: self.grid.cells().to_vec(),
            left: PieceSnapshot::from(self.left),
            right: PieceSnapshot::from(self.right),
            score: self.score.score(),
            multiplier: self.score.multiplier(),
            power_active: self.score.power_active(),
            power_remaining_ms: self.score.power_remaining_ms(self.clock_ms),
            game_over: self.game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use crate::types::ColorId;

    fn engine_with(left: Piece, right: Piece) -> Engine {
        let config = EngineConfig::default();
        let grid = Grid::new(config.rows, config.cols);
        Engine::from_parts(config, grid, left, right, SimpleRng::new(1))
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid engine config")]
    fn test_new_rejects_oversized_board_in_debug() {
        Engine::new(EngineConfig {
            rows: 200,
            ..EngineConfig::default()
        });
    }

    #[test]
    fn test_new_engine() {
        let engine = Engine::new(EngineConfig::default());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.multiplier(), 1);
        assert!(!engine.power_active());
        assert!(!engine.game_over());
        assert_eq!(engine.piece(Side::Left).x, 1);
        assert_eq!(engine.piece(Side::Right).x, 6);
        assert_eq!(engine.piece(Side::Left).y, 0);
        assert_eq!(engine.grid().occupied_count(), 0);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let a = Engine::new(EngineConfig::default().with_seed(42));
        let b = Engine::new(EngineConfig::default().with_seed(42));
        assert_eq!(a.piece(Side::Left), b.piece(Side::Left));
        assert_eq!(a.piece(Side::Right), b.piece(Side::Right));
    }

    #[test]
    fn test_tick_below_interval_does_not_descend() {
        let mut engine = Engine::new(EngineConfig::default());
        assert!(!engine.tick(400));
        assert_eq!(engine.piece(Side::Left).y, 0);
        assert_eq!(engine.fall_accumulator_ms(), 400);

        assert!(engine.tick(1));
        assert_eq!(engine.piece(Side::Left).y, 1);
        assert_eq!(engine.piece(Side::Right).y, 1);
        assert_eq!(engine.fall_accumulator_ms(), 0);
        assert_eq!(engine.clock_ms(), 401);
    }

    #[test]
    fn test_move_and_rotate() {
        let mut engine = engine_with(
            Piece::new(ShapeKind::T, ColorId::Red, 1, 0),
            Piece::new(ShapeKind::O, ColorId::Blue, 6, 0),
        );
        assert!(engine.move_piece(Side::Left, -1, 0));
        assert!(!engine.move_piece(Side::Left, -1, 0));
        assert_eq!(engine.piece(Side::Left).x, 0);

        assert!(engine.rotate_piece(Side::Left));
        assert_eq!(engine.piece(Side::Left).shape.width(), 2);

        // O rotates onto itself.
        assert!(engine.rotate_piece(Side::Right));
        assert_eq!(engine.piece(Side::Right).shape, ShapeKind::O.template());
    }

    #[test]
    fn test_rotation_blocked_by_wall_keeps_shape() {
        let vertical_i = Piece {
            shape: ShapeKind::I.template().rotated_cw(),
            ..Piece::new(ShapeKind::I, ColorId::Cyan, 9, 0)
        };
        let mut engine = engine_with(vertical_i, Piece::new(ShapeKind::O, ColorId::Blue, 3, 0));
        assert!(!engine.rotate_piece(Side::Left));
        assert_eq!(engine.piece(Side::Left).shape.height(), 4);
    }

    #[test]
    fn test_pieces_pass_through_each_other() {
        let mut engine = engine_with(
            Piece::new(ShapeKind::O, ColorId::Red, 4, 0),
            Piece::new(ShapeKind::O, ColorId::Blue, 6, 0),
        );
        assert!(engine.move_piece(Side::Right, -1, 0));
        assert!(engine.move_piece(Side::Right, -1, 0));
        assert_eq!(engine.piece(Side::Right).x, engine.piece(Side::Left).x);
    }

    #[test]
    fn test_lock_emits_event_and_respawns() {
        let mut engine = engine_with(
            Piece::new(ShapeKind::O, ColorId::Red, 0, 18),
            Piece::new(ShapeKind::O, ColorId::Blue, 6, 0),
        );
        engine.tick(401);
        assert_eq!(engine.take_events(), vec![GameEvent::PieceLocked(Side::Left)]);
        assert_eq!(engine.grid().get(0, 19), Some(Some(ColorId::Red)));
        assert_eq!(engine.piece(Side::Left).y, 0);
        assert_eq!(engine.piece(Side::Left).x, 1);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_commands_ignored_after_game_over() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.game_over = true;
        let before = *engine.piece(Side::Left);
        assert!(!engine.move_piece(Side::Left, 0, 1));
        assert!(!engine.rotate_piece(Side::Left));
        assert!(!engine.tick(10_000));
        assert_eq!(*engine.piece(Side::Left), before);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let engine = Engine::new(EngineConfig::default());
        let snap = engine.snapshot();
        assert_eq!(snap.rows, 20);
        assert_eq!(snap.cols, 10);
        assert_eq!(snap.cells.len(), 200);
        assert_eq!(snap.left.x, 1);
        assert_eq!(snap.right.x, 6);
        assert_eq!(snap.multiplier, 1);
    }
}
