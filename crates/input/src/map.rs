//! Key mapping from terminal events to game commands.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Command, FlowState};

/// Commands accepted per frame; extra key presses in the same frame are dropped.
pub const MAX_COMMANDS_PER_FRAME: usize = 32;

/// Map keyboard input to a command for the given flow state.
///
/// Esc pauses while playing and resumes while paused. Enter and Space start a
/// game from the menu and restart after game over.
pub fn handle_key_event(key: KeyEvent, flow: FlowState) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }

    match key.code {
        // Left piece
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeftPieceLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveLeftPieceRight),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::MoveLeftPieceDown),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::RotateLeftPiece),

        // Right piece
        KeyCode::Left => Some(Command::MoveRightPieceLeft),
        KeyCode::Right => Some(Command::MoveRightPieceRight),
        KeyCode::Down => Some(Command::MoveRightPieceDown),
        KeyCode::Up => Some(Command::RotateRightPiece),

        // Flow
        KeyCode::Esc => match flow {
            FlowState::Playing => Some(Command::Pause),
            FlowState::Paused => Some(Command::Resume),
            _ => None,
        },
        KeyCode::Enter | KeyCode::Char(' ') => match flow {
            FlowState::Start => Some(Command::Start),
            FlowState::GameOver => Some(Command::Restart),
            _ => None,
        },
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::ReturnToMenu),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Commands collected between two frames, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct CommandBatch {
    commands: ArrayVec<Command, MAX_COMMANDS_PER_FRAME>,
}

impl CommandBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map and queue a key event; returns the queued command, if any.
    ///
    /// Presses and terminal auto-repeats count, releases do not. A press that
    /// maps to nothing or arrives once the batch is full is dropped.
    pub fn push_key(&mut self, key: KeyEvent, flow: FlowState) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let cmd = handle_key_event(key, flow)?;
        self.commands.try_push(cmd).ok()?;
        Some(cmd)
    }

    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
