//! Game flow state machine - menu, play, pause and game over
//!
//! `Game` owns at most one `Engine` and decides which commands reach it.
//! The host calls [`Game::frame`] once per frame with the elapsed time and the
//! commands collected since the last frame, then reads [`Game::snapshot`].
//!
//! | State    | Command      | Next     | Engine            |
//! |----------|--------------|----------|-------------------|
//! | Start    | Start        | Playing  | fresh             |
//! | Playing  | Pause        | Paused   | frozen            |
//! | Paused   | Resume       | Playing  | resumed           |
//! | Playing  | (game over)  | GameOver | kept for display  |
//! | GameOver | Restart      | Playing  | fresh             |
//! | any      | ReturnToMenu | Start    | dropped           |
//!
//! Every other pair is ignored. `Quit` is accepted in any state and only
//! raises [`Game::should_quit`]; leaving the loop is the host's job.

use anyhow::Result;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::{Command, FlowState, GameEvent};

#[derive(Debug, Clone)]
pub struct Game {
    state: FlowState,
    engine: Option<Engine>,
    config: EngineConfig,
    /// Seeds handed to each new engine.
    seeds: SimpleRng,
    episode_id: u32,
    quit_requested: bool,
    /// Engine events collected so far; they survive the engine being dropped.
    events: Vec<GameEvent>,
}

impl Game {
    /// Session at the main menu
    ///
    /// `config.seed` seeds the session; each engine gets the next seed from it.
    /// The config is not checked here; use [`Game::try_new`] for untrusted input.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: FlowState::Start,
            engine: None,
            seeds: SimpleRng::new(config.seed),
            config,
            episode_id: 0,
            quit_requested: false,
            events: Vec::new(),
        }
    }

    /// Like [`Game::new`], rejecting configurations an engine cannot run with
    pub fn try_new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// Mutable engine access for building fixtures
    pub fn engine_mut(&mut self) -> Option<&mut Engine> {
        self.engine.as_mut()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Apply one command; returns true if it changed anything
    pub fn handle_command(&mut self, cmd: Command) -> bool {
        if let Some((side, op)) = cmd.piece_op() {
            if self.state != FlowState::Playing {
                return false;
            }
            return match self.engine.as_mut() {
                Some(engine) => engine.apply(side, op),
                None => false,
            };
        }

        match (self.state, cmd) {
            (_, Command::Quit) => {
                let changed = !self.quit_requested;
                self.quit_requested = true;
                changed
            }
            (FlowState::Start, Command::Start) | (FlowState::GameOver, Command::Restart) => {
                self.start_episode();
                true
            }
            (FlowState::Playing, Command::Pause) => {
                self.state = FlowState::Paused;
                true
            }
            (FlowState::Paused, Command::Resume) => {
                self.state = FlowState::Playing;
                true
            }
            (FlowState::Start, Command::ReturnToMenu) => false,
            (_, Command::ReturnToMenu) => {
                self.drain_engine_events();
                self.engine = None;
                self.state = FlowState::Start;
                true
            }
            _ => false,
        }
    }

    /// Advance one frame: apply `commands` in order, then tick once if playing
    pub fn frame(&mut self, dt_ms: u32, commands: &[Command]) {
        for &cmd in commands {
            self.handle_command(cmd);
        }

        if self.state != FlowState::Playing {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        engine.tick(dt_ms);
        let over = engine.game_over();
        self.drain_engine_events();
        if over {
            self.state = FlowState::GameOver;
        }
    }

    /// Take and clear the queued signals, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.drain_engine_events();
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            flow: self.state,
            episode_id: self.episode_id,
            engine: self.engine.as_ref().map(Engine::snapshot),
        }
    }

    /// Refresh `out` in place, reusing its cell buffer
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.flow = self.state;
        out.episode_id = self.episode_id;
        match (self.engine.as_ref(), out.engine.as_mut()) {
            (Some(engine), Some(snap)) => engine.snapshot_into(snap),
            (Some(engine), None) => out.engine = Some(engine.snapshot()),
            (None, _) => out.engine = None,
        }
    }

    fn start_episode(&mut self) {
        self.drain_engine_events();
        let seed = self.seeds.next_u32();
        self.engine = Some(Engine::new(self.config.clone().with_seed(seed)));
        self.episode_id += 1;
        self.state = FlowState::Playing;
    }

    fn drain_engine_events(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            self.events.extend(engine.take_events());
        }
    }
}
