//! Game session: the engine's outer interface
//!
//! Owns the simulation state and pending input, drives one step per
//! externally supplied clock reading and hands back a snapshot to draw.

use std::fmt;

use crate::input::InputAction;
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameEvent, GameOver, GamePhase, GameState, Intent, Snapshot, TickInput, tick};

type GameOverHook = Box<dyn FnMut(&GameOver)>;

/// One play-through from `start` to game over
pub struct Session {
    state: GameState,
    input: TickInput,
    on_game_over: Option<GameOverHook>,
    game_over_fired: bool,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.state.phase)
            .field("score", &self.state.score)
            .field("input", &self.input)
            .field("game_over_fired", &self.game_over_fired)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Validate `settings` and build a session that has not started yet
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        Ok(Self {
            state: GameState::new(settings, seed)?,
            input: TickInput::default(),
            on_game_over: None,
            game_over_fired: false,
        })
    }

    /// Begin play. Returns false if the session was already started.
    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    /// Queue a press; consumed by a later tick
    pub fn on_input(&mut self, intent: Intent) {
        self.input.press(intent);
    }

    /// Route a mapped key or touch: `Start` begins play, moves are queued
    pub fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::Start => {
                self.start();
            }
            InputAction::Move(intent) => self.on_input(intent),
        }
    }

    /// Register the hook fired once when the player runs out of lives
    pub fn on_game_over(&mut self, hook: impl FnMut(&GameOver) + 'static) {
        self.on_game_over = Some(Box::new(hook));
    }

    /// Advance the simulation to `now_ms` and return the resulting frame
    pub fn tick(&mut self, now_ms: f64) -> Snapshot {
        tick(&mut self.state, &mut self.input, now_ms);

        for event in self.state.drain_events() {
            match event {
                GameEvent::GameOver(game_over) => self.fire_game_over(&game_over),
                GameEvent::HazardHit { name, lives_left, .. } => {
                    log::debug!("Hit by {} ({} lives left)", name, lives_left);
                }
                GameEvent::PickupCollected { kind, .. } => {
                    log::debug!("Collected {:?}", kind);
                }
                other => log::trace!("{:?}", other),
            }
        }

        Snapshot::capture(&self.state)
    }

    fn fire_game_over(&mut self, game_over: &GameOver) {
        if self.game_over_fired {
            return;
        }
        self.game_over_fired = true;
        if let Some(hook) = self.on_game_over.as_mut() {
            hook(game_over);
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::Ended
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
