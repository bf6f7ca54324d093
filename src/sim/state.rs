//! Game state and core simulation types
//!
//! `GameState` is the sole owner of every collection; entities never hold a
//! reference back to it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ambiance::{Cloud, spawn_clouds};
use super::effects::{Effect, Flash, Taunt};
use super::items::{Hazard, Pickup, PickupKind};
use super::player::Player;
use super::track::Track;
use crate::consts::SPEED_CURVE_SCORE;
use crate::settings::{Settings, SettingsError};

/// Session progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start`
    #[default]
    NotStarted,
    /// Simulation advancing every tick
    Running,
    /// Out of lives; terminal for this session
    Ended,
}

/// Final result of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub final_score: u64,
    pub final_level: String,
    /// Name of the hazard that took the last life
    pub cause_of_death: Option<String>,
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RowRecycled { score: u64 },
    LevelUp { level: String, taunt: Option<String> },
    HazardSpawned { id: u32, column: usize },
    PickupSpawned { id: u32, kind: PickupKind, column: usize },
    HazardHit { id: u32, name: String, lives_left: u32 },
    PickupCollected { id: u32, kind: PickupKind },
    GameOver(GameOver),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Never decreases
    pub score: u64,
    /// Label of the current level
    pub level: String,
    pub rows_recycled: u64,
    pub player: Player,
    pub track: Track,
    pub clouds: Vec<Cloud>,
    /// Insertion order is collision priority
    pub hazards: Vec<Hazard>,
    pub pickups: Vec<Pickup>,
    pub effects: Vec<Effect>,
    pub flash: Flash,
    pub taunt: Taunt,
    /// Name of the most recent hazard that hit the player
    pub last_hazard: Option<String>,
    /// Time of the first tick; `None` until it happens
    pub start_ms: Option<f64>,
    pub last_ms: f64,
    pub now_ms: f64,
    pub game_over: Option<GameOver>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a fresh session. Fails if `settings` does not validate.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = spawn_clouds(&settings, &mut rng);
        let level = settings.level_for(0).to_string();
        Ok(Self {
            player: Player::new(&settings),
            track: Track::new(&settings),
            clouds,
            seed,
            rng,
            phase: GamePhase::NotStarted,
            score: 0,
            level,
            rows_recycled: 0,
            hazards: Vec::new(),
            pickups: Vec::new(),
            effects: Vec::new(),
            flash: Flash::default(),
            taunt: Taunt::default(),
            last_hazard: None,
            start_ms: None,
            last_ms: 0.0,
            now_ms: 0.0,
            game_over: None,
            events: Vec::new(),
            next_id: 1,
            settings,
        })
    }

    /// NotStarted -> Running. Returns false if the session already started.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Running;
        log::info!("Session started (seed {})", self.seed);
        true
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Track speed for the current score (units/ms)
    pub fn track_speed(&self) -> f32 {
        self.settings.base_speed() * (SPEED_CURVE_SCORE + self.score as f32) / SPEED_CURVE_SCORE
    }

    /// Milliseconds since the first tick
    pub fn elapsed_ms(&self) -> f64 {
        self.start_ms.map_or(0.0, |start| self.now_ms - start)
    }

    /// Spot at the top row of `column` where an item of `size` appears, centered in the lane
    fn spawn_point(&self, column: usize, size: f32) -> Vec2 {
        let top = self.track.top_of(column);
        Vec2::new(
            self.track.lane_x(column) + (self.settings.cell_size - size) / 2.0,
            top.pos.y,
        )
    }

    /// Place a hazard using catalog entry `appearance` on the top row of `column`
    pub fn spawn_hazard(&mut self, column: usize, appearance: usize) -> u32 {
        let size = self.settings.trap_size();
        let pos = self.spawn_point(column, size);
        let id = self.next_entity_id();
        let look = &self.settings.hazards[appearance % self.settings.hazards.len()];
        let hazard = Hazard::new(id, column, pos, size, look.asset.clone(), &look.name);
        log::debug!("Spawned hazard #{} ({}) in lane {}", id, hazard.name, column);
        self.hazards.push(hazard);
        self.events.push(GameEvent::HazardSpawned { id, column });
        id
    }

    /// Place a pickup of `kind` on the top row of `column`
    pub fn spawn_pickup(&mut self, column: usize, kind: PickupKind) -> u32 {
        let size = self.settings.item_size();
        let pos = self.spawn_point(column, size);
        let id = self.next_entity_id();
        let look = self.settings.pickups.get(kind);
        let pickup = Pickup::new(id, kind, pos, size, look.asset.clone(), &look.name);
        log::debug!("Spawned pickup #{} ({:?}) in lane {}", id, kind, column);
        self.pickups.push(pickup);
        self.events.push(GameEvent::PickupSpawned { id, kind, column });
        id
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
