//! Sky Ladder - A three-lane ladder-climbing arcade game
//!
//! Core modules:
//! - `sim`: Time-driven simulation (motion, track recycling, spawns, collisions, game state)
//! - `session`: The engine's outer interface (init, input, tick, game-over hook)
//! - `renderer`: Render-surface abstraction consuming read-only snapshots
//! - `settings`: Immutable session configuration
//! - `input`: Raw key/touch mapping to input intents

pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, SettingsError};

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Built-in tuning constants
pub mod consts {
    /// Lane transition duration (ms)
    pub const TRANSITION_MS: f64 = 100.0;
    /// Lifetime of a smoke effect (ms)
    pub const SMOKE_DURATION_MS: f64 = 300.0;
    /// Red border flash after a hazard hit (ms)
    pub const FLASH_TIMEOUT_MS: f64 = 500.0;
    /// Flash border width as a fraction of the cell size
    pub const FLASH_BORDER_RATIO: f32 = 0.2;
    /// Taunt message lifetime, checked on row recycles (ms)
    pub const TAUNT_TIMEOUT_MS: f64 = 5000.0;
    /// Half of a day/night cycle (ms)
    pub const HALF_DAY_MS: f64 = 10_000.0;

    /// Score at which the speed curve doubles the base speed
    pub const SPEED_CURVE_SCORE: f32 = 3000.0;
    /// Hazards and pickups fall faster than the track
    pub const ITEM_SPEED_FACTOR: f32 = 1.3;
    /// Clouds drift slower than the base speed
    pub const CLOUD_FALL_FACTOR: f32 = 0.9;

    /// Hazard spawn probability floor and ceiling
    pub const MIN_TRAP_CHANCE: f32 = 0.3;
    pub const MAX_TRAP_CHANCE: f32 = 1.0;
    /// Pickup spawn probability when no hazard spawned
    pub const PICKUP_CHANCE: f32 = 0.3;

    /// Sky endpoints (RGB 0-255)
    pub const SKY_BRIGHT: [f32; 3] = [135.0, 206.0, 235.0];
    pub const SKY_DARK: [f32; 3] = [35.0, 45.0, 60.0];
}

/// Linear interpolation: `t = 0` yields `from`, `t = 1` yields `to`
#[inline]
pub fn lerp(t: f32, from: f32, to: f32) -> f32 {
    t * (to - from) + from
}

/// Component-wise linear interpolation between two points
#[inline]
pub fn lerp_vec(t: f32, from: Vec2, to: Vec2) -> Vec2 {
    Vec2::new(lerp(t, from.x, to.x), lerp(t, from.y, to.y))
}

/// Uniform draw between `from` and `to`. Equal bounds are allowed and return `from`.
#[inline]
pub fn random_range<R: Rng>(rng: &mut R, from: f32, to: f32) -> f32 {
    lerp(rng.random::<f32>(), from, to)
}

/// Uniform choice from a slice; `None` when the slice is empty
#[inline]
pub fn random_choice<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}
