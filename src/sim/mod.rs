//! Time-driven simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders or reads
//! the clock:
//! - Callers supply the current time on every tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)

pub mod actor;
pub mod ambiance;
pub mod collision;
pub mod effects;
pub mod items;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod track;

pub use actor::{Actor, AssetId};
pub use ambiance::{Cloud, sky_color};
pub use effects::{Effect, EffectKind, Flash, Taunt};
pub use items::{Hazard, Pickup, PickupKind, UseContext};
pub use player::{Player, Transition};
pub use snapshot::{EntityKind, EntityView, Snapshot};
pub use state::{GameEvent, GameOver, GamePhase, GameState};
pub use tick::{Intent, TickInput, tick};
pub use track::{Lane, Track};
