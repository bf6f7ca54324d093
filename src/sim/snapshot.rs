//! Read-only view of a frame for the renderer and HUD
//!
//! Entities are listed in draw order: clouds, track cells, hazards, pickups,
//! smoke, then the player on top.

use glam::{Vec2, Vec3};
use serde::Serialize;

use super::actor::{Actor, AssetId};
use super::ambiance::sky_color;
use super::state::{GamePhase, GameState};
use crate::consts::FLASH_BORDER_RATIO;

/// What an entity is, for renderers that style by category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Cloud,
    Cell,
    Hazard,
    Pickup,
    Effect,
    Player,
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub asset: AssetId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl EntityView {
    fn of(kind: EntityKind, actor: &Actor) -> Self {
        Self {
            kind,
            asset: actor.visual.clone(),
            pos: actor.pos,
            size: actor.size,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub level: String,
    pub lives: u32,
    /// Red border visible
    pub flash_active: bool,
    /// Red border width, scaled with the cell size
    pub flash_width: f32,
    /// RGB 0-255
    pub sky_color: Vec3,
    pub taunt: Option<String>,
    pub entities: Vec<EntityView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut entities = Vec::with_capacity(
            state.clouds.len()
                + state.track.lane_count() * state.settings.total_rows()
                + state.hazards.len()
                + state.pickups.len()
                + state.effects.len()
                + 1,
        );
        entities.extend(
            state
                .clouds
                .iter()
                .map(|c| EntityView::of(EntityKind::Cloud, &c.actor)),
        );
        entities.extend(
            state
                .track
                .cells()
                .map(|cell| EntityView::of(EntityKind::Cell, cell)),
        );
        entities.extend(
            state
                .hazards
                .iter()
                .filter(|h| h.is_live())
                .map(|h| EntityView::of(EntityKind::Hazard, &h.actor)),
        );
        entities.extend(
            state
                .pickups
                .iter()
                .filter(|p| !p.used)
                .map(|p| EntityView::of(EntityKind::Pickup, &p.actor)),
        );
        entities.extend(
            state
                .effects
                .iter()
                .filter(|e| !e.finished)
                .map(|e| EntityView::of(EntityKind::Effect, &e.actor)),
        );
        entities.push(EntityView::of(EntityKind::Player, &state.player.actor));

        Self {
            phase: state.phase,
            score: state.score,
            level: state.level.clone(),
            lives: state.player.lives,
            flash_active: state.flash.active,
            flash_width: state.settings.cell_size * FLASH_BORDER_RATIO,
            sky_color: sky_color(state.elapsed_ms()),
            taunt: state.taunt.text.clone(),
            entities,
        }
    }

    /// Entities of one kind, in draw order
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityView> + '_ {
        self.entities.iter().filter(move |e| e.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SKY_BRIGHT;
    use crate::settings::Settings;

    #[test]
    fn test_capture_fresh_state() {
        let state = GameState::new(Settings::default(), 3).unwrap();
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.phase, GamePhase::NotStarted);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.level, "Herald");
        assert_eq!(snap.lives, 1);
        assert_eq!(snap.flash_width, 24.0);
        assert_eq!(snap.sky_color, Vec3::from_array(SKY_BRIGHT));
        assert_eq!(snap.of_kind(EntityKind::Cloud).count(), 5);
        assert_eq!(snap.of_kind(EntityKind::Cell).count(), 21);
        assert_eq!(snap.entities.last().map(|e| e.kind), Some(EntityKind::Player));
    }

    #[test]
    fn test_consumed_items_are_hidden() {
        let mut state = GameState::new(Settings::default(), 3).unwrap();
        state.spawn_hazard(0, 0);
        state.spawn_hazard(1, 0);
        state.hazards[1].invalid = true;
        state.spawn_pickup(2, crate::sim::items::PickupKind::ExtraLife);
        state.pickups[0].used = true;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.of_kind(EntityKind::Hazard).count(), 1);
        assert_eq!(snap.of_kind(EntityKind::Pickup).count(), 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(Settings::default(), 3).unwrap();
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"level\":\"Herald\""));
    }

    #[test]
    fn test_flash_width_follows_viewport() {
        let settings = Settings::for_viewport(400.0, 1200.0);
        let state = GameState::new(settings, 3).unwrap();
        // 1200 / 6 rows = 200 per cell
        assert_eq!(Snapshot::capture(&state).flash_width, 40.0);
    }
}
