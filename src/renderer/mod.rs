//! Rendering consumer
//!
//! Walks a `Snapshot` and issues draw calls against a `RenderSurface`
//! supplied by the host. Nothing here can reach the simulation state.

pub mod assets;

pub use assets::{AssetInfo, AssetRegistry};

use glam::{Vec2, Vec3};

use crate::sim::{AssetId, Snapshot};

/// Axis-aligned box, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A loaded asset placed on screen
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedVisual<'a> {
    pub asset: &'a AssetId,
    pub rect: Rect,
}

/// Host drawing backend
pub trait RenderSurface {
    fn draw_actor(&mut self, visual: &PositionedVisual<'_>);

    /// Placeholder for an asset that is not loaded yet
    fn draw_fallback_label(&mut self, text: &str, rect: Rect);

    /// Background fill, RGB 0-255
    fn fill_sky(&mut self, _color: Vec3) {}

    fn draw_flash_border(&mut self, _width: f32) {}
}

/// Draw one frame. Sky first, then every entity in snapshot order, then the flash border.
pub fn render_frame<S: RenderSurface + ?Sized>(
    snapshot: &Snapshot,
    registry: &AssetRegistry,
    surface: &mut S,
) {
    surface.fill_sky(snapshot.sky_color);

    for entity in &snapshot.entities {
        let rect = Rect {
            pos: entity.pos,
            size: entity.size,
        };
        if registry.is_loaded(&entity.asset) {
            surface.draw_actor(&PositionedVisual {
                asset: &entity.asset,
                rect,
            });
        } else {
            surface.draw_fallback_label(registry.label(&entity.asset), rect);
        }
    }

    if snapshot.flash_active {
        surface.draw_flash_border(snapshot.flash_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{GameState, Snapshot};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl RenderSurface for Recorder {
        fn draw_actor(&mut self, visual: &PositionedVisual<'_>) {
            self.calls.push(format!("actor {}", visual.asset));
        }

        fn draw_fallback_label(&mut self, text: &str, _rect: Rect) {
            self.calls.push(format!("label {text}"));
        }

        fn fill_sky(&mut self, _color: Vec3) {
            self.calls.push("sky".into());
        }

        fn draw_flash_border(&mut self, width: f32) {
            self.calls.push(format!("flash {width}"));
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot::capture(&GameState::new(Settings::default(), 8).unwrap())
    }

    #[test]
    fn test_missing_assets_use_labels() {
        let snap = snapshot();
        let mut registry = AssetRegistry::new();
        registry.mark_loaded(&AssetId::from("ladder"));
        registry.register(AssetId::from("player"), "Pudge");

        let mut surface = Recorder::default();
        render_frame(&snap, &registry, &mut surface);

        assert_eq!(surface.calls.first().map(String::as_str), Some("sky"));
        assert_eq!(surface.calls.last().map(String::as_str), Some("label Pudge"));
        assert_eq!(
            surface.calls.iter().filter(|c| *c == "actor ladder").count(),
            21
        );
        assert!(!surface.calls.iter().any(|c| c.starts_with("flash")));
    }

    #[test]
    fn test_flash_border_drawn_last() {
        let mut snap = snapshot();
        snap.flash_active = true;
        let mut surface = Recorder::default();
        render_frame(&snap, &AssetRegistry::new(), &mut surface);
        assert_eq!(surface.calls.last().map(String::as_str), Some("flash 24"));
        assert_eq!(surface.calls.len(), snap.entities.len() + 2);
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect {
            pos: Vec2::new(10.0, 20.0),
            size: Vec2::new(4.0, 6.0),
        };
        assert_eq!(rect.center(), Vec2::new(12.0, 23.0));
    }
}
