//! Base moving entity
//!
//! Every visible object (track cells, clouds, player, hazards, pickups, smoke)
//! is an `Actor` plus variant-specific state.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical name of a renderable asset. Resolved by the external renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl From<&str> for AssetId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AssetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Position (top-left corner), velocity in units/ms, size and look
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub visual: AssetId,
}

impl Actor {
    pub fn new(pos: Vec2, size: Vec2, visual: AssetId) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            visual,
        }
    }

    /// Square actor
    pub fn square(pos: Vec2, side: f32, visual: AssetId) -> Self {
        Self::new(pos, Vec2::splat(side), visual)
    }

    /// Displace by velocity times elapsed time. Non-increasing time is a no-op.
    #[inline]
    pub fn advance(&mut self, last_ms: f64, now_ms: f64) {
        let elapsed = (now_ms - last_ms).max(0.0) as f32;
        self.pos += self.vel * elapsed;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Top edge is below `y`
    #[inline]
    pub fn is_below(&self, y: f32) -> bool {
        self.pos.y > y
    }
}
