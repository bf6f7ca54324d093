//! Transient visual feedback
//!
//! Smoke puffs, the red border flash and the taunt banner. None of these
//! affect gameplay; they only live long enough to be drawn.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, AssetId};
use crate::consts::{FLASH_TIMEOUT_MS, SMOKE_DURATION_MS, TAUNT_TIMEOUT_MS};

/// Which smoke to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Red: a hazard cost the player a life
    Danger,
    /// White: a pickup was collected
    Collected,
    /// Black: a hazard was neutralized by a pickup
    Neutralized,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [
        EffectKind::Danger,
        EffectKind::Collected,
        EffectKind::Neutralized,
    ];
}

/// A short smoke animation over the area of the actor that caused it
#[derive(Debug, Clone)]
pub struct Effect {
    pub actor: Actor,
    pub kind: EffectKind,
    pub start_ms: f64,
    pub frames: Vec<AssetId>,
    pub finished: bool,
}

impl Effect {
    /// Smoke covering `source`. With no frames the effect just runs out its time.
    pub fn new(kind: EffectKind, source: &Actor, frames: &[AssetId], start_ms: f64) -> Self {
        Self {
            actor: Actor::new(
                source.pos,
                source.size,
                frames.first().cloned().unwrap_or_default(),
            ),
            kind,
            start_ms,
            frames: frames.to_vec(),
            finished: false,
        }
    }

    /// Pick the frame for the elapsed time; finishes after the fixed duration
    pub fn advance(&mut self, now_ms: f64) {
        if self.finished {
            return;
        }
        let elapsed = now_ms - self.start_ms;
        if elapsed >= SMOKE_DURATION_MS {
            self.finished = true;
            return;
        }
        let progress = (elapsed / SMOKE_DURATION_MS).max(0.0);
        let index = (progress * self.frames.len() as f64) as usize;
        if let Some(frame) = self.frames.get(index.min(self.frames.len().saturating_sub(1))) {
            self.actor.visual = frame.clone();
        }
    }
}

/// Red border shown after a hazard hit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Flash {
    pub active: bool,
    pub since_ms: f64,
}

impl Flash {
    pub fn trigger(&mut self, now_ms: f64) {
        self.active = true;
        self.since_ms = now_ms;
    }

    pub fn expire(&mut self, now_ms: f64) {
        if now_ms - self.since_ms > FLASH_TIMEOUT_MS {
            self.active = false;
        }
    }
}

/// Banner message picked on level change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Taunt {
    pub text: Option<String>,
    pub since_ms: f64,
}

impl Taunt {
    pub fn show(&mut self, text: String, now_ms: f64) {
        self.text = Some(text);
        self.since_ms = now_ms;
    }

    pub fn expire(&mut self, now_ms: f64) {
        if now_ms - self.since_ms > TAUNT_TIMEOUT_MS {
            self.text = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn frames() -> Vec<AssetId> {
        (0..3).map(|i| AssetId(format!("f{i}"))).collect()
    }

    fn smoke() -> Effect {
        let source = Actor::square(Vec2::new(5.0, 5.0), 10.0, AssetId::from("trap"));
        Effect::new(EffectKind::Danger, &source, &frames(), 1000.0)
    }

    #[test]
    fn test_frames_follow_elapsed_time() {
        let mut e = smoke();
        assert_eq!(e.actor.visual.as_str(), "f0");
        e.advance(1099.0);
        assert_eq!(e.actor.visual.as_str(), "f0");
        e.advance(1100.0);
        assert_eq!(e.actor.visual.as_str(), "f1");
        e.advance(1250.0);
        assert_eq!(e.actor.visual.as_str(), "f2");
        assert!(!e.finished);
        e.advance(1300.0);
        assert!(e.finished);
    }

    #[test]
    fn test_empty_frames_still_finish() {
        let source = Actor::square(Vec2::ZERO, 10.0, AssetId::from("trap"));
        let mut e = Effect::new(EffectKind::Collected, &source, &[], 0.0);
        assert_eq!(e.actor.visual, AssetId::default());
        e.advance(150.0);
        assert!(!e.finished);
        e.advance(300.0);
        assert!(e.finished);
    }

    #[test]
    fn test_flash_expires_after_timeout() {
        let mut flash = Flash::default();
        flash.trigger(100.0);
        flash.expire(600.0);
        assert!(flash.active);
        flash.expire(600.5);
        assert!(!flash.active);
    }

    #[test]
    fn test_taunt_expires_after_timeout() {
        let mut taunt = Taunt::default();
        taunt.show("hi".into(), 0.0);
        taunt.expire(5000.0);
        assert_eq!(taunt.text.as_deref(), Some("hi"));
        taunt.expire(5001.0);
        assert!(taunt.text.is_none());
    }
}
