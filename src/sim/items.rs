//! Hazards and pickups
//!
//! Both are one-shot: the `used` flag guards every effect so a repeated
//! trigger changes nothing. Effects reach the rest of the game only through
//! an explicit `UseContext` borrowed from the game state for the duration of
//! the call.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, AssetId};
use super::effects::{Effect, EffectKind};
use super::player::Player;
use crate::random_choice;
use crate::settings::EffectFrames;

/// Pickup variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// One more life
    ExtraLife,
    /// Neutralizes every live hazard in one random lane
    AreaClear,
    /// Neutralizes one random live hazard
    RandomClear,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [
        PickupKind::ExtraLife,
        PickupKind::AreaClear,
        PickupKind::RandomClear,
    ];
}

/// Everything a hazard or pickup may touch when it fires
pub struct UseContext<'a> {
    pub player: &'a mut Player,
    pub effects: &'a mut Vec<Effect>,
    pub frames: &'a EffectFrames,
    pub columns: usize,
    pub now_ms: f64,
}

impl UseContext<'_> {
    /// Start a smoke effect over `source`
    pub fn emit(&mut self, kind: EffectKind, source: &Actor) {
        self.effects
            .push(Effect::new(kind, source, self.frames.for_kind(kind), self.now_ms));
    }
}

/// An obstacle that costs a life on contact
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: u32,
    pub actor: Actor,
    /// Shown on the game-over screen
    pub name: String,
    pub column: usize,
    /// Neutralized by a pickup; never costs a life
    pub invalid: bool,
    /// Already cost a life
    pub used: bool,
}

impl Hazard {
    pub fn new(id: u32, column: usize, pos: Vec2, size: f32, asset: AssetId, name: &str) -> Self {
        Self {
            id,
            actor: Actor::square(pos, size, asset),
            name: name.to_string(),
            column,
            invalid: false,
            used: false,
        }
    }

    /// Neither used nor invalid
    pub fn is_live(&self) -> bool {
        !self.used && !self.invalid
    }

    /// Cost the player a life. Returns whether anything happened.
    pub fn trigger(&mut self, ctx: &mut UseContext<'_>) -> bool {
        if !self.is_live() {
            return false;
        }
        self.used = true;
        ctx.emit(EffectKind::Danger, &self.actor);
        ctx.player.lives = ctx.player.lives.saturating_sub(1);
        log::debug!("Hazard {} hit, {} lives left", self.name, ctx.player.lives);
        true
    }

    /// Make the hazard inert without costing a life. Returns whether it was live.
    pub fn neutralize(&mut self, ctx: &mut UseContext<'_>) -> bool {
        if !self.is_live() {
            return false;
        }
        self.invalid = true;
        ctx.emit(EffectKind::Neutralized, &self.actor);
        true
    }
}

/// Neutralize every live hazard in `column`; returns how many were cleared
pub fn clear_lane(ctx: &mut UseContext<'_>, hazards: &mut [Hazard], column: usize) -> usize {
    let mut cleared = 0;
    for hazard in hazards.iter_mut().filter(|h| h.column == column) {
        if hazard.neutralize(ctx) {
            cleared += 1;
        }
    }
    cleared
}

/// Neutralize one uniformly chosen live hazard; no-op when none are live
pub fn clear_random<R: Rng>(
    ctx: &mut UseContext<'_>,
    hazards: &mut [Hazard],
    rng: &mut R,
) -> Option<u32> {
    let live: Vec<usize> = hazards
        .iter()
        .enumerate()
        .filter(|(_, h)| h.is_live())
        .map(|(i, _)| i)
        .collect();
    let &index = random_choice(rng, &live)?;
    let hazard = &mut hazards[index];
    hazard.neutralize(ctx);
    Some(hazard.id)
}

/// A one-shot power-up
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: u32,
    pub actor: Actor,
    pub kind: PickupKind,
    pub name: String,
    pub used: bool,
}

impl Pickup {
    pub fn new(id: u32, kind: PickupKind, pos: Vec2, size: f32, asset: AssetId, name: &str) -> Self {
        Self {
            id,
            actor: Actor::square(pos, size, asset),
            kind,
            name: name.to_string(),
            used: false,
        }
    }

    /// Apply the variant's effect once. Returns whether anything happened.
    pub fn apply<R: Rng>(
        &mut self,
        ctx: &mut UseContext<'_>,
        hazards: &mut [Hazard],
        rng: &mut R,
    ) -> bool {
        if self.used {
            return false;
        }
        self.used = true;
        ctx.emit(EffectKind::Collected, &self.actor);

        match self.kind {
            PickupKind::ExtraLife => {
                ctx.player.lives += 1;
                log::debug!("{} collected, {} lives", self.name, ctx.player.lives);
            }
            PickupKind::AreaClear => {
                let column = rng.random_range(0..ctx.columns.max(1));
                let cleared = clear_lane(ctx, hazards, column);
                log::debug!("{} cleared {} hazards in lane {}", self.name, cleared, column);
            }
            PickupKind::RandomClear => match clear_random(ctx, hazards, rng) {
                Some(id) => log::debug!("{} cleared hazard #{}", self.name, id),
                None => log::debug!("{} found no hazard to clear", self.name),
            },
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        settings: Settings,
        player: Player,
        hazards: Vec<Hazard>,
        effects: Vec<Effect>,
    }

    impl Fixture {
        fn new() -> Self {
            let settings = Settings::default();
            let player = Player::new(&settings);
            Self {
                settings,
                player,
                hazards: Vec::new(),
                effects: Vec::new(),
            }
        }

        /// One hazard per lane, near the top of the screen
        fn with_hazard_per_lane(mut self) -> Self {
            for column in 0..self.settings.columns {
                let x = self.settings.lane_start() + column as f32 * self.settings.cell_size;
                self.hazards.push(Hazard::new(
                    column as u32 + 1,
                    column,
                    Vec2::new(x, 0.0),
                    self.settings.trap_size(),
                    AssetId::from("trap"),
                    &format!("trap {column}"),
                ));
            }
            self
        }

        /// Context plus the hazard list, borrowed side by side
        fn split(&mut self) -> (UseContext<'_>, &mut [Hazard]) {
            let ctx = UseContext {
                player: &mut self.player,
                effects: &mut self.effects,
                frames: &self.settings.effect_frames,
                columns: self.settings.columns,
                now_ms: 0.0,
            };
            (ctx, &mut self.hazards)
        }
    }

    fn pickup(kind: PickupKind) -> Pickup {
        Pickup::new(99, kind, Vec2::ZERO, 36.0, AssetId::from("item"), "item")
    }

    #[test]
    fn test_hazard_costs_one_life_once() {
        let mut fx = Fixture::new().with_hazard_per_lane();
        fx.player.lives = 2;

        let (mut ctx, hazards) = fx.split();
        assert!(hazards[0].trigger(&mut ctx));
        assert!(!hazards[0].trigger(&mut ctx));

        assert_eq!(fx.player.lives, 1);
        assert_eq!(fx.effects.len(), 1);
        assert_eq!(fx.effects[0].kind, EffectKind::Danger);
    }

    #[test]
    fn test_invalid_hazard_never_costs_a_life() {
        let mut fx = Fixture::new().with_hazard_per_lane();
        fx.hazards[0].invalid = true;

        let (mut ctx, hazards) = fx.split();
        assert!(!hazards[0].trigger(&mut ctx));

        assert_eq!(fx.player.lives, 1);
        assert!(!fx.hazards[0].used);
        assert!(fx.effects.is_empty());
    }

    #[test]
    fn test_extra_life_applies_once() {
        let mut fx = Fixture::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut item = pickup(PickupKind::ExtraLife);

        let (mut ctx, hazards) = fx.split();
        assert!(item.apply(&mut ctx, hazards, &mut rng));
        assert!(!item.apply(&mut ctx, hazards, &mut rng));

        assert!(item.used);
        assert_eq!(fx.player.lives, 2);
        assert_eq!(fx.effects.len(), 1);
        assert_eq!(fx.effects[0].kind, EffectKind::Collected);
    }

    #[test]
    fn test_clear_lane_only_touches_that_lane() {
        let mut fx = Fixture::new().with_hazard_per_lane();
        let (mut ctx, hazards) = fx.split();
        assert_eq!(clear_lane(&mut ctx, hazards, 1), 1);

        assert!(!fx.hazards[0].invalid);
        assert!(fx.hazards[1].invalid);
        assert!(!fx.hazards[2].invalid);
        assert_eq!(fx.effects.len(), 1);
        assert_eq!(fx.effects[0].kind, EffectKind::Neutralized);
    }

    #[test]
    fn test_area_clear_uses_drawn_lane() {
        let mut fx = Fixture::new().with_hazard_per_lane();
        let mut rng = Pcg32::seed_from_u64(2024);
        // Draw the lane the same way the pickup will
        let expected = rng.clone().random_range(0..fx.settings.columns);

        let mut item = pickup(PickupKind::AreaClear);
        let (mut ctx, hazards) = fx.split();
        assert!(item.apply(&mut ctx, hazards, &mut rng));

        for hazard in &fx.hazards {
            assert_eq!(hazard.invalid, hazard.column == expected);
            assert!(!hazard.used);
        }
        assert_eq!(fx.player.lives, 1);
    }

    #[test]
    fn test_random_clear_with_no_hazards() {
        let mut fx = Fixture::new();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut item = pickup(PickupKind::RandomClear);

        let (mut ctx, hazards) = fx.split();
        assert!(item.apply(&mut ctx, hazards, &mut rng));

        assert!(item.used);
        assert_eq!(fx.player.lives, 1);
        // Only the pickup's own smoke
        assert_eq!(fx.effects.len(), 1);
    }

    #[test]
    fn test_random_clear_skips_consumed_hazards() {
        let mut fx = Fixture::new().with_hazard_per_lane();
        fx.hazards[0].used = true;
        fx.hazards[2].invalid = true;
        let mut rng = Pcg32::seed_from_u64(4);

        let (mut ctx, hazards) = fx.split();
        assert_eq!(clear_random(&mut ctx, hazards, &mut rng), Some(2));

        assert!(fx.hazards[1].invalid);
        assert!(!fx.hazards[0].invalid);
    }
}
