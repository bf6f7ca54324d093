//! Per-frame simulation step
//!
//! Advances the game from the previous tick's time to `now_ms`. Motion is
//! purely a function of elapsed wall-clock time, so the result does not
//! depend on frame rate.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{player_hits_hazard, player_hits_pickup};
use super::items::{PickupKind, UseContext};
use super::state::{GameEvent, GameOver, GamePhase, GameState};
use crate::consts::{ITEM_SPEED_FACTOR, MAX_TRAP_CHANCE, MIN_TRAP_CHANCE, PICKUP_CHANCE};
use crate::random_choice;

/// Abstract input intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Reserved; consumed but has no effect
    Up,
    Left,
    Right,
}

/// Pending presses, one flag per direction. Edge-triggered: each press is
/// consumed by exactly one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub fn press(&mut self, intent: Intent) {
        match intent {
            Intent::Up => self.up = true,
            Intent::Left => self.left = true,
            Intent::Right => self.right = true,
        }
    }

    /// Consume one pending press (up, then left, then right). Other presses stay pending.
    pub fn take(&mut self) -> Option<Intent> {
        if std::mem::take(&mut self.up) {
            Some(Intent::Up)
        } else if std::mem::take(&mut self.left) {
            Some(Intent::Left)
        } else if std::mem::take(&mut self.right) {
            Some(Intent::Right)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.left || self.right)
    }
}

/// Advance the game state to `now_ms`
pub fn tick(state: &mut GameState, input: &mut TickInput, now_ms: f64) {
    if state.phase != GamePhase::Running {
        return;
    }

    // First tick sets the baseline; time never runs backwards
    let last_ms = match state.start_ms {
        None => {
            state.start_ms = Some(now_ms);
            now_ms
        }
        Some(_) => state.now_ms,
    };
    let now_ms = now_ms.max(last_ms);
    state.last_ms = last_ms;
    state.now_ms = now_ms;

    apply_speeds(state);
    apply_input(state, input);
    move_actors(state, last_ms, now_ms);
    state.flash.expire(now_ms);
    recycle_rows(state);
    check_pickups(state);
    check_hazards(state);
    purge(state);
    check_game_over(state);
}

/// Score-scaled velocities for everything that scrolls
fn apply_speeds(state: &mut GameState) {
    let base = state.settings.base_speed();
    let speed = state.track_speed();
    let item_speed = speed * ITEM_SPEED_FACTOR;

    for cloud in &mut state.clouds {
        cloud.set_fall_speed(base);
    }
    state.track.set_speed(speed);
    for hazard in &mut state.hazards {
        hazard.actor.vel = Vec2::new(0.0, item_speed);
    }
    for pickup in &mut state.pickups {
        pickup.actor.vel = Vec2::new(0.0, item_speed);
    }
}

fn apply_input(state: &mut GameState, input: &mut TickInput) {
    let now_ms = state.now_ms;
    match input.take() {
        Some(Intent::Left) => state.player.shift(-1, now_ms),
        Some(Intent::Right) => state.player.shift(1, now_ms),
        Some(Intent::Up) | None => {}
    }
}

fn move_actors(state: &mut GameState, last_ms: f64, now_ms: f64) {
    let viewport = Vec2::new(state.settings.viewport_width, state.settings.viewport_height);
    for cloud in &mut state.clouds {
        cloud.advance(last_ms, now_ms, viewport);
    }
    state.track.advance(last_ms, now_ms);
    state.player.advance(now_ms);
    for hazard in &mut state.hazards {
        hazard.actor.advance(last_ms, now_ms);
    }
    for pickup in &mut state.pickups {
        pickup.actor.advance(last_ms, now_ms);
    }
    for effect in &mut state.effects {
        effect.advance(now_ms);
    }
}

/// Recycle rows while lane 0's bottom cell sits at or below the viewport edge.
/// Loops so a long frame catches up on several rows.
fn recycle_rows(state: &mut GameState) {
    let bottom_edge = state.settings.viewport_height;
    while state.track.needs_recycle(bottom_edge) {
        state.track.recycle();
        on_row_recycled(state);
    }
}

/// Scoring, level, taunt and spawn bookkeeping for one recycled row
fn on_row_recycled(state: &mut GameState) {
    let now_ms = state.now_ms;
    state.rows_recycled += 1;
    state.score += state.settings.score_per_row;
    state.events.push(GameEvent::RowRecycled { score: state.score });

    let level = state.settings.level_for(state.score);
    if level != state.level {
        state.level = level.to_string();
        let taunt = random_choice(&mut state.rng, &state.settings.taunts).cloned();
        if let Some(text) = &taunt {
            state.taunt.show(text.clone(), now_ms);
        }
        log::info!("Level up: {} at score {}", state.level, state.score);
        state.events.push(GameEvent::LevelUp {
            level: state.level.clone(),
            taunt,
        });
    }
    state.taunt.expire(now_ms);

    spawn_on_recycle(state);
}

/// Hazard spawn chance for a score, clamped to `[0.3, 1]`
pub fn trap_chance(score: u64, max_trap_score: u64) -> f32 {
    (score as f32 / max_trap_score as f32).clamp(MIN_TRAP_CHANCE, MAX_TRAP_CHANCE)
}

/// At most one spawn per recycled row: a hazard, or failing that maybe a pickup.
/// The pickup roll is a second, independent draw.
fn spawn_on_recycle(state: &mut GameState) {
    let columns = state.settings.columns;
    let chance = trap_chance(state.score, state.settings.max_trap_score);

    if state.rng.random::<f32>() < chance {
        let column = state.rng.random_range(0..columns);
        let appearance = state.rng.random_range(0..state.settings.hazards.len());
        state.spawn_hazard(column, appearance);
    } else if state.rng.random::<f32>() < PICKUP_CHANCE {
        let column = state.rng.random_range(0..columns);
        let kind = PickupKind::ALL[state.rng.random_range(0..PickupKind::ALL.len())];
        state.spawn_pickup(column, kind);
    }
}

/// First unused pickup touching the player fires
fn check_pickups(state: &mut GameState) {
    let GameState {
        settings,
        rng,
        player,
        hazards,
        pickups,
        effects,
        events,
        now_ms,
        ..
    } = state;

    let Some(pickup) = pickups
        .iter_mut()
        .find(|p| !p.used && player_hits_pickup(&player.actor, &p.actor))
    else {
        return;
    };

    let mut ctx = UseContext {
        player,
        effects,
        frames: &settings.effect_frames,
        columns: settings.columns,
        now_ms: *now_ms,
    };
    if pickup.apply(&mut ctx, hazards, rng) {
        events.push(GameEvent::PickupCollected {
            id: pickup.id,
            kind: pickup.kind,
        });
    }
}

/// First live hazard touching the player fires
fn check_hazards(state: &mut GameState) {
    let GameState {
        settings,
        player,
        hazards,
        effects,
        flash,
        last_hazard,
        events,
        now_ms,
        ..
    } = state;

    let Some(hazard) = hazards
        .iter_mut()
        .find(|h| h.is_live() && player_hits_hazard(&player.actor, &h.actor))
    else {
        return;
    };

    let mut ctx = UseContext {
        player,
        effects,
        frames: &settings.effect_frames,
        columns: settings.columns,
        now_ms: *now_ms,
    };
    if hazard.trigger(&mut ctx) {
        *last_hazard = Some(hazard.name.clone());
        flash.trigger(*now_ms);
        events.push(GameEvent::HazardHit {
            id: hazard.id,
            name: hazard.name.clone(),
            lives_left: ctx.player.lives,
        });
    }
}

/// Drop consumed or off-screen items and finished effects
fn purge(state: &mut GameState) {
    let bottom_edge = state.settings.viewport_height;
    state
        .hazards
        .retain(|h| h.is_live() && !h.actor.is_below(bottom_edge));
    state
        .pickups
        .retain(|p| !p.used && !p.actor.is_below(bottom_edge));
    state.effects.retain(|e| !e.finished);
}

fn check_game_over(state: &mut GameState) {
    if state.player.is_alive() {
        return;
    }
    let game_over = GameOver {
        final_score: state.score,
        final_level: state.level.clone(),
        cause_of_death: state.last_hazard.clone(),
    };
    log::info!(
        "Game over: score {} ({}), killed by {}",
        game_over.final_score,
        game_over.final_level,
        game_over.cause_of_death.as_deref().unwrap_or("nothing")
    );
    state.phase = GamePhase::Ended;
    state.events.push(GameEvent::GameOver(game_over.clone()));
    state.game_over = Some(game_over);
}
