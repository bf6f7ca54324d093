//! The player figure
//!
//! Holds a discrete lane plus an eased transition between lane positions.
//! Lane changes are straight-line moves in position space over a fixed
//! duration; a new lane change restarts from wherever the figure currently is.

use glam::Vec2;

use super::actor::Actor;
use crate::consts::TRANSITION_MS;
use crate::lerp_vec;
use crate::settings::Settings;

/// An in-flight move between lane positions
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub start: Vec2,
    pub destination: Vec2,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl Transition {
    /// Interpolated position at `now_ms`, or `None` once the move has finished
    pub fn sample(&self, now_ms: f64) -> Option<Vec2> {
        let elapsed = now_ms - self.start_ms;
        if elapsed >= self.duration_ms {
            return None;
        }
        let t = (elapsed / self.duration_ms).max(0.0) as f32;
        Some(lerp_vec(t, self.start, self.destination))
    }
}

/// The single controlled actor
#[derive(Debug, Clone)]
pub struct Player {
    pub actor: Actor,
    /// Lane index in `[0, columns)`
    pub column: usize,
    pub lives: u32,
    pub transition: Option<Transition>,
    columns: usize,
    lane_start: f32,
    cell_size: f32,
    ground_y: f32,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        let size = settings.player_size();
        let mut player = Self {
            actor: Actor::square(Vec2::ZERO, size, settings.player_asset.clone()),
            column: settings.start_column.min(settings.columns.saturating_sub(1)),
            lives: settings.starting_lives,
            transition: None,
            columns: settings.columns,
            lane_start: settings.lane_start(),
            cell_size: settings.cell_size,
            ground_y: settings.viewport_height - size,
        };
        player.actor.pos = player.position_for_column(player.column);
        player
    }

    /// Resting position for a lane: centered horizontally, standing on the bottom edge
    pub fn position_for_column(&self, column: usize) -> Vec2 {
        Vec2::new(
            self.lane_start
                + column as f32 * self.cell_size
                + (self.cell_size - self.actor.size.x) / 2.0,
            self.ground_y,
        )
    }

    /// Begin moving to `column` (clamped to the lane range). Overrides any move in flight.
    pub fn set_column(&mut self, column: isize, start_ms: f64) {
        let column = column.clamp(0, (self.columns as isize - 1).max(0)) as usize;
        self.column = column;
        self.transition = Some(Transition {
            start: self.actor.pos,
            destination: self.position_for_column(column),
            start_ms,
            duration_ms: TRANSITION_MS,
        });
    }

    /// Shift by `delta` lanes from the current one
    pub fn shift(&mut self, delta: isize, start_ms: f64) {
        self.set_column(self.column as isize + delta, start_ms);
    }

    /// Update the position from the transition; snaps and clears it when done
    pub fn advance(&mut self, now_ms: f64) {
        let Some(transition) = &self.transition else {
            return;
        };
        match transition.sample(now_ms) {
            Some(pos) => self.actor.pos = pos,
            None => {
                self.actor.pos = transition.destination;
                self.transition = None;
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn radius(&self) -> f32 {
        self.actor.size.x / 2.0
    }
}
