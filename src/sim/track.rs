//! Scrolling ladder track
//!
//! Each lane is a fixed ring of cells. `head` marks the top (hidden) cell;
//! recycling moves the bottom cell above the top one and rotates `head`, so
//! no cell is ever allocated or shifted after construction.

use glam::Vec2;

use super::actor::{Actor, AssetId};
use crate::settings::Settings;

/// One lane: `cells.len()` cells spaced exactly one cell apart vertically
#[derive(Debug, Clone)]
pub struct Lane {
    cells: Vec<Actor>,
    head: usize,
}

impl Lane {
    fn new(x: f32, top_y: f32, rows: usize, cell_size: f32, visual: &AssetId) -> Self {
        let cells = (0..rows)
            .map(|row| {
                Actor::square(
                    Vec2::new(x, top_y + row as f32 * cell_size),
                    cell_size,
                    visual.clone(),
                )
            })
            .collect();
        Self { cells, head: 0 }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `row`, counted from the top (row 0 is the hidden one)
    pub fn cell(&self, row: usize) -> &Actor {
        &self.cells[(self.head + row) % self.cells.len()]
    }

    pub fn top(&self) -> &Actor {
        self.cell(0)
    }

    pub fn bottom(&self) -> &Actor {
        self.cell(self.cells.len() - 1)
    }

    /// Cells from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &Actor> + '_ {
        (0..self.cells.len()).map(move |row| self.cell(row))
    }

    /// Move the bottom cell directly above the top one
    fn recycle(&mut self, cell_size: f32) {
        let bottom = (self.head + self.cells.len() - 1) % self.cells.len();
        let top_y = self.cells[self.head].pos.y;
        self.cells[bottom].pos.y = top_y - cell_size;
        self.head = bottom;
    }
}

/// All lanes, scrolled and recycled in lockstep
#[derive(Debug, Clone)]
pub struct Track {
    lanes: Vec<Lane>,
    cell_size: f32,
    lane_start: f32,
}

impl Track {
    pub fn new(settings: &Settings) -> Self {
        let cell_size = settings.cell_size;
        let lane_start = settings.lane_start();
        let top_y = -cell_size * settings.hidden_rows as f32;
        let lanes = (0..settings.columns)
            .map(|column| {
                Lane::new(
                    lane_start + column as f32 * cell_size,
                    top_y,
                    settings.total_rows(),
                    cell_size,
                    &settings.cell_asset,
                )
            })
            .collect();
        Self {
            lanes,
            cell_size,
            lane_start,
        }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Left edge of a lane
    pub fn lane_x(&self, column: usize) -> f32 {
        self.lane_start + column as f32 * self.cell_size
    }

    /// Top cell of a lane, where new hazards and pickups appear
    pub fn top_of(&self, column: usize) -> &Actor {
        self.lanes[column].top()
    }

    /// Assign the scroll speed to every cell
    pub fn set_speed(&mut self, speed: f32) {
        for cell in self.lanes.iter_mut().flat_map(|lane| lane.cells.iter_mut()) {
            cell.vel = Vec2::new(0.0, speed);
        }
    }

    pub fn advance(&mut self, last_ms: f64, now_ms: f64) {
        for cell in self.lanes.iter_mut().flat_map(|lane| lane.cells.iter_mut()) {
            cell.advance(last_ms, now_ms);
        }
    }

    /// Lane 0's bottom cell has scrolled to or past `bottom_edge`
    pub fn needs_recycle(&self, bottom_edge: f32) -> bool {
        self.lanes
            .first()
            .is_some_and(|lane| lane.bottom().pos.y >= bottom_edge)
    }

    /// Recycle one row across all lanes simultaneously
    pub fn recycle(&mut self) {
        let cell_size = self.cell_size;
        for lane in &mut self.lanes {
            lane.recycle(cell_size);
        }
    }

    /// All cells, lane by lane, top to bottom
    pub fn cells(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.lanes.iter().flat_map(|lane| lane.iter())
    }
}
