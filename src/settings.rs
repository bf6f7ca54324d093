//! Session configuration
//!
//! Built once before a session starts and never mutated afterwards. Every
//! subsystem reads its geometry, tuning and asset names from here.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::actor::AssetId;
use crate::sim::effects::EffectKind;
use crate::sim::items::PickupKind;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// One entry of the level table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub min_score: u64,
    pub label: String,
}

impl LevelThreshold {
    pub fn new(min_score: u64, label: &str) -> Self {
        Self {
            min_score,
            label: label.to_string(),
        }
    }
}

/// A hazard look plus the name reported on game over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardAppearance {
    pub asset: AssetId,
    pub name: String,
}

impl HazardAppearance {
    pub fn new(asset: &str, name: &str) -> Self {
        Self {
            asset: AssetId::from(asset),
            name: name.to_string(),
        }
    }
}

/// Asset and display name for one pickup variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupAppearance {
    pub asset: AssetId,
    pub name: String,
}

impl PickupAppearance {
    pub fn new(asset: &str, name: &str) -> Self {
        Self {
            asset: AssetId::from(asset),
            name: name.to_string(),
        }
    }
}

/// Pickup appearances by variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupCatalog {
    pub extra_life: PickupAppearance,
    pub area_clear: PickupAppearance,
    pub random_clear: PickupAppearance,
}

impl Default for PickupCatalog {
    fn default() -> Self {
        Self {
            extra_life: PickupAppearance::new("item-extra-life", "Aegis"),
            area_clear: PickupAppearance::new("item-area-clear", "Aeon Disk"),
            random_clear: PickupAppearance::new("item-random-clear", "Linken's Sphere"),
        }
    }
}

impl PickupCatalog {
    pub fn get(&self, kind: PickupKind) -> &PickupAppearance {
        match kind {
            PickupKind::ExtraLife => &self.extra_life,
            PickupKind::AreaClear => &self.area_clear,
            PickupKind::RandomClear => &self.random_clear,
        }
    }
}

/// Smoke animation frames by effect kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectFrames {
    pub danger: Vec<AssetId>,
    pub collected: Vec<AssetId>,
    pub neutralized: Vec<AssetId>,
}

fn numbered_frames(prefix: &str, count: usize) -> Vec<AssetId> {
    (0..count)
        .map(|i| AssetId(format!("{prefix}-{i}")))
        .collect()
}

impl Default for EffectFrames {
    fn default() -> Self {
        Self {
            danger: numbered_frames("smoke-red", 4),
            collected: numbered_frames("smoke-white", 4),
            neutralized: numbered_frames("smoke-black", 4),
        }
    }
}

impl EffectFrames {
    pub fn for_kind(&self, kind: EffectKind) -> &[AssetId] {
        match kind {
            EffectKind::Danger => &self.danger,
            EffectKind::Collected => &self.collected,
            EffectKind::Neutralized => &self.neutralized,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Track geometry ===
    /// Number of lanes
    pub columns: usize,
    /// Visible rows per lane
    pub rows: usize,
    /// Rows kept above the viewport so a new row is ready before it shows
    pub hidden_rows: usize,
    /// Width and height of one track cell
    pub cell_size: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Entity sizes (fractions of a cell) ===
    pub player_size_ratio: f32,
    pub trap_size_ratio: f32,
    pub item_size_ratio: f32,

    // === Scoring ===
    pub score_per_row: u64,
    /// Score at which hazard spawn chance saturates
    pub max_trap_score: u64,
    /// Level table, strictly increasing thresholds starting at 0
    pub levels: Vec<LevelThreshold>,

    // === Player ===
    pub starting_lives: u32,
    pub start_column: usize,

    // === Decor ===
    pub cloud_count: usize,

    // === Assets ===
    pub player_asset: AssetId,
    pub cell_asset: AssetId,
    pub cloud_assets: Vec<AssetId>,
    pub hazards: Vec<HazardAppearance>,
    pub pickups: PickupCatalog,
    pub effect_frames: EffectFrames,

    /// Messages flashed on level change
    pub taunts: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 6,
            hidden_rows: 1,
            cell_size: 120.0,
            viewport_width: 480.0,
            viewport_height: 720.0,

            // Hazards and pickups stay under half a lane so there is always room to pass
            player_size_ratio: 0.5,
            trap_size_ratio: 0.3,
            item_size_ratio: 0.3,

            score_per_row: 30,
            max_trap_score: 8888,
            levels: vec![
                LevelThreshold::new(0, "Herald"),
                LevelThreshold::new(900, "Guardian"),
                LevelThreshold::new(1750, "Crusader"),
                LevelThreshold::new(2650, "Archon"),
                LevelThreshold::new(3350, "Legend"),
                LevelThreshold::new(4250, "Ancient"),
                LevelThreshold::new(5100, "Divine"),
                LevelThreshold::new(6000, "Immortal"),
            ],

            starting_lives: 1,
            start_column: 1,

            cloud_count: 5,

            player_asset: AssetId::from("player"),
            cell_asset: AssetId::from("ladder"),
            cloud_assets: vec![
                AssetId::from("cloud-0"),
                AssetId::from("cloud-1"),
                AssetId::from("cloud-2"),
            ],
            hazards: vec![
                HazardAppearance::new("trap-hook", "Meat Hook"),
                HazardAppearance::new("trap-arrow", "Sacred Arrow"),
                HazardAppearance::new("trap-chrono", "Chronosphere"),
                HazardAppearance::new("trap-black-hole", "Black Hole"),
                HazardAppearance::new("trap-duel", "Duel"),
            ],
            pickups: PickupCatalog::default(),
            effect_frames: EffectFrames::default(),

            taunts: vec![
                "You don't really think you understand this game better than me, do you?".into(),
                "If I'm not a pro at this, there are no pros anywhere.".into(),
                "Watch me turn this around!".into(),
                "Some people are so shallow I don't even know what to say.".into(),
                "Do you even want to win?".into(),
                "Think of something, chat!".into(),
                "Is that all you've got?".into(),
            ],
        }
    }
}

impl Settings {
    /// Default settings fitted to a viewport: the visible rows exactly fill its height
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let mut settings = Self::default();
        settings.viewport_width = width;
        settings.viewport_height = height;
        settings.cell_size = height / settings.rows as f32;
        settings
    }

    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        if self.columns == 0 {
            return invalid("columns must be at least 1".into());
        }
        if self.rows < 2 {
            return invalid(format!("rows must be at least 2, got {}", self.rows));
        }
        if self.hidden_rows == 0 {
            return invalid("hidden_rows must be at least 1".into());
        }
        if !(self.cell_size > 0.0 && self.cell_size.is_finite()) {
            return invalid(format!("cell_size must be positive, got {}", self.cell_size));
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return invalid("viewport dimensions must be positive".into());
        }
        if !(self.player_size_ratio > 0.0 && self.player_size_ratio <= 1.0) {
            return invalid(format!(
                "player_size_ratio must be in (0, 1], got {}",
                self.player_size_ratio
            ));
        }
        for (name, ratio) in [
            ("trap_size_ratio", self.trap_size_ratio),
            ("item_size_ratio", self.item_size_ratio),
        ] {
            if !(ratio > 0.0 && ratio < 0.5) {
                return invalid(format!("{name} must be in (0, 0.5), got {ratio}"));
            }
        }
        if self.max_trap_score == 0 {
            return invalid("max_trap_score must be positive".into());
        }
        match self.levels.first() {
            None => return invalid("levels must not be empty".into()),
            Some(first) if first.min_score != 0 => {
                return invalid("first level threshold must be 0".into());
            }
            Some(_) => {}
        }
        if self
            .levels
            .windows(2)
            .any(|pair| pair[0].min_score >= pair[1].min_score)
        {
            return invalid("level thresholds must be strictly increasing".into());
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives must be at least 1".into());
        }
        if self.start_column >= self.columns {
            return invalid(format!(
                "start_column {} out of range for {} columns",
                self.start_column, self.columns
            ));
        }
        if self.hazards.is_empty() {
            return invalid("hazard catalog must not be empty".into());
        }
        if self.cloud_count > 0 && self.cloud_assets.is_empty() {
            return invalid("cloud_assets must not be empty when clouds are enabled".into());
        }
        for kind in EffectKind::ALL {
            if self.effect_frames.for_kind(kind).is_empty() {
                return invalid(format!("effect frames for {kind:?} must not be empty"));
            }
        }
        Ok(())
    }

    /// Total rows per lane, hidden ones included
    pub fn total_rows(&self) -> usize {
        self.rows + self.hidden_rows
    }

    /// Track speed at score 0, in units per millisecond (one cell per second)
    pub fn base_speed(&self) -> f32 {
        self.cell_size / 1000.0
    }

    /// Left edge of lane 0 (lanes are centered horizontally)
    pub fn lane_start(&self) -> f32 {
        (self.viewport_width - self.columns as f32 * self.cell_size) / 2.0
    }

    pub fn player_size(&self) -> f32 {
        self.cell_size * self.player_size_ratio
    }

    pub fn trap_size(&self) -> f32 {
        self.cell_size * self.trap_size_ratio
    }

    pub fn item_size(&self) -> f32 {
        self.cell_size * self.item_size_ratio
    }

    /// Label of the greatest threshold not exceeding `score`
    pub fn level_for(&self, score: u64) -> &str {
        self.levels
            .iter()
            .rev()
            .find(|level| level.min_score <= score)
            .or(self.levels.first())
            .map(|level| level.label.as_str())
            .unwrap_or("")
    }
}
