//! Game settings
//!
//! Board geometry and run parameters, loaded from a JSON file with defaults
//! for every missing field.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Board;

/// Errors raised when loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid_size must be positive, got {0}")]
    EmptyGrid(i32),
    #[error("cell_size must be a positive even number, got {0}")]
    BadCellSize(i32),
    #[error("board side {extent} exceeds the maximum of {max}")]
    BoardTooLarge { extent: i64, max: i32 },
    #[error("{what} spans {cells} cells but the grid only has {grid_size}")]
    EntityTooLarge {
        what: &'static str,
        cells: i32,
        grid_size: i32,
    },
    #[error("frame_rate must be non-zero")]
    ZeroFrameRate,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Cells per board axis
    pub grid_size: i32,
    /// Board units per cell (must be even so the vampire can patrol half cells)
    pub cell_size: i32,
    /// Player extent in cells
    pub player_cells: i32,
    /// Tent extent in cells
    pub tent_cells: i32,

    // === Run ===
    /// Fixed RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Rejection-sampling cap for tent/takeout placement
    pub placement_attempts: u32,

    // === Headless driver ===
    /// Frames per simulated second
    pub frame_rate: u32,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Autopilot moves per second
    pub autopilot_moves_per_sec: u32,
    /// Stop the run after this many simulated seconds
    pub max_run_secs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            cell_size: CELL_SIZE,
            player_cells: PLAYER_CELLS,
            tent_cells: TENT_CELLS,

            seed: None,
            placement_attempts: PLACEMENT_ATTEMPTS,

            frame_rate: 60,
            autopilot: true,
            autopilot_moves_per_sec: 8,
            max_run_secs: 300,
        }
    }
}

impl Settings {
    /// Default settings with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Board geometry described by these settings
    pub fn board(&self) -> Board {
        Board {
            grid_size: self.grid_size,
            cell_size: self.cell_size,
            player_size: self.player_cells * self.cell_size,
            tent_size: self.tent_cells * self.cell_size,
        }
    }

    /// Reject geometry the simulation cannot run on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_size <= 0 {
            return Err(SettingsError::EmptyGrid(self.grid_size));
        }
        if self.cell_size < 2 || self.cell_size % 2 != 0 {
            return Err(SettingsError::BadCellSize(self.cell_size));
        }
        let extent = self.grid_size as i64 * self.cell_size as i64;
        if extent > MAX_BOARD_EXTENT as i64 {
            return Err(SettingsError::BoardTooLarge {
                extent,
                max: MAX_BOARD_EXTENT,
            });
        }
        for (what, cells) in [("player", self.player_cells), ("tent", self.tent_cells)] {
            if cells <= 0 || cells > self.grid_size {
                return Err(SettingsError::EntityTooLarge {
                    what,
                    cells,
                    grid_size: self.grid_size,
                });
            }
        }
        if self.frame_rate == 0 {
            return Err(SettingsError::ZeroFrameRate);
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
