//! Solver configuration

use locus_core::{LocusError, Result, RoomSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How a query whose target is the room itself is constrained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomQueryMode {
    /// The candidate direction becomes the matching room region (`N` -> `NR`, `O` -> `CR`)
    #[default]
    Region,
    /// No query constraint is added; the answer depends on the facts alone
    Ignore,
}

/// Tunable parameters of the solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Room dimensions, which fix the grid of candidate positions
    pub room: RoomSize,
    /// Maximum value trials per search; `0` means unbounded
    pub step_budget: u64,
    /// Run the nine label searches of an enumeration on separate threads
    pub parallel: bool,
    pub room_query: RoomQueryMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            room: RoomSize::default(),
            step_budget: 50_000_000,
            parallel: false,
            room_query: RoomQueryMode::default(),
        }
    }
}

impl SolverConfig {
    /// Load a configuration from a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from a TOML string; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| LocusError::ConfigError(format!("Failed to parse solver config: {}", e)))
    }

    pub fn with_room(mut self, room: RoomSize) -> Self {
        self.room = room;
        self
    }

    pub fn with_step_budget(mut self, steps: u64) -> Self {
        self.step_budget = steps;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_room_query(mut self, mode: RoomQueryMode) -> Self {
        self.room_query = mode;
        self
    }

    /// The step budget, or `None` when unbounded
    pub fn budget(&self) -> Option<u64> {
        (self.step_budget > 0).then_some(self.step_budget)
    }
}
