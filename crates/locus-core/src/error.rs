//! Error types for Locus

use thiserror::Error;

/// The main error type for Locus operations
#[derive(Debug, Error)]
pub enum LocusError {
    #[error("Unknown relation symbol: {0}")]
    UnknownRelation(String),

    #[error("Malformed fact: {0}")]
    MalformedFact(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid room size: {width}x{height} (both dimensions must be positive)")]
    InvalidRoomSize { width: u32, height: u32 },

    #[error("Point ({x}, {y}) lies outside a {width}x{height} room")]
    PointOutOfRoom {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Scenario load error: {0}")]
    ScenarioLoadError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for Locus operations
pub type Result<T> = std::result::Result<T, LocusError>;

impl From<toml::de::Error> for LocusError {
    fn from(err: toml::de::Error) -> Self {
        LocusError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for LocusError {
    fn from(err: toml::ser::Error) -> Self {
        LocusError::TomlSerError(err.to_string())
    }
}

impl From<serde_json::Error> for LocusError {
    fn from(err: serde_json::Error) -> Self {
        LocusError::JsonError(err.to_string())
    }
}
