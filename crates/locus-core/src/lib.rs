//! Locus Core - Foundational types for the Locus engine
//!
//! This crate provides the core types that all other Locus crates depend on:
//! - `GridPoint` - A lattice position inside a room
//! - `RoomSize` - Room dimensions and the candidate-position domain
//! - Error types and Result alias

mod error;
mod types;

pub use error::{LocusError, Result};
pub use types::{GridPoint, RoomSize, ROOM};
