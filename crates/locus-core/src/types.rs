//! Spatial and common types

use crate::error::{LocusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Object-slot token marking a fact as a constraint against the room itself
pub const ROOM: &str = "room";

/// A position on the room lattice.
///
/// The origin is the room's south-west corner; `x` grows east and `y` grows north.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct GridPoint {
    pub x: u32,
    pub y: u32,
}

impl GridPoint {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[u32; 2]> for GridPoint {
    fn from(arr: [u32; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }
}

impl From<GridPoint> for [u32; 2] {
    fn from(p: GridPoint) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Room dimensions, which also fix the grid of candidate positions
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoomSize")]
pub struct RoomSize {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawRoomSize {
    width: u32,
    height: u32,
}

impl TryFrom<RawRoomSize> for RoomSize {
    type Error = LocusError;

    fn try_from(raw: RawRoomSize) -> Result<Self> {
        Self::new(raw.width, raw.height)
    }
}

impl Default for RoomSize {
    fn default() -> Self {
        Self {
            width: 12,
            height: 12,
        }
    }
}

impl RoomSize {
    /// Create a room size; both dimensions must be positive
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LocusError::InvalidRoomSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of candidate positions
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Length of the diagonal between the first and last lattice points
    pub fn diagonal(&self) -> f64 {
        let w = (self.width - 1) as f64;
        let h = (self.height - 1) as f64;
        (w * w + h * h).sqrt()
    }

    pub fn contains(&self, p: GridPoint) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// Reject points that fall outside the room
    pub fn check(&self, p: GridPoint) -> Result<GridPoint> {
        if self.contains(p) {
            Ok(p)
        } else {
            Err(LocusError::PointOutOfRoom {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Every lattice point in the room, x-major (all `y` for `x = 0` first)
    pub fn domain(&self) -> Vec<GridPoint> {
        let mut points = Vec::with_capacity(self.cell_count());
        for x in 0..self.width {
            for y in 0..self.height {
                points.push(GridPoint::new(x, y));
            }
        }
        points
    }
}

impl fmt::Display for RoomSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
