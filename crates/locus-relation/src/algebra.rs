//! Relation predicates parameterised by room size

use crate::symbol::{BinaryRelation, Boundary, Distance2, Distance3, RoomRegion, UnaryRelation};
use locus_core::{GridPoint, RoomSize};

/// Position of a coordinate along one room axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Third {
    Low,
    Middle,
    High,
}

/// `v < len/3`, `len/3 <= v < 2len/3`, `v >= 2len/3`, evaluated exactly in integers
fn third(v: u32, len: u32) -> Third {
    let (v3, len) = (3 * v as u64, len as u64);
    if v3 < len {
        Third::Low
    } else if v3 < 2 * len {
        Third::Middle
    } else {
        Third::High
    }
}

/// Evaluates relation symbols over grid points of one room.
///
/// Holds no state beyond the room size and the distance thresholds derived
/// from it, so a fresh instance is cheap to build per solve call.
#[derive(Debug, Clone, Copy)]
pub struct RelationAlgebra {
    room: RoomSize,
    close3: f64,
    far3: f64,
    close2: f64,
}

impl RelationAlgebra {
    pub fn new(room: RoomSize) -> Self {
        let diagonal = room.diagonal();
        Self {
            room,
            close3: diagonal / 3.0,
            far3: diagonal * 2.0 / 3.0,
            close2: (room.width() - 1) as f64 / 2.0,
        }
    }

    pub fn room(&self) -> RoomSize {
        self.room
    }

    /// Evaluate a unary relation against a single point
    pub fn unary(&self, rel: UnaryRelation, p: GridPoint) -> bool {
        match rel {
            UnaryRelation::Region(region) => self.in_region(region, p),
            UnaryRelation::Boundary(boundary) => self.boundary_holds(boundary, p),
        }
    }

    /// Evaluate a binary relation with `subject` in the first slot
    pub fn binary(&self, rel: BinaryRelation, subject: GridPoint, object: GridPoint) -> bool {
        match rel {
            BinaryRelation::Direction(d) => d.holds(subject, object),
            BinaryRelation::Distance3(band) => self.distance3_of(subject, object) == band,
            BinaryRelation::Distance2(band) => self.distance2_of(subject, object) == band,
        }
    }

    pub fn in_region(&self, region: RoomRegion, p: GridPoint) -> bool {
        self.region_of(p) == region
    }

    fn boundary_holds(&self, boundary: Boundary, p: GridPoint) -> bool {
        match boundary {
            Boundary::Inside => self.room.contains(p),
            Boundary::Touching => self.touches_boundary(p),
            Boundary::Interior => self.room.contains(p) && !self.touches_boundary(p),
        }
    }

    fn touches_boundary(&self, p: GridPoint) -> bool {
        let max_x = self.room.width() - 1;
        let max_y = self.room.height() - 1;
        p.x == 0 || p.x == max_x || p.y == 0 || p.y == max_y
    }

    /// The room sector containing a point
    pub fn region_of(&self, p: GridPoint) -> RoomRegion {
        let tx = third(p.x, self.room.width());
        let ty = third(p.y, self.room.height());
        match (tx, ty) {
            (Third::Middle, Third::High) => RoomRegion::North,
            (Third::Middle, Third::Low) => RoomRegion::South,
            (Third::High, Third::Middle) => RoomRegion::East,
            (Third::Low, Third::Middle) => RoomRegion::West,
            (Third::High, Third::High) => RoomRegion::NorthEast,
            (Third::Low, Third::High) => RoomRegion::NorthWest,
            (Third::High, Third::Low) => RoomRegion::SouthEast,
            (Third::Low, Third::Low) => RoomRegion::SouthWest,
            (Third::Middle, Third::Middle) => RoomRegion::Center,
        }
    }

    /// `Touching` or `Interior`, whichever applies
    pub fn boundary_of(&self, p: GridPoint) -> Boundary {
        if self.touches_boundary(p) {
            Boundary::Touching
        } else {
            Boundary::Interior
        }
    }

    pub fn distance3_of(&self, a: GridPoint, b: GridPoint) -> Distance3 {
        let d = a.distance(&b);
        if d <= self.close3 {
            Distance3::Close
        } else if d <= self.far3 {
            Distance3::Medium
        } else {
            Distance3::Far
        }
    }

    pub fn distance2_of(&self, a: GridPoint, b: GridPoint) -> Distance2 {
        if a.distance(&b) <= self.close2 {
            Distance2::Close
        } else {
            Distance2::Far
        }
    }
}
