//! Locus Relation - Qualitative spatial relation algebra
//!
//! This crate defines the closed relation vocabulary used to describe object
//! layouts (directions, room regions, boundary contact, distance bands) and
//! evaluates each symbol as a pure predicate over grid points for a given
//! room size.

mod algebra;
mod symbol;

pub use algebra::RelationAlgebra;
pub use symbol::{
    abbreviate, BinaryRelation, Boundary, Direction, Distance2, Distance3, Relation, RoomRegion,
    UnaryRelation,
};
