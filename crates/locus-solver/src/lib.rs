//! Locus Solver - Spatial feasibility by constraint search
//!
//! Given facts about objects in a room (regions, boundary contact,
//! directions, distance bands), this crate decides which directions between
//! a query pair are geometrically possible. Objects are variables over the
//! room grid, facts are constraints, and a deterministic backtracking search
//! answers each candidate.

mod config;
mod derive;
mod fact;
mod placement;
mod problem;
mod report;
mod scenario;
mod search;
mod solver;

pub use config::{RoomQueryMode, SolverConfig};
pub use derive::{derive_facts, derive_scenario, select_pairs, DeriveOptions, FactFamily};
pub use fact::{Fact, Query, Target};
pub use placement::{PlacedObject, Placement};
pub use problem::Problem;
pub use report::{Answer, CheckReport, LabelOutcome, LabelReport};
pub use scenario::{Scenario, ScenarioFile, ScenarioRegistry};
pub use search::{Search, SearchOutcome};
pub use solver::SpatialSolver;
