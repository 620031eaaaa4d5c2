//! Fact derivation from concrete layouts

use crate::fact::{Fact, Query};
use crate::placement::Placement;
use crate::scenario::Scenario;
use locus_core::{LocusError, Result};
use locus_relation::{BinaryRelation, Boundary, Direction, RelationAlgebra, UnaryRelation};
use std::fmt;
use std::str::FromStr;

/// Which fact families to derive from a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveOptions {
    /// Room region of every object (`NR`, `CR`, ...)
    pub regions: bool,
    /// `INR` for every object
    pub inside: bool,
    /// `TPP` or `NTPP` for every object
    pub boundary: bool,
    /// Direction between each selected pair
    pub directions: bool,
    /// Three-way distance band between each selected pair
    pub distance3: bool,
    /// Two-way distance band between each selected pair
    pub distance2: bool,
    /// Number of object pairs to relate, picked nearest-neighbour first.
    /// `None` relates every pair.
    pub hops: Option<usize>,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            regions: true,
            inside: false,
            boundary: false,
            directions: true,
            distance3: false,
            distance2: false,
            hops: None,
        }
    }
}

/// The named fact mixes benchmark scenarios are generated in.
///
/// Every family states `INR` for each object. `Layout` adds room regions,
/// `O2` adds pairwise directions, and the `D2`/`D3` suffixes add distance
/// bands on top of the directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactFamily {
    Layout,
    LayoutTpp,
    O2,
    O2D2,
    O2D3,
    LayoutO2,
    LayoutO2D2,
    LayoutO2D3,
}

impl FactFamily {
    pub const ALL: [FactFamily; 8] = [
        FactFamily::Layout,
        FactFamily::LayoutTpp,
        FactFamily::O2,
        FactFamily::O2D2,
        FactFamily::O2D3,
        FactFamily::LayoutO2,
        FactFamily::LayoutO2D2,
        FactFamily::LayoutO2D3,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FactFamily::Layout => "layout",
            FactFamily::LayoutTpp => "layout_tpp",
            FactFamily::O2 => "o2",
            FactFamily::O2D2 => "o2_d2",
            FactFamily::O2D3 => "o2_d3",
            FactFamily::LayoutO2 => "layout_o2",
            FactFamily::LayoutO2D2 => "layout_o2_d2",
            FactFamily::LayoutO2D3 => "layout_o2_d3",
        }
    }

    /// Derivation options producing exactly this family
    pub fn options(&self) -> DeriveOptions {
        use FactFamily::*;
        DeriveOptions {
            regions: matches!(self, Layout | LayoutTpp | LayoutO2 | LayoutO2D2 | LayoutO2D3),
            inside: true,
            boundary: *self == LayoutTpp,
            directions: matches!(self, O2 | O2D2 | O2D3 | LayoutO2 | LayoutO2D2 | LayoutO2D3),
            distance3: matches!(self, O2D3 | LayoutO2D3),
            distance2: matches!(self, O2D2 | LayoutO2D2),
            hops: None,
        }
    }
}

impl FromStr for FactFamily {
    type Err = LocusError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                LocusError::ConfigError(format!(
                    "unknown fact family '{}'; expected one of {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

impl fmt::Display for FactFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick `hops` pairs out of `count` ordered objects.
///
/// Pairs are taken by increasing index offset: all neighbours `(i, i+1)`
/// first, then `(i, i+2)`, and so on. The offset `count - 1`, which would
/// pair the first object with the last, is never used.
pub fn select_pairs(count: usize, hops: usize) -> Result<Vec<(usize, usize)>> {
    let max = (count * count.saturating_sub(1) / 2).saturating_sub(1);
    if count < 3 || hops < count - 1 || hops > max {
        return Err(LocusError::ConfigError(format!(
            "cannot select {} pairs from {} objects",
            hops, count
        )));
    }

    Ok((1..count - 1)
        .flat_map(|k| (0..count - k).map(move |i| (i, i + k)))
        .take(hops)
        .collect())
}

fn unary_facts(
    placement: &Placement,
    algebra: &RelationAlgebra,
    options: &DeriveOptions,
) -> Result<Vec<Fact>> {
    let mut facts = Vec::new();
    for obj in placement.iter() {
        if options.regions {
            let region = algebra.region_of(obj.position);
            facts.push(Fact::unary(&obj.name, UnaryRelation::Region(region))?);
        }
        if options.inside {
            facts.push(Fact::unary(
                &obj.name,
                UnaryRelation::Boundary(Boundary::Inside),
            )?);
        }
        if options.boundary {
            let boundary = algebra.boundary_of(obj.position);
            facts.push(Fact::unary(&obj.name, UnaryRelation::Boundary(boundary))?);
        }
    }
    Ok(facts)
}

fn pair_facts(
    placement: &Placement,
    algebra: &RelationAlgebra,
    options: &DeriveOptions,
    pairs: &[(usize, usize)],
) -> Result<Vec<Fact>> {
    let objects: Vec<_> = placement.iter().collect();
    let mut facts = Vec::new();
    for &(i, j) in pairs {
        let (a, b) = (objects[i], objects[j]);
        let mut relations = Vec::new();
        if options.directions {
            relations.push(BinaryRelation::Direction(Direction::between(
                a.position, b.position,
            )));
        }
        if options.distance3 {
            relations.push(BinaryRelation::Distance3(
                algebra.distance3_of(a.position, b.position),
            ));
        }
        if options.distance2 {
            relations.push(BinaryRelation::Distance2(
                algebra.distance2_of(a.position, b.position),
            ));
        }
        for relation in relations {
            facts.push(Fact::binary(&a.name, relation, &b.name)?);
        }
    }
    Ok(facts)
}

/// Describe a layout as facts: unary facts per object, then binary facts per pair
pub fn derive_facts(
    placement: &Placement,
    algebra: &RelationAlgebra,
    options: &DeriveOptions,
) -> Result<Vec<Fact>> {
    placement.validate(algebra.room())?;

    let n = placement.len();
    let pairs = match options.hops {
        Some(hops) => select_pairs(n, hops)?,
        None => (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect(),
    };

    let mut facts = unary_facts(placement, algebra, options)?;
    facts.extend(pair_facts(placement, algebra, options, &pairs)?);
    Ok(facts)
}

/// Build a scenario asking how the first object relates to the last.
///
/// The pair being asked about is left out of the facts. Returns the scenario
/// and the direction that actually holds in the layout.
pub fn derive_scenario(
    name: &str,
    placement: &Placement,
    algebra: &RelationAlgebra,
    options: &DeriveOptions,
) -> Result<(Scenario, Direction)> {
    placement.validate(algebra.room())?;

    let objects: Vec<_> = placement.iter().collect();
    let n = objects.len();
    if n < 2 {
        return Err(LocusError::InvalidQuery(
            "a layout needs at least two objects to ask about".to_string(),
        ));
    }
    let (first, last) = (objects[0], objects[n - 1]);

    let pairs = match options.hops {
        Some(hops) => select_pairs(n, hops)?,
        None => (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&pair| pair != (0, n - 1))
            .collect(),
    };

    let mut facts = unary_facts(placement, algebra, options)?;
    facts.extend(pair_facts(placement, algebra, options, &pairs)?);

    let query = Query::new(&first.name, &last.name)?;
    let expected = Direction::between(first.position, last.position);
    Ok((Scenario::new(name, facts, Some(query)), expected))
}
