//! Constraint problem construction

use crate::config::RoomQueryMode;
use crate::fact::{Fact, Query, Target};
use locus_core::GridPoint;
use locus_relation::{BinaryRelation, Direction, RelationAlgebra, UnaryRelation};

/// A binary constraint between two variable indices
#[derive(Debug, Clone, Copy)]
struct BinaryCheck {
    subject: usize,
    object: usize,
    relation: BinaryRelation,
}

/// Variables over the room grid plus the constraints between them.
///
/// Unary constraints are applied to a variable's domain as soon as they are
/// added. Binary constraints are filed under whichever of their two
/// variables comes later in insertion order, so the search checks each one
/// exactly when its last variable is bound.
#[derive(Debug, Clone)]
pub struct Problem {
    algebra: RelationAlgebra,
    full_domain: Vec<GridPoint>,
    names: Vec<String>,
    domains: Vec<Vec<GridPoint>>,
    checks: Vec<Vec<BinaryCheck>>,
}

impl Problem {
    pub fn new(algebra: RelationAlgebra) -> Self {
        Self {
            full_domain: algebra.room().domain(),
            algebra,
            names: Vec::new(),
            domains: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Build a problem with one variable per object and one constraint per fact
    pub fn from_facts(algebra: RelationAlgebra, facts: &[Fact]) -> Self {
        let mut problem = Self::new(algebra);
        for fact in facts {
            problem.add_fact(fact);
        }
        problem
    }

    /// Index of the named variable, adding it with the full grid as domain if new
    pub fn variable(&mut self, name: &str) -> usize {
        if let Some(index) = self.index_of(name) {
            return index;
        }
        self.names.push(name.to_string());
        self.domains.push(self.full_domain.clone());
        self.checks.push(Vec::new());
        self.names.len() - 1
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn add_fact(&mut self, fact: &Fact) {
        let subject = self.variable(fact.subject());
        let relation = fact.relation();
        match (fact.object(), relation.as_unary(), relation.as_binary()) {
            (Target::Room, Some(rel), _) => self.add_unary(subject, rel),
            (Target::Object(name), _, Some(rel)) => {
                let object = self.variable(name);
                self.add_binary(subject, rel, object);
            }
            // Fact::new rejects a relation whose arity does not fit the object slot
            (object, _, _) => unreachable!(
                "fact {} {} {} has the wrong arity",
                fact.subject(),
                relation,
                object
            ),
        }
    }

    pub fn add_unary(&mut self, var: usize, relation: UnaryRelation) {
        let algebra = self.algebra;
        self.domains[var].retain(|p| algebra.unary(relation, *p));
    }

    pub fn add_binary(&mut self, subject: usize, relation: BinaryRelation, object: usize) {
        let later = subject.max(object);
        self.checks[later].push(BinaryCheck {
            subject,
            object,
            relation,
        });
    }

    /// Constrain the query pair to `label`.
    ///
    /// Returns `false` when nothing was added, which only happens for a
    /// room-targeted query under [`RoomQueryMode::Ignore`].
    pub fn constrain_query(&mut self, query: &Query, label: Direction, mode: RoomQueryMode) -> bool {
        for name in query.objects() {
            self.variable(name);
        }
        if let Some(fact) = query.with_label(label) {
            self.add_fact(&fact);
            return true;
        }

        match mode {
            RoomQueryMode::Region => {
                let subject = self.variable(query.subject());
                self.add_unary(subject, UnaryRelation::Region(label.room_region()));
                true
            }
            RoomQueryMode::Ignore => false,
        }
    }

    pub fn algebra(&self) -> &RelationAlgebra {
        &self.algebra
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn domain(&self, var: usize) -> &[GridPoint] {
        &self.domains[var]
    }

    /// Whether the constraints completed by binding `var` hold.
    ///
    /// `assignment` must bind every variable up to and including `var`.
    pub fn consistent(&self, var: usize, assignment: &[GridPoint]) -> bool {
        self.checks[var].iter().all(|c| {
            self.algebra
                .binary(c.relation, assignment[c.subject], assignment[c.object])
        })
    }
}
