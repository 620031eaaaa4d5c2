//! Feasibility queries over fact sets

use crate::config::{RoomQueryMode, SolverConfig};
use crate::fact::{Fact, Query, Target};
use crate::placement::Placement;
use crate::problem::Problem;
use crate::report::{Answer, CheckReport, LabelOutcome, LabelReport};
use crate::scenario::Scenario;
use crate::search::{Search, SearchOutcome};
use locus_core::Result;
use locus_relation::{Direction, RelationAlgebra};
use std::time::Instant;

/// Decides which directions between a query pair a fact set admits.
///
/// Every call builds its problems from scratch; nothing is shared between
/// calls or between the searches of one enumeration.
#[derive(Debug, Clone, Default)]
pub struct SpatialSolver {
    config: SolverConfig,
}

impl SpatialSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn build(&self, facts: &[Fact], constraint: Option<(&Query, Direction)>) -> Problem {
        let algebra = RelationAlgebra::new(self.config.room);
        let mut problem = Problem::from_facts(algebra, facts);
        if let Some((query, label)) = constraint {
            if !problem.constrain_query(query, label, self.config.room_query) {
                log::debug!("No constraint added for {} {}", query, label);
            }
        }
        problem
    }

    /// Whether labels for `query` leave the problem unconstrained
    fn ignores_query(&self, query: &Query) -> bool {
        *query.target() == Target::Room && self.config.room_query == RoomQueryMode::Ignore
    }

    fn warn_if_ignored(&self, query: &Query) {
        if self.ignores_query(query) {
            log::warn!(
                "Query {} targets the room; every label is decided by the facts alone",
                query
            );
        }
    }

    fn search_label(&self, facts: &[Fact], query: &Query, label: Direction) -> LabelOutcome {
        let problem = self.build(facts, Some((query, label)));
        let mut search = Search::new(&problem, self.config.budget());
        let answer = Answer::from_outcome(&search.run());

        if answer == Answer::Undecided {
            log::warn!(
                "Search for {} {} {} exceeded the budget of {} steps",
                query.subject(),
                label,
                query.target(),
                self.config.step_budget
            );
        } else {
            log::debug!(
                "{} {} {}: {} after {} steps",
                query.subject(),
                label,
                query.target(),
                answer,
                search.steps()
            );
        }

        LabelOutcome {
            label,
            answer,
            steps: search.steps(),
        }
    }

    /// Find every direction label for which the facts plus `query label` are satisfiable.
    ///
    /// Labels are tried in [`Direction::ALL`] order, each against a freshly
    /// built problem, and reported in that order whether or not the searches
    /// ran in parallel.
    pub fn enumerate_feasible_labels(&self, facts: &[Fact], query: &Query) -> LabelReport {
        let start = Instant::now();
        self.warn_if_ignored(query);

        let outcomes: Vec<LabelOutcome> = if self.config.parallel {
            std::thread::scope(|s| {
                let handles: Vec<_> = Direction::ALL
                    .iter()
                    .map(|&label| s.spawn(move || self.search_label(facts, query, label)))
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                    .collect()
            })
        } else {
            Direction::ALL
                .iter()
                .map(|&label| self.search_label(facts, query, label))
                .collect()
        };

        let report = LabelReport::new(query.clone(), outcomes, start.elapsed());
        log::info!("{}", report.summary());
        report
    }

    /// Check one candidate label given as a phrase such as `north-east`
    pub fn check_single_label(
        &self,
        facts: &[Fact],
        query: &Query,
        candidate: &str,
    ) -> Result<CheckReport> {
        let label = Direction::from_phrase(candidate)?;
        Ok(self.check_direction(facts, query, label))
    }

    /// Check one candidate label
    pub fn check_direction(&self, facts: &[Fact], query: &Query, label: Direction) -> CheckReport {
        self.solve(facts, Some((query, label)))
    }

    /// Find the first placement satisfying the facts, optionally with the query pair fixed to a label
    pub fn find_witness(
        &self,
        facts: &[Fact],
        constraint: Option<(&Query, Direction)>,
    ) -> CheckReport {
        self.solve(facts, constraint)
    }

    fn solve(&self, facts: &[Fact], constraint: Option<(&Query, Direction)>) -> CheckReport {
        if let Some((query, _)) = constraint {
            self.warn_if_ignored(query);
        }
        let problem = self.build(facts, constraint);

        let start = Instant::now();
        let mut search = Search::new(&problem, self.config.budget());
        let outcome = search.run();
        let elapsed = start.elapsed();

        let placement = match &outcome {
            SearchOutcome::Found(values) => Some(
                problem
                    .names()
                    .iter()
                    .cloned()
                    .zip(values.iter().copied())
                    .collect::<Placement>(),
            ),
            _ => None,
        };

        let report = CheckReport {
            query: constraint.map(|(q, _)| q.clone()),
            label: constraint.map(|(_, label)| label),
            answer: Answer::from_outcome(&outcome),
            steps: search.steps(),
            placement,
            elapsed,
        };
        log::debug!("{}", report.summary());
        report
    }

    /// Enumerate the labels of a scenario's query
    pub fn enumerate_scenario(&self, scenario: &Scenario) -> Result<LabelReport> {
        let query = scenario.require_query()?;
        Ok(self.enumerate_feasible_labels(&scenario.facts, query))
    }

    /// Check one label phrase against a scenario's query
    pub fn check_scenario(&self, scenario: &Scenario, candidate: &str) -> Result<CheckReport> {
        let query = scenario.require_query()?;
        self.check_single_label(&scenario.facts, query, candidate)
    }
}
