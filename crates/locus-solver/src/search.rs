//! Backtracking search

use crate::problem::Problem;
use locus_core::GridPoint;

/// Result of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// First complete assignment found, indexed like the problem's variables
    Found(Vec<GridPoint>),
    /// Every assignment was tried and none satisfies the constraints
    Exhausted,
    /// The step budget ran out before the search could decide
    BudgetExceeded,
}

/// Depth-first search over a [`Problem`].
///
/// Variables are bound in insertion order and values tried in domain order,
/// so the first solution found is the same on every run. Each value trial
/// counts as one step.
pub struct Search<'a> {
    problem: &'a Problem,
    budget: Option<u64>,
    steps: u64,
}

impl<'a> Search<'a> {
    pub fn new(problem: &'a Problem, budget: Option<u64>) -> Self {
        Self {
            problem,
            budget,
            steps: 0,
        }
    }

    /// Value trials made so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn run(&mut self) -> SearchOutcome {
        let problem = self.problem;
        let n = problem.len();
        if n == 0 {
            return SearchOutcome::Found(Vec::new());
        }
        if (0..n).any(|var| problem.domain(var).is_empty()) {
            return SearchOutcome::Exhausted;
        }

        let mut assignment: Vec<GridPoint> = Vec::with_capacity(n);
        let mut cursor = vec![0usize; n];
        let mut depth = 0;

        loop {
            let domain = problem.domain(depth);
            let mut bound = false;

            while cursor[depth] < domain.len() {
                let value = domain[cursor[depth]];
                cursor[depth] += 1;

                self.steps += 1;
                if self.budget.is_some_and(|limit| self.steps > limit) {
                    return SearchOutcome::BudgetExceeded;
                }

                assignment.truncate(depth);
                assignment.push(value);
                if problem.consistent(depth, &assignment) {
                    bound = true;
                    break;
                }
            }

            if bound {
                depth += 1;
                if depth == n {
                    return SearchOutcome::Found(assignment);
                }
                cursor[depth] = 0;
            } else if depth == 0 {
                return SearchOutcome::Exhausted;
            } else {
                depth -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fact::Fact;
    use locus_core::RoomSize;
    use locus_relation::RelationAlgebra;

    fn problem(room: (u32, u32), facts: &[(&str, &str, &str)]) -> Problem {
        let algebra = RelationAlgebra::new(RoomSize::new(room.0, room.1).unwrap());
        Problem::from_facts(algebra, &Fact::parse_all(facts).unwrap())
    }

    #[test]
    fn test_empty_problem_is_trivially_solved() {
        let p = problem((3, 3), &[]);
        assert_eq!(Search::new(&p, None).run(), SearchOutcome::Found(vec![]));
    }

    #[test]
    fn test_first_solution_is_deterministic() {
        let p = problem((4, 4), &[("lamp", "N", "chair")]);
        let first = Search::new(&p, None).run();
        // lamp takes the first value (0,0) and fails for every chair, then (0,1) pairs with (0,0)
        assert_eq!(
            first,
            SearchOutcome::Found(vec![GridPoint::new(0, 1), GridPoint::new(0, 0)])
        );
        assert_eq!(Search::new(&p, None).run(), first);
    }

    #[test]
    fn test_contradiction_is_exhausted() {
        let p = problem((3, 3), &[("a", "N", "b"), ("b", "N", "a")]);
        let mut search = Search::new(&p, None);
        assert_eq!(search.run(), SearchOutcome::Exhausted);
        // Every pair of points was tried once
        assert_eq!(search.steps(), 9 + 9 * 9);
    }

    #[test]
    fn test_empty_domain_short_circuits() {
        // A 1x1 room has no interior point
        let p = problem((1, 1), &[("a", "NTPP", "room")]);
        let mut search = Search::new(&p, None);
        assert_eq!(search.run(), SearchOutcome::Exhausted);
        assert_eq!(search.steps(), 0);
    }

    #[test]
    fn test_budget_exceeded_is_distinct() {
        let p = problem((3, 3), &[("a", "N", "b"), ("b", "N", "a")]);
        let mut search = Search::new(&p, Some(10));
        assert_eq!(search.run(), SearchOutcome::BudgetExceeded);
        assert_eq!(search.steps(), 11);
    }

    #[test]
    fn test_chain_of_three() {
        let p = problem(
            (5, 5),
            &[("a", "N", "b"), ("b", "N", "c"), ("a", "NWR", "room")],
        );
        match Search::new(&p, None).run() {
            SearchOutcome::Found(values) => {
                let (a, b, c) = (values[0], values[1], values[2]);
                assert!(a.x == b.x && b.x == c.x);
                assert!(a.y > b.y && b.y > c.y);
            }
            other => panic!("expected a solution, got {:?}", other),
        }
    }
}
