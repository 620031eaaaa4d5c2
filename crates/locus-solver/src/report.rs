//! Solve report types

use crate::fact::Query;
use crate::placement::Placement;
use crate::search::SearchOutcome;
use locus_relation::Direction;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Answer to a single feasibility question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Answer {
    /// A consistent placement exists
    Yes,
    /// No placement satisfies every fact
    No,
    /// The search ran out of budget; feasibility is unknown
    Undecided,
}

impl Answer {
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found(_) => Answer::Yes,
            SearchOutcome::Exhausted => Answer::No,
            SearchOutcome::BudgetExceeded => Answer::Undecided,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
            Answer::Undecided => "Undecided",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the search for one candidate label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelOutcome {
    pub label: Direction,
    pub answer: Answer,
    pub steps: u64,
}

/// Result of enumerating every candidate direction for a query
#[derive(Debug, Clone, Serialize)]
pub struct LabelReport {
    pub query: Query,
    /// Labels with a consistent placement, in enumeration order
    pub feasible: Vec<Direction>,
    /// Labels whose search hit the step budget
    pub undecided: Vec<Direction>,
    pub outcomes: Vec<LabelOutcome>,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl LabelReport {
    pub fn new(query: Query, outcomes: Vec<LabelOutcome>, elapsed: Duration) -> Self {
        let with_answer = |answer: Answer| {
            outcomes
                .iter()
                .filter(|o| o.answer == answer)
                .map(|o| o.label)
                .collect::<Vec<_>>()
        };
        Self {
            query,
            feasible: with_answer(Answer::Yes),
            undecided: with_answer(Answer::Undecided),
            outcomes,
            elapsed,
        }
    }

    /// Feasible labels as relation tokens
    pub fn tokens(&self) -> Vec<&'static str> {
        self.feasible.iter().map(|d| d.token()).collect()
    }

    pub fn is_feasible(&self, label: Direction) -> bool {
        self.feasible.contains(&label)
    }

    /// True when every label was decided within budget
    pub fn is_complete(&self) -> bool {
        self.undecided.is_empty()
    }

    pub fn total_steps(&self) -> u64 {
        self.outcomes.iter().map(|o| o.steps).sum()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        let labels = if self.feasible.is_empty() {
            "none".to_string()
        } else {
            self.tokens().join(", ")
        };
        let mut summary = format!(
            "{}: {} ({} of {} feasible) in {:.6}s",
            self.query,
            labels,
            self.feasible.len(),
            self.outcomes.len(),
            self.elapsed_secs(),
        );
        if !self.undecided.is_empty() {
            let undecided: Vec<&str> = self.undecided.iter().map(|d| d.token()).collect();
            summary.push_str(&format!("; undecided: {}", undecided.join(", ")));
        }
        summary
    }
}

/// Result of checking a single candidate label
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Direction>,
    pub answer: Answer,
    pub steps: u64,
    /// The first placement found, when the answer is `Yes`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl CheckReport {
    pub fn is_yes(&self) -> bool {
        self.answer == Answer::Yes
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        let question = match (&self.query, self.label) {
            (Some(q), Some(label)) => {
                format!("{} {} {}?", q.subject(), label.token(), q.target())
            }
            _ => "facts consistent?".to_string(),
        };
        format!(
            "{} {} ({} steps, {:.6}s)",
            question,
            self.answer,
            self.steps,
            self.elapsed_secs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locus_core::GridPoint;

    fn outcome(label: Direction, answer: Answer) -> LabelOutcome {
        LabelOutcome {
            label,
            answer,
            steps: 10,
        }
    }

    #[test]
    fn test_answer_strings() {
        assert_eq!(Answer::Yes.to_string(), "Yes");
        assert_eq!(Answer::No.to_string(), "No");
        assert_eq!(Answer::Undecided.to_string(), "Undecided");
        assert_eq!(
            Answer::from_outcome(&SearchOutcome::Found(vec![GridPoint::new(0, 0)])),
            Answer::Yes
        );
        assert_eq!(Answer::from_outcome(&SearchOutcome::Exhausted), Answer::No);
        assert_eq!(
            Answer::from_outcome(&SearchOutcome::BudgetExceeded),
            Answer::Undecided
        );
    }

    #[test]
    fn test_label_report_partitions_outcomes() {
        let report = LabelReport::new(
            Query::new("lamp", "chair").unwrap(),
            vec![
                outcome(Direction::North, Answer::Yes),
                outcome(Direction::South, Answer::No),
                outcome(Direction::East, Answer::Undecided),
                outcome(Direction::Overlap, Answer::Yes),
            ],
            Duration::from_millis(5),
        );
        assert_eq!(report.feasible, vec![Direction::North, Direction::Overlap]);
        assert_eq!(report.undecided, vec![Direction::East]);
        assert_eq!(report.tokens(), vec!["N", "O"]);
        assert!(!report.is_complete());
        assert_eq!(report.total_steps(), 40);

        let summary = report.summary();
        assert!(summary.contains("N, O"));
        assert!(summary.contains("2 of 4 feasible"));
        assert!(summary.contains("undecided: E"));
    }

    #[test]
    fn test_label_report_json() {
        let report = LabelReport::new(
            Query::new("lamp", "chair").unwrap(),
            vec![outcome(Direction::NorthEast, Answer::Yes)],
            Duration::from_millis(250),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["feasible"], serde_json::json!(["NE"]));
        assert_eq!(json["query"], serde_json::json!(["lamp", "chair"]));
        assert_eq!(json["elapsed_secs"], serde_json::json!(0.25));
    }

    #[test]
    fn test_check_report_summary() {
        let report = CheckReport {
            query: Some(Query::new("lamp", "chair").unwrap()),
            label: Some(Direction::SouthWest),
            answer: Answer::No,
            steps: 42,
            placement: None,
            elapsed: Duration::ZERO,
        };
        assert!(!report.is_yes());
        assert!(report.summary().starts_with("lamp SW chair? No"));
    }
}
