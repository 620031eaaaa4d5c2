//! Witness placement command

use super::{exit_on_failure, load_single_scenario, SolveArgs};
use anyhow::{Context, Result};
use locus_relation::Direction;
use locus_solver::Answer;

pub fn run(file: &str, label: Option<&str>, args: &SolveArgs) -> Result<()> {
    let json = args.json()?;
    let solver = args.solver()?;
    let scenario = load_single_scenario(file, args.scenario.as_deref())?;

    let constraint = match label {
        Some(phrase) => {
            let query = scenario.require_query()?;
            let direction = Direction::from_phrase(phrase)
                .with_context(|| format!("Invalid label '{}'", phrase))?;
            Some((query, direction))
        }
        None => None,
    };

    let report = solver.find_witness(&scenario.facts, constraint);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match (&report.answer, &report.placement) {
            (Answer::Yes, Some(placement)) => {
                println!("Witness for '{}' ({} steps):", scenario.name, report.steps);
                for obj in placement.iter() {
                    println!("  {:<12} {}", obj.name, obj.position);
                }
                println!();
                print!("{}", toml::to_string_pretty(placement)?);
            }
            (Answer::Undecided, _) => {
                println!(
                    "No witness for '{}' within {} steps.",
                    scenario.name, report.steps
                );
            }
            _ => println!("No placement satisfies '{}'.", scenario.name),
        }
    }

    exit_on_failure(report.answer);

    Ok(())
}
