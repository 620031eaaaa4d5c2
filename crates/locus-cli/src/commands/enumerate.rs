//! Label enumeration command

use super::{load_scenarios, SolveArgs};
use anyhow::Result;
use locus_solver::LabelReport;

pub fn run(file: &str, args: &SolveArgs) -> Result<()> {
    let json = args.json()?;
    let solver = args.solver()?;
    let scenarios = load_scenarios(file, args.scenario.as_deref())?;

    let mut results = Vec::new();
    for scenario in &scenarios {
        let report = solver.enumerate_scenario(scenario)?;
        results.push((scenario.name.clone(), report));
    }

    if json {
        let output: Vec<_> = results
            .iter()
            .map(|(name, report)| serde_json::json!({ "scenario": name, "report": report }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "Room {} ({} scenario(s))",
            solver.config().room,
            results.len()
        );
        for (name, report) in &results {
            print_report_text(name, report);
        }
    }

    Ok(())
}

fn print_report_text(name: &str, report: &LabelReport) {
    println!();
    println!("[{}] {}", name, report.summary());
    for outcome in &report.outcomes {
        println!(
            "  {:<3} {:<9} {} steps",
            outcome.label.token(),
            outcome.answer.as_str(),
            outcome.steps
        );
    }
}
