//! Single label check command

use super::{exit_on_failure, load_single_scenario, SolveArgs};
use anyhow::{Context, Result};
use locus_solver::CheckReport;

pub fn run(file: &str, label: &str, args: &SolveArgs) -> Result<()> {
    let json = args.json()?;
    let solver = args.solver()?;
    let scenario = load_single_scenario(file, args.scenario.as_deref())?;

    let report = solver
        .check_scenario(&scenario, label)
        .with_context(|| format!("Failed to check '{}' in scenario '{}'", label, scenario.name))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report_text(&report);
    }

    exit_on_failure(report.answer);

    Ok(())
}

fn print_report_text(report: &CheckReport) {
    println!("{}", report.summary());
    if let Some(placement) = &report.placement {
        for obj in placement.iter() {
            println!("  {} at {}", obj.name, obj.position);
        }
    }
}
