//! CLI command implementations

pub mod check;
pub mod derive;
pub mod enumerate;
pub mod relations;
pub mod witness;

use anyhow::{bail, Context, Result};
use clap::Args;
use locus_core::RoomSize;
use locus_solver::{Answer, Scenario, ScenarioRegistry, SolverConfig, SpatialSolver};

/// Options shared by every command that runs the solver
#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Only use the scenario with this name
    #[arg(long)]
    pub scenario: Option<String>,

    /// Path to a solver config file
    #[arg(long)]
    pub config: Option<String>,

    /// Room width in cells
    #[arg(long)]
    pub width: Option<u32>,

    /// Room height in cells
    #[arg(long)]
    pub height: Option<u32>,

    /// Search every candidate label on its own thread
    #[arg(long)]
    pub parallel: bool,

    /// Maximum search steps per question (0 for no limit)
    #[arg(long)]
    pub budget: Option<u64>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl SolveArgs {
    pub fn solver(&self) -> Result<SpatialSolver> {
        let mut config = load_config(self.config.as_deref(), self.width, self.height)?;
        if self.parallel {
            config = config.with_parallel(true);
        }
        if let Some(budget) = self.budget {
            config = config.with_step_budget(budget);
        }
        Ok(SpatialSolver::new(config))
    }

    pub fn json(&self) -> Result<bool> {
        match self.format.as_str() {
            "json" => Ok(true),
            "text" => Ok(false),
            other => bail!("Unknown format: {}", other),
        }
    }
}

/// Process exit status for an answer: 0 for Yes, 1 for No, 2 when the search gave up
pub fn exit_status(answer: Answer) -> i32 {
    match answer {
        Answer::Yes => 0,
        Answer::No => 1,
        Answer::Undecided => 2,
    }
}

/// Exit with the answer's status unless it is Yes
pub fn exit_on_failure(answer: Answer) {
    let status = exit_status(answer);
    if status != 0 {
        std::process::exit(status);
    }
}

/// Load the config file if given, then apply any room size override
pub fn load_config(path: Option<&str>, width: Option<u32>, height: Option<u32>) -> Result<SolverConfig> {
    let config = match path {
        Some(path) => SolverConfig::load_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => SolverConfig::default(),
    };

    if width.is_none() && height.is_none() {
        return Ok(config);
    }
    let room = RoomSize::new(
        width.unwrap_or(config.room.width()),
        height.unwrap_or(config.room.height()),
    )?;
    Ok(config.with_room(room))
}

/// Load the scenarios a command should run on
pub fn load_scenarios(file: &str, name: Option<&str>) -> Result<Vec<Scenario>> {
    let mut registry = ScenarioRegistry::new();
    registry
        .load_file(file)
        .with_context(|| format!("Failed to load scenarios from {}", file))?;
    log::info!("Loaded {} scenario(s) from {}", registry.len(), file);

    match name {
        Some(name) => Ok(vec![registry.get(name)?.clone()]),
        None if registry.is_empty() => bail!("No scenarios found in {}", file),
        None => Ok(registry.all().to_vec()),
    }
}

/// Load exactly one scenario, requiring `--scenario` when the file holds several
pub fn load_single_scenario(file: &str, name: Option<&str>) -> Result<Scenario> {
    let mut scenarios = load_scenarios(file, name)?;
    if scenarios.len() > 1 {
        let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
        bail!(
            "{} holds {} scenarios ({}); pick one with --scenario",
            file,
            scenarios.len(),
            names.join(", ")
        );
    }
    Ok(scenarios.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_separates_undecided() {
        assert_eq!(exit_status(Answer::Yes), 0);
        assert_eq!(exit_status(Answer::No), 1);
        assert_eq!(exit_status(Answer::Undecided), 2);
    }

    #[test]
    fn test_room_override() {
        let config = load_config(None, Some(6), None).unwrap();
        assert_eq!(config.room, RoomSize::new(6, 12).unwrap());
        assert!(load_config(None, Some(0), None).is_err());
    }
}
