//! Locus CLI - Command-line interface for the Locus spatial solver

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{check, derive, enumerate, relations, witness, SolveArgs};
use locus_solver::FactFamily;

#[derive(Parser)]
#[command(name = "locus")]
#[command(about = "Decide which spatial relations a set of facts admits", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every feasible direction for a scenario's query
    Enumerate {
        /// Path to a scenario file (TOML or JSON)
        file: String,

        #[command(flatten)]
        solve: SolveArgs,
    },

    /// Check whether one direction is feasible for a scenario's query
    Check {
        /// Path to a scenario file (TOML or JSON)
        file: String,

        /// Candidate direction phrase (e.g., "north-east")
        label: String,

        #[command(flatten)]
        solve: SolveArgs,
    },

    /// Print a placement satisfying a scenario's facts
    Witness {
        /// Path to a scenario file (TOML or JSON)
        file: String,

        /// Also fix the query pair to this direction phrase
        #[arg(long)]
        label: Option<String>,

        #[command(flatten)]
        solve: SolveArgs,
    },

    /// Derive a scenario from a concrete layout of objects
    Derive {
        /// Path to a layout file with [[object]] entries
        layout: String,

        /// Scenario name
        #[arg(long, default_value = "derived")]
        name: String,

        /// Ask about this pair instead of the first and last objects (A,B)
        #[arg(long, value_parser = parse_pair)]
        query: Option<(String, String)>,

        /// Use a named fact family (layout, layout_tpp, o2, o2_d2, o2_d3,
        /// layout_o2, layout_o2_d2, layout_o2_d3)
        #[arg(
            long,
            value_parser = parse_family,
            conflicts_with_all = ["inside", "boundary", "distance", "no_directions", "no_regions"]
        )]
        family: Option<FactFamily>,

        /// Add an INR fact for every object
        #[arg(long)]
        inside: bool,

        /// Add a TPP or NTPP fact for every object
        #[arg(long)]
        boundary: bool,

        /// Add distance band facts (2 or 3 bands)
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=3))]
        distance: Option<u8>,

        /// Relate only this many object pairs, nearest in order first
        #[arg(long)]
        hops: Option<usize>,

        /// Leave out room region facts
        #[arg(long)]
        no_regions: bool,

        /// Leave out pairwise direction facts
        #[arg(long)]
        no_directions: bool,

        /// Path to a solver config file
        #[arg(long)]
        config: Option<String>,

        /// Room width in cells
        #[arg(long)]
        width: Option<u32>,

        /// Room height in cells
        #[arg(long)]
        height: Option<u32>,
    },

    /// Show the relation vocabulary
    Relations {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [a, b] if !a.is_empty() && !b.is_empty() => Ok((a.to_string(), b.to_string())),
        _ => Err(format!("expected two comma-separated object names, got '{}'", s)),
    }
}

fn parse_family(s: &str) -> Result<FactFamily, String> {
    s.parse().map_err(|e: locus_core::LocusError| e.to_string())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Enumerate { file, solve } => enumerate::run(&file, &solve),
        Commands::Check { file, label, solve } => check::run(&file, &label, &solve),
        Commands::Witness { file, label, solve } => witness::run(&file, label.as_deref(), &solve),
        Commands::Derive {
            layout,
            name,
            query,
            family,
            inside,
            boundary,
            distance,
            hops,
            no_regions,
            no_directions,
            config,
            width,
            height,
        } => derive::run(derive::DeriveArgs {
            layout,
            name,
            query,
            family,
            inside,
            boundary,
            distance,
            hops,
            no_regions,
            no_directions,
            config,
            width,
            height,
        }),
        Commands::Relations { format } => relations::run(&format),
    }
}
