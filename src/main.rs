//! TeamMate - personality-aware team formation
//!
//! Entry point for the `teammate` binary. Loads the roster, forms teams and
//! prints a report; configuration helpers live under `teammate config`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use teammate::cli::{Cli, Commands, ConfigSubcommand};
use teammate::config::{self, TeammateConfig};
use teammate::error::{Error, Result};
use teammate::logging::{self, LogGuards};
use teammate::types::{is_valid_score, PersonalityBands, MAX_PERSONALITY_SCORE, MIN_PERSONALITY_SCORE};
use teammate::version;
use teammate::{
    analyze, classify, AllocationPlan, FormationAnalysis, IdGenerator, JsonRoster, Team,
    TeamAllocator,
};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => {
            version::print_version();
            Ok(())
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            handle_config_command(subcommand)
        }
        Commands::Classify { score } => {
            logging::init_simple(tracing::Level::WARN)?;
            run_classify(score)
        }
        Commands::Allocate {
            roster,
            team_size,
            seed,
            output,
            config,
        } => {
            let mut cfg = TeammateConfig::load(config.as_deref())?;

            // CLI arguments take precedence over file and environment
            cfg.override_paths(roster.as_deref(), output.as_deref());
            if let Some(k) = team_size {
                cfg.allocation.team_size = k;
            }
            if seed.is_some() {
                cfg.allocation.seed = seed;
            }

            let _log_guards = init_logging_from_config(&cfg, cli.verbose, cli.quiet)?;

            let build = version::build_info();
            info!(version = %build.full_version(), "Starting TeamMate");

            run_allocate(&cfg)
        }
    }
}

/// Initialize logging from configuration
fn init_logging_from_config(config: &TeammateConfig, verbose: u8, quiet: bool) -> Result<LogGuards> {
    logging::init_logging(&config.logging, verbose, quiet)
}

/// Written to `--output`: the plan, the teams and their analysis
#[derive(Serialize)]
struct FormationReport<'a> {
    plan: AllocationPlan,
    teams: &'a [Team],
    analysis: FormationAnalysis,
}

fn run_allocate(config: &TeammateConfig) -> Result<()> {
    let roster_path = config.roster_path();
    if !roster_path.exists() {
        return Err(Error::IoRead {
            path: roster_path,
            source: io::Error::new(io::ErrorKind::NotFound, "roster file does not exist"),
        });
    }

    let ids = IdGenerator::new();
    let roster = JsonRoster::new(&roster_path);
    let participants = roster.load_participants(&ids)?;
    ids.reconcile_from(&participants, &roster)?;
    info!(next_id = %ids.peek_next(), "Participant ids reconciled");

    let allocator = TeamAllocator::new(config.allocation.team_size);
    let plan = allocator.plan(participants.len());
    info!(
        participants = participants.len(),
        team_size = allocator.team_size(),
        teams = plan.team_count,
        seed = ?config.allocation.seed,
        "Allocating teams"
    );

    let teams = match config.allocation.seed {
        Some(seed) => allocator.allocate_seeded(&participants, seed)?,
        None => allocator.allocate(&participants)?,
    };
    let analysis = analyze(&teams);

    for team in &teams {
        println!("{}", team.detailed());
    }
    println!("{}", analysis);
    if plan.dropped > 0 {
        warn!(dropped = plan.dropped, "Some participants could not be placed");
        println!(
            "\n{} participant(s) left over (not enough for another team of {})",
            plan.dropped,
            allocator.team_size()
        );
    }

    if let Some(path) = config.teams_output_path() {
        let report = FormationReport {
            plan,
            teams: &teams,
            analysis,
        };
        write_report(&path, &report)?;
        println!("\nTeams written to {}", path.display());
    }

    Ok(())
}

fn write_report(path: &Path, report: &FormationReport<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|e| Error::IoWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), teams = report.teams.len(), "Teams saved");
    Ok(())
}

fn run_classify(score: u8) -> Result<()> {
    if !is_valid_score(score) {
        return Err(Error::data(
            "personality_score",
            score,
            format!(
                "must be between {} and {}",
                MIN_PERSONALITY_SCORE, MAX_PERSONALITY_SCORE
            ),
        ));
    }

    let personality = classify(score);
    let band = PersonalityBands::STANDARD.band_of(personality);
    println!(
        "{}: {} ({}-{})",
        score,
        personality,
        band.start(),
        band.end()
    );
    Ok(())
}

fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = TeammateConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written: PathBuf = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate { config } => {
            TeammateConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
