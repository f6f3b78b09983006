//! ipd-tournament: run an Iterated Prisoner's Dilemma tournament and print
//! the scoreboard sorted by score.
//!
//! Settings come from an optional TOML file; command-line flags override it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde_json::json;

use ipd_core::{Roster, ScheduleMode, StrategyKind, TournamentConfig};

#[derive(Parser, Debug)]
#[command(
    name = "ipd-tournament",
    about = "Iterated Prisoner's Dilemma tournament runner"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated strategy names (e.g. TitForTat,Grudger,Joss).
    #[arg(long, value_delimiter = ',')]
    strategies: Vec<String>,

    /// Named roster: all, deterministic, stochastic.
    #[arg(long, value_parser = parse_roster)]
    roster: Option<Roster>,

    /// Rounds per match.
    #[arg(long, allow_negative_numbers = true)]
    games: Option<i64>,

    /// Flip each move with a small probability. `--noise false` turns off
    /// noise enabled in the config file.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    noise: Option<bool>,

    /// Flip probability used when noise is on.
    #[arg(long)]
    flip_probability: Option<f64>,

    /// Tournament seed. Drawn from entropy when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Schedule: full or round-robin.
    #[arg(long, value_parser = parse_mode)]
    mode: Option<ScheduleMode>,

    /// Play matches across worker threads.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Print the scoreboard as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// List available strategies and exit.
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn parse_roster(s: &str) -> Result<Roster, String> {
    s.parse::<Roster>().map_err(|e| e.to_string())
}

fn parse_mode(s: &str) -> Result<ScheduleMode, String> {
    s.parse::<ScheduleMode>().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.list {
        print_strategies();
        return Ok(());
    }

    let config = build_config(&cli)?;
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    info!("tournament seed {}", seed);

    let tournament = config.tournament(seed).context("invalid tournament settings")?;
    let board = if config.parallel {
        tournament.run_parallel(config.mode)
    } else {
        tournament.run(config.mode)
    };

    if cli.json {
        let report = json!({
            "seed": seed,
            "mode": config.mode,
            "games_per_match": tournament.games_per_match(),
            "noise": config.noise_config(),
            "scores": board.sorted(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", board);
    }

    Ok(())
}

/// Merge the config file (if any) with command-line overrides.
fn build_config(cli: &Cli) -> Result<TournamentConfig> {
    let mut config = match &cli.config {
        Some(path) => TournamentConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TournamentConfig::default(),
    };

    if !cli.strategies.is_empty() {
        config.strategies = cli
            .strategies
            .iter()
            .map(|name| name.parse::<StrategyKind>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid --strategies")?;
    }
    if let Some(roster) = cli.roster {
        config.roster = Some(roster);
        if cli.strategies.is_empty() {
            config.strategies.clear();
        }
    }
    if let Some(games) = cli.games {
        config.games_per_match = games;
    }
    if let Some(noise) = cli.noise {
        config.noise = noise;
    }
    if let Some(p) = cli.flip_probability {
        config.flip_probability = p;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if cli.parallel {
        config.parallel = true;
    }

    if config.resolved_roster().is_empty() {
        config.roster = Some(Roster::All);
    }
    config.validate()?;
    Ok(config)
}

fn print_strategies() {
    let width = StrategyKind::ALL
        .iter()
        .map(|k| k.name().len())
        .max()
        .unwrap_or(0);
    for kind in StrategyKind::ALL {
        let tag = if kind.is_stochastic() { "*" } else { " " };
        println!("{:<width$} {} {}", kind.name(), tag, kind.describe(), width = width);
    }
    println!("\n* uses randomness");
}
