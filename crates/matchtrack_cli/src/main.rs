//! Matchtrack operator CLI.
//!
//! Stands in for the out-of-scope UI layer: creates match documents in a
//! local JSON store, runs a scripted demo session through the whole engine
//! surface, and prints the stored view of a match.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::{Path, PathBuf};

use matchtrack_core::{
    EngineConfig, JsonFileGateway, MatchEngine, MatchSession, OpponentStatField, Period,
    PlayerStatField, RosterPlayer, SessionView, Side,
};

#[derive(Parser)]
#[command(name = "matchtrack")]
#[command(about = "Track live match statistics against a local document store", long_about = None)]
struct Cli {
    /// Directory holding one JSON document per match
    #[arg(long, default_value = "matches")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new match document
    New {
        #[arg(long)]
        match_id: String,

        /// Local team name
        #[arg(long)]
        local: String,

        /// Visitor team name
        #[arg(long)]
        visitor: String,

        /// Which side is the tracked team (must equal one of the names)
        #[arg(long)]
        my_team: String,
    },

    /// Print the stored session view as JSON
    Show {
        #[arg(long)]
        match_id: String,

        /// Roster file (JSON array of {id, display_name, jersey_number})
        #[arg(long)]
        roster: Option<PathBuf>,
    },

    /// Run a scripted demo session (ticks, goals, period switch, finalize)
    Demo {
        #[arg(long)]
        match_id: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let gateway = JsonFileGateway::new(&cli.data_dir);

    match cli.command {
        Commands::New { match_id, local, visitor, my_team } => {
            anyhow::ensure!(
                my_team == local || my_team == visitor,
                "--my-team must equal --local or --visitor"
            );
            gateway
                .create(&match_id, MatchSession::new(local, visitor, my_team))
                .with_context(|| format!("creating match {match_id}"))?;
            println!("created match {match_id} in {:?}", cli.data_dir);
            Ok(())
        }
        Commands::Show { match_id, roster } => cmd_show(gateway, &match_id, roster.as_deref()),
        Commands::Demo { match_id } => cmd_demo(gateway, &match_id),
    }
}

fn cmd_show(gateway: JsonFileGateway, match_id: &str, roster: Option<&Path>) -> Result<()> {
    let roster = load_roster(roster)?;
    let engine = MatchEngine::load(gateway, match_id, roster, EngineConfig::default())
        .with_context(|| format!("loading match {match_id}"))?;
    println!("{}", SessionView::capture(&engine).to_json()?);
    Ok(())
}

/// Scripted session exercising clock, selection, stats, timeout, period
/// switch and finalize. Ticks are simulated, so the demo is instant.
fn cmd_demo(gateway: JsonFileGateway, match_id: &str) -> Result<()> {
    if !gateway.exists(match_id) {
        gateway.create(match_id, MatchSession::new("Lions", "Tigers", "Lions"))?;
    }
    let roster = demo_roster();
    let mut engine = MatchEngine::load(gateway, match_id, roster, EngineConfig::default())
        .with_context(|| format!("loading match {match_id}"))?;

    for id in ["p1", "p2", "p3", "p4", "p5"] {
        engine.select_player(id)?;
    }
    engine.start_clock()?;
    for _ in 0..180 {
        engine.tick();
    }
    engine.adjust_player_stat("p1", PlayerStatField::ShotsOnTarget, 1)?;
    engine.adjust_player_stat("p1", PlayerStatField::Goals, 1)?;
    engine.adjust_player_stat("p2", PlayerStatField::Assists, 1)?;
    engine.set_timeout_used(Side::Visitor);
    for _ in 0..120 {
        engine.tick();
    }
    engine.adjust_opponent_stat(OpponentStatField::Goals, 1)?;

    engine.switch_period(Period::SecondHalf)?;
    engine.select_player("p1")?;
    engine.select_player("p6")?;
    engine.start_clock()?;
    for _ in 0..240 {
        engine.tick();
    }
    engine.adjust_player_stat("p6", PlayerStatField::Goals, 1)?;
    engine.record_own_goal()?;

    engine.finalize()?;
    println!("{}", SessionView::capture(&engine).to_json()?);
    Ok(())
}

fn load_roster(path: Option<&Path>) -> Result<Vec<RosterPlayer>> {
    match path {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading roster {path:?}"))?;
            serde_json::from_str(&data).with_context(|| format!("parsing roster {path:?}"))
        }
        None => Ok(demo_roster()),
    }
}

fn demo_roster() -> Vec<RosterPlayer> {
    [
        ("p1", "Ana Silva", 9),
        ("p2", "Marta Costa", 10),
        ("p3", "Ines Rocha", 4),
        ("p4", "Sofia Pinto", 6),
        ("p5", "Rita Gomes", 1),
        ("p6", "Clara Nunes", 7),
        ("p7", "Eva Santos", 11),
    ]
    .into_iter()
    .map(|(id, name, jersey)| RosterPlayer::new(id, name, jersey))
    .collect()
}
