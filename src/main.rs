use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use lol_profiles::pipeline;
use lol_profiles::roster_fetch::{self, league_slug};
use lol_profiles::store::ProfileStore;
use lol_profiles::wiki_client::WikiClient;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let wiki = WikiClient::from_env()?;
    let store = ProfileStore::from_env();
    store.ensure_dirs()?;

    println!("Esports player data puller");
    println!("Wiki API: {}", wiki.api_base());

    loop {
        println!();
        println!("Select an operation:");
        println!("  1. Player profiles & tournament results");
        println!("  2. Player champions & scoreboard history");
        println!("  3. Batch run from a roster file (.json) or name list (.txt)");
        println!("  4. Pull a league roster");
        println!("  5. Download team logos");
        println!("  6. Exit");

        let choice = prompt("Enter your choice: ")?;
        match choice.as_str() {
            "1" => {
                let names = prompt_names("Enter player name(s) separated by commas: ")?;
                if names.is_empty() {
                    println!("No players entered.");
                    continue;
                }
                pipeline::run_profiles(&wiki, &store, &names).print_summary();
            }
            "2" => {
                let names = prompt_names("Enter player name(s) separated by commas: ")?;
                if names.is_empty() {
                    println!("No players entered.");
                    continue;
                }
                pipeline::run_champions(&wiki, &store, &names).print_summary();
            }
            "3" => run_batch_from_file(&wiki, &store)?,
            "4" => pull_league_roster(&wiki, &store)?,
            "5" => {
                let teams = prompt_names("Enter team name(s) separated by commas: ")?;
                if teams.is_empty() {
                    println!("No teams entered.");
                    continue;
                }
                pipeline::run_team_logos(&wiki, &store, &teams).print_summary();
            }
            "6" | "q" | "exit" => {
                println!("Goodbye.");
                break;
            }
            _ => println!("Invalid choice."),
        }
    }
    Ok(())
}

fn run_batch_from_file(wiki: &WikiClient, store: &ProfileStore) -> Result<()> {
    let raw = prompt("Enter path to a roster .json or newline-delimited .txt file: ")?;
    if raw.is_empty() {
        return Ok(());
    }
    let path = Path::new(&raw);

    if path.extension().and_then(|ext| ext.to_str()) == Some("txt") {
        match roster_fetch::load_names_file(path) {
            Ok(names) if names.is_empty() => println!("No player names in {}", path.display()),
            Ok(names) => {
                println!("Loaded {} player(s) from {}", names.len(), path.display());
                pipeline::run_profiles(wiki, store, &names).print_summary();
            }
            Err(err) => println!("Could not load {}: {err:#}", path.display()),
        }
    } else {
        match roster_fetch::load_roster_file(path) {
            Ok(records) if records.is_empty() => println!("No roster records in {}", path.display()),
            Ok(records) => {
                println!("Loaded {} roster record(s) from {}", records.len(), path.display());
                pipeline::run_roster_batch(wiki, store, &records).print_summary();
            }
            Err(err) => println!("Could not load {}: {err:#}", path.display()),
        }
    }
    Ok(())
}

fn pull_league_roster(wiki: &WikiClient, store: &ProfileStore) -> Result<()> {
    let league = prompt("Enter league name (e.g. Arabian League): ")?;
    if league.is_empty() {
        println!("No league entered.");
        return Ok(());
    }
    match roster_fetch::fetch_league_roster(wiki, &league) {
        Ok(records) if records.is_empty() => println!("No players found for {league}"),
        Ok(records) => match store.write_roster(&league_slug(&league), &records) {
            Ok(path) => println!("Saved {} roster record(s) to {}", records.len(), path.display()),
            Err(err) => println!("Could not save roster: {err:#}"),
        },
        Err(err) => println!("Roster pull failed for {league}: {err:#}"),
    }
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_names(message: &str) -> Result<Vec<String>> {
    let raw = prompt(message)?;
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}
