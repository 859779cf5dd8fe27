use tracing::warn;

use crate::aliases::resolve_known_names;
use crate::logos::download_team_logo;
use crate::player_fetch::{fetch_placements, fetch_profile_row, resolve_avatar};
use crate::profile::{build_profile, champions_from_counts};
use crate::results_fetch::fetch_tournament_results;
use crate::roster_fetch::RosterRecord;
use crate::scoreboard_fetch::{fetch_champion_counts, fetch_scoreboard_history};
use crate::store::{ProfileOverlay, ProfileStore};
use crate::wiki_client::WikiClient;

/// Outcome of one batch run. Best effort: a per-player failure is
/// recorded and the loop moves on.
pub struct BatchReport {
    pub operation: String,
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

impl BatchReport {
    fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn print_summary(&self) {
        println!();
        println!("{}", "=".repeat(60));
        println!("Summary: {}", self.operation);
        if !self.succeeded.is_empty() {
            println!("  processed {} player(s):", self.succeeded.len());
            for name in &self.succeeded {
                println!("    - {name}");
            }
        }
        if !self.failed.is_empty() {
            println!("  failed {} player(s):", self.failed.len());
            for name in &self.failed {
                println!("    - {name}");
            }
        }
        println!(
            "  total: {} ok, {} failed",
            self.succeeded.len(),
            self.failed.len()
        );
        println!("{}", "=".repeat(60));
    }
}

pub fn run_profiles(wiki: &WikiClient, store: &ProfileStore, names: &[String]) -> BatchReport {
    let mut report = BatchReport::new("player profiles & tournament results");
    for name in names {
        println!();
        println!("Processing profile: {name}");
        if process_profile(wiki, store, name, None) {
            report.succeeded.push(name.clone());
        } else {
            report.failed.push(name.clone());
        }
    }
    report
}

pub fn run_roster_batch(
    wiki: &WikiClient,
    store: &ProfileStore,
    records: &[RosterRecord],
) -> BatchReport {
    let mut report = BatchReport::new("roster batch: profiles & tournament results");
    for (idx, record) in records.iter().enumerate() {
        let name = record.player.trim();
        println!();
        if name.is_empty() {
            println!("[{}/{}] Skipping record with missing player handle", idx + 1, records.len());
            report.failed.push("<missing handle>".to_string());
            continue;
        }
        println!("[{}/{}] Processing {} ({})", idx + 1, records.len(), name, record.name);
        if process_profile(wiki, store, name, Some(record)) {
            report.succeeded.push(name.to_string());
        } else {
            report.failed.push(name.to_string());
        }
    }
    report
}

pub fn run_champions(wiki: &WikiClient, store: &ProfileStore, names: &[String]) -> BatchReport {
    let mut report = BatchReport::new("player champions & scoreboard history");
    for name in names {
        println!();
        println!("Processing champions & scoreboards: {name}");
        if process_champions(wiki, store, name) {
            report.succeeded.push(name.clone());
        } else {
            report.failed.push(name.clone());
        }
    }
    report
}

pub fn run_team_logos(wiki: &WikiClient, store: &ProfileStore, teams: &[String]) -> BatchReport {
    let mut report = BatchReport::new("team logo download");
    for team in teams {
        match download_team_logo(wiki, store, team, None) {
            Ok(path) => {
                println!("Logo for {team} saved to {}", path.display());
                report.succeeded.push(team.clone());
            }
            Err(err) => {
                warn!(team = %team, error = %err, "logo download failed");
                report.failed.push(team.clone());
            }
        }
    }
    report
}

fn process_profile(
    wiki: &WikiClient,
    store: &ProfileStore,
    name: &str,
    roster: Option<&RosterRecord>,
) -> bool {
    let row = match fetch_profile_row(wiki, name) {
        Ok(Some(row)) => row,
        Ok(None) => {
            println!("  profile not found for {name}");
            return false;
        }
        Err(err) => {
            warn!(player = %name, error = %err, "profile fetch failed");
            return false;
        }
    };

    let placements = fetch_placements(wiki, name).unwrap_or_else(|err| {
        warn!(player = %name, error = %err, "placements fetch failed");
        Vec::new()
    });
    let avatar = resolve_avatar(wiki, name, &row.image);
    let doc = build_profile(name, &row, &placements, avatar);

    match store.upsert_profile(name, ProfileOverlay::Full(doc)) {
        Ok(path) => println!("  profile saved to {}", path.display()),
        Err(err) => {
            warn!(player = %name, error = %err, "profile save failed");
            return false;
        }
    }

    if let Some(record) = roster {
        if let Err(err) = store.upsert_profile(name, ProfileOverlay::Roster(record.clone())) {
            warn!(player = %name, error = %err, "roster overlay failed");
            return false;
        }
    }

    let aliases = resolve_known_names(wiki, name);
    if aliases.is_empty() {
        println!("  no known names for {name}, skipping tournament results");
        return true;
    }
    let results = fetch_tournament_results(wiki, &aliases).unwrap_or_else(|err| {
        warn!(player = %name, error = %err, "tournament results fetch failed");
        Vec::new()
    });
    if results.is_empty() {
        println!("  no tournament results for {name}");
    } else {
        match store.write_results(name, &results) {
            Ok(path) => println!("  tournament results saved to {}", path.display()),
            Err(err) => warn!(player = %name, error = %err, "results save failed"),
        }
    }
    true
}

fn process_champions(wiki: &WikiClient, store: &ProfileStore, name: &str) -> bool {
    let aliases = resolve_known_names(wiki, name);
    if aliases.is_empty() {
        println!("  no known names for {name}");
        return false;
    }

    let scoreboards = fetch_scoreboard_history(wiki, name, &aliases).unwrap_or_else(|err| {
        warn!(player = %name, error = %err, "scoreboard fetch failed");
        Vec::new()
    });
    if scoreboards.is_empty() {
        println!("  no scoreboard data for {name}");
    } else {
        match store.write_scoreboards(name, &scoreboards) {
            Ok(path) => println!("  scoreboard history saved to {}", path.display()),
            Err(err) => warn!(player = %name, error = %err, "scoreboard save failed"),
        }
    }

    let counts = fetch_champion_counts(wiki, name, &aliases).unwrap_or_else(|err| {
        warn!(player = %name, error = %err, "champion aggregation failed");
        Vec::new()
    });
    let champions = champions_from_counts(&counts);
    if champions.is_empty() {
        println!("  no champion data for {name}");
        return false;
    }
    match store.upsert_profile(name, ProfileOverlay::Champions(champions)) {
        Ok(path) => {
            println!("  profile champions updated at {}", path.display());
            true
        }
        Err(err) => {
            warn!(player = %name, error = %err, "champions save failed");
            false
        }
    }
}
