use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::query::{CargoQuery, Filter, parse_cargo_rows, row_to};
use crate::wiki_client::WikiClient;

/// One roster entry, as pulled from the wiki or loaded from a batch
/// input file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterRecord {
    #[serde(rename = "Player", default)]
    pub player: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "NationalityPrimary", default)]
    pub nationality: String,
    #[serde(rename = "Birthdate", default)]
    pub birthdate: String,
    #[serde(rename = "Residency", default)]
    pub residency: String,
    #[serde(rename = "Role", default)]
    pub role: String,
}

/// Every player who appeared in a tournament of the given league, one
/// row per player page.
pub fn fetch_league_roster(wiki: &WikiClient, league: &str) -> Result<Vec<RosterRecord>> {
    let query = CargoQuery::new(
        "Tournaments=T, TournamentPlayers=TP, PlayerRedirects=PR, Players=P",
        "P.Player, P.Name, P.Country, P.NationalityPrimary, P.Birthdate, P.Residency, P.Role",
    )
    .join_on("T.OverviewPage=TP.OverviewPage, TP.Player=PR.AllName, PR.OverviewPage=P.OverviewPage")
    .filter(Filter::eq("T.League", league))
    .group_by("P.OverviewPage");
    parse_roster_json(&wiki.cargo_body(&query)?)
}

pub fn parse_roster_json(raw: &str) -> Result<Vec<RosterRecord>> {
    let rows = parse_cargo_rows(raw)?;
    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        let record: RosterRecord = row_to(row)?;
        if record.player.trim().is_empty() {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

pub fn load_roster_file(path: &Path) -> Result<Vec<RosterRecord>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed roster file {}", path.display()))
}

pub fn load_names_file(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn league_slug(league: &str) -> String {
    league.trim().to_lowercase().replace(' ', "_")
}
