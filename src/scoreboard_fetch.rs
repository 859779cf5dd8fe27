use anyhow::Result;
use serde_json::Value;

use crate::query::{CargoQuery, CargoRow, Filter, parse_cargo_rows};
use crate::wiki_client::WikiClient;

pub const SCOREBOARD_PAGE_SIZE: u32 = 5000;
pub const CHAMPION_PAGE_SIZE: u32 = 20;

const SCOREBOARD_FIELDS: &str = "SG.GameId, SG.MatchId, SG.DateTime_UTC, SG.Team1, SG.Team2, \
     SG.Team1Score, SG.Team2Score, SG.Winner, SG.Gamelength_Number, \
     SP.Team, SP.Role, SP.Champion, SP.Kills, SP.Deaths, SP.Assists, \
     SP.Gold, SP.CS, SP.DamageToChampions, SP.Link";

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionCount {
    pub champion: String,
    pub games: u64,
}

/// Per-game participant rows joined to game metadata, newest first.
/// One row per (game, participant) pair, kept raw for persistence.
pub fn fetch_scoreboard_history(
    wiki: &WikiClient,
    player: &str,
    aliases: &[String],
) -> Result<Vec<CargoRow>> {
    if aliases.is_empty() {
        return Ok(Vec::new());
    }
    let query = CargoQuery::new(
        "PlayerRedirects=PR, ScoreboardPlayers=SP, ScoreboardGames=SG",
        SCOREBOARD_FIELDS,
    )
    .join_on("PR.AllName=SP.Link, SP.GameId=SG.GameId")
    .filter(Filter::and(vec![
        Filter::eq("PR.OverviewPage", player),
        Filter::any_of("SP.Link", aliases),
    ]))
    .order_by("SG.DateTime_UTC DESC")
    .limit(SCOREBOARD_PAGE_SIZE);
    parse_cargo_rows(&wiki.cargo_body(&query)?)
}

/// Games played per champion across the alias set, most played first.
pub fn fetch_champion_counts(
    wiki: &WikiClient,
    player: &str,
    aliases: &[String],
) -> Result<Vec<ChampionCount>> {
    if aliases.is_empty() {
        return Ok(Vec::new());
    }
    let query = CargoQuery::new("PlayerRedirects=PR, ScoreboardPlayers=SP", "SP.Champion, COUNT(*)=count")
        .join_on("PR.AllName=SP.Link")
        .filter(Filter::and(vec![
            Filter::eq("PR.OverviewPage", player),
            Filter::any_of("SP.Link", aliases),
        ]))
        .group_by("SP.Champion")
        .order_by("count DESC")
        .limit(CHAMPION_PAGE_SIZE);
    parse_champion_counts_json(&wiki.cargo_body(&query)?)
}

pub fn parse_champion_counts_json(raw: &str) -> Result<Vec<ChampionCount>> {
    let rows = parse_cargo_rows(raw)?;
    let mut counts = Vec::with_capacity(rows.len());
    for row in &rows {
        let Some(champion) = row.get("Champion").and_then(Value::as_str) else {
            continue;
        };
        if champion.is_empty() {
            continue;
        }
        counts.push(ChampionCount {
            champion: champion.to_string(),
            games: count_value(row.get("count")),
        });
    }
    Ok(counts)
}

// The API returns aggregate columns as either numbers or strings.
fn count_value(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}
