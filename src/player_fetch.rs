use anyhow::Result;
use serde_json::Value;
use tracing::warn;

use crate::profile::{PlacementRow, ProfileRow, strip_revision_suffix};
use crate::query::{CargoQuery, Filter, parse_cargo_rows, row_to};
use crate::wiki_client::WikiClient;

const PROFILE_FIELDS: &str = "Name, ID, Team, Country, Image, Role, FavChamps";

/// Single-row lookup in the `Players` table. A miss is a valid outcome.
pub fn fetch_profile_row(wiki: &WikiClient, player: &str) -> Result<Option<ProfileRow>> {
    let query = CargoQuery::new("Players", PROFILE_FIELDS)
        .filter(Filter::or(vec![
            Filter::eq("Name", player),
            Filter::eq("Player", player),
        ]))
        .limit(1);
    parse_profile_json(&wiki.cargo_body(&query)?)
}

pub fn parse_profile_json(raw: &str) -> Result<Option<ProfileRow>> {
    let rows = parse_cargo_rows(raw)?;
    let Some(row) = rows.first() else {
        return Ok(None);
    };
    Ok(Some(row_to(row)?))
}

pub fn fetch_placements(wiki: &WikiClient, player: &str) -> Result<Vec<PlacementRow>> {
    let query = CargoQuery::new("TournamentPlayers", "OverviewPage, Team, Role, Place")
        .filter(Filter::eq("Player", player))
        .order_by("OverviewPage DESC");
    parse_placements_json(&wiki.cargo_body(&query)?)
}

pub fn parse_placements_json(raw: &str) -> Result<Vec<PlacementRow>> {
    let rows = parse_cargo_rows(raw)?;
    rows.iter().map(row_to).collect()
}

/// Most recent player image filed under any tournament, by image sort
/// date then tournament start date.
pub fn fetch_tournament_image(wiki: &WikiClient, player: &str) -> Result<Option<String>> {
    let query = CargoQuery::new("PlayerImages=PI, Tournaments=T", "PI.FileName")
        .join_on("PI.Tournament=T.OverviewPage")
        .filter(Filter::eq("Link", player))
        .order_by("PI.SortDate DESC, T.DateStart DESC")
        .limit(1);
    let rows = parse_cargo_rows(&wiki.cargo_body(&query)?)?;
    Ok(rows
        .first()
        .and_then(|row| row.get("FileName").and_then(Value::as_str))
        .filter(|filename| !filename.is_empty())
        .map(str::to_string))
}

/// Avatar URL for a player: the profile's explicit image when present,
/// otherwise the tournament-image fallback. Either path may yield None.
pub fn resolve_avatar(wiki: &WikiClient, player: &str, image_field: &str) -> Option<String> {
    let filename = if image_field.trim().is_empty() {
        match fetch_tournament_image(wiki, player) {
            Ok(found) => found?,
            Err(err) => {
                warn!(player = %player, error = %err, "tournament image lookup failed");
                return None;
            }
        }
    } else {
        image_field.trim().to_string()
    };

    match wiki.image_url(&filename, None) {
        Ok(Some(url)) => Some(strip_revision_suffix(&url).to_string()),
        Ok(None) => None,
        Err(err) => {
            warn!(player = %player, filename = %filename, error = %err, "image url lookup failed");
            None
        }
    }
}
