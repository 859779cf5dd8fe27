use std::collections::BTreeSet;

use anyhow::Result;
use serde_json::Value;
use tracing::warn;

use crate::query::{CargoQuery, Filter, parse_cargo_rows};
use crate::wiki_client::WikiClient;

/// All names a player's records may be filed under. Sorted and
/// deduplicated; empty when the identifier is unknown to the wiki.
/// A lookup failure degrades to the canonical name alone.
pub fn resolve_known_names(wiki: &WikiClient, player: &str) -> Vec<String> {
    match fetch_known_names(wiki, player) {
        Ok(names) => names,
        Err(err) => {
            warn!(player = %player, error = %err, "alias lookup failed, using canonical name only");
            vec![player.to_string()]
        }
    }
}

pub fn fetch_known_names(wiki: &WikiClient, player: &str) -> Result<Vec<String>> {
    let query = CargoQuery::new("PlayerRedirects", "AllName")
        .filter(Filter::eq("OverviewPage", player));
    parse_known_names_json(&wiki.cargo_body(&query)?)
}

pub fn parse_known_names_json(raw: &str) -> Result<Vec<String>> {
    let rows = parse_cargo_rows(raw)?;
    let names: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| row.get("AllName").and_then(Value::as_str))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    Ok(names.into_iter().collect())
}
