use anyhow::Result;

use crate::query::{CargoQuery, CargoRow, Filter, parse_cargo_rows};
use crate::wiki_client::WikiClient;

pub const RESULTS_PAGE_SIZE: u32 = 500;

const RESULT_FIELDS: &str = "TR.Event, TR.Tier, TR.Date, TR.Place, TR.Team, \
     TR.Prize, TR.Prize_USD, TR.Prize_Euro, TP.Player, TP.Role";

/// Tournament results joined to the player rows, newest first. Rows are
/// kept raw; they are persisted as-is rather than reshaped.
pub fn fetch_tournament_results(wiki: &WikiClient, aliases: &[String]) -> Result<Vec<CargoRow>> {
    if aliases.is_empty() {
        return Ok(Vec::new());
    }
    let query = CargoQuery::new("TournamentResults=TR, TournamentPlayers=TP", RESULT_FIELDS)
        .join_on("TR.PageAndTeam=TP.PageAndTeam")
        .filter(Filter::any_of("TP.Player", aliases))
        .order_by("TR.Date DESC")
        .limit(RESULTS_PAGE_SIZE);
    parse_cargo_rows(&wiki.cargo_body(&query)?)
}
