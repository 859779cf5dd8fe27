use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoreboard_fetch::ChampionCount;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"20\d{2}").expect("year pattern"));

/// Raw profile row from the `Players` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRow {
    // `Name` is the real name column; `ID` is the in-game handle.
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Team", default)]
    pub team: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "Image", default)]
    pub image: String,
    #[serde(rename = "Role", default)]
    pub role: String,
    #[serde(rename = "FavChamps", default)]
    pub fav_champs: String,
}

/// Raw placement row from the `TournamentPlayers` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementRow {
    #[serde(rename = "OverviewPage", default)]
    pub overview_page: String,
    #[serde(rename = "Team", default)]
    pub team: String,
    #[serde(rename = "Role", default)]
    pub role: String,
    #[serde(rename = "Place", default)]
    pub place: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrophyEntry {
    pub label: String,
    pub count: u32,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub year: i32,
    pub event: String,
}

/// Games played on a champion: an aggregated count, or a placeholder
/// when the source only lists the champion without totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayCount {
    Games(u64),
    Placeholder(String),
}

impl PlayCount {
    pub fn unknown() -> Self {
        PlayCount::Placeholder("unknown".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionEntry {
    pub name: String,
    pub games: PlayCount,
    pub image: String,
}

/// The persisted per-player profile. Serialized field order is the
/// on-disk key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDoc {
    pub name: String,
    pub realname: String,
    pub team: String,
    pub country: String,
    pub role: String,
    pub avatar: Option<String>,
    pub trophies: Vec<TrophyEntry>,
    pub champions: Vec<ChampionEntry>,
    #[serde(rename = "careerTimeline")]
    pub career_timeline: Vec<TimelineEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residency: Option<String>,
}

pub struct TrophiesAndTimeline {
    pub trophies: Vec<TrophyEntry>,
    pub timeline: Vec<TimelineEntry>,
}

/// First four-digit year starting with "20" found in a page label.
pub fn derive_year(label: &str) -> Option<i32> {
    YEAR_RE
        .find(label)
        .and_then(|found| found.as_str().parse::<i32>().ok())
}

/// Medal rendering for a placement rank. Not part of the persisted
/// profile shape; kept as a display utility for result listings.
pub fn format_placement(place: &str) -> String {
    if place.is_empty() {
        return "N/A".to_string();
    }
    match place.trim() {
        "1" => "🥇 1st".to_string(),
        "2" => "🥈 2nd".to_string(),
        "3" => "🥉 3rd".to_string(),
        "4" => "🏅 4th".to_string(),
        _ => place.to_string(),
    }
}

/// Image filename for a champion: spaces, apostrophes and periods
/// stripped, ".png" appended.
pub fn champion_image_name(name: &str) -> String {
    if name.is_empty() {
        return "Default.png".to_string();
    }
    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, ' ' | '\'' | '.'))
        .collect();
    format!("{clean}.png")
}

/// Single pass over placement rows producing the first-place tally and
/// the career timeline. Timeline ties on year keep encounter order.
pub fn build_trophies_and_timeline(placements: &[PlacementRow]) -> TrophiesAndTimeline {
    let mut trophies: Vec<TrophyEntry> = Vec::new();
    let mut timeline: Vec<TimelineEntry> = Vec::new();

    for row in placements {
        let page = row.overview_page.trim();
        let place = row.place.trim();

        if place == "1" {
            let label = if page.is_empty() {
                "Unknown".to_string()
            } else {
                page.replace('_', " ")
            };
            match trophies.iter_mut().find(|entry| entry.label == label) {
                Some(entry) => entry.count += 1,
                None => trophies.push(TrophyEntry {
                    label,
                    count: 1,
                    icon: "🏆".to_string(),
                }),
            }
        }

        if let Some(year) = derive_year(page) {
            let mut event = format!("Played in {}", page.replace('_', " "));
            if place == "1" {
                event.push_str(" — 1st title");
            }
            timeline.push(TimelineEntry { year, event });
        }
    }

    timeline.sort_by(|a, b| b.year.cmp(&a.year));
    TrophiesAndTimeline { trophies, timeline }
}

/// Drops the `/revision/...` tail some image CDNs append to direct URLs.
pub fn strip_revision_suffix(url: &str) -> &str {
    match url.split_once("/revision/") {
        Some((head, _)) => head,
        None => url,
    }
}

/// Champion entries from a comma-separated favorites field. No play
/// totals are available on this path.
pub fn favorite_champions(fav_champs: &str) -> Vec<ChampionEntry> {
    fav_champs
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| ChampionEntry {
            name: name.to_string(),
            games: PlayCount::unknown(),
            image: champion_image_name(name),
        })
        .collect()
}

pub fn champions_from_counts(counts: &[ChampionCount]) -> Vec<ChampionEntry> {
    counts
        .iter()
        .filter(|count| !count.champion.is_empty())
        .map(|count| ChampionEntry {
            name: count.champion.clone(),
            games: PlayCount::Games(count.games),
            image: champion_image_name(&count.champion),
        })
        .collect()
}

pub fn build_profile(
    player: &str,
    row: &ProfileRow,
    placements: &[PlacementRow],
    avatar: Option<String>,
) -> ProfileDoc {
    let shaped = build_trophies_and_timeline(placements);
    ProfileDoc {
        name: if row.id.is_empty() {
            player.to_string()
        } else {
            row.id.clone()
        },
        realname: row.name.clone(),
        team: row.team.clone(),
        country: row.country.clone(),
        role: if row.role.is_empty() {
            "Unknown".to_string()
        } else {
            row.role.clone()
        },
        avatar,
        trophies: shaped.trophies,
        champions: favorite_champions(&row.fav_champs),
        career_timeline: shaped.timeline,
        full_name: None,
        birthdate: None,
        residency: None,
    }
}
