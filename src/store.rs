use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::profile::{ChampionEntry, ProfileDoc};
use crate::query::CargoRow;
use crate::roster_fetch::RosterRecord;

const PLAYERS_DIR: &str = "players";
const RESULTS_DIR: &str = "results";
const SCOREBOARDS_DIR: &str = "scoreboards";
const ROSTERS_DIR: &str = "rosters";
const TEAMS_DIR: &str = "teams";

/// Which fields the current operation overlays onto a stored profile.
pub enum ProfileOverlay {
    /// Everything a full profile build produces. External roster fields
    /// already on disk are preserved, as is a non-empty champion list
    /// when the fresh build carries none.
    Full(ProfileDoc),
    /// Only the champion list.
    Champions(Vec<ChampionEntry>),
    /// Only the external roster fields.
    Roster(RosterRecord),
}

/// Keyed JSON store under the data directory. Profile writes are
/// read-modify-write upserts; plain dumps overwrite.
///
/// Files are not lock protected: concurrent invocations against the
/// same player are unsafe. Single-operator batch tool.
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Self {
        let root = std::env::var("DATA_DIR")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| "data".to_string());
        Self::new(root)
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for sub in [PLAYERS_DIR, RESULTS_DIR, SCOREBOARDS_DIR, ROSTERS_DIR, TEAMS_DIR] {
            let dir = self.root.join(sub);
            fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        }
        Ok(())
    }

    pub fn profile_path(&self, player: &str) -> PathBuf {
        self.root
            .join(PLAYERS_DIR)
            .join(format!("{}.json", player.to_lowercase()))
    }

    pub fn team_logo_path(&self, team: &str) -> PathBuf {
        self.root.join(TEAMS_DIR).join(format!("{team}.png"))
    }

    pub fn load_profile(&self, player: &str) -> Result<Option<ProfileDoc>> {
        let path = self.profile_path(player);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let doc = serde_json::from_str(&raw)
            .with_context(|| format!("malformed profile {}", path.display()))?;
        Ok(Some(doc))
    }

    /// Loads the stored profile (or a minimal `{name, champions: []}`
    /// base), applies the overlay, writes the merged document back.
    pub fn upsert_profile(&self, player: &str, overlay: ProfileOverlay) -> Result<PathBuf> {
        let mut doc = self.load_profile(player)?.unwrap_or_else(|| ProfileDoc {
            name: player.to_string(),
            ..ProfileDoc::default()
        });
        apply_overlay(&mut doc, overlay);

        let path = self.profile_path(player);
        write_json_pretty(&path, &doc)?;
        Ok(path)
    }

    pub fn write_results(&self, player: &str, rows: &[CargoRow]) -> Result<PathBuf> {
        let path = self
            .root
            .join(RESULTS_DIR)
            .join(format!("{player}_tournament_results.json"));
        write_json_pretty(&path, &rows)?;
        Ok(path)
    }

    pub fn write_scoreboards(&self, player: &str, rows: &[CargoRow]) -> Result<PathBuf> {
        let path = self
            .root
            .join(SCOREBOARDS_DIR)
            .join(format!("{player}_tournament_scoreboards.json"));
        write_json_pretty(&path, &rows)?;
        Ok(path)
    }

    pub fn write_roster(&self, slug: &str, records: &[RosterRecord]) -> Result<PathBuf> {
        let path = self.root.join(ROSTERS_DIR).join(format!("{slug}.json"));
        write_json_pretty(&path, &records)?;
        Ok(path)
    }
}

fn apply_overlay(doc: &mut ProfileDoc, overlay: ProfileOverlay) {
    match overlay {
        ProfileOverlay::Full(fresh) => {
            let prior = std::mem::take(doc);
            *doc = fresh;
            if doc.full_name.is_none() {
                doc.full_name = prior.full_name;
            }
            if doc.birthdate.is_none() {
                doc.birthdate = prior.birthdate;
            }
            if doc.residency.is_none() {
                doc.residency = prior.residency;
            }
            if doc.champions.is_empty() && !prior.champions.is_empty() {
                doc.champions = prior.champions;
            }
        }
        ProfileOverlay::Champions(champions) => {
            doc.champions = champions;
        }
        ProfileOverlay::Roster(record) => {
            if !record.name.trim().is_empty() {
                doc.full_name = Some(record.name.trim().to_string());
            }
            if !record.birthdate.trim().is_empty() {
                doc.birthdate = Some(record.birthdate.trim().to_string());
            }
            if !record.residency.trim().is_empty() {
                doc.residency = Some(record.residency.trim().to_string());
            }
            if !record.country.trim().is_empty() {
                doc.country = record.country.trim().to_string();
            }
            if !record.role.trim().is_empty() {
                doc.role = record.role.trim().to_string();
            }
        }
    }
}

fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}
