use std::path::PathBuf;

use anyhow::Result;

use crate::profile::strip_revision_suffix;
use crate::store::ProfileStore;
use crate::wiki_client::WikiClient;

/// Fetches a team's square logo and saves it under the teams directory.
/// A width requests a thumbnail rendition instead of the original.
pub fn download_team_logo(
    wiki: &WikiClient,
    store: &ProfileStore,
    team: &str,
    width: Option<u32>,
) -> Result<PathBuf> {
    let filename = format!("{team}logo square.png");
    let url = wiki
        .image_url(&filename, width)?
        .ok_or_else(|| anyhow::anyhow!("no image record for {filename}"))?;
    let url = strip_revision_suffix(&url);

    let path = store.team_logo_path(team);
    wiki.download(url, &path)?;
    Ok(path)
}
