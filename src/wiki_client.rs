use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;

use crate::http_client::http_client;
use crate::query::{CargoQuery, CargoRow, parse_cargo_rows};

const DEFAULT_API_BASE: &str = "https://lol.fandom.com/api.php";
const API_USER_AGENT: &str = "lol_profiles/0.1 (player profile batch tool)";

/// Handle to the wiki's query API. Built once in `main` and passed by
/// reference into every fetch call.
pub struct WikiClient {
    http: &'static Client,
    api_base: String,
}

impl WikiClient {
    pub fn from_env() -> Result<Self> {
        let api_base = std::env::var("WIKI_API_BASE")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Ok(Self {
            http: http_client()?,
            api_base,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn cargo_body(&self, query: &CargoQuery) -> Result<String> {
        self.get_body(&query.to_params())
            .context("cargoquery request failed")
    }

    pub fn cargo_rows(&self, query: &CargoQuery) -> Result<Vec<CargoRow>> {
        parse_cargo_rows(&self.cargo_body(query)?)
    }

    /// Resolves an uploaded filename to its direct URL through the
    /// imageinfo endpoint. With a width, asks for a thumbnail rendition.
    pub fn image_url(&self, filename: &str, width: Option<u32>) -> Result<Option<String>> {
        let mut params = vec![
            ("action".to_string(), "query".to_string()),
            ("format".to_string(), "json".to_string()),
            ("titles".to_string(), format!("File:{filename}")),
            ("prop".to_string(), "imageinfo".to_string()),
            ("iiprop".to_string(), "url".to_string()),
        ];
        if let Some(width) = width {
            params.push(("iiurlwidth".to_string(), width.to_string()));
        }
        let body = self
            .get_body(&params)
            .context("imageinfo request failed")?;
        parse_image_url_json(&body, width.is_some())
    }

    pub fn download(&self, url: &str, path: &Path) -> Result<()> {
        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, API_USER_AGENT)
            .send()
            .context("download request failed")?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("http {status} downloading {url}");
        }
        let bytes = resp.bytes().context("failed reading download body")?;

        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
        Ok(())
    }

    fn get_body(&self, params: &[(String, String)]) -> Result<String> {
        let resp = self
            .http
            .get(&self.api_base)
            .query(params)
            .header(USER_AGENT, API_USER_AGENT)
            .send()
            .context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            anyhow::bail!("http {status}: {body}");
        }
        Ok(body)
    }
}

pub fn parse_image_url_json(raw: &str, prefer_thumb: bool) -> Result<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid imageinfo json")?;
    let Some(pages) = root
        .get("query")
        .and_then(|query| query.get("pages"))
        .and_then(Value::as_object)
    else {
        return Ok(None);
    };
    let Some(info) = pages
        .values()
        .next()
        .and_then(|page| page.get("imageinfo"))
        .and_then(Value::as_array)
        .and_then(|infos| infos.first())
    else {
        return Ok(None);
    };

    let url = if prefer_thumb {
        info.get("thumburl")
            .and_then(Value::as_str)
            .or_else(|| info.get("url").and_then(Value::as_str))
    } else {
        info.get("url").and_then(Value::as_str)
    };
    Ok(url.filter(|url| !url.is_empty()).map(str::to_string))
}
